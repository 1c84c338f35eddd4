//! The checker host (spec §2 item 7, §4.7 "Checker host"): the
//! read-only view a checker gets (`context`), the trait it implements
//! and the registry that holds them (`check`), the suppression lookup
//! (`suppression`), the host-level settings slice (`settings`), and the
//! `report`/`progress` gate every check's diagnostics pass through
//! (`host`).

pub mod check;
pub mod context;
pub mod host;
pub mod settings;
pub mod suppression;

pub use check::{Check, CheckMessage, CheckRegistry};
pub use context::AnalysisContext;
pub use host::CheckerHost;
pub use settings::{CheckSettings, SeverityGates};
pub use suppression::{NoSuppressions, SuppressionDb, SuppressionFilter, SuppressionRule};
