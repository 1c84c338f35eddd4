//! Lowers the raw, preprocessed token stream for one translation unit
//! into the canonical form the symbol graph and checks build on: the
//! "normalize" stage of the pipeline (spec §4). The heavy lifting is
//! about fifty individual passes (`passes`), run in a fixed order
//! (`pipeline`), with configuration (`config`) gating the ones that are
//! standard- or language-specific. `varid` is kept as its own module
//! rather than folded into `passes` since it's two cooperating passes
//! sharing scope-tracking state, not a single self-contained rewrite.

pub mod config;
pub mod pass;
pub mod passes;
pub mod pipeline;
pub mod typedef;
pub mod varid;

pub use config::{CppStandard, PipelineConfig};
pub use pass::{Pass, PassContext};
pub use pipeline::{passes as pipeline_passes, run as run_pipeline};
pub use typedef::{TypedefInfo, TypedefSimplification, UsingAliasSimplification};
