//! The diagnostic model (spec §3 Diagnostic, §4.2): construction with
//! `$symbol` templating, the length-prefixed wire format, XML/plist
//! rendering, and the dedup/delivery sink used by the checker host.

pub mod diagnostic;
pub mod location;
pub mod plist;
pub mod severity;
pub mod sink;
pub mod template;
pub mod wire;
pub mod xml;

pub use diagnostic::{fix_invalid_chars, Diagnostic};
pub use location::FileLocation;
pub use plist::to_plist;
pub use severity::{is_critical, Certainty, Severity, CRITICAL_ERROR_IDS};
pub use sink::{CollectingSink, DedupSink, DiagnosticSink};
pub use template::{render as render_template, DEFAULT_TEMPLATE};
pub use wire::{deserialize, serialize, DeserializationError};
pub use xml::{to_xml, xml_footer, xml_header};
