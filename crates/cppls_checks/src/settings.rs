//! The subset of the settings surface (spec §6 "Settings surface") the
//! checker host itself consults: which severity tiers are enabled, and
//! the two header-pruning gates. The rest of the surface (output
//! format, build-dir, template rendering, ...) belongs to the CLI
//! composition root, the same split `cppls_normalize::config` makes for
//! the pipeline's own slice of settings.

use cppls_diag::Severity;

/// Which diagnostic tiers are enabled for this run (spec §6
/// `severity.{warning,style,performance,portability,information,debug}`).
#[derive(Debug, Clone, Copy)]
pub struct SeverityGates {
    pub warning: bool,
    pub style: bool,
    pub performance: bool,
    pub portability: bool,
    pub information: bool,
    pub debug: bool,
}

impl Default for SeverityGates {
    fn default() -> Self {
        SeverityGates { warning: true, style: false, performance: false, portability: false, information: false, debug: false }
    }
}

impl SeverityGates {
    /// Whether a diagnostic of the given severity should be delivered
    /// at all. `Error`, `None`, and `Internal` are never gated off —
    /// only the six tiers settings actually name are optional.
    pub fn allows(&self, severity: Severity) -> bool {
        match severity {
            Severity::Warning => self.warning,
            Severity::Style => self.style,
            Severity::Performance => self.performance,
            Severity::Portability => self.portability,
            Severity::Information => self.information,
            Severity::Debug => self.debug,
            Severity::Error | Severity::None | Severity::Internal => true,
        }
    }
}

/// Checker-host-relevant configuration for one run.
#[derive(Debug, Clone)]
pub struct CheckSettings {
    pub severities: SeverityGates,
    pub check_headers: bool,
    pub check_unused_templates: bool,
    /// Emit progress callbacks every N tokens processed (spec §4.7
    /// "progress is reported every N tokens"), not at all when `None`.
    pub report_progress_every: Option<usize>,
    pub emit_duplicates: bool,
    /// Selects `verbose_message` over `short_message` in the report
    /// path (spec §4.7 "verbose-vs-short selection").
    pub verbose_output: bool,
}

impl Default for CheckSettings {
    fn default() -> Self {
        CheckSettings {
            severities: SeverityGates::default(),
            check_headers: false,
            check_unused_templates: false,
            report_progress_every: None,
            emit_duplicates: false,
            verbose_output: false,
        }
    }
}
