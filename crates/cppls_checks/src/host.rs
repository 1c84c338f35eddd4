//! The checker host itself (spec §4.7): the `report` path (severity
//! gating, suppression lookup, delivery) and the `progress` path
//! (percent-complete callbacks every N tokens), wired around whatever
//! [`DiagnosticSink`] the composition root constructed (typically a
//! `DedupSink` — dedup insertion lives there, not here, since it's
//! already mutexed and sink-shaped).
//!
//! `CheckerHost` is itself a [`DiagnosticSink`]: it's what gets handed
//! to [`Check::run`], so a check's `report` calls always pass through
//! the gating below before reaching the real sink underneath.

use crate::check::CheckRegistry;
use crate::context::AnalysisContext;
use crate::settings::CheckSettings;
use crate::suppression::{NoSuppressions, SuppressionFilter};
use cppls_diag::{is_critical, Diagnostic, DiagnosticSink};
use std::sync::atomic::{AtomicBool, Ordering};

pub struct CheckerHost<S, F = NoSuppressions> {
    sink: S,
    suppressions: F,
    settings: CheckSettings,
    /// Set once a diagnostic with a critical id has passed through
    /// `report` (spec §7 "sufficient reason to skip remaining checkers
    /// on this TU"). Checked, not cleared, for the rest of this host's
    /// lifetime — one host is built fresh per translation unit.
    critical_hit: AtomicBool,
}

impl<S: DiagnosticSink> CheckerHost<S, NoSuppressions> {
    pub fn new(sink: S, settings: CheckSettings) -> Self {
        CheckerHost { sink, suppressions: NoSuppressions, settings, critical_hit: AtomicBool::new(false) }
    }
}

impl<S: DiagnosticSink, F: SuppressionFilter> CheckerHost<S, F> {
    pub fn with_suppressions(sink: S, suppressions: F, settings: CheckSettings) -> Self {
        CheckerHost { sink, suppressions, settings, critical_hit: AtomicBool::new(false) }
    }

    pub fn settings(&self) -> &CheckSettings {
        &self.settings
    }

    /// The sink this host wraps, for callers that need to inspect what
    /// was delivered once analysis has finished (e.g. a `CollectingSink`
    /// backing the final report write).
    pub fn inner_sink(&self) -> &S {
        &self.sink
    }

    /// Whether a critical diagnostic has already passed through this
    /// host, and remaining checks for this translation unit should be
    /// skipped.
    pub fn critical_hit(&self) -> bool {
        self.critical_hit.load(Ordering::Relaxed)
    }

    /// The message a report writer should use, selecting the verbose
    /// form when `verbose_output` is set and one was produced (spec
    /// §4.7 "verbose-vs-short selection").
    pub fn selected_message<'d>(&self, diagnostic: &'d Diagnostic) -> &'d str {
        if self.settings.verbose_output && !diagnostic.verbose_message.is_empty() {
            &diagnostic.verbose_message
        } else {
            &diagnostic.short_message
        }
    }

    /// Delivers diagnostics the normalization pipeline itself raised
    /// (`PassContext::emit`, spec §7 "Propagation") through the same
    /// gate checker-emitted diagnostics pass through, so a critical
    /// pipeline diagnostic also stops this TU's checks from running.
    pub fn deliver_pipeline_diagnostics(&self, diagnostics: Vec<Diagnostic>) {
        for diagnostic in diagnostics {
            self.report(diagnostic);
        }
    }

    /// Runs every registered check in order, stopping early once a
    /// critical diagnostic has been seen (spec §4.7 "single-threaded
    /// per translation unit"; spec §7).
    pub fn run_checks(&self, ctx: &AnalysisContext, registry: &CheckRegistry) {
        for check in registry.checks() {
            if self.critical_hit() {
                break;
            }
            check.run(ctx, self);
        }
    }

    /// Reports progress once every `report_progress_every` tokens of
    /// `total`, rather than on every call (spec §4.7 "progress is
    /// reported every N tokens... during long-running passes").
    pub fn report_token_progress(&self, file: &str, stage: &str, processed: usize, total: usize) {
        let Some(every) = self.settings.report_progress_every else { return };
        if every == 0 || total == 0 {
            return;
        }
        if processed % every != 0 && processed != total {
            return;
        }
        let percent = ((processed.min(total) * 100) / total) as u8;
        self.sink.progress(file, stage, percent);
    }
}

impl<S: DiagnosticSink, F: SuppressionFilter> DiagnosticSink for CheckerHost<S, F> {
    fn report(&self, diagnostic: Diagnostic) {
        if !self.settings.severities.allows(diagnostic.severity) {
            return;
        }
        if self.suppressions.is_suppressed(&diagnostic) {
            return;
        }
        if is_critical(&diagnostic.id) {
            self.critical_hit.store(true, Ordering::Relaxed);
        }
        self.sink.report(diagnostic);
    }

    fn progress(&self, file: &str, stage: &str, percent: u8) {
        self.sink.progress(file, stage, percent);
    }

    fn out(&self, message: &str, color: Option<&str>) {
        self.sink.out(message, color);
    }
}
