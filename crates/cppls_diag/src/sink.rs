//! The diagnostic delivery interface (spec §6 Output: "Diagnostics,
//! emitted via a sink interface with three methods: `report(Diagnostic)`,
//! `progress(file, stage, percent)`, `out(message, color)`") and the
//! mutexed deduplication wrapper (spec §4.2 "Deduplication", spec §5
//! "Shared-resource policy").

use crate::diagnostic::Diagnostic;
use crate::wire::serialize;
use std::collections::HashSet;
use std::sync::Mutex;

/// What a translation-unit worker delivers diagnostics, progress, and
/// free-form output to. Implemented by the CLI's report writers; the
/// checker host only ever depends on this trait.
pub trait DiagnosticSink {
    fn report(&self, diagnostic: Diagnostic);
    fn progress(&self, file: &str, stage: &str, percent: u8);
    fn out(&self, message: &str, color: Option<&str>);
}

/// Wraps an inner sink with the checker host's dedup policy: the second
/// occurrence of a diagnostic whose wire-serialized form is identical to
/// one already seen is silently dropped, unless `emit_duplicates` is set
/// (spec §6 `emit-duplicates`). Mutation of the seen-set is mutexed, the
/// only piece of state genuinely shared across translation-unit workers
/// (spec §5 "Shared-resource policy").
pub struct DedupSink<S> {
    inner: S,
    seen: Mutex<HashSet<String>>,
    emit_duplicates: bool,
}

impl<S: DiagnosticSink> DedupSink<S> {
    pub fn new(inner: S, emit_duplicates: bool) -> Self {
        DedupSink { inner, seen: Mutex::new(HashSet::new()), emit_duplicates }
    }

    /// Number of distinct diagnostics delivered so far.
    pub fn seen_count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    /// The sink this wraps, for callers that need to read back what
    /// was delivered once a run has finished.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: DiagnosticSink> DiagnosticSink for DedupSink<S> {
    fn report(&self, diagnostic: Diagnostic) {
        if !self.emit_duplicates {
            let key = serialize(&diagnostic);
            let mut seen = self.seen.lock().unwrap();
            if !seen.insert(key) {
                return;
            }
        }
        self.inner.report(diagnostic);
    }

    fn progress(&self, file: &str, stage: &str, percent: u8) {
        self.inner.progress(file, stage, percent);
    }

    fn out(&self, message: &str, color: Option<&str>) {
        self.inner.out(message, color);
    }
}

/// A sink that only records what it was given, for tests and for the
/// non-streaming report writers that need the full diagnostic list at
/// the end of a run.
#[derive(Default)]
pub struct CollectingSink {
    pub diagnostics: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics.lock().unwrap().push(diagnostic);
    }

    fn progress(&self, _file: &str, _stage: &str, _percent: u8) {}

    fn out(&self, _message: &str, _color: Option<&str>) {}
}
