//! The checker trait and registry (spec §9 "replace deep inheritance
//! hierarchy of checks... with a trait-like interface... registered in
//! a registry. No runtime downcasts needed").
//!
//! Individual checkers — null-deref, buffer-overflow, style rules,
//! MISRA/AUTOSAR mappings — are out of scope here; this module is the
//! trait they implement and the registry that holds them, not the
//! rules themselves.

use crate::context::AnalysisContext;
use cppls_diag::{DiagnosticSink, Severity};

/// One diagnostic id a check is able to produce, for self-documenting
/// listings (cppcheck's `--errorlist`) independent of ever running it.
#[derive(Debug, Clone)]
pub struct CheckMessage {
    pub id: String,
    pub severity: Severity,
    pub description: String,
}

/// A single checker. `sink` is a shared reference — every
/// [`DiagnosticSink`] method takes `&self` and relies on interior
/// mutability (a mutex around the seen-set, a mutex around whatever
/// backs `out`), so a check never needs its own exclusive handle to
/// deliver a diagnostic.
pub trait Check: Send + Sync {
    fn name(&self) -> &str;
    fn run(&self, ctx: &AnalysisContext, sink: &dyn DiagnosticSink);
    /// The diagnostics this check can emit, for listings. Empty by
    /// default since most checks are identified well enough by `name`.
    fn messages(&self) -> Vec<CheckMessage> {
        Vec::new()
    }
}

/// Holds every registered check, in registration order — the order
/// they run in, since diagnostic ordering is "the order they enter the
/// sink" (spec §5 "Ordering guarantees") and checks do not run
/// concurrently with each other inside one translation unit (spec §4.7
/// "single-threaded per translation unit").
#[derive(Default)]
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        CheckRegistry::default()
    }

    pub fn register(&mut self, check: Box<dyn Check>) -> &mut Self {
        self.checks.push(check);
        self
    }

    pub fn checks(&self) -> &[Box<dyn Check>] {
        &self.checks
    }

    pub fn all_messages(&self) -> Vec<CheckMessage> {
        self.checks.iter().flat_map(|c| c.messages()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cppls_diag::{Certainty, Diagnostic};

    struct Counter;

    impl Check for Counter {
        fn name(&self) -> &str {
            "counter"
        }

        fn run(&self, _ctx: &AnalysisContext, sink: &dyn DiagnosticSink) {
            sink.report(Diagnostic::new(vec![], "a.cpp", Severity::Style, "counterRan", "ran", Certainty::Normal));
        }

        fn messages(&self) -> Vec<CheckMessage> {
            vec![CheckMessage { id: "counterRan".into(), severity: Severity::Style, description: "ran once".into() }]
        }
    }

    #[test]
    fn registry_preserves_registration_order_and_collects_messages() {
        let mut registry = CheckRegistry::new();
        registry.register(Box::new(Counter));
        assert_eq!(registry.checks().len(), 1);
        assert_eq!(registry.checks()[0].name(), "counter");
        assert_eq!(registry.all_messages().len(), 1);
    }
}
