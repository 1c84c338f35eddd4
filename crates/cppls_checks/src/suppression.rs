//! The suppression database (spec §GLOSSARY "Suppression: a rule that
//! filters diagnostics before delivery"; spec §5 "Shared-resource
//! policy": "read-mostly... loaded once at start-of-analysis and
//! treated as immutable... readers take no lock"). Modeled as a trait
//! so the checker host depends on the lookup, not a concrete rule
//! engine — the same split `cppls_symbols::ValueFlowQuery` makes for
//! value-flow.

use cppls_diag::Diagnostic;

/// One suppression rule: an error id (`"*"` matches any id), an
/// optional file (substring match against `file0`, matching cppcheck's
/// own suppression-file semantics), and an optional line.
#[derive(Debug, Clone)]
pub struct SuppressionRule {
    pub id: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl SuppressionRule {
    /// Parses cppcheck's own suppression-line shape: `id[:file[:line]]`.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.splitn(3, ':');
        let id = parts.next()?.trim();
        if id.is_empty() {
            return None;
        }
        let file = parts.next().map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        let line = parts.next().and_then(|s| s.trim().parse().ok());
        Some(SuppressionRule { id: id.to_string(), file, line })
    }

    pub fn matches(&self, diagnostic: &Diagnostic) -> bool {
        if self.id != "*" && self.id != diagnostic.id {
            return false;
        }
        if let Some(file) = &self.file {
            if !diagnostic.file0.contains(file.as_str()) {
                return false;
            }
        }
        if let Some(line) = self.line {
            let matches_line = diagnostic.call_stack.last().map(|loc| loc.line as u32 == line).unwrap_or(false);
            if !matches_line {
                return false;
            }
        }
        true
    }
}

/// What the checker host's `report` path consults before delivering a
/// diagnostic (spec §4.7 "suppression lookup").
pub trait SuppressionFilter {
    fn is_suppressed(&self, diagnostic: &Diagnostic) -> bool;
}

/// The always-present default: nothing is suppressed. Not having loaded
/// a suppression file and having loaded an empty one both resolve to
/// this, the same way `NullValueFlow` stands in for "no engine wired up".
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSuppressions;

impl SuppressionFilter for NoSuppressions {
    fn is_suppressed(&self, _diagnostic: &Diagnostic) -> bool {
        false
    }
}

/// A loaded set of rules, read without locking once construction has
/// finished (spec §5 "readers of suppressions take no lock").
#[derive(Debug, Default, Clone)]
pub struct SuppressionDb {
    rules: Vec<SuppressionRule>,
}

impl SuppressionDb {
    pub fn new(rules: Vec<SuppressionRule>) -> Self {
        SuppressionDb { rules }
    }

    pub fn rules(&self) -> &[SuppressionRule] {
        &self.rules
    }
}

impl SuppressionFilter for SuppressionDb {
    fn is_suppressed(&self, diagnostic: &Diagnostic) -> bool {
        self.rules.iter().any(|rule| rule.matches(diagnostic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cppls_diag::{Certainty, FileLocation, Severity};

    fn diag(id: &str, file: &str, line: i32) -> Diagnostic {
        Diagnostic::new(vec![FileLocation::new(file, line, 1)], file, Severity::Style, id, "msg", Certainty::Normal)
    }

    #[test]
    fn wildcard_id_suppresses_anything_in_the_named_file() {
        let db = SuppressionDb::new(vec![SuppressionRule { id: "*".into(), file: Some("foo.cpp".into()), line: None }]);
        assert!(db.is_suppressed(&diag("unusedVariable", "foo.cpp", 10)));
        assert!(!db.is_suppressed(&diag("unusedVariable", "bar.cpp", 10)));
    }

    #[test]
    fn exact_id_file_and_line_must_all_match() {
        let db = SuppressionDb::new(vec![SuppressionRule { id: "unusedVariable".into(), file: Some("foo.cpp".into()), line: Some(10) }]);
        assert!(db.is_suppressed(&diag("unusedVariable", "foo.cpp", 10)));
        assert!(!db.is_suppressed(&diag("unusedVariable", "foo.cpp", 11)));
        assert!(!db.is_suppressed(&diag("otherId", "foo.cpp", 10)));
    }

    #[test]
    fn parse_accepts_id_only_id_file_and_id_file_line_forms() {
        assert!(matches!(SuppressionRule::parse("unusedVariable"), Some(SuppressionRule { file: None, line: None, .. })));
        let with_file = SuppressionRule::parse("unusedVariable:foo.cpp").unwrap();
        assert_eq!(with_file.file.as_deref(), Some("foo.cpp"));
        assert_eq!(with_file.line, None);
        let with_line = SuppressionRule::parse("unusedVariable:foo.cpp:42").unwrap();
        assert_eq!(with_line.line, Some(42));
    }

    #[test]
    fn no_suppressions_never_suppresses() {
        assert!(!NoSuppressions.is_suppressed(&diag("x", "foo.cpp", 1)));
    }
}
