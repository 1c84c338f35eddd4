//! Severity and certainty taxonomy (spec §3 Diagnostic, §7 Taxonomy).

use std::fmt;
use std::str::FromStr;

/// How serious a diagnostic is. Ordered roughly from "must fix" to
/// "only of interest to cppls itself".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    None,
    Error,
    Warning,
    Style,
    Performance,
    Portability,
    Information,
    Debug,
    Internal,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Style => "style",
            Severity::Performance => "performance",
            Severity::Portability => "portability",
            Severity::Information => "information",
            Severity::Debug => "debug",
            Severity::Internal => "internal",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "none" => Severity::None,
            "error" => Severity::Error,
            "warning" => Severity::Warning,
            "style" => Severity::Style,
            "performance" => Severity::Performance,
            "portability" => Severity::Portability,
            "information" => Severity::Information,
            "debug" => Severity::Debug,
            "internal" => Severity::Internal,
            other => return Err(format!("unknown severity '{other}'")),
        })
    }
}

/// Whether a diagnostic is certain (`normal`) or a best-effort guess
/// (`inconclusive`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Certainty {
    Normal,
    Inconclusive,
}

impl Certainty {
    pub fn is_inconclusive(self) -> bool {
        matches!(self, Certainty::Inconclusive)
    }
}

/// Diagnostic ids the checker host treats as sufficient reason to stop
/// running further checkers on this translation unit (spec §7
/// "Propagation").
pub const CRITICAL_ERROR_IDS: &[&str] = &[
    "cppcheckError",
    "cppcheckLimit",
    "internalAstError",
    "instantiationError",
    "internalError",
    "premium-internalError",
    "premium-invalidArgument",
    "premium-invalidLicense",
    "preprocessorErrorDirective",
    "syntaxError",
    "unknownMacro",
];

pub fn is_critical(id: &str) -> bool {
    CRITICAL_ERROR_IDS.contains(&id)
}
