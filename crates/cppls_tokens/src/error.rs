//! Typed error values threaded through token-list operations and, later,
//! the normalization pipeline (spec §7).
//!
//! The teacher's crates (`cppls_base::SpannedError`) hand-roll a
//! `Display`-implementing error carrying a location rather than reaching for
//! `thiserror`; `PassError` follows the same shape, replacing the byte-range
//! `Span` with a `TokenId` since errors here are anchored to stream
//! positions, not source byte offsets.

use crate::token::TokenId;
use std::fmt;

/// How a pass's failure should propagate (spec §7 "Propagation").
#[derive(Debug, Clone)]
pub enum PassError {
    /// The pass could not make sense of this region but the stream
    /// invariants still hold; the caller may continue with remaining
    /// passes after converting this into an `information`/`debug`/`style`
    /// diagnostic.
    Recoverable { token: Option<TokenId>, message: String },
    /// An invariant was violated (mismatched brackets at pass exit, a
    /// cross-link pointing at a tombstoned token, ...). Fatal at the
    /// translation-unit level: the pipeline stops after converting this
    /// into a diagnostic.
    Fatal { token: Option<TokenId>, message: String },
}

impl PassError {
    pub fn recoverable(token: Option<TokenId>, message: impl Into<String>) -> Self {
        PassError::Recoverable { token, message: message.into() }
    }

    pub fn fatal(token: Option<TokenId>, message: impl Into<String>) -> Self {
        PassError::Fatal { token, message: message.into() }
    }

    pub fn token(&self) -> Option<TokenId> {
        match self {
            PassError::Recoverable { token, .. } | PassError::Fatal { token, .. } => *token,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            PassError::Recoverable { message, .. } | PassError::Fatal { message, .. } => message,
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, PassError::Fatal { .. })
    }
}

impl fmt::Display for PassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassError::Recoverable { message, .. } => write!(f, "{message}"),
            PassError::Fatal { message, .. } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for PassError {}

pub type PassResult<T> = std::result::Result<T, PassError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_reports_is_fatal() {
        let err = PassError::fatal(Some(TokenId(3)), "mismatched brackets");
        assert!(err.is_fatal());
        assert_eq!(err.token(), Some(TokenId(3)));
    }

    #[test]
    fn recoverable_is_not_fatal() {
        let err = PassError::recoverable(None, "could not simplify typedef");
        assert!(!err.is_fatal());
    }
}
