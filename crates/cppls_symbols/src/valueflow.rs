//! The value-flow query interface (spec §2 item 6, §GLOSSARY
//! "Value-flow: the cross-statement constant/range propagation
//! subsystem, specified only by its query interface"). Internals —
//! constant propagation, range analysis, symbolic execution — are an
//! explicit Non-goal; this crate only defines what a checker is allowed
//! to ask for.

use cppls_tokens::TokenId;

/// One value a token could take at runtime, as computed by whatever
/// value-flow engine is plugged in.
#[derive(Debug, Clone, PartialEq)]
pub enum PossibleValue {
    Int(i64),
    Float(f64),
    /// A symbolic value expressed relative to another token, e.g.
    /// "one past the end of the buffer `x` points into".
    Symbolic { base: TokenId, offset: i64 },
    Uninit,
}

/// Checkers query possible values through this trait rather than a
/// concrete engine type, so the value-flow implementation can be swapped
/// (or absent) without touching checker code (spec §9 "replace deep
/// inheritance ... with a trait-like interface").
pub trait ValueFlowQuery {
    /// All values `token` could plausibly hold, most-likely first.
    /// Empty means "no information", never "provably no values".
    fn possible_values(&self, token: TokenId) -> &[PossibleValue];

    /// `true` if `token`'s value set includes zero/null on some path.
    fn is_possibly_zero(&self, token: TokenId) -> bool {
        self.possible_values(token).iter().any(|v| matches!(v, PossibleValue::Int(0)))
    }
}

/// The default, always-present implementation: `DISABLE_VALUEFLOW` (spec
/// §6 Settings surface) or simply not having wired up an engine yet both
/// resolve to this — every query returns "no information" rather than
/// panicking or requiring an `Option<dyn ValueFlowQuery>` at call sites.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullValueFlow;

impl ValueFlowQuery for NullValueFlow {
    fn possible_values(&self, _token: TokenId) -> &[PossibleValue] {
        &[]
    }
}
