//! The token model and mutable token stream (spec §3, §4.1).
//!
//! This crate owns exactly the things every later pass needs to share a
//! vocabulary for: what a token is, how it is classified, where it came
//! from, and the doubly-linked stream that holds a translation unit's
//! tokens in order. It knows nothing about C++ grammar beyond bracket
//! matching — parsing structure out of the stream is `cppls_normalize`'s
//! job, and attaching meaning to that structure is `cppls_symbols`'s.

pub mod directive;
pub mod error;
pub mod files;
pub mod flags;
pub mod list;
pub mod platform;
pub mod token;

pub use directive::{has_conditional_between, Directive};
pub use error::{PassError, PassResult};
pub use files::{FileId, FileTable};
pub use flags::TokenFlags;
pub use list::{PreprocessedToken, TokenIter, TokenList};
pub use platform::{Platform, TypeSizes};
pub use token::{
    Classification, FuncRecordId, Location, OperatorKind, ScopeId, Token, TokenId, TokenLinks,
    TypeRecordId, ValueSetId, VarRecordId,
};
