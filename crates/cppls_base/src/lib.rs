#![cfg_attr(docsrs, feature(doc_cfg))]

//! # cppls-base
//!
//! Pure structural atoms for the cppls workspace.
//!
//! This crate provides the foundational types used throughout cppls:
//!
//! - [`Arena`] — Bump allocation for stable references into the read-only
//!   AST and symbol graph built after normalization.
//! - [`Interner`]/[`Symbol`] — String interning for O(1) equality
//! - [`Span`] — Source location tracking
//! - [`SpannedError`]/[`Result`] — Errors with source positions
//!
//! # Design Principles
//!
//! This crate has **no knowledge of C/C++ syntax or I/O**. It provides only
//! generic, reusable infrastructure that higher-level crates build upon.
//!
//! The mutable token stream (`cppls_tokens::TokenList`) does *not* use
//! [`Arena`] — tokens are spliced, relinked, and logically deleted
//! throughout the normalization pipeline, which an append-only bump
//! allocator cannot support. `Arena` is reserved for the read-only AST and
//! symbol graph built once normalization is complete.
//!
//! # Example
//!
//! ```
//! use cppls_base::{Arena, Interner, Span};
//!
//! let arena: Arena<&str> = Arena::new();
//! let mut interner = Interner::new();
//!
//! let hello = interner.intern("hello");
//! let span = Span::new(0, 5);
//!
//! let allocated = arena.alloc("hello");
//! assert_eq!(*allocated, "hello");
//! ```

pub mod arena;
pub mod intern;
pub mod span;
pub mod error;

pub use arena::Arena;
pub use intern::{Interner, Symbol, SymbolEq};
pub use span::Span;
pub use error::{SpannedError, Result};
