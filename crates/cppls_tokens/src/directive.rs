//! Preprocessor directives preserved alongside the token stream (spec §3
//! Directive, §6 Input item 2).
//!
//! Directives answer questions like "is there a conditional between these
//! two points?" or "was this struct declared under `#pragma pack(1)`?" —
//! queries the normalization pipeline and checkers both need but that have
//! no token-stream representation of their own once macro expansion is done
//! upstream.

use crate::files::FileId;

/// A single preprocessor line (`#if`, `#pragma`, `#define`, ...).
#[derive(Debug, Clone)]
pub struct Directive {
    pub file: FileId,
    pub line: u32,
    pub text: String,
    /// Column of each token that made up this directive's text, in order;
    /// used to map a token in the directive's "rendered" text back to its
    /// original position when it was recognized as a surrogate (e.g.
    /// `#pragma pack`) rather than expanded away.
    pub token_columns: Vec<u32>,
}

impl Directive {
    pub fn new(file: FileId, line: u32, text: impl Into<String>) -> Self {
        Directive { file, line, text: text.into(), token_columns: Vec::new() }
    }

    /// True if `text` is a conditional-compilation directive
    /// (`#if`/`#ifdef`/`#ifndef`/`#elif`/`#else`/`#endif`).
    pub fn is_conditional(&self) -> bool {
        let t = self.text.trim_start();
        ["#if", "#ifdef", "#ifndef", "#elif", "#else", "#endif"]
            .iter()
            .any(|kw| t.starts_with(kw))
    }

    /// True if `text` is `#pragma pack(...)`, used by checkers that need to
    /// know a struct was declared under a non-default alignment.
    pub fn is_pragma_pack(&self) -> bool {
        self.text.trim_start().starts_with("#pragma pack")
    }
}

/// Answers "is there a conditional directive strictly between these two
/// lines in `file`?" — the query checkers use to decide whether two
/// branches of the same `if` are mutually exclusive at the preprocessor
/// level.
pub fn has_conditional_between(directives: &[Directive], file: FileId, from_line: u32, to_line: u32) -> bool {
    directives
        .iter()
        .any(|d| d.file == file && d.line > from_line && d.line < to_line && d.is_conditional())
}
