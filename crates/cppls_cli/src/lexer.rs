//! A standalone lexer that turns raw source text into the
//! `(file, line, column, lexeme)` stream the core expects (spec §6
//! "Input... from the preprocessor"). Macro expansion, conditional
//! compilation, and `#include` resolution are a collaborator's job
//! (spec §1 "collaborators: ... the preprocessor"); this module only
//! does enough plain lexing — whitespace/comment skipping, directive
//! line extraction, classification into the categories
//! `cppls_tokens::Classification` names — to drive the pipeline
//! end-to-end from an already-unpreprocessed source file.

use cppls_tokens::{Classification, Directive, FileId, OperatorKind, PreprocessedToken};

const KEYWORDS: &[&str] = &[
    "alignas", "alignof", "asm", "auto", "bool", "break", "case", "catch", "char", "char16_t",
    "char32_t", "class", "const", "constexpr", "const_cast", "continue", "decltype", "default",
    "delete", "do", "double", "dynamic_cast", "else", "enum", "explicit", "export", "extern",
    "float", "for", "friend", "goto", "if", "inline", "int", "long", "mutable", "namespace",
    "new", "noexcept", "nullptr", "operator", "private", "protected", "public", "register",
    "reinterpret_cast", "return", "short", "signed", "sizeof", "static", "static_assert",
    "static_cast", "struct", "switch", "template", "this", "thread_local", "throw", "try",
    "typedef", "typeid", "typename", "union", "unsigned", "using", "virtual", "void", "volatile",
    "wchar_t", "while",
];

const OPERATORS: &[(&str, OperatorKind)] = &[
    ("<<=", OperatorKind::Assignment),
    (">>=", OperatorKind::Assignment),
    ("==", OperatorKind::Comparison),
    ("!=", OperatorKind::Comparison),
    ("<=", OperatorKind::Comparison),
    (">=", OperatorKind::Comparison),
    ("&&", OperatorKind::Logical),
    ("||", OperatorKind::Logical),
    ("++", OperatorKind::IncDec),
    ("--", OperatorKind::IncDec),
    ("->", OperatorKind::Arithmetic),
    ("::", OperatorKind::Arithmetic),
    ("+=", OperatorKind::Assignment),
    ("-=", OperatorKind::Assignment),
    ("*=", OperatorKind::Assignment),
    ("/=", OperatorKind::Assignment),
    ("%=", OperatorKind::Assignment),
    ("&=", OperatorKind::Assignment),
    ("|=", OperatorKind::Assignment),
    ("^=", OperatorKind::Assignment),
    ("<<", OperatorKind::Arithmetic),
    (">>", OperatorKind::Arithmetic),
    ("=", OperatorKind::Assignment),
    ("+", OperatorKind::Arithmetic),
    ("-", OperatorKind::Arithmetic),
    ("*", OperatorKind::Arithmetic),
    ("/", OperatorKind::Arithmetic),
    ("%", OperatorKind::Arithmetic),
    ("<", OperatorKind::Comparison),
    (">", OperatorKind::Comparison),
    ("!", OperatorKind::Logical),
    ("&", OperatorKind::Arithmetic),
    ("|", OperatorKind::Arithmetic),
    ("^", OperatorKind::Arithmetic),
    ("~", OperatorKind::Arithmetic),
];

/// Lexes one translation unit's source text, returning its code tokens
/// and the `#`-led lines pulled out as directives (spec §3 "Directive").
pub fn lex(file: FileId, source: &str) -> (Vec<PreprocessedToken>, Vec<Directive>) {
    let mut tokens = Vec::new();
    let mut directives = Vec::new();

    for (line_idx, raw_line) in source.lines().enumerate() {
        let line = (line_idx + 1) as u32;
        let trimmed = raw_line.trim_start();
        if trimmed.starts_with('#') {
            let column = (raw_line.len() - trimmed.len() + 1) as u32;
            directives.push(Directive { file, line, text: trimmed.to_string(), token_columns: vec![column] });
            continue;
        }
        lex_line(file, line, raw_line, &mut tokens);
    }
    (tokens, directives)
}

fn push(out: &mut Vec<PreprocessedToken>, file: FileId, line: u32, column: u32, lexeme: String, classification: Classification) {
    out.push(PreprocessedToken { file, line, column, lexeme, classification });
}

fn lex_line(file: FileId, line: u32, text: &str, out: &mut Vec<PreprocessedToken>) {
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0usize;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        if c == '/' && chars.get(i + 1) == Some(&'/') {
            break;
        }
        let start = i;
        let column = (i + 1) as u32;

        if c.is_ascii_digit() {
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '.' || chars[i] == '\'') {
                i += 1;
            }
            push(out, file, line, column, chars[start..i].iter().collect(), Classification::Number);
            continue;
        }

        if c == '_' || c.is_alphabetic() {
            while i < chars.len() && (chars[i] == '_' || chars[i].is_alphanumeric()) {
                i += 1;
            }
            let lexeme: String = chars[start..i].iter().collect();
            let classification = if lexeme == "true" || lexeme == "false" {
                Classification::Boolean
            } else if KEYWORDS.contains(&lexeme.as_str()) {
                Classification::Keyword
            } else {
                Classification::Name
            };
            push(out, file, line, column, lexeme, classification);
            continue;
        }

        if c == '"' {
            i += 1;
            while i < chars.len() && chars[i] != '"' {
                i += if chars[i] == '\\' { 2 } else { 1 };
            }
            i = (i + 1).min(chars.len());
            push(out, file, line, column, chars[start..i].iter().collect(), Classification::StringLiteral);
            continue;
        }

        if c == '\'' {
            i += 1;
            while i < chars.len() && chars[i] != '\'' {
                i += if chars[i] == '\\' { 2 } else { 1 };
            }
            i = (i + 1).min(chars.len());
            push(out, file, line, column, chars[start..i].iter().collect(), Classification::CharLiteral);
            continue;
        }

        if "(){}[]".contains(c) {
            i += 1;
            push(out, file, line, column, c.to_string(), Classification::Bracket);
            continue;
        }

        let lookahead: String = chars[i..(i + 3).min(chars.len())].iter().collect();
        match OPERATORS.iter().find(|(op, _)| lookahead.starts_with(op)) {
            Some((op, kind)) => {
                i += op.chars().count();
                push(out, file, line, column, (*op).to_string(), Classification::Operator(*kind));
            }
            None => {
                i += 1;
                push(out, file, line, column, c.to_string(), Classification::Other);
            }
        }
    }
}
