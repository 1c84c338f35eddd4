//! Typedef substitution and `using`-alias resolution (spec §4.4). Runs
//! as its own stage between step 9 (extra `template` keyword removal)
//! and step 10 in `pipeline::passes` — cppcheck's own tokenizer runs
//! `simplifyTypedef`/`simplifyUsing` early, well before most of the
//! structural rewrites, since later passes (K&R splitting, struct-decl
//! splitting, ...) assume typedef'd types have already been expanded.
//!
//! Function-pointer typedefs, pointer-to-member, array-in-return-position,
//! and nested type definitions lifted out of an alias are recorded in
//! `TypedefInfo` but not substituted — cppcheck's own `simplifyTypedef`
//! gives up on some of these too and leaves a debug diagnostic rather
//! than guessing (spec §9 "Open questions in source behavior").
//!
//! Every typedef/using alias, substituted or not, is also recorded as a
//! `typedefInfo`-id `Debug` diagnostic carrying its `used` flag (spec §6
//! `<typedef-info>`); `cppls_cli::report` turns these into the dump
//! section once the `debug` severity tier lets them through.

use crate::pass::{Pass, PassContext};
use cppls_diag::{Certainty, Diagnostic, FileLocation, Severity};
use cppls_tokens::{Classification, PassResult, TokenId};

/// Per declared typedef/using (spec §3 `TypedefInfo`).
#[derive(Debug, Clone)]
pub struct TypedefInfo {
    pub name: String,
    pub file: cppls_tokens::FileId,
    pub line: u32,
    pub column: u32,
    pub used: bool,
    pub is_function_pointer: bool,
}

struct Candidate {
    info: TypedefInfo,
    /// `[type_start, type_end]` inclusive, the `T` in `typedef T name;`.
    type_range: Option<(TokenId, TokenId)>,
    name_token: TokenId,
}

pub struct TypedefSimplification;

impl Pass for TypedefSimplification {
    fn name(&self) -> &'static str {
        "simplify-typedef"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let candidates = collect(ctx, "typedef");
        run_substitution(ctx, candidates, false);
        Ok(())
    }
}

pub struct UsingAliasSimplification;

impl Pass for UsingAliasSimplification {
    fn name(&self) -> &'static str {
        "simplify-using"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        split_comma_using(ctx);
        rewrite_using_namespace_member(ctx);
        let candidates = collect_using(ctx);
        run_substitution(ctx, candidates, true);
        Ok(())
    }
}

/// `using N::x;` -> `using x = N::x;` (spec §4.4).
fn rewrite_using_namespace_member(ctx: &mut PassContext) {
    let Some(mut cursor) = ctx.tokens.head() else { return };
    loop {
        if ctx.tokens.get(cursor).lexeme == "using" {
            if let Some(after_alias) = try_rewrite_namespace_member(ctx, cursor) {
                cursor = after_alias;
                continue;
            }
        }
        match ctx.tokens.next(cursor) {
            Some(n) => cursor = n,
            None => break,
        }
    }
}

fn try_rewrite_namespace_member(ctx: &mut PassContext, kw: TokenId) -> Option<TokenId> {
    let first = ctx.tokens.next(kw)?;
    if ctx.tokens.get(first).lexeme == "=" {
        return None; // already `using Name = Type;`
    }
    // Find `name ;` at the end of a `::`-qualified chain.
    let mut cursor = first;
    let mut last_name = None;
    loop {
        let tok = ctx.tokens.get(cursor);
        if tok.lexeme == ";" {
            break;
        }
        if tok.classification.is_name() {
            last_name = Some(cursor);
        }
        cursor = ctx.tokens.next(cursor)?;
    }
    let last_name = last_name?;
    let name_lex = ctx.tokens.get(last_name).lexeme.clone();
    ctx.tokens.insert_after(kw, "=", cppls_tokens::Classification::Other);
    ctx.tokens.insert_after(kw, name_lex, Classification::Name);
    Some(cursor)
}

/// `using A = T, B = U;` -> `using A = T; using B = U;`.
fn split_comma_using(ctx: &mut PassContext) {
    let Some(mut cursor) = ctx.tokens.head() else { return };
    loop {
        if ctx.tokens.get(cursor).lexeme == "using" {
            split_one(ctx, cursor);
        }
        match ctx.tokens.next(cursor) {
            Some(n) => cursor = n,
            None => break,
        }
    }
}

fn split_one(ctx: &mut PassContext, kw: TokenId) {
    let Some(semi) = find_top_level(ctx, kw, ";", 0) else { return };
    let Some(comma) = find_top_level_before(ctx, kw, semi, ",") else { return };
    // Insert `; using` in place of the comma, so `A = T, B = U;` becomes
    // `A = T ; using B = U;`.
    ctx.tokens.insert_after(comma, "using", Classification::Keyword);
    ctx.tokens.insert_after(comma, ";", Classification::Other);
    let after = ctx.tokens.next(comma);
    if let Some(after) = after {
        let _ = ctx.tokens.erase(comma, Some(after));
    }
}

fn find_top_level(ctx: &PassContext, from: TokenId, lexeme: &str, start_depth: i32) -> Option<TokenId> {
    let mut cursor = ctx.tokens.next(from)?;
    let mut depth = start_depth;
    loop {
        match ctx.tokens.get(cursor).lexeme.as_str() {
            "(" | "[" | "<" => depth += 1,
            ")" | "]" | ">" => depth -= 1,
            l if l == lexeme && depth == 0 => return Some(cursor),
            _ => {}
        }
        cursor = ctx.tokens.next(cursor)?;
    }
}

fn find_top_level_before(ctx: &PassContext, from: TokenId, limit: TokenId, lexeme: &str) -> Option<TokenId> {
    let mut cursor = ctx.tokens.next(from)?;
    let mut depth = 0i32;
    while cursor != limit {
        match ctx.tokens.get(cursor).lexeme.as_str() {
            "(" | "[" | "<" => depth += 1,
            ")" | "]" | ">" => depth -= 1,
            l if l == lexeme && depth == 0 => return Some(cursor),
            _ => {}
        }
        cursor = ctx.tokens.next(cursor)?;
    }
    None
}

/// Tracks, for every `{`, whether its body is treated as namespace/global
/// scope (typedefs there are recorded) or not (class/function body,
/// recorded only for completeness but not collected as a global alias —
/// spec §4.4 "at global or namespace scope").
fn is_namespace_like(ctx: &PassContext, open_brace: TokenId) -> bool {
    match ctx.tokens.prev(open_brace) {
        None => true,
        Some(p) => {
            // Walk back over a possible `Name { ... } ::` chain to the
            // introducing keyword.
            let mut cursor = p;
            loop {
                let lex = ctx.tokens.get(cursor).lexeme.clone();
                if lex == "namespace" {
                    return true;
                }
                if matches!(lex.as_str(), "class" | "struct" | "union" | "enum") {
                    return false;
                }
                if ctx.tokens.get(cursor).classification.is_name() || lex == "::" {
                    match ctx.tokens.prev(cursor) {
                        Some(pp) => cursor = pp,
                        None => return false,
                    }
                } else {
                    return false;
                }
            }
        }
    }
}

fn collect(ctx: &PassContext, keyword: &str) -> Vec<Candidate> {
    let mut out = Vec::new();
    let mut scope_is_namespace: Vec<bool> = vec![true];
    let Some(mut cursor) = ctx.tokens.head() else { return out };
    loop {
        let lex = ctx.tokens.get(cursor).lexeme.clone();
        if lex == "{" {
            let ns = is_namespace_like(ctx, cursor);
            scope_is_namespace.push(ns);
        } else if lex == "}" {
            if scope_is_namespace.len() > 1 {
                scope_is_namespace.pop();
            }
        } else if lex == keyword && *scope_is_namespace.last().unwrap_or(&false) {
            if let Some(candidate) = parse_typedef(ctx, cursor) {
                out.push(candidate);
            }
        }
        match ctx.tokens.next(cursor) {
            Some(n) => cursor = n,
            None => break,
        }
    }
    out
}

fn collect_using(ctx: &PassContext) -> Vec<Candidate> {
    let mut out = Vec::new();
    let mut scope_is_namespace: Vec<bool> = vec![true];
    let Some(mut cursor) = ctx.tokens.head() else { return out };
    loop {
        let lex = ctx.tokens.get(cursor).lexeme.clone();
        if lex == "{" {
            scope_is_namespace.push(is_namespace_like(ctx, cursor));
        } else if lex == "}" {
            if scope_is_namespace.len() > 1 {
                scope_is_namespace.pop();
            }
        } else if lex == "using" && *scope_is_namespace.last().unwrap_or(&false) {
            if let Some(candidate) = parse_using(ctx, cursor) {
                out.push(candidate);
            }
        }
        match ctx.tokens.next(cursor) {
            Some(n) => cursor = n,
            None => break,
        }
    }
    out
}

/// `typedef T name ;` or `typedef T name [ N ] ;` or the function-pointer
/// form `typedef T ( * name ) ( params ) ;`.
fn parse_typedef(ctx: &PassContext, kw: TokenId) -> Option<Candidate> {
    let start = ctx.tokens.next(kw)?;
    let semi = find_top_level(ctx, kw, ";", 0)?;
    if let Some((open, name, _close_params)) = find_function_pointer_shape(ctx, start, semi) {
        let tok = ctx.tokens.get(name);
        return Some(Candidate {
            info: TypedefInfo {
                name: tok.lexeme.clone(),
                file: tok.location.file,
                line: tok.location.line,
                column: tok.location.column,
                used: false,
                is_function_pointer: true,
            },
            type_range: None,
            name_token: name,
        });
    }
    let name = last_top_level_name(ctx, start, semi)?;
    let type_end = ctx.tokens.prev(name).filter(|&p| p != kw)?;
    let tok = ctx.tokens.get(name);
    Some(Candidate {
        info: TypedefInfo {
            name: tok.lexeme.clone(),
            file: tok.location.file,
            line: tok.location.line,
            column: tok.location.column,
            used: false,
            is_function_pointer: false,
        },
        type_range: Some((start, type_end)),
        name_token: name,
    })
}

/// `using Name = Type ;`.
fn parse_using(ctx: &PassContext, kw: TokenId) -> Option<Candidate> {
    let name = ctx.tokens.next(kw)?;
    if !ctx.tokens.get(name).classification.is_name() {
        return None;
    }
    let eq = ctx.tokens.next(name)?;
    if ctx.tokens.get(eq).lexeme != "=" {
        return None;
    }
    let type_start = ctx.tokens.next(eq)?;
    let semi = find_top_level(ctx, eq, ";", 0)?;
    let type_end = ctx.tokens.prev(semi)?;
    let tok = ctx.tokens.get(name);
    Some(Candidate {
        info: TypedefInfo {
            name: tok.lexeme.clone(),
            file: tok.location.file,
            line: tok.location.line,
            column: tok.location.column,
            used: false,
            is_function_pointer: false,
        },
        type_range: Some((type_start, type_end)),
        name_token: name,
    })
}

fn find_function_pointer_shape(ctx: &PassContext, start: TokenId, limit: TokenId) -> Option<(TokenId, TokenId, TokenId)> {
    let mut cursor = start;
    while cursor != limit {
        if ctx.tokens.get(cursor).lexeme == "(" {
            if let Some(star) = ctx.tokens.next(cursor) {
                if ctx.tokens.get(star).lexeme == "*" {
                    if let Some(name) = ctx.tokens.next(star) {
                        if ctx.tokens.get(name).classification.is_name() {
                            if let Some(close) = ctx.tokens.next(name) {
                                if ctx.tokens.get(close).lexeme == ")" {
                                    if let Some(params_open) = ctx.tokens.next(close) {
                                        if ctx.tokens.get(params_open).lexeme == "(" {
                                            return Some((cursor, name, params_open));
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
        cursor = match ctx.tokens.next(cursor) {
            Some(n) => n,
            None => break,
        };
    }
    None
}

fn last_top_level_name(ctx: &PassContext, start: TokenId, limit: TokenId) -> Option<TokenId> {
    let mut cursor = start;
    let mut depth = 0i32;
    let mut last = None;
    while cursor != limit {
        match ctx.tokens.get(cursor).lexeme.as_str() {
            "(" | "[" => depth += 1,
            ")" | "]" => depth -= 1,
            _ if depth == 0 && ctx.tokens.get(cursor).classification.is_name() => last = Some(cursor),
            _ => {}
        }
        cursor = ctx.tokens.next(cursor)?;
    }
    last
}

/// Replaceability predicate (spec §4.4 "(a)/(b)"): only the common,
/// reliably-safe clauses are checked — a preceding delimiter, or a
/// following token that can only start where a type-name fits.
fn is_replaceable_use(ctx: &PassContext, name: TokenId) -> bool {
    if let Some(p) = ctx.tokens.prev(name) {
        let prev = ctx.tokens.get(p);
        if prev.lexeme == "." || prev.lexeme == "->" {
            return false;
        }
        if matches!(prev.lexeme.as_str(), "{" | "}" | ";" | "(" | "," | "<") {
            return true;
        }
    }
    if let Some(n) = ctx.tokens.next(name) {
        let next = ctx.tokens.get(n);
        if matches!(next.lexeme.as_str(), ";" | "," | ")" | "[" | "<" | "*" | "&" | "::") {
            return true;
        }
        if next.classification.is_name() {
            return true;
        }
    }
    false
}

fn run_substitution(ctx: &mut PassContext, candidates: Vec<Candidate>, is_using: bool) {
    let mut infos = Vec::with_capacity(candidates.len());
    let mut declaration_sites = Vec::new();
    for c in &candidates {
        infos.push((c.info.clone(), c.type_range, c.name_token));
        declaration_sites.push(c.name_token);
    }

    for (info, type_range, decl_name) in infos {
        if info.is_function_pointer || type_range.is_none() {
            emit_debug(ctx, &info, "simplifyTypedef: function-pointer or unparsed typedef left unexpanded");
            emit_typedef_info(ctx, &info);
            continue;
        }
        let (type_start, type_end) = type_range.unwrap();
        let mut used = false;
        let Some(mut cursor) = ctx.tokens.head() else { continue };
        loop {
            let is_decl = cursor == decl_name;
            let matches_name = !is_decl && ctx.tokens.get(cursor).classification.is_name() && ctx.tokens.get(cursor).lexeme == info.name;
            if matches_name && is_replaceable_use(ctx, cursor) {
                used = true;
                splice_type(ctx, cursor, type_start, type_end);
            }
            match ctx.tokens.next(cursor) {
                Some(n) => cursor = n,
                None => break,
            }
        }
        let _ = is_using;
        emit_typedef_info(ctx, &TypedefInfo { used, ..info });
    }
}

/// Records one `<typedef-info>` entry (spec §6 debug dump, spec §8's
/// quantified property over the `used` flag) as a `Debug`-severity
/// diagnostic, gated the same as any other debug-tier output — it
/// only reaches a report when the `debug` severity is enabled.
fn emit_typedef_info(ctx: &mut PassContext, info: &TypedefInfo) {
    let loc = FileLocation::new(ctx.files.path(info.file).display().to_string(), info.line as i32, info.column);
    let msg = format!("$symbol:{}\nused={} function_pointer={}", info.name, info.used, info.is_function_pointer);
    let diag = Diagnostic::new(vec![loc], "", Severity::Debug, "typedefInfo", &msg, Certainty::Normal);
    ctx.emit(diag);
}

/// Splices a copy of `[type_start, type_end]` right after `use`, moving
/// a directly-preceding `const` left of the pointer part when `T`
/// contains a pointer (spec §4.4 "const to the left of the pointer
/// part"), then erases the original use token.
fn splice_type(ctx: &mut PassContext, use_tok: TokenId, type_start: TokenId, type_end: TokenId) {
    let has_pointer = {
        let mut cursor = type_start;
        let mut found = false;
        loop {
            if ctx.tokens.get(cursor).lexeme == "*" {
                found = true;
            }
            if cursor == type_end {
                break;
            }
            cursor = match ctx.tokens.next(cursor) {
                Some(n) => n,
                None => break,
            };
        }
        found
    };
    let const_before = ctx.tokens.prev(use_tok).filter(|&p| ctx.tokens.get(p).lexeme == "const" && has_pointer);

    let last_copied = ctx.tokens.copy_range(use_tok, type_start, type_end);
    let _ = last_copied;
    if let Some(const_tok) = const_before {
        let first_copy = ctx.tokens.next(use_tok).unwrap();
        ctx.tokens.insert_before(first_copy, "const", Classification::Keyword);
        let after_const = ctx.tokens.next(const_tok);
        let _ = ctx.tokens.erase(const_tok, after_const);
    }
    let after_use = ctx.tokens.next(use_tok);
    let _ = ctx.tokens.erase(use_tok, after_use);
}

fn emit_debug(ctx: &mut PassContext, info: &TypedefInfo, note: &str) {
    if note.is_empty() {
        return;
    }
    let loc = FileLocation::new(ctx.files.path(info.file).display().to_string(), info.line as i32, info.column);
    let diag = Diagnostic::new(vec![loc], "", Severity::Debug, "simplifyTypedef", &format!("$symbol:{}\n{note}", info.name), Certainty::Normal);
    ctx.emit(diag);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use cppls_tokens::{FileId, Location, Token, TokenList};

    fn build(lexemes: &[(&str, Classification)]) -> TokenList {
        let mut tokens = TokenList::new();
        for (lex, class) in lexemes {
            tokens.push_back(Token::new(*lex, *class, Location::new(FileId(0), 1, 1)));
        }
        tokens
    }

    #[test]
    fn substitutes_scalar_typedef_use() {
        let mut tokens = build(&[
            ("typedef", Classification::Keyword),
            ("unsigned", Classification::Keyword),
            ("long", Classification::Keyword),
            ("ulong", Classification::Name),
            (";", Classification::Other),
            ("ulong", Classification::Name),
            ("x", Classification::Name),
            (";", Classification::Other),
        ]);
        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        TypedefSimplification.run(&mut ctx).unwrap();
        let lexemes: Vec<_> = ctx.tokens.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["typedef", "unsigned", "long", "ulong", ";", "unsigned", "long", "x", ";"]);
    }

    #[test]
    fn moves_const_left_of_pointer_part() {
        let mut tokens = build(&[
            ("typedef", Classification::Keyword),
            ("int", Classification::Keyword),
            ("*", Classification::Operator(cppls_tokens::OperatorKind::Arithmetic)),
            ("IntPtr", Classification::Name),
            (";", Classification::Other),
            ("const", Classification::Keyword),
            ("IntPtr", Classification::Name),
            ("p", Classification::Name),
            (";", Classification::Other),
        ]);
        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        TypedefSimplification.run(&mut ctx).unwrap();
        let lexemes: Vec<_> = ctx.tokens.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["typedef", "int", "*", "IntPtr", ";", "const", "int", "*", "p", ";"]);
    }

    #[test]
    fn records_the_used_flag_per_typedef() {
        let mut tokens = build(&[
            ("typedef", Classification::Keyword),
            ("int", Classification::Keyword),
            ("Used", Classification::Name),
            (";", Classification::Other),
            ("Used", Classification::Name),
            ("x", Classification::Name),
            (";", Classification::Other),
            ("typedef", Classification::Keyword),
            ("int", Classification::Keyword),
            ("Unused", Classification::Name),
            (";", Classification::Other),
        ]);
        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        TypedefSimplification.run(&mut ctx).unwrap();
        let info: Vec<_> = ctx.diagnostics.iter().filter(|d| d.id == "typedefInfo").collect();
        assert_eq!(info.len(), 2);
        assert!(info.iter().any(|d| d.symbol_names == vec!["Used".to_string()] && d.verbose_message.contains("used=true")));
        assert!(info.iter().any(|d| d.symbol_names == vec!["Unused".to_string()] && d.verbose_message.contains("used=false")));
    }

    #[test]
    fn using_alias_use_is_substituted() {
        let mut tokens = build(&[
            ("using", Classification::Keyword),
            ("Size", Classification::Name),
            ("=", Classification::Other),
            ("unsigned", Classification::Keyword),
            ("int", Classification::Keyword),
            (";", Classification::Other),
            ("Size", Classification::Name),
            ("n", Classification::Name),
            (";", Classification::Other),
        ]);
        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        UsingAliasSimplification.run(&mut ctx).unwrap();
        let lexemes: Vec<_> = ctx.tokens.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["using", "Size", "=", "unsigned", "int", ";", "unsigned", "int", "n", ";"]);
    }
}
