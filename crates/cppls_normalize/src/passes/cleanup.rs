//! Step 47: final cleanup — redundant-semicolon removal (`;;` and a
//! lone `;` directly inside `{`), void-parameter canonicalization
//! (`f(void)` drops the `void` once the empty parameter list is
//! unambiguous), and empty-namespace removal (spec §4.3 step 47).

use crate::pass::{Pass, PassContext};
use cppls_tokens::{PassResult, TokenFlags};

pub struct RedundantSemicolonRemoval;

impl Pass for RedundantSemicolonRemoval {
    fn name(&self) -> &'static str {
        "remove-redundant-semicolons"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let is_redundant = ctx.tokens.get(cursor).lexeme == ";"
                && ctx
                    .tokens
                    .prev(cursor)
                    .map(|p| matches!(ctx.tokens.get(p).lexeme.as_str(), ";" | "{"))
                    .unwrap_or(false);
            if is_redundant {
                let after = ctx.tokens.next(cursor);
                ctx.tokens.erase(cursor, after)?;
                match after {
                    Some(n) => cursor = n,
                    None => break,
                }
                continue;
            }
            match ctx.tokens.next(cursor) {
                Some(n) => cursor = n,
                None => break,
            }
        }
        Ok(())
    }
}

pub struct VoidParameterCanonicalization;

impl Pass for VoidParameterCanonicalization {
    fn name(&self) -> &'static str {
        "canonicalize-void-parameter"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            if ctx.tokens.get(cursor).lexeme == "(" {
                if let Some(void_tok) = ctx.tokens.next(cursor) {
                    if ctx.tokens.get(void_tok).lexeme == "void" {
                        if let Some(close) = ctx.tokens.next(void_tok) {
                            if ctx.tokens.get(close).lexeme == ")" {
                                ctx.tokens.get_mut(void_tok).flags.set(TokenFlags::IS_REMOVED_VOID_PARAMETER);
                                let after = ctx.tokens.next(void_tok);
                                ctx.tokens.erase(void_tok, after)?;
                            }
                        }
                    }
                }
            }
            match ctx.tokens.next(cursor) {
                Some(n) => cursor = n,
                None => break,
            }
        }
        Ok(())
    }
}

pub struct EmptyNamespaceRemoval;

impl Pass for EmptyNamespaceRemoval {
    fn name(&self) -> &'static str {
        "remove-empty-namespaces"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            if ctx.tokens.get(cursor).lexeme == "namespace" {
                if let Some(resume) = try_remove_empty(ctx, cursor)? {
                    match resume {
                        Some(r) => {
                            cursor = r;
                            continue;
                        }
                        None => break,
                    }
                }
            }
            match ctx.tokens.next(cursor) {
                Some(n) => cursor = n,
                None => break,
            }
        }
        Ok(())
    }
}

/// `namespace name { }` (body empty after prior passes stripped its
/// contents, or written empty to start with) is removed entirely.
/// `Ok(None)` means no removal happened; `Ok(Some(resume))` means the
/// whole declaration was erased and scanning should continue from
/// `resume` (or stop, if `resume` is `None` — end of stream).
fn try_remove_empty(ctx: &mut PassContext, kw: cppls_tokens::TokenId) -> PassResult<Option<Option<cppls_tokens::TokenId>>> {
    let name = ctx.tokens.next(kw).ok_or_else(|| cppls_tokens::PassError::fatal(Some(kw), "syntaxError: namespace with no name or body"))?;
    let open = if ctx.tokens.get(name).lexeme == "{" { name } else { ctx.tokens.next(name).unwrap_or(name) };
    if ctx.tokens.get(open).lexeme != "{" {
        return Ok(None);
    }
    let close = match ctx.tokens.find_closing_bracket(open) {
        Some(c) => c,
        None => return Ok(None),
    };
    if ctx.tokens.next(open) != Some(close) {
        return Ok(None); // not empty
    }
    // `open`/`close` are both inside `[kw, resume)`, so erasing the whole
    // run in one call never orphans the bracket link.
    let resume = ctx.tokens.next(close);
    ctx.tokens.erase(kw, resume)?;
    Ok(Some(resume))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use cppls_tokens::{Classification, FileId, Location, Token, TokenList};

    fn ctx_run(pass: &dyn Pass, tokens: &mut TokenList) {
        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        pass.run(&mut ctx).unwrap();
    }

    #[test]
    fn removes_doubled_and_brace_adjacent_semicolons() {
        let mut tokens = TokenList::new();
        for lex in ["{", ";", "x", ";", ";", "}"] {
            let class = if matches!(lex, "{" | "}") { Classification::Bracket } else { Classification::Other };
            tokens.push_back(Token::new(lex, class, Location::new(FileId(0), 1, 1)));
        }
        ctx_run(&RedundantSemicolonRemoval, &mut tokens);
        let lexemes: Vec<_> = tokens.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["{", "x", ";", "}"]);
    }

    #[test]
    fn drops_void_parameter() {
        let mut tokens = TokenList::new();
        for lex in ["(", "void", ")"] {
            let class = if matches!(lex, "(" | ")") { Classification::Bracket } else { Classification::Keyword };
            tokens.push_back(Token::new(lex, class, Location::new(FileId(0), 1, 1)));
        }
        ctx_run(&VoidParameterCanonicalization, &mut tokens);
        let lexemes: Vec<_> = tokens.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["(", ")"]);
    }

    #[test]
    fn removes_empty_namespace() {
        let mut tokens = TokenList::new();
        for lex in ["namespace", "foo", "{", "}", "int", "x", ";"] {
            let class = if matches!(lex, "{" | "}") { Classification::Bracket } else { Classification::Other };
            tokens.push_back(Token::new(lex, class, Location::new(FileId(0), 1, 1)));
        }
        let open = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "{").unwrap();
        let close = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "}").unwrap();
        tokens.create_mutual_link(open, close).unwrap();
        ctx_run(&EmptyNamespaceRemoval, &mut tokens);
        let lexemes: Vec<_> = tokens.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["int", "x", ";"]);
    }
}
