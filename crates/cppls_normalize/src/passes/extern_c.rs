//! Step 16: removes `extern "C"` / `extern "C" { ... }` wrappers,
//! marking every token that was inside one with a flag so later
//! linkage-sensitive checks can still see it (spec §4.3 step 16).

use crate::pass::{Pass, PassContext};
use cppls_tokens::{PassResult, TokenFlags};

pub struct ExternCRemoval;

impl Pass for ExternCRemoval {
    fn name(&self) -> &'static str {
        "remove-extern-c"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let is_extern_c = ctx.tokens.get(cursor).lexeme == "extern"
                && ctx.tokens.next(cursor).map(|n| ctx.tokens.get(n).lexeme == "\"C\"").unwrap_or(false);
            if is_extern_c {
                let quoted_c = ctx.tokens.next(cursor).unwrap();
                if let Some(brace) = ctx.tokens.next(quoted_c) {
                    if ctx.tokens.get(brace).lexeme == "{" {
                        if let Some(close) = ctx.tokens.find_closing_bracket(brace) {
                            let mut inner = ctx.tokens.next(brace);
                            while let Some(id) = inner {
                                if id == close {
                                    break;
                                }
                                ctx.tokens.get_mut(id).flags.set(TokenFlags::IS_EXTERN_C);
                                inner = ctx.tokens.next(id);
                            }
                            ctx.tokens.clear_link(brace);
                            let resume = ctx.tokens.next(close);
                            ctx.tokens.erase(close, resume)?;
                            let after_brace = ctx.tokens.next(brace);
                            ctx.tokens.erase(brace, after_brace)?;
                            let after_quoted = ctx.tokens.next(quoted_c);
                            ctx.tokens.erase(quoted_c, after_quoted)?;
                            let after_cursor = ctx.tokens.next(cursor);
                            ctx.tokens.erase(cursor, after_cursor)?;
                            cursor = match resume {
                                Some(n) => n,
                                None => return Ok(()),
                            };
                            continue;
                        }
                    } else {
                        // `extern "C" decl;` with no braces: mark only the
                        // single following declaration.
                        ctx.tokens.get_mut(brace).flags.set(TokenFlags::IS_EXTERN_C);
                        let after_quoted = ctx.tokens.next(quoted_c);
                        ctx.tokens.erase(cursor, after_quoted)?;
                        cursor = brace;
                        continue;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use cppls_tokens::{Classification, FileId, Location, Token, TokenList};

    fn build(lexemes: &[&str]) -> TokenList {
        let mut tokens = TokenList::new();
        for lex in lexemes {
            let class = if matches!(*lex, "{" | "}") { Classification::Bracket } else { Classification::Other };
            tokens.push_back(Token::new(*lex, class, Location::new(FileId(0), 1, 1)));
        }
        tokens
    }

    #[test]
    fn removes_braced_extern_c_block_and_flags_contents() {
        let mut tokens = build(&["extern", "\"C\"", "{", "void", "f", "(", ")", ";", "}"]);
        let open = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "{").unwrap();
        let close = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "}").unwrap();
        tokens.create_mutual_link(open, close).unwrap();

        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        ExternCRemoval.run(&mut ctx).unwrap();
        let lexemes: Vec<_> = ctx.tokens.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["void", "f", "(", ")", ";"]);
        let void_tok = ctx.tokens.head().unwrap();
        assert!(ctx.tokens.get(void_tok).flags.contains(TokenFlags::IS_EXTERN_C));
    }

    #[test]
    fn removes_single_declaration_extern_c() {
        let mut tokens = build(&["extern", "\"C\"", "void", "f", "(", ")", ";"]);
        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        ExternCRemoval.run(&mut ctx).unwrap();
        let lexemes: Vec<_> = ctx.tokens.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["void", "f", "(", ")", ";"]);
        let void_tok = ctx.tokens.head().unwrap();
        assert!(ctx.tokens.get(void_tok).flags.contains(TokenFlags::IS_EXTERN_C));
    }
}
