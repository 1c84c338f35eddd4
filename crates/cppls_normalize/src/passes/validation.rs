//! Step 1: early validation — reject obvious garbage before any other
//! pass has to reason about it (spec §4.3 step 1).

use crate::pass::{Pass, PassContext};
use cppls_tokens::{PassError, PassResult};

pub struct EarlyValidation;

impl Pass for EarlyValidation {
    fn name(&self) -> &'static str {
        "early-validation"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let tok = ctx.tokens.get(cursor);
            if tok.lexeme == "@" {
                return Err(PassError::fatal(Some(cursor), "syntaxError: stray '@' outside an attribute"));
            }
            if is_unterminated_quote(&tok.lexeme) {
                return Err(PassError::fatal(Some(cursor), "syntaxError: unmatched quote in token"));
            }
            match ctx.tokens.next(cursor) {
                Some(next) => cursor = next,
                None => break,
            }
        }
        Ok(())
    }
}

fn is_unterminated_quote(lexeme: &str) -> bool {
    let quoted = |q: char| lexeme.starts_with(q) && (lexeme.len() < 2 || !lexeme.ends_with(q));
    quoted('"') || quoted('\'')
}
