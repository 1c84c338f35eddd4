//! Step 11: code-health syntax check — a battery of rules over the
//! stream that reports garbage constructs; fatal when a rule fires
//! (spec §4.3 step 11, spec §7 *syntaxError*).

use crate::pass::{Pass, PassContext};
use cppls_tokens::{PassError, PassResult};

pub struct CodeHealthSyntaxCheck;

impl Pass for CodeHealthSyntaxCheck {
    fn name(&self) -> &'static str {
        "code-health-syntax-check"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let lexeme = ctx.tokens.get(cursor).lexeme.clone();
            if lexeme == ";" && ctx.tokens.next(cursor).map(|n| ctx.tokens.get(n).lexeme == ";").unwrap_or(false) {
                // `;;` alone is harmless (an empty statement), but a run of
                // three or more is a telltale sign of garbage input.
                if let Some(third) = ctx.tokens.next(ctx.tokens.next(cursor).unwrap()) {
                    if ctx.tokens.get(third).lexeme == ";" {
                        return Err(PassError::fatal(Some(cursor), "syntaxError: unexpected run of ';;;'"));
                    }
                }
            }
            if matches!(lexeme.as_str(), "+" | "-" | "*" | "/" | "%" | "&&" | "||") {
                let next_is_close = ctx.tokens.next(cursor).map(|n| matches!(ctx.tokens.get(n).lexeme.as_str(), ")" | "]" | ";")).unwrap_or(false);
                let prev_is_open = ctx.tokens.prev(cursor).map(|p| matches!(ctx.tokens.get(p).lexeme.as_str(), "(" | "[" | ";")).unwrap_or(true);
                if next_is_close && prev_is_open {
                    return Err(PassError::fatal(Some(cursor), format!("syntaxError: '{lexeme}' has no operands")));
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
