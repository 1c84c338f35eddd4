//! Step 13: decodes the tool's own `__cppcheck_low__(N)` /
//! `__cppcheck_high__(N)` annotation intrinsics into value-range
//! metadata on the following token, then removes the intrinsic's
//! tokens (spec §4.3 step 13).

use crate::pass::{Pass, PassContext};
use cppls_tokens::PassResult;

pub struct CppcheckAttributeDecoding;

impl Pass for CppcheckAttributeDecoding {
    fn name(&self) -> &'static str {
        "decode-cppcheck-attributes"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let lexeme = ctx.tokens.get(cursor).lexeme.clone();
            let is_low = lexeme == "__cppcheck_low__";
            let is_high = lexeme == "__cppcheck_high__";
            if (is_low || is_high) && ctx.tokens.next(cursor).map(|n| ctx.tokens.get(n).lexeme == "(").unwrap_or(false) {
                let open = ctx.tokens.next(cursor).unwrap();
                if let Some(close) = ctx.tokens.find_closing_bracket(open) {
                    if let Some(num_tok) = ctx.tokens.next(open) {
                        if num_tok != close {
                            if let Ok(value) = ctx.tokens.get(num_tok).lexeme.parse::<i64>() {
                                if let Some(target) = ctx.tokens.next(close) {
                                    let tok = ctx.tokens.get_mut(target);
                                    if is_low {
                                        tok.value_range_low = Some(value);
                                    } else {
                                        tok.value_range_high = Some(value);
                                    }
                                }
                            }
                        }
                    }
                    let after = ctx.tokens.next(close);
                    ctx.tokens.erase(cursor, after)?;
                    cursor = match after {
                        Some(a) => a,
                        None => return Ok(()),
                    };
                    continue;
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
