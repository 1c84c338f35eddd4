//! Step 29: bitfield simplification — records a member's bit width
//! from `type name : N;` on the name token and removes the `: N`
//! suffix, since later passes work against `bitfield_width` rather
//! than re-parsing the colon each time (spec §4.3 step 29).

use crate::pass::{Pass, PassContext};
use cppls_tokens::PassResult;

pub struct BitfieldSimplification;

impl Pass for BitfieldSimplification {
    fn name(&self) -> &'static str {
        "simplify-bitfields"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let is_name = ctx.tokens.get(cursor).classification.is_name();
            if is_name {
                if let Some(colon) = ctx.tokens.next(cursor) {
                    if ctx.tokens.get(colon).lexeme == ":" {
                        if let Some(width_tok) = ctx.tokens.next(colon) {
                            if let Ok(width) = ctx.tokens.get(width_tok).lexeme.parse::<u32>() {
                                if ctx
                                    .tokens
                                    .next(width_tok)
                                    .map(|n| matches!(ctx.tokens.get(n).lexeme.as_str(), ";" | ","))
                                    .unwrap_or(false)
                                {
                                    ctx.tokens.get_mut(cursor).bitfield_width = Some(width);
                                    let after_width = ctx.tokens.next(width_tok);
                                    ctx.tokens.erase(colon, after_width)?;
                                }
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
