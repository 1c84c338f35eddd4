//! Step 20: array-access canonicalization — `0[a]` (and any
//! literal-on-the-left subscript) becomes `*(a)`, establishing a
//! uniform AST shape for `a[i]` regardless of which side was written
//! as the array (spec §4.3 step 20).

use crate::pass::{Pass, PassContext};
use cppls_tokens::{Classification, PassResult};

pub struct ArrayAccessCanonicalization;

impl Pass for ArrayAccessCanonicalization {
    fn name(&self) -> &'static str {
        "canonicalize-array-access"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let is_literal = matches!(ctx.tokens.get(cursor).classification, Classification::Number);
            let is_subscript = is_literal
                && ctx.tokens.next(cursor).map(|n| ctx.tokens.get(n).lexeme == "[").unwrap_or(false);
            if is_subscript {
                let literal = cursor;
                let open = ctx.tokens.next(cursor).unwrap();
                if let Some(close) = ctx.tokens.find_closing_bracket(open) {
                    // `0[a]` -> `*(a)`: rewrite `0` to `*`, `[` to `(`, `]`
                    // to `)`, keeping the inner expression untouched.
                    ctx.tokens.get_mut(literal).lexeme = "*".to_string();
                    ctx.tokens.get_mut(open).lexeme = "(".to_string();
                    ctx.tokens.get_mut(close).lexeme = ")".to_string();
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
