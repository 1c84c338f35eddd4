//! Step 9: removes the disambiguating `template` keyword in contexts
//! like `x.template foo<T>()` once the angle brackets it was
//! disambiguating are no longer ambiguous to us (spec §4.3 step 9).

use crate::pass::{Pass, PassContext};
use cppls_tokens::PassResult;

pub struct ExtraTemplateKeywordRemoval;

impl Pass for ExtraTemplateKeywordRemoval {
    fn name(&self) -> &'static str {
        "remove-extra-template-keyword"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let next = ctx.tokens.next(cursor);
            let is_disambiguator = ctx.tokens.get(cursor).lexeme == "template"
                && matches!(ctx.tokens.prev(cursor).map(|p| ctx.tokens.get(p).lexeme.clone()).as_deref(), Some(".") | Some("->") | Some("::"));
            if is_disambiguator {
                ctx.tokens.erase(cursor, next)?;
                cursor = match next {
                    Some(n) => n,
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
