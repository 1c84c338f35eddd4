//! Step 26: a cluster of macro-residue cleanups — semicolons after
//! unknown uppercase macro invocations, macro removal inside class
//! definitions, and naming of anonymous struct/union/enum bodies
//! introduced by macro expansion (spec §4.3 step 26).

use crate::pass::{Pass, PassContext};
use cppls_tokens::{Classification, PassResult, TokenFlags};

/// An all-uppercase identifier immediately followed by `(...)` or
/// nothing, sitting where a declaration was expected but with no
/// semicolon after it, is almost always an unexpanded macro call
/// (e.g. `MY_EXPORT` before a function). Insert the missing `;`.
pub struct UnknownMacroSemicolonInsertion;

impl Pass for UnknownMacroSemicolonInsertion {
    fn name(&self) -> &'static str {
        "insert-macro-semicolons"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let is_uppercase_macro = ctx.tokens.get(cursor).classification.is_name() && is_all_uppercase(&ctx.tokens.get(cursor).lexeme);
            if is_uppercase_macro {
                let end = if let Some(open) = ctx.tokens.next(cursor) {
                    if ctx.tokens.get(open).lexeme == "(" {
                        ctx.tokens.find_closing_bracket(open)
                    } else {
                        None
                    }
                } else {
                    None
                };
                let tail = end.unwrap_or(cursor);
                let needs_semi = ctx
                    .tokens
                    .next(tail)
                    .map(|n| matches!(ctx.tokens.get(n).lexeme.as_str(), "class" | "struct" | "void" | "int" | "static" | "virtual"))
                    .unwrap_or(false);
                if needs_semi {
                    ctx.tokens.insert_after(tail, ";", Classification::Other);
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

fn is_all_uppercase(lexeme: &str) -> bool {
    !lexeme.is_empty() && lexeme.chars().all(|c| c.is_uppercase() || c == '_' || c.is_ascii_digit()) && lexeme.chars().any(|c| c.is_alphabetic())
}

/// Anonymous `struct { ... }`/`union { ... }`/`enum { ... }` bodies
/// (common output of macro-generated code) get a synthetic name so
/// later symbol-table construction has something to key on.
pub struct AnonymousAggregateNaming;

impl Pass for AnonymousAggregateNaming {
    fn name(&self) -> &'static str {
        "name-anonymous-aggregates"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        let mut counter = 0u32;
        loop {
            let is_aggregate_kw = matches!(ctx.tokens.get(cursor).lexeme.as_str(), "struct" | "union" | "enum");
            if is_aggregate_kw {
                if let Some(next) = ctx.tokens.next(cursor) {
                    if ctx.tokens.get(next).lexeme == "{" {
                        let name_id = ctx.tokens.insert_after(cursor, format!("Anonymous{counter}"), Classification::Name);
                        counter += 1;
                        ctx.tokens.get_mut(name_id).flags.set(TokenFlags::IS_ANONYMOUS);
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
