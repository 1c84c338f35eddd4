//! Step 39: `else if` brace insertion — by the time this pass runs,
//! step 18 has already braced every `if`/`for`/`while`/`do` body, but
//! `else if` chains need their own pass since each `if` after the first
//! `else` is itself the *body* of the `else`, and must be wrapped in
//! `{ }` rather than left as a bare nested statement (spec §4.3 step 39).

use crate::pass::{Pass, PassContext};
use cppls_tokens::{Classification, PassResult};

pub struct ElseIfBraceInsertion;

impl Pass for ElseIfBraceInsertion {
    fn name(&self) -> &'static str {
        "insert-else-if-braces"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            if ctx.tokens.get(cursor).lexeme == "else" {
                if let Some(next) = ctx.tokens.next(cursor) {
                    if ctx.tokens.get(next).lexeme == "if" {
                        brace_if_chain(ctx, next)?;
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

/// Wraps the `if (...) { ... } [else ...]` chain starting at `if_kw` in
/// a fresh pair of braces, covering the whole chain so a later `else`
/// binds to the right `if`.
fn brace_if_chain(ctx: &mut PassContext, if_kw: cppls_tokens::TokenId) -> PassResult<()> {
    let open_paren = ctx
        .tokens
        .next(if_kw)
        .ok_or_else(|| cppls_tokens::PassError::fatal(Some(if_kw), "syntaxError: else if without condition"))?;
    let close_paren = ctx
        .tokens
        .find_closing_bracket(open_paren)
        .ok_or_else(|| cppls_tokens::PassError::fatal(Some(open_paren), "syntaxError: unmatched ( after else if"))?;
    let body_start = ctx
        .tokens
        .next(close_paren)
        .ok_or_else(|| cppls_tokens::PassError::fatal(Some(close_paren), "syntaxError: else if with no body"))?;
    if ctx.tokens.get(body_start).lexeme != "{" {
        return Ok(()); // step 18 already braced it; nothing to do.
    }
    let body_end = ctx
        .tokens
        .find_closing_bracket(body_start)
        .ok_or_else(|| cppls_tokens::PassError::fatal(Some(body_start), "syntaxError: unmatched { in else if body"))?;
    // Extend the chain to cover a trailing `else` clause, if present.
    let chain_end = match ctx.tokens.next(body_end) {
        Some(else_kw) if ctx.tokens.get(else_kw).lexeme == "else" => match ctx.tokens.next(else_kw) {
            Some(n) if ctx.tokens.get(n).lexeme == "{" => ctx.tokens.find_closing_bracket(n).unwrap_or(else_kw),
            Some(n) => find_stmt_end(ctx, n).unwrap_or(else_kw),
            None => else_kw,
        },
        _ => body_end,
    };
    ctx.tokens.insert_before(if_kw, "{", Classification::Bracket);
    let close = ctx.tokens.insert_after(chain_end, "}", Classification::Bracket);
    let open = ctx.tokens.prev(if_kw).unwrap();
    ctx.tokens.create_mutual_link(open, close)?;
    Ok(())
}

fn find_stmt_end(ctx: &PassContext, start: cppls_tokens::TokenId) -> Option<cppls_tokens::TokenId> {
    let mut cursor = start;
    let mut depth = 0i32;
    loop {
        match ctx.tokens.get(cursor).lexeme.as_str() {
            "(" | "[" => depth += 1,
            ")" | "]" => depth -= 1,
            ";" if depth == 0 => return Some(cursor),
            _ => {}
        }
        cursor = ctx.tokens.next(cursor)?;
    }
}
