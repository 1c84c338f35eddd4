//! Step 48: C++17/20 initializer-statement extraction — `if (auto x =
//! f(); x)` and `switch (auto x = f(); x)` hoist the initializer above
//! the statement as its own declaration, wrapped in a fresh scope, so
//! the rest of the pipeline only ever sees a plain condition (spec
//! §4.3 step 48). Gated on `cpp_standard.supports_if_init()`.

use crate::pass::{Pass, PassContext};
use cppls_tokens::{Classification, PassResult};

pub struct InitStatementExtraction;

impl Pass for InitStatementExtraction {
    fn name(&self) -> &'static str {
        "extract-init-statement"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        if !ctx.config.cpp_standard.supports_if_init() {
            return Ok(());
        }
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            if matches!(ctx.tokens.get(cursor).lexeme.as_str(), "if" | "switch") {
                extract(ctx, cursor)?;
            }
            match ctx.tokens.next(cursor) {
                Some(n) => cursor = n,
                None => break,
            }
        }
        Ok(())
    }
}

/// `if ( init ; cond ) body` becomes `{ init ; if ( cond ) body }`.
/// Does nothing if there's no top-level `;` inside the parens.
fn extract(ctx: &mut PassContext, kw: cppls_tokens::TokenId) -> PassResult<()> {
    let Some(open) = ctx.tokens.next(kw) else { return Ok(()) };
    if ctx.tokens.get(open).lexeme != "(" {
        return Ok(());
    }
    let Some(close) = ctx.tokens.find_closing_bracket(open) else { return Ok(()) };
    let Some(semi) = find_top_level_semicolon(ctx, open, close) else { return Ok(()) };

    // Find where the enclosing statement ends, to place the closing `}`.
    let body_start = match ctx.tokens.next(close) {
        Some(b) => b,
        None => return Ok(()),
    };
    let stmt_end = if ctx.tokens.get(body_start).lexeme == "{" {
        ctx.tokens.find_closing_bracket(body_start)
    } else {
        find_bare_stmt_end(ctx, body_start)
    };
    let Some(stmt_end) = stmt_end else { return Ok(()) };

    // Wrap the whole thing in braces, then hoist the initializer (and
    // its terminating `;`) out of the parens to sit just inside the new
    // opening brace, ahead of the `if`/`switch` keyword. `open`/`close`
    // are untouched, so the bracket link they already hold stays valid
    // — it now just spans a shorter (post-initializer) condition.
    let wrap_open = ctx.tokens.insert_before(kw, "{", Classification::Bracket);
    let wrap_close = ctx.tokens.insert_after(stmt_end, "}", Classification::Bracket);
    ctx.tokens.create_mutual_link(wrap_open, wrap_close)?;

    let first_init = ctx.tokens.next(open).unwrap();
    ctx.tokens.move_range(first_init, semi, wrap_open);
    Ok(())
}

fn find_top_level_semicolon(ctx: &PassContext, open: cppls_tokens::TokenId, close: cppls_tokens::TokenId) -> Option<cppls_tokens::TokenId> {
    let mut cursor = ctx.tokens.next(open)?;
    let mut depth = 0i32;
    while cursor != close {
        match ctx.tokens.get(cursor).lexeme.as_str() {
            "(" | "[" => depth += 1,
            ")" | "]" => depth -= 1,
            ";" if depth == 0 => return Some(cursor),
            _ => {}
        }
        cursor = ctx.tokens.next(cursor)?;
    }
    None
}

fn find_bare_stmt_end(ctx: &PassContext, start: cppls_tokens::TokenId) -> Option<cppls_tokens::TokenId> {
    let mut cursor = start;
    let mut depth = 0i32;
    loop {
        match ctx.tokens.get(cursor).lexeme.as_str() {
            "(" | "[" | "{" => depth += 1,
            ")" | "]" | "}" => depth -= 1,
            ";" if depth == 0 => return Some(cursor),
            _ => {}
        }
        cursor = ctx.tokens.next(cursor)?;
    }
}
