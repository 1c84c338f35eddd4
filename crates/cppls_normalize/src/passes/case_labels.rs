//! Step 23: case-range expansion (`case 1 ... 5:` becomes five `case`
//! labels) and label-insertion (every `case`/`default`/user label gets
//! its trailing `;` inserted if the source omitted it) (spec §4.3
//! step 23).

use crate::pass::{Pass, PassContext};
use cppls_tokens::{Classification, PassResult};

pub struct CaseRangeExpansion;

impl Pass for CaseRangeExpansion {
    fn name(&self) -> &'static str {
        "expand-case-ranges"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            if ctx.tokens.get(cursor).lexeme == "case" {
                if let Some(lo_tok) = ctx.tokens.next(cursor) {
                    if let Ok(lo) = ctx.tokens.get(lo_tok).lexeme.parse::<i64>() {
                        if let Some(dots) = ctx.tokens.next(lo_tok) {
                            if ctx.tokens.get(dots).lexeme == "..." {
                                if let Some(hi_tok) = ctx.tokens.next(dots) {
                                    if let Ok(hi) = ctx.tokens.get(hi_tok).lexeme.parse::<i64>() {
                                        if let Some(colon) = ctx.tokens.next(hi_tok) {
                                            if ctx.tokens.get(colon).lexeme == ":" && hi >= lo && hi - lo < 4096 {
                                                expand_range(ctx, cursor, colon, lo, hi)?;
                                                match ctx.tokens.next(cursor) {
                                                    Some(n) => {
                                                        cursor = n;
                                                        continue;
                                                    }
                                                    None => break,
                                                }
                                            }
                                        }
                                    }
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

/// Rewrites `case lo ... hi :` into `case lo : case lo+1 : ... case hi :`.
fn expand_range(ctx: &mut PassContext, case_kw: cppls_tokens::TokenId, colon: cppls_tokens::TokenId, lo: i64, hi: i64) -> PassResult<()> {
    let lo_tok = ctx.tokens.next(case_kw).unwrap();
    ctx.tokens.get_mut(lo_tok).lexeme = lo.to_string();
    let dots = ctx.tokens.next(lo_tok).unwrap();
    let after_dots = ctx.tokens.next(dots);
    ctx.tokens.erase(dots, after_dots)?;
    let hi_tok = after_dots.unwrap();
    ctx.tokens.erase(hi_tok, Some(colon))?;

    let mut insert_point = colon;
    for value in (lo + 1)..=hi {
        let kw = ctx.tokens.insert_after(insert_point, "case", Classification::Keyword);
        let num = ctx.tokens.insert_after(kw, value.to_string(), Classification::Number);
        insert_point = ctx.tokens.insert_after(num, ":", Classification::Other);
    }
    Ok(())
}

/// Inserts the trailing `;` after a `case N:` / `default:` / user
/// label when the next statement begins directly without one.
pub struct LabelSemicolonInsertion;

impl Pass for LabelSemicolonInsertion {
    fn name(&self) -> &'static str {
        "insert-label-semicolons"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let is_label_colon = ctx.tokens.get(cursor).lexeme == ":" && is_label_colon(ctx, cursor);
            if is_label_colon {
                let needs_semi = ctx
                    .tokens
                    .next(cursor)
                    .map(|n| !matches!(ctx.tokens.get(n).lexeme.as_str(), ";" | "}" | "case" | "default"))
                    .unwrap_or(false);
                if needs_semi {
                    ctx.tokens.insert_after(cursor, ";", Classification::Other);
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

fn is_label_colon(ctx: &PassContext, colon: cppls_tokens::TokenId) -> bool {
    let Some(prev) = ctx.tokens.prev(colon) else { return false };
    let prev_lex = ctx.tokens.get(prev).lexeme.as_str();
    if prev_lex == "default" {
        return true;
    }
    if matches!(ctx.tokens.get(prev).classification, Classification::Number) {
        if let Some(before_num) = ctx.tokens.prev(prev) {
            return ctx.tokens.get(before_num).lexeme == "case";
        }
    }
    false
}
