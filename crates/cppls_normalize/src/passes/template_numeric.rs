//! Step 21: constant-folds simple numeric arithmetic inside template
//! argument lists, e.g. `array<int, 2 + 2>` → `array<int, 4>` (spec
//! §4.3 step 21).

use crate::pass::{Pass, PassContext};
use cppls_tokens::PassResult;

pub struct TemplateNumericSimplification;

impl Pass for TemplateNumericSimplification {
    fn name(&self) -> &'static str {
        "simplify-template-numeric-args"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let is_open_angle = ctx.tokens.get(cursor).lexeme == "<" && ctx.tokens.get(cursor).links.bracket.is_some();
            if is_open_angle {
                if let Some(close) = ctx.tokens.get(cursor).links.bracket {
                    fold_range(ctx, cursor, close)?;
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

/// Repeatedly folds the first `lhs op rhs` numeric triple found inside
/// `(open, close)` until no more folds apply.
fn fold_range(ctx: &mut PassContext, open: cppls_tokens::TokenId, close: cppls_tokens::TokenId) -> PassResult<()> {
    loop {
        let mut cursor = ctx.tokens.next(open);
        let mut folded = false;
        while let Some(lhs) = cursor {
            if lhs == close {
                break;
            }
            if let (Some(lhs_val), Some(op)) = (parse_num(ctx, lhs), ctx.tokens.next(lhs)) {
                if op != close {
                    if let Some(rhs) = ctx.tokens.next(op) {
                        if rhs != close {
                            if let Some(rhs_val) = parse_num(ctx, rhs) {
                                if let Some(result) = apply(ctx.tokens.get(op).lexeme.as_str(), lhs_val, rhs_val) {
                                    ctx.tokens.get_mut(lhs).lexeme = result.to_string();
                                    let after_op = ctx.tokens.next(op);
                                    ctx.tokens.erase(op, after_op)?;
                                    let after_rhs = ctx.tokens.next(rhs);
                                    ctx.tokens.erase(rhs, after_rhs)?;
                                    folded = true;
                                    break;
                                }
                            }
                        }
                    }
                }
            }
            cursor = ctx.tokens.next(lhs);
        }
        if !folded {
            return Ok(());
        }
    }
}

fn parse_num(ctx: &PassContext, id: cppls_tokens::TokenId) -> Option<i64> {
    if matches!(ctx.tokens.get(id).classification, cppls_tokens::Classification::Number) {
        ctx.tokens.get(id).lexeme.parse::<i64>().ok()
    } else {
        None
    }
}

fn apply(op: &str, lhs: i64, rhs: i64) -> Option<i64> {
    match op {
        "+" => Some(lhs + rhs),
        "-" => Some(lhs - rhs),
        "*" => Some(lhs * rhs),
        "/" if rhs != 0 => Some(lhs / rhs),
        _ => None,
    }
}
