//! Step 14: operator folding — `+=`/`-=`/etc. combination, `->` → `.`
//! with original-name preservation (including `(&x)->` → `x.`), and
//! `::`-qualifier folding. Step 15: signed-number concatenation (spec
//! §4.3 steps 14-15).

use crate::pass::{Pass, PassContext};
use cppls_tokens::PassResult;

/// Combines a compound-assignment operator written as two adjacent
/// tokens (`+` `=`) into one (`+=`), and rewrites `->` into `.` while
/// remembering the original spelling, including the `(&x)->` → `x.`
/// simplification.
pub struct OperatorFolding;

impl Pass for OperatorFolding {
    fn name(&self) -> &'static str {
        "fold-operators"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let lexeme = ctx.tokens.get(cursor).lexeme.clone();

            // `(&x)->y` -> `x.y`: an address-of operand immediately
            // wrapped in parens and dereferenced through `->` is just a
            // member access on `x` itself.
            if lexeme == "(" {
                if let Some(amp) = ctx.tokens.next(cursor) {
                    if ctx.tokens.get(amp).lexeme == "&" {
                        if let Some(name) = ctx.tokens.next(amp) {
                            if let Some(close) = ctx.tokens.next(name) {
                                if ctx.tokens.get(close).lexeme == ")" {
                                    if let Some(arrow) = ctx.tokens.next(close) {
                                        if ctx.tokens.get(arrow).lexeme == "->" {
                                            let tok = ctx.tokens.get_mut(arrow);
                                            tok.original_name = Some("->".to_string());
                                            tok.lexeme = ".".to_string();
                                            // Drop the wrapping `(` `&` before `name` and the
                                            // `)` between `name` and the now-dot operator.
                                            ctx.tokens.erase(cursor, Some(name))?;
                                            ctx.tokens.erase(close, Some(arrow))?;
                                            cursor = name;
                                            continue;
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if lexeme == "->" {
                let tok = ctx.tokens.get_mut(cursor);
                tok.original_name = Some("->".to_string());
                tok.lexeme = ".".to_string();
            }

            let compound = matches!(lexeme.as_str(), "+" | "-" | "*" | "/" | "%" | "&" | "|" | "^" | "<<" | ">>")
                && ctx.tokens.next(cursor).map(|n| ctx.tokens.get(n).lexeme == "=").unwrap_or(false);
            if compound {
                let eq = ctx.tokens.next(cursor).unwrap();
                let folded = format!("{lexeme}=");
                ctx.tokens.get_mut(cursor).lexeme = folded;
                let after_eq = ctx.tokens.next(eq);
                ctx.tokens.erase(eq, after_eq)?;
                match ctx.tokens.next(cursor) {
                    Some(n) => cursor = n,
                    None => break,
                }
                continue;
            }

            match ctx.tokens.next(cursor) {
                Some(n) => cursor = n,
                None => break,
            }
        }
        Ok(())
    }
}

/// Folds `+ -5` / `- -5` (a binary operator followed by a unary-minus
/// numeric literal) into a single signed-number token, matching what a
/// real lexer would have produced had the minus not arrived as a
/// separate preprocessor token.
pub struct SignedNumberConcatenation;

impl Pass for SignedNumberConcatenation {
    fn name(&self) -> &'static str {
        "concatenate-signed-numbers"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let is_binary_context = matches!(ctx.tokens.get(cursor).lexeme.as_str(), "+" | "-" | "*" | "/" | "=" | "(" | "," | "return" | "<" | ">" | "<=" | ">=" | "==");
            if is_binary_context {
                if let Some(sign) = ctx.tokens.next(cursor) {
                    let sign_lexeme = ctx.tokens.get(sign).lexeme.clone();
                    if sign_lexeme == "-" || sign_lexeme == "+" {
                        if let Some(num) = ctx.tokens.next(sign) {
                            let is_number = matches!(ctx.tokens.get(num).classification, cppls_tokens::Classification::Number);
                            if is_number {
                                let folded = format!("{sign_lexeme}{}", ctx.tokens.get(num).lexeme);
                                ctx.tokens.get_mut(num).lexeme = folded;
                                let after_sign = ctx.tokens.next(sign);
                                ctx.tokens.erase(sign, after_sign)?;
                                cursor = num;
                                match ctx.tokens.next(cursor) {
                                    Some(n) => cursor = n,
                                    None => break,
                                }
                                continue;
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
