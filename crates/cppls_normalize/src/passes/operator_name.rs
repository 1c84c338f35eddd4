//! Step 33: operator-name folding — `operator` followed by an
//! operator's tokens (possibly more than one, e.g. `operator []`,
//! `operator new[]`) becomes a single `operator+`-style token, flagged
//! as a keyword so later passes treat it as an identifier (spec §4.3
//! step 33).

use crate::pass::{Pass, PassContext};
use cppls_tokens::PassResult;

const OPERATOR_SYMBOLS: &[&str] = &[
    "+", "-", "*", "/", "%", "^", "&", "|", "~", "!", "=", "<", ">", "+=", "-=", "*=", "/=", "%=", "^=", "&=", "|=", "<<", ">>", ">>=", "<<=", "==",
    "!=", "<=", ">=", "&&", "||", "++", "--", ",", "->*", "->", "(", ")", "[", "]", "new", "delete",
];

pub struct OperatorNameFolding;

impl Pass for OperatorNameFolding {
    fn name(&self) -> &'static str {
        "fold-operator-name"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            if ctx.tokens.get(cursor).lexeme == "operator" {
                if let Some(first) = ctx.tokens.next(cursor) {
                    if OPERATOR_SYMBOLS.contains(&ctx.tokens.get(first).lexeme.as_str()) {
                        let mut last = first;
                        let mut folded = ctx.tokens.get(first).lexeme.clone();
                        // `new[]` / `delete[]` / `()` / `[]` span two tokens.
                        if let Some(second) = ctx.tokens.next(first) {
                            let second_lex = ctx.tokens.get(second).lexeme.clone();
                            let spans_two = matches!(
                                (folded.as_str(), second_lex.as_str()),
                                ("new", "[") | ("delete", "[") | ("(", ")") | ("[", "]")
                            );
                            if spans_two {
                                if let Some(third) = ctx.tokens.next(second) {
                                    if (folded == "new" || folded == "delete") && ctx.tokens.get(third).lexeme == "]" {
                                        folded.push_str(&second_lex);
                                        folded.push_str(&ctx.tokens.get(third).lexeme);
                                        last = third;
                                    } else if folded == "(" || folded == "[" {
                                        folded.push_str(&second_lex);
                                        last = second;
                                    }
                                } else if folded == "(" || folded == "[" {
                                    folded.push_str(&second_lex);
                                    last = second;
                                }
                            }
                        }
                        let name = format!("operator{folded}");
                        ctx.tokens.get_mut(cursor).lexeme = name;
                        let after_last = ctx.tokens.next(last);
                        if last != cursor {
                            ctx.tokens.erase(first, after_last)?;
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
