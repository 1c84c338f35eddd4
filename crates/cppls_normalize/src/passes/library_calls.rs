//! Step 5: library-call parenthesization — unwraps `(std::min)(a,b)` into
//! `std::min(a,b)` so later passes see an ordinary call expression
//! (spec §4.3 step 5).

use crate::pass::{Pass, PassContext};
use cppls_tokens::PassResult;

pub struct LibraryCallParenthesization;

impl Pass for LibraryCallParenthesization {
    fn name(&self) -> &'static str {
        "unwrap-library-call-parens"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            if ctx.tokens.get(cursor).lexeme == "(" {
                if let Some(close) = ctx.tokens.find_closing_bracket(cursor) {
                    let is_qualified_name_only = {
                        let mut inner = ctx.tokens.next(cursor);
                        let mut saw_name = false;
                        while let Some(id) = inner {
                            if id == close {
                                break;
                            }
                            let lex = ctx.tokens.get(id).lexeme.as_str();
                            if lex == "::" || ctx.tokens.get(id).classification.is_name() {
                                saw_name = true;
                            } else {
                                saw_name = false;
                                break;
                            }
                            inner = ctx.tokens.next(id);
                        }
                        saw_name
                    };
                    let followed_by_call = ctx.tokens.next(close).map(|n| ctx.tokens.get(n).lexeme == "(").unwrap_or(false);
                    if is_qualified_name_only && followed_by_call {
                        let before = ctx.tokens.prev(cursor);
                        let after = ctx.tokens.next(close);
                        ctx.tokens.clear_link(cursor);
                        ctx.tokens.erase(close, after)?;
                        ctx.tokens.erase(cursor, ctx.tokens.next(cursor))?;
                        cursor = match before {
                            Some(b) => ctx.tokens.next(b).unwrap_or(b),
                            None => ctx.tokens.head().unwrap(),
                        };
                        continue;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use cppls_tokens::{Classification, FileId, Location, Token, TokenList};

    #[test]
    fn unwraps_parenthesized_qualified_call_target() {
        let mut tokens = TokenList::new();
        for lex in ["(", "std", "::", "min", ")", "(", "a", ",", "b", ")"] {
            let class = match lex {
                "(" | ")" => Classification::Bracket,
                "," => Classification::Other,
                _ => Classification::Name,
            };
            tokens.push_back(Token::new(lex, class, Location::new(FileId(0), 1, 1)));
        }
        let open1 = tokens.head().unwrap();
        let close1 = tokens.find(open1, None, |t| t.lexeme == ")").unwrap();
        tokens.create_mutual_link(open1, close1).unwrap();

        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        LibraryCallParenthesization.run(&mut ctx).unwrap();
        let lexemes: Vec<_> = ctx.tokens.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["std", "::", "min", "(", "a", ",", "b", ")"]);
    }
}
