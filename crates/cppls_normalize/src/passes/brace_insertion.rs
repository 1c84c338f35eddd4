//! Step 18: ensures the body of every `if`/`for`/`while`/`do`/`switch`
//! is a braced block, inserting `{ }` around a bare statement when
//! missing (spec §4.3 step 18).

use crate::pass::{Pass, PassContext};
use cppls_tokens::{Classification, PassResult};

pub struct BraceInsertion;

impl Pass for BraceInsertion {
    fn name(&self) -> &'static str {
        "insert-braces"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let lexeme = ctx.tokens.get(cursor).lexeme.clone();
            let needs_body = matches!(lexeme.as_str(), "if" | "for" | "while" | "switch");
            if needs_body {
                if let Some(open_paren) = ctx.tokens.next(cursor) {
                    if ctx.tokens.get(open_paren).lexeme == "(" {
                        if let Some(close_paren) = ctx.tokens.find_closing_bracket(open_paren) {
                            if let Some(body_start) = ctx.tokens.next(close_paren) {
                                if ctx.tokens.get(body_start).lexeme != "{" {
                                    let end = statement_end(ctx, body_start);
                                    insert_braces(ctx, close_paren, end)?;
                                }
                            }
                        }
                    }
                }
            } else if lexeme == "do" {
                if let Some(body_start) = ctx.tokens.next(cursor) {
                    if ctx.tokens.get(body_start).lexeme != "{" {
                        let end = statement_end(ctx, body_start);
                        insert_braces(ctx, cursor, end)?;
                    }
                }
            } else if lexeme == "else" {
                if let Some(body_start) = ctx.tokens.next(cursor) {
                    if ctx.tokens.get(body_start).lexeme != "{" && ctx.tokens.get(body_start).lexeme != "if" {
                        let end = statement_end(ctx, body_start);
                        insert_braces(ctx, cursor, end)?;
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

/// Finds the last token of the single statement starting at `start`:
/// its terminating `;`, or the matching close of a nested block.
fn statement_end(ctx: &PassContext, start: cppls_tokens::TokenId) -> cppls_tokens::TokenId {
    if ctx.tokens.get(start).lexeme == "{" {
        return ctx.tokens.find_closing_bracket(start).unwrap_or(start);
    }
    let mut cursor = start;
    loop {
        if ctx.tokens.get(cursor).lexeme == ";" {
            return cursor;
        }
        match ctx.tokens.next(cursor) {
            Some(n) => cursor = n,
            None => return cursor,
        }
    }
}

/// Inserts `{` immediately after `after` and `}` immediately after
/// `last`, linking them as a mutual bracket pair.
fn insert_braces(ctx: &mut PassContext, after: cppls_tokens::TokenId, last: cppls_tokens::TokenId) -> PassResult<()> {
    let open = ctx.tokens.insert_after(after, "{", Classification::Bracket);
    let close = ctx.tokens.insert_after(last, "}", Classification::Bracket);
    ctx.tokens.create_mutual_link(open, close)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use cppls_tokens::{FileId, Location, Token, TokenList};

    fn build(lexemes: &[&str]) -> TokenList {
        let mut tokens = TokenList::new();
        for lex in lexemes {
            let class = if matches!(*lex, "(" | ")" | "{" | "}") { Classification::Bracket } else { Classification::Other };
            tokens.push_back(Token::new(*lex, class, Location::new(FileId(0), 1, 1)));
        }
        tokens
    }

    #[test]
    fn braces_a_bare_if_body() {
        let mut tokens = build(&["if", "(", "x", ")", "y", "=", "1", ";"]);
        let open = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "(").unwrap();
        let close = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == ")").unwrap();
        tokens.create_mutual_link(open, close).unwrap();

        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        BraceInsertion.run(&mut ctx).unwrap();
        let lexemes: Vec<_> = ctx.tokens.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["if", "(", "x", ")", "{", "y", "=", "1", ";", "}"]);
    }

    #[test]
    fn leaves_already_braced_body_alone() {
        let mut tokens = build(&["if", "(", "x", ")", "{", "y", "=", "1", ";", "}"]);
        let open = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "(").unwrap();
        let close = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == ")").unwrap();
        tokens.create_mutual_link(open, close).unwrap();
        let open_b = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "{").unwrap();
        let close_b = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "}").unwrap();
        tokens.create_mutual_link(open_b, close_b).unwrap();

        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        BraceInsertion.run(&mut ctx).unwrap();
        assert_eq!(ctx.tokens.len(), 10);
    }
}
