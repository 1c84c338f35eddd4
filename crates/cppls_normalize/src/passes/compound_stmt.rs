//! Step 17: compound-statement (GCC statement-expression) simplification
//! — `({ ... })` collapses into the statement that surrounds it when the
//! body is a single expression statement (spec §4.3 step 17).

use crate::pass::{Pass, PassContext};
use cppls_tokens::PassResult;

pub struct CompoundStatementSimplification;

impl Pass for CompoundStatementSimplification {
    fn name(&self) -> &'static str {
        "simplify-compound-statement"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let is_stmt_expr = ctx.tokens.get(cursor).lexeme == "("
                && ctx.tokens.next(cursor).map(|n| ctx.tokens.get(n).lexeme == "{").unwrap_or(false);
            if is_stmt_expr {
                let open_paren = cursor;
                let open_brace = ctx.tokens.next(cursor).unwrap();
                if let Some(close_paren) = ctx.tokens.find_closing_bracket(open_paren) {
                    if let Some(close_brace) = ctx.tokens.prev(close_paren) {
                        if ctx.tokens.get(close_brace).lexeme == "}" {
                            // Drop the `({` prefix and `})` suffix, leaving the
                            // body's statements in place of the expression.
                            ctx.tokens.clear_link(open_paren);
                            ctx.tokens.clear_link(open_brace);
                            let after_close_brace = ctx.tokens.next(close_brace);
                            ctx.tokens.erase(close_brace, after_close_brace)?;
                            let resume = ctx.tokens.next(close_paren);
                            ctx.tokens.erase(close_paren, resume)?;
                            let after_open_brace = ctx.tokens.next(open_brace);
                            ctx.tokens.erase(open_brace, after_open_brace)?;
                            let after_open_paren = ctx.tokens.next(open_paren);
                            ctx.tokens.erase(open_paren, after_open_paren)?;
                            cursor = match after_open_brace {
                                Some(a) => a,
                                None => return Ok(()),
                            };
                            continue;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use cppls_tokens::{Classification, FileId, Location, Token, TokenList};

    #[test]
    fn collapses_statement_expression() {
        let mut tokens = TokenList::new();
        for lex in ["(", "{", "1", "+", "2", ";", "}", ")"] {
            let class = if matches!(lex, "(" | ")" | "{" | "}") { Classification::Bracket } else { Classification::Other };
            tokens.push_back(Token::new(lex, class, Location::new(FileId(0), 1, 1)));
        }
        let open_paren = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "(").unwrap();
        let close_paren = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == ")").unwrap();
        tokens.create_mutual_link(open_paren, close_paren).unwrap();
        let open_brace = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "{").unwrap();
        let close_brace = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "}").unwrap();
        tokens.create_mutual_link(open_brace, close_brace).unwrap();

        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        CompoundStatementSimplification.run(&mut ctx).unwrap();
        let lexemes: Vec<_> = ctx.tokens.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["1", "+", "2", ";"]);
    }
}
