//! Step 19: gives every `sizeof` operand an explicit parenthesization,
//! e.g. `sizeof x` → `sizeof ( x )` (spec §4.3 step 19).

use crate::pass::{Pass, PassContext};
use cppls_tokens::{Classification, PassResult};

pub struct SizeofParenthesization;

impl Pass for SizeofParenthesization {
    fn name(&self) -> &'static str {
        "parenthesize-sizeof"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            if ctx.tokens.get(cursor).lexeme == "sizeof" {
                if let Some(next) = ctx.tokens.next(cursor) {
                    if ctx.tokens.get(next).lexeme != "(" {
                        let operand_end = operand_end(ctx, next);
                        let open = ctx.tokens.insert_after(cursor, "(", Classification::Bracket);
                        let close = ctx.tokens.insert_after(operand_end, ")", Classification::Bracket);
                        ctx.tokens.create_mutual_link(open, close)?;
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

/// A `sizeof` without parens applies to a single unary expression: a
/// name, optionally followed by `.`/`->` member chains and `[...]`
/// subscripts.
fn operand_end(ctx: &PassContext, start: cppls_tokens::TokenId) -> cppls_tokens::TokenId {
    let mut cursor = start;
    loop {
        let Some(next) = ctx.tokens.next(cursor) else { return cursor };
        let lexeme = ctx.tokens.get(next).lexeme.clone();
        if lexeme == "." || lexeme == "->" {
            if let Some(name) = ctx.tokens.next(next) {
                cursor = name;
                continue;
            }
        }
        if lexeme == "[" {
            if let Some(close) = ctx.tokens.find_closing_bracket(next) {
                cursor = close;
                continue;
            }
        }
        return cursor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use cppls_tokens::{FileId, Location, Token, TokenList};

    #[test]
    fn parenthesizes_bare_sizeof_operand() {
        let mut tokens = TokenList::new();
        for lex in ["sizeof", "x", ";"] {
            tokens.push_back(Token::new(lex, Classification::Other, Location::new(FileId(0), 1, 1)));
        }
        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        SizeofParenthesization.run(&mut ctx).unwrap();
        let lexemes: Vec<_> = ctx.tokens.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["sizeof", "(", "x", ")", ";"]);
    }

    #[test]
    fn leaves_already_parenthesized_sizeof_alone() {
        let mut tokens = TokenList::new();
        for lex in ["sizeof", "(", "x", ")", ";"] {
            let class = if matches!(lex, "(" | ")") { Classification::Bracket } else { Classification::Other };
            tokens.push_back(Token::new(lex, class, Location::new(FileId(0), 1, 1)));
        }
        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        SizeofParenthesization.run(&mut ctx).unwrap();
        assert_eq!(ctx.tokens.len(), 5);
    }
}
