//! Step 2: string & character literal combination — concatenate adjacent
//! string literals and fold a leading `L"x" "y"` pair into one wide
//! literal (spec §4.3 step 2).

use crate::pass::{Pass, PassContext};
use cppls_tokens::{Classification, PassResult};

pub struct StringLiteralCombination;

impl Pass for StringLiteralCombination {
    fn name(&self) -> &'static str {
        "combine-string-literals"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let next = ctx.tokens.next(cursor);
            let is_adjacent_strings = ctx.tokens.get(cursor).classification == Classification::StringLiteral
                && next.map(|n| ctx.tokens.get(n).classification == Classification::StringLiteral).unwrap_or(false);

            if is_adjacent_strings {
                let next = next.unwrap();
                let is_wide = ctx.tokens.get(cursor).lexeme.starts_with('L') || ctx.tokens.get(next).lexeme.starts_with('L');
                let body_a = strip_literal(&ctx.tokens.get(cursor).lexeme);
                let body_b = strip_literal(&ctx.tokens.get(next).lexeme);
                let mut merged = String::new();
                if is_wide {
                    merged.push('L');
                }
                merged.push('"');
                merged.push_str(body_a);
                merged.push_str(body_b);
                merged.push('"');
                ctx.tokens.get_mut(cursor).lexeme = merged;
                ctx.tokens.erase(next, ctx.tokens.next(next))?;
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

fn strip_literal(lexeme: &str) -> &str {
    let trimmed = lexeme.strip_prefix('L').unwrap_or(lexeme);
    trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')).unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use cppls_tokens::{FileId, Location, Token, TokenList};

    fn run(lexemes: &[(&str, Classification)]) -> Vec<String> {
        let mut tokens = TokenList::new();
        for (lex, class) in lexemes {
            tokens.push_back(Token::new(*lex, *class, Location::new(FileId(0), 1, 1)));
        }
        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        StringLiteralCombination.run(&mut ctx).unwrap();
        tokens.iter().map(|(_, t)| t.lexeme.clone()).collect()
    }

    #[test]
    fn adjacent_literals_merge_into_one_token() {
        let result = run(&[("\"a\"", Classification::StringLiteral), ("\"b\"", Classification::StringLiteral)]);
        assert_eq!(result, vec!["\"ab\""]);
    }

    #[test]
    fn wide_prefix_survives_the_merge() {
        let result = run(&[("L\"a\"", Classification::StringLiteral), ("\"b\"", Classification::StringLiteral)]);
        assert_eq!(result, vec!["L\"ab\""]);
    }

    #[test]
    fn non_adjacent_literals_are_untouched() {
        let result = run(&[("\"a\"", Classification::StringLiteral), (";", Classification::Other), ("\"b\"", Classification::StringLiteral)]);
        assert_eq!(result, vec!["\"a\"", ";", "\"b\""]);
    }
}
