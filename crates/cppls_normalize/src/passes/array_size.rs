//! Step 43: array-size inference — `int a[] = "abc";` and
//! `int a[] = {1, 2, 3};` get an explicit bound filled in from the
//! initializer, so later bounds checks don't need to special-case an
//! empty `[]` (spec §4.3 step 43).

use crate::pass::{Pass, PassContext};
use cppls_tokens::{Classification, PassResult};

pub struct ArraySizeInference;

impl Pass for ArraySizeInference {
    fn name(&self) -> &'static str {
        "infer-array-size"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            if ctx.tokens.get(cursor).lexeme == "[" {
                if let Some(size) = infer_size(ctx, cursor) {
                    ctx.tokens.insert_after(cursor, size.to_string(), Classification::Number);
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

/// `open` is an empty `[` `]` pair immediately followed by `= "str";`
/// or `= { a, b, c };`. Returns the inferred element count.
fn infer_size(ctx: &PassContext, open: cppls_tokens::TokenId) -> Option<u64> {
    let close = ctx.tokens.next(open)?;
    if ctx.tokens.get(close).lexeme != "]" {
        return None;
    }
    let eq = ctx.tokens.next(close)?;
    if ctx.tokens.get(eq).lexeme != "=" {
        return None;
    }
    let rhs = ctx.tokens.next(eq)?;
    match ctx.tokens.get(rhs).classification {
        Classification::StringLiteral => {
            let raw = &ctx.tokens.get(rhs).lexeme;
            let content = raw.trim_matches('"');
            Some(content.chars().count() as u64 + 1)
        }
        _ if ctx.tokens.get(rhs).lexeme == "{" => {
            let brace_close = ctx.tokens.find_closing_bracket(rhs)?;
            let mut count: u64 = 0;
            let mut depth = 0i32;
            let mut probe = ctx.tokens.next(rhs)?;
            let mut saw_token_since_comma = false;
            while probe != brace_close {
                match ctx.tokens.get(probe).lexeme.as_str() {
                    "{" | "(" | "[" => depth += 1,
                    "}" | ")" | "]" => depth -= 1,
                    "," if depth == 0 => {
                        count += 1;
                        saw_token_since_comma = false;
                        probe = ctx.tokens.next(probe)?;
                        continue;
                    }
                    _ => saw_token_since_comma = true,
                }
                probe = ctx.tokens.next(probe)?;
            }
            if saw_token_since_comma || count == 0 {
                count += 1;
            }
            Some(count)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use cppls_tokens::{FileId, Location, Token, TokenList};

    fn run_pass(tokens: &mut TokenList) {
        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        ArraySizeInference.run(&mut ctx).unwrap();
    }

    #[test]
    fn infers_size_from_string_literal() {
        let mut tokens = TokenList::new();
        for (lex, class) in [
            ("int", Classification::Keyword),
            ("a", Classification::Name),
            ("[", Classification::Bracket),
            ("]", Classification::Bracket),
            ("=", Classification::Other),
            ("\"abc\"", Classification::StringLiteral),
            (";", Classification::Other),
        ] {
            tokens.push_back(Token::new(lex, class, Location::new(FileId(0), 1, 1)));
        }
        run_pass(&mut tokens);
        let lexemes: Vec<_> = tokens.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["int", "a", "[", "4", "]", "=", "\"abc\"", ";"]);
    }

    #[test]
    fn infers_size_from_brace_list() {
        let mut tokens = TokenList::new();
        for (lex, class) in [
            ("int", Classification::Keyword),
            ("a", Classification::Name),
            ("[", Classification::Bracket),
            ("]", Classification::Bracket),
            ("=", Classification::Other),
            ("{", Classification::Bracket),
            ("1", Classification::Number),
            (",", Classification::Other),
            ("2", Classification::Number),
            (",", Classification::Other),
            ("3", Classification::Number),
            ("}", Classification::Bracket),
            (";", Classification::Other),
        ] {
            tokens.push_back(Token::new(lex, class, Location::new(FileId(0), 1, 1)));
        }
        let open = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "{").unwrap();
        let close = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "}").unwrap();
        tokens.create_mutual_link(open, close).unwrap();
        run_pass(&mut tokens);
        let lexemes: Vec<_> = tokens.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes[2], "[");
        assert_eq!(lexemes[3], "3");
        assert_eq!(lexemes[4], "]");
    }
}
