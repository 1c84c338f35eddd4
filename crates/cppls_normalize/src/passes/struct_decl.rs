//! Step 30: struct-declaration splitting — `struct S { ... } s;`
//! becomes `struct S { ... }; S s;`, inserting a fresh name when the
//! struct/union/enum itself was anonymous (spec §4.3 step 30).

use crate::pass::{Pass, PassContext};
use cppls_tokens::{Classification, PassResult, TokenFlags};

pub struct StructDeclSplit;

impl Pass for StructDeclSplit {
    fn name(&self) -> &'static str {
        "split-struct-declarations"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        let mut counter = 0u32;
        loop {
            let is_aggregate_kw = matches!(ctx.tokens.get(cursor).lexeme.as_str(), "struct" | "union" | "enum" | "class");
            if is_aggregate_kw {
                if let Some(after_kw) = ctx.tokens.next(cursor) {
                    let (tag_name, body_start) = if ctx.tokens.get(after_kw).lexeme == "{" {
                        let synthetic = ctx.tokens.insert_after(cursor, format!("Anonymous{counter}"), Classification::Name);
                        counter += 1;
                        ctx.tokens.get_mut(synthetic).flags.set(TokenFlags::IS_ANONYMOUS);
                        (synthetic, ctx.tokens.next(synthetic).unwrap())
                    } else {
                        (after_kw, match ctx.tokens.next(after_kw) {
                            Some(b) if ctx.tokens.get(b).lexeme == "{" => b,
                            _ => {
                                match ctx.tokens.next(cursor) {
                                    Some(n) => { cursor = n; continue; }
                                    None => break,
                                }
                            }
                        })
                    };
                    if ctx.tokens.get(body_start).lexeme == "{" {
                        if let Some(close) = ctx.tokens.find_closing_bracket(body_start) {
                            if let Some(first_var) = ctx.tokens.next(close) {
                                if first_var != close && ctx.tokens.get(first_var).lexeme != ";" {
                                    // There's a variable declarator directly after the
                                    // closing brace: `struct S { ... } s;` — split into
                                    // the type definition and a separate declaration.
                                    let semi = ctx.tokens.insert_after(close, ";", Classification::Other);
                                    ctx.tokens.insert_after(semi, ctx.tokens.get(tag_name).lexeme.clone(), Classification::Name);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use cppls_tokens::{FileId, Location, Token, TokenList};

    #[test]
    fn splits_named_struct_with_trailing_variable() {
        let mut tokens = TokenList::new();
        for lex in ["struct", "S", "{", "int", "x", ";", "}", "s", ";"] {
            let class = if matches!(lex, "{" | "}") { Classification::Bracket } else { Classification::Other };
            tokens.push_back(Token::new(lex, class, Location::new(FileId(0), 1, 1)));
        }
        let open = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "{").unwrap();
        let close = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "}").unwrap();
        tokens.create_mutual_link(open, close).unwrap();

        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        StructDeclSplit.run(&mut ctx).unwrap();
        let lexemes: Vec<_> = ctx.tokens.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["struct", "S", "{", "int", "x", ";", "}", ";", "S", "s", ";"]);
    }

    #[test]
    fn names_an_anonymous_struct_with_trailing_variable() {
        let mut tokens = TokenList::new();
        for lex in ["struct", "{", "int", "x", ";", "}", "s", ";"] {
            let class = if matches!(lex, "{" | "}") { Classification::Bracket } else { Classification::Other };
            tokens.push_back(Token::new(lex, class, Location::new(FileId(0), 1, 1)));
        }
        let open = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "{").unwrap();
        let close = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "}").unwrap();
        tokens.create_mutual_link(open, close).unwrap();

        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        StructDeclSplit.run(&mut ctx).unwrap();
        let lexemes: Vec<_> = ctx.tokens.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["struct", "Anonymous0", "{", "int", "x", ";", "}", ";", "Anonymous0", "s", ";"]);
    }
}
