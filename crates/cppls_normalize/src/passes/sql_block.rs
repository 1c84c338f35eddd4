//! Step 3: SQL block elision — replace embedded-SQL blocks
//! (`EXEC SQL ... ;`) with a single `asm("...")` surrogate so later
//! passes never have to understand embedded-SQL grammar (spec §4.3
//! step 3).

use crate::pass::{Pass, PassContext};
use cppls_tokens::{Classification, PassResult};

pub struct SqlBlockElision;

impl Pass for SqlBlockElision {
    fn name(&self) -> &'static str {
        "elide-sql-blocks"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let is_exec_sql = ctx.tokens.get(cursor).lexeme == "EXEC"
                && ctx.tokens.next(cursor).map(|n| ctx.tokens.get(n).lexeme == "SQL").unwrap_or(false);

            if is_exec_sql {
                let start = cursor;
                let mut text = String::new();
                let mut scan = start;
                let end = loop {
                    text.push_str(&ctx.tokens.get(scan).lexeme);
                    text.push(' ');
                    if ctx.tokens.get(scan).lexeme == ";" {
                        break scan;
                    }
                    match ctx.tokens.next(scan) {
                        Some(n) => scan = n,
                        None => break scan,
                    }
                };
                let after = ctx.tokens.next(end);
                let before = ctx.tokens.prev(start);
                let surrogate = format!("asm(\"{}\")", text.trim());
                let inserted = match before {
                    Some(b) => ctx.tokens.insert_after(b, surrogate, Classification::Other),
                    None => ctx.tokens.insert_before(start, surrogate, Classification::Other),
                };
                ctx.tokens.erase(start, after)?;
                cursor = inserted;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use cppls_tokens::{FileId, Location, Token, TokenList};

    #[test]
    fn replaces_exec_sql_block_with_asm_surrogate() {
        let mut tokens = TokenList::new();
        for lex in ["int", "x", ";", "EXEC", "SQL", "SELECT", "1", ";", "int", "y", ";"] {
            tokens.push_back(Token::new(lex, Classification::Other, Location::new(FileId(0), 1, 1)));
        }
        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        SqlBlockElision.run(&mut ctx).unwrap();
        let lexemes: Vec<_> = tokens.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["int", "x", ";", "asm(\"EXEC SQL SELECT 1 ;\")", "int", "y", ";"]);
    }
}
