//! Step 25: removes calling-convention keywords (`__cdecl`,
//! `__stdcall`, `__fastcall`, `__thiscall`, `__vectorcall`, `WINAPI`,
//! `CALLBACK`) since they don't affect the analysis (spec §4.3 step
//! 25).

use crate::pass::{Pass, PassContext};
use cppls_tokens::PassResult;

const CALLING_CONVENTIONS: &[&str] = &["__cdecl", "__stdcall", "__fastcall", "__thiscall", "__vectorcall", "WINAPI", "CALLBACK", "APIENTRY"];

pub struct CallingConventionRemoval;

impl Pass for CallingConventionRemoval {
    fn name(&self) -> &'static str {
        "remove-calling-convention"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            if CALLING_CONVENTIONS.contains(&ctx.tokens.get(cursor).lexeme.as_str()) {
                let next = ctx.tokens.next(cursor);
                ctx.tokens.erase(cursor, next)?;
                cursor = match next {
                    Some(n) => n,
                    None => return Ok(()),
                };
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
    use cppls_tokens::{Classification, FileId, Location, Token, TokenList};

    #[test]
    fn removes_stdcall_keyword() {
        let mut tokens = TokenList::new();
        for lex in ["void", "__stdcall", "f", "(", ")"] {
            let class = if matches!(lex, "(" | ")") { Classification::Bracket } else { Classification::Other };
            tokens.push_back(Token::new(lex, class, Location::new(FileId(0), 1, 1)));
        }
        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        CallingConventionRemoval.run(&mut ctx).unwrap();
        let lexemes: Vec<_> = ctx.tokens.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["void", "f", "(", ")"]);
    }
}
