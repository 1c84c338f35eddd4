//! Step 42: C++ cast marking — flags the token introducing a
//! `static_cast`/`dynamic_cast`/`const_cast`/`reinterpret_cast<T>(expr)`
//! expression so later checks can recognize a cast without re-parsing
//! the `<...>` / `(...)` shape each time (spec §4.3 step 42).

use crate::pass::{Pass, PassContext};
use cppls_tokens::{PassResult, TokenFlags};

const CAST_KEYWORDS: &[&str] = &["static_cast", "dynamic_cast", "const_cast", "reinterpret_cast"];

pub struct CppCastMarking;

impl Pass for CppCastMarking {
    fn name(&self) -> &'static str {
        "mark-cpp-casts"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        if !ctx.config.is_cpp {
            return Ok(());
        }
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let lexeme = ctx.tokens.get(cursor).lexeme.clone();
            if CAST_KEYWORDS.contains(&lexeme.as_str()) {
                if let Some(lt) = ctx.tokens.next(cursor) {
                    if ctx.tokens.get(lt).lexeme == "<" {
                        if let Some(gt) = ctx.tokens.find_closing_bracket(lt) {
                            if ctx.tokens.next(gt).map(|p| ctx.tokens.get(p).lexeme == "(").unwrap_or(false) {
                                ctx.tokens.get_mut(cursor).flags.set(TokenFlags::IS_CPP_CAST);
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
    use cppls_tokens::{Classification, FileId, Location, Token, TokenList};

    #[test]
    fn marks_static_cast() {
        let mut tokens = TokenList::new();
        for (lex, class) in [
            ("static_cast", Classification::Keyword),
            ("<", Classification::Operator(cppls_tokens::OperatorKind::Comparison)),
            ("int", Classification::Keyword),
            (">", Classification::Operator(cppls_tokens::OperatorKind::Comparison)),
            ("(", Classification::Bracket),
            ("x", Classification::Name),
            (")", Classification::Bracket),
            (";", Classification::Other),
        ] {
            tokens.push_back(Token::new(lex, class, Location::new(FileId(0), 1, 1)));
        }
        let lt = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "<").unwrap();
        let gt = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == ">").unwrap();
        tokens.create_mutual_link(lt, gt).unwrap();
        let open = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "(").unwrap();
        let close = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == ")").unwrap();
        tokens.create_mutual_link(open, close).unwrap();

        let mut files = cppls_tokens::FileTable::new();
        let mut config = PipelineConfig::default();
        config.is_cpp = true;
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        CppCastMarking.run(&mut ctx).unwrap();
        let kw = ctx.tokens.find(ctx.tokens.head().unwrap(), None, |t| t.lexeme == "static_cast").unwrap();
        assert!(ctx.tokens.get(kw).flags.contains(TokenFlags::IS_CPP_CAST));
    }
}
