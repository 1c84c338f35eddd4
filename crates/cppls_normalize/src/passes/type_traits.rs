//! Step 35: type-trait intrinsic renaming — compiler builtins like
//! `__is_pod(T)` become the standard-library spelling `std::is_pod<T>`
//! would use once checks query them, here represented as a single
//! renamed callee token so downstream passes don't need to special-case
//! the double-underscore form (spec §4.3 step 35).

use crate::pass::{Pass, PassContext};
use cppls_tokens::PassResult;

const TRAIT_RENAMES: &[(&str, &str)] = &[
    ("__is_pod", "std::is_pod"),
    ("__is_enum", "std::is_enum"),
    ("__is_union", "std::is_union"),
    ("__is_class", "std::is_class"),
    ("__is_abstract", "std::is_abstract"),
    ("__is_polymorphic", "std::is_polymorphic"),
    ("__is_empty", "std::is_empty"),
    ("__is_final", "std::is_final"),
    ("__is_trivial", "std::is_trivial"),
    ("__has_virtual_destructor", "std::has_virtual_destructor"),
    ("__is_base_of", "std::is_base_of"),
];

pub struct TypeTraitRenaming;

impl Pass for TypeTraitRenaming {
    fn name(&self) -> &'static str {
        "rename-type-traits"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let lexeme = ctx.tokens.get(cursor).lexeme.clone();
            if let Some((_, renamed)) = TRAIT_RENAMES.iter().find(|(from, _)| *from == lexeme) {
                let is_call = ctx.tokens.next(cursor).map(|n| ctx.tokens.get(n).lexeme == "(").unwrap_or(false);
                if is_call {
                    ctx.tokens.get_mut(cursor).lexeme = (*renamed).to_string();
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

    fn run_pass(lexemes: &[&str]) -> Vec<String> {
        let mut tokens = TokenList::new();
        for lex in lexemes {
            tokens.push_back(Token::new(*lex, Classification::Other, Location::new(FileId(0), 1, 1)));
        }
        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        TypeTraitRenaming.run(&mut ctx).unwrap();
        ctx.tokens.iter().map(|(_, t)| t.lexeme.clone()).collect()
    }

    #[test]
    fn renames_is_pod_call() {
        assert_eq!(run_pass(&["__is_pod", "(", "T", ")"]), vec!["std::is_pod", "(", "T", ")"]);
    }

    #[test]
    fn leaves_bare_name_alone() {
        assert_eq!(run_pass(&["__is_pod", ";"]), vec!["__is_pod", ";"]);
    }
}
