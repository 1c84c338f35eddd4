//! Step 44: `std::` prefixing — when a translation unit has
//! `using namespace std;` in effect, bare references to common standard
//! library names are qualified with `std::` so later symbol resolution
//! doesn't need to carry "what's currently `use`-d" state of its own
//! (spec §4.3 step 44).

use crate::pass::{Pass, PassContext};
use cppls_tokens::{Classification, PassResult};

const STD_NAMES: &[&str] = &[
    "string", "vector", "map", "set", "list", "pair", "cout", "cin", "cerr", "endl", "unique_ptr", "shared_ptr", "make_shared",
    "make_unique", "move", "swap", "size_t", "nullptr_t",
];

pub struct StdNamespacePrefixing;

impl Pass for StdNamespacePrefixing {
    fn name(&self) -> &'static str {
        "prefix-std-names"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        if !ctx.config.using_namespace_std {
            return Ok(());
        }
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let lexeme = ctx.tokens.get(cursor).lexeme.clone();
            if STD_NAMES.contains(&lexeme.as_str()) && ctx.tokens.get(cursor).classification.is_name() && !already_qualified(ctx, cursor) {
                ctx.tokens.insert_before(cursor, "std::", Classification::Other);
            }
            match ctx.tokens.next(cursor) {
                Some(n) => cursor = n,
                None => break,
            }
        }
        Ok(())
    }
}

fn already_qualified(ctx: &PassContext, name: cppls_tokens::TokenId) -> bool {
    ctx.tokens.prev(name).map(|p| ctx.tokens.get(p).lexeme == "std::" || ctx.tokens.get(p).lexeme == "::").unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use cppls_tokens::{FileId, Location, Token, TokenList};

    fn run_pass(using_std: bool, lexemes: &[&str]) -> Vec<String> {
        let mut tokens = TokenList::new();
        for lex in lexemes {
            tokens.push_back(Token::new(*lex, Classification::Name, Location::new(FileId(0), 1, 1)));
        }
        let mut files = cppls_tokens::FileTable::new();
        let mut config = PipelineConfig::default();
        config.using_namespace_std = using_std;
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        StdNamespacePrefixing.run(&mut ctx).unwrap();
        ctx.tokens.iter().map(|(_, t)| t.lexeme.clone()).collect()
    }

    #[test]
    fn prefixes_string_when_using_namespace_std_is_set() {
        assert_eq!(run_pass(true, &["string", "s", ";"]), vec!["std::", "string", "s", ";"]);
    }

    #[test]
    fn leaves_names_alone_without_using_namespace_std() {
        assert_eq!(run_pass(false, &["string", "s", ";"]), vec!["string", "s", ";"]);
    }
}
