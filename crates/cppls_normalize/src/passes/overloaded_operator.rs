//! Step 49: overloaded call-operator rewriting — once step 33 has
//! folded `operator()` into a single token, a call through a functor
//! object, `a(b)`, is rewritten to `a.operator()(b)` so checks that
//! look for member-function calls don't need a separate code path for
//! functors (spec §4.3 step 49). Only fires when `a` is already known
//! to be a class-typed variable, recognized here by the preceding
//! declaration having used a user (non-keyword) type name immediately
//! before it — full type resolution belongs to `cppls_symbols` and is
//! out of scope for a token-level pass.

use crate::pass::{Pass, PassContext};
use cppls_tokens::{Classification, PassResult};

pub struct OverloadedCallOperatorRewriting;

impl Pass for OverloadedCallOperatorRewriting {
    fn name(&self) -> &'static str {
        "rewrite-overloaded-call-operator"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        if !ctx.config.is_cpp {
            return Ok(());
        }
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            if is_functor_call(ctx, cursor) {
                ctx.tokens.insert_after(cursor, "operator()", Classification::Name);
                let dot = ctx.tokens.insert_after(cursor, ".", Classification::Other);
                cursor = dot;
            }
            match ctx.tokens.next(cursor) {
                Some(n) => cursor = n,
                None => break,
            }
        }
        Ok(())
    }
}

/// `name ( args )` where `name` is a variable whose declared type is a
/// user-defined name (not a built-in keyword), recognized from a
/// preceding `variable_id`-bearing declaration of the same lexeme with
/// a non-keyword type token directly before it.
fn is_functor_call(ctx: &PassContext, name: cppls_tokens::TokenId) -> bool {
    if !ctx.tokens.get(name).classification.is_name() || !ctx.tokens.get(name).has_variable_id() {
        return false;
    }
    let Some(open) = ctx.tokens.next(name) else { return false };
    if ctx.tokens.get(open).lexeme != "(" {
        return false;
    }
    // Reject if this identifier is itself preceded by a type (it's the
    // declaration, not a call) or by `.`/`->` (already a member access).
    match ctx.tokens.prev(name) {
        Some(p) => {
            let prev = ctx.tokens.get(p);
            !prev.classification.is_keyword() && prev.lexeme != "." && prev.lexeme != "->" && !prev.classification.is_name()
        }
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use cppls_tokens::{FileId, Location, Token, TokenList};

    #[test]
    fn rewrites_functor_call() {
        let mut tokens = TokenList::new();
        for (lex, class) in [(";", Classification::Other), ("a", Classification::Name), ("(", Classification::Bracket), ("b", Classification::Name), (")", Classification::Bracket)] {
            tokens.push_back(Token::new(lex, class, Location::new(FileId(0), 1, 1)));
        }
        let a = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "a").unwrap();
        tokens.get_mut(a).variable_id = 1;

        let mut files = cppls_tokens::FileTable::new();
        let mut config = PipelineConfig::default();
        config.is_cpp = true;
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        OverloadedCallOperatorRewriting.run(&mut ctx).unwrap();
        let lexemes: Vec<_> = ctx.tokens.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec![";", "a", ".", "operator()", "(", "b", ")"]);
    }

    #[test]
    fn leaves_declaration_site_alone() {
        let mut tokens = TokenList::new();
        for (lex, class) in [("MyFunctor", Classification::Name), ("a", Classification::Name), ("(", Classification::Bracket), ("b", Classification::Name), (")", Classification::Bracket)] {
            tokens.push_back(Token::new(lex, class, Location::new(FileId(0), 1, 1)));
        }
        let a = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "a").unwrap();
        tokens.get_mut(a).variable_id = 1;

        let mut files = cppls_tokens::FileTable::new();
        let mut config = PipelineConfig::default();
        config.is_cpp = true;
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        OverloadedCallOperatorRewriting.run(&mut ctx).unwrap();
        assert_eq!(ctx.tokens.len(), 5);
    }
}
