//! Step 37: constructor-style initializer simplification — `int i(0);`
//! becomes `int i; i = 0;`, matching the shape later value-flow passes
//! expect from every other declaration-with-initializer spelling (spec
//! §4.3 step 37).

use crate::pass::{Pass, PassContext};
use cppls_tokens::{Classification, PassResult};

pub struct ConstructorInitializerSimplification;

impl Pass for ConstructorInitializerSimplification {
    fn name(&self) -> &'static str {
        "simplify-constructor-initializer"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            if let Some(shape) = match_ctor_init(ctx, cursor) {
                cursor = rewrite(ctx, shape)?;
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

struct CtorInit {
    name: cppls_tokens::TokenId,
    open: cppls_tokens::TokenId,
    close: cppls_tokens::TokenId,
    semi: cppls_tokens::TokenId,
}

/// `name ( single-arg-expr ) ;` where `name` is preceded by a type
/// keyword or another name (so it reads as a declarator, not a call).
fn match_ctor_init(ctx: &PassContext, name: cppls_tokens::TokenId) -> Option<CtorInit> {
    if !ctx.tokens.get(name).classification.is_name() {
        return None;
    }
    let prev = ctx.tokens.prev(name)?;
    let prev_class = ctx.tokens.get(prev).classification;
    if !(prev_class.is_keyword() || prev_class.is_name()) {
        return None;
    }
    let open = ctx.tokens.next(name)?;
    if ctx.tokens.get(open).lexeme != "(" {
        return None;
    }
    let close = ctx.tokens.find_closing_bracket(open)?;
    if ctx.tokens.next(open) == Some(close) {
        return None; // `T name();` — a function declaration, not init.
    }
    let semi = ctx.tokens.next(close)?;
    if ctx.tokens.get(semi).lexeme != ";" {
        return None;
    }
    // Reject a nested `(` inside the args implying a function-style
    // declarator parameter list rather than a single initializer value.
    let mut depth = 0i32;
    let mut probe = ctx.tokens.next(open)?;
    loop {
        match ctx.tokens.get(probe).lexeme.as_str() {
            "(" => depth += 1,
            ")" if depth == 0 => break,
            ")" => depth -= 1,
            _ => {}
        }
        probe = ctx.tokens.next(probe)?;
    }
    Some(CtorInit { name, open, close, semi })
}

/// `name ( expr ) ;` -> `name ; name = expr ;`
fn rewrite(ctx: &mut PassContext, shape: CtorInit) -> PassResult<cppls_tokens::TokenId> {
    let name_lex = ctx.tokens.get(shape.name).lexeme.clone();
    ctx.tokens.clear_link(shape.open);
    let new_semi = ctx.tokens.insert_after(shape.name, ";", Classification::Other);
    let new_name = ctx.tokens.insert_after(new_semi, name_lex, Classification::Name);
    ctx.tokens.insert_after(new_name, "=", Classification::Other);
    // `open`/`close` (now unlinked) still wrap the initializer expression;
    // drop just the parens and leave the expression in place.
    let after_close = ctx.tokens.next(shape.close);
    ctx.tokens.erase(shape.close, after_close)?;
    let after_open = ctx.tokens.next(shape.open);
    ctx.tokens.erase(shape.open, after_open)?;
    Ok(new_semi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use cppls_tokens::{FileId, Location, Token, TokenList};

    #[test]
    fn simplifies_scalar_constructor_initializer() {
        let mut tokens = TokenList::new();
        for (lex, class) in [
            ("int", Classification::Keyword),
            ("i", Classification::Name),
            ("(", Classification::Bracket),
            ("0", Classification::Number),
            (")", Classification::Bracket),
            (";", Classification::Other),
        ] {
            tokens.push_back(Token::new(lex, class, Location::new(FileId(0), 1, 1)));
        }
        let open = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "(").unwrap();
        let close = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == ")").unwrap();
        tokens.create_mutual_link(open, close).unwrap();

        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        ConstructorInitializerSimplification.run(&mut ctx).unwrap();
        let lexemes: Vec<_> = ctx.tokens.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["int", "i", ";", "i", "=", "0", ";"]);
    }

    #[test]
    fn leaves_function_declaration_alone() {
        let mut tokens = TokenList::new();
        for (lex, class) in [("int", Classification::Keyword), ("f", Classification::Name), ("(", Classification::Bracket), (")", Classification::Bracket), (";", Classification::Other)] {
            tokens.push_back(Token::new(lex, class, Location::new(FileId(0), 1, 1)));
        }
        let open = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "(").unwrap();
        let close = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == ")").unwrap();
        tokens.create_mutual_link(open, close).unwrap();

        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        ConstructorInitializerSimplification.run(&mut ctx).unwrap();
        assert_eq!(ctx.tokens.len(), 5);
    }
}
