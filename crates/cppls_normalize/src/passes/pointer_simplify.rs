//! Step 36: pointer simplification — C-only collapsing of
//! `type * const` qualifier noise is handled elsewhere; this pass
//! narrows to function-pointer declarator simplification,
//! `int (*f)(x)` becomes `int * f`, dropping the parameter list since
//! later checks only need the variable's pointer-ness, not its
//! signature shape (spec §4.3 step 36).

use crate::pass::{Pass, PassContext};
use cppls_tokens::PassResult;

pub struct FunctionPointerSimplification;

impl Pass for FunctionPointerSimplification {
    fn name(&self) -> &'static str {
        "simplify-function-pointers"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        if ctx.config.is_cpp {
            return Ok(());
        }
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            if ctx.tokens.get(cursor).lexeme == "(" {
                if let Some(shape) = match_fn_ptr(ctx, cursor) {
                    cursor = simplify(ctx, shape)?;
                    continue;
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

#[derive(Clone, Copy)]
struct FnPtrShape {
    open_outer: cppls_tokens::TokenId,
    star: cppls_tokens::TokenId,
    name: cppls_tokens::TokenId,
    close_outer: cppls_tokens::TokenId,
    close_params: cppls_tokens::TokenId,
}

/// `( * name ) ( ... params ... )` immediately following `open`.
fn match_fn_ptr(ctx: &PassContext, open: cppls_tokens::TokenId) -> Option<FnPtrShape> {
    let star = ctx.tokens.next(open)?;
    if ctx.tokens.get(star).lexeme != "*" {
        return None;
    }
    let name = ctx.tokens.next(star)?;
    if !ctx.tokens.get(name).classification.is_name() {
        return None;
    }
    let close_outer = ctx.tokens.next(name)?;
    if ctx.tokens.get(close_outer).lexeme != ")" {
        return None;
    }
    let open_params = ctx.tokens.next(close_outer)?;
    if ctx.tokens.get(open_params).lexeme != "(" {
        return None;
    }
    let close_params = ctx.tokens.find_closing_bracket(open_params)?;
    Some(FnPtrShape { open_outer: open, star, name, close_outer, close_params })
}

/// Rewrites `( * name ) ( ... )` to `* name`, dropping the parameter
/// list, and returns the live token to resume scanning from (`star`).
fn simplify(ctx: &mut PassContext, shape: FnPtrShape) -> PassResult<cppls_tokens::TokenId> {
    ctx.tokens.clear_link(shape.open_outer);
    // Removes `) ( ... )` as one contiguous run, leaving `( * name`.
    let after_params = ctx.tokens.next(shape.close_params);
    ctx.tokens.erase(shape.close_outer, after_params)?;
    // Removes the now-unpartnered leading `(`.
    let after_open_outer = ctx.tokens.next(shape.open_outer);
    ctx.tokens.erase(shape.open_outer, after_open_outer)?;
    Ok(shape.star)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use cppls_tokens::{Classification, FileId, Location, Token, TokenList};

    #[test]
    fn simplifies_function_pointer_declarator() {
        let mut tokens = TokenList::new();
        for (lex, class) in [
            ("int", Classification::Keyword),
            ("(", Classification::Bracket),
            ("*", Classification::Other),
            ("f", Classification::Name),
            (")", Classification::Bracket),
            ("(", Classification::Bracket),
            ("int", Classification::Keyword),
            (")", Classification::Bracket),
            (";", Classification::Other),
        ] {
            tokens.push_back(Token::new(lex, class, Location::new(FileId(0), 1, 1)));
        }
        let mut opens = tokens.iter().filter(|(_, t)| t.lexeme == "(").map(|(id, _)| id);
        let open_outer = opens.next().unwrap();
        let open_params = opens.next().unwrap();
        drop(opens);
        let mut closes = tokens.iter().filter(|(_, t)| t.lexeme == ")").map(|(id, _)| id);
        let close_outer = closes.next().unwrap();
        let close_params = closes.next().unwrap();
        drop(closes);
        tokens.create_mutual_link(open_outer, close_outer).unwrap();
        tokens.create_mutual_link(open_params, close_params).unwrap();

        let mut files = cppls_tokens::FileTable::new();
        let mut config = PipelineConfig::default();
        config.is_cpp = false;
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        FunctionPointerSimplification.run(&mut ctx).unwrap();
        let lexemes: Vec<_> = ctx.tokens.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["int", "*", "f", ";"]);
    }

    #[test]
    fn skipped_in_cpp_mode() {
        let mut tokens = TokenList::new();
        for lex in ["int", "(", "*", "f", ")", "(", "int", ")", ";"] {
            let class = if matches!(lex, "(" | ")") { Classification::Bracket } else { Classification::Other };
            tokens.push_back(Token::new(lex, class, Location::new(FileId(0), 1, 1)));
        }
        let mut files = cppls_tokens::FileTable::new();
        let mut config = PipelineConfig::default();
        config.is_cpp = true;
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        FunctionPointerSimplification.run(&mut ctx).unwrap();
        assert_eq!(ctx.tokens.len(), 9);
    }
}
