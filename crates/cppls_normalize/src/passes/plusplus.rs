//! Step 45: redundant unary-sign collapsing — `- -x` and `+ +x` fold to
//! a single sign the same way step 15 already folds `- -5` in front of
//! a numeric literal; this pass covers the general case where the
//! operand isn't a literal (a name, a parenthesized expression, a call)
//! so later passes see at most one leading sign (spec §4.3 step 45).

use crate::pass::{Pass, PassContext};
use cppls_tokens::PassResult;

pub struct UnarySignCollapsing;

impl Pass for UnarySignCollapsing {
    fn name(&self) -> &'static str {
        "collapse-unary-signs"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            while let Some(folded) = try_fold(ctx, cursor)? {
                cursor = folded;
            }
            match ctx.tokens.next(cursor) {
                Some(n) => cursor = n,
                None => break,
            }
        }
        Ok(())
    }
}

/// If `first` and the token after it are both bare `+`/`-` unary signs
/// (not `++`/`--`) preceding an operand, combines them into one sign
/// token and returns it so the caller can try folding again.
fn try_fold(ctx: &mut PassContext, first: cppls_tokens::TokenId) -> PassResult<Option<cppls_tokens::TokenId>> {
    let lex = ctx.tokens.get(first).lexeme.clone();
    if lex != "+" && lex != "-" {
        return Ok(None);
    }
    if !is_unary_position(ctx, first) {
        return Ok(None);
    }
    let Some(second) = ctx.tokens.next(first) else { return Ok(None) };
    let second_lex = ctx.tokens.get(second).lexeme.clone();
    if second_lex != "+" && second_lex != "-" {
        return Ok(None);
    }
    let combined = if lex == second_lex { "+" } else { "-" };
    ctx.tokens.get_mut(first).lexeme = combined.to_string();
    let after_second = ctx.tokens.next(second);
    ctx.tokens.erase(second, after_second)?;
    Ok(Some(first))
}

/// True when `sign` reads as a unary operator: at the start of an
/// expression, or right after anything that isn't itself an operand
/// (a name or a number — the only tokens a binary `+`/`-` can follow).
fn is_unary_position(ctx: &PassContext, sign: cppls_tokens::TokenId) -> bool {
    match ctx.tokens.prev(sign) {
        None => true,
        Some(p) => {
            let class = ctx.tokens.get(p).classification;
            !(class.is_name() || matches!(class, cppls_tokens::Classification::Number))
        }
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
            let class = if *lex == "x" { Classification::Name } else { Classification::Other };
            tokens.push_back(Token::new(*lex, class, Location::new(FileId(0), 1, 1)));
        }
        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        UnarySignCollapsing.run(&mut ctx).unwrap();
        ctx.tokens.iter().map(|(_, t)| t.lexeme.clone()).collect()
    }

    #[test]
    fn folds_double_negative_before_a_name() {
        assert_eq!(run_pass(&["=", "-", "-", "x", ";"]), vec!["=", "+", "x", ";"]);
    }

    #[test]
    fn folds_plus_minus_to_minus() {
        assert_eq!(run_pass(&["=", "+", "-", "x", ";"]), vec!["=", "-", "x", ";"]);
    }

    #[test]
    fn leaves_binary_subtraction_alone() {
        assert_eq!(run_pass(&["x", "-", "x", ";"]), vec!["x", "-", "x", ";"]);
    }
}
