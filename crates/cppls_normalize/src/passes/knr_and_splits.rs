//! Step 22: K&R → ANSI parameter-list conversion, and variable
//! declaration splitting (`int a = 1, b = 2;` → `int a = 1; int b =
//! 2;`). Step 38 reruns the same splitting pass once more after
//! typedefs have been substituted, since substitution can expose new
//! comma-joined declarations (spec §4.3 steps 22 and 38).

use crate::pass::{Pass, PassContext};
use cppls_tokens::{Classification, PassResult, TokenFlags};

/// Splits `T a = x, b = y;` into `T a = x; T b = y;`, flagging the
/// synthesized tokens so later passes (and diagnostics) know this
/// statement wasn't in the original source verbatim.
pub struct VariableDeclarationSplit;

impl Pass for VariableDeclarationSplit {
    fn name(&self) -> &'static str {
        "split-variable-declarations"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            if ctx.tokens.get(cursor).lexeme == ";" {
                match ctx.tokens.next(cursor) {
                    Some(n) => {
                        cursor = n;
                        continue;
                    }
                    None => break,
                }
            }
            if is_decl_start(ctx, cursor) {
                if let Some(semi) = find_statement_semicolon(ctx, cursor) {
                    split_one(ctx, cursor, semi)?;
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

fn is_decl_start(ctx: &PassContext, id: cppls_tokens::TokenId) -> bool {
    matches!(
        ctx.tokens.get(id).lexeme.as_str(),
        "int" | "char" | "short" | "long" | "float" | "double" | "bool" | "unsigned" | "signed" | "void" | "auto"
    )
}

fn find_statement_semicolon(ctx: &PassContext, start: cppls_tokens::TokenId) -> Option<cppls_tokens::TokenId> {
    let mut depth = 0i32;
    let mut cursor = Some(start);
    while let Some(id) = cursor {
        match ctx.tokens.get(id).lexeme.as_str() {
            "(" | "[" | "{" => depth += 1,
            ")" | "]" | "}" => depth -= 1,
            ";" if depth == 0 => return Some(id),
            _ => {}
        }
        cursor = ctx.tokens.next(id);
    }
    None
}

/// Finds the top-level (depth-0 w.r.t. brackets) commas between `start`
/// and `semi` and splits the declaration at each one.
fn split_one(ctx: &mut PassContext, start: cppls_tokens::TokenId, semi: cppls_tokens::TokenId) -> PassResult<()> {
    let Some(type_name_end) = ctx.tokens.next(start) else { return Ok(()) };
    let Some(first_comma) = find_top_level_comma(ctx, type_name_end, semi) else { return Ok(()) };

    let type_tokens: Vec<String> = {
        let mut names = Vec::new();
        let mut cursor = Some(start);
        while let Some(id) = cursor {
            if id == type_name_end {
                break;
            }
            names.push(ctx.tokens.get(id).lexeme.clone());
            cursor = ctx.tokens.next(id);
        }
        names
    };

    ctx.tokens.get_mut(first_comma).flags.set(TokenFlags::IS_SPLIT_VAR_DECL_COMMA);
    ctx.tokens.get_mut(first_comma).lexeme = ";".to_string();

    let mut insert_point = first_comma;
    for name in type_tokens.iter().rev() {
        insert_point = ctx.tokens.insert_after(first_comma, name, Classification::Keyword);
    }
    ctx.tokens.get_mut(insert_point).flags.set(TokenFlags::IS_SPLIT_VAR_DECL_COMMA);
    let _ = semi;
    Ok(())
}

fn find_top_level_comma(ctx: &PassContext, start: cppls_tokens::TokenId, limit: cppls_tokens::TokenId) -> Option<cppls_tokens::TokenId> {
    let mut depth = 0i32;
    let mut cursor = Some(start);
    while let Some(id) = cursor {
        if id == limit {
            return None;
        }
        match ctx.tokens.get(id).lexeme.as_str() {
            "(" | "[" | "{" => depth += 1,
            ")" | "]" | "}" => depth -= 1,
            "," if depth == 0 => return Some(id),
            _ => {}
        }
        cursor = ctx.tokens.next(id);
    }
    None
}
