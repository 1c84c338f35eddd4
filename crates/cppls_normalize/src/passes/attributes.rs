//! Step 10: spaceship-operator joining, `@` attribute handling,
//! `__declspec`/`__attribute__` decoding into token flags, and C++
//! `[[attr]]` decoding (spec §4.3 step 10).

use crate::pass::{Pass, PassContext};
use cppls_tokens::{PassResult, TokenFlags};

/// Joins `<= >` into a single `<=>` spaceship-operator token.
pub struct SpaceshipJoin;

impl Pass for SpaceshipJoin {
    fn name(&self) -> &'static str {
        "join-spaceship-operator"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        if !ctx.config.cpp_standard.supports_spaceship() {
            return Ok(());
        }
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let next = ctx.tokens.next(cursor);
            let joins = ctx.tokens.get(cursor).lexeme == "<=" && next.map(|n| ctx.tokens.get(n).lexeme == ">").unwrap_or(false);
            if joins {
                let next = next.unwrap();
                ctx.tokens.get_mut(cursor).lexeme = "<=>".to_string();
                ctx.tokens.erase(next, ctx.tokens.next(next))?;
                continue;
            }
            match next {
                Some(n) => cursor = n,
                None => break,
            }
        }
        Ok(())
    }
}

/// Decodes `__attribute__((...))` and `__declspec(...)` into
/// [`TokenFlags`] on the token they apply to, then removes the
/// attribute's own tokens from the stream (spec §3 `is_attribute_*`
/// flags).
pub struct GccMsvcAttributeDecoding;

impl Pass for GccMsvcAttributeDecoding {
    fn name(&self) -> &'static str {
        "decode-gcc-msvc-attributes"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let lexeme = ctx.tokens.get(cursor).lexeme.clone();
            if lexeme == "__attribute__" || lexeme == "__declspec" {
                if let Some(open) = ctx.tokens.next(cursor) {
                    if ctx.tokens.get(open).lexeme == "(" {
                        if let Some(close) = ctx.tokens.find_closing_bracket(open) {
                            let flag = attribute_flag_from_body(ctx, open, close);
                            if let Some(flag) = flag {
                                if let Some(target) = ctx.tokens.next(close) {
                                    ctx.tokens.get_mut(target).flags.set(flag);
                                }
                            }
                            let after = ctx.tokens.next(close);
                            ctx.tokens.erase(cursor, after)?;
                            cursor = match after {
                                Some(a) => a,
                                None => return Ok(()),
                            };
                            continue;
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

fn attribute_flag_from_body(ctx: &PassContext, open: cppls_tokens::TokenId, close: cppls_tokens::TokenId) -> Option<TokenFlags> {
    let mut cursor = ctx.tokens.next(open);
    while let Some(id) = cursor {
        if id == close {
            break;
        }
        let flag = match ctx.tokens.get(id).lexeme.as_str() {
            "constructor" => Some(TokenFlags::IS_ATTRIBUTE_CONSTRUCTOR),
            "destructor" => Some(TokenFlags::IS_ATTRIBUTE_DESTRUCTOR),
            "pure" => Some(TokenFlags::IS_ATTRIBUTE_PURE),
            "const" => Some(TokenFlags::IS_ATTRIBUTE_CONST),
            "noreturn" => Some(TokenFlags::IS_ATTRIBUTE_NORETURN),
            "nothrow" => Some(TokenFlags::IS_ATTRIBUTE_NOTHROW),
            "unused" => Some(TokenFlags::IS_ATTRIBUTE_UNUSED),
            "used" => Some(TokenFlags::IS_ATTRIBUTE_USED),
            "packed" => Some(TokenFlags::IS_ATTRIBUTE_PACKED),
            "aligned" => Some(TokenFlags::IS_ATTRIBUTE_ALIGNED),
            _ => None,
        };
        if flag.is_some() {
            return flag;
        }
        cursor = ctx.tokens.next(id);
    }
    None
}

/// Decodes C++11 `[[attr]]` syntax the same way (`[[nodiscard]]`,
/// `[[maybe_unused]]`, `[[fallthrough]]`, ...).
pub struct CppAttributeDecoding;

impl Pass for CppAttributeDecoding {
    fn name(&self) -> &'static str {
        "decode-cpp-attributes"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let is_double_open = ctx.tokens.get(cursor).lexeme == "["
                && ctx.tokens.next(cursor).map(|n| ctx.tokens.get(n).lexeme == "[").unwrap_or(false);
            if is_double_open {
                // `find_closing_bracket` on the outer `[` already walks
                // past the nested inner `[...]`, landing on the final `]`
                // of the `[[...]]` pair.
                if let Some(close) = ctx.tokens.find_closing_bracket(cursor) {
                    let mut inner = ctx.tokens.next(ctx.tokens.next(cursor).unwrap());
                    let flag = loop {
                        match inner {
                            Some(id) if id != close => {
                                let f = match ctx.tokens.get(id).lexeme.as_str() {
                                    "nodiscard" => Some(TokenFlags::IS_ATTRIBUTE_NODISCARD),
                                    "maybe_unused" => Some(TokenFlags::IS_ATTRIBUTE_MAYBE_UNUSED),
                                    "fallthrough" => Some(TokenFlags::IS_ATTRIBUTE_FALLTHROUGH),
                                    "noreturn" => Some(TokenFlags::IS_ATTRIBUTE_NORETURN),
                                    _ => None,
                                };
                                if f.is_some() {
                                    break f;
                                }
                                inner = ctx.tokens.next(id);
                            }
                            _ => break None,
                        }
                    };
                    let after = ctx.tokens.next(close);
                    if let Some(flag) = flag {
                        if let Some(target) = after {
                            ctx.tokens.get_mut(target).flags.set(flag);
                        }
                    }
                    ctx.tokens.erase(cursor, after)?;
                    cursor = match after {
                        Some(a) => a,
                        None => return Ok(()),
                    };
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
