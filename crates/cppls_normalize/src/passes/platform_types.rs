//! Step 27: platform-type mapping — `size_t`, `ssize_t`, `intN_t` and
//! friends become the underlying built-in type for the active
//! platform. Step 28: standard-type collapsing — multi-word built-in
//! type sequences (`unsigned long long int`) become a single token
//! carrying `is_unsigned`/`is_long` flags (spec §4.3 steps 27-28).

use crate::pass::{Pass, PassContext};
use cppls_tokens::{Platform, PassResult, TokenFlags};

pub struct PlatformTypeMapping;

impl Pass for PlatformTypeMapping {
    fn name(&self) -> &'static str {
        "map-platform-types"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let platform = ctx.config.platform;
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            if let Some(replacement) = underlying_type(ctx.tokens.get(cursor).lexeme.as_str(), platform) {
                let tok = ctx.tokens.get_mut(cursor);
                tok.original_name = Some(tok.lexeme.clone());
                tok.lexeme = replacement.0.to_string();
                if replacement.1 {
                    tok.flags.set(TokenFlags::IS_UNSIGNED);
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

/// Returns `(underlying type name, is_unsigned)` for a platform-type
/// alias, or `None` if `lexeme` isn't one.
fn underlying_type(lexeme: &str, platform: Platform) -> Option<(&'static str, bool)> {
    let sizes = platform.type_sizes();
    match lexeme {
        "size_t" => Some((if sizes.size_t_size == 8 { "unsigned long" } else { "unsigned int" }, true)),
        "ssize_t" => Some((if sizes.size_t_size == 8 { "long" } else { "int" }, false)),
        "ptrdiff_t" | "intptr_t" => Some((if sizes.pointer_size == 8 { "long" } else { "int" }, false)),
        "uintptr_t" => Some((if sizes.pointer_size == 8 { "unsigned long" } else { "unsigned int" }, true)),
        "int8_t" => Some(("signed char", false)),
        "uint8_t" => Some(("unsigned char", true)),
        "int16_t" => Some(("short", false)),
        "uint16_t" => Some(("unsigned short", true)),
        "int32_t" => Some(("int", false)),
        "uint32_t" => Some(("unsigned int", true)),
        "int64_t" => Some((if sizes.long_size == 8 { "long" } else { "long long" }, false)),
        "uint64_t" => Some((if sizes.long_size == 8 { "unsigned long" } else { "unsigned long long" }, true)),
        _ => None,
    }
}

/// Collapses a run of built-in type-specifier keywords (`unsigned`,
/// `long`, `int`, `signed`, `char`, etc.) into the first token,
/// recording width/signedness as flags and removing the rest.
pub struct StandardTypeCollapsing;

impl Pass for StandardTypeCollapsing {
    fn name(&self) -> &'static str {
        "collapse-standard-types"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            if is_type_specifier_word(ctx.tokens.get(cursor).lexeme.as_str()) {
                let mut is_unsigned = false;
                let mut long_count = 0u32;
                let mut base_word: Option<&'static str> = None;
                let mut scan = Some(cursor);
                let mut last = cursor;
                while let Some(id) = scan {
                    let word = ctx.tokens.get(id).lexeme.clone();
                    if !is_type_specifier_word(&word) {
                        break;
                    }
                    match word.as_str() {
                        "unsigned" => is_unsigned = true,
                        "signed" => {}
                        "long" => long_count += 1,
                        "short" => base_word = Some("short"),
                        "int" => base_word = base_word.or(Some("int")),
                        "char" => base_word = Some("char"),
                        "double" => base_word = Some("double"),
                        _ => {}
                    }
                    last = id;
                    scan = ctx.tokens.next(id);
                }
                if last != cursor {
                    let word = base_word.unwrap_or("int");
                    ctx.tokens.get_mut(cursor).lexeme = word.to_string();
                    if is_unsigned {
                        ctx.tokens.get_mut(cursor).flags.set(TokenFlags::IS_UNSIGNED);
                    }
                    if long_count > 0 {
                        ctx.tokens.get_mut(cursor).flags.set(TokenFlags::IS_LONG);
                    }
                    let after_first = ctx.tokens.next(cursor);
                    let after_last = ctx.tokens.next(last);
                    if let Some(first_extra) = after_first {
                        ctx.tokens.erase(first_extra, after_last)?;
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

fn is_type_specifier_word(word: &str) -> bool {
    matches!(word, "unsigned" | "signed" | "long" | "short" | "int" | "char" | "double")
}
