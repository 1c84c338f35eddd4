//! Step 6: recognizes `debug_valueflow(expr)` / `debug_valuetype(expr)`
//! intrinsics and flags their operand tokens so the debug-dump passes
//! later in the pipeline know to annotate them (spec §4.3 step 6).

use crate::pass::{Pass, PassContext};
use cppls_tokens::{PassResult, TokenFlags};

pub struct DebugIntrinsicFolding;

impl Pass for DebugIntrinsicFolding {
    fn name(&self) -> &'static str {
        "fold-debug-intrinsics"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let lexeme = ctx.tokens.get(cursor).lexeme.clone();
            if (lexeme == "debug_valueflow" || lexeme == "debug_valuetype") && ctx.tokens.next(cursor).map(|n| ctx.tokens.get(n).lexeme == "(").unwrap_or(false) {
                let open = ctx.tokens.next(cursor).unwrap();
                if let Some(close) = ctx.tokens.find_closing_bracket(open) {
                    let mut inner = ctx.tokens.next(open);
                    while let Some(id) = inner {
                        if id == close {
                            break;
                        }
                        ctx.tokens.get_mut(id).flags.set(TokenFlags::IS_TEMPLATE_ARG);
                        inner = ctx.tokens.next(id);
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
