//! Step 24: garbage-template error detection for C++ inputs — an
//! angle-bracket pair that never got linked by the template-aware
//! bracket passes (steps 8 and 41) but still looks like it was meant
//! as a template argument list is almost always malformed input (spec
//! §4.3 step 24, spec §7 *syntaxError* family).

use crate::pass::{Pass, PassContext};
use cppls_tokens::{PassError, PassResult};

pub struct GarbageTemplateDetection;

impl Pass for GarbageTemplateDetection {
    fn name(&self) -> &'static str {
        "detect-garbage-template"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        if !ctx.config.is_cpp {
            return Ok(());
        }
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let is_unlinked_template_open = ctx.tokens.get(cursor).lexeme == "<"
                && ctx.tokens.get(cursor).links.bracket.is_none()
                && ctx.tokens.prev(cursor).map(|p| looks_like_template_name(ctx, p)).unwrap_or(false);
            if is_unlinked_template_open {
                return Err(PassError::fatal(Some(cursor), "syntaxError: garbage template instantiation"));
            }
            match ctx.tokens.next(cursor) {
                Some(n) => cursor = n,
                None => break,
            }
        }
        Ok(())
    }
}

fn looks_like_template_name(ctx: &PassContext, id: cppls_tokens::TokenId) -> bool {
    let tok = ctx.tokens.get(id);
    tok.classification.is_name() && !tok.flags.contains(cppls_tokens::TokenFlags::IS_TEMPLATE_ARG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use cppls_tokens::{Classification, FileId, Location, Token, TokenList};

    #[test]
    fn flags_an_unlinked_angle_after_a_name() {
        let mut tokens = TokenList::new();
        for (lex, class) in [("Foo", Classification::Name), ("<", Classification::Bracket), ("T", Classification::Name)] {
            tokens.push_back(Token::new(lex, class, Location::new(FileId(0), 1, 1)));
        }
        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        assert!(GarbageTemplateDetection.run(&mut ctx).is_err());
    }

    #[test]
    fn allows_a_properly_linked_angle() {
        let mut tokens = TokenList::new();
        for (lex, class) in [("Foo", Classification::Name), ("<", Classification::Bracket), ("T", Classification::Name), (">", Classification::Bracket)] {
            tokens.push_back(Token::new(lex, class, Location::new(FileId(0), 1, 1)));
        }
        let open = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "<").unwrap();
        let close = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == ">").unwrap();
        tokens.create_mutual_link(open, close).unwrap();

        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        assert!(GarbageTemplateDetection.run(&mut ctx).is_ok());
    }
}
