//! Step 4 (bracket linking, first pass), step 8 (template right-angle
//! split), and step 41 (template-aware bracket linking, spec §4.6) —
//! grouped together because they all maintain a stack of open brackets.

use crate::pass::{Pass, PassContext};
use cppls_tokens::{Classification, OperatorKind, PassError, PassResult, TokenId};

/// Step 4: links `()`, `[]`, `{}` pairs. Fatal on a mismatch at pass
/// exit (spec §4.1 "Failure semantics": "Mismatched brackets at the end
/// of any rewriting pass are fatal at the translation-unit level").
pub struct BracketLinkingPass1;

impl Pass for BracketLinkingPass1 {
    fn name(&self) -> &'static str {
        "link-brackets-pass1"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let mut stack: Vec<(TokenId, &'static str)> = Vec::new();
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let lexeme = ctx.tokens.get(cursor).lexeme.clone();
            match lexeme.as_str() {
                "(" => stack.push((cursor, ")")),
                "[" => stack.push((cursor, "]")),
                "{" => stack.push((cursor, "}")),
                ")" | "]" | "}" => match stack.pop() {
                    Some((open, expected)) if expected == lexeme => {
                        ctx.tokens.create_mutual_link(open, cursor)?;
                    }
                    _ => return Err(PassError::fatal(Some(cursor), format!("syntaxError: unmatched '{lexeme}'"))),
                },
                _ => {}
            }
            match ctx.tokens.next(cursor) {
                Some(n) => cursor = n,
                None => break,
            }
        }
        if let Some((open, expected)) = stack.pop() {
            return Err(PassError::fatal(Some(open), format!("syntaxError: unterminated bracket, expected '{expected}'")));
        }
        Ok(())
    }
}

/// Step 8: splits a `>>` that closes two nested template-like `<...>`
/// lists into two `>` tokens, using a lightweight heuristic (real
/// linking, which needs variable-ids, happens in
/// [`TemplateAngleLinkingPass2`]).
pub struct TemplateRightAngleSplit;

impl Pass for TemplateRightAngleSplit {
    fn name(&self) -> &'static str {
        "split-template-right-angle"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let mut depth: i32 = 0;
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let lexeme = ctx.tokens.get(cursor).lexeme.clone();
            if lexeme == "<" {
                let opened_by_name = ctx.tokens.prev(cursor).map(|p| ctx.tokens.get(p).classification.is_name()).unwrap_or(false);
                if opened_by_name {
                    depth += 1;
                }
            } else if lexeme == ">" && depth > 0 {
                depth -= 1;
            } else if lexeme == ">>" && depth >= 2 {
                ctx.tokens.get_mut(cursor).lexeme = ">".to_string();
                ctx.tokens.insert_after(cursor, ">", Classification::Operator(OperatorKind::Comparison));
                depth -= 2;
            }
            match ctx.tokens.next(cursor) {
                Some(n) => cursor = n,
                None => break,
            }
        }
        Ok(())
    }
}

/// Step 41 (spec §4.6): re-links `<`/`>` as template brackets now that
/// variable-ids are known, distinguishing them from the comparison and
/// shift operators they're lexically identical to.
pub struct TemplateAngleLinkingPass2;

struct OpenAngle {
    token: TokenId,
    comparison_seen: bool,
}

impl Pass for TemplateAngleLinkingPass2 {
    fn name(&self) -> &'static str {
        "link-template-angle-brackets"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let mut angles: Vec<OpenAngle> = Vec::new();

        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            let lexeme = ctx.tokens.get(cursor).lexeme.clone();
            match lexeme.as_str() {
                "{" => angles.retain(|a| a.comparison_seen),
                "}" => angles.retain(|a| a.comparison_seen),
                ";" => angles.retain(|a| a.comparison_seen),
                "<" => {
                    if looks_like_template_open(ctx, cursor) {
                        angles.push(OpenAngle { token: cursor, comparison_seen: false });
                    }
                }
                ">" | ">>" if !angles.is_empty() => {
                    if lexeme == ">>" && angles.len() >= 2 {
                        let inner = angles.pop().unwrap();
                        let outer = angles.pop().unwrap();
                        ctx.tokens.get_mut(cursor).lexeme = ">".to_string();
                        let new_gt = ctx.tokens.insert_after(cursor, ">", Classification::Operator(OperatorKind::Comparison));
                        ctx.tokens.create_mutual_link(inner.token, cursor)?;
                        ctx.tokens.create_mutual_link(outer.token, new_gt)?;
                    } else {
                        let open = angles.pop().unwrap();
                        ctx.tokens.create_mutual_link(open.token, cursor)?;
                    }
                }
                _ => {
                    if ctx.tokens.get(cursor).classification == Classification::Operator(OperatorKind::Comparison) {
                        for a in angles.iter_mut() {
                            a.comparison_seen = true;
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

fn looks_like_template_open(ctx: &PassContext, lt: TokenId) -> bool {
    let prev = ctx.tokens.prev(lt).map(|p| ctx.tokens.get(p));
    let preceded_by_candidate_name = prev
        .map(|p| (p.classification.is_name() && !p.has_variable_id()) || p.lexeme == "template" || p.lexeme == "operator")
        .unwrap_or(false);
    if preceded_by_candidate_name {
        return true;
    }
    matches!(ctx.tokens.next(lt).map(|n| ctx.tokens.get(n).lexeme.clone()), Some(l) if l == ">" || l == ">>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use cppls_tokens::{FileId, Location, Token, TokenList};

    fn build(lexemes: &[&str]) -> TokenList {
        let mut tokens = TokenList::new();
        for lex in lexemes {
            let classification = match *lex {
                "(" | ")" | "[" | "]" | "{" | "}" => Classification::Bracket,
                _ => Classification::Other,
            };
            tokens.push_back(Token::new(*lex, classification, Location::new(FileId(0), 1, 1)));
        }
        tokens
    }

    #[test]
    fn pass1_links_simple_parens() {
        let mut tokens = build(&["(", "x", ")"]);
        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        BracketLinkingPass1.run(&mut ctx).unwrap();
        let open = ctx.tokens.head().unwrap();
        let close = ctx.tokens.find_closing_bracket(open).unwrap();
        assert_eq!(ctx.tokens.get(close).lexeme, ")");
    }

    #[test]
    fn pass1_rejects_mismatched_brackets() {
        let mut tokens = build(&["(", "x", "]"]);
        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        assert!(BracketLinkingPass1.run(&mut ctx).is_err());
    }

    #[test]
    fn splits_double_right_angle_closing_two_templates() {
        let mut tokens = TokenList::new();
        tokens.push_back(Token::new("Vector", Classification::Name, Location::new(FileId(0), 1, 1)));
        tokens.push_back(Token::new("<", Classification::Operator(OperatorKind::Comparison), Location::new(FileId(0), 1, 1)));
        tokens.push_back(Token::new("List", Classification::Name, Location::new(FileId(0), 1, 1)));
        tokens.push_back(Token::new("<", Classification::Operator(OperatorKind::Comparison), Location::new(FileId(0), 1, 1)));
        tokens.push_back(Token::new("int", Classification::Keyword, Location::new(FileId(0), 1, 1)));
        tokens.push_back(Token::new(">>", Classification::Operator(OperatorKind::Comparison), Location::new(FileId(0), 1, 1)));
        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        TemplateRightAngleSplit.run(&mut ctx).unwrap();
        let lexemes: Vec<_> = ctx.tokens.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["Vector", "<", "List", "<", "int", ">", ">"]);
    }
}
