//! Step 12: nested-namespace flattening (`namespace a::b { ... }` →
//! `namespace a { namespace b { ... } }`) and namespace-alias
//! resolution (`namespace N = ::std;` rewrites every `N ::` use to
//! `:: std ::` and removes the alias declaration itself, spec §4.3
//! step 12, spec §8 scenario 6).

use crate::pass::{Pass, PassContext};
use cppls_tokens::{Classification, PassResult, TokenId};

/// `namespace a::b::c { ... }` becomes nested single-name namespaces
/// so every later pass only ever has to deal with one name per
/// `namespace` keyword.
pub struct NestedNamespaceFlattening;

impl Pass for NestedNamespaceFlattening {
    fn name(&self) -> &'static str {
        "flatten-nested-namespaces"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            if ctx.tokens.get(cursor).lexeme == "namespace" {
                if let Some(first_name) = ctx.tokens.next(cursor) {
                    let mut names = vec![first_name];
                    let mut scan = ctx.tokens.next(first_name);
                    while let Some(colon) = scan {
                        if ctx.tokens.get(colon).lexeme != "::" {
                            break;
                        }
                        let Some(name) = ctx.tokens.next(colon) else { break };
                        names.push(name);
                        scan = ctx.tokens.next(name);
                    }
                    if names.len() > 1 {
                        if let Some(brace) = scan {
                            if ctx.tokens.get(brace).lexeme == "{" {
                                if let Some(close) = ctx.tokens.find_closing_bracket(brace) {
                                    let extra_names: Vec<String> = names[1..].iter().map(|id| ctx.tokens.get(*id).lexeme.clone()).collect();
                                    let tail_first = ctx.tokens.next(first_name).unwrap();
                                    ctx.tokens.erase(tail_first, Some(brace))?;
                                    let mut insert_point = first_name;
                                    for name in extra_names {
                                        let open = ctx.tokens.insert_after(insert_point, "{", Classification::Bracket);
                                        let ns = ctx.tokens.insert_after(open, "namespace", Classification::Keyword);
                                        insert_point = ctx.tokens.insert_after(ns, &name, Classification::Name);
                                        let close_copy = ctx.tokens.insert_before(close, "}", Classification::Bracket);
                                        ctx.tokens.create_mutual_link(open, close_copy)?;
                                    }
                                }
                            }
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

/// One `namespace Alias = Target ;` declaration, recorded before any
/// substitution runs so the declaration's own tokens (still present
/// in the stream while later aliases are being collected) never get
/// mistaken for a use.
struct AliasCandidate {
    name: String,
    target_start: TokenId,
    target_end: TokenId,
    decl_start: TokenId,
    decl_end: TokenId,
}

/// Rewrites `namespace N = ::std;` style aliases: every later `N ::`
/// use becomes a copy of the target (`:: std ::`), and the alias
/// declaration itself is erased once every use has been rewritten.
pub struct NamespaceAliasSubstitution;

impl Pass for NamespaceAliasSubstitution {
    fn name(&self) -> &'static str {
        "substitute-namespace-aliases"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        for alias in collect_aliases(ctx) {
            substitute_uses(ctx, &alias);
            erase_declaration(ctx, &alias);
        }
        Ok(())
    }
}

fn collect_aliases(ctx: &PassContext) -> Vec<AliasCandidate> {
    let mut out = Vec::new();
    let Some(mut cursor) = ctx.tokens.head() else { return out };
    loop {
        if ctx.tokens.get(cursor).lexeme == "namespace" {
            if let Some(candidate) = parse_alias(ctx, cursor) {
                out.push(candidate);
            }
        }
        match ctx.tokens.next(cursor) {
            Some(n) => cursor = n,
            None => break,
        }
    }
    out
}

/// `namespace Name = <target tokens> ;`. Returns `None` for an
/// ordinary `namespace Name { ... }` declaration.
fn parse_alias(ctx: &PassContext, kw: TokenId) -> Option<AliasCandidate> {
    let name = ctx.tokens.next(kw)?;
    if !ctx.tokens.get(name).classification.is_name() {
        return None;
    }
    let eq = ctx.tokens.next(name)?;
    if ctx.tokens.get(eq).lexeme != "=" {
        return None;
    }
    let target_start = ctx.tokens.next(eq)?;
    let mut cursor = target_start;
    loop {
        if ctx.tokens.get(cursor).lexeme == ";" {
            break;
        }
        cursor = ctx.tokens.next(cursor)?;
    }
    let decl_end = cursor;
    let target_end = ctx.tokens.prev(decl_end)?;
    Some(AliasCandidate {
        name: ctx.tokens.get(name).lexeme.clone(),
        target_start,
        target_end,
        decl_start: kw,
        decl_end,
    })
}

/// A use is the alias name immediately followed by `::`; the
/// declaration's own name token is followed by `=`, so it never
/// matches here.
fn substitute_uses(ctx: &mut PassContext, alias: &AliasCandidate) {
    let Some(mut cursor) = ctx.tokens.head() else { return };
    loop {
        let is_use = ctx.tokens.get(cursor).classification.is_name()
            && ctx.tokens.get(cursor).lexeme == alias.name
            && ctx.tokens.next(cursor).map(|n| ctx.tokens.get(n).lexeme == "::").unwrap_or(false);
        if is_use {
            ctx.tokens.copy_range(cursor, alias.target_start, alias.target_end);
            let after = ctx.tokens.next(cursor);
            let _ = ctx.tokens.erase(cursor, after);
        }
        match ctx.tokens.next(cursor) {
            Some(n) => cursor = n,
            None => break,
        }
    }
}

fn erase_declaration(ctx: &mut PassContext, alias: &AliasCandidate) {
    let after = ctx.tokens.next(alias.decl_end);
    let _ = ctx.tokens.erase(alias.decl_start, after);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use cppls_tokens::{FileId, Location, Token, TokenList};

    fn ctx_run(pass: &dyn Pass, tokens: &mut TokenList) {
        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        pass.run(&mut ctx).unwrap();
    }

    #[test]
    fn flattens_a_double_nested_namespace() {
        let mut tokens = TokenList::new();
        for (lex, class) in [
            ("namespace", Classification::Keyword),
            ("a", Classification::Name),
            ("::", Classification::Other),
            ("b", Classification::Name),
            ("{", Classification::Bracket),
            ("int", Classification::Keyword),
            ("x", Classification::Name),
            (";", Classification::Other),
            ("}", Classification::Bracket),
        ] {
            tokens.push_back(Token::new(lex, class, Location::new(FileId(0), 1, 1)));
        }
        let open = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "{").unwrap();
        let close = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "}").unwrap();
        tokens.create_mutual_link(open, close).unwrap();

        ctx_run(&NestedNamespaceFlattening, &mut tokens);
        let lexemes: Vec<_> = tokens.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["namespace", "a", "{", "namespace", "b", "{", "int", "x", ";", "}", "}"]);
    }

    #[test]
    fn substitutes_alias_use_and_erases_declaration() {
        let mut tokens = TokenList::new();
        for (lex, class) in [
            ("namespace", Classification::Keyword),
            ("N", Classification::Name),
            ("=", Classification::Other),
            ("::", Classification::Other),
            ("std", Classification::Name),
            (";", Classification::Other),
            ("N", Classification::Name),
            ("::", Classification::Other),
            ("vector", Classification::Name),
            ("<", Classification::Other),
            ("int", Classification::Keyword),
            (">", Classification::Other),
            ("v", Classification::Name),
            (";", Classification::Other),
        ] {
            tokens.push_back(Token::new(lex, class, Location::new(FileId(0), 1, 1)));
        }
        ctx_run(&NamespaceAliasSubstitution, &mut tokens);
        let lexemes: Vec<_> = tokens.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["::", "std", "::", "vector", "<", "int", ">", "v", ";"]);
    }

    #[test]
    fn leaves_an_ordinary_namespace_declaration_alone() {
        let mut tokens = TokenList::new();
        for lex in ["namespace", "a", "{", "}"] {
            let class = if matches!(lex, "{" | "}") { Classification::Bracket } else { Classification::Other };
            tokens.push_back(Token::new(lex, class, Location::new(FileId(0), 1, 1)));
        }
        ctx_run(&NamespaceAliasSubstitution, &mut tokens);
        let lexemes: Vec<_> = tokens.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["namespace", "a", "{", "}"]);
    }
}
