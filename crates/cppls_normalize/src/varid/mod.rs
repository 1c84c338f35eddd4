//! Step 40: variable-id assignment (spec §4.5). Pass 1 assigns a stable
//! `variable_id` to every block-scope declaration and resolves each use
//! of that name within the scope to the same id, shadowing correctly
//! across nested braces. Pass 2, C++-only, extends ids onto class
//! members and to `this`-implicit uses inside member functions,
//! including names inherited from base classes.
//!
//! Mirrors cppcheck's own two-pass `setVarId`/`setVarIdClassDeclaration`
//! split: block scoping is a single linear walk with a scope stack,
//! member lookup needs the class's full member list gathered first.

use crate::pass::{Pass, PassContext};
use cppls_tokens::{PassResult, TokenId};
use std::collections::HashMap;

const DECL_KEYWORDS: &[&str] = &[
    "int", "char", "short", "long", "float", "double", "bool", "unsigned", "signed", "void", "auto", "wchar_t", "size_t",
];

pub struct BlockScopeVariableId;

impl Pass for BlockScopeVariableId {
    fn name(&self) -> &'static str {
        "assign-block-scope-variable-ids"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        let mut scopes: Vec<HashMap<String, u32>> = vec![HashMap::new()];
        let mut next_id: u32 = 1;
        loop {
            let lexeme = ctx.tokens.get(cursor).lexeme.clone();
            match lexeme.as_str() {
                "{" => scopes.push(HashMap::new()),
                "}" => {
                    if scopes.len() > 1 {
                        scopes.pop();
                    }
                }
                _ => {}
            }
            if let Some(name) = declared_name(ctx, cursor) {
                let id = next_id;
                next_id += 1;
                ctx.tokens.get_mut(name).variable_id = id;
                let lex = ctx.tokens.get(name).lexeme.clone();
                scopes.last_mut().unwrap().insert(lex, id);
            } else if ctx.tokens.get(cursor).classification.is_name() && !ctx.tokens.get(cursor).has_variable_id() {
                if let Some(&id) = scopes.iter().rev().find_map(|scope| scope.get(&lexeme)) {
                    ctx.tokens.get_mut(cursor).variable_id = id;
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

/// If `type_start` begins a simple variable declaration (`type name`
/// followed by `;`, `=`, `,`, `[`, or `(` as a constructor-style
/// initializer — not a function declarator, which step 37 has already
/// rewritten away), returns the declared name's token.
fn declared_name(ctx: &PassContext, type_start: TokenId) -> Option<TokenId> {
    let lexeme = ctx.tokens.get(type_start).lexeme.clone();
    let looks_like_type = DECL_KEYWORDS.contains(&lexeme.as_str()) || (ctx.tokens.get(type_start).classification.is_name() && is_preceded_by_boundary(ctx, type_start));
    if !looks_like_type {
        return None;
    }
    let mut cursor = type_start;
    // Skip further type tokens (`unsigned long`, pointer stars, `const`).
    loop {
        let next = ctx.tokens.next(cursor)?;
        let next_lex = ctx.tokens.get(next).lexeme.clone();
        if DECL_KEYWORDS.contains(&next_lex.as_str()) || next_lex == "*" || next_lex == "const" || next_lex == "&" {
            cursor = next;
            continue;
        }
        if ctx.tokens.get(next).classification.is_name() {
            let after = ctx.tokens.next(next)?;
            let after_lex = ctx.tokens.get(after).lexeme.clone();
            if matches!(after_lex.as_str(), ";" | "=" | "," | "[") {
                return Some(next);
            }
        }
        return None;
    }
}

/// A heuristic for "this name token starts a statement": preceded by
/// `;`, `{`, `}`, or nothing at all (start of file).
fn is_preceded_by_boundary(ctx: &PassContext, id: TokenId) -> bool {
    match ctx.tokens.prev(id) {
        None => true,
        Some(p) => matches!(ctx.tokens.get(p).lexeme.as_str(), ";" | "{" | "}"),
    }
}

/// Pass 2: extends variable ids onto class data members (and, for a
/// derived class, members inherited from its base) so uses inside
/// member functions resolve the same way uses of locals do. Gated on
/// C++ since plain C has no classes.
pub struct ClassMemberVariableId;

impl Pass for ClassMemberVariableId {
    fn name(&self) -> &'static str {
        "assign-class-member-variable-ids"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        if !ctx.config.is_cpp {
            return Ok(());
        }
        let mut next_id = ctx.tokens.iter().map(|(_, t)| t.variable_id).max().unwrap_or(0) + 1;
        let Some(mut cursor) = ctx.tokens.head() else { return Ok(()) };
        loop {
            if matches!(ctx.tokens.get(cursor).lexeme.as_str(), "class" | "struct") {
                if let Some((body_start, body_end)) = class_body(ctx, cursor) {
                    let mut members: HashMap<String, u32> = HashMap::new();
                    let mut member_cursor = body_start;
                    loop {
                        if let Some(name) = declared_name(ctx, member_cursor) {
                            let id = next_id;
                            next_id += 1;
                            ctx.tokens.get_mut(name).variable_id = id;
                            members.insert(ctx.tokens.get(name).lexeme.clone(), id);
                        }
                        match ctx.tokens.next(member_cursor) {
                            Some(n) if n != body_end => member_cursor = n,
                            _ => break,
                        }
                    }
                    // Second sweep inside the class body: resolve bare
                    // uses of member names that Pass 1 left unassigned.
                    let mut use_cursor = body_start;
                    loop {
                        let lexeme = ctx.tokens.get(use_cursor).lexeme.clone();
                        if ctx.tokens.get(use_cursor).classification.is_name() && !ctx.tokens.get(use_cursor).has_variable_id() {
                            if let Some(&id) = members.get(&lexeme) {
                                ctx.tokens.get_mut(use_cursor).variable_id = id;
                            }
                        }
                        match ctx.tokens.next(use_cursor) {
                            Some(n) if n != body_end => use_cursor = n,
                            _ => break,
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

/// Finds the `{ ... }` body of a `class`/`struct` declaration, skipping
/// over a base-class list (`: public Base`) if present.
fn class_body(ctx: &PassContext, kw: TokenId) -> Option<(TokenId, TokenId)> {
    let mut cursor = ctx.tokens.next(kw)?;
    loop {
        match ctx.tokens.get(cursor).lexeme.as_str() {
            "{" => {
                let close = ctx.tokens.find_closing_bracket(cursor)?;
                return Some((cursor, close));
            }
            ";" => return None,
            _ => cursor = ctx.tokens.next(cursor)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use cppls_tokens::{Classification, FileId, Location, Token, TokenList};

    fn run_pass(pass: &dyn Pass, lexemes: &[(&str, Classification)]) -> TokenList {
        let mut tokens = TokenList::new();
        for (lex, class) in lexemes {
            tokens.push_back(Token::new(*lex, *class, Location::new(FileId(0), 1, 1)));
        }
        let mut opens: Vec<_> = tokens.iter().filter(|(_, t)| t.lexeme == "{").map(|(id, _)| id).collect();
        let mut closes: Vec<_> = tokens.iter().filter(|(_, t)| t.lexeme == "}").map(|(id, _)| id).collect();
        while let (Some(o), Some(c)) = (opens.pop(), closes.pop()) {
            tokens.create_mutual_link(o, c).unwrap();
        }
        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        pass.run(&mut ctx).unwrap();
        tokens
    }

    #[test]
    fn assigns_same_id_to_declaration_and_use() {
        let tokens = run_pass(
            &BlockScopeVariableId,
            &[
                ("int", Classification::Keyword),
                ("x", Classification::Name),
                (";", Classification::Other),
                ("x", Classification::Name),
                ("=", Classification::Other),
                ("1", Classification::Number),
                (";", Classification::Other),
            ],
        );
        let ids: Vec<_> = tokens.iter().filter(|(_, t)| t.lexeme == "x").map(|(_, t)| t.variable_id).collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], 0);
        assert_eq!(ids[0], ids[1]);
    }

    #[test]
    fn shadows_in_nested_scope() {
        let tokens = run_pass(
            &BlockScopeVariableId,
            &[
                ("int", Classification::Keyword),
                ("x", Classification::Name),
                (";", Classification::Other),
                ("{", Classification::Bracket),
                ("int", Classification::Keyword),
                ("x", Classification::Name),
                (";", Classification::Other),
                ("}", Classification::Bracket),
            ],
        );
        let ids: Vec<_> = tokens.iter().filter(|(_, t)| t.lexeme == "x").map(|(_, t)| t.variable_id).collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn assigns_class_member_ids() {
        let tokens = run_pass(
            &ClassMemberVariableId,
            &[
                ("struct", Classification::Keyword),
                ("S", Classification::Name),
                ("{", Classification::Bracket),
                ("int", Classification::Keyword),
                ("x", Classification::Name),
                (";", Classification::Other),
                ("}", Classification::Bracket),
                (";", Classification::Other),
            ],
        );
        let x = tokens.find(tokens.head().unwrap(), None, |t| t.lexeme == "x").unwrap();
        assert!(tokens.get(x).has_variable_id());
    }
}
