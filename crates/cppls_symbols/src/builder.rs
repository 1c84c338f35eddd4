//! Symbol-database construction (spec §4.3 step 50 "AST construction,
//! symbol-database construction, value-type inference"): a single
//! linear walk over the already-normalized stream that builds the scope
//! tree and the variable/function/type records, stamping each token's
//! `scope`/`variable`/`function`/`declared_type` cross-link as it goes.
//! Runs once, after `cppls_normalize::pipeline::run` has finished —
//! nothing here rewrites tokens, only annotates them.

use crate::record::{FunctionRecord, TypeKind, TypeRecord, VariableRecord};
use crate::scope::{Scope, ScopeKind};
use crate::SymbolGraph;
use cppls_tokens::{FuncRecordId, ScopeId, TokenId, TokenList, TypeRecordId, VarRecordId};
use std::collections::HashSet;

pub fn build(tokens: &mut TokenList) -> SymbolGraph {
    let mut graph = SymbolGraph::new();
    graph.scopes.push(Scope::global());
    let mut scope_stack = vec![ScopeId(0)];
    let mut seen_variables: HashSet<u32> = HashSet::new();

    let Some(mut cursor) = tokens.head() else { return graph };
    loop {
        let current_scope = *scope_stack.last().unwrap();
        let lex = tokens.get(cursor).lexeme.clone();

        if lex == "{" {
            let (kind, name) = classify_brace(tokens, cursor);
            let id = ScopeId(graph.scopes.len() as u32);
            graph.scopes.push(Scope {
                id,
                kind,
                name: name.clone(),
                parent: Some(current_scope),
                children: Vec::new(),
                open_brace: Some(cursor),
                close_brace: None,
            });
            graph.scopes[current_scope.0 as usize].children.push(id);
            tokens.get_mut(cursor).scope = Some(current_scope);

            if kind == ScopeKind::Class {
                if let Some(type_decl) = type_decl_for_brace(tokens, cursor, current_scope, id) {
                    let type_id = TypeRecordId(graph.types.len() as u32);
                    tokens.get_mut(type_decl.declaration).declared_type = Some(type_id);
                    graph.types.push(TypeRecord { id: type_id, ..type_decl });
                }
            } else if kind == ScopeKind::Function {
                if let Some(func) = function_decl_for_brace(tokens, cursor, current_scope) {
                    let func_id = FuncRecordId(graph.functions.len() as u32);
                    tokens.get_mut(func.declaration).function = Some(func_id);
                    graph.functions.push(FunctionRecord { id: func_id, body_scope: Some(id), ..func });
                }
            }

            scope_stack.push(id);
            match tokens.next(cursor) {
                Some(n) => {
                    cursor = n;
                    continue;
                }
                None => break,
            }
        }

        if lex == "}" {
            tokens.get_mut(cursor).scope = Some(current_scope);
            if scope_stack.len() > 1 {
                let closed = scope_stack.pop().unwrap();
                graph.scopes[closed.0 as usize].close_brace = Some(cursor);
            }
            match tokens.next(cursor) {
                Some(n) => {
                    cursor = n;
                    continue;
                }
                None => break,
            }
        }

        tokens.get_mut(cursor).scope = Some(current_scope);
        let vid = tokens.get(cursor).variable_id;
        if vid != 0 {
            if seen_variables.insert(vid) {
                let name = tokens.get(cursor).lexeme.clone();
                let is_member = graph.scope(current_scope).kind == ScopeKind::Class;
                graph.variables.push(VariableRecord {
                    id: VarRecordId(vid),
                    name,
                    scope: current_scope,
                    declaration: cursor,
                    declared_type: None,
                    is_parameter: false,
                    is_member,
                });
            }
            tokens.get_mut(cursor).variable = Some(VarRecordId(vid));
        }

        match tokens.next(cursor) {
            Some(n) => cursor = n,
            None => break,
        }
    }

    graph
}

/// Decides what kind of scope a `{` introduces by looking at what comes
/// before it: `namespace Name {`, `class|struct|union Name [: bases] {`,
/// `name ( params ) {` (a function body), else a plain block.
fn classify_brace(tokens: &TokenList, open: TokenId) -> (ScopeKind, Option<String>) {
    let Some(prev) = tokens.prev(open) else { return (ScopeKind::Block, None) };
    if tokens.get(prev).lexeme == ")" {
        if is_function_header(tokens, prev) {
            return (ScopeKind::Function, None);
        }
        return (ScopeKind::Block, None);
    }
    // Walk back over an optional base-class list (`: Base1 , Base2`) or a
    // plain name to find the introducing keyword, then read the type's
    // own name forward from that keyword.
    let mut cursor = prev;
    loop {
        let lex = tokens.get(cursor).lexeme.clone();
        let kind = match lex.as_str() {
            "namespace" => Some(ScopeKind::Namespace),
            "class" | "struct" | "union" | "enum" => Some(ScopeKind::Class),
            _ => None,
        };
        if let Some(kind) = kind {
            let name = tokens.next(cursor).filter(|&n| tokens.get(n).classification.is_name()).map(|n| tokens.get(n).lexeme.clone());
            return (kind, name);
        }
        match tokens.prev(cursor) {
            Some(p) => cursor = p,
            None => return (ScopeKind::Block, None),
        }
    }
}

/// `name ( params )` immediately before `{`, where `name` isn't a
/// control-flow keyword — the same shape `init_stmt`/`else_if` passes
/// already recognize for `if`/`for`/`while`.
fn is_function_header(tokens: &TokenList, close_paren: TokenId) -> bool {
    let Some(open_paren) = tokens.find_opening_bracket(close_paren) else { return false };
    let Some(name) = tokens.prev(open_paren) else { return false };
    if !tokens.get(name).classification.is_name() {
        return false;
    }
    !matches!(tokens.get(name).lexeme.as_str(), "if" | "for" | "while" | "switch" | "catch")
}

fn function_decl_for_brace(tokens: &TokenList, open_brace: TokenId, scope: ScopeId) -> Option<FunctionRecord> {
    let close_paren = tokens.prev(open_brace)?;
    let open_paren = tokens.find_opening_bracket(close_paren)?;
    let name = tokens.prev(open_paren)?;
    let is_destructor = tokens.prev(name).map(|p| tokens.get(p).lexeme == "~").unwrap_or(false);
    Some(FunctionRecord {
        id: FuncRecordId(0), // overwritten by caller once the index is known
        name: tokens.get(name).lexeme.clone(),
        scope,
        body_scope: None,
        parameters: Vec::new(),
        declaration: name,
        is_constructor: false,
        is_destructor,
        is_virtual: false,
        is_const: false,
        is_noreturn: false,
    })
}

/// `class|struct|union Name [: Base, ...] {`.
fn type_decl_for_brace(tokens: &TokenList, open_brace: TokenId, scope: ScopeId, _body_scope: ScopeId) -> Option<TypeRecord> {
    let mut cursor = tokens.prev(open_brace)?;
    let mut bases = Vec::new();
    // Walk backwards collecting base-class names (they sit between `:`
    // and `{`) until crossing the `:`, after which the remaining name is
    // the type's own, not a base, and then the introducing keyword.
    let mut past_colon = false;
    loop {
        let lex = tokens.get(cursor).lexeme.clone();
        if matches!(lex.as_str(), "class" | "struct" | "union") {
            let kind = match lex.as_str() {
                "class" => TypeKind::Class,
                "union" => TypeKind::Union,
                _ => TypeKind::Struct,
            };
            let name_tok = tokens.next(cursor)?;
            if !tokens.get(name_tok).classification.is_name() {
                return None;
            }
            bases.reverse();
            return Some(TypeRecord {
                id: TypeRecordId(0),
                name: tokens.get(name_tok).lexeme.clone(),
                kind,
                scope,
                declaration: name_tok,
                bases,
            });
        }
        if lex == ":" {
            past_colon = true;
        } else if !past_colon && tokens.get(cursor).classification.is_name() && !matches!(lex.as_str(), "public" | "protected" | "private" | "virtual") {
            bases.push(lex);
        }
        cursor = tokens.prev(cursor)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cppls_tokens::{Classification, FileId, Location, Token};

    fn push(tokens: &mut TokenList, lex: &str, class: Classification) -> TokenId {
        tokens.push_back(Token::new(lex, class, Location::new(FileId(0), 1, 1)))
    }

    #[test]
    fn builds_nested_scope_tree() {
        let mut tokens = TokenList::new();
        push(&mut tokens, "namespace", Classification::Keyword);
        push(&mut tokens, "N", Classification::Name);
        let open = push(&mut tokens, "{", Classification::Bracket);
        push(&mut tokens, "int", Classification::Keyword);
        push(&mut tokens, "x", Classification::Name);
        push(&mut tokens, ";", Classification::Other);
        let close = push(&mut tokens, "}", Classification::Bracket);
        tokens.create_mutual_link(open, close).unwrap();

        let graph = build(&mut tokens);
        assert_eq!(graph.scopes().len(), 2);
        assert_eq!(graph.scope(ScopeId(1)).kind, ScopeKind::Namespace);
        assert_eq!(graph.scope(ScopeId(1)).parent, Some(ScopeId(0)));
        assert_eq!(graph.scope(ScopeId(0)).children, vec![ScopeId(1)]);
    }

    #[test]
    fn assigns_variable_record_from_variable_id() {
        let mut tokens = TokenList::new();
        push(&mut tokens, "int", Classification::Keyword);
        let decl = push(&mut tokens, "x", Classification::Name);
        push(&mut tokens, ";", Classification::Other);
        let use_tok = push(&mut tokens, "x", Classification::Name);
        push(&mut tokens, ";", Classification::Other);
        tokens.get_mut(decl).variable_id = 1;
        tokens.get_mut(use_tok).variable_id = 1;

        let graph = build(&mut tokens);
        assert_eq!(graph.variables().len(), 1);
        let v = graph.variable(VarRecordId(1)).unwrap();
        assert_eq!(v.name, "x");
        assert_eq!(v.declaration, decl);
        assert_eq!(tokens.get(use_tok).variable, Some(VarRecordId(1)));
    }

    #[test]
    fn recognizes_function_body_and_class_with_base() {
        let mut tokens = TokenList::new();
        // class Derived : Base { void f ( ) { } }
        push(&mut tokens, "class", Classification::Keyword);
        push(&mut tokens, "Derived", Classification::Name);
        push(&mut tokens, ":", Classification::Other);
        push(&mut tokens, "Base", Classification::Name);
        let class_open = push(&mut tokens, "{", Classification::Bracket);
        push(&mut tokens, "void", Classification::Keyword);
        push(&mut tokens, "f", Classification::Name);
        let f_open_paren = push(&mut tokens, "(", Classification::Bracket);
        let f_close_paren = push(&mut tokens, ")", Classification::Bracket);
        let fn_open = push(&mut tokens, "{", Classification::Bracket);
        let fn_close = push(&mut tokens, "}", Classification::Bracket);
        let class_close = push(&mut tokens, "}", Classification::Bracket);
        tokens.create_mutual_link(f_open_paren, f_close_paren).unwrap();
        tokens.create_mutual_link(fn_open, fn_close).unwrap();
        tokens.create_mutual_link(class_open, class_close).unwrap();

        let graph = build(&mut tokens);
        assert_eq!(graph.types().len(), 1);
        let t = &graph.types()[0];
        assert_eq!(t.name, "Derived");
        assert_eq!(t.bases, vec!["Base".to_string()]);
        assert_eq!(graph.functions().len(), 1);
        assert_eq!(graph.functions()[0].name, "f");
    }
}
