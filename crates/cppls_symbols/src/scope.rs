//! The scope tree (spec §3 "Scope"): "records with parent/child
//! relations forming a tree rooted at the global scope".

use cppls_tokens::{ScopeId, TokenId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Namespace,
    Class,
    Function,
    Block,
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub id: ScopeId,
    pub kind: ScopeKind,
    pub name: Option<String>,
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
    /// The `{` that opens this scope; `None` for the synthetic global
    /// scope, which has no enclosing braces.
    pub open_brace: Option<TokenId>,
    pub close_brace: Option<TokenId>,
}

impl Scope {
    pub fn global() -> Self {
        Scope {
            id: ScopeId(0),
            kind: ScopeKind::Global,
            name: None,
            parent: None,
            children: Vec::new(),
            open_brace: None,
            close_brace: None,
        }
    }
}
