//! Variable/Function/Type records (spec §3 "Scope + Variable + Function
//! + Type"): "every variable belongs to exactly one scope; every
//! function has a parameter list, a body scope (or none), and attribute
//! flags derived from tokens".

use cppls_tokens::{FuncRecordId, ScopeId, TokenId, TypeRecordId, VarRecordId};

#[derive(Debug, Clone)]
pub struct VariableRecord {
    pub id: VarRecordId,
    pub name: String,
    pub scope: ScopeId,
    /// The token where this variable was declared; other tokens
    /// referencing it share this record's `id` as `variable_id`.
    pub declaration: TokenId,
    pub declared_type: Option<TypeRecordId>,
    pub is_parameter: bool,
    pub is_member: bool,
}

#[derive(Debug, Clone)]
pub struct FunctionRecord {
    pub id: FuncRecordId,
    pub name: String,
    /// The scope the function is declared in (its enclosing namespace or
    /// class), not the scope its body creates.
    pub scope: ScopeId,
    pub body_scope: Option<ScopeId>,
    pub parameters: Vec<VarRecordId>,
    pub declaration: TokenId,
    pub is_constructor: bool,
    pub is_destructor: bool,
    pub is_virtual: bool,
    pub is_const: bool,
    pub is_noreturn: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Struct,
    Union,
    Enum,
    Typedef,
}

#[derive(Debug, Clone)]
pub struct TypeRecord {
    pub id: TypeRecordId,
    pub name: String,
    pub kind: TypeKind,
    pub scope: ScopeId,
    pub declaration: TokenId,
    /// Base classes named in a `:` inheritance clause, resolved by name
    /// only — full overload-aware base lookup is a checker concern.
    pub bases: Vec<String>,
}
