//! The read-only symbol graph (spec §2 item 6, §3 "Scope + Variable +
//! Function + Type"): a scope tree, variable/function/type records
//! cross-linked onto the tokens that declare and reference them, and a
//! query-only value-flow interface. Built once by [`build`] after the
//! normalization pipeline (`cppls_normalize`) has finished; nothing here
//! mutates the token stream again.

pub mod builder;
pub mod record;
pub mod scope;
pub mod valueflow;

pub use builder::build;
pub use record::{FunctionRecord, TypeKind, TypeRecord, VariableRecord};
pub use scope::{Scope, ScopeKind};
pub use valueflow::{NullValueFlow, PossibleValue, ValueFlowQuery};

use cppls_tokens::{FuncRecordId, ScopeId, TypeRecordId, VarRecordId};

/// The finished graph for one translation unit. Every collection is
/// indexed by its corresponding newtype id (`ScopeId`, `VarRecordId`,
/// `FuncRecordId`, `TypeRecordId` — defined in `cppls_tokens` since the
/// token cross-links already use them) so lookups are O(1) slices rather
/// than hash maps, matching the dense-index style the rest of the token
/// model uses.
#[derive(Debug, Default)]
pub struct SymbolGraph {
    pub(crate) scopes: Vec<Scope>,
    pub(crate) variables: Vec<VariableRecord>,
    pub(crate) functions: Vec<FunctionRecord>,
    pub(crate) types: Vec<TypeRecord>,
}

impl SymbolGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root_scope(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0 as usize]
    }

    pub fn variable(&self, id: VarRecordId) -> Option<&VariableRecord> {
        self.variables.get(id.0 as usize)
    }

    pub fn function(&self, id: FuncRecordId) -> Option<&FunctionRecord> {
        self.functions.get(id.0 as usize)
    }

    pub fn type_record(&self, id: TypeRecordId) -> Option<&TypeRecord> {
        self.types.get(id.0 as usize)
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    pub fn variables(&self) -> &[VariableRecord] {
        &self.variables
    }

    pub fn functions(&self) -> &[FunctionRecord] {
        &self.functions
    }

    pub fn types(&self) -> &[TypeRecord] {
        &self.types
    }

    /// Every variable declared directly in `scope` (not in nested scopes).
    pub fn variables_in_scope(&self, scope: ScopeId) -> impl Iterator<Item = &VariableRecord> {
        self.variables.iter().filter(move |v| v.scope == scope)
    }
}
