//! What a checker sees (spec §4.7 "Provides checkers with: the token
//! stream (read-only), the symbol graph (read-only), the value-flow
//! query interface, the settings record, and a `report(diagnostic)`
//! sink"). Everything here is a shared reference — a `Check::run` call
//! cannot mutate the stream the normalizer produced.

use crate::settings::CheckSettings;
use cppls_symbols::{SymbolGraph, ValueFlowQuery};
use cppls_tokens::TokenList;

pub struct AnalysisContext<'a> {
    pub tokens: &'a TokenList,
    pub symbols: &'a SymbolGraph,
    pub value_flow: &'a dyn ValueFlowQuery,
    pub settings: &'a CheckSettings,
    /// The translation unit's own source file, for diagnostics that
    /// don't have a more specific call-stack location of their own.
    pub file0: &'a str,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(tokens: &'a TokenList, symbols: &'a SymbolGraph, value_flow: &'a dyn ValueFlowQuery, settings: &'a CheckSettings, file0: &'a str) -> Self {
        AnalysisContext { tokens, symbols, value_flow, settings, file0 }
    }
}
