//! The per-step contract every pipeline pass implements (spec §4.3: "each
//! step preserves stream invariants and may emit diagnostics").

use crate::config::PipelineConfig;
use cppls_diag::Diagnostic;
use cppls_tokens::{Directive, FileTable, PassResult, TokenList};

/// Mutable state a pass is allowed to touch, plus read-only configuration
/// and the diagnostic list it appends to.
pub struct PassContext<'a> {
    pub tokens: &'a mut TokenList,
    pub files: &'a mut FileTable,
    pub directives: &'a [Directive],
    pub config: &'a PipelineConfig,
    pub diagnostics: &'a mut Vec<Diagnostic>,
}

impl<'a> PassContext<'a> {
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// One step of the normalization pipeline (spec §4.3).
///
/// `run` returns `Err` only for failures the step itself cannot recover
/// from; per spec §4.3's three failure modes ("recover and continue",
/// "emit a diagnostic and continue", "emit an error and abort"), passes
/// that merely want to report something non-fatal should push onto
/// `ctx.diagnostics` and return `Ok(())`.
pub trait Pass {
    /// Matches the step name used in spec §4.3, for pipeline tracing and
    /// debug dumps.
    fn name(&self) -> &'static str;

    fn run(&self, ctx: &mut PassContext) -> PassResult<()>;
}
