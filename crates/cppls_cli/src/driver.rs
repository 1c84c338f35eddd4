//! The per-translation-unit driver loop (SPEC_FULL §3, grounded on
//! `CppCheck::checkFile` / `CppCheckExecutor::check_file` in
//! `cli/executor.cpp`): lex, normalize, build the symbol graph, run
//! checks, continue to the next file even after this one hit a
//! TU-fatal diagnostic (spec §7 "User-visible behavior": "the
//! normalizer still outputs the accumulated diagnostic stream").

use crate::lexer;
use crate::settings::Settings;
use cppls_checks::{AnalysisContext, CheckRegistry, CheckerHost};
use cppls_diag::{Diagnostic, DiagnosticSink};
use cppls_normalize::PassContext;
use cppls_symbols::NullValueFlow;
use cppls_tokens::{FileTable, TokenList};
use log::{info, warn};

/// What happened to one translation unit, for the CLI's own exit-code
/// and summary-line bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuOutcome {
    /// Every pipeline pass ran and no critical diagnostic was seen.
    Completed,
    /// A pass reported a TU-fatal error; checks did not run.
    PipelineAborted,
    /// The pipeline finished but a critical diagnostic (from the
    /// pipeline or an early check) stopped the remaining checks.
    CriticalDiagnostic,
}

/// Runs one translation unit end to end against an already-built
/// [`CheckerHost`]/[`CheckRegistry`] pair, which may be shared across
/// every file in this run (spec §5 "Scheduling model": one worker per
/// translation unit, no parallelism inside the pipeline).
pub fn run_translation_unit<S, F>(
    file0: &str,
    source: &str,
    settings: &Settings,
    host: &CheckerHost<S, F>,
    registry: &CheckRegistry,
) -> TuOutcome
where
    S: DiagnosticSink,
    F: cppls_checks::SuppressionFilter,
{
    let mut files = FileTable::new();
    let file_id = files.intern(file0);
    let (preprocessed, directives) = lexer::lex(file_id, source);
    let mut tokens = TokenList::from_preprocessed(preprocessed);

    let is_cpp = file0.ends_with(".cpp") || file0.ends_with(".cc") || file0.ends_with(".hpp") || file0.ends_with(".h");
    let pipeline_config = settings.pipeline_config(is_cpp);
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    let ok = {
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &directives, config: &pipeline_config, diagnostics: &mut diagnostics };
        cppls_normalize::run_pipeline(&mut ctx, file0)
    };

    host.deliver_pipeline_diagnostics(std::mem::take(&mut diagnostics));

    if !ok {
        warn!(target: "cppls_cli::driver", "{file0}: normalization pipeline aborted, skipping checks");
        return TuOutcome::PipelineAborted;
    }
    if host.critical_hit() {
        info!(target: "cppls_cli::driver", "{file0}: critical diagnostic from normalization, skipping checks");
        return TuOutcome::CriticalDiagnostic;
    }

    let symbols = cppls_symbols::build(&mut tokens);
    let value_flow = NullValueFlow;
    let ctx = AnalysisContext::new(&tokens, &symbols, &value_flow, host.settings(), file0);
    host.run_checks(&ctx, registry);

    if host.critical_hit() {
        TuOutcome::CriticalDiagnostic
    } else {
        TuOutcome::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Cli;
    use clap::Parser;
    use cppls_checks::CheckSettings;
    use cppls_diag::CollectingSink;

    fn no_flags_settings() -> Settings {
        Settings::from_cli(&Cli::parse_from(["cppls", "a.cpp"]), None)
    }

    #[test]
    fn a_clean_translation_unit_completes_with_no_critical_diagnostics() {
        let host = CheckerHost::new(CollectingSink::default(), CheckSettings::default());
        let registry = CheckRegistry::new();
        let outcome = run_translation_unit("a.cpp", "int main ( ) { return 0 ; }\n", &no_flags_settings(), &host, &registry);
        assert_eq!(outcome, TuOutcome::Completed);
    }

    #[test]
    fn unmatched_bracket_aborts_the_pipeline_but_still_reports_a_diagnostic() {
        let host = CheckerHost::new(CollectingSink::default(), CheckSettings::default());
        let registry = CheckRegistry::new();
        let outcome = run_translation_unit("a.cpp", "int main ( { return 0 ; }\n", &no_flags_settings(), &host, &registry);
        assert_eq!(outcome, TuOutcome::PipelineAborted);
        assert!(!host.inner_sink().diagnostics.lock().unwrap().is_empty());
    }
}
