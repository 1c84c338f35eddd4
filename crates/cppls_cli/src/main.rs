//! The `cppls` binary: parses settings, loads the optional project file
//! and library database, drives every input file through the pipeline,
//! and writes the chosen report format (spec §6 "External interfaces").

use clap::Parser;
use cppls_checks::{CheckRegistry, CheckSettings, CheckerHost, SuppressionDb, SuppressionRule};
use cppls_cli::{run_translation_unit, Cli, LibraryDb, ProjectFile, Settings, TuOutcome};
use cppls_diag::{CollectingSink, DedupSink};
use log::error;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let project = match &cli.project {
        Some(path) => match ProjectFile::load(path) {
            Ok(project) => Some(project),
            Err(err) => {
                error!("failed to load project file {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    let settings = Settings::from_cli(&cli, project.as_ref());

    if let Some(library_path) = &cli.library {
        if let Err(err) = LibraryDb::load(library_path) {
            error!("failed to load library database {}: {err}", library_path.display());
            return ExitCode::FAILURE;
        }
    }

    let rules: Vec<SuppressionRule> = settings.suppressions.iter().filter_map(|line| SuppressionRule::parse(line)).collect();
    let suppressions = SuppressionDb::new(rules);
    let check_settings: CheckSettings = settings.check_settings();
    let sink = DedupSink::new(CollectingSink::default(), check_settings.emit_duplicates);
    let host = CheckerHost::with_suppressions(sink, suppressions, check_settings);
    let registry = CheckRegistry::new();

    let mut saw_pipeline_failure = false;
    for path in &cli.files {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                error!("failed to read {}: {err}", path.display());
                saw_pipeline_failure = true;
                continue;
            }
        };
        let file0 = path.to_string_lossy().to_string();
        let outcome = run_translation_unit(&file0, &source, &settings, &host, &registry);
        if outcome != TuOutcome::Completed {
            saw_pipeline_failure = true;
        }
    }

    let diagnostics = host.inner_sink().inner().diagnostics.lock().unwrap();
    let report = cppls_cli::report::render(&settings, &diagnostics);
    drop(diagnostics);

    match &settings.output_file {
        Some(path) => {
            if let Err(err) = std::fs::write(path, report) {
                error!("failed to write report to {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        }
        None => println!("{report}"),
    }

    if saw_pipeline_failure {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
