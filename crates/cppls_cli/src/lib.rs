//! The command-line driver (spec §1 "collaborators": "The CLI, project-file
//! loading, work-item scheduling across files, XML/plist report writers,
//! and the suppression database"): settings, the library database, a
//! standalone lexer standing in for the (out-of-scope) preprocessor, the
//! per-translation-unit driver loop, and the report writers.

pub mod driver;
pub mod lexer;
pub mod librarydb;
pub mod report;
pub mod settings;

pub use driver::{run_translation_unit, TuOutcome};
pub use librarydb::LibraryDb;
pub use settings::{Cli, OutputFormat, ProjectFile, Settings};
