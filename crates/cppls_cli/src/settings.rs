//! The full settings surface (spec §6 "Settings surface"): parsed from
//! command-line flags via [`clap`] and mergeable with a `cppls.toml`
//! project file via `serde`/`toml`, the same split the teacher's own
//! CLI makes between `clap::Parser` flags and a `serde`-derived project
//! manifest.

use clap::Parser;
use cppls_checks::{CheckSettings, SeverityGates};
use cppls_normalize::{CppStandard, PipelineConfig};
use cppls_tokens::Platform;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Xml,
    Plist,
}

/// Command-line flags (spec §6 settings surface, flattened).
#[derive(Parser, Debug)]
#[command(name = "cppls", about = "Static analyzer for preprocessed C and C++ translation units", version)]
pub struct Cli {
    /// Source files to analyze.
    pub files: Vec<PathBuf>,

    /// Optional `cppls.toml` project file; command-line flags override it.
    #[arg(long)]
    pub project: Option<PathBuf>,

    /// Optional library database (JSON): type sizes, noreturn functions, container shapes.
    #[arg(long = "library")]
    pub library: Option<PathBuf>,

    #[arg(long = "cpp-standard", default_value = "c++17")]
    pub cpp_standard: String,

    #[arg(long, default_value = "unix64")]
    pub platform: String,

    #[arg(long)]
    pub enable: Vec<String>,

    #[arg(long = "check-headers")]
    pub check_headers: bool,

    #[arg(long = "check-unused-templates")]
    pub check_unused_templates: bool,

    #[arg(long = "debug-normal")]
    pub debug_normal: bool,
    #[arg(long = "debug-simplified")]
    pub debug_simplified: bool,
    #[arg(long = "debug-symdb")]
    pub debug_symdb: bool,
    #[arg(long = "debug-ast")]
    pub debug_ast: bool,
    #[arg(long = "debug-valueflow")]
    pub debug_valueflow: bool,

    #[arg(long = "report-progress")]
    pub report_progress: bool,

    #[arg(long = "template-max-time")]
    pub template_max_time: Option<u64>,
    #[arg(long = "typedef-max-time")]
    pub typedef_max_time: Option<u64>,

    #[arg(long = "build-dir")]
    pub build_dir: Option<PathBuf>,
    #[arg(long = "base-path")]
    pub base_paths: Vec<PathBuf>,

    #[arg(long = "emit-duplicates")]
    pub emit_duplicates: bool,

    #[arg(long = "output-format", value_enum, default_value = "plain")]
    pub output_format: OutputFormat,
    #[arg(long = "output-file")]
    pub output_file: Option<PathBuf>,

    #[arg(long = "template-format")]
    pub template_format: Option<String>,
    #[arg(long = "template-location")]
    pub template_location: Option<String>,

    #[arg(long = "verbose")]
    pub verbose: bool,
}

/// The project-file shape (`cppls.toml`): the subset of the surface
/// worth persisting between runs rather than retyping every time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectFile {
    #[serde(default)]
    pub cpp_standard: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub enable: Vec<String>,
    #[serde(default)]
    pub check_headers: bool,
    #[serde(default)]
    pub check_unused_templates: bool,
    #[serde(default)]
    pub suppressions: Vec<String>,
    #[serde(default)]
    pub build_dir: Option<PathBuf>,
    #[serde(default)]
    pub base_paths: Vec<PathBuf>,
}

impl ProjectFile {
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

/// The settings record handed down to the pipeline, the symbol builder,
/// and the checker host — built by merging CLI flags over an optional
/// project file, then over built-in defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub cpp_standard: CppStandard,
    pub platform: Platform,
    pub severities: SeverityGates,
    pub check_headers: bool,
    pub check_unused_templates: bool,
    pub debug_normal: bool,
    pub debug_simplified: bool,
    pub debug_symdb: bool,
    pub debug_ast: bool,
    pub debug_valueflow: bool,
    pub report_progress: bool,
    pub template_max_time: Option<u64>,
    pub typedef_max_time: Option<u64>,
    pub build_dir: Option<PathBuf>,
    pub base_paths: Vec<PathBuf>,
    pub emit_duplicates: bool,
    pub output_format: OutputFormat,
    pub output_file: Option<PathBuf>,
    pub template_format: String,
    pub template_location: Option<String>,
    pub verbose: bool,
    pub suppressions: Vec<String>,
    /// `DISABLE_VALUEFLOW` environment variable (spec §6): skips the
    /// value-flow pass, i.e. checkers get [`cppls_symbols::NullValueFlow`]
    /// regardless of any engine that would otherwise be wired up.
    pub disable_valueflow: bool,
}

fn parse_cpp_standard(s: &str) -> CppStandard {
    match s.to_ascii_lowercase().as_str() {
        "c++03" | "cpp03" => CppStandard::Cpp03,
        "c++11" | "cpp11" => CppStandard::Cpp11,
        "c++14" | "cpp14" => CppStandard::Cpp14,
        "c++20" | "cpp20" => CppStandard::Cpp20,
        _ => CppStandard::Cpp17,
    }
}

fn parse_platform(s: &str) -> Platform {
    match s.to_ascii_lowercase().as_str() {
        "win32" => Platform::Win32,
        "win64" => Platform::Win64,
        "unix32" => Platform::Unix32,
        _ => Platform::Unix64,
    }
}

impl Settings {
    pub fn from_cli(cli: &Cli, project: Option<&ProjectFile>) -> Self {
        let cpp_standard = parse_cpp_standard(project.and_then(|p| p.cpp_standard.as_deref()).unwrap_or(&cli.cpp_standard));
        let platform = parse_platform(project.and_then(|p| p.platform.as_deref()).unwrap_or(&cli.platform));
        let mut enabled: Vec<String> = cli.enable.clone();
        if let Some(project) = project {
            enabled.extend(project.enable.iter().cloned());
        }
        let severities = SeverityGates {
            warning: true,
            style: enabled.iter().any(|t| t == "style" || t == "all"),
            performance: enabled.iter().any(|t| t == "performance" || t == "all"),
            portability: enabled.iter().any(|t| t == "portability" || t == "all"),
            information: enabled.iter().any(|t| t == "information" || t == "all"),
            debug: enabled.iter().any(|t| t == "debug" || t == "all"),
        };

        Settings {
            cpp_standard,
            platform,
            severities,
            check_headers: cli.check_headers || project.map(|p| p.check_headers).unwrap_or(false),
            check_unused_templates: cli.check_unused_templates || project.map(|p| p.check_unused_templates).unwrap_or(false),
            debug_normal: cli.debug_normal,
            debug_simplified: cli.debug_simplified,
            debug_symdb: cli.debug_symdb,
            debug_ast: cli.debug_ast,
            debug_valueflow: cli.debug_valueflow,
            report_progress: cli.report_progress,
            template_max_time: cli.template_max_time,
            typedef_max_time: cli.typedef_max_time,
            build_dir: cli.build_dir.clone().or_else(|| project.and_then(|p| p.build_dir.clone())),
            base_paths: if cli.base_paths.is_empty() { project.map(|p| p.base_paths.clone()).unwrap_or_default() } else { cli.base_paths.clone() },
            emit_duplicates: cli.emit_duplicates,
            output_format: cli.output_format,
            output_file: cli.output_file.clone(),
            template_format: cli.template_format.clone().unwrap_or_else(|| cppls_diag::DEFAULT_TEMPLATE.to_string()),
            template_location: cli.template_location.clone(),
            verbose: cli.verbose,
            suppressions: project.map(|p| p.suppressions.clone()).unwrap_or_default(),
            disable_valueflow: std::env::var("DISABLE_VALUEFLOW").is_ok(),
        }
    }

    pub fn pipeline_config(&self, is_cpp: bool) -> PipelineConfig {
        PipelineConfig {
            platform: self.platform,
            cpp_standard: self.cpp_standard,
            is_cpp,
            check_headers: self.check_headers,
            check_unused_templates: self.check_unused_templates,
            typedef_max_time: self.typedef_max_time,
            template_max_time: self.template_max_time,
            using_namespace_std: false,
        }
    }

    pub fn check_settings(&self) -> CheckSettings {
        CheckSettings {
            severities: self.severities,
            check_headers: self.check_headers,
            check_unused_templates: self.check_unused_templates,
            report_progress_every: if self.report_progress { Some(500) } else { None },
            emit_duplicates: self.emit_duplicates,
            verbose_output: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["cppls"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn style_enable_flag_turns_on_the_style_severity_gate() {
        let cli = cli(&["--enable", "style", "a.cpp"]);
        let settings = Settings::from_cli(&cli, None);
        assert!(settings.severities.style);
        assert!(!settings.severities.performance);
    }

    #[test]
    fn project_file_fields_are_used_when_the_flag_was_not_given() {
        let cli = cli(&["a.cpp"]);
        let project = ProjectFile { cpp_standard: Some("c++20".into()), ..ProjectFile::default() };
        let settings = Settings::from_cli(&cli, Some(&project));
        assert_eq!(settings.cpp_standard, CppStandard::Cpp20);
    }

    #[test]
    fn default_template_format_is_the_plain_text_default() {
        let cli = cli(&["a.cpp"]);
        let settings = Settings::from_cli(&cli, None);
        assert_eq!(settings.template_format, cppls_diag::DEFAULT_TEMPLATE);
    }
}
