//! The library database (spec §6 "Input... (4) a library database (type
//! sizes, function contracts, container shapes)"), loaded once per run
//! from a JSON file via `serde_json` — the same format family cppcheck's
//! own `.cfg` library files use, chosen over the project file's TOML
//! since this data is meant to be shared/generated rather than hand-edited.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct PodType {
    pub size: u32,
    #[serde(default)]
    pub sign: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContainerShape {
    #[serde(default)]
    pub has_size: bool,
    #[serde(default)]
    pub has_empty: bool,
    #[serde(default)]
    pub is_associative: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FunctionContract {
    #[serde(default)]
    pub noreturn: bool,
    #[serde(default)]
    pub pure: bool,
    /// 1-based argument indexes that must not be null.
    #[serde(default)]
    pub not_null_args: Vec<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LibraryDb {
    #[serde(default)]
    pub podtypes: HashMap<String, PodType>,
    #[serde(default)]
    pub containers: HashMap<String, ContainerShape>,
    #[serde(default)]
    pub functions: HashMap<String, FunctionContract>,
}

impl LibraryDb {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn is_noreturn(&self, function: &str) -> bool {
        self.functions.get(function).map(|f| f.noreturn).unwrap_or(false)
    }

    pub fn noreturn_functions(&self) -> HashSet<&str> {
        self.functions.iter().filter(|(_, c)| c.noreturn).map(|(name, _)| name.as_str()).collect()
    }
}
