//! The subset of the settings surface (spec §6 "Settings surface") that
//! the pipeline itself consults. The full surface (severity tiers,
//! output format, build-dir, ...) belongs to the CLI composition root;
//! duplicating it here would make this crate depend on `cppls_cli`
//! instead of the other way around.

use cppls_tokens::Platform;

/// Which C++ standard gates which pipeline features (spec §6
/// `cpp-standard`: "gates C++11/14/17/20 features").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CppStandard {
    Cpp03,
    Cpp11,
    Cpp14,
    Cpp17,
    Cpp20,
}

impl CppStandard {
    pub fn supports_if_init(self) -> bool {
        self >= CppStandard::Cpp17
    }

    pub fn supports_spaceship(self) -> bool {
        self >= CppStandard::Cpp20
    }

    pub fn supports_structured_bindings(self) -> bool {
        self >= CppStandard::Cpp17
    }
}

/// Pipeline-relevant configuration for one translation unit.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub platform: Platform,
    pub cpp_standard: CppStandard,
    pub is_cpp: bool,
    pub check_headers: bool,
    pub check_unused_templates: bool,
    /// Seconds before the typedef-simplification pass abandons further
    /// work (spec §6 `typedef-max-time`, spec §5 "Cancellation & timeout").
    pub typedef_max_time: Option<u64>,
    /// Seconds before the template-simplification pass abandons further
    /// work (spec §6 `template-max-time`).
    pub template_max_time: Option<u64>,
    pub using_namespace_std: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            platform: Platform::default(),
            cpp_standard: CppStandard::Cpp17,
            is_cpp: true,
            check_headers: false,
            check_unused_templates: false,
            typedef_max_time: None,
            template_max_time: None,
            using_namespace_std: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpp17_and_later_support_if_init_but_cpp14_does_not() {
        assert!(CppStandard::Cpp17.supports_if_init());
        assert!(CppStandard::Cpp20.supports_if_init());
        assert!(!CppStandard::Cpp14.supports_if_init());
    }

    #[test]
    fn only_cpp20_supports_spaceship() {
        assert!(CppStandard::Cpp20.supports_spaceship());
        assert!(!CppStandard::Cpp17.supports_spaceship());
    }
}
