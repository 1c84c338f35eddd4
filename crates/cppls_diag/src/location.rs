//! One frame of a diagnostic's call stack (spec §3 Diagnostic: "a call-stack
//! of `(file, line, column, simplified-path, original-path, info)` frames").

/// A single call-stack frame, outermost frames first in
/// [`crate::Diagnostic::call_stack`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLocation {
    /// Path after any `--relative-paths`/build-dir simplification.
    pub file: String,
    /// Path as it appeared in the original input, before simplification.
    pub orig_file: String,
    /// 0 when a line number is not meaningful (e.g. a synthetic location).
    pub line: i32,
    pub column: u32,
    /// Extra context for this frame, e.g. "called from here"; may embed a
    /// `$symbol` placeholder expanded at construction time.
    pub info: String,
}

impl FileLocation {
    pub fn new(file: impl Into<String>, line: i32, column: u32) -> Self {
        let file = file.into();
        FileLocation { orig_file: file.clone(), file, line, column, info: String::new() }
    }

    pub fn with_info(file: impl Into<String>, line: i32, column: u32, info: impl Into<String>) -> Self {
        let mut loc = FileLocation::new(file, line, column);
        loc.info = info.into();
        loc
    }
}
