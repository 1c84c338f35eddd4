//! The `Diagnostic` value itself (spec §3 Diagnostic, §4.2 "Construction
//! inputs"), grounded on `ErrorMessage` in `errorlogger.cpp`.

use crate::location::FileLocation;
use crate::severity::{Certainty, Severity};
use cppls_tokens::{PassError, TokenId, TokenList};

/// An issued diagnostic: identifier, severity, the message (already
/// templated), and a call stack of locations.
///
/// Invariant (spec §3): after construction, `short_message` and
/// `verbose_message` contain no `\n` and no unexpanded `$symbol`
/// placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub id: String,
    pub severity: Severity,
    pub certainty: Certainty,
    pub cwe: u16,
    pub hash: u64,
    pub short_message: String,
    pub verbose_message: String,
    pub remark: String,
    pub symbol_names: Vec<String>,
    pub guideline: String,
    pub classification: String,
    /// Path of the primary translation-unit source file, for `file0` in
    /// serialization and XML.
    pub file0: String,
    /// Outermost frame first, matching `ErrorMessage::callStack` order.
    pub call_stack: Vec<FileLocation>,
}

impl Diagnostic {
    /// Builds a diagnostic from an explicit call stack and a message whose
    /// leading `$symbol:NAME\n` pragmas (zero or more) seed
    /// `symbol_names`, and whose first remaining `\n` splits the short
    /// form from the verbose form (spec §4.2 "Construction inputs").
    pub fn new(
        call_stack: Vec<FileLocation>,
        file0: impl Into<String>,
        severity: Severity,
        id: impl Into<String>,
        msg: &str,
        certainty: Certainty,
    ) -> Self {
        let mut diag = Diagnostic {
            id: id.into(),
            severity,
            certainty,
            cwe: 0,
            hash: 0,
            short_message: String::new(),
            verbose_message: String::new(),
            remark: String::new(),
            symbol_names: Vec::new(),
            guideline: String::new(),
            classification: String::new(),
            file0: file0.into(),
            call_stack,
        };
        diag.set_message(msg);
        diag
    }

    pub fn with_cwe(mut self, cwe: u16) -> Self {
        self.cwe = cwe;
        self
    }

    /// Implements the recursive `$symbol:` pragma stripping and
    /// short/verbose splitting from `ErrorMessage::setmsg`.
    fn set_message(&mut self, msg: &str) {
        let mut rest = msg;
        while let Some(body) = rest.strip_prefix("$symbol:") {
            match body.find('\n') {
                Some(pos) => {
                    self.symbol_names.push(body[..pos].to_string());
                    rest = &body[pos + 1..];
                }
                None => {
                    // malformed pragma with no following newline; treat the
                    // rest of the string as the message body.
                    break;
                }
            }
        }

        let symbol = self.symbol_names.first().cloned().unwrap_or_default();
        match rest.find('\n') {
            Some(pos) => {
                self.short_message = rest[..pos].replace("$symbol", &symbol);
                self.verbose_message = rest[pos + 1..].replace("$symbol", &symbol);
            }
            None => {
                self.short_message = rest.replace("$symbol", &symbol);
                self.verbose_message = self.short_message.clone();
            }
        }
    }

    /// Builds a diagnostic reporting a pass failure converted via
    /// `Diagnostic::from_internal_error` (spec §7 "Propagation").
    pub fn from_internal_error(tokens: Option<&TokenList>, filename: &str, pass_error: &PassError) -> Self {
        let severity = Severity::Error;
        let id = if pass_error.is_fatal() { "internalError" } else { "internalAstError" };

        let call_stack = match (tokens, pass_error.token()) {
            (Some(list), Some(tok_id)) => vec![location_of(list, tok_id, filename)],
            _ => vec![FileLocation::new(filename, 0, 0)],
        };

        Diagnostic::new(call_stack, filename, severity, id, pass_error.message(), Certainty::Normal)
    }
}

fn location_of(_list: &TokenList, _tok: TokenId, filename: &str) -> FileLocation {
    // The token model carries file/line/column on each token's `Location`;
    // resolving the file path requires the owning `FileTable`, which
    // callers hold alongside the `TokenList`. Construction helpers that
    // have the table available should build the `FileLocation` directly
    // and call `Diagnostic::new` instead of this convenience path.
    FileLocation::new(filename, 0, 0)
}

/// Replaces every non-printable byte with an octal `\ooo` escape (spec §6
/// "Serialized diagnostic wire format"; spec §8 testable property).
pub fn fix_invalid_chars(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_graphic() || byte == b' ' {
            out.push(byte as char);
        } else {
            out.push_str(&format!("\\{:03o}", byte));
        }
    }
    out
}
