//! Length-prefixed wire serialization (spec §4.2 "Serialization", spec §6
//! "Serialized diagnostic wire format"), grounded on
//! `ErrorMessage::serialize`/`deserialize` in `errorlogger.cpp`.
//!
//! Ten header fields, each framed as `<len><SP><bytes>`, followed by a
//! decimal stack size, a space, and that many five-tab-separated-field
//! frames (also length-prefixed). This is the format used to ship a
//! diagnostic across a process boundary (e.g. to a parent cppls process
//! coordinating multiple workers).

use crate::diagnostic::{fix_invalid_chars, Diagnostic};
use crate::location::FileLocation;
use crate::severity::{Certainty, Severity};
use std::fmt;
use std::str::FromStr;

/// Failure deserializing a diagnostic: truncated input, an invalid length
/// prefix, or a field that doesn't parse (spec §4.2 "fails with a
/// `deserializationError` diagnostic on truncation or invalid length").
#[derive(Debug, Clone)]
pub struct DeserializationError(pub String);

impl fmt::Display for DeserializationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Internal Error: Deserialization of error message failed - {}", self.0)
    }
}

impl std::error::Error for DeserializationError {}

fn push_field(out: &mut String, value: &str) {
    out.push_str(&value.len().to_string());
    out.push(' ');
    out.push_str(value);
}

/// Serializes `diag` into the ten-header-field-plus-stack wire format.
pub fn serialize(diag: &Diagnostic) -> String {
    let mut out = String::new();
    push_field(&mut out, &diag.id);
    push_field(&mut out, diag.severity.as_str());
    push_field(&mut out, &diag.cwe.to_string());
    push_field(&mut out, &diag.hash.to_string());
    push_field(&mut out, &fix_invalid_chars(&diag.remark));
    push_field(&mut out, &diag.file0);
    push_field(&mut out, if diag.certainty.is_inconclusive() { "1" } else { "0" });
    push_field(&mut out, &fix_invalid_chars(&diag.short_message));
    push_field(&mut out, &fix_invalid_chars(&diag.verbose_message));
    push_field(&mut out, &diag.symbol_names.join("\n"));

    out.push_str(&diag.call_stack.len().to_string());
    out.push(' ');
    for loc in &diag.call_stack {
        let frame = format!("{}\t{}\t{}\t{}\t{}", loc.line, loc.column, loc.file, loc.orig_file, loc.info);
        push_field(&mut out, &frame);
    }
    out
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a str) -> Self {
        Reader { bytes: data.as_bytes(), pos: 0 }
    }

    fn read_length_prefixed(&mut self) -> Result<String, DeserializationError> {
        let len = self.read_decimal("invalid length")?;
        if self.bytes.get(self.pos) != Some(&b' ') {
            return Err(DeserializationError("invalid separator".into()));
        }
        self.pos += 1;
        if self.pos + len > self.bytes.len() {
            return Err(DeserializationError("premature end of data".into()));
        }
        let field = std::str::from_utf8(&self.bytes[self.pos..self.pos + len])
            .map_err(|_| DeserializationError("invalid utf-8".into()))?
            .to_string();
        self.pos += len;
        Ok(field)
    }

    fn read_decimal(&mut self, what: &str) -> Result<usize, DeserializationError> {
        let start = self.pos;
        while self.bytes.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(DeserializationError(what.to_string()));
        }
        std::str::from_utf8(&self.bytes[start..self.pos])
            .unwrap()
            .parse()
            .map_err(|_| DeserializationError(what.to_string()))
    }
}

/// Parses a diagnostic previously produced by [`serialize`].
pub fn deserialize(data: &str) -> Result<Diagnostic, DeserializationError> {
    let mut reader = Reader::new(data);
    let mut fields = Vec::with_capacity(10);
    for _ in 0..10 {
        fields.push(reader.read_length_prefixed()?);
    }

    let id = fields[0].clone();
    let severity = Severity::from_str(&fields[1]).unwrap_or(Severity::None);
    let cwe: u16 = if fields[2].is_empty() {
        0
    } else {
        fields[2].parse().map_err(|_| DeserializationError("invalid CWE ID".into()))?
    };
    let hash: u64 = if fields[3].is_empty() {
        0
    } else {
        fields[3].parse().map_err(|_| DeserializationError("invalid hash".into()))?
    };
    let remark = fields[4].clone();
    let file0 = fields[5].clone();
    let certainty = if fields[6] == "1" { Certainty::Inconclusive } else { Certainty::Normal };
    let short_message = fields[7].clone();
    let verbose_message = fields[8].clone();
    let symbol_names: Vec<String> = if fields[9].is_empty() { Vec::new() } else { fields[9].split('\n').map(String::from).collect() };

    let stack_size = reader.read_decimal("invalid stack size")?;
    if reader.bytes.get(reader.pos) != Some(&b' ') {
        return Err(DeserializationError("invalid separator".into()));
    }
    reader.pos += 1;

    let mut call_stack = Vec::with_capacity(stack_size);
    for _ in 0..stack_size {
        let frame = reader.read_length_prefixed()?;
        let parts: Vec<&str> = frame.splitn(5, '\t').collect();
        if parts.len() < 4 {
            return Err(DeserializationError("insufficient elements".into()));
        }
        let line: i32 = parts[0].parse().map_err(|_| DeserializationError("invalid line".into()))?;
        let column: u32 = parts[1].parse().map_err(|_| DeserializationError("invalid column".into()))?;
        let file = parts[2].to_string();
        let orig_file = parts[3].to_string();
        let info = parts.get(4).map(|s| s.to_string()).unwrap_or_default();
        call_stack.push(FileLocation { file, orig_file, line, column, info });
    }

    Ok(Diagnostic {
        id,
        severity,
        certainty,
        cwe,
        hash,
        short_message,
        verbose_message,
        remark,
        symbol_names,
        guideline: String::new(),
        classification: String::new(),
        file0,
        call_stack,
    })
}
