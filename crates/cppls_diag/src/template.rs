//! Message template rendering for the plain-text reporter (spec §4.2
//! "Templating"; spec §6 `template-format`/`template-location` settings).
//!
//! Placeholders: `{id} {severity} {cwe} {message} {callstack} {file}
//! {line} {column} {code}`, a conditional `{inconclusive:text}` segment,
//! and color codes `{red}...{reset}`. Colors are resolved here, at
//! render time relative to a caller-supplied `use_color` flag — matching
//! the spec's "resolved at construction, not at write time (TTY
//! detection is a separate concern)": this module never probes a
//! terminal itself, the caller decides.

use crate::diagnostic::Diagnostic;

/// ANSI escape sequences for the color placeholders. Hand-rolled rather
/// than pulled from a crate: it is a fixed table of eight constant
/// strings, not a concern (progress bars, styled diffing) any of the
/// corpus's dependencies exist to solve.
fn color_code(name: &str) -> Option<&'static str> {
    Some(match name {
        "red" => "\x1b[31m",
        "green" => "\x1b[32m",
        "yellow" => "\x1b[33m",
        "blue" => "\x1b[34m",
        "magenta" => "\x1b[35m",
        "cyan" => "\x1b[36m",
        "bold" => "\x1b[1m",
        "reset" => "\x1b[0m",
        _ => return None,
    })
}

/// Default plain-text template, matching cppcheck's `--template gcc`-ish
/// default shape.
pub const DEFAULT_TEMPLATE: &str = "{file}:{line}:{column}: {severity}: {message} [{id}]{inconclusive: (inconclusive)}";

/// Renders `template` against `diag`. `read_line(file, line)` is the
/// core's one permitted file read, used only to resolve `{code}`;
/// passing a closure that always returns `None` disables `{code}`
/// rendering.
pub fn render(template: &str, diag: &Diagnostic, use_color: bool, read_line: impl Fn(&str, i32) -> Option<String>) -> String {
    let (file, line, column) = diag
        .call_stack
        .last()
        .map(|loc| (loc.file.as_str(), loc.line, loc.column))
        .unwrap_or(("", 0, 0));

    let callstack = diag
        .call_stack
        .iter()
        .map(|loc| format!("{}:{}", loc.file, loc.line))
        .collect::<Vec<_>>()
        .join(" -> ");

    let code = if template.contains("{code}") {
        read_line(file, line)
            .map(|src| {
                let caret_col = if column > 0 { column as usize - 1 } else { 0 };
                format!("{src}\n{}^", " ".repeat(caret_col))
            })
            .unwrap_or_default()
    } else {
        String::new()
    };

    let mut out = String::with_capacity(template.len());
    let bytes = template.as_bytes();
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i] == b'{' {
            if let Some(end) = template[i..].find('}') {
                let end = i + end;
                let inner = &template[i + 1..end];
                if let Some(rest) = inner.strip_prefix("inconclusive:") {
                    if diag.certainty.is_inconclusive() {
                        out.push_str(rest);
                    }
                } else if let Some(color) = color_code(inner) {
                    if use_color {
                        out.push_str(color);
                    }
                } else {
                    match inner {
                        "id" => out.push_str(&diag.id),
                        "severity" => out.push_str(diag.severity.as_str()),
                        "cwe" => out.push_str(&diag.cwe.to_string()),
                        "message" => out.push_str(&diag.short_message),
                        "callstack" => out.push_str(&callstack),
                        "file" => out.push_str(file),
                        "line" => out.push_str(&line.to_string()),
                        "column" => out.push_str(&column.to_string()),
                        "code" => out.push_str(&code),
                        _ => {
                            // unrecognized placeholder: emit verbatim so a
                            // typo in a user-supplied template is visible
                            // rather than silently eaten.
                            out.push('{');
                            out.push_str(inner);
                            out.push('}');
                        }
                    }
                }
                i = end + 1;
                continue;
            }
        }
        let ch = template[i..].chars().next().unwrap();
        out.push(ch);
        i += ch.len_utf8();
    }
    out
}
