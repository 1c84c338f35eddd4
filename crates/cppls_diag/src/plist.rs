//! Clang-Analyzer-compatible plist rendering (spec §4.2 "Plist emission",
//! spec §6 "Plist report").
//!
//! There is no teacher-internal analog for this format in the pack (the
//! distilled source only ships XML/wire serialization); this follows the
//! structure Clang's own `-analyzer-output=plist` writer uses, since that
//! is the format this diagnostic model is explicitly compatible with.

use crate::diagnostic::Diagnostic;

fn escape_pcdata(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn string_elem(out: &mut String, indent: usize, value: &str) {
    out.push_str(&" ".repeat(indent));
    out.push_str("<string>");
    out.push_str(&escape_pcdata(value));
    out.push_str("</string>\n");
}

fn integer_elem(out: &mut String, indent: usize, value: i64) {
    out.push_str(&" ".repeat(indent));
    out.push_str(&format!("<integer>{value}</integer>\n"));
}

/// Renders one `<dict>` event in the path array for one call-stack frame.
fn event_dict(out: &mut String, indent: usize, file_index: usize, line: i32, column: u32, message: &str) {
    let pad = " ".repeat(indent);
    out.push_str(&pad);
    out.push_str("<dict>\n");
    out.push_str(&pad);
    out.push_str(" <key>kind</key>\n");
    string_elem(out, indent + 1, "event");
    out.push_str(&pad);
    out.push_str(" <key>location</key>\n");
    out.push_str(&pad);
    out.push_str(" <dict>\n");
    out.push_str(&pad);
    out.push_str("  <key>line</key>\n");
    integer_elem(out, indent + 2, line.max(0) as i64);
    out.push_str(&pad);
    out.push_str("  <key>col</key>\n");
    integer_elem(out, indent + 2, column as i64);
    out.push_str(&pad);
    out.push_str("  <key>file</key>\n");
    integer_elem(out, indent + 2, file_index as i64);
    out.push_str(&pad);
    out.push_str(" </dict>\n");
    out.push_str(&pad);
    out.push_str(" <key>message</key>\n");
    string_elem(out, indent + 1, message);
    out.push_str(&pad);
    out.push_str("</dict>\n");
}

/// Renders one `diagnostics` array entry for `diag`.
pub fn diagnostic_entry(diag: &Diagnostic, files: &[String]) -> String {
    let file_index = |path: &str| files.iter().position(|f| f == path).unwrap_or(0);

    let mut out = String::new();
    out.push_str(" <dict>\n");
    out.push_str("  <key>description</key>\n");
    string_elem(&mut out, 3, &diag.short_message);
    out.push_str("  <key>category</key>\n");
    string_elem(&mut out, 3, diag.severity.as_str());
    out.push_str("  <key>type</key>\n");
    string_elem(&mut out, 3, &diag.verbose_message);
    out.push_str("  <key>check_name</key>\n");
    string_elem(&mut out, 3, &diag.id);

    out.push_str("  <key>path</key>\n");
    out.push_str("  <array>\n");
    for loc in &diag.call_stack {
        event_dict(&mut out, 3, file_index(&loc.file), loc.line, loc.column, if loc.info.is_empty() { &diag.short_message } else { &loc.info });
    }
    out.push_str("  </array>\n");
    out.push_str(" </dict>\n");
    out
}

/// Renders a full plist document for `diagnostics`, collecting the set of
/// referenced files into the top-level `files` array that event dicts
/// index into by position.
pub fn to_plist(diagnostics: &[Diagnostic]) -> String {
    let mut files: Vec<String> = Vec::new();
    for diag in diagnostics {
        for loc in &diag.call_stack {
            if !files.contains(&loc.file) {
                files.push(loc.file.clone());
            }
        }
    }

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n");
    out.push_str("<plist version=\"1.0\">\n<dict>\n");
    out.push_str(" <key>files</key>\n <array>\n");
    for file in &files {
        string_elem(&mut out, 2, file);
    }
    out.push_str(" </array>\n");
    out.push_str(" <key>diagnostics</key>\n <array>\n");
    for diag in diagnostics {
        out.push_str(&diagnostic_entry(diag, &files));
    }
    out.push_str(" </array>\n</dict>\n</plist>\n");
    out
}
