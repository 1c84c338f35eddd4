//! XML report rendering (spec §4.2 "XML emission", spec §6 "XML report
//! (version 3)"), grounded on `ErrorMessage::toXML`/`getXMLHeader` in
//! `errorlogger.cpp`.

use crate::diagnostic::{fix_invalid_chars, Diagnostic};

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attr(value));
    out.push('"');
}

/// `<?xml ...?><results version="N"><cppcheck version="..."/><errors>`,
/// version-3 results have no closing `>` on `<errors` emitted by the
/// header alone... matching the teacher's header/footer split so callers
/// can stream `<error>` elements between them.
pub fn xml_header(product_name: &str, version: &str, xml_version: u32) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&format!("<results version=\"{xml_version}\">\n"));
    out.push_str("<cppcheck");
    if !product_name.is_empty() {
        push_attr(&mut out, "product-name", product_name);
    }
    push_attr(&mut out, "version", version);
    out.push_str("/>\n<errors>\n");
    out
}

/// Matches `ErrorMessage::getXMLFooter`: version 3 closes only `<results>`
/// since `<errors>` was left open as a streaming container.
pub fn xml_footer(xml_version: u32) -> &'static str {
    if xml_version == 3 {
        "</errors>\n</results>\n"
    } else {
        "    </errors>\n</results>\n"
    }
}

/// Renders one `<error>` element: attributes in the teacher's order
/// (`id, guideline?, severity, classification?, msg, verbose, cwe?,
/// hash?, inconclusive?, file0?, remark?`), then `<location>` elements
/// innermost-first, then one `<symbol>` per symbol name.
pub fn to_xml(diag: &Diagnostic) -> String {
    let mut out = String::new();
    out.push_str("<error");
    push_attr(&mut out, "id", &diag.id);
    if !diag.guideline.is_empty() {
        push_attr(&mut out, "guideline", &diag.guideline);
    }
    push_attr(&mut out, "severity", diag.severity.as_str());
    if !diag.classification.is_empty() {
        push_attr(&mut out, "classification", &diag.classification);
    }
    push_attr(&mut out, "msg", &fix_invalid_chars(&diag.short_message));
    push_attr(&mut out, "verbose", &fix_invalid_chars(&diag.verbose_message));
    if diag.cwe != 0 {
        push_attr(&mut out, "cwe", &diag.cwe.to_string());
    }
    if diag.hash != 0 {
        push_attr(&mut out, "hash", &diag.hash.to_string());
    }
    if diag.certainty.is_inconclusive() {
        push_attr(&mut out, "inconclusive", "true");
    }
    if !diag.file0.is_empty() {
        push_attr(&mut out, "file0", &diag.file0);
    }
    if !diag.remark.is_empty() {
        push_attr(&mut out, "remark", &fix_invalid_chars(&diag.remark));
    }

    if diag.call_stack.is_empty() && diag.symbol_names.is_empty() {
        out.push_str("/>\n");
        return out;
    }
    out.push_str(">\n");

    for loc in diag.call_stack.iter().rev() {
        out.push_str("  <location");
        push_attr(&mut out, "file", &loc.file);
        push_attr(&mut out, "line", &loc.line.max(0).to_string());
        push_attr(&mut out, "column", &loc.column.to_string());
        if !loc.info.is_empty() {
            push_attr(&mut out, "info", &fix_invalid_chars(&loc.info));
        }
        out.push_str("/>\n");
    }
    for symbol in &diag.symbol_names {
        out.push_str("  <symbol>");
        out.push_str(&escape_attr(symbol));
        out.push_str("</symbol>\n");
    }
    out.push_str("</error>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Diagnostic;
    use crate::location::FileLocation;
    use crate::severity::{Certainty, Severity};

    #[test]
    fn renders_self_closing_error_with_no_locations() {
        let diag = Diagnostic::new(vec![], "", Severity::Style, "x", "msg", Certainty::Normal);
        let xml = to_xml(&diag);
        assert!(xml.starts_with("<error id=\"x\""));
        assert!(xml.trim_end().ends_with("/>"));
    }

    #[test]
    fn locations_are_emitted_innermost_first() {
        let diag = Diagnostic::new(
            vec![FileLocation::new("outer.cpp", 1, 1), FileLocation::new("inner.cpp", 2, 2)],
            "outer.cpp",
            Severity::Error,
            "syntaxError",
            "bad syntax",
            Certainty::Normal,
        );
        let xml = to_xml(&diag);
        let inner_pos = xml.find("inner.cpp").unwrap();
        let outer_pos = xml.find("outer.cpp\"").unwrap();
        assert!(inner_pos < outer_pos);
    }

    #[test]
    fn attribute_values_are_escaped() {
        let diag = Diagnostic::new(vec![], "", Severity::Warning, "x", "a < b && \"c\"", Certainty::Normal);
        let xml = to_xml(&diag);
        assert!(xml.contains("&lt;"));
        assert!(xml.contains("&amp;"));
        assert!(xml.contains("&quot;"));
    }

    #[test]
    fn header_and_footer_form_well_nested_document() {
        let header = xml_header("cppls", "0.5.5", 3);
        let footer = xml_footer(3);
        let doc = format!("{header}{footer}");
        assert_eq!(doc.matches("<results").count(), 1);
        assert_eq!(doc.matches("</results>").count(), 1);
        assert_eq!(doc.matches("<errors>").count(), 1);
        assert_eq!(doc.matches("</errors>").count(), 1);
    }
}
