use thimble_dom::Attrs;

use crate::directive::is_directive;

/// `<tag a="1" b>` (or `<tag .../>`), skipping directive attributes.
pub fn open_tag(out: &mut String, tag: &str, attrs: &Attrs, self_closing: bool) {
    out.push('<');
    out.push_str(tag);
    for attr in attrs.iter().filter(|a| !is_directive(&a.name)) {
        out.push(' ');
        out.push_str(&attr.name);
        if let Some(value) = &attr.value {
            out.push_str("=\"");
            push_attr_value(out, value);
            out.push('"');
        }
    }
    out.push_str(if self_closing { "/>" } else { ">" });
}

pub fn close_tag(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Substituted text: `&`, `<` and `>` become entities.
pub fn escape_text(out: &mut String, s: &str) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

// Attribute values stay as authored; only the delimiter needs escaping.
fn push_attr_value(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
