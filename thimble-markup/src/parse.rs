use thimble_dom::{Attr, Attrs, Element, Node};

use crate::error::ParseError;

/// Elements that never have content or a closing tag. They are recorded as
/// self-closing whether or not the source wrote `/>`.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

// Content is taken as one text node up to the matching close tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

struct Open {
    el: Element,
    offset: usize,
}

/// Small hand-rolled HTML-ish parser with support for:
/// - nested elements, self-closing tags (`<input/>`) and void elements
/// - attributes with double, single or no quotes, and valueless attributes
/// - comments and `<!DOCTYPE ...>`, kept as raw text nodes
/// - `<script>`/`<style>` bodies, kept as a single raw text node
///
/// Text between tags, whitespace included, is preserved exactly.
pub fn parse(input: &str) -> Result<Vec<Node>, ParseError> {
    let bytes = input.as_bytes();
    let mut i = 0usize;
    let mut stack: Vec<Open> = Vec::new();
    let mut roots: Vec<Node> = Vec::new();

    fn push_child(stack: &mut [Open], roots: &mut Vec<Node>, node: Node) {
        if let Some(open) = stack.last_mut() {
            open.el.children.push(node);
        } else {
            roots.push(node);
        }
    }

    while i < bytes.len() {
        if !starts_markup(bytes, i) {
            // text until the next tag, comment or declaration
            let start = i;
            i += 1;
            while i < bytes.len() && !starts_markup(bytes, i) {
                i += 1;
            }
            push_child(&mut stack, &mut roots, Node::Text(input[start..i].to_string()));
            continue;
        }

        let start = i;
        match bytes[i + 1] {
            b'!' => {
                let raw = read_declaration(input, &mut i)?;
                push_child(&mut stack, &mut roots, Node::Text(raw.to_string()));
            }
            b'/' => {
                i += 2;
                let tag = read_ident(input, &mut i);
                skip_ws(bytes, &mut i);
                if i >= bytes.len() || bytes[i] != b'>' {
                    return Err(ParseError::UnterminatedTag {
                        tag: format!("/{tag}"),
                        offset: start,
                    });
                }
                i += 1;
                let Some(open) = stack.pop() else {
                    return Err(ParseError::UnexpectedClosingTag { tag, offset: start });
                };
                if !open.el.tag.eq_ignore_ascii_case(&tag) {
                    return Err(ParseError::MismatchedClosingTag {
                        expected: open.el.tag,
                        found: tag,
                        offset: start,
                    });
                }
                push_child(&mut stack, &mut roots, Node::Element(open.el));
            }
            _ => {
                i += 1;
                let tag = read_ident(input, &mut i);
                let (attrs, self_closing) = read_tag_rest(input, &mut i, &tag, start)?;
                let lower = tag.to_ascii_lowercase();
                let mut el = Element {
                    tag,
                    attrs,
                    children: Vec::new(),
                    self_closing: self_closing || VOID_ELEMENTS.contains(&lower.as_str()),
                };

                if el.self_closing {
                    push_child(&mut stack, &mut roots, Node::Element(el));
                } else if RAW_TEXT_ELEMENTS.contains(&lower.as_str()) {
                    let body = read_raw_text(input, &mut i, &el.tag, start)?;
                    if !body.is_empty() {
                        el.children.push(Node::Text(body.to_string()));
                    }
                    push_child(&mut stack, &mut roots, Node::Element(el));
                } else {
                    stack.push(Open { el, offset: start });
                }
            }
        }
    }

    if let Some(open) = stack.pop() {
        return Err(ParseError::UnclosedElement {
            tag: open.el.tag,
            offset: open.offset,
        });
    }

    Ok(roots)
}

// `<` only opens markup when followed by a tag name, `/name` or `!`.
// Anything else (`a < b`) stays text.
fn starts_markup(bytes: &[u8], i: usize) -> bool {
    if bytes[i] != b'<' || i + 1 >= bytes.len() {
        return false;
    }
    match bytes[i + 1] {
        b'!' => true,
        b'/' => i + 2 < bytes.len() && bytes[i + 2].is_ascii_alphabetic(),
        c => c.is_ascii_alphabetic(),
    }
}

fn is_ident_byte(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'-' || c == b':'
}

fn is_attr_name_byte(c: u8) -> bool {
    is_ident_byte(c) || c == b'@' || c == b'.'
}

fn skip_ws(bytes: &[u8], i: &mut usize) {
    while *i < bytes.len() && bytes[*i].is_ascii_whitespace() {
        *i += 1;
    }
}

fn read_ident(input: &str, i: &mut usize) -> String {
    let bytes = input.as_bytes();
    let start = *i;
    while *i < bytes.len() && is_ident_byte(bytes[*i]) {
        *i += 1;
    }
    input[start..*i].to_string()
}

// Attributes up to and including `>` or `/>`.
fn read_tag_rest(
    input: &str,
    i: &mut usize,
    tag: &str,
    start: usize,
) -> Result<(Attrs, bool), ParseError> {
    let bytes = input.as_bytes();
    let unterminated = || ParseError::UnterminatedTag {
        tag: tag.to_string(),
        offset: start,
    };
    let mut attrs = Attrs::new();

    loop {
        skip_ws(bytes, i);
        if *i >= bytes.len() {
            return Err(unterminated());
        }
        match bytes[*i] {
            b'>' => {
                *i += 1;
                return Ok((attrs, false));
            }
            b'/' => {
                *i += 1;
                skip_ws(bytes, i);
                if *i < bytes.len() && bytes[*i] == b'>' {
                    *i += 1;
                    return Ok((attrs, true));
                }
                return Err(unterminated());
            }
            _ => match read_attribute(input, i)? {
                Some(attr) => attrs.push(attr),
                None => return Err(unterminated()),
            },
        }
    }
}

fn read_attribute(input: &str, i: &mut usize) -> Result<Option<Attr>, ParseError> {
    let bytes = input.as_bytes();
    let name_start = *i;
    while *i < bytes.len() && is_attr_name_byte(bytes[*i]) {
        *i += 1;
    }
    if *i == name_start {
        return Ok(None);
    }
    let name = input[name_start..*i].to_string();

    skip_ws(bytes, i);
    if *i >= bytes.len() || bytes[*i] != b'=' {
        return Ok(Some(Attr::flag(name)));
    }
    *i += 1;
    skip_ws(bytes, i);

    let value = match bytes.get(*i) {
        Some(&quote) if quote == b'"' || quote == b'\'' => {
            *i += 1;
            let start = *i;
            while *i < bytes.len() && bytes[*i] != quote {
                *i += 1;
            }
            if *i >= bytes.len() {
                return Err(ParseError::UnterminatedAttrValue {
                    name,
                    offset: name_start,
                });
            }
            let v = &input[start..*i];
            *i += 1; // closing quote
            v
        }
        _ => {
            let start = *i;
            while *i < bytes.len() && !bytes[*i].is_ascii_whitespace() && bytes[*i] != b'>' {
                *i += 1;
            }
            &input[start..*i]
        }
    };

    Ok(Some(Attr::new(name, value)))
}

fn read_declaration<'a>(input: &'a str, i: &mut usize) -> Result<&'a str, ParseError> {
    let start = *i;
    let rest = &input[start..];
    let end = if rest.starts_with("<!--") {
        rest[4..].find("-->").map(|p| 4 + p + 3)
    } else {
        rest.find('>').map(|p| p + 1)
    };
    let end = end.ok_or(ParseError::UnterminatedComment { offset: start })?;
    *i = start + end;
    Ok(&rest[..end])
}

fn read_raw_text<'a>(
    input: &'a str,
    i: &mut usize,
    tag: &str,
    start: usize,
) -> Result<&'a str, ParseError> {
    let bytes = input.as_bytes();
    let unclosed = || ParseError::UnclosedElement {
        tag: tag.to_string(),
        offset: start,
    };
    // ASCII lowercasing keeps byte offsets intact
    let haystack = input[*i..].to_ascii_lowercase();
    let needle = format!("</{}", tag.to_ascii_lowercase());
    let rel = haystack.find(&needle).ok_or_else(unclosed)?;

    let body = &input[*i..*i + rel];
    let mut j = *i + rel + needle.len();
    skip_ws(bytes, &mut j);
    if j >= bytes.len() || bytes[j] != b'>' {
        return Err(unclosed());
    }
    *i = j + 1;
    Ok(body)
}
