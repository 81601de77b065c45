use std::fmt;

use thimble_dom::Element;

use crate::error::RenderError;

/// Attribute prefix reserved for directives. Attributes carrying it are
/// never written to output.
pub const PREFIX: &str = "t:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    If,
    Each,
    Text,
}

impl Directive {
    pub fn attr_name(self) -> &'static str {
        match self {
            Directive::If => "t:if",
            Directive::Each => "t:each",
            Directive::Text => "t:text",
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attr_name())
    }
}

pub fn is_directive(attr_name: &str) -> bool {
    attr_name.starts_with(PREFIX)
}

/// Raw directive values found on one element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directives<'a> {
    pub cond: Option<&'a str>,
    pub each: Option<&'a str>,
    pub text: Option<&'a str>,
}

impl<'a> Directives<'a> {
    /// Collect the element's directives, rejecting unknown names, repeats and
    /// the `t:if` + `t:each` pairing.
    pub fn extract(el: &'a Element) -> Result<Self, RenderError> {
        let mut found = Directives::default();

        for attr in &el.attrs {
            let Some(name) = attr.name.strip_prefix(PREFIX) else {
                continue;
            };
            let (slot, directive) = match name {
                "if" => (&mut found.cond, Directive::If),
                "each" => (&mut found.each, Directive::Each),
                "text" => (&mut found.text, Directive::Text),
                _ => {
                    return Err(RenderError::UnknownDirective {
                        tag: el.tag.clone(),
                        name: attr.name.clone(),
                    });
                }
            };
            if slot.is_some() {
                return Err(RenderError::DuplicateDirective {
                    tag: el.tag.clone(),
                    directive,
                });
            }
            *slot = Some(attr.value.as_deref().unwrap_or(""));
        }

        if found.cond.is_some() && found.each.is_some() {
            return Err(RenderError::UnsupportedDirectiveCombination {
                tag: el.tag.clone(),
                first: Directive::If,
                second: Directive::Each,
            });
        }

        Ok(found)
    }

    pub fn is_empty(&self) -> bool {
        self.cond.is_none() && self.each.is_none() && self.text.is_none()
    }
}
