use thiserror::Error;

/// Markup that could not be turned into a node tree. Offsets are byte
/// offsets into the template source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected a tag name at byte {offset}")]
    MissingTagName { offset: usize },

    #[error("tag `<{tag}` opened at byte {offset} is never terminated")]
    UnterminatedTag { tag: String, offset: usize },

    #[error("value of attribute `{name}` at byte {offset} is missing its closing quote")]
    UnterminatedAttrValue { name: String, offset: usize },

    #[error("comment or declaration at byte {offset} is never terminated")]
    UnterminatedComment { offset: usize },

    #[error("closing tag `</{found}>` at byte {offset} does not match open element `<{expected}>`")]
    MismatchedClosingTag {
        expected: String,
        found: String,
        offset: usize,
    },

    #[error("closing tag `</{tag}>` at byte {offset} has no open element")]
    UnexpectedClosingTag { tag: String, offset: usize },

    #[error("element `<{tag}>` opened at byte {offset} is never closed")]
    UnclosedElement { tag: String, offset: usize },
}
