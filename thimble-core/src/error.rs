use thiserror::Error;

use crate::directive::Directive;

/// A failed render. Rendering stops at the first error and produces no
/// output.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    #[error("variable `{name}` is not defined")]
    UnknownVariable { name: String },

    #[error("`{path}`: {type_name} has no property `{property}`")]
    UnknownProperty {
        path: String,
        property: String,
        type_name: String,
    },

    #[error("`{path}`: property `{property}` of {type_name} cannot be read")]
    InaccessibleProperty {
        path: String,
        property: String,
        type_name: String,
    },

    #[error("invalid `{directive}` value {value:?}: {reason}")]
    InvalidDirectiveSyntax {
        directive: Directive,
        value: String,
        reason: String,
    },

    #[error("<{tag}> combines `{first}` with `{second}`, which is not supported")]
    UnsupportedDirectiveCombination {
        tag: String,
        first: Directive,
        second: Directive,
    },

    #[error("<{tag}> has more than one `{directive}` attribute")]
    DuplicateDirective { tag: String, directive: Directive },

    #[error("<{tag}> uses unknown directive `{name}`")]
    UnknownDirective { tag: String, name: String },

    #[error("`{path}` is {type_name}, not a list")]
    NonIterableCollection { path: String, type_name: String },

    #[error("`{path}` is an empty list")]
    EmptyCollection { path: String },

    #[error("failed to write rendered output")]
    Io(#[from] std::io::Error),
}

/// Fieldless mirror of [`RenderError`] for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownVariable,
    UnknownProperty,
    InaccessibleProperty,
    InvalidDirectiveSyntax,
    UnsupportedDirectiveCombination,
    DuplicateDirective,
    UnknownDirective,
    NonIterableCollection,
    EmptyCollection,
    Io,
}

impl RenderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RenderError::UnknownVariable { .. } => ErrorKind::UnknownVariable,
            RenderError::UnknownProperty { .. } => ErrorKind::UnknownProperty,
            RenderError::InaccessibleProperty { .. } => ErrorKind::InaccessibleProperty,
            RenderError::InvalidDirectiveSyntax { .. } => ErrorKind::InvalidDirectiveSyntax,
            RenderError::UnsupportedDirectiveCombination { .. } => {
                ErrorKind::UnsupportedDirectiveCombination
            }
            RenderError::DuplicateDirective { .. } => ErrorKind::DuplicateDirective,
            RenderError::UnknownDirective { .. } => ErrorKind::UnknownDirective,
            RenderError::NonIterableCollection { .. } => ErrorKind::NonIterableCollection,
            RenderError::EmptyCollection { .. } => ErrorKind::EmptyCollection,
            RenderError::Io(_) => ErrorKind::Io,
        }
    }
}
