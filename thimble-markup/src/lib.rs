//! Markup front end for thimble templates.
//!
//! Turns template text into `thimble_dom` nodes. Text (whitespace included)
//! is kept byte for byte so the renderer can reproduce the author's layout.

pub mod error;
pub mod parse;

pub use error::ParseError;
pub use parse::{VOID_ELEMENTS, parse};
