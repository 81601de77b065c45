//! thimble: logic-less markup templates.
//!
//! Templates are ordinary markup with three directive attributes:
//!
//! - `t:if="${flag}"` keeps the element only when the value is truthy
//!   (also `t:if="${s.role} == 'admin'"`, `t:if="false"`).
//! - `t:each="s: ${students}"` repeats the element once per list item with
//!   `s` bound to the item.
//! - `t:text="${welcome.message}"` replaces the element's children with the
//!   value.
//!
//! Everything else is written out as authored.
//!
//! ```
//! use std::collections::HashMap;
//! use thimble_core::{Context, Template, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tpl = Template::parse(r#"<p t:text="${welcome.message}"></p>"#)?;
//! let welcome = HashMap::from([("message".to_string(), Value::from("hello world"))]);
//! let mut ctx = Context::new();
//! ctx.put("welcome", welcome);
//! assert_eq!(tpl.render(&mut ctx)?, "<p>hello world</p>");
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod directive;
pub mod error;
pub mod expr;
pub mod options;
pub mod render;
pub mod resolve;
pub mod serialize;
pub mod value;

pub use context::Context;
pub use directive::{Directive, Directives};
pub use error::{ErrorKind, RenderError};
pub use expr::{EachBinding, Expr, PropertyPath, parse_each_binding, parse_interpolation};
pub use options::{EmptyEachPolicy, RenderOptions};
pub use render::Template;
pub use resolve::resolve;
pub use value::{Lookup, Object, Value};

pub use thimble_dom::{Attr, Attrs, Element, Node};
pub use thimble_markup::ParseError;
