use tracing::trace;

use crate::context::Context;
use crate::error::RenderError;
use crate::expr::PropertyPath;
use crate::value::{Lookup, Value};

/// Walk `path` from its root variable through each property. A single
/// segment path yields the context value itself.
pub fn resolve(path: &PropertyPath, ctx: &Context) -> Result<Value, RenderError> {
    let root = path.root();
    let mut current = ctx
        .get(root)
        .cloned()
        .ok_or_else(|| RenderError::UnknownVariable {
            name: root.to_string(),
        })?;

    for property in path.properties() {
        current = match current.property(property) {
            Lookup::Found(v) => v,
            Lookup::Unknown => {
                return Err(RenderError::UnknownProperty {
                    path: path.to_string(),
                    property: property.clone(),
                    type_name: current.type_name().to_string(),
                });
            }
            Lookup::Inaccessible => {
                return Err(RenderError::InaccessibleProperty {
                    path: path.to_string(),
                    property: property.clone(),
                    type_name: current.type_name().to_string(),
                });
            }
        };
    }

    trace!(%path, kind = current.type_name(), "resolved");
    Ok(current)
}
