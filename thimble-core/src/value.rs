//! Runtime values and the property-accessor capability.
//!
//! Host data reaches templates either as plain [`Value`]s (maps, lists,
//! scalars) or through the [`Object`] trait, which exposes named property
//! reads without any runtime introspection.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Outcome of a named property read.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(Value),
    /// The value has no property with this name.
    Unknown,
    /// The property exists but may not be read from templates.
    Inaccessible,
}

/// A host value that templates can drill into with `${var.prop}`.
///
/// ```
/// use thimble_core::{Lookup, Object, Value};
///
/// #[derive(Debug)]
/// struct Student {
///     id: i64,
///     name: String,
/// }
///
/// impl Object for Student {
///     fn type_name(&self) -> &str { "Student" }
///     fn property(&self, name: &str) -> Lookup {
///         match name {
///             "id" => Lookup::Found(self.id.into()),
///             "name" => Lookup::Found(self.name.as_str().into()),
///             _ => Lookup::Unknown,
///         }
///     }
/// }
///
/// let s = Value::object(Student { id: 1, name: "Ivan".into() });
/// assert_eq!(s.property("name"), Lookup::Found(Value::from("Ivan")));
/// ```
pub trait Object: fmt::Debug + Send + Sync {
    fn type_name(&self) -> &str;

    fn property(&self, name: &str) -> Lookup;

    /// Text used when the object itself is substituted with `t:text`.
    fn display(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(HashMap<String, Value>),
    Object(Arc<dyn Object>),
}

impl Value {
    pub fn object(o: impl Object + 'static) -> Self {
        Value::Object(Arc::new(o))
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::List(l) => !l.is_empty(),
            Value::Map(m) => !m.is_empty(),
            Value::Object(_) => true,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Object(o) => o.type_name(),
        }
    }

    /// Named property read. Only maps and objects have properties.
    pub fn property(&self, name: &str) -> Lookup {
        match self {
            Value::Map(m) => m.get(name).cloned().map_or(Lookup::Unknown, Lookup::Found),
            Value::Object(o) => o.property(name),
            _ => Lookup::Unknown,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
            Value::List(l) => {
                f.write_str("[")?;
                for (i, item) in l.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(_) => f.write_str("[map]"),
            Value::Object(o) => match o.display() {
                Some(s) => f.write_str(&s),
                None => write!(f, "[{}]", o.type_name()),
            },
        }
    }
}

// Objects compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}
impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i.into())
    }
}
impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}
impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i.into())
    }
}
impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}
impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}
impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
impl From<HashMap<String, Value>> for Value {
    fn from(m: HashMap<String, Value>) -> Self {
        Value::Map(m)
    }
}
impl From<Arc<dyn Object>> for Value {
    fn from(o: Arc<dyn Object>) -> Self {
        Value::Object(o)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Account {
        owner: String,
    }

    impl Object for Account {
        fn type_name(&self) -> &str {
            "Account"
        }
        fn property(&self, name: &str) -> Lookup {
            match name {
                "owner" => Lookup::Found(self.owner.as_str().into()),
                "password" => Lookup::Inaccessible,
                _ => Lookup::Unknown,
            }
        }
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::from(false).is_truthy());
        assert!(!Value::from(0).is_truthy());
        assert!(!Value::from(0.0).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::List(vec![]).is_truthy());
        assert!(Value::from("no").is_truthy());
        assert!(Value::from(-1).is_truthy());
        assert!(Value::object(Account { owner: "a".into() }).is_truthy());
    }

    #[test]
    fn display_forms() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from(vec![1, 2, 3]).to_string(), "[1, 2, 3]");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::object(Account { owner: "a".into() }).to_string(), "[Account]");
    }

    #[test]
    fn property_reads() {
        let acct = Value::object(Account { owner: "ivan".into() });
        assert_eq!(acct.property("owner"), Lookup::Found("ivan".into()));
        assert_eq!(acct.property("password"), Lookup::Inaccessible);
        assert_eq!(acct.property("balance"), Lookup::Unknown);
        assert_eq!(Value::from("text").property("len"), Lookup::Unknown);

        let mut m = HashMap::new();
        m.insert("message".to_string(), Value::from("hello"));
        assert_eq!(Value::Map(m).property("message"), Lookup::Found("hello".into()));
    }

    #[test]
    fn objects_compare_by_identity() {
        let a = Value::object(Account { owner: "x".into() });
        let b = Value::object(Account { owner: "x".into() });
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
