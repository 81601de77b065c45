// thimble-dom/src/lib.rs

/// A single attribute as written in the template. `value` is `None` for
/// boolean attributes such as `disabled`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: Option<String>,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

/// Ordered attribute list. Declaration order is kept so output re-emits
/// attributes exactly as authored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attrs(Vec<Attr>);

impl Attrs {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn set(mut self, k: impl Into<String>, v: impl Into<String>) -> Self {
        self.0.push(Attr::new(k, v));
        self
    }

    pub fn push(&mut self, attr: Attr) {
        self.0.push(attr);
    }

    /// First attribute with this name.
    pub fn get(&self, name: &str) -> Option<&Attr> {
        self.0.iter().find(|a| a.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attr> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy of the list without any attribute named `name`.
    pub fn without(&self, name: &str) -> Attrs {
        Attrs(self.0.iter().filter(|a| a.name != name).cloned().collect())
    }
}

impl<'a> IntoIterator for &'a Attrs {
    type Item = &'a Attr;
    type IntoIter = std::slice::Iter<'a, Attr>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<Attr>> for Attrs {
    fn from(v: Vec<Attr>) -> Self {
        Attrs(v)
    }
}

// Allow concise attribute creation in builders
impl From<()> for Attrs {
    fn from(_: ()) -> Self {
        Attrs::default()
    }
}
impl From<Vec<(&str, &str)>> for Attrs {
    fn from(v: Vec<(&str, &str)>) -> Self {
        Attrs(v.into_iter().map(|(k, v)| Attr::new(k, v)).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Attrs,
    pub children: Vec<Node>,
    /// Written as `<tag/>` (or a void element) in the source.
    pub self_closing: bool,
}

impl Element {
    /// Deep copy of this element with every attribute named `attr` removed.
    pub fn clone_without(&self, attr: &str) -> Element {
        Element {
            tag: self.tag.clone(),
            attrs: self.attrs.without(attr),
            children: self.children.clone(),
            self_closing: self.self_closing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        match self {
            Node::Element(el) => 1 + el.children.iter().map(Node::count).sum::<usize>(),
            Node::Text(_) => 1,
        }
    }
}

pub fn h(tag: impl Into<String>, attrs: impl Into<Attrs>, children: Vec<Node>) -> Node {
    Node::Element(Element {
        tag: tag.into(),
        attrs: attrs.into(),
        children,
        self_closing: false,
    })
}
pub fn text(t: impl Into<String>) -> Node {
    Node::Text(t.into())
}
