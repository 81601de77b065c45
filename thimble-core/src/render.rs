use std::io;

use thimble_dom::{Element, Node};
use thimble_markup::ParseError;
use tracing::{debug, trace};

use crate::context::Context;
use crate::directive::{Directive, Directives};
use crate::error::RenderError;
use crate::expr::{self, CompareOp, Condition, EachBinding, Expr, SyntaxError};
use crate::options::{EmptyEachPolicy, RenderOptions};
use crate::resolve::resolve;
use crate::serialize::{close_tag, escape_text, open_tag};
use crate::value::Value;

/// A parsed template. Rendering never modifies it, so one template can be
/// rendered any number of times, from any number of threads, each with its
/// own [`Context`].
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    nodes: Vec<Node>,
    options: RenderOptions,
}

impl Template {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            options: RenderOptions::default(),
        }
    }

    pub fn parse(source: &str) -> Result<Self, ParseError> {
        Ok(Self::new(thimble_markup::parse(source)?))
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render into a fresh string. Nothing is returned unless the whole tree
    /// rendered.
    pub fn render(&self, ctx: &mut Context) -> Result<String, RenderError> {
        debug!(
            nodes = self.nodes.iter().map(Node::count).sum::<usize>(),
            vars = ctx.len(),
            "rendering template"
        );
        let mut out = String::new();
        Renderer {
            ctx,
            options: &self.options,
            out: &mut out,
        }
        .nodes(&self.nodes)?;
        debug!(bytes = out.len(), "rendered template");
        Ok(out)
    }

    /// Render, then write the result to `w`. A failed render writes nothing.
    pub fn render_to<W: io::Write>(&self, ctx: &mut Context, w: &mut W) -> Result<(), RenderError> {
        let out = self.render(ctx)?;
        w.write_all(out.as_bytes())?;
        Ok(())
    }

    /// Validate every directive in the tree (names, combinations and value
    /// syntax) without a context.
    pub fn check(&self) -> Result<(), RenderError> {
        check_nodes(&self.nodes)
    }
}

fn invalid(directive: Directive, value: &str) -> impl FnOnce(SyntaxError) -> RenderError + '_ {
    move |e| RenderError::InvalidDirectiveSyntax {
        directive,
        value: value.to_string(),
        reason: e.0,
    }
}

fn check_nodes(nodes: &[Node]) -> Result<(), RenderError> {
    for el in nodes.iter().filter_map(Node::as_element) {
        let d = Directives::extract(el)?;
        if let Some(cond) = d.cond {
            expr::parse_condition(cond).map_err(invalid(Directive::If, cond))?;
        }
        if let Some(each) = d.each {
            expr::parse_each_binding(each).map_err(invalid(Directive::Each, each))?;
        }
        check_nodes(&el.children)?;
    }
    Ok(())
}

fn is_blank(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

struct Renderer<'a> {
    ctx: &'a mut Context,
    options: &'a RenderOptions,
    out: &'a mut String,
}

impl Renderer<'_> {
    fn nodes(&mut self, nodes: &[Node]) -> Result<(), RenderError> {
        // whitespace directly before an element; repeated between `t:each` items
        let mut indent = "";
        for node in nodes {
            match node {
                Node::Text(t) => {
                    self.out.push_str(t);
                    indent = if is_blank(t) { t.as_str() } else { "" };
                }
                Node::Element(el) => {
                    self.element(el, indent)?;
                    indent = "";
                }
            }
        }
        Ok(())
    }

    fn element(&mut self, el: &Element, indent: &str) -> Result<(), RenderError> {
        let d = Directives::extract(el)?;

        if let Some(cond) = d.cond {
            if !self.condition(cond)? {
                trace!(tag = %el.tag, cond, "t:if is false, skipping subtree");
                return Ok(());
            }
        }

        if let Some(binding) = d.each {
            return self.each(el, binding, indent);
        }

        if let Some(text) = d.text {
            let value = match expr::parse_interpolation(text) {
                Expr::Path(path) => resolve(&path, self.ctx)?.to_string(),
                Expr::Literal(lit) => lit,
            };
            open_tag(self.out, &el.tag, &el.attrs, false);
            if self.options.escape {
                escape_text(self.out, &value);
            } else {
                self.out.push_str(&value);
            }
            close_tag(self.out, &el.tag);
            return Ok(());
        }

        if el.self_closing && el.children.is_empty() {
            open_tag(self.out, &el.tag, &el.attrs, true);
            return Ok(());
        }
        open_tag(self.out, &el.tag, &el.attrs, false);
        self.nodes(&el.children)?;
        close_tag(self.out, &el.tag);
        Ok(())
    }

    fn each(&mut self, el: &Element, binding: &str, indent: &str) -> Result<(), RenderError> {
        let EachBinding { name, path } =
            expr::parse_each_binding(binding).map_err(invalid(Directive::Each, binding))?;

        let items = match resolve(&path, self.ctx)? {
            Value::List(items) => items,
            other => {
                return Err(RenderError::NonIterableCollection {
                    path: path.to_string(),
                    type_name: other.type_name().to_string(),
                });
            }
        };

        if items.is_empty() {
            return match self.options.empty_each {
                EmptyEachPolicy::Error => Err(RenderError::EmptyCollection {
                    path: path.to_string(),
                }),
                EmptyEachPolicy::Skip => {
                    trace!(%path, "t:each over empty list, skipping");
                    Ok(())
                }
            };
        }

        // The body is rendered as an ordinary element, so `t:text` and nested
        // directives on it are evaluated once per item.
        let body = el.clone_without(Directive::Each.attr_name());
        trace!(%path, items = items.len(), binding = %name, "t:each");

        let options = self.options;
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.out.push_str(indent);
            }
            let out = &mut *self.out;
            self.ctx.scoped(&name, item, |ctx| {
                Renderer { ctx, options, out }.element(&body, "")
            })?;
        }
        Ok(())
    }

    fn condition(&self, raw: &str) -> Result<bool, RenderError> {
        let cond = expr::parse_condition(raw).map_err(invalid(Directive::If, raw))?;
        Ok(match cond {
            Condition::Test(Expr::Literal(lit)) => lit == "true",
            Condition::Test(Expr::Path(path)) => self.lookup(&path)?.is_truthy(),
            Condition::Compare { lhs, op, rhs } => {
                let equal = self.operand(&lhs)?.to_string() == self.operand(&rhs)?.to_string();
                match op {
                    CompareOp::Eq => equal,
                    CompareOp::Ne => !equal,
                }
            }
        })
    }

    fn operand(&self, e: &Expr) -> Result<Value, RenderError> {
        match e {
            Expr::Path(path) => self.lookup(path),
            Expr::Literal(lit) => Ok(Value::String(lit.clone())),
        }
    }

    // Conditions treat anything missing as null.
    fn lookup(&self, path: &expr::PropertyPath) -> Result<Value, RenderError> {
        match resolve(path, self.ctx) {
            Ok(v) => Ok(v),
            Err(RenderError::UnknownVariable { .. } | RenderError::UnknownProperty { .. }) => {
                trace!(%path, "missing in condition, treated as null");
                Ok(Value::Null)
            }
            Err(e) => Err(e),
        }
    }
}
