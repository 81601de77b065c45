//! Directive value syntax: interpolations, `t:each` bindings and `t:if`
//! conditions. The grammar lives in `directive.pest`.

use std::fmt;

use pest::Parser;
use pest::iterators::Pair;

#[derive(pest_derive::Parser)]
#[grammar = "directive.pest"]
struct DirectiveParser;

/// Dotted identifier chain, e.g. `welcome.message`. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath(Vec<String>);

impl PropertyPath {
    /// Parse a bare `a.b.c` path (no `${...}` wrapper).
    pub fn parse(s: &str) -> Option<Self> {
        let valid = s.split('.').all(|seg| {
            let mut chars = seg.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        });
        valid.then(|| PropertyPath(s.split('.').map(str::to_string).collect()))
    }

    /// The context variable the path starts from.
    pub fn root(&self) -> &str {
        &self.0[0]
    }

    /// Property names read after the root.
    pub fn properties(&self) -> &[String] {
        &self.0[1..]
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    fn from_interpolation(pair: Pair<'_, Rule>) -> Self {
        // interpolation > path > ident*
        PropertyPath(
            pair.into_inner()
                .flat_map(|path| path.into_inner())
                .map(|ident| ident.as_str().to_string())
                .collect(),
        )
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// A directive value: either a property path or a plain constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Path(PropertyPath),
    Literal(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EachBinding {
    pub name: String,
    pub path: PropertyPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Truthiness of a path, or a literal `true` / `false`.
    Test(Expr),
    Compare { lhs: Expr, op: CompareOp, rhs: Expr },
}

/// Why a directive value was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError(pub String);

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<pest::error::Error<Rule>> for SyntaxError {
    fn from(e: pest::error::Error<Rule>) -> Self {
        let col = match e.line_col {
            pest::error::LineColLocation::Pos((_, c)) => c,
            pest::error::LineColLocation::Span((_, c), _) => c,
        };
        SyntaxError(format!("{} at column {col}", e.variant.message()))
    }
}

/// `${a.b}` / `#{a.b}` spanning the whole text becomes a path; anything else,
/// including `${price} USD` or `${a.}`, is a literal.
pub fn parse_interpolation(text: &str) -> Expr {
    DirectiveParser::parse(Rule::interpolation_only, text)
        .ok()
        .and_then(|pairs| pairs.into_iter().find(|p| p.as_rule() == Rule::interpolation))
        .map_or_else(
            || Expr::Literal(text.to_string()),
            |pair| Expr::Path(PropertyPath::from_interpolation(pair)),
        )
}

/// `name: ${collection.path}`.
pub fn parse_each_binding(text: &str) -> Result<EachBinding, SyntaxError> {
    let pairs = DirectiveParser::parse(Rule::each_binding, text)?;
    let mut name = None;
    let mut path = None;
    for pair in pairs.flat_map(|binding| binding.into_inner()) {
        match pair.as_rule() {
            Rule::ident => name = Some(pair.as_str().to_string()),
            Rule::interpolation => path = Some(PropertyPath::from_interpolation(pair)),
            _ => {}
        }
    }
    match (name, path) {
        (Some(name), Some(path)) => Ok(EachBinding { name, path }),
        _ => Err(SyntaxError("expected `name: ${collection}`".to_string())),
    }
}

/// `operand` or `operand == operand` / `operand != operand`.
pub fn parse_condition(text: &str) -> Result<Condition, SyntaxError> {
    let pairs = DirectiveParser::parse(Rule::condition, text)?;
    let mut operands = Vec::with_capacity(2);
    let mut op = None;
    for pair in pairs.flat_map(|cond| cond.into_inner()) {
        match pair.as_rule() {
            Rule::operand => operands.extend(pair.into_inner().next().map(operand)),
            Rule::compare_op => {
                op = Some(if pair.as_str() == "==" { CompareOp::Eq } else { CompareOp::Ne })
            }
            _ => {}
        }
    }

    let mut operands = operands.into_iter();
    match (operands.next(), op, operands.next()) {
        (Some(lhs), Some(op), Some(rhs)) => Ok(Condition::Compare { lhs, op, rhs }),
        (Some(Expr::Literal(lit)), None, None) if lit != "true" && lit != "false" => Err(
            SyntaxError(format!("expected an interpolation, `true` or `false`, found `{lit}`")),
        ),
        (Some(expr), None, None) => Ok(Condition::Test(expr)),
        _ => Err(SyntaxError("malformed condition".to_string())),
    }
}

fn operand(pair: Pair<'_, Rule>) -> Expr {
    match pair.as_rule() {
        Rule::interpolation => Expr::Path(PropertyPath::from_interpolation(pair)),
        Rule::quoted => Expr::Literal(
            pair.into_inner()
                .next()
                .map(|inner| inner.as_str().to_string())
                .unwrap_or_default(),
        ),
        _ => Expr::Literal(pair.as_str().to_string()),
    }
}
