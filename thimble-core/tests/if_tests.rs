use std::collections::HashMap;

use thimble_core::{Context, ErrorKind, Lookup, Object, RenderError, Template, Value};

#[derive(Debug)]
struct User {
    name: &'static str,
    role: &'static str,
}

impl Object for User {
    fn type_name(&self) -> &str {
        "User"
    }
    fn property(&self, name: &str) -> Lookup {
        match name {
            "name" => Lookup::Found(self.name.into()),
            "role" => Lookup::Found(self.role.into()),
            "token" => Lookup::Inaccessible,
            _ => Lookup::Unknown,
        }
    }
}

fn render(src: &str, ctx: &mut Context) -> Result<String, RenderError> {
    Template::parse(src).unwrap().render(ctx)
}

#[test]
fn absent_flag_is_falsy_not_an_error() {
    let out = render(r#"<body><div t:if="${flag}">x</div></body>"#, &mut Context::new()).unwrap();
    assert_eq!(out, "<body></body>");
}

#[test]
fn truthy_values_keep_the_element() {
    for v in [Value::from(true), Value::from(1), Value::from("yes"), Value::from(vec![0])] {
        let mut ctx = Context::new();
        ctx.put("flag", v.clone());
        let out = render(r#"<div t:if="${flag}">x</div>"#, &mut ctx).unwrap();
        assert_eq!(out, "<div>x</div>", "value {v:?}");
    }
}

#[test]
fn falsy_values_drop_the_element() {
    for v in [
        Value::Null,
        Value::from(false),
        Value::from(0),
        Value::from(0.0),
        Value::from(""),
        Value::List(vec![]),
    ] {
        let mut ctx = Context::new();
        ctx.put("flag", v.clone());
        let out = render(r#"<div t:if="${flag}">x</div>"#, &mut ctx).unwrap();
        assert_eq!(out, "", "value {v:?}");
    }
}

#[test]
fn literal_conditions() {
    let out = render(
        r#"<a t:if="true">yes</a><b t:if="false">no</b>"#,
        &mut Context::new(),
    )
    .unwrap();
    assert_eq!(out, "<a>yes</a>");
}

#[test]
fn non_boolean_literal_is_rejected() {
    let err = render(r#"<a t:if="maybe">?</a>"#, &mut Context::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidDirectiveSyntax);
}

#[test]
fn false_condition_skips_subtree_without_evaluating_it() {
    let src = r#"<section t:if="${flag}"><ul><li t:each="x: ${missing}" t:text="${x.nope}"></li></ul></section>"#;
    let mut ctx = Context::new();
    ctx.put("flag", false);
    let out = render(src, &mut ctx).unwrap();
    assert_eq!(out, "");
    assert_eq!(ctx.len(), 1);
}

#[test]
fn missing_property_in_condition_is_falsy() {
    let mut settings = HashMap::new();
    settings.insert("debug".to_string(), Value::from(true));
    let mut ctx = Context::new();
    ctx.put("settings", Value::Map(settings));

    let out = render(
        r#"<i t:if="${settings.debug}">d</i><i t:if="${settings.verbose}">v</i>"#,
        &mut ctx,
    )
    .unwrap();
    assert_eq!(out, "<i>d</i>");
}

#[test]
fn inaccessible_property_in_condition_fails() {
    let mut ctx = Context::new();
    ctx.put("user", Value::object(User { name: "Ivan", role: "admin" }));
    let err = render(r#"<i t:if="${user.token}">t</i>"#, &mut ctx).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InaccessibleProperty);
}

#[test]
fn equality_test_inside_each() {
    let mut ctx = Context::new();
    ctx.put(
        "users",
        vec![
            Value::object(User { name: "Ivan", role: "admin" }),
            Value::object(User { name: "Maria", role: "guest" }),
        ],
    );
    let src = concat!(
        r#"<p t:each="u: ${users}">"#,
        r#"<b t:if="${u.role} == 'admin'" t:text="${u.name}"></b>"#,
        r#"<i t:if="${u.role} != admin" t:text="${u.name}"></i>"#,
        "</p>",
    );
    let out = render(src, &mut ctx).unwrap();
    assert_eq!(out, "<p><b>Ivan</b></p><p><i>Maria</i></p>");
}

#[test]
fn if_combined_with_each_is_rejected() {
    let mut ctx = Context::new();
    ctx.put("students", vec!["Ivan"]);
    let tpl = Template::parse(r#"<ul><li t:each="s: ${students}" t:if="true"></li></ul>"#).unwrap();

    let mut sink = Vec::new();
    let err = tpl.render_to(&mut ctx, &mut sink).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedDirectiveCombination);
    assert!(sink.is_empty(), "no partial output on failure");
}

#[test]
fn if_combined_with_each_is_rejected_even_when_false() {
    let err = render(
        r#"<li t:if="false" t:each="s: ${students}"></li>"#,
        &mut Context::new(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedDirectiveCombination);
}
