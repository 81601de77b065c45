use std::collections::HashMap;

use thimble_core::{Context, ErrorKind, Lookup, Object, RenderError, RenderOptions, Template, Value};

#[derive(Debug)]
struct WelcomeMessage {
    message: String,
}

impl Object for WelcomeMessage {
    fn type_name(&self) -> &str {
        "WelcomeMessage"
    }
    fn property(&self, name: &str) -> Lookup {
        match name {
            "message" => Lookup::Found(self.message.as_str().into()),
            "secret" => Lookup::Inaccessible,
            _ => Lookup::Unknown,
        }
    }
}

fn welcome_ctx() -> Context {
    let mut ctx = Context::new();
    ctx.put(
        "welcome",
        Value::object(WelcomeMessage {
            message: "hello world".into(),
        }),
    );
    ctx
}

fn render(src: &str, ctx: &mut Context) -> Result<String, RenderError> {
    Template::parse(src).unwrap().render(ctx)
}

#[test]
fn text_from_object_property() {
    let out = render(r#"<p t:text="${welcome.message}"></p>"#, &mut welcome_ctx()).unwrap();
    assert_eq!(out, "<p>hello world</p>");
}

#[test]
fn text_from_map_and_hash_sigil() {
    let mut welcome = HashMap::new();
    welcome.insert("message".to_string(), Value::from("hello world"));
    let mut ctx = Context::new();
    ctx.put("welcome", Value::Map(welcome));

    let out = render(r##"<p t:text="#{welcome.message}"></p>"##, &mut ctx).unwrap();
    assert_eq!(out, "<p>hello world</p>");
}

#[test]
fn text_replaces_children_and_keeps_attributes() {
    let out = render(
        r#"<h1 class="title" t:text="${welcome.message}" id="top">old <b>content</b></h1>"#,
        &mut welcome_ctx(),
    )
    .unwrap();
    assert_eq!(out, r#"<h1 class="title" id="top">hello world</h1>"#);
}

#[test]
fn literal_text_passes_through() {
    let out = render(r#"<p t:text="Plain words"></p>"#, &mut Context::new()).unwrap();
    assert_eq!(out, "<p>Plain words</p>");
}

#[test]
fn bare_variable_and_numbers() {
    let mut ctx = Context::new();
    ctx.put("count", 42);
    ctx.put("ratio", 0.5);
    let out = render(
        r#"<i t:text="${count}"></i><i t:text="${ratio}"></i>"#,
        &mut ctx,
    )
    .unwrap();
    assert_eq!(out, "<i>42</i><i>0.5</i>");
}

#[test]
fn substituted_text_is_escaped_by_default() {
    let mut ctx = Context::new();
    ctx.put("snippet", "<b>Tom & Jerry</b>");
    let tpl = Template::parse(r#"<p t:text="${snippet}"></p>"#).unwrap();

    assert_eq!(
        tpl.render(&mut ctx).unwrap(),
        "<p>&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;</p>"
    );

    let raw = tpl.with_options(RenderOptions::new().escape(false));
    assert_eq!(raw.render(&mut ctx).unwrap(), "<p><b>Tom & Jerry</b></p>");
}

#[test]
fn template_text_is_not_escaped() {
    let out = render("<p>Tom &amp; Jerry</p>", &mut Context::new()).unwrap();
    assert_eq!(out, "<p>Tom &amp; Jerry</p>");
}

#[test]
fn missing_variable_fails() {
    let err = render(r#"<p t:text="${nobody.message}"></p>"#, &mut Context::new()).unwrap_err();
    assert!(matches!(err, RenderError::UnknownVariable { ref name } if name == "nobody"));
}

#[test]
fn missing_property_fails() {
    let err = render(r#"<p t:text="${welcome.title}"></p>"#, &mut welcome_ctx()).unwrap_err();
    match err {
        RenderError::UnknownProperty { property, type_name, .. } => {
            assert_eq!(property, "title");
            assert_eq!(type_name, "WelcomeMessage");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn inaccessible_property_fails() {
    let err = render(r#"<p t:text="${welcome.secret}"></p>"#, &mut welcome_ctx()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InaccessibleProperty);
}

#[test]
fn partial_interpolation_renders_as_literal() {
    let mut ctx = Context::new();
    ctx.put("price", 5);
    let out = render(r#"<p t:text="${price} USD"></p>"#, &mut ctx).unwrap();
    assert_eq!(out, "<p>${price} USD</p>");

    let out = render(r#"<p t:text="${welcome.}"></p>"#, &mut welcome_ctx()).unwrap();
    assert_eq!(out, "<p>${welcome.}</p>");
}

#[test]
fn error_in_deep_branch_fails_whole_render() {
    let src = r#"<html><body><p>ok</p><div><span t:text="${missing}"></span></div></body></html>"#;
    let err = render(src, &mut Context::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownVariable);
}
