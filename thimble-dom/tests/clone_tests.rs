use thimble_dom::{Attr, Node, h, text};

fn li_template() -> Node {
    h(
        "li",
        vec![("class", "row"), ("t:each", "s: ${students}")],
        vec![h("span", vec![("t:text", "${s.name}")], vec![])],
    )
}

#[test]
fn clone_without_strips_only_named_attr() {
    let node = li_template();
    let el = node.as_element().unwrap();
    let copy = el.clone_without("t:each");
    assert_eq!(copy.attrs.len(), 1);
    assert_eq!(copy.attrs.get("class"), Some(&Attr::new("class", "row")));
    assert!(copy.attrs.get("t:each").is_none());
    assert_eq!(copy.children, el.children);
}

#[test]
fn mutating_clone_leaves_original_untouched() {
    let node = li_template();
    let el = node.as_element().unwrap();
    let mut copy = el.clone_without("t:each");
    copy.children.push(text("extra"));
    copy.attrs.push(Attr::flag("hidden"));

    assert_eq!(el.children.len(), 1);
    assert!(el.attrs.get("hidden").is_none());
    assert!(el.attrs.get("t:each").is_some());
}
