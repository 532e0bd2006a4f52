//! Tests for tree navigation, overlay merging and rendering.

use figment::value::{Num, Tag, Value as FigmentValue};
use rstest::rstest;

use super::Node;
use crate::Key;

fn tree() -> Node {
    Node::from_iter([
        (
            "foo",
            Node::from_iter([(
                "bar",
                Node::from_iter([("baz", Node::from("hello")), ("boo", Node::Int(1))]),
            )]),
        ),
        (
            "servers",
            Node::Sequence(vec![Node::from_iter([("host", Node::from("a.local"))])]),
        ),
    ])
}

fn key(raw: &str) -> Key {
    Key::parse(raw).expect("valid key")
}

#[rstest]
#[case("foo.bar.baz", Some(Node::from("hello")))]
#[case("foo.bar.boo", Some(Node::Int(1)))]
#[case("servers.0.host", Some(Node::from("a.local")))]
#[case("servers.1.host", None)]
#[case("foo.bar.baz.deeper", None)]
#[case("missing", None)]
fn finds_nodes_by_path(#[case] raw: &str, #[case] expected: Option<Node>) {
    assert_eq!(tree().find(&key(raw)).cloned(), expected);
}

#[test]
fn partial_path_returns_subtree() {
    let found = tree().find(&key("foo.bar")).cloned().expect("subtree");
    assert!(found.is_mapping());
    assert_eq!(found.find(&key("baz")), Some(&Node::from("hello")));
}

#[test]
fn root_key_returns_whole_tree() {
    let whole = tree();
    assert_eq!(whole.find(&Key::root()), Some(&whole));
}

#[test]
fn merge_overrides_leaves_only() {
    let mut base = Node::from_iter([(
        "server",
        Node::from_iter([("port", Node::Int(8081)), ("greeting", Node::from("Hello There!"))]),
    )]);
    base.merge(Node::from_iter([(
        "server",
        Node::from_iter([("port", Node::Int(3000))]),
    )]));
    assert_eq!(base.find(&key("server.port")), Some(&Node::Int(3000)));
    assert_eq!(
        base.find(&key("server.greeting")),
        Some(&Node::from("Hello There!"))
    );
}

#[test]
fn merge_replaces_sequences_and_scalars_wholesale() {
    let mut base = Node::from_iter([("tags", Node::Sequence(vec![Node::from("a"), Node::from("b")]))]);
    base.merge(Node::from_iter([("tags", Node::Sequence(vec![Node::from("c")]))]));
    assert_eq!(
        base.find(&key("tags")),
        Some(&Node::Sequence(vec![Node::from("c")]))
    );

    let mut scalar = Node::Int(1);
    scalar.merge(Node::from_iter([("a", Node::Bool(true))]));
    assert!(scalar.is_mapping());
}

#[test]
fn renders_composites_map_like() {
    let doc = Node::from_iter([("one", Node::from_iter([("two", Node::from("hello"))]))]);
    assert_eq!(doc.to_string(), "map[one:map[two:hello]]");
    let seq = Node::Sequence(vec![Node::from("a"), Node::Int(2), Node::Bool(false)]);
    assert_eq!(seq.to_string(), "[a 2 false]");
}

#[rstest]
#[case(FigmentValue::Num(Tag::Default, Num::U8(42)), Node::Int(42))]
#[case(FigmentValue::Num(Tag::Default, Num::U64(u64::MAX)), Node::UInt(u64::MAX))]
#[case(FigmentValue::Num(Tag::Default, Num::I32(-3)), Node::Int(-3))]
#[case(FigmentValue::Num(Tag::Default, Num::F64(1.5)), Node::Float(1.5))]
#[case(FigmentValue::String(Tag::Default, "text".to_owned()), Node::from("text"))]
#[case(FigmentValue::Bool(Tag::Default, true), Node::Bool(true))]
#[case(FigmentValue::Char(Tag::Default, 'x'), Node::from("x"))]
fn converts_figment_scalars(#[case] value: FigmentValue, #[case] expected: Node) {
    assert_eq!(Node::from(value), expected);
}

#[test]
fn converts_large_unsigned_numbers() {
    assert_eq!(Node::from(Num::U128(7)), Node::Int(7));
    assert!(matches!(Node::from(Num::U128(u128::MAX)), Node::Float(_)));
}
