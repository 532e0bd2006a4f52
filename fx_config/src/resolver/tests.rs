//! Tests for priority ordering and leaf-wise composite resolution.

use std::collections::BTreeMap;

use anyhow::{Result, ensure};
use rstest::{fixture, rstest};

use super::Resolver;
use crate::{Node, Provider, ROOT, StaticProvider};

fn server(fields: Vec<(&str, Node)>) -> Node {
    Node::from_iter([("stuff", Node::from_iter([("server", Node::from_iter(fields))]))])
}

#[fixture]
fn resolver() -> Resolver {
    let file = StaticProvider::from_node(
        "file",
        server(vec![
            ("port", Node::Int(8081)),
            ("greeting", Node::from("Hello There!")),
        ]),
    );
    let overrides = StaticProvider::from_node("overrides", server(vec![("port", Node::Int(3000))]));
    Resolver::default().with_provider(file).with_provider(overrides)
}

#[rstest]
fn higher_priority_wins_per_leaf(resolver: Resolver) -> Result<()> {
    let port = resolver.get("stuff.server.port");
    ensure!(port.try_as::<u16>() == Some(3000));
    ensure!(port.source() == Some("overrides"));
    let greeting = resolver.get("stuff.server.greeting");
    ensure!(greeting.try_as::<String>().as_deref() == Some("Hello There!"));
    ensure!(greeting.source() == Some("file"));
    Ok(())
}

#[rstest]
fn subtree_reads_agree_with_leaf_reads(resolver: Resolver) -> Result<()> {
    let subtree = resolver.get("stuff.server");
    ensure!(subtree.source() == Some("overrides"));
    ensure!(
        subtree.node()
            == Some(&Node::from_iter([
                ("greeting", Node::from("Hello There!")),
                ("port", Node::Int(3000)),
            ]))
    );
    let root = resolver.get(ROOT).try_as::<String>();
    ensure!(
        root.as_deref() == Some("map[stuff:map[server:map[greeting:Hello There! port:3000]]]"),
        "unexpected root rendering: {root:?}"
    );
    Ok(())
}

#[rstest]
#[case::root(ROOT)]
#[case::subtree("stuff.server")]
fn empty_mappings_do_not_claim_provenance(resolver: Resolver, #[case] key: &str) -> Result<()> {
    let stack = resolver.with_provider(StaticProvider::from_node(
        "blank",
        Node::Mapping(BTreeMap::new()),
    ));
    let value = stack.get(key);
    ensure!(value.source() == Some("overrides"), "source was {:?}", value.source());
    Ok(())
}

#[test]
fn scalar_shadows_lower_mappings() -> Result<()> {
    let resolver = Resolver::default()
        .with_provider(StaticProvider::from_node("file", server(vec![("port", Node::Int(1))])))
        .with_provider(StaticProvider::from_node(
            "flat",
            Node::from_iter([("stuff", Node::from("disabled"))]),
        ));
    ensure!(resolver.get("stuff").try_as::<String>().as_deref() == Some("disabled"));
    ensure!(resolver.get("stuff.server.port").try_as::<u8>() == Some(1));
    Ok(())
}

#[rstest]
fn absent_everywhere_is_absent(resolver: Resolver) {
    let value = resolver.get("stuff.server.missing");
    assert!(!value.has_value());
    assert_eq!(value.source(), None);
    assert!(Resolver::default().get("anything").coerce::<u8>().is_err());
}

#[rstest]
fn lists_providers_by_priority(resolver: Resolver) {
    assert_eq!(resolver.providers(), ["overrides", "file"]);
    assert_eq!(resolver.len(), 2);
    assert!(!resolver.is_empty());
    assert!(format!("{resolver:?}").contains("overrides"));
}

#[rstest]
fn scope_confines_lookups(resolver: Resolver) -> Result<()> {
    let scoped = resolver.scope("stuff.server")?;
    ensure!(scoped.get("port").try_as::<u16>() == Some(3000));
    ensure!(scoped.get("greeting").source() == Some("file"));
    Ok(())
}

#[rstest]
fn repeated_gets_are_equal(resolver: Resolver) {
    for key in ["stuff.server.port", "stuff.server", ROOT, "missing"] {
        assert_eq!(resolver.get(key), resolver.get(key), "{key}");
    }
}
