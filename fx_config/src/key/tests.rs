//! Key parsing and environment naming tests.

use rstest::rstest;

use super::{ENV_PREFIX, Key, ROOT, env_var_name};

#[rstest]
#[case("foo", &["foo"])]
#[case("foo.bar.baz", &["foo", "bar", "baz"])]
#[case("Stuff.Server", &["Stuff", "Server"])]
fn parses_segments(#[case] raw: &str, #[case] expected: &[&str]) {
    let key = Key::parse(raw).expect("valid key");
    assert_eq!(key.segments().collect::<Vec<_>>(), expected);
    assert_eq!(key.to_string(), raw);
}

#[rstest]
#[case(".foo")]
#[case("foo.")]
#[case("foo..bar")]
#[case(".")]
fn rejects_empty_segments(#[case] raw: &str) {
    let err = Key::parse(raw).expect_err("empty segment must be rejected");
    assert_eq!(err.key(), Some(raw));
}

#[test]
fn root_key_is_empty() {
    let root = Key::parse(ROOT).expect("root parses");
    assert!(root.is_root());
    assert_eq!(root.to_string(), "");
}

#[test]
fn join_appends_segments() {
    let parent = Key::parse("stuff.server").expect("parent");
    let child = Key::parse("port").expect("child");
    assert_eq!(parent.join(&child).to_string(), "stuff.server.port");
    assert_eq!(Key::root().join(&child).to_string(), "port");
}

#[rstest]
#[case("a.b.c", "CONFIG__a__b__c")]
#[case("stuff.server.port", "CONFIG__stuff__server__port")]
#[case("", "CONFIG")]
fn maps_keys_to_env_names(#[case] raw: &str, #[case] expected: &str) {
    let key = Key::parse(raw).expect("valid key");
    assert_eq!(env_var_name(ENV_PREFIX, &key), expected);
}
