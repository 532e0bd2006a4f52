//! Coercion from [`Node`] into concrete Rust types.
//!
//! Rules, in order: an exact scalar match; widening from integer to float;
//! parsing a string scalar into the requested primitive; and pass-through of
//! composites into collection targets. Anything else is a mismatch. Strings
//! accept every node, rendering composites map-like. Types that parse from
//! text (paths, addresses) read any scalar through [`FromStr`].

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use crate::Node;

/// Types that a [`Node`] can be read as.
pub trait FromNode: Sized {
    /// Name of the target type used in mismatch errors.
    const EXPECTED: &'static str;

    /// Convert `node`, returning `None` when the shapes are incompatible.
    fn from_node(node: &Node) -> Option<Self>;
}

impl FromNode for Node {
    const EXPECTED: &'static str = "a node";

    fn from_node(node: &Node) -> Option<Self> {
        Some(node.clone())
    }
}

impl FromNode for String {
    const EXPECTED: &'static str = "a string";

    fn from_node(node: &Node) -> Option<Self> {
        match node {
            Node::String(s) => Some(s.clone()),
            Node::Null => None,
            other => Some(other.to_string()),
        }
    }
}

impl FromNode for char {
    const EXPECTED: &'static str = "a character";

    fn from_node(node: &Node) -> Option<Self> {
        let Node::String(s) = node else {
            return None;
        };
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

impl FromNode for bool {
    const EXPECTED: &'static str = "a boolean";

    fn from_node(node: &Node) -> Option<Self> {
        match node {
            Node::Bool(b) => Some(*b),
            Node::String(s) => parse_bool(s.trim()),
            _ => None,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

macro_rules! integer_from_node {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromNode for $ty {
                const EXPECTED: &'static str = stringify!($ty);

                fn from_node(node: &Node) -> Option<Self> {
                    match node {
                        Node::Int(i) => Self::try_from(*i).ok(),
                        Node::UInt(u) => Self::try_from(*u).ok(),
                        Node::String(s) => s.trim().parse().ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

integer_from_node!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl FromNode for f64 {
    const EXPECTED: &'static str = "f64";

    #[expect(
        clippy::cast_precision_loss,
        reason = "integer to float widening is part of the coercion rules"
    )]
    fn from_node(node: &Node) -> Option<Self> {
        match node {
            Node::Float(x) => Some(*x),
            Node::Int(i) => Some(*i as Self),
            Node::UInt(u) => Some(*u as Self),
            Node::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl FromNode for f32 {
    const EXPECTED: &'static str = "f32";

    #[expect(
        clippy::cast_possible_truncation,
        reason = "documents only carry f64, so f32 targets accept the nearest value"
    )]
    fn from_node(node: &Node) -> Option<Self> {
        match node {
            Node::String(s) => s.trim().parse().ok(),
            other => f64::from_node(other).map(|x| x as Self),
        }
    }
}

/// Parse a scalar's text with [`FromStr`]. Nulls and composites never parse.
pub(crate) fn parse_scalar<T: FromStr>(node: &Node) -> Option<T> {
    match node {
        Node::String(s) => s.parse().ok(),
        Node::Null | Node::Sequence(_) | Node::Mapping(_) => None,
        scalar => scalar.to_string().parse().ok(),
    }
}

macro_rules! from_str_node {
    ($($ty:ty => $expected:literal),* $(,)?) => {
        $(
            impl FromNode for $ty {
                const EXPECTED: &'static str = $expected;

                fn from_node(node: &Node) -> Option<Self> {
                    parse_scalar(node)
                }
            }
        )*
    };
}

from_str_node!(
    PathBuf => "a path",
    IpAddr => "an IP address",
    Ipv4Addr => "an IPv4 address",
    Ipv6Addr => "an IPv6 address",
    SocketAddr => "a socket address",
);

impl<T: FromNode> FromNode for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_node(node: &Node) -> Option<Self> {
        match node {
            Node::Null => Some(None),
            other => T::from_node(other).map(Some),
        }
    }
}

/// Sequences convert element-wise. A string scalar is read as a
/// comma-separated list unless it looks like structured or quoted data, so
/// `CONFIG__hosts=a,b,c` populates a `Vec<String>`.
impl<T: FromNode> FromNode for Vec<T> {
    const EXPECTED: &'static str = "a sequence";

    fn from_node(node: &Node) -> Option<Self> {
        match node {
            Node::Sequence(items) => items.iter().map(T::from_node).collect(),
            Node::String(s) if should_parse_as_csv(s) => s
                .split(',')
                .map(|item| T::from_node(&Node::String(item.trim().to_owned())))
                .collect(),
            _ => None,
        }
    }
}

/// Determine if a string should be split on commas rather than treated as a
/// single element.
///
/// The value is treated as CSV when it contains a comma and does not start
/// with `[`, `{`, `"` or `'`.
fn should_parse_as_csv(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.contains(',') && !matches!(trimmed.chars().next(), Some('[' | '{' | '"' | '\''))
}

impl<T: FromNode> FromNode for BTreeMap<String, T> {
    const EXPECTED: &'static str = "a mapping";

    fn from_node(node: &Node) -> Option<Self> {
        let Node::Mapping(map) = node else {
            return None;
        };
        map.iter()
            .map(|(key, value)| T::from_node(value).map(|v| (key.clone(), v)))
            .collect()
    }
}

impl<T: FromNode, S: BuildHasher + Default> FromNode for HashMap<String, T, S> {
    const EXPECTED: &'static str = "a mapping";

    fn from_node(node: &Node) -> Option<Self> {
        let Node::Mapping(map) = node else {
            return None;
        };
        map.iter()
            .map(|(key, value)| T::from_node(value).map(|v| (key.clone(), v)))
            .collect()
    }
}
