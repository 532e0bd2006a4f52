//! Typeless configuration data.
//!
//! Providers do not know the shape of the configuration ahead of time, so
//! every parsed document is held as a [`Node`] tree and only coerced into a
//! concrete type when a caller reads it.

use std::collections::BTreeMap;
use std::fmt;

use figment::value::{Dict, Empty, Num, Value as FigmentValue};

use crate::Key;

/// One node of a configuration tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Node {
    /// An explicit empty value (`key:` with nothing after it in YAML).
    #[default]
    Null,
    /// A boolean scalar.
    Bool(bool),
    /// A signed integer scalar.
    Int(i64),
    /// An unsigned integer too large for [`Node::Int`].
    UInt(u64),
    /// A floating-point scalar.
    Float(f64),
    /// A string scalar.
    String(String),
    /// An ordered sequence.
    Sequence(Vec<Node>),
    /// A mapping from key segment to child node.
    Mapping(BTreeMap<String, Node>),
}

impl Node {
    /// Short name of the variant, used in type mismatch errors.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "a boolean",
            Self::Int(_) | Self::UInt(_) => "an integer",
            Self::Float(_) => "a float",
            Self::String(_) => "a string",
            Self::Sequence(_) => "a sequence",
            Self::Mapping(_) => "a mapping",
        }
    }

    /// Whether this node is a mapping.
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    /// Whether this node is a mapping without entries.
    #[must_use]
    pub fn is_empty_mapping(&self) -> bool {
        matches!(self, Self::Mapping(map) if map.is_empty())
    }

    /// Walk `key` from this node.
    ///
    /// Mapping segments select children by name; a decimal segment indexes a
    /// sequence (`servers.0.host`). The root key returns `self`.
    #[must_use]
    pub fn find(&self, key: &Key) -> Option<&Self> {
        key.segments().try_fold(self, |node, segment| match node {
            Self::Mapping(map) => map.get(segment),
            Self::Sequence(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    /// Overlay `layer` onto `self`, updating `self` in place.
    ///
    /// Behaviour:
    /// - When merging a mapping into a non-mapping target, the target is
    ///   replaced by an empty mapping first.
    /// - Mappings merge recursively, so leaves absent from `layer` survive.
    /// - Sequences and scalars replace the target wholesale.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fx_config::Node;
    ///
    /// let mut base = Node::from_iter([("port", Node::Int(8081)), ("greeting", Node::from("hi"))]);
    /// base.merge(Node::from_iter([("port", Node::Int(3000))]));
    /// assert_eq!(base, Node::from_iter([("port", Node::Int(3000)), ("greeting", Node::from("hi"))]));
    /// ```
    pub fn merge(&mut self, layer: Self) {
        match layer {
            Self::Mapping(map) => self.merge_mapping(map),
            other => *self = other,
        }
    }

    fn merge_mapping(&mut self, map: BTreeMap<String, Self>) {
        if !self.is_mapping() {
            *self = Self::Mapping(BTreeMap::new());
        }
        let Self::Mapping(target) = self else {
            return;
        };
        for (key, value) in map {
            match target.get_mut(&key) {
                Some(existing) => existing.merge(value),
                None => {
                    target.insert(key, value);
                }
            }
        }
    }

    pub(crate) fn from_dict(dict: Dict) -> Self {
        Self::Mapping(
            dict.into_iter()
                .map(|(key, value)| (key, Self::from(value)))
                .collect(),
        )
    }
}

impl From<FigmentValue> for Node {
    fn from(value: FigmentValue) -> Self {
        match value {
            FigmentValue::String(_, s) => Self::String(s),
            FigmentValue::Char(_, c) => Self::String(c.to_string()),
            FigmentValue::Bool(_, b) => Self::Bool(b),
            FigmentValue::Num(_, num) => Self::from(num),
            FigmentValue::Empty(_, Empty::None | Empty::Unit) => Self::Null,
            FigmentValue::Dict(_, dict) => Self::from_dict(dict),
            FigmentValue::Array(_, items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
        }
    }
}

impl From<Num> for Node {
    fn from(num: Num) -> Self {
        match num {
            Num::U8(v) => Self::Int(i64::from(v)),
            Num::U16(v) => Self::Int(i64::from(v)),
            Num::U32(v) => Self::Int(i64::from(v)),
            Num::U64(v) => Self::from_unsigned(u128::from(v)),
            Num::U128(v) => Self::from_unsigned(v),
            Num::USize(v) => Self::from_unsigned(v as u128),
            Num::I8(v) => Self::Int(i64::from(v)),
            Num::I16(v) => Self::Int(i64::from(v)),
            Num::I32(v) => Self::Int(i64::from(v)),
            Num::I64(v) => Self::Int(v),
            Num::I128(v) => Self::from_signed(v),
            Num::ISize(v) => Self::from_signed(v as i128),
            Num::F32(v) => Self::Float(f64::from(v)),
            Num::F64(v) => Self::Float(v),
        }
    }
}

impl Node {
    #[expect(
        clippy::cast_precision_loss,
        reason = "integers beyond i64 are only representable as floats"
    )]
    fn from_signed(v: i128) -> Self {
        if let Ok(signed) = i64::try_from(v) {
            Self::Int(signed)
        } else if let Ok(unsigned) = u64::try_from(v) {
            Self::UInt(unsigned)
        } else {
            Self::Float(v as f64)
        }
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "integers beyond u64 are only representable as floats"
    )]
    fn from_unsigned(v: u128) -> Self {
        if let Ok(signed) = i64::try_from(v) {
            Self::Int(signed)
        } else if let Ok(unsigned) = u64::try_from(v) {
            Self::UInt(unsigned)
        } else {
            Self::Float(v as f64)
        }
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<K: Into<String>> FromIterator<(K, Self)> for Node {
    fn from_iter<I: IntoIterator<Item = (K, Self)>>(iter: I) -> Self {
        Self::Mapping(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Scalars render bare; composites render map-like, e.g.
/// `map[one:map[two:hello]]` and `[a b]`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
            Self::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Mapping(map) => {
                f.write_str("map[")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{key}:{value}")?;
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests;
