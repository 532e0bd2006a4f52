//! Resolved configuration values and their typed accessors.
//!
//! A [`Value`] is produced fresh for every lookup and never changes
//! afterwards. It carries the resolved data (if any), the key it was resolved
//! for, the provider that supplied it, and a reference to the provider it was
//! looked up through so that [`Value::populate`] can resolve each field
//! independently.
//!
//! Reads come in two textually distinct flavours:
//!
//! - [`Value::coerce`] and [`Value::try_as`] report failure to the caller;
//! - [`Value::expect_as`] treats failure as a broken caller contract and
//!   panics.

mod coerce;

use std::fmt;
use std::str::FromStr;

pub use coerce::FromNode;

use crate::populate::{Populate, Populator};
use crate::{ConfigError, ConfigResult, Key, Node, Provider};

/// The result of looking up a single key.
#[derive(Clone)]
pub struct Value<'a> {
    provider: &'a dyn Provider,
    key: String,
    source: Option<String>,
    data: Option<Node>,
    defaulted: bool,
}

impl<'a> Value<'a> {
    /// Build a value by looking `key` up with `find`.
    ///
    /// Custom providers use this from [`Provider::get`] so that an invalid key
    /// is reported as absent and provenance is recorded consistently.
    ///
    /// # Examples
    ///
    /// ```
    /// use fx_config::{Node, Provider, Value};
    ///
    /// struct Fixed(Node);
    ///
    /// impl Provider for Fixed {
    ///     fn name(&self) -> &str {
    ///         "fixed"
    ///     }
    ///
    ///     fn get(&self, key: &str) -> Value<'_> {
    ///         Value::lookup(self, key, |k| self.0.find(k).cloned())
    ///     }
    /// }
    ///
    /// let provider = Fixed(Node::from_iter([("port", Node::Int(80))]));
    /// assert_eq!(provider.get("port").expect_as::<u16>(), 80);
    /// assert_eq!(provider.get("port").source(), Some("fixed"));
    /// ```
    pub fn lookup<F>(provider: &'a dyn Provider, key: &str, find: F) -> Self
    where
        F: FnOnce(&Key) -> Option<Node>,
    {
        Key::parse(key).map_or_else(
            |err| {
                tracing::debug!(key, error = %err, "rejected malformed key");
                Self::absent(provider, key)
            },
            |parsed| {
                find(&parsed).map_or_else(
                    || Self::absent(provider, key),
                    |node| Self::present(provider, key, provider.name(), node),
                )
            },
        )
    }

    /// A value that was found for `key`.
    #[must_use]
    pub fn present(provider: &'a dyn Provider, key: &str, source: &str, data: Node) -> Self {
        Self {
            provider,
            key: key.to_owned(),
            source: Some(source.to_owned()),
            data: Some(data),
            defaulted: false,
        }
    }

    /// A value reporting that no data exists for `key`.
    #[must_use]
    pub fn absent(provider: &'a dyn Provider, key: &str) -> Self {
        Self {
            provider,
            key: key.to_owned(),
            source: None,
            data: None,
            defaulted: false,
        }
    }

    /// Re-home the value onto `provider`, keeping its data and provenance.
    #[must_use]
    pub(crate) fn through<'b>(self, provider: &'b dyn Provider) -> Value<'b> {
        Value {
            provider,
            key: self.key,
            source: self.source,
            data: self.data,
            defaulted: self.defaulted,
        }
    }

    /// Returns `true` if the lookup found data, even a zero-like scalar.
    #[must_use]
    pub const fn has_value(&self) -> bool {
        self.data.is_some()
    }

    /// Returns `true` if the data came from [`Value::with_default`].
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.defaulted
    }

    /// The key this value was resolved for.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Name of the provider that supplied the data.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// The raw resolved data.
    #[must_use]
    pub const fn node(&self) -> Option<&Node> {
        self.data.as_ref()
    }

    /// Consume the value, returning the raw resolved data.
    #[must_use]
    pub fn into_node(self) -> Option<Node> {
        self.data
    }

    /// Substitute `default` when no provider supplied the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use fx_config::{NopProvider, Provider};
    /// let value = NopProvider.get("server.port").with_default(8080_i64);
    /// assert!(value.is_default());
    /// assert_eq!(value.expect_as::<u16>(), 8080);
    /// ```
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Node>) -> Self {
        if self.data.is_none() {
            self.data = Some(default.into());
            self.defaulted = true;
        }
        self
    }

    /// Immediate child segments when the value is a mapping.
    #[must_use]
    pub fn child_keys(&self) -> Vec<&str> {
        match &self.data {
            Some(Node::Mapping(map)) => map.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Read the value as `T`, keeping absence and mismatch distinct.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] (or [`ConfigError::InvalidKey`] for a
    /// malformed key) when no data exists, and [`ConfigError::TypeMismatch`]
    /// when the data cannot be read as `T`.
    pub fn coerce<T: FromNode>(&self) -> ConfigResult<T> {
        let Some(node) = &self.data else {
            return Err(self.absence());
        };
        T::from_node(node)
            .ok_or_else(|| ConfigError::mismatch(&self.key, T::EXPECTED, node.kind()))
    }

    /// Read a scalar's text as any [`FromStr`] type.
    ///
    /// ```
    /// use std::net::SocketAddr;
    /// use fx_config::{Node, Provider, StaticProvider};
    ///
    /// let file = StaticProvider::from_node("file", Node::from_iter([("bind", Node::from("127.0.0.1:80"))]));
    /// let bind: SocketAddr = file.get("bind").parse()?;
    /// assert_eq!(bind.port(), 80);
    /// # Ok::<_, std::sync::Arc<fx_config::ConfigError>>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Absence is reported as by [`Value::coerce`]. A composite, a null or
    /// text that `T` rejects is a [`ConfigError::TypeMismatch`].
    pub fn parse<T: FromStr>(&self) -> ConfigResult<T> {
        let Some(node) = &self.data else {
            return Err(self.absence());
        };
        coerce::parse_scalar(node).ok_or_else(|| {
            ConfigError::mismatch(&self.key, std::any::type_name::<T>(), node.kind())
        })
    }

    /// Read the value as `T`, returning `None` when it is absent or has the
    /// wrong shape.
    #[must_use]
    pub fn try_as<T: FromNode>(&self) -> Option<T> {
        self.coerce()
            .inspect_err(|err| {
                if err.is_type_mismatch() {
                    tracing::debug!(key = %self.key, error = %err, "configuration type mismatch");
                } else {
                    tracing::debug!(key = %self.key, "configuration value absent");
                }
            })
            .ok()
    }

    /// Read the value as `T`, asserting that it is present and well-formed.
    ///
    /// # Panics
    ///
    /// Panics with the coercion error when the value is absent or cannot be
    /// read as `T`. Use [`Value::try_as`] unless presence is guaranteed.
    #[must_use]
    #[track_caller]
    pub fn expect_as<T: FromNode>(&self) -> T {
        self.coerce().unwrap_or_else(|err| panic!("{err}"))
    }

    /// Fill `target` from the fields beneath this value's key.
    ///
    /// Each field is resolved through the provider this value came from, so a
    /// field overridden by a higher-priority provider wins while its siblings
    /// still resolve from lower ones. Fields are visited front to back;
    /// fields assigned before a failure keep their new values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Population`] listing every required field that
    /// was absent without a default or could not be coerced.
    pub fn populate<T: Populate + ?Sized>(&self, target: &mut T) -> ConfigResult<()> {
        let parent = Key::parse(&self.key)?;
        let mut populator = Populator::new(self.provider, parent);
        target.populate_fields(&mut populator);
        populator.finish()
    }

    /// Boolean form of [`Value::populate`]: `true` when every required field
    /// was found and type-compatible.
    pub fn populate_struct<T: Populate + ?Sized>(&self, target: &mut T) -> bool {
        self.populate(target)
            .inspect_err(|err| {
                tracing::warn!(key = %self.key, error = %err, "configuration population incomplete");
            })
            .is_ok()
    }

    fn absence(&self) -> std::sync::Arc<ConfigError> {
        Key::parse(&self.key)
            .err()
            .unwrap_or_else(|| ConfigError::not_found(&self.key))
    }
}

impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.source == other.source
            && self.data == other.data
            && self.defaulted == other.defaulted
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("key", &self.key)
            .field("source", &self.source)
            .field("data", &self.data)
            .field("defaulted", &self.defaulted)
            .field("provider", &self.provider.name())
            .finish()
    }
}
