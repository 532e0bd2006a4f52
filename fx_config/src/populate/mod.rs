//! Walking caller-declared shapes and filling them from a provider.
//!
//! `#[derive(Populate)]` generates a [`Populate`] impl that visits each
//! public field in declaration order with a [`FieldSpec`] describing its key,
//! default and optionality. The [`Populator`] resolves every field's own key
//! through the provider it was created with, so overrides apply leaf by leaf.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::mem;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::{ConfigError, ConfigResult, FromNode, Key, Node, Provider, Value};

/// A shape whose fields can be filled from configuration.
///
/// Usually derived:
///
/// ```
/// use fx_config::{Populate, Provider, StaticProvider};
///
/// #[derive(Debug, Default, Populate)]
/// struct Server {
///     pub port: u16,
///     #[config(default = "hello")]
///     pub greeting: String,
/// }
///
/// let file = StaticProvider::from_yaml_str("file", "server:\n  port: 8081\n")?;
/// let mut server = Server::default();
/// file.get("server").populate(&mut server)?;
/// assert_eq!(server.port, 8081);
/// assert_eq!(server.greeting, "hello");
/// # Ok::<_, std::sync::Arc<fx_config::ConfigError>>(())
/// ```
pub trait Populate {
    /// Visit every populated field with `populator`.
    fn populate_fields(&mut self, populator: &mut Populator<'_>);
}

/// A single field slot that knows how to fill itself.
///
/// Scalar and collection types coerce the value at the field's key; types
/// deriving [`Populate`] recurse with the field's key as the new parent.
pub trait Field {
    /// Fill `self` from the value at `spec`'s key beneath the populator's
    /// current parent.
    fn populate_field(&mut self, populator: &mut Populator<'_>, spec: &FieldSpec);
}

/// Compile-time description of one field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Rust field name.
    pub name: &'static str,
    /// Key segment (or dotted sub-key) resolved beneath the parent.
    pub key: &'static str,
    /// Literal used when no provider has the key, parsed by the coercion
    /// rules of the field type.
    pub default: Option<&'static str>,
    /// Whether absence is tolerated.
    pub optional: bool,
}

impl FieldSpec {
    /// A required field without a default whose key is its name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            key: name,
            default: None,
            optional: false,
        }
    }
}

/// Walking context for one population pass.
///
/// Failures are collected rather than returned early so every field is
/// attempted; [`Populator::finish`] reports them together.
pub struct Populator<'a> {
    provider: &'a dyn Provider,
    parent: Key,
    failures: Vec<Arc<ConfigError>>,
}

impl<'a> Populator<'a> {
    /// Start populating beneath `parent`, resolving through `provider`.
    #[must_use]
    pub const fn new(provider: &'a dyn Provider, parent: Key) -> Self {
        Self {
            provider,
            parent,
            failures: Vec::new(),
        }
    }

    /// The key fields are currently resolved beneath.
    #[must_use]
    pub const fn parent(&self) -> &Key {
        &self.parent
    }

    /// Populate one field slot.
    pub fn field<T: Field + ?Sized>(&mut self, slot: &mut T, spec: &FieldSpec) {
        slot.populate_field(self, spec);
    }

    /// Coerce the value at `spec`'s key into `slot`.
    ///
    /// An absent key falls back to the declared default. Without one, a
    /// required field records a failure and `slot` is left untouched.
    pub fn scalar<T: FromNode>(&mut self, slot: &mut T, spec: &FieldSpec) {
        self.convert(slot, spec, Value::coerce::<T>);
    }

    /// Parse the text at `spec`'s key into `slot` with [`FromStr`].
    ///
    /// Generated for `#[config(from_str)]` fields; absence and defaults
    /// behave as in [`Populator::scalar`].
    pub fn parsed<T: FromStr>(&mut self, slot: &mut T, spec: &FieldSpec) {
        self.convert(slot, spec, Value::parse::<T>);
    }

    /// Recurse into a nested shape with `spec`'s key as the parent.
    ///
    /// An optional nested shape with nothing configured beneath it is
    /// skipped entirely.
    pub fn nested<T: Populate + ?Sized>(&mut self, slot: &mut T, spec: &FieldSpec) {
        if spec.optional && !self.is_present(spec) {
            return;
        }
        let Some(child) = self.child_key(spec) else {
            return;
        };
        let parent = mem::replace(&mut self.parent, child);
        slot.populate_fields(self);
        self.parent = parent;
    }

    /// Whether a non-null value exists at `spec`'s key.
    #[must_use]
    pub fn is_present(&self, spec: &FieldSpec) -> bool {
        Key::parse(spec.key).is_ok_and(|key| {
            let full = self.parent.join(&key).to_string();
            self.provider
                .get(&full)
                .node()
                .is_some_and(|node| *node != Node::Null)
        })
    }

    /// Finish the pass.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Population`] when any field failed.
    pub fn finish(self) -> ConfigResult<()> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::population(
                &self.parent.to_string(),
                self.failures,
            ))
        }
    }

    fn convert<T, F>(&mut self, slot: &mut T, spec: &FieldSpec, read: F)
    where
        F: Fn(&Value<'a>) -> ConfigResult<T>,
    {
        let Some(mut value) = self.lookup(spec) else {
            return;
        };
        if let Some(default) = spec.default {
            value = value.with_default(default);
        }
        if !value.has_value() {
            if !spec.optional {
                self.failures.push(ConfigError::not_found(value.key()));
            }
            return;
        }
        read(&value).map_or_else(|err| self.failures.push(err), |parsed| *slot = parsed);
    }

    fn child_key(&mut self, spec: &FieldSpec) -> Option<Key> {
        Key::parse(spec.key)
            .map(|key| self.parent.join(&key))
            .inspect_err(|err| self.failures.push(Arc::clone(err)))
            .ok()
    }

    fn lookup(&mut self, spec: &FieldSpec) -> Option<Value<'a>> {
        let key = self.child_key(spec)?.to_string();
        Some(self.provider.get(&key))
    }
}

/// Optional fields stay untouched when nothing (or an explicit null) is
/// configured and there is no default. A `None` field that fails to
/// populate stays `None`.
impl<T: Field + Default> Field for Option<T> {
    fn populate_field(&mut self, populator: &mut Populator<'_>, spec: &FieldSpec) {
        if spec.default.is_none() && !populator.is_present(spec) {
            return;
        }
        let was_set = self.is_some();
        let failures = populator.failures.len();
        let mut inner = self.take().unwrap_or_default();
        inner.populate_field(populator, spec);
        if was_set || populator.failures.len() == failures {
            *self = Some(inner);
        }
    }
}

macro_rules! scalar_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Field for $ty {
                fn populate_field(&mut self, populator: &mut Populator<'_>, spec: &FieldSpec) {
                    populator.scalar(self, spec);
                }
            }
        )*
    };
}

scalar_field!(
    bool, char, String, Node, f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128,
    usize, PathBuf, IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr,
);

impl<T: FromNode> Field for Vec<T> {
    fn populate_field(&mut self, populator: &mut Populator<'_>, spec: &FieldSpec) {
        populator.scalar(self, spec);
    }
}

impl<T: FromNode> Field for BTreeMap<String, T> {
    fn populate_field(&mut self, populator: &mut Populator<'_>, spec: &FieldSpec) {
        populator.scalar(self, spec);
    }
}

impl<T: FromNode, S: BuildHasher + Default> Field for HashMap<String, T, S> {
    fn populate_field(&mut self, populator: &mut Populator<'_>, spec: &FieldSpec) {
        populator.scalar(self, spec);
    }
}
