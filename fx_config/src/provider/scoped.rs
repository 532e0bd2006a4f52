//! Provider adaptor that confines lookups to one subtree.

use crate::{ConfigResult, Key, Provider, Value};

/// Wraps a provider so every lookup is made beneath a fixed key.
///
/// Hand a subsystem a `ScopedProvider` when it should only see its own part
/// of the configuration. Values report the full key they were resolved for
/// and populate through the wrapped provider.
///
/// # Examples
///
/// ```
/// use fx_config::{Provider, ScopedProvider, StaticProvider};
///
/// let file = StaticProvider::from_yaml_str("app", "http:\n  timeout: 30\n")?;
/// let http = ScopedProvider::new("http", &file)?;
/// assert_eq!(http.get("timeout").expect_as::<u32>(), 30);
/// assert_eq!(http.get("timeout").key(), "http.timeout");
/// # Ok::<_, std::sync::Arc<fx_config::ConfigError>>(())
/// ```
#[derive(Clone, Debug)]
pub struct ScopedProvider<P> {
    scope: Key,
    inner: P,
}

impl<P: Provider> ScopedProvider<P> {
    /// Scope `inner` beneath the dotted key `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::InvalidKey`] when `scope` has an empty
    /// segment.
    pub fn new(scope: &str, inner: P) -> ConfigResult<Self> {
        Ok(Self {
            scope: Key::parse(scope)?,
            inner,
        })
    }

    /// The key every lookup is made beneath.
    #[must_use]
    pub const fn scope(&self) -> &Key {
        &self.scope
    }

    /// Unwrap the scoped provider.
    #[must_use]
    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: Provider> Provider for ScopedProvider<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn get(&self, key: &str) -> Value<'_> {
        Key::parse(key).map_or_else(
            |err| {
                tracing::debug!(key, error = %err, "rejected malformed key");
                Value::absent(self, key)
            },
            |relative| self.inner.get(&self.scope.join(&relative).to_string()),
        )
    }
}
