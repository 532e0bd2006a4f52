//! Priority-ordered resolution across a stack of providers.
//!
//! Providers are held in registration order; the provider registered last
//! has the highest priority. A scalar lookup is answered by the first
//! provider, from the top, that has the key. A lookup landing on a mapping
//! underlays the same mapping from every lower provider beneath it, so a
//! subtree read agrees with reading each of its leaves one by one.

use std::fmt;
use std::mem;
use std::sync::Arc;

use crate::{ConfigResult, Node, Provider, ScopedProvider, Value};

/// Merges an ordered provider stack into single-key answers.
///
/// Values returned by the resolver populate through the resolver, so every
/// field of a struct is resolved independently against the full stack.
///
/// # Examples
///
/// ```
/// use fx_config::{Provider, Resolver, StaticProvider};
///
/// let file = StaticProvider::from_yaml_str(
///     "file",
///     "stuff:\n  server:\n    port: 8081\n    greeting: Hello There!\n",
/// )?;
/// let overrides = StaticProvider::from_yaml_str("overrides", "stuff:\n  server:\n    port: 3000\n")?;
/// let resolver = Resolver::default().with_provider(file).with_provider(overrides);
///
/// assert_eq!(resolver.get("stuff.server.port").expect_as::<u16>(), 3000);
/// assert_eq!(resolver.get("stuff.server.greeting").expect_as::<String>(), "Hello There!");
/// # Ok::<_, std::sync::Arc<fx_config::ConfigError>>(())
/// ```
#[derive(Clone, Default)]
pub struct Resolver {
    providers: Vec<Arc<dyn Provider>>,
}

impl Resolver {
    /// Build a resolver from providers in registration order, lowest
    /// priority first.
    #[must_use]
    pub fn new<I>(providers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Provider>>,
    {
        Self {
            providers: providers.into_iter().collect(),
        }
    }

    /// Append `provider` above every provider already registered.
    #[must_use]
    pub fn with_provider(mut self, provider: impl Provider + 'static) -> Self {
        self.push(Arc::new(provider));
        self
    }

    pub(crate) fn push(&mut self, provider: Arc<dyn Provider>) {
        tracing::debug!(provider = provider.name(), "registered configuration provider");
        self.providers.push(provider);
    }

    /// Provider names, highest priority first.
    #[must_use]
    pub fn providers(&self) -> Vec<&str> {
        self.providers.iter().rev().map(|p| p.name()).collect()
    }

    /// Number of providers in the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the stack has no providers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// A view of the resolver confined to the subtree at `prefix`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::InvalidKey`] when `prefix` has an empty
    /// segment.
    pub fn scope(&self, prefix: &str) -> ConfigResult<ScopedProvider<&Self>> {
        ScopedProvider::new(prefix, self)
    }
}

impl Provider for Resolver {
    fn name(&self) -> &str {
        "resolver"
    }

    fn get(&self, key: &str) -> Value<'_> {
        let mut hits = self
            .providers
            .iter()
            .rev()
            .map(|provider| provider.get(key))
            .filter(Value::has_value);

        let Some(top) = hits.next() else {
            tracing::debug!(key, "no provider has configuration key");
            return Value::absent(self, key);
        };
        tracing::debug!(key, provider = top.source(), "resolved configuration key");
        if !top.node().is_some_and(Node::is_mapping) {
            return top.through(self);
        }

        // Provenance is the highest provider contributing a non-empty mapping.
        let mut source = top.source().unwrap_or_else(|| self.name()).to_owned();
        let mut merged = top.into_node().unwrap_or_default();
        for lower in hits {
            let lower_source = lower.source().map(str::to_owned);
            if let Some(mut below @ Node::Mapping(_)) = lower.into_node() {
                if merged.is_empty_mapping() && !below.is_empty_mapping() {
                    source = lower_source.unwrap_or_else(|| self.name().to_owned());
                }
                below.merge(mem::take(&mut merged));
                merged = below;
            }
        }
        Value::present(self, key, &source, merged)
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("providers", &self.providers())
            .finish()
    }
}

#[cfg(test)]
mod tests;
