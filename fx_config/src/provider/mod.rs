//! The provider capability and its reference implementations.
//!
//! A [`Provider`] answers dotted-key lookups from one configuration source.
//! Providers are read-only once constructed, so a provider stack can be read
//! from many threads without locking.

mod document;
mod env;
mod scoped;
mod static_provider;
#[cfg(feature = "yaml")]
mod yaml;

use std::sync::Arc;

pub use env::EnvProvider;
pub use scoped::ScopedProvider;
pub use static_provider::StaticProvider;

use crate::Value;

/// Anything that can answer configuration lookups.
///
/// Looking up a partial path (`foo.bar` when only `foo.bar.baz` exists) must
/// return a present composite value for the subtree rather than an absent
/// leaf.
pub trait Provider: Send + Sync {
    /// Identity of the source, reported as value provenance.
    fn name(&self) -> &str;

    /// Look up `key`, returning an absent [`Value`] when the source has no
    /// data for it.
    fn get(&self, key: &str) -> Value<'_>;
}

impl<P: Provider + ?Sized> Provider for &P {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &str) -> Value<'_> {
        (**self).get(key)
    }
}

impl<P: Provider + ?Sized> Provider for Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &str) -> Value<'_> {
        (**self).get(key)
    }
}

impl<P: Provider + ?Sized> Provider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &str) -> Value<'_> {
        (**self).get(key)
    }
}

/// A provider that never has a value.
#[derive(Clone, Copy, Debug, Default)]
pub struct NopProvider;

impl Provider for NopProvider {
    fn name(&self) -> &str {
        "nop"
    }

    fn get(&self, key: &str) -> Value<'_> {
        Value::absent(self, key)
    }
}
