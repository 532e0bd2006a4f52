//! Two-phase provider bootstrap.
//!
//! Static providers are constructed first and become queryable through a
//! bootstrap [`Resolver`]. Dynamic providers are then constructed with that
//! resolver, so they can read their own settings (endpoints, credentials)
//! from the static set. The phases are separate types, so a dynamic provider
//! cannot be registered before the static set is final.
//!
//! ```
//! use fx_config::{Provider, ProviderRegistry, StaticProvider};
//!
//! let resolver = ProviderRegistry::new()
//!     .register_static(|| StaticProvider::from_yaml_str("file", "kv:\n  prefix: remote\n"))
//!     .finalize_static()?
//!     .register_dynamic(|bootstrap| {
//!         let prefix = bootstrap.get("kv.prefix").coerce::<String>()?;
//!         StaticProvider::from_yaml_str(prefix, "greeting: hi\n")
//!     })
//!     .finalize()?;
//!
//! assert_eq!(resolver.providers(), ["remote", "file"]);
//! assert_eq!(resolver.get("greeting").source(), Some("remote"));
//! # Ok::<_, std::sync::Arc<fx_config::ConfigError>>(())
//! ```

use std::fmt;
use std::sync::Arc;

use crate::{ConfigError, ConfigResult, Provider, ProviderPhase, Resolver};

type StaticFactory = Box<dyn FnOnce() -> ConfigResult<Arc<dyn Provider>>>;
type DynamicFactory = Box<dyn FnOnce(&Resolver) -> ConfigResult<Arc<dyn Provider>>>;

/// Registry accepting static provider factories.
///
/// Factories run in registration order when
/// [`ProviderRegistry::finalize_static`] is called; later registrations have
/// higher priority.
#[derive(Default)]
pub struct ProviderRegistry {
    statics: Vec<StaticFactory>,
}

impl ProviderRegistry {
    /// An empty registry in the static phase.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            statics: Vec::new(),
        }
    }

    /// Register a static provider factory above those already registered.
    #[must_use]
    pub fn register_static<P, F>(mut self, factory: F) -> Self
    where
        P: Provider + 'static,
        F: FnOnce() -> ConfigResult<P> + 'static,
    {
        self.statics.push(Box::new(move || {
            factory().map(|provider| Arc::new(provider) as Arc<dyn Provider>)
        }));
        self
    }

    /// Construct every static provider and move to the dynamic phase.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Bootstrap`] wrapping the first factory failure.
    pub fn finalize_static(self) -> ConfigResult<DynamicRegistry> {
        tracing::debug!(count = self.statics.len(), "constructing static providers");
        let mut bootstrap = Resolver::default();
        for (index, factory) in self.statics.into_iter().enumerate() {
            let provider = factory()
                .map_err(|err| ConfigError::bootstrap(ProviderPhase::Static, index, err))?;
            bootstrap.push(provider);
        }
        tracing::debug!(providers = ?bootstrap.providers(), "static providers ready");
        Ok(DynamicRegistry {
            bootstrap,
            dynamics: Vec::new(),
        })
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("statics", &self.statics.len())
            .finish()
    }
}

/// Registry accepting dynamic provider factories once the static set is
/// queryable.
pub struct DynamicRegistry {
    bootstrap: Resolver,
    dynamics: Vec<DynamicFactory>,
}

impl DynamicRegistry {
    /// Resolver over the static providers only.
    #[must_use]
    pub const fn bootstrap(&self) -> &Resolver {
        &self.bootstrap
    }

    /// Register a dynamic provider factory. It receives the static-only
    /// resolver and ranks above every static provider.
    #[must_use]
    pub fn register_dynamic<P, F>(mut self, factory: F) -> Self
    where
        P: Provider + 'static,
        F: FnOnce(&Resolver) -> ConfigResult<P> + 'static,
    {
        self.dynamics.push(Box::new(move |bootstrap: &Resolver| {
            factory(bootstrap).map(|provider| Arc::new(provider) as Arc<dyn Provider>)
        }));
        self
    }

    /// Construct every dynamic provider and return the full resolver.
    ///
    /// Dynamic factories only ever see the static providers, not dynamic
    /// providers registered before them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Bootstrap`] wrapping the first factory failure.
    pub fn finalize(self) -> ConfigResult<Resolver> {
        tracing::debug!(count = self.dynamics.len(), "constructing dynamic providers");
        let mut constructed = Vec::with_capacity(self.dynamics.len());
        for (index, factory) in self.dynamics.into_iter().enumerate() {
            let provider = factory(&self.bootstrap)
                .map_err(|err| ConfigError::bootstrap(ProviderPhase::Dynamic, index, err))?;
            constructed.push(provider);
        }
        let mut resolver = self.bootstrap;
        for provider in constructed {
            resolver.push(provider);
        }
        tracing::debug!(providers = ?resolver.providers(), "configuration providers ready");
        Ok(resolver)
    }
}

impl fmt::Debug for DynamicRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicRegistry")
            .field("bootstrap", &self.bootstrap)
            .field("dynamics", &self.dynamics.len())
            .finish()
    }
}

#[cfg(test)]
mod tests;
