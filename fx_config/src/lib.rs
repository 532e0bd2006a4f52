//! Layered configuration resolution.
//!
//! `fx_config` combines an ordered stack of configuration [`Provider`]s
//! (documents, the process environment, sources constructed at bootstrap)
//! into one logical tree. Lookups use dotted keys such as
//! `stuff.server.port`; the provider registered last wins, leaf by leaf, so
//! an environment variable overriding one field leaves its siblings to the
//! file beneath it.
//!
//! ```
//! use fx_config::{EnvProvider, Populate, Provider, Resolver, StaticProvider};
//!
//! #[derive(Debug, Default, Populate)]
//! struct Server {
//!     pub port: u16,
//!     pub greeting: String,
//! }
//!
//! let file = StaticProvider::from_yaml_str(
//!     "config.yaml",
//!     "stuff:\n  server:\n    port: 8081\n    greeting: Hello There!\n",
//! )?;
//! let resolver = Resolver::default()
//!     .with_provider(file)
//!     .with_provider(EnvProvider::new());
//!
//! let mut server = Server::default();
//! resolver.get("stuff.server").populate(&mut server)?;
//! assert_eq!(server.greeting, "Hello There!");
//! # Ok::<_, std::sync::Arc<fx_config::ConfigError>>(())
//! ```

extern crate self as fx_config;

mod error;
mod key;
mod node;
mod populate;
mod provider;
mod registry;
mod resolver;
mod result_ext;
mod value;

use std::sync::Arc;

pub use error::{ConfigError, FieldFailures, ProviderPhase};
pub use fx_config_macros::Populate;
pub use key::{ENV_PREFIX, ENV_SEPARATOR, Key, ROOT, env_var_name};
pub use node::Node;
pub use populate::{Field, FieldSpec, Populate, Populator};
pub use provider::{EnvProvider, NopProvider, Provider, ScopedProvider, StaticProvider};
pub use registry::{DynamicRegistry, ProviderRegistry};
pub use resolver::Resolver;
pub use result_ext::ConfigResultExt;
pub use value::{FromNode, Value};

/// Result type returned by fallible configuration operations.
///
/// Errors are shared so one bootstrap failure can be handed to several
/// consumers.
pub type ConfigResult<T> = Result<T, Arc<ConfigError>>;
