//! Primary error enum for configuration resolution.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use super::FieldFailures;

/// Bootstrap phase a provider factory was registered in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProviderPhase {
    /// Providers constructed before anything else.
    Static,
    /// Providers constructed from values resolved by the static set.
    Dynamic,
}

impl fmt::Display for ProviderPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => f.write_str("static"),
            Self::Dynamic => f.write_str("dynamic"),
        }
    }
}

/// Errors that can occur while building providers or reading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A configuration file could not be read or parsed.
    #[error("configuration file error in '{path}': {source}")]
    File {
        /// Path that triggered the failure.
        path: std::path::PathBuf,
        /// Underlying error reported by the reader or parser.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// In-memory document or environment data could not be parsed.
    #[error("failed to parse configuration from {origin}: {source}")]
    Parse {
        /// Human-readable name of the data source.
        origin: String,
        /// Parser failure.
        #[source]
        source: Box<figment::Error>,
    },

    /// A dotted key contains an empty segment.
    #[error("invalid key '{key}': {reason}")]
    InvalidKey {
        /// Key as supplied by the caller.
        key: String,
        /// Why the key was rejected.
        reason: &'static str,
    },

    /// No provider in the stack supplied the key.
    #[error("no configuration value found for '{key}'")]
    NotFound {
        /// Key that was looked up.
        key: String,
    },

    /// A value was found but cannot be read as the requested type.
    #[error("configuration value for '{key}' is {found}, which cannot be read as {expected}")]
    TypeMismatch {
        /// Key that was looked up.
        key: String,
        /// Name of the requested type.
        expected: &'static str,
        /// Kind of the data that was found.
        found: &'static str,
    },

    /// One or more fields could not be populated.
    #[error("failed to populate '{key}':\n{failures}")]
    Population {
        /// Parent key the target was populated from.
        key: String,
        /// Every field failure, in field order.
        failures: FieldFailures,
    },

    /// A registered provider factory failed during bootstrap.
    #[error("failed to construct {phase} provider #{index}: {source}")]
    Bootstrap {
        /// Phase the factory was registered in.
        phase: ProviderPhase,
        /// Zero-based registration position within the phase.
        index: usize,
        /// Error returned by the factory.
        #[source]
        source: Arc<ConfigError>,
    },
}
