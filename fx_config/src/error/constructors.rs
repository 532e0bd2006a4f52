//! Constructors and accessors for `ConfigError`.

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use super::{ConfigError, FieldFailures, ProviderPhase};

impl ConfigError {
    /// Construct a [`ConfigError::File`] for a configuration path.
    #[must_use]
    pub fn file(path: &Path, err: impl Into<Box<dyn Error + Send + Sync>>) -> Arc<Self> {
        Arc::new(Self::File {
            path: path.to_path_buf(),
            source: err.into(),
        })
    }

    /// Construct a [`ConfigError::Parse`] from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use fx_config::ConfigError;
    /// let err = ConfigError::parse("inline", figment::Error::from("boom"));
    /// assert!(matches!(&*err, ConfigError::Parse { .. }));
    /// ```
    #[must_use]
    pub fn parse(origin: impl Into<String>, source: figment::Error) -> Arc<Self> {
        Arc::new(Self::Parse {
            origin: origin.into(),
            source: Box::new(source),
        })
    }

    /// Construct a [`ConfigError::NotFound`] for `key`.
    #[must_use]
    pub fn not_found(key: &str) -> Arc<Self> {
        Arc::new(Self::NotFound {
            key: key.to_owned(),
        })
    }

    /// Construct a [`ConfigError::TypeMismatch`] for `key`.
    #[must_use]
    pub fn mismatch(key: &str, expected: &'static str, found: &'static str) -> Arc<Self> {
        Arc::new(Self::TypeMismatch {
            key: key.to_owned(),
            expected,
            found,
        })
    }

    pub(crate) fn population(key: &str, failures: Vec<Arc<Self>>) -> Arc<Self> {
        Arc::new(Self::Population {
            key: key.to_owned(),
            failures: FieldFailures::new(failures),
        })
    }

    pub(crate) fn bootstrap(phase: ProviderPhase, index: usize, source: Arc<Self>) -> Arc<Self> {
        Arc::new(Self::Bootstrap {
            phase,
            index,
            source,
        })
    }

    /// Returns `true` when the error reports a key absent from every provider.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` when the error reports data of the wrong shape.
    #[must_use]
    pub const fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    /// The configuration key the error refers to, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::InvalidKey { key, .. }
            | Self::NotFound { key }
            | Self::TypeMismatch { key, .. }
            | Self::Population { key, .. } => Some(key.as_str()),
            _ => None,
        }
    }
}
