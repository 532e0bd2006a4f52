//! Extensions for attaching source context to parser failures.
//!
//! Parsers report [`figment::Error`] without knowing which document they were
//! reading. These helpers turn them into the crate's
//! [`ConfigResult<T>`](crate::ConfigResult) alias
//! (`Result<T, Arc<ConfigError>>`) while recording where the data came from.
//!
//! # Examples
//!
//! ```
//! use fx_config::{ConfigError, ConfigResultExt};
//!
//! let failed: Result<(), figment::Error> = Err(figment::Error::from("boom"));
//! let err = failed.parse_context("inline yaml").unwrap_err();
//! assert!(matches!(&*err, ConfigError::Parse { .. }));
//! ```

use std::path::Path;

use crate::{ConfigError, ConfigResult};

/// Extension for mapping `Result<T, figment::Error>` into `ConfigResult<T>`.
pub trait ConfigResultExt<T> {
    /// Convert a parser failure into [`ConfigError::Parse`] naming `origin`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError::Parse`] wrapped in `Arc` when the input is `Err`.
    fn parse_context(self, origin: &str) -> ConfigResult<T>;

    /// Convert a parser failure into [`ConfigError::File`] for `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError::File`] wrapped in `Arc` when the input is `Err`.
    fn file_context(self, path: &Path) -> ConfigResult<T>;
}

impl<T> ConfigResultExt<T> for Result<T, figment::Error> {
    fn parse_context(self, origin: &str) -> ConfigResult<T> {
        self.map_err(|e| ConfigError::parse(origin, e))
    }

    fn file_context(self, path: &Path) -> ConfigResult<T> {
        self.map_err(|e| ConfigError::file(path, e))
    }
}
