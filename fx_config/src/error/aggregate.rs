//! Collection of per-field failures reported by struct population.

use std::{error::Error, fmt, sync::Arc};

use super::ConfigError;

/// Field failures gathered while populating a single target.
///
/// Population continues past a failing field, so every unresolved or
/// mismatched field is reported together. Display groups them: one line
/// naming every absent key, then one line per mismatched field.
///
/// ```text
/// absent: server.port, server.host
/// mismatched: server.tls is a string, expected a boolean
/// ```
#[derive(Debug, Default)]
pub struct FieldFailures(Vec<Arc<ConfigError>>);

impl FieldFailures {
    /// Create a collection from a vector of errors.
    #[must_use]
    pub const fn new(errors: Vec<Arc<ConfigError>>) -> Self {
        Self(errors)
    }

    /// Iterate over the contained errors in field order.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = &ConfigError> {
        self.0.iter().map(Arc::as_ref)
    }

    /// Number of failed fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field failed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys of the failed fields, in field order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.iter().filter_map(ConfigError::key).collect()
    }

    /// Keys no provider supplied, including malformed field keys.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn absent_keys(&self) -> impl Iterator<Item = &str> {
        self.iter().filter_map(|err| match err {
            ConfigError::NotFound { key } | ConfigError::InvalidKey { key, .. } => {
                Some(key.as_str())
            }
            _ => None,
        })
    }

    /// Failures where data was found but could not be read as the field type.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn mismatched(&self) -> impl Iterator<Item = &ConfigError> {
        self.iter().filter(|err| err.is_type_mismatch())
    }
}

impl fmt::Display for FieldFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let absent = self.absent_keys().collect::<Vec<_>>();
        let mut separator = "";
        if !absent.is_empty() {
            write!(f, "absent: {}", absent.join(", "))?;
            separator = "\n";
        }
        for err in self.iter() {
            let line = match err {
                ConfigError::NotFound { .. } | ConfigError::InvalidKey { .. } => continue,
                ConfigError::TypeMismatch {
                    key,
                    expected,
                    found,
                } => format!("mismatched: {key} is {found}, expected {expected}"),
                other => other.to_string(),
            };
            write!(f, "{separator}{line}")?;
            separator = "\n";
        }
        Ok(())
    }
}

impl Error for FieldFailures {}
