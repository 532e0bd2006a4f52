//! Dotted configuration keys and the environment variable naming contract.
//!
//! A key such as `stuff.server.port` addresses a node in a nested tree. The
//! empty key ([`ROOT`]) addresses the whole tree. Segments are
//! case-sensitive, must be non-empty, and cannot contain an escaped dot.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::{ConfigError, ConfigResult};

/// Key addressing the entire resolved tree.
pub const ROOT: &str = "";

/// Variable prefix read by [`EnvProvider::new`](crate::EnvProvider::new).
pub const ENV_PREFIX: &str = "CONFIG";

/// Separator placed between the prefix and each key segment.
pub const ENV_SEPARATOR: &str = "__";

/// A validated dot-delimited key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Key {
    segments: Vec<String>,
}

impl Key {
    /// The key addressing the whole tree.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Parse a dotted key, rejecting empty segments.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidKey`] when any segment is empty, as in
    /// `a..b` or `.a`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fx_config::Key;
    /// let key = Key::parse("foo.bar.baz")?;
    /// assert_eq!(key.segments().collect::<Vec<_>>(), ["foo", "bar", "baz"]);
    /// assert!(Key::parse("foo..baz").is_err());
    /// # Ok::<_, std::sync::Arc<fx_config::ConfigError>>(())
    /// ```
    pub fn parse(raw: &str) -> ConfigResult<Self> {
        if raw == ROOT {
            return Ok(Self::root());
        }
        let segments = raw
            .split('.')
            .map(|segment| {
                if segment.is_empty() {
                    Err(Arc::new(ConfigError::InvalidKey {
                        key: raw.to_owned(),
                        reason: "key segments must be non-empty",
                    }))
                } else {
                    Ok(segment.to_owned())
                }
            })
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(Self { segments })
    }

    /// Whether this key addresses the whole tree.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over the key's segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Append `other` beneath this key.
    #[must_use]
    pub fn join(&self, other: &Self) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl FromStr for Key {
    type Err = Arc<ConfigError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Environment variable name that overrides `key` under `prefix`.
///
/// The mapping is part of the deployment contract: `a.b.c` under the
/// `CONFIG` prefix is always `CONFIG__a__b__c`.
///
/// # Examples
///
/// ```
/// use fx_config::{ENV_PREFIX, Key, env_var_name};
/// let key = Key::parse("stuff.server.port")?;
/// assert_eq!(env_var_name(ENV_PREFIX, &key), "CONFIG__stuff__server__port");
/// # Ok::<_, std::sync::Arc<fx_config::ConfigError>>(())
/// ```
#[must_use]
pub fn env_var_name(prefix: &str, key: &Key) -> String {
    let mut name = prefix.to_owned();
    for segment in key.segments() {
        name.push_str(ENV_SEPARATOR);
        name.push_str(segment);
    }
    name
}

#[cfg(test)]
mod tests;
