//! Document-backed provider holding an immutable parsed tree.

use std::path::{Path, PathBuf};

use crate::{ConfigResult, ConfigResultExt, Node, Provider, Value};

use super::document::{self, DocumentFormat};

/// Provider answering lookups from a document parsed once at construction.
///
/// Construction fails if the document is malformed, so a broken source
/// aborts bootstrap instead of surfacing later as missing values.
///
/// # Examples
///
/// ```
/// use fx_config::{Provider, StaticProvider};
///
/// let provider = StaticProvider::from_yaml_str("inline", "foo:\n  bar:\n    baz: hello\n")?;
/// assert_eq!(provider.get("foo.bar.baz").expect_as::<String>(), "hello");
/// # Ok::<_, std::sync::Arc<fx_config::ConfigError>>(())
/// ```
#[derive(Clone, Debug)]
pub struct StaticProvider {
    name: String,
    tree: Node,
}

impl StaticProvider {
    /// Wrap an already-built tree.
    #[must_use]
    pub fn from_node(name: impl Into<String>, tree: Node) -> Self {
        Self {
            name: name.into(),
            tree,
        }
    }

    /// Parse an in-memory YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Parse`] when the document is malformed or
    /// its root is not a mapping.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(name: impl Into<String>, contents: &str) -> ConfigResult<Self> {
        Self::from_str_as(name.into(), DocumentFormat::Yaml, contents)
    }

    /// Parse an in-memory TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Parse`] when the document is malformed.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(name: impl Into<String>, contents: &str) -> ConfigResult<Self> {
        Self::from_str_as(name.into(), DocumentFormat::Toml, contents)
    }

    /// Parse an in-memory JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Parse`] when the document is malformed.
    #[cfg(feature = "json")]
    pub fn from_json_str(name: impl Into<String>, contents: &str) -> ConfigResult<Self> {
        Self::from_str_as(name.into(), DocumentFormat::Json, contents)
    }

    fn from_str_as(name: String, format: DocumentFormat, contents: &str) -> ConfigResult<Self> {
        let tree = document::parse(format, &name, contents).parse_context(&name)?;
        Ok(Self { name, tree })
    }

    /// Load a single file, choosing the parser from its extension
    /// (`.toml`, `.json`, otherwise YAML).
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::File`] when the file is missing, unreadable
    /// or malformed.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::from_files([path.as_ref()])
    }

    /// Load several files into one provider. Later files override earlier
    /// ones leaf by leaf.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::File`] for the first file that is missing,
    /// unreadable or malformed.
    pub fn from_files<I, P>(paths: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self::load(paths, true)
    }

    /// Like [`StaticProvider::from_files`] but skips files that do not exist.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::File`] for the first existing file that is
    /// unreadable or malformed.
    pub fn optional_files<I, P>(paths: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self::load(paths, false)
    }

    fn load<I, P>(paths: I, must_exist: bool) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut tree = Node::Mapping(std::collections::BTreeMap::new());
        let mut loaded: Vec<PathBuf> = Vec::new();
        for entry in paths {
            let path = entry.as_ref();
            if !must_exist && !path.is_file() {
                tracing::debug!(path = %path.display(), "skipping missing configuration file");
                continue;
            }
            tree.merge(document::load_file(path)?);
            loaded.push(path.to_path_buf());
        }
        let name = loaded
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Ok(Self { name, tree })
    }

    /// The parsed document.
    #[must_use]
    pub const fn tree(&self) -> &Node {
        &self.tree
    }
}

impl Provider for StaticProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Value<'_> {
        Value::lookup(self, key, |k| self.tree.find(k).cloned())
    }
}
