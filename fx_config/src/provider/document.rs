//! Format-specific parsing of configuration documents into [`Node`] trees.
//!
//! Document syntax is handled entirely by figment providers; this module only
//! selects the provider and converts the resulting dictionary.

#[cfg(feature = "json")]
use figment::providers::Json;
#[cfg(feature = "toml")]
use figment::providers::Toml;
#[cfg(any(feature = "json", feature = "toml"))]
use figment::providers::Format;
use figment::{Profile, Provider as FigmentProvider};

use std::path::Path;

use crate::{ConfigError, ConfigResult, ConfigResultExt, Node};

#[cfg(feature = "yaml")]
use super::yaml::SaphyrYaml;

/// Collect the default-profile data of a figment provider as a mapping node.
pub(super) fn collect<P: FigmentProvider>(provider: &P) -> Result<Node, figment::Error> {
    let mut data = provider.data()?;
    let dict = data.remove(&Profile::Default).unwrap_or_default();
    Ok(Node::from_dict(dict))
}

/// Document formats understood by [`crate::StaticProvider`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum DocumentFormat {
    Yaml,
    Toml,
    Json,
}

impl DocumentFormat {
    /// Select a format from the file extension, defaulting to YAML.
    pub(super) fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("toml") => Self::Toml,
            Some("json") => Self::Json,
            _ => Self::Yaml,
        }
    }

    #[cfg(not(all(feature = "yaml", feature = "toml", feature = "json")))]
    const fn feature(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }
}

/// Parse `data` in `format`, naming `origin` in parser errors.
pub(super) fn parse(
    format: DocumentFormat,
    origin: &str,
    data: &str,
) -> Result<Node, figment::Error> {
    match format {
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => collect(&SaphyrYaml::string(origin, data)),
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => collect(&Toml::string(data)),
        #[cfg(feature = "json")]
        DocumentFormat::Json => collect(&Json::string(data)),
        #[cfg(not(all(feature = "yaml", feature = "toml", feature = "json")))]
        disabled => Err(figment::Error::from(format!(
            "{} support disabled while reading {origin}: enable the '{}' feature",
            disabled.feature(),
            disabled.feature()
        ))),
    }
}

/// Read and parse the file at `path`, choosing the format by extension.
///
/// # Errors
///
/// Returns [`ConfigError::File`] when the file cannot be read or parsed.
pub(super) fn load_file(path: &Path) -> ConfigResult<Node> {
    let data = std::fs::read_to_string(path).map_err(|e| ConfigError::file(path, e))?;
    let origin = path.display().to_string();
    parse(DocumentFormat::from_path(path), &origin, &data).file_context(path)
}
