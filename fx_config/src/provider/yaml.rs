//! YAML support backed by `serde-saphyr`.

use figment::{
    Metadata, Profile, Provider,
    error::Kind,
    value::{Dict, Value as FigmentValue},
};
use serde_saphyr::Options;

/// Figment provider that parses an in-memory YAML document.
///
/// Booleans follow YAML 1.2, so `yes` and `on` stay strings.
#[derive(Debug, Clone)]
pub(super) struct SaphyrYaml {
    origin: String,
    contents: String,
}

impl SaphyrYaml {
    /// Construct a provider over `contents`, naming `origin` in errors.
    pub(super) fn string(origin: &str, contents: &str) -> Self {
        Self {
            origin: origin.to_owned(),
            contents: contents.to_owned(),
        }
    }

    /// Parse YAML contents into a figment `Value` using strict boolean semantics.
    fn parse_value(contents: &str) -> Result<FigmentValue, serde_saphyr::Error> {
        serde_saphyr::from_str_with_options(
            contents,
            Options {
                strict_booleans: true,
                ..Options::default()
            },
        )
    }
}

impl Provider for SaphyrYaml {
    fn metadata(&self) -> Metadata {
        Metadata::named(format!("Saphyr YAML ({})", self.origin))
    }

    fn data(&self) -> Result<std::collections::BTreeMap<Profile, Dict>, figment::Error> {
        if self.contents.trim().is_empty() {
            return Ok(Profile::Default.collect(Dict::new()));
        }
        let value = Self::parse_value(&self.contents).map_err(|err| {
            figment::Error::from(Kind::Message(format!(
                "failed to parse {}: {err}",
                self.origin
            )))
        })?;
        let actual = value.to_actual();
        let dict = value
            .into_dict()
            .ok_or_else(|| figment::Error::from(Kind::InvalidType(actual, "map".into())))?;
        Ok(Profile::Default.collect(dict))
    }
}
