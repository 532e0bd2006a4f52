//! Provider backed by the live process environment.

use std::collections::BTreeMap;

use figment::providers::Env;
use figment::util::nest;
use figment::value::Value as FigmentValue;

use crate::key::{ENV_PREFIX, ENV_SEPARATOR};
use crate::{Key, Node, Provider, Value, env_var_name};

/// Provider answering lookups from `PREFIX__a__b__c` environment variables.
///
/// The environment is read on every lookup, so there is nothing to refresh
/// when a variable changes. Prefix and segments are matched case-sensitively
/// and values stay raw strings until a caller reads them, so `02134` is still
/// `02134` when read as a `String`.
///
/// A leaf key is answered from its own variable first. Only when that
/// variable is unset are deeper variables gathered into a mapping, so
/// `CONFIG__stuff=off` does not hide `CONFIG__stuff__server__port`.
///
/// # Examples
///
/// ```
/// use fx_config::{EnvProvider, Provider};
///
/// figment::Jail::expect_with(|jail| {
///     jail.set_env("CONFIG__stuff__server__port", "7000");
///     let env = EnvProvider::new();
///     assert_eq!(env.get("stuff.server.port").expect_as::<u16>(), 7000);
///     assert_eq!(env.get("stuff.server").child_keys(), ["port"]);
///     Ok(())
/// });
/// ```
#[derive(Clone, Debug)]
pub struct EnvProvider {
    prefix: String,
    name: String,
}

impl EnvProvider {
    /// Read variables under the default `CONFIG` prefix.
    #[must_use]
    pub fn new() -> Self {
        Self::prefixed(ENV_PREFIX)
    }

    /// Read variables under `prefix`, so `a.b` maps to `{prefix}__a__b`.
    #[must_use]
    pub fn prefixed(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_owned(),
            name: format!("env({prefix})"),
        }
    }

    /// The variable prefix, without the trailing separator.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn read_leaf(&self, key: &Key) -> Option<Node> {
        if key.is_root() {
            return None;
        }
        std::env::var(env_var_name(&self.prefix, key))
            .ok()
            .map(Node::String)
    }

    /// Gather every variable strictly beneath `key` into a mapping.
    ///
    /// Shallower variables are applied first, so where a scalar and a deeper
    /// variable collide the mapping survives.
    fn read_subtree(&self, key: &Key) -> Option<Node> {
        let head = format!("{}{ENV_SEPARATOR}", env_var_name(&self.prefix, key));
        let mut entries: Vec<(Key, String)> = Env::raw()
            .lowercase(false)
            .iter()
            .filter_map(|(name, raw)| {
                let rest = name.as_str().strip_prefix(head.as_str())?;
                relative_key(rest).map(|relative| (relative, raw))
            })
            .collect();
        if entries.is_empty() {
            return None;
        }
        entries.sort_by_key(|(relative, _)| relative.segments().count());

        let mut tree = Node::Mapping(BTreeMap::new());
        for (relative, raw) in entries {
            tree.merge(Node::from(nest(
                &relative.to_string(),
                FigmentValue::from(raw),
            )));
        }
        Some(tree)
    }
}

/// Turn the part of a variable name after the prefix into a key, skipping
/// names with empty segments or dots.
fn relative_key(rest: &str) -> Option<Key> {
    if rest.is_empty() || rest.contains('.') {
        return None;
    }
    let dotted = rest.split(ENV_SEPARATOR).collect::<Vec<_>>().join(".");
    Key::parse(&dotted)
        .inspect_err(|err| {
            tracing::debug!(variable = rest, error = %err, "ignoring malformed environment variable");
        })
        .ok()
}

impl Default for EnvProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for EnvProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Value<'_> {
        Value::lookup(self, key, |k| {
            self.read_leaf(k).or_else(|| self.read_subtree(k))
        })
    }
}
