//! Helpers shared by the integration tests.

use anyhow::{Result, anyhow};

/// Run `f` inside a [`figment::Jail`] with a clean environment, converting
/// failures into `anyhow` errors.
pub fn with_jail<F>(f: F) -> Result<()>
where
    F: FnOnce(&mut figment::Jail) -> Result<()>,
{
    figment::Jail::try_with(|j| {
        j.clear_env();
        f(j).map_err(|err| figment::Error::from(err.to_string()))
    })
    .map_err(|err| anyhow!(err))
}
