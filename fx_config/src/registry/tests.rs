//! Tests for two-phase bootstrap ordering.

use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow, ensure};

use super::ProviderRegistry;
use crate::{ConfigError, Node, Provider, ProviderPhase, StaticProvider};

fn provider(name: &str, pairs: Vec<(&str, Node)>) -> StaticProvider {
    StaticProvider::from_node(name, Node::from_iter(pairs))
}

#[test]
fn statics_are_queryable_before_dynamics_are_built() -> Result<()> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let record = Arc::clone(&seen);
    let registry = ProviderRegistry::new()
        .register_static(|| Ok(provider("file", vec![("endpoint", Node::from("kv.local"))])))
        .register_static(|| Ok(provider("env", vec![("endpoint", Node::from("kv.override"))])))
        .finalize_static()?;
    ensure!(registry.bootstrap().providers() == ["env", "file"]);

    let resolver = registry
        .register_dynamic(move |bootstrap| {
            let endpoint = bootstrap.get("endpoint").coerce::<String>()?;
            record
                .lock()
                .map_err(|_| ConfigError::not_found("lock"))?
                .push(bootstrap.providers().len());
            Ok(provider("remote", vec![("endpoint", Node::from(endpoint))]))
        })
        .register_dynamic(|bootstrap| {
            // Dynamic factories see only the static set.
            let names = bootstrap.providers().join(",");
            Ok(provider("second", vec![("seen", Node::from(names))]))
        })
        .finalize()?;

    ensure!(resolver.providers() == ["second", "remote", "env", "file"]);
    ensure!(resolver.get("endpoint").try_as::<String>().as_deref() == Some("kv.override"));
    ensure!(resolver.get("endpoint").source() == Some("remote"));
    ensure!(resolver.get("seen").try_as::<String>().as_deref() == Some("env,file"));
    let recorded = seen.lock().map_err(|_| anyhow!("poisoned"))?.clone();
    ensure!(recorded == [2]);
    Ok(())
}

#[test]
fn static_failure_aborts_bootstrap() -> Result<()> {
    let err = ProviderRegistry::new()
        .register_static(|| Ok(provider("file", vec![])))
        .register_static(|| -> crate::ConfigResult<StaticProvider> {
            Err(ConfigError::not_found("broken"))
        })
        .finalize_static()
        .err()
        .ok_or_else(|| anyhow!("bootstrap should fail"))?;
    ensure!(
        matches!(
            &*err,
            ConfigError::Bootstrap { phase: ProviderPhase::Static, index: 1, .. }
        ),
        "{err}"
    );
    Ok(())
}

#[test]
fn dynamic_failure_reports_its_position() -> Result<()> {
    let err = ProviderRegistry::new()
        .register_static(|| Ok(provider("file", vec![])))
        .finalize_static()?
        .register_dynamic(|bootstrap| {
            bootstrap.get("missing.endpoint").coerce::<String>()?;
            Ok(provider("never", vec![]))
        })
        .finalize()
        .err()
        .ok_or_else(|| anyhow!("bootstrap should fail"))?;
    let ConfigError::Bootstrap { phase, index, source } = &*err else {
        return Err(anyhow!("unexpected error: {err}"));
    };
    ensure!(*phase == ProviderPhase::Dynamic && *index == 0);
    ensure!(source.is_not_found());
    Ok(())
}

#[test]
fn empty_registry_yields_empty_resolver() -> Result<()> {
    let resolver = ProviderRegistry::new().finalize_static()?.finalize()?;
    ensure!(resolver.is_empty());
    ensure!(!resolver.get(crate::ROOT).has_value());
    Ok(())
}
