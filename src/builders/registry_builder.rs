//! Builders to construct a lane registry from configuration.

use std::sync::Arc;

use anyhow::{anyhow, Context};

use crate::config::RegistryConfig;
use crate::core::{AppResult, AuditSink, LaneError, LaneRegistry};
use crate::runtime::TokioSpawner;

/// Build a registry and eagerly create every lane named in the configuration.
///
/// Lanes listed under `lanes` exist from the start; whether they survive
/// draining is governed by their own `preserve_when_empty`.
pub fn build_registry(
    cfg: &RegistryConfig,
    spawner: TokioSpawner,
    audit: Option<Arc<dyn AuditSink>>,
) -> Result<LaneRegistry, LaneError> {
    let registry = LaneRegistry::with_config(spawner, cfg.clone(), audit)?;

    let mut names: Vec<&String> = cfg.lanes.keys().collect();
    names.sort();
    for name in names {
        if name == registry.default_lane_name() {
            continue;
        }
        registry.add_lane(name)?;
    }
    tracing::info!(lanes = registry.len(), "lane registry built");
    Ok(registry)
}

/// Build a registry from `OVERLAY_LANES_*` environment variables, loading a `.env` file if present.
///
/// # Errors
///
/// Fails when a variable does not parse or the resulting configuration is invalid.
pub fn build_registry_from_env(
    spawner: TokioSpawner,
    audit: Option<Arc<dyn AuditSink>>,
) -> AppResult<LaneRegistry> {
    let cfg = RegistryConfig::from_env()
        .map_err(|e| anyhow!(e))
        .context("reading lane registry configuration from the environment")?;
    build_registry(&cfg, spawner, audit).context("building lane registry")
}

/// Build a registry from configuration read through `lookup`.
///
/// # Errors
///
/// Fails when a value does not parse or the resulting configuration is invalid.
pub fn build_registry_from_lookup<F>(
    lookup: F,
    spawner: TokioSpawner,
    audit: Option<Arc<dyn AuditSink>>,
) -> AppResult<LaneRegistry>
where
    F: Fn(&str) -> Option<String>,
{
    let cfg = RegistryConfig::from_lookup(lookup)
        .map_err(|e| anyhow!(e))
        .context("reading lane registry configuration")?;
    build_registry(&cfg, spawner, audit).context("building lane registry")
}
