use anyhow::Context;
use claimlens_core::config::Config;
use std::path::Path;

/// Resolve the effective configuration.
///
/// Priority, highest first:
/// 1. `--backend-url` flag / `CLAIMLENS_BACKEND_URL` env var
/// 2. The file named by `--config` / `CLAIMLENS_CONFIG`
/// 3. Built-in defaults
pub fn resolve_config(path: Option<&Path>, backend_url: Option<&str>) -> anyhow::Result<Config> {
    let mut config = Config::load_or_default(path).context("failed to load config")?;
    if let Some(url) = backend_url {
        config.backend.base_url = url.to_string();
    }
    Ok(config)
}
