mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use thumbforge_common::Error;

/// Environment variable overriding `buckets.source`.
pub const ENV_SOURCE_BUCKET: &str = "THUMBFORGE_SOURCE_BUCKET";
/// Environment variable overriding `buckets.destination`.
pub const ENV_DESTINATION_BUCKET: &str = "THUMBFORGE_DESTINATION_BUCKET";
/// Environment variable overriding `local.root`.
pub const ENV_LOCAL_ROOT: &str = "THUMBFORGE_LOCAL_ROOT";

/// Load configuration from a TOML file, then apply environment overrides
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env_overrides(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations, or build it from the environment alone
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./thumbforge.toml",
        "~/.config/thumbforge/config.toml",
        "/etc/thumbforge/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    // Lambda deployments normally have no file, only environment variables
    let mut config = Config::default();
    apply_env_overrides(&mut config);
    validate_config(&config)?;
    Ok(config)
}

/// Apply `THUMBFORGE_*` overrides from the process environment.
pub fn apply_env_overrides(config: &mut Config) {
    apply_overrides(config, |name| std::env::var(name).ok());
}

fn apply_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(source) = lookup(ENV_SOURCE_BUCKET) {
        config.buckets.source = Some(source).filter(|s| !s.is_empty());
    }
    if let Some(destination) = lookup(ENV_DESTINATION_BUCKET) {
        config.buckets.destination = destination;
    }
    if let Some(root) = lookup(ENV_LOCAL_ROOT) {
        config.local.root = PathBuf::from(shellexpand::tilde(&root).as_ref());
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> thumbforge_common::Result<()> {
    if config.buckets.destination.trim().is_empty() {
        return Err(Error::config(format!(
            "Destination bucket is not set (buckets.destination or {})",
            ENV_DESTINATION_BUCKET
        )));
    }

    if config.buckets.source.as_deref() == Some(config.buckets.destination.as_str()) {
        return Err(Error::config(format!(
            "Source and destination bucket are both '{}'; resized images would trigger the handler again",
            config.buckets.destination
        )));
    }

    Ok(())
}
