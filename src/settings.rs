//! Loading a [`GameConfig`] from disk
//!
//! Config files are JSON. Any field left out keeps its default, so a file can
//! override just the grid size or just the obstacle settings.

use anyhow::{Context, Result};
use std::path::Path;

use crate::game::GameConfig;

/// Read and validate a config file
pub fn load_config(path: &Path) -> Result<GameConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {:?}", path))?;
    let config: GameConfig = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse config in {:?}", path))?;
    config
        .validate()
        .with_context(|| format!("Invalid config in {:?}", path))?;
    Ok(config)
}

/// Write `config` as pretty JSON, creating parent directories
pub fn save_config(config: &GameConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    let json = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write config to {:?}", path))?;
    Ok(())
}

/// Save the settings a run would use, so they can be passed back with `--config`
///
/// Nothing is written when `config` would be rejected on load.
pub fn export_config(config: &GameConfig, path: &Path) -> Result<()> {
    config
        .validate()
        .context("Refusing to write an invalid config")?;
    save_config(config, path)
}
