//! Common paths for Astra data storage
//!
//! All Astra data is stored under ~/.config/astra/ on all platforms:
//! - config.toml - User configuration
//! - astra.sqlite - Database (when `storage = "sqlite"`)

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the Astra data directory (~/.config/astra/)
pub fn astra_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let astra_dir = home.join(".config").join("astra");
    fs::create_dir_all(&astra_dir).context("Failed to create astra directory")?;
    Ok(astra_dir)
}

/// Get the config file path (~/.config/astra/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(astra_dir()?.join("config.toml"))
}

/// Get the database file path (~/.config/astra/astra.sqlite)
pub fn database_path() -> Result<PathBuf> {
    Ok(astra_dir()?.join("astra.sqlite"))
}
