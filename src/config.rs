//! Configuration module for Astra

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::path::PathBuf;

use crate::chat::OverlapPolicy;
use crate::models::SocialNetwork;
use crate::paths;
use crate::theme::Theme;

/// Where records are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Process memory, lost on exit
    Memory,
    /// `SQLite` file under the data directory
    #[default]
    Sqlite,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Selected theme
    #[serde(default)]
    pub theme: Theme,

    /// Storage backend
    #[serde(default)]
    pub storage: StorageKind,

    /// Fill an empty store with demo content on startup
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,

    /// Delay before the simulated assistant answers, in milliseconds
    #[serde(default = "default_chat_delay_ms")]
    pub chat_delay_ms: u64,

    /// What to do with a message sent while a reply is outstanding
    #[serde(default)]
    pub chat_overlap: OverlapPolicy,

    /// Networks preselected in the base post editor
    #[serde(default = "default_networks")]
    pub default_networks: Vec<SocialNetwork>,

    /// Channel name used when publishing from the adaptation board
    #[serde(default = "default_channel")]
    pub default_channel: String,
}

fn default_seed_demo_data() -> bool {
    true
}

fn default_chat_delay_ms() -> u64 {
    1500
}

fn default_networks() -> Vec<SocialNetwork> {
    vec![SocialNetwork::Telegram, SocialNetwork::Vk]
}

fn default_channel() -> String {
    "Astra Promt".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            storage: StorageKind::default(),
            seed_demo_data: default_seed_demo_data(),
            chat_delay_ms: default_chat_delay_ms(),
            chat_overlap: OverlapPolicy::default(),
            default_networks: default_networks(),
            default_channel: default_channel(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        paths::config_path()
    }

    /// Load config from the default path or create default
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()?;
        self.save_to(&path)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Chat reply delay
    pub const fn chat_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.chat_delay_ms)
    }

    /// Channel for a network's publication
    pub fn channel_for(&self, network: SocialNetwork) -> String {
        format!("{} ({})", self.default_channel, network.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.chat_delay_ms, 1500);
        assert_eq!(config.chat_overlap, OverlapPolicy::Reject);
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            storage: StorageKind::Memory,
            chat_delay_ms: 10,
            chat_overlap: OverlapPolicy::Queue,
            default_networks: vec![SocialNetwork::Instagram, SocialNetwork::Shorts],
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_field_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "storage = \"memory\"\nchat_overlap = \"queue\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.storage, StorageKind::Memory);
        assert_eq!(config.chat_overlap, OverlapPolicy::Queue);
        assert!(config.seed_demo_data);
        assert_eq!(config.default_networks, default_networks());
    }
}
