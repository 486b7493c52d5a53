//! Social network definitions for publication targets

use serde::{Deserialize, Serialize};

/// Networks a base post can be adapted for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialNetwork {
    /// Telegram channel post
    #[default]
    Telegram,
    /// VK community post
    Vk,
    /// Instagram feed post
    Instagram,
    /// YouTube Shorts / Reels caption
    Shorts,
}

impl SocialNetwork {
    /// Get all supported networks
    pub const fn all() -> &'static [Self] {
        &[Self::Telegram, Self::Vk, Self::Instagram, Self::Shorts]
    }

    /// Stable key used in storage and on the command line
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Telegram => "telegram",
            Self::Vk => "vk",
            Self::Instagram => "instagram",
            Self::Shorts => "shorts",
        }
    }

    /// Get the display name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Telegram => "Telegram",
            Self::Vk => "VK",
            Self::Instagram => "Instagram",
            Self::Shorts => "Shorts / Reels",
        }
    }

    /// Get the emoji icon
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Telegram => "📱",
            Self::Vk => "💬",
            Self::Instagram => "📸",
            Self::Shorts => "🎬",
        }
    }

    /// Maximum post length in characters
    pub const fn max_length(&self) -> usize {
        match self {
            Self::Telegram => 4096,
            Self::Vk => 15895,
            Self::Instagram => 2200,
            Self::Shorts => 500,
        }
    }

    /// Accepted image aspect ratios
    pub const fn image_format(&self) -> &'static str {
        match self {
            Self::Telegram => "1:1 or 16:9",
            Self::Vk => "16:9",
            Self::Instagram => "1:1 or 4:5",
            Self::Shorts => "9:16",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "telegram" | "tg" => Some(Self::Telegram),
            "vk" | "vkontakte" => Some(Self::Vk),
            "instagram" | "insta" => Some(Self::Instagram),
            "shorts" | "reels" => Some(Self::Shorts),
            _ => None,
        }
    }

    /// Join networks into a comma-separated key list
    pub fn join(networks: &[Self]) -> String {
        networks
            .iter()
            .map(Self::key)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Parse a comma-separated key list, skipping unknown entries
    pub fn split(s: &str) -> Vec<Self> {
        s.split(',').filter_map(Self::from_str).collect()
    }
}

impl std::fmt::Display for SocialNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_skips_unknown() {
        let networks = SocialNetwork::split("telegram, vk,myspace,shorts");
        assert_eq!(
            networks,
            vec![SocialNetwork::Telegram, SocialNetwork::Vk, SocialNetwork::Shorts]
        );
        assert_eq!(SocialNetwork::join(&networks), "telegram,vk,shorts");
    }
}
