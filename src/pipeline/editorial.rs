//! Base post editor settings (verification stage)

use serde::{Deserialize, Serialize};

use crate::models::SocialNetwork;

/// Tone of voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Plain, neutral
    #[default]
    Neutral,
    /// Formal
    Formal,
    /// Friendly
    Friendly,
    /// Professional
    Professional,
}

/// Target length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostLength {
    /// Short
    Short,
    /// Medium
    #[default]
    Medium,
    /// Long
    Long,
}

/// Writing style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Informative
    #[default]
    Informative,
    /// Engaging
    Engaging,
    /// Educational
    Educational,
    /// Promotional
    Promotional,
}

impl Tone {
    /// Cycle to the next option
    pub const fn next(self) -> Self {
        match self {
            Self::Neutral => Self::Formal,
            Self::Formal => Self::Friendly,
            Self::Friendly => Self::Professional,
            Self::Professional => Self::Neutral,
        }
    }

    /// Get the display label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Neutral => "Neutral",
            Self::Formal => "Formal",
            Self::Friendly => "Friendly",
            Self::Professional => "Professional",
        }
    }
}

impl PostLength {
    /// Cycle to the next option
    pub const fn next(self) -> Self {
        match self {
            Self::Short => Self::Medium,
            Self::Medium => Self::Long,
            Self::Long => Self::Short,
        }
    }

    /// Get the display label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Short => "Short",
            Self::Medium => "Medium",
            Self::Long => "Long",
        }
    }
}

impl Style {
    /// Cycle to the next option
    pub const fn next(self) -> Self {
        match self {
            Self::Informative => Self::Engaging,
            Self::Engaging => Self::Educational,
            Self::Educational => Self::Promotional,
            Self::Promotional => Self::Informative,
        }
    }

    /// Get the display label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Informative => "Informative",
            Self::Engaging => "Engaging",
            Self::Educational => "Educational",
            Self::Promotional => "Promotional",
        }
    }
}

/// Editorial metadata and network selection for one base post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorialSettings {
    /// Tone of voice
    pub tone: Tone,
    /// Target length
    pub length: PostLength,
    /// Writing style
    pub style: Style,
    /// Networks to adapt for, in selection order
    pub networks: Vec<SocialNetwork>,
}

impl Default for EditorialSettings {
    fn default() -> Self {
        Self {
            tone: Tone::default(),
            length: PostLength::default(),
            style: Style::default(),
            networks: vec![SocialNetwork::Telegram, SocialNetwork::Vk],
        }
    }
}

impl EditorialSettings {
    /// Settings with a custom initial network selection
    pub fn with_networks(networks: Vec<SocialNetwork>) -> Self {
        let mut settings = Self {
            networks: Vec::new(),
            ..Self::default()
        };
        for network in networks {
            if !settings.networks.contains(&network) {
                settings.networks.push(network);
            }
        }
        settings
    }

    /// Select or deselect a network
    pub fn toggle_network(&mut self, network: SocialNetwork) {
        if let Some(idx) = self.networks.iter().position(|n| *n == network) {
            self.networks.remove(idx);
        } else {
            self.networks.push(network);
        }
    }

    /// Whether a network is selected
    pub fn is_selected(&self, network: SocialNetwork) -> bool {
        self.networks.contains(&network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_editor() {
        let settings = EditorialSettings::default();
        assert_eq!(settings.tone, Tone::Neutral);
        assert_eq!(settings.length, PostLength::Medium);
        assert_eq!(settings.style, Style::Informative);
        assert_eq!(settings.networks, vec![SocialNetwork::Telegram, SocialNetwork::Vk]);
    }

    #[test]
    fn test_toggle_network() {
        let mut settings = EditorialSettings::default();
        settings.toggle_network(SocialNetwork::Vk);
        settings.toggle_network(SocialNetwork::Instagram);
        assert_eq!(
            settings.networks,
            vec![SocialNetwork::Telegram, SocialNetwork::Instagram]
        );
        assert!(!settings.is_selected(SocialNetwork::Vk));
    }

    #[test]
    fn test_with_networks_dedups() {
        let settings = EditorialSettings::with_networks(vec![
            SocialNetwork::Shorts,
            SocialNetwork::Shorts,
            SocialNetwork::Vk,
        ]);
        assert_eq!(settings.networks, vec![SocialNetwork::Shorts, SocialNetwork::Vk]);
    }
}
