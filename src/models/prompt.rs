//! Prompt catalog entries

use serde::{Deserialize, Serialize};

use crate::repo::Record;

/// Model family a prompt is tuned for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PromptModel {
    /// `OpenAI` GPT
    #[default]
    #[serde(rename = "GPT")]
    Gpt,
    /// Anthropic Claude
    Claude,
    /// Google Gemini
    Gemini,
}

impl PromptModel {
    /// Get all models
    pub const fn all() -> &'static [Self] {
        &[Self::Gpt, Self::Claude, Self::Gemini]
    }

    /// Get the display name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Gpt => "GPT",
            Self::Claude => "Claude",
            Self::Gemini => "Gemini",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gpt" => Some(Self::Gpt),
            "claude" => Some(Self::Claude),
            "gemini" => Some(Self::Gemini),
            _ => None,
        }
    }
}

impl std::fmt::Display for PromptModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Categories offered as quick filters in the catalog
pub const PROMPT_CATEGORIES: &[&str] = &["Marketing", "Code", "Content", "Data", "Support"];

/// A reusable prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// Unique identifier
    pub id: String,
    /// Title
    pub title: String,
    /// Description shown on the card
    pub preview: String,
    /// Free-form tags
    pub tags: Vec<String>,
    /// Target model
    pub model: PromptModel,
    /// Liked by the user (seed value for the catalog's liked set)
    pub is_liked: bool,
}

impl Record for Prompt {
    const ENTITY: &'static str = "prompt";

    fn id(&self) -> &str {
        &self.id
    }
}
