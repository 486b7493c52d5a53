//! Items pulled from sources, awaiting triage

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::pipeline::{Action, Staged, StatusMachine};
use crate::repo::Record;

/// Triage status of a collected item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionStatus {
    /// Not yet looked at
    #[default]
    New,
    /// Taken into work
    InProgress,
    /// Dropped
    Rejected,
}

impl StatusMachine for CollectionStatus {
    const ENTITY: &'static str = "collected item";

    const TRANSITIONS: &'static [(Self, Action, Self)] = &[
        (Self::New, Action::Approve, Self::InProgress),
        (Self::New, Action::Reject, Self::Rejected),
    ];

    const ALL: &'static [Self] = &[Self::New, Self::InProgress, Self::Rejected];

    fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Rejected => "rejected",
        }
    }
}

/// Where a collected item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectedSourceType {
    /// Telegram channel
    #[default]
    Telegram,
    /// RSS feed
    Rss,
    /// VK community
    Vk,
    /// Added by hand
    Manual,
}

impl CollectedSourceType {
    /// Get all source types
    pub const fn all() -> &'static [Self] {
        &[Self::Telegram, Self::Rss, Self::Vk, Self::Manual]
    }

    /// Get type as string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Telegram => "telegram",
            Self::Rss => "rss",
            Self::Vk => "vk",
            Self::Manual => "manual",
        }
    }

    /// Get the display label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Telegram => "Telegram",
            Self::Rss => "RSS",
            Self::Vk => "VK",
            Self::Manual => "Manual",
        }
    }

    /// Parse type from string
    pub fn from_str(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s.trim().to_lowercase())
    }
}

/// Media format of a collected item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    /// Article or post
    #[default]
    Text,
    /// Image or infographic
    Photo,
    /// Video
    Video,
}

impl ContentFormat {
    /// Get all formats
    pub const fn all() -> &'static [Self] {
        &[Self::Text, Self::Photo, Self::Video]
    }

    /// Get format as string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Photo => "photo",
            Self::Video => "video",
        }
    }

    /// Get the emoji icon
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Text => "📄",
            Self::Photo => "🖼",
            Self::Video => "🎞",
        }
    }

    /// Parse format from string
    pub fn from_str(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|f| f.as_str() == s.trim().to_lowercase())
    }
}

/// An item collected from a source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedItem {
    /// Unique identifier
    pub id: String,
    /// Headline
    pub title: String,
    /// Source display name
    pub source: String,
    /// Source type
    pub source_type: CollectedSourceType,
    /// Publication date at the source
    pub date: NaiveDate,
    /// Media format
    pub format: ContentFormat,
    /// Short summary
    pub summary: String,
    /// Triage status
    pub status: CollectionStatus,
    /// Link to the original
    pub original_url: Option<String>,
}

impl Record for CollectedItem {
    const ENTITY: &'static str = "collected item";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Staged for CollectedItem {
    type Status = CollectionStatus;

    fn status(&self) -> CollectionStatus {
        self.status
    }

    fn set_status(&mut self, status: CollectionStatus) {
        self.status = status;
    }
}

#[cfg(test)]
impl CollectedItem {
    pub(crate) fn sample(id: &str, status: CollectionStatus) -> Self {
        Self {
            id: id.to_string(),
            title: format!("Item {id}"),
            source: "Tech News".to_string(),
            source_type: CollectedSourceType::Telegram,
            date: NaiveDate::from_ymd_opt(2025, 1, 14).unwrap_or_default(),
            format: ContentFormat::Text,
            summary: String::new(),
            status,
            original_url: None,
        }
    }
}
