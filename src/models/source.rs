//! Content source registry model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::repo::Record;

/// Kind of feed a source is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// RSS/Atom feed
    #[default]
    Rss,
    /// Public Telegram channel
    Telegram,
    /// YouTube channel
    Youtube,
    /// RuTube channel
    Rutube,
    /// TikTok account
    Tiktok,
    /// Yandex Dzen blog
    Dzen,
    /// VK community
    Vk,
}

impl SourceKind {
    /// Get all source kinds
    pub const fn all() -> &'static [Self] {
        &[
            Self::Rss,
            Self::Telegram,
            Self::Youtube,
            Self::Rutube,
            Self::Tiktok,
            Self::Dzen,
            Self::Vk,
        ]
    }

    /// Get kind as string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rss => "rss",
            Self::Telegram => "telegram",
            Self::Youtube => "youtube",
            Self::Rutube => "rutube",
            Self::Tiktok => "tiktok",
            Self::Dzen => "dzen",
            Self::Vk => "vk",
        }
    }

    /// Get the display label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Rss => "RSS feed",
            Self::Telegram => "Telegram channel",
            Self::Youtube => "YouTube channel",
            Self::Rutube => "RuTube channel",
            Self::Tiktok => "TikTok account",
            Self::Dzen => "Yandex Dzen",
            Self::Vk => "VK community",
        }
    }

    /// Get the emoji icon
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Rss => "📡",
            Self::Telegram => "📱",
            Self::Youtube => "🎬",
            Self::Rutube => "🎥",
            Self::Tiktok => "🎵",
            Self::Dzen => "📰",
            Self::Vk => "💬",
        }
    }

    /// Parse kind from string
    pub fn from_str(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s.trim().to_lowercase())
    }
}

/// A registered content source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Unique identifier
    pub id: String,
    /// Feed kind
    pub kind: SourceKind,
    /// Display name
    pub name: String,
    /// Feed or channel URL
    pub url: String,
    /// Whether the source is collected from
    pub is_active: bool,
    /// Last successful sync
    pub last_sync: Option<DateTime<Utc>>,
    /// Items pulled so far
    pub items_count: u32,
}

impl Source {
    /// Create a new, active source from form input
    pub fn new(kind: SourceKind, name: &str, url: &str) -> Result<Self> {
        let name = name.trim();
        let url = url.trim();

        if name.is_empty() || url.is_empty() {
            return Err(Error::validation("source name and URL are required"));
        }
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(Error::validation(format!(
                "source URL must start with http:// or https://: {url}"
            )));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            kind,
            name: name.to_string(),
            url: url.to_string(),
            is_active: true,
            last_sync: Some(Utc::now()),
            items_count: 0,
        })
    }

    /// Flip the active flag
    pub fn toggle(&mut self) {
        self.is_active = !self.is_active;
    }

    /// Relative time since last sync (e.g., "5m", "2h")
    pub fn last_sync_display(&self) -> String {
        let Some(last_sync) = self.last_sync else {
            return "never".to_string();
        };

        let duration = Utc::now().signed_duration_since(last_sync);
        if duration.num_seconds() < 60 {
            "just now".to_string()
        } else if duration.num_minutes() < 60 {
            format!("{}m ago", duration.num_minutes())
        } else if duration.num_hours() < 24 {
            format!("{}h ago", duration.num_hours())
        } else {
            format!("{}d ago", duration.num_days())
        }
    }
}

impl Record for Source {
    const ENTITY: &'static str = "source";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Active source count and total collected items, for the page header
pub fn source_totals(sources: &[Source]) -> (usize, u64) {
    let active = sources.iter().filter(|s| s.is_active).count();
    let items = sources.iter().map(|s| u64::from(s.items_count)).sum();
    (active, items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_source_is_active() {
        let source = Source::new(SourceKind::Telegram, " @technews ", "https://t.me/technews").unwrap();
        assert!(source.is_active);
        assert_eq!(source.name, "@technews");
        assert_eq!(source.items_count, 0);
        assert_eq!(source.last_sync_display(), "just now");
    }

    #[test]
    fn test_new_source_validation() {
        assert!(Source::new(SourceKind::Rss, "", "https://habr.com/rss").is_err());
        assert!(Source::new(SourceKind::Rss, "Habr", "   ").is_err());
        assert!(Source::new(SourceKind::Rss, "Habr", "habr.com/rss").is_err());
    }

    #[test]
    fn test_totals() {
        let mut a = Source::new(SourceKind::Rss, "A", "https://a.example").unwrap();
        a.items_count = 10;
        let mut b = Source::new(SourceKind::Vk, "B", "https://vk.com/b").unwrap();
        b.items_count = 5;
        b.toggle();
        assert_eq!(source_totals(&[a, b]), (1, 15));
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(SourceKind::from_str("Dzen"), Some(SourceKind::Dzen));
        assert_eq!(SourceKind::from_str("myspace"), None);
    }
}
