//! Publication list model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SocialNetwork;
use crate::pipeline::{Action, Staged, StatusMachine};
use crate::repo::Record;

/// Status of a publication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationStatus {
    /// Prepared but not sent
    #[default]
    Draft,
    /// Queued for a publish date
    Scheduled,
    /// Sent to the network
    Published,
    /// Withdrawn by the editor
    Cancelled,
}

impl StatusMachine for PublicationStatus {
    const ENTITY: &'static str = "publication";

    const TRANSITIONS: &'static [(Self, Action, Self)] = &[
        (Self::Draft, Action::Publish, Self::Published),
        (Self::Draft, Action::Cancel, Self::Cancelled),
    ];

    const ALL: &'static [Self] = &[
        Self::Draft,
        Self::Scheduled,
        Self::Published,
        Self::Cancelled,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Scheduled => "scheduled",
            Self::Published => "published",
            Self::Cancelled => "cancelled",
        }
    }
}

impl PublicationStatus {
    /// Get emoji for status
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Draft => "📝",
            Self::Scheduled => "⏳",
            Self::Published => "✅",
            Self::Cancelled => "🚫",
        }
    }
}

/// A post adapted for one network and channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationItem {
    /// Unique identifier
    pub id: String,
    /// Headline (may be empty for caption-only networks)
    pub title: String,
    /// Post text
    pub text: String,
    /// Illustration path or URL
    pub image: Option<String>,
    /// Target network
    pub network: SocialNetwork,
    /// Channel, group or account on the network
    pub channel: String,
    /// Publication status
    pub status: PublicationStatus,
    /// When it was (or will be) published
    pub publish_date: Option<DateTime<Utc>>,
}

impl PublicationItem {
    /// Create a new draft publication
    pub fn draft(
        network: SocialNetwork,
        channel: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            text: text.into(),
            image: None,
            network,
            channel: channel.into(),
            status: PublicationStatus::Draft,
            publish_date: None,
        }
    }

    /// Format publish date for display
    pub fn publish_date_display(&self) -> String {
        self.publish_date
            .map_or_else(|| "—".to_string(), |dt| dt.format("%Y-%m-%d %H:%M").to_string())
    }
}

impl Record for PublicationItem {
    const ENTITY: &'static str = "publication";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Staged for PublicationItem {
    type Status = PublicationStatus;

    fn status(&self) -> PublicationStatus {
        self.status
    }

    fn set_status(&mut self, status: PublicationStatus) {
        self.status = status;
    }

    fn on_transition(&mut self, action: Action, now: DateTime<Utc>) {
        if action == Action::Publish {
            self.publish_date = Some(now);
        }
    }
}

#[cfg(test)]
impl PublicationItem {
    pub(crate) fn sample(id: &str, status: PublicationStatus) -> Self {
        let mut item = Self::draft(SocialNetwork::Vk, "My VK group", "AI in 2025", "Trends");
        item.id = id.to_string();
        item.status = status;
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_publish_sets_date() {
        let mut item = PublicationItem::sample("1", PublicationStatus::Draft);
        let now = Utc.with_ymd_and_hms(2025, 1, 20, 10, 0, 0).unwrap();

        item.apply(Action::Publish, now).unwrap();
        assert_eq!(item.status, PublicationStatus::Published);
        assert_eq!(item.publish_date, Some(now));
        assert_eq!(item.publish_date_display(), "2025-01-20 10:00");
    }

    #[test]
    fn test_cancel_keeps_date_empty() {
        let mut item = PublicationItem::sample("1", PublicationStatus::Draft);
        item.apply(Action::Cancel, Utc::now()).unwrap();
        assert_eq!(item.status, PublicationStatus::Cancelled);
        assert!(item.publish_date.is_none());
    }

    #[test]
    fn test_cancel_after_publish_is_noop() {
        let mut item = PublicationItem::sample("1", PublicationStatus::Draft);
        let now = Utc::now();
        item.apply(Action::Publish, now).unwrap();

        assert!(item.apply(Action::Cancel, Utc::now()).is_err());
        assert_eq!(item.status, PublicationStatus::Published);
        assert_eq!(item.publish_date, Some(now));
    }
}
