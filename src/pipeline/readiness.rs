//! Per-network readiness gate
//!
//! Publishing is only offered once every adapted post has its text checked,
//! its image prepared and its facts verified.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Action, EditorialSettings, Staged};
use crate::error::{Error, Result};
use crate::models::{PublicationItem, SocialNetwork, SocialPost};

/// One checklist item of an adapted post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessFlag {
    /// Text checked
    Text,
    /// Image prepared
    Image,
    /// Facts verified
    Verified,
}

impl ReadinessFlag {
    /// Get all flags
    pub const fn all() -> &'static [Self] {
        &[Self::Text, Self::Image, Self::Verified]
    }

    /// Get flag as string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Verified => "verified",
        }
    }

    /// Get the display label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text ready",
            Self::Image => "Image ready",
            Self::Verified => "Verified",
        }
    }

    /// Read this flag from a post
    pub const fn get(self, post: &SocialPost) -> bool {
        match self {
            Self::Text => post.is_text_ready,
            Self::Image => post.is_image_ready,
            Self::Verified => post.is_verified,
        }
    }

    fn slot(self, post: &mut SocialPost) -> &mut bool {
        match self {
            Self::Text => &mut post.is_text_ready,
            Self::Image => &mut post.is_image_ready,
            Self::Verified => &mut post.is_verified,
        }
    }
}

/// Adapted posts for every selected network
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptationBoard {
    posts: Vec<SocialPost>,
}

impl AdaptationBoard {
    /// Build a board from already adapted posts; later duplicates of a network are dropped
    pub fn new(posts: Vec<SocialPost>) -> Self {
        let mut board = Self::default();
        for post in posts {
            if board.get(post.network).is_none() {
                board.posts.push(post);
            }
        }
        board
    }

    /// One unchecked adaptation per network selected in the editor
    pub fn from_base_post(title: &str, content: &str, settings: &EditorialSettings) -> Self {
        Self::new(
            settings
                .networks
                .iter()
                .map(|network| SocialPost::new(*network, title, content))
                .collect(),
        )
    }

    /// Tracked posts, in selection order
    pub fn posts(&self) -> &[SocialPost] {
        &self.posts
    }

    /// Tracked networks, in selection order
    pub fn networks(&self) -> Vec<SocialNetwork> {
        self.posts.iter().map(|post| post.network).collect()
    }

    /// Post for a network
    pub fn get(&self, network: SocialNetwork) -> Option<&SocialPost> {
        self.posts.iter().find(|post| post.network == network)
    }

    /// Mutable post for a network
    pub fn get_mut(&mut self, network: SocialNetwork) -> Option<&mut SocialPost> {
        self.posts.iter_mut().find(|post| post.network == network)
    }

    fn post_mut(&mut self, network: SocialNetwork) -> Result<&mut SocialPost> {
        self.get_mut(network)
            .ok_or_else(|| Error::not_found("adaptation", network.key()))
    }

    /// Set one checklist item
    pub fn set_flag(&mut self, network: SocialNetwork, flag: ReadinessFlag, value: bool) -> Result<()> {
        let post = self.post_mut(network)?;
        *flag.slot(post) = value;
        tracing::debug!("{} {} = {}", network.key(), flag.as_str(), value);
        Ok(())
    }

    /// Flip one checklist item, returning the new value
    pub fn toggle_flag(&mut self, network: SocialNetwork, flag: ReadinessFlag) -> Result<bool> {
        let post = self.post_mut(network)?;
        let slot = flag.slot(post);
        *slot = !*slot;
        let value = *slot;
        tracing::debug!("{} {} = {}", network.key(), flag.as_str(), value);
        Ok(value)
    }

    /// Replace the text of one adaptation; returns whether it was cut to the network limit
    pub fn update_content(&mut self, network: SocialNetwork, content: impl Into<String>) -> Result<bool> {
        let cut = self.post_mut(network)?.update_content(content);
        if cut {
            tracing::debug!("{} text cut to {} chars", network.key(), network.max_length());
        }
        Ok(cut)
    }

    /// Every checklist item that is still unticked
    pub fn blocking(&self) -> Vec<(SocialNetwork, ReadinessFlag)> {
        self.posts
            .iter()
            .flat_map(|post| {
                ReadinessFlag::all()
                    .iter()
                    .filter(move |flag| !flag.get(post))
                    .map(move |flag| (post.network, *flag))
            })
            .collect()
    }

    /// Networks whose text is longer than they allow
    pub fn over_limit(&self) -> Vec<SocialNetwork> {
        self.posts
            .iter()
            .filter(|post| post.exceeds_limit())
            .map(|post| post.network)
            .collect()
    }

    /// All tracked networks are fully checked; an empty board never is
    pub fn can_publish(&self) -> bool {
        !self.posts.is_empty() && self.posts.iter().all(SocialPost::is_ready)
    }

    /// Number of fully checked networks
    pub fn ready_count(&self) -> usize {
        self.posts.iter().filter(|post| post.is_ready()).count()
    }

    /// Publish every adaptation at once
    ///
    /// `channel_for` names the channel each network's post goes to. Fails
    /// with [`Error::NotReady`] listing the unticked items and over-limit
    /// texts when the gate is closed.
    pub fn publish<F>(&self, channel_for: F, now: DateTime<Utc>) -> Result<Vec<PublicationItem>>
    where
        F: Fn(SocialNetwork) -> String,
    {
        if !self.can_publish() {
            let blocking = if self.posts.is_empty() {
                vec!["no networks selected".to_string()]
            } else {
                self.blocking()
                    .into_iter()
                    .map(|(network, flag)| format!("{} {}", network.key(), flag.as_str()))
                    .chain(self.over_limit().into_iter().map(|n| format!("{} length", n.key())))
                    .collect()
            };
            return Err(Error::NotReady { blocking });
        }

        let mut items = Vec::with_capacity(self.posts.len());
        for post in &self.posts {
            let mut item = PublicationItem::draft(
                post.network,
                channel_for(post.network),
                post.title.clone(),
                post.content.clone(),
            );
            item.apply(Action::Publish, now)?;
            tracing::info!("Published {} post to {}", post.network.key(), item.channel);
            items.push(item);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PublicationStatus;

    fn board() -> AdaptationBoard {
        AdaptationBoard::from_base_post(
            "AI in 2025",
            "Trends",
            &EditorialSettings::with_networks(vec![SocialNetwork::Telegram, SocialNetwork::Vk]),
        )
    }

    fn tick_all(board: &mut AdaptationBoard) {
        for network in board.networks() {
            for flag in ReadinessFlag::all() {
                board.set_flag(network, *flag, true).unwrap();
            }
        }
    }

    #[test]
    fn test_empty_board_cannot_publish() {
        let board = AdaptationBoard::default();
        assert!(!board.can_publish());
        assert!(matches!(
            board.publish(|_| String::new(), Utc::now()),
            Err(Error::NotReady { .. })
        ));
    }

    #[test]
    fn test_gate_requires_every_flag() {
        let mut board = board();
        assert!(!board.can_publish());
        assert_eq!(board.blocking().len(), 6);

        tick_all(&mut board);
        assert!(board.can_publish());
        assert!(board.blocking().is_empty());

        board.toggle_flag(SocialNetwork::Vk, ReadinessFlag::Image).unwrap();
        assert!(!board.can_publish());
        assert_eq!(board.blocking(), vec![(SocialNetwork::Vk, ReadinessFlag::Image)]);
    }

    #[test]
    fn test_last_blocking_flag_opens_gate() {
        let mut board = board();
        tick_all(&mut board);
        board.set_flag(SocialNetwork::Telegram, ReadinessFlag::Verified, false).unwrap();
        assert!(!board.can_publish());

        assert!(board.toggle_flag(SocialNetwork::Telegram, ReadinessFlag::Verified).unwrap());
        assert!(board.can_publish());
        assert_eq!(board.ready_count(), 2);
    }

    #[test]
    fn test_untracked_network() {
        let mut board = board();
        let result = board.set_flag(SocialNetwork::Shorts, ReadinessFlag::Text, true);
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_editing_text_closes_gate() {
        let mut board = board();
        tick_all(&mut board);
        board.update_content(SocialNetwork::Telegram, "New text").unwrap();
        assert!(!board.can_publish());
        assert_eq!(
            board.blocking(),
            vec![(SocialNetwork::Telegram, ReadinessFlag::Text)]
        );
    }

    #[test]
    fn test_publish_produces_one_item_per_network() {
        let mut board = board();
        let closed = board.publish(|n| n.name().to_string(), Utc::now());
        match closed {
            Err(Error::NotReady { blocking }) => assert!(blocking.contains(&"vk image".to_string())),
            other => panic!("expected NotReady, got {other:?}"),
        }

        tick_all(&mut board);
        let now = Utc::now();
        let items = board.publish(|n| format!("@{}", n.key()), now).unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.status == PublicationStatus::Published));
        assert!(items.iter().all(|i| i.publish_date == Some(now)));
        assert_eq!(items[1].channel, "@vk");
    }

    #[test]
    fn test_long_text_never_publishes_over_limit() {
        let settings = EditorialSettings::with_networks(vec![SocialNetwork::Shorts]);
        let mut board = AdaptationBoard::from_base_post("AI", "x".repeat(600).as_str(), &settings);
        tick_all(&mut board);
        assert_eq!(board.over_limit(), vec![SocialNetwork::Shorts]);
        match board.publish(|n| n.name().to_string(), Utc::now()) {
            Err(Error::NotReady { blocking }) => assert_eq!(blocking, vec!["shorts length".to_string()]),
            other => panic!("expected NotReady, got {other:?}"),
        }

        assert!(board.update_content(SocialNetwork::Shorts, "x".repeat(600)).unwrap());
        tick_all(&mut board);
        let items = board.publish(|n| n.name().to_string(), Utc::now()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text.chars().count(), 500);
    }

    #[test]
    fn test_new_drops_duplicate_networks() {
        let board = AdaptationBoard::new(vec![
            SocialPost::new(SocialNetwork::Vk, "a", "a"),
            SocialPost::new(SocialNetwork::Vk, "b", "b"),
        ]);
        assert_eq!(board.posts().len(), 1);
        assert_eq!(board.get(SocialNetwork::Vk).unwrap().title, "a");
    }
}
