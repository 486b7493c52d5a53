//! Per-network adaptation of a base post

use serde::{Deserialize, Serialize};

use super::SocialNetwork;

/// A base post adapted to one network, with its readiness checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialPost {
    /// Network this adaptation targets (one per network)
    pub network: SocialNetwork,
    /// Headline (Instagram posts usually leave it empty)
    pub title: String,
    /// Adapted text
    pub content: String,
    /// Network character limit
    pub max_length: usize,
    /// Accepted image aspect ratios
    pub image_format: String,
    /// Text checked by an editor
    pub is_text_ready: bool,
    /// Image prepared in the right format
    pub is_image_ready: bool,
    /// Facts verified
    pub is_verified: bool,
}

impl SocialPost {
    /// Create an unchecked adaptation using the network's limits
    pub fn new(network: SocialNetwork, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            network,
            title: title.into(),
            content: content.into(),
            max_length: network.max_length(),
            image_format: network.image_format().to_string(),
            is_text_ready: false,
            is_image_ready: false,
            is_verified: false,
        }
    }

    /// Network key, used as the adaptation id
    pub const fn id(&self) -> &'static str {
        self.network.key()
    }

    /// All three checklist items are ticked and the text fits the network
    pub fn is_ready(&self) -> bool {
        self.is_text_ready && self.is_image_ready && self.is_verified && !self.exceeds_limit()
    }

    /// Content length in characters
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Content is longer than the network allows
    pub fn exceeds_limit(&self) -> bool {
        self.char_count() > self.max_length
    }

    /// Replace the text, cut to `max_length` chars; returns whether it was cut
    ///
    /// An edited text needs to be re-checked.
    pub fn update_content(&mut self, content: impl Into<String>) -> bool {
        let content = content.into();
        let cut = content.chars().count() > self.max_length;
        self.content = if cut {
            content.chars().take(self.max_length).collect()
        } else {
            content
        };
        self.is_text_ready = false;
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_network_limits() {
        let post = SocialPost::new(SocialNetwork::Shorts, "AI in 2025", "Top 3 trends");
        assert_eq!(post.id(), "shorts");
        assert_eq!(post.max_length, 500);
        assert_eq!(post.image_format, "9:16");
        assert!(!post.is_ready());
    }

    #[test]
    fn test_limit_counts_chars_not_bytes() {
        let mut post = SocialPost::new(SocialNetwork::Shorts, "", "");
        post.content = "ж".repeat(500);
        assert!(!post.exceeds_limit());
        post.content.push('ж');
        assert!(post.exceeds_limit());
    }

    #[test]
    fn test_update_content_resets_text_check() {
        let mut post = SocialPost::new(SocialNetwork::Telegram, "", "old");
        post.is_text_ready = true;
        post.update_content("new");
        assert!(!post.is_text_ready);
        assert_eq!(post.content, "new");
    }

    #[test]
    fn test_update_content_cuts_to_limit() {
        let mut post = SocialPost::new(SocialNetwork::Shorts, "", "");
        assert!(post.update_content("ж".repeat(600)));
        assert_eq!(post.char_count(), 500);
        assert!(!post.exceeds_limit());
        assert!(!post.update_content("short"));
        assert_eq!(post.content, "short");
    }

    #[test]
    fn test_over_limit_post_is_never_ready() {
        let mut post = SocialPost::new(SocialNetwork::Shorts, "", "x".repeat(501));
        post.is_text_ready = true;
        post.is_image_ready = true;
        post.is_verified = true;
        assert!(!post.is_ready());
        post.content.pop();
        assert!(post.is_ready());
    }
}
