//! Network-agnostic draft posts

use serde::{Deserialize, Serialize};

use super::SocialNetwork;
use crate::pipeline::{Action, Staged, StatusMachine};
use crate::repo::Record;

/// Authoring status of a base post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasePostStatus {
    /// Generated, awaiting editorial review
    #[default]
    Draft,
    /// Approved for adaptation
    Ready,
    /// Dropped
    Rejected,
}

impl StatusMachine for BasePostStatus {
    const ENTITY: &'static str = "base post";

    const TRANSITIONS: &'static [(Self, Action, Self)] = &[
        (Self::Draft, Action::Approve, Self::Ready),
        (Self::Draft, Action::Reject, Self::Rejected),
    ];

    const ALL: &'static [Self] = &[Self::Draft, Self::Ready, Self::Rejected];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Ready => "ready",
            Self::Rejected => "rejected",
        }
    }
}

/// A generated base post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasePostItem {
    /// Unique identifier
    pub id: String,
    /// Headline
    pub title: String,
    /// Post body
    pub text: String,
    /// Illustration path or URL
    pub image: Option<String>,
    /// Model that produced the draft
    pub model: String,
    /// Prompt used for generation
    pub prompt: String,
    /// Key theses the adaptations are derived from
    pub base_post: String,
    /// Target networks
    pub social_networks: Vec<SocialNetwork>,
    /// Authoring status
    pub status: BasePostStatus,
}

impl BasePostItem {
    /// Icons of the target networks, space separated
    pub fn network_icons(&self) -> String {
        self.social_networks
            .iter()
            .map(SocialNetwork::emoji)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Record for BasePostItem {
    const ENTITY: &'static str = "base post";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Staged for BasePostItem {
    type Status = BasePostStatus;

    fn status(&self) -> BasePostStatus {
        self.status
    }

    fn set_status(&mut self, status: BasePostStatus) {
        self.status = status;
    }
}
