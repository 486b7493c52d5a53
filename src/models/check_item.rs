//! Credibility check stage

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pipeline::{Action, Staged, StatusMachine};
use crate::repo::Record;

/// Fact-check status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Awaiting a decision
    #[default]
    Pending,
    /// Considered credible
    Approved,
    /// Dropped
    Rejected,
}

impl StatusMachine for CheckStatus {
    const ENTITY: &'static str = "check item";

    const TRANSITIONS: &'static [(Self, Action, Self)] = &[
        (Self::Pending, Action::Approve, Self::Approved),
        (Self::Pending, Action::Reject, Self::Rejected),
    ];

    const ALL: &'static [Self] = &[Self::Pending, Self::Approved, Self::Rejected];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Display bucket for a credibility score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredibilityLevel {
    /// 80 and above
    High,
    /// 50 to 79
    Medium,
    /// Below 50
    Low,
}

/// Opaque 0-100 credibility score supplied by an external checker
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CredibilityScore(u8);

impl CredibilityScore {
    /// Wrap a score, rejecting values above 100
    pub fn new(value: u8) -> Result<Self> {
        if value > 100 {
            return Err(Error::validation(format!(
                "credibility score must be between 0 and 100, got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Raw value
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Bucket for colouring
    pub const fn level(self) -> CredibilityLevel {
        if self.0 >= 80 {
            CredibilityLevel::High
        } else if self.0 >= 50 {
            CredibilityLevel::Medium
        } else {
            CredibilityLevel::Low
        }
    }
}

impl TryFrom<u8> for CredibilityScore {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<CredibilityScore> for u8 {
    fn from(score: CredibilityScore) -> Self {
        score.0
    }
}

/// An item under credibility review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckItem {
    /// Unique identifier
    pub id: String,
    /// Source platform name
    pub source: String,
    /// Source icon
    pub source_icon: String,
    /// Channel the item came from
    pub channel_name: String,
    /// Headline
    pub title: String,
    /// Externally computed score
    pub credibility_score: CredibilityScore,
    /// Short description
    pub description: String,
    /// Review status
    pub status: CheckStatus,
}

impl Record for CheckItem {
    const ENTITY: &'static str = "check item";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Staged for CheckItem {
    type Status = CheckStatus;

    fn status(&self) -> CheckStatus {
        self.status
    }

    fn set_status(&mut self, status: CheckStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_range() {
        assert!(CredibilityScore::new(100).is_ok());
        assert!(CredibilityScore::new(101).is_err());
    }

    #[test]
    fn test_score_levels() {
        assert_eq!(CredibilityScore::new(92).unwrap().level(), CredibilityLevel::High);
        assert_eq!(CredibilityScore::new(80).unwrap().level(), CredibilityLevel::High);
        assert_eq!(CredibilityScore::new(65).unwrap().level(), CredibilityLevel::Medium);
        assert_eq!(CredibilityScore::new(45).unwrap().level(), CredibilityLevel::Low);
    }

    #[test]
    fn test_score_deserialize_rejects_out_of_range() {
        let ok: CredibilityScore = serde_json::from_str("78").unwrap();
        assert_eq!(ok.value(), 78);
        assert!(serde_json::from_str::<CredibilityScore>("150").is_err());
    }
}
