//! Support tickets and FAQ

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::repo::Record;

/// Ticket category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketCategory {
    /// Something is broken
    Technical,
    /// Payments and subscriptions
    Billing,
    /// Feature ideas
    Suggestion,
    /// Partnership requests
    Partnership,
    /// Anything else
    Other,
}

impl TicketCategory {
    /// Get all categories
    pub const fn all() -> &'static [Self] {
        &[
            Self::Technical,
            Self::Billing,
            Self::Suggestion,
            Self::Partnership,
            Self::Other,
        ]
    }

    /// Get category as string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::Billing => "billing",
            Self::Suggestion => "suggestion",
            Self::Partnership => "partnership",
            Self::Other => "other",
        }
    }

    /// Get the display label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Technical => "Technical issue",
            Self::Billing => "Billing question",
            Self::Suggestion => "Suggestion",
            Self::Partnership => "Partnership",
            Self::Other => "Other",
        }
    }

    /// Parse category from string
    pub fn from_str(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == s.trim().to_lowercase())
    }
}

/// A submitted support request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportTicket {
    /// Unique identifier
    pub id: String,
    /// Short subject line
    pub subject: String,
    /// Category
    pub category: TicketCategory,
    /// Message body
    pub message: String,
    /// Submission time
    pub created_at: DateTime<Utc>,
}

impl SupportTicket {
    /// Build a ticket from the form; subject, category and message are all required
    pub fn new(subject: &str, category: Option<TicketCategory>, message: &str) -> Result<Self> {
        let subject = subject.trim();
        let message = message.trim();

        let Some(category) = category else {
            return Err(Error::validation("fill in subject, category and message"));
        };
        if subject.is_empty() || message.is_empty() {
            return Err(Error::validation("fill in subject, category and message"));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            subject: subject.to_string(),
            category,
            message: message.to_string(),
            created_at: Utc::now(),
        })
    }
}

impl Record for SupportTicket {
    const ENTITY: &'static str = "support ticket";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Frequently asked questions shown next to the ticket form
pub const FAQ: &[(&str, &str)] = &[
    (
        "How do I get started?",
        "New accounts receive free gems for testing. Open AI Chat or Photo generation and start creating.",
    ),
    (
        "Which models are available?",
        "Midjourney, DALL-E 3 and Stable Diffusion for images, Sora and Runway for video. Availability depends on your plan.",
    ),
    (
        "How do gems work?",
        "Gems are the internal currency. Each generation costs gems depending on the model and resolution.",
    ),
    (
        "Can I get a refund?",
        "Yes, within 7 days of payment if you used less than 20% of the generation limit.",
    ),
    (
        "Are my generations saved?",
        "Yes, under My generations. Free plans keep them for 7 days, paid plans indefinitely.",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_fields_required() {
        assert!(SupportTicket::new("", Some(TicketCategory::Billing), "help").is_err());
        assert!(SupportTicket::new("Refund", None, "help").is_err());
        assert!(SupportTicket::new("Refund", Some(TicketCategory::Billing), "  ").is_err());

        let ticket = SupportTicket::new(" Refund ", Some(TicketCategory::Billing), "help").unwrap();
        assert_eq!(ticket.subject, "Refund");
    }
}
