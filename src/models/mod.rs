//! Data models for Astra

mod assistant;
mod base_post;
mod billing;
mod chat;
mod check_item;
mod collected_item;
mod generation;
mod network;
mod prompt;
mod publication;
mod social_post;
mod source;
mod support;

pub use assistant::{ASSISTANT_COLORS, ASSISTANT_ICONS, Assistant};
pub use base_post::{BasePostItem, BasePostStatus};
pub use billing::{BillingPeriod, PLANS, PaymentMethod, Plan, TOP_UP_PRESETS, TopUp};
pub use chat::{ChatMessage, Role};
pub use check_item::{CheckItem, CheckStatus, CredibilityLevel, CredibilityScore};
pub use collected_item::{CollectedItem, CollectedSourceType, CollectionStatus, ContentFormat};
pub use generation::{Generation, GenerationKind, GenerationRequest, StudioField, StudioSettings};
pub use network::SocialNetwork;
pub use prompt::{PROMPT_CATEGORIES, Prompt, PromptModel};
pub use publication::{PublicationItem, PublicationStatus};
pub use social_post::SocialPost;
pub use source::{Source, SourceKind, source_totals};
pub use support::{FAQ, SupportTicket, TicketCategory};
