//! Catalog and table filtering
//!
//! Every list page narrows its records with a free-text query (case
//! insensitive substring over a few text fields) combined with exact-match
//! enum filters. `None` for an enum filter means "all". Filtering is a linear
//! scan that keeps the original order.

use std::collections::HashSet;

use crate::models::{
    Assistant, BasePostItem, CheckItem, CollectedItem, CollectedSourceType, ContentFormat,
    Generation, GenerationKind, Prompt, PromptModel, PublicationItem, PublicationStatus,
    SocialNetwork, Source, SourceKind,
};

/// A test applied to each record of a list
pub trait Predicate<T> {
    /// Whether `item` is kept
    fn matches(&self, item: &T) -> bool;
}

impl<T, F> Predicate<T> for F
where
    F: Fn(&T) -> bool,
{
    fn matches(&self, item: &T) -> bool {
        self(item)
    }
}

/// Records that pass `predicate`, in their original order
pub fn filter_items<T, P>(items: &[T], predicate: &P) -> Vec<T>
where
    T: Clone,
    P: Predicate<T> + ?Sized,
{
    items
        .iter()
        .filter(|item| predicate.matches(item))
        .cloned()
        .collect()
}

/// Case-insensitive substring test; an empty query matches everything
pub fn text_matches<I, S>(query: &str, fields: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    fields
        .into_iter()
        .any(|field| field.as_ref().to_lowercase().contains(&query))
}

fn enum_matches<E: PartialEq>(wanted: Option<E>, actual: E) -> bool {
    wanted.is_none_or(|w| w == actual)
}

/// Source registry filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFilter {
    /// Matched against name and URL
    pub query: String,
    /// Feed kind
    pub kind: Option<SourceKind>,
    /// Active flag
    pub active: Option<bool>,
}

impl Predicate<Source> for SourceFilter {
    fn matches(&self, item: &Source) -> bool {
        text_matches(&self.query, &[&item.name, &item.url])
            && enum_matches(self.kind, item.kind)
            && enum_matches(self.active, item.is_active)
    }
}

/// Collection page filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionFilter {
    /// Matched against title and summary
    pub query: String,
    /// Source type
    pub source_type: Option<CollectedSourceType>,
    /// Media format
    pub format: Option<ContentFormat>,
}

impl Predicate<CollectedItem> for CollectionFilter {
    fn matches(&self, item: &CollectedItem) -> bool {
        text_matches(&self.query, &[&item.title, &item.summary])
            && enum_matches(self.source_type, item.source_type)
            && enum_matches(self.format, item.format)
    }
}

/// Credibility check page filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckFilter {
    /// Matched against title, description and channel name
    pub query: String,
    /// Source platform, compared case-insensitively
    pub source: Option<String>,
}

impl Predicate<CheckItem> for CheckFilter {
    fn matches(&self, item: &CheckItem) -> bool {
        let source_ok = self
            .source
            .as_deref()
            .is_none_or(|s| s.trim().eq_ignore_ascii_case(item.source.trim()));

        source_ok
            && text_matches(
                &self.query,
                &[&item.title, &item.description, &item.channel_name],
            )
    }
}

/// Base post page filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasePostFilter {
    /// Matched against title and text
    pub query: String,
}

impl Predicate<BasePostItem> for BasePostFilter {
    fn matches(&self, item: &BasePostItem) -> bool {
        text_matches(&self.query, &[&item.title, &item.text])
    }
}

/// Publications list filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicationFilter {
    /// Matched against title, text and channel
    pub query: String,
    /// Target network
    pub network: Option<SocialNetwork>,
    /// Publication status
    pub status: Option<PublicationStatus>,
}

impl Predicate<PublicationItem> for PublicationFilter {
    fn matches(&self, item: &PublicationItem) -> bool {
        text_matches(&self.query, &[&item.title, &item.text, &item.channel])
            && enum_matches(self.network, item.network)
            && enum_matches(self.status, item.status)
    }
}

/// Prompt catalog filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptFilter {
    /// Matched against title, preview and tags
    pub query: String,
    /// Category, matched as a substring of any tag
    pub category: Option<String>,
    /// Target model
    pub model: Option<PromptModel>,
}

impl Predicate<Prompt> for PromptFilter {
    fn matches(&self, item: &Prompt) -> bool {
        let fields = [&item.title, &item.preview].into_iter().chain(&item.tags);
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|category| !item.tags.is_empty() && text_matches(category, &item.tags));

        text_matches(&self.query, fields) && category_ok && enum_matches(self.model, item.model)
    }
}

/// Assistants page filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssistantFilter {
    /// Matched against name and description
    pub query: String,
}

impl Predicate<Assistant> for AssistantFilter {
    fn matches(&self, item: &Assistant) -> bool {
        text_matches(&self.query, &[&item.name, &item.description])
    }
}

/// Generations gallery filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationFilter {
    /// Artifact kind
    pub kind: Option<GenerationKind>,
}

impl Predicate<Generation> for GenerationFilter {
    fn matches(&self, item: &Generation) -> bool {
        enum_matches(self.kind, item.kind)
    }
}

/// The prompt catalog with the user's liked set
///
/// The liked set starts from each prompt's `is_liked` flag; the library page
/// shows only liked prompts, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct PromptCatalog {
    prompts: Vec<Prompt>,
    liked: HashSet<String>,
}

impl PromptCatalog {
    /// Build a catalog from stored prompts
    pub fn new(prompts: Vec<Prompt>) -> Self {
        let liked = prompts
            .iter()
            .filter(|p| p.is_liked)
            .map(|p| p.id.clone())
            .collect();
        Self { prompts, liked }
    }

    /// All prompts, in catalog order
    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    /// Prompt by id (detail page)
    pub fn get(&self, id: &str) -> Option<&Prompt> {
        self.prompts.iter().find(|p| p.id == id)
    }

    /// Whether a prompt is liked
    pub fn is_liked(&self, id: &str) -> bool {
        self.liked.contains(id)
    }

    /// Like or unlike a prompt, returning the new state; unknown ids are ignored
    pub fn toggle_like(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        if self.liked.remove(id) {
            false
        } else {
            self.liked.insert(id.to_string());
            true
        }
    }

    /// Prompt with its `is_liked` flag synced to the liked set (for saving)
    pub fn with_like_state(&self, id: &str) -> Option<Prompt> {
        self.get(id).map(|p| Prompt {
            is_liked: self.is_liked(id),
            ..p.clone()
        })
    }

    /// Catalog page results
    pub fn search(&self, filter: &PromptFilter) -> Vec<Prompt> {
        filter_items(&self.prompts, filter)
    }

    /// Liked prompts, in catalog order
    pub fn library(&self) -> Vec<Prompt> {
        filter_items(&self.prompts, &|p: &Prompt| self.is_liked(&p.id))
    }

    /// Liked prompts matching a query
    pub fn search_library(&self, query: &str) -> Vec<Prompt> {
        let filter = PromptFilter {
            query: query.to_string(),
            ..PromptFilter::default()
        };
        filter_items(&self.library(), &filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CheckStatus, CollectionStatus, CredibilityScore};

    fn prompt(id: &str, title: &str, tags: &[&str], model: PromptModel, liked: bool) -> Prompt {
        Prompt {
            id: id.to_string(),
            title: title.to_string(),
            preview: format!("{title} preview"),
            tags: tags.iter().map(ToString::to_string).collect(),
            model,
            is_liked: liked,
        }
    }

    fn prompts() -> Vec<Prompt> {
        vec![
            prompt("1", "Marketing Copy Generator", &["Marketing", "Copywriting"], PromptModel::Gpt, true),
            prompt("2", "Code Review Assistant", &["Code", "Review"], PromptModel::Claude, false),
            prompt("3", "SEO Blog Writer", &["SEO", "Content"], PromptModel::Gpt, true),
            prompt("4", "Customer Support Bot", &["Support"], PromptModel::Gemini, false),
        ]
    }

    fn ids<T: crate::repo::Record>(items: &[T]) -> Vec<&str> {
        items.iter().map(crate::repo::Record::id).collect()
    }

    #[test]
    fn test_text_search_is_case_insensitive() {
        let upper = PromptFilter {
            query: "MARKETING".to_string(),
            ..PromptFilter::default()
        };
        let lower = PromptFilter {
            query: "marketing".to_string(),
            ..PromptFilter::default()
        };
        let items = prompts();
        assert_eq!(filter_items(&items, &upper), filter_items(&items, &lower));
        assert_eq!(ids(&filter_items(&items, &upper)), vec!["1"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let filter = PromptFilter {
            query: "e".to_string(),
            model: Some(PromptModel::Gpt),
            ..PromptFilter::default()
        };
        let once = filter_items(&prompts(), &filter);
        let twice = filter_items(&once, &filter);
        assert_eq!(once, twice);
        assert_eq!(ids(&once), vec!["1", "3"]);
    }

    #[test]
    fn test_empty_filter_keeps_everything_in_order() {
        let items = prompts();
        assert_eq!(filter_items(&items, &PromptFilter::default()), items);
    }

    #[test]
    fn test_prompt_category_matches_tag_substring() {
        let filter = PromptFilter {
            category: Some("content".to_string()),
            ..PromptFilter::default()
        };
        assert_eq!(ids(&filter_items(&prompts(), &filter)), vec!["3"]);

        let no_tags = prompt("5", "Untagged", &[], PromptModel::Gpt, false);
        assert!(!filter.matches(&no_tags));
    }

    #[test]
    fn test_collection_filter() {
        let mut video = CollectedItem::sample("2", CollectionStatus::New);
        video.format = ContentFormat::Video;
        video.summary = "Neural networks explained".to_string();
        let items = vec![CollectedItem::sample("1", CollectionStatus::New), video];

        let filter = CollectionFilter {
            query: "NEURAL".to_string(),
            format: Some(ContentFormat::Video),
            ..CollectionFilter::default()
        };
        assert_eq!(ids(&filter_items(&items, &filter)), vec!["2"]);

        let by_type = CollectionFilter {
            source_type: Some(CollectedSourceType::Rss),
            ..CollectionFilter::default()
        };
        assert!(filter_items(&items, &by_type).is_empty());
    }

    #[test]
    fn test_check_source_equality_ignores_case() {
        let item = CheckItem {
            id: "1".to_string(),
            source: "Telegram".to_string(),
            source_icon: "📱".to_string(),
            channel_name: "@technews".to_string(),
            title: "GPT-5 announced".to_string(),
            credibility_score: CredibilityScore::new(92).unwrap(),
            description: "Official blog post".to_string(),
            status: CheckStatus::Pending,
        };
        let filter = CheckFilter {
            source: Some("telegram".to_string()),
            query: "technews".to_string(),
        };
        assert!(filter.matches(&item));

        let other = CheckFilter {
            source: Some("tele".to_string()),
            ..CheckFilter::default()
        };
        assert!(!other.matches(&item));
    }

    #[test]
    fn test_publication_filter() {
        let mut tg = PublicationItem::sample("1", PublicationStatus::Draft);
        tg.network = SocialNetwork::Telegram;
        let vk = PublicationItem::sample("2", PublicationStatus::Published);
        let items = vec![tg, vk];

        let filter = PublicationFilter {
            network: Some(SocialNetwork::Vk),
            status: Some(PublicationStatus::Published),
            query: "vk group".to_string(),
        };
        assert_eq!(ids(&filter_items(&items, &filter)), vec!["2"]);
    }

    #[test]
    fn test_closure_predicate() {
        let items = prompts();
        let claude = filter_items(&items, &|p: &Prompt| p.model == PromptModel::Claude);
        assert_eq!(ids(&claude), vec!["2"]);
    }

    #[test]
    fn test_catalog_likes_and_library() {
        let mut catalog = PromptCatalog::new(prompts());
        assert_eq!(ids(&catalog.library()), vec!["1", "3"]);

        assert!(catalog.toggle_like("4"));
        assert!(!catalog.toggle_like("1"));
        assert!(!catalog.toggle_like("missing"));
        assert_eq!(ids(&catalog.library()), vec!["3", "4"]);
        assert_eq!(ids(&catalog.search_library("support")), vec!["4"]);
        assert!(catalog.with_like_state("4").unwrap().is_liked);
    }
}
