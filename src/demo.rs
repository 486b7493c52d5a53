//! Demo content
//!
//! Nothing in Astra talks to real feeds, models or payment providers. A fresh
//! store is filled with this content so every page has something to show.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::error::Result;
use crate::models::{
    Assistant, BasePostItem, BasePostStatus, ChatMessage, CheckItem, CheckStatus, CollectedItem,
    CollectedSourceType, CollectionStatus, ContentFormat, CredibilityScore, Generation,
    GenerationKind, Prompt, PromptModel, PublicationItem, PublicationStatus, Role, SocialNetwork,
    SocialPost, Source, SourceKind,
};
use crate::pipeline::AdaptationBoard;
use crate::repo::{Repository, Store};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).single()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// Registered sources, synced relative to `now`
pub fn sources(now: DateTime<Utc>) -> Vec<Source> {
    let source = |id: &str, kind, name: &str, url: &str, is_active, minutes_ago, items_count| Source {
        id: id.to_string(),
        kind,
        name: name.to_string(),
        url: url.to_string(),
        is_active,
        last_sync: Some(now - Duration::minutes(minutes_ago)),
        items_count,
    };

    vec![
        source("1", SourceKind::Rss, "Habr - News", "https://habr.com/ru/rss/", true, 10, 156),
        source("2", SourceKind::Telegram, "@technews_ru", "https://t.me/technews_ru", true, 5, 89),
        source("3", SourceKind::Youtube, "TechReviews", "https://youtube.com/@techreviews", false, 120, 45),
        source("4", SourceKind::Dzen, "AI News Dzen", "https://dzen.ru/ainews", true, 30, 234),
    ]
}

/// Items awaiting triage
pub fn collected_items() -> Vec<CollectedItem> {
    vec![
        CollectedItem {
            id: "1".to_string(),
            title: "New AI technologies: what awaits us in 2025".to_string(),
            source: "Tech News".to_string(),
            source_type: CollectedSourceType::Telegram,
            date: date(2025, 1, 14),
            format: ContentFormat::Text,
            summary: "Overview of recent advances in artificial intelligence and forecasts for the coming year.".to_string(),
            status: CollectionStatus::New,
            original_url: Some("https://example.com/article1".to_string()),
        },
        CollectedItem {
            id: "2".to_string(),
            title: "Infographic: social media trends".to_string(),
            source: "Marketing Pro".to_string(),
            source_type: CollectedSourceType::Rss,
            date: date(2025, 1, 13),
            format: ContentFormat::Photo,
            summary: "Visual overview of the key SMM trends for 2025 with research data.".to_string(),
            status: CollectionStatus::New,
            original_url: Some("https://example.com/article2".to_string()),
        },
        CollectedItem {
            id: "3".to_string(),
            title: "Video review: best tools for content makers".to_string(),
            source: "Content Hub".to_string(),
            source_type: CollectedSourceType::Vk,
            date: date(2025, 1, 12),
            format: ContentFormat::Video,
            summary: "A detailed look at 10 tools that speed up content creation.".to_string(),
            status: CollectionStatus::InProgress,
            original_url: Some("https://example.com/video1".to_string()),
        },
        CollectedItem {
            id: "4".to_string(),
            title: "How to grow reach on Telegram".to_string(),
            source: "SMM Academy".to_string(),
            source_type: CollectedSourceType::Telegram,
            date: date(2025, 1, 11),
            format: ContentFormat::Text,
            summary: "Practical advice on promoting Telegram channels from industry experts.".to_string(),
            status: CollectionStatus::New,
            original_url: None,
        },
        CollectedItem {
            id: "5".to_string(),
            title: "Case study: 300% follower growth in a month".to_string(),
            source: "Growth Hackers".to_string(),
            source_type: CollectedSourceType::Manual,
            date: date(2025, 1, 10),
            format: ContentFormat::Text,
            summary: "A breakdown of the promotion strategy behind impressive results.".to_string(),
            status: CollectionStatus::Rejected,
            original_url: None,
        },
    ]
}

/// Items under credibility review
pub fn check_items() -> Result<Vec<CheckItem>> {
    let item = |id: &str,
                source: &str,
                source_icon: &str,
                channel_name: &str,
                title: &str,
                score: u8,
                description: &str|
     -> Result<CheckItem> {
        Ok(CheckItem {
            id: id.to_string(),
            source: source.to_string(),
            source_icon: source_icon.to_string(),
            channel_name: channel_name.to_string(),
            title: title.to_string(),
            credibility_score: CredibilityScore::new(score)?,
            description: description.to_string(),
            status: CheckStatus::Pending,
        })
    };

    Ok(vec![
        item(
            "1",
            "Habr",
            "📡",
            "Habr - Technology",
            "New AI technologies: what awaits us in 2025",
            92,
            "Overview of the main trends in artificial intelligence for the coming year",
        )?,
        item(
            "2",
            "Telegram",
            "📱",
            "@technews_ru",
            "Launch of a new video generation service",
            78,
            "OpenAI presented a new tool for creating video from text",
        )?,
        item(
            "3",
            "YouTube",
            "🎬",
            "TechReviews Channel",
            "GPT-5 review: what's new?",
            65,
            "A first look at the capabilities of the new language model",
        )?,
        item(
            "4",
            "Dzen",
            "📰",
            "AI News Dzen",
            "How AI is changing the job market",
            45,
            "Analysis of the impact of automation on various professions",
        )?,
    ])
}

/// Generated base posts
pub fn base_posts() -> Vec<BasePostItem> {
    vec![
        BasePostItem {
            id: "1".to_string(),
            title: "New AI technologies: what awaits us in 2025".to_string(),
            text: "Artificial intelligence keeps developing at a rapid pace...".to_string(),
            image: Some("/placeholder.svg".to_string()),
            model: "GPT-4".to_string(),
            prompt: "Write a post about AI trends in 2025".to_string(),
            base_post: "Finished base post with key theses...".to_string(),
            social_networks: vec![SocialNetwork::Telegram, SocialNetwork::Vk, SocialNetwork::Instagram],
            status: BasePostStatus::Ready,
        },
        BasePostItem {
            id: "2".to_string(),
            title: "Launch of a new video generation service".to_string(),
            text: "OpenAI presented a new tool for creating video...".to_string(),
            image: None,
            model: "Claude 3".to_string(),
            prompt: "News about Sora from OpenAI".to_string(),
            base_post: "Generated base post...".to_string(),
            social_networks: vec![SocialNetwork::Telegram, SocialNetwork::Shorts],
            status: BasePostStatus::Draft,
        },
        BasePostItem {
            id: "3".to_string(),
            title: "GPT-5 review: what's new?".to_string(),
            text: "A first look at the capabilities of the new language model...".to_string(),
            image: Some("/placeholder.svg".to_string()),
            model: "GPT-4".to_string(),
            prompt: "GPT-5 review".to_string(),
            base_post: "Base post for the review...".to_string(),
            social_networks: vec![SocialNetwork::Telegram, SocialNetwork::Vk],
            status: BasePostStatus::Draft,
        },
    ]
}

/// Publications in every status
pub fn publications() -> Vec<PublicationItem> {
    vec![
        PublicationItem {
            id: "1".to_string(),
            title: "New AI technologies".to_string(),
            text: "🤖 Artificial intelligence keeps developing...".to_string(),
            image: Some("/placeholder.svg".to_string()),
            network: SocialNetwork::Telegram,
            channel: "@my_tech_channel".to_string(),
            status: PublicationStatus::Scheduled,
            publish_date: at(2025, 1, 20, 10, 0),
        },
        PublicationItem {
            id: "2".to_string(),
            title: "New AI technologies".to_string(),
            text: "Artificial intelligence keeps developing at a rapid pace...".to_string(),
            image: Some("/placeholder.svg".to_string()),
            network: SocialNetwork::Vk,
            channel: "My VK group".to_string(),
            status: PublicationStatus::Draft,
            publish_date: None,
        },
        PublicationItem {
            id: "3".to_string(),
            title: String::new(),
            text: "AI in 2025 🚀 Trends that will change everything...".to_string(),
            image: Some("/placeholder.svg".to_string()),
            network: SocialNetwork::Instagram,
            channel: "@my_instagram".to_string(),
            status: PublicationStatus::Draft,
            publish_date: None,
        },
        PublicationItem {
            id: "4".to_string(),
            title: "AI in 2025".to_string(),
            text: "🤖 The future is already here! TOP-3 AI trends...".to_string(),
            image: None,
            network: SocialNetwork::Shorts,
            channel: "My YouTube Channel".to_string(),
            status: PublicationStatus::Published,
            publish_date: at(2025, 1, 15, 14, 30),
        },
    ]
}

/// Adaptations of the first base post, partially checked
pub fn adaptation_board() -> AdaptationBoard {
    let title = "New AI technologies: what awaits us in 2025";

    let mut telegram = SocialPost::new(
        SocialNetwork::Telegram,
        title,
        "🤖 Artificial intelligence keeps developing at a rapid pace!\n\n\
         In 2025 we expect:\n\n\
         ✨ More accurate image and video generation\n\
         📱 AI built into everyday apps\n\
         🤝 Personal AI assistants\n\n\
         #AI #Technology #Future",
    );
    telegram.is_text_ready = true;
    telegram.is_verified = true;

    let mut vk = SocialPost::new(
        SocialNetwork::Vk,
        title,
        "Artificial intelligence keeps developing at a rapid pace. In 2025 we expect \
         breakthroughs in generative models, multimodal systems and autonomous agents.\n\n\
         Key trends:\n\
         • More accurate image and video generation\n\
         • AI built into everyday apps\n\
         • Personal AI assistants\n\n\
         #AI #artificialintelligence #technology",
    );
    vk.is_text_ready = true;
    vk.is_verified = true;

    let instagram = SocialPost::new(
        SocialNetwork::Instagram,
        "",
        "Artificial intelligence in 2025 🚀\n\n\
         Trends that will change everything:\n\n\
         1️⃣ Next-generation generative models\n\
         2️⃣ AI in every app\n\
         3️⃣ Personal assistants\n\n\
         Are you ready for the future? 🤖\n\n\
         #AI #ArtificialIntelligence #Tech #Future #Innovation #Technology2025",
    );

    let shorts = SocialPost::new(
        SocialNetwork::Shorts,
        "AI in 2025",
        "🤖 The future is already here!\n\n\
         TOP-3 AI trends in 2025:\n\
         ✨ Content generation\n\
         📱 Smart apps\n\
         🤝 Personal bots\n\n\
         #AI #Shorts #Technology",
    );

    AdaptationBoard::new(vec![telegram, vk, instagram, shorts])
}

/// Assistant personas
pub fn assistants() -> Vec<Assistant> {
    let assistant = |id: &str, name: &str, description: &str, icon: &str, color: &str| Assistant {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
    };

    vec![
        assistant(
            "1",
            "Copywriter",
            "Expert in crafting compelling marketing copy, headlines, and persuasive content that converts readers into customers.",
            "✍️",
            "#3B82F6",
        ),
        assistant(
            "2",
            "Programmer",
            "Full-stack development assistant skilled in debugging, code optimization, and implementing new features across multiple languages.",
            "💻",
            "#10B981",
        ),
        assistant(
            "3",
            "Data Analyst",
            "Transform raw data into actionable insights with statistical analysis, visualization recommendations, and trend identification.",
            "📊",
            "#8B5CF6",
        ),
        assistant(
            "4",
            "UX Designer",
            "User experience expert providing interface feedback, accessibility audits, and design improvement suggestions.",
            "🎨",
            "#F59E0B",
        ),
        assistant(
            "5",
            "SEO Specialist",
            "Optimize content for search engines with keyword research, meta tag suggestions, and content structure improvements.",
            "🔍",
            "#EF4444",
        ),
        assistant(
            "6",
            "Legal Advisor",
            "Review contracts, terms of service, and legal documents with suggestions for clarity and compliance.",
            "⚖️",
            "#6366F1",
        ),
    ]
}

/// Prompt catalog
pub fn prompts() -> Vec<Prompt> {
    let prompt = |id: &str, title: &str, preview: &str, tags: &[&str], model, is_liked| Prompt {
        id: id.to_string(),
        title: title.to_string(),
        preview: preview.to_string(),
        tags: strings(tags),
        model,
        is_liked,
    };

    vec![
        prompt(
            "1",
            "Marketing Email Generator",
            "Create compelling marketing emails that convert. This prompt helps you craft persuasive copy with strong CTAs, personalized greetings, and benefit-focused content that drives engagement.",
            &["marketing", "email", "copywriting"],
            PromptModel::Gpt,
            true,
        ),
        prompt(
            "2",
            "Code Review Assistant",
            "Get detailed code reviews with suggestions for improvements, best practices, and potential bugs. Perfect for maintaining code quality in your projects.",
            &["code", "development", "review"],
            PromptModel::Claude,
            false,
        ),
        prompt(
            "3",
            "Blog Post Outline Creator",
            "Generate structured blog post outlines with engaging headlines, subheadings, and key points. Optimized for SEO and reader engagement.",
            &["content", "blogging", "SEO"],
            PromptModel::Gpt,
            false,
        ),
        prompt(
            "4",
            "Product Description Writer",
            "Transform features into benefits with compelling product descriptions that sell. Perfect for e-commerce and landing pages.",
            &["ecommerce", "copywriting", "sales"],
            PromptModel::Gemini,
            true,
        ),
        prompt(
            "5",
            "SQL Query Optimizer",
            "Analyze and optimize SQL queries for better performance. Get suggestions for indexing, query restructuring, and best practices.",
            &["database", "SQL", "optimization"],
            PromptModel::Claude,
            false,
        ),
        prompt(
            "6",
            "Social Media Caption Generator",
            "Create engaging social media captions with relevant hashtags and emojis. Optimized for different platforms and audiences.",
            &["social", "marketing", "engagement"],
            PromptModel::Gpt,
            false,
        ),
        prompt(
            "7",
            "Technical Documentation Writer",
            "Generate clear, concise technical documentation from code or specifications. Includes API references, guides, and examples.",
            &["documentation", "technical", "API"],
            PromptModel::Claude,
            true,
        ),
        prompt(
            "8",
            "Customer Support Response",
            "Craft empathetic and helpful customer support responses. Handles complaints, inquiries, and feedback professionally.",
            &["support", "customer", "service"],
            PromptModel::Gemini,
            false,
        ),
    ]
}

/// Past generations, relative to `now`
pub fn generations(now: DateTime<Utc>) -> Vec<Generation> {
    let generation = |id: &str, kind, title: &str, hours_ago: i64, preview: Option<&str>| Generation {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        created_at: now - Duration::hours(hours_ago),
        preview: preview.map(ToString::to_string),
    };

    vec![
        generation("1", GenerationKind::Photo, "Sunset in the mountains", 2, None),
        generation("2", GenerationKind::Video, "Sea waves", 5, None),
        generation("3", GenerationKind::Photo, "Portrait", 24, None),
        generation(
            "4",
            GenerationKind::Text,
            "Article about marketing",
            26,
            Some("Marketing is the process of creating value for customers..."),
        ),
        generation("5", GenerationKind::Photo, "Abstraction", 48, None),
        generation("6", GenerationKind::Video, "City timelapse", 72, None),
        generation("7", GenerationKind::Photo, "Space", 96, None),
        generation(
            "8",
            GenerationKind::Text,
            "Social media post",
            120,
            Some("How to grab the audience's attention in the first seconds..."),
        ),
    ]
}

/// A short example conversation
pub fn chat_history(now: DateTime<Utc>) -> Vec<ChatMessage> {
    let earlier = now - Duration::minutes(2);
    vec![
        ChatMessage::new(
            Role::User,
            "Can you help me write a marketing email for our new product launch?",
            earlier,
        ),
        ChatMessage::new(
            Role::Assistant,
            "I'd be happy to help you craft a compelling marketing email! To create the most \
             effective email, I'll need a few details:\n\n\
             1. What is the product you're launching?\n\
             2. Who is your target audience?\n\
             3. What's the main benefit or value proposition?\n\
             4. Do you have any specific call-to-action in mind?",
            earlier,
        ),
    ]
}

fn insert_all<T, S>(store: &mut S, items: Vec<T>) -> Result<usize>
where
    T: crate::repo::Record,
    S: Repository<T> + ?Sized,
{
    let count = items.len();
    for item in &items {
        store.insert(item)?;
    }
    Ok(count)
}

/// Insert all demo records, returning how many were added
pub fn seed(store: &mut dyn Store) -> Result<usize> {
    let now = Utc::now();
    let mut total = 0;
    total += insert_all(store, sources(now))?;
    total += insert_all(store, collected_items())?;
    total += insert_all(store, check_items()?)?;
    total += insert_all(store, base_posts())?;
    total += insert_all(store, publications())?;
    total += insert_all(store, assistants())?;
    total += insert_all(store, prompts())?;
    tracing::info!("Seeded {} demo records", total);
    Ok(total)
}

/// Seed only a store that has nothing in it yet
pub fn seed_if_empty(store: &mut dyn Store) -> Result<bool> {
    if !store.is_empty()? {
        return Ok(false);
    }
    seed(store)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{PromptCatalog, PromptFilter};
    use crate::pipeline::count_by_status;
    use crate::repo::MemoryStore;

    #[test]
    fn test_seed_once() {
        let mut store = MemoryStore::new();
        assert!(seed_if_empty(&mut store).unwrap());
        assert!(!seed_if_empty(&mut store).unwrap());
        assert_eq!(Repository::<Prompt>::count(&store).unwrap(), 8);
        assert_eq!(Repository::<Source>::count(&store).unwrap(), 4);
    }

    #[test]
    fn test_demo_board_is_not_ready() {
        let board = adaptation_board();
        assert_eq!(board.posts().len(), 4);
        assert!(!board.can_publish());
        assert_eq!(board.ready_count(), 0);
    }

    #[test]
    fn test_demo_collection_counts() {
        let counts = count_by_status(&collected_items());
        assert_eq!(
            counts,
            vec![
                (CollectionStatus::New, 3),
                (CollectionStatus::InProgress, 1),
                (CollectionStatus::Rejected, 1),
            ]
        );
    }

    #[test]
    fn test_demo_catalog_search() {
        let catalog = PromptCatalog::new(prompts());
        let found = catalog.search(&PromptFilter {
            query: "MARKETING".to_string(),
            ..PromptFilter::default()
        });
        let ids: Vec<_> = found.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "6"]);
        assert_eq!(catalog.library().len(), 3);
    }
}
