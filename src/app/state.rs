//! Application state

use anyhow::Result;
use chrono::Utc;

use crate::chat::{ChatCommand, ChatEvent, ChatSession};
use crate::columns::ColumnSet;
use crate::config::Config;
use crate::demo;
use crate::error::Error;
use crate::filter::{
    AssistantFilter, BasePostFilter, CheckFilter, CollectionFilter, GenerationFilter,
    PromptCatalog, PromptFilter, PublicationFilter, SourceFilter, filter_items,
};
use crate::models::{
    Assistant, BasePostItem, BillingPeriod, CheckItem, CollectedItem, ContentFormat, Generation,
    GenerationKind, PaymentMethod, Prompt, PublicationItem, PublicationStatus, SocialNetwork,
    Source, SourceKind, StudioField, StudioSettings, SupportTicket, TicketCategory, TopUp,
};
use crate::pipeline::{self, Action, AdaptationBoard, EditorialSettings, ReadinessFlag, StatusMachine};
use crate::repo::{Repository, Store};
use crate::routes::Route;
use crate::theme::Theme;

/// Ticks a notification stays in the status bar (about five seconds)
const STATUS_TTL: u64 = 100;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Browsing pages
    #[default]
    Normal,
    /// Help popup
    Help,
    /// Theme picker popup
    ThemePicker,
    /// Single-line text entry
    Input(InputTarget),
}

/// What the input line is being typed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    /// Live filter for the current page
    Search,
    /// Chat message
    Chat,
    /// `<kind> <url> <name>`
    NewSource,
    /// `<name> | <description>`
    NewAssistant,
    /// `<category> | <subject> | <message>`
    Ticket,
    /// Top-up amount
    TopUp,
    /// Replacement text for one network's adaptation
    Adaptation(SocialNetwork),
    /// Prompt for the photo or video studio
    Generation(GenerationKind),
}

impl InputTarget {
    /// Popup title
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::Chat => "Message",
            Self::NewSource => "Add source",
            Self::NewAssistant => "New assistant",
            Self::Ticket => "New support ticket",
            Self::TopUp => "Top up balance",
            Self::Adaptation(_) => "Edit adaptation",
            Self::Generation(GenerationKind::Video) => "Describe the video",
            Self::Generation(_) => "Describe the image",
        }
    }

    /// Format reminder shown under the input
    pub const fn hint(&self) -> &'static str {
        match self {
            Self::Search => "type to filter │ ↵ keep │ Esc clear",
            Self::Chat => "↵ send │ Esc cancel",
            Self::NewSource => "<kind> <url> <name>  (rss telegram youtube rutube tiktok dzen vk)",
            Self::NewAssistant => "<name> | <description>",
            Self::Ticket => "<category> | <subject> | <message>  (technical billing suggestion partnership other)",
            Self::TopUp => "custom amount  (one gem per ₽; keys 1-4 buy a preset with bonus)",
            Self::Adaptation(_) => "↵ save │ Esc cancel",
            Self::Generation(_) => "↵ generate │ Esc cancel",
        }
    }
}

/// Application state
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Record store
    pub store: Box<dyn Store>,
    /// Whether to quit
    pub should_quit: bool,
    /// Current theme
    pub theme: Theme,
    /// Current mode
    pub mode: Mode,
    /// Highlighted entry in the theme picker
    pub theme_picker_index: usize,

    /// Current page
    pub route: Route,
    /// Selected row on the current page
    pub selected: usize,
    /// Free-text filter for the current page
    pub search: String,
    /// Input line buffer
    pub input: String,

    /// Source registry snapshot, refreshed after every change
    pub sources: Vec<Source>,
    /// Collected items snapshot
    pub collection: Vec<CollectedItem>,
    /// Credibility check snapshot
    pub checks: Vec<CheckItem>,
    /// Base posts snapshot
    pub base_posts: Vec<BasePostItem>,
    /// Publications snapshot
    pub publications: Vec<PublicationItem>,
    /// Assistants snapshot
    pub assistants: Vec<Assistant>,
    /// Submitted support tickets
    pub tickets: Vec<SupportTicket>,
    /// Generation gallery
    pub generations: Vec<Generation>,
    /// Prompt catalog with likes
    pub catalog: PromptCatalog,

    /// Collection page filter (the text query comes from `search`)
    pub collection_filter: CollectionFilter,
    /// Check page filter
    pub check_filter: CheckFilter,
    /// Publications page filter
    pub publication_filter: PublicationFilter,
    /// Prompt catalog filter
    pub prompt_filter: PromptFilter,
    /// Generations gallery filter
    pub generation_filter: GenerationFilter,
    /// Prompts page shows only liked prompts
    pub show_library: bool,

    /// Collection table columns
    pub collection_columns: ColumnSet,
    /// Check table columns
    pub check_columns: ColumnSet,
    /// Publications table columns
    pub publication_columns: ColumnSet,

    /// Base post being verified
    pub editing: Option<BasePostItem>,
    /// Tone, length, style and networks for the adaptation
    pub editorial: EditorialSettings,
    /// Per-network adaptations awaiting approval
    pub board: AdaptationBoard,

    /// Chat transcript
    pub chat: ChatSession,

    /// Subscription page billing period
    pub billing_period: BillingPeriod,
    /// Payment method for top-ups
    pub payment_method: PaymentMethod,
    /// Photo studio form
    pub photo_studio: StudioSettings,
    /// Video studio form
    pub video_studio: StudioSettings,
    /// Gem balance
    pub gems: u32,

    /// Status message (bottom bar)
    pub status: String,
    status_tick: u64,
    /// Tick counter for animations
    tick: u64,
}

impl AppState {
    /// Create a new app state over an opened store
    pub fn new(config: Config, store: Box<dyn Store>) -> Result<Self> {
        let theme = config.theme;
        let editorial = EditorialSettings::with_networks(config.default_networks.clone());
        let board = if config.seed_demo_data {
            demo::adaptation_board()
        } else {
            AdaptationBoard::default()
        };
        let generations = if config.seed_demo_data {
            demo::generations(Utc::now())
        } else {
            Vec::new()
        };
        let chat = ChatSession::new(config.chat_overlap);

        let mut state = Self {
            config,
            store,
            should_quit: false,
            theme,
            mode: Mode::Normal,
            theme_picker_index: 0,
            route: Route::Home,
            selected: 0,
            search: String::new(),
            input: String::new(),
            sources: Vec::new(),
            collection: Vec::new(),
            checks: Vec::new(),
            base_posts: Vec::new(),
            publications: Vec::new(),
            assistants: Vec::new(),
            tickets: Vec::new(),
            generations,
            catalog: PromptCatalog::default(),
            collection_filter: CollectionFilter::default(),
            check_filter: CheckFilter::default(),
            publication_filter: PublicationFilter::default(),
            prompt_filter: PromptFilter::default(),
            generation_filter: GenerationFilter::default(),
            show_library: false,
            collection_columns: ColumnSet::collection(),
            check_columns: ColumnSet::check(),
            publication_columns: ColumnSet::publications(),
            editing: None,
            editorial,
            board,
            chat,
            billing_period: BillingPeriod::default(),
            payment_method: PaymentMethod::default(),
            photo_studio: StudioSettings::new(GenerationKind::Photo),
            video_studio: StudioSettings::new(GenerationKind::Video),
            gems: 0,
            status: String::new(),
            status_tick: 0,
            tick: 0,
        };
        state.reload()?;
        Ok(state)
    }

    /// Refresh every snapshot from the store
    pub fn reload(&mut self) -> crate::Result<()> {
        let store = &*self.store;
        self.sources = Repository::<Source>::list(store)?;
        self.collection = Repository::<CollectedItem>::list(store)?;
        self.checks = Repository::<CheckItem>::list(store)?;
        self.base_posts = Repository::<BasePostItem>::list(store)?;
        self.publications = Repository::<PublicationItem>::list(store)?;
        self.assistants = Repository::<Assistant>::list(store)?;
        self.tickets = Repository::<SupportTicket>::list(store)?;
        self.catalog = PromptCatalog::new(Repository::<Prompt>::list(store)?);
        tracing::debug!("Reloaded snapshots from store");
        Ok(())
    }

    /// Tick for animations and notification expiry
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if !self.status.is_empty() && self.tick.wrapping_sub(self.status_tick) > STATUS_TTL {
            self.status.clear();
        }
    }

    /// Get current tick
    pub const fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Show a transient notification
    pub fn notify(&mut self, msg: impl Into<String>) {
        self.status = msg.into();
        self.status_tick = self.tick;
    }

    /// Surface an error in the status bar
    pub fn report(&mut self, err: &Error) {
        if err.is_user_error() {
            self.notify(format!("⚠️ {err}"));
        } else {
            tracing::warn!("{}", err);
            self.notify(format!("❌ {err}"));
        }
    }

    fn finish(&mut self, result: crate::Result<String>) {
        let result = result.and_then(|msg| self.reload().map(|()| msg));
        match result {
            Ok(msg) => self.notify(msg),
            Err(e) => self.report(&e),
        }
    }

    // Navigation

    /// Open a page, resetting selection and search
    pub fn navigate(&mut self, route: Route) {
        tracing::debug!("Navigate to {}", route);
        self.route = route;
        self.selected = 0;
        self.search.clear();
        self.mode = Mode::Normal;
    }

    /// Open a page by path
    pub fn navigate_path(&mut self, path: &str) {
        self.navigate(Route::resolve(path));
    }

    fn menu_position(&self) -> usize {
        let current = match &self.route {
            Route::PromptDetail(_) => Route::Prompts,
            other => other.clone(),
        };
        Route::menu().iter().position(|r| *r == current).unwrap_or(0)
    }

    /// Next page in menu order
    pub fn next_page(&mut self) {
        let menu = Route::menu();
        let idx = (self.menu_position() + 1) % menu.len();
        self.navigate(menu[idx].clone());
    }

    /// Previous page in menu order
    pub fn prev_page(&mut self) {
        let menu = Route::menu();
        let idx = (self.menu_position() + menu.len() - 1) % menu.len();
        self.navigate(menu[idx].clone());
    }

    /// Rows on the current page
    pub fn row_count(&self) -> usize {
        match self.route {
            Route::Sources => self.visible_sources().len(),
            Route::Collection => self.visible_collection().len(),
            Route::Check => self.visible_checks().len(),
            Route::BasePost => self.visible_base_posts().len(),
            Route::Publications => self.visible_publications().len(),
            Route::Prompts => self.visible_prompts().len(),
            Route::Assistants => self.visible_assistants().len(),
            Route::Generations => self.visible_generations().len(),
            Route::PublicationEdit => self.board.posts().len(),
            Route::Support => self.tickets.len(),
            _ => 0,
        }
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        let count = self.row_count();
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    /// Move selection up
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Jump to the last row
    pub fn select_last(&mut self) {
        self.selected = self.row_count().saturating_sub(1);
    }

    /// Cycle through themes
    pub fn next_theme(&mut self) {
        self.theme = self.theme.next();
        self.config.theme = self.theme;
    }

    // Filtered views

    /// Sources matching the search
    pub fn visible_sources(&self) -> Vec<Source> {
        let filter = SourceFilter {
            query: self.search.clone(),
            ..SourceFilter::default()
        };
        filter_items(&self.sources, &filter)
    }

    /// Collected items matching search and filters
    pub fn visible_collection(&self) -> Vec<CollectedItem> {
        let filter = CollectionFilter {
            query: self.search.clone(),
            ..self.collection_filter.clone()
        };
        filter_items(&self.collection, &filter)
    }

    /// Check items matching search and filters
    pub fn visible_checks(&self) -> Vec<CheckItem> {
        let filter = CheckFilter {
            query: self.search.clone(),
            ..self.check_filter.clone()
        };
        filter_items(&self.checks, &filter)
    }

    /// Base posts matching the search
    pub fn visible_base_posts(&self) -> Vec<BasePostItem> {
        let filter = BasePostFilter {
            query: self.search.clone(),
        };
        filter_items(&self.base_posts, &filter)
    }

    /// Publications matching search and filters
    pub fn visible_publications(&self) -> Vec<PublicationItem> {
        let filter = PublicationFilter {
            query: self.search.clone(),
            ..self.publication_filter.clone()
        };
        filter_items(&self.publications, &filter)
    }

    /// Catalog or library prompts matching the search
    pub fn visible_prompts(&self) -> Vec<Prompt> {
        if self.show_library {
            return self.catalog.search_library(&self.search);
        }
        let filter = PromptFilter {
            query: self.search.clone(),
            ..self.prompt_filter.clone()
        };
        self.catalog.search(&filter)
    }

    /// Assistants matching the search
    pub fn visible_assistants(&self) -> Vec<Assistant> {
        let filter = AssistantFilter {
            query: self.search.clone(),
        };
        filter_items(&self.assistants, &filter)
    }

    /// Generations of the selected kind
    pub fn visible_generations(&self) -> Vec<Generation> {
        filter_items(&self.generations, &self.generation_filter)
    }

    // Filter cycling

    /// Cycle the enum filter of the current page
    pub fn cycle_filter(&mut self) {
        match self.route {
            Route::Collection => {
                self.collection_filter.format = cycle(ContentFormat::all(), self.collection_filter.format);
            }
            Route::Check => {
                let mut sources: Vec<String> = Vec::new();
                for item in &self.checks {
                    if !sources.contains(&item.source) {
                        sources.push(item.source.clone());
                    }
                }
                let current = self
                    .check_filter
                    .source
                    .as_ref()
                    .and_then(|s| sources.iter().position(|x| x == s));
                self.check_filter.source = match current {
                    None => sources.first().cloned(),
                    Some(i) => sources.get(i + 1).cloned(),
                };
            }
            Route::Publications => {
                self.publication_filter.status =
                    cycle(PublicationStatus::ALL, self.publication_filter.status);
            }
            Route::Prompts => {
                self.prompt_filter.model = cycle(crate::models::PromptModel::all(), self.prompt_filter.model);
            }
            Route::Generations => {
                self.generation_filter.kind = cycle(GenerationKind::all(), self.generation_filter.kind);
            }
            _ => return,
        }
        self.selected = 0;
    }

    /// Cycle the secondary filter (collection source type, publication network, prompt category)
    pub fn cycle_secondary_filter(&mut self) {
        match self.route {
            Route::Collection => {
                self.collection_filter.source_type = cycle(
                    crate::models::CollectedSourceType::all(),
                    self.collection_filter.source_type,
                );
            }
            Route::Publications => {
                self.publication_filter.network =
                    cycle(SocialNetwork::all(), self.publication_filter.network);
            }
            Route::Prompts => {
                let categories = crate::models::PROMPT_CATEGORIES;
                let current = self
                    .prompt_filter
                    .category
                    .as_deref()
                    .and_then(|c| categories.iter().position(|x| *x == c));
                self.prompt_filter.category = match current {
                    None => categories.first().map(ToString::to_string),
                    Some(i) => categories.get(i + 1).map(ToString::to_string),
                };
            }
            _ => return,
        }
        self.selected = 0;
    }

    /// Toggle the n-th column of the current table page
    pub fn toggle_column(&mut self, index: usize) {
        let columns = match self.route {
            Route::Collection => &mut self.collection_columns,
            Route::Check => &mut self.check_columns,
            Route::Publications => &mut self.publication_columns,
            _ => return,
        };
        if let Some(visible) = columns.toggle_at(index) {
            let label = columns.all()[index].label;
            self.notify(format!("{label} column {}", if visible { "shown" } else { "hidden" }));
        }
    }

    // Pipeline actions

    /// Apply a workflow action to the selected row
    pub fn advance_selected(&mut self, action: Action) {
        let id = match self.route {
            Route::Collection => self.visible_collection().get(self.selected).map(|i| i.id.clone()),
            Route::Check => self.visible_checks().get(self.selected).map(|i| i.id.clone()),
            Route::BasePost => self.visible_base_posts().get(self.selected).map(|i| i.id.clone()),
            Route::Publications => self.visible_publications().get(self.selected).map(|i| i.id.clone()),
            _ => None,
        };
        let Some(id) = id else { return };

        let store = &mut *self.store;
        let result = match self.route {
            Route::Collection => pipeline::advance::<CollectedItem, _>(store, &id, action).map(|i| i.title),
            Route::Check => pipeline::advance::<CheckItem, _>(store, &id, action).map(|i| i.title),
            Route::BasePost => pipeline::advance::<BasePostItem, _>(store, &id, action).map(|i| i.title),
            _ => pipeline::advance::<PublicationItem, _>(store, &id, action).map(|i| i.title),
        };

        let verb = match action {
            Action::Approve => "✅ Approved",
            Action::Reject => "🚫 Rejected",
            Action::Publish => "📤 Published",
            Action::Cancel => "↩️ Cancelled",
        };
        self.finish(result.map(|title| format!("{verb}: {title}")));
    }

    /// Flip the selected source between active and paused
    pub fn toggle_selected_source(&mut self) {
        let Some(mut source) = self.visible_sources().get(self.selected).cloned() else {
            return;
        };
        source.toggle();
        let msg = format!(
            "{} {}",
            source.name,
            if source.is_active { "activated" } else { "paused" }
        );
        let result = Repository::<Source>::update(&mut *self.store, &source).map(|()| msg);
        self.finish(result);
    }

    /// Delete the selected source or assistant
    pub fn delete_selected(&mut self) {
        let result = match self.route {
            Route::Sources => self.visible_sources().get(self.selected).map(|s| {
                Repository::<Source>::delete(&mut *self.store, &s.id).map(|_| format!("🗑️ Removed {}", s.name))
            }),
            Route::Assistants => self.visible_assistants().get(self.selected).map(|a| {
                Repository::<Assistant>::delete(&mut *self.store, &a.id)
                    .map(|_| format!("🗑️ Removed {}", a.name))
            }),
            _ => None,
        };
        if let Some(result) = result {
            self.finish(result);
            self.selected = self.selected.min(self.row_count().saturating_sub(1));
        }
    }

    /// Open the selected collected item's original URL in the browser
    pub fn open_original(&mut self) {
        let Some(item) = self.visible_collection().get(self.selected).cloned() else {
            return;
        };
        let Some(url) = item.original_url else {
            self.notify("No original link for this item");
            return;
        };
        match open::that(&url) {
            Ok(()) => self.notify(format!("🔗 Opened {url}")),
            Err(e) => {
                tracing::warn!("Failed to open {}: {}", url, e);
                self.notify(format!("❌ Could not open {url}"));
            }
        }
    }

    // Prompts

    /// Like or unlike the selected (or open) prompt and persist it
    pub fn toggle_like(&mut self) {
        let id = match &self.route {
            Route::PromptDetail(id) => Some(id.clone()),
            Route::Prompts => self.visible_prompts().get(self.selected).map(|p| p.id.clone()),
            _ => None,
        };
        let Some(id) = id else { return };

        let liked = self.catalog.toggle_like(&id);
        let Some(prompt) = self.catalog.with_like_state(&id) else {
            return;
        };
        let msg = format!("{} {}", if liked { "❤️ Liked" } else { "💔 Unliked" }, prompt.title);
        let result = Repository::<Prompt>::update(&mut *self.store, &prompt).map(|()| msg);
        self.finish(result);
        if self.show_library {
            self.selected = self.selected.min(self.row_count().saturating_sub(1));
        }
    }

    /// Open the selected prompt's detail page
    pub fn open_selected_prompt(&mut self) {
        if let Some(prompt) = self.visible_prompts().get(self.selected) {
            let route = Route::PromptDetail(prompt.id.clone());
            self.navigate(route);
        }
    }

    /// Switch the prompts page between catalog and library
    pub fn toggle_library(&mut self) {
        self.show_library = !self.show_library;
        self.selected = 0;
    }

    // Verification and adaptation

    /// Start verifying the selected base post
    pub fn verify_selected(&mut self) {
        let Some(post) = self.visible_base_posts().get(self.selected).cloned() else {
            return;
        };
        let networks = if post.social_networks.is_empty() {
            self.config.default_networks.clone()
        } else {
            post.social_networks.clone()
        };
        self.editorial = EditorialSettings {
            networks: EditorialSettings::with_networks(networks).networks,
            ..self.editorial.clone()
        };
        self.editing = Some(post);
        self.navigate(Route::Verification);
    }

    /// Build per-network adaptations from the verified post
    pub fn build_adaptations(&mut self) {
        let Some(post) = self.editing.clone() else {
            self.notify("Pick a base post to verify first");
            return;
        };
        if self.editorial.networks.is_empty() {
            self.report(&Error::validation("select at least one network"));
            return;
        }
        let content = if post.base_post.trim().is_empty() {
            &post.text
        } else {
            &post.base_post
        };
        self.board = AdaptationBoard::from_base_post(&post.title, content, &self.editorial);
        tracing::info!("Built {} adaptations for {}", self.board.posts().len(), post.id);
        self.navigate(Route::PublicationEdit);
        self.notify(format!(
            "Adapted for {} networks ({}, {}, {})",
            self.board.posts().len(),
            self.editorial.tone.label(),
            self.editorial.length.label(),
            self.editorial.style.label()
        ));
    }

    /// Network of the selected adaptation
    pub fn selected_network(&self) -> Option<SocialNetwork> {
        self.board.posts().get(self.selected).map(|p| p.network)
    }

    /// Flip one readiness flag on the selected adaptation
    pub fn toggle_board_flag(&mut self, flag: ReadinessFlag) {
        let Some(network) = self.selected_network() else {
            return;
        };
        match self.board.toggle_flag(network, flag) {
            Ok(value) => {
                let gate = if self.board.can_publish() { " │ ready to publish" } else { "" };
                self.notify(format!(
                    "{} {}: {}{gate}",
                    network.name(),
                    flag.label(),
                    if value { "✓" } else { "✗" }
                ));
            }
            Err(e) => self.report(&e),
        }
    }

    // Studio

    /// Studio form for the current page, if it is the photo or video page
    pub fn studio_mut(&mut self) -> Option<&mut StudioSettings> {
        match self.route {
            Route::Photo => Some(&mut self.photo_studio),
            Route::Video => Some(&mut self.video_studio),
            _ => None,
        }
    }

    /// Move one studio setting to its next choice
    pub fn cycle_studio(&mut self, field: StudioField) {
        let Some(value) = self.studio_mut().and_then(|studio| studio.cycle(field)) else {
            return;
        };
        self.notify(format!("{}: {value}", field.label()));
    }

    /// Open the prompt input for the current studio page
    pub fn begin_generation(&mut self) {
        if let Some(kind) = self.studio_mut().map(|studio| studio.kind) {
            self.begin_input(InputTarget::Generation(kind));
        }
    }

    // Billing

    /// Buy a top-up preset (0-based) with the current payment method
    pub fn top_up_preset(&mut self, index: usize) {
        let top_up = TopUp::preset(index, self.payment_method);
        self.credit(top_up);
    }

    fn credit(&mut self, top_up: crate::Result<TopUp>) {
        match top_up {
            Ok(top_up) => {
                self.gems = self.gems.saturating_add(top_up.gems);
                tracing::info!("Top-up of {} via {}", top_up.amount, top_up.method.label());
                self.notify(format!(
                    "💎 +{} gems via {} (balance {})",
                    top_up.gems,
                    top_up.method.label(),
                    self.gems
                ));
            }
            Err(e) => self.report(&e),
        }
    }

    /// Publish every adaptation if the gate is open
    pub fn publish_board(&mut self) {
        let config = &self.config;
        let publications = match self.board.publish(|n| config.channel_for(n), Utc::now()) {
            Ok(p) => p,
            Err(e) => {
                self.report(&e);
                return;
            }
        };

        let mut result = Ok(());
        for publication in &publications {
            result = Repository::<PublicationItem>::insert(&mut *self.store, publication);
            if result.is_err() {
                break;
            }
        }
        let count = publications.len();
        let published = result.is_ok();
        self.finish(result.map(|()| format!("📤 Published to {count} networks")));
        if published {
            self.board = AdaptationBoard::default();
            let status = self.status.clone();
            self.navigate(Route::Publications);
            self.notify(status);
        }
    }

    // Chat

    /// Submit a chat message, returning the command for the chat worker
    pub fn send_chat(&mut self, text: &str) -> Option<ChatCommand> {
        match self.chat.submit(text, Utc::now()) {
            Ok((request, prompt)) => Some(ChatCommand::Send { request, prompt }),
            Err(e) => {
                self.report(&e);
                None
            }
        }
    }

    /// Apply a result from the chat worker
    pub fn on_chat_event(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::Reply { request, content } => {
                if let Err(e) = self.chat.deliver(request, content, Utc::now()) {
                    tracing::debug!("Dropping late chat reply: {}", e);
                }
            }
            ChatEvent::Failed { request, message } => {
                let _ = self.chat.fail(request);
                self.notify(format!("❌ Chat failed: {message}"));
            }
        }
    }

    /// Empty the chat transcript
    pub fn clear_chat(&mut self) {
        self.chat.clear();
        self.notify("Chat cleared");
    }

    // Input

    /// Open the input line
    pub fn begin_input(&mut self, target: InputTarget) {
        self.input = match target {
            InputTarget::Search => self.search.clone(),
            InputTarget::Adaptation(network) => self
                .board
                .get(network)
                .map(|p| p.content.clone())
                .unwrap_or_default(),
            _ => String::new(),
        };
        self.mode = Mode::Input(target);
    }

    /// Apply the input line, returning a chat command if one was sent
    pub fn submit_input(&mut self, target: InputTarget) -> Option<ChatCommand> {
        let text = std::mem::take(&mut self.input);
        self.mode = Mode::Normal;

        match target {
            InputTarget::Search => {
                self.search = text;
                self.selected = 0;
                None
            }
            InputTarget::Chat => self.send_chat(&text),
            InputTarget::NewSource => {
                let result = parse_source(&text).and_then(|source| {
                    let msg = format!("➕ Added {}", source.name);
                    Repository::<Source>::insert(&mut *self.store, &source).map(|()| msg)
                });
                self.finish(result);
                None
            }
            InputTarget::NewAssistant => {
                let (name, description) = text.split_once('|').unwrap_or((text.as_str(), ""));
                let result = Assistant::new(name, description, "", "").and_then(|assistant| {
                    let msg = format!("➕ Created {}", assistant.name);
                    Repository::<Assistant>::insert(&mut *self.store, &assistant).map(|()| msg)
                });
                self.finish(result);
                None
            }
            InputTarget::Ticket => {
                let mut parts = text.splitn(3, '|');
                let category = parts.next().and_then(TicketCategory::from_str);
                let subject = parts.next().unwrap_or_default();
                let message = parts.next().unwrap_or_default();
                let result = SupportTicket::new(subject, category, message).and_then(|ticket| {
                    let msg = format!("📨 Ticket sent: {}", ticket.subject);
                    Repository::<SupportTicket>::insert(&mut *self.store, &ticket).map(|()| msg)
                });
                self.finish(result);
                None
            }
            InputTarget::TopUp => {
                let top_up = TopUp::custom(&text, self.payment_method);
                self.credit(top_up);
                None
            }
            InputTarget::Generation(kind) => {
                let studio = if kind == GenerationKind::Video { &self.video_studio } else { &self.photo_studio };
                match studio.request(&text) {
                    Ok(request) => {
                        tracing::info!("{} generation requested: {}", kind.label(), request.summary());
                        self.notify(format!(
                            "{} {} request ready: {}",
                            kind.emoji(),
                            kind.label(),
                            request.summary()
                        ));
                    }
                    Err(e) => self.report(&e),
                }
                None
            }
            InputTarget::Adaptation(network) => {
                match self.board.update_content(network, text) {
                    Ok(cut) => {
                        self.notify(if cut {
                            format!("⚠️ {} text cut to {} chars", network.name(), network.max_length())
                        } else {
                            format!("✏️ {} text updated", network.name())
                        });
                    }
                    Err(e) => self.report(&e),
                }
                None
            }
        }
    }

    /// Abandon the input line
    pub fn cancel_input(&mut self, target: InputTarget) {
        if target == InputTarget::Search {
            self.search.clear();
        }
        self.input.clear();
        self.mode = Mode::Normal;
    }
}

fn cycle<T: Copy + PartialEq>(options: &[T], current: Option<T>) -> Option<T> {
    match current.and_then(|c| options.iter().position(|o| *o == c)) {
        None => options.first().copied(),
        Some(i) => options.get(i + 1).copied(),
    }
}

/// `<kind> <url> <name...>`
fn parse_source(text: &str) -> crate::Result<Source> {
    let mut parts = text.split_whitespace();
    let kind = parts.next().unwrap_or_default();
    let kind = SourceKind::from_str(kind)
        .ok_or_else(|| Error::Parse(format!("unknown source kind: {kind}")))?;
    let url = parts.next().unwrap_or_default();
    let name = parts.collect::<Vec<_>>().join(" ");
    Source::new(kind, &name, url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CheckStatus, CollectionStatus};
    use crate::repo::MemoryStore;

    fn state() -> AppState {
        let mut store = MemoryStore::new();
        demo::seed(&mut store).unwrap();
        AppState::new(Config::default(), Box::new(store)).unwrap()
    }

    /// Memory store whose publication inserts start failing after `inserts_left`
    struct FailingPublications {
        inner: MemoryStore,
        inserts_left: usize,
    }

    macro_rules! forward {
        ($($ty:ty),*) => {
            $(
                impl Repository<$ty> for FailingPublications {
                    fn list(&self) -> crate::Result<Vec<$ty>> {
                        Repository::<$ty>::list(&self.inner)
                    }

                    fn get(&self, id: &str) -> crate::Result<Option<$ty>> {
                        Repository::<$ty>::get(&self.inner, id)
                    }

                    fn insert(&mut self, item: &$ty) -> crate::Result<()> {
                        Repository::<$ty>::insert(&mut self.inner, item)
                    }

                    fn update(&mut self, item: &$ty) -> crate::Result<()> {
                        Repository::<$ty>::update(&mut self.inner, item)
                    }

                    fn delete(&mut self, id: &str) -> crate::Result<bool> {
                        Repository::<$ty>::delete(&mut self.inner, id)
                    }
                }
            )*
        };
    }

    forward!(Source, CollectedItem, CheckItem, BasePostItem, Assistant, Prompt, SupportTicket);

    impl Repository<PublicationItem> for FailingPublications {
        fn list(&self) -> crate::Result<Vec<PublicationItem>> {
            Repository::<PublicationItem>::list(&self.inner)
        }

        fn get(&self, id: &str) -> crate::Result<Option<PublicationItem>> {
            Repository::<PublicationItem>::get(&self.inner, id)
        }

        fn insert(&mut self, item: &PublicationItem) -> crate::Result<()> {
            if self.inserts_left == 0 {
                return Err(Error::Database(rusqlite::Error::QueryReturnedNoRows));
            }
            self.inserts_left -= 1;
            Repository::<PublicationItem>::insert(&mut self.inner, item)
        }

        fn update(&mut self, item: &PublicationItem) -> crate::Result<()> {
            Repository::<PublicationItem>::update(&mut self.inner, item)
        }

        fn delete(&mut self, id: &str) -> crate::Result<bool> {
            Repository::<PublicationItem>::delete(&mut self.inner, id)
        }
    }

    fn tick_board(state: &mut AppState) {
        for network in state.board.networks() {
            for flag in ReadinessFlag::all() {
                state.board.set_flag(network, *flag, true).unwrap();
            }
        }
    }

    #[test]
    fn test_approve_selected_collection_item() {
        let mut state = state();
        state.navigate(Route::Collection);
        state.advance_selected(Action::Approve);

        assert_eq!(state.collection[0].status, CollectionStatus::InProgress);
        assert!(state.status.contains("Approved"));

        state.advance_selected(Action::Approve);
        assert_eq!(state.collection[0].status, CollectionStatus::InProgress);
        assert!(state.status.contains("⚠️"));
    }

    #[test]
    fn test_search_narrows_rows() {
        let mut state = state();
        state.navigate(Route::Check);
        assert_eq!(state.row_count(), 4);

        state.begin_input(InputTarget::Search);
        state.input = "GPT-5".to_string();
        state.submit_input(InputTarget::Search);
        assert_eq!(state.row_count(), 1);

        state.advance_selected(Action::Reject);
        let rejected = state.checks.iter().find(|c| c.id == "3").unwrap();
        assert_eq!(rejected.status, CheckStatus::Rejected);
    }

    #[test]
    fn test_board_gate_in_ui() {
        let mut state = state();
        state.navigate(Route::PublicationEdit);
        state.publish_board();
        assert!(state.status.contains("not ready") || state.status.contains("⚠️"));
        assert_eq!(state.publications.len(), 4);

        for idx in 0..state.board.posts().len() {
            state.selected = idx;
            for flag in ReadinessFlag::all() {
                let network = state.selected_network().unwrap();
                state.board.set_flag(network, *flag, true).unwrap();
            }
        }
        state.publish_board();
        assert_eq!(state.route, Route::Publications);
        assert_eq!(state.publications.len(), 8);
    }

    #[test]
    fn test_failed_publish_keeps_board() {
        let mut inner = MemoryStore::new();
        demo::seed(&mut inner).unwrap();
        let store = FailingPublications { inner, inserts_left: 1 };
        let mut state = AppState::new(Config::default(), Box::new(store)).unwrap();
        state.navigate(Route::PublicationEdit);
        tick_board(&mut state);

        state.publish_board();
        assert!(state.status.contains("❌"));
        assert_eq!(state.route, Route::PublicationEdit);
        assert!(state.board.can_publish());
        assert_eq!(Repository::<PublicationItem>::count(&*state.store).unwrap(), 5);
    }

    #[test]
    fn test_verification_builds_board() {
        let mut state = state();
        state.navigate(Route::BasePost);
        state.verify_selected();
        assert_eq!(state.route, Route::Verification);
        assert_eq!(
            state.editorial.networks,
            vec![SocialNetwork::Telegram, SocialNetwork::Vk, SocialNetwork::Instagram]
        );

        state.build_adaptations();
        assert_eq!(state.route, Route::PublicationEdit);
        assert_eq!(state.board.posts().len(), 3);
        assert!(!state.board.can_publish());
    }

    #[test]
    fn test_like_persists() {
        let mut state = state();
        state.navigate(Route::Prompts);
        state.selected = 1;
        state.toggle_like();

        let stored = Repository::<Prompt>::get(&*state.store, "2").unwrap().unwrap();
        assert!(stored.is_liked);
        assert_eq!(state.catalog.library().len(), 4);
    }

    #[test]
    fn test_input_forms() {
        let mut state = state();

        state.begin_input(InputTarget::NewSource);
        state.input = "rss https://example.com/feed.xml Example Feed".to_string();
        state.submit_input(InputTarget::NewSource);
        assert_eq!(state.sources.len(), 5);
        assert_eq!(state.sources[4].name, "Example Feed");

        state.begin_input(InputTarget::Ticket);
        state.input = "billing | Refund | Charged twice".to_string();
        state.submit_input(InputTarget::Ticket);
        assert_eq!(state.tickets.len(), 1);

        state.begin_input(InputTarget::Ticket);
        state.input = "billing | | ".to_string();
        state.submit_input(InputTarget::Ticket);
        assert_eq!(state.tickets.len(), 1);
        assert!(state.status.contains("fill in"));

        state.begin_input(InputTarget::TopUp);
        state.input = "500".to_string();
        state.submit_input(InputTarget::TopUp);
        assert_eq!(state.gems, 500);

        state.top_up_preset(1);
        assert_eq!(state.gems, 1050);
        state.top_up_preset(9);
        assert_eq!(state.gems, 1050);
        assert!(state.status.contains("preset"));
    }

    #[test]
    fn test_studio_form() {
        let mut state = state();
        state.cycle_studio(StudioField::Model);
        assert_eq!(state.photo_studio.value(StudioField::Model), Some("Midjourney"));

        state.navigate(Route::Video);
        state.cycle_studio(StudioField::Duration);
        assert_eq!(state.video_studio.value(StudioField::Duration), Some("8 s"));

        state.begin_generation();
        assert_eq!(state.mode, Mode::Input(InputTarget::Generation(GenerationKind::Video)));
        state.input = "  ".to_string();
        state.submit_input(InputTarget::Generation(GenerationKind::Video));
        assert!(state.status.contains("⚠️ describe the video"));

        state.begin_generation();
        state.input = "Waves at sunset".to_string();
        state.submit_input(InputTarget::Generation(GenerationKind::Video));
        assert!(state.status.contains("Sora · Horizontal · 8 s"));
    }

    #[test]
    fn test_chat_round_trip() {
        let mut state = state();
        let Some(ChatCommand::Send { request, .. }) = state.send_chat("Hello") else {
            panic!("expected a chat command");
        };
        assert!(state.send_chat("again").is_none());

        state.on_chat_event(ChatEvent::Reply {
            request,
            content: "Hi".to_string(),
        });
        assert_eq!(state.chat.messages().len(), 2);
        assert!(!state.chat.is_waiting());
    }

    #[test]
    fn test_page_cycling_wraps() {
        let mut state = state();
        state.prev_page();
        assert_eq!(state.route, Route::PublicationEdit);
        state.next_page();
        assert_eq!(state.route, Route::Home);
    }

    #[test]
    fn test_notification_expires() {
        let mut state = state();
        state.notify("hello");
        for _ in 0..=STATUS_TTL {
            state.tick();
        }
        assert!(state.status.is_empty());
    }
}
