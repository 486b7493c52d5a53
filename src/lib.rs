//! # Astra ✨
//!
//! Terminal dashboard for the Astra Promt AI content studio and its social
//! content factory.
//!
//! ## Overview
//!
//! Astra browses a prompt catalog, chats with a simulated assistant, and runs
//! the content factory: sources feed a collection, collected items pass a
//! credibility check, approved items become base posts, and base posts are
//! adapted per social network before they can be published.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          App                                │
//! │  Routes, key handling, rendering and the main event loop    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │    Pipeline     │ │     Filter      │ │      Chat       │
//! │                 │ │                 │ │                 │
//! │ • Transitions   │ │ • Text search   │ │ • Session       │
//! │ • Readiness     │ │ • Enum filters  │ │ • Worker task   │
//! │ • Editorial     │ │ • Prompt likes  │ │ • Canned replies│
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//!          │                   │                   │
//!          └───────────────────┴───────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │      Repo       │ │    Database     │ │     Models      │
//! │                 │ │                 │ │                 │
//! │ • Traits        │ │ • SQLite store  │ │ • Stage records │
//! │ • Memory store  │ │ • Migrations    │ │ • Catalogs      │
//! │ • Demo seed     │ │ • JSON columns  │ │ • Billing       │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`app`]: TUI application state and event loop
//! - [`chat`]: Simulated assistant and its worker task
//! - [`config`]: Configuration management
//! - [`db`]: `SQLite` store
//! - [`filter`]: List filtering and the prompt catalog
//! - [`models`]: Records for every page
//! - [`pipeline`]: Status transitions and the publish gate
//! - [`repo`]: Repository traits and the in-memory store
//! - [`routes`]: Page paths
//! - [`theme`]: Theme support via ratatui-themes
//!
//! ## Example
//!
//! ```no_run
//! use astra::app;
//!
//! fn main() -> anyhow::Result<()> {
//!     app::run()
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/astra/0.1.0")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::unused_async)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::if_not_else)]
#![allow(clippy::single_match_else)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::use_self)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::similar_names)]
#![allow(clippy::if_same_then_else)]
#![allow(clippy::manual_let_else)]
#![allow(clippy::branches_sharing_code)]
#![allow(clippy::wrong_self_convention)]
#![allow(clippy::return_self_not_must_use)]

pub mod app;
pub mod chat;
pub mod columns;
pub mod config;
pub mod db;
pub mod demo;
pub mod error;
pub mod filter;
pub mod models;
pub mod paths;
pub mod pipeline;
pub mod repo;
pub mod routes;
pub mod theme;

// Re-export main types for convenience
pub use app::AppState;
pub use config::Config;
pub use db::Database;
pub use error::{Error, Result};
pub use models::{
    BasePostItem, CheckItem, CollectedItem, Prompt, PublicationItem, SocialNetwork, SocialPost,
    Source,
};
pub use pipeline::{Action, AdaptationBoard, StatusMachine};
pub use repo::{MemoryStore, Repository, Store};
pub use routes::Route;
pub use theme::{Theme, ThemeColors};

// Re-export theme types from ratatui-themes crate
pub use ratatui_themes::{ThemeName, ThemePalette};

/// ASCII logo for the application
pub const LOGO: &str = r"
     ___         __
    / _ | ___ __/ /_______ _
   / __ |(_-</ __/ __/ _ `/
  /_/ |_/___/\__/_/  \_,_/
";

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
