//! Astra - AI content studio and social content factory in the terminal
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use chrono::Utc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use astra::chat::{ChatEvent, ChatSession, SimulatedBackend, spawn_chat_worker};
use astra::filter::{
    BasePostFilter, CheckFilter, CollectionFilter, PromptCatalog, PromptFilter, PublicationFilter,
    filter_items,
};
use astra::models::{
    BasePostItem, CheckItem, CollectedItem, Prompt, PromptModel, PublicationItem, Role, Source,
};
use astra::pipeline::{self, Action, Staged, StatusMachine};
use astra::repo::{Repository, Store};
use astra::{Config, Route};

fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    match parse_args()? {
        Command::Run => astra::app::run(),
        Command::Demo => astra::app::run_demo(),
        Command::Routes => {
            print_routes();
            Ok(())
        }
        Command::Sources => list_sources(),
        Command::List {
            stage,
            query,
            status,
        } => list_stage(stage, &query, status.as_deref()),
        Command::Transition { stage, action, id } => transition(stage, action, &id),
        Command::Prompts {
            query,
            model,
            category,
        } => list_prompts(&query, model.as_deref(), category),
        Command::Chat { message } => chat_once(&message),
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Content factory stages reachable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Collection,
    Check,
    BasePost,
    Publications,
}

impl Stage {
    fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "collection" => Ok(Self::Collection),
            "check" => Ok(Self::Check),
            "base-post" | "base_post" | "basepost" => Ok(Self::BasePost),
            "publications" | "publication" => Ok(Self::Publications),
            other => Err(anyhow::anyhow!(
                "Unknown stage: {other}\nExpected collection, check, base-post or publications"
            )),
        }
    }
}

/// CLI commands
enum Command {
    Run,
    Demo,
    Routes,
    Sources,
    List {
        stage: Stage,
        query: String,
        status: Option<String>,
    },
    Transition {
        stage: Stage,
        action: Action,
        id: String,
    },
    Prompts {
        query: String,
        model: Option<String>,
        category: Option<String>,
    },
    Chat {
        message: String,
    },
    Help,
    Version,
}

fn parse_args() -> Result<Command> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() == 1 {
        return Ok(Command::Run);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-v" | "--version" | "version" => Ok(Command::Version),
        "--demo" | "demo" => Ok(Command::Demo),
        "routes" => Ok(Command::Routes),
        "sources" => Ok(Command::Sources),

        "list" | "ls" => {
            let stage = Stage::parse(
                args.get(2)
                    .ok_or_else(|| anyhow::anyhow!("Missing stage"))?,
            )?;
            Ok(Command::List {
                stage,
                query: positional(&args[3..], &["--status", "-s"]).join(" "),
                status: flag_value(&args, &["--status", "-s"]),
            })
        }

        verb @ ("approve" | "reject") => {
            let stage = Stage::parse(
                args.get(2)
                    .ok_or_else(|| anyhow::anyhow!("Missing stage"))?,
            )?;
            let id = args
                .get(3)
                .ok_or_else(|| anyhow::anyhow!("Missing item id"))?
                .clone();
            let action = Action::from_str(verb)
                .ok_or_else(|| anyhow::anyhow!("Unknown action: {verb}"))?;
            Ok(Command::Transition { stage, action, id })
        }

        verb @ ("publish" | "cancel") => {
            let id = args
                .get(2)
                .ok_or_else(|| anyhow::anyhow!("Missing publication id"))?
                .clone();
            let action = Action::from_str(verb)
                .ok_or_else(|| anyhow::anyhow!("Unknown action: {verb}"))?;
            Ok(Command::Transition {
                stage: Stage::Publications,
                action,
                id,
            })
        }

        "prompts" => {
            let flags = ["--model", "-m", "--category", "-c"];
            Ok(Command::Prompts {
                query: positional(&args[2..], &flags).join(" "),
                model: flag_value(&args, &["--model", "-m"]),
                category: flag_value(&args, &["--category", "-c"]),
            })
        }

        "chat" => {
            let message = args[2..].join(" ");
            if message.trim().is_empty() {
                return Err(anyhow::anyhow!("Missing chat message"));
            }
            Ok(Command::Chat { message })
        }

        other => Err(anyhow::anyhow!(
            "Unknown command: {other}\nRun 'astra --help' for usage"
        )),
    }
}

/// Value following the first of `names`
fn flag_value(args: &[String], names: &[&str]) -> Option<String> {
    args.iter()
        .position(|a| names.contains(&a.as_str()))
        .and_then(|i| args.get(i + 1))
        .cloned()
}

/// Arguments that are neither flags in `flags` nor their values
fn positional<'a>(args: &'a [String], flags: &[&str]) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut skip = false;
    for arg in args {
        if skip {
            skip = false;
        } else if flags.contains(&arg.as_str()) {
            skip = true;
        } else {
            out.push(arg.as_str());
        }
    }
    out
}

fn print_help() {
    let config_path = astra::Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r#"{}
✨ Astra - AI content studio and social content factory

USAGE:
    astra                              Launch TUI
    astra [COMMAND]

COMMANDS:
    demo                               Launch TUI on a fresh demo store
    routes                             Print every page path
    sources                            List content sources
    list <stage> [query] [--status S]  List a content factory stage
      Stages: collection, check, base-post, publications
      Examples:
        astra list collection ai
        astra list publications --status draft
    approve <stage> <id>               Approve an item
    reject <stage> <id>                Reject an item
    publish <id>                       Publish a draft publication
    cancel <id>                        Cancel a draft publication
    prompts [query] [-m MODEL] [-c CATEGORY]
                                       Search the prompt catalog
    chat <message>                     Ask the assistant one question
    help                               Show this help
    version                            Show version

TUI KEYBINDINGS:
    Tab/Shift+Tab   Next/previous page
    j/k ↑/↓         Move selection
    /               Search
    a/r             Approve/reject
    1-9             Toggle table columns
    t               Theme picker
    ?               Help
    q               Quit

CONFIG:
    {}

ENVIRONMENT:
    RUST_LOG        Log filter (default: warn)
"#,
        astra::LOGO,
        config_path
    );
}

fn print_version() {
    println!("astra {}", astra::VERSION);
}

fn print_routes() {
    for route in Route::menu() {
        println!("{:<24} {}", route.path(), route.title());
    }
}

fn open_store() -> Result<(Config, Box<dyn Store>)> {
    let config = Config::load()?;
    let store = astra::app::open_store(&config, false)?;
    Ok((config, store))
}

fn list_sources() -> Result<()> {
    let (_, store) = open_store()?;
    let sources = Repository::<Source>::list(&*store)?;

    if sources.is_empty() {
        println!("No sources registered.");
        return Ok(());
    }

    for source in &sources {
        println!(
            "{:>4}  {} {:<28} {:<40} {:>5}  {}",
            source.id,
            source.kind.emoji(),
            source.name,
            source.url,
            source.items_count,
            if source.is_active { "active" } else { "paused" }
        );
    }
    let (active, items) = astra::models::source_totals(&sources);
    println!("\n{} active sources, {} items collected", active, items);
    Ok(())
}

/// Keep only records in `status` (all of them when `None`)
fn with_status<T: Staged>(items: Vec<T>, status: Option<&str>) -> Result<Vec<T>> {
    let Some(wanted) = status.map(T::Status::parse).transpose()? else {
        return Ok(items);
    };
    Ok(items
        .into_iter()
        .filter(|item| item.status() == wanted)
        .collect())
}

fn list_stage(stage: Stage, query: &str, status: Option<&str>) -> Result<()> {
    let (_, store) = open_store()?;
    let store = &*store;

    let rows: Vec<String> = match stage {
        Stage::Collection => {
            let filter = CollectionFilter {
                query: query.to_string(),
                ..CollectionFilter::default()
            };
            let items = with_status(Repository::<CollectedItem>::list(store)?, status)?;
            filter_items(&items, &filter)
                .iter()
                .map(|item| {
                    format!(
                        "{:>4}  {:<12} {} {:<48} {}",
                        item.id,
                        item.status.as_str(),
                        item.format.emoji(),
                        item.title,
                        item.source
                    )
                })
                .collect()
        }
        Stage::Check => {
            let filter = CheckFilter {
                query: query.to_string(),
                ..CheckFilter::default()
            };
            let items = with_status(Repository::<CheckItem>::list(store)?, status)?;
            filter_items(&items, &filter)
                .iter()
                .map(|item| {
                    format!(
                        "{:>4}  {:<12} {:>3}%  {:<48} {}",
                        item.id,
                        item.status.as_str(),
                        item.credibility_score.value(),
                        item.title,
                        item.channel_name
                    )
                })
                .collect()
        }
        Stage::BasePost => {
            let items = with_status(Repository::<BasePostItem>::list(store)?, status)?;
            let filter = BasePostFilter {
                query: query.to_string(),
            };
            filter_items(&items, &filter)
                .iter()
                .map(|item| {
                    format!(
                        "{:>4}  {:<12} {:<48} {}",
                        item.id,
                        item.status.as_str(),
                        item.title,
                        item.network_icons()
                    )
                })
                .collect()
        }
        Stage::Publications => {
            let filter = PublicationFilter {
                query: query.to_string(),
                ..PublicationFilter::default()
            };
            let items = with_status(Repository::<PublicationItem>::list(store)?, status)?;
            filter_items(&items, &filter)
                .iter()
                .map(|item| {
                    format!(
                        "{:>4}  {} {:<10} {:<48} {} {}",
                        item.id,
                        item.status.emoji(),
                        item.status.as_str(),
                        item.title,
                        item.network.emoji(),
                        item.publish_date_display()
                    )
                })
                .collect()
        }
    };

    if rows.is_empty() {
        println!("Nothing found.");
    } else {
        for row in &rows {
            println!("{row}");
        }
    }
    Ok(())
}

fn transition(stage: Stage, action: Action, id: &str) -> Result<()> {
    let (_, mut store) = open_store()?;
    let store = &mut *store;

    let (title, status) = match stage {
        Stage::Collection => {
            let item = pipeline::advance::<CollectedItem, _>(store, id, action)?;
            (item.title, item.status.as_str())
        }
        Stage::Check => {
            let item = pipeline::advance::<CheckItem, _>(store, id, action)?;
            (item.title, item.status.as_str())
        }
        Stage::BasePost => {
            let item = pipeline::advance::<BasePostItem, _>(store, id, action)?;
            (item.title, item.status.as_str())
        }
        Stage::Publications => {
            let item = pipeline::advance::<PublicationItem, _>(store, id, action)?;
            (item.title, item.status.as_str())
        }
    };

    println!("✅ {} → {}", title, status);
    Ok(())
}

fn list_prompts(query: &str, model: Option<&str>, category: Option<String>) -> Result<()> {
    let model = model
        .map(|m| {
            PromptModel::from_str(m).ok_or_else(|| anyhow::anyhow!("Unknown model: {m}"))
        })
        .transpose()?;

    let (_, store) = open_store()?;
    let catalog = PromptCatalog::new(Repository::<Prompt>::list(&*store)?);
    let filter = PromptFilter {
        query: query.to_string(),
        category,
        model,
    };

    let prompts = catalog.search(&filter);
    if prompts.is_empty() {
        println!("No prompts match.");
        return Ok(());
    }
    for prompt in &prompts {
        println!(
            "{:>4}  {} {:<36} {:<10} {}",
            prompt.id,
            if catalog.is_liked(&prompt.id) { "♥" } else { " " },
            prompt.title,
            prompt.model.name(),
            prompt.tags.join(", ")
        );
    }
    Ok(())
}

fn chat_once(message: &str) -> Result<()> {
    let config = Config::load()?;
    let rt = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;

    rt.block_on(async {
        let mut session = ChatSession::new(config.chat_overlap);
        let mut handle = spawn_chat_worker(SimulatedBackend::new(config.chat_delay()));

        let (request, prompt) = session.submit(message, Utc::now())?;
        handle.send(request, prompt)?;

        match handle.event_rx.recv().await {
            Some(ChatEvent::Reply { request, content }) => {
                session.deliver(request, content, Utc::now())?;
            }
            Some(ChatEvent::Failed { message, .. }) => {
                return Err(anyhow::anyhow!("Assistant failed: {message}"));
            }
            None => return Err(anyhow::anyhow!("Chat worker stopped")),
        }

        for msg in session.messages() {
            let who = match msg.role {
                Role::User => "you",
                Role::Assistant => "astra",
            };
            println!("[{}] {}:\n{}\n", msg.time_display(), who, msg.content);
        }
        Ok::<(), anyhow::Error>(())
    })
}
