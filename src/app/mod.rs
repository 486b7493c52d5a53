//! TUI Application module

mod events;
mod state;
mod ui;

pub use state::{AppState, InputTarget, Mode};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tokio::runtime::Runtime;

use crate::chat::{ChatCommand, ChatHandle, SimulatedBackend, spawn_chat_worker};
use crate::config::{Config, StorageKind};
use crate::db::Database;
use crate::demo;
use crate::repo::{MemoryStore, Store};

/// Open the configured store, seeding demo content into an empty one
///
/// `in_memory` forces a fresh memory store regardless of config.
pub fn open_store(config: &Config, in_memory: bool) -> Result<Box<dyn Store>> {
    let mut store: Box<dyn Store> = if in_memory || config.storage == StorageKind::Memory {
        Box::new(MemoryStore::new())
    } else {
        Box::new(Database::open()?)
    };

    if (in_memory || config.seed_demo_data)
        && demo::seed_if_empty(&mut *store).context("Failed to seed demo data")?
    {
        tracing::info!("Demo content loaded");
    }
    Ok(store)
}

/// Run the TUI application
pub fn run() -> Result<()> {
    let (config, store) = prepare(Config::load()?, false)?;
    run_with(config, store)
}

/// Run the TUI on a fresh in-memory store with demo content
///
/// The loaded config is used as is, so saving it on exit never records demo mode.
pub fn run_demo() -> Result<()> {
    let (config, store) = prepare(Config::load()?, true)?;
    run_with(config, store)
}

fn prepare(config: Config, demo: bool) -> Result<(Config, Box<dyn Store>)> {
    let store = open_store(&config, demo)?;
    if demo {
        tracing::info!("Demo mode on a memory store");
    }
    Ok((config, store))
}

fn run_with(config: Config, store: Box<dyn Store>) -> Result<()> {
    // Create tokio runtime
    let rt = Runtime::new()?;

    // Spawn chat worker
    let backend = SimulatedBackend::new(config.chat_delay());
    let chat_handle = rt.block_on(async { spawn_chat_worker(backend) });

    // Create app state
    let mut state = AppState::new(config, store)?;

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Main loop
    let result = run_app(&mut terminal, &mut state, chat_handle);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;

    // Save config on exit
    state.config.save()?;
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
    mut chat: ChatHandle,
) -> Result<()> {
    loop {
        // Apply finished chat replies (non-blocking)
        while let Some(event) = chat.try_recv() {
            state.on_chat_event(event);
        }

        // Draw UI
        terminal.draw(|frame| ui::render(frame, state))?;

        // Handle events
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && let Some(ChatCommand::Send { request, prompt }) = events::handle_key(state, key)
            && let Err(e) = chat.send(request, prompt)
        {
            let _ = state.chat.fail(request);
            state.report(&e);
        }

        // Tick for animations
        state.tick();

        if state.should_quit {
            // Shutdown chat worker
            let _ = chat.cmd_tx.try_send(ChatCommand::Shutdown);
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Prompt;
    use crate::repo::Repository;

    #[test]
    fn test_open_memory_store_seeds_once() {
        let config = Config::default();
        let store = open_store(&config, true).unwrap();
        assert_eq!(Repository::<Prompt>::count(&*store).unwrap(), 8);
    }

    #[test]
    fn test_memory_store_without_seed_is_empty() {
        let config = Config {
            storage: StorageKind::Memory,
            seed_demo_data: false,
            ..Config::default()
        };
        let store = open_store(&config, false).unwrap();
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_demo_leaves_saved_config_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config {
            seed_demo_data: false,
            ..Config::default()
        };

        let (config, store) = prepare(config, true).unwrap();
        assert_eq!(Repository::<Prompt>::count(&*store).unwrap(), 8);
        assert!(!config.seed_demo_data);

        config.save_to(&path).unwrap();
        assert!(!Config::load_from(&path).unwrap().seed_demo_data);
    }
}
