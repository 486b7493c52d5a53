//! Event handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{AppState, InputTarget, Mode};
use crate::chat::ChatCommand;
use crate::models::{PaymentMethod, SocialNetwork, StudioField};
use crate::pipeline::{Action, ReadinessFlag};
use crate::routes::Route;
use crate::theme::Theme;

/// Handle key events, returning a command for the chat worker if one was sent
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Option<ChatCommand> {
    // Handle mode-specific input first
    match state.mode {
        Mode::ThemePicker => {
            handle_theme_picker_key(state, key);
            return None;
        }
        Mode::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter) {
                state.mode = Mode::Normal;
            }
            return None;
        }
        Mode::Input(target) => return handle_input_key(state, target, key),
        Mode::Normal => {}
    }

    // Global shortcuts (work in normal mode)
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Char('q')) => {
            state.should_quit = true;
            return None;
        }
        (_, KeyCode::Char('?') | KeyCode::F(1)) => {
            state.mode = Mode::Help;
            return None;
        }
        (_, KeyCode::Tab) => {
            state.next_page();
            return None;
        }
        (_, KeyCode::BackTab) => {
            state.prev_page();
            return None;
        }
        (_, KeyCode::Char('H')) => {
            state.navigate(Route::Home);
            return None;
        }
        (_, KeyCode::Char('t')) => {
            state.theme_picker_index = Theme::all()
                .iter()
                .position(|t| *t == state.theme.inner())
                .unwrap_or(0);
            state.mode = Mode::ThemePicker;
            return None;
        }
        (_, KeyCode::Char('/')) => {
            state.begin_input(InputTarget::Search);
            return None;
        }
        (_, KeyCode::Char('j') | KeyCode::Down) => {
            state.select_next();
            return None;
        }
        (_, KeyCode::Char('k') | KeyCode::Up) => {
            state.select_prev();
            return None;
        }
        (_, KeyCode::Char('g')) => {
            state.selected = 0;
            return None;
        }
        (_, KeyCode::Char('G')) => {
            state.select_last();
            return None;
        }
        (_, KeyCode::Char(c @ '1'..='9')) if has_columns(&state.route) => {
            state.toggle_column(c as usize - '1' as usize);
            return None;
        }
        _ => {}
    }

    // Page-specific handling
    match state.route.clone() {
        Route::Home => handle_home_key(state, key),
        Route::Chat => handle_chat_key(state, key),
        Route::Sources => handle_sources_key(state, key),
        Route::Collection | Route::Check | Route::BasePost => handle_review_key(state, key),
        Route::Verification => handle_verification_key(state, key),
        Route::PublicationEdit => handle_adaptation_key(state, key),
        Route::Publications => handle_publications_key(state, key),
        Route::Prompts => handle_prompts_key(state, key),
        Route::PromptDetail(_) => match key.code {
            KeyCode::Char('l') => state.toggle_like(),
            KeyCode::Esc | KeyCode::Backspace => state.navigate(Route::Prompts),
            _ => {}
        },
        Route::Assistants => match key.code {
            KeyCode::Char('n') => state.begin_input(InputTarget::NewAssistant),
            KeyCode::Char('d') | KeyCode::Delete => state.delete_selected(),
            _ => {}
        },
        Route::Generations => {
            if key.code == KeyCode::Char('f') {
                state.cycle_filter();
            }
        }
        Route::Subscription => handle_subscription_key(state, key),
        Route::Support => {
            if key.code == KeyCode::Char('n') {
                state.begin_input(InputTarget::Ticket);
            }
        }
        Route::NotFound(_) => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                state.navigate(Route::Home);
            }
        }
        Route::Photo | Route::Video => handle_studio_key(state, key),
        Route::Training | Route::Profile => {}
    }
    None
}

const fn has_columns(route: &Route) -> bool {
    matches!(route, Route::Collection | Route::Check | Route::Publications)
}

fn handle_theme_picker_key(state: &mut AppState, key: KeyEvent) {
    let themes = Theme::all();
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        KeyCode::Char('j') | KeyCode::Down => {
            state.theme_picker_index = (state.theme_picker_index + 1) % themes.len();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.theme_picker_index = (state.theme_picker_index + themes.len() - 1) % themes.len();
        }
        KeyCode::Enter => {
            if let Some(name) = themes.get(state.theme_picker_index) {
                state.theme = Theme::from(*name);
                state.config.theme = state.theme;
                state.notify(format!("🎨 Theme: {}", state.theme.name()));
            }
            state.mode = Mode::Normal;
        }
        _ => {}
    }
}

fn handle_input_key(state: &mut AppState, target: InputTarget, key: KeyEvent) -> Option<ChatCommand> {
    match key.code {
        KeyCode::Esc => {
            state.cancel_input(target);
            return None;
        }
        KeyCode::Enter => return state.submit_input(target),
        KeyCode::Backspace => {
            state.input.pop();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.input.clear();
        }
        KeyCode::Char(c) => state.input.push(c),
        _ => return None,
    }

    // Search filters as you type
    if target == InputTarget::Search {
        state.search.clone_from(&state.input);
        state.selected = 0;
    }
    None
}

fn handle_home_key(state: &mut AppState, key: KeyEvent) {
    let path = match key.code {
        KeyCode::Char('c') => "/chat",
        KeyCode::Char('p') => "/prompts",
        KeyCode::Char('f') => "/content-factory/sources",
        KeyCode::Char('a') => "/assistants",
        KeyCode::Char('s') => "/support",
        _ => return,
    };
    state.navigate_path(path);
}

fn handle_chat_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('i') => state.begin_input(InputTarget::Chat),
        KeyCode::Char('x') => state.clear_chat(),
        _ => {}
    }
}

fn handle_sources_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char(' ') => state.toggle_selected_source(),
        KeyCode::Char('n') => state.begin_input(InputTarget::NewSource),
        KeyCode::Char('d') | KeyCode::Delete => state.delete_selected(),
        _ => {}
    }
}

/// Collection, check and base post pages share approve / reject
fn handle_review_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('a') => state.advance_selected(Action::Approve),
        KeyCode::Char('r') => state.advance_selected(Action::Reject),
        KeyCode::Char('f') => state.cycle_filter(),
        KeyCode::Char('s') => state.cycle_secondary_filter(),
        KeyCode::Char('o') if state.route == Route::Collection => state.open_original(),
        KeyCode::Char('e') | KeyCode::Enter if state.route == Route::BasePost => state.verify_selected(),
        _ => {}
    }
}

fn handle_verification_key(state: &mut AppState, key: KeyEvent) {
    let network = match key.code {
        KeyCode::Char('T') => {
            state.editorial.tone = state.editorial.tone.next();
            None
        }
        KeyCode::Char('L') => {
            state.editorial.length = state.editorial.length.next();
            None
        }
        KeyCode::Char('S') => {
            state.editorial.style = state.editorial.style.next();
            None
        }
        KeyCode::Char('a') => Some(SocialNetwork::Telegram),
        KeyCode::Char('b') => Some(SocialNetwork::Vk),
        KeyCode::Char('c') => Some(SocialNetwork::Instagram),
        KeyCode::Char('d') => Some(SocialNetwork::Shorts),
        KeyCode::Enter => {
            state.build_adaptations();
            None
        }
        KeyCode::Esc => {
            state.navigate(Route::BasePost);
            None
        }
        _ => None,
    };
    if let Some(network) = network {
        state.editorial.toggle_network(network);
    }
}

fn handle_adaptation_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('x') => state.toggle_board_flag(ReadinessFlag::Text),
        KeyCode::Char('i') => state.toggle_board_flag(ReadinessFlag::Image),
        KeyCode::Char('v') => state.toggle_board_flag(ReadinessFlag::Verified),
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(network) = state.selected_network() {
                state.begin_input(InputTarget::Adaptation(network));
            }
        }
        KeyCode::Char('p') => state.publish_board(),
        _ => {}
    }
}

fn handle_publications_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('p') => state.advance_selected(Action::Publish),
        KeyCode::Char('c') => state.advance_selected(Action::Cancel),
        KeyCode::Char('f') => state.cycle_filter(),
        KeyCode::Char('s') => state.cycle_secondary_filter(),
        KeyCode::Char('e') => state.navigate(Route::PublicationEdit),
        _ => {}
    }
}

fn handle_prompts_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => state.open_selected_prompt(),
        KeyCode::Char('l') => state.toggle_like(),
        KeyCode::Char('L') => state.toggle_library(),
        KeyCode::Char('f') => state.cycle_filter(),
        KeyCode::Char('s') => state.cycle_secondary_filter(),
        _ => {}
    }
}

fn handle_studio_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => state.begin_generation(),
        KeyCode::Char('m') => state.cycle_studio(StudioField::Model),
        KeyCode::Char('r') => state.cycle_studio(StudioField::Resolution),
        KeyCode::Char('o') => state.cycle_studio(StudioField::Orientation),
        KeyCode::Char('d') => state.cycle_studio(StudioField::Duration),
        _ => {}
    }
}

fn handle_subscription_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('b') => state.billing_period = state.billing_period.toggle(),
        KeyCode::Char('m') => {
            state.payment_method = match state.payment_method {
                PaymentMethod::Card => PaymentMethod::Sbp,
                PaymentMethod::Sbp => PaymentMethod::YooMoney,
                PaymentMethod::YooMoney => PaymentMethod::Card,
            };
        }
        KeyCode::Char('u') => state.begin_input(InputTarget::TopUp),
        KeyCode::Char(c @ '1'..='4') => state.top_up_preset(c as usize - '1' as usize),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::demo;
    use crate::models::CollectionStatus;
    use crate::repo::MemoryStore;

    fn state() -> AppState {
        let mut store = MemoryStore::new();
        demo::seed(&mut store).unwrap();
        AppState::new(Config::default(), Box::new(store)).unwrap()
    }

    fn press(state: &mut AppState, code: KeyCode) -> Option<ChatCommand> {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_tab_walks_menu() {
        let mut state = state();
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.route, Route::Chat);
        press(&mut state, KeyCode::BackTab);
        assert_eq!(state.route, Route::Home);
    }

    #[test]
    fn test_live_search_then_escape() {
        let mut state = state();
        state.navigate(Route::Collection);
        press(&mut state, KeyCode::Char('/'));
        type_text(&mut state, "telegram");
        assert_eq!(state.search, "telegram");
        assert_eq!(state.row_count(), 1);

        press(&mut state, KeyCode::Esc);
        assert!(state.search.is_empty());
        assert_eq!(state.row_count(), 5);
    }

    #[test]
    fn test_reject_from_keyboard() {
        let mut state = state();
        state.navigate(Route::Collection);
        press(&mut state, KeyCode::Char('j'));
        press(&mut state, KeyCode::Char('r'));
        assert_eq!(state.collection[1].status, CollectionStatus::Rejected);
    }

    #[test]
    fn test_column_toggle_keys() {
        let mut state = state();
        state.navigate(Route::Collection);
        press(&mut state, KeyCode::Char('5'));
        assert!(!state.collection_columns.is_visible("summary"));
        press(&mut state, KeyCode::Char('5'));
        assert!(state.collection_columns.is_visible("summary"));
    }

    #[test]
    fn test_chat_message_from_keyboard() {
        let mut state = state();
        state.navigate(Route::Chat);
        press(&mut state, KeyCode::Enter);
        type_text(&mut state, "Hello");
        let cmd = press(&mut state, KeyCode::Enter);
        assert!(matches!(cmd, Some(ChatCommand::Send { ref prompt, .. }) if prompt == "Hello"));
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn test_studio_keys() {
        let mut state = state();
        state.navigate(Route::Photo);
        press(&mut state, KeyCode::Char('r'));
        press(&mut state, KeyCode::Char('d'));
        assert_eq!(state.photo_studio.value(StudioField::Resolution), Some("1024x1792"));

        press(&mut state, KeyCode::Enter);
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.mode, Mode::Normal);
        assert!(state.status.contains("describe the photo"));
    }

    #[test]
    fn test_top_up_preset_keys() {
        let mut state = state();
        state.navigate(Route::Subscription);
        press(&mut state, KeyCode::Char('4'));
        assert_eq!(state.gems, 6000);
    }

    #[test]
    fn test_quit() {
        let mut state = state();
        press(&mut state, KeyCode::Char('q'));
        assert!(state.should_quit);
    }
}
