//! Listing screen: category strips, search and card selection.

/// Listing screen state types.
pub mod state;
pub(super) mod ui;

use cinedeck_api::tmdb::TmdbApi;
use crossterm::event::{KeyCode, KeyModifiers};

use self::state::InputMode;
use super::app::App;

/// Handles a key press on the listing screen. Returns `true` to exit.
pub(super) fn handle_input<A: TmdbApi + Send + Sync + 'static>(
    app: &mut App<A>,
    key: KeyCode,
    modifiers: KeyModifiers,
) -> bool {
    match app.listing.input_mode {
        InputMode::Search => {
            handle_search_input(app, key);
            false
        }
        InputMode::Normal => handle_normal_input(app, key, modifiers),
    }
}

/// Handles key input in search mode.
fn handle_search_input<A: TmdbApi + Send + Sync + 'static>(app: &mut App<A>, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            app.listing.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            app.listing.input_mode = InputMode::Normal;
            if !app.start_search() {
                tracing::debug!("ignored blank search query");
            }
        }
        KeyCode::Backspace => app.listing.query_pop(),
        KeyCode::Char(c) => app.listing.query_push(c),
        _ => {}
    }
}

/// Handles key input in normal mode. Returns `true` to exit.
fn handle_normal_input<A: TmdbApi + Send + Sync + 'static>(
    app: &mut App<A>,
    key: KeyCode,
    modifiers: KeyModifiers,
) -> bool {
    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Up | KeyCode::Char('k') => app.listing.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.listing.move_down(),
        KeyCode::Left | KeyCode::Char('h') => app.listing.move_left(),
        KeyCode::Right | KeyCode::Char('l') => app.listing.move_right(),
        KeyCode::Char('/') => app.listing.input_mode = InputMode::Search,
        KeyCode::Char('r') => app.start_load(),
        KeyCode::Char('x') => app.listing.dismiss_notice(),
        KeyCode::Enter => {
            if let Some(request) = app.listing.activate_selected() {
                app.open_detail(request);
            }
        }
        _ => {}
    }
    false
}
