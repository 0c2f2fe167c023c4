//! Detail screen: metadata, poster and trailer for one movie.

/// Detail screen state types.
pub mod state;
pub(super) mod ui;

use cinedeck_api::tmdb::{TmdbApi, poster_url};
use crossterm::event::{KeyCode, KeyModifiers};

use self::state::DetailPhase;
use super::app::App;

/// Handles a key press on the detail screen. Returns `true` to exit.
pub(super) fn handle_input<A: TmdbApi + Send + Sync + 'static>(
    app: &mut App<A>,
    key: KeyCode,
    modifiers: KeyModifiers,
) -> bool {
    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Esc | KeyCode::Char('b') => app.close_detail(),
        KeyCode::Up | KeyCode::Char('k') => {
            if let Some(detail) = app.detail.as_mut() {
                detail.scroll_up();
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if let Some(detail) = app.detail.as_mut() {
                detail.scroll_down();
            }
        }
        KeyCode::Char('r') => {
            if app
                .detail
                .as_ref()
                .is_some_and(|d| matches!(d.phase(), DetailPhase::Failed(_)))
            {
                app.retry_detail();
            }
        }
        KeyCode::Char('p') => app.play_trailer(),
        KeyCode::Char('o') => open_poster(app),
        _ => {}
    }
    false
}

/// Opens the current movie's poster image in the system viewer.
fn open_poster<A: TmdbApi + Send + Sync + 'static>(app: &mut App<A>) {
    let Some(DetailPhase::Ready(movie)) = app.detail.as_ref().map(state::DetailState::phase) else {
        return;
    };
    let Some(url) = poster_url(movie.poster_path.as_deref(), &app.options.image_size) else {
        app.message = Some(String::from("No poster available"));
        return;
    };
    if let Err(e) = open::that(&url) {
        tracing::warn!("failed to open poster: {e}");
    }
}
