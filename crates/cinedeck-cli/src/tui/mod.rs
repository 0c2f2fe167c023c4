//! TUI module for the interactive movie browser.
//!
//! Uses `ratatui` + `crossterm` for rendering. Network requests run as
//! tasks on the tokio runtime and report back over a channel that the
//! event loop drains every tick.

mod app;
/// Detail screen.
pub mod detail;
mod fetch;
/// Listing screen.
pub mod listing;
#[cfg(test)]
mod mock;
/// Playback element.
pub mod player;

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use cinedeck_api::tmdb::TmdbApi;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::runtime::Handle;

pub use self::app::BrowseOptions;
use self::app::App;

/// Runs the movie browser until the user quits.
///
/// Blocks the calling thread; `runtime` must be driven elsewhere.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub fn run_browser<A: TmdbApi + Send + Sync + 'static>(
    api: Arc<A>,
    runtime: Handle,
    options: BrowseOptions,
) -> Result<()> {
    let mut app = App::new(api, runtime, options);
    app.start_load();

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app);

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
fn run_event_loop<A: TmdbApi + Send + Sync + 'static>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<A>,
) -> Result<()> {
    loop {
        app.drain();
        app.tick = app.tick.wrapping_add(1);

        terminal
            .draw(|frame| {
                let message = app.message.as_deref();
                let image_size = app.options.image_size.as_str();
                match &app.detail {
                    Some(detail) => detail::ui::draw(frame, detail, app.tick, image_size, message),
                    None => listing::ui::draw(frame, &app.listing, app.tick, image_size, message),
                }
            })
            .context("failed to draw TUI")?;

        if event::poll(std::time::Duration::from_millis(100)).context("failed to poll events")?
            && let Event::Key(key) = event::read().context("failed to read event")?
            && key.kind == KeyEventKind::Press
        {
            let exit = if app.detail.is_some() {
                detail::handle_input(app, key.code, key.modifiers)
            } else {
                listing::handle_input(app, key.code, key.modifiers)
            };
            if exit {
                return Ok(());
            }
        }
    }
}
