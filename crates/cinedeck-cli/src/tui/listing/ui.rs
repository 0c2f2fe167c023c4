//! TUI rendering logic for the listing screen.

use cinedeck_api::tmdb::{TmdbMovieSummary, poster_url};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::state::{InputMode, ListingState, LoadStatus, Slot};
use crate::tui::detail::state::year_label;

/// Rows per strip, borders included.
const STRIP_HEIGHT: u16 = 7;

/// Columns per card, borders included.
const CARD_WIDTH: u16 = 24;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Spinner frame for a redraw counter.
pub fn spinner(tick: usize) -> &'static str {
    tick.checked_rem(SPINNER.len())
        .and_then(|i| SPINNER.get(i))
        .copied()
        .unwrap_or("|")
}

/// Draws the listing screen.
#[allow(clippy::indexing_slicing)]
pub fn draw(
    frame: &mut Frame,
    state: &ListingState,
    tick: usize,
    image_size: &str,
    message: Option<&str>,
) {
    let banner_height = if state.notices.is_empty() { 0 } else { 3 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // search + selection
            Constraint::Length(banner_height), // notifications
            Constraint::Min(STRIP_HEIGHT),     // strips
            Constraint::Length(3),             // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state, image_size);
    if !state.notices.is_empty() {
        draw_banner(frame, chunks[1], state);
    }
    draw_strips(frame, chunks[2], state, tick);
    draw_footer(frame, chunks[3], state, message);
}

/// Draws the search input and the selected card's poster URL.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, state: &ListingState, image_size: &str) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let search_style = if state.input_mode == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let search = Paragraph::new(state.query.as_str())
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(search, header_chunks[0]);

    let selected = state.selected_movie().map_or_else(String::new, |movie| {
        poster_url(movie.poster_path.as_deref(), image_size)
            .unwrap_or_else(|| String::from("(no poster)"))
    });
    let info = Paragraph::new(selected)
        .block(Block::default().borders(Borders::ALL).title(" Poster "));
    frame.render_widget(info, header_chunks[1]);
}

/// Draws the oldest pending notification.
fn draw_banner(frame: &mut Frame, area: Rect, state: &ListingState) {
    let Some(notice) = state.notices.first() else {
        return;
    };
    let title = if state.notices.len() > 1 {
        format!(" {} (1/{}) ", notice.slot.title(), state.notices.len())
    } else {
        format!(" {} ", notice.slot.title())
    };
    let banner = Paragraph::new(notice.message.as_str())
        .style(Style::default().fg(Color::Red))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(banner, area);
}

/// Draws as many strips as fit, keeping the focused one visible.
fn draw_strips(frame: &mut Frame, area: Rect, state: &ListingState, tick: usize) {
    let visible = state.visible_slots();
    let fit = usize::from((area.height / STRIP_HEIGHT).max(1));
    let active = visible
        .iter()
        .position(|s| *s == state.active_slot())
        .unwrap_or(0);
    let first = active.saturating_sub(fit.saturating_sub(1));
    let shown: Vec<Slot> = visible.into_iter().skip(first).take(fit).collect();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(shown.iter().map(|_| Constraint::Length(STRIP_HEIGHT)))
        .split(area);

    for (slot, row) in shown.iter().zip(rows.iter()) {
        draw_strip(frame, *row, state, *slot, tick);
    }
}

fn status_label(state: &ListingState, slot: Slot, tick: usize) -> String {
    match state.status(slot) {
        LoadStatus::Idle => String::new(),
        LoadStatus::Loading => format!("{} ", spinner(tick)),
        LoadStatus::Loaded => format!("({}) ", state.movies(slot).len()),
        LoadStatus::Failed(_) => String::from("(failed) "),
    }
}

/// Draws one titled, horizontally scrolled strip of cards.
fn draw_strip(frame: &mut Frame, area: Rect, state: &ListingState, slot: Slot, tick: usize) {
    let focused = slot == state.active_slot();
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} {}", slot.title(), status_label(state, slot, tick)))
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let slot_state = state.slot(slot);
    if slot_state.movies.is_empty() {
        let text = match &slot_state.status {
            LoadStatus::Loading => String::from("Loading..."),
            LoadStatus::Failed(e) => format!("Failed: {e}"),
            LoadStatus::Idle | LoadStatus::Loaded => String::from("No movies"),
        };
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let fit = usize::from((inner.width / CARD_WIDTH).max(1));
    let first = slot_state.cursor.saturating_sub(fit.saturating_sub(1));
    let cards: Vec<(usize, &TmdbMovieSummary)> = slot_state
        .movies
        .iter()
        .enumerate()
        .skip(first)
        .take(fit)
        .collect();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(cards.iter().map(|_| Constraint::Length(CARD_WIDTH)))
        .split(inner);

    for ((idx, movie), column) in cards.into_iter().zip(columns.iter()) {
        let selected = focused && idx == slot_state.cursor;
        draw_card(frame, *column, movie, selected);
    }
}

/// Draws a single movie card.
fn draw_card(frame: &mut Frame, area: Rect, movie: &TmdbMovieSummary, selected: bool) {
    let style = if selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let poster = if movie.poster_path.as_deref().is_some_and(|p| !p.is_empty()) {
        Span::styled("[poster]", Style::default().fg(Color::Green))
    } else {
        Span::styled("[no poster]", Style::default().fg(Color::DarkGray))
    };
    let lines = vec![
        Line::from(Span::styled(movie.title.clone(), style)),
        Line::from(year_label(movie.release_year())),
        Line::from(poster),
    ];
    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(style));
    frame.render_widget(card, area);
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, state: &ListingState, message: Option<&str>) {
    let help_text = match (state.input_mode, message) {
        (InputMode::Search, _) => {
            Line::from("Type a title | Enter: search | Esc: cancel | Backspace: delete")
        }
        (InputMode::Normal, Some(message)) => Line::from(message.to_owned()),
        (InputMode::Normal, None) => Line::from(vec![Span::raw(
            "\u{2190}\u{2192}/h/l: card  \u{2191}\u{2193}/j/k: row  Enter: details  /: search  r: refresh  x: dismiss  q: quit",
        )]),
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
