//! TUI rendering logic for the detail screen.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::state::{DetailPhase, DetailState, DetailView, TrailerState};
use crate::tui::listing::ui::spinner;
use crate::tui::player::frame_height;

/// Draws the detail screen.
#[allow(clippy::indexing_slicing)]
pub fn draw(
    frame: &mut Frame,
    state: &DetailState,
    tick: usize,
    image_size: &str,
    message: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // body
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    match state.phase() {
        DetailPhase::Loading => draw_placeholder(frame, chunks[0], state, tick),
        DetailPhase::Failed(error) => draw_error(frame, chunks[0], state, error),
        DetailPhase::Ready(_) => {
            if let Some(view) = state.view(image_size) {
                draw_movie(frame, chunks[0], state, &view, tick);
            }
        }
    }
    draw_footer(frame, chunks[1], state, message);
}

fn draw_placeholder(frame: &mut Frame, area: Rect, state: &DetailState, tick: usize) {
    let text = format!("{} Loading movie {}...", spinner(tick), state.movie_id());
    let placeholder = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(placeholder, area);
}

fn draw_error(frame: &mut Frame, area: Rect, state: &DetailState, error: &str) {
    let lines = vec![
        Line::from(Span::styled(
            format!("Failed to load movie {}", state.movie_id()),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(error.to_owned()),
        Line::from(""),
        Line::from("Press r to retry or Esc to go back."),
    ];
    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Error "));
    frame.render_widget(body, area);
}

/// Draws metadata on the left and the trailer panel on the right.
#[allow(clippy::indexing_slicing)]
fn draw_movie(frame: &mut Frame, area: Rect, state: &DetailState, view: &DetailView, tick: usize) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let mut lines = vec![
        Line::from(Span::styled(
            view.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Year: {}", view.year)),
    ];
    if let Some(tagline) = &view.tagline {
        lines.push(Line::from(Span::styled(
            tagline.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }
    if !view.facts.is_empty() {
        lines.push(Line::from(view.facts.clone()));
    }
    lines.push(Line::from(format!(
        "Poster: {}",
        view.poster_url.as_deref().unwrap_or("(none)")
    )));
    lines.push(Line::from(""));
    lines.extend(view.synopsis.lines().map(|l| Line::from(l.to_owned())));

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0))
        .block(Block::default().borders(Borders::ALL).title(" Details "));
    frame.render_widget(body, columns[0]);

    draw_trailer(frame, columns[1], state, tick);
}

/// Draws the trailer panel, sized to a 16:9 frame of the panel width.
fn draw_trailer(frame: &mut Frame, area: Rect, state: &DetailState, tick: usize) {
    let inner_width = area.width.saturating_sub(2);
    let height = frame_height(inner_width).saturating_add(2).max(5);
    let panel = Rect {
        height: height.min(area.height),
        ..area
    };

    let (text, style) = match state.trailer() {
        TrailerState::Loading => (
            vec![Line::from(format!("{} Looking for a trailer...", spinner(tick)))],
            Style::default(),
        ),
        TrailerState::Found(video) => {
            let name = video.name.clone().unwrap_or_else(|| video.key.clone());
            let url = state.trailer_url().unwrap_or_default();
            (
                vec![
                    Line::from(name),
                    Line::from(url),
                    Line::from(""),
                    Line::from("Press p to play"),
                ],
                Style::default().fg(Color::Green),
            )
        }
        TrailerState::Missing => (
            vec![Line::from("No trailer")],
            Style::default().fg(Color::DarkGray),
        ),
        TrailerState::Failed(error) => (
            vec![Line::from("No trailer"), Line::from(error.clone())],
            Style::default().fg(Color::DarkGray),
        ),
    };

    let trailer = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Trailer "));
    frame.render_widget(trailer, panel);
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, state: &DetailState, message: Option<&str>) {
    let help_text = match (message, state.phase()) {
        (Some(message), _) => Line::from(message.to_owned()),
        (None, DetailPhase::Failed(_)) => Line::from("r: retry  Esc/b: back  q: quit"),
        (None, _) => Line::from(vec![Span::raw(
            "\u{2191}\u{2193}/j/k: scroll  p: play trailer  o: open poster  Esc/b: back  q: quit",
        )]),
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
