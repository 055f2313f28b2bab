//! TUI views and rendering
//!
//! All rendering logic is contained here. The views module draws the form
//! from AppState, but never modifies state.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tracing::trace;

use super::state::{AppState, DownloadStatus, INPUT_PLACEHOLDER};
use crate::planner::ResultView;
use crate::render::{DOWNLOAD_HINT, DOWNLOAD_LABEL, count_label, empty_result_message, error_label, results_title};

mod colors {
    use ratatui::style::Color;

    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const BUTTON: Color = Color::Rgb(0, 255, 127); // Spring green
    pub const PENDING: Color = Color::Rgb(255, 215, 0); // Gold
    pub const ERROR: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const NUMBER: Color = Color::Rgb(100, 149, 237); // Cornflower blue
    pub const LINK: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const DIM: Color = Color::DarkGray;
}

/// Main render function
pub fn render(state: &AppState, frame: &mut Frame) {
    trace!(request = ?state.request(), "render: called");
    let error_height = if state.request().error().is_some() { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Length(3),            // Form
            Constraint::Length(error_height), // Error banner
            Constraint::Min(0),               // Results
            Constraint::Length(3),            // Footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_form(state, frame, chunks[1]);
    if error_height > 0 {
        render_error(state, frame, chunks[2]);
    }
    render_results(state, frame, chunks[3]);
    render_footer(state, frame, chunks[4]);

    if state.show_help {
        render_help_overlay(frame, frame.area());
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "🗺️ Trip Planner",
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Plan your perfect city itinerary with optimized routes",
            Style::default().fg(colors::DIM),
        )),
    ])
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn render_form(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!(input_len = state.input.len(), "render_form: called");
    let label = state.request().submit_label();
    let enabled = state.input_enabled();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(label.chars().count() as u16 + 4)])
        .split(area);

    let input_line = if state.input.is_empty() && enabled {
        Line::from(vec![
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            Span::styled(INPUT_PLACEHOLDER, Style::default().fg(colors::DIM)),
        ])
    } else if enabled {
        let cursor = state.cursor_pos.min(state.input.len());
        let (before, after) = state.input.split_at(cursor);
        Line::from(vec![
            Span::raw(before),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            Span::raw(after),
        ])
    } else {
        Line::from(Span::styled(state.input.as_str(), Style::default().fg(colors::DIM)))
    };

    let input = Paragraph::new(input_line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Enter a city name: ")
            .border_style(if enabled {
                Style::default()
            } else {
                Style::default().fg(colors::DIM)
            }),
    );
    frame.render_widget(input, chunks[0]);

    let button_style = if enabled {
        Style::default().fg(colors::BUTTON).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors::PENDING)
    };
    let button = Paragraph::new(Line::from(Span::styled(label, button_style)))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, chunks[1]);
}

fn render_error(state: &AppState, frame: &mut Frame, area: Rect) {
    let Some(err) = state.request().error() else {
        return;
    };
    let banner = Paragraph::new(Line::from(Span::styled(
        error_label(err),
        Style::default().fg(colors::ERROR).add_modifier(Modifier::BOLD),
    )))
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(colors::ERROR)));
    frame.render_widget(banner, area);
}

/// Build the lines of the results block
fn results_lines(state: &AppState) -> Vec<Line<'static>> {
    let request = state.request();
    let query = state.planner.query();
    let mut lines = Vec::new();

    match request.result_view() {
        ResultView::NonEmptyResult { itinerary, artifact } => {
            lines.push(Line::from(Span::styled(
                results_title(query),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                count_label(itinerary.len()),
                Style::default().fg(colors::DIM),
            )));
            lines.push(Line::from(""));

            for (position, attraction) in itinerary.numbered() {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{:>3}  ", position),
                        Style::default().fg(colors::NUMBER).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(attraction.name().to_string(), Style::default().add_modifier(Modifier::BOLD)),
                ]));
                lines.push(Line::from(vec![
                    Span::raw("     "),
                    Span::styled(attraction.coordinates_label(), Style::default().fg(colors::DIM)),
                ]));
            }

            if let Some(artifact) = artifact {
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::styled(DOWNLOAD_LABEL, Style::default().fg(colors::LINK).add_modifier(Modifier::BOLD)),
                    Span::styled("  [Ctrl+D]", Style::default().fg(colors::KEYBIND)),
                ]));
                lines.push(Line::from(Span::styled(
                    artifact.resolve(&state.base_url),
                    Style::default().fg(colors::LINK).add_modifier(Modifier::UNDERLINED),
                )));
                lines.push(Line::from(Span::styled(DOWNLOAD_HINT, Style::default().fg(colors::DIM))));
            }
        }
        ResultView::EmptyResult => {
            lines.push(Line::from(Span::styled(
                empty_result_message(query),
                Style::default().fg(colors::DIM),
            )));
        }
        ResultView::NoResultYet => {
            if request.is_pending() {
                lines.push(Line::from(Span::styled(
                    request.submit_label(),
                    Style::default().fg(colors::PENDING),
                )));
            }
        }
    }

    match &state.download_status {
        Some(DownloadStatus::Saved { path, bytes }) => {
            lines.push(Line::from(Span::styled(
                format!("Saved {} bytes to {}", bytes, path),
                Style::default().fg(colors::LINK),
            )));
        }
        Some(DownloadStatus::Failed(message)) => {
            lines.push(Line::from(Span::styled(
                format!("Download failed: {}", message),
                Style::default().fg(colors::ERROR),
            )));
        }
        None => {}
    }

    lines
}

fn render_results(state: &AppState, frame: &mut Frame, area: Rect) {
    let results = Paragraph::new(results_lines(state))
        .wrap(Wrap { trim: false })
        .scroll((state.results_scroll, 0))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(results, area);
}

fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    let mut keybinds = vec![("[Enter]", "Plan"), ("[↑↓]", "Scroll")];
    if state.request().artifact().is_some() {
        keybinds.push(("[Ctrl+D]", "Download"));
    }
    keybinds.push(("[F1]", "Help"));
    keybinds.push(("[Esc]", "Quit"));

    let mut spans = vec![Span::raw(" ")];
    for (key, action) in keybinds {
        spans.push(Span::styled(
            key,
            Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {} ", action)));
    }

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 50, area);
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled("Keys", Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD))),
        Line::from(""),
        key_line("Enter", "Plan a trip for the city in the input"),
        key_line("Ctrl+D", "Download the KML file"),
        key_line("Ctrl+U", "Clear the input"),
        key_line("↑ ↓ PgUp PgDn", "Scroll the itinerary"),
        key_line("Esc / Ctrl+C", "Quit"),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", Style::default().fg(Color::DarkGray))),
    ];

    let help = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL).title(" Help "));
    frame.render_widget(help, popup_area);
}

fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:>14}  ", key), Style::default().fg(colors::KEYBIND)),
        Span::raw(desc),
    ])
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
