//! Top-level UI layout: one panel at a time with a status bar.

pub mod cards_panel;
pub mod chart_panel;
pub mod help_panel;
pub mod overlays;
pub mod status_bar;
pub mod table_panel;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, LoadState, Overlay, Panel};
use crate::theme;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    draw_panel(f, main_area, app);
    status_bar::render(f, status_area, app);

    match app.overlay {
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::Search => overlays::render_search(f, main_area, app),
        Overlay::None => {}
    }
}

/// Draw the active panel with its border.
fn draw_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let panel = app.active_panel;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}] ", panel.label(), panel.index() + 1))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    // Help is readable before the data arrives.
    if panel == Panel::Help {
        help_panel::render(f, inner, app);
        return;
    }

    match &app.load {
        LoadState::Loading => render_loading(f, inner, app.spinner_tick),
        LoadState::Failed(message) => render_failed(f, inner, message),
        LoadState::Ready => match panel {
            Panel::Table => table_panel::render(f, inner, app),
            Panel::Cards => cards_panel::render(f, inner, app),
            Panel::Chart => chart_panel::render(f, inner, app),
            Panel::Help => {}
        },
    }
}

fn render_loading(f: &mut Frame, area: Rect, tick: usize) {
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  {} ", SPINNER[tick % SPINNER.len()]), theme::accent_bold()),
            Span::styled("Fetching tickers...", theme::muted()),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_failed(f: &mut Frame, area: Rect, message: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {message}"), theme::negative())),
        Line::from(""),
        Line::from(Span::styled(
            "  [r]etry  [e]rror details  [q]uit",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
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

/// Truncate or pad `s` to exactly `width` characters.
pub(crate) fn fit(s: &str, width: usize, right_align: bool) -> String {
    let count = s.chars().count();
    if count > width {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    } else if right_align {
        format!("{s:>width$}")
    } else {
        format!("{s:<width$}")
    }
}
