//! Panel 4: Help: keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, _app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global Navigation");
    key(&mut lines, "1-4", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "r", "Refresh: reload the whole session");
    key(&mut lines, "e", "Open error history overlay");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 1: Table");
    key(&mut lines, "j / k", "Move cursor down / up");
    key(&mut lines, "Space", "Toggle row selection");
    key(&mut lines, "a", "Toggle every row on this page");
    key(&mut lines, "n / p", "Next / previous page");
    key(&mut lines, "g / G", "First / last page");
    key(&mut lines, "+ / -", "Larger / smaller page size (10-50)");
    key(&mut lines, "< / >", "Move column focus");
    key(&mut lines, "s", "Sort focused column (asc → desc → off)");
    key(&mut lines, "/", "Search all fields (Enter keeps, Esc clears)");
    key(&mut lines, "x", "Export selection to Data Stocks.csv");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2: Cards");
    key(&mut lines, "h / l", "Scroll the gallery left / right");
    key(&mut lines, "Home / End", "Jump to first / last card");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 3: Chart");
    key(&mut lines, "", "Top coins by USD price");

    f.render_widget(Paragraph::new(lines), area);
}

fn section(lines: &mut Vec<Line<'_>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>16}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
