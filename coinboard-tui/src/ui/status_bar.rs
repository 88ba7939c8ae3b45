//! Bottom status bar: last status message, panel hints, selection count.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = vec![Span::styled(
        " 1:Table 2:Cards 3:Chart 4:Help  r:refresh q:quit",
        theme::muted(),
    )];

    let selected = app.table.grid.selected_count();
    if selected > 0 {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(format!("{selected} selected"), theme::positive()));
    }

    if let Some((msg, level)) = &app.status_message {
        spans.push(Span::raw(" | "));
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
