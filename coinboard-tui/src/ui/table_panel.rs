//! Panel 1: the ticker table with selection checkboxes, sort markers and pager.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use coinboard_core::grid::{GridRow, GridView, PageSize};
use coinboard_core::{Ticker, TickerColumn};

use crate::app::AppState;
use crate::theme;
use crate::ui::fit;

fn column_width(column: TickerColumn) -> usize {
    match column {
        TickerColumn::Id => 7,
        TickerColumn::Rank => 6,
        TickerColumn::Name => 18,
        _ => 16,
    }
}

fn is_numeric(column: TickerColumn) -> bool {
    !matches!(
        column,
        TickerColumn::Id | TickerColumn::Symbol | TickerColumn::Name
    )
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let table = &app.table;
    let view = table.grid.view();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    f.render_widget(Paragraph::new(toolbar(&view)), chunks[0]);

    let mut lines: Vec<Line> = vec![header_line(&view, table.focused())];
    if view.rows.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  No rows match the current search.",
            theme::muted(),
        )));
    }
    for (i, row) in view.rows.iter().enumerate() {
        lines.push(row_line(row.record, row.selected, i == table.cursor));
    }
    f.render_widget(Paragraph::new(lines), chunks[1]);

    f.render_widget(Paragraph::new(pager(&view)), chunks[2]);
}

fn toolbar(view: &GridView<'_, Ticker>) -> Line<'static> {
    let mut spans = vec![Span::styled(" Search: ", theme::muted())];
    if view.search_term.is_empty() {
        spans.push(Span::styled("(none)  ", theme::muted()));
    } else {
        spans.push(Span::styled(format!("{}  ", view.search_term), theme::accent_bold()));
    }
    spans.push(Span::styled(
        format!("{} of {} rows", view.filtered_count, view.total_count),
        theme::neutral(),
    ));
    spans.push(Span::styled(
        "   [/]search [Space]select [a]ll [s]ort [x]export",
        theme::muted(),
    ));
    Line::from(spans)
}

fn header_line(view: &GridView<'_, Ticker>, focused: TickerColumn) -> Line<'static> {
    let all = if view.all_visible_selected() { "[x] " } else { "[ ] " };
    let mut spans = vec![Span::styled(format!(" {all}"), theme::accent_bold())];

    for column in TickerColumn::TABLE {
        let marker = match view.sort {
            Some(spec) if spec.column == column => spec.direction.marker(),
            _ => "",
        };
        let label = format!("{}{}", column.header(), marker);
        let mut style = theme::accent_bold();
        if column == focused {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        let width = column_width(column);
        spans.push(Span::styled(fit(&label, width, is_numeric(column)), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn row_line(ticker: &Ticker, selected: bool, is_cursor: bool) -> Line<'static> {
    let base = if is_cursor {
        theme::text().add_modifier(Modifier::REVERSED)
    } else if selected {
        theme::positive()
    } else {
        theme::text()
    };

    let check = if selected { "[x] " } else { "[ ] " };
    let mut spans = vec![Span::styled(format!(" {check}"), base)];

    for column in TickerColumn::TABLE {
        let text = fit(
            &ticker.cell(column).render(),
            column_width(column),
            is_numeric(column),
        );
        let style = if column == TickerColumn::PercentChange24h && !is_cursor {
            theme::change_style(ticker.percent_change_24h.value())
        } else {
            base
        };
        spans.push(Span::styled(text, style));
        spans.push(Span::styled(" ", base));
    }
    Line::from(spans)
}

fn pager(view: &GridView<'_, Ticker>) -> Line<'static> {
    let sizes: Vec<Span> = PageSize::OPTIONS
        .iter()
        .map(|size| {
            let style = if *size == view.page_size {
                theme::accent_bold()
            } else {
                theme::muted()
            };
            Span::styled(format!(" {size}"), style)
        })
        .collect();

    let mut spans = vec![
        Span::styled(" |< ", theme::enabled(view.can_go_previous)),
        Span::styled("< ", theme::enabled(view.can_go_previous)),
        Span::styled(view.pager_label(), theme::accent()),
        Span::styled(" >", theme::enabled(view.can_go_next)),
        Span::styled(" >|", theme::enabled(view.can_go_next)),
        Span::styled("   Show:", theme::muted()),
    ];
    spans.extend(sizes);
    spans.push(Span::styled(
        format!("   {} selected", view.selected_count),
        theme::neutral(),
    ));
    Line::from(spans)
}
