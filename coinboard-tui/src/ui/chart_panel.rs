//! Panel 3: line chart of the highest-priced coins.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use coinboard_core::dashboard::PriceSeries;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let series = app.price_series();
    if series.is_empty() {
        render_empty(f, area);
    } else {
        render_chart(f, area, &series);
    }
}

fn render_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  The dataset is empty; nothing to chart.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_chart(f: &mut Frame, area: Rect, series: &PriceSeries) {
    let data = series.xy();
    let [y_min, y_max] = series.y_bounds();
    let x_max = series.points.len().saturating_sub(1) as f64;

    let dataset = Dataset::default()
        .name(format!("Top {} by USD price", series.points.len()))
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::ACCENT))
        .graph_type(GraphType::Line)
        .data(&data);

    let x_labels: Vec<Span> = series
        .points
        .iter()
        .map(|p| Span::styled(p.label.clone(), theme::muted()))
        .collect();

    let chart = Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("USD", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{:.0}", y_min), theme::muted()),
                    Span::styled(format!("{:.0}", (y_min + y_max) / 2.0), theme::muted()),
                    Span::styled(format!("{:.0}", y_max), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}
