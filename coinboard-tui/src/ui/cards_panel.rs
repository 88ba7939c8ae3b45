//! Panel 2: "Cards Arranged by Ranks", a horizontally scrolling gallery.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use coinboard_core::dashboard::ranked_gallery;
use coinboard_core::Ticker;

use crate::app::AppState;
use crate::theme;

const CARD_WIDTH: u16 = 28;
const CARD_HEIGHT: u16 = 9;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let gallery = ranked_gallery(app.tickers());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(area);

    let visible = usize::from((chunks[1].width / CARD_WIDTH).max(1));
    let start = app.cards.offset.min(gallery.len().saturating_sub(1));
    let end = (start + visible).min(gallery.len());

    let title = Line::from(vec![
        Span::styled(" Cards Arranged by Ranks", theme::accent_bold()),
        Span::styled(
            format!(
                "   {}-{} of {}  [h/l]scroll",
                if gallery.is_empty() { 0 } else { start + 1 },
                end,
                gallery.len()
            ),
            theme::muted(),
        ),
    ]);
    f.render_widget(Paragraph::new(title), chunks[0]);

    let row = Rect {
        height: chunks[1].height.min(CARD_HEIGHT),
        ..chunks[1]
    };
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Length(CARD_WIDTH); visible])
        .split(row);

    for (slot, ticker) in slots.iter().zip(&gallery[start..end]) {
        render_card(f, *slot, ticker);
    }
}

fn render_card(f: &mut Frame, area: Rect, ticker: &Ticker) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(format!(" #{} ", ticker.rank))
        .title_style(theme::neutral());

    let lines = vec![
        Line::from(Span::styled(ticker.name.clone(), theme::accent_bold())),
        Line::from(Span::styled(ticker.symbol.clone(), theme::muted())),
        Line::from(""),
        Line::from(vec![
            Span::styled("USD  ", theme::muted()),
            Span::styled(format!("{}", ticker.price_usd), theme::text()),
        ]),
        Line::from(vec![
            Span::styled("BTC  ", theme::muted()),
            Span::styled(format!("{}", ticker.price_btc), theme::text()),
        ]),
        Line::from(vec![
            Span::styled("24h  ", theme::muted()),
            Span::styled(
                format!("{}%", ticker.percent_change_24h),
                theme::change_style(ticker.percent_change_24h.value()),
            ),
        ]),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}
