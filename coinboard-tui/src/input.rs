//! Keyboard input dispatch: overlays → global keys → panel-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use coinboard_core::dashboard::ranked_gallery;
use coinboard_core::TickerColumn;

use crate::app::{AppState, LoadState, Overlay, Panel};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::Search => {
            handle_search_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => { app.active_panel = Panel::Table; return; }
        KeyCode::Char('2') => { app.active_panel = Panel::Cards; return; }
        KeyCode::Char('3') => { app.active_panel = Panel::Chart; return; }
        KeyCode::Char('4') => { app.active_panel = Panel::Help; return; }
        KeyCode::Tab => {
            app.active_panel = app.active_panel.next();
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        KeyCode::Char('r') => {
            app.reload();
            return;
        }
        KeyCode::Char('e') => {
            app.overlay = Overlay::ErrorHistory;
            app.error_scroll = 0;
            return;
        }
        _ => {}
    }

    // Nothing to interact with until the dataset arrives.
    if app.load != LoadState::Ready {
        return;
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Table => handle_table_key(app, key),
        Panel::Cards => handle_cards_key(app, key),
        Panel::Chart | Panel::Help => {} // display only
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

/// Search filters live: every keystroke re-applies the term.
fn handle_search_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.search_input.clear();
            app.table.grid.set_search_term("");
            app.overlay = Overlay::None;
        }
        KeyCode::Enter => {
            app.overlay = Overlay::None;
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            app.table.grid.set_search_term(app.search_input.clone());
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            app.table.grid.set_search_term(app.search_input.clone());
        }
        _ => {}
    }
    app.table.cursor = 0;
}

fn handle_table_key(app: &mut AppState, key: KeyEvent) {
    let table = &mut app.table;
    let visible = table.grid.view().rows.len();

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if table.cursor + 1 < visible {
                table.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            table.cursor = table.cursor.saturating_sub(1);
        }
        KeyCode::Char(' ') => {
            if let Some(id) = table.cursor_id() {
                table.grid.toggle_row_selected(&id);
            }
        }
        KeyCode::Char('a') => table.grid.toggle_all_visible_selected(),
        KeyCode::Char('n') | KeyCode::Right => table.grid.next_page(),
        KeyCode::Char('p') | KeyCode::Left => table.grid.previous_page(),
        KeyCode::Char('g') => table.grid.first_page(),
        KeyCode::Char('G') => table.grid.last_page(),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let size = table.grid.page_size().larger();
            table.grid.apply_page_size(size);
        }
        KeyCode::Char('-') => {
            let size = table.grid.page_size().smaller();
            table.grid.apply_page_size(size);
        }
        KeyCode::Char('<') | KeyCode::Char(',') => {
            table.focused_column = table.focused_column.saturating_sub(1);
        }
        KeyCode::Char('>') | KeyCode::Char('.') => {
            if table.focused_column + 1 < TickerColumn::TABLE.len() {
                table.focused_column += 1;
            }
        }
        KeyCode::Char('s') => {
            let column = table.focused();
            table.grid.sort_by_column(column);
        }
        KeyCode::Char('/') => {
            app.search_input = app.table.grid.search_term().to_string();
            app.overlay = Overlay::Search;
            return;
        }
        KeyCode::Char('x') => {
            app.export_selected();
            return;
        }
        _ => {}
    }
    app.table.clamp_cursor();
}

fn handle_cards_key(app: &mut AppState, key: KeyEvent) {
    let count = ranked_gallery(app.tickers()).len();
    let cards = &mut app.cards;
    match key.code {
        KeyCode::Char('l') | KeyCode::Right => {
            if cards.offset + 1 < count {
                cards.offset += 1;
            }
        }
        KeyCode::Char('h') | KeyCode::Left => {
            cards.offset = cards.offset.saturating_sub(1);
        }
        KeyCode::Home => cards.offset = 0,
        KeyCode::End => cards.offset = count.saturating_sub(1),
        _ => {}
    }
}
