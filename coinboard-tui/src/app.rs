//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The fetch worker communicates via channels.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;
use tracing::{info, warn};

use coinboard_core::dashboard::PriceSeries;
use coinboard_core::data::{DataError, UNAVAILABLE_MESSAGE};
use coinboard_core::grid::{DataGrid, GridError, PageSize};
use coinboard_core::{Config, Ticker, TickerColumn};

use crate::worker::{WorkerCommand, WorkerResponse};

const ERROR_HISTORY_CAP: usize = 50;

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Table,
    Cards,
    Chart,
    Help,
}

impl Panel {
    pub const COUNT: usize = 4;

    pub fn index(self) -> usize {
        match self {
            Panel::Table => 0,
            Panel::Cards => 1,
            Panel::Chart => 2,
            Panel::Help => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Table),
            1 => Some(Panel::Cards),
            2 => Some(Panel::Chart),
            3 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Table => "Table",
            Panel::Cards => "Cards",
            Panel::Chart => "Chart",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % Self::COUNT).unwrap_or(Panel::Table)
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + Self::COUNT - 1) % Self::COUNT).unwrap_or(Panel::Table)
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub message: String,
    pub context: String,
}

/// Where the one fetch of this session stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Search,
    ErrorHistory,
}

/// Table panel state: the grid plus the cursor within the visible page.
#[derive(Debug)]
pub struct TablePanelState {
    pub grid: DataGrid<Ticker>,
    /// Row within the current page.
    pub cursor: usize,
    /// Index into `TickerColumn::TABLE` of the column `s` sorts by.
    pub focused_column: usize,
}

impl TablePanelState {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            grid: DataGrid::with_page_size(page_size),
            cursor: 0,
            focused_column: 0,
        }
    }

    pub fn focused(&self) -> TickerColumn {
        TickerColumn::TABLE[self.focused_column.min(TickerColumn::TABLE.len() - 1)]
    }

    /// Id of the record under the cursor.
    pub fn cursor_id(&self) -> Option<String> {
        self.grid
            .view()
            .rows
            .get(self.cursor)
            .map(|r| r.record.id.clone())
    }

    /// Keep the cursor on a visible row after the page changed underneath it.
    pub fn clamp_cursor(&mut self) {
        let visible = self.grid.view().rows.len();
        self.cursor = self.cursor.min(visible.saturating_sub(1));
    }
}

/// Card gallery state.
#[derive(Debug, Default)]
pub struct CardsPanelState {
    /// Index of the first card shown.
    pub offset: usize,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Session
    pub load: LoadState,
    /// Bumped on every reload; responses for older generations are dropped.
    pub generation: u64,
    pub spinner_tick: usize,

    // Panel states
    pub table: TablePanelState,
    pub cards: CardsPanelState,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
    /// Text typed into the search overlay; mirrored into the grid per key.
    pub search_input: String,
    pub config: Config,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        config: Config,
    ) -> Self {
        let page_size = config.page_size().unwrap_or_default();
        Self {
            active_panel: Panel::Table,
            running: true,
            load: LoadState::Loading,
            generation: 0,
            spinner_tick: 0,
            table: TablePanelState::new(page_size),
            cards: CardsPanelState::default(),
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
            search_input: String::new(),
            config,
        }
    }

    /// Ask the worker for this session's dataset.
    pub fn request_fetch(&mut self) {
        self.load = LoadState::Loading;
        let cmd = WorkerCommand::Fetch {
            generation: self.generation,
        };
        if self.worker_tx.send(cmd).is_err() {
            self.fail_load("fetch worker is not running".into());
        }
    }

    /// Full session reload: every piece of state is rebuilt from scratch and
    /// a new fetch starts. An older in-flight fetch is not cancelled; its
    /// response is ignored when it arrives.
    pub fn reload(&mut self) {
        info!(generation = self.generation + 1, "reloading session");
        let page_size = self.config.page_size().unwrap_or_default();
        self.generation += 1;
        self.active_panel = Panel::Table;
        self.table = TablePanelState::new(page_size);
        self.cards = CardsPanelState::default();
        self.status_message = None;
        self.error_history.clear();
        self.error_scroll = 0;
        self.overlay = Overlay::None;
        self.search_input.clear();
        self.spinner_tick = 0;
        self.request_fetch();
    }

    pub fn handle_worker_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::Fetched { generation, result } => {
                self.apply_fetch(generation, result);
            }
        }
    }

    /// Install a fetched dataset, or record why it failed.
    pub fn apply_fetch(&mut self, generation: u64, result: Result<Vec<Ticker>, DataError>) {
        if generation != self.generation {
            warn!(generation, current = self.generation, "dropping stale fetch response");
            return;
        }
        match result {
            Ok(tickers) => {
                let count = tickers.len();
                self.table.grid.set_dataset(tickers);
                self.table.cursor = 0;
                self.cards.offset = 0;
                self.load = LoadState::Ready;
                self.set_status(format!("Loaded {count} tickers"));
            }
            Err(e) => self.fail_load(e.to_string()),
        }
    }

    fn fail_load(&mut self, detail: String) {
        self.load = LoadState::Failed(UNAVAILABLE_MESSAGE.to_string());
        self.push_error(UNAVAILABLE_MESSAGE.to_string(), detail);
    }

    pub fn is_ready(&self) -> bool {
        self.load == LoadState::Ready
    }

    pub fn tickers(&self) -> &[Ticker] {
        self.table.grid.records()
    }

    pub fn price_series(&self) -> PriceSeries {
        PriceSeries::top_by_price(self.tickers(), self.config.chart.top_n, self.config.chart.y_max)
    }

    /// Export the selected rows into the configured directory.
    pub fn export_selected(&mut self) -> Option<PathBuf> {
        let export = match self.table.grid.export_selected() {
            Ok(export) => export,
            Err(GridError::EmptySelection) => {
                self.set_warning(GridError::EmptySelection.to_string());
                return None;
            }
            Err(e) => {
                self.push_error(format!("Export failed: {e}"), String::new());
                return None;
            }
        };

        match export.write_to(&self.config.export.dir) {
            Ok(path) => {
                info!(rows = export.row_count, path = %path.display(), "exported selection");
                self.set_status(format!(
                    "Exported {} rows to {}",
                    export.row_count,
                    path.display()
                ));
                Some(path)
            }
            Err(e) => {
                self.push_error(
                    format!("Export failed: {e}"),
                    self.config.export.dir.display().to_string(),
                );
                None
            }
        }
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, message: String, context: String) {
        warn!(%message, %context, "error recorded");
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{app_with_channels, tickers};

    #[test]
    fn panel_cycle() {
        assert_eq!(Panel::Table.next(), Panel::Cards);
        assert_eq!(Panel::Help.next(), Panel::Table);
        assert_eq!(Panel::Table.prev(), Panel::Help);
        assert_eq!(Panel::Cards.prev(), Panel::Table);
    }

    #[test]
    fn panel_from_index() {
        for i in 0..Panel::COUNT {
            let p = Panel::from_index(i).unwrap();
            assert_eq!(p.index(), i);
        }
        assert!(Panel::from_index(Panel::COUNT).is_none());
    }

    #[test]
    fn request_fetch_tags_current_generation() {
        let (mut app, cmd_rx, _resp_tx) = app_with_channels();
        app.request_fetch();
        assert_eq!(cmd_rx.try_recv().unwrap(), WorkerCommand::Fetch { generation: 0 });
        assert_eq!(app.load, LoadState::Loading);
    }

    #[test]
    fn successful_fetch_makes_session_ready() {
        let (mut app, _cmd_rx, _resp_tx) = app_with_channels();
        app.apply_fetch(0, Ok(tickers(25)));
        assert!(app.is_ready());
        assert_eq!(app.table.grid.view().page_count, 3);
        assert_eq!(app.price_series().points.len(), 10);
    }

    #[test]
    fn failed_fetch_shows_single_opaque_message() {
        let (mut app, _cmd_rx, _resp_tx) = app_with_channels();
        app.apply_fetch(0, Err(DataError::NetworkUnreachable("dns".into())));
        assert_eq!(app.load, LoadState::Failed(UNAVAILABLE_MESSAGE.to_string()));
        assert_eq!(app.error_history.len(), 1);
        assert!(app.error_history[0].context.contains("dns"));
    }

    #[test]
    fn reload_discards_session_and_ignores_stale_response() {
        let (mut app, cmd_rx, _resp_tx) = app_with_channels();
        app.apply_fetch(0, Ok(tickers(25)));
        app.table.grid.toggle_row_selected("3");
        app.table.grid.set_search_term("coin");
        app.active_panel = Panel::Chart;

        app.reload();
        assert_eq!(app.generation, 1);
        assert_eq!(app.load, LoadState::Loading);
        assert_eq!(app.active_panel, Panel::Table);
        assert_eq!(app.table.grid.selected_count(), 0);
        assert_eq!(app.table.grid.search_term(), "");
        assert_eq!(cmd_rx.try_recv().unwrap(), WorkerCommand::Fetch { generation: 1 });

        // Response for the old session arrives late.
        app.apply_fetch(0, Ok(tickers(3)));
        assert_eq!(app.load, LoadState::Loading);
        assert!(app.tickers().is_empty());

        app.apply_fetch(1, Ok(tickers(4)));
        assert!(app.is_ready());
        assert_eq!(app.tickers().len(), 4);
    }

    #[test]
    fn empty_export_warns_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _cmd_rx, _resp_tx) = app_with_channels();
        app.config.export.dir = dir.path().to_path_buf();
        app.apply_fetch(0, Ok(tickers(5)));

        assert!(app.export_selected().is_none());
        let (msg, level) = app.status_message.clone().unwrap();
        assert_eq!(msg, "Selection is empty, please select some data first");
        assert_eq!(level, StatusLevel::Warning);
        assert!(!dir.path().join("Data Stocks.csv").exists());
    }

    #[test]
    fn export_writes_selected_rows() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _cmd_rx, _resp_tx) = app_with_channels();
        app.config.export.dir = dir.path().to_path_buf();
        app.apply_fetch(0, Ok(tickers(5)));
        app.table.grid.toggle_row_selected("2");

        let path = app.export_selected().unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with("2,C2,Coin 2,2,"));
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn error_history_caps_at_50() {
        let (mut app, _cmd_rx, _resp_tx) = app_with_channels();
        for i in 0..60 {
            app.push_error(format!("error {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), 50);
        assert!(app.error_history[0].message.contains("59"));
    }

    #[test]
    fn cursor_clamps_to_short_last_page() {
        let (mut app, _cmd_rx, _resp_tx) = app_with_channels();
        app.apply_fetch(0, Ok(tickers(25)));
        app.table.cursor = 9;
        app.table.grid.last_page();
        app.table.clamp_cursor();
        assert_eq!(app.table.cursor, 4);
        assert_eq!(app.table.cursor_id().as_deref(), Some("25"));
    }
}
