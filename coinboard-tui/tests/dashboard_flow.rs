//! End-to-end flow: worker thread → app state → rendered frame.

use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use ratatui::backend::TestBackend;
use ratatui::Terminal;

use coinboard_core::data::{JsonFileSource, StaticSource, UNAVAILABLE_MESSAGE};
use coinboard_core::Config;
use coinboard_tui::app::{AppState, LoadState, Panel};
use coinboard_tui::ui;
use coinboard_tui::worker::{spawn_worker, WorkerCommand};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../coinboard-core/tests/fixtures/tickers.json")
}

fn screen(app: &AppState) -> String {
    let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();
    terminal.draw(|f| ui::draw(f, app)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}

fn wait_for_response(app: &mut AppState) {
    let resp = app
        .worker_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("worker response");
    app.handle_worker_response(resp);
}

#[test]
fn fetch_through_worker_then_render_every_panel() {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let handle = spawn_worker(Box::new(JsonFileSource::new(fixture())), cmd_rx, resp_tx).unwrap();

    let mut app = AppState::new(cmd_tx.clone(), resp_rx, Config::default());
    app.request_fetch();
    assert!(screen(&app).contains("Fetching tickers"));

    wait_for_response(&mut app);
    assert_eq!(app.load, LoadState::Ready);
    assert_eq!(app.tickers().len(), 5);

    let table = screen(&app);
    assert!(table.contains("Bitcoin"));
    assert!(table.contains("Page 1 of 1"));

    app.active_panel = Panel::Cards;
    assert!(screen(&app).contains("Cards Arranged by Ranks"));

    app.active_panel = Panel::Chart;
    assert!(screen(&app).contains("Top 5 by USD price"));

    app.active_panel = Panel::Help;
    assert!(screen(&app).contains("Global Navigation"));

    cmd_tx.send(WorkerCommand::Shutdown).unwrap();
    handle.join().unwrap();
}

#[test]
fn missing_file_shows_opaque_error() {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let source = JsonFileSource::new("/nonexistent/coinboard/tickers.json");
    let handle = spawn_worker(Box::new(source), cmd_rx, resp_tx).unwrap();

    let mut app = AppState::new(cmd_tx.clone(), resp_rx, Config::default());
    app.request_fetch();
    wait_for_response(&mut app);

    assert_eq!(app.load, LoadState::Failed(UNAVAILABLE_MESSAGE.to_string()));
    assert!(screen(&app).contains(UNAVAILABLE_MESSAGE));
    assert_eq!(app.error_history.len(), 1);

    cmd_tx.send(WorkerCommand::Shutdown).unwrap();
    handle.join().unwrap();
}

#[test]
fn reload_ignores_response_from_previous_session() {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let handle = spawn_worker(Box::new(StaticSource::default()), cmd_rx, resp_tx).unwrap();

    let mut app = AppState::new(cmd_tx.clone(), resp_rx, Config::default());
    app.request_fetch();
    app.reload();

    // First answer belongs to generation 0 and is dropped.
    wait_for_response(&mut app);
    assert_eq!(app.load, LoadState::Loading);

    wait_for_response(&mut app);
    assert_eq!(app.load, LoadState::Ready);
    assert_eq!(app.generation, 1);

    cmd_tx.send(WorkerCommand::Shutdown).unwrap();
    handle.join().unwrap();
}
