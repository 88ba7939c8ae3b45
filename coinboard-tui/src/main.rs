//! `coinboard-tui [--config PATH] [--file PATH]`
//!
//! Fetches the ticker list once from the configured endpoint (or reads a
//! saved JSON payload with `--file`) and opens the dashboard.

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use coinboard_core::data::{CoinloreProvider, JsonFileSource, TickerSource};
use coinboard_core::Config;
use coinboard_tui::app::{AppState, LoadState};
use coinboard_tui::worker::{self, WorkerCommand};
use coinboard_tui::{input, logging, ui};

#[derive(Parser)]
#[command(name = "coinboard-tui", about = "Coinboard terminal dashboard")]
struct Args {
    /// Config file (defaults to <config_dir>/coinboard/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read tickers from a saved JSON payload instead of the endpoint.
    #[arg(long)]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match args.config.or_else(Config::default_path) {
        Some(path) => Config::load(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };

    logging::init(&logging::default_log_path())?;
    info!(url = %config.source.url, "starting coinboard-tui");

    let source: Box<dyn TickerSource> = match args.file {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(CoinloreProvider::new(&config.source)?),
    };

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle =
        worker::spawn_worker(source, cmd_rx, resp_tx).context("spawning fetch worker")?;

    let mut app = AppState::new(cmd_tx.clone(), resp_rx, config);
    app.request_fetch();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Shutdown worker. A fetch still in flight finishes before the worker
    // sees the command.
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("coinboard-tui exited");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.handle_worker_response(resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        if app.load == LoadState::Loading {
            app.spinner_tick = app.spinner_tick.wrapping_add(1);
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
