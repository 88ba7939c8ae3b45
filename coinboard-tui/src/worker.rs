//! Background fetch thread.
//!
//! The only asynchronous boundary in the dashboard. The UI sends a `Fetch`
//! tagged with the session generation; the worker answers with the same tag
//! so the UI can drop responses that belong to a session it already reloaded.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::{info, warn};

use coinboard_core::data::{DataError, TickerSource};
use coinboard_core::Ticker;

/// Commands sent from the TUI to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerCommand {
    Fetch { generation: u64 },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    Fetched {
        generation: u64,
        result: Result<Vec<Ticker>, DataError>,
    },
}

/// Spawn the worker thread around a ticker source.
pub fn spawn_worker(
    source: Box<dyn TickerSource>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("coinboard-worker".into())
        .spawn(move || worker_loop(source.as_ref(), rx, tx))
}

fn worker_loop(
    source: &dyn TickerSource,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) {
    while let Ok(cmd) = rx.recv() {
        match cmd {
            WorkerCommand::Fetch { generation } => {
                info!(generation, source = source.name(), "fetch requested");
                let result = source.fetch();
                if let Err(e) = &result {
                    warn!(generation, error = %e, "fetch failed");
                }
                if tx.send(WorkerResponse::Fetched { generation, result }).is_err() {
                    // UI is gone.
                    break;
                }
            }
            WorkerCommand::Shutdown => break,
        }
    }
}
