//! Test helpers for creating mock data

use std::sync::mpsc::{self, Receiver, Sender};

use coinboard_core::{Config, Ticker};

use crate::app::AppState;
use crate::worker::{WorkerCommand, WorkerResponse};

pub fn ticker(rank: u32) -> Ticker {
    Ticker {
        id: rank.to_string(),
        symbol: format!("C{rank}"),
        name: format!("Coin {rank}"),
        rank,
        price_usd: (1000.0 / f64::from(rank)).into(),
        percent_change_24h: (if rank % 2 == 0 { 1.5 } else { -2.25 }).into(),
        percent_change_1h: Some(0.1.into()),
        percent_change_7d: Some(3.0.into()),
        price_btc: 0.01.into(),
        market_cap_usd: 5_000_000.0.into(),
        volume_24h: Some(120_000.0.into()),
        circulating_supply: Some(1_000_000.0.into()),
        total_supply: Some(2_000_000.0.into()),
        max_supply: None,
    }
}

pub fn tickers(n: u32) -> Vec<Ticker> {
    (1..=n).map(ticker).collect()
}

/// App wired to bare channels instead of a worker thread.
pub fn app_with_channels() -> (AppState, Receiver<WorkerCommand>, Sender<WorkerResponse>) {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let app = AppState::new(cmd_tx, resp_rx, Config::default());
    (app, cmd_rx, resp_tx)
}
