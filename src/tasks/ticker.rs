//! Ticker background task

use std::time::Duration;
use tokio::{task::JoinHandle, time::{interval_at, Instant}};
use tracing::debug;

use crate::engine::{TickResult, TimerEngine};

/// Spawn the task that drives `engine` once per `period` until the session
/// ends or the returned handle is aborted
pub fn spawn_ticker(engine: TimerEngine, epoch: u64, period: Duration) -> JoinHandle<()> {
    tokio::spawn(ticker_task(engine, epoch, period))
}

async fn ticker_task(engine: TimerEngine, epoch: u64, period: Duration) {
    debug!("Ticker {} running every {:?}", epoch, period);

    // First tick one full period after start
    let mut interval = interval_at(Instant::now() + period, period);

    loop {
        interval.tick().await;

        match engine.tick(epoch) {
            TickResult::Continue => {}
            TickResult::Completed(finished) => {
                engine.announce_completion(finished).await;
                break;
            }
            TickResult::Stale => break,
        }
    }

    debug!("Ticker {} finished", epoch);
}
