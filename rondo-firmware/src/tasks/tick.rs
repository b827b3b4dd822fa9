//! Tick task for time-based updates
//!
//! Publishes a monotonic millisecond timestamp to the controller on a
//! fixed cadence. The cadence bounds the jitter of the alert tone
//! boundaries (250-400 ms phases), so it is well under them.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use crate::channels::TICK_SIGNAL;

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u64 = 25;

/// Tick task - sends periodic tick signals with timestamp
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));

    loop {
        ticker.next().await;
        TICK_SIGNAL.signal(Instant::now().as_millis());
    }
}
