//! Tick loop
//!
//! Raises [`TICK_SIGNAL`] at a fixed rate with the time since boot. The
//! value wraps after ~49 days; the scheduler compares times with wrapping
//! arithmetic.

use embassy_time::{Duration, Instant, Ticker};

use crate::channels::TICK_SIGNAL;

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u64 = 10;

/// Signal a tick every [`TICK_INTERVAL_MS`], forever
pub async fn tick_loop() -> ! {
    #[cfg(feature = "defmt")]
    defmt::info!("Tick loop started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));
    let start = Instant::now();

    loop {
        ticker.next().await;
        // Truncation is the intended wrap
        let now_ms = start.elapsed().as_millis() as u32;
        TICK_SIGNAL.signal(now_ms);
    }
}
