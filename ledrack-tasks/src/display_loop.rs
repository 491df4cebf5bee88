//! Display loop
//!
//! Waits for a tick, drains queued edits, then drives the controller.

use rand::Rng;

use ledrack_core::traits::MatrixDisplay;
use ledrack_core::Controller;

use crate::channels::{COMMAND_CHANNEL, SAVE_REQUEST, TICK_SIGNAL};
use crate::pump::TickDriver;

/// Run the controller on every tick, forever
///
/// `after_tick` runs with the display once the controller has drawn, which
/// is where the board flushes its frame buffer to the panel.
pub async fn display_loop<R, D, F>(
    controller: &mut Controller<R>,
    display: &mut D,
    mut after_tick: F,
) -> !
where
    R: Rng,
    D: MatrixDisplay,
    F: FnMut(&mut D),
{
    #[cfg(feature = "defmt")]
    defmt::info!("Display loop started");

    let receiver = COMMAND_CHANNEL.receiver();
    let mut driver = TickDriver::new();

    loop {
        let now = TICK_SIGNAL.wait().await;
        driver.step(controller, &receiver, &SAVE_REQUEST, display, now);
        after_tick(display);
    }
}
