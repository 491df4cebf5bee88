//! Command draining and tick forwarding
//!
//! Generic over the raw mutex so the same code runs on the board
//! (`CriticalSectionRawMutex`) and in host tests (`NoopRawMutex`).

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Receiver;
use embassy_sync::signal::Signal;
use rand::Rng;

use ledrack_core::scheduler::TickOutcome;
use ledrack_core::traits::MatrixDisplay;
use ledrack_core::Controller;

use crate::commands::{apply_command, PlaylistCommand};

/// Apply every queued command without waiting
///
/// Returns the number of commands taken off the channel, including any
/// that were rejected.
pub fn pump_commands<R, M, const N: usize>(
    controller: &mut Controller<R>,
    commands: &Receiver<'_, M, PlaylistCommand, N>,
    now: u32,
) -> usize
where
    R: Rng,
    M: RawMutex,
{
    let mut drained = 0;
    while let Ok(command) = commands.try_receive() {
        apply_command(controller, command, now);
        drained += 1;
    }
    #[cfg(feature = "defmt")]
    if drained > 0 {
        defmt::debug!("Applied {} playlist commands", drained);
    }
    drained
}

/// Run one controller tick and forward a pending save request
pub fn tick_and_signal<R, D, M>(
    controller: &mut Controller<R>,
    now: u32,
    display: &mut D,
    save: &Signal<M, ()>,
) -> TickOutcome
where
    R: Rng,
    D: MatrixDisplay + ?Sized,
    M: RawMutex,
{
    let outcome = controller.tick(now, display);
    if controller.take_save_request() {
        save.signal(());
    }
    outcome
}

/// One pass of the display loop: start, drain edits, tick
///
/// The controller's start time is stamped with the first tick it sees, so
/// the first item gets its full duration however long boot took.
#[derive(Debug, Default)]
pub struct TickDriver {
    started: bool,
}

impl TickDriver {
    pub const fn new() -> Self {
        Self { started: false }
    }

    pub fn started(&self) -> bool {
        self.started
    }

    /// Handle one tick at `now`
    pub fn step<R, D, M, const N: usize>(
        &mut self,
        controller: &mut Controller<R>,
        commands: &Receiver<'_, M, PlaylistCommand, N>,
        save: &Signal<M, ()>,
        display: &mut D,
        now: u32,
    ) -> TickOutcome
    where
        R: Rng,
        D: MatrixDisplay + ?Sized,
        M: RawMutex,
    {
        if !self.started {
            controller.start(now);
            self.started = true;
        }
        pump_commands(controller, commands, now);
        tick_and_signal(controller, now, display, save)
    }
}
