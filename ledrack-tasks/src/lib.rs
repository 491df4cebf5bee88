//! Embassy integration for the LED Rack controller
//!
//! Configuration edits arrive as [`PlaylistCommand`]s on a channel and are
//! drained right before each tick, so the controller sees exactly one
//! writer per tick. The save request raised by an edit is forwarded on a
//! signal for whichever task owns persistence.
//!
//! With the `task` feature the crate also provides the static channels and
//! the tick and display loops. Those are plain `async fn`s; the board crate
//! wraps them in `#[embassy_executor::task]`s with concrete types.

#![no_std]
#![deny(unsafe_code)]

pub mod commands;
pub mod pump;

#[cfg(feature = "task")]
pub mod channels;
#[cfg(feature = "task")]
pub mod display_loop;
#[cfg(feature = "task")]
pub mod tick;

pub use commands::{apply_command, ItemBatch, PlaylistCommand, REPLACE_BATCH};
pub use pump::{pump_commands, tick_and_signal, TickDriver};
