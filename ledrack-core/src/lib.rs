//! Board-agnostic core logic for the LED rack firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Display abstraction trait for dot-matrix panels
//! - Playlist aggregate and the scheduler that rotates through it
//! - Procedural effects (twinkle, knight-rider sweep, pong, sine wave)
//! - Text renderer and mode dispatch
//! - Configuration type definitions
//!
//! The [`Controller`] ties everything together and is driven once per tick
//! by the firmware main loop.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod effects;
pub mod render;
pub mod scheduler;
pub mod traits;

pub use controller::Controller;

#[cfg(test)]
pub(crate) mod testing;
