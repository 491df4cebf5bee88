//! Frame buffer and panel backend for LED Rack dot-matrix bars
//!
//! This crate provides:
//! - `FrameBuffer`, an in-memory panel implementing the core `MatrixDisplay` trait
//! - `PanelBackend` trait for the hardware that receives packed rows
//!
//! # Architecture
//!
//! The core drives a `FrameBuffer` every tick. The firmware flushes the
//! buffer to its `PanelBackend` (a MAX7219 chain on the stock board) only
//! when something changed, so the SPI bus stays idle while an effect is
//! rate-limited.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod frame;

// Re-export key types
pub use backend::{PanelBackend, PanelError};
pub use frame::{FrameBuffer, RackFrame, TextState};
