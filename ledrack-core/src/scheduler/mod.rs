//! Playlist scheduler
//!
//! Owns item sequencing, timing and the deletion policy.

pub mod events;
pub mod executor;
pub mod playlist;

pub use events::{TickOutcome, Transition, TransitionOutcome};
pub use executor::Scheduler;
pub use playlist::Playlist;
