//! Configuration types
//!
//! Panel layout, item defaults and the playlist item model. Nothing here
//! knows how items are stored; the `serde` feature lets the persistence
//! side pick its own encoding.

pub mod defaults;
pub mod panel;
pub mod types;

pub use panel::*;
pub use types::*;
