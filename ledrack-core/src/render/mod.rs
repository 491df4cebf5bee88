//! Text renderer and mode dispatch

pub mod dispatch;
pub mod text;

pub use dispatch::Renderer;
pub use text::{TextPlan, TextRenderer};
