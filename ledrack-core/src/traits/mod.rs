//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and the panel driver.

pub mod display;

pub use display::{DisplayExt, MatrixDisplay, ScrollEffect, TextPosition};
