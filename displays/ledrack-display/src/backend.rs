//! Panel backend trait
//!
//! Defines the interface a hardware driver (MAX7219 chain, simulator, ...)
//! implements so a [`FrameBuffer`](crate::FrameBuffer) can be pushed to it.

/// Panel backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// Communication error with the panel
    Communication,
    /// Row index outside the panel
    InvalidRow,
    /// Panel not initialized
    NotInitialized,
}

/// Panel backend trait
///
/// Rows are sent packed eight columns per byte, most significant bit
/// first, column 0 in the first byte.
pub trait PanelBackend {
    /// Write one packed pixel row
    fn write_row(&mut self, row: u8, bits: &[u8]) -> Result<(), PanelError>;

    /// Set the hardware intensity (0-15)
    fn set_intensity(&mut self, level: u8) -> Result<(), PanelError>;

    /// Check if the panel is ready
    fn is_ready(&self) -> bool;
}
