//! Panel configuration
//!
//! Physical layout of the LED bar plus the timing defaults that depend on it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::defaults::{
    DEFAULT_DURATION_MS, DEFAULT_MESSAGE_MS, GLYPH_WIDTH, PANEL_COLS, PANEL_ROWS,
};

/// Panel and timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// Pixel rows
    pub rows: u8,
    /// Pixel columns
    pub cols: u8,
    /// Average glyph width used to decide whether static text fits
    pub glyph_width: u8,
    /// Duration given to items whose duration is unset (ms)
    pub default_duration_ms: u32,
    /// Default lifetime of a temporary message (ms)
    pub message_duration_ms: u32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            rows: PANEL_ROWS,
            cols: PANEL_COLS,
            glyph_width: GLYPH_WIDTH,
            default_duration_ms: DEFAULT_DURATION_MS,
            message_duration_ms: DEFAULT_MESSAGE_MS,
        }
    }
}

impl PanelConfig {
    /// Pixel geometry of the panel (never zero-sized)
    pub fn geometry(&self) -> PanelGeometry {
        PanelGeometry::new(self.rows, self.cols)
    }

    /// Number of characters that fit as static text
    pub fn text_capacity(&self) -> usize {
        usize::from(self.cols) / usize::from(self.glyph_width.max(1))
    }

    /// Default duration, never zero
    pub fn effective_default_duration(&self) -> u32 {
        if self.default_duration_ms == 0 {
            DEFAULT_DURATION_MS
        } else {
            self.default_duration_ms
        }
    }
}

/// Rows and columns of the pixel grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelGeometry {
    rows: u8,
    cols: u8,
}

impl PanelGeometry {
    /// Create a geometry; zero dimensions are raised to one
    pub fn new(rows: u8, cols: u8) -> Self {
        Self {
            rows: rows.max(1),
            cols: cols.max(1),
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Last valid column index
    pub fn last_col(&self) -> u8 {
        self.cols - 1
    }

    /// Last valid row index
    pub fn last_row(&self) -> u8 {
        self.rows - 1
    }

    /// Vertical center row
    pub fn mid_row(&self) -> u8 {
        self.rows / 2
    }

    /// Whether a signed coordinate lies on the panel
    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && row < i32::from(self.rows) && col < i32::from(self.cols)
    }
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self::new(PANEL_ROWS, PANEL_COLS)
    }
}
