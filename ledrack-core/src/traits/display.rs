//! Display driver trait for dot-matrix LED panels
//!
//! The panel driver owns the frame buffer, the font and the scroll
//! animation. The core only issues these primitives and never waits on
//! the hardware.

use crate::config::PanelGeometry;

/// Where a text string is anchored on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextPosition {
    #[default]
    Left,
    Center,
    Right,
}

/// Scroll animation used to bring text in and out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollEffect {
    /// Text enters from the right and leaves to the left
    ScrollLeft,
    /// Text enters from the left and leaves to the right
    ScrollRight,
}

/// Trait for a single-bit-per-pixel matrix panel
///
/// Implementations must ignore pixel writes outside the panel. All
/// operations are infallible: a panel that loses its link simply shows
/// stale content until the next write.
pub trait MatrixDisplay {
    /// Clear the frame buffer (all pixels off, no text)
    fn clear(&mut self);

    /// Turn a single pixel on or off
    ///
    /// - `row`: 0 is the top row
    /// - `col`: 0 is the leftmost column
    fn set_pixel(&mut self, row: u8, col: u8, on: bool);

    /// Set the panel intensity (0-15)
    fn set_intensity(&mut self, level: u8);

    /// Invert pixel polarity for text output
    fn set_invert(&mut self, invert: bool);

    /// Set the scroll frame delay (lower is faster)
    fn set_speed(&mut self, speed: u16);

    /// Set the pause between scroll-in and scroll-out (ms)
    fn set_pause(&mut self, pause_ms: u16);

    /// Set the anchor used by [`MatrixDisplay::print`]
    fn set_text_alignment(&mut self, position: TextPosition);

    /// Draw a string without animation
    fn print(&mut self, text: &str);

    /// Start a scroll animation for `text`
    fn display_text(
        &mut self,
        text: &str,
        position: TextPosition,
        speed: u16,
        pause_ms: u16,
        effect: ScrollEffect,
    );

    /// Advance the scroll animation by one step
    ///
    /// Returns `true` once the current animation cycle has completed.
    fn animate(&mut self) -> bool;

    /// Restart the current scroll animation from the beginning
    fn reset_animation(&mut self);
}

/// Helper operations built on [`MatrixDisplay`]
pub trait DisplayExt: MatrixDisplay {
    /// Light a pixel given signed coordinates, skipping anything off-panel
    ///
    /// Returns `true` if the pixel was inside the panel.
    fn light(&mut self, geometry: &PanelGeometry, row: i32, col: i32) -> bool {
        if !geometry.contains(row, col) {
            return false;
        }
        self.set_pixel(row as u8, col as u8, true);
        true
    }

    /// Apply intensity, speed and pause in one go
    fn apply_timing(&mut self, brightness: u8, speed: u16, pause_ms: u16) {
        self.set_intensity(brightness);
        self.set_speed(speed);
        self.set_pause(pause_ms);
    }

    /// Advance a looping scroll, restarting it when a cycle completes
    ///
    /// Returns `true` when the animation was restarted.
    fn animate_looping(&mut self) -> bool {
        if self.animate() {
            self.reset_animation();
            true
        } else {
            false
        }
    }
}

// Blanket implementation for all MatrixDisplay types
impl<T: MatrixDisplay + ?Sized> DisplayExt for T {}
