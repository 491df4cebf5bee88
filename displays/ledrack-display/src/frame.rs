//! Frame buffer
//!
//! Holds one bit per pixel plus the text and scroll state a panel driver
//! would keep. Text is not rasterised here: the buffer records what should
//! be shown and steps a scroll position whose cycle length follows the text
//! width, which is all the core needs to loop animations.

use heapless::String;
use ledrack_core::config::defaults::{GLYPH_WIDTH, PANEL_COLS, PANEL_ROWS};
use ledrack_core::config::MAX_TEXT_LEN;
use ledrack_core::traits::{MatrixDisplay, ScrollEffect, TextPosition};

use crate::backend::{PanelBackend, PanelError};

/// Largest packed row, enough for 255 columns
const MAX_ROW_BYTES: usize = 32;

/// Frame buffer for the stock 8x96 rack bar
pub type RackFrame = FrameBuffer<{ PANEL_ROWS as usize }, { PANEL_COLS as usize }>;

/// Text currently held by the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextState {
    /// No text
    None,
    /// Printed without animation
    Static(TextPosition),
    /// Scrolling; `step` counts frames into the current cycle
    Scrolling {
        position: TextPosition,
        effect: ScrollEffect,
        step: u32,
    },
}

/// Frame buffer for a `ROWS` x `COLS` panel
#[derive(Clone)]
pub struct FrameBuffer<const ROWS: usize, const COLS: usize> {
    pixels: [[bool; COLS]; ROWS],
    text: String<MAX_TEXT_LEN>,
    text_state: TextState,
    alignment: TextPosition,
    intensity: u8,
    invert: bool,
    speed: u16,
    pause_ms: u16,
    glyph_width: u8,
    /// Whether the buffer changed since the last flush
    dirty: bool,
}

impl<const ROWS: usize, const COLS: usize> Default for FrameBuffer<ROWS, COLS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const ROWS: usize, const COLS: usize> FrameBuffer<ROWS, COLS> {
    pub fn new() -> Self {
        Self {
            pixels: [[false; COLS]; ROWS],
            text: String::new(),
            text_state: TextState::None,
            alignment: TextPosition::Left,
            intensity: 0,
            invert: false,
            speed: 0,
            pause_ms: 0,
            glyph_width: GLYPH_WIDTH,
            dirty: true,
        }
    }

    /// Pixel state as drawn (before inversion)
    pub fn is_lit(&self, row: usize, col: usize) -> bool {
        self.pixels
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.iter().flatten().filter(|&&on| on).count()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn text_state(&self) -> TextState {
        self.text_state
    }

    pub fn alignment(&self) -> TextPosition {
        self.alignment
    }

    pub fn intensity(&self) -> u8 {
        self.intensity
    }

    pub fn inverted(&self) -> bool {
        self.invert
    }

    pub fn speed(&self) -> u16 {
        self.speed
    }

    pub fn pause_ms(&self) -> u16 {
        self.pause_ms
    }

    pub fn is_scrolling(&self) -> bool {
        matches!(self.text_state, TextState::Scrolling { .. })
    }

    /// Frames in one full scroll: the text crosses the whole panel
    pub fn scroll_cycle(&self) -> u32 {
        let text_cols = self.text.chars().count() as u32 * u32::from(self.glyph_width);
        (text_cols + COLS as u32).max(1)
    }

    /// Check if the buffer needs flushing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark buffer as clean (after flushing)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Pack one row, applying inversion
    pub fn packed_row(&self, row: usize, out: &mut [u8]) -> usize {
        let bytes = COLS.div_ceil(8).min(out.len());
        out[..bytes].fill(0);
        if let Some(pixels) = self.pixels.get(row) {
            for (col, &on) in pixels.iter().enumerate().take(bytes * 8) {
                if on != self.invert {
                    out[col / 8] |= 0x80 >> (col % 8);
                }
            }
        }
        bytes
    }

    /// Push the buffer to a backend if anything changed
    pub fn flush<B: PanelBackend>(&mut self, backend: &mut B) -> Result<(), PanelError> {
        if !self.dirty {
            return Ok(());
        }
        if !backend.is_ready() {
            return Err(PanelError::NotInitialized);
        }
        backend.set_intensity(self.intensity)?;
        let mut buf = [0u8; MAX_ROW_BYTES];
        for row in 0..ROWS {
            let len = self.packed_row(row, &mut buf);
            let row = u8::try_from(row).map_err(|_| PanelError::InvalidRow)?;
            backend.write_row(row, &buf[..len])?;
        }
        self.dirty = false;
        Ok(())
    }

    fn set_text(&mut self, text: &str) {
        self.text.clear();
        for ch in text.chars() {
            if self.text.push(ch).is_err() {
                break;
            }
        }
    }
}

impl<const ROWS: usize, const COLS: usize> MatrixDisplay for FrameBuffer<ROWS, COLS> {
    fn clear(&mut self) {
        self.pixels = [[false; COLS]; ROWS];
        self.text.clear();
        self.text_state = TextState::None;
        self.dirty = true;
    }

    fn set_pixel(&mut self, row: u8, col: u8, on: bool) {
        if let Some(px) = self
            .pixels
            .get_mut(usize::from(row))
            .and_then(|r| r.get_mut(usize::from(col)))
        {
            if *px != on {
                *px = on;
                self.dirty = true;
            }
        }
    }

    fn set_intensity(&mut self, level: u8) {
        self.intensity = level.min(15);
        self.dirty = true;
    }

    fn set_invert(&mut self, invert: bool) {
        self.invert = invert;
        self.dirty = true;
    }

    fn set_speed(&mut self, speed: u16) {
        self.speed = speed;
    }

    fn set_pause(&mut self, pause_ms: u16) {
        self.pause_ms = pause_ms;
    }

    fn set_text_alignment(&mut self, position: TextPosition) {
        self.alignment = position;
    }

    fn print(&mut self, text: &str) {
        self.set_text(text);
        self.text_state = TextState::Static(self.alignment);
        self.dirty = true;
    }

    fn display_text(
        &mut self,
        text: &str,
        position: TextPosition,
        speed: u16,
        pause_ms: u16,
        effect: ScrollEffect,
    ) {
        self.set_text(text);
        self.alignment = position;
        self.speed = speed;
        self.pause_ms = pause_ms;
        self.text_state = TextState::Scrolling {
            position,
            effect,
            step: 0,
        };
        self.dirty = true;
    }

    fn animate(&mut self) -> bool {
        let cycle = self.scroll_cycle();
        match &mut self.text_state {
            TextState::Scrolling { step, .. } => {
                if *step < cycle {
                    *step += 1;
                    self.dirty = true;
                }
                *step >= cycle
            }
            // Nothing animating counts as a finished cycle
            TextState::Static(_) | TextState::None => true,
        }
    }

    fn reset_animation(&mut self) {
        if let TextState::Scrolling { step, .. } = &mut self.text_state {
            *step = 0;
            self.dirty = true;
        }
    }
}
