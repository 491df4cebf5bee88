//! Recording display for unit tests

use heapless::String;

use crate::config::defaults::{PANEL_COLS, PANEL_ROWS};
use crate::traits::{MatrixDisplay, ScrollEffect, TextPosition};

const ROWS: usize = PANEL_ROWS as usize;
const COLS: usize = PANEL_COLS as usize;

/// In-memory panel that records what the core asked of it
pub struct MockDisplay {
    pixels: [[bool; COLS]; ROWS],
    text: String<256>,
    intensity: u8,
    inverted: bool,
    scrolling: bool,
    cycle_len: u32,
    frame: u32,
    clears: usize,
    resets: usize,
    animate_calls: usize,
    text_draws: usize,
    out_of_bounds: usize,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            pixels: [[false; COLS]; ROWS],
            text: String::new(),
            intensity: 0,
            inverted: false,
            scrolling: false,
            cycle_len: 10,
            frame: 0,
            clears: 0,
            resets: 0,
            animate_calls: 0,
            text_draws: 0,
            out_of_bounds: 0,
        }
    }

    pub fn set_cycle_len(&mut self, frames: u32) {
        self.cycle_len = frames.max(1);
    }

    pub fn is_lit(&self, row: u8, col: u8) -> bool {
        self.pixels
            .get(usize::from(row))
            .and_then(|r| r.get(usize::from(col)))
            .copied()
            .unwrap_or(false)
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.iter().flatten().filter(|&&on| on).count()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn intensity(&self) -> u8 {
        self.intensity
    }

    pub fn inverted(&self) -> bool {
        self.inverted
    }

    pub fn scrolling(&self) -> bool {
        self.scrolling
    }

    pub fn clears(&self) -> usize {
        self.clears
    }

    pub fn resets(&self) -> usize {
        self.resets
    }

    pub fn animate_calls(&self) -> usize {
        self.animate_calls
    }

    pub fn text_draws(&self) -> usize {
        self.text_draws
    }

    pub fn out_of_bounds_writes(&self) -> usize {
        self.out_of_bounds
    }

    fn set_text(&mut self, text: &str) {
        self.text.clear();
        let _ = self.text.push_str(text);
        self.text_draws += 1;
    }
}

impl MatrixDisplay for MockDisplay {
    fn clear(&mut self) {
        self.pixels = [[false; COLS]; ROWS];
        self.text.clear();
        self.scrolling = false;
        self.clears += 1;
    }

    fn set_pixel(&mut self, row: u8, col: u8, on: bool) {
        match self
            .pixels
            .get_mut(usize::from(row))
            .and_then(|r| r.get_mut(usize::from(col)))
        {
            Some(px) => *px = on,
            None => self.out_of_bounds += 1,
        }
    }

    fn set_intensity(&mut self, level: u8) {
        self.intensity = level;
    }

    fn set_invert(&mut self, invert: bool) {
        self.inverted = invert;
    }

    fn set_speed(&mut self, _speed: u16) {}

    fn set_pause(&mut self, _pause_ms: u16) {}

    fn set_text_alignment(&mut self, _position: TextPosition) {}

    fn print(&mut self, text: &str) {
        self.set_text(text);
        self.scrolling = false;
    }

    fn display_text(
        &mut self,
        text: &str,
        _position: TextPosition,
        _speed: u16,
        _pause_ms: u16,
        _effect: ScrollEffect,
    ) {
        self.set_text(text);
        self.scrolling = true;
        self.frame = 0;
    }

    fn animate(&mut self) -> bool {
        self.animate_calls += 1;
        self.frame += 1;
        self.frame >= self.cycle_len
    }

    fn reset_animation(&mut self) {
        self.frame = 0;
        self.resets += 1;
    }
}
