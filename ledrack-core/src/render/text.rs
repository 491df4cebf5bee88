//! Text renderer
//!
//! Uses the panel driver's text and scroll primitives. Static text that
//! would not fit falls back to scrolling left.

use crate::config::{Alignment, TextParams};
use crate::traits::{DisplayExt, MatrixDisplay, ScrollEffect, TextPosition};

/// How a text item is put on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextPlan {
    /// Drawn once without animation
    Static(TextPosition),
    /// Scrolled in a continuous loop
    Scroll(TextPosition, ScrollEffect),
}

impl TextPlan {
    /// Pick a strategy for `params` on a panel fitting `capacity` characters
    pub fn for_params(params: &TextParams, capacity: usize) -> Self {
        match params.alignment {
            Alignment::ScrollLeft => Self::Scroll(TextPosition::Left, ScrollEffect::ScrollLeft),
            Alignment::ScrollRight => Self::Scroll(TextPosition::Right, ScrollEffect::ScrollRight),
            Alignment::Left | Alignment::Center | Alignment::Right => {
                let position = match params.alignment {
                    Alignment::Center => TextPosition::Center,
                    Alignment::Right => TextPosition::Right,
                    _ => TextPosition::Left,
                };
                if params.text.chars().count() > capacity {
                    Self::Scroll(position, ScrollEffect::ScrollLeft)
                } else {
                    Self::Static(position)
                }
            }
        }
    }

    pub fn is_scrolling(&self) -> bool {
        matches!(self, Self::Scroll(..))
    }
}

/// Text renderer state
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer {
    plan: Option<TextPlan>,
}

impl TextRenderer {
    pub const fn new() -> Self {
        Self { plan: None }
    }

    /// Strategy chosen by the last redraw
    pub fn plan(&self) -> Option<TextPlan> {
        self.plan
    }

    /// Clear the panel and draw `params` from scratch
    pub fn redraw<D>(
        &mut self,
        params: &TextParams,
        invert: bool,
        brightness: u8,
        capacity: usize,
        display: &mut D,
    ) where
        D: MatrixDisplay + ?Sized,
    {
        display.clear();
        display.set_invert(invert);
        display.apply_timing(brightness, params.speed, params.pause_ms);

        let plan = TextPlan::for_params(params, capacity);
        match plan {
            TextPlan::Scroll(position, effect) => {
                #[cfg(feature = "defmt")]
                if !params.alignment.is_scrolling() {
                    defmt::debug!("Text too long for static display, scrolling instead");
                }
                display.display_text(&params.text, position, params.speed, params.pause_ms, effect);
            }
            TextPlan::Static(position) => {
                display.set_text_alignment(position);
                display.print(&params.text);
            }
        }
        self.plan = Some(plan);
    }

    /// Keep a scrolling plan looping; static text needs nothing
    pub fn animate<D>(&self, display: &mut D)
    where
        D: MatrixDisplay + ?Sized,
    {
        if self.plan.is_some_and(|plan| plan.is_scrolling()) {
            display.animate_looping();
        }
    }

    pub fn reset(&mut self) {
        self.plan = None;
    }
}
