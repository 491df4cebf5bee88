//! Bouncing ball
//!
//! The ball moves with fractional precision and reflects off all four
//! walls. Speed comes from the item parameters on every update; the travel
//! direction lives here so a bounce survives a parameter edit.

use libm::{copysignf, fabsf, roundf};

use crate::config::{PanelGeometry, PongParams};
use crate::traits::{DisplayExt, MatrixDisplay};

/// Ball position and velocity
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
}

/// Pong state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PongStore {
    /// `None` until the first update places the ball
    ball: Option<Ball>,
    last_update: Option<u32>,
}

impl PongStore {
    pub const fn new() -> Self {
        Self {
            ball: None,
            last_update: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Let the next update draw immediately, keeping the current state
    pub fn force_update(&mut self) {
        self.last_update = None;
    }

    pub fn ball(&self) -> Option<&Ball> {
        self.ball.as_ref()
    }

    /// Move the ball and redraw, if the update interval has passed
    ///
    /// Returns `true` if the frame was redrawn.
    pub fn update<D>(
        &mut self,
        params: &PongParams,
        now: u32,
        geometry: &PanelGeometry,
        display: &mut D,
    ) -> bool
    where
        D: MatrixDisplay + ?Sized,
    {
        let params = params.clamped();
        if let Some(last) = self.last_update {
            if now.wrapping_sub(last) < u32::from(params.interval_ms) {
                return false;
            }
        }
        self.last_update = Some(now);

        let mut ball = match self.ball {
            Some(ball) => Ball {
                velocity_x: copysignf(fabsf(params.velocity_x), ball.velocity_x),
                velocity_y: copysignf(fabsf(params.velocity_y), ball.velocity_y),
                ..ball
            },
            // Start in the middle heading the way the parameters say
            None => Ball {
                x: f32::from(geometry.cols() / 2),
                y: f32::from(geometry.mid_row()),
                velocity_x: params.velocity_x,
                velocity_y: params.velocity_y,
            },
        };
        step(&mut ball, geometry);
        self.ball = Some(ball);

        display.clear();
        display.light(geometry, roundf(ball.y) as i32, roundf(ball.x) as i32);
        true
    }
}

/// Advance one step and reflect off the walls
pub(crate) fn step(ball: &mut Ball, geometry: &PanelGeometry) {
    let max_x = f32::from(geometry.last_col());
    let max_y = f32::from(geometry.last_row());

    ball.x += ball.velocity_x;
    ball.y += ball.velocity_y;
    (ball.x, ball.velocity_x) = reflect(ball.x, ball.velocity_x, max_x);
    (ball.y, ball.velocity_y) = reflect(ball.y, ball.velocity_y, max_y);
}

fn reflect(pos: f32, velocity: f32, max: f32) -> (f32, f32) {
    if !pos.is_finite() || pos <= 0.0 {
        (0.0, fabsf(velocity))
    } else if pos >= max {
        (max, -fabsf(velocity))
    } else {
        (pos, velocity)
    }
}
