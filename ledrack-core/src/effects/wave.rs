//! Layered sine wave
//!
//! Up to three components are summed per column. Higher components run
//! faster with a smaller amplitude, adding finer ripples on the base wave.

use core::f32::consts::TAU;

use libm::{fmodf, roundf, sinf};
use rand::Rng;

use crate::config::{PanelGeometry, WaveParams, MAX_WAVE_PHASES};
use crate::traits::{DisplayExt, MatrixDisplay};

/// Phase advance of the first component per update (radians)
const BASE_FREQUENCY: f32 = 0.15;

/// Columns per full cycle of the first component
const BASE_WAVELENGTH: f32 = 64.0;

/// One-in-N chance of thickening a column
const THICKEN_ODDS: u8 = 8;

/// Sine wave state
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WaveStore {
    phase: [f32; MAX_WAVE_PHASES],
    frequency: [f32; MAX_WAVE_PHASES],
    amplitude: [f32; MAX_WAVE_PHASES],
    components: usize,
    last_update: Option<u32>,
}

impl Default for WaveStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveStore {
    pub const fn new() -> Self {
        Self {
            phase: [0.0; MAX_WAVE_PHASES],
            frequency: [0.0; MAX_WAVE_PHASES],
            amplitude: [0.0; MAX_WAVE_PHASES],
            components: 0,
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

    /// Phases of the active components
    pub fn phases(&self) -> &[f32] {
        &self.phase[..self.components]
    }

    /// Wave height at `col`, in rows above the center
    pub fn height_at(&self, col: u8) -> f32 {
        let col = f32::from(col);
        (0..self.components)
            .map(|i| {
                let k = TAU * (i + 1) as f32 / BASE_WAVELENGTH;
                sinf(col * k + self.phase[i]) * self.amplitude[i]
            })
            .sum()
    }

    /// Row lit for `col`, or `None` when it falls off the panel
    pub fn row_at(&self, col: u8, geometry: &PanelGeometry) -> Option<u8> {
        let row = i32::from(geometry.mid_row()) - roundf(self.height_at(col)) as i32;
        if geometry.contains(row, 0) {
            Some(row as u8)
        } else {
            None
        }
    }

    /// Advance the phases and redraw, if the update interval has passed
    ///
    /// Returns `true` if the frame was redrawn.
    pub fn update<D, R>(
        &mut self,
        params: &WaveParams,
        now: u32,
        geometry: &PanelGeometry,
        display: &mut D,
        rng: &mut R,
    ) -> bool
    where
        D: MatrixDisplay + ?Sized,
        R: Rng,
    {
        let params = params.clamped(geometry.rows());
        if let Some(last) = self.last_update {
            if now.wrapping_sub(last) < u32::from(params.interval_ms) {
                return false;
            }
        }
        self.last_update = Some(now);

        self.configure(&params);
        for i in 0..self.components {
            self.phase[i] = fmodf(self.phase[i] + self.frequency[i], TAU);
        }

        display.clear();
        for col in 0..geometry.cols() {
            let Some(row) = self.row_at(col, geometry) else {
                continue;
            };
            let row = i32::from(row);
            let col = i32::from(col);
            display.light(geometry, row, col);
            if rng.random_range(0..THICKEN_ODDS) == 0 {
                let side = if rng.random_bool(0.5) { 1 } else { -1 };
                display.light(geometry, row + side, col);
            }
        }
        true
    }

    fn configure(&mut self, params: &WaveParams) {
        self.components = usize::from(params.phases).min(MAX_WAVE_PHASES);
        let amplitude = f32::from(params.amplitude);
        for i in 0..MAX_WAVE_PHASES {
            let n = (i + 1) as f32;
            self.frequency[i] = BASE_FREQUENCY * n;
            self.amplitude[i] = amplitude / n;
        }
    }
}
