//! Twinkle effect
//!
//! A fixed pool of particles, each fading in and out over its lifetime.
//! The panel is one bit per pixel, so intermediate brightness is produced
//! by lighting a particle on a random fraction of frames.

use core::f32::consts::PI;

use rand::Rng;

use crate::config::defaults::{MAX_INTENSITY, TWINKLE_PEAK_FLOOR};
use crate::config::{PanelGeometry, TwinkleParams, MAX_TWINKLES};
use crate::traits::{DisplayExt, MatrixDisplay};

/// Particles spawned per frame for every this many units of density
const DENSITY_PER_SPAWN: u8 = 5;

/// One twinkle particle slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Particle {
    pub active: bool,
    pub started_at: u32,
    pub lifetime_ms: u16,
    /// Brightness at the middle of the lifetime (0-15)
    pub peak: u8,
    pub row: u8,
    pub col: u8,
}

impl Particle {
    /// Brightness at `now`
    pub fn brightness(&self, now: u32) -> f32 {
        twinkle_brightness(now.wrapping_sub(self.started_at), self.lifetime_ms, self.peak)
    }
}

/// Fade envelope: `sin(pi * progress) * peak`, clamped to `[0, peak]`
///
/// A zero lifetime, or an `elapsed` at or past the lifetime, yields 0.
pub fn twinkle_brightness(elapsed_ms: u32, lifetime_ms: u16, peak: u8) -> f32 {
    if lifetime_ms == 0 || elapsed_ms >= u32::from(lifetime_ms) {
        return 0.0;
    }
    let progress = elapsed_ms as f32 / f32::from(lifetime_ms);
    let peak = f32::from(peak);
    (libm::sinf(PI * progress) * peak).clamp(0.0, peak)
}

/// Twinkle particle pool
#[derive(Debug, Clone)]
pub struct TwinkleStore {
    particles: [Particle; MAX_TWINKLES],
}

impl Default for TwinkleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TwinkleStore {
    pub const fn new() -> Self {
        Self {
            particles: [Particle {
                active: false,
                started_at: 0,
                lifetime_ms: 0,
                peak: 0,
                row: 0,
                col: 0,
            }; MAX_TWINKLES],
        }
    }

    /// Deactivate every particle
    pub fn reset(&mut self) {
        self.particles = [Particle::default(); MAX_TWINKLES];
    }

    pub fn active_count(&self) -> usize {
        self.particles.iter().filter(|p| p.active).count()
    }

    /// Currently active particles
    pub fn active(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.active)
    }

    /// Spawn, age and draw particles for one frame
    ///
    /// Runs on every call; the frame is cleared first.
    pub fn update<D, R>(
        &mut self,
        params: &TwinkleParams,
        now: u32,
        geometry: &PanelGeometry,
        display: &mut D,
        rng: &mut R,
    ) where
        D: MatrixDisplay + ?Sized,
        R: Rng,
    {
        let params = params.clamped();
        display.clear();

        let inactive = self.particles.iter().filter(|p| !p.active).count();
        let spawn = usize::from(params.density / DENSITY_PER_SPAWN).min(inactive);
        for _ in 0..spawn {
            let Some(slot) = self.particles.iter_mut().find(|p| !p.active) else {
                break;
            };
            *slot = Particle {
                active: true,
                started_at: now,
                lifetime_ms: rng.random_range(params.min_lifetime_ms..=params.max_lifetime_ms),
                peak: rng.random_range(TWINKLE_PEAK_FLOOR..=MAX_INTENSITY),
                row: rng.random_range(0..geometry.rows()),
                col: rng.random_range(0..geometry.cols()),
            };
        }

        for particle in self.particles.iter_mut().filter(|p| p.active) {
            let elapsed = now.wrapping_sub(particle.started_at);
            if elapsed >= u32::from(particle.lifetime_ms) {
                particle.active = false;
                continue;
            }
            let brightness = particle.brightness(now);
            if brightness > 0.0 && f32::from(rng.random_range(0..MAX_INTENSITY)) < brightness {
                display.light(geometry, i32::from(particle.row), i32::from(particle.col));
            }
        }
    }
}
