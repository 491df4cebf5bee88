//! Procedural effects engine
//!
//! One state store per visual mode. Each store clamps its parameters on
//! entry and does its own rate limiting, so visual speed does not depend
//! on how often the host ticks.

pub mod pong;
pub mod sweep;
pub mod twinkle;
pub mod wave;

pub use pong::{Ball, PongStore};
pub use sweep::SweepStore;
pub use twinkle::{twinkle_brightness, Particle, TwinkleStore};
pub use wave::WaveStore;

use crate::config::ModeKind;

/// State stores for every procedural mode
#[derive(Debug, Clone, Default)]
pub struct EffectStores {
    pub twinkle: TwinkleStore,
    pub sweep: SweepStore,
    pub pong: PongStore,
    pub wave: WaveStore,
}

impl EffectStores {
    pub const fn new() -> Self {
        Self {
            twinkle: TwinkleStore::new(),
            sweep: SweepStore::new(),
            pong: PongStore::new(),
            wave: WaveStore::new(),
        }
    }

    /// Reset the store owned by `kind` so nothing stale carries over
    pub fn on_mode_changed(&mut self, kind: ModeKind) {
        match kind {
            ModeKind::Twinkle => self.twinkle.reset(),
            ModeKind::KnightRider => self.sweep.reset(),
            ModeKind::Pong => self.pong.reset(),
            ModeKind::SineWave => self.wave.reset(),
            ModeKind::Text | ModeKind::Unrecognized => {}
        }
    }

    /// Make the store owned by `kind` draw on its next update
    pub fn force_update(&mut self, kind: ModeKind) {
        match kind {
            ModeKind::KnightRider => self.sweep.force_update(),
            ModeKind::Pong => self.pong.force_update(),
            ModeKind::SineWave => self.wave.force_update(),
            // Twinkle draws every update; text redraws on its own
            ModeKind::Twinkle | ModeKind::Text | ModeKind::Unrecognized => {}
        }
    }

    pub fn reset_all(&mut self) {
        self.twinkle.reset();
        self.sweep.reset();
        self.pong.reset();
        self.wave.reset();
    }
}
