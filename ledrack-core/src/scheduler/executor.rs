//! Playlist scheduler
//!
//! Decides once per tick whether the active item has run its course and,
//! if so, which item replaces it. Elapsed time uses wrapping `u32`
//! millisecond arithmetic so a clock rollover costs at most one early or
//! late transition.

use super::events::{TickOutcome, Transition, TransitionOutcome};
use super::playlist::{Playlist, StepResult};
use crate::config::defaults::DEFAULT_DURATION_MS;
use crate::config::{ModeKind, PanelConfig};

/// Playlist scheduler
#[derive(Debug, Clone, Copy)]
pub struct Scheduler {
    /// Duration given to items whose duration is unset (ms)
    default_duration_ms: u32,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            default_duration_ms: DEFAULT_DURATION_MS,
        }
    }
}

impl Scheduler {
    pub fn new(config: &PanelConfig) -> Self {
        Self {
            default_duration_ms: config.effective_default_duration(),
        }
    }

    /// Stamp the active item's start time at boot
    pub fn start(&self, playlist: &mut Playlist, now: u32) {
        playlist.repair();
        playlist.restart_timer(now);
    }

    /// Resolve the scheduler state for this tick
    ///
    /// Performs at most one transition. An unset start time is stamped with
    /// `now` rather than tested.
    pub fn tick(&self, playlist: &mut Playlist, now: u32) -> TickOutcome {
        if !playlist.display_on() {
            return TickOutcome::Blank;
        }

        // The playlist may have been edited since the last tick
        playlist.repair();

        let default_duration = self.default_duration_ms;
        let Some(item) = playlist.active_mut() else {
            return TickOutcome::Blank;
        };
        let coerced = item.duration_ms == 0;
        if coerced {
            item.duration_ms = default_duration;
        }
        let duration = item.duration_ms;
        if coerced {
            #[cfg(feature = "defmt")]
            defmt::warn!("Item had no duration, using {} ms", default_duration);
            playlist.request_save();
        }

        let index = playlist.current_index();
        let Some(started) = playlist.item_started_at() else {
            playlist.restart_timer(now);
            return TickOutcome::Active {
                index,
                transition: None,
            };
        };

        let elapsed = now.wrapping_sub(started);
        if elapsed <= duration {
            return TickOutcome::Active {
                index,
                transition: None,
            };
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Item {} elapsed {} ms, target {} ms",
            index,
            elapsed,
            duration
        );

        let transition = self.advance(playlist, now);
        TickOutcome::Active {
            index: transition.to_index,
            transition: Some(transition),
        }
    }

    /// Retire the active item and pick its successor
    ///
    /// Increments the outgoing item's play count, deletes it if exhausted,
    /// otherwise steps forward honouring the loop flag. The incoming item's
    /// timer starts at `now`.
    pub fn advance(&self, playlist: &mut Playlist, now: u32) -> Transition {
        playlist.repair();
        let from_index = playlist.current_index();

        let (previous_mode, exhausted) = match playlist.active_mut() {
            Some(item) => {
                item.play_count = item.play_count.saturating_add(1);
                (item.kind(), item.is_exhausted())
            }
            None => (ModeKind::Unrecognized, false),
        };

        let outcome = if exhausted {
            let wrapped = playlist.remove_active();
            playlist.request_save();

            #[cfg(feature = "defmt")]
            defmt::info!(
                "Deleted item {} after max plays, {} left",
                from_index,
                playlist.len()
            );

            if wrapped {
                TransitionOutcome::DeletedLast
            } else {
                TransitionOutcome::Deleted
            }
        } else {
            match playlist.step_forward() {
                StepResult::Advanced => TransitionOutcome::Advanced,
                StepResult::Wrapped => TransitionOutcome::Wrapped,
                StepResult::Held => TransitionOutcome::Held,
            }
        };

        playlist.restart_timer(now);
        let to_index = playlist.current_index();

        #[cfg(feature = "defmt")]
        if let Some(item) = playlist.active() {
            defmt::info!("Switched to item {}: mode={}", to_index, item.kind().as_tag());
        }

        Transition {
            from_index,
            to_index,
            previous_mode,
            outcome,
        }
    }
}
