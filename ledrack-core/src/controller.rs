//! Playlist controller
//!
//! Ties the playlist, scheduler and renderer together behind a single
//! `tick(now)` entry point. Edits from the configuration side go through
//! the same controller between ticks, so there is one writer per tick.

use rand::Rng;

use crate::config::defaults::{BANNER_INTENSITY, MESSAGE_PAUSE_MS, MESSAGE_SCROLL_SPEED};
use crate::config::{
    item_text, ItemPatch, ItemText, ModeKind, PanelConfig, PlaylistError, PlaylistItem,
};
use crate::render::Renderer;
use crate::scheduler::{Playlist, Scheduler, TickOutcome};
use crate::traits::{DisplayExt, MatrixDisplay, ScrollEffect, TextPosition};

/// Temporary message pre-empting the playlist
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Overlay {
    pub text: ItemText,
    pub started_at: u32,
    pub duration_ms: u32,
    drawn: bool,
}

/// Playlist controller
pub struct Controller<R: Rng> {
    config: PanelConfig,
    playlist: Playlist,
    scheduler: Scheduler,
    renderer: Renderer,
    rng: R,
    overlay: Option<Overlay>,
    banner: Option<ItemText>,
    banner_drawn: bool,
    /// Re-apply the active item's settings on the next tick
    reactivate: bool,
}

impl<R: Rng> Controller<R> {
    pub fn new(config: PanelConfig, playlist: Playlist, rng: R) -> Self {
        Self {
            scheduler: Scheduler::new(&config),
            renderer: Renderer::new(&config),
            config,
            playlist,
            rng,
            overlay: None,
            banner: None,
            banner_drawn: false,
            reactivate: true,
        }
    }

    /// Stamp the active item's start time (call once at boot)
    pub fn start(&mut self, now: u32) {
        self.scheduler.start(&mut self.playlist, now);
    }

    /// Drive one scheduling and render step
    pub fn tick<D>(&mut self, now: u32, display: &mut D) -> TickOutcome
    where
        D: MatrixDisplay + ?Sized,
    {
        if let Some(banner) = &self.banner {
            if !self.banner_drawn {
                display.clear();
                display.reset_animation();
                display.set_invert(false);
                display.set_intensity(BANNER_INTENSITY);
                display.set_text_alignment(TextPosition::Center);
                display.print(banner);
                self.banner_drawn = true;
            }
            return TickOutcome::Suspended;
        }

        if let Some(overlay) = self.overlay.as_mut() {
            if now.wrapping_sub(overlay.started_at) <= overlay.duration_ms {
                if !overlay.drawn {
                    display.clear();
                    display.reset_animation();
                    display.set_invert(false);
                    display.set_speed(MESSAGE_SCROLL_SPEED);
                    display.display_text(
                        &overlay.text,
                        TextPosition::Left,
                        MESSAGE_SCROLL_SPEED,
                        MESSAGE_PAUSE_MS,
                        ScrollEffect::ScrollLeft,
                    );
                    overlay.drawn = true;
                }
                display.animate_looping();
                return TickOutcome::Suspended;
            }
        }
        if self.overlay.take().is_some() {
            #[cfg(feature = "defmt")]
            defmt::info!("Message expired, resuming playlist");
            display.clear();
            display.reset_animation();
            self.playlist.restart_timer(now);
            self.reactivate = true;
        }

        let outcome = self.scheduler.tick(&mut self.playlist, now);
        match outcome {
            TickOutcome::Active { transition, .. } => {
                if let Some(item) = self.playlist.active() {
                    if transition.is_some() || self.reactivate {
                        self.renderer.activate(item, display);
                        self.reactivate = false;
                    }
                    self.renderer.render(item, now, display, &mut self.rng);
                }
            }
            TickOutcome::Blank | TickOutcome::Suspended => {
                display.clear();
                self.reactivate = true;
            }
        }
        outcome
    }

    /// Append an item, returning its index
    pub fn add_item(&mut self, item: PlaylistItem) -> Result<usize, PlaylistError> {
        self.playlist.push(item)
    }

    /// Replace the whole playlist; playback restarts at the first item
    pub fn replace_items<I>(&mut self, items: I) -> Result<(), PlaylistError>
    where
        I: IntoIterator<Item = PlaylistItem>,
    {
        self.playlist.replace_all(items)?;
        self.reactivate = true;
        Ok(())
    }

    pub fn remove_item(&mut self, index: usize) -> Result<PlaylistItem, PlaylistError> {
        let removed = self.playlist.remove(index)?;
        self.reactivate = true;
        Ok(removed)
    }

    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), PlaylistError> {
        self.playlist.move_item(from, to)
    }

    /// Edit the active item, returning `true` if its mode changed
    pub fn update_active(&mut self, patch: &ItemPatch) -> bool {
        let changed = self.playlist.update_active(patch);
        self.after_active_edit();
        changed
    }

    /// Edit any item, returning `true` if its mode changed
    pub fn update_item(&mut self, index: usize, patch: &ItemPatch) -> Result<bool, PlaylistError> {
        let changed = self.playlist.update_at(index, patch)?;
        if index == self.playlist.current_index() {
            self.after_active_edit();
        }
        Ok(changed)
    }

    /// Any edit of an active twinkle item respawns its particles
    fn after_active_edit(&mut self) {
        if let Some(ModeKind::Twinkle) = self.playlist.active().map(PlaylistItem::kind) {
            self.renderer.restart_effect(ModeKind::Twinkle);
        }
        self.reactivate = true;
    }

    pub fn set_display_on(&mut self, on: bool) {
        self.playlist.set_display_on(on);
        self.reactivate = true;
    }

    pub fn set_loop(&mut self, loop_items: bool) {
        self.playlist.set_loop(loop_items);
    }

    /// Make `index` the active item starting at `now`
    pub fn jump_to(&mut self, index: usize, now: u32) -> Result<(), PlaylistError> {
        self.playlist.jump_to(index, now)?;
        self.reactivate = true;
        Ok(())
    }

    /// Scroll `text` over the playlist for `duration_ms`
    pub fn show_message(&mut self, text: &str, now: u32, duration_ms: u32) -> Result<(), PlaylistError> {
        let text = item_text(text)?;
        #[cfg(feature = "defmt")]
        defmt::info!("Showing message for {} ms", duration_ms);
        self.overlay = Some(Overlay {
            text,
            started_at: now,
            duration_ms,
            drawn: false,
        });
        Ok(())
    }

    /// Show a centred banner and suspend the playlist, or clear it
    ///
    /// Clearing the banner restarts the active item's timer on the next tick.
    pub fn set_banner(&mut self, text: Option<&str>) -> Result<(), PlaylistError> {
        match text {
            Some(text) => {
                self.banner = Some(item_text(text)?);
                self.banner_drawn = false;
            }
            None => {
                if self.banner.take().is_some() {
                    self.playlist.clear_timer();
                    self.reactivate = true;
                }
            }
        }
        Ok(())
    }

    /// Drain the pending save request
    pub fn take_save_request(&mut self) -> bool {
        self.playlist.take_save_request()
    }

    pub fn current_index(&self) -> usize {
        self.playlist.current_index()
    }

    pub fn active_item(&self) -> Option<&PlaylistItem> {
        self.playlist.active()
    }

    pub fn play_counts(&self) -> impl Iterator<Item = u32> + '_ {
        self.playlist.play_counts()
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }
}
