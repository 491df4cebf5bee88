//! Mode dispatch
//!
//! Routes the active item to exactly one renderer per tick and handles the
//! panel reset that goes with switching items.

use rand::Rng;

use crate::config::defaults::{DEFAULT_PAUSE_MS, DEFAULT_SCROLL_SPEED};
use crate::config::{Mode, ModeKind, PanelConfig, PanelGeometry, PlaylistItem};
use crate::effects::EffectStores;
use crate::traits::{DisplayExt, MatrixDisplay};

use super::text::TextRenderer;

/// Mode dispatcher and owner of all render state
#[derive(Debug, Clone)]
pub struct Renderer {
    geometry: PanelGeometry,
    text_capacity: usize,
    text: TextRenderer,
    stores: EffectStores,
    needs_redraw: bool,
    /// Mode of the item last activated; `None` before the first activation
    last_kind: Option<ModeKind>,
}

impl Renderer {
    pub fn new(config: &PanelConfig) -> Self {
        Self {
            geometry: config.geometry(),
            text_capacity: config.text_capacity(),
            text: TextRenderer::new(),
            stores: EffectStores::new(),
            needs_redraw: true,
            last_kind: None,
        }
    }

    pub fn geometry(&self) -> &PanelGeometry {
        &self.geometry
    }

    pub fn stores(&self) -> &EffectStores {
        &self.stores
    }

    pub fn text(&self) -> &TextRenderer {
        &self.text
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn last_kind(&self) -> Option<ModeKind> {
        self.last_kind
    }

    /// Drop the simulation state of `kind` so it restarts from scratch
    pub fn restart_effect(&mut self, kind: ModeKind) {
        self.stores.on_mode_changed(kind);
    }

    /// Request a full redraw on the next render
    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Prepare the panel for a newly active item
    ///
    /// Clears the panel, restarts the scroll animation and applies the
    /// item's settings. The incoming mode's store is reset when the mode
    /// changed. Returns `true` on a mode change.
    pub fn activate<D>(&mut self, item: &PlaylistItem, display: &mut D) -> bool
    where
        D: MatrixDisplay + ?Sized,
    {
        let kind = item.kind();
        let (speed, pause, invert) = match &item.mode {
            Mode::Text(p) => (p.speed, p.pause_ms, item.invert),
            _ => (DEFAULT_SCROLL_SPEED, DEFAULT_PAUSE_MS, false),
        };

        display.clear();
        display.reset_animation();
        display.set_invert(invert);
        display.apply_timing(item.effective_brightness(), speed, pause);

        let changed = self.last_kind != Some(kind);
        if changed {
            #[cfg(feature = "defmt")]
            defmt::debug!(
                "Mode change {} -> {}",
                self.last_kind.map_or("none", |k| k.as_tag()),
                kind.as_tag()
            );
            self.stores.on_mode_changed(kind);
            self.last_kind = Some(kind);
        }
        self.text.reset();
        self.needs_redraw = true;
        changed
    }

    /// Render one tick of `item`
    pub fn render<D, R>(&mut self, item: &PlaylistItem, now: u32, display: &mut D, rng: &mut R)
    where
        D: MatrixDisplay + ?Sized,
        R: Rng,
    {
        // Covers the first tick after boot and mode edits between ticks
        if self.last_kind != Some(item.kind()) {
            self.activate(item, display);
        }

        let redraw = core::mem::take(&mut self.needs_redraw);
        if redraw {
            // The panel was just cleared; effects must not wait out their interval
            self.stores.force_update(item.kind());
        }
        let geometry = self.geometry;
        match &item.mode {
            Mode::Text(params) => {
                if redraw {
                    self.text.redraw(
                        params,
                        item.invert,
                        item.effective_brightness(),
                        self.text_capacity,
                        display,
                    );
                }
                self.text.animate(display);
            }
            Mode::Twinkle(params) => {
                self.stores
                    .twinkle
                    .update(params, now, &geometry, display, rng);
            }
            Mode::KnightRider(params) => {
                self.stores.sweep.update(params, now, &geometry, display, rng);
            }
            Mode::Pong(params) => {
                self.stores.pong.update(params, now, &geometry, display);
            }
            Mode::SineWave(params) => {
                self.stores.wave.update(params, now, &geometry, display, rng);
            }
            Mode::Unrecognized => {}
        }
    }
}
