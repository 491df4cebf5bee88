//! Playlist item type definitions
//!
//! Items are created by the configuration collaborator (remote API or a
//! stored playlist) and by the scheduler's own fallback. Mode parameters are
//! a closed enum so each mode only carries what it uses.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::defaults::*;

/// Maximum items in the playlist
pub const MAX_ITEMS: usize = 32;

/// Maximum text length in bytes
pub const MAX_TEXT_LEN: usize = 128;

/// Maximum concurrent twinkle particles
pub const MAX_TWINKLES: usize = 100;

/// Maximum superposed sine wave components
pub const MAX_WAVE_PHASES: usize = 3;

/// Fixed-capacity item text
pub type ItemText = String<MAX_TEXT_LEN>;

/// Errors from playlist edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaylistError {
    /// No room for another item
    Full,
    /// Index does not name an item
    IndexOutOfRange,
    /// Text does not fit in an item
    TextTooLong,
}

/// Build an item text, rejecting strings that do not fit
pub fn item_text(text: &str) -> Result<ItemText, PlaylistError> {
    let mut out = ItemText::new();
    out.push_str(text).map_err(|_| PlaylistError::TextTooLong)?;
    Ok(out)
}

/// Fieldless mode tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ModeKind {
    Text,
    Twinkle,
    KnightRider,
    Pong,
    SineWave,
    /// Tag not understood; scheduled normally but renders nothing
    Unrecognized,
}

impl ModeKind {
    /// Parse an external mode tag
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "text" => Self::Text,
            "twinkle" => Self::Twinkle,
            "knightrider" => Self::KnightRider,
            "pong" => Self::Pong,
            "sinewave" => Self::SineWave,
            _ => Self::Unrecognized,
        }
    }

    pub const fn as_tag(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Twinkle => "twinkle",
            Self::KnightRider => "knightrider",
            Self::Pong => "pong",
            Self::SineWave => "sinewave",
            Self::Unrecognized => "unknown",
        }
    }
}

/// Text alignment and scroll direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Alignment {
    Left,
    Center,
    Right,
    #[default]
    ScrollLeft,
    ScrollRight,
}

impl Alignment {
    /// Parse an external alignment tag; unknown tags scroll left
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "left" => Self::Left,
            "center" => Self::Center,
            "right" => Self::Right,
            "scroll_right" => Self::ScrollRight,
            _ => Self::ScrollLeft,
        }
    }

    pub const fn as_tag(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::ScrollLeft => "scroll_left",
            Self::ScrollRight => "scroll_right",
        }
    }

    /// Whether this alignment always scrolls
    pub const fn is_scrolling(self) -> bool {
        matches!(self, Self::ScrollLeft | Self::ScrollRight)
    }
}

/// Text mode parameters
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextParams {
    pub text: ItemText,
    pub alignment: Alignment,
    /// Scroll frame delay (lower is faster)
    pub speed: u16,
    /// Pause at the end of a scroll (ms)
    pub pause_ms: u16,
}

impl Default for TextParams {
    fn default() -> Self {
        Self {
            text: ItemText::new(),
            alignment: Alignment::ScrollLeft,
            speed: DEFAULT_SCROLL_SPEED,
            pause_ms: DEFAULT_PAUSE_MS,
        }
    }
}

impl TextParams {
    pub fn new(text: &str, alignment: Alignment) -> Result<Self, PlaylistError> {
        Ok(Self {
            text: item_text(text)?,
            alignment,
            ..Self::default()
        })
    }
}

/// Twinkle mode parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TwinkleParams {
    /// Spawn rate; every 5 units spawn one particle per frame
    pub density: u8,
    pub min_lifetime_ms: u16,
    pub max_lifetime_ms: u16,
}

impl Default for TwinkleParams {
    fn default() -> Self {
        Self {
            density: DEFAULT_TWINKLE_DENSITY,
            min_lifetime_ms: DEFAULT_TWINKLE_MIN_LIFETIME_MS,
            max_lifetime_ms: DEFAULT_TWINKLE_MAX_LIFETIME_MS,
        }
    }
}

impl TwinkleParams {
    /// Clamp density to [1, 50], min lifetime to [10, 1000] and max
    /// lifetime to [min, 2000]
    pub fn clamped(self) -> Self {
        let min = self
            .min_lifetime_ms
            .clamp(TWINKLE_MIN_LIFETIME_FLOOR_MS, TWINKLE_MIN_LIFETIME_CEIL_MS);
        Self {
            density: self.density.clamp(1, TWINKLE_DENSITY_MAX),
            min_lifetime_ms: min,
            max_lifetime_ms: self.max_lifetime_ms.clamp(min, TWINKLE_MAX_LIFETIME_CEIL_MS),
        }
    }
}

/// Knight rider sweep parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SweepParams {
    pub interval_ms: u16,
    /// Pixels lit including the head
    pub tail_len: u8,
}

impl Default for SweepParams {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_SWEEP_INTERVAL_MS,
            tail_len: DEFAULT_SWEEP_TAIL,
        }
    }
}

impl SweepParams {
    pub fn clamped(self) -> Self {
        Self {
            interval_ms: clamp_interval(self.interval_ms),
            tail_len: self.tail_len.clamp(1, SWEEP_TAIL_MAX),
        }
    }
}

/// Bouncing ball parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PongParams {
    pub interval_ms: u16,
    /// Horizontal pixels per update
    pub velocity_x: f32,
    /// Vertical pixels per update
    pub velocity_y: f32,
}

impl Default for PongParams {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_PONG_INTERVAL_MS,
            velocity_x: DEFAULT_PONG_VELOCITY_X,
            velocity_y: DEFAULT_PONG_VELOCITY_Y,
        }
    }
}

impl PongParams {
    /// Clamp the interval and velocity; non-finite components fall back to
    /// the defaults
    pub fn clamped(self) -> Self {
        Self {
            interval_ms: clamp_interval(self.interval_ms),
            velocity_x: clamp_velocity(self.velocity_x, DEFAULT_PONG_VELOCITY_X),
            velocity_y: clamp_velocity(self.velocity_y, DEFAULT_PONG_VELOCITY_Y),
        }
    }
}

fn clamp_velocity(v: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v.clamp(-PONG_VELOCITY_LIMIT, PONG_VELOCITY_LIMIT)
    } else {
        fallback
    }
}

/// Sine wave parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WaveParams {
    pub interval_ms: u16,
    /// Amplitude of the first component, in rows
    pub amplitude: u8,
    /// Number of superposed components
    pub phases: u8,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_WAVE_INTERVAL_MS,
            amplitude: DEFAULT_WAVE_AMPLITUDE,
            phases: DEFAULT_WAVE_PHASES,
        }
    }
}

impl WaveParams {
    /// Clamp against a panel with `rows` rows
    pub fn clamped(self, rows: u8) -> Self {
        let max_amplitude = (rows / 2).max(1);
        Self {
            interval_ms: clamp_interval(self.interval_ms),
            amplitude: self.amplitude.clamp(1, max_amplitude),
            phases: self.phases.clamp(1, MAX_WAVE_PHASES as u8),
        }
    }
}

fn clamp_interval(ms: u16) -> u16 {
    ms.clamp(EFFECT_INTERVAL_MIN_MS, EFFECT_INTERVAL_MAX_MS)
}

/// Visual mode with its parameters
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    Text(TextParams),
    Twinkle(TwinkleParams),
    KnightRider(SweepParams),
    Pong(PongParams),
    SineWave(WaveParams),
    Unrecognized,
}

impl Default for Mode {
    fn default() -> Self {
        Self::Text(TextParams::default())
    }
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Self::Text(_) => ModeKind::Text,
            Self::Twinkle(_) => ModeKind::Twinkle,
            Self::KnightRider(_) => ModeKind::KnightRider,
            Self::Pong(_) => ModeKind::Pong,
            Self::SineWave(_) => ModeKind::SineWave,
            Self::Unrecognized => ModeKind::Unrecognized,
        }
    }

    /// Mode of the given kind with default parameters
    pub fn default_for(kind: ModeKind) -> Self {
        match kind {
            ModeKind::Text => Self::Text(TextParams::default()),
            ModeKind::Twinkle => Self::Twinkle(TwinkleParams::default()),
            ModeKind::KnightRider => Self::KnightRider(SweepParams::default()),
            ModeKind::Pong => Self::Pong(PongParams::default()),
            ModeKind::SineWave => Self::SineWave(WaveParams::default()),
            ModeKind::Unrecognized => Self::Unrecognized,
        }
    }
}

/// One playlist entry
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlaylistItem {
    pub mode: Mode,
    /// Invert pixel polarity (text only)
    pub invert: bool,
    /// Panel intensity 0-15
    pub brightness: u8,
    /// Time on screen (ms); 0 means unset and is replaced by the default
    pub duration_ms: u32,
    /// Times the item has been fully shown
    pub play_count: u32,
    /// Plays before the item is exhausted; 0 means unlimited
    pub max_plays: u32,
    /// Delete the item once exhausted
    pub delete_after_play: bool,
}

impl Default for PlaylistItem {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

impl PlaylistItem {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            invert: false,
            brightness: DEFAULT_BRIGHTNESS,
            duration_ms: 0,
            play_count: 0,
            max_plays: 0,
            delete_after_play: false,
        }
    }

    /// Scrolling text item
    pub fn text(text: &str) -> Result<Self, PlaylistError> {
        Ok(Self::new(Mode::Text(TextParams::new(text, Alignment::ScrollLeft)?)))
    }

    /// Item synthesized when the playlist would be empty
    ///
    /// Its duration is unset so it does not immediately re-trigger a
    /// transition.
    pub fn fallback() -> Self {
        let mut text = ItemText::new();
        // FALLBACK_TEXT is far shorter than MAX_TEXT_LEN
        let _ = text.push_str(FALLBACK_TEXT);
        Self::new(Mode::Text(TextParams {
            text,
            ..TextParams::default()
        }))
    }

    /// Builder-style duration setter
    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Builder-style play limit setter
    pub fn with_max_plays(mut self, max_plays: u32, delete_after_play: bool) -> Self {
        self.max_plays = max_plays;
        self.delete_after_play = delete_after_play;
        self
    }

    pub fn kind(&self) -> ModeKind {
        self.mode.kind()
    }

    /// Brightness limited to the panel's range
    pub fn effective_brightness(&self) -> u8 {
        self.brightness.min(MAX_INTENSITY)
    }

    /// Whether the deletion policy removes this item now
    pub fn is_exhausted(&self) -> bool {
        self.delete_after_play && self.max_plays > 0 && self.play_count >= self.max_plays
    }
}

/// Partial edit of a playlist item
///
/// Mode-specific fields only apply when the item (after any mode change)
/// is of the matching mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemPatch {
    /// Switch mode; parameters reset to the new mode's defaults
    pub mode: Option<ModeKind>,
    pub text: Option<ItemText>,
    pub alignment: Option<Alignment>,
    pub speed: Option<u16>,
    pub pause_ms: Option<u16>,
    pub twinkle_density: Option<u8>,
    pub twinkle_min_lifetime_ms: Option<u16>,
    pub twinkle_max_lifetime_ms: Option<u16>,
    pub invert: Option<bool>,
    pub brightness: Option<u8>,
    pub duration_ms: Option<u32>,
    pub max_plays: Option<u32>,
    pub delete_after_play: Option<bool>,
}

impl ItemPatch {
    /// Apply the patch, returning `true` if the mode kind changed
    pub fn apply(&self, item: &mut PlaylistItem) -> bool {
        let mut changed = false;
        if let Some(kind) = self.mode {
            if kind != item.kind() {
                item.mode = Mode::default_for(kind);
                changed = true;
            }
        }

        match &mut item.mode {
            Mode::Text(p) => {
                if let Some(text) = &self.text {
                    p.text = text.clone();
                }
                if let Some(alignment) = self.alignment {
                    p.alignment = alignment;
                }
                if let Some(speed) = self.speed {
                    p.speed = speed;
                }
                if let Some(pause) = self.pause_ms {
                    p.pause_ms = pause;
                }
            }
            Mode::Twinkle(p) => {
                if let Some(density) = self.twinkle_density {
                    p.density = density;
                }
                if let Some(min) = self.twinkle_min_lifetime_ms {
                    p.min_lifetime_ms = min;
                }
                if let Some(max) = self.twinkle_max_lifetime_ms {
                    p.max_lifetime_ms = max;
                }
                *p = p.clamped();
            }
            _ => {}
        }

        if let Some(invert) = self.invert {
            item.invert = invert;
        }
        if let Some(brightness) = self.brightness {
            item.brightness = brightness.min(MAX_INTENSITY);
        }
        if let Some(duration) = self.duration_ms {
            item.duration_ms = duration;
        }
        if let Some(max_plays) = self.max_plays {
            item.max_plays = max_plays;
        }
        if let Some(delete) = self.delete_after_play {
            item.delete_after_play = delete;
        }
        changed
    }
}
