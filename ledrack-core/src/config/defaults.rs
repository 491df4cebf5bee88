//! Default values for playlist items and the panel
//!
//! These match the stock LED rack bar: twelve 8x8 FC16 modules chained into
//! one 8x96 panel.

/// Panel rows
pub const PANEL_ROWS: u8 = 8;

/// Panel columns (12 modules x 8 columns)
pub const PANEL_COLS: u8 = 96;

/// Average glyph width in columns, including spacing
pub const GLYPH_WIDTH: u8 = 6;

/// Duration applied to items whose duration is unset (ms)
pub const DEFAULT_DURATION_MS: u32 = 10_000;

/// How long a temporary message stays up (ms)
pub const DEFAULT_MESSAGE_MS: u32 = 15_000;

/// Scroll speed and pause of temporary messages
pub const MESSAGE_SCROLL_SPEED: u16 = 40;
pub const MESSAGE_PAUSE_MS: u16 = 1000;

/// Intensity used for the maintenance banner
pub const BANNER_INTENSITY: u8 = 10;

/// Text shown when the playlist would otherwise be empty
pub const FALLBACK_TEXT: &str = "LED Rack";

/// Highest panel intensity level
pub const MAX_INTENSITY: u8 = 15;

pub const DEFAULT_BRIGHTNESS: u8 = 5;
pub const DEFAULT_SCROLL_SPEED: u16 = 50;
pub const DEFAULT_PAUSE_MS: u16 = 2000;

// Twinkle
pub const DEFAULT_TWINKLE_DENSITY: u8 = 15;
pub const DEFAULT_TWINKLE_MIN_LIFETIME_MS: u16 = 50;
pub const DEFAULT_TWINKLE_MAX_LIFETIME_MS: u16 = 300;
pub const TWINKLE_DENSITY_MAX: u8 = 50;
pub const TWINKLE_MIN_LIFETIME_FLOOR_MS: u16 = 10;
pub const TWINKLE_MIN_LIFETIME_CEIL_MS: u16 = 1000;
pub const TWINKLE_MAX_LIFETIME_CEIL_MS: u16 = 2000;
/// Dimmest peak brightness a new particle can get
pub const TWINKLE_PEAK_FLOOR: u8 = 5;

// Effect update interval bounds, shared by sweep, pong and wave
pub const EFFECT_INTERVAL_MIN_MS: u16 = 10;
pub const EFFECT_INTERVAL_MAX_MS: u16 = 1000;

// Knight rider sweep
pub const DEFAULT_SWEEP_INTERVAL_MS: u16 = 50;
pub const DEFAULT_SWEEP_TAIL: u8 = 4;
pub const SWEEP_TAIL_MAX: u8 = 16;

// Pong
pub const DEFAULT_PONG_INTERVAL_MS: u16 = 50;
pub const DEFAULT_PONG_VELOCITY_X: f32 = 1.0;
pub const DEFAULT_PONG_VELOCITY_Y: f32 = 0.5;
/// Largest velocity component, in pixels per update
pub const PONG_VELOCITY_LIMIT: f32 = 4.0;

// Sine wave
pub const DEFAULT_WAVE_INTERVAL_MS: u16 = 50;
pub const DEFAULT_WAVE_AMPLITUDE: u8 = 3;
pub const DEFAULT_WAVE_PHASES: u8 = 3;
