//! Blob Arena - an arena game where everything is a blob
//!
//! Core modules:
//! - `sim`: World state, blobs, camera and the per-tick systems
//! - `schedule`: Rate-tracked intervals and the game clock, driven by a virtual clock
//! - `input`: Key/gesture mapping and clamped movement intent
//! - `renderer`: Per-frame render data and the surfaces that draw it
//! - `settings`: Data-driven game tuning
//! - `game`: The controller tying everything together

pub mod color;
pub mod game;
pub mod input;
pub mod renderer;
pub mod schedule;
pub mod settings;
pub mod sim;

pub use color::Color;
pub use game::{Game, Task};
pub use settings::Settings;

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Maximum blobs in the game at any given time
    pub const MAX_BLOBS: usize = 30;
    /// Starting background color for the game
    pub const DEFAULT_BG_COLOR: &str = "#BBCCFF";
    /// Range from the player (per axis) where blobs spawn
    pub const SPAWN_BUFFER: (f32, f32) = (500.0, 1000.0);
    /// How far a blob can see other actors when picking a target
    pub const VISIBILITY_RADIUS: f32 = 500.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 10.0;
    pub const PLAYER_COLOR: &str = "#DDDDDD";

    /// Blob defaults
    pub const BLOB_RADIUS: f32 = 10.0;
    pub const BLOB_POINTS: u64 = 50;
    /// Border is the fill color darkened by this much
    pub const BORDER_SHADE: f32 = -0.4;

    /// Intent is kept strictly inside (-INTENT_MAX, INTENT_MAX)
    pub const INTENT_MAX: i32 = 8;

    /// Camera pan per adjustment (world units)
    pub const CAMERA_SPEED: f32 = 5.0;

    /// Task rates (actions per second)
    pub const GRAPHICS_RATE: f64 = 30.0;
    pub const PRIMARY_RATE: f64 = 20.0;
    pub const TARGETING_RATE: f64 = 5.0;
    pub const SPAWNER_RATE: f64 = 1.0;
    pub const BG_COLOR_RATE: f64 = 10.0;
    /// Clock ticks per second
    pub const CLOCK_TPS: f64 = 1.0;

    /// Measured rates are sampled over this window (ms)
    pub const SAMPLE_WINDOW_MS: f64 = 1000.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b.y - a.y).hypot(b.x - a.x)
}

/// Heading (radians) from `from` toward `to`
#[inline]
pub fn heading(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Random value in `[min, max]`, stepping by whole units from `min`
///
/// `min` need not be an integer: the result is `min + k` for a random
/// integer `k` in `0..=floor(max - min)`.
pub fn rand_between<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    let span = (max - min + 1.0).max(1.0);
    (rng.random::<f32>() * span).floor().min(span - 1.0) + min
}

/// Randomly +1.0 or -1.0
pub fn rand_sign<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.random::<f32>() < 0.5 { -1.0 } else { 1.0 }
}
