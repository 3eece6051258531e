//! Game tuning
//!
//! Every knob has a default in [`crate::consts`]; a JSON document can
//! override any subset of them.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::consts::*;

/// Target rates (actions per second) of the scheduled tasks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskRates {
    pub graphics: f64,
    pub primary: f64,
    pub targeting: f64,
    pub spawner: f64,
    pub bg_color: f64,
}

impl Default for TaskRates {
    fn default() -> Self {
        Self {
            graphics: GRAPHICS_RATE,
            primary: PRIMARY_RATE,
            targeting: TARGETING_RATE,
            spawner: SPAWNER_RATE,
            bg_color: BG_COLOR_RATE,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; `None` lets the host pick one
    pub seed: Option<u64>,

    // === World ===
    /// Spawning stops at this many blobs
    pub max_blobs: usize,
    /// Per-axis distance range from the player where blobs appear
    pub spawn_buffer: (f32, f32),
    /// How far blobs look for something to chase
    pub visibility_radius: f32,
    /// Score awarded per eaten blob
    pub blob_points: u64,

    // === Player ===
    pub player_radius: f32,
    pub player_color: Color,
    /// Intent per axis stays strictly below this in magnitude
    pub intent_max: i32,

    // === View ===
    pub camera_speed: f32,
    pub background: Color,
    /// Draw the debug HUD
    pub show_hud: bool,

    // === Timing ===
    pub rates: TaskRates,
    /// Game clock ticks per second
    pub clock_tps: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            max_blobs: MAX_BLOBS,
            spawn_buffer: SPAWN_BUFFER,
            visibility_radius: VISIBILITY_RADIUS,
            blob_points: BLOB_POINTS,

            player_radius: PLAYER_RADIUS,
            player_color: Color::from_hex(PLAYER_COLOR).unwrap_or(Color::new(0xDD, 0xDD, 0xDD)),
            intent_max: INTENT_MAX,

            camera_speed: CAMERA_SPEED,
            background: Color::from_hex(DEFAULT_BG_COLOR).unwrap_or(Color::new(0xBB, 0xCC, 0xFF)),
            show_hud: true,

            rates: TaskRates::default(),
            clock_tps: CLOCK_TPS,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Replace values the game can't run with, logging each fix
    pub fn sanitized(mut self) -> Self {
        let defaults = TaskRates::default();
        let rates = [
            ("graphics", &mut self.rates.graphics, defaults.graphics),
            ("primary", &mut self.rates.primary, defaults.primary),
            ("targeting", &mut self.rates.targeting, defaults.targeting),
            ("spawner", &mut self.rates.spawner, defaults.spawner),
            ("bg_color", &mut self.rates.bg_color, defaults.bg_color),
        ];
        for (name, rate, default) in rates {
            if !(*rate > 0.0 && rate.is_finite()) {
                log::warn!("Rate for {} must be positive, using {}", name, default);
                *rate = default;
            }
        }
        if !(self.clock_tps > 0.0 && self.clock_tps.is_finite()) {
            log::warn!("clock_tps must be positive, using {}", CLOCK_TPS);
            self.clock_tps = CLOCK_TPS;
        }
        if self.intent_max < 1 {
            log::warn!("intent_max must be at least 1, using {}", INTENT_MAX);
            self.intent_max = INTENT_MAX;
        }
        let (lo, hi) = self.spawn_buffer;
        if !(lo.is_finite() && hi.is_finite()) {
            log::warn!("spawn_buffer ({}, {}) is not finite, using {:?}", lo, hi, SPAWN_BUFFER);
            self.spawn_buffer = SPAWN_BUFFER;
        } else if lo > hi {
            log::warn!("spawn_buffer ({}, {}) is reversed, swapping", lo, hi);
            self.spawn_buffer = (hi, lo);
        }
        if !(self.player_radius > 0.0 && self.player_radius.is_finite()) {
            log::warn!("player_radius must be positive, using {}", PLAYER_RADIUS);
            self.player_radius = PLAYER_RADIUS;
        }
        if !(self.visibility_radius >= 0.0) {
            log::warn!("visibility_radius can't be negative, using {}", VISIBILITY_RADIUS);
            self.visibility_radius = VISIBILITY_RADIUS;
        }
        if !(self.camera_speed >= 0.0 && self.camera_speed.is_finite()) {
            log::warn!("camera_speed can't be negative, using {}", CAMERA_SPEED);
            self.camera_speed = CAMERA_SPEED;
        }
        self
    }

    /// Load settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Bad settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Can't read settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.max_blobs, 30);
        assert_eq!(s.spawn_buffer, (500.0, 1000.0));
        assert_eq!(s.background.to_hex(), "#bbccff");
        assert_eq!(s.player_color.to_hex(), "#dddddd");
        assert_eq!(s.rates.graphics, 30.0);
        assert_eq!(s.rates.spawner, 1.0);
    }

    #[test]
    fn test_partial_json() {
        let s = Settings::from_json(r#"{"max_blobs": 5, "rates": {"primary": 40}, "seed": 9}"#)
            .unwrap();
        assert_eq!(s.max_blobs, 5);
        assert_eq!(s.seed, Some(9));
        assert_eq!(s.rates.primary, 40.0);
        assert_eq!(s.rates.targeting, 5.0);
        assert_eq!(s.visibility_radius, 500.0);
    }

    #[test]
    fn test_json_roundtrip() {
        let s = Settings {
            background: Color::new(1, 2, 3),
            ..Default::default()
        };
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(Settings::from_json("{not json").is_err());
        assert!(Settings::from_json(r#"{"background": "blue"}"#).is_err());
    }

    #[test]
    fn test_sanitize() {
        let s = Settings::from_json(
            r#"{"rates": {"graphics": 0}, "intent_max": 0, "spawn_buffer": [900, 100], "clock_tps": -1}"#,
        )
        .unwrap();
        assert_eq!(s.rates.graphics, GRAPHICS_RATE);
        assert_eq!(s.intent_max, INTENT_MAX);
        assert_eq!(s.spawn_buffer, (100.0, 900.0));
        assert_eq!(s.clock_tps, CLOCK_TPS);
    }

    #[test]
    fn test_sanitize_rejects_nan() {
        let s = Settings {
            player_radius: f32::NAN,
            visibility_radius: f32::NAN,
            camera_speed: f32::INFINITY,
            spawn_buffer: (f32::NAN, 10.0),
            ..Default::default()
        }
        .sanitized();
        assert_eq!(s.player_radius, PLAYER_RADIUS);
        assert_eq!(s.visibility_radius, VISIBILITY_RADIUS);
        assert_eq!(s.camera_speed, CAMERA_SPEED);
        assert_eq!(s.spawn_buffer, SPAWN_BUFFER);
    }

    #[test]
    fn test_sanitize_keeps_valid_settings() {
        let s = Settings {
            visibility_radius: 0.0,
            camera_speed: 0.0,
            ..Default::default()
        };
        assert_eq!(s.clone().sanitized(), s);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let s = Settings::load(std::path::Path::new("/definitely/not/here.json"));
        assert_eq!(s, Settings::default());
    }
}
