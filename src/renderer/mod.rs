//! Render data and drawing surfaces
//!
//! The game never draws. Each graphics tick it captures a [`Frame`] and hands
//! it to whatever [`RenderSurface`] the host injected: a 2D canvas in the
//! browser, a logger on native, a recorder in tests.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod log_surface;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use log_surface::LogSurface;

use glam::Vec2;
use serde::Serialize;

use crate::color::Color;
use crate::sim::{Camera, GameState};

/// Stroke width of blob borders (pixels)
pub const BORDER_WIDTH: f32 = 5.0;

/// Something a frame can be drawn on
pub trait RenderSurface {
    /// Drawable size in pixels
    fn size(&self) -> (u32, u32);

    /// Draw a complete frame
    fn present(&mut self, frame: &Frame);
}

impl<S: RenderSurface + ?Sized> RenderSurface for Box<S> {
    fn size(&self) -> (u32, u32) {
        (**self).size()
    }

    fn present(&mut self, frame: &Frame) {
        (**self).present(frame)
    }
}

/// A blob as it should appear on screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sprite {
    pub id: u32,
    /// Screen position of the centre
    pub pos: Vec2,
    pub radius: f32,
    pub fill: Color,
    pub border: Color,
    pub is_player: bool,
}

/// One `label: value` line of the debug HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudLine {
    pub label: String,
    pub value: String,
}

impl HudLine {
    pub fn new(label: impl Into<String>, value: impl ToString) -> Self {
        Self {
            label: label.into(),
            value: value.to_string(),
        }
    }
}

/// Final score overlay shown once the player is eaten
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Banner {
    pub title: String,
    pub score: u64,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Canvas size in pixels
    pub canvas: (u32, u32),
    /// Camera offset (world position of the top-left corner)
    pub offset: Vec2,
    pub background: Color,
    /// Living blobs in draw order, player last
    pub sprites: Vec<Sprite>,
    pub hud: Vec<HudLine>,
    pub banner: Option<Banner>,
}

impl Frame {
    /// Capture the world as seen through `camera`
    pub fn capture(state: &GameState, camera: &Camera, canvas: (u32, u32)) -> Self {
        let sprite = |blob: &crate::sim::Blob, is_player| Sprite {
            id: blob.id,
            pos: camera.to_screen(blob.pos),
            radius: blob.radius,
            fill: blob.color,
            border: blob.border_color,
            is_player,
        };
        let mut sprites: Vec<Sprite> = state.living().map(|b| sprite(b, false)).collect();
        if state.player.alive {
            sprites.push(sprite(&state.player, true));
        }

        Self {
            canvas,
            offset: camera.offset,
            background: state.background,
            sprites,
            hud: Vec::new(),
            banner: None,
        }
    }

    pub fn player(&self) -> Option<&Sprite> {
        self.sprites.iter().find(|s| s.is_player)
    }

    /// HUD rendered as `label: value` strings
    pub fn hud_text(&self) -> Vec<String> {
        self.hud
            .iter()
            .map(|line| format!("{}: {}", line.label, line.value))
            .collect()
    }

    /// Value of the HUD line with this label
    pub fn hud_value(&self, label: &str) -> Option<&str> {
        self.hud
            .iter()
            .find(|line| line.label == label)
            .map(|line| line.value.as_str())
    }
}
