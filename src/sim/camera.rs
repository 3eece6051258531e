//! Camera that keeps a target inside the central band of the viewport

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::CAMERA_SPEED;

/// Viewport offset into the world
///
/// The camera doesn't hold its target; the target's position is passed to
/// every [`Camera::adjust`] call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World position of the viewport's top-left corner
    pub offset: Vec2,
    /// Margin from each edge that the target should stay out of
    pub bound: Vec2,
    /// Viewport size in world units
    pub size: Vec2,
    /// Pan per adjustment
    pub speed: f32,
}

impl Camera {
    /// Centre the world origin in a `width` x `height` viewport
    pub fn new(width: f32, height: f32, speed: f32) -> Self {
        let size = Vec2::new(width, height);
        Self {
            offset: -size / 2.0,
            bound: size / 4.0,
            size,
            speed,
        }
    }

    /// Track a new viewport size; the offset is kept as is
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
        self.bound = self.size / 4.0;
    }

    fn past_right(&self, target: Vec2) -> bool {
        target.x > self.offset.x + self.size.x - self.bound.x
    }

    fn past_left(&self, target: Vec2) -> bool {
        target.x < self.offset.x + self.bound.x
    }

    fn past_bottom(&self, target: Vec2) -> bool {
        target.y > self.offset.y + self.size.y - self.bound.y
    }

    fn past_top(&self, target: Vec2) -> bool {
        target.y < self.offset.y + self.bound.y
    }

    /// Pan one step toward `target` on each axis where it left the band
    pub fn adjust(&mut self, target: Vec2) {
        if self.past_right(target) {
            self.offset.x += self.speed;
        } else if self.past_left(target) {
            self.offset.x -= self.speed;
        }
        if self.past_bottom(target) {
            self.offset.y += self.speed;
        } else if self.past_top(target) {
            self.offset.y -= self.speed;
        }
    }

    /// World position to screen position
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world - self.offset
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800.0, 600.0, CAMERA_SPEED)
    }
}
