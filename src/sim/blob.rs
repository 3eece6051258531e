//! Blob entity: the player and every NPC are blobs

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::consts::{BLOB_POINTS, BORDER_SHADE};
use crate::{distance, heading};

/// Outcome of [`Blob::collide_with`] from the receiver's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Receiver was bigger: the other blob died and the receiver grew
    Won,
    /// Receiver was not bigger: it died and the other blob grew
    Lost,
}

/// A circular actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blob {
    pub id: u32,
    pub pos: Vec2,
    /// Where the blob is heading (NPCs only)
    pub target: Vec2,
    pub radius: f32,
    /// Step length per movement tick, fixed at creation
    pub speed: f32,
    /// False once the blob lost a collision; it is removed at the next cleanup
    pub alive: bool,
    /// Score awarded when this blob is eaten
    pub points: u64,
    pub color: Color,
    pub border_color: Color,
}

impl Blob {
    pub fn new(id: u32, pos: Vec2, radius: f32, color: Color) -> Self {
        let radius = radius.max(0.0);
        Self {
            id,
            pos,
            target: Vec2::ZERO,
            radius,
            speed: Self::speed_for_radius(radius),
            alive: true,
            points: BLOB_POINTS,
            color,
            border_color: color.shade(BORDER_SHADE),
        }
    }

    /// Bigger blobs are slower: `floor((15 - sqrt(r)) / 2)`, never negative
    pub fn speed_for_radius(radius: f32) -> f32 {
        ((15.0 - radius.max(0.0).sqrt()) / 2.0).floor().max(0.0)
    }

    pub fn with_points(mut self, points: u64) -> Self {
        self.points = points;
        self
    }

    pub fn distance_from(&self, point: Vec2) -> f32 {
        distance(self.pos, point)
    }

    pub fn distance_from_origin(&self) -> f32 {
        self.distance_from(Vec2::ZERO)
    }

    /// True when the circles intersect (touching is not overlapping)
    pub fn overlaps(&self, other: &Blob) -> bool {
        other.radius + self.radius > self.distance_from(other.pos)
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    /// Move one step toward the target without overshooting on either axis
    pub fn move_toward_target(&mut self) {
        let diff = self.target - self.pos;
        let radians = heading(self.pos, self.target);
        let mut step = Vec2::new(radians.cos(), radians.sin()) * self.speed;
        if step.x.abs() >= diff.x.abs() {
            step.x = diff.x;
        }
        if step.y.abs() >= diff.y.abs() {
            step.y = diff.y;
        }
        self.step(step);
    }

    pub fn step(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    /// Resolve a collision: the strictly bigger blob eats the other and grows by one
    ///
    /// On equal radii the receiver loses.
    pub fn collide_with(&mut self, other: &mut Blob) -> Collision {
        if self.radius > other.radius {
            other.alive = false;
            self.radius += 1.0;
            Collision::Won
        } else {
            self.alive = false;
            other.radius += 1.0;
            Collision::Lost
        }
    }
}

impl fmt::Display for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Blob #{} at ({}, {}) radius {}>",
            self.id, self.pos.x, self.pos.y, self.radius
        )
    }
}
