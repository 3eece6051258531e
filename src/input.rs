//! Keyboard/touch mapping and movement intent
//!
//! Direction presses accumulate into an [`Intent`] vector instead of moving
//! the player directly. The player then moves by the whole intent every
//! primary tick, so repeated presses build up speed and opposite presses
//! slow it back down.

use serde::{Deserialize, Serialize};

use crate::consts::INTENT_MAX;

/// Movement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// One of the four movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::X,
            Direction::Up | Direction::Down => Axis::Y,
        }
    }

    /// Unit step along the axis (screen coordinates: y grows downward)
    pub fn increment(self) -> i32 {
        match self {
            Direction::Left | Direction::Up => -1,
            Direction::Right | Direction::Down => 1,
        }
    }

    /// Map a pan gesture direction code (2, 4, 8, 16) to a direction
    pub fn from_pan(code: u32) -> Option<Self> {
        match code {
            2 => Some(Direction::Left),
            4 => Some(Direction::Right),
            8 => Some(Direction::Up),
            16 => Some(Direction::Down),
            _ => None,
        }
    }

    /// Dominant direction of a drag by `(dx, dy)` screen pixels
    pub fn from_drag(dx: f32, dy: f32) -> Option<Self> {
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        Some(if dx.abs() >= dy.abs() {
            if dx < 0.0 { Direction::Left } else { Direction::Right }
        } else if dy < 0.0 {
            Direction::Up
        } else {
            Direction::Down
        })
    }
}

/// Player command decoded from an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    TogglePause,
    Restart,
}

impl Command {
    /// Decode a legacy `KeyboardEvent.keyCode` (arrows, WASD, Escape, Space)
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            37 | 65 => Some(Command::Move(Direction::Left)),
            38 | 87 => Some(Command::Move(Direction::Up)),
            39 | 68 => Some(Command::Move(Direction::Right)),
            40 | 83 => Some(Command::Move(Direction::Down)),
            27 => Some(Command::TogglePause),
            32 => Some(Command::Restart),
            _ => None,
        }
    }

    /// Decode a `KeyboardEvent.key` name
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Command::Move(Direction::Left)),
            "ArrowUp" | "w" | "W" => Some(Command::Move(Direction::Up)),
            "ArrowRight" | "d" | "D" => Some(Command::Move(Direction::Right)),
            "ArrowDown" | "s" | "S" => Some(Command::Move(Direction::Down)),
            "Escape" | "Esc" => Some(Command::TogglePause),
            " " | "Spacebar" => Some(Command::Restart),
            _ => None,
        }
    }
}

/// Accumulated directional intent, kept strictly inside `(-max, max)` per axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub x: i32,
    pub y: i32,
    max: i32,
}

impl Default for Intent {
    fn default() -> Self {
        Self::new(INTENT_MAX)
    }
}

impl Intent {
    pub fn new(max: i32) -> Self {
        Self { x: 0, y: 0, max }
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Nudge the intent one unit toward `direction`
    ///
    /// A press that would reach `max` in magnitude is dropped.
    /// Returns whether the intent changed.
    pub fn apply(&mut self, direction: Direction) -> bool {
        let value = match direction.axis() {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        };
        let next = *value + direction.increment();
        if next.abs() < self.max {
            *value = next;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(Command::from_key_code(37), Some(Command::Move(Direction::Left)));
        assert_eq!(Command::from_key_code(87), Some(Command::Move(Direction::Up)));
        assert_eq!(Command::from_key_code(68), Some(Command::Move(Direction::Right)));
        assert_eq!(Command::from_key_code(40), Some(Command::Move(Direction::Down)));
        assert_eq!(Command::from_key_code(27), Some(Command::TogglePause));
        assert_eq!(Command::from_key_code(32), Some(Command::Restart));
        assert_eq!(Command::from_key_code(13), None);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Command::from_key("ArrowUp"), Some(Command::Move(Direction::Up)));
        assert_eq!(Command::from_key("s"), Some(Command::Move(Direction::Down)));
        assert_eq!(Command::from_key("Escape"), Some(Command::TogglePause));
        assert_eq!(Command::from_key(" "), Some(Command::Restart));
        assert_eq!(Command::from_key("Enter"), None);
    }

    #[test]
    fn test_pan_codes() {
        assert_eq!(Direction::from_pan(2), Some(Direction::Left));
        assert_eq!(Direction::from_pan(4), Some(Direction::Right));
        assert_eq!(Direction::from_pan(8), Some(Direction::Up));
        assert_eq!(Direction::from_pan(16), Some(Direction::Down));
        assert_eq!(Direction::from_pan(1), None);
    }

    #[test]
    fn test_drag_direction() {
        assert_eq!(Direction::from_drag(-10.0, 3.0), Some(Direction::Left));
        assert_eq!(Direction::from_drag(2.0, -9.0), Some(Direction::Up));
        assert_eq!(Direction::from_drag(0.0, 0.0), None);
    }

    #[test]
    fn test_intent_saturates() {
        let mut intent = Intent::default();
        for _ in 0..8 {
            intent.apply(Direction::Left);
        }
        assert_eq!(intent.x, -7);
        assert_eq!(intent.y, 0);
        assert!(!intent.apply(Direction::Left));
    }

    #[test]
    fn test_intent_opposite_presses_cancel() {
        let mut intent = Intent::default();
        intent.apply(Direction::Down);
        intent.apply(Direction::Down);
        intent.apply(Direction::Up);
        assert_eq!(intent.get(Axis::Y), 1);
        assert!(intent.apply(Direction::Up));
        assert_eq!(intent.y, 0);
    }

    #[test]
    fn test_custom_max() {
        let mut intent = Intent::new(2);
        assert!(intent.apply(Direction::Right));
        assert!(!intent.apply(Direction::Right));
        assert_eq!(intent.x, 1);
    }
}
