//! World state: every blob, the player, score and phase

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::blob::Blob;
use crate::color::Color;
use crate::settings::Settings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Tasks are running
    Running,
    /// Tasks are stopped until resumed
    Paused,
    /// The player was eaten; only a restart leaves this phase
    GameOver,
}

/// Complete world state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// NPC blobs in spawn order
    pub blobs: Vec<Blob>,
    /// The player; never removed, losing flips `alive` instead
    pub player: Blob,
    pub score: u64,
    pub phase: GamePhase,
    /// Current background color
    pub background: Color,
    /// Last shade level the background was computed for
    pub current_shade: f32,
    #[serde(skip)]
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Fresh world with the player at the origin
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let mut state = Self {
            seed,
            blobs: Vec::new(),
            player: Blob::new(0, Vec2::ZERO, settings.player_radius, settings.player_color),
            score: 0,
            phase: GamePhase::Running,
            background: settings.background,
            current_shade: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        state.player.id = state.next_entity_id();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Add a blob with a fresh ID, returning the ID
    pub fn add_blob(&mut self, pos: Vec2, radius: f32, color: Color) -> u32 {
        let id = self.next_entity_id();
        self.blobs.push(Blob::new(id, pos, radius, color));
        id
    }

    pub fn blob(&self, id: u32) -> Option<&Blob> {
        self.blobs.iter().find(|b| b.id == id)
    }

    /// Living NPC blobs
    pub fn living(&self) -> impl Iterator<Item = &Blob> {
        self.blobs.iter().filter(|b| b.alive)
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
