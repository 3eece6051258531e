//! Simulation module
//!
//! All gameplay logic lives here. It has no rendering or platform
//! dependencies:
//! - Seeded RNG only
//! - Stable iteration order (spawn order, player last)
//! - Time enters only through which systems the scheduler runs

pub mod blob;
pub mod camera;
pub mod state;
pub mod tick;

pub use blob::{Blob, Collision};
pub use camera::Camera;
pub use state::{GamePhase, GameState};
pub use tick::{
    TickOutcome, collision_detection, move_npcs, move_player, primary_tick, remove_blobs,
    set_blob_targets, shade_for_distance, spawn_blob, update_bg_color,
};
