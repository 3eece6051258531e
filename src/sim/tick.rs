//! Per-tick systems
//!
//! Each scheduled task runs one or more of these against the world state.
//! They only touch state passed in, so tests can call them directly.

use glam::Vec2;

use super::blob::{Blob, Collision};
use super::camera::Camera;
use super::state::GameState;
use crate::color::Color;
use crate::input::Intent;
use crate::settings::Settings;
use crate::{rand_between, rand_sign};

/// Result of a primary tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// The player was found dead; nothing else ran this tick
    PlayerDefeated,
}

/// Physics tick: collisions, movement, cleanup, camera follow
pub fn primary_tick(state: &mut GameState, intent: &Intent, camera: &mut Camera) -> TickOutcome {
    if !state.player.alive {
        return TickOutcome::PlayerDefeated;
    }
    collision_detection(state);
    move_player(state, intent);
    move_npcs(state);
    remove_blobs(state);
    camera.adjust(state.player.pos);
    TickOutcome::Continue
}

/// Spawn one blob near the player unless the world is full
///
/// The blob lands `spawn_buffer` away on each axis (random sign per axis),
/// sized between a quarter and one and a quarter of the player.
pub fn spawn_blob(state: &mut GameState, settings: &Settings) -> Option<u32> {
    if state.blobs.len() >= settings.max_blobs {
        return None;
    }
    let (near, far) = settings.spawn_buffer;
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;

    let rng = state.rng();
    let dx = rand_between(rng, near, far) * rand_sign(rng);
    let dy = rand_between(rng, near, far) * rand_sign(rng);
    let radius = rand_between(rng, player_radius * 0.25, player_radius * 1.25);
    let color = Color::random(rng);

    let id = state.next_entity_id();
    let blob = Blob::new(id, player_pos + Vec2::new(dx, dy), radius, color)
        .with_points(settings.blob_points);
    log::debug!("Spawned {}", blob);
    state.blobs.push(blob);
    Some(id)
}

/// Point every blob at the first smaller actor it can see, or at itself
pub fn set_blob_targets(state: &mut GameState, visibility_radius: f32) {
    for i in 0..state.blobs.len() {
        let blob = &state.blobs[i];
        if !blob.alive {
            continue;
        }
        let target = state
            .blobs
            .iter()
            .chain(std::iter::once(&state.player))
            .filter(|actor| actor.alive)
            .filter(|actor| blob.distance_from(actor.pos) < visibility_radius)
            .find(|actor| blob.radius > actor.radius)
            .map_or(blob.pos, |actor| actor.pos);
        state.blobs[i].set_target(target);
    }
}

/// Move the player by the accumulated intent
pub fn move_player(state: &mut GameState, intent: &Intent) {
    state.player.step(Vec2::new(intent.x as f32, intent.y as f32));
}

/// Step every living NPC toward its target
pub fn move_npcs(state: &mut GameState) {
    for blob in state.blobs.iter_mut().filter(|b| b.alive) {
        blob.move_toward_target();
    }
}

/// Actor `i` of the collision pass: blobs first, the player last
fn actor<'a>(blobs: &'a [Blob], player: &'a Blob, i: usize) -> &'a Blob {
    if i == blobs.len() { player } else { &blobs[i] }
}

/// Mutable actors `i` and `j` for `j < i`
fn actor_pair<'a>(
    blobs: &'a mut [Blob],
    player: &'a mut Blob,
    i: usize,
    j: usize,
) -> (&'a mut Blob, &'a mut Blob) {
    debug_assert!(j < i);
    if i == blobs.len() {
        (player, &mut blobs[j])
    } else {
        let (low, high) = blobs.split_at_mut(i);
        (&mut high[0], &mut low[j])
    }
}

/// Resolve overlaps between every pair of actors, player included
///
/// Walks actors from last to first and checks each only against lower
/// indices, so every pair is seen once. An actor resolves at most one
/// collision per tick. Actors that already lost this tick still take part
/// until cleanup removes them.
pub fn collision_detection(state: &mut GameState) {
    let count = state.blobs.len() + 1;
    for i in (0..count).rev() {
        for j in (0..i).rev() {
            let a = actor(&state.blobs, &state.player, i);
            let b = actor(&state.blobs, &state.player, j);
            if !a.overlaps(b) {
                continue;
            }
            let (a, b) = actor_pair(&mut state.blobs, &mut state.player, i, j);
            match a.collide_with(b) {
                Collision::Won => log::debug!("#{} ate #{}", a.id, b.id),
                Collision::Lost => log::debug!("#{} ate #{}", b.id, a.id),
            }
            break;
        }
    }
}

/// Remove dead blobs, crediting their points; returns the points credited
pub fn remove_blobs(state: &mut GameState) -> u64 {
    let mut credited = 0;
    for i in (0..state.blobs.len()).rev() {
        if !state.blobs[i].alive {
            credited += state.blobs.remove(i).points;
        }
    }
    state.score += credited;
    credited
}

/// Background darkness for a distance from the origin: 0.01 per 32 units, capped at 1
pub fn shade_for_distance(distance: f32) -> f32 {
    let steps = (distance as i64) >> 5;
    (steps as f32 / 100.0).min(1.0)
}

/// Darken the background the further the player is from the origin
///
/// Only recomputed when the shade level changes. Returns whether it did.
pub fn update_bg_color(state: &mut GameState, base: Color) -> bool {
    let shade = shade_for_distance(state.player.distance_from_origin());
    if shade == state.current_shade {
        return false;
    }
    state.current_shade = shade;
    state.background = base.shade(-shade);
    true
}
