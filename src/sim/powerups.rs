//! Power-up spawning
//!
//! One independent spawn roll per tick. There is no population cap and no
//! despawn timer: a power-up lives until the ball touches it.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, PowerUp, PowerUpKind};
use crate::consts::*;

/// Roll for a spawn; returns the new power-up's id if one appeared
pub fn maybe_spawn(state: &mut GameState) -> Option<u32> {
    let rng = state.rng();
    if rng.random::<f64>() >= POWERUP_SPAWN_CHANCE {
        return None;
    }
    let x = rng.random::<f32>() * (COURT_WIDTH - 2.0 * POWERUP_MARGIN_X) + POWERUP_MARGIN_X;
    let y = POWERUP_MIN_Y + rng.random::<f32>() * POWERUP_BAND_HEIGHT;
    Some(spawn_at(state, Vec2::new(x, y), PowerUpKind::Super))
}

/// Place a power-up at a known position
pub fn spawn_at(state: &mut GameState, pos: Vec2, kind: PowerUpKind) -> u32 {
    let id = state.next_entity_id();
    state.power_ups.push(PowerUp {
        id,
        kind,
        pos,
        radius: POWERUP_RADIUS,
    });
    log::trace!("Power-up {} spawned at ({:.0}, {:.0})", id, pos.x, pos.y);
    id
}
