//! Hit resolution for explicit strike keys
//!
//! A strike only lands when the ball is out of its refractory window and
//! inside an axis-aligned box around the player. The box is deliberately not
//! a circle: it reaches further into the corners than the passive bounce.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Ball, GameEvent, GameState, Player, Team};
use crate::axis_gap;

/// Explicit strike types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitKind {
    Bump,
    Set,
    Spike,
    /// Needs a held power-up, which it consumes
    Special,
}

impl HitKind {
    /// Resolution order when several keys are held
    pub const ALL: [HitKind; 4] = [HitKind::Bump, HitKind::Set, HitKind::Spike, HitKind::Special];

    /// Ball velocity produced by this strike; `dx` is ball.x - player.x
    pub fn impulse(self, dx: f32) -> Vec2 {
        match self {
            HitKind::Bump => Vec2::new(dx * 0.15, -14.0),
            HitKind::Set => Vec2::new(dx * 0.09, -20.0),
            HitKind::Spike => Vec2::new(dx * 0.10, -25.0),
            HitKind::Special => Vec2::new(dx * 0.25, -35.0),
        }
    }
}

/// Whether `player` may touch the ball right now
pub fn can_hit_ball(ball: &Ball, player: &Player, now_ms: f64) -> bool {
    let gap = axis_gap(ball.pos, player.pos);
    let reach = player.radius + ball.radius;
    ball.can_be_hit(now_ms) && gap.x < reach + 2.0 && gap.y < reach + 4.0
}

/// Attempt a strike; returns whether it landed
///
/// Out-of-reach attempts and specials without a power-up are dropped.
pub fn try_action(state: &mut GameState, team: Team, kind: HitKind) -> bool {
    let now = state.time_ms;
    if !can_hit_ball(&state.ball, state.player(team), now) {
        return false;
    }

    if kind == HitKind::Special {
        if state.active_power_ups[team.index()].take().is_none() {
            return false;
        }
        state.emit(GameEvent::PowerUsed { team });
    }

    let dx = state.ball.pos.x - state.player(team).pos.x;
    state.ball.strike(kind.impulse(dx), team, now);
    state.emit(GameEvent::Hit {
        team,
        kind: Some(kind),
    });
    log::trace!("{:?} {:?} at t={:.0}ms", team, kind, now);
    true
}
