//! Per-frame simulation tick
//!
//! Core game loop step: inputs, player physics, ball physics, collisions,
//! power-up spawns, in that order.

use super::actions::try_action;
use super::ai::ai_intent;
use super::input::PlayerIntent;
use super::state::{GameState, MatchPhase, Team};
use super::{collision, physics, powerups, rules};
use crate::consts::{JUMP_COOLDOWN_MS, JUMP_POWER};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Keyboard intent per team (ignored for AI-driven sides)
    pub intents: [PlayerIntent; 2],
    /// Sides driven by the AI this tick
    pub ai: [bool; 2],
}

impl TickInput {
    /// Both sides AI-driven (attract/demo mode)
    pub fn demo() -> Self {
        Self {
            ai: [true, true],
            ..Default::default()
        }
    }
}

/// Advance the game state by one frame of `dt_ms` simulated milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64) {
    match state.match_state.phase {
        MatchPhase::Idle | MatchPhase::Paused => return,
        MatchPhase::RoundOver {
            winner,
            resume_at_ms,
        } => {
            // Only the announcement timer runs while the round is over
            state.time_ms += dt_ms;
            state.time_ticks += 1;
            if state.time_ms >= resume_at_ms {
                rules::finish_round(state, winner);
            }
            return;
        }
        MatchPhase::Playing => {}
    }

    state.time_ms += dt_ms;
    state.time_ticks += 1;

    // AI reads the state before anyone moves this tick
    let mut intents = input.intents;
    for team in Team::BOTH {
        if input.ai[team.index()] {
            intents[team.index()] = ai_intent(&state.ball, state.player(team));
        }
    }

    for team in Team::BOTH {
        handle_player_input(state, team, &intents[team.index()]);
    }

    for player in &mut state.players {
        physics::integrate_player(player);
    }
    physics::integrate_ball(&mut state.ball);
    collision::resolve_ball(state);

    powerups::maybe_spawn(state);
}

/// Move, jump, serve and strike for one player, then clamp to its half
///
/// Strikes resolve here, before the collision pass, so an explicit strike
/// takes precedence over the passive bounce in the same tick.
pub fn handle_player_input(state: &mut GameState, team: Team, intent: &PlayerIntent) {
    let now = state.time_ms;

    let player = state.player_mut(team);
    player.pos.x += intent.move_x;
    if intent.jump && player.grounded && player.can_jump(now) {
        player.vel.y = -JUMP_POWER;
        player.grounded = false;
        player.jump_ready_at_ms = now + JUMP_COOLDOWN_MS;
    }

    if intent.serve && rules::serve_allowed(state, team) {
        rules::serve(state, team);
    }

    for kind in intent.requested_hits() {
        try_action(state, team, kind);
    }

    physics::clamp_to_half(state.player_mut(team));
}
