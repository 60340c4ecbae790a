//! Reactive opponent
//!
//! Reads only the ball and its own player; no prediction. Produces the same
//! [`PlayerIntent`] a keyboard would, so it goes through the normal jump and
//! strike gates. It never serves: a ball left on its serve spot drops onto
//! the server and the passive bounce puts it in play.

use super::input::PlayerIntent;
use super::state::{Ball, Player};
use crate::consts::{GROUND_Y, MOVE_SPEED};

/// Fraction of the human move speed the AI walks at
pub const AI_SPEED_FACTOR: f32 = 0.65;
/// Horizontal gap the AI tolerates before walking
pub const AI_TRACK_DEADZONE: f32 = 10.0;
/// Ball must be this far above the AI before it jumps
pub const AI_JUMP_CLEARANCE: f32 = 60.0;
/// Horizontal reach for attempting a spike
pub const AI_ATTACK_RANGE: f32 = 50.0;
/// Height band above the ground where the AI attacks
pub const AI_ATTACK_HEIGHT: f32 = 160.0;

/// Compute this tick's intent for an AI-controlled player
pub fn ai_intent(ball: &Ball, me: &Player) -> PlayerIntent {
    let mut intent = PlayerIntent::default();

    // Ball on our side, dropping, and well above us
    if me.team.owns_x(ball.pos.x)
        && ball.vel.y > 0.0
        && ball.pos.y < me.pos.y - AI_JUMP_CLEARANCE
    {
        intent.jump = true;
    }

    let step = MOVE_SPEED * AI_SPEED_FACTOR;
    if ball.pos.x > me.pos.x + AI_TRACK_DEADZONE {
        intent.move_x = step;
    } else if ball.pos.x < me.pos.x - AI_TRACK_DEADZONE {
        intent.move_x = -step;
    }

    // Measured from where this tick's step will leave us
    let x_after_step = me.pos.x + intent.move_x;
    if (ball.pos.x - x_after_step).abs() < AI_ATTACK_RANGE
        && ball.pos.y > GROUND_Y - AI_ATTACK_HEIGHT
    {
        intent.spike = true;
    }

    intent
}
