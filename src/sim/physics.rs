//! Gravity and positional integration
//!
//! Semi-implicit Euler with one step per frame: velocity first, then position.
//! Velocities are in units per tick, so there is no dt here.

use super::state::{Ball, Player};
use crate::consts::{GRAVITY, GROUND_Y};

/// Apply gravity and move a player; land on the ground line
pub fn integrate_player(player: &mut Player) {
    player.vel.y += GRAVITY;
    player.pos.y += player.vel.y;
    if player.pos.y > GROUND_Y {
        player.pos.y = GROUND_Y;
        player.vel.y = 0.0;
        player.grounded = true;
    }
}

/// Apply gravity and move the ball
pub fn integrate_ball(ball: &mut Ball) {
    ball.vel.y += GRAVITY;
    ball.pos += ball.vel;
}

/// Keep a player's centre inside its half of the court
pub fn clamp_to_half(player: &mut Player) {
    let (lo, hi) = player.team.x_bounds();
    player.pos.x = player.pos.x.clamp(lo, hi);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::Team;
    use glam::Vec2;

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let mut player = Player::new(Team::Left);
        player.vel.y = -JUMP_POWER;
        player.grounded = false;

        integrate_player(&mut player);
        assert!(player.pos.y < GROUND_Y);
        assert!(!player.grounded);

        for _ in 0..200 {
            integrate_player(&mut player);
        }
        assert_eq!(player.pos.y, GROUND_Y);
        assert_eq!(player.vel.y, 0.0);
        assert!(player.grounded);
    }

    #[test]
    fn test_ball_velocity_updates_before_position() {
        let mut ball = Ball::new(Team::Left);
        ball.pos = Vec2::new(300.0, 100.0);
        ball.vel = Vec2::new(2.0, 0.0);

        integrate_ball(&mut ball);
        assert_eq!(ball.vel, Vec2::new(2.0, GRAVITY));
        assert_eq!(ball.pos, Vec2::new(302.0, 100.0 + GRAVITY));
    }

    #[test]
    fn test_ball_on_serve_spot_falls() {
        let mut ball = Ball::new(Team::Right);
        let start = ball.pos;
        for _ in 0..10 {
            integrate_ball(&mut ball);
        }
        assert_eq!(ball.pos.x, start.x);
        assert!(ball.pos.y > start.y);
        assert!(ball.is_moving());
    }

    #[test]
    fn test_clamp_to_half() {
        let mut left = Player::new(Team::Left);
        left.pos.x = 900.0;
        clamp_to_half(&mut left);
        assert_eq!(left.pos.x, NET_X - PLAYER_RADIUS);

        let mut right = Player::new(Team::Right);
        right.pos.x = -50.0;
        clamp_to_half(&mut right);
        assert_eq!(right.pos.x, NET_X + NET_WIDTH + PLAYER_RADIUS);
    }
}
