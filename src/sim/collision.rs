//! Ball collision detection and response
//!
//! Checks run in a fixed order every tick: ground, walls, ceiling, net,
//! players, power-ups. A ground contact ends the rally and skips the rest.

use glam::Vec2;

use super::actions::can_hit_ball;
use super::rules;
use super::state::{Ball, GameEvent, GameState, Player, Team};
use crate::consts::*;
use crate::{net_left, net_right};

/// Axis-aligned rectangle (y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// The net, standing on the ground at court centre
    pub fn net() -> Self {
        Self {
            min: Vec2::new(net_left(), GROUND_Y - NET_HEIGHT),
            max: Vec2::new(net_right(), GROUND_Y),
        }
    }

    /// Bounding box of the circle overlaps the rectangle horizontally and
    /// reaches below its top edge
    pub fn overlaps_circle_box(&self, center: Vec2, radius: f32) -> bool {
        center.x + radius > self.min.x
            && center.x - radius < self.max.x
            && center.y + radius > self.min.y
    }
}

/// Team that scores if the ball has reached the ground
///
/// A ball landing on the left half is a point for the right team.
pub fn ground_contact(ball: &Ball) -> Option<Team> {
    if ball.pos.y + ball.radius > GROUND_Y {
        Some(if ball.pos.x < COURT_WIDTH / 2.0 {
            Team::Right
        } else {
            Team::Left
        })
    } else {
        None
    }
}

/// Side walls: lossy reflection, pushed back inside
pub fn bounce_walls(ball: &mut Ball) -> bool {
    if ball.pos.x - ball.radius < 0.0 || ball.pos.x + ball.radius > COURT_WIDTH {
        ball.vel.x *= -WALL_BOUNCE;
        ball.pos.x = ball.pos.x.clamp(ball.radius, COURT_WIDTH - ball.radius);
        return true;
    }
    false
}

/// Ceiling: elastic reflection, placed just below the top edge
pub fn bounce_ceiling(ball: &mut Ball) -> bool {
    if ball.pos.y - ball.radius < 0.0 {
        ball.vel.y = -ball.vel.y;
        ball.pos.y = ball.radius + 2.0;
        return true;
    }
    false
}

/// Net: pushed out to the edge on the ball's side of centre, vx reflected
pub fn bounce_net(ball: &mut Ball) -> bool {
    if !Rect::net().overlaps_circle_box(ball.pos, ball.radius) {
        return false;
    }
    ball.pos.x = if ball.pos.x < COURT_WIDTH / 2.0 {
        net_left() - ball.radius
    } else {
        net_right() + ball.radius
    };
    ball.vel.x *= -NET_BOUNCE;
    true
}

/// Default deflection when a player touches the ball without a strike key
pub fn passive_bounce(ball: &mut Ball, player: &Player, now_ms: f64) -> bool {
    if !can_hit_ball(ball, player, now_ms) {
        return false;
    }
    let d = ball.pos - player.pos;
    if d.length() >= player.radius + ball.radius {
        return false;
    }
    let vel = Vec2::new(d.x * 0.16, -(d.y * 0.25).abs() - 10.0);
    ball.strike(vel, player.team, now_ms);
    true
}

/// Remove every power-up the ball overlaps and hand it to the last hitter
///
/// Returns the number collected.
pub fn collect_power_ups(state: &mut GameState) -> usize {
    let ball_pos = state.ball.pos;
    let ball_radius = state.ball.radius;

    let mut collected = Vec::new();
    state.power_ups.retain(|pu| {
        let touching = ball_pos.distance(pu.pos) < ball_radius + pu.radius;
        if touching {
            collected.push(pu.kind);
        }
        !touching
    });

    let team = state.ball.last_hit;
    for &kind in &collected {
        if let Some(team) = team {
            state.active_power_ups[team.index()] = Some(kind);
        }
        log::trace!("Power-up {:?} collected by {:?}", kind, team);
        state.emit(GameEvent::PowerCollected { team, kind });
    }
    collected.len()
}

/// Run all ball collision checks for this tick
///
/// Returns the scoring team when the ball hit the ground.
pub fn resolve_ball(state: &mut GameState) -> Option<Team> {
    if let Some(team) = ground_contact(&state.ball) {
        rules::score_point(state, team);
        let server = state.match_state.serve_team;
        state.ball.reset_to_serve(server, state.time_ms);
        return Some(team);
    }

    bounce_walls(&mut state.ball);
    bounce_ceiling(&mut state.ball);
    bounce_net(&mut state.ball);

    let now = state.time_ms;
    for team in Team::BOTH {
        if passive_bounce(&mut state.ball, &state.players[team.index()], now) {
            log::trace!("{:?} passive bounce at t={:.0}ms", team, now);
            state.emit(GameEvent::Hit { team, kind: None });
        }
    }

    collect_power_ups(state);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;
    use crate::sim::state::{GameMode, MatchPhase, PowerUp, PowerUpKind};

    fn free_ball(pos: Vec2, vel: Vec2) -> Ball {
        let mut ball = Ball::new(Team::Left);
        ball.pos = pos;
        ball.vel = vel;
        ball
    }

    fn playing_state() -> GameState {
        let mut state = GameState::new(3, GameMode::LocalVersus, Difficulty::Normal);
        state.match_state.phase = MatchPhase::Playing;
        state
    }

    #[test]
    fn test_ground_contact_scores_for_far_side() {
        let ball = free_ball(Vec2::new(200.0, GROUND_Y - 10.0), Vec2::ZERO);
        assert_eq!(ground_contact(&ball), Some(Team::Right));

        let ball = free_ball(Vec2::new(800.0, GROUND_Y - 10.0), Vec2::ZERO);
        assert_eq!(ground_contact(&ball), Some(Team::Left));

        let ball = free_ball(Vec2::new(800.0, GROUND_Y - BALL_RADIUS - 1.0), Vec2::ZERO);
        assert_eq!(ground_contact(&ball), None);
    }

    #[test]
    fn test_wall_bounce_loses_energy() {
        let mut ball = free_ball(Vec2::new(COURT_WIDTH - 5.0, 200.0), Vec2::new(10.0, 0.0));
        assert!(bounce_walls(&mut ball));
        assert_eq!(ball.vel.x, -8.0);
        assert_eq!(ball.pos.x, COURT_WIDTH - BALL_RADIUS);

        let mut ball = free_ball(Vec2::new(3.0, 200.0), Vec2::new(-5.0, 0.0));
        assert!(bounce_walls(&mut ball));
        assert_eq!(ball.vel.x, 4.0);
        assert_eq!(ball.pos.x, BALL_RADIUS);
    }

    #[test]
    fn test_ceiling_bounce_is_elastic() {
        let mut ball = free_ball(Vec2::new(300.0, 10.0), Vec2::new(1.0, -9.0));
        assert!(bounce_ceiling(&mut ball));
        assert_eq!(ball.vel.y, 9.0);
        assert_eq!(ball.pos.y, BALL_RADIUS + 2.0);
    }

    #[test]
    fn test_net_from_left() {
        let mut ball = free_ball(Vec2::new(net_left() - 10.0, GROUND_Y - 100.0), Vec2::new(6.0, 1.0));
        assert!(bounce_net(&mut ball));
        assert_eq!(ball.pos.x, net_left() - BALL_RADIUS);
        assert!((ball.vel.x - (-6.0 * NET_BOUNCE)).abs() < 1e-6);
        assert_eq!(ball.vel.y, 1.0);
    }

    #[test]
    fn test_net_from_right() {
        let mut ball = free_ball(Vec2::new(net_right() + 5.0, GROUND_Y - 60.0), Vec2::new(-4.0, 0.0));
        assert!(bounce_net(&mut ball));
        assert_eq!(ball.pos.x, net_right() + BALL_RADIUS);
        assert!(ball.vel.x > 0.0);
    }

    #[test]
    fn test_ball_clears_net_above_top() {
        let top = GROUND_Y - NET_HEIGHT;
        let mut ball = free_ball(Vec2::new(COURT_WIDTH / 2.0, top - BALL_RADIUS - 1.0), Vec2::new(5.0, 0.0));
        assert!(!bounce_net(&mut ball));
        assert_eq!(ball.vel.x, 5.0);
    }

    #[test]
    fn test_passive_bounce_needs_contact() {
        let player = Player::new(Team::Left);
        // Inside the strike box but outside the contact circle
        let reach = PLAYER_RADIUS + BALL_RADIUS;
        let mut ball = free_ball(player.pos + Vec2::new(reach - 1.0, -(reach - 1.0)), Vec2::ZERO);
        assert!(!passive_bounce(&mut ball, &player, 0.0));

        ball.pos = player.pos + Vec2::new(20.0, -40.0);
        assert!(passive_bounce(&mut ball, &player, 0.0));
        assert!((ball.vel.x - 3.2).abs() < 1e-5);
        assert_eq!(ball.vel.y, -20.0);
        assert_eq!(ball.last_hit, Some(Team::Left));
        assert!(!ball.can_be_hit(HIT_COOLDOWN_MS - 1.0));
    }

    #[test]
    fn test_ground_resets_ball_and_skips_other_checks() {
        let mut state = playing_state();
        state.match_state.serve_team = Team::Right;
        state.ball = free_ball(Vec2::new(200.0, GROUND_Y), Vec2::new(-3.0, 5.0));
        state.power_ups.push(PowerUp {
            id: 1,
            kind: PowerUpKind::Super,
            pos: Vec2::new(RIGHT_SERVE_X, BALL_SERVE_Y),
            radius: POWERUP_RADIUS,
        });

        assert_eq!(resolve_ball(&mut state), Some(Team::Right));
        assert_eq!(state.match_state.scores, [0, 1]);
        assert_eq!(state.ball.pos, Vec2::new(RIGHT_SERVE_X, BALL_SERVE_Y));
        assert_eq!(state.ball.vel, Vec2::ZERO);
        // Ball now sits on the power-up but the pickup pass did not run
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.events, vec![GameEvent::Score { team: Team::Right }]);
    }

    #[test]
    fn test_power_up_round_trip() {
        let mut state = playing_state();
        state.power_ups.push(PowerUp {
            id: 7,
            kind: PowerUpKind::Super,
            pos: Vec2::new(300.0, 150.0),
            radius: POWERUP_RADIUS,
        });
        state.ball = free_ball(Vec2::new(310.0, 150.0), Vec2::ZERO);
        state.ball.last_hit = Some(Team::Left);

        assert_eq!(collect_power_ups(&mut state), 1);
        assert_eq!(state.active_power_ups[0], Some(PowerUpKind::Super));
        assert_eq!(state.active_power_ups[1], None);
        assert!(state.power_ups.is_empty());

        assert_eq!(collect_power_ups(&mut state), 0);
        let collected = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::PowerCollected { .. }))
            .count();
        assert_eq!(collected, 1);
    }

    #[test]
    fn test_adjacent_power_ups_all_collected() {
        let mut state = playing_state();
        for (id, x) in [(1, 300.0), (2, 320.0), (3, 900.0), (4, 290.0)] {
            state.power_ups.push(PowerUp {
                id,
                kind: PowerUpKind::Super,
                pos: Vec2::new(x, 150.0),
                radius: POWERUP_RADIUS,
            });
        }
        state.ball = free_ball(Vec2::new(305.0, 150.0), Vec2::ZERO);

        assert_eq!(collect_power_ups(&mut state), 3);
        let ids: Vec<_> = state.power_ups.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_unowned_pickup_is_consumed_without_reward() {
        let mut state = playing_state();
        state.power_ups.push(PowerUp {
            id: 1,
            kind: PowerUpKind::Super,
            pos: Vec2::new(400.0, 120.0),
            radius: POWERUP_RADIUS,
        });
        state.ball = free_ball(Vec2::new(400.0, 130.0), Vec2::ZERO);

        collect_power_ups(&mut state);
        assert!(state.power_ups.is_empty());
        assert_eq!(state.active_power_ups, [None, None]);
        assert_eq!(
            state.events,
            vec![GameEvent::PowerCollected {
                team: None,
                kind: PowerUpKind::Super
            }]
        );
    }
}
