//! Serve turn, scoring and round transitions
//!
//! The serve flag flips when a serve is made, not when a point is scored.
//! A team that wins a rally therefore does not automatically receive the next
//! serve; whoever did not serve last is up. Only the round reset picks a fresh
//! server (coin flip).

use glam::Vec2;

use super::state::{GameEvent, GameMode, GameState, MatchPhase, Team};
use crate::consts::*;

/// Begin a new match from round 1
pub fn start_match(state: &mut GameState, mode: GameMode) {
    let server = state.random_team();
    let ms = &mut state.match_state;
    ms.mode = mode;
    ms.round = 1;
    ms.scores = [0, 0];
    ms.serve_team = server;
    ms.phase = MatchPhase::Playing;
    state.power_ups.clear();
    state.active_power_ups = [None, None];
    state.reset_positions();
    log::info!("Match started ({:?}), {:?} serves", mode, server);
}

/// Win-by-two: at least `WIN_SCORE` points and a `WIN_MARGIN` lead
pub fn is_round_won(scores: [u32; 2], team: Team) -> bool {
    let own = scores[team.index()];
    let other = scores[team.opponent().index()];
    own >= WIN_SCORE && own.saturating_sub(other) >= WIN_MARGIN
}

/// A serve is legal for the designated server while the ball is at rest
pub fn serve_allowed(state: &GameState, team: Team) -> bool {
    let ball = &state.ball;
    state.match_state.serve_team == team && ball.speed() < REST_SPEED && !ball.is_moving()
}

/// Launch the ball toward the opponent and pass the serve flag
///
/// Dropped silently when `team` is not the designated server.
pub fn serve(state: &mut GameState, team: Team) -> bool {
    if state.match_state.serve_team != team {
        return false;
    }
    state.ball.vel = Vec2::new(SERVE_VX * team.toward_opponent(), SERVE_VY);
    state.match_state.serve_team = team.opponent();
    log::debug!("{:?} served", team);
    true
}

/// Award a point; starts the round-over delay when it wins the round
pub fn score_point(state: &mut GameState, team: Team) {
    let ms = &mut state.match_state;
    ms.scores[team.index()] += 1;
    let scores = ms.scores;
    log::debug!("{:?} scores: {} - {}", team, scores[0], scores[1]);
    state.emit(GameEvent::Score { team });

    if is_round_won(scores, team) {
        let resume_at_ms = state.time_ms + ROUND_ANNOUNCE_DELAY_MS;
        state.match_state.phase = MatchPhase::RoundOver {
            winner: team,
            resume_at_ms,
        };
        log::info!("{:?} takes round {}", team, state.match_state.round);
    }
}

/// Announce the winner and set up the next round
pub fn finish_round(state: &mut GameState, winner: Team) {
    state.emit(GameEvent::RoundWon { team: winner });
    let server = state.random_team();
    let ms = &mut state.match_state;
    ms.round += 1;
    ms.scores = [0, 0];
    ms.serve_team = server;
    ms.phase = MatchPhase::Playing;
    state.reset_positions();
    log::info!("Round {} begins, {:?} serves", state.match_state.round, server);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed, GameMode::LocalVersus, Difficulty::Normal);
        start_match(&mut state, GameMode::LocalVersus);
        state
    }

    #[test]
    fn test_win_by_two() {
        assert!(!is_round_won([14, 12], Team::Left));
        assert!(is_round_won([15, 13], Team::Left));
        assert!(!is_round_won([15, 14], Team::Left));
        assert!(!is_round_won([16, 15], Team::Left));
        assert!(is_round_won([17, 15], Team::Left));
        assert!(is_round_won([3, 21], Team::Right));
        assert!(!is_round_won([21, 3], Team::Right));
    }

    #[test]
    fn test_deuce_keeps_playing() {
        let mut state = started(1);
        state.match_state.scores = [14, 13];
        score_point(&mut state, Team::Right);
        assert_eq!(state.match_state.scores, [14, 14]);
        assert_eq!(state.match_state.phase, MatchPhase::Playing);
        assert_eq!(state.events, vec![GameEvent::Score { team: Team::Right }]);
    }

    #[test]
    fn test_winning_point_enters_round_over() {
        let mut state = started(1);
        state.time_ms = 1000.0;
        state.match_state.scores = [14, 0];
        score_point(&mut state, Team::Left);
        assert_eq!(
            state.match_state.phase,
            MatchPhase::RoundOver {
                winner: Team::Left,
                resume_at_ms: 1000.0 + ROUND_ANNOUNCE_DELAY_MS
            }
        );
        assert_eq!(state.match_state.scores, [15, 0]);
        assert_eq!(state.match_state.round, 1);
    }

    #[test]
    fn test_only_server_may_serve() {
        let mut state = started(5);
        state.match_state.serve_team = Team::Left;

        assert!(!serve_allowed(&state, Team::Right));
        assert!(!serve(&mut state, Team::Right));
        assert_eq!(state.ball.vel, Vec2::ZERO);
        assert_eq!(state.match_state.serve_team, Team::Left);

        assert!(serve_allowed(&state, Team::Left));
        assert!(serve(&mut state, Team::Left));
        assert_eq!(state.ball.vel, Vec2::new(SERVE_VX, SERVE_VY));
        assert_eq!(state.match_state.serve_team, Team::Right);
    }

    #[test]
    fn test_no_serve_while_ball_moving() {
        let mut state = started(5);
        state.match_state.serve_team = Team::Right;
        state.ball.vel = Vec2::new(0.0, 0.2);
        assert!(!serve_allowed(&state, Team::Right));

        state.ball.vel = Vec2::new(0.04, 0.04);
        assert!(serve_allowed(&state, Team::Right));
    }

    #[test]
    fn test_right_serves_leftward() {
        let mut state = started(5);
        state.match_state.serve_team = Team::Right;
        serve(&mut state, Team::Right);
        assert_eq!(state.ball.vel, Vec2::new(-SERVE_VX, SERVE_VY));
        assert_eq!(state.match_state.serve_team, Team::Left);
    }

    #[test]
    fn test_scoring_does_not_move_serve() {
        // Documented behaviour: only a serve hands the serve over
        let mut state = started(9);
        state.match_state.serve_team = Team::Left;
        score_point(&mut state, Team::Right);
        assert_eq!(state.match_state.serve_team, Team::Left);
    }

    #[test]
    fn test_finish_round_resets_scores() {
        let mut state = started(11);
        state.match_state.scores = [15, 3];
        state.players[0].pos.x = 400.0;
        state.active_power_ups[1] = Some(crate::sim::PowerUpKind::Super);

        finish_round(&mut state, Team::Left);
        assert_eq!(state.match_state.round, 2);
        assert_eq!(state.match_state.scores, [0, 0]);
        assert_eq!(state.match_state.phase, MatchPhase::Playing);
        assert_eq!(state.players[0].pos.x, LEFT_SPAWN_X);
        assert_eq!(state.ball.vel, Vec2::ZERO);
        assert_eq!(state.ball.pos.x, state.match_state.serve_team.serve_x());
        // Held power-ups carry over between rounds
        assert!(state.active_power_ups[1].is_some());
        assert_eq!(state.events, vec![GameEvent::RoundWon { team: Team::Left }]);
    }

    #[test]
    fn test_start_match_clears_power_ups() {
        let mut state = started(2);
        state.active_power_ups[0] = Some(crate::sim::PowerUpKind::Super);
        state.match_state.round = 4;
        start_match(&mut state, GameMode::SinglePlayer);
        assert_eq!(state.active_power_ups, [None, None]);
        assert_eq!(state.match_state.round, 1);
        assert_eq!(state.match_state.mode, GameMode::SinglePlayer);
    }
}
