//! Match state and core simulation types
//!
//! Everything the engine mutates during a tick lives in [`GameState`].
//! Deferred effects (jump cooldown, hit refractory, round announcement) are
//! stored as timestamps on the simulation clock rather than timers.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actions::HitKind;
use crate::consts::*;
use crate::settings::Difficulty;
use crate::{net_left, net_right};

/// One side of the court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// Team 0, plays the left half
    Left,
    /// Team 1, plays the right half
    Right,
}

impl Team {
    pub const BOTH: [Team; 2] = [Team::Left, Team::Right];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Team::Left => 0,
            Team::Right => 1,
        }
    }

    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Team::Left => Team::Right,
            Team::Right => Team::Left,
        }
    }

    /// +1 when the opponent is to the right, -1 otherwise
    #[inline]
    pub fn toward_opponent(self) -> f32 {
        match self {
            Team::Left => 1.0,
            Team::Right => -1.0,
        }
    }

    pub fn spawn_x(self) -> f32 {
        match self {
            Team::Left => LEFT_SPAWN_X,
            Team::Right => RIGHT_SPAWN_X,
        }
    }

    /// Ball x when this team is serving
    pub fn serve_x(self) -> f32 {
        match self {
            Team::Left => LEFT_SERVE_X,
            Team::Right => RIGHT_SERVE_X,
        }
    }

    /// Allowed range of a player's centre x on this half
    pub fn x_bounds(self) -> (f32, f32) {
        match self {
            Team::Left => (PLAYER_RADIUS, net_left() - PLAYER_RADIUS),
            Team::Right => (net_right() + PLAYER_RADIUS, COURT_WIDTH - PLAYER_RADIUS),
        }
    }

    /// Whether `x` lies past the net on this team's side
    pub fn owns_x(self, x: f32) -> bool {
        match self {
            Team::Left => x < net_left(),
            Team::Right => x > net_right(),
        }
    }
}

/// How the right-hand player is controlled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Human on the left, AI on the right
    #[default]
    SinglePlayer,
    /// Two humans sharing one keyboard
    LocalVersus,
}

/// Lifecycle phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Not started (menu)
    Idle,
    /// Frame loop is running
    Playing,
    /// Frame loop suspended by the player
    Paused,
    /// A round was just won; waiting out the announcement delay
    RoundOver { winner: Team, resume_at_ms: f64 },
}

/// Serve/rally state derived from the ball's motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RallyState {
    Serving(Team),
    Rallying,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Enables the special strike
    #[default]
    Super,
}

/// A player avatar (circle resting on the ground line)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub team: Team,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub grounded: bool,
    /// Clock time at which the jump becomes available again
    pub jump_ready_at_ms: f64,
}

impl Player {
    pub fn new(team: Team) -> Self {
        Self {
            team,
            pos: Vec2::new(team.spawn_x(), GROUND_Y),
            vel: Vec2::ZERO,
            radius: PLAYER_RADIUS,
            grounded: true,
            jump_ready_at_ms: 0.0,
        }
    }

    #[inline]
    pub fn can_jump(&self, now_ms: f64) -> bool {
        now_ms >= self.jump_ready_at_ms
    }

    /// Put the player back on its spawn spot (jump cooldown is left alone)
    pub fn reset(&mut self) {
        self.pos = Vec2::new(self.team.spawn_x(), GROUND_Y);
        self.vel = Vec2::ZERO;
        self.grounded = true;
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Team that touched the ball last (cleared on reset)
    pub last_hit: Option<Team>,
    /// Clock time at which the ball can be struck again
    pub hittable_at_ms: f64,
}

impl Ball {
    pub fn new(server: Team) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            last_hit: None,
            hittable_at_ms: 0.0,
        };
        ball.reset_to_serve(server, 0.0);
        ball
    }

    #[inline]
    pub fn can_be_hit(&self, now_ms: f64) -> bool {
        now_ms >= self.hittable_at_ms
    }

    /// Manhattan speed |vx| + |vy|
    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.x.abs() + self.vel.y.abs()
    }

    /// In motion on either axis
    pub fn is_moving(&self) -> bool {
        self.vel.x.abs() > REST_SPEED || self.vel.y.abs() > REST_SPEED
    }

    /// Place the ball on the serve spot of `server`, at rest and hittable
    pub fn reset_to_serve(&mut self, server: Team, now_ms: f64) {
        self.pos = Vec2::new(server.serve_x(), BALL_SERVE_Y);
        self.vel = Vec2::ZERO;
        self.last_hit = None;
        self.hittable_at_ms = now_ms;
    }

    /// Apply a strike from `team`: new velocity, ownership and refractory window
    pub fn strike(&mut self, vel: Vec2, team: Team, now_ms: f64) {
        self.vel = vel;
        self.last_hit = Some(team);
        self.hittable_at_ms = now_ms + HIT_COOLDOWN_MS;
    }
}

/// A collectible floating on the court
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub radius: f32,
}

/// Discrete events raised during a tick (consumed by sound/UI)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball struck; `kind` is `None` for a passive bounce
    Hit { team: Team, kind: Option<HitKind> },
    /// A special strike consumed the team's power-up
    PowerUsed { team: Team },
    /// Ball touched a power-up; `team` is who gets it, if anyone
    PowerCollected { team: Option<Team>, kind: PowerUpKind },
    /// Ball landed; `team` scored
    Score { team: Team },
    /// Round announcement after the win delay
    RoundWon { team: Team },
}

/// Scores, serve turn and round bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub scores: [u32; 2],
    pub serve_team: Team,
    pub round: u32,
    pub phase: MatchPhase,
    pub mode: GameMode,
    /// Stored for the front-end; the AI does not read it yet
    pub difficulty: Difficulty,
}

impl MatchState {
    pub fn new(mode: GameMode, difficulty: Difficulty) -> Self {
        Self {
            scores: [0, 0],
            serve_team: Team::Left,
            round: 1,
            phase: MatchPhase::Idle,
            mode,
            difficulty,
        }
    }

    #[inline]
    pub fn score(&self, team: Team) -> u32 {
        self.scores[team.index()]
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == MatchPhase::Playing
    }
}

/// Complete simulation state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Match seed for reproducibility
    pub seed: u64,
    /// Simulation clock, advanced once per tick
    pub time_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub match_state: MatchState,
    /// Indexed by `Team::index()`
    pub players: [Player; 2],
    pub ball: Ball,
    /// Live power-ups (sorted by id)
    pub power_ups: Vec<PowerUp>,
    /// Held power-up per team
    pub active_power_ups: [Option<PowerUpKind>; 2],
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create an idle match with the given seed
    pub fn new(seed: u64, mode: GameMode, difficulty: Difficulty) -> Self {
        Self {
            seed,
            time_ms: 0.0,
            time_ticks: 0,
            match_state: MatchState::new(mode, difficulty),
            players: [Player::new(Team::Left), Player::new(Team::Right)],
            ball: Ball::new(Team::Left),
            power_ups: Vec::new(),
            active_power_ups: [None, None],
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
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

    /// Coin flip on the match RNG
    pub fn random_team(&mut self) -> Team {
        if self.rng.random_bool(0.5) {
            Team::Left
        } else {
            Team::Right
        }
    }

    #[inline]
    pub fn player(&self, team: Team) -> &Player {
        &self.players[team.index()]
    }

    #[inline]
    pub fn player_mut(&mut self, team: Team) -> &mut Player {
        &mut self.players[team.index()]
    }

    #[inline]
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Serve or rally, derived from the ball: a ball at rest is up for serve
    pub fn rally_state(&self) -> RallyState {
        if !self.ball.is_moving() {
            RallyState::Serving(self.match_state.serve_team)
        } else {
            RallyState::Rallying
        }
    }

    /// Both players to spawn, ball to the current server's spot
    pub fn reset_positions(&mut self) {
        for player in &mut self.players {
            player.reset();
        }
        let server = self.match_state.serve_team;
        self.ball.reset_to_serve(server, self.time_ms);
    }
}
