//! Match session: lifecycle, keyboard routing and per-frame snapshots
//!
//! This is what a front-end holds. It owns the [`GameState`] and the raw key
//! map, builds a [`TickInput`] each frame and hands back the events raised.

use glam::Vec2;
use serde::Serialize;

use super::input::{InputState, KeyBindings};
use super::state::{GameEvent, GameMode, GameState, MatchPhase, PowerUpKind, RallyState, Team};
use super::tick::{TickInput, tick};
use crate::settings::Settings;

/// Read-only view of a player for rendering
#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub team: Team,
    pub pos: Vec2,
    pub radius: f32,
    pub grounded: bool,
    pub power_up: Option<PowerUpKind>,
}

/// Read-only view of the ball for rendering
#[derive(Debug, Clone, Serialize)]
pub struct BallView {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub last_hit: Option<Team>,
    pub can_be_hit: bool,
}

/// Read-only view of a live power-up
#[derive(Debug, Clone, Serialize)]
pub struct PowerUpView {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub radius: f32,
}

/// Everything a renderer/scoreboard needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub time_ms: f64,
    pub players: [PlayerView; 2],
    pub ball: BallView,
    pub power_ups: Vec<PowerUpView>,
    pub scores: [u32; 2],
    pub round: u32,
    pub serve_team: Team,
    pub rally: RallyState,
    pub phase: MatchPhase,
}

/// A match between two sides, driven one frame at a time
#[derive(Debug, Clone)]
pub struct Match {
    state: GameState,
    keys: InputState,
    bindings: [KeyBindings; 2],
}

impl Match {
    /// Create an idle match (menu) from settings
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let seed = settings.seed.unwrap_or(seed);
        Self {
            state: GameState::new(seed, settings.mode, settings.difficulty),
            keys: InputState::new(),
            bindings: [settings.player_one_keys.clone(), settings.player_two_keys.clone()],
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for scripted scenarios and tools
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.match_state.phase
    }

    // === Lifecycle ===

    /// Start from round 1 in `mode`
    pub fn start(&mut self, mode: GameMode) {
        super::rules::start_match(&mut self.state, mode);
    }

    /// Restart in the current mode
    pub fn restart(&mut self) {
        let mode = self.state.match_state.mode;
        self.start(mode);
    }

    pub fn pause(&mut self) {
        if self.state.match_state.phase == MatchPhase::Playing {
            self.state.match_state.phase = MatchPhase::Paused;
            log::info!("Paused");
        }
    }

    pub fn resume(&mut self) {
        if self.state.match_state.phase == MatchPhase::Paused {
            self.state.match_state.phase = MatchPhase::Playing;
            log::info!("Resumed");
        }
    }

    /// Back to the menu; held keys are released
    pub fn stop(&mut self) {
        self.state.match_state.phase = MatchPhase::Idle;
        self.keys.clear();
        log::info!("Stopped");
    }

    // === Input ===

    /// Codes bound to neither player are not tracked
    pub fn key_down(&mut self, code: u32) {
        if self.bindings.iter().any(|b| b.action_for(code).is_some()) {
            self.keys.key_down(code);
        } else {
            log::trace!("Ignoring unbound key {}", code);
        }
    }

    pub fn key_up(&mut self, code: u32) {
        self.keys.key_up(code);
    }

    /// Build this frame's input: keyboard for humans, AI for the right side in
    /// single-player
    pub fn tick_input(&self) -> TickInput {
        let ai_right = self.state.match_state.mode == GameMode::SinglePlayer;
        TickInput {
            intents: [
                self.bindings[0].intent(&self.keys),
                self.bindings[1].intent(&self.keys),
            ],
            ai: [false, ai_right],
        }
    }

    /// Advance one frame and drain the events it raised
    pub fn tick(&mut self, dt_ms: f64) -> Vec<GameEvent> {
        let input = self.tick_input();
        self.tick_with(&input, dt_ms)
    }

    /// Advance one frame with an explicit input
    pub fn tick_with(&mut self, input: &TickInput, dt_ms: f64) -> Vec<GameEvent> {
        tick(&mut self.state, input, dt_ms);
        std::mem::take(&mut self.state.events)
    }

    // === Output ===

    pub fn snapshot(&self) -> Snapshot {
        let s = &self.state;
        let player_view = |team: Team| {
            let p = s.player(team);
            PlayerView {
                team,
                pos: p.pos,
                radius: p.radius,
                grounded: p.grounded,
                power_up: s.active_power_ups[team.index()],
            }
        };

        Snapshot {
            time_ms: s.time_ms,
            players: [player_view(Team::Left), player_view(Team::Right)],
            ball: BallView {
                pos: s.ball.pos,
                vel: s.ball.vel,
                radius: s.ball.radius,
                last_hit: s.ball.last_hit,
                can_be_hit: s.ball.can_be_hit(s.time_ms),
            },
            power_ups: s
                .power_ups
                .iter()
                .map(|pu| PowerUpView {
                    id: pu.id,
                    kind: pu.kind,
                    pos: pu.pos,
                    radius: pu.radius,
                })
                .collect(),
            scores: s.match_state.scores,
            round: s.match_state.round,
            serve_team: s.match_state.serve_team,
            rally: s.rally_state(),
            phase: s.match_state.phase,
        }
    }
}
