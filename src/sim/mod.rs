//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, clock advanced by the caller's frame delta
//! - Seeded RNG only
//! - Timers are clock timestamps, never callbacks
//! - No rendering, audio or platform dependencies

pub mod actions;
pub mod ai;
pub mod collision;
pub mod input;
pub mod physics;
pub mod powerups;
pub mod rules;
pub mod session;
pub mod state;
pub mod tick;

pub use actions::{HitKind, can_hit_ball, try_action};
pub use ai::ai_intent;
pub use collision::{Rect, resolve_ball};
pub use input::{Action, InputState, KeyBindings, PlayerIntent};
pub use session::{BallView, Match, PlayerView, PowerUpView, Snapshot};
pub use state::{
    Ball, GameEvent, GameMode, GameState, MatchPhase, MatchState, Player, PowerUp, PowerUpKind,
    RallyState, Team,
};
pub use tick::{TickInput, handle_player_input, tick};
