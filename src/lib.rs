//! Net Rally - A two-player arcade volleyball simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, serve/score rules, AI)
//! - `settings`: Player preferences (difficulty, mode, key tables)
//!
//! Rendering, menus and audio live outside this crate. A front-end drives a
//! [`sim::Match`] once per animation frame, draws its [`sim::Snapshot`] and
//! maps the returned [`sim::GameEvent`]s to sounds.

pub mod settings;
pub mod sim;

pub use settings::{Difficulty, Settings};

use glam::Vec2;

/// Game configuration constants
///
/// Units are court pixels; velocities are per tick (one tick = one frame).
/// The y axis points down, so "up" is negative.
pub mod consts {
    /// Nominal frame duration fed to the simulation clock (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Court dimensions
    pub const COURT_WIDTH: f32 = 1000.0;
    pub const COURT_HEIGHT: f32 = 550.0;
    /// Ground line (players stand with their centre on it)
    pub const GROUND_Y: f32 = COURT_HEIGHT - 40.0;

    /// Net rectangle, anchored on the ground at court centre
    pub const NET_X: f32 = COURT_WIDTH / 2.0 - NET_WIDTH / 2.0;
    pub const NET_WIDTH: f32 = 30.0;
    pub const NET_HEIGHT: f32 = 160.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 38.0;
    pub const MOVE_SPEED: f32 = 7.0;
    pub const JUMP_POWER: f32 = 16.0;
    pub const JUMP_COOLDOWN_MS: f64 = 300.0;
    pub const LEFT_SPAWN_X: f32 = 180.0;
    pub const RIGHT_SPAWN_X: f32 = 820.0;

    /// Downward acceleration per tick, shared by players and ball
    pub const GRAVITY: f32 = 0.65;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 22.0;
    pub const BALL_SERVE_Y: f32 = 180.0;
    pub const LEFT_SERVE_X: f32 = 220.0;
    pub const RIGHT_SERVE_X: f32 = 780.0;
    /// Refractory window after any hit
    pub const HIT_COOLDOWN_MS: f64 = 350.0;
    /// Below this (|vx| + |vy|) the ball counts as stationary
    pub const REST_SPEED: f32 = 0.1;

    /// Restitution factors
    pub const WALL_BOUNCE: f32 = 0.8;
    pub const NET_BOUNCE: f32 = 0.95;

    /// Serve impulse
    pub const SERVE_VX: f32 = 7.0;
    pub const SERVE_VY: f32 = -12.0;

    /// Scoring
    pub const WIN_SCORE: u32 = 15;
    pub const WIN_MARGIN: u32 = 2;
    pub const ROUND_ANNOUNCE_DELAY_MS: f64 = 400.0;

    /// Power-ups
    pub const POWERUP_RADIUS: f32 = 22.0;
    pub const POWERUP_SPAWN_CHANCE: f64 = 0.002;
    pub const POWERUP_MARGIN_X: f32 = 40.0;
    pub const POWERUP_MIN_Y: f32 = 80.0;
    pub const POWERUP_BAND_HEIGHT: f32 = 200.0;
}

/// Left edge of the net
#[inline]
pub fn net_left() -> f32 {
    consts::NET_X
}

/// Right edge of the net
#[inline]
pub fn net_right() -> f32 {
    consts::NET_X + consts::NET_WIDTH
}

/// Absolute per-axis distance between two points
#[inline]
pub fn axis_gap(a: Vec2, b: Vec2) -> Vec2 {
    (a - b).abs()
}
