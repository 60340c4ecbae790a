//! Keyboard state and per-player intents
//!
//! Raw key codes arrive asynchronously from the host; the simulation only
//! reads the held state once per tick through a player's [`KeyBindings`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::actions::HitKind;
use crate::consts::MOVE_SPEED;

/// Logical actions a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
    Jump,
    Special,
    Bump,
    Set,
    Spike,
    Serve,
}

/// Currently held key codes
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<u32>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, code: u32) {
        self.held.insert(code);
    }

    pub fn key_up(&mut self, code: u32) {
        self.held.remove(&code);
    }

    #[inline]
    pub fn is_down(&self, code: u32) -> bool {
        self.held.contains(&code)
    }

    /// Release everything (focus loss, menu transition)
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// Per-player key table (browser `keyCode` values)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub left: u32,
    pub right: u32,
    pub jump: u32,
    pub special: u32,
    pub bump: u32,
    pub set: u32,
    pub spike: u32,
    pub serve: u32,
}

impl KeyBindings {
    /// A/D move, W jump, S special, Q/E/R bump/set/spike, Space serve
    pub fn player_one() -> Self {
        Self {
            left: 65,
            right: 68,
            jump: 87,
            special: 83,
            bump: 81,
            set: 69,
            spike: 82,
            serve: 32,
        }
    }

    /// Arrows move/jump/special, `/` `.` `,` bump/set/spike, Enter serve
    pub fn player_two() -> Self {
        Self {
            left: 37,
            right: 39,
            jump: 38,
            special: 40,
            bump: 191,
            set: 190,
            spike: 188,
            serve: 13,
        }
    }

    pub fn code(&self, action: Action) -> u32 {
        match action {
            Action::Left => self.left,
            Action::Right => self.right,
            Action::Jump => self.jump,
            Action::Special => self.special,
            Action::Bump => self.bump,
            Action::Set => self.set,
            Action::Spike => self.spike,
            Action::Serve => self.serve,
        }
    }

    /// Reverse lookup, first match in declaration order
    pub fn action_for(&self, code: u32) -> Option<Action> {
        [
            Action::Left,
            Action::Right,
            Action::Jump,
            Action::Special,
            Action::Bump,
            Action::Set,
            Action::Spike,
            Action::Serve,
        ]
        .into_iter()
        .find(|&a| self.code(a) == code)
    }

    /// Read this player's intent from the held keys
    pub fn intent(&self, keys: &InputState) -> PlayerIntent {
        let held = |a: Action| keys.is_down(self.code(a));

        let mut move_x = 0.0;
        if held(Action::Left) {
            move_x -= MOVE_SPEED;
        }
        if held(Action::Right) {
            move_x += MOVE_SPEED;
        }

        PlayerIntent {
            move_x,
            jump: held(Action::Jump),
            serve: held(Action::Serve),
            bump: held(Action::Bump),
            set: held(Action::Set),
            spike: held(Action::Spike),
            special: held(Action::Special),
        }
    }
}

/// What a player (human or AI) wants to do this tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerIntent {
    /// Horizontal displacement this tick
    pub move_x: f32,
    pub jump: bool,
    pub serve: bool,
    pub bump: bool,
    pub set: bool,
    pub spike: bool,
    pub special: bool,
}

impl PlayerIntent {
    /// Requested strikes, in resolution order
    pub fn requested_hits(&self) -> impl Iterator<Item = HitKind> + '_ {
        HitKind::ALL.into_iter().filter(move |kind| match kind {
            HitKind::Bump => self.bump,
            HitKind::Set => self.set,
            HitKind::Spike => self.spike,
            HitKind::Special => self.special,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_follow_events() {
        let mut keys = InputState::new();
        keys.key_down(65);
        keys.key_down(65);
        assert!(keys.is_down(65));

        keys.key_up(65);
        assert!(!keys.is_down(65));

        keys.key_down(1);
        keys.key_down(2);
        keys.clear();
        assert!(!keys.is_down(1) && !keys.is_down(2));
    }

    #[test]
    fn test_opposite_directions_cancel() {
        let bindings = KeyBindings::player_one();
        let mut keys = InputState::new();

        keys.key_down(bindings.left);
        assert_eq!(bindings.intent(&keys).move_x, -MOVE_SPEED);

        keys.key_down(bindings.right);
        assert_eq!(bindings.intent(&keys).move_x, 0.0);
    }

    #[test]
    fn test_tables_do_not_overlap() {
        let one = KeyBindings::player_one();
        let two = KeyBindings::player_two();
        let mut keys = InputState::new();
        keys.key_down(two.spike);
        keys.key_down(two.serve);

        let intent = one.intent(&keys);
        assert_eq!(intent, PlayerIntent::default());
        assert_eq!(two.action_for(188), Some(Action::Spike));
        assert_eq!(one.action_for(188), None);
    }

    #[test]
    fn test_requested_hits_in_fixed_order() {
        let intent = PlayerIntent {
            special: true,
            bump: true,
            spike: true,
            ..Default::default()
        };
        let hits: Vec<_> = intent.requested_hits().collect();
        assert_eq!(hits, vec![HitKind::Bump, HitKind::Spike, HitKind::Special]);
    }
}
