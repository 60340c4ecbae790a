//! Game settings and preferences
//!
//! Stored as JSON next to the binary (native) or handed in by the host page.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::{GameMode, KeyBindings};

/// AI difficulty levels
///
/// Accepted and persisted, but the opponent AI does not read it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Mode used by `start` from the menu
    #[serde(default)]
    pub mode: GameMode,
    /// Key table for the left player
    #[serde(default = "KeyBindings::player_one")]
    pub player_one_keys: KeyBindings,
    /// Key table for the right player
    #[serde(default = "KeyBindings::player_two")]
    pub player_two_keys: KeyBindings,
    /// Fixed match seed (random when absent)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            mode: GameMode::SinglePlayer,
            player_one_keys: KeyBindings::player_one(),
            player_two_keys: KeyBindings::player_two(),
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings {}: {}", path.display(), e),
            },
            Err(e) => log::debug!("No settings at {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: &Path) {
        match self.to_json() {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::warn!("Failed to save settings to {}: {}", path.display(), e);
                } else {
                    log::info!("Settings saved");
                }
            }
            Err(e) => log::warn!("Failed to encode settings: {}", e),
        }
    }
}
