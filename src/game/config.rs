//! Match Configuration
//!
//! Settings for creating a seeded match, loadable from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::controller::Game;
use crate::game::dice::SeededDice;
use crate::game::state::active_seats_for;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Player count is not 2, 3 or 4.
    #[error("player count must be 2, 3 or 4, got {0}")]
    InvalidPlayerCount(u8),

    /// The JSON could not be parsed.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for a seeded match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Dice seed
    pub seed: u64,
    /// Seats in play (2, 3 or 4)
    pub player_count: u8,
    /// Step budget when a bot drives the match
    pub max_turns: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            player_count: 4,
            max_turns: 2000,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings describe a playable match.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match active_seats_for(self.player_count) {
            Some(_) => Ok(()),
            None => Err(ConfigError::InvalidPlayerCount(self.player_count)),
        }
    }

    /// Create a fresh match from these settings.
    pub fn create_game(&self) -> Result<Game<SeededDice>, ConfigError> {
        self.validate()?;
        Ok(Game::with_seed(self.seed, self.player_count))
    }
}

// =============================================================================
// TESTS
// =============================================================================
