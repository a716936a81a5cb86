//! Game Logic Module
//!
//! All Ludo rules. 100% deterministic given the dice.
//!
//! ## Module Structure
//!
//! - `status`: Roll/move outcomes and rule violations
//! - `board`: Track topology, safe tiles, move prediction
//! - `state`: Packed match state and its 28-byte wire form
//! - `dice`: Injectable dice (seeded and scripted)
//! - `controller`: Turn state machine
//! - `command`: Seat-checked command entry point
//! - `bot`: Greedy reference player
//! - `history`: Action log and replay
//! - `config`: Match settings

pub mod status;
pub mod board;
pub mod state;
pub mod dice;
pub mod controller;
pub mod command;
pub mod bot;
pub mod history;
pub mod config;

// Re-export key types
pub use status::{Capture, MoveResult, RollResult, RollStatus, RuleViolation};
pub use state::{DecodeError, GameState, Phase, STATE_SIZE};
pub use dice::{DiceRoller, ScriptedDice, SeededDice};
pub use controller::Game;
pub use command::{CommandOutcome, GameCommand};
pub use history::{replay, replay_from, Action, ReplayError};
pub use config::{ConfigError, GameConfig};
