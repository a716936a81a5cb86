//! Action History & Replay
//!
//! Every roll and move the controller accepts is appended to the match
//! history. Because the dice are the only source of nondeterminism, the
//! history alone is enough to rebuild the match bit-for-bit.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::controller::Game;
use crate::game::dice::ScriptedDice;
use crate::game::state::{DecodeError, GameState};
use crate::game::status::RuleViolation;

/// An accepted action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// A roll, including forfeits and passed turns.
    Roll {
        /// Seat that rolled
        seat: u8,
        /// Die value drawn
        dice: u8,
    },
    /// A token move.
    Move {
        /// Seat that moved
        seat: u8,
        /// Token index within the seat
        token: u8,
    },
}

impl Action {
    /// Seat that performed the action.
    pub fn seat(&self) -> u8 {
        match *self {
            Action::Roll { seat, .. } | Action::Move { seat, .. } => seat,
        }
    }
}

/// Why a history could not be replayed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    /// Player count is not 2, 3 or 4.
    #[error("invalid player count {0}")]
    InvalidPlayerCount(u8),

    /// The starting state is not one a match can be resumed from.
    #[error("invalid starting state: {0}")]
    InvalidState(#[from] DecodeError),

    /// A recorded die is outside 1..=6.
    #[error("action {index}: invalid die value {dice}")]
    InvalidDice {
        /// Position in the history
        index: usize,
        /// Recorded value
        dice: u8,
    },

    /// The log disagrees with the engine about whose turn it is.
    #[error("action {index}: seat {expected} is to act but the log says {actual}")]
    SeatMismatch {
        /// Position in the history
        index: usize,
        /// Seat the engine expected
        expected: u8,
        /// Seat the log recorded
        actual: u8,
    },

    /// The engine rejected a recorded action.
    #[error("action {index} rejected: {violation}")]
    Rejected {
        /// Position in the history
        index: usize,
        /// Reason given by the engine
        violation: RuleViolation,
    },
}

/// Rebuild a match by re-applying a recorded history to a fresh game.
///
/// The returned game's state and history match the recording game's exactly
/// when the log is genuine.
pub fn replay(player_count: u8, actions: &[Action]) -> Result<Game<ScriptedDice>, ReplayError> {
    let start = GameState::for_player_count(player_count)
        .ok_or(ReplayError::InvalidPlayerCount(player_count))?;
    replay_from(start, actions)
}

/// Rebuild a match by re-applying a recorded history to `start`.
///
/// Use with [`Game::start_state`] for matches that were resumed with
/// [`Game::from_state`].
pub fn replay_from(start: GameState, actions: &[Action]) -> Result<Game<ScriptedDice>, ReplayError> {
    let mut rolls = Vec::new();
    for (index, action) in actions.iter().enumerate() {
        if let Action::Roll { dice, .. } = *action {
            if !(1..=6).contains(&dice) {
                return Err(ReplayError::InvalidDice { index, dice });
            }
            rolls.push(dice);
        }
    }

    let mut game = Game::from_state(start, ScriptedDice::from_rolls(rolls))?;

    for (index, action) in actions.iter().enumerate() {
        let expected = game.current_player();
        if action.seat() != expected {
            return Err(ReplayError::SeatMismatch {
                index,
                expected,
                actual: action.seat(),
            });
        }

        let outcome = match *action {
            Action::Roll { .. } => game.roll_dice().map(|_| ()),
            Action::Move { token, .. } => game.move_token(token).map(|_| ()),
        };
        outcome.map_err(|violation| ReplayError::Rejected { index, violation })?;
    }

    Ok(game)
}

// =============================================================================
// TESTS
// =============================================================================
