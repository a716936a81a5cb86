//! Seat-Checked Commands
//!
//! The entry point a session layer uses once it has mapped a connection to a
//! seat. Commands are plain serde types so any transport can carry them; the
//! engine only checks that the issuing seat is the one whose turn it is.

use serde::{Deserialize, Serialize};

use crate::game::controller::Game;
use crate::game::dice::DiceRoller;
use crate::game::status::{MoveResult, RollResult, RuleViolation};

/// A request from a seated player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameCommand {
    /// Roll the die.
    Roll,
    /// Move a token by the pending die.
    Move {
        /// Token index within the seat
        token: u8,
    },
}

/// Result of an accepted command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// Outcome of a roll.
    Rolled(RollResult),
    /// Outcome of a move.
    Moved(MoveResult),
}

impl CommandOutcome {
    /// Flat status bits.
    pub fn flags(&self) -> u16 {
        match self {
            CommandOutcome::Rolled(roll) => roll.flags(),
            CommandOutcome::Moved(mv) => mv.flags(),
        }
    }
}

/// Flat status bits for any command result, accepted or not.
pub fn status_flags(result: &Result<CommandOutcome, RuleViolation>) -> u16 {
    match result {
        Ok(outcome) => outcome.flags(),
        Err(violation) => violation.flag(),
    }
}

impl<D: DiceRoller> Game<D> {
    /// Apply a command issued by `seat`.
    ///
    /// Ended games reject everything with [`RuleViolation::GameEnded`]; any
    /// other seat than the current one gets [`RuleViolation::NotYourTurn`].
    pub fn apply(&mut self, seat: u8, command: GameCommand) -> Result<CommandOutcome, RuleViolation> {
        if self.is_game_won() {
            return Err(RuleViolation::GameEnded);
        }
        if seat != self.current_player() {
            return Err(RuleViolation::NotYourTurn);
        }

        match command {
            GameCommand::Roll => self.roll_dice().map(CommandOutcome::Rolled),
            GameCommand::Move { token } => self.move_token(token).map(CommandOutcome::Moved),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
