//! Operation Outcomes
//!
//! Every controller operation returns `Result<_, RuleViolation>`. Successful
//! outcomes carry their auxiliary markers (extra turn, capture, win) as
//! typed fields, so a failure can never also claim a capture.
//!
//! Transports that still speak the flat 16-bit status bitset can convert with
//! [`RollResult::flags`], [`MoveResult::flags`] and [`RuleViolation::flag`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bit values of the flat status encoding used on the wire.
pub mod flags {
    /// Operation succeeded.
    pub const SUCCESS: u16 = 1 << 0;
    /// Seat keeps the turn.
    pub const EXTRA_TURN: u16 = 1 << 1;
    /// An opponent token was sent back to base.
    pub const CAPTURED_OPPONENT: u16 = 1 << 2;
    /// The move finished the game.
    pub const GAME_WON: u16 = 1 << 3;
    /// Roll had no legal move, turn moved on.
    pub const TURN_PASSED: u16 = 1 << 4;
    /// Third consecutive six.
    pub const FORFEIT_TURN: u16 = 1 << 5;
    /// Game already has a winner.
    pub const GAME_ENDED: u16 = 1 << 6;
    /// Command came from a seat that is not current.
    pub const NOT_YOUR_TURN: u16 = 1 << 7;
    /// Move attempted without a pending roll.
    pub const NEED_TO_ROLL: u16 = 1 << 8;
    /// Roll attempted while a roll is pending.
    pub const ALREADY_ROLLED: u16 = 1 << 9;
    /// Token index outside 0..=3.
    pub const INVALID_TOKEN: u16 = 1 << 10;
    /// Token in base needs a six.
    pub const TOKEN_IN_BASE: u16 = 1 << 11;
    /// Move would pass home.
    pub const OVERSHOT_HOME: u16 = 1 << 12;
    /// Token already home.
    pub const TOKEN_COMPLETED: u16 = 1 << 13;
}

// =============================================================================
// RULE VIOLATIONS
// =============================================================================

/// Why a roll or move was rejected.
///
/// Rejections never mutate state, so the caller can simply try something else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleViolation {
    /// A winner exists; the match accepts no further actions.
    #[error("game has already ended")]
    GameEnded,

    /// Command issued by a seat other than the current player.
    #[error("not this seat's turn")]
    NotYourTurn,

    /// Move attempted before rolling.
    #[error("dice must be rolled before moving")]
    NeedToRoll,

    /// Roll attempted while a rolled die still awaits a move.
    #[error("dice already rolled this turn")]
    AlreadyRolled,

    /// Token index outside 0..=3.
    #[error("token index out of range")]
    InvalidToken,

    /// Token is in base and the die is not a six.
    #[error("token is in base and needs a six to enter")]
    TokenInBase,

    /// Die would carry the token past home.
    #[error("move would overshoot home")]
    OvershotHome,

    /// Token has already reached home.
    #[error("token has already reached home")]
    TokenCompleted,
}

impl RuleViolation {
    /// Flat status bit for this violation.
    pub const fn flag(self) -> u16 {
        match self {
            RuleViolation::GameEnded => flags::GAME_ENDED,
            RuleViolation::NotYourTurn => flags::NOT_YOUR_TURN,
            RuleViolation::NeedToRoll => flags::NEED_TO_ROLL,
            RuleViolation::AlreadyRolled => flags::ALREADY_ROLLED,
            RuleViolation::InvalidToken => flags::INVALID_TOKEN,
            RuleViolation::TokenInBase => flags::TOKEN_IN_BASE,
            RuleViolation::OvershotHome => flags::OVERSHOT_HOME,
            RuleViolation::TokenCompleted => flags::TOKEN_COMPLETED,
        }
    }
}

// =============================================================================
// ROLL RESULT
// =============================================================================

/// What an accepted roll did to the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollStatus {
    /// The seat may act again: either a move is now pending, or an
    /// unplayable six kept the turn.
    Success,
    /// No token could use the die; the next seat is up.
    TurnPassed,
    /// Third six in a row; the next seat is up.
    ForfeitTurn,
}

/// Outcome of an accepted roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Effect on the turn
    pub status: RollStatus,
    /// Die value drawn (1..=6)
    pub dice: u8,
}

impl RollResult {
    /// Create a roll result.
    pub const fn new(status: RollStatus, dice: u8) -> Self {
        Self { status, dice }
    }

    /// True when the roll left the seat able to act.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.status == RollStatus::Success
    }

    /// Flat status bits.
    pub fn flags(&self) -> u16 {
        match self.status {
            RollStatus::Success => flags::SUCCESS,
            RollStatus::TurnPassed => flags::TURN_PASSED,
            RollStatus::ForfeitTurn => flags::FORFEIT_TURN,
        }
    }
}

// =============================================================================
// MOVE RESULT
// =============================================================================

/// An opponent token sent back to base.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capture {
    /// Seat that owned the captured token
    pub seat: u8,
    /// Index of the captured token within its seat
    pub token: u8,
}

/// Outcome of an accepted move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    /// Token position after the move
    pub new_position: u8,
    /// Seat keeps the turn (six rolled or opponent captured)
    pub extra_turn: bool,
    /// Move brought the seat's last token home
    pub game_won: bool,
    /// Opponent token captured by this move
    pub capture: Option<Capture>,
}

impl MoveResult {
    /// True if an opponent was captured.
    #[inline]
    pub fn captured(&self) -> bool {
        self.capture.is_some()
    }

    /// Flat status bits.
    pub fn flags(&self) -> u16 {
        let mut bits = flags::SUCCESS;
        if self.extra_turn {
            bits |= flags::EXTRA_TURN;
        }
        if self.captured() {
            bits |= flags::CAPTURED_OPPONENT;
        }
        if self.game_won {
            bits |= flags::GAME_WON;
        }
        bits
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_flags_are_distinct() {
        let all = [
            RuleViolation::GameEnded,
            RuleViolation::NotYourTurn,
            RuleViolation::NeedToRoll,
            RuleViolation::AlreadyRolled,
            RuleViolation::InvalidToken,
            RuleViolation::TokenInBase,
            RuleViolation::OvershotHome,
            RuleViolation::TokenCompleted,
        ];

        let mut seen = 0u16;
        for v in all {
            let bit = v.flag();
            assert_eq!(bit.count_ones(), 1);
            assert_eq!(seen & bit, 0, "{:?} reuses a bit", v);
            seen |= bit;
        }
        // None of them overlap the success markers
        assert_eq!(seen & 0x3F, 0);
    }

    #[test]
    fn test_move_flags() {
        let plain = MoveResult {
            new_position: 12,
            extra_turn: false,
            game_won: false,
            capture: None,
        };
        assert_eq!(plain.flags(), flags::SUCCESS);

        let capture = MoveResult {
            new_position: 15,
            extra_turn: true,
            game_won: false,
            capture: Some(Capture { seat: 1, token: 0 }),
        };
        assert!(capture.captured());
        assert_eq!(
            capture.flags(),
            flags::SUCCESS | flags::EXTRA_TURN | flags::CAPTURED_OPPONENT
        );
    }

    #[test]
    fn test_roll_flags() {
        assert_eq!(RollResult::new(RollStatus::Success, 4).flags(), flags::SUCCESS);
        assert_eq!(RollResult::new(RollStatus::TurnPassed, 2).flags(), flags::TURN_PASSED);
        assert_eq!(RollResult::new(RollStatus::ForfeitTurn, 6).flags(), flags::FORFEIT_TURN);
        assert!(!RollResult::new(RollStatus::TurnPassed, 2).is_success());
    }

    #[test]
    fn test_violation_display() {
        assert_eq!(RuleViolation::OvershotHome.to_string(), "move would overshoot home");
    }
}
