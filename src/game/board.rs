//! Board Topology
//!
//! Pure functions over relative track positions. Each seat walks its own
//! track numbered from base; the shared 52-tile loop is reached by offsetting
//! that track by the seat's quadrant.
//!
//! ```text
//!   0        1          2 ..= 51         52 ..= 56       57
//!  Base → Start tile → main loop → home stretch → Home
//! ```

use crate::game::status::RuleViolation;

/// Seats at the table.
pub const SEAT_COUNT: usize = 4;

/// Tokens per seat.
pub const TOKENS_PER_SEAT: usize = 4;

/// Tokens on the board in total.
pub const TOKEN_COUNT: usize = SEAT_COUNT * TOKENS_PER_SEAT;

/// Off-board holding position.
pub const POS_BASE: u8 = 0;

/// Entry square of the main loop.
pub const POS_START: u8 = 1;

/// Last relative position on the shared loop.
pub const POS_END_MAIN: u8 = 51;

/// First square of the private home stretch.
pub const POS_HOME_STRETCH: u8 = 52;

/// Finished.
pub const POS_HOME: u8 = 57;

/// Die value needed to leave base.
pub const ENTRY_DICE: u8 = 6;

/// Sixes in a row that forfeit the turn.
pub const MAX_CONSECUTIVE_SIXES: u8 = 3;

/// Length of the shared loop.
pub const TRACK_LENGTH: u8 = 52;

/// Offset between neighbouring seats' start squares.
pub const QUADRANT_SIZE: u8 = 13;

/// Start squares of every seat: a token standing here cannot be captured.
const SAFE_TILES_MASK: u64 = (1 << 0) | (1 << 13) | (1 << 26) | (1 << 39);

/// Map a seat-relative position onto the shared loop.
///
/// Returns `None` for base, the home stretch and home, which no opponent can
/// ever reach.
#[inline]
pub fn to_absolute(seat: u8, relative: u8) -> Option<u8> {
    if !(POS_START..=POS_END_MAIN).contains(&relative) {
        return None;
    }
    let offset = (seat as u16 % SEAT_COUNT as u16) * QUADRANT_SIZE as u16;
    Some(((relative as u16 - 1 + offset) % TRACK_LENGTH as u16) as u8)
}

/// Whether an absolute loop index is immune to capture.
#[inline]
pub fn is_safe_tile(absolute: u8) -> bool {
    absolute < TRACK_LENGTH && SAFE_TILES_MASK & (1u64 << absolute) != 0
}

/// Position a token would reach by moving `dice` squares from `current`.
///
/// The main loop and the home stretch share one increasing scale, so the step
/// from 51 into 52.. needs no special case.
pub fn predict_move(current: u8, dice: u8) -> Result<u8, RuleViolation> {
    if current == POS_HOME {
        return Err(RuleViolation::TokenCompleted);
    }

    if current == POS_BASE {
        return if dice == ENTRY_DICE {
            Ok(POS_START)
        } else {
            Err(RuleViolation::TokenInBase)
        };
    }

    let candidate = current as u16 + dice as u16;
    if candidate > POS_HOME as u16 {
        return Err(RuleViolation::OvershotHome);
    }

    Ok(candidate as u8)
}

/// Whether a die value can be used by this position.
#[inline]
pub fn can_move(current: u8, dice: u8) -> bool {
    predict_move(current, dice).is_ok()
}

// =============================================================================
// TESTS
// =============================================================================
