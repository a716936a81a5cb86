//! Game State Definitions
//!
//! The authoritative, compact state of one match and its fixed 28-byte wire
//! form. The in-memory layout is never used for transport: [`GameState::encode`]
//! and [`GameState::decode`] write and read every field at its offset.
//!
//! ```text
//! ┌────────────┬─────────┬──────┬───────┬────────┬──────────┬──────┬─────────┐
//! │ 0..16      │ 16      │ 17   │ 18    │ 19     │ 20..24   │ 24   │ 25..28  │
//! │ tokens     │ current │ dice │ sixes │ winner │ turn id  │ mask │ padding │
//! │ seat-major │ player  │      │       │ 255=no │ u32 LE   │      │ zero    │
//! └────────────┴─────────┴──────┴───────┴────────┴──────────┴──────┴─────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::hash::{hash_with_domain, StateHash, GAME_STATE_DOMAIN};
use crate::game::board::{
    MAX_CONSECUTIVE_SIXES, POS_BASE, POS_HOME, SEAT_COUNT, TOKENS_PER_SEAT, TOKEN_COUNT,
};

/// Size of the packed state in bytes.
pub const STATE_SIZE: usize = 28;

/// Wire sentinel for "no winner yet".
pub const NO_WINNER: u8 = 255;

/// Mask covering every seat.
pub const ALL_SEATS_MASK: u8 = 0b1111;

const OFFSET_CURRENT_PLAYER: usize = 16;
const OFFSET_LAST_DICE: usize = 17;
const OFFSET_SIXES: usize = 18;
const OFFSET_WINNER: usize = 19;
const OFFSET_TURN_ID: usize = 20;
const OFFSET_ACTIVE_SEATS: usize = 24;
const OFFSET_PADDING: usize = 25;

/// Active-seat mask for a table of `player_count` players.
///
/// Two players sit diagonally (seats 0 and 2); three or four fill seats in
/// order. Returns `None` for any other count.
pub fn active_seats_for(player_count: u8) -> Option<u8> {
    match player_count {
        2 => Some(0b0101),
        3 => Some(0b0111),
        4 => Some(ALL_SEATS_MASK),
        _ => None,
    }
}

// =============================================================================
// PHASE
// =============================================================================

/// Caller-visible phase of the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Current seat must roll.
    AwaitingRoll,
    /// Current seat rolled and must choose a token.
    AwaitingMove {
        /// Pending die value
        dice: u8,
    },
    /// A seat has won. Absorbing.
    GameOver {
        /// Winning seat
        winner: u8,
    },
}

// =============================================================================
// DECODE ERRORS
// =============================================================================

/// Why a packed buffer or resumed state was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Buffer is not exactly [`STATE_SIZE`] bytes.
    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required length
        expected: usize,
        /// Received length
        actual: usize,
    },

    /// A token position lies beyond home.
    #[error("token {index} has position {position} beyond home")]
    InvalidPosition {
        /// Token slot (seat-major)
        index: usize,
        /// Offending value
        position: u8,
    },

    /// Seat mask is empty or names seats beyond the fourth.
    #[error("invalid active seat mask {0:#06b}")]
    InvalidSeatMask(u8),

    /// Current player is out of range or not seated.
    #[error("current player {0} is not an active seat")]
    InvalidCurrentPlayer(u8),

    /// Pending die outside 0..=6.
    #[error("invalid pending dice value {0}")]
    InvalidDice(u8),

    /// Six counter at or above the forfeit threshold.
    #[error("invalid consecutive six count {0}")]
    InvalidSixCount(u8),

    /// Winner is neither the sentinel nor an active seat.
    #[error("invalid winner {0}")]
    InvalidWinner(u8),

    /// Reserved bytes must be zero.
    #[error("reserved bytes are not zero")]
    NonZeroPadding,
}

// =============================================================================
// GAME STATE
// =============================================================================

/// Complete state of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    /// Token positions, index `(seat << 2) + token`
    pub tokens: [u8; TOKEN_COUNT],

    /// Seat whose turn it is
    pub current_player: u8,

    /// 0 = not rolled yet, 1..=6 = rolled and awaiting a move
    pub last_dice_roll: u8,

    /// Sixes rolled in a row by the current seat this turn
    pub consecutive_sixes: u8,

    /// Winning seat, once there is one
    pub winner: Option<u8>,

    /// Incremented each time the acting seat changes
    pub turn_id: u32,

    /// Bit `s` set when seat `s` is in play
    pub active_seats: u8,
}

impl GameState {
    /// Create a fresh state with every token in base.
    ///
    /// # Panics
    ///
    /// Panics if `active_seats` names no seat or a seat beyond the fourth.
    pub fn new(active_seats: u8) -> Self {
        assert!(
            active_seats != 0 && active_seats & !ALL_SEATS_MASK == 0,
            "active seat mask {:#06b} is invalid",
            active_seats
        );

        let mut state = Self {
            tokens: [POS_BASE; TOKEN_COUNT],
            current_player: 0,
            last_dice_roll: 0,
            consecutive_sixes: 0,
            winner: None,
            turn_id: 1,
            active_seats,
        };

        if !state.is_seat_active(0) {
            state.advance_turn_pointer();
        }

        state
    }

    /// Create the state for a table of `player_count` players.
    pub fn for_player_count(player_count: u8) -> Option<Self> {
        active_seats_for(player_count).map(Self::new)
    }

    /// Move `current_player` to the next active seat, cycling 0→1→2→3→0.
    pub fn advance_turn_pointer(&mut self) {
        debug_assert!(self.active_seats & ALL_SEATS_MASK != 0);
        loop {
            self.current_player = (self.current_player + 1) % SEAT_COUNT as u8;
            if self.is_seat_active(self.current_player) {
                break;
            }
        }
    }

    /// Whether a seat is in play.
    #[inline]
    pub fn is_seat_active(&self, seat: u8) -> bool {
        (seat as usize) < SEAT_COUNT && self.active_seats & (1 << seat) != 0
    }

    /// Iterator over active seats in seat order.
    pub fn active_seat_list(&self) -> impl Iterator<Item = u8> + '_ {
        (0..SEAT_COUNT as u8).filter(move |s| self.is_seat_active(*s))
    }

    /// Position of one token.
    ///
    /// # Panics
    ///
    /// Panics if `seat` or `token` is outside 0..=3.
    #[inline]
    pub fn token_position(&self, seat: u8, token: u8) -> u8 {
        self.tokens[token_slot(seat, token)]
    }

    /// Overwrite the position of one token.
    #[inline]
    pub fn set_token_position(&mut self, seat: u8, token: u8, position: u8) {
        debug_assert!(position <= POS_HOME);
        self.tokens[token_slot(seat, token)] = position;
    }

    /// All four positions of one seat.
    pub fn seat_tokens(&self, seat: u8) -> [u8; TOKENS_PER_SEAT] {
        let start = token_slot(seat, 0);
        let mut out = [POS_BASE; TOKENS_PER_SEAT];
        out.copy_from_slice(&self.tokens[start..start + TOKENS_PER_SEAT]);
        out
    }

    /// Number of a seat's tokens that reached home.
    pub fn home_count(&self, seat: u8) -> usize {
        self.seat_tokens(seat).iter().filter(|p| **p == POS_HOME).count()
    }

    /// Current phase of the turn.
    pub fn phase(&self) -> Phase {
        match (self.winner, self.last_dice_roll) {
            (Some(winner), _) => Phase::GameOver { winner },
            (None, 0) => Phase::AwaitingRoll,
            (None, dice) => Phase::AwaitingMove { dice },
        }
    }

    // =========================================================================
    // Wire codec
    // =========================================================================

    /// Pack into the fixed 28-byte little-endian wire form.
    pub fn encode(&self) -> [u8; STATE_SIZE] {
        let mut buf = [0u8; STATE_SIZE];

        buf[..TOKEN_COUNT].copy_from_slice(&self.tokens);
        buf[OFFSET_CURRENT_PLAYER] = self.current_player;
        buf[OFFSET_LAST_DICE] = self.last_dice_roll;
        buf[OFFSET_SIXES] = self.consecutive_sixes;
        buf[OFFSET_WINNER] = self.winner.unwrap_or(NO_WINNER);
        buf[OFFSET_TURN_ID..OFFSET_ACTIVE_SEATS].copy_from_slice(&self.turn_id.to_le_bytes());
        buf[OFFSET_ACTIVE_SEATS] = self.active_seats;
        // 25..28 stay zero

        buf
    }

    /// Unpack the wire form, rejecting wrong lengths and impossible states.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != STATE_SIZE {
            return Err(DecodeError::InvalidLength {
                expected: STATE_SIZE,
                actual: bytes.len(),
            });
        }

        if bytes[OFFSET_PADDING..].iter().any(|b| *b != 0) {
            return Err(DecodeError::NonZeroPadding);
        }

        let mut tokens = [POS_BASE; TOKEN_COUNT];
        tokens.copy_from_slice(&bytes[..TOKEN_COUNT]);

        let mut turn_id = [0u8; 4];
        turn_id.copy_from_slice(&bytes[OFFSET_TURN_ID..OFFSET_ACTIVE_SEATS]);

        let state = Self {
            tokens,
            current_player: bytes[OFFSET_CURRENT_PLAYER],
            last_dice_roll: bytes[OFFSET_LAST_DICE],
            consecutive_sixes: bytes[OFFSET_SIXES],
            winner: match bytes[OFFSET_WINNER] {
                NO_WINNER => None,
                seat => Some(seat),
            },
            turn_id: u32::from_le_bytes(turn_id),
            active_seats: bytes[OFFSET_ACTIVE_SEATS],
        };

        state.validate()?;
        Ok(state)
    }

    /// Check the state is one the controller can act on.
    ///
    /// [`decode`](Self::decode) runs this on every buffer; states built or
    /// deserialized by other means must pass it before they drive a match.
    pub fn validate(&self) -> Result<(), DecodeError> {
        if let Some((index, &position)) =
            self.tokens.iter().enumerate().find(|(_, p)| **p > POS_HOME)
        {
            return Err(DecodeError::InvalidPosition { index, position });
        }
        if self.active_seats == 0 || self.active_seats & !ALL_SEATS_MASK != 0 {
            return Err(DecodeError::InvalidSeatMask(self.active_seats));
        }
        if !self.is_seat_active(self.current_player) {
            return Err(DecodeError::InvalidCurrentPlayer(self.current_player));
        }
        if self.last_dice_roll > 6 {
            return Err(DecodeError::InvalidDice(self.last_dice_roll));
        }
        if self.consecutive_sixes >= MAX_CONSECUTIVE_SIXES {
            return Err(DecodeError::InvalidSixCount(self.consecutive_sixes));
        }
        if let Some(winner) = self.winner {
            if !self.is_seat_active(winner) {
                return Err(DecodeError::InvalidWinner(winner));
            }
        }
        Ok(())
    }

    /// Hash of the packed state for integrity checks.
    pub fn compute_hash(&self) -> StateHash {
        hash_with_domain(GAME_STATE_DOMAIN, &self.encode())
    }
}

impl fmt::Display for GameState {
    /// One-line summary: `T012 S2 [5] {1,_,_,* | 14,_,_,_}`.
    ///
    /// `_` marks base, `*` home; only active seats are listed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{:03} S{} ", self.turn_id, self.current_player)?;
        match self.last_dice_roll {
            0 => f.write_str("[-] ")?,
            dice => write!(f, "[{}] ", dice)?,
        }

        f.write_str("{")?;
        for (n, seat) in self.active_seat_list().enumerate() {
            if n > 0 {
                f.write_str(" | ")?;
            }
            for (t, pos) in self.seat_tokens(seat).iter().enumerate() {
                if t > 0 {
                    f.write_str(",")?;
                }
                match *pos {
                    POS_BASE => f.write_str("_")?,
                    POS_HOME => f.write_str("*")?,
                    p => write!(f, "{}", p)?,
                }
            }
        }
        f.write_str("}")?;

        if let Some(winner) = self.winner {
            write!(f, " winner=S{}", winner)?;
        }
        Ok(())
    }
}

#[inline]
fn token_slot(seat: u8, token: u8) -> usize {
    assert!(
        (seat as usize) < SEAT_COUNT && (token as usize) < TOKENS_PER_SEAT,
        "token ({}, {}) out of range",
        seat,
        token
    );
    ((seat as usize) << 2) + token as usize
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_init_four_players() {
        let state = GameState::for_player_count(4).unwrap();

        assert_eq!(state.current_player, 0);
        assert_eq!(state.last_dice_roll, 0);
        assert_eq!(state.consecutive_sixes, 0);
        assert_eq!(state.winner, None);
        assert_eq!(state.turn_id, 1);
        assert_eq!(state.active_seats, 0b1111);
        assert!(state.tokens.iter().all(|p| *p == POS_BASE));
        assert_eq!(state.phase(), Phase::AwaitingRoll);
    }

    #[test]
    fn test_two_player_diagonal_cadence() {
        let mut state = GameState::for_player_count(2).unwrap();
        assert_eq!(state.active_seats, 0b0101);

        let mut visited = Vec::new();
        for _ in 0..6 {
            state.advance_turn_pointer();
            visited.push(state.current_player);
        }
        assert_eq!(visited, vec![2, 0, 2, 0, 2, 0]);
    }

    #[test]
    fn test_inactive_seat_zero_skipped_at_init() {
        let state = GameState::new(0b1010);
        assert_eq!(state.current_player, 1);
        // Pointer move at setup is not a turn change
        assert_eq!(state.turn_id, 1);
    }

    #[test]
    fn test_player_count_bounds() {
        assert!(GameState::for_player_count(1).is_none());
        assert!(GameState::for_player_count(5).is_none());
        assert_eq!(active_seats_for(3), Some(0b0111));
    }

    #[test]
    #[should_panic]
    fn test_empty_mask_panics() {
        GameState::new(0);
    }

    #[test]
    fn test_token_accessors() {
        let mut state = GameState::new(ALL_SEATS_MASK);
        state.set_token_position(2, 3, 40);
        state.set_token_position(2, 0, POS_HOME);

        assert_eq!(state.tokens[11], 40);
        assert_eq!(state.token_position(2, 3), 40);
        assert_eq!(state.seat_tokens(2), [POS_HOME, 0, 0, 40]);
        assert_eq!(state.home_count(2), 1);
        assert_eq!(state.home_count(0), 0);
    }

    #[test]
    fn test_encode_layout() {
        let mut state = GameState::new(0b0101);
        state.set_token_position(0, 1, 7);
        state.set_token_position(2, 3, 56);
        state.current_player = 2;
        state.last_dice_roll = 4;
        state.consecutive_sixes = 1;
        state.turn_id = 0x0102_0304;

        let bytes = state.encode();
        assert_eq!(bytes.len(), 28);
        assert_eq!(bytes[1], 7);
        assert_eq!(bytes[11], 56);
        assert_eq!(bytes[16], 2);
        assert_eq!(bytes[17], 4);
        assert_eq!(bytes[18], 1);
        assert_eq!(bytes[19], NO_WINNER);
        assert_eq!(&bytes[20..24], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(bytes[24], 0b0101);
        assert_eq!(&bytes[25..], &[0, 0, 0]);

        state.winner = Some(2);
        assert_eq!(state.encode()[19], 2);
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        let bytes = GameState::new(ALL_SEATS_MASK).encode();

        assert_eq!(
            GameState::decode(&bytes[..27]),
            Err(DecodeError::InvalidLength { expected: 28, actual: 27 })
        );

        let mut long = bytes.to_vec();
        long.push(0);
        assert!(matches!(
            GameState::decode(&long),
            Err(DecodeError::InvalidLength { actual: 29, .. })
        ));
    }

    #[test]
    fn test_decode_rejects_impossible_states() {
        let good = GameState::new(0b0101).encode();

        let mut bad = good;
        bad[5] = 58;
        assert_eq!(
            GameState::decode(&bad),
            Err(DecodeError::InvalidPosition { index: 5, position: 58 })
        );

        let mut bad = good;
        bad[16] = 1; // seat 1 is not playing
        assert_eq!(GameState::decode(&bad), Err(DecodeError::InvalidCurrentPlayer(1)));

        let mut bad = good;
        bad[17] = 7;
        assert_eq!(GameState::decode(&bad), Err(DecodeError::InvalidDice(7)));

        let mut bad = good;
        bad[18] = 3;
        assert_eq!(GameState::decode(&bad), Err(DecodeError::InvalidSixCount(3)));

        let mut bad = good;
        bad[19] = 3;
        assert_eq!(GameState::decode(&bad), Err(DecodeError::InvalidWinner(3)));

        let mut bad = good;
        bad[24] = 0x10;
        assert_eq!(GameState::decode(&bad), Err(DecodeError::InvalidSeatMask(0x10)));

        let mut bad = good;
        bad[27] = 1;
        assert_eq!(GameState::decode(&bad), Err(DecodeError::NonZeroPadding));
    }

    #[test]
    fn test_validate_catches_deserialized_states() {
        let mut state = GameState::new(ALL_SEATS_MASK);
        state.current_player = 9;
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.validate(), Err(DecodeError::InvalidCurrentPlayer(9)));

        let mut state = GameState::new(ALL_SEATS_MASK);
        state.active_seats = 0;
        assert_eq!(state.validate(), Err(DecodeError::InvalidSeatMask(0)));

        state.active_seats = 0b0101;
        state.winner = Some(1);
        assert_eq!(state.validate(), Err(DecodeError::InvalidWinner(1)));

        assert_eq!(GameState::new(0b0111).validate(), Ok(()));
    }

    #[test]
    fn test_display() {
        let mut state = GameState::new(0b0101);
        state.set_token_position(0, 0, 1);
        state.set_token_position(0, 3, POS_HOME);
        state.set_token_position(2, 1, 14);
        state.last_dice_roll = 5;

        assert_eq!(state.to_string(), "T001 S0 [5] {1,_,_,* | _,14,_,_}");

        state.last_dice_roll = 0;
        state.winner = Some(0);
        assert_eq!(state.to_string(), "T001 S0 [-] {1,_,_,* | _,14,_,_} winner=S0");
    }

    #[test]
    fn test_hash_tracks_state() {
        let a = GameState::new(ALL_SEATS_MASK);
        let mut b = a;
        assert_eq!(a.compute_hash(), b.compute_hash());

        b.set_token_position(3, 2, 9);
        assert_ne!(a.compute_hash(), b.compute_hash());
    }

    fn arb_state() -> impl Strategy<Value = GameState> {
        (
            proptest::array::uniform16(0u8..=POS_HOME),
            1u8..=ALL_SEATS_MASK,
            0u8..4,
            0u8..=6,
            0u8..MAX_CONSECUTIVE_SIXES,
            any::<bool>(),
            any::<u32>(),
        )
            .prop_map(|(tokens, mask, seat_pick, dice, sixes, won, turn_id)| {
                let seats: Vec<u8> = (0..4u8).filter(|s| mask & (1 << *s) != 0).collect();
                let current = seats[seat_pick as usize % seats.len()];
                GameState {
                    tokens,
                    current_player: current,
                    last_dice_roll: dice,
                    consecutive_sixes: sixes,
                    winner: won.then_some(current),
                    turn_id,
                    active_seats: mask,
                }
            })
    }

    proptest! {
        #[test]
        fn prop_wire_round_trip(state in arb_state()) {
            let bytes = state.encode();
            prop_assert_eq!(GameState::decode(&bytes), Ok(state));
        }
    }
}
