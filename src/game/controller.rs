//! Game Controller
//!
//! The turn state machine. A seat's turn has two phases:
//!
//! ```text
//!            roll_dice                  move_token
//!  AwaitingRoll ──────► AwaitingMove ───────────────► AwaitingRoll (next seat,
//!       ▲   │                                              or same seat on
//!       │   │ no playable token / third six                extra turn)
//!       └───┘
//!
//!  any phase ── winning move ──► GameOver (absorbing)
//! ```
//!
//! Every rejected call returns a [`RuleViolation`] and leaves the state
//! untouched. The controller does no locking: callers serialize access per
//! match.

use tracing::{debug, info, trace};

use crate::game::board::{
    can_move, is_safe_tile, predict_move, to_absolute, ENTRY_DICE, MAX_CONSECUTIVE_SIXES,
    POS_BASE, POS_HOME, TOKENS_PER_SEAT, TOKEN_COUNT,
};
use crate::game::dice::{DiceRoller, SeededDice};
use crate::game::history::Action;
use crate::game::state::{DecodeError, GameState};
use crate::game::status::{Capture, MoveResult, RollResult, RollStatus, RuleViolation};

/// One match: the packed state plus the dice that drive it.
#[derive(Debug, Clone)]
pub struct Game<D = SeededDice> {
    state: GameState,
    start: GameState,
    dice: D,
    history: Vec<Action>,
}

impl Game<SeededDice> {
    /// Create a match with reproducible seeded dice.
    pub fn with_seed(seed: u64, player_count: u8) -> Self {
        Self::new(player_count, SeededDice::new(seed))
    }
}

impl<D: DiceRoller> Game<D> {
    /// Create a match for `player_count` players.
    ///
    /// # Panics
    ///
    /// Panics unless `player_count` is 2, 3 or 4.
    pub fn new(player_count: u8, dice: D) -> Self {
        let Some(state) = GameState::for_player_count(player_count) else {
            panic!("player count must be 2, 3 or 4, got {}", player_count);
        };

        Self {
            state,
            start: state,
            dice,
            history: Vec::new(),
        }
    }

    /// Resume a match from a previously exported state.
    ///
    /// The state is checked with [`GameState::validate`] first, so states
    /// that did not come through [`GameState::decode`] are safe to pass.
    pub fn from_state(state: GameState, dice: D) -> Result<Self, DecodeError> {
        state.validate()?;
        debug!("Resuming match at {}", state);

        Ok(Self {
            state,
            start: state,
            dice,
            history: Vec::new(),
        })
    }

    /// Read-only view of the match state.
    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Whether a seat has won.
    #[inline]
    pub fn is_game_won(&self) -> bool {
        self.state.winner.is_some()
    }

    /// Winning seat, if any.
    #[inline]
    pub fn winner(&self) -> Option<u8> {
        self.state.winner
    }

    /// Seat whose turn it is.
    #[inline]
    pub fn current_player(&self) -> u8 {
        self.state.current_player
    }

    /// The injected dice (for scripting rolls in tests).
    pub fn dice_mut(&mut self) -> &mut D {
        &mut self.dice
    }

    /// State the match was created or resumed from.
    ///
    /// [`history`](Self::history) is recorded relative to this state; pass
    /// both to [`replay_from`](crate::game::history::replay_from).
    pub fn start_state(&self) -> &GameState {
        &self.start
    }

    /// Every accepted action since construction, in order.
    pub fn history(&self) -> &[Action] {
        &self.history
    }

    /// Tokens of the current seat that can use the pending die.
    ///
    /// Empty unless a roll is pending.
    pub fn legal_moves(&self) -> Vec<u8> {
        let dice = self.state.last_dice_roll;
        if dice == 0 || self.is_game_won() {
            return Vec::new();
        }
        let seat = self.state.current_player;
        (0..TOKENS_PER_SEAT as u8)
            .filter(|t| can_move(self.state.token_position(seat, *t), dice))
            .collect()
    }

    /// Roll the die for the current seat.
    pub fn roll_dice(&mut self) -> Result<RollResult, RuleViolation> {
        if self.state.winner.is_some() {
            trace!("Roll rejected: game over");
            return Err(RuleViolation::GameEnded);
        }
        if self.state.last_dice_roll != 0 {
            trace!("Roll rejected: seat {} must move first", self.state.current_player);
            return Err(RuleViolation::AlreadyRolled);
        }

        let seat = self.state.current_player;
        let dice = self.dice.roll();
        debug_assert!((1..=6).contains(&dice), "roller produced {}", dice);
        self.history.push(Action::Roll { seat, dice });

        if dice == ENTRY_DICE {
            self.state.consecutive_sixes += 1;
            if self.state.consecutive_sixes >= MAX_CONSECUTIVE_SIXES {
                self.end_turn(true);
                info!("Seat {} rolled three sixes, turn forfeited", seat);
                return Ok(RollResult::new(RollStatus::ForfeitTurn, dice));
            }
        } else {
            self.state.consecutive_sixes = 0;
        }

        let playable = self
            .state
            .seat_tokens(seat)
            .iter()
            .any(|pos| can_move(*pos, dice));

        if !playable {
            // A six keeps the turn even when nothing can use it
            let bonus = dice == ENTRY_DICE;
            self.end_turn(!bonus);
            debug!("Seat {} rolled {} with no legal move", seat, dice);
            let status = if bonus {
                RollStatus::Success
            } else {
                RollStatus::TurnPassed
            };
            return Ok(RollResult::new(status, dice));
        }

        self.state.last_dice_roll = dice;
        debug!("Seat {} rolled {}", seat, dice);
        Ok(RollResult::new(RollStatus::Success, dice))
    }

    /// Move one of the current seat's tokens by the pending die.
    ///
    /// A rejected move does not consume the die; the caller may pick another
    /// token.
    pub fn move_token(&mut self, token: u8) -> Result<MoveResult, RuleViolation> {
        if self.state.winner.is_some() {
            return Err(RuleViolation::GameEnded);
        }
        if self.state.last_dice_roll == 0 {
            return Err(RuleViolation::NeedToRoll);
        }
        if token as usize >= TOKENS_PER_SEAT {
            return Err(RuleViolation::InvalidToken);
        }

        let seat = self.state.current_player;
        let dice = self.state.last_dice_roll;
        let from = self.state.token_position(seat, token);

        let to = predict_move(from, dice).map_err(|violation| {
            trace!("Seat {} token {} cannot move {}: {}", seat, token, dice, violation);
            violation
        })?;

        self.state.set_token_position(seat, token, to);
        self.history.push(Action::Move { seat, token });

        let game_won = to == POS_HOME && self.state.home_count(seat) == TOKENS_PER_SEAT;
        if game_won {
            self.state.winner = Some(seat);
        }

        let capture = self.capture_at(seat, to);
        let extra_turn = dice == ENTRY_DICE || capture.is_some();

        debug!("Seat {} token {}: {} -> {}", seat, token, from, to);
        if let Some(c) = capture {
            debug!("Seat {} captured seat {} token {}", seat, c.seat, c.token);
        }

        if game_won {
            info!("Seat {} wins on turn {}", seat, self.state.turn_id);
        } else {
            self.end_turn(!extra_turn);
        }

        Ok(MoveResult {
            new_position: to,
            extra_turn,
            game_won,
            capture,
        })
    }

    /// Send an opponent token on `seat`'s destination back to base.
    fn capture_at(&mut self, seat: u8, relative: u8) -> Option<Capture> {
        let target = to_absolute(seat, relative)?;
        if is_safe_tile(target) {
            return None;
        }

        for slot in 0..TOKEN_COUNT {
            let owner = (slot >> 2) as u8;
            if owner == seat {
                continue;
            }
            if to_absolute(owner, self.state.tokens[slot]) == Some(target) {
                self.state.tokens[slot] = POS_BASE;
                return Some(Capture {
                    seat: owner,
                    token: (slot & 3) as u8,
                });
            }
        }

        None
    }

    /// Clear the pending die and, unless the seat keeps the turn, pass it on.
    fn end_turn(&mut self, advance: bool) {
        self.state.last_dice_roll = 0;

        if advance {
            self.state.advance_turn_pointer();
            self.state.consecutive_sixes = 0;
            self.state.turn_id = self.state.turn_id.wrapping_add(1);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
