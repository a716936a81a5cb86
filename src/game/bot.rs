//! Reference Bot
//!
//! Greedy, stateless player: roll, then move the first token that accepts the
//! die. No lookahead. Useful as a driver for soak tests and demos.

use tracing::debug;

use crate::game::board::TOKENS_PER_SEAT;
use crate::game::controller::Game;
use crate::game::dice::DiceRoller;
use crate::game::status::MoveResult;

/// Play one roll for the current seat, and its move if one is possible.
///
/// Returns the move made, if any. A six that keeps the turn does not loop
/// here: the next call simply plays the same seat again.
pub fn play_turn<D: DiceRoller>(game: &mut Game<D>) -> Option<MoveResult> {
    let roll = game.roll_dice().ok()?;
    if !roll.is_success() {
        return None;
    }

    (0..TOKENS_PER_SEAT as u8).find_map(|token| game.move_token(token).ok())
}

/// Drive a match with [`play_turn`] until a seat wins or `max_turns` calls
/// have been made.
///
/// Returns the winning seat, if the budget was enough.
pub fn play_until_won<D: DiceRoller>(game: &mut Game<D>, max_turns: u32) -> Option<u8> {
    for step in 0..max_turns {
        if let Some(winner) = game.winner() {
            debug!("Bot match decided after {} steps", step);
            return Some(winner);
        }
        play_turn(game);
    }
    game.winner()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::{POS_HOME, POS_START, SEAT_COUNT};
    use crate::game::dice::ScriptedDice;
    use crate::game::state::GameState;
    use proptest::prelude::*;

    #[test]
    fn test_bot_turn_advances_game() {
        let mut game = Game::new(4, ScriptedDice::from_rolls([6]));

        let moved = play_turn(&mut game).unwrap();
        assert_eq!(moved.new_position, POS_START);
        assert_eq!(game.state().token_position(0, 0), POS_START);
        assert_eq!(game.current_player(), 0, "six grants another turn");

        game.dice_mut().enqueue([1]);
        play_turn(&mut game);
        assert_eq!(game.state().token_position(0, 0), 2);
        assert_eq!(game.current_player(), 1);
    }

    #[test]
    fn test_bot_skips_blocked_tokens() {
        let mut state = *Game::new(4, ScriptedDice::new()).state();
        state.set_token_position(0, 0, 55); // overshoots with 4
        state.set_token_position(0, 2, 30);
        let mut game = Game::from_state(state, ScriptedDice::from_rolls([4])).unwrap();

        let moved = play_turn(&mut game).unwrap();
        assert_eq!(moved.new_position, 34);
        assert_eq!(game.state().token_position(0, 0), 55);
        assert_eq!(game.state().token_position(0, 2), 34);
    }

    #[test]
    fn test_bot_stops_when_roll_passes() {
        let mut game = Game::new(4, ScriptedDice::from_rolls([3]));
        assert_eq!(play_turn(&mut game), None);
        assert_eq!(game.current_player(), 1);
    }

    #[test]
    fn test_bot_does_nothing_after_win() {
        let mut state = *Game::new(2, ScriptedDice::new()).state();
        state.winner = Some(2);
        let mut game = Game::from_state(state, ScriptedDice::from_rolls([6])).unwrap();

        assert_eq!(play_turn(&mut game), None);
        assert_eq!(game.dice_mut().remaining(), 1, "no roll was drawn");
    }

    #[test]
    fn test_fuzz_seeded_game_does_not_crash() {
        let mut game = Game::with_seed(42, 4);
        let winner = play_until_won(&mut game, 2000);

        if let Some(seat) = winner {
            assert_eq!(game.state().home_count(seat), TOKENS_PER_SEAT);
        }
    }

    fn assert_invariants<D: DiceRoller>(game: &Game<D>) -> Result<(), TestCaseError> {
        let state = game.state();
        prop_assert!(state.tokens.iter().all(|p| *p <= POS_HOME));
        prop_assert!(state.is_seat_active(state.current_player));
        prop_assert!(state.consecutive_sixes < 3);
        for seat in 0..SEAT_COUNT as u8 {
            if !state.is_seat_active(seat) {
                prop_assert_eq!(state.seat_tokens(seat), [0; 4]);
            }
        }
        if let Some(winner) = state.winner {
            prop_assert!(state.is_seat_active(winner));
            prop_assert_eq!(state.home_count(winner), TOKENS_PER_SEAT);
        }
        Ok(())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_soak_keeps_invariants(seed in any::<u64>(), players in 2u8..=4) {
            let mut game = Game::with_seed(seed, players);
            let mut last_turn = game.state().turn_id;

            for _ in 0..3000 {
                if game.is_game_won() {
                    break;
                }
                play_turn(&mut game);
                assert_invariants(&game)?;
                prop_assert!(game.state().turn_id >= last_turn);
                last_turn = game.state().turn_id;
            }

            let bytes = game.state().encode();
            prop_assert_eq!(GameState::decode(&bytes), Ok(*game.state()));
        }
    }
}
