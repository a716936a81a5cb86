//! Dice
//!
//! The controller never owns a hidden RNG: a [`DiceRoller`] is injected at
//! construction, so a match is fully determined by its sequence of rolls.

use std::collections::VecDeque;

use crate::core::rng::DeterministicRng;

/// Source of die values.
pub trait DiceRoller {
    /// Produce a die value in 1..=6.
    fn roll(&mut self) -> u8;
}

impl<D: DiceRoller + ?Sized> DiceRoller for &mut D {
    fn roll(&mut self) -> u8 {
        (**self).roll()
    }
}

impl<D: DiceRoller + ?Sized> DiceRoller for Box<D> {
    fn roll(&mut self) -> u8 {
        (**self).roll()
    }
}

// =============================================================================
// SEEDED DICE
// =============================================================================

/// Reproducible dice driven by [`DeterministicRng`].
#[derive(Clone, Debug)]
pub struct SeededDice {
    rng: DeterministicRng,
}

impl SeededDice {
    /// Create dice from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: DeterministicRng::new(seed),
        }
    }
}

impl DiceRoller for SeededDice {
    #[inline]
    fn roll(&mut self) -> u8 {
        self.rng.next_int_range(1, 6) as u8
    }
}

// =============================================================================
// SCRIPTED DICE
// =============================================================================

/// Replays a queue of rolls, then keeps returning a fallback value.
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    queue: VecDeque<u8>,
    fallback: u8,
}

impl Default for ScriptedDice {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedDice {
    /// Value returned once the script runs dry.
    pub const DEFAULT_FALLBACK: u8 = 1;

    /// Create an empty script.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            fallback: Self::DEFAULT_FALLBACK,
        }
    }

    /// Create a script pre-loaded with `rolls`.
    pub fn from_rolls(rolls: impl IntoIterator<Item = u8>) -> Self {
        let mut dice = Self::new();
        dice.enqueue(rolls);
        dice
    }

    /// Append rolls to the script.
    ///
    /// # Panics
    ///
    /// Panics if a value is outside 1..=6.
    pub fn enqueue(&mut self, rolls: impl IntoIterator<Item = u8>) {
        for roll in rolls {
            assert!((1..=6).contains(&roll), "scripted die value {} is not 1..=6", roll);
            self.queue.push_back(roll);
        }
    }

    /// Drop every scripted roll.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Rolls left before the fallback kicks in.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl DiceRoller for ScriptedDice {
    fn roll(&mut self) -> u8 {
        self.queue.pop_front().unwrap_or(self.fallback)
    }
}

// =============================================================================
// TESTS
// =============================================================================
