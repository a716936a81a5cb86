//! # Ludos Rules Engine
//!
//! Deterministic rules engine for four-seat Ludo.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      LUDOS ENGINE                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Deterministic primitives                 │
//! │  ├── rng.rs       - Xorshift128+ PRNG                        │
//! │  └── hash.rs      - State hashing for verification           │
//! │                                                              │
//! │  game/            - Rules (deterministic)                    │
//! │  ├── status.rs    - Outcomes and rule violations             │
//! │  ├── board.rs     - Track topology                           │
//! │  ├── state.rs     - Packed state, 28-byte wire codec         │
//! │  ├── dice.rs      - Seeded and scripted dice                 │
//! │  ├── controller.rs- Turn state machine                       │
//! │  ├── command.rs   - Seat-checked commands                    │
//! │  ├── bot.rs       - Greedy reference player                  │
//! │  ├── history.rs   - Action log and replay                    │
//! │  └── config.rs    - Match settings                           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The engine has no hidden randomness, no clock and no I/O. Given the same
//! dice sequence it produces the same state on every platform, which is what
//! lets a match be replayed from its history and checked by hash.
//!
//! ## Concurrency
//!
//! Operations are synchronous and take `&mut self`. The engine does no
//! locking; whoever hosts a match must serialize access to it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::rng::DeterministicRng;
pub use game::controller::Game;
pub use game::dice::{DiceRoller, ScriptedDice, SeededDice};
pub use game::state::{GameState, STATE_SIZE};
pub use game::status::{MoveResult, RollResult, RollStatus, RuleViolation};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
