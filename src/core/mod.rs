//! Core deterministic primitives.
//!
//! Nothing in here knows about Ludo. The game layer builds its dice and its
//! state integrity checks on top of these.

pub mod rng;
pub mod hash;

// Re-export core types
pub use rng::DeterministicRng;
pub use hash::{hash_with_domain, StateHash, StateHasher, GAME_STATE_DOMAIN};
