//! Core deterministic primitives.
//!
//! Seeded randomness, pixel-space vectors and state hashing. Everything the
//! simulation draws from chance goes through `DeterministicRng`.

pub mod vec2;
pub mod rng;
pub mod hash;

// Re-export core types
pub use vec2::Vec2;
pub use rng::DeterministicRng;
pub use hash::{compute_state_hash, StateHash, StateHasher};
