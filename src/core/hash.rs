//! State Hashing
//!
//! SHA-256 digests of session state and input recordings. Two runs that
//! hash equal saw the same world; replays and regression checks compare
//! these instead of walking the state by hand.

use sha2::{Sha256, Digest};
use super::vec2::Vec2;

/// 32-byte SHA-256 digest.
pub type StateHash = [u8; 32];

/// Streaming hasher over the simulation's scalar types.
///
/// Floats go in by bit pattern, so `-0.0` and `0.0` differ and no rounding
/// hides drift. Callers must feed fields in a fixed order.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Start a digest tagged with `domain`.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Digest for a `SessionState`.
    pub fn for_session_state() -> Self {
        Self::new(b"TILECRAFT_STATE_V1")
    }

    /// Digest for an `InputRecording`.
    pub fn for_input_recording() -> Self {
        Self::new(b"TILECRAFT_INPUTS_V1")
    }

    /// Feed one byte.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Feed a u32, little-endian.
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Feed a u64, little-endian.
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Feed an f32 by its bits.
    #[inline]
    pub fn update_f32(&mut self, value: f32) {
        self.update_u32(value.to_bits());
    }

    /// Feed both components of a vector.
    #[inline]
    pub fn update_vec2(&mut self, value: Vec2) {
        self.update_f32(value.x);
        self.update_f32(value.y);
    }

    /// Feed a flag as one byte.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(u8::from(value));
    }

    /// Finish the digest.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Hash a session frame.
///
/// Frame number and seed go in first; `add_state` feeds the rest.
pub fn compute_state_hash<F>(frame: u32, rng_seed: u64, add_state: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_session_state();
    hasher.update_u32(frame);
    hasher.update_u64(rng_seed);
    add_state(&mut hasher);
    hasher.finalize()
}

// =============================================================================
// TESTS
// =============================================================================
