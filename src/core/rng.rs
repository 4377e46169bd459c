//! Seeded Randomness
//!
//! Xorshift128+ behind a small API shaped for the simulation: integer rolls
//! for tree trunks, unit floats for drop tosses, and chance rolls for
//! terrain decoration. The full state is two words, so it is hashed and
//! serialized along with the rest of the session.

use serde::{Serialize, Deserialize};

/// Xorshift128+ generator.
///
/// Same seed, same sequence, on every platform.
///
/// ```
/// use tilecraft::core::rng::DeterministicRng;
///
/// let mut world = DeterministicRng::new(7);
/// let mut replay = DeterministicRng::new(7);
/// assert_eq!(world.next_f32(), replay.next_f32());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeterministicRng {
    state: [u64; 2],
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl DeterministicRng {
    /// Expand `seed` into generator state with SplitMix64.
    pub fn new(seed: u64) -> Self {
        let mut mix = SplitMix64(seed);
        let state = [mix.next(), mix.next()];

        // Xorshift never leaves the all-zero state
        if state == [0, 0] {
            return Self { state: [1, 1] };
        }
        Self { state }
    }

    /// Raw 64-bit output.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let [a, b] = self.state;
        let out = a.wrapping_add(b);

        let mixed = a ^ b;
        self.state = [a.rotate_left(24) ^ mixed ^ (mixed << 16), mixed.rotate_left(37)];
        out
    }

    /// Integer in `[min, max]`, both ends inclusive. Returns `min` when the
    /// range is empty.
    pub fn next_int_range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = (max as i64 - min as i64 + 1) as u64;
        (min as i64 + (self.next_u64() % span) as i64) as i32
    }

    /// Float in `[0, 1)`.
    ///
    /// Built from the top 24 bits, so every value is exact in `f32`.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        const SCALE: f32 = 1.0 / (1u32 << 24) as f32;
        (self.next_u64() >> 40) as f32 * SCALE
    }

    /// Float in `[min, max)`. Returns `min` when the range is empty.
    #[inline]
    pub fn next_f32_range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + self.next_f32() * (max - min)
    }

    /// True with the given probability; 0 never fires and 1 always does.
    #[inline]
    pub fn next_chance(&mut self, probability: f32) -> bool {
        self.next_f32() < probability
    }

    /// Generator state, for hashing.
    pub fn state(&self) -> [u64; 2] {
        self.state
    }
}

/// Seed expander.
struct SplitMix64(u64);

impl SplitMix64 {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

// =============================================================================
// TESTS
// =============================================================================
