//! Randomness for both games.

use std::sync::atomic::{AtomicU64, Ordering};

// Used only when the platform has no entropy source.
static FALLBACK_SEED: AtomicU64 = AtomicU64::new(0x9E37_79B9_7F4A_7C15);

fn entropy_seed() -> u64 {
    let mut bytes = [0u8; 8];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => u64::from_le_bytes(bytes),
        Err(_) => FALLBACK_SEED.fetch_add(0x9E37_79B9_7F4A_7C15, Ordering::Relaxed),
    }
}

/// Seedable generator for shuffles and grid layout.
///
/// Games built with the same seed replay the same tray order and the same
/// word grid, which the tests rely on. Not suitable for anything secret.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleRng {
    pub fn new() -> Self {
        Self::with_seed(entropy_seed())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    /// Advance the 64-bit LCG state and return a 32-bit output with an
    /// xorshift and a state-dependent rotation (PCG XSH-RR).
    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let xorshifted = (((self.state >> 18) ^ self.state) >> 27) as u32;
        xorshifted.rotate_right((self.state >> 59) as u32)
    }

    /// Index in `0..bound`, with a slight modulo bias. Panics in debug
    /// builds when `bound` is zero.
    pub fn below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        self.next_u32() as usize % bound
    }

    /// In-place shuffle; every permutation is (nearly) equally likely.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            slice.swap(i, self.below(i + 1));
        }
    }

    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            None
        } else {
            Some(&slice[self.below(slice.len())])
        }
    }
}
