//! Small self-contained PRNG.
//!
//! Generation only needs a shuffled candidate domain and uniform cell
//! picks, so a tiny xorshift keeps the crate free of a full `rand`
//! dependency and stays WASM-friendly via `getrandom` seeding.

/// xorshift64* generator. Not cryptographic.
pub(crate) struct SmallRng {
    state: u64,
}

impl SmallRng {
    /// Seed from OS entropy, falling back to a process-local counter if
    /// the entropy source is unavailable.
    pub(crate) fn from_entropy() -> Self {
        let mut bytes = [0u8; 8];
        if getrandom::getrandom(&mut bytes).is_err() {
            static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0x9e37);
            let n = COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            bytes = n.to_le_bytes();
        }
        Self::with_seed(u64::from_le_bytes(bytes))
    }

    /// Deterministic seeding for reproducible generation in tests.
    pub(crate) fn with_seed(seed: u64) -> Self {
        // xorshift state must be non-zero.
        Self {
            state: seed | 1,
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }

    /// Uniform-ish value in `0..bound`. `bound` must be non-zero.
    pub(crate) fn below(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }

    /// Fisher-Yates shuffle.
    pub(crate) fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.below(i + 1);
            slice.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sequences_repeat() {
        let mut a = SmallRng::with_seed(7);
        let mut b = SmallRng::with_seed(7);
        for _ in 0..32 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn below_stays_in_bounds() {
        let mut rng = SmallRng::with_seed(42);
        for bound in 1..=16 {
            for _ in 0..64 {
                assert!(rng.below(bound) < bound);
            }
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = SmallRng::with_seed(3);
        let mut values: Vec<u8> = (1..=9).collect();
        rng.shuffle(&mut values);
        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=9).collect::<Vec<u8>>());
    }
}
