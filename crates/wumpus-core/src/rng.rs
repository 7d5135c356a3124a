/// Deterministic RNG helpers.
///
/// Small and dependency-free so that worlds can be regenerated from a seed. Not cryptographic.

pub trait DeterministicRng {
    fn next_u64(&mut self) -> u64;

    /// Uniform in `[0, 1)` with 53 bits of precision.
    fn next_f64_unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `0..bound`. `bound` must be non-zero.
    fn next_below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        ((self.next_u64() as u128 * bound as u128) >> 64) as usize
    }
}

/// SplitMix64: good seeding RNG and small deterministic generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn step(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        mix64(self.state)
    }
}

impl DeterministicRng for SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.step()
    }
}

pub fn mix64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}

/// Independent sub-stream seed (map layout, relocation moves, ...).
pub fn derive_seed(global_seed: u64, stream: u64) -> u64 {
    mix64(global_seed ^ mix64(stream.wrapping_add(0x9E3779B97F4A7C15)))
}
