//! Random Replacement Policy.
//!
//! Ignores line metadata and draws a way from a xorshift64 generator. The seed
//! is fixed, so two runs over the same trace evict the same lines.

use super::{LineMeta, ReplacementPolicy};

const SEED: u64 = 123_456_789;

/// Random policy state.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    state: u64,
}

impl RandomPolicy {
    /// Creates a generator at the fixed seed.
    pub const fn new() -> Self {
        Self { state: SEED }
    }

    const fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplacementPolicy for RandomPolicy {
    fn victim(&mut self, set: &[LineMeta]) -> usize {
        (self.next() % set.len().max(1) as u64) as usize
    }
}
