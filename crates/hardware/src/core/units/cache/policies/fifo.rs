//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! Evicts the line that was filled earliest. Hits move `last_access` but not
//! `load_time`, so they never change the order.

use super::{LineMeta, ReplacementPolicy, min_way};

/// FIFO policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct FifoPolicy;

impl ReplacementPolicy for FifoPolicy {
    fn victim(&mut self, set: &[LineMeta]) -> usize {
        min_way(set, |meta| meta.load_time)
    }
}
