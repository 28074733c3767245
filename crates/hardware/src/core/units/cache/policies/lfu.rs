//! Least Frequently Used (LFU) Replacement Policy.
//!
//! The victim is the line with the smallest access count. Among equal counts
//! the line with the older last access goes first. Counts restart at 1 on
//! every fill, so a newly loaded block is the natural next victim unless it
//! is hit again.

use super::{LineMeta, ReplacementPolicy, min_way};

/// LFU policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct LfuPolicy;

impl ReplacementPolicy for LfuPolicy {
    fn victim(&mut self, set: &[LineMeta]) -> usize {
        min_way(set, |meta| (meta.frequency, meta.last_access))
    }
}
