//! Least Recently Used (LRU) Replacement Policy.
//!
//! Evicts the line whose last hit or fill is oldest on the cache clock.

use super::{LineMeta, ReplacementPolicy, min_way};

/// LRU policy. Stateless; recency lives in each line's `last_access`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    fn victim(&mut self, set: &[LineMeta]) -> usize {
        min_way(set, |meta| meta.last_access)
    }
}
