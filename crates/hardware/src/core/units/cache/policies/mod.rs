//! Cache Replacement Policies.
//!
//! Every line carries a `LineMeta` stamped from a single cache clock. A policy
//! only ranks the lines of a full set; the cache itself prefers an invalid way
//! before consulting one.
//!
//! # Policies
//!
//! - `Fifo`: First-In, First-Out (oldest load time).
//! - `Lfu`: Least Frequently Used, ties broken by older last access.
//! - `Lru`: Least Recently Used (oldest last access).
//! - `Random`: Pseudo-random selection.

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Frequently Used replacement policy.
pub mod lfu;

/// Least Recently Used replacement policy.
pub mod lru;

/// Random replacement policy.
pub mod random;

use std::fmt::Debug;

pub use fifo::FifoPolicy;
pub use lfu::LfuPolicy;
pub use lru::LruPolicy;
pub use random::RandomPolicy;

use crate::config::ReplacementPolicy as PolicyType;

/// Replacement bookkeeping for one cache line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineMeta {
    /// Clock value of the most recent hit or fill.
    pub last_access: u64,
    /// Clock value of the fill that brought the current block in.
    pub load_time: u64,
    /// Hits since the fill, plus one for the fill itself.
    pub frequency: u64,
}

impl LineMeta {
    /// Records a hit at clock `now`.
    pub const fn touch(&mut self, now: u64) {
        self.last_access = now;
        self.frequency += 1;
    }

    /// Records a fill at clock `now`.
    pub const fn load(&mut self, now: u64) {
        self.last_access = now;
        self.load_time = now;
        self.frequency = 1;
    }
}

/// Trait for cache replacement policies.
pub trait ReplacementPolicy: Debug + Send + Sync {
    /// Selects the way to evict from a full set.
    ///
    /// `set` holds the metadata of every way, way 0 first.
    fn victim(&mut self, set: &[LineMeta]) -> usize;
}

/// Way with the smallest key. Ties go to the lowest way.
fn min_way<K: Ord>(set: &[LineMeta], key: impl Fn(&LineMeta) -> K) -> usize {
    set.iter()
        .enumerate()
        .min_by_key(|(_, meta)| key(meta))
        .map_or(0, |(way, _)| way)
}

/// Builds the policy selected by `kind`.
pub fn build(kind: PolicyType) -> Box<dyn ReplacementPolicy> {
    match kind {
        PolicyType::Lru => Box::new(LruPolicy),
        PolicyType::Fifo => Box::new(FifoPolicy),
        PolicyType::Lfu => Box::new(LfuPolicy),
        PolicyType::Random => Box::new(RandomPolicy::new()),
    }
}
