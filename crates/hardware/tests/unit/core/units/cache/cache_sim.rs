//! Cache Simulator (CacheSim) Unit Tests.
//!
//! The cache is built directly from a `CacheConfig` in front of a bare
//! `DataMemory`; no CPU is needed.
//!
//! With the (64, 16, 2) geometry used by most tests:
//!   - num_sets   = 64 / (16 * 2) = 2
//!   - set index  = (addr >> 4) & 1
//!   - tag        = addr >> 5
//!
//! so addresses 32 bytes apart share a set.

use pretty_assertions::assert_eq;
use rvlab_core::common::constants::DATA_START;
use rvlab_core::config::{ReplacementPolicy, WritePolicy};
use rvlab_core::core::units::cache::CacheSim;
use rvlab_core::soc::DataMemory;

use crate::common::cache_config;

fn cache(replacement: ReplacementPolicy, write: WritePolicy) -> (CacheSim, DataMemory) {
    let sim = CacheSim::new(&cache_config(64, 16, 2, replacement, write)).unwrap();
    (sim, DataMemory::new())
}

/// Address of the `n`-th distinct block mapping to set 0.
fn set0_block(n: u64) -> u64 {
    DATA_START + n * 32
}

#[test]
fn address_decomposition() {
    let (sim, _) = cache(ReplacementPolicy::Lru, WritePolicy::Wb);
    let addr = DATA_START + 0x35;
    assert_eq!(sim.set_index(addr), 1);
    assert_eq!(sim.tag(addr), addr >> 5);
    assert_eq!(sim.block_address(sim.tag(addr), 1), addr & !0xF);
}

#[test]
fn cold_miss_then_warm_hit() {
    let (mut sim, mut mem) = cache(ReplacementPolicy::Lru, WritePolicy::Wb);
    let _ = sim.read(&mut mem, DATA_START, 4).unwrap();
    let _ = sim.read(&mut mem, DATA_START + 8, 4).unwrap();
    let stats = sim.stats();
    assert_eq!((stats.accesses, stats.hits, stats.misses), (2, 1, 1));
}

#[test]
fn five_stores_to_one_set_all_miss_and_lru_evicts_first() {
    let (mut sim, mut mem) = cache(ReplacementPolicy::Lru, WritePolicy::Wb);
    for n in 0..5 {
        sim.write(&mut mem, set0_block(n), 4, n + 1).unwrap();
        if n == 2 {
            // The third store evicts the first block.
            assert!(!sim.contains(set0_block(0)));
        }
    }
    let stats = *sim.stats();
    assert_eq!((stats.accesses, stats.hits, stats.misses), (5, 0, 5));

    let _ = sim.read(&mut mem, set0_block(0), 4).unwrap();
    assert_eq!(sim.stats().misses, 6);
}

#[test]
fn dirty_victim_is_written_back_byte_exact() {
    let (mut sim, mut mem) = cache(ReplacementPolicy::Lru, WritePolicy::Wb);
    let base = set0_block(0);
    sim.write(&mut mem, base, 8, 0x1122_3344_5566_7788).unwrap();
    sim.write(&mut mem, base + 8, 2, 0xBEEF).unwrap();

    assert_eq!(mem.read_bytes(base, 16).unwrap(), &[0u8; 16]);

    let _ = sim.read(&mut mem, set0_block(1), 1).unwrap();
    let _ = sim.read(&mut mem, set0_block(2), 1).unwrap();

    let mut expected = vec![0x88, 0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11, 0xEF, 0xBE];
    expected.resize(16, 0);
    assert_eq!(mem.read_bytes(base, 16).unwrap(), expected.as_slice());
    assert_eq!(sim.stats().writebacks, 1);
    assert_eq!(sim.stats().evictions, 1);
}

#[test]
fn clean_victim_is_not_written_back() {
    let (mut sim, mut mem) = cache(ReplacementPolicy::Lru, WritePolicy::Wb);
    for n in 0..3 {
        let _ = sim.read(&mut mem, set0_block(n), 8).unwrap();
    }
    assert_eq!(sim.stats().evictions, 1);
    assert_eq!(sim.stats().writebacks, 0);
}

#[test]
fn write_back_read_returns_cached_value() {
    let (mut sim, mut mem) = cache(ReplacementPolicy::Lru, WritePolicy::Wb);
    sim.write(&mut mem, DATA_START + 4, 4, 0xCAFE_BABE).unwrap();
    assert_eq!(sim.read(&mut mem, DATA_START + 4, 4).unwrap(), 0xCAFE_BABE);
    assert_eq!(mem.read_le(DATA_START + 4, 4).unwrap(), 0);
}

#[test]
fn write_through_updates_memory_once_and_stays_clean() {
    let (mut sim, mut mem) = cache(ReplacementPolicy::Lru, WritePolicy::Wt);
    sim.write(&mut mem, DATA_START, 4, 0xDEAD_BEEF).unwrap();
    assert_eq!(mem.read_le(DATA_START, 4).unwrap(), 0xDEAD_BEEF);
    assert_eq!(sim.stats().write_throughs, 1);

    let lines = sim.dump();
    assert_eq!(lines.len(), 1);
    assert!(!lines[0].dirty);

    for n in 1..3 {
        let _ = sim.read(&mut mem, set0_block(n), 1).unwrap();
    }
    assert_eq!(sim.stats().writebacks, 0);
}

#[test]
fn straddling_access_is_split_per_block() {
    let (mut sim, mut mem) = cache(ReplacementPolicy::Lru, WritePolicy::Wb);
    let addr = DATA_START + 12;
    sim.write(&mut mem, addr, 8, 0x0102_0304_0506_0708).unwrap();
    assert_eq!(sim.stats().accesses, 2);
    assert_eq!(sim.stats().misses, 2);

    assert_eq!(sim.read(&mut mem, addr, 8).unwrap(), 0x0102_0304_0506_0708);
    assert_eq!(sim.stats().hits, 2);
}

#[test]
fn write_through_straddle_mirrors_each_segment_once() {
    let (mut sim, mut mem) = cache(ReplacementPolicy::Lru, WritePolicy::Wt);
    let addr = DATA_START + 14;
    sim.write(&mut mem, addr, 4, 0xAABB_CCDD).unwrap();
    assert_eq!(sim.stats().write_throughs, 2);
    assert_eq!(mem.read_le(addr, 4).unwrap(), 0xAABB_CCDD);
}

#[test]
fn peek_sees_dirty_data_without_touching_counters() {
    let (mut sim, mut mem) = cache(ReplacementPolicy::Lru, WritePolicy::Wb);
    sim.write(&mut mem, DATA_START, 2, 0x1234).unwrap();
    let before = *sim.stats();
    assert_eq!(sim.peek(&mem, DATA_START, 3).unwrap(), vec![0x34, 0x12, 0]);
    assert_eq!(*sim.stats(), before);
}

#[test]
fn flush_cleans_lines_but_keeps_them_valid() {
    let (mut sim, mut mem) = cache(ReplacementPolicy::Lru, WritePolicy::Wb);
    sim.write(&mut mem, DATA_START, 1, 0x5A).unwrap();
    sim.flush(&mut mem).unwrap();
    assert_eq!(mem.read_le(DATA_START, 1).unwrap(), 0x5A);
    assert!(sim.contains(DATA_START));
    assert!(!sim.dump()[0].dirty);
}

#[test]
fn invalidate_writes_back_then_empties() {
    let (mut sim, mut mem) = cache(ReplacementPolicy::Lru, WritePolicy::Wb);
    sim.write(&mut mem, DATA_START, 1, 0x5A).unwrap();
    sim.invalidate(&mut mem).unwrap();
    assert_eq!(mem.read_le(DATA_START, 1).unwrap(), 0x5A);
    assert!(!sim.contains(DATA_START));
    assert!(sim.dump().is_empty());
}

#[test]
fn dump_reconstructs_block_addresses() {
    let (mut sim, mut mem) = cache(ReplacementPolicy::Lru, WritePolicy::Wb);
    let _ = sim.read(&mut mem, DATA_START + 0x13, 1).unwrap();
    let lines = sim.dump();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].set, 1);
    assert_eq!(lines[0].address, DATA_START + 0x10);
    assert_eq!(lines[0].data.len(), 16);
}

#[test]
fn fifo_evicts_oldest_fill_despite_hits() {
    let (mut sim, mut mem) = cache(ReplacementPolicy::Fifo, WritePolicy::Wb);
    let _ = sim.read(&mut mem, set0_block(0), 1).unwrap();
    let _ = sim.read(&mut mem, set0_block(1), 1).unwrap();
    let _ = sim.read(&mut mem, set0_block(0), 1).unwrap();
    let _ = sim.read(&mut mem, set0_block(2), 1).unwrap();
    assert!(!sim.contains(set0_block(0)));
    assert!(sim.contains(set0_block(1)));
}

#[test]
fn lfu_keeps_frequently_used_block() {
    let (mut sim, mut mem) = cache(ReplacementPolicy::Lfu, WritePolicy::Wb);
    let _ = sim.read(&mut mem, set0_block(0), 1).unwrap();
    let _ = sim.read(&mut mem, set0_block(1), 1).unwrap();
    for _ in 0..3 {
        let _ = sim.read(&mut mem, set0_block(0), 1).unwrap();
    }
    let _ = sim.read(&mut mem, set0_block(2), 1).unwrap();
    assert!(sim.contains(set0_block(0)));
    assert!(!sim.contains(set0_block(1)));
}

#[test]
fn lfu_equal_counts_evict_older_access() {
    let (mut sim, mut mem) = cache(ReplacementPolicy::Lfu, WritePolicy::Wb);
    for n in [0, 1, 1, 0] {
        let _ = sim.read(&mut mem, set0_block(n), 1).unwrap();
    }
    let _ = sim.read(&mut mem, set0_block(2), 1).unwrap();
    assert!(sim.contains(set0_block(0)));
    assert!(!sim.contains(set0_block(1)));
}

#[test]
fn lru_hit_refreshes_line_across_sets() {
    let (mut sim, mut mem) = cache(ReplacementPolicy::Lru, WritePolicy::Wb);
    let _ = sim.read(&mut mem, set0_block(0), 1).unwrap();
    let _ = sim.read(&mut mem, set0_block(1), 1).unwrap();
    let _ = sim.read(&mut mem, DATA_START + 0x10, 1).unwrap();
    let _ = sim.read(&mut mem, set0_block(0), 1).unwrap();
    let _ = sim.read(&mut mem, set0_block(2), 1).unwrap();
    assert!(sim.contains(set0_block(0)));
    assert!(!sim.contains(set0_block(1)));
    assert!(sim.contains(DATA_START + 0x10));
}

#[test]
fn random_fills_invalid_ways_first() {
    let (mut sim, mut mem) = cache(ReplacementPolicy::Random, WritePolicy::Wb);
    let _ = sim.read(&mut mem, set0_block(0), 1).unwrap();
    let _ = sim.read(&mut mem, set0_block(1), 1).unwrap();
    assert!(sim.contains(set0_block(0)));
    assert!(sim.contains(set0_block(1)));
    assert_eq!(sim.stats().evictions, 0);
}

#[test]
fn counters_stay_consistent() {
    let (mut sim, mut mem) = cache(ReplacementPolicy::Random, WritePolicy::Wt);
    for i in 0..200u64 {
        let addr = DATA_START + (i * 37) % 512;
        if i % 3 == 0 {
            sim.write(&mut mem, addr, 4, i).unwrap();
        } else {
            let _ = sim.read(&mut mem, addr, 8).unwrap();
        }
    }
    let stats = sim.stats();
    assert_eq!(stats.accesses, stats.hits + stats.misses);
}
