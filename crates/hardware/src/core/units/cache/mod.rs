//! Set-Associative Data Cache Simulator.
//!
//! This module implements a configurable set-associative cache placed in front
//! of the data region. Unlike a timing model, every line holds a real copy of
//! its block, so the cache is functionally visible: loads are served from line
//! data, and under write-back memory only changes when a dirty line is evicted
//! or flushed.
//!
//! Accesses that straddle a block boundary are split into per-block segments.
//! Each segment is one lookup and counts exactly once as a hit or a miss.

/// Cache replacement policy implementations (FIFO, LFU, LRU, Random).
pub mod policies;

use serde::Serialize;

use self::policies::{LineMeta, ReplacementPolicy};
use crate::common::error::{CacheConfigError, SimError};
use crate::config::{CacheConfig, WritePolicy};
use crate::soc::DataMemory;
use crate::stats::CacheStats;

/// Cache line entry: tag, state bits, replacement metadata and the cached block.
#[derive(Clone, Debug, Default)]
struct CacheLine {
    tag: u64,
    valid: bool,
    dirty: bool,
    meta: LineMeta,
    data: Vec<u8>,
}

/// Snapshot of one valid line, for inspection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LineSnapshot {
    /// Set index.
    pub set: usize,
    /// Way within the set.
    pub way: usize,
    /// Stored tag.
    pub tag: u64,
    /// Whether the line differs from memory.
    pub dirty: bool,
    /// Block address reconstructed from tag and set.
    pub address: u64,
    /// Cached bytes.
    pub data: Vec<u8>,
}

/// Cache simulator implementing a set-associative cache with configurable policies.
#[derive(Debug)]
pub struct CacheSim {
    config: CacheConfig,
    lines: Vec<CacheLine>,
    num_sets: usize,
    ways: usize,
    block_size: usize,
    offset_bits: u32,
    index_bits: u32,
    policy: Box<dyn ReplacementPolicy>,
    /// Advances once per block lookup; stamps `LineMeta`.
    clock: u64,
    stats: CacheStats,
}

impl CacheSim {
    /// Creates an empty (all lines invalid) cache.
    ///
    /// # Errors
    ///
    /// Returns the validation error if `config` violates the geometry invariants.
    pub fn new(config: &CacheConfig) -> Result<Self, CacheConfigError> {
        config.validate()?;

        let num_sets = config.num_sets() as usize;
        let ways = config.associativity as usize;
        let block_size = config.block_size as usize;
        let line = CacheLine {
            data: vec![0; block_size],
            ..CacheLine::default()
        };

        Ok(Self {
            config: *config,
            lines: vec![line; num_sets * ways],
            num_sets,
            ways,
            block_size,
            offset_bits: block_size.trailing_zeros(),
            index_bits: num_sets.trailing_zeros(),
            policy: policies::build(config.replacement_policy),
            clock: 0,
            stats: CacheStats::default(),
        })
    }

    /// The configuration this cache was built from.
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Access counters.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Set index of `addr`.
    pub const fn set_index(&self, addr: u64) -> usize {
        ((addr >> self.offset_bits) as usize) & (self.num_sets - 1)
    }

    /// Tag of `addr`.
    pub const fn tag(&self, addr: u64) -> u64 {
        addr >> (self.offset_bits + self.index_bits)
    }

    /// Rebuilds a block address from a tag and set index.
    pub const fn block_address(&self, tag: u64, set: usize) -> u64 {
        (tag << (self.offset_bits + self.index_bits)) | ((set as u64) << self.offset_bits)
    }

    /// Whether the block holding `addr` is resident. Does not touch counters.
    pub fn contains(&self, addr: u64) -> bool {
        self.find(addr).is_some()
    }

    fn find(&self, addr: u64) -> Option<usize> {
        let base = self.set_index(addr) * self.ways;
        let tag = self.tag(addr);
        (base..base + self.ways).find(|&idx| self.lines[idx].valid && self.lines[idx].tag == tag)
    }

    /// Reads `len` bytes at `addr` through the cache, little-endian, zero-extended.
    ///
    /// The caller has already checked that the range lies in the data region.
    ///
    /// # Errors
    ///
    /// Propagates memory errors from block fills or dirty writebacks.
    pub fn read(&mut self, mem: &mut DataMemory, addr: u64, len: usize) -> Result<u64, SimError> {
        let mut bytes = [0u8; 8];
        let mut filled = 0;
        for (seg_addr, seg_len) in self.segments(addr, len.min(8)) {
            let idx = self.access_block(mem, seg_addr)?;
            let offset = self.block_offset(seg_addr);
            bytes[filled..filled + seg_len]
                .copy_from_slice(&self.lines[idx].data[offset..offset + seg_len]);
            filled += seg_len;
        }
        Ok(u64::from_le_bytes(bytes))
    }

    /// Writes the low `len` bytes of `val` at `addr` through the cache.
    ///
    /// Misses allocate the block under both write policies. Write-back marks the
    /// line dirty; write-through mirrors each segment to memory once.
    ///
    /// # Errors
    ///
    /// Propagates memory errors from block fills, writebacks or write-through.
    pub fn write(
        &mut self,
        mem: &mut DataMemory,
        addr: u64,
        len: usize,
        val: u64,
    ) -> Result<(), SimError> {
        let bytes = val.to_le_bytes();
        let mut consumed = 0;
        for (seg_addr, seg_len) in self.segments(addr, len.min(8)) {
            let idx = self.access_block(mem, seg_addr)?;
            let offset = self.block_offset(seg_addr);
            let src = &bytes[consumed..consumed + seg_len];
            self.lines[idx].data[offset..offset + seg_len].copy_from_slice(src);
            match self.config.write_policy {
                WritePolicy::Wb => self.lines[idx].dirty = true,
                WritePolicy::Wt => {
                    mem.write_bytes(seg_addr, src)?;
                    self.stats.write_throughs += 1;
                }
            }
            consumed += seg_len;
        }
        Ok(())
    }

    /// Reads `len` bytes as the program would currently see them, without
    /// touching counters or replacement state.
    ///
    /// # Errors
    ///
    /// `SimError::MemoryBounds` if the range leaves the data region.
    pub fn peek(&self, mem: &DataMemory, addr: u64, len: usize) -> Result<Vec<u8>, SimError> {
        let mut out = mem.read_bytes(addr, len)?.to_vec();
        for (seg_addr, seg_len) in self.segments(addr, len) {
            if let Some(idx) = self.find(seg_addr) {
                let offset = self.block_offset(seg_addr);
                let start = (seg_addr - addr) as usize;
                out[start..start + seg_len]
                    .copy_from_slice(&self.lines[idx].data[offset..offset + seg_len]);
            }
        }
        Ok(out)
    }

    /// Writes every dirty line back to memory. Lines stay valid and become clean.
    ///
    /// # Errors
    ///
    /// Propagates memory errors from the writebacks.
    pub fn flush(&mut self, mem: &mut DataMemory) -> Result<(), SimError> {
        for idx in 0..self.lines.len() {
            if self.lines[idx].valid && self.lines[idx].dirty {
                self.write_back(mem, idx)?;
            }
        }
        Ok(())
    }

    /// Flushes dirty lines, then invalidates every line.
    ///
    /// # Errors
    ///
    /// Propagates memory errors from the writebacks.
    pub fn invalidate(&mut self, mem: &mut DataMemory) -> Result<(), SimError> {
        self.flush(mem)?;
        for line in &mut self.lines {
            line.valid = false;
        }
        tracing::debug!("cache invalidated");
        Ok(())
    }

    /// Snapshots every valid line in set/way order.
    pub fn dump(&self) -> Vec<LineSnapshot> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.valid)
            .map(|(idx, line)| {
                let set = idx / self.ways;
                LineSnapshot {
                    set,
                    way: idx % self.ways,
                    tag: line.tag,
                    dirty: line.dirty,
                    address: self.block_address(line.tag, set),
                    data: line.data.clone(),
                }
            })
            .collect()
    }

    const fn block_offset(&self, addr: u64) -> usize {
        (addr as usize) & (self.block_size - 1)
    }

    /// Splits `[addr, addr + len)` at block boundaries.
    fn segments(&self, addr: u64, len: usize) -> Vec<(u64, usize)> {
        let block = self.block_size as u64;
        let end = addr + len as u64;
        let mut out = Vec::with_capacity(2);
        let mut cur = addr;
        while cur < end {
            let block_end = (cur & !(block - 1)) + block;
            let seg_end = end.min(block_end);
            out.push((cur, (seg_end - cur) as usize));
            cur = seg_end;
        }
        out
    }

    /// Looks up the block holding `addr`, filling it on a miss. Returns the line index.
    fn access_block(&mut self, mem: &mut DataMemory, addr: u64) -> Result<usize, SimError> {
        self.stats.accesses += 1;
        self.clock += 1;
        let set = self.set_index(addr);

        if let Some(idx) = self.find(addr) {
            self.stats.hits += 1;
            self.lines[idx].meta.touch(self.clock);
            return Ok(idx);
        }

        self.stats.misses += 1;
        let way = self.pick_way(set);
        let idx = set * self.ways + way;

        if self.lines[idx].valid {
            self.stats.evictions += 1;
            tracing::trace!(
                set,
                way,
                victim = format_args!("{:#x}", self.block_address(self.lines[idx].tag, set)),
                dirty = self.lines[idx].dirty,
                "evict"
            );
            if self.lines[idx].dirty {
                self.write_back(mem, idx)?;
            }
        }

        let block_addr = addr & !(self.block_size as u64 - 1);
        let block = mem.read_bytes(block_addr, self.block_size)?;
        let tag = self.tag(addr);
        let line = &mut self.lines[idx];
        line.data.copy_from_slice(block);
        line.tag = tag;
        line.valid = true;
        line.dirty = false;
        line.meta.load(self.clock);
        tracing::trace!(set, way, block = format_args!("{block_addr:#x}"), "fill");

        Ok(idx)
    }

    /// First invalid way of `set`, else the policy's victim.
    fn pick_way(&mut self, set: usize) -> usize {
        let lines = &self.lines[set * self.ways..(set + 1) * self.ways];
        if let Some(way) = lines.iter().position(|line| !line.valid) {
            return way;
        }
        let metas: Vec<LineMeta> = lines.iter().map(|line| line.meta).collect();
        self.policy.victim(&metas) % self.ways
    }

    fn write_back(&mut self, mem: &mut DataMemory, idx: usize) -> Result<(), SimError> {
        let set = idx / self.ways;
        let addr = self.block_address(self.lines[idx].tag, set);
        mem.write_bytes(addr, &self.lines[idx].data)?;
        self.lines[idx].dirty = false;
        self.stats.writebacks += 1;
        Ok(())
    }
}
