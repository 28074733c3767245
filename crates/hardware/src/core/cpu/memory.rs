//! Memory Access Helpers.
//!
//! This module provides the interface between the CPU and the data side of
//! the machine. It performs the following:
//! 1. **Bounds Checking:** Rejects accesses that leave the data region before any state changes.
//! 2. **Cache Routing:** Sends loads and stores through the data cache when it is enabled.
//! 3. **Inspection:** Side-effect-free reads that reflect un-flushed cache contents.
//! 4. **Cache Control:** Enabling, disabling and invalidating the cache while keeping memory coherent.

use super::Cpu;
use crate::common::data::{AccessType, MemWidth};
use crate::common::error::{CacheConfigError, SimError};
use crate::config::CacheConfig;
use crate::core::units::cache::CacheSim;

impl Cpu {
    /// Loads `width` bytes at `addr`, zero-extended to 64 bits.
    ///
    /// # Errors
    ///
    /// `SimError::MemoryBounds` if the access leaves the data region.
    pub fn load(&mut self, addr: u64, width: MemWidth) -> Result<u64, SimError> {
        let len = width.bytes();
        self.memory.check(addr, len, AccessType::Read)?;
        match self.cache.as_mut() {
            Some(cache) => cache.read(&mut self.memory, addr, len),
            None => self.memory.read_le(addr, len),
        }
    }

    /// Stores the low `width` bytes of `val` at `addr`.
    ///
    /// # Errors
    ///
    /// `SimError::MemoryBounds` if the access leaves the data region.
    pub fn store(&mut self, addr: u64, width: MemWidth, val: u64) -> Result<(), SimError> {
        let len = width.bytes();
        self.memory.check(addr, len, AccessType::Write)?;
        match self.cache.as_mut() {
            Some(cache) => cache.write(&mut self.memory, addr, len, val),
            None => self.memory.write_le(addr, len, val),
        }
    }

    /// Reads `len` bytes as the program currently sees them.
    ///
    /// Dirty cache lines take precedence over memory. Counters and
    /// replacement state are not touched.
    ///
    /// # Errors
    ///
    /// `SimError::MemoryBounds` if the range leaves the data region.
    pub fn inspect(&self, addr: u64, len: usize) -> Result<Vec<u8>, SimError> {
        match self.cache.as_ref() {
            Some(cache) => cache.peek(&self.memory, addr, len),
            None => Ok(self.memory.read_bytes(addr, len)?.to_vec()),
        }
    }

    /// Enables the data cache with `config`, replacing any existing cache.
    ///
    /// A previously enabled cache is flushed first.
    ///
    /// # Errors
    ///
    /// `CacheConfigError` if `config` is invalid. The old cache stays in place.
    pub fn enable_cache(&mut self, config: &CacheConfig) -> Result<(), CacheConfigError> {
        let fresh = CacheSim::new(config)?;
        self.flush_cache();
        self.cache = Some(fresh);
        tracing::debug!(%config, "data cache enabled");
        Ok(())
    }

    /// Flushes dirty lines to memory and removes the cache.
    ///
    /// Returns the removed cache, if one was enabled.
    pub fn disable_cache(&mut self) -> Option<CacheSim> {
        self.flush_cache();
        let old = self.cache.take();
        if old.is_some() {
            tracing::debug!("data cache disabled");
        }
        old
    }

    /// Writes back dirty lines and invalidates the whole cache.
    ///
    /// # Errors
    ///
    /// Propagates memory errors from the writebacks.
    pub fn invalidate_cache(&mut self) -> Result<(), SimError> {
        match self.cache.as_mut() {
            Some(cache) => cache.invalidate(&mut self.memory),
            None => Ok(()),
        }
    }

    fn flush_cache(&mut self) {
        if let Some(cache) = self.cache.as_mut()
            && let Err(err) = cache.flush(&mut self.memory)
        {
            tracing::warn!(%err, "cache flush failed");
        }
    }
}
