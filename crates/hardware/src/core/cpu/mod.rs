//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, the container for the
//! architectural state of the RV64I machine. It coordinates the following:
//! 1. **State Management:** Registers and the program counter.
//! 2. **Program Storage:** The word-addressed, read-only text region.
//! 3. **Memory Hierarchy:** The data region and the optional data cache in front of it.

/// Single-instruction fetch, decode and execute.
pub mod execution;

/// Load/store routing through the data cache or straight to memory.
pub mod memory;

pub use self::execution::{Retired, Transfer};

use crate::common::RegisterFile;
use crate::common::constants::{INSTRUCTION_SIZE, STACK_START, TEXT_START};
use crate::common::error::SimError;
use crate::core::units::cache::CacheSim;
use crate::isa::abi;
use crate::soc::DataMemory;
use crate::stats::SimStats;

/// Main CPU structure containing all processor state.
#[derive(Debug)]
pub struct Cpu {
    /// General-purpose registers.
    pub regs: RegisterFile,
    /// Program Counter.
    pub pc: u64,
    /// Data region.
    pub memory: DataMemory,
    /// Data cache, present while enabled.
    pub cache: Option<CacheSim>,
    /// Retired-instruction statistics.
    pub stats: SimStats,
    text: Vec<u32>,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Creates a CPU with no program, zeroed memory and no cache.
    pub fn new() -> Self {
        let mut cpu = Self {
            regs: RegisterFile::new(),
            pc: TEXT_START,
            memory: DataMemory::new(),
            cache: None,
            stats: SimStats::default(),
            text: Vec::new(),
        };
        cpu.regs.write(abi::REG_SP, STACK_START);
        cpu
    }

    /// Resets registers, pc, statistics and data memory, and installs a new program.
    ///
    /// An enabled cache keeps its configuration but is rebuilt empty, so no
    /// stale lines from the previous program survive.
    ///
    /// # Errors
    ///
    /// `SimError::MemoryBounds` if `data` does not fit in the data region.
    pub fn load_program(&mut self, text: &[u32], data: &[u8]) -> Result<(), SimError> {
        self.regs.clear();
        self.regs.write(abi::REG_SP, STACK_START);
        self.pc = TEXT_START;
        self.stats = SimStats::default();
        self.memory.load_image(data)?;
        self.text = text.to_vec();
        if let Some(cache) = self.cache.as_mut() {
            let config = *cache.config();
            // Config was validated when the cache was first enabled.
            if let Ok(fresh) = CacheSim::new(&config) {
                *cache = fresh;
            }
        }
        Ok(())
    }

    /// Fetches the word at `pc`.
    ///
    /// Returns `Ok(None)` when `pc` is past the loaded program.
    ///
    /// # Errors
    ///
    /// `SimError::MisalignedFetch` if `pc` is not word aligned.
    pub fn fetch(&self, pc: u64) -> Result<Option<u32>, SimError> {
        if pc % INSTRUCTION_SIZE != 0 {
            return Err(SimError::MisalignedFetch(pc));
        }
        let Some(offset) = pc.checked_sub(TEXT_START) else {
            return Ok(None);
        };
        let index = (offset / INSTRUCTION_SIZE) as usize;
        Ok(self.text.get(index).copied())
    }
}
