//! General-Purpose Register File.
//!
//! This module implements the integer register file of the RV64I core.
//! It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`).
//! 2. **Invariant Enforcement:** Ensures that register `x0` is hardwired to zero.
//! 3. **Observability:** Snapshots of the complete register state.

use super::constants::NUM_REGS;

/// General-purpose register file.
///
/// Register `x0` is hardwired to zero; writes to it are discarded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u64; NUM_REGS],
}

impl RegisterFile {
    /// Creates a register file with all registers set to zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_REGS],
        }
    }

    /// Reads a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Register `x0` always returns 0.
    pub const fn read(&self, idx: usize) -> u64 {
        if idx == 0 { 0 } else { self.regs[idx & 0x1F] }
    }

    /// Writes a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Writes to `x0` are ignored.
    /// * `val` - The 64-bit value to write.
    pub const fn write(&mut self, idx: usize, val: u64) {
        if idx != 0 {
            self.regs[idx & 0x1F] = val;
        }
    }

    /// Returns every register as a signed 64-bit value, `x0` first.
    pub fn snapshot(&self) -> [i64; NUM_REGS] {
        let mut out = [0i64; NUM_REGS];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.read(i) as i64;
        }
        out
    }

    /// Resets every register to zero.
    pub const fn clear(&mut self) {
        self.regs = [0; NUM_REGS];
    }
}
