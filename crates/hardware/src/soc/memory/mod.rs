//! Data Region Memory.
//!
//! This module implements the byte-addressable data region of the simulated
//! machine. It provides:
//! 1. **Buffer:** Backing storage (`ByteBuffer`) for the region contents.
//! 2. **Memory:** Address translation from `DATA_START..STACK_START` to buffer
//!    offsets, with every access bounds-checked against the region.
//!
//! Values are little-endian. Widths up to 8 bytes are handled as `u64`.

/// Backing byte storage.
pub mod buffer;

use self::buffer::ByteBuffer;
use crate::common::constants::{DATA_SIZE, DATA_START};
use crate::common::data::AccessType;
use crate::common::error::SimError;

/// The data region mapped at `DATA_START`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataMemory {
    buffer: ByteBuffer,
    base_addr: u64,
}

impl Default for DataMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl DataMemory {
    /// Creates a zero-filled data region.
    pub fn new() -> Self {
        Self {
            buffer: ByteBuffer::new(DATA_SIZE),
            base_addr: DATA_START,
        }
    }

    /// First address of the region.
    pub const fn base(&self) -> u64 {
        self.base_addr
    }

    /// One past the last address of the region.
    pub fn end(&self) -> u64 {
        self.base_addr + self.buffer.len() as u64
    }

    /// Whether `[addr, addr + len)` lies inside the region.
    pub fn contains(&self, addr: u64, len: usize) -> bool {
        addr >= self.base_addr
            && addr
                .checked_add(len as u64)
                .is_some_and(|end| end <= self.end())
    }

    /// Fails with `MemoryBounds` unless `[addr, addr + len)` lies inside the region.
    ///
    /// # Errors
    ///
    /// `SimError::MemoryBounds` describing the rejected access.
    pub fn check(&self, addr: u64, len: usize, access: AccessType) -> Result<(), SimError> {
        if self.contains(addr, len) {
            Ok(())
        } else {
            Err(SimError::MemoryBounds {
                address: addr,
                width: len,
                access,
            })
        }
    }

    /// Reads `len` bytes at `addr`.
    ///
    /// # Errors
    ///
    /// `SimError::MemoryBounds` if the range leaves the region.
    pub fn read_bytes(&self, addr: u64, len: usize) -> Result<&[u8], SimError> {
        self.check(addr, len, AccessType::Read)?;
        self.buffer
            .read_slice((addr - self.base_addr) as usize, len)
            .ok_or(SimError::MemoryBounds {
                address: addr,
                width: len,
                access: AccessType::Read,
            })
    }

    /// Writes `data` at `addr`.
    ///
    /// # Errors
    ///
    /// `SimError::MemoryBounds` if the range leaves the region.
    pub fn write_bytes(&mut self, addr: u64, data: &[u8]) -> Result<(), SimError> {
        self.check(addr, data.len(), AccessType::Write)?;
        let _ = self
            .buffer
            .write_slice((addr - self.base_addr) as usize, data);
        Ok(())
    }

    /// Reads a little-endian value of `len` (1..=8) bytes, zero-extended.
    ///
    /// # Errors
    ///
    /// `SimError::MemoryBounds` if the range leaves the region.
    pub fn read_le(&self, addr: u64, len: usize) -> Result<u64, SimError> {
        let bytes = self.read_bytes(addr, len)?;
        Ok(le_value(bytes))
    }

    /// Writes the low `len` (1..=8) bytes of `val` little-endian.
    ///
    /// # Errors
    ///
    /// `SimError::MemoryBounds` if the range leaves the region.
    pub fn write_le(&mut self, addr: u64, len: usize, val: u64) -> Result<(), SimError> {
        let bytes = val.to_le_bytes();
        self.write_bytes(addr, &bytes[..len.min(8)])
    }

    /// Zeroes the region and copies `image` to its start.
    ///
    /// # Errors
    ///
    /// `SimError::MemoryBounds` if the image is larger than the region.
    pub fn load_image(&mut self, image: &[u8]) -> Result<(), SimError> {
        self.buffer.clear();
        self.write_bytes(self.base_addr, image)
    }
}

/// Assembles up to 8 little-endian bytes into a zero-extended value.
pub fn le_value(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .take(8)
        .rev()
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}
