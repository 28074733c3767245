//! Memory Access Types.
//!
//! This module defines the classification of data memory accesses. These types
//! are used for:
//! 1. **Routing:** Selecting the read or write path through the cache simulator.
//! 2. **Width Selection:** Mapping `funct3` of loads/stores to an access width.
//! 3. **Error Reporting:** Describing the access that ran out of bounds.

use std::fmt;

/// Type of data memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Data read access (load instructions).
    Read,
    /// Data write access (store instructions).
    Write,
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}

/// Width of a load or store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemWidth {
    /// 1 byte (`lb`, `lbu`, `sb`).
    Byte,
    /// 2 bytes (`lh`, `lhu`, `sh`).
    Half,
    /// 4 bytes (`lw`, `lwu`, `sw`).
    Word,
    /// 8 bytes (`ld`, `sd`).
    Double,
}

impl MemWidth {
    /// Number of bytes covered by this width.
    pub const fn bytes(self) -> usize {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
            Self::Double => 8,
        }
    }

    /// Maps the low two bits of a load/store `funct3` to a width.
    ///
    /// Bit 2 of `funct3` (the unsigned flag for loads) is ignored.
    pub const fn from_funct3(funct3: u32) -> Self {
        match funct3 & 0b11 {
            0b00 => Self::Byte,
            0b01 => Self::Half,
            0b10 => Self::Word,
            _ => Self::Double,
        }
    }

    /// Sign-extends the low `bytes()` bytes of `val` to 64 bits.
    pub const fn sign_extend(self, val: u64) -> u64 {
        match self {
            Self::Byte => val as u8 as i8 as i64 as u64,
            Self::Half => val as u16 as i16 as i64 as u64,
            Self::Word => val as u32 as i32 as i64 as u64,
            Self::Double => val,
        }
    }

    /// Zero-extends the low `bytes()` bytes of `val` to 64 bits.
    pub const fn zero_extend(self, val: u64) -> u64 {
        match self {
            Self::Byte => val & 0xFF,
            Self::Half => val & 0xFFFF,
            Self::Word => val & 0xFFFF_FFFF,
            Self::Double => val,
        }
    }
}
