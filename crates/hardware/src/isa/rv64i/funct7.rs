//! RISC-V Base Integer (I) Function Codes (funct7 / funct6).
//!
//! The `funct7` field (bits 31-25) distinguishes R-type operations that share a
//! `funct3` (e.g., ADD vs SUB). RV64 shift-immediates use a 6-bit shift amount,
//! leaving a `funct6` field in bits 31-26.

/// Default operation (ADD, SRL, etc.).
pub const DEFAULT: u32 = 0b0000000;

/// Alternate operation (SUB, SRA).
pub const ALT: u32 = 0b0100000;

/// funct6 of SLLI and SRLI.
pub const SHIFT_LOGICAL: u32 = 0b000000;

/// funct6 of SRAI.
pub const SHIFT_ARITH: u32 = 0b010000;
