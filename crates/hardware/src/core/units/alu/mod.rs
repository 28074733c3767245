//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the 64-bit integer ALU shared by register-register
//! and register-immediate instructions. Shift amounts use the low 6 bits of
//! the second operand; all arithmetic wraps.

use crate::isa::rv64i::funct3 as f3;

/// Bit mask for shift amount in RV64 (6 bits: 0-63).
const SHAMT_MASK_RV64: u64 = 0x3f;

/// Integer ALU operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    /// Wrapping addition.
    Add,
    /// Wrapping subtraction.
    Sub,
    /// Shift left logical.
    Sll,
    /// Set if less than (signed).
    Slt,
    /// Set if less than (unsigned).
    Sltu,
    /// Bitwise exclusive or.
    Xor,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,
    /// Bitwise or.
    Or,
    /// Bitwise and.
    And,
}

impl AluOp {
    /// Maps `funct3` plus the alternate-encoding bit (funct7 bit 5) to an operation.
    ///
    /// `alt` selects SUB over ADD and SRA over SRL; it must be clear for every
    /// other `funct3`.
    pub const fn from_funct3(funct3: u32, alt: bool) -> Option<Self> {
        Some(match (funct3, alt) {
            (f3::ADD_SUB, false) => Self::Add,
            (f3::ADD_SUB, true) => Self::Sub,
            (f3::SLL, false) => Self::Sll,
            (f3::SLT, false) => Self::Slt,
            (f3::SLTU, false) => Self::Sltu,
            (f3::XOR, false) => Self::Xor,
            (f3::SRL_SRA, false) => Self::Srl,
            (f3::SRL_SRA, true) => Self::Sra,
            (f3::OR, false) => Self::Or,
            (f3::AND, false) => Self::And,
            _ => return None,
        })
    }
}

/// Arithmetic Logic Unit for integer operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvlab_core::core::units::alu::{Alu, AluOp};
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 42, 8), 50);
    /// assert_eq!(Alu::execute(AluOp::Sll, 0x1, 4), 0x10);
    /// assert_eq!(Alu::execute(AluOp::Slt, -5_i64 as u64, 10), 1);
    /// assert_eq!(Alu::execute(AluOp::Sra, -16_i64 as u64, 2), -4_i64 as u64);
    /// ```
    pub const fn execute(op: AluOp, a: u64, b: u64) -> u64 {
        let sh6 = (b & SHAMT_MASK_RV64) as u32;
        match op {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Sub => a.wrapping_sub(b),
            AluOp::Sll => a.wrapping_shl(sh6),
            AluOp::Slt => ((a as i64) < (b as i64)) as u64,
            AluOp::Sltu => (a < b) as u64,
            AluOp::Xor => a ^ b,
            AluOp::Srl => a.wrapping_shr(sh6),
            AluOp::Sra => ((a as i64) >> sh6) as u64,
            AluOp::Or => a | b,
            AluOp::And => a & b,
        }
    }
}
