//! Instruction field extraction.
//!
//! Provides bit extraction for the fixed-position fields of a 32-bit RV64I
//! word and the `Decoded` structure produced by the decoder.

/// Bit mask for extracting the opcode field (bits 0-6).
pub const OPCODE_MASK: u32 = 0x7F;
/// Bit mask for a 5-bit register index.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for extracting the funct3 field (bits 12-14).
pub const FUNCT3_MASK: u32 = 0x7;
/// Bit mask for extracting the funct7 field (bits 25-31).
pub const FUNCT7_MASK: u32 = 0x7F;
/// Bit mask for extracting the funct6 field of RV64 shifts (bits 26-31).
pub const FUNCT6_MASK: u32 = 0x3F;
/// Bit mask for the 6-bit RV64 shift amount (bits 20-25).
pub const SHAMT_MASK: u32 = 0x3F;

/// Extraction of standard RISC-V instruction fields from a raw encoding.
pub trait InstructionBits {
    /// Opcode field (bits 0-6).
    fn opcode(&self) -> u32;

    /// Destination register field (bits 7-11).
    fn rd(&self) -> usize;

    /// First source register field (bits 15-19).
    fn rs1(&self) -> usize;

    /// Second source register field (bits 20-24).
    fn rs2(&self) -> usize;

    /// funct3 field (bits 12-14).
    fn funct3(&self) -> u32;

    /// funct7 field (bits 25-31).
    fn funct7(&self) -> u32;

    /// funct6 field of RV64 shift-immediates (bits 26-31).
    fn funct6(&self) -> u32;

    /// 6-bit shift amount of RV64 shift-immediates (bits 20-25).
    fn shamt(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> 7) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> 15) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> 20) & REG_MASK) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> 12) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> 25) & FUNCT7_MASK
    }

    #[inline(always)]
    fn funct6(&self) -> u32 {
        (self >> 26) & FUNCT6_MASK
    }

    #[inline(always)]
    fn shamt(&self) -> u32 {
        (self >> 20) & SHAMT_MASK
    }
}

/// Decoded instruction structure containing all extracted fields.
///
/// `imm` is the sign-extended immediate of the instruction's format; for `lui`
/// it is already shifted into bits 31:12.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Raw 32-bit instruction encoding.
    pub raw: u32,
    /// Extracted opcode field.
    pub opcode: u32,
    /// Destination register index.
    pub rd: usize,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Function code field 3.
    pub funct3: u32,
    /// Function code field 7.
    pub funct7: u32,
    /// Sign-extended immediate value.
    pub imm: i64,
}
