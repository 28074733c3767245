//! RV64I Instruction Decoder.
//!
//! Turns a 32-bit encoding into a `Decoded` value: register indices, function
//! codes and the sign-extended immediate of the instruction's format. The
//! immediate layouts are the exact inverse of the assembler's encoder, so an
//! encoded word always decodes to the offset that was assembled.

use crate::isa::instruction::{Decoded, InstructionBits};
use crate::isa::rv64i::opcodes;

/// Total width of a RISC-V instruction in bits.
const INSTRUCTION_WIDTH: u32 = 32;

/// Bit shift for extracting the I-Type immediate field (bits 20-31).
const I_IMM_SHIFT: u32 = 20;

/// Number of bits in I/S-Type immediates.
const IS_IMM_BITS: u32 = 12;

/// Number of bits in the B-Type immediate (13 bits, bit 0 implicit zero).
const B_IMM_BITS: u32 = 13;

/// Number of bits in the J-Type immediate (21 bits, bit 0 implicit zero).
const J_IMM_BITS: u32 = 21;

/// Bit mask for the U-Type immediate field (bits 12-31).
const U_IMM_MASK: u32 = 0xFFFF_F000;

/// Decodes an instruction into its component fields.
///
/// Formats without an immediate (R-type) and unknown opcodes decode with `imm == 0`;
/// rejecting unsupported encodings is left to the executor.
pub fn decode(inst: u32) -> Decoded {
    let opcode = inst.opcode();

    let imm = match opcode {
        opcodes::OP_IMM | opcodes::OP_LOAD | opcodes::OP_JALR => i_imm(inst),
        opcodes::OP_STORE => s_imm(inst),
        opcodes::OP_BRANCH => b_imm(inst),
        opcodes::OP_LUI => u_imm(inst),
        opcodes::OP_JAL => j_imm(inst),
        _ => 0,
    };

    Decoded {
        raw: inst,
        opcode,
        rd: inst.rd(),
        rs1: inst.rs1(),
        rs2: inst.rs2(),
        funct3: inst.funct3(),
        funct7: inst.funct7(),
        imm,
    }
}

/// I-Type: `imm[11:0] | rs1 | funct3 | rd | opcode`.
pub const fn i_imm(inst: u32) -> i64 {
    ((inst as i32) >> I_IMM_SHIFT) as i64
}

/// S-Type: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`.
pub const fn s_imm(inst: u32) -> i64 {
    let low = (inst >> 7) & 0x1F;
    let high = (inst >> 25) & 0x7F;
    sign_extend((high << 5) | low, IS_IMM_BITS)
}

/// B-Type: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`.
pub const fn b_imm(inst: u32) -> i64 {
    let bit_11 = (inst >> 7) & 0x1;
    let bits_4_1 = (inst >> 8) & 0xF;
    let bits_10_5 = (inst >> 25) & 0x3F;
    let bit_12 = (inst >> 31) & 0x1;

    let combined = (bit_12 << 12) | (bit_11 << 11) | (bits_10_5 << 5) | (bits_4_1 << 1);
    sign_extend(combined, B_IMM_BITS)
}

/// U-Type: `imm[31:12] | rd | opcode`, returned shifted and sign-extended to 64 bits.
pub const fn u_imm(inst: u32) -> i64 {
    ((inst & U_IMM_MASK) as i32) as i64
}

/// J-Type: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`.
pub const fn j_imm(inst: u32) -> i64 {
    let bits_19_12 = (inst >> 12) & 0xFF;
    let bit_11 = (inst >> 20) & 0x1;
    let bits_10_1 = (inst >> 21) & 0x3FF;
    let bit_20 = (inst >> 31) & 0x1;

    let combined = (bit_20 << 20) | (bits_19_12 << 12) | (bit_11 << 11) | (bits_10_1 << 1);
    sign_extend(combined, J_IMM_BITS)
}

/// Sign extends the low `bits` of `val` to a 64-bit signed integer.
pub const fn sign_extend(val: u32, bits: u32) -> i64 {
    let shift = INSTRUCTION_WIDTH - bits;
    ((val as i32) << shift >> shift) as i64
}
