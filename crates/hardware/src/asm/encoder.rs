//! Per-format instruction encoder.
//!
//! A single static table maps each mnemonic to its format and fixed fields;
//! the format then selects how operands are parsed and how bits are packed.
//! The packing functions are the inverses of the immediate decoders in
//! `isa::decode`.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::common::error::AsmErrorKind;
use crate::isa::rv64i::{funct3 as f3, funct7 as f7, opcodes as op};

use super::SymbolTable;
use super::operands::{
    check_offset, check_range, check_signed, imm, mem_operand, parse_number, reg,
};

/// Operand layout of a mnemonic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// `rd, rs1, rs2`.
    R,
    /// `rd, rs1, imm12`.
    IAlu,
    /// `rd, rs1, shamt6`.
    IShift,
    /// `rd, offset(rs1)`.
    ILoad,
    /// `rd, offset(rs1)` or `rd, rs1, offset`.
    IJalr,
    /// `rs2, offset(rs1)`.
    S,
    /// `rs1, rs2, label`.
    B,
    /// `rd, label`.
    J,
    /// `rd, imm20`.
    U,
}

impl Format {
    /// Minimum number of operand tokens.
    pub const fn min_operands(self) -> usize {
        match self {
            Self::R | Self::IAlu | Self::IShift | Self::B => 3,
            Self::ILoad | Self::IJalr | Self::S | Self::J | Self::U => 2,
        }
    }
}

/// Fixed encoding fields of one mnemonic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpSpec {
    /// Operand layout.
    pub format: Format,
    /// Major opcode.
    pub opcode: u32,
    /// funct3 (zero where unused).
    pub funct3: u32,
    /// funct7, or funct6 for shift-immediates (zero where unused).
    pub funct7: u32,
}

const fn spec(format: Format, opcode: u32, funct3: u32, funct7: u32) -> OpSpec {
    OpSpec {
        format,
        opcode,
        funct3,
        funct7,
    }
}

static TABLE: LazyLock<HashMap<&'static str, OpSpec>> = LazyLock::new(|| {
    use Format::{B, IAlu, IJalr, ILoad, IShift, J, R, S, U};
    HashMap::from([
        ("add", spec(R, op::OP_REG, f3::ADD_SUB, f7::DEFAULT)),
        ("sub", spec(R, op::OP_REG, f3::ADD_SUB, f7::ALT)),
        ("sll", spec(R, op::OP_REG, f3::SLL, f7::DEFAULT)),
        ("slt", spec(R, op::OP_REG, f3::SLT, f7::DEFAULT)),
        ("sltu", spec(R, op::OP_REG, f3::SLTU, f7::DEFAULT)),
        ("xor", spec(R, op::OP_REG, f3::XOR, f7::DEFAULT)),
        ("srl", spec(R, op::OP_REG, f3::SRL_SRA, f7::DEFAULT)),
        ("sra", spec(R, op::OP_REG, f3::SRL_SRA, f7::ALT)),
        ("or", spec(R, op::OP_REG, f3::OR, f7::DEFAULT)),
        ("and", spec(R, op::OP_REG, f3::AND, f7::DEFAULT)),
        ("addi", spec(IAlu, op::OP_IMM, f3::ADD_SUB, 0)),
        ("slti", spec(IAlu, op::OP_IMM, f3::SLT, 0)),
        ("sltiu", spec(IAlu, op::OP_IMM, f3::SLTU, 0)),
        ("xori", spec(IAlu, op::OP_IMM, f3::XOR, 0)),
        ("ori", spec(IAlu, op::OP_IMM, f3::OR, 0)),
        ("andi", spec(IAlu, op::OP_IMM, f3::AND, 0)),
        ("slli", spec(IShift, op::OP_IMM, f3::SLL, f7::SHIFT_LOGICAL)),
        (
            "srli",
            spec(IShift, op::OP_IMM, f3::SRL_SRA, f7::SHIFT_LOGICAL),
        ),
        (
            "srai",
            spec(IShift, op::OP_IMM, f3::SRL_SRA, f7::SHIFT_ARITH),
        ),
        ("lb", spec(ILoad, op::OP_LOAD, f3::LB, 0)),
        ("lh", spec(ILoad, op::OP_LOAD, f3::LH, 0)),
        ("lw", spec(ILoad, op::OP_LOAD, f3::LW, 0)),
        ("ld", spec(ILoad, op::OP_LOAD, f3::LD, 0)),
        ("lbu", spec(ILoad, op::OP_LOAD, f3::LBU, 0)),
        ("lhu", spec(ILoad, op::OP_LOAD, f3::LHU, 0)),
        ("lwu", spec(ILoad, op::OP_LOAD, f3::LWU, 0)),
        ("jalr", spec(IJalr, op::OP_JALR, f3::JALR, 0)),
        ("sb", spec(S, op::OP_STORE, f3::SB, 0)),
        ("sh", spec(S, op::OP_STORE, f3::SH, 0)),
        ("sw", spec(S, op::OP_STORE, f3::SW, 0)),
        ("sd", spec(S, op::OP_STORE, f3::SD, 0)),
        ("beq", spec(B, op::OP_BRANCH, f3::BEQ, 0)),
        ("bne", spec(B, op::OP_BRANCH, f3::BNE, 0)),
        ("blt", spec(B, op::OP_BRANCH, f3::BLT, 0)),
        ("bge", spec(B, op::OP_BRANCH, f3::BGE, 0)),
        ("bltu", spec(B, op::OP_BRANCH, f3::BLTU, 0)),
        ("bgeu", spec(B, op::OP_BRANCH, f3::BGEU, 0)),
        ("jal", spec(J, op::OP_JAL, 0, 0)),
        ("lui", spec(U, op::OP_LUI, 0, 0)),
    ])
});

/// Looks up a mnemonic (case-insensitive).
pub fn lookup(mnemonic: &str) -> Option<OpSpec> {
    TABLE.get(mnemonic.to_ascii_lowercase().as_str()).copied()
}

/// Packs an R-type word.
pub const fn r_type(funct7: u32, rs2: u32, rs1: u32, funct3: u32, rd: u32, opcode: u32) -> u32 {
    (funct7 << 25) | (rs2 << 20) | (rs1 << 15) | (funct3 << 12) | (rd << 7) | opcode
}

/// Packs an I-type word; `imm` is truncated to 12 bits.
pub const fn i_type(imm: i64, rs1: u32, funct3: u32, rd: u32, opcode: u32) -> u32 {
    (((imm as u32) & 0xFFF) << 20) | (rs1 << 15) | (funct3 << 12) | (rd << 7) | opcode
}

/// Packs an RV64 shift-immediate word with a 6-bit `shamt`.
pub const fn shift_type(
    funct6: u32,
    shamt: u32,
    rs1: u32,
    funct3: u32,
    rd: u32,
    opcode: u32,
) -> u32 {
    (funct6 << 26) | ((shamt & 0x3F) << 20) | (rs1 << 15) | (funct3 << 12) | (rd << 7) | opcode
}

/// Packs an S-type word; `imm` is truncated to 12 bits.
pub const fn s_type(imm: i64, rs2: u32, rs1: u32, funct3: u32, opcode: u32) -> u32 {
    let imm = (imm as u32) & 0xFFF;
    let lo = imm & 0x1F;
    let hi = (imm >> 5) & 0x7F;
    (hi << 25) | (rs2 << 20) | (rs1 << 15) | (funct3 << 12) | (lo << 7) | opcode
}

/// Packs a B-type word from a byte offset.
pub const fn b_type(offset: i64, rs2: u32, rs1: u32, funct3: u32, opcode: u32) -> u32 {
    let imm = offset as u32;
    let b12 = ((imm >> 12) & 0x1) << 31;
    let b10_5 = ((imm >> 5) & 0x3F) << 25;
    let b4_1 = ((imm >> 1) & 0xF) << 8;
    let b11 = ((imm >> 11) & 0x1) << 7;
    b12 | b10_5 | (rs2 << 20) | (rs1 << 15) | (funct3 << 12) | b4_1 | b11 | opcode
}

/// Packs a U-type word from the 20-bit upper immediate.
pub const fn u_type(imm20: u32, rd: u32, opcode: u32) -> u32 {
    ((imm20 & 0xF_FFFF) << 12) | (rd << 7) | opcode
}

/// Packs a J-type word from a byte offset.
pub const fn j_type(offset: i64, rd: u32, opcode: u32) -> u32 {
    let imm = offset as u32;
    let b20 = ((imm >> 20) & 0x1) << 31;
    let b10_1 = ((imm >> 1) & 0x3FF) << 21;
    let b11 = ((imm >> 11) & 0x1) << 20;
    let b19_12 = ((imm >> 12) & 0xFF) << 12;
    b20 | b10_1 | b11 | b19_12 | (rd << 7) | opcode
}

/// An encoded word and the number of operand tokens it consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Encoded {
    /// The 32-bit instruction.
    pub word: u32,
    /// Operand tokens used; anything beyond is excess.
    pub consumed: usize,
}

/// Encodes one instruction located at `pc`.
///
/// # Errors
///
/// Any operand-level `AsmErrorKind`: unknown mnemonic or register, missing
/// operands, out-of-range immediates, unresolved labels or malformed memory operands.
pub fn encode(
    mnemonic: &str,
    ops: &[&str],
    pc: u64,
    labels: &SymbolTable,
) -> Result<Encoded, AsmErrorKind> {
    let spec = lookup(mnemonic)
        .ok_or_else(|| AsmErrorKind::UnknownMnemonic(mnemonic.to_string()))?;

    let needed = spec.format.min_operands();
    if ops.len() < needed {
        return Err(AsmErrorKind::MissingOperand {
            mnemonic: mnemonic.to_string(),
            expected: needed,
            found: ops.len(),
        });
    }

    let OpSpec {
        format,
        opcode,
        funct3,
        funct7,
    } = spec;

    let (word, consumed) = match format {
        Format::R => {
            let (rd, rs1, rs2) = (reg(ops[0])?, reg(ops[1])?, reg(ops[2])?);
            (r_type(funct7, rs2, rs1, funct3, rd, opcode), 3)
        }
        Format::IAlu => {
            let value = check_signed(imm(ops[2])?, 12)?;
            let (rd, rs1) = (reg(ops[0])?, reg(ops[1])?);
            (i_type(value, rs1, funct3, rd, opcode), 3)
        }
        Format::IShift => {
            let shamt = check_range(imm(ops[2])?, 0, 63)? as u32;
            let (rd, rs1) = (reg(ops[0])?, reg(ops[1])?);
            (shift_type(funct7, shamt, rs1, funct3, rd, opcode), 3)
        }
        Format::ILoad | Format::IJalr => {
            let rd = reg(ops[0])?;
            let mem = mem_operand(&ops[1..], format == Format::IJalr)?;
            let word = i_type(mem.offset, mem.base, funct3, rd, opcode);
            (word, 1 + mem.consumed)
        }
        Format::S => {
            let rs2 = reg(ops[0])?;
            let mem = mem_operand(&ops[1..], false)?;
            let word = s_type(mem.offset, rs2, mem.base, funct3, opcode);
            (word, 1 + mem.consumed)
        }
        Format::B => {
            let rs1 = reg(ops[0])?;
            let rs2 = reg(ops[1])?;
            let offset = check_offset(target_offset(ops[2], pc, labels)?, 13)?;
            (b_type(offset, rs2, rs1, funct3, opcode), 3)
        }
        Format::J => {
            let rd = reg(ops[0])?;
            let offset = check_offset(target_offset(ops[1], pc, labels)?, 21)?;
            (j_type(offset, rd, opcode), 2)
        }
        Format::U => {
            let value = check_range(imm(ops[1])?, 0, 0xF_FFFF)?;
            (u_type(value as u32, reg(ops[0])?, opcode), 2)
        }
    };

    Ok(Encoded { word, consumed })
}

/// Byte distance from `pc` to a label, or a literal byte offset.
fn target_offset(target: &str, pc: u64, labels: &SymbolTable) -> Result<i64, AsmErrorKind> {
    if let Some(&address) = labels.get(target) {
        return Ok(address.wrapping_sub(pc) as i64);
    }
    parse_number(target).ok_or_else(|| AsmErrorKind::UnresolvedLabel(target.to_string()))
}
