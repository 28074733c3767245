//! Instruction Decode Properties.
//!
//! Every immediate the encoder's bit packers accept decodes back to the same
//! value, for every format. Register and function fields survive unchanged.

use proptest::prelude::*;
use rvlab_core::asm::encoder::{b_type, i_type, j_type, r_type, s_type, shift_type, u_type};
use rvlab_core::isa::decode::{decode, u_imm};
use rvlab_core::isa::instruction::InstructionBits;
use rvlab_core::isa::rv64i::{funct3, funct7, opcodes};

#[test]
fn golden_addi_fields() {
    let d = decode(0x00a0_0293);
    assert_eq!(d.opcode, opcodes::OP_IMM);
    assert_eq!(d.rd, 5);
    assert_eq!(d.rs1, 0);
    assert_eq!(d.funct3, funct3::ADD_SUB);
    assert_eq!(d.imm, 10);
}

#[test]
fn golden_add_fields() {
    let d = decode(0x0031_00b3);
    assert_eq!(d.opcode, opcodes::OP_REG);
    assert_eq!((d.rd, d.rs1, d.rs2), (1, 2, 3));
    assert_eq!(d.funct7, funct7::DEFAULT);
}

#[test]
fn lui_immediate_is_shifted_and_sign_extended() {
    let word = u_type(0xFFFFF, 1, opcodes::OP_LUI);
    assert_eq!(u_imm(word), -4096);
    assert_eq!(decode(word).imm, -4096);
}

proptest! {
    #[test]
    fn r_type_fields_round_trip(
        rd in 0u32..32,
        rs1 in 0u32..32,
        rs2 in 0u32..32,
        alt in any::<bool>(),
    ) {
        let f7 = if alt { funct7::ALT } else { funct7::DEFAULT };
        let word = r_type(f7, rs2, rs1, funct3::ADD_SUB, rd, opcodes::OP_REG);
        let d = decode(word);
        prop_assert_eq!(d.rd, rd as usize);
        prop_assert_eq!(d.rs1, rs1 as usize);
        prop_assert_eq!(d.rs2, rs2 as usize);
        prop_assert_eq!(d.funct7, f7);
    }

    #[test]
    fn i_type_immediate_round_trips(imm in -2048i64..2048, rd in 0u32..32, rs1 in 0u32..32) {
        let word = i_type(imm, rs1, funct3::ADD_SUB, rd, opcodes::OP_IMM);
        let d = decode(word);
        prop_assert_eq!(d.imm, imm);
        prop_assert_eq!(d.rd, rd as usize);
        prop_assert_eq!(d.rs1, rs1 as usize);
    }

    #[test]
    fn shift_amount_uses_six_bits(shamt in 0u32..64, arith in any::<bool>()) {
        let f6 = if arith { funct7::SHIFT_ARITH } else { funct7::SHIFT_LOGICAL };
        let word = shift_type(f6, shamt, 1, funct3::SRL_SRA, 2, opcodes::OP_IMM);
        prop_assert_eq!(word.shamt(), shamt);
        prop_assert_eq!(word.funct6(), f6);
    }

    #[test]
    fn s_type_immediate_round_trips(imm in -2048i64..2048, rs1 in 0u32..32, rs2 in 0u32..32) {
        let word = s_type(imm, rs2, rs1, funct3::SD, opcodes::OP_STORE);
        let d = decode(word);
        prop_assert_eq!(d.imm, imm);
        prop_assert_eq!(d.rs1, rs1 as usize);
        prop_assert_eq!(d.rs2, rs2 as usize);
    }

    #[test]
    fn b_type_offset_round_trips(half in -2048i64..2048) {
        let offset = half * 2;
        let word = b_type(offset, 2, 1, funct3::BNE, opcodes::OP_BRANCH);
        prop_assert_eq!(decode(word).imm, offset);
    }

    #[test]
    fn j_type_offset_round_trips(half in -(1i64 << 19)..(1i64 << 19)) {
        let offset = half * 2;
        let word = j_type(offset, 1, opcodes::OP_JAL);
        prop_assert_eq!(decode(word).imm, offset);
    }

    #[test]
    fn u_type_immediate_round_trips(imm20 in 0u32..(1 << 20), rd in 0u32..32) {
        let word = u_type(imm20, rd, opcodes::OP_LUI);
        let d = decode(word);
        prop_assert_eq!(d.imm, i64::from((imm20 << 12) as i32));
        prop_assert_eq!(d.rd, rd as usize);
    }
}
