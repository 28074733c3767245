//! Disassembler output is canonical and re-assembles to the same word.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use rvlab_core::asm::assemble;
use rvlab_core::asm::encoder::{b_type, i_type, j_type, s_type};
use rvlab_core::isa::disasm::disassemble;
use rvlab_core::isa::rv64i::{funct3, opcodes};

#[rstest]
#[case(0x00a0_0293, "addi x5, x0, 10")]
#[case(0x0031_00b3, "add x1, x2, x3")]
#[case(0x4031_00b3, "sub x1, x2, x3")]
#[case(0x0081_2083, "lw x1, 8(x2)")]
#[case(0xfe00_0ee3, "beq x0, x0, -4")]
#[case(0x0080_00ef, "jal x1, 8")]
#[case(0x0000_8067, "jalr x0, 0(x1)")]
#[case(0x1234_52b7, "lui x5, 0x12345")]
#[case(0x0000_0073, "unknown 0x00000073")]
fn renders_canonical_text(#[case] word: u32, #[case] text: &str) {
    assert_eq!(disassemble(word), text);
}

#[test]
fn srai_is_distinguished_by_funct6() {
    assert_eq!(disassemble(0x43f0_d093), "srai x1, x1, 63");
}

fn reassemble(word: u32) -> u32 {
    let program = assemble(&disassemble(word)).unwrap();
    program.words[0]
}

proptest! {
    #[test]
    fn loads_reassemble(
        imm in -2048i64..2048,
        rd in 0u32..32,
        rs1 in 0u32..32,
        f3 in prop::sample::select(vec![
            funct3::LB, funct3::LH, funct3::LW, funct3::LD, funct3::LBU, funct3::LHU, funct3::LWU,
        ]),
    ) {
        let word = i_type(imm, rs1, f3, rd, opcodes::OP_LOAD);
        prop_assert_eq!(reassemble(word), word);
    }

    #[test]
    fn stores_reassemble(imm in -2048i64..2048, rs1 in 0u32..32, rs2 in 0u32..32) {
        let word = s_type(imm, rs2, rs1, funct3::SW, opcodes::OP_STORE);
        prop_assert_eq!(reassemble(word), word);
    }

    #[test]
    fn branches_reassemble(half in -2048i64..2048, rs1 in 0u32..32, rs2 in 0u32..32) {
        let word = b_type(half * 2, rs2, rs1, funct3::BGEU, opcodes::OP_BRANCH);
        prop_assert_eq!(reassemble(word), word);
    }

    #[test]
    fn jumps_reassemble(half in -(1i64 << 19)..(1i64 << 19), rd in 0u32..32) {
        let word = j_type(half * 2, rd, opcodes::OP_JAL);
        prop_assert_eq!(reassemble(word), word);
    }
}
