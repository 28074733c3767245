//! Integer ALU operations at full 64-bit width.

use rstest::rstest;
use rvlab_core::core::units::alu::{Alu, AluOp};
use rvlab_core::isa::rv64i::funct3;

#[rstest]
#[case(AluOp::Add, u64::MAX, 1, 0)]
#[case(AluOp::Sub, 0, 1, u64::MAX)]
#[case(AluOp::Sll, 1, 63, 1 << 63)]
#[case(AluOp::Sll, 1, 64, 1)] // only the low 6 bits count
#[case(AluOp::Srl, 1 << 63, 63, 1)]
#[case(AluOp::Sra, 1 << 63, 63, u64::MAX)]
#[case(AluOp::Slt, u64::MAX, 0, 1)]
#[case(AluOp::Sltu, u64::MAX, 0, 0)]
#[case(AluOp::Xor, 0b1100, 0b1010, 0b0110)]
#[case(AluOp::Or, 0b1100, 0b1010, 0b1110)]
#[case(AluOp::And, 0b1100, 0b1010, 0b1000)]
fn execute(#[case] op: AluOp, #[case] a: u64, #[case] b: u64, #[case] expected: u64) {
    assert_eq!(Alu::execute(op, a, b), expected);
}

#[test]
fn alternate_bit_selects_sub_and_sra_only() {
    assert_eq!(AluOp::from_funct3(funct3::ADD_SUB, true), Some(AluOp::Sub));
    assert_eq!(AluOp::from_funct3(funct3::SRL_SRA, true), Some(AluOp::Sra));
    assert_eq!(AluOp::from_funct3(funct3::XOR, true), None);
    assert_eq!(AluOp::from_funct3(funct3::SLTU, false), Some(AluOp::Sltu));
}
