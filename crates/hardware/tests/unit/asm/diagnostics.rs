//! Each error kind is reported with the line that caused it.

use rstest::rstest;
use rvlab_core::asm::assemble;
use rvlab_core::common::AsmErrorKind;

fn kind_of(source: &str) -> AsmErrorKind {
    assemble(source).unwrap_err().kind
}

#[test]
fn unknown_mnemonic() {
    let err = assemble("addi x1, x0, 1\nmul x1, x2, x3\n").unwrap_err();
    assert_eq!(err.line, 2);
    assert_eq!(err.kind, AsmErrorKind::UnknownMnemonic("mul".to_string()));
}

#[test]
fn unknown_register() {
    assert_eq!(
        kind_of("add x1, x2, x99\n"),
        AsmErrorKind::UnknownRegister("x99".to_string())
    );
}

#[test]
fn missing_operand() {
    assert_eq!(
        kind_of("add x1, x2\n"),
        AsmErrorKind::MissingOperand {
            mnemonic: "add".to_string(),
            expected: 3,
            found: 2,
        }
    );
}

#[rstest]
#[case("addi x1, x0, 2048")]
#[case("addi x1, x0, -2049")]
#[case("slli x1, x1, 64")]
#[case("lui x1, 0x100000")]
#[case("lui x1, -1")]
#[case("sw x1, 4096(x2)")]
fn immediate_out_of_range(#[case] source: &str) {
    let kind = kind_of(source);
    assert!(matches!(kind, AsmErrorKind::ImmediateRange { .. }));
}

#[rstest]
#[case("beq x0, x0, 3")]
#[case("jal x1, -7")]
fn odd_branch_and_jump_distances_are_rejected(#[case] source: &str) {
    assert!(matches!(
        kind_of(source),
        AsmErrorKind::ImmediateRange { value, .. } if value % 2 != 0
    ));
}

#[test]
fn branch_distance_beyond_13_bits() {
    assert!(matches!(
        kind_of("beq x0, x0, 4096\n"),
        AsmErrorKind::ImmediateRange { value: 4096, .. }
    ));
}

#[test]
fn unresolved_label() {
    assert_eq!(
        kind_of("beq x1, x2, nowhere\n"),
        AsmErrorKind::UnresolvedLabel("nowhere".to_string())
    );
}

#[test]
fn duplicate_label() {
    let err = assemble("a: addi x1, x0, 1\na: addi x1, x0, 2\n").unwrap_err();
    assert_eq!(err.line, 2);
    assert!(matches!(err.kind, AsmErrorKind::InvalidLabel { .. }));
}

#[rstest]
#[case("bad label: addi x1, x0, 1")]
#[case(": addi x1, x0, 1")]
#[case("f(x): addi x1, x0, 1")]
fn malformed_label(#[case] source: &str) {
    assert!(matches!(kind_of(source), AsmErrorKind::InvalidLabel { .. }));
}

#[test]
fn invalid_immediate_token() {
    assert_eq!(
        kind_of("addi x1, x0, ten\n"),
        AsmErrorKind::InvalidImmediate("ten".to_string())
    );
}

#[test]
fn malformed_memory_operand() {
    assert!(matches!(
        kind_of("lw x1, 8(x2\n"),
        AsmErrorKind::MalformedMemoryOperand(_)
    ));
}

#[rstest]
#[case("lw x1, x2, 8\n")]
#[case("sd x1, x2 -16\n")]
fn bare_base_followed_by_offset_is_malformed(#[case] src: &str) {
    let kind = kind_of(src);
    assert!(matches!(kind, AsmErrorKind::MalformedMemoryOperand(_)));
}
