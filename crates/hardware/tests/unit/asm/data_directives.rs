//! `.data` directives build a little-endian image at `DATA_START`.

use pretty_assertions::assert_eq;
use rvlab_core::asm::assemble;
use rvlab_core::common::AsmErrorKind;

fn image(data: &str) -> Vec<u8> {
    assemble(&format!(".data\n{data}\n.text\naddi x0, x0, 0\n"))
        .unwrap()
        .data
}

#[test]
fn each_width_is_little_endian() {
    assert_eq!(image(".byte 0x12"), vec![0x12]);
    assert_eq!(image(".half 0x1234"), vec![0x34, 0x12]);
    assert_eq!(image(".word 0x12345678"), vec![0x78, 0x56, 0x34, 0x12]);
    assert_eq!(image(".dword 0x0102030405060708"), [8, 7, 6, 5, 4, 3, 2, 1]);
}

#[test]
fn dword_accepts_full_unsigned_range() {
    assert_eq!(image(".dword 0xFFFFFFFFFFFFFFFF"), vec![0xFF; 8]);
    let sign_bit = image(".dword 0x8000000000000000");
    assert_eq!(sign_bit, [0, 0, 0, 0, 0, 0, 0, 0x80]);
}

#[test]
fn sign_after_hex_prefix_is_invalid() {
    let err = assemble(".data\n.word 0x+5\n.text\n").unwrap_err();
    assert_eq!(err.kind, AsmErrorKind::InvalidImmediate("0x+5".to_string()));
}

#[test]
fn negative_values_are_twos_complement() {
    assert_eq!(image(".word -1"), vec![0xFF; 4]);
    assert_eq!(image(".byte -2"), vec![0xFE]);
}

#[test]
fn values_are_truncated_to_width() {
    assert_eq!(image(".byte 0x1FF"), vec![0xFF]);
}

#[test]
fn directives_append_contiguously() {
    assert_eq!(image(".byte 1, 2\n.half 3"), vec![1, 2, 3, 0]);
}

#[test]
fn unsupported_directive_in_data_is_rejected() {
    let err = assemble(".data\n.asciz \"x\"\n.text\n").unwrap_err();
    assert_eq!(err.line, 2);
    assert!(matches!(err.kind, AsmErrorKind::InvalidDirective(_)));
}

#[test]
fn bad_value_is_invalid_immediate() {
    let err = assemble(".data\n.word five\n.text\n").unwrap_err();
    assert_eq!(err.kind, AsmErrorKind::InvalidImmediate("five".to_string()));
}

#[test]
fn data_without_text_is_rejected_at_data_line() {
    let err = assemble("\n.data\n.word 1\n").unwrap_err();
    assert_eq!(err.line, 2);
    assert!(matches!(err.kind, AsmErrorKind::InvalidDirective(_)));
}

#[test]
fn text_before_data_is_rejected() {
    let err = assemble(".text\naddi x1, x0, 1\n.data\n.word 1\n").unwrap_err();
    assert_eq!(err.line, 3);
}

#[test]
fn instruction_inside_data_is_rejected() {
    let err = assemble(".data\naddi x1, x0, 1\n.text\n").unwrap_err();
    assert_eq!(err.line, 2);
}
