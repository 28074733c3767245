//! Data Region Memory Unit Tests.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use rvlab_core::common::constants::{DATA_SIZE, DATA_START, STACK_START};
use rvlab_core::common::data::AccessType;
use rvlab_core::common::error::SimError;
use rvlab_core::soc::DataMemory;
use rvlab_core::soc::memory::buffer::ByteBuffer;
use rvlab_core::soc::memory::le_value;

#[test]
fn region_spans_data_start_to_stack_start() {
    let mem = DataMemory::new();
    assert_eq!(mem.base(), DATA_START);
    assert_eq!(mem.end(), STACK_START);
    assert_eq!(mem.read_le(DATA_START, 8).unwrap(), 0);
}

#[rstest]
#[case(DATA_START, 8, true)]
#[case(STACK_START - 8, 8, true)]
#[case(STACK_START - 4, 8, false)]
#[case(DATA_START - 1, 1, false)]
#[case(STACK_START, 1, false)]
#[case(0, 4, false)]
#[case(u64::MAX, 2, false)]
fn contains_checks_whole_range(#[case] addr: u64, #[case] len: usize, #[case] inside: bool) {
    assert_eq!(DataMemory::new().contains(addr, len), inside);
}

#[test]
fn out_of_range_write_reports_access() {
    let mut mem = DataMemory::new();
    let err = mem.write_le(STACK_START - 2, 4, 0).unwrap_err();
    assert_eq!(
        err,
        SimError::MemoryBounds {
            address: STACK_START - 2,
            width: 4,
            access: AccessType::Write,
        }
    );
}

#[test]
fn little_endian_partial_width() {
    let mut mem = DataMemory::new();
    mem.write_le(DATA_START + 3, 2, 0xAABB_CCDD).unwrap();
    assert_eq!(
        mem.read_bytes(DATA_START + 2, 4).unwrap(),
        &[0x00, 0xDD, 0xCC, 0x00]
    );
    assert_eq!(mem.read_le(DATA_START + 3, 2).unwrap(), 0xCCDD);
}

#[test]
fn load_image_zeroes_previous_contents() {
    let mut mem = DataMemory::new();
    mem.write_le(DATA_START + 100, 8, u64::MAX).unwrap();
    mem.load_image(&[1, 2, 3]).unwrap();
    assert_eq!(mem.read_bytes(DATA_START, 4).unwrap(), &[1, 2, 3, 0]);
    assert_eq!(mem.read_le(DATA_START + 100, 8).unwrap(), 0);
}

#[test]
fn oversized_image_is_rejected() {
    let mut mem = DataMemory::new();
    let image = vec![0u8; DATA_SIZE + 1];
    assert!(matches!(
        mem.load_image(&image),
        Err(SimError::MemoryBounds { .. })
    ));
}

#[test]
fn buffer_rejects_out_of_range_slices() {
    let mut buf = ByteBuffer::new(4);
    assert_eq!(buf.len(), 4);
    assert!(!buf.is_empty());
    assert!(buf.write_slice(2, &[7, 8]));
    assert!(!buf.write_slice(3, &[1, 2]));
    assert_eq!(buf.read_slice(0, 4), Some(&[0, 0, 7, 8][..]));
    assert_eq!(buf.read_slice(3, 2), None);
    assert_eq!(buf.read_slice(usize::MAX, 2), None);
    buf.clear();
    assert_eq!(buf.read_slice(2, 2), Some(&[0, 0][..]));
}

#[test]
fn le_value_ignores_bytes_past_eight() {
    assert_eq!(le_value(&[]), 0);
    assert_eq!(le_value(&[0x34, 0x12]), 0x1234);
    assert_eq!(le_value(&[0xFF; 9]), u64::MAX);
}

proptest! {
    #[test]
    fn write_then_read_masks_to_width(offset in 0u64..1024, len in 1usize..=8, val: u64) {
        let mut mem = DataMemory::new();
        mem.write_le(DATA_START + offset, len, val).unwrap();
        let mask = if len == 8 { u64::MAX } else { (1u64 << (len * 8)) - 1 };
        prop_assert_eq!(mem.read_le(DATA_START + offset, len).unwrap(), val & mask);
    }
}
