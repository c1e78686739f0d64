//! Container format compatibility tests.
//!
//! Pins the on-disk layout: header, node table, size field and payload.

use huffpack::{compress, decompress, Error, NodeTable};

/// Scenario: `[65, 66, 67, 66]` round trips and has the documented layout.
#[test]
fn test_small_alphabet_layout() {
    let input = [65u8, 66, 67, 66];
    let packed = compress(&input).unwrap();

    let node_count = packed[0] as usize;
    assert_eq!(node_count, 2);

    let table = NodeTable::from_bytes(&packed[1..1 + 4 * node_count]).unwrap();
    assert_eq!(table.len(), node_count);

    let size_at = 1 + 4 * node_count;
    let size = u32::from_le_bytes(packed[size_at..size_at + 4].try_into().unwrap());
    assert_eq!(size, 4);

    assert_eq!(decompress(&packed).unwrap(), input);
}

/// Scenario: 300 copies of one byte use the one-bit code `1`.
#[test]
fn test_single_symbol_size_field() {
    let packed = compress(&[0xAB; 300]).unwrap();
    assert_eq!(packed[0], 0, "a leaf root has no descriptors");
    assert_eq!(&packed[1..5], &[44, 1, 0, 0]);
    assert_eq!(packed[5], 0xAB);
    assert_eq!(packed[6], 0xFF, "code 1 packs as set bits");
    assert_eq!(decompress(&packed).unwrap(), vec![0xAB; 300]);
}

/// Scenario: the empty input is a five-byte container.
#[test]
fn test_empty_input_container() {
    let packed = compress(&[]).unwrap();
    assert_eq!(packed, vec![0x00, 0x00, 0x00, 0x00, 0x00]);
    assert!(decompress(&packed).unwrap().is_empty());
}

/// Containers written by hand decode with the indexed convention.
#[test]
fn test_handwritten_container() {
    // Tree (0, (1, 2)): codes 0 -> "0", 1 -> "10", 2 -> "11".
    // Descriptor 0 = (1, 2), descriptor 1 = root (0, #0).
    // Payload for [1, 2, 1, 0, 2]: 10 11 10 0 11 -> 1011_1001 1000_0000.
    let bytes = [
        2, //
        0, 1, 0, 2, //
        0, 0, 1, 0, //
        5, 0, 0, 0, //
        0b1011_1001,
        0b1000_0000,
    ];
    assert_eq!(decompress(&bytes).unwrap(), vec![1, 2, 1, 0, 2]);
}

#[test]
fn test_truncated_containers_fail() {
    let packed = compress(b"truncate me at every length").unwrap();
    for len in 0..packed.len() {
        let result = decompress(&packed[..len]);
        assert!(result.is_err(), "prefix of {} bytes decoded", len);
        assert!(result.unwrap_err().is_corruption());
    }
}

#[test]
fn test_bad_flag_is_decode_error() {
    let mut packed = compress(b"flags").unwrap();
    packed[1] = 7;
    assert!(matches!(decompress(&packed), Err(Error::Decode { .. })));
}
