//! Field layout matrix for the little-endian reader and writer.

use fiscal_memory_buffers::{cp1251, hex_octets, hex_slot, BufferError, Reader, Writer, U40};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Fixed layouts
// ---------------------------------------------------------------------------

#[test]
fn mixed_fields_share_one_cursor() {
    let mut slot = [0xffu8; 16];
    let mut w = Writer::new(&mut slot);
    w.u8(0x11);
    w.u16(0x2233);
    w.u32(0x4455_6677);
    w.u40(U40::new(0x88_99aa_bbcc).unwrap());
    w.skip(1);
    assert_eq!(w.size(), 3);
    assert_eq!(
        slot,
        [
            0x11, 0x33, 0x22, 0x77, 0x66, 0x55, 0x44, 0xcc, 0xbb, 0xaa, 0x99, 0x88, 0xff, 0xff,
            0xff, 0xff
        ]
    );

    let mut r = Reader::new(&slot);
    assert_eq!(r.u8(), 0x11);
    assert_eq!(r.u16(), 0x2233);
    assert_eq!(r.u32(), 0x4455_6677);
    assert_eq!(r.u40().get(), 0x88_99aa_bbcc);
    r.skip(1);
    assert_eq!(r.size(), 3);
    assert_eq!(r.buf(3), &[0xff, 0xff, 0xff]);
}

#[test]
fn reader_size_counts_down_to_slice_end() {
    let data = [0, 1, 2, 3, 4, 5];
    let mut r = Reader::new(&data[2..5]);
    assert_eq!(r.size(), 3);
    assert_eq!(r.u16(), 0x0302);
    assert_eq!(r.size(), 1);
}

#[test]
fn u40_decimal_matrix() {
    for (text, value) in [
        ("0", 0u64),
        ("", 0),
        ("  42 ", 42),
        ("109951162777", 109_951_162_777),
        ("1099511627775", (1 << 40) - 1),
    ] {
        assert_eq!(text.parse::<U40>().unwrap().get(), value, "{text:?}");
    }
    assert_eq!("1099511627776".parse::<U40>(), Err(BufferError::Int40Overflow));
    assert_eq!("99999999999999999999999".parse::<U40>(), Err(BufferError::Int40Overflow));
    assert_eq!("-1".parse::<U40>(), Err(BufferError::InvalidDigit));
    assert_eq!("1e3".parse::<U40>(), Err(BufferError::InvalidDigit));
    assert!(U40::try_from(1u64 << 40).is_err());
    assert_eq!(U40::from(u32::MAX).get(), u32::MAX as u64);
}

// ---------------------------------------------------------------------------
// Text fields
// ---------------------------------------------------------------------------

#[test]
fn text_field_truncation_matrix() {
    // (input, length, full_length, expected bytes)
    let cases: [(&str, usize, bool, &[u8]); 5] = [
        ("", 4, false, &[0, 0, 0, 0]),
        ("AB", 4, false, b"AB\0\0"),
        ("ABCD", 4, false, b"ABC\0"),
        ("ABCD", 4, true, b"ABCD"),
        ("ABCDEF", 4, true, b"ABCD"),
    ];
    for (input, length, full, expected) in cases {
        let mut field = [0xffu8; 4];
        Writer::new(&mut field).text(input, length, full);
        assert_eq!(&field[..], expected, "{input:?} full={full}");
    }
}

#[test]
fn text_reads_strip_only_trailing_padding() {
    let field = *b"A\0B\0\0";
    assert_eq!(Reader::new(&field).text(5), "A\0B");
    assert_eq!(Reader::new(&[0u8; 3]).text(3), "");
}

#[test]
fn cyrillic_text_uses_one_byte_per_char() {
    let mut field = [0u8; 8];
    Writer::new(&mut field).text("Чек №1", 8, false);
    assert_eq!(&field[..6], &[0xd7, 0xe5, 0xea, 0x20, 0xb9, 0x31]);
    assert_eq!(Reader::new(&field).text(8), "Чек №1");
}

#[test]
fn unmappable_chars_become_question_marks() {
    assert_eq!(cp1251::encode("a€b→c"), vec![b'a', 0x88, b'b', b'?', b'c']);
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

#[test]
fn hex_rendering() {
    assert_eq!(hex_octets(&[0xde, 0xad, 0xbe, 0xef], 2), "de ad (+2)");
    assert_eq!(hex_slot(0xa00, &[0x01, 0x02]), "0x0a00: 01 02");
}

proptest! {
    #[test]
    fn u40_bytes_round_trip(value in 0u64..(1 << 40)) {
        let mut slot = [0u8; 5];
        Writer::new(&mut slot).u40(U40::new(value).unwrap());
        prop_assert_eq!(Reader::new(&slot).u40().get(), value);
    }

    #[test]
    fn single_byte_charset_round_trips(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let bytes: Vec<u8> = bytes.into_iter().filter(|&b| b != 0x98).collect();
        prop_assert_eq!(cp1251::encode(&cp1251::decode(&bytes)), bytes);
    }
}
