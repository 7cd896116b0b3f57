//! Windows-1251 (Cyrillic) single-byte code page.
//!
//! Bytes `0x00..=0x7F` are ASCII. The upper half is table-driven; `0x98`
//! is unassigned and decodes to U+FFFD. Characters with no mapping encode
//! as `?`.

/// Unicode scalar for bytes `0x80..=0xBF`. `0xC0..=0xFF` map linearly to
/// U+0410..=U+044F and are handled arithmetically.
const HIGH: [char; 64] = [
    // 0x80
    '\u{0402}', '\u{0403}', '\u{201A}', '\u{0453}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{20AC}', '\u{2030}', '\u{0409}', '\u{2039}', '\u{040A}', '\u{040C}', '\u{040B}', '\u{040F}',
    // 0x90
    '\u{0452}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{FFFD}', '\u{2122}', '\u{0459}', '\u{203A}', '\u{045A}', '\u{045C}', '\u{045B}', '\u{045F}',
    // 0xA0
    '\u{00A0}', '\u{040E}', '\u{045E}', '\u{0408}', '\u{00A4}', '\u{0490}', '\u{00A6}', '\u{00A7}',
    '\u{0401}', '\u{00A9}', '\u{0404}', '\u{00AB}', '\u{00AC}', '\u{00AD}', '\u{00AE}', '\u{0407}',
    // 0xB0
    '\u{00B0}', '\u{00B1}', '\u{0406}', '\u{0456}', '\u{0491}', '\u{00B5}', '\u{00B6}', '\u{00B7}',
    '\u{0451}', '\u{2116}', '\u{0454}', '\u{00BB}', '\u{0458}', '\u{0405}', '\u{0455}', '\u{0457}',
];

/// Substitute byte for characters outside the code page.
pub const REPLACEMENT: u8 = b'?';

/// Maps one byte to its Unicode character.
#[inline]
pub fn decode_byte(b: u8) -> char {
    match b {
        0x00..=0x7f => b as char,
        0x80..=0xbf => HIGH[(b - 0x80) as usize],
        // 0xC0..=0xFF: А..я
        _ => char::from_u32(0x0410 + (b - 0xc0) as u32).unwrap_or('\u{FFFD}'),
    }
}

/// Maps one character to its byte, or `None` if the code page lacks it.
pub fn encode_char(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if cp < 0x80 {
        return Some(cp as u8);
    }
    if (0x0410..=0x044f).contains(&cp) {
        return Some((cp - 0x0410) as u8 + 0xc0);
    }
    if ch == '\u{FFFD}' {
        return None;
    }
    HIGH.iter()
        .position(|&c| c == ch)
        .map(|i| i as u8 + 0x80)
}

/// Decodes a byte slice to a `String`.
pub fn decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| decode_byte(b)).collect()
}

/// Encodes a string, one byte per character.
pub fn encode(s: &str) -> Vec<u8> {
    s.chars()
        .map(|ch| encode_char(ch).unwrap_or(REPLACEMENT))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(encode("FM-01 x"), b"FM-01 x".to_vec());
        assert_eq!(decode(b"FM-01 x"), "FM-01 x");
    }

    #[test]
    fn test_cyrillic_letters() {
        assert_eq!(encode("Аая"), vec![0xc0, 0xe0, 0xff]);
        assert_eq!(decode(&[0xc0, 0xe0, 0xff]), "Аая");
    }

    #[test]
    fn test_ukrainian_letters() {
        assert_eq!(encode("ЇїІіЄєҐґ"), vec![0xaf, 0xbf, 0xb2, 0xb3, 0xaa, 0xba, 0xa5, 0xb4]);
    }

    #[test]
    fn test_every_assigned_byte_roundtrips() {
        for b in 0u8..=255 {
            if b == 0x98 {
                continue;
            }
            assert_eq!(encode_char(decode_byte(b)), Some(b), "byte {b:#04x}");
        }
    }

    #[test]
    fn test_unmapped_becomes_question_mark() {
        assert_eq!(encode("a中b"), b"a?b".to_vec());
        assert_eq!(decode(&[0x98]), "\u{FFFD}");
    }
}
