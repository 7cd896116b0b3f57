//! Hex formatting for slot inspection.

/// Formats up to `max` bytes as space-separated lowercase hex, noting how
/// many bytes were left out.
///
/// ```
/// use fiscal_memory_buffers::hex_octets;
///
/// assert_eq!(hex_octets(&[0x01, 0x0a, 0xff], 16), "01 0a ff");
/// assert_eq!(hex_octets(&[0xff; 5], 2), "ff ff (+3)");
/// ```
pub fn hex_octets(octets: &[u8], max: usize) -> String {
    let mut out = octets
        .iter()
        .take(max)
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ");
    if octets.len() > max {
        out.push_str(&format!(" (+{})", octets.len() - max));
    }
    out
}

/// Formats a slot as `"0x0a00: 01 02 ..."` using its absolute offset in the dump.
pub fn hex_slot(offset: usize, octets: &[u8]) -> String {
    format!("{offset:#06x}: {}", hex_octets(octets, octets.len()))
}
