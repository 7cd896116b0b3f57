//! Slot emptiness and checksums.
//!
//! A slot is one fixed-size record whose last byte is a checksum: the sum of
//! every other byte, modulo 256. A slot whose non-checksum bytes all hold the
//! fill value is empty; empty slots carry no checksum. A populated record
//! whose fields happen to be all `0xFF` is indistinguishable from an empty
//! slot, which is how the device itself treats it.

/// Erased-flash fill value.
pub const FILL: u8 = 0xff;

/// True when every byte except the last equals [`FILL`].
pub fn is_empty(slot: &[u8]) -> bool {
    match slot.split_last() {
        Some((_, body)) => body.iter().all(|&b| b == FILL),
        None => true,
    }
}

/// Sum of every byte except the last, modulo 256.
pub fn checksum(slot: &[u8]) -> u8 {
    match slot.split_last() {
        Some((_, body)) => body.iter().fold(0u8, |sum, &b| sum.wrapping_add(b)),
        None => 0,
    }
}

/// Stores the checksum in the last byte, unless the slot is empty.
pub fn apply_checksum(slot: &mut [u8]) {
    if is_empty(slot) {
        return;
    }
    let sum = checksum(slot);
    if let Some(last) = slot.last_mut() {
        *last = sum;
    }
}

/// Returns `(stored, computed)` when a populated slot's checksum is wrong.
pub fn checksum_mismatch(slot: &[u8]) -> Option<(u8, u8)> {
    if is_empty(slot) {
        return None;
    }
    let stored = *slot.last()?;
    let computed = checksum(slot);
    (stored != computed).then_some((stored, computed))
}
