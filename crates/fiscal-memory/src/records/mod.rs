//! Fixed-size record layouts.
//!
//! Each record kind knows its slot size and how to read and write its fields;
//! slot vacancy and checksums are handled uniformly by [`decode_slot`] and
//! [`encode_slot`].

mod fm_number;
mod serial;
mod stamp;
mod tax_id;
mod vat_rate;
mod z_report;

use fiscal_memory_buffers::{Reader, Writer};

use crate::slot;

pub use fm_number::FmNumberRecord;
pub use serial::SerialRecord;
pub use tax_id::TaxIdRecord;
pub use vat_rate::VatRateChange;
pub use z_report::{DerivedCounters, ZReport};

/// A record stored in a fixed-size slot.
pub trait Record: Sized {
    /// Slot size in bytes, checksum included.
    const SIZE: usize;
    /// Whether the last byte of the slot is a checksum.
    const CHECKSUMMED: bool = true;

    /// Reads the record from a reader positioned at the start of its slot.
    /// Returns `None` when the bytes denote an absent record.
    fn read(reader: &mut Reader<'_>) -> Option<Self>;

    /// Writes every field except the checksum.
    fn write(&self, writer: &mut Writer<'_>);
}

/// Decodes one slot; empty checksummed slots yield `None`.
///
/// Checksums are not verified here.
pub fn decode_slot<R: Record>(slot: &[u8]) -> Option<R> {
    debug_assert_eq!(slot.len(), R::SIZE);
    if R::CHECKSUMMED && slot::is_empty(slot) {
        return None;
    }
    R::read(&mut Reader::new(slot))
}

/// Encodes one record into its slot and seals it with a checksum.
pub fn encode_slot<R: Record>(record: &R, slot: &mut [u8]) {
    debug_assert_eq!(slot.len(), R::SIZE);
    record.write(&mut Writer::new(slot));
    if R::CHECKSUMMED {
        slot::apply_checksum(slot);
    }
}
