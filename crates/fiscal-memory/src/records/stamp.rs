//! Bare timestamp entries of the RAM-reset and test-mode logs.

use chrono::{DateTime, Utc};
use fiscal_memory_buffers::{Reader, Writer};

use super::Record;
use crate::datetime;

/// A log entry is exactly one packed timestamp with no checksum; the unset
/// sentinel marks a free slot.
impl Record for DateTime<Utc> {
    const SIZE: usize = datetime::PACKED_SIZE;
    const CHECKSUMMED: bool = false;

    fn read(reader: &mut Reader<'_>) -> Option<Self> {
        datetime::read(reader)
    }

    fn write(&self, writer: &mut Writer<'_>) {
        datetime::write(writer, Some(self));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{decode_slot, encode_slot};
    use chrono::TimeZone;

    #[test]
    fn test_sentinel_slot_is_absent() {
        assert_eq!(decode_slot::<DateTime<Utc>>(&[0xff; 4]), None);
    }

    #[test]
    fn test_no_checksum_byte() {
        let dt = Utc.with_ymd_and_hms(2023, 7, 9, 8, 30, 0).unwrap();
        let mut slot = [0xff; 4];
        encode_slot(&dt, &mut slot);
        assert_eq!(u16::from_le_bytes([slot[2], slot[3]]), (23 << 9) | (7 << 5) | 9);
        assert_eq!(decode_slot::<DateTime<Utc>>(&slot), Some(dt));
    }
}
