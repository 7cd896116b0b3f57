use chrono::{DateTime, Utc};
use fiscal_memory_buffers::{Reader, Writer};
use serde::{Deserialize, Serialize};

use super::Record;
use crate::datetime;

const SERIAL_NUMBER_LEN: usize = 26;

/// Device serial-number assignment.
///
/// Layout (32 bytes): timestamp(4), country code(1), serial number(26),
/// checksum(1).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SerialRecord {
    #[serde(with = "datetime::iso")]
    pub date_time: Option<DateTime<Utc>>,
    pub country_number: u8,
    pub serial_number: String,
}

impl Record for SerialRecord {
    const SIZE: usize = 32;

    fn read(reader: &mut Reader<'_>) -> Option<Self> {
        Some(Self {
            date_time: datetime::read(reader),
            country_number: reader.u8(),
            serial_number: reader.text(SERIAL_NUMBER_LEN),
        })
    }

    fn write(&self, writer: &mut Writer<'_>) {
        datetime::write(writer, self.date_time.as_ref());
        writer.u8(self.country_number);
        writer.text(&self.serial_number, SERIAL_NUMBER_LEN, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{decode_slot, encode_slot};
    use chrono::TimeZone;

    #[test]
    fn test_field_offsets() {
        let record = SerialRecord {
            date_time: Some(Utc.with_ymd_and_hms(2024, 3, 15, 13, 45, 30).unwrap()),
            country_number: 38,
            serial_number: "AB12".to_string(),
        };
        let mut slot = [0xffu8; SerialRecord::SIZE];
        encode_slot(&record, &mut slot);

        assert_eq!(&slot[0..4], &[0xaf, 0x6d, 0x6f, 0x30]);
        assert_eq!(slot[4], 38);
        assert_eq!(&slot[5..9], b"AB12");
        assert_eq!(&slot[9..31], &[0; 22]);
        let sum = slot[..31].iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
        assert_eq!(slot[31], sum);
        assert_eq!(decode_slot::<SerialRecord>(&slot), Some(record));
    }

    #[test]
    fn test_serial_keeps_terminator() {
        let record = SerialRecord {
            serial_number: "9".repeat(30),
            ..SerialRecord::default()
        };
        let mut slot = [0xffu8; SerialRecord::SIZE];
        encode_slot(&record, &mut slot);
        assert_eq!(&slot[5..30], "9".repeat(25).as_bytes());
        assert_eq!(slot[30], 0);
    }
}
