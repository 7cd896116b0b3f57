use chrono::{DateTime, Utc};
use fiscal_memory_buffers::{Reader, Writer};
use serde::{Deserialize, Serialize};

use super::Record;
use crate::datetime;

const TAX_NUMBER_LEN: usize = 16;

/// Tax-ID registration (fiscalization) record.
///
/// Layout (24 bytes): timestamp(4), type(1), last Z-report ordinal(2),
/// tax number(16), checksum(1).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaxIdRecord {
    #[serde(with = "datetime::iso")]
    pub date_time: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub kind: u8,
    /// Ordinal of the last Z-report closed under the previous tax number.
    pub last_z_report: u16,
    pub tax_number: String,
}

impl Record for TaxIdRecord {
    const SIZE: usize = 24;

    fn read(reader: &mut Reader<'_>) -> Option<Self> {
        Some(Self {
            date_time: datetime::read(reader),
            kind: reader.u8(),
            last_z_report: reader.u16(),
            tax_number: reader.text(TAX_NUMBER_LEN),
        })
    }

    fn write(&self, writer: &mut Writer<'_>) {
        datetime::write(writer, self.date_time.as_ref());
        writer.u8(self.kind);
        writer.u16(self.last_z_report);
        writer.text(&self.tax_number, TAX_NUMBER_LEN, false);
    }
}
