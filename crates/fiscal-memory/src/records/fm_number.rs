use chrono::{DateTime, Utc};
use fiscal_memory_buffers::{Reader, Writer};
use serde::{Deserialize, Serialize};

use super::Record;
use crate::datetime;

const FM_NUMBER_LEN: usize = 27;

/// Fiscal-module number change: timestamp(4), identifier(27), checksum(1).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FmNumberRecord {
    #[serde(with = "datetime::iso")]
    pub date_time: Option<DateTime<Utc>>,
    pub fm_number: String,
}

impl Record for FmNumberRecord {
    const SIZE: usize = 32;

    fn read(reader: &mut Reader<'_>) -> Option<Self> {
        Some(Self {
            date_time: datetime::read(reader),
            fm_number: reader.text(FM_NUMBER_LEN),
        })
    }

    fn write(&self, writer: &mut Writer<'_>) {
        datetime::write(writer, self.date_time.as_ref());
        writer.text(&self.fm_number, FM_NUMBER_LEN, false);
    }
}
