//! Structured form of a fiscal memory image.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::datetime;
use crate::records::{FmNumberRecord, SerialRecord, TaxIdRecord, VatRateChange, ZReport};

/// Identity block at the start of the image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Meta {
    pub flag: u8,
    /// Device identity; occupies its whole 15-byte field with no terminator.
    pub id_string: String,
    /// Per-unit KSEF slot numbers. Missing entries encode as zero, extra
    /// entries are dropped.
    pub ksef_numbers: Vec<u8>,
}

/// A decoded fiscal memory image.
///
/// Tables hold `Option` entries: decode only produces `Some`, while a `None`
/// supplied for encode leaves its slot as fill bytes. Entries past a table's
/// capacity are not representable and are dropped on encode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FiscalMemoryDump {
    pub meta: Meta,
    pub serial_record: Option<SerialRecord>,
    pub fm_numbers: Vec<Option<FmNumberRecord>>,
    pub vat_rates: Vec<Option<VatRateChange>>,
    #[serde(with = "datetime::iso_list")]
    pub ram_resets: Vec<Option<DateTime<Utc>>>,
    pub tax_records: Vec<Option<TaxIdRecord>>,
    #[serde(with = "datetime::iso_list")]
    pub test_records: Vec<Option<DateTime<Utc>>>,
    pub z_reports: Vec<Option<ZReport>>,
}

/// Table sizes and the Z-report span of a dump.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DumpSummary {
    pub has_serial: bool,
    pub fm_numbers: usize,
    pub vat_rates: usize,
    pub ram_resets: usize,
    pub tax_records: usize,
    pub test_records: usize,
    pub z_reports: usize,
    pub first_z_number: Option<u16>,
    pub last_z_number: Option<u16>,
    pub first_z_date: Option<DateTime<Utc>>,
    pub last_z_date: Option<DateTime<Utc>>,
}

impl FiscalMemoryDump {
    /// Drops every test-mode log entry.
    pub fn clear_test_records(&mut self) {
        self.test_records.clear();
    }

    /// Iterates over the Z-reports that are present.
    pub fn reports(&self) -> impl Iterator<Item = &ZReport> {
        self.z_reports.iter().flatten()
    }

    pub fn summary(&self) -> DumpSummary {
        fn present<T>(table: &[Option<T>]) -> usize {
            table.iter().filter(|e| e.is_some()).count()
        }
        let first = self.reports().next();
        let last = self.reports().last();
        DumpSummary {
            has_serial: self.serial_record.is_some(),
            fm_numbers: present(&self.fm_numbers),
            vat_rates: present(&self.vat_rates),
            ram_resets: present(&self.ram_resets),
            tax_records: present(&self.tax_records),
            test_records: present(&self.test_records),
            z_reports: self.reports().count(),
            first_z_number: first.map(|z| z.z_number),
            last_z_number: last.map(|z| z.z_number),
            first_z_date: self.reports().find_map(|z| z.date_time),
            last_z_date: self.reports().filter_map(|z| z.date_time).last(),
        }
    }

    /// Parses the JSON form handed over by the editing layer.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Renders the dump as pretty-printed JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
