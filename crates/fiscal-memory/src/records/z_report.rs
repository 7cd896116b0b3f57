//! Z-report (daily closing) record.
//!
//! ```text
//! off  size  field
//!   0     2  ZNumber
//!   2     4  DateTime
//!   6     4  LastDocument
//!  10     2  FiscalCount
//!  12     2  StornoCount
//!  14     2  KSEFNum
//!  16   140  28 x 40-bit aggregates
//! 156     1  salesMode
//! 157     4  derived counters
//! 161     1  checksum
//! ```

use chrono::{DateTime, Utc};
use fiscal_memory_buffers::{Reader, Writer, U40};
use serde::{Deserialize, Serialize};

use super::Record;
use crate::datetime;

/// Counters the device derives from the change logs as of the report date.
///
/// Stored values are kept on decode for inspection; encode always replaces
/// them with [`crate::history::derive_counters`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivedCounters {
    /// Index of the applicable fiscal-module number record.
    #[serde(rename = "FMNumChanges")]
    pub fm_num_changes: u8,
    /// Index of the applicable tax-ID record.
    #[serde(rename = "LastFiscalizationNum")]
    pub last_fiscalization_num: u8,
    /// Index of the applicable VAT-rate record.
    #[serde(rename = "TaxNumChanges")]
    pub tax_num_changes: u8,
    /// Index of the applicable RAM-reset entry.
    #[serde(rename = "RamResetsCount")]
    pub ram_resets_count: u8,
}

/// One Z-report.
///
/// Aggregates are grouped as turnover (`obig`) and VAT sums (`suma`) for
/// bands A..E, plus the exempt categories M and H (`zbir`), each with a
/// storno counterpart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ZReport {
    /// 1-based closing ordinal.
    pub z_number: u16,
    #[serde(with = "datetime::iso")]
    pub date_time: Option<DateTime<Utc>>,
    pub last_document: u32,
    pub fiscal_count: u16,
    pub storno_count: u16,
    #[serde(rename = "KSEFNum")]
    pub ksef_num: u16,

    pub obig_vat_a: U40,
    pub obig_vat_b: U40,
    pub obig_vat_c: U40,
    pub obig_vat_d: U40,
    pub obig_vat_e: U40,
    pub obig_vat_a_storno: U40,
    pub obig_vat_b_storno: U40,
    pub obig_vat_c_storno: U40,
    pub obig_vat_d_storno: U40,
    pub obig_vat_e_storno: U40,

    pub suma_vat_a: U40,
    pub suma_vat_b: U40,
    pub suma_vat_c: U40,
    pub suma_vat_d: U40,
    pub suma_vat_e: U40,
    pub suma_vat_a_storno: U40,
    pub suma_vat_b_storno: U40,
    pub suma_vat_c_storno: U40,
    pub suma_vat_d_storno: U40,
    pub suma_vat_e_storno: U40,

    pub zbir_vat_m: U40,
    pub zbir_vat_h: U40,
    pub zbir_vat_m_storno: U40,
    pub zbir_vat_h_storno: U40,
    pub zbir_vat_m_tax: U40,
    pub zbir_vat_h_tax: U40,
    pub zbir_vat_m_tax_storno: U40,
    pub zbir_vat_h_tax_storno: U40,

    #[serde(rename = "salesMode")]
    pub sales_mode: u8,
    #[serde(flatten)]
    pub counters: DerivedCounters,
}

/// Number of 40-bit aggregates in a record.
pub const AGGREGATE_COUNT: usize = 28;

impl ZReport {
    /// The aggregates in wire order.
    pub fn aggregates(&self) -> [U40; AGGREGATE_COUNT] {
        [
            self.obig_vat_a,
            self.obig_vat_b,
            self.obig_vat_c,
            self.obig_vat_d,
            self.obig_vat_e,
            self.obig_vat_a_storno,
            self.obig_vat_b_storno,
            self.obig_vat_c_storno,
            self.obig_vat_d_storno,
            self.obig_vat_e_storno,
            self.suma_vat_a,
            self.suma_vat_b,
            self.suma_vat_c,
            self.suma_vat_d,
            self.suma_vat_e,
            self.suma_vat_a_storno,
            self.suma_vat_b_storno,
            self.suma_vat_c_storno,
            self.suma_vat_d_storno,
            self.suma_vat_e_storno,
            self.zbir_vat_m,
            self.zbir_vat_h,
            self.zbir_vat_m_storno,
            self.zbir_vat_h_storno,
            self.zbir_vat_m_tax,
            self.zbir_vat_h_tax,
            self.zbir_vat_m_tax_storno,
            self.zbir_vat_h_tax_storno,
        ]
    }

    /// Mutable references to the aggregates in wire order.
    fn aggregates_mut(&mut self) -> [&mut U40; AGGREGATE_COUNT] {
        [
            &mut self.obig_vat_a,
            &mut self.obig_vat_b,
            &mut self.obig_vat_c,
            &mut self.obig_vat_d,
            &mut self.obig_vat_e,
            &mut self.obig_vat_a_storno,
            &mut self.obig_vat_b_storno,
            &mut self.obig_vat_c_storno,
            &mut self.obig_vat_d_storno,
            &mut self.obig_vat_e_storno,
            &mut self.suma_vat_a,
            &mut self.suma_vat_b,
            &mut self.suma_vat_c,
            &mut self.suma_vat_d,
            &mut self.suma_vat_e,
            &mut self.suma_vat_a_storno,
            &mut self.suma_vat_b_storno,
            &mut self.suma_vat_c_storno,
            &mut self.suma_vat_d_storno,
            &mut self.suma_vat_e_storno,
            &mut self.zbir_vat_m,
            &mut self.zbir_vat_h,
            &mut self.zbir_vat_m_storno,
            &mut self.zbir_vat_h_storno,
            &mut self.zbir_vat_m_tax,
            &mut self.zbir_vat_h_tax,
            &mut self.zbir_vat_m_tax_storno,
            &mut self.zbir_vat_h_tax_storno,
        ]
    }
}

impl Record for ZReport {
    const SIZE: usize = 162;

    fn read(reader: &mut Reader<'_>) -> Option<Self> {
        let mut report = ZReport {
            z_number: reader.u16(),
            date_time: datetime::read(reader),
            last_document: reader.u32(),
            fiscal_count: reader.u16(),
            storno_count: reader.u16(),
            ksef_num: reader.u16(),
            ..ZReport::default()
        };
        for slot in report.aggregates_mut() {
            *slot = reader.u40();
        }
        report.sales_mode = reader.u8();
        report.counters = DerivedCounters {
            fm_num_changes: reader.u8(),
            last_fiscalization_num: reader.u8(),
            tax_num_changes: reader.u8(),
            ram_resets_count: reader.u8(),
        };
        Some(report)
    }

    fn write(&self, writer: &mut Writer<'_>) {
        writer.u16(self.z_number);
        datetime::write(writer, self.date_time.as_ref());
        writer.u32(self.last_document);
        writer.u16(self.fiscal_count);
        writer.u16(self.storno_count);
        writer.u16(self.ksef_num);
        for value in self.aggregates() {
            writer.u40(value);
        }
        writer.u8(self.sales_mode);
        writer.u8(self.counters.fm_num_changes);
        writer.u8(self.counters.last_fiscalization_num);
        writer.u8(self.counters.tax_num_changes);
        writer.u8(self.counters.ram_resets_count);
    }
}
