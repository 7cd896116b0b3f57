use chrono::{DateTime, Utc};
use fiscal_memory_buffers::{Reader, Writer};
use serde::{Deserialize, Serialize};

use super::Record;
use crate::datetime;

/// VAT-rate table change.
///
/// Rates are stored as 16-bit integers scaled by `dec_point`. `M` and `H`
/// are the VAT-exempt categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VatRateChange {
    #[serde(rename = "dateTime", with = "datetime::iso")]
    pub date_time: Option<DateTime<Utc>>,
    pub vat_a: u16,
    pub vat_b: u16,
    pub vat_c: u16,
    pub vat_d: u16,
    pub vat_m: u16,
    pub vat_h: u16,
    pub dec_point: u8,
    #[serde(rename = "VATExcluded")]
    pub vat_excluded: u8,
    /// Bitmask of categories the rates are associated with.
    pub associated_mask: u8,
}

impl Record for VatRateChange {
    const SIZE: usize = 20;

    fn read(reader: &mut Reader<'_>) -> Option<Self> {
        Some(Self {
            date_time: datetime::read(reader),
            vat_a: reader.u16(),
            vat_b: reader.u16(),
            vat_c: reader.u16(),
            vat_d: reader.u16(),
            vat_m: reader.u16(),
            vat_h: reader.u16(),
            dec_point: reader.u8(),
            vat_excluded: reader.u8(),
            associated_mask: reader.u8(),
        })
    }

    fn write(&self, writer: &mut Writer<'_>) {
        datetime::write(writer, self.date_time.as_ref());
        for rate in [
            self.vat_a, self.vat_b, self.vat_c, self.vat_d, self.vat_m, self.vat_h,
        ] {
            writer.u16(rate);
        }
        writer.u8(self.dec_point);
        writer.u8(self.vat_excluded);
        writer.u8(self.associated_mask);
    }
}
