//! Byte layout of a fiscal memory image.
//!
//! The fixed header is an ordered list of named regions. Each region is a
//! single declarative fact (offset, length, content), and the codec walks
//! the list instead of accumulating offsets by hand. The variable-length
//! Z-report table follows the header.

use crate::records::{FmNumberRecord, Record, SerialRecord, TaxIdRecord, VatRateChange, ZReport};

/// Size of the fixed header preceding the Z-report table.
pub const HEADER_SIZE: usize = 0xa00;
/// Encoded images are padded to a multiple of this.
pub const ALIGNMENT: usize = 16;
/// Empty Z-report slots appended after the last report on encode.
pub const Z_REPORT_SENTINEL_COUNT: usize = 1;

pub const ID_STRING_LEN: usize = 15;
pub const KSEF_SLOT_COUNT: usize = 32;

pub const FM_NUMBER_COUNT: usize = 8;
pub const VAT_RATE_COUNT: usize = 16;
pub const RAM_RESET_COUNT: usize = 100;
pub const TAX_ID_COUNT: usize = 10;
pub const TEST_RECORD_COUNT: usize = 32;

/// Reserved size of the FM-number block.
pub const FM_NUMBERS_BLOCK_SIZE: usize = 0x100;
/// Reserved size of the tax-ID block.
pub const TAX_ID_BLOCK_SIZE: usize = 0x100;

/// A fixed-capacity table in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Serial,
    FmNumbers,
    VatRates,
    RamResets,
    TaxIds,
    TestRecords,
}

impl Table {
    pub const fn slot_size(self) -> usize {
        match self {
            Table::Serial => SerialRecord::SIZE,
            Table::FmNumbers => FmNumberRecord::SIZE,
            Table::VatRates => VatRateChange::SIZE,
            Table::RamResets | Table::TestRecords => crate::datetime::PACKED_SIZE,
            Table::TaxIds => TaxIdRecord::SIZE,
        }
    }

    pub const fn capacity(self) -> usize {
        match self {
            Table::Serial => 1,
            Table::FmNumbers => FM_NUMBER_COUNT,
            Table::VatRates => VAT_RATE_COUNT,
            Table::RamResets => RAM_RESET_COUNT,
            Table::TaxIds => TAX_ID_COUNT,
            Table::TestRecords => TEST_RECORD_COUNT,
        }
    }

    /// Whether the table's slots end in a checksum byte.
    pub const fn checksummed(self) -> bool {
        !matches!(self, Table::RamResets | Table::TestRecords)
    }
}

/// What a header region holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    /// Reserved bytes, never interpreted and left as fill on encode.
    Filler,
    Flag,
    IdString,
    KsefNumbers,
    Table(Table),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub name: &'static str,
    pub offset: usize,
    pub len: usize,
    pub content: Content,
}

impl Region {
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Byte range of slot `index` for table regions.
    pub fn slot_range(&self, index: usize) -> Option<std::ops::Range<usize>> {
        let Content::Table(table) = self.content else {
            return None;
        };
        if index >= table.capacity() {
            return None;
        }
        let start = self.offset + index * table.slot_size();
        Some(start..start + table.slot_size())
    }
}

const fn table(name: &'static str, offset: usize, table: Table) -> Region {
    Region {
        name,
        offset,
        len: table.slot_size() * table.capacity(),
        content: Content::Table(table),
    }
}

const fn filler(name: &'static str, offset: usize, len: usize) -> Region {
    Region {
        name,
        offset,
        len,
        content: Content::Filler,
    }
}

/// The fixed header, in order.
pub const HEADER_REGIONS: [Region; 17] = [
    Region {
        name: "flag",
        offset: 0x000,
        len: 1,
        content: Content::Flag,
    },
    Region {
        name: "id_string",
        offset: 0x001,
        len: ID_STRING_LEN,
        content: Content::IdString,
    },
    filler("fill_meta", 0x010, 0x10),
    Region {
        name: "ksef_numbers",
        offset: 0x020,
        len: KSEF_SLOT_COUNT,
        content: Content::KsefNumbers,
    },
    filler("fill_ksef", 0x040, 0x20),
    table("serial", 0x060, Table::Serial),
    filler("fill_serial", 0x080, 0x80),
    table("fm_numbers", 0x100, Table::FmNumbers),
    filler(
        "fill_fm_numbers",
        0x200,
        FM_NUMBERS_BLOCK_SIZE - FM_NUMBER_COUNT * FmNumberRecord::SIZE,
    ),
    table("vat_rates", 0x200, Table::VatRates),
    filler("fill_vat_rates", 0x340, 0xc0),
    table("ram_resets", 0x400, Table::RamResets),
    filler("fill_ram_resets", 0x590, 0x270),
    table("tax_ids", 0x800, Table::TaxIds),
    filler(
        "fill_tax_ids",
        0x8f0,
        TAX_ID_BLOCK_SIZE - TAX_ID_COUNT * TaxIdRecord::SIZE,
    ),
    table("test_records", 0x900, Table::TestRecords),
    filler("fill_test_records", 0x980, 0x80),
];

/// Looks up the header region holding `table`.
pub fn table_region(table: Table) -> &'static Region {
    HEADER_REGIONS
        .iter()
        .find(|r| r.content == Content::Table(table))
        .unwrap_or_else(|| unreachable!("every table has a header region"))
}

/// Number of whole Z-report slots in an image of `len` bytes.
pub fn z_report_slots(len: usize) -> usize {
    len.saturating_sub(HEADER_SIZE) / ZReport::SIZE
}

/// Size of an encoded image holding `reports` Z-reports.
pub fn encoded_size(reports: usize) -> usize {
    let base = HEADER_SIZE + (reports + Z_REPORT_SENTINEL_COUNT) * ZReport::SIZE;
    base.div_ceil(ALIGNMENT) * ALIGNMENT
}
