//! Whole-image decode and encode.

use fiscal_memory_buffers::{Reader, Writer};

use crate::dump::FiscalMemoryDump;
use crate::error::{ChecksumMismatch, FiscalMemoryError, Result};
use crate::history::derive_counters;
use crate::layout::{
    encoded_size, z_report_slots, Content, Region, Table, HEADER_REGIONS, HEADER_SIZE,
};
use crate::records::{
    decode_slot, encode_slot, FmNumberRecord, Record, SerialRecord, TaxIdRecord, VatRateChange,
    ZReport,
};
use crate::slot::{self, FILL};

/// Decoder settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Fail on the first populated slot whose checksum is wrong. Off by
    /// default: the codec reproduces the image, it does not audit it.
    pub verify_checksums: bool,
}

/// Decodes an image with default options.
///
/// Fails only when `bytes` is shorter than the fixed header. Checksums are
/// not verified; see [`decode_with`].
pub fn decode(bytes: &[u8]) -> Result<FiscalMemoryDump> {
    decode_with(bytes, &DecodeOptions::default())
}

pub fn decode_with(bytes: &[u8], options: &DecodeOptions) -> Result<FiscalMemoryDump> {
    ensure_header(bytes)?;
    if options.verify_checksums {
        if let Some(mismatch) = verify_checksums(bytes)?.into_iter().next() {
            return Err(FiscalMemoryError::ChecksumMismatch(mismatch));
        }
    }

    let mut dump = FiscalMemoryDump::default();
    for region in &HEADER_REGIONS {
        let data = &bytes[region.offset..region.end()];
        match region.content {
            Content::Filler => {}
            Content::Flag => dump.meta.flag = data[0],
            Content::IdString => dump.meta.id_string = Reader::new(data).text(region.len),
            Content::KsefNumbers => dump.meta.ksef_numbers = data.to_vec(),
            Content::Table(table) => decode_table(table, region, data, &mut dump),
        }
    }

    let slots = z_report_slots(bytes.len());
    dump.z_reports = bytes[HEADER_SIZE..HEADER_SIZE + slots * ZReport::SIZE]
        .chunks_exact(ZReport::SIZE)
        .filter_map(decode_slot::<ZReport>)
        .map(Some)
        .collect();

    tracing::debug!(
        target: "fiscal_memory",
        len = bytes.len(),
        z_slots = slots,
        z_reports = dump.z_reports.len(),
        "decoded fiscal memory image"
    );
    Ok(dump)
}

fn ensure_header(bytes: &[u8]) -> Result<()> {
    if bytes.len() < HEADER_SIZE {
        return Err(FiscalMemoryError::TooSmall {
            expected: HEADER_SIZE,
            actual: bytes.len(),
        });
    }
    Ok(())
}

fn decode_entries<R: Record>(region: &Region, data: &[u8]) -> Vec<Option<R>> {
    let entries: Vec<Option<R>> = data
        .chunks_exact(R::SIZE)
        .filter_map(decode_slot::<R>)
        .map(Some)
        .collect();
    tracing::debug!(
        target: "fiscal_memory",
        region = region.name,
        populated = entries.len(),
        "decoded table"
    );
    entries
}

fn decode_table(table: Table, region: &Region, data: &[u8], dump: &mut FiscalMemoryDump) {
    match table {
        Table::Serial => {
            dump.serial_record = decode_entries::<SerialRecord>(region, data)
                .into_iter()
                .next()
                .flatten();
        }
        Table::FmNumbers => dump.fm_numbers = decode_entries::<FmNumberRecord>(region, data),
        Table::VatRates => dump.vat_rates = decode_entries::<VatRateChange>(region, data),
        Table::RamResets => dump.ram_resets = decode_entries(region, data),
        Table::TaxIds => dump.tax_records = decode_entries::<TaxIdRecord>(region, data),
        Table::TestRecords => dump.test_records = decode_entries(region, data),
    }
}

/// Encodes a dump into a freshly sized image.
///
/// The image is pre-filled with `0xFF`, so anything not written reads back
/// as empty. Derived Z-report counters are recomputed from the change logs;
/// values carried in the dump are ignored.
pub fn encode(dump: &FiscalMemoryDump) -> Vec<u8> {
    let mut buf = vec![FILL; encoded_size(dump.z_reports.len())];

    for region in &HEADER_REGIONS {
        let data = &mut buf[region.offset..region.end()];
        match region.content {
            Content::Filler => {}
            Content::Flag => data[0] = dump.meta.flag,
            Content::IdString => Writer::new(data).text(&dump.meta.id_string, region.len, true),
            Content::KsefNumbers => {
                for (i, b) in data.iter_mut().enumerate() {
                    *b = dump.meta.ksef_numbers.get(i).copied().unwrap_or(0);
                }
            }
            Content::Table(table) => encode_table(table, region, data, dump),
        }
    }

    let counters = derive_counters(dump);
    let tail = &mut buf[HEADER_SIZE..];
    let reports = dump.z_reports.iter().zip(counters);
    for (slot, (report, counters)) in tail.chunks_exact_mut(ZReport::SIZE).zip(reports) {
        let (Some(report), Some(counters)) = (report, counters) else {
            continue;
        };
        let report = ZReport {
            counters,
            ..report.clone()
        };
        encode_slot(&report, slot);
    }

    tracing::debug!(
        target: "fiscal_memory",
        len = buf.len(),
        z_reports = dump.z_reports.len(),
        "encoded fiscal memory image"
    );
    buf
}

fn encode_entries<R: Record>(region: &Region, data: &mut [u8], entries: &[Option<R>]) {
    let capacity = data.len() / R::SIZE;
    if entries.len() > capacity {
        tracing::warn!(
            target: "fiscal_memory",
            region = region.name,
            supplied = entries.len(),
            capacity,
            "table exceeds capacity, extra entries dropped"
        );
    }
    for (slot, entry) in data.chunks_exact_mut(R::SIZE).zip(entries) {
        if let Some(entry) = entry {
            encode_slot(entry, slot);
        }
    }
}

fn encode_table(table: Table, region: &Region, data: &mut [u8], dump: &FiscalMemoryDump) {
    match table {
        Table::Serial => {
            encode_entries(region, data, std::slice::from_ref(&dump.serial_record))
        }
        Table::FmNumbers => encode_entries(region, data, &dump.fm_numbers),
        Table::VatRates => encode_entries(region, data, &dump.vat_rates),
        Table::RamResets => encode_entries(region, data, &dump.ram_resets),
        Table::TaxIds => encode_entries(region, data, &dump.tax_records),
        Table::TestRecords => encode_entries(region, data, &dump.test_records),
    }
}

/// Lists every populated slot whose stored checksum is wrong.
///
/// Covers the serial, FM-number, VAT-rate and tax-ID tables and the
/// Z-report table. Timestamp logs carry no checksum.
pub fn verify_checksums(bytes: &[u8]) -> Result<Vec<ChecksumMismatch>> {
    ensure_header(bytes)?;
    let mut mismatches = Vec::new();
    let mut check = |region: &'static str, index: usize, offset: usize, data: &[u8]| {
        if let Some((stored, computed)) = slot::checksum_mismatch(data) {
            mismatches.push(ChecksumMismatch {
                region,
                slot: index,
                offset,
                stored,
                computed,
            });
        }
    };

    for region in &HEADER_REGIONS {
        let Content::Table(table) = region.content else {
            continue;
        };
        if !table.checksummed() {
            continue;
        }
        let data = &bytes[region.offset..region.end()];
        for (index, slot) in data.chunks_exact(table.slot_size()).enumerate() {
            check(region.name, index, region.offset + index * table.slot_size(), slot);
        }
    }

    let slots = z_report_slots(bytes.len());
    for index in 0..slots {
        let offset = HEADER_SIZE + index * ZReport::SIZE;
        check("z_reports", index, offset, &bytes[offset..offset + ZReport::SIZE]);
    }

    if !mismatches.is_empty() {
        tracing::warn!(
            target: "fiscal_memory",
            count = mismatches.len(),
            "checksum mismatches found"
        );
    }
    Ok(mismatches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_small() {
        let err = decode(&[0xff; HEADER_SIZE - 1]).unwrap_err();
        assert!(matches!(
            err,
            FiscalMemoryError::TooSmall {
                expected: HEADER_SIZE,
                actual
            } if actual == HEADER_SIZE - 1
        ));
    }

    #[test]
    fn test_blank_header_decodes_empty() {
        let dump = decode(&[0xff; HEADER_SIZE]).unwrap();
        assert!(dump.serial_record.is_none());
        assert!(dump.fm_numbers.is_empty());
        assert!(dump.ram_resets.is_empty());
        assert!(dump.z_reports.is_empty());
        assert_eq!(dump.meta.flag, 0xff);
        assert_eq!(dump.meta.ksef_numbers, vec![0xff; 32]);
    }

    #[test]
    fn test_default_dump_encodes_to_fill() {
        let buf = encode(&FiscalMemoryDump::default());
        assert_eq!(buf.len(), 2736);
        assert_eq!(buf[0], 0);
        assert_eq!(&buf[1..16], &[0; 15]);
        assert_eq!(&buf[0x20..0x40], &[0; 32]);
        assert!(buf[0x40..].iter().all(|&b| b == 0xff));
    }

    #[test]
    fn test_verify_flags_corruption() {
        let mut dump = FiscalMemoryDump::default();
        dump.z_reports.push(Some(ZReport {
            z_number: 1,
            ..ZReport::default()
        }));
        let mut buf = encode(&dump);
        assert!(verify_checksums(&buf).unwrap().is_empty());

        buf[HEADER_SIZE] ^= 0x01;
        let found = verify_checksums(&buf).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].region, "z_reports");
        assert_eq!(found[0].offset, HEADER_SIZE);

        assert!(decode(&buf).is_ok());
        let strict = DecodeOptions {
            verify_checksums: true,
        };
        assert!(matches!(
            decode_with(&buf, &strict),
            Err(FiscalMemoryError::ChecksumMismatch(_))
        ));
    }
}
