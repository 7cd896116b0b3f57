//! Attribution of Z-reports to change-log entries.
//!
//! Each Z-report carries four one-byte indices into the FM-number, tax-ID,
//! VAT-rate and RAM-reset tables, naming the entry in force at the report's
//! timestamp. The tables are not required to be sorted.

use chrono::{DateTime, Utc};

use crate::dump::FiscalMemoryDump;
use crate::records::{DerivedCounters, ZReport};

/// Index value meaning "the table has no entries".
pub const NO_RECORD: u8 = 0xff;

/// Resolves queries against one chronological table.
///
/// Built once per table and reused for every Z-report.
#[derive(Debug, Clone)]
pub struct HistoryResolver {
    dated: Vec<(usize, DateTime<Utc>)>,
    len: usize,
}

impl HistoryResolver {
    /// Builds a resolver from the timestamps of a table's entries, in table
    /// order. Entries without a timestamp keep their index but never match.
    pub fn new<I>(timestamps: I) -> Self
    where
        I: IntoIterator<Item = Option<DateTime<Utc>>>,
    {
        let mut len = 0;
        let mut dated = Vec::new();
        for (index, ts) in timestamps.into_iter().enumerate() {
            len = index + 1;
            if let Some(ts) = ts {
                dated.push((index, ts));
            }
        }
        Self { dated, len }
    }

    fn last_index(&self) -> u8 {
        match self.len {
            0 => NO_RECORD,
            n => (n - 1).min(NO_RECORD as usize) as u8,
        }
    }

    /// Returns the index of the entry in force at `query`.
    ///
    /// - empty table: [`NO_RECORD`]
    /// - no query timestamp: the last index
    /// - otherwise the entry with the latest timestamp not after `query`,
    ///   the later index winning ties
    /// - when every entry is after `query`: the last index
    ///
    /// Only timestamps are compared, never table positions. On an unsorted
    /// table this can pick an earlier index than "the last qualifying entry
    /// in table order" would; the two agree whenever the table is sorted.
    pub fn resolve(&self, query: Option<&DateTime<Utc>>) -> u8 {
        if self.len == 0 {
            return NO_RECORD;
        }
        let Some(query) = query else {
            return self.last_index();
        };
        let mut best: Option<(usize, &DateTime<Utc>)> = None;
        for (index, ts) in &self.dated {
            if ts > query {
                continue;
            }
            match best {
                Some((_, best_ts)) if ts < best_ts => {}
                _ => best = Some((*index, ts)),
            }
        }
        match best {
            Some((index, _)) => index.min(NO_RECORD as usize) as u8,
            None => self.last_index(),
        }
    }
}

/// One-shot form of [`HistoryResolver::resolve`].
pub fn resolve_index<I>(timestamps: I, query: Option<&DateTime<Utc>>) -> u8
where
    I: IntoIterator<Item = Option<DateTime<Utc>>>,
{
    HistoryResolver::new(timestamps).resolve(query)
}

/// Resolvers for the four tables a Z-report refers to.
#[derive(Debug, Clone)]
pub struct CounterResolvers {
    fm_numbers: HistoryResolver,
    tax_records: HistoryResolver,
    vat_rates: HistoryResolver,
    ram_resets: HistoryResolver,
}

impl CounterResolvers {
    /// Builds resolvers over the representable part of each table.
    pub fn new(dump: &FiscalMemoryDump) -> Self {
        let fm = dump.fm_numbers.iter().take(crate::layout::FM_NUMBER_COUNT);
        let tax = dump.tax_records.iter().take(crate::layout::TAX_ID_COUNT);
        let vat = dump.vat_rates.iter().take(crate::layout::VAT_RATE_COUNT);
        let ram = dump.ram_resets.iter().take(crate::layout::RAM_RESET_COUNT);
        Self {
            fm_numbers: HistoryResolver::new(fm.map(|r| r.as_ref().and_then(|r| r.date_time))),
            tax_records: HistoryResolver::new(tax.map(|r| r.as_ref().and_then(|r| r.date_time))),
            vat_rates: HistoryResolver::new(vat.map(|r| r.as_ref().and_then(|r| r.date_time))),
            ram_resets: HistoryResolver::new(ram.copied()),
        }
    }

    /// Computes the counters for a report from its own timestamp.
    pub fn derive(&self, report: &ZReport) -> DerivedCounters {
        let at = report.date_time.as_ref();
        DerivedCounters {
            fm_num_changes: self.fm_numbers.resolve(at),
            last_fiscalization_num: self.tax_records.resolve(at),
            tax_num_changes: self.vat_rates.resolve(at),
            ram_resets_count: self.ram_resets.resolve(at),
        }
    }
}

/// Computes the derived counters of every Z-report in `dump`, in order.
/// Absent reports have no counters.
pub fn derive_counters(dump: &FiscalMemoryDump) -> Vec<Option<DerivedCounters>> {
    let resolvers = CounterResolvers::new(dump);
    dump.z_reports
        .iter()
        .map(|report| report.as_ref().map(|report| resolvers.derive(report)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_table() {
        let empty: [Option<DateTime<Utc>>; 0] = [];
        assert_eq!(resolve_index(empty, Some(&day(1))), NO_RECORD);
        assert_eq!(resolve_index(empty, None), NO_RECORD);
    }

    #[test]
    fn test_between_entries() {
        let table = [Some(day(1)), Some(day(10)), Some(day(20))];
        assert_eq!(resolve_index(table, Some(&day(15))), 1);
        assert_eq!(resolve_index(table, Some(&day(10))), 1);
        assert_eq!(resolve_index(table, Some(&day(25))), 2);
    }

    #[test]
    fn test_before_all_entries_is_last_index() {
        let table = [Some(day(10)), Some(day(11)), Some(day(12))];
        assert_eq!(resolve_index(table, Some(&day(1))), 2);
    }

    #[test]
    fn test_missing_query_is_last_index() {
        let table = [Some(day(10)), None, Some(day(12)), None];
        assert_eq!(resolve_index(table, None), 3);
    }

    #[test]
    fn test_unsorted_takes_latest_timestamp() {
        let table = [Some(day(8)), Some(day(2)), Some(day(5))];
        assert_eq!(resolve_index(table, Some(&day(6))), 2);
        assert_eq!(resolve_index(table, Some(&day(9))), 0);
    }

    #[test]
    fn test_tie_goes_to_later_index() {
        let table = [Some(day(3)), Some(day(3)), Some(day(1))];
        assert_eq!(resolve_index(table, Some(&day(4))), 1);
    }

    #[test]
    fn test_undated_entries_never_match() {
        let table = [None, Some(day(3)), None];
        assert_eq!(resolve_index(table, Some(&day(4))), 1);
        assert_eq!(resolve_index(table, Some(&day(2))), 2);
    }

    #[test]
    fn test_unsorted_differs_from_table_order() {
        // Day 8 is the latest entry not after day 9, although day 5 is the
        // last qualifying entry in table order.
        let table = [Some(day(8)), Some(day(2)), Some(day(5))];
        assert_eq!(resolve_index(table, Some(&day(9))), 0);
        let sorted = [Some(day(2)), Some(day(5)), Some(day(8))];
        assert_eq!(resolve_index(sorted, Some(&day(9))), 2);
    }

    #[test]
    fn test_derive_counters_skips_absent_reports() {
        let dump = FiscalMemoryDump {
            fm_numbers: vec![
                Some(crate::FmNumberRecord {
                    date_time: Some(day(1)),
                    fm_number: "A".to_string(),
                }),
                Some(crate::FmNumberRecord {
                    date_time: Some(day(10)),
                    fm_number: "B".to_string(),
                }),
            ],
            ram_resets: vec![Some(day(3))],
            z_reports: vec![
                Some(ZReport {
                    z_number: 1,
                    date_time: Some(day(5)),
                    ..ZReport::default()
                }),
                None,
                Some(ZReport {
                    z_number: 2,
                    date_time: Some(day(12)),
                    ..ZReport::default()
                }),
            ],
            ..FiscalMemoryDump::default()
        };
        let counters = derive_counters(&dump);
        assert_eq!(counters.len(), 3);
        assert_eq!(
            counters[0],
            Some(DerivedCounters {
                fm_num_changes: 0,
                last_fiscalization_num: NO_RECORD,
                tax_num_changes: NO_RECORD,
                ram_resets_count: 0,
            })
        );
        assert_eq!(counters[1], None);
        assert_eq!(counters[2].map(|c| c.fm_num_changes), Some(1));
    }
}
