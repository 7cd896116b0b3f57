//! Codec for fiscal cash-register memory images.
//!
//! A fiscal memory image is a fixed 2560-byte header holding the device
//! identity and its change logs (serial number, fiscal-module numbers, VAT
//! rates, RAM resets, tax IDs, test-mode activity), followed by a table of
//! 162-byte Z-reports. [`decode`] turns an image into a [`FiscalMemoryDump`];
//! [`encode`] rebuilds a byte-compatible image from one, recomputing the
//! per-report counters that refer back into the change logs.
//!
//! # Example
//!
//! ```
//! use fiscal_memory::{decode, encode, FiscalMemoryDump, ZReport};
//!
//! let mut dump = FiscalMemoryDump::default();
//! dump.meta.id_string = "ПН1234567890".to_string();
//! dump.z_reports.push(Some(ZReport {
//!     z_number: 1,
//!     obig_vat_a: "109951162777".parse().unwrap(),
//!     ..ZReport::default()
//! }));
//!
//! let image = encode(&dump);
//! assert_eq!(image.len() % 16, 0);
//!
//! let back = decode(&image).unwrap();
//! let report = back.z_reports[0].as_ref().unwrap();
//! assert_eq!(report.obig_vat_a.to_string(), "109951162777");
//! assert_eq!(back.meta.id_string, "ПН1234567890");
//! ```

mod codec;
pub mod datetime;
mod dump;
mod error;
pub mod history;
pub mod io;
pub mod layout;
pub mod records;
pub mod slot;

pub use codec::{decode, decode_with, encode, verify_checksums, DecodeOptions};
pub use dump::{DumpSummary, FiscalMemoryDump, Meta};
pub use error::{ChecksumMismatch, FiscalMemoryError, Result};
pub use fiscal_memory_buffers::U40;
pub use records::{
    DerivedCounters, FmNumberRecord, SerialRecord, TaxIdRecord, VatRateChange, ZReport,
};
