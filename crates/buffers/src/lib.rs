//! Byte field utilities for fiscal memory images.
//!
//! Every multi-byte quantity in a fiscal memory dump is little-endian and
//! every text field is a fixed-width run of Windows-1251 bytes padded with
//! NULs. This crate provides the primitives the record codecs are built on.
//!
//! # Overview
//!
//! - [`Reader`] - Reads little-endian fields from a byte slice with cursor tracking
//! - [`Writer`] - Writes little-endian fields into a fixed-size mutable slice
//! - [`U40`] - 40-bit unsigned integer stored as five little-endian bytes
//! - [`cp1251`] - Windows-1251 decode/encode
//! - [`hex_slot`] - Hex rendering of raw slots for diagnostics
//!
//! # Example
//!
//! ```
//! use fiscal_memory_buffers::{Reader, Writer, U40};
//!
//! let mut slot = [0u8; 12];
//! let mut writer = Writer::new(&mut slot);
//! writer.u16(0x0203);
//! writer.u40(U40::new(109_951_162_777).unwrap());
//! writer.text("AB", 5, false);
//!
//! let mut reader = Reader::new(&slot);
//! assert_eq!(reader.u16(), 0x0203);
//! assert_eq!(reader.u40().to_string(), "109951162777");
//! assert_eq!(reader.text(5), "AB");
//! ```

pub mod cp1251;
mod hex;
mod reader;
mod u40;
mod writer;

pub use hex::{hex_octets, hex_slot};
pub use reader::Reader;
pub use u40::U40;
pub use writer::Writer;

/// Error type for buffer operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// A decimal string contained something other than ASCII digits.
    InvalidDigit,
    /// The value does not fit in 40 bits.
    Int40Overflow,
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::InvalidDigit => write!(f, "invalid decimal digit"),
            BufferError::Int40Overflow => write!(f, "value does not fit in 40 bits"),
        }
    }
}

impl std::error::Error for BufferError {}
