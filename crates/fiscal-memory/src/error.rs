//! Fiscal memory codec error type.

use std::path::PathBuf;

use thiserror::Error;

/// A stored checksum that disagrees with the bytes of its slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumMismatch {
    /// Layout region the slot belongs to (e.g. `"vat_rates"`).
    pub region: &'static str,
    /// Slot index within the region.
    pub slot: usize,
    /// Absolute byte offset of the slot in the dump.
    pub offset: usize,
    pub stored: u8,
    pub computed: u8,
}

impl std::fmt::Display for ChecksumMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{}] at {:#06x}: stored {:#04x}, computed {:#04x}",
            self.region, self.slot, self.offset, self.stored, self.computed
        )
    }
}

#[derive(Debug, Error)]
pub enum FiscalMemoryError {
    #[error("file too small to be a valid fiscal memory dump: expected at least {expected} bytes, got {actual}")]
    TooSmall { expected: usize, actual: usize },
    #[error("input must be a regular file of bytes: {}", path.display())]
    NotByteInput { path: PathBuf },
    #[error("checksum mismatch in {0}")]
    ChecksumMismatch(ChecksumMismatch),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid dump JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FiscalMemoryError>;
