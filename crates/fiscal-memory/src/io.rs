//! Whole-file load and save.

use std::fs;
use std::path::Path;

use crate::codec::{decode_with, encode, DecodeOptions};
use crate::dump::FiscalMemoryDump;
use crate::error::{FiscalMemoryError, Result};

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    let metadata = fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(FiscalMemoryError::NotByteInput {
            path: path.to_path_buf(),
        });
    }
    Ok(fs::read(path)?)
}

/// Reads a dump image from disk and decodes it.
pub fn load_file(path: impl AsRef<Path>) -> Result<FiscalMemoryDump> {
    load_file_with(path, &DecodeOptions::default())
}

pub fn load_file_with(path: impl AsRef<Path>, options: &DecodeOptions) -> Result<FiscalMemoryDump> {
    let path = path.as_ref();
    let bytes = read_bytes(path)?;
    tracing::info!(target: "fiscal_memory", path = %path.display(), len = bytes.len(), "loading dump");
    decode_with(&bytes, options)
}

/// Reads a raw image without decoding it.
pub fn load_image(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    read_bytes(path.as_ref())
}

/// Encodes a dump and writes the whole image to disk. Returns the number of
/// bytes written.
pub fn save_file(path: impl AsRef<Path>, dump: &FiscalMemoryDump) -> Result<usize> {
    let path = path.as_ref();
    let bytes = encode(dump);
    fs::write(path, &bytes)?;
    tracing::info!(target: "fiscal_memory", path = %path.display(), len = bytes.len(), "saved dump");
    Ok(bytes.len())
}

/// Reads the JSON form of a dump.
pub fn load_json(path: impl AsRef<Path>) -> Result<FiscalMemoryDump> {
    let text = fs::read_to_string(path)?;
    FiscalMemoryDump::from_json(&text)
}

/// Writes the JSON form of a dump.
pub fn save_json(path: impl AsRef<Path>, dump: &FiscalMemoryDump) -> Result<()> {
    fs::write(path, dump.to_json()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_is_not_byte_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(dir.path()).unwrap_err();
        assert!(matches!(err, FiscalMemoryError::NotByteInput { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(dir.path().join("absent.bin")).unwrap_err();
        assert!(matches!(err, FiscalMemoryError::Io(_)));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fm.bin");
        let mut dump = FiscalMemoryDump::default();
        dump.meta.id_string = "ID0123456789ABC".to_string();
        let written = save_file(&path, &dump).unwrap();
        assert_eq!(written, 2736);
        let loaded = load_file(&path).unwrap();
        assert_eq!(loaded.meta.id_string, "ID0123456789ABC");
    }
}
