//! Little-endian field reader with cursor tracking.

use crate::cp1251;
use crate::U40;

/// A field reader over a byte slice.
///
/// The reader maintains a cursor position and provides methods for reading
/// little-endian integers, 40-bit wide integers and fixed-width text.
/// Callers size the slice to the record being read; reading past its end
/// panics like slice indexing does.
///
/// # Example
///
/// ```
/// use fiscal_memory_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03, 0x04];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.u8(), 0x01);
/// assert_eq!(reader.u16(), 0x0302);
/// ```
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        Self { uint8, x: 0 }
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.uint8.len() - self.x
    }

    /// Advances the cursor by the given number of bytes.
    pub fn skip(&mut self, length: usize) {
        self.x += length;
    }

    /// Returns a subarray of the given size and advances the cursor.
    pub fn buf(&mut self, size: usize) -> &'a [u8] {
        let x = self.x;
        let end = x + size;
        let bin = &self.uint8[x..end];
        self.x = end;
        bin
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self) -> u8 {
        let val = self.uint8[self.x];
        self.x += 1;
        val
    }

    /// Reads an unsigned 16-bit integer (little-endian).
    #[inline]
    pub fn u16(&mut self) -> u16 {
        let val = u16::from_le_bytes([self.uint8[self.x], self.uint8[self.x + 1]]);
        self.x += 2;
        val
    }

    /// Reads an unsigned 32-bit integer (little-endian).
    #[inline]
    pub fn u32(&mut self) -> u32 {
        let val = u32::from_le_bytes([
            self.uint8[self.x],
            self.uint8[self.x + 1],
            self.uint8[self.x + 2],
            self.uint8[self.x + 3],
        ]);
        self.x += 4;
        val
    }

    /// Reads a 40-bit unsigned integer stored as five little-endian bytes.
    #[inline]
    pub fn u40(&mut self) -> U40 {
        let val = U40::from_le_bytes([
            self.uint8[self.x],
            self.uint8[self.x + 1],
            self.uint8[self.x + 2],
            self.uint8[self.x + 3],
            self.uint8[self.x + 4],
        ]);
        self.x += 5;
        val
    }

    /// Reads a fixed-width Windows-1251 text field of `length` bytes.
    ///
    /// Trailing NUL padding is stripped; anything before the padding,
    /// embedded NULs included, is kept.
    pub fn text(&mut self, length: usize) -> String {
        let raw = self.buf(length);
        let mut decoded = cp1251::decode(raw);
        let trimmed = decoded.trim_end_matches('\0').len();
        decoded.truncate(trimmed);
        decoded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u8(), 0x01);
        assert_eq!(reader.u8(), 0x02);
        assert_eq!(reader.u8(), 0x03);
    }

    #[test]
    fn test_u16() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u16(), 0x0201);
        assert_eq!(reader.u16(), 0x0403);
    }

    #[test]
    fn test_u32() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u32(), 0x04030201);
    }

    #[test]
    fn test_u40() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0xaa];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u40().get(), 0x05_0403_0201);
        assert_eq!(reader.size(), 1);
    }

    #[test]
    fn test_skip() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = Reader::new(&data);
        reader.skip(2);
        assert_eq!(reader.u8(), 0x03);
    }

    #[test]
    fn test_text_strips_trailing_nul() {
        let data = b"AB\0C\0\0\0";
        let mut reader = Reader::new(data);
        assert_eq!(reader.text(7), "AB\0C");
        assert_eq!(reader.size(), 0);
    }

    #[test]
    fn test_text_cyrillic() {
        let data = [0xcf, 0xd0, 0xc1, 0x00];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.text(4), "ПРБ");
    }
}
