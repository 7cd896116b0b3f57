//! Little-endian field writer over a fixed-size slice.

use crate::cp1251;
use crate::U40;

/// A field writer over a mutable byte slice.
///
/// Unlike a growable encoder, the target region is sized up front by the
/// record layout, so a writer never allocates and never writes past the
/// field widths it is asked to fill.
///
/// # Example
///
/// ```
/// use fiscal_memory_buffers::Writer;
///
/// let mut slot = [0xffu8; 4];
/// let mut writer = Writer::new(&mut slot);
/// writer.u16(0x0102);
/// writer.u8(0x03);
/// assert_eq!(slot, [0x02, 0x01, 0x03, 0xff]);
/// ```
pub struct Writer<'a> {
    /// The target byte slice.
    pub uint8: &'a mut [u8],
    /// Current cursor position.
    pub x: usize,
}

impl<'a> Writer<'a> {
    /// Creates a new writer positioned at the start of `uint8`.
    pub fn new(uint8: &'a mut [u8]) -> Self {
        Self { uint8, x: 0 }
    }

    /// Returns the number of bytes left before the end of the slice.
    pub fn size(&self) -> usize {
        self.uint8.len() - self.x
    }

    /// Advances the cursor without touching the skipped bytes.
    pub fn skip(&mut self, length: usize) {
        self.x += length;
    }

    /// Copies raw bytes at the cursor.
    pub fn buf(&mut self, data: &[u8]) {
        let end = self.x + data.len();
        self.uint8[self.x..end].copy_from_slice(data);
        self.x = end;
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.uint8[self.x] = val;
        self.x += 1;
    }

    /// Writes an unsigned 16-bit integer (little-endian).
    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.buf(&val.to_le_bytes());
    }

    /// Writes an unsigned 32-bit integer (little-endian).
    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.buf(&val.to_le_bytes());
    }

    /// Writes a 40-bit unsigned integer as five little-endian bytes.
    #[inline]
    pub fn u40(&mut self, val: U40) {
        self.buf(&val.to_le_bytes());
    }

    /// Writes a fixed-width Windows-1251 text field of `length` bytes.
    ///
    /// The field is zero-filled first. Normally at most `length - 1` bytes
    /// of text are copied so the field keeps a terminating NUL; with
    /// `full_length` the text may occupy the whole field. Longer input is
    /// truncated.
    pub fn text(&mut self, value: &str, length: usize, full_length: bool) {
        let field = &mut self.uint8[self.x..self.x + length];
        field.fill(0);
        let encoded = cp1251::encode(value);
        let max = if full_length {
            length
        } else {
            length.saturating_sub(1)
        };
        let n = encoded.len().min(max);
        field[..n].copy_from_slice(&encoded[..n]);
        self.x += length;
    }
}
