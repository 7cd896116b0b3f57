//! 40-bit unsigned integer.

use std::fmt;
use std::str::FromStr;

use crate::BufferError;

/// An unsigned integer limited to 40 bits, stored on the wire as five
/// little-endian bytes.
///
/// Monetary totals routinely exceed `u32::MAX`, so the value is kept in a
/// `u64` and exchanged with callers as decimal text.
///
/// ```
/// use fiscal_memory_buffers::U40;
///
/// let v: U40 = "109951162777".parse().unwrap();
/// assert_eq!(U40::from_le_bytes(v.to_le_bytes()), v);
/// assert_eq!(v.to_string(), "109951162777");
/// assert!("1099511627776".parse::<U40>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct U40(u64);

impl U40 {
    pub const ZERO: U40 = U40(0);
    pub const MAX: U40 = U40((1 << 40) - 1);

    /// Returns `None` if `value` needs more than 40 bits.
    pub const fn new(value: u64) -> Option<Self> {
        if value > Self::MAX.0 {
            None
        } else {
            Some(U40(value))
        }
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    pub fn from_le_bytes(bytes: [u8; 5]) -> Self {
        let mut value = 0u64;
        for (i, b) in bytes.iter().enumerate() {
            value |= (*b as u64) << (8 * i);
        }
        U40(value)
    }

    pub fn to_le_bytes(self) -> [u8; 5] {
        let mut out = [0u8; 5];
        for (i, b) in out.iter_mut().enumerate() {
            *b = (self.0 >> (8 * i)) as u8;
        }
        out
    }
}

impl fmt::Display for U40 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for U40 {
    type Err = BufferError;

    /// Parses decimal text. Surrounding whitespace is ignored and an empty
    /// string reads as zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut value = 0u64;
        for b in s.bytes() {
            if !b.is_ascii_digit() {
                return Err(BufferError::InvalidDigit);
            }
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add((b - b'0') as u64))
                .ok_or(BufferError::Int40Overflow)?;
            if value > Self::MAX.0 {
                return Err(BufferError::Int40Overflow);
            }
        }
        Ok(U40(value))
    }
}

impl TryFrom<u64> for U40 {
    type Error = BufferError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        U40::new(value).ok_or(BufferError::Int40Overflow)
    }
}

impl From<u32> for U40 {
    fn from(value: u32) -> Self {
        U40(value as u64)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::U40;
    use serde::de::{self, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;

    impl Serialize for U40 {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    struct U40Visitor;

    impl<'de> Visitor<'de> for U40Visitor {
        type Value = U40;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a decimal string or non-negative integer below 2^40")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<U40, E> {
            v.parse().map_err(E::custom)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<U40, E> {
            U40::try_from(v).map_err(E::custom)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<U40, E> {
            u64::try_from(v)
                .map_err(|_| E::custom("negative 40-bit value"))
                .and_then(|v| self.visit_u64(v))
        }

        fn visit_unit<E: de::Error>(self) -> Result<U40, E> {
            Ok(U40::ZERO)
        }
    }

    impl<'de> Deserialize<'de> for U40 {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<U40, D::Error> {
            deserializer.deserialize_any(U40Visitor)
        }
    }
}
