//! Packed date/time fields.
//!
//! A timestamp occupies four bytes: a 16-bit time word followed by a 16-bit
//! date word, both little-endian.
//!
//! ```text
//! date: yyyyyyy mmmm ddddd     year - 2000 | month | day
//! time: hhhhh mmmmmm sssss     hours | minutes | seconds / 2
//! ```
//!
//! Both words equal to `0xFFFF` mean "unset". Resolution is two seconds;
//! odd seconds are rounded down when packing.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Utc};
use fiscal_memory_buffers::{Reader, Writer};

/// Word value of an unset date or time.
pub const DATE_EMPTY: u16 = 0xffff;
/// Year encoded by a zero year field.
pub const BASE_YEAR: i32 = 2000;
/// Largest year offset the 7-bit field holds.
const MAX_YEAR_OFFSET: i32 = 0x7f;

/// Size of a packed timestamp in bytes.
pub const PACKED_SIZE: usize = 4;

/// Unpacks a `(time, date)` word pair.
///
/// Out-of-range components carry into the next unit instead of failing, so
/// month 13 is January of the following year and day 0 is the last day of
/// the previous month.
pub fn unpack(time: u16, date: u16) -> Option<DateTime<Utc>> {
    if time == DATE_EMPTY && date == DATE_EMPTY {
        return None;
    }
    let day = (date & 0x1f) as i64;
    let month = ((date >> 5) & 0x0f) as i32;
    let year = BASE_YEAR + ((date >> 9) & 0x7f) as i32;
    let hours = ((time >> 11) & 0x1f) as i64;
    let minutes = ((time >> 5) & 0x3f) as i64;
    let seconds = ((time & 0x1f) * 2) as i64;

    let month0 = month - 1;
    let first = NaiveDate::from_ymd_opt(
        year + month0.div_euclid(12),
        (month0.rem_euclid(12) + 1) as u32,
        1,
    )?
    .and_hms_opt(0, 0, 0)?;
    let offset = (day - 1) * 86_400 + hours * 3_600 + minutes * 60 + seconds;
    Some((first + Duration::seconds(offset)).and_utc())
}

/// Packs a timestamp into a `(time, date)` word pair.
///
/// Years outside 2000..=2127 cannot be represented and pack as unset.
pub fn pack(value: Option<&DateTime<Utc>>) -> (u16, u16) {
    let Some(dt) = value else {
        return (DATE_EMPTY, DATE_EMPTY);
    };
    let year = dt.year() - BASE_YEAR;
    if !(0..=MAX_YEAR_OFFSET).contains(&year) {
        tracing::warn!(
            target: "fiscal_memory",
            timestamp = %dt,
            "year outside packed range, writing unset timestamp"
        );
        return (DATE_EMPTY, DATE_EMPTY);
    }
    let date = ((year as u16) << 9) | ((dt.month() as u16) << 5) | dt.day() as u16;
    let time =
        ((dt.hour() as u16) << 11) | ((dt.minute() as u16) << 5) | (dt.second() / 2) as u16;
    (time, date)
}

/// Reads a packed timestamp at the reader's cursor.
pub fn read(reader: &mut Reader<'_>) -> Option<DateTime<Utc>> {
    let time = reader.u16();
    let date = reader.u16();
    unpack(time, date)
}

/// Writes a packed timestamp at the writer's cursor.
pub fn write(writer: &mut Writer<'_>, value: Option<&DateTime<Utc>>) {
    let (time, date) = pack(value);
    writer.u16(time);
    writer.u16(date);
}

/// Formats a timestamp the way the editing layer expects
/// (`2024-03-01T10:15:30.000Z`).
pub fn format_iso(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Parses a user-supplied timestamp.
///
/// Accepts RFC 3339 with any offset, or a naive `YYYY-MM-DDTHH:MM:SS[.fff]`
/// / `YYYY-MM-DD HH:MM:SS` taken as UTC. Anything else yields `None`.
pub fn parse_iso(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Serde adapter for `Option<DateTime<Utc>>` fields.
///
/// A timestamp serializes as `{"raw": {"time", "date"}, "iso"}`, carrying the
/// packed words next to the ISO text, and an unset one as `null`.
///
/// Deserialization is lenient: an ISO string, `null`, or an object are
/// accepted. An object's `iso` member wins; without a parseable one the
/// `raw` words are unpacked. Anything else becomes `None`.
pub mod iso {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize)]
    struct Packed {
        raw: PackedWords,
        iso: String,
    }

    #[derive(Serialize)]
    struct PackedWords {
        time: u16,
        date: u16,
    }

    #[derive(Deserialize)]
    pub(super) struct RawWords {
        time: u64,
        date: u64,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    pub(super) enum Repr {
        Text(String),
        Object {
            #[serde(default)]
            iso: Option<String>,
            #[serde(default)]
            raw: Option<RawWords>,
        },
    }

    fn unpack_raw(raw: &RawWords) -> Option<DateTime<Utc>> {
        let time = u16::try_from(raw.time).ok()?;
        let date = u16::try_from(raw.date).ok()?;
        super::unpack(time, date)
    }

    pub(super) fn from_repr(repr: Option<Repr>) -> Option<DateTime<Utc>> {
        match repr? {
            Repr::Text(s) => super::parse_iso(&s),
            Repr::Object { iso, raw } => iso
                .as_deref()
                .and_then(super::parse_iso)
                .or_else(|| raw.as_ref().and_then(unpack_raw)),
        }
    }

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => {
                let (time, date) = super::pack(Some(dt));
                Packed {
                    raw: PackedWords { time, date },
                    iso: super::format_iso(dt),
                }
                .serialize(serializer)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Ok(from_repr(Option::<Repr>::deserialize(deserializer)?))
    }
}

/// Serde adapter for `Vec<Option<DateTime<Utc>>>` timestamp logs.
pub mod iso_list {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::iso::{from_repr, Repr};

    struct Item<'a>(&'a Option<DateTime<Utc>>);

    impl Serialize for Item<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            super::iso::serialize(self.0, serializer)
        }
    }

    pub fn serialize<S: Serializer>(
        value: &[Option<DateTime<Utc>>],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(value.iter().map(Item))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Option<DateTime<Utc>>>, D::Error> {
        let items = Vec::<Option<Repr>>::deserialize(deserializer)?;
        Ok(items.into_iter().map(from_repr).collect())
    }
}
