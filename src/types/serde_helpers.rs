//! Custom serde helpers for SouthXchange's serialization formats.

use serde::{Deserialize, Deserializer, de};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

const DATETIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Parse an exchange date string into a UTC timestamp.
///
/// SouthXchange reports dates without an offset, in UTC, optionally with a
/// fraction of up to seven digits (`2022-11-06T16:50:23.2770000`). Digits
/// beyond nanosecond precision are dropped.
pub fn parse_datetime(s: &str) -> Result<OffsetDateTime, String> {
    let s = s.trim().trim_end_matches('Z');
    let (whole, fraction) = match s.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (s, None),
    };

    let parsed = PrimitiveDateTime::parse(whole, DATETIME_FORMAT)
        .map_err(|e| format!("Invalid date '{s}': {e}"))?;

    let parsed = match fraction {
        Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
            let nanos = digits
                .bytes()
                .chain(std::iter::repeat(b'0'))
                .take(9)
                .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));
            parsed
                .replace_nanosecond(nanos)
                .map_err(|e| format!("Invalid date '{s}': {e}"))?
        }
        Some(_) => return Err(format!("Invalid date fraction in '{s}'")),
        None => parsed,
    };

    Ok(parsed.assume_utc())
}

/// Deserialize an exchange date string into [`OffsetDateTime`].
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use southxchange_api_client::types::serde_helpers::sxc_datetime;
///
/// #[derive(Deserialize)]
/// struct Entry {
///     #[serde(rename = "Date", with = "sxc_datetime")]
///     date: time::OffsetDateTime,
/// }
///
/// let entry: Entry = serde_json::from_str(r#"{"Date":"2022-01-01T00:00:00"}"#).unwrap();
/// assert_eq!(entry.date.unix_timestamp(), 1_640_995_200);
/// ```
pub mod sxc_datetime {
    use super::*;

    /// Deserialize a date string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_datetime(&s).map_err(de::Error::custom)
    }
}

/// Deserialize an optional exchange date string, treating `null` and `""` as `None`.
pub mod optional_sxc_datetime {
    use super::*;

    /// Deserialize an optional date string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) if !s.is_empty() => parse_datetime(&s).map(Some).map_err(de::Error::custom),
            _ => Ok(None),
        }
    }
}
