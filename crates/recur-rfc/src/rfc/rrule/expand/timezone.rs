//! Timezone resolution and conversion between UTC instants and wall-clock time.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::error::RfcError;

/// Error during timezone conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Unknown or invalid timezone identifier.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Non-existent time during DST gap.
    #[error("Non-existent time (DST gap): {0}")]
    NonExistentTime(String),
}

impl From<ConversionError> for RfcError {
    fn from(err: ConversionError) -> Self {
        Self::Timezone(err.to_string())
    }
}

/// ## Summary
/// Resolves a timezone identifier to a `chrono_tz::Tz`.
///
/// Vendor prefixes such as `/mozilla.org/` are stripped before the name is
/// looked up in the IANA database.
///
/// ## Errors
/// Returns `ConversionError::UnknownTimezone` if the identifier cannot be resolved.
pub fn resolve_timezone(tzid: &str) -> Result<Tz, ConversionError> {
    let normalized = normalize_tzid(tzid);
    Tz::from_str(normalized).map_err(|_e| ConversionError::UnknownTimezone(tzid.to_string()))
}

fn normalize_tzid(tzid: &str) -> &str {
    let trimmed = tzid.trim();
    trimmed
        .strip_prefix("/mozilla.org/")
        .or_else(|| trimmed.strip_prefix("/softwarestudio.org/"))
        .unwrap_or(trimmed)
}

/// ## Summary
/// Converts a wall-clock time in `tz` to UTC.
///
/// Ambiguous times during a DST fold resolve to the earlier instant.
///
/// ## Errors
/// Returns `ConversionError::NonExistentTime` if the time falls in a DST gap.
pub fn convert_to_utc(local_time: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>, ConversionError> {
    match tz.from_local_datetime(&local_time) {
        LocalResult::None => Err(ConversionError::NonExistentTime(format!(
            "{local_time} in timezone {tz}"
        ))),
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _latest) => Ok(earliest.with_timezone(&Utc)),
    }
}

/// ## Summary
/// Converts a wall-clock time in `tz` to UTC, shifting times that fall in a
/// DST gap forward by one hour.
///
/// ## Errors
/// Returns an error if the shifted time still does not exist.
pub fn convert_to_utc_lenient(
    local_time: NaiveDateTime,
    tz: Tz,
) -> Result<DateTime<Utc>, ConversionError> {
    match convert_to_utc(local_time, tz) {
        Ok(dt) => Ok(dt),
        Err(ConversionError::NonExistentTime(_)) => {
            let shifted = local_time + chrono::Duration::hours(1);
            convert_to_utc(shifted, tz)
        }
        Err(e) => Err(e),
    }
}

/// Converts a UTC instant to wall-clock time in `tz`.
#[must_use]
pub fn convert_to_local(instant: DateTime<Utc>, tz: Tz) -> NaiveDateTime {
    instant.with_timezone(&tz).naive_local()
}
