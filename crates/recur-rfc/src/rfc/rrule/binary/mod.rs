//! Versioned fixed-layout binary records for recurrence rules.
//!
//! All fields are big-endian. The current layout (version 102, 25 bytes):
//!
//! | offset | type | field |
//! |-------:|------|-------|
//! | 0  | i32 | version |
//! | 4  | u8  | period (0 none, 1 daily, 2 weekly, 3 monthly, 4 yearly) |
//! | 5  | i32 | frequency |
//! | 9  | i16 | day selector |
//! | 11 | i8  | day in month |
//! | 12 | u8  | end type (0 never, 1 date, 2 count) |
//! | 13 | i32 | end count |
//! | 17 | i64 | end date, epoch millis (`i64::MIN` for none) |
//!
//! The day selector sets bit 0 when in use and bits 1 to 7 for Sunday to
//! Saturday. Monthly weekday anchors also store `week + 4` in the high byte.
//!
//! Version 100 records (41 bytes) can be read but are never written.

mod legacy;
mod reader;
mod writer;

use chrono_tz::Tz;

use super::core::RecurrenceRule;
use super::parse::{FormatError, FormatErrorKind};
use crate::error::RfcResult;
use reader::ByteReader;

/// Version tag written by [`BinaryCodec::write`].
pub const CURRENT_VERSION: i32 = 102;
/// Length of a current record in bytes.
pub const CURRENT_LENGTH: usize = 25;
/// Version tag of the read-only legacy layout.
pub const LEGACY_VERSION: i32 = 100;
/// Length of a legacy record in bytes.
pub const LEGACY_LENGTH: usize = 41;

/// Converts rules to and from binary records.
///
/// End dates are stored as the UTC instant of their wall-clock time in the
/// codec's zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryCodec {
    timezone: Tz,
}

impl BinaryCodec {
    #[must_use]
    pub const fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    #[must_use]
    pub const fn utc() -> Self {
        Self::new(Tz::UTC)
    }

    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Encodes a rule in the current layout.
    #[must_use]
    pub fn write(&self, rule: &RecurrenceRule) -> Vec<u8> {
        writer::write_current(rule, self.timezone)
    }

    /// ## Summary
    /// Decodes a rule from a current or legacy record. Bytes past the
    /// record length are ignored.
    ///
    /// ## Errors
    /// Returns `RfcError::Format` with `UnknownVersion`, `Truncated` or
    /// `InvalidField`, or `RfcError::InvalidArgument` if decoded values are
    /// out of range for a rule.
    #[tracing::instrument(level = "trace", skip_all, fields(len = bytes.len()))]
    pub fn read(&self, bytes: &[u8]) -> RfcResult<RecurrenceRule> {
        let mut reader = ByteReader::new(bytes);
        let version = reader.read_i32()?;
        tracing::trace!(version, "Decoding binary rule");

        match version {
            CURRENT_VERSION => {
                reader.require(CURRENT_LENGTH)?;
                reader::read_current(&mut reader, self.timezone)
            }
            LEGACY_VERSION => {
                reader.require(LEGACY_LENGTH)?;
                legacy::read_legacy(&mut reader, self.timezone)
            }
            other => Err(FormatError::new(FormatErrorKind::UnknownVersion, 0)
                .with_context(other.to_string())
                .into()),
        }
    }
}

impl Default for BinaryCodec {
    fn default() -> Self {
        Self::utc()
    }
}

#[cfg(test)]
#[path = "binary_tests.rs"]
mod tests;
