//! Decoder for the current binary layout.

use chrono::{DateTime, Datelike};
use chrono_tz::Tz;

use super::writer::{NO_END_DATE, SELECTOR_IN_USE};
use crate::error::RfcResult;
use crate::rfc::rrule::core::date::END_DATE_YEARS;
use crate::rfc::rrule::core::{Period, RecurrenceRule, RuleBuilder, WeekdaySet};
use crate::rfc::rrule::expand::convert_to_local;
use crate::rfc::rrule::parse::{FormatError, FormatErrorKind, FormatResult};

/// Big-endian cursor over a byte slice.
pub(super) struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Offset of the next byte to read.
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Fails unless the whole input holds at least `len` bytes.
    pub fn require(&self, len: usize) -> FormatResult<()> {
        if self.bytes.len() < len {
            return Err(FormatError::truncated(len, self.bytes.len()));
        }
        Ok(())
    }

    fn take<const N: usize>(&mut self) -> FormatResult<[u8; N]> {
        let end = self.pos + N;
        let chunk = self
            .bytes
            .get(self.pos..end)
            .and_then(|slice| <[u8; N]>::try_from(slice).ok())
            .ok_or_else(|| FormatError::truncated(end, self.bytes.len()))?;
        self.pos = end;
        Ok(chunk)
    }

    pub fn read_u8(&mut self) -> FormatResult<u8> {
        Ok(u8::from_be_bytes(self.take()?))
    }

    pub fn read_i8(&mut self) -> FormatResult<i8> {
        Ok(i8::from_be_bytes(self.take()?))
    }

    pub fn read_i16(&mut self) -> FormatResult<i16> {
        Ok(i16::from_be_bytes(self.take()?))
    }

    pub fn read_i32(&mut self) -> FormatResult<i32> {
        Ok(i32::from_be_bytes(self.take()?))
    }

    pub fn read_i64(&mut self) -> FormatResult<i64> {
        Ok(i64::from_be_bytes(self.take()?))
    }
}

pub(super) fn invalid_field(offset: usize, context: impl Into<String>) -> FormatError {
    FormatError::new(FormatErrorKind::InvalidField, offset).with_context(context)
}

fn period_from_code(code: u8, offset: usize) -> FormatResult<Period> {
    match code {
        0 => Ok(Period::None),
        1 => Ok(Period::Daily),
        2 => Ok(Period::Weekly),
        3 => Ok(Period::Monthly),
        4 => Ok(Period::Yearly),
        other => Err(invalid_field(offset, format!("period {other}"))),
    }
}

/// Reads a frequency field, which must be positive.
pub(super) fn read_frequency(reader: &mut ByteReader<'_>) -> FormatResult<u32> {
    let offset = reader.position();
    let frequency = reader.read_i32()?;
    u32::try_from(frequency)
        .ok()
        .filter(|frequency| *frequency >= 1)
        .ok_or_else(|| invalid_field(offset, format!("frequency {frequency}")))
}

/// Converts stored epoch millis to wall-clock time in `timezone`.
pub(super) fn read_end_date(
    millis: i64,
    offset: usize,
    timezone: Tz,
) -> FormatResult<chrono::NaiveDateTime> {
    DateTime::from_timestamp_millis(millis)
        .map(|instant| convert_to_local(instant, timezone))
        .filter(|date| END_DATE_YEARS.contains(&date.year()))
        .ok_or_else(|| invalid_field(offset, format!("end date {millis}")))
}

pub(super) fn read_current(reader: &mut ByteReader<'_>, timezone: Tz) -> RfcResult<RecurrenceRule> {
    let period_offset = reader.position();
    let period = period_from_code(reader.read_u8()?, period_offset)?;
    let frequency = read_frequency(reader)?;
    let selector_offset = reader.position();
    let day_selector = reader.read_i16()?;
    let day_in_month = reader.read_i8()?;
    let end_type_offset = reader.position();
    let end_type = reader.read_u8()?;
    let end_count = reader.read_i32()?;
    let end_date_offset = reader.position();
    let end_date = reader.read_i64()?;

    let mut builder = RuleBuilder::new(period);
    builder.set_frequency(frequency)?;

    let in_use = day_selector & SELECTOR_IN_USE != 0;
    let day_bits = u8::try_from((day_selector >> 1) & 0x7F).unwrap_or_default();

    match period {
        Period::Weekly if in_use => {
            builder.set_weekly_days(WeekdaySet::from_bits(day_bits)?)?;
        }
        Period::Monthly if in_use => {
            let days = WeekdaySet::from_bits(day_bits)?;
            let mut iter = days.iter();
            let weekday = match (iter.next(), iter.next()) {
                (Some(weekday), None) => weekday,
                _ => {
                    return Err(invalid_field(
                        selector_offset,
                        format!("day selector {day_selector:#06x}"),
                    )
                    .into());
                }
            };
            let week = i8::try_from((day_selector >> 8) & 0xFF).unwrap_or(i8::MAX) - 4;
            builder.set_nth_weekday_of_month(weekday, week)?;
        }
        Period::Monthly => {
            builder.set_day_in_month(day_in_month)?;
        }
        _ => {}
    }

    match end_type {
        0 => {}
        1 if end_date == NO_END_DATE => {}
        1 => {
            builder.set_end_by_date(read_end_date(end_date, end_date_offset, timezone)?);
        }
        2 => {
            builder.set_end_by_count(u32::try_from(end_count).unwrap_or(0));
        }
        other => return Err(invalid_field(end_type_offset, format!("end type {other}")).into()),
    }

    builder.build()
}

