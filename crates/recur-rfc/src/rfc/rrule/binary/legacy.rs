//! Decoder for the version 100 layout.
//!
//! | offset | type | field |
//! |-------:|------|-------|
//! | 0  | i32 | version |
//! | 4  | u8  | default flag, discarded |
//! | 5  | i64 | start date, epoch millis |
//! | 13 | i32 | period (-1 none, 0 daily, 1 weekly, 2 monthly, 3 yearly) |
//! | 17 | i32 | frequency |
//! | 21 | i32 | day setting |
//! | 25 | i32 | end type (0 never, 1 date, 2 count) |
//! | 29 | i32 | end count |
//! | 33 | i64 | end date, epoch millis (0 for none) |

use chrono::{DateTime, Datelike};
use chrono_tz::Tz;

use super::reader::{ByteReader, invalid_field, read_end_date, read_frequency};
use crate::error::RfcResult;
use crate::rfc::rrule::core::date::week_of_month;
use crate::rfc::rrule::core::{Period, RecurrenceRule, RuleBuilder, Weekday, WeekdaySet};
use crate::rfc::rrule::expand::convert_to_local;

/// Monthly day settings. Any other value means the start date's day of month.
const SAME_WEEKDAY_OF_MONTH: i32 = 1;
const LAST_DAY_OF_MONTH: i32 = 2;

fn period_from_legacy(code: i32, offset: usize) -> RfcResult<Period> {
    match code {
        -1 => Ok(Period::None),
        0 => Ok(Period::Daily),
        1 => Ok(Period::Weekly),
        2 => Ok(Period::Monthly),
        3 => Ok(Period::Yearly),
        other => Err(invalid_field(offset, format!("period {other}")).into()),
    }
}

pub(super) fn read_legacy(reader: &mut ByteReader<'_>, timezone: Tz) -> RfcResult<RecurrenceRule> {
    let _default = reader.read_u8()?;
    let start_offset = reader.position();
    let start_millis = reader.read_i64()?;
    let period_offset = reader.position();
    let period = period_from_legacy(reader.read_i32()?, period_offset)?;
    let frequency = read_frequency(reader)?;
    let day_setting = reader.read_i32()?;
    let end_type_offset = reader.position();
    let end_type = reader.read_i32()?;
    let end_count = reader.read_i32()?;
    let end_date_offset = reader.position();
    let end_date = reader.read_i64()?;

    let mut builder = RuleBuilder::new(period);
    builder.set_frequency(frequency)?;

    match period {
        Period::Weekly => {
            let day_bits = u8::try_from((day_setting >> 1) & 0x7F).unwrap_or_default();
            builder.set_weekly_days(WeekdaySet::from_bits(day_bits)?)?;
        }
        Period::Monthly => match day_setting {
            SAME_WEEKDAY_OF_MONTH => {
                let start = DateTime::from_timestamp_millis(start_millis)
                    .map(|instant| convert_to_local(instant, timezone).date())
                    .ok_or_else(|| invalid_field(start_offset, format!("start date {start_millis}")))?;
                let weekday = Weekday::from(start.weekday());
                let week = match week_of_month(start) {
                    5 => -1,
                    week => i8::try_from(week).unwrap_or(-1),
                };
                builder.set_nth_weekday_of_month(weekday, week)?;
            }
            LAST_DAY_OF_MONTH => {
                builder.set_day_in_month(-1)?;
            }
            _ => {
                builder.set_day_in_month(0)?;
            }
        },
        _ => {}
    }

    match end_type {
        0 => {}
        1 if end_date == 0 => {}
        1 => {
            builder.set_end_by_date(read_end_date(end_date, end_date_offset, timezone)?);
        }
        2 => {
            builder.set_end_by_count(u32::try_from(end_count).unwrap_or(0));
        }
        other => return Err(invalid_field(end_type_offset, format!("end type {other}")).into()),
    }

    tracing::trace!(period = %period, "Decoded legacy binary rule");
    builder.build()
}
