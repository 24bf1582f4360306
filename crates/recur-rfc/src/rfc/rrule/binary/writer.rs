//! Encoder for the current binary layout.

use chrono_tz::Tz;

use super::{CURRENT_LENGTH, CURRENT_VERSION};
use crate::rfc::rrule::core::{EndPolicy, MonthlyAnchor, Period, RecurrenceRule, WeeklyDays};
use crate::rfc::rrule::expand::convert_to_utc_lenient;

/// Bit 0 of the day selector.
pub(super) const SELECTOR_IN_USE: i16 = 0x01;
/// Value stored when a rule has no end date.
pub(super) const NO_END_DATE: i64 = i64::MIN;

pub(super) const fn period_code(period: Period) -> u8 {
    match period {
        Period::None => 0,
        Period::Daily => 1,
        Period::Weekly => 2,
        Period::Monthly => 3,
        Period::Yearly => 4,
    }
}

/// Built rules keep frequency and end count within `i32`.
pub(super) fn write_current(rule: &RecurrenceRule, timezone: Tz) -> Vec<u8> {
    let mut out = Vec::with_capacity(CURRENT_LENGTH);

    let day_selector = match (rule.weekly_days(), rule.monthly_anchor()) {
        (Some(WeeklyDays::SameAsStart), _) => SELECTOR_IN_USE,
        (Some(WeeklyDays::On(days)), _) => SELECTOR_IN_USE | (i16::from(days.bits()) << 1),
        (_, Some(MonthlyAnchor::NthWeekday { weekday, week })) => {
            SELECTOR_IN_USE | (1 << (weekday.index() + 1)) | (i16::from(week + 4) << 8)
        }
        _ => 0,
    };
    let day_in_month = match rule.monthly_anchor() {
        Some(MonthlyAnchor::DayOfMonth(day)) => day,
        _ => 0,
    };
    let (end_count, end_date) = match rule.end_policy() {
        EndPolicy::Never => (0, NO_END_DATE),
        EndPolicy::ByCount(count) => (count.cast_signed(), NO_END_DATE),
        EndPolicy::ByDate(date) => {
            let instant = convert_to_utc_lenient(date, timezone).unwrap_or_else(|_e| date.and_utc());
            (0, instant.timestamp_millis())
        }
    };
    let end_type: u8 = match rule.end_policy() {
        EndPolicy::Never => 0,
        EndPolicy::ByDate(_) => 1,
        EndPolicy::ByCount(_) => 2,
    };

    out.extend_from_slice(&CURRENT_VERSION.to_be_bytes());
    out.push(period_code(rule.period()));
    out.extend_from_slice(&rule.frequency().cast_signed().to_be_bytes());
    out.extend_from_slice(&day_selector.to_be_bytes());
    out.extend_from_slice(&day_in_month.to_be_bytes());
    out.push(end_type);
    out.extend_from_slice(&end_count.to_be_bytes());
    out.extend_from_slice(&end_date.to_be_bytes());

    tracing::trace!(len = out.len(), "Encoded binary rule");
    out
}
