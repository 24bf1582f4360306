//! Recurrence rule serialization.
//!
//! Produces the `RRULE:` text form. Attribute order is fixed so the output is
//! canonical for a given rule.

use chrono::{NaiveDateTime, NaiveTime};
use chrono_tz::Tz;

use crate::rfc::rrule::core::{EndPolicy, MonthlyAnchor, RecurrenceRule, WeeklyDays};

/// Prefix of every serialized rule.
pub const RRULE_SIGNATURE: &str = "RRULE:";

/// Zone names whose wall-clock time is UTC.
const UTC_NAMES: [&str; 8] = [
    "UTC",
    "Etc/UTC",
    "UCT",
    "Etc/UCT",
    "Universal",
    "Etc/Universal",
    "Zulu",
    "Etc/Zulu",
];

/// Returns whether wall-clock time in `tz` is UTC.
#[must_use]
pub fn is_utc(tz: Tz) -> bool {
    UTC_NAMES.contains(&tz.name())
}

/// ## Summary
/// Serializes a rule to its `RRULE:` text form.
///
/// End dates at midnight are written as `YYYYMMDD`. Other end dates are
/// written as `YYYYMMDDTHHMMSSZ` when `timezone` is UTC and as local
/// `YYYYMMDDTHHMMSS` otherwise.
#[must_use]
pub fn format_rule(rule: &RecurrenceRule, timezone: Tz) -> String {
    let mut out = String::with_capacity(64);
    out.push_str(RRULE_SIGNATURE);
    out.push_str("FREQ=");
    out.push_str(rule.period().as_str());

    if rule.frequency() != 1 {
        out.push_str(&format!(";INTERVAL={}", rule.frequency()));
    }

    if let Some(WeeklyDays::On(days)) = rule.weekly_days() {
        out.push_str(";BYDAY=");
        let tokens: Vec<&str> = days.iter().map(|day| day.as_str()).collect();
        out.push_str(&tokens.join(","));
    }

    match rule.monthly_anchor() {
        Some(MonthlyAnchor::DayOfMonth(0)) | None => {}
        Some(MonthlyAnchor::DayOfMonth(day)) => {
            out.push_str(&format!(";BYMONTHDAY={day}"));
        }
        Some(MonthlyAnchor::NthWeekday { weekday, week }) => {
            out.push_str(&format!(";BYDAY={week}{}", weekday.as_str()));
        }
    }

    match rule.end_policy() {
        EndPolicy::Never => {}
        EndPolicy::ByDate(date) => {
            out.push_str(";UNTIL=");
            out.push_str(&format_until(date, timezone));
        }
        EndPolicy::ByCount(count) => {
            out.push_str(&format!(";COUNT={count}"));
        }
    }

    tracing::trace!(rule = %out, "Formatted rule");
    out
}

fn format_until(date: NaiveDateTime, timezone: Tz) -> String {
    if date.time() == NaiveTime::MIN {
        date.format("%Y%m%d").to_string()
    } else if is_utc(timezone) {
        date.format("%Y%m%dT%H%M%SZ").to_string()
    } else {
        date.format("%Y%m%dT%H%M%S").to_string()
    }
}
