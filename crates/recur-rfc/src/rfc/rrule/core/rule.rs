//! The immutable recurrence rule value type.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::NaiveDateTime;

use super::period::Period;
use super::weekday::{Weekday, WeekdaySet};
use crate::error::RfcError;
use crate::rfc::rrule::TextCodec;

/// Which days of the week a weekly rule fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WeeklyDays {
    /// Only the weekday of the start date.
    #[default]
    SameAsStart,
    /// A non-empty set of weekdays.
    On(WeekdaySet),
}

impl WeeklyDays {
    /// Returns `SameAsStart` for an empty set.
    #[must_use]
    pub const fn from_set(set: WeekdaySet) -> Self {
        if set.is_empty() {
            Self::SameAsStart
        } else {
            Self::On(set)
        }
    }

    /// Returns whether `day` qualifies given the start date's weekday.
    #[must_use]
    pub const fn matches(self, day: Weekday, start_day: Weekday) -> bool {
        match self {
            Self::SameAsStart => day.index() == start_day.index(),
            Self::On(set) => set.contains(day),
        }
    }
}

/// Which day of the month a monthly rule fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthlyAnchor {
    /// Day of the month in `-31..=31`. Zero is the start date's day, negative
    /// values count from the end of the month (`-1` is the last day).
    DayOfMonth(i8),
    /// The Nth weekday of the month, `week` in `-4..=-1` or `1..=4`. Negative
    /// weeks count from the end of the month.
    NthWeekday { weekday: Weekday, week: i8 },
}

impl Default for MonthlyAnchor {
    fn default() -> Self {
        Self::DayOfMonth(0)
    }
}

/// Discriminant of [`EndPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EndType {
    #[default]
    Never,
    ByDate,
    ByCount,
}

/// When a rule stops producing occurrences.
///
/// Equality and hashing compare end dates by calendar day only.
#[derive(Debug, Clone, Copy, Default)]
pub enum EndPolicy {
    #[default]
    Never,
    /// Inclusive end date.
    ByDate(NaiveDateTime),
    /// Total number of occurrences, counting the start date.
    ByCount(u32),
}

impl EndPolicy {
    #[must_use]
    pub const fn end_type(self) -> EndType {
        match self {
            Self::Never => EndType::Never,
            Self::ByDate(_) => EndType::ByDate,
            Self::ByCount(_) => EndType::ByCount,
        }
    }
}

impl PartialEq for EndPolicy {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Never, Self::Never) => true,
            (Self::ByDate(a), Self::ByDate(b)) => a.date() == b.date(),
            (Self::ByCount(a), Self::ByCount(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for EndPolicy {}

impl Hash for EndPolicy {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.end_type().hash(state);
        match self {
            Self::Never => {}
            Self::ByDate(date) => date.date().hash(state),
            Self::ByCount(count) => count.hash(state),
        }
    }
}

/// An immutable, validated recurrence rule.
///
/// Instances are created through [`RuleBuilder`](super::RuleBuilder) and
/// compare equal when they describe the same repetition pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecurrenceRule {
    period: Period,
    frequency: u32,
    weekly_days: WeeklyDays,
    monthly_anchor: MonthlyAnchor,
    end_policy: EndPolicy,
}

/// The canonical rule for an event that happens once.
pub const DOES_NOT_REPEAT: RecurrenceRule = RecurrenceRule {
    period: Period::None,
    frequency: 1,
    weekly_days: WeeklyDays::SameAsStart,
    monthly_anchor: MonthlyAnchor::DayOfMonth(0),
    end_policy: EndPolicy::Never,
};

impl RecurrenceRule {
    /// Assembles a rule from already validated and normalized parts.
    pub(super) const fn from_parts(
        period: Period,
        frequency: u32,
        weekly_days: WeeklyDays,
        monthly_anchor: MonthlyAnchor,
        end_policy: EndPolicy,
    ) -> Self {
        Self {
            period,
            frequency,
            weekly_days,
            monthly_anchor,
            end_policy,
        }
    }

    #[must_use]
    pub const fn period(&self) -> Period {
        self.period
    }

    /// Step count in units of the period, always at least 1.
    #[must_use]
    pub const fn frequency(&self) -> u32 {
        self.frequency
    }

    /// Weekly day selection, present only for weekly rules.
    #[must_use]
    pub const fn weekly_days(&self) -> Option<WeeklyDays> {
        match self.period {
            Period::Weekly => Some(self.weekly_days),
            _ => None,
        }
    }

    /// Monthly day selection, present only for monthly rules.
    #[must_use]
    pub const fn monthly_anchor(&self) -> Option<MonthlyAnchor> {
        match self.period {
            Period::Monthly => Some(self.monthly_anchor),
            _ => None,
        }
    }

    #[must_use]
    pub const fn end_policy(&self) -> EndPolicy {
        self.end_policy
    }

    #[must_use]
    pub const fn end_date(&self) -> Option<NaiveDateTime> {
        match self.end_policy {
            EndPolicy::ByDate(date) => Some(date),
            _ => None,
        }
    }

    #[must_use]
    pub const fn end_count(&self) -> Option<u32> {
        match self.end_policy {
            EndPolicy::ByCount(count) => Some(count),
            _ => None,
        }
    }

    /// Returns `false` only for [`DOES_NOT_REPEAT`].
    #[must_use]
    pub const fn is_repeating(&self) -> bool {
        !matches!(self.period, Period::None)
    }
}

impl Default for RecurrenceRule {
    fn default() -> Self {
        DOES_NOT_REPEAT
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", TextCodec::utc().format(self))
    }
}

impl FromStr for RecurrenceRule {
    type Err = RfcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TextCodec::utc().parse(s)
    }
}
