//! Staging struct for recurrence rules.

use chrono::{Datelike, NaiveDateTime};

use super::date::END_DATE_YEARS;
use super::period::Period;
use super::rule::{DOES_NOT_REPEAT, EndPolicy, EndType, MonthlyAnchor, RecurrenceRule, WeeklyDays};
use super::weekday::{Weekday, WeekdaySet};
use crate::error::{RfcError, RfcResult};

/// Largest absolute day-in-month value.
const MAX_DAY_IN_MONTH: i8 = 31;
/// Largest absolute week-of-month value.
const MAX_WEEK_IN_MONTH: i8 = 4;
/// Largest frequency or count; both are stored as 32-bit signed integers.
const MAX_STORED_VALUE: u32 = i32::MAX.unsigned_abs();

/// Mutable builder for [`RecurrenceRule`].
///
/// Setters validate their input against the current period. Fields are public,
/// so [`RuleBuilder::build`] validates everything again before normalizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleBuilder {
    pub period: Period,
    pub frequency: u32,
    pub weekly_days: WeeklyDays,
    pub monthly_anchor: MonthlyAnchor,
    pub end_type: EndType,
    pub end_date: Option<NaiveDateTime>,
    pub end_count: u32,
}

impl RuleBuilder {
    /// Creates a builder for `period` with every qualifier unset.
    #[must_use]
    pub fn new(period: Period) -> Self {
        Self {
            period,
            frequency: 1,
            weekly_days: WeeklyDays::SameAsStart,
            monthly_anchor: MonthlyAnchor::default(),
            end_type: EndType::Never,
            end_date: None,
            end_count: 0,
        }
    }

    /// Creates a builder holding the values of an existing rule.
    #[must_use]
    pub fn from_rule(rule: &RecurrenceRule) -> Self {
        let mut builder = Self::new(rule.period());
        builder.frequency = rule.frequency();
        if let Some(days) = rule.weekly_days() {
            builder.weekly_days = days;
        }
        if let Some(anchor) = rule.monthly_anchor() {
            builder.monthly_anchor = anchor;
        }
        match rule.end_policy() {
            EndPolicy::Never => {}
            EndPolicy::ByDate(date) => {
                builder.set_end_by_date(date);
            }
            EndPolicy::ByCount(count) => {
                builder.set_end_by_count(count);
            }
        }
        builder
    }

    /// ## Errors
    /// Returns `RfcError::InvalidArgument` if `frequency` is zero or above `i32::MAX`.
    pub fn set_frequency(&mut self, frequency: u32) -> RfcResult<&mut Self> {
        check_frequency(frequency)?;
        self.frequency = frequency;
        Ok(self)
    }

    /// ## Summary
    /// Replaces the weekly day selection. An empty set selects the start
    /// date's weekday.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidState` unless the period is weekly.
    pub fn set_weekly_days(&mut self, days: WeekdaySet) -> RfcResult<&mut Self> {
        self.require_period(Period::Weekly, "weekly days")?;
        self.weekly_days = WeeklyDays::from_set(days);
        Ok(self)
    }

    /// ## Summary
    /// Replaces the weekly day selection from raw flags, bit 0 = Sunday.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidState` unless the period is weekly, or
    /// `RfcError::InvalidArgument` if a flag is out of range.
    pub fn set_weekly_day_flags(&mut self, bits: u8) -> RfcResult<&mut Self> {
        self.require_period(Period::Weekly, "weekly days")?;
        let days = WeekdaySet::from_bits(bits)?;
        self.set_weekly_days(days)
    }

    /// ## Summary
    /// Anchors a monthly rule on a day of the month, replacing any weekday anchor.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidState` unless the period is monthly, or
    /// `RfcError::InvalidArgument` if `|day| > 31`.
    pub fn set_day_in_month(&mut self, day: i8) -> RfcResult<&mut Self> {
        self.require_period(Period::Monthly, "day in month")?;
        let anchor = MonthlyAnchor::DayOfMonth(day);
        check_monthly_anchor(anchor)?;
        self.monthly_anchor = anchor;
        Ok(self)
    }

    /// ## Summary
    /// Anchors a monthly rule on the Nth weekday of the month, replacing any
    /// day-in-month anchor.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidState` unless the period is monthly, or
    /// `RfcError::InvalidArgument` if `week` is zero or `|week| > 4`.
    pub fn set_nth_weekday_of_month(&mut self, weekday: Weekday, week: i8) -> RfcResult<&mut Self> {
        self.require_period(Period::Monthly, "weekday of month")?;
        let anchor = MonthlyAnchor::NthWeekday { weekday, week };
        check_monthly_anchor(anchor)?;
        self.monthly_anchor = anchor;
        Ok(self)
    }

    pub fn set_end_never(&mut self) -> &mut Self {
        self.end_type = EndType::Never;
        self.end_date = None;
        self.end_count = 0;
        self
    }

    /// Ends the rule on a date (inclusive). `None` means the rule never ends.
    pub fn set_end_by_date(&mut self, date: impl Into<Option<NaiveDateTime>>) -> &mut Self {
        let date = date.into();
        self.end_type = if date.is_some() {
            EndType::ByDate
        } else {
            EndType::Never
        };
        self.end_date = date;
        self.end_count = 0;
        self
    }

    /// Ends the rule after `count` occurrences. A count of zero makes the
    /// built rule non-repeating.
    pub fn set_end_by_count(&mut self, count: u32) -> &mut Self {
        self.end_type = EndType::ByCount;
        self.end_date = None;
        self.end_count = count;
        self
    }

    /// ## Summary
    /// Validates every field and builds the normalized rule.
    ///
    /// Normalization, in order:
    /// 1. Weekly on every day with frequency 1 becomes daily.
    /// 2. A non-repeating rule, or end-by-date without a date, never ends.
    /// 3. Otherwise end-by-count with a count of zero becomes non-repeating.
    /// 4. Any non-repeating rule is [`DOES_NOT_REPEAT`].
    /// 5. Qualifiers irrelevant to the final period are cleared.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidArgument` if a field is out of range, the end
    /// count exceeds `i32::MAX`, or the end date is outside years 0 to 9999.
    pub fn build(&self) -> RfcResult<RecurrenceRule> {
        check_frequency(self.frequency)?;
        check_monthly_anchor(self.monthly_anchor)?;
        match (self.end_type, self.end_date) {
            (EndType::ByCount, _) => check_end_count(self.end_count)?,
            (EndType::ByDate, Some(date)) => check_end_date(date)?,
            _ => {}
        }

        let mut period = self.period;
        let mut weekly_days = match self.weekly_days {
            WeeklyDays::On(set) => WeeklyDays::from_set(set),
            WeeklyDays::SameAsStart => WeeklyDays::SameAsStart,
        };

        if period == Period::Weekly
            && weekly_days == WeeklyDays::On(WeekdaySet::ALL)
            && self.frequency == 1
        {
            tracing::debug!("Weekly rule on every day normalized to daily");
            period = Period::Daily;
            weekly_days = WeeklyDays::SameAsStart;
        }

        let mut end_type = self.end_type;
        if period == Period::None || (end_type == EndType::ByDate && self.end_date.is_none()) {
            end_type = EndType::Never;
        } else if end_type == EndType::ByCount && self.end_count < 1 {
            tracing::debug!("Rule ending after zero occurrences normalized to non-repeating");
            period = Period::None;
            end_type = EndType::Never;
        }

        if period == Period::None {
            return Ok(DOES_NOT_REPEAT);
        }

        let end_policy = match (end_type, self.end_date) {
            (EndType::ByDate, Some(date)) => EndPolicy::ByDate(date),
            (EndType::ByCount, _) => EndPolicy::ByCount(self.end_count),
            _ => EndPolicy::Never,
        };
        let weekly_days = if period == Period::Weekly {
            weekly_days
        } else {
            WeeklyDays::SameAsStart
        };
        let monthly_anchor = if period == Period::Monthly {
            self.monthly_anchor
        } else {
            MonthlyAnchor::default()
        };

        Ok(RecurrenceRule::from_parts(
            period,
            self.frequency,
            weekly_days,
            monthly_anchor,
            end_policy,
        ))
    }

    fn require_period(&self, expected: Period, field: &str) -> RfcResult<()> {
        if self.period == expected {
            Ok(())
        } else {
            Err(RfcError::InvalidState(format!(
                "{field} can only be set on a {} rule, not {}",
                expected.as_str().to_ascii_lowercase(),
                self.period.as_str().to_ascii_lowercase()
            )))
        }
    }
}

impl From<&RecurrenceRule> for RuleBuilder {
    fn from(rule: &RecurrenceRule) -> Self {
        Self::from_rule(rule)
    }
}

fn check_frequency(frequency: u32) -> RfcResult<()> {
    if frequency < 1 {
        return Err(RfcError::InvalidArgument(
            "frequency must be 1 or greater".to_string(),
        ));
    }
    if frequency > MAX_STORED_VALUE {
        return Err(RfcError::InvalidArgument(format!(
            "frequency must be at most {MAX_STORED_VALUE}, got {frequency}"
        )));
    }
    Ok(())
}

fn check_end_count(count: u32) -> RfcResult<()> {
    if count > MAX_STORED_VALUE {
        return Err(RfcError::InvalidArgument(format!(
            "end count must be at most {MAX_STORED_VALUE}, got {count}"
        )));
    }
    Ok(())
}

fn check_end_date(date: NaiveDateTime) -> RfcResult<()> {
    if !END_DATE_YEARS.contains(&date.year()) {
        return Err(RfcError::InvalidArgument(format!(
            "end date {date} is outside years {} to {}",
            END_DATE_YEARS.start(),
            END_DATE_YEARS.end()
        )));
    }
    Ok(())
}

fn check_monthly_anchor(anchor: MonthlyAnchor) -> RfcResult<()> {
    match anchor {
        MonthlyAnchor::DayOfMonth(day) if day.unsigned_abs() > MAX_DAY_IN_MONTH.unsigned_abs() => {
            Err(RfcError::InvalidArgument(format!(
                "day in month must be between -31 and 31, got {day}"
            )))
        }
        MonthlyAnchor::NthWeekday { week, .. }
            if week == 0 || week.unsigned_abs() > MAX_WEEK_IN_MONTH.unsigned_abs() =>
        {
            Err(RfcError::InvalidArgument(format!(
                "week of month must be between -4 and 4 and not 0, got {week}"
            )))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
