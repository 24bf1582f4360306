//! Period-by-period walk over the calendar for a single rule.

use chrono::{Datelike, Days, NaiveDate};

use crate::rfc::rrule::core::date::{day_of_month, nth_weekday_of_month, week_start};
use crate::rfc::rrule::core::{MonthlyAnchor, Period, RecurrenceRule, Weekday, WeeklyDays};

/// One step of the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Step {
    /// First day covered by the step, used for end-date checks when there is no candidate.
    pub probe: NaiveDate,
    /// The occurrence produced by the step, if any.
    pub candidate: Option<NaiveDate>,
}

impl Step {
    /// The day compared against an end date.
    pub const fn reference(self) -> NaiveDate {
        match self.candidate {
            Some(day) => day,
            None => self.probe,
        }
    }
}

/// Resolved day selection for monthly rules.
#[derive(Debug, Clone, Copy)]
enum MonthDay {
    Day(i8),
    Nth { weekday: Weekday, week: i8 },
}

#[derive(Debug, Clone)]
pub(super) enum Cursor {
    Daily {
        next: Option<NaiveDate>,
        step: u64,
    },
    Weekly {
        next: Option<NaiveDate>,
        day_in_week: u8,
        skipped_days: u64,
        days: WeeklyDays,
        start_day: Weekday,
        base: NaiveDate,
    },
    Monthly {
        next: Option<i64>,
        step: i64,
        day: MonthDay,
        base: NaiveDate,
    },
    Yearly {
        next: Option<i32>,
        step: i32,
        month: u32,
        day: u32,
        base: NaiveDate,
    },
}

impl Cursor {
    /// ## Summary
    /// Positions a cursor on the period containing `base`.
    ///
    /// Returns `None` for non-repeating rules.
    pub fn new(rule: &RecurrenceRule, start: NaiveDate, base: NaiveDate) -> Option<Self> {
        let frequency = rule.frequency();
        match rule.period() {
            Period::None => None,
            Period::Daily => Some(Self::Daily {
                next: Some(base),
                step: u64::from(frequency),
            }),
            Period::Weekly => Some(Self::Weekly {
                next: Some(week_start(base)),
                day_in_week: 0,
                skipped_days: 7 * (u64::from(frequency) - 1),
                days: rule.weekly_days().unwrap_or_default(),
                start_day: start.weekday().into(),
                base,
            }),
            Period::Monthly => {
                let day = match rule.monthly_anchor().unwrap_or_default() {
                    MonthlyAnchor::DayOfMonth(0) => {
                        MonthDay::Day(i8::try_from(start.day()).unwrap_or(i8::MAX))
                    }
                    MonthlyAnchor::DayOfMonth(n) => MonthDay::Day(n),
                    MonthlyAnchor::NthWeekday { weekday, week } => MonthDay::Nth { weekday, week },
                };
                Some(Self::Monthly {
                    next: Some(month_index(base)),
                    step: i64::from(frequency),
                    day,
                    base,
                })
            }
            Period::Yearly => Some(Self::Yearly {
                next: Some(base.year()),
                step: i32::try_from(frequency).unwrap_or(i32::MAX),
                month: start.month(),
                day: start.day(),
                base,
            }),
        }
    }

    /// Produces the current step and advances. Returns `None` once the walk
    /// leaves the supported calendar range.
    pub fn next_step(&mut self) -> Option<Step> {
        match self {
            Self::Daily { next, step } => {
                let day = (*next)?;
                *next = day.checked_add_days(Days::new(*step));
                Some(Step {
                    probe: day,
                    candidate: Some(day),
                })
            }
            Self::Weekly {
                next,
                day_in_week,
                skipped_days,
                days,
                start_day,
                base,
            } => {
                let day = (*next)?;
                let qualifies = day >= *base && days.matches(day.weekday().into(), *start_day);

                *day_in_week += 1;
                let mut advance = 1;
                if *day_in_week == 7 {
                    *day_in_week = 0;
                    advance += *skipped_days;
                }
                *next = day.checked_add_days(Days::new(advance));

                Some(Step {
                    probe: day,
                    candidate: qualifies.then_some(day),
                })
            }
            Self::Monthly {
                next,
                step,
                day,
                base,
            } => {
                let index = (*next)?;
                let (year, month) = split_month_index(index)?;
                let first = NaiveDate::from_ymd_opt(year, month, 1)?;
                let candidate = match *day {
                    MonthDay::Day(n) => day_of_month(year, month, n),
                    MonthDay::Nth { weekday, week } => {
                        nth_weekday_of_month(year, month, weekday, week)
                    }
                }
                .filter(|candidate| *candidate >= *base);

                *next = index.checked_add(*step);
                Some(Step {
                    probe: first,
                    candidate,
                })
            }
            Self::Yearly {
                next,
                step,
                month,
                day,
                base,
            } => {
                let year = (*next)?;
                let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
                let candidate = NaiveDate::from_ymd_opt(year, *month, *day)
                    .filter(|candidate| *candidate >= *base);

                *next = year.checked_add(*step);
                Some(Step {
                    probe: first,
                    candidate,
                })
            }
        }
    }
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

fn split_month_index(index: i64) -> Option<(i32, u32)> {
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
    Some((year, month))
}
