//! Calendar helpers shared by expansion and the codecs.
//!
//! All helpers work on the proleptic Gregorian calendar and compare dates by
//! calendar day unless noted otherwise.

use std::cmp::Ordering;
use std::ops::RangeInclusive;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};

use super::weekday::Weekday;

/// Years an end date may fall in. `UNTIL` carries exactly four year digits.
pub const END_DATE_YEARS: RangeInclusive<i32> = 0..=9999;

/// Compares two date-times by calendar day, ignoring time of day.
#[must_use]
pub fn compare_day(a: NaiveDateTime, b: NaiveDateTime) -> Ordering {
    a.date().cmp(&b.date())
}

#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Returns the number of days in `month` (1-based) of `year`.
#[must_use]
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Returns the Sunday that starts the week containing `date`.
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_sunday());
    let start = date.checked_sub_days(Days::new(offset)).unwrap_or(date);
    if start > date {
        start.checked_sub_days(Days::new(7)).unwrap_or(start)
    } else {
        start
    }
}

/// ## Summary
/// Resolves a signed day of the month. Positive values are 1-based, negative
/// values count back from the last day (`-1` is the last day).
///
/// Returns `None` when the month has no such day or `day` is zero.
#[must_use]
pub fn day_of_month(year: i32, month: u32, day: i8) -> Option<NaiveDate> {
    let length = i64::from(days_in_month(year, month));
    let resolved = match i64::from(day) {
        0 => return None,
        d if d > 0 => d,
        d => length + d + 1,
    };
    if resolved < 1 || resolved > length {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, u32::try_from(resolved).ok()?)
}

/// ## Summary
/// Returns the Nth `weekday` of a month. Negative `week` values count from
/// the end of the month (`-1` is the last such weekday).
///
/// Returns `None` if `week` is zero or the month has no such weekday.
#[must_use]
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, week: i8) -> Option<NaiveDate> {
    let target = u32::from(weekday.index());
    match week.cmp(&0) {
        Ordering::Equal => None,
        Ordering::Greater => {
            let first = NaiveDate::from_ymd_opt(year, month, 1)?;
            let first_day = first.weekday().num_days_from_sunday();
            let offset = (target + 7 - first_day) % 7;
            let day = 1 + offset + 7 * (u32::from(week.unsigned_abs()) - 1);
            if day > days_in_month(year, month) {
                return None;
            }
            NaiveDate::from_ymd_opt(year, month, day)
        }
        Ordering::Less => {
            let length = days_in_month(year, month);
            let last = NaiveDate::from_ymd_opt(year, month, length)?;
            let last_day = last.weekday().num_days_from_sunday();
            let back = (last_day + 7 - target) % 7 + 7 * (u32::from(week.unsigned_abs()) - 1);
            if back >= length {
                return None;
            }
            NaiveDate::from_ymd_opt(year, month, length - back)
        }
    }
}

/// Returns the week of the month `date` falls in, counting 7-day blocks from
/// the first of the month (1..=5).
#[must_use]
pub fn week_of_month(date: NaiveDate) -> u32 {
    (date.day() - 1) / 7 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2096));
        assert!(!is_leap_year(2100));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(2019));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2019, 2), 28);
        assert_eq!(days_in_month(2020, 2), 29);
        assert_eq!(days_in_month(2019, 4), 30);
        assert_eq!(days_in_month(2019, 12), 31);
    }

    #[test]
    fn compare_ignores_time() {
        let a = ymd(2019, 1, 1).and_hms_opt(23, 0, 0).unwrap();
        let b = ymd(2019, 1, 1).and_hms_opt(1, 0, 0).unwrap();
        let c = ymd(2019, 1, 2).and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(compare_day(a, b), Ordering::Equal);
        assert_eq!(compare_day(a, c), Ordering::Less);
        assert_eq!(compare_day(c, b), Ordering::Greater);
    }

    #[test]
    fn week_starts_on_sunday() {
        // 2019-01-01 is a Tuesday.
        assert_eq!(week_start(ymd(2019, 1, 1)), ymd(2018, 12, 30));
        assert_eq!(week_start(ymd(2019, 1, 6)), ymd(2019, 1, 6));
        assert_eq!(week_start(ymd(2019, 1, 12)), ymd(2019, 1, 6));
    }

    #[test]
    fn signed_day_of_month() {
        assert_eq!(day_of_month(2019, 2, -1), Some(ymd(2019, 2, 28)));
        assert_eq!(day_of_month(2019, 1, -15), Some(ymd(2019, 1, 17)));
        assert_eq!(day_of_month(2019, 4, 31), None);
        assert_eq!(day_of_month(2019, 2, -29), None);
        assert_eq!(day_of_month(2019, 2, 0), None);
    }

    #[test]
    fn nth_weekday() {
        assert_eq!(
            nth_weekday_of_month(2019, 1, Weekday::Tuesday, 3),
            Some(ymd(2019, 1, 15))
        );
        assert_eq!(
            nth_weekday_of_month(2019, 2, Weekday::Thursday, -1),
            Some(ymd(2019, 2, 28))
        );
        assert_eq!(
            nth_weekday_of_month(2019, 3, Weekday::Friday, 4),
            Some(ymd(2019, 3, 22))
        );
        assert_eq!(
            nth_weekday_of_month(2019, 3, Weekday::Sunday, -4),
            Some(ymd(2019, 3, 10))
        );
        assert_eq!(nth_weekday_of_month(2019, 3, Weekday::Sunday, 0), None);
    }

    #[test]
    fn weeks_of_month() {
        assert_eq!(week_of_month(ymd(2019, 1, 7)), 1);
        assert_eq!(week_of_month(ymd(2019, 1, 8)), 2);
        assert_eq!(week_of_month(ymd(2019, 1, 31)), 5);
    }
}
