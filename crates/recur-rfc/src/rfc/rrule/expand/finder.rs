//! Occurrence finder.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use recur_core::config::Settings;

use super::cursor::Cursor;
use super::timezone::{convert_to_local, convert_to_utc_lenient, resolve_timezone};
use crate::error::{RfcError, RfcResult};
use crate::rfc::rrule::core::date::compare_day;
use crate::rfc::rrule::core::{Period, RecurrenceRule};

/// Consecutive steps without an occurrence after which no occurrence can
/// exist anymore (one full 400-year Gregorian cycle of months).
const MAX_EMPTY_STEPS: u32 = 4800;

/// Options for expanding occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionOptions {
    /// Only occurrences on or after this day are returned. Ignored when absent
    /// or earlier than the base date.
    pub from: Option<NaiveDateTime>,

    /// Whether an occurrence on the from day itself is returned.
    pub include_start: bool,
}

impl Default for ExpansionOptions {
    fn default() -> Self {
        Self {
            from: None,
            include_start: true,
        }
    }
}

impl ExpansionOptions {
    /// Creates expansion options starting from a date.
    #[must_use]
    pub fn from_date(from: NaiveDateTime) -> Self {
        Self {
            from: Some(from),
            ..Self::default()
        }
    }

    /// Excludes an occurrence on the from day.
    #[must_use]
    pub fn excluding_start(mut self) -> Self {
        self.include_start = false;
        self
    }
}

/// Decides which counted occurrences are returned.
#[derive(Debug, Clone, Copy)]
struct FromGate {
    from: NaiveDate,
    inclusive: bool,
}

impl FromGate {
    fn admits(self, day: NaiveDate) -> bool {
        match day.cmp(&self.from) {
            Ordering::Greater => true,
            Ordering::Equal => self.inclusive,
            Ordering::Less => false,
        }
    }
}

/// Expands recurrence rules into occurrence dates.
///
/// Date-time arguments are wall-clock times in the finder's zone. The zoned
/// variants take and return UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccurrenceFinder {
    timezone: Tz,
}

impl Default for OccurrenceFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl OccurrenceFinder {
    /// Creates a finder working in UTC.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timezone: Tz::UTC,
        }
    }

    #[must_use]
    pub const fn with_timezone(timezone: Tz) -> Self {
        Self { timezone }
    }

    /// ## Summary
    /// Creates a finder for the zone named in the settings.
    ///
    /// ## Errors
    /// Returns an error if the settings are invalid or the zone is unknown.
    pub fn from_settings(settings: &Settings) -> RfcResult<Self> {
        settings.validate()?;
        let timezone = resolve_timezone(&settings.timezone)?;
        Ok(Self::with_timezone(timezone))
    }

    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    /// ## Summary
    /// Finds up to `amount` occurrences of `rule` starting at `start`.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidArgument` under the same conditions as
    /// [`OccurrenceFinder::expand_from`].
    pub fn find(
        &self,
        rule: &RecurrenceRule,
        start: NaiveDateTime,
        amount: usize,
        options: &ExpansionOptions,
    ) -> RfcResult<Vec<NaiveDateTime>> {
        self.expand_from(rule, start, start, 1, amount, options)
    }

    /// ## Summary
    /// Finds up to `amount` occurrences of `rule`, resuming from a known
    /// occurrence `base` which is the `base_count`-th occurrence (1-based)
    /// of the rule.
    ///
    /// Occurrences keep the time of day of `start`. An occurrence is counted
    /// toward an end-by-count limit even when it falls before the from date.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidArgument` if `base_count` is zero or `base`
    /// is on a day before `start`.
    #[tracing::instrument(level = "debug", skip(self, rule, options), fields(period = %rule.period()))]
    pub fn expand_from(
        &self,
        rule: &RecurrenceRule,
        start: NaiveDateTime,
        base: NaiveDateTime,
        base_count: u32,
        amount: usize,
        options: &ExpansionOptions,
    ) -> RfcResult<Vec<NaiveDateTime>> {
        if amount == 0 {
            return Ok(Vec::new());
        }
        if base_count == 0 {
            return Err(RfcError::InvalidArgument(
                "base count must be 1 or greater".to_string(),
            ));
        }
        if compare_day(base, start) == Ordering::Less {
            return Err(RfcError::InvalidArgument(format!(
                "base date {base} is before start date {start}"
            )));
        }

        let from = match options.from {
            Some(from) if compare_day(from, base) != Ordering::Less => from,
            _ => base,
        };
        let gate = FromGate {
            from: from.date(),
            inclusive: options.include_start,
        };
        let time = start.time();

        let mut occurrences = Vec::new();

        if rule.period() == Period::None {
            if gate.admits(start.date()) {
                occurrences.push(start);
            }
            return Ok(occurrences);
        }

        let Some(mut cursor) = Cursor::new(rule, start.date(), base.date()) else {
            return Ok(occurrences);
        };
        let end_date = rule.end_date().map(|end| end.date());
        let end_count = rule.end_count();

        let mut count = base_count - 1;
        let mut empty_steps = 0;

        while occurrences.len() < amount {
            if end_count.is_some_and(|limit| count >= limit) {
                break;
            }

            let Some(step) = cursor.next_step() else {
                tracing::debug!("Expansion reached the end of the supported calendar range");
                break;
            };

            if end_date.is_some_and(|end| step.reference() > end) {
                break;
            }

            match step.candidate {
                Some(day) => {
                    empty_steps = 0;
                    count = count.saturating_add(1);
                    if gate.admits(day) {
                        occurrences.push(day.and_time(time));
                    }
                }
                None => {
                    empty_steps += 1;
                    if empty_steps >= MAX_EMPTY_STEPS {
                        tracing::debug!(
                            empty_steps,
                            "Expansion stopped, rule cannot produce further occurrences"
                        );
                        break;
                    }
                }
            }
        }

        tracing::trace!(found = occurrences.len(), count, "Expansion finished");
        Ok(occurrences)
    }

    /// ## Summary
    /// Finds the occurrences of `rule` in `[window_start, window_end)`. The
    /// start date itself is never returned, but it counts toward an
    /// end-by-count limit when it is an occurrence.
    ///
    /// ## Errors
    /// Propagates errors from [`OccurrenceFinder::expand_from`].
    #[tracing::instrument(level = "debug", skip(self, rule), fields(period = %rule.period()))]
    pub fn find_between(
        &self,
        rule: &RecurrenceRule,
        start: NaiveDateTime,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    ) -> RfcResult<Vec<NaiveDateTime>> {
        let starts_on_occurrence = self
            .find(rule, start, 1, &ExpansionOptions::default())?
            .first()
            == Some(&start);

        let options = ExpansionOptions::default().excluding_start();
        let mut occurrences = Vec::new();
        let mut last = start;
        // Number of the occurrence on `last`, zero while `last` is a start
        // that is not an occurrence.
        let mut count = u32::from(starts_on_occurrence);

        loop {
            let next = self.expand_from(rule, start, last, count.max(1), 1, &options)?;
            let Some(&occurrence) = next.first() else {
                return Ok(occurrences);
            };
            if occurrence >= window_end {
                return Ok(occurrences);
            }
            if occurrence >= window_start {
                occurrences.push(occurrence);
            }
            last = occurrence;
            count = count.saturating_add(1);
        }
    }

    /// ## Summary
    /// Same as [`OccurrenceFinder::find`] for a UTC start instant. The from
    /// date in `options` is wall-clock time in the finder's zone.
    ///
    /// ## Errors
    /// Returns an error if expansion fails or an occurrence cannot be mapped
    /// back to UTC.
    pub fn find_zoned(
        &self,
        rule: &RecurrenceRule,
        start: DateTime<Utc>,
        amount: usize,
        options: &ExpansionOptions,
    ) -> RfcResult<Vec<DateTime<Utc>>> {
        let local_start = convert_to_local(start, self.timezone);
        let occurrences = self.find(rule, local_start, amount, options)?;
        self.to_instants(occurrences)
    }

    /// ## Summary
    /// Same as [`OccurrenceFinder::find_between`] for UTC instants.
    ///
    /// ## Errors
    /// Returns an error if expansion fails or an occurrence cannot be mapped
    /// back to UTC.
    pub fn find_between_zoned(
        &self,
        rule: &RecurrenceRule,
        start: DateTime<Utc>,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> RfcResult<Vec<DateTime<Utc>>> {
        let occurrences = self.find_between(
            rule,
            convert_to_local(start, self.timezone),
            convert_to_local(window_start, self.timezone),
            convert_to_local(window_end, self.timezone),
        )?;
        self.to_instants(occurrences)
    }

    fn to_instants(&self, occurrences: Vec<NaiveDateTime>) -> RfcResult<Vec<DateTime<Utc>>> {
        occurrences
            .into_iter()
            .map(|local| convert_to_utc_lenient(local, self.timezone).map_err(RfcError::from))
            .collect()
    }
}

#[cfg(test)]
#[path = "finder_tests.rs"]
mod tests;
