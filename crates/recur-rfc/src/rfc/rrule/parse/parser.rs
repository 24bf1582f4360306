//! `RRULE:` text parser.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;

use super::error::{FormatError, FormatErrorKind, FormatResult};
use crate::error::RfcResult;
use crate::rfc::rrule::build::RRULE_SIGNATURE;
use crate::rfc::rrule::core::{Period, RecurrenceRule, RuleBuilder, Weekday, WeekdaySet};
use crate::rfc::rrule::expand::convert_to_local;

/// A `KEY=value` pair and the offset of its key in the input.
#[derive(Debug, Clone, Copy)]
struct Attribute<'a> {
    value: &'a str,
    offset: usize,
}

/// Recognized attributes of one rule. Later duplicates replace earlier ones.
#[derive(Debug, Default)]
struct Attributes<'a> {
    freq: Option<Attribute<'a>>,
    interval: Option<Attribute<'a>>,
    by_day: Option<Attribute<'a>>,
    by_month_day: Option<Attribute<'a>>,
    by_set_pos: Option<Attribute<'a>>,
    until: Option<Attribute<'a>>,
    count: Option<Attribute<'a>>,
}

/// ## Summary
/// Parses a rule from its `RRULE:` text form.
///
/// Keys and values are case-insensitive and unknown attributes are ignored.
/// `UNTIL` values ending in `Z` are converted from UTC to wall-clock time in
/// `timezone`; other forms are taken as wall-clock time.
///
/// ## Errors
/// Returns `RfcError::Format` if the text is malformed, or
/// `RfcError::InvalidArgument` if a value is out of range for the rule.
pub fn parse_rule(text: &str, timezone: Tz) -> RfcResult<RecurrenceRule> {
    let body = strip_signature(text)?;
    let attributes = split_attributes(body, RRULE_SIGNATURE.len())?;

    let freq = attributes.freq.ok_or_else(|| {
        FormatError::new(FormatErrorKind::InvalidFrequency, RRULE_SIGNATURE.len())
            .with_context("missing FREQ")
    })?;
    let period = Period::parse(freq.value).ok_or_else(|| {
        FormatError::new(FormatErrorKind::InvalidFrequency, freq.offset).with_context(freq.value)
    })?;

    let mut builder = RuleBuilder::new(period);

    if let Some(interval) = attributes.interval {
        builder.set_frequency(parse_number(interval)?)?;
    }

    match period {
        Period::Weekly => {
            if let Some(by_day) = attributes.by_day {
                builder.set_weekly_days(parse_weekday_list(by_day)?)?;
            }
        }
        Period::Monthly => {
            if let Some(by_day) = attributes.by_day {
                let (weekday, week) = parse_nth_weekday(by_day, attributes.by_set_pos)?;
                builder.set_nth_weekday_of_month(weekday, week)?;
            } else if let Some(by_month_day) = attributes.by_month_day {
                builder.set_day_in_month(parse_number(by_month_day)?)?;
            }
        }
        _ => {}
    }

    if let Some(until) = attributes.until {
        builder.set_end_by_date(parse_until(until, timezone)?);
    } else if let Some(count) = attributes.count {
        builder.set_end_by_count(parse_number(count)?);
    }

    builder.build()
}

fn strip_signature(text: &str) -> FormatResult<&str> {
    let text = text.trim();
    match text.get(..RRULE_SIGNATURE.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(RRULE_SIGNATURE) => {
            Ok(&text[RRULE_SIGNATURE.len()..])
        }
        _ => Err(FormatError::new(FormatErrorKind::MissingSignature, 0)
            .with_context(text.chars().take(RRULE_SIGNATURE.len()).collect::<String>())),
    }
}

fn split_attributes(body: &str, base_offset: usize) -> FormatResult<Attributes<'_>> {
    let mut attributes = Attributes::default();
    let mut offset = base_offset;

    for part in body.split(';') {
        let part_offset = offset;
        offset += part.len() + 1;

        if part.is_empty() {
            continue;
        }
        let (key, value) = part.split_once('=').ok_or_else(|| {
            FormatError::new(FormatErrorKind::MalformedAttribute, part_offset).with_context(part)
        })?;
        let attribute = Attribute {
            value: value.trim(),
            offset: part_offset + key.len() + 1,
        };

        match key.trim().to_ascii_uppercase().as_str() {
            "FREQ" => attributes.freq = Some(attribute),
            "INTERVAL" => attributes.interval = Some(attribute),
            "BYDAY" => attributes.by_day = Some(attribute),
            "BYMONTHDAY" => attributes.by_month_day = Some(attribute),
            "BYSETPOS" => attributes.by_set_pos = Some(attribute),
            "UNTIL" => attributes.until = Some(attribute),
            "COUNT" => attributes.count = Some(attribute),
            other => tracing::trace!(attribute = other, "Ignoring unknown rule attribute"),
        }
    }

    Ok(attributes)
}

fn parse_number<T: std::str::FromStr>(attribute: Attribute<'_>) -> FormatResult<T> {
    attribute.value.parse().map_err(|_e| {
        FormatError::new(FormatErrorKind::InvalidNumber, attribute.offset)
            .with_context(attribute.value)
    })
}

fn parse_weekday(token: &str, offset: usize) -> FormatResult<Weekday> {
    Weekday::parse(token.trim()).ok_or_else(|| {
        FormatError::new(FormatErrorKind::InvalidWeekday, offset).with_context(token)
    })
}

/// Parses a weekly `BYDAY` list such as `SU,MO,WE`.
fn parse_weekday_list(attribute: Attribute<'_>) -> FormatResult<WeekdaySet> {
    let mut days = WeekdaySet::EMPTY;
    let mut offset = attribute.offset;
    for token in attribute.value.split(',') {
        days.insert(parse_weekday(token, offset)?);
        offset += token.len() + 1;
    }
    Ok(days)
}

/// ## Summary
/// Parses a monthly `BYDAY` value: either `<week><token>` such as `4FR` and
/// `-1MO`, or a bare token with the week taken from `BYSETPOS`.
fn parse_nth_weekday(
    by_day: Attribute<'_>,
    by_set_pos: Option<Attribute<'_>>,
) -> FormatResult<(Weekday, i8)> {
    let value = by_day.value;
    if value.contains(',') {
        return Err(FormatError::new(FormatErrorKind::InvalidWeekday, by_day.offset)
            .with_context(value));
    }

    let split = value.len().checked_sub(2).ok_or_else(|| {
        FormatError::new(FormatErrorKind::InvalidWeekday, by_day.offset).with_context(value)
    })?;
    let (week_part, token) = match (value.get(..split), value.get(split..)) {
        (Some(week), Some(token)) => (week, token),
        _ => {
            return Err(FormatError::new(FormatErrorKind::InvalidWeekday, by_day.offset)
                .with_context(value));
        }
    };
    let weekday = parse_weekday(token, by_day.offset + split)?;

    let week = if week_part.is_empty() {
        let set_pos = by_set_pos.ok_or_else(|| {
            FormatError::new(FormatErrorKind::InvalidNumber, by_day.offset)
                .with_context("BYDAY without week requires BYSETPOS")
        })?;
        parse_number(set_pos)?
    } else {
        parse_number(Attribute {
            value: week_part,
            offset: by_day.offset,
        })?
    };

    Ok((weekday, week))
}

/// Parses `YYYYMMDD`, `YYYYMMDDTHHMMSS` or `YYYYMMDDTHHMMSSZ`.
fn parse_until(attribute: Attribute<'_>, timezone: Tz) -> FormatResult<NaiveDateTime> {
    let value = attribute.value.to_ascii_uppercase();
    let invalid = || {
        FormatError::new(FormatErrorKind::InvalidDate, attribute.offset)
            .with_context(attribute.value)
    };
    if !value.bytes().all(|b| b.is_ascii_digit() || b == b'T' || b == b'Z') {
        return Err(invalid());
    }

    match value.len() {
        8 => NaiveDate::parse_from_str(&value, "%Y%m%d")
            .map(|date| date.and_time(NaiveTime::MIN))
            .map_err(|_e| invalid()),
        15 => NaiveDateTime::parse_from_str(&value, "%Y%m%dT%H%M%S").map_err(|_e| invalid()),
        16 if value.ends_with('Z') => {
            let utc = NaiveDateTime::parse_from_str(&value[..15], "%Y%m%dT%H%M%S")
                .map_err(|_e| invalid())?;
            Ok(convert_to_local(utc.and_utc(), timezone))
        }
        _ => Err(invalid()),
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
