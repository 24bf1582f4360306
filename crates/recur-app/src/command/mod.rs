//! Execution of CLI subcommands.

use chrono::NaiveDateTime;
use recur_core::config::Settings;
use recur_rfc::rfc::rrule::{
    BinaryCodec, ExpansionOptions, OccurrenceFinder, RecurrenceRule, TextCodec,
};
use serde::Serialize;

use crate::cli::Command;
use crate::error::{AppError, AppResult};

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// JSON output of the occurrence listing commands.
#[derive(Debug, Serialize)]
struct OccurrenceReport {
    rule: String,
    timezone: &'static str,
    occurrences: Vec<NaiveDateTime>,
}

/// ## Summary
/// Runs `command` with the loaded settings and returns the text to print.
///
/// ## Errors
/// Returns an error if the settings name an unknown zone, the rule or record
/// cannot be decoded, expansion fails, or the requested amount exceeds the
/// configured maximum.
#[tracing::instrument(level = "debug", skip_all)]
pub fn run(command: &Command, settings: &Settings) -> AppResult<String> {
    let finder = OccurrenceFinder::from_settings(settings)?;
    let text = TextCodec::new(finder.timezone());

    match command {
        Command::Expand {
            rule,
            start,
            amount,
            from,
            exclude_start,
            json,
        } => {
            let rule = text.parse(rule)?;
            let amount = resolve_amount(*amount, settings)?;
            let options = ExpansionOptions {
                from: *from,
                include_start: !exclude_start,
            };
            tracing::debug!(%rule, %start, amount, "Expanding rule");
            let occurrences = finder.find(&rule, *start, amount, &options)?;
            render(&text, &rule, finder, occurrences, *json)
        }
        Command::Between {
            rule,
            start,
            window_start,
            window_end,
            json,
        } => {
            let rule = text.parse(rule)?;
            tracing::debug!(%rule, %window_start, %window_end, "Expanding rule in window");
            let occurrences = finder.find_between(&rule, *start, *window_start, *window_end)?;
            render(&text, &rule, finder, occurrences, *json)
        }
        Command::Encode { rule } => {
            let rule = text.parse(rule)?;
            let bytes = BinaryCodec::new(finder.timezone()).write(&rule);
            Ok(hex::encode(bytes))
        }
        Command::Decode { hex: input } => {
            let bytes = hex::decode(input.trim())?;
            let rule = BinaryCodec::new(finder.timezone()).read(&bytes)?;
            Ok(text.format(&rule))
        }
    }
}

fn resolve_amount(requested: Option<usize>, settings: &Settings) -> AppResult<usize> {
    let amount = requested.unwrap_or(settings.finder.default_amount);
    if amount > settings.finder.max_amount {
        return Err(AppError::AmountTooLarge {
            requested: amount,
            max: settings.finder.max_amount,
        });
    }
    Ok(amount)
}

fn render(
    text: &TextCodec,
    rule: &RecurrenceRule,
    finder: OccurrenceFinder,
    occurrences: Vec<NaiveDateTime>,
    json: bool,
) -> AppResult<String> {
    if json {
        let report = OccurrenceReport {
            rule: text.format(rule),
            timezone: finder.timezone().name(),
            occurrences,
        };
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    Ok(occurrences
        .iter()
        .map(|occurrence| occurrence.format(DATE_FORMAT).to_string())
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
