//! CLI command definitions and subcommands

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand};

/// Recurrence rule expansion and conversion
#[derive(Debug, Parser)]
#[command(name = "recur", about = "Expand and convert recurrence rules", version)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level or filter directive (trace, debug, info, warn, error)
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// IANA zone used for rule end dates and zoned output
    #[arg(short = 'z', long, global = true)]
    pub timezone: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List occurrences of a rule
    Expand {
        /// Rule in RRULE text form
        rule: String,

        /// Date of the first occurrence
        #[arg(short, long, value_parser = parse_date)]
        start: NaiveDateTime,

        /// Maximum number of occurrences
        #[arg(short, long)]
        amount: Option<usize>,

        /// Only list occurrences on or after this date
        #[arg(short, long, value_parser = parse_date)]
        from: Option<NaiveDateTime>,

        /// Leave out an occurrence on the from date
        #[arg(long)]
        exclude_start: bool,

        /// Print JSON instead of one date per line
        #[arg(long)]
        json: bool,
    },

    /// List occurrences of a rule inside a window
    Between {
        /// Rule in RRULE text form
        rule: String,

        /// Date of the first occurrence
        #[arg(short, long, value_parser = parse_date)]
        start: NaiveDateTime,

        /// Window start, inclusive
        #[arg(long, value_parser = parse_date)]
        window_start: NaiveDateTime,

        /// Window end, exclusive
        #[arg(long, value_parser = parse_date)]
        window_end: NaiveDateTime,

        /// Print JSON instead of one date per line
        #[arg(long)]
        json: bool,
    },

    /// Print the hex encoded binary record of a rule
    Encode {
        /// Rule in RRULE text form
        rule: String,
    },

    /// Print the text form of a hex encoded binary record
    Decode {
        /// Binary record as hex
        hex: String,
    },
}

/// ## Summary
/// Parses a command line date, either `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`.
///
/// ## Errors
/// Returns a message naming the accepted forms if neither matches.
pub fn parse_date(value: &str) -> Result<NaiveDateTime, String> {
    if let Ok(date_time) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(date_time);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|e| format!("invalid date '{value}' ({e}), expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS"))
}
