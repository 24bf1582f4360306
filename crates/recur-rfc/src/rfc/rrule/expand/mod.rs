//! Occurrence expansion for recurrence rules.
//!
//! Expansion works on wall-clock date-times in a single configured zone.
//! Zoned entry points convert UTC instants in and out of that zone.

mod cursor;
mod finder;
pub mod timezone;

pub use finder::{ExpansionOptions, OccurrenceFinder};
pub use timezone::{ConversionError, convert_to_local, convert_to_utc, convert_to_utc_lenient, resolve_timezone};
