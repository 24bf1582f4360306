//! Recurrence rules: model, occurrence expansion, and codecs.
//!
//! - `core`: the rule value type, its builder, and calendar helpers
//! - `build`: text serialization (`RRULE:` strings)
//! - `parse`: text parsing and format errors
//! - `expand`: occurrence expansion and timezone conversion
//! - `binary`: versioned fixed-layout byte records

pub mod binary;
pub mod build;
pub mod core;
pub mod expand;
pub mod parse;
mod text;

pub use binary::BinaryCodec;
pub use self::core::{
    DOES_NOT_REPEAT, EndPolicy, EndType, MonthlyAnchor, Period, RecurrenceRule, RuleBuilder,
    Weekday, WeekdaySet, WeeklyDays,
};
pub use expand::{ExpansionOptions, OccurrenceFinder};
pub use parse::{FormatError, FormatErrorKind};
pub use text::TextCodec;
