//! Recurrence rule parsing.
//!
//! Decodes the `RRULE:` text form. Binary records are decoded by the
//! `binary` module but share [`FormatError`].

mod error;
mod parser;

pub use error::{FormatError, FormatErrorKind, FormatResult};
pub use parser::parse_rule;
