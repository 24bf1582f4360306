//! Rule decoding error types.

use std::fmt;

/// Result type for rule decoding operations.
pub type FormatResult<T> = Result<T, FormatError>;

/// An error that occurred while decoding a rule from text or bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    /// The kind of error.
    pub kind: FormatErrorKind,
    /// Byte offset in the input where the error was detected.
    pub offset: usize,
    /// Additional context, usually the offending input.
    pub context: Option<String>,
}

impl FormatError {
    /// Creates a new format error.
    #[must_use]
    pub fn new(kind: FormatErrorKind, offset: usize) -> Self {
        Self {
            kind,
            offset,
            context: None,
        }
    }

    /// Attaches context to the error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Creates a truncated input error.
    #[must_use]
    pub fn truncated(expected: usize, found: usize) -> Self {
        Self::new(FormatErrorKind::Truncated, found)
            .with_context(format!("expected {expected} bytes, found {found}"))
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.kind, self.offset)?;
        if let Some(context) = &self.context {
            write!(f, ": {context}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FormatError {}

/// The kind of format error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatErrorKind {
    /// Text does not start with `RRULE:`.
    MissingSignature,
    /// `FREQ` is missing or not a supported period.
    InvalidFrequency,
    /// Unknown weekday token.
    InvalidWeekday,
    /// Malformed integer value.
    InvalidNumber,
    /// `UNTIL` value in an unsupported form.
    InvalidDate,
    /// Attribute without `=`.
    MalformedAttribute,
    /// Unrecognized binary version tag.
    UnknownVersion,
    /// Binary record shorter than its version requires.
    Truncated,
    /// Enumerated binary field out of range.
    InvalidField,
}

impl fmt::Display for FormatErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSignature => write!(f, "missing RRULE signature"),
            Self::InvalidFrequency => write!(f, "invalid frequency"),
            Self::InvalidWeekday => write!(f, "invalid weekday"),
            Self::InvalidNumber => write!(f, "invalid number"),
            Self::InvalidDate => write!(f, "invalid date"),
            Self::MalformedAttribute => write!(f, "malformed attribute"),
            Self::UnknownVersion => write!(f, "unknown version"),
            Self::Truncated => write!(f, "truncated input"),
            Self::InvalidField => write!(f, "invalid field"),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
