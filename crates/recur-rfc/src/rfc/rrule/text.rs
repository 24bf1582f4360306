//! Text codec for recurrence rules.

use chrono_tz::Tz;

use super::build::format_rule;
use super::core::RecurrenceRule;
use super::parse::parse_rule;
use crate::error::RfcResult;

/// Converts rules to and from the `RRULE:` text form.
///
/// The zone decides how `UNTIL` date-times are written and how UTC `UNTIL`
/// values are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextCodec {
    timezone: Tz,
}

impl TextCodec {
    #[must_use]
    pub const fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    #[must_use]
    pub const fn utc() -> Self {
        Self::new(Tz::UTC)
    }

    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    #[must_use]
    pub fn format(&self, rule: &RecurrenceRule) -> String {
        format_rule(rule, self.timezone)
    }

    /// ## Errors
    /// Returns `RfcError::Format` for malformed text and
    /// `RfcError::InvalidArgument` for out-of-range values.
    pub fn parse(&self, text: &str) -> RfcResult<RecurrenceRule> {
        parse_rule(text, self.timezone)
    }
}

impl Default for TextCodec {
    fn default() -> Self {
        Self::utc()
    }
}
