//! Repetition period.

use std::fmt;

/// Unit of time a rule steps by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Period {
    /// The event happens once.
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Period {
    /// Returns the `FREQ` token for this period.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }

    /// Parses a `FREQ` token, ignoring case.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|period| period.as_str().eq_ignore_ascii_case(s))
    }

    /// Returns all periods in ascending order of length.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::None,
            Self::Daily,
            Self::Weekly,
            Self::Monthly,
            Self::Yearly,
        ]
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
