//! Days of the week and weekday sets.

use std::fmt;

use crate::error::{RfcError, RfcResult};

/// Day of the week, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Returns the two-letter RFC 5545 token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "SU",
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
        }
    }

    /// Parses a two-letter token, ignoring case.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(s))
    }

    /// Returns all weekdays, Sunday first.
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::Sunday,
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
        ]
    }

    /// Returns the zero-based index, Sunday = 0.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the weekday for a zero-based index, Sunday = 0.
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::all().get(usize::from(index)).copied()
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Sun => Self::Sunday,
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
        }
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Sunday => Self::Sun,
            Weekday::Monday => Self::Mon,
            Weekday::Tuesday => Self::Tue,
            Weekday::Wednesday => Self::Wed,
            Weekday::Thursday => Self::Thu,
            Weekday::Friday => Self::Fri,
            Weekday::Saturday => Self::Sat,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A set of weekdays stored as a bit field, bit 0 = Sunday.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);
    /// Every day of the week.
    pub const ALL: Self = Self(0x7F);

    /// ## Summary
    /// Creates a set from raw flags, bit 0 = Sunday through bit 6 = Saturday.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidArgument` if any bit above bit 6 is set.
    pub fn from_bits(bits: u8) -> RfcResult<Self> {
        if bits & !Self::ALL.0 != 0 {
            return Err(RfcError::InvalidArgument(format!(
                "weekday flags out of range: {bits:#04x}"
            )));
        }
        Ok(Self(bits))
    }

    /// Creates a set holding a single day.
    #[must_use]
    pub const fn single(day: Weekday) -> Self {
        Self(1 << day.index())
    }

    /// Returns the raw flags.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << day.index()) != 0
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.index();
    }

    pub fn remove(&mut self, day: Weekday) {
        self.0 &= !(1 << day.index());
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_all(self) -> bool {
        self.0 == Self::ALL.0
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterates over the days in the set, Sunday first.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        Weekday::all()
            .into_iter()
            .filter(move |day| self.contains(*day))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl fmt::Debug for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
