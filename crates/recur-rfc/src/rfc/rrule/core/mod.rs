//! Recurrence rule core models.
//!
//! Rules are immutable values produced by [`RuleBuilder::build`]. Weekly and
//! monthly qualifiers are tagged variants; packed bit fields only exist in the
//! binary codec.

mod builder;
pub mod date;
mod period;
mod rule;
mod weekday;

pub use builder::RuleBuilder;
pub use period::Period;
pub use rule::{DOES_NOT_REPEAT, EndPolicy, EndType, MonthlyAnchor, RecurrenceRule, WeeklyDays};
pub use weekday::{Weekday, WeekdaySet};
