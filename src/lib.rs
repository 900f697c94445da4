//! Recurring positional date rules.
//!
//! A [`PositionalRule`] names a recurring point within a month, such as
//! "the third Monday", "the last weekday" or "the 15th". Rules are evaluated
//! against any [`CalendarDate`]: chrono's naive dates and date-times, and
//! offset-aware `DateTime<Tz>` values, all share the same algorithms.
//!
//! ```
//! use chrono::{NaiveDate, Weekday};
//! use positional_date::{OrdinalPosition, PositionalRule};
//!
//! let thanksgiving = PositionalRule::ordinal(OrdinalPosition::Fourth, Weekday::Thu.into());
//! let november = NaiveDate::from_ymd_opt(2023, 11, 1).unwrap();
//! assert_eq!(
//!     thanksgiving.compute(november).unwrap(),
//!     NaiveDate::from_ymd_opt(2023, 11, 23).unwrap()
//! );
//! assert!(!thanksgiving.is_satisfied_by(NaiveDate::from_ymd_opt(2023, 11, 16).unwrap()));
//! ```

mod anchor;
mod calendar;
mod consts;
mod prelude;
mod rule;
mod types;
mod walker;
mod week;

pub use anchor::{first_of_month, first_of_next_months, last_of_month, nth_day_of_month};
pub use calendar::{CalendarDate, same_month};
pub use consts::*;
pub use rule::{PositionalRule, RuleError, RulePosition};
pub use types::{DayClass, DayOfMonth, MonthOfYear, OrdinalPosition, is_weekend};
pub use walker::{last_occurrence, next_occurrence, nth_occurrence};
pub use week::{
    end_of_week, is_first_day_of_week, is_last_day_of_week, last_weekday_of_week, start_of_week,
    weekday_within,
};

/// The day classes `date` belongs to
pub fn day_classes_of<D: CalendarDate>(date: &D) -> [DayClass; 3] {
    DayClass::classes_of(date)
}

/// The date `rule` selects in the month containing `month_containing`.
///
/// # Errors
/// See [`PositionalRule::compute`].
pub fn evaluate_rule<D: CalendarDate>(month_containing: D, rule: &PositionalRule) -> Result<D, RuleError> {
    rule.compute(month_containing)
}

/// Whether `date` is the date `rule` selects in its own month
pub fn rule_satisfied<D: CalendarDate>(date: D, rule: &PositionalRule) -> bool {
    rule.is_satisfied_by(date)
}

/// Whether `date` falls in `month`
pub fn month_matches<D: CalendarDate>(date: &D, month: MonthOfYear) -> bool {
    month.matches(date)
}
