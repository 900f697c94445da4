//! Week anchors relative to a caller-chosen first day of the week.

use chrono::{Datelike, Weekday};

use crate::RuleError;
use crate::calendar::{CalendarDate, reattach, shift_days};
use crate::consts::DAYS_IN_WEEK;

/// The weekday that closes a week beginning on `first`
pub fn last_weekday_of_week(first: Weekday) -> Weekday {
    first.pred()
}

/// Whether `weekday` appears in `days`
pub fn weekday_within(weekday: Weekday, days: &[Weekday]) -> bool {
    days.contains(&weekday)
}

/// Whether `date` opens a week beginning on `first`
pub fn is_first_day_of_week<D: Datelike>(date: &D, first: Weekday) -> bool {
    date.weekday() == first
}

/// Whether `date` closes a week beginning on `first`
pub fn is_last_day_of_week<D: Datelike>(date: &D, first: Weekday) -> bool {
    date.weekday() == last_weekday_of_week(first)
}

/// Days elapsed since the most recent `first` (0 when `weekday == first`)
fn days_into_week(weekday: Weekday, first: Weekday) -> i64 {
    let from = i64::from(first.num_days_from_monday());
    let to = i64::from(weekday.num_days_from_monday());
    (to - from).rem_euclid(DAYS_IN_WEEK)
}

/// The first day of the week containing `date`.
///
/// # Errors
/// Returns `RuleError::DateOutOfRange` if the shift cannot be represented.
pub fn start_of_week<D: CalendarDate>(date: D, first: Weekday) -> Result<D, RuleError> {
    let day = date.calendar_date();
    reattach(&date, shift_days(day, -days_into_week(day.weekday(), first))?)
}

/// The last day of the week containing `date`, six days after its start.
///
/// # Errors
/// Returns `RuleError::DateOutOfRange` if the shift cannot be represented.
pub fn end_of_week<D: CalendarDate>(date: D, first: Weekday) -> Result<D, RuleError> {
    let start = start_of_week(date.calendar_date(), first)?;
    reattach(&date, shift_days(start, DAYS_IN_WEEK - 1)?)
}
