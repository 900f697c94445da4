//! Month anchors: the first and last date of the month containing a value.
//!
//! Month lengths are never looked up. The last day is always derived as
//! "first of next month, minus one day", so leap years fall out of chrono's
//! own arithmetic.

use chrono::{Datelike, NaiveDate};

use crate::calendar::{CalendarDate, reattach, same_month, shift_days, shift_months};
use crate::consts::MIN_DAY;
use crate::{DayOfMonth, PositionalRule, RuleError};

pub(crate) fn month_start(date: NaiveDate) -> Result<NaiveDate, RuleError> {
    let back = i64::from(date.day() - u32::from(MIN_DAY));
    shift_days(date, -back)
}

pub(crate) fn month_end(date: NaiveDate) -> Result<NaiveDate, RuleError> {
    let next = month_start_after(date, 1)?;
    shift_days(next, -1)
}

pub(crate) fn month_start_after(date: NaiveDate, months: u32) -> Result<NaiveDate, RuleError> {
    // Anchor before adding months: Jan 31 + 1 month clamps to Feb 28/29.
    shift_months(month_start(date)?, months)
}

pub(crate) fn day_in_month(date: NaiveDate, day: DayOfMonth) -> Result<NaiveDate, RuleError> {
    let target = shift_days(month_start(date)?, day.offset())?;
    ensure_in_month(PositionalRule::day_of_month(day), date, target)
}

/// The first day of the month containing `date`.
///
/// # Errors
/// Returns `RuleError::DateOutOfRange` if the shift cannot be represented.
pub fn first_of_month<D: CalendarDate>(date: D) -> Result<D, RuleError> {
    reattach(&date, month_start(date.calendar_date())?)
}

/// The last day of the month containing `date`.
///
/// # Errors
/// Returns `RuleError::DateOutOfRange` if the shift cannot be represented.
pub fn last_of_month<D: CalendarDate>(date: D) -> Result<D, RuleError> {
    reattach(&date, month_end(date.calendar_date())?)
}

/// The first day of the month `months` after the one containing `date`.
///
/// # Errors
/// Returns `RuleError::DateOutOfRange` if the shift cannot be represented.
pub fn first_of_next_months<D: CalendarDate>(date: D, months: u32) -> Result<D, RuleError> {
    reattach(&date, month_start_after(date.calendar_date(), months)?)
}

/// The given day of the month containing `date`.
///
/// # Errors
/// Returns `RuleError::OutOfMonth` when the month is too short to have that
/// day, and `RuleError::DateOutOfRange` on arithmetic overflow.
pub fn nth_day_of_month<D: CalendarDate>(date: D, day: DayOfMonth) -> Result<D, RuleError> {
    reattach(&date, day_in_month(date.calendar_date(), day)?)
}

/// Passes `computed` through when it lies in `anchor`'s month, and otherwise
/// reports that `rule` does not apply to that month.
pub(crate) fn ensure_in_month(
    rule: PositionalRule,
    anchor: NaiveDate,
    computed: NaiveDate,
) -> Result<NaiveDate, RuleError> {
    if same_month(&anchor, &computed) {
        return Ok(computed);
    }
    tracing::debug!(%rule, %anchor, %computed, "computed date escapes its month");
    Err(RuleError::OutOfMonth {
        rule,
        anchor,
        computed,
    })
}
