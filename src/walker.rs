//! Day-walking within a month.
//!
//! Forward walks start at the first of the month, backward walks at the last.
//! A specific weekday recurs every seven days, so later occurrences are a
//! fixed jump from the first; weekday and weekend runs are uneven and are
//! stepped one day at a time instead.

use chrono::NaiveDate;

use crate::anchor::{ensure_in_month, month_end, month_start};
use crate::calendar::{CalendarDate, reattach, shift_days};
use crate::consts::DAYS_IN_WEEK;
use crate::{DayClass, OrdinalPosition, PositionalRule, RuleError};

/// Steps from `start` in `direction` (+1 or -1) until `class` matches,
/// including `start` itself.
fn walk_to(start: NaiveDate, class: DayClass, direction: i64) -> Result<NaiveDate, RuleError> {
    let mut current = start;
    while !class.matches(&current) {
        current = shift_days(current, direction)?;
    }
    Ok(current)
}

/// The `n`th occurrence (1-based) of `class` counting forward from the first
/// of the month. The result is not checked against the month.
fn walk_forward(anchor: NaiveDate, class: DayClass, n: u8) -> Result<NaiveDate, RuleError> {
    let first = month_start(anchor)?;
    let hops = i64::from(n.saturating_sub(1));
    match class {
        DayClass::AnyDay => shift_days(first, hops),
        DayClass::Weekday(_) => {
            let initial = walk_to(first, class, 1)?;
            shift_days(initial, hops * DAYS_IN_WEEK)
        }
        DayClass::AnyWeekday | DayClass::AnyWeekendDay => {
            let mut current = walk_to(first, class, 1)?;
            for _ in 0..hops {
                current = occurrence_after(current, class)?;
            }
            Ok(current)
        }
    }
}

fn occurrence_after(date: NaiveDate, class: DayClass) -> Result<NaiveDate, RuleError> {
    walk_to(shift_days(date, 1)?, class, 1)
}

pub(crate) fn occurrence_in_month(
    date: NaiveDate,
    class: DayClass,
    position: OrdinalPosition,
) -> Result<NaiveDate, RuleError> {
    let rule = PositionalRule::ordinal(position, class);
    let found = match position.number() {
        Some(n) => walk_forward(date, class, n)?,
        None => walk_to(month_end(date)?, class, -1)?,
    };
    tracing::trace!(%rule, %found, "walked to occurrence");
    ensure_in_month(rule, date, found)
}

/// The next date strictly after `date` that belongs to `class`.
///
/// This is not bounded by the month: the next weekend day after the last
/// Saturday of a month may well be in the following one.
///
/// # Errors
/// Returns `RuleError::DateOutOfRange` if the walk leaves the representable range.
pub fn next_occurrence<D: CalendarDate>(date: D, class: DayClass) -> Result<D, RuleError> {
    reattach(&date, occurrence_after(date.calendar_date(), class)?)
}

/// The `position`th occurrence of `class` in the month containing `date`.
///
/// `OrdinalPosition::Last` walks backward from the last day of the month.
///
/// # Errors
/// Returns `RuleError::OutOfMonth` when the occurrence would fall outside the
/// month (the computed date is carried in the error), and
/// `RuleError::DateOutOfRange` on arithmetic overflow.
pub fn nth_occurrence<D: CalendarDate>(
    date: D,
    class: DayClass,
    position: OrdinalPosition,
) -> Result<D, RuleError> {
    reattach(&date, occurrence_in_month(date.calendar_date(), class, position)?)
}

/// The last occurrence of `class` in the month containing `date`.
///
/// # Errors
/// Returns `RuleError::DateOutOfRange` on arithmetic overflow.
pub fn last_occurrence<D: CalendarDate>(date: D, class: DayClass) -> Result<D, RuleError> {
    nth_occurrence(date, class, OrdinalPosition::Last)
}
