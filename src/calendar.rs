//! The date capability the rule engine is written against.
//!
//! Every algorithm in this crate walks plain [`NaiveDate`]s. A caller's value
//! is reduced to its calendar date on the way in, and the result is put back
//! on the caller's wall-clock time and zone once, on the way out. Offset-aware
//! values never take intermediate steps through local times that a daylight
//! saving change may have skipped or repeated.

use std::fmt;

use chrono::{
    DateTime, Datelike, Days, LocalResult, Months, NaiveDate, NaiveDateTime, Offset, TimeDelta,
    TimeZone,
};

use crate::RuleError;

/// A calendar value with at least day granularity.
///
/// Day-of-week, day-of-month and month come from [`Datelike`]. The rest is
/// moving a value to another calendar date while keeping whatever it carries
/// below day granularity.
pub trait CalendarDate: Datelike + Copy + Ord + fmt::Debug {
    /// The proleptic Gregorian date this value falls on
    fn calendar_date(&self) -> NaiveDate;

    /// This value moved to `date`, keeping its time of day and zone.
    ///
    /// Returns `None` when no such value exists on `date`.
    fn on_date(&self, date: NaiveDate) -> Option<Self>;
}

impl CalendarDate for NaiveDate {
    fn calendar_date(&self) -> NaiveDate {
        *self
    }

    fn on_date(&self, date: NaiveDate) -> Option<Self> {
        Some(date)
    }
}

impl CalendarDate for NaiveDateTime {
    fn calendar_date(&self) -> NaiveDate {
        self.date()
    }

    fn on_date(&self, date: NaiveDate) -> Option<Self> {
        Some(date.and_time(self.time()))
    }
}

/// Offset-aware values keep their wall-clock time in their own zone.
///
/// A repeated local time (the fold when clocks go back) resolves to the
/// earlier instant. A skipped local time (the gap when clocks go forward) is
/// read with the offset in force before the gap, which lands the same
/// distance past it: 02:30 on a spring-forward night in New York becomes
/// 03:30.
impl<Tz> CalendarDate for DateTime<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Copy,
{
    fn calendar_date(&self) -> NaiveDate {
        self.date_naive()
    }

    fn on_date(&self, date: NaiveDate) -> Option<Self> {
        let zone = self.timezone();
        let local = date.and_time(self.naive_local().time());
        match zone.from_local_datetime(&local) {
            LocalResult::Single(found) => Some(found),
            LocalResult::Ambiguous(earliest, _) => Some(earliest),
            LocalResult::None => {
                let before = local.checked_sub_days(Days::new(1))?;
                let offset = zone.from_local_datetime(&before).earliest()?.offset().fix();
                let utc = local
                    .checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))?;
                let found = zone.from_utc_datetime(&utc);
                // a zone that skipped the whole day has no value on it
                (found.date_naive() == date).then_some(found)
            }
        }
    }
}

/// Shifts `date` by `days`, surfacing overflow as an error.
pub(crate) fn shift_days(date: NaiveDate, days: i64) -> Result<NaiveDate, RuleError> {
    let step = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(step)
    } else {
        date.checked_sub_days(step)
    };
    shifted.ok_or(RuleError::DateOutOfRange)
}

/// Shifts `date` forward by `months`, clamping the day to the length of the
/// target month and surfacing overflow as an error.
pub(crate) fn shift_months(date: NaiveDate, months: u32) -> Result<NaiveDate, RuleError> {
    date.checked_add_months(Months::new(months))
        .ok_or(RuleError::DateOutOfRange)
}

/// Puts a computed calendar date back on `like`'s time of day and zone.
pub(crate) fn reattach<D: CalendarDate>(like: &D, date: NaiveDate) -> Result<D, RuleError> {
    like.on_date(date).ok_or(RuleError::DateOutOfRange)
}

/// True when both values fall in the same calendar month of the same year.
pub fn same_month<A: Datelike, B: Datelike>(a: &A, b: &B) -> bool {
    a.year() == b.year() && a.month() == b.month()
}
