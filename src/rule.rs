use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::anchor::day_in_month;
use crate::calendar::{CalendarDate, reattach};
use crate::consts::{MAX_DAY_OF_MONTH, MAX_MONTH, MAX_ORDINAL};
use crate::walker::occurrence_in_month;
use crate::{DayClass, DayOfMonth, OrdinalPosition, prelude::*};

/// Where in the month a rule lands: an ordinal occurrence of its day class,
/// or a raw day number (only meaningful for [`DayClass::AnyDay`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RulePosition {
    #[display(fmt = "{}", _0)]
    Ordinal(OrdinalPosition),
    #[display(fmt = "{}", "_0.label()")]
    DayOfMonth(DayOfMonth),
}

impl RulePosition {
    /// Interprets a position number: 1-4 are the ordinals first through
    /// fourth, 5-31 are raw days of the month.
    ///
    /// # Errors
    /// Returns `RuleError::InvalidDayOfMonth` if `n` is 0 or > 31.
    pub fn from_number(n: u8) -> Result<Self, RuleError> {
        if n <= MAX_ORDINAL {
            OrdinalPosition::nth(n)
                .map(Self::Ordinal)
                .map_err(|_| RuleError::InvalidDayOfMonth(n))
        } else {
            DayOfMonth::new(n).map(Self::DayOfMonth)
        }
    }
}

/// A recurring position within a month, e.g. "third Monday", "last weekday"
/// or "fifteenth day".
///
/// Rules are validated at construction: a raw day of the month may only be
/// paired with [`DayClass::AnyDay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{position} {class}")]
#[serde(try_from = "RawRule")]
pub struct PositionalRule {
    position: RulePosition,
    class:    DayClass,
}

/// Unvalidated wire form of a [`PositionalRule`].
#[derive(Deserialize)]
struct RawRule {
    position: RulePosition,
    class:    DayClass,
}

impl TryFrom<RawRule> for PositionalRule {
    type Error = RuleError;

    fn try_from(raw: RawRule) -> Result<Self, Self::Error> {
        Self::new(raw.position, raw.class)
    }
}

/// Error type for rule construction and evaluation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// Ordinal outside first..fourth.
    #[error("Invalid ordinal position: {0} (must be 1-{max} or last)", max = MAX_ORDINAL)]
    InvalidOrdinal(u8),

    /// Raw day outside 1..=31.
    #[error("Invalid day of month: {0} (must be 1-{max})", max = MAX_DAY_OF_MONTH)]
    InvalidDayOfMonth(u8),

    /// Month number outside 1..=12.
    #[error("Invalid month: {0} (must be 1-{max})", max = MAX_MONTH)]
    InvalidMonth(u8),

    /// A raw day of the month paired with something other than any day.
    #[error("Day of month {day} cannot be combined with {class}; only Day is allowed")]
    DayOfMonthRequiresAnyDay { day: DayOfMonth, class: DayClass },

    /// Export tag that names no value.
    #[error("Unknown tag: {0}")]
    UnknownTag(String),

    /// The computed date lies outside the month it was computed for; the
    /// rule does not apply to that month.
    #[error("{rule} lands on {computed}, outside the month of {anchor}")]
    OutOfMonth {
        rule:     PositionalRule,
        anchor:   NaiveDate,
        computed: NaiveDate,
    },

    /// Date arithmetic left the range the date type can represent.
    #[error("Date arithmetic out of range")]
    DateOutOfRange,
}

impl RuleError {
    /// Whether this error rejects the rule itself, as opposed to flagging a
    /// particular month or date.
    pub const fn is_invalid_rule(&self) -> bool {
        matches!(
            self,
            Self::InvalidOrdinal(_)
                | Self::InvalidDayOfMonth(_)
                | Self::InvalidMonth(_)
                | Self::DayOfMonthRequiresAnyDay { .. }
                | Self::UnknownTag(_)
        )
    }
}

impl PositionalRule {
    /// Creates a new rule with validation.
    ///
    /// # Errors
    /// Returns `RuleError::DayOfMonthRequiresAnyDay` if `position` is a raw day
    /// and `class` is not `DayClass::AnyDay`.
    pub fn new(position: impl Into<RulePosition>, class: DayClass) -> Result<Self, RuleError> {
        let position = position.into();
        if let RulePosition::DayOfMonth(day) = position {
            if class != DayClass::AnyDay {
                tracing::debug!(%day, %class, "rejecting day-of-month rule");
                return Err(RuleError::DayOfMonthRequiresAnyDay { day, class });
            }
        }
        Ok(Self { position, class })
    }

    /// The `position`th occurrence of `class`; always valid
    pub const fn ordinal(position: OrdinalPosition, class: DayClass) -> Self {
        Self {
            position: RulePosition::Ordinal(position),
            class,
        }
    }

    /// A fixed day of the month; always valid
    pub const fn day_of_month(day: DayOfMonth) -> Self {
        Self {
            position: RulePosition::DayOfMonth(day),
            class:    DayClass::AnyDay,
        }
    }

    pub const fn position(&self) -> RulePosition {
        self.position
    }

    pub const fn class(&self) -> DayClass {
        self.class
    }

    /// The date this rule selects in the month containing `month_containing`.
    ///
    /// The result keeps the wall-clock time and zone of the input; see
    /// [`CalendarDate::on_date`] for how daylight saving changes resolve.
    ///
    /// # Errors
    /// Returns `RuleError::OutOfMonth` when the rule does not apply to this
    /// month (e.g. the 31st of a 30-day month), and
    /// `RuleError::DateOutOfRange` on arithmetic overflow.
    pub fn compute<D: CalendarDate>(&self, month_containing: D) -> Result<D, RuleError> {
        let target = self.target_date(month_containing.calendar_date())?;
        reattach(&month_containing, target)
    }

    /// Whether `date` is the date this rule selects in its own month.
    ///
    /// Compared at day granularity. A month the rule does not apply to never
    /// satisfies it.
    pub fn is_satisfied_by<D: CalendarDate>(&self, date: D) -> bool {
        let date = date.calendar_date();
        self.target_date(date).is_ok_and(|target| target == date)
    }

    fn target_date(&self, month_containing: NaiveDate) -> Result<NaiveDate, RuleError> {
        match self.position {
            RulePosition::Ordinal(position) => {
                occurrence_in_month(month_containing, self.class, position)
            }
            RulePosition::DayOfMonth(day) => day_in_month(month_containing, day),
        }
    }
}
