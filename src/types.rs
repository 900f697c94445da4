use crate::RuleError;
use crate::consts::{DAY_OF_MONTH_LABELS, MAX_DAY_OF_MONTH, MAX_MONTH, MAX_ORDINAL, MIN_DAY};
use crate::prelude::*;
use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;
use std::str::FromStr;

/// Weekday names, Sunday first. Doubles as label and export tag.
const WEEKDAY_NAMES: [(Weekday, &str); 7] = [
    (Weekday::Sun, "Sunday"),
    (Weekday::Mon, "Monday"),
    (Weekday::Tue, "Tuesday"),
    (Weekday::Wed, "Wednesday"),
    (Weekday::Thu, "Thursday"),
    (Weekday::Fri, "Friday"),
    (Weekday::Sat, "Saturday"),
];

fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAY_NAMES[weekday.num_days_from_sunday() as usize].1
}

/// Saturday and Sunday
pub const fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

/// The category of days a rule counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayClass {
    /// One specific day of the week
    Weekday(Weekday),
    /// Every calendar day
    AnyDay,
    /// Monday through Friday
    AnyWeekday,
    /// Saturday and Sunday
    AnyWeekendDay,
}

impl DayClass {
    /// Every class, specific weekdays first (Sunday through Saturday)
    pub const ALL: [Self; 10] = [
        Self::Weekday(Weekday::Sun),
        Self::Weekday(Weekday::Mon),
        Self::Weekday(Weekday::Tue),
        Self::Weekday(Weekday::Wed),
        Self::Weekday(Weekday::Thu),
        Self::Weekday(Weekday::Fri),
        Self::Weekday(Weekday::Sat),
        Self::AnyDay,
        Self::AnyWeekday,
        Self::AnyWeekendDay,
    ];

    /// Whether `date` belongs to this class
    pub fn matches<D: Datelike>(&self, date: &D) -> bool {
        let weekday = date.weekday();
        match *self {
            Self::Weekday(wanted) => weekday == wanted,
            Self::AnyDay => true,
            Self::AnyWeekday => !is_weekend(weekday),
            Self::AnyWeekendDay => is_weekend(weekday),
        }
    }

    /// Whether `date` falls Monday through Friday
    pub fn is_weekday<D: Datelike>(date: &D) -> bool {
        Self::AnyWeekday.matches(date)
    }

    /// Whether `date` falls on a Saturday or Sunday
    pub fn is_weekend_day<D: Datelike>(date: &D) -> bool {
        Self::AnyWeekendDay.matches(date)
    }

    /// The three classes `date` belongs to: `AnyDay`, its own weekday, and
    /// exactly one of `AnyWeekday` / `AnyWeekendDay`.
    pub fn classes_of<D: Datelike>(date: &D) -> [Self; 3] {
        let weekday = date.weekday();
        let run = if is_weekend(weekday) {
            Self::AnyWeekendDay
        } else {
            Self::AnyWeekday
        };
        [Self::AnyDay, Self::Weekday(weekday), run]
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match *self {
            Self::Weekday(weekday) => weekday_name(weekday),
            Self::AnyDay => "Day",
            Self::AnyWeekday => "Weekday",
            Self::AnyWeekendDay => "Weekend day",
        }
    }

    /// Stable export tag, used for serialization and parsing
    pub fn tag(&self) -> &'static str {
        match *self {
            Self::Weekday(weekday) => weekday_name(weekday),
            Self::AnyDay => "Day",
            Self::AnyWeekday => "Weekday",
            Self::AnyWeekendDay => "WeekendDay",
        }
    }
}

impl From<Weekday> for DayClass {
    fn from(weekday: Weekday) -> Self {
        Self::Weekday(weekday)
    }
}

impl fmt::Display for DayClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DayClass {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Self::ALL
            .into_iter()
            .find(|class| class.tag() == tag)
            .ok_or_else(|| RuleError::UnknownTag(tag.to_owned()))
    }
}

/// Which occurrence of a day class within a month a rule selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OrdinalPosition {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

impl OrdinalPosition {
    pub const ALL: [Self; 5] = [Self::First, Self::Second, Self::Third, Self::Fourth, Self::Last];

    /// Creates the `n`th position, validating that `n` is in `1..=MAX_ORDINAL`
    ///
    /// # Errors
    /// Returns `RuleError::InvalidOrdinal` if `n` is 0 or greater than 4.
    pub fn nth(n: u8) -> Result<Self, RuleError> {
        match n {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            3 => Ok(Self::Third),
            4 => Ok(Self::Fourth),
            _ => Err(RuleError::InvalidOrdinal(n)),
        }
    }

    /// The 1-based occurrence number, or `None` for `Last`
    pub const fn number(self) -> Option<u8> {
        match self {
            Self::First => Some(1),
            Self::Second => Some(2),
            Self::Third => Some(3),
            Self::Fourth => Some(MAX_ORDINAL),
            Self::Last => None,
        }
    }

    /// Human-readable label; also the export tag
    pub const fn label(self) -> &'static str {
        match self {
            Self::First => "First",
            Self::Second => "Second",
            Self::Third => "Third",
            Self::Fourth => "Fourth",
            Self::Last => "Last",
        }
    }

    pub const fn tag(self) -> &'static str {
        self.label()
    }
}

impl TryFrom<u8> for OrdinalPosition {
    type Error = RuleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::nth(value)
    }
}

impl fmt::Display for OrdinalPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrdinalPosition {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Self::ALL
            .into_iter()
            .find(|position| position.tag() == tag)
            .ok_or_else(|| RuleError::UnknownTag(tag.to_owned()))
    }
}

/// A raw day-of-month number guaranteed to be in `1..=MAX_DAY_OF_MONTH`.
/// Whether the day exists in a particular month is decided at compute time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
#[serde(try_from = "u8", into = "u8")]
pub struct DayOfMonth(NonZeroU8);

impl DayOfMonth {
    /// Creates a new day-of-month, validating that it's within 1..=31
    ///
    /// # Errors
    /// Returns `RuleError::InvalidDayOfMonth` if the value is 0 or > 31.
    pub fn new(value: u8) -> Result<Self, RuleError> {
        let non_zero = NonZeroU8::new(value).ok_or(RuleError::InvalidDayOfMonth(value))?;
        if value > MAX_DAY_OF_MONTH {
            return Err(RuleError::InvalidDayOfMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Offset in days from the first of the month
    pub(crate) fn offset(self) -> i64 {
        i64::from(self.get() - MIN_DAY)
    }

    /// Ordinal word for the day, e.g. "Fifteenth"
    pub const fn label(self) -> &'static str {
        DAY_OF_MONTH_LABELS[self.0.get() as usize]
    }
}

impl TryFrom<u8> for DayOfMonth {
    type Error = RuleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DayOfMonth> for u8 {
    fn from(day: DayOfMonth) -> Self {
        day.0.get()
    }
}

/// The twelve months, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum MonthOfYear {
    January = 1,
    February = 2,
    March = 3,
    April = 4,
    May = 5,
    June = 6,
    July = 7,
    August = 8,
    September = 9,
    October = 10,
    November = 11,
    December = 12,
}

impl MonthOfYear {
    pub const ALL: [Self; 12] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];

    /// Creates a month from its number, validating that it's within 1..=12
    ///
    /// # Errors
    /// Returns `RuleError::InvalidMonth` if the value is 0 or > 12.
    pub fn new(value: u8) -> Result<Self, RuleError> {
        if value == 0 || value > MAX_MONTH {
            return Err(RuleError::InvalidMonth(value));
        }
        Ok(Self::ALL[usize::from(value - 1)])
    }

    /// The month containing `date`
    pub fn of<D: Datelike>(date: &D) -> Self {
        // Datelike::month0 is always 0..=11
        Self::ALL[date.month0() as usize]
    }

    /// Returns the month number (1-12)
    #[inline]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Whether `date` falls in this month of any year
    pub fn matches<D: Datelike>(self, date: &D) -> bool {
        date.month() == u32::from(self.number())
    }

    /// Human-readable label; also the export tag
    pub const fn label(self) -> &'static str {
        match self {
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        }
    }

    pub const fn tag(self) -> &'static str {
        self.label()
    }
}

impl TryFrom<u8> for MonthOfYear {
    type Error = RuleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MonthOfYear> for u8 {
    fn from(month: MonthOfYear) -> Self {
        month.number()
    }
}

impl From<chrono::Month> for MonthOfYear {
    fn from(month: chrono::Month) -> Self {
        Self::ALL[month.number_from_month() as usize - 1]
    }
}

impl From<MonthOfYear> for chrono::Month {
    fn from(month: MonthOfYear) -> Self {
        match month {
            MonthOfYear::January => Self::January,
            MonthOfYear::February => Self::February,
            MonthOfYear::March => Self::March,
            MonthOfYear::April => Self::April,
            MonthOfYear::May => Self::May,
            MonthOfYear::June => Self::June,
            MonthOfYear::July => Self::July,
            MonthOfYear::August => Self::August,
            MonthOfYear::September => Self::September,
            MonthOfYear::October => Self::October,
            MonthOfYear::November => Self::November,
            MonthOfYear::December => Self::December,
        }
    }
}

impl fmt::Display for MonthOfYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MonthOfYear {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Self::ALL
            .into_iter()
            .find(|month| month.tag() == tag)
            .ok_or_else(|| RuleError::UnknownTag(tag.to_owned()))
    }
}

/// Serializes through the export tag and parses it back on deserialization.
macro_rules! impl_tag_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.tag())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

impl_tag_serde!(DayClass);
impl_tag_serde!(OrdinalPosition);
impl_tag_serde!(MonthOfYear);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_day_class_matches_cases() {
        struct TestCase {
            date: NaiveDate,
            class: DayClass,
            expected: bool,
        }

        // 2024-06-01 is a Saturday, 2024-06-03 a Monday
        let cases = [
            TestCase {
                date: ymd(2024, 6, 1),
                class: DayClass::Weekday(Weekday::Sat),
                expected: true,
            },
            TestCase {
                date: ymd(2024, 6, 1),
                class: DayClass::Weekday(Weekday::Sun),
                expected: false,
            },
            TestCase {
                date: ymd(2024, 6, 1),
                class: DayClass::AnyWeekendDay,
                expected: true,
            },
            TestCase {
                date: ymd(2024, 6, 1),
                class: DayClass::AnyWeekday,
                expected: false,
            },
            TestCase {
                date: ymd(2024, 6, 3),
                class: DayClass::AnyWeekday,
                expected: true,
            },
            TestCase {
                date: ymd(2024, 6, 3),
                class: DayClass::AnyWeekendDay,
                expected: false,
            },
            TestCase {
                date: ymd(2024, 6, 3),
                class: DayClass::AnyDay,
                expected: true,
            },
        ];

        for case in &cases {
            assert_eq!(
                case.class.matches(&case.date),
                case.expected,
                "{} on {}",
                case.class,
                case.date
            );
        }
    }

    #[test]
    fn test_classes_of_partitions_week() {
        let mut date = ymd(2024, 6, 1);
        for _ in 0..7 {
            let classes = DayClass::classes_of(&date);
            assert_eq!(classes[0], DayClass::AnyDay);
            assert_eq!(classes[1], DayClass::Weekday(date.weekday()));
            for class in classes {
                assert!(class.matches(&date), "{class} should match {date}");
            }
            let weekday = DayClass::AnyWeekday.matches(&date);
            let weekend = DayClass::AnyWeekendDay.matches(&date);
            assert!(weekday ^ weekend, "{date} must be exactly one of weekday/weekend");
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_is_weekday_and_is_weekend_day_cases() {
        struct TestCase {
            date: NaiveDate,
            weekday: bool,
        }

        let cases = [
            // Friday, Saturday, Sunday, Monday around 2024-06-01
            TestCase {
                date: ymd(2024, 5, 31),
                weekday: true,
            },
            TestCase {
                date: ymd(2024, 6, 1),
                weekday: false,
            },
            TestCase {
                date: ymd(2024, 6, 2),
                weekday: false,
            },
            TestCase {
                date: ymd(2024, 6, 3),
                weekday: true,
            },
        ];

        for case in &cases {
            assert_eq!(DayClass::is_weekday(&case.date), case.weekday, "{}", case.date);
            assert_eq!(DayClass::is_weekend_day(&case.date), !case.weekday, "{}", case.date);
        }

        let saturday_evening = ymd(2024, 6, 1).and_hms_opt(21, 0, 0).unwrap();
        assert!(DayClass::is_weekend_day(&saturday_evening));
    }

    #[test]
    fn test_day_class_labels_and_tags() {
        assert_eq!(DayClass::Weekday(Weekday::Thu).label(), "Thursday");
        assert_eq!(DayClass::AnyWeekendDay.label(), "Weekend day");
        assert_eq!(DayClass::AnyWeekendDay.tag(), "WeekendDay");
        assert_eq!(DayClass::AnyDay.to_string(), "Day");
    }

    #[test]
    fn test_day_class_from_str() {
        for class in DayClass::ALL {
            assert_eq!(class.tag().parse::<DayClass>().unwrap(), class);
        }
        assert!(matches!(
            "Someday".parse::<DayClass>(),
            Err(RuleError::UnknownTag(tag)) if tag == "Someday"
        ));
    }

    #[test]
    fn test_day_class_serde() {
        let json = serde_json::to_string(&DayClass::AnyWeekendDay).unwrap();
        assert_eq!(json, "\"WeekendDay\"");
        let parsed: DayClass = serde_json::from_str("\"Monday\"").unwrap();
        assert_eq!(parsed, DayClass::Weekday(Weekday::Mon));
        assert!(serde_json::from_str::<DayClass>("\"Mon\"").is_err());
    }

    #[test]
    fn test_ordinal_nth_valid() {
        assert_eq!(OrdinalPosition::nth(1).unwrap(), OrdinalPosition::First);
        assert_eq!(OrdinalPosition::nth(4).unwrap(), OrdinalPosition::Fourth);
        for n in 1..=4 {
            assert_eq!(OrdinalPosition::nth(n).unwrap().number(), Some(n));
        }
        assert_eq!(OrdinalPosition::Last.number(), None);
    }

    #[test]
    fn test_ordinal_nth_invalid() {
        assert!(matches!(
            OrdinalPosition::nth(0),
            Err(RuleError::InvalidOrdinal(0))
        ));
        assert!(matches!(
            OrdinalPosition::try_from(5),
            Err(RuleError::InvalidOrdinal(5))
        ));
    }

    #[test]
    fn test_ordinal_serde() {
        let json = serde_json::to_string(&OrdinalPosition::Last).unwrap();
        assert_eq!(json, "\"Last\"");
        let parsed: OrdinalPosition = serde_json::from_str("\"Third\"").unwrap();
        assert_eq!(parsed, OrdinalPosition::Third);
    }

    #[test]
    fn test_day_of_month_new_valid() {
        assert!(DayOfMonth::new(1).is_ok());
        assert!(DayOfMonth::new(31).is_ok());
        assert_eq!(DayOfMonth::new(15).unwrap().get(), 15);
    }

    #[test]
    fn test_day_of_month_new_invalid() {
        assert!(matches!(
            DayOfMonth::new(0),
            Err(RuleError::InvalidDayOfMonth(0))
        ));
        assert!(matches!(
            DayOfMonth::new(32),
            Err(RuleError::InvalidDayOfMonth(32))
        ));
    }

    #[test]
    fn test_day_of_month_label_and_display() {
        let day = DayOfMonth::new(15).unwrap();
        assert_eq!(day.label(), "Fifteenth");
        assert_eq!(day.to_string(), "15");
        assert_eq!(DayOfMonth::new(31).unwrap().label(), "Thirty-first");
    }

    #[test]
    fn test_day_of_month_serde() {
        let day = DayOfMonth::new(15).unwrap();
        let json = serde_json::to_string(&day).unwrap();
        assert_eq!(json, "15");

        let parsed: DayOfMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(day, parsed);
        assert!(serde_json::from_str::<DayOfMonth>("32").is_err());
    }

    #[test]
    fn test_month_of_year_new() {
        for m in 1..=12 {
            assert_eq!(MonthOfYear::new(m).unwrap().number(), m);
        }
        assert!(matches!(MonthOfYear::new(0), Err(RuleError::InvalidMonth(0))));
        assert!(matches!(
            MonthOfYear::new(13),
            Err(RuleError::InvalidMonth(13))
        ));
    }

    #[test]
    fn test_month_of_year_matches() {
        let date = ymd(2024, 11, 23);
        assert!(MonthOfYear::November.matches(&date));
        assert!(!MonthOfYear::December.matches(&date));
        assert_eq!(MonthOfYear::of(&date), MonthOfYear::November);
    }

    #[test]
    fn test_month_of_year_chrono_conversion() {
        for month in MonthOfYear::ALL {
            let chrono_month: chrono::Month = month.into();
            assert_eq!(MonthOfYear::from(chrono_month), month);
        }
    }

    #[test]
    fn test_month_of_year_serde() {
        let json = serde_json::to_string(&MonthOfYear::February).unwrap();
        assert_eq!(json, "\"February\"");
        let parsed: MonthOfYear = serde_json::from_str("\"June\"").unwrap();
        assert_eq!(parsed, MonthOfYear::June);
    }
}
