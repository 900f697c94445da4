/// Number of days in a week, the stride between occurrences of one weekday
pub const DAYS_IN_WEEK: i64 = 7;

/// Highest ordinal position ("fourth") a rule may name
pub const MAX_ORDINAL: u8 = 4;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Highest raw day-of-month a rule may name
pub const MAX_DAY_OF_MONTH: u8 = 31;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Ordinal words used as labels for raw days of the month.
/// Index 0 is unused (days are 1-indexed).
pub const DAY_OF_MONTH_LABELS: [&str; 32] = [
    "",
    "First",
    "Second",
    "Third",
    "Fourth",
    "Fifth",
    "Sixth",
    "Seventh",
    "Eighth",
    "Ninth",
    "Tenth",
    "Eleventh",
    "Twelfth",
    "Thirteenth",
    "Fourteenth",
    "Fifteenth",
    "Sixteenth",
    "Seventeenth",
    "Eighteenth",
    "Nineteenth",
    "Twentieth",
    "Twenty-first",
    "Twenty-second",
    "Twenty-third",
    "Twenty-fourth",
    "Twenty-fifth",
    "Twenty-sixth",
    "Twenty-seventh",
    "Twenty-eighth",
    "Twenty-ninth",
    "Thirtieth",
    "Thirty-first",
];
