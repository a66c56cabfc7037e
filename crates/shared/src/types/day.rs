//! Calendar-day ranges and year-month periods.
//!
//! Date filters compare whole calendar days and are inclusive on both ends.
//! Bounds are kept as `(year, month, day)` keys rather than `NaiveDate`, so a
//! month range can end on "day 31" regardless of the month's real length.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Last day used for month ranges; shorter months simply have no records past their end.
const MONTH_RANGE_LAST_DAY: u32 = 31;

/// A calendar day ordered by `(year, month, day)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DayKey {
    /// Calendar year.
    pub year: i32,
    /// Month (1-12).
    pub month: u32,
    /// Day of month (1-31, not checked against the month's length).
    pub day: u32,
}

impl DayKey {
    /// Creates a key without validating the day against the month.
    #[must_use]
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }
}

impl From<DateTime<Utc>> for DayKey {
    fn from(timestamp: DateTime<Utc>) -> Self {
        Self::from(timestamp.date_naive())
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// An inclusive range of calendar days; a missing bound is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DayRange {
    /// First day included.
    pub from: Option<DayKey>,
    /// Last day included.
    pub to: Option<DayKey>,
}

impl DayRange {
    /// Creates a range from optional inclusive dates.
    #[must_use]
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self {
            from: from.map(DayKey::from),
            to: to.map(DayKey::from),
        }
    }

    /// A range with no bounds.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            from: None,
            to: None,
        }
    }

    /// A range covering exactly one day.
    #[must_use]
    pub fn single_day(date: NaiveDate) -> Self {
        Self::new(Some(date), Some(date))
    }

    /// The range `[YYYY-MM-01, YYYY-MM-31]` for a month.
    #[must_use]
    pub const fn month(month: YearMonth) -> Self {
        Self {
            from: Some(DayKey::new(month.year, month.month, 1)),
            to: Some(DayKey::new(month.year, month.month, MONTH_RANGE_LAST_DAY)),
        }
    }

    /// Whether the day falls inside the range, comparing dates only.
    pub fn contains(&self, day: impl Into<DayKey>) -> bool {
        let day = day.into();
        self.from.is_none_or(|from| day >= from) && self.to.is_none_or(|to| day <= to)
    }
}

/// Error returned when a `YYYY-MM` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum YearMonthParseError {
    /// The string is not of the form `YYYY-MM`.
    #[error("Expected a month in YYYY-MM format, got '{0}'")]
    Format(String),

    /// The month component is outside 1..=12.
    #[error("Month must be between 1 and 12, got {0}")]
    MonthOutOfRange(u32),
}

/// A calendar month such as `2026-03`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    /// Calendar year.
    pub year: i32,
    /// Month (1-12).
    pub month: u32,
}

impl YearMonth {
    /// Creates a year-month, rejecting months outside 1..=12.
    pub fn new(year: i32, month: u32) -> Result<Self, YearMonthParseError> {
        if !(1..=12).contains(&month) {
            return Err(YearMonthParseError::MonthOutOfRange(month));
        }
        Ok(Self { year, month })
    }

    /// The month containing the given date.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = YearMonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| YearMonthParseError::Format(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| YearMonthParseError::Format(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| YearMonthParseError::Format(s.to_string()))?;
        Self::new(year, month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_is_inclusive_on_both_ends() {
        let range = DayRange::new(Some(date(2026, 3, 10)), Some(date(2026, 3, 12)));
        assert!(!range.contains(date(2026, 3, 9)));
        assert!(range.contains(date(2026, 3, 10)));
        assert!(range.contains(date(2026, 3, 12)));
        assert!(!range.contains(date(2026, 3, 13)));
    }

    #[test]
    fn test_range_ignores_time_of_day() {
        let range = DayRange::single_day(date(2026, 3, 10));
        let late = Utc.with_ymd_and_hms(2026, 3, 10, 23, 59, 59).unwrap();
        let early = Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap();
        assert!(range.contains(late));
        assert!(range.contains(early));
    }

    #[test]
    fn test_open_bounds() {
        let from_only = DayRange::new(Some(date(2026, 1, 1)), None);
        assert!(from_only.contains(date(2099, 12, 31)));
        assert!(!from_only.contains(date(2025, 12, 31)));

        let to_only = DayRange::new(None, Some(date(2026, 1, 1)));
        assert!(to_only.contains(date(1999, 1, 1)));
        assert!(!to_only.contains(date(2026, 1, 2)));

        assert!(DayRange::unbounded().contains(date(2026, 6, 15)));
    }

    #[test]
    fn test_month_range_ends_on_day_31_for_every_month() {
        let february = DayRange::month(YearMonth::new(2026, 2).unwrap());
        assert_eq!(february.to, Some(DayKey::new(2026, 2, 31)));
        assert!(february.contains(date(2026, 2, 1)));
        assert!(february.contains(date(2026, 2, 28)));
        assert!(!february.contains(date(2026, 3, 1)));
        assert!(!february.contains(date(2026, 1, 31)));
    }

    #[rstest]
    #[case("2026-03", 2026, 3)]
    #[case("2026-12", 2026, 12)]
    #[case(" 2025-1 ", 2025, 1)]
    fn test_year_month_parse(#[case] raw: &str, #[case] year: i32, #[case] month: u32) {
        let parsed: YearMonth = raw.parse().unwrap();
        assert_eq!(parsed, YearMonth { year, month });
    }

    #[rstest]
    #[case("2026-13")]
    #[case("2026-00")]
    #[case("2026")]
    #[case("march")]
    #[case("")]
    fn test_year_month_parse_rejects(#[case] raw: &str) {
        assert!(raw.parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_year_month_display_pads() {
        assert_eq!(YearMonth::new(2026, 3).unwrap().to_string(), "2026-03");
        assert_eq!(DayKey::new(2026, 2, 31).to_string(), "2026-02-31");
    }

    #[test]
    fn test_year_month_of_date() {
        assert_eq!(
            YearMonth::of(date(2026, 7, 19)),
            YearMonth::new(2026, 7).unwrap()
        );
    }
}
