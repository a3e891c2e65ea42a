//! Calendar-month arithmetic: month keys, day-of-month clamping.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Smallest year a [`MonthKey`] can carry; keeps the canonical form
/// four digits and every derived date representable.
pub const MIN_YEAR: i32 = 1;
/// Largest year a [`MonthKey`] can carry.
pub const MAX_YEAR: i32 = 9999;

/// Identifies a calendar month. Canonical text form is `"YYYY-MM"`,
/// which is also how it serializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Builds a month key; `month` must be in `1..=12` and `year` in
    /// `MIN_YEAR..=MAX_YEAR`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) && (MIN_YEAR..=MAX_YEAR).contains(&year) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year().clamp(MIN_YEAR, MAX_YEAR),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    /// The month immediately after this one. Saturates at December of
    /// `MAX_YEAR` so the result is always a valid key.
    pub fn next(self) -> Self {
        if self.month == 12 {
            if self.year >= MAX_YEAR {
                return self;
            }
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn first_day(self) -> NaiveDate {
        clamped_date(self.year, self.month, 1)
    }

    pub fn last_day(self) -> NaiveDate {
        clamped_date(self.year, self.month, 31)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        Self::from_date(date) == self
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur when parsing a [`MonthKey`] from text.
pub enum ParseMonthKeyError {
    InvalidFormat,
    MonthOutOfRange,
    YearOutOfRange,
}

impl fmt::Display for ParseMonthKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMonthKeyError::InvalidFormat => f.write_str("month key must look like YYYY-MM"),
            ParseMonthKeyError::MonthOutOfRange => f.write_str("month must be between 01 and 12"),
            ParseMonthKeyError::YearOutOfRange => {
                write!(f, "year must be between {MIN_YEAR} and {MAX_YEAR}")
            }
        }
    }
}

impl std::error::Error for ParseMonthKeyError {}

impl FromStr for MonthKey {
    type Err = ParseMonthKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (year, month) = value
            .split_once('-')
            .ok_or(ParseMonthKeyError::InvalidFormat)?;
        let year: i32 = year
            .parse()
            .map_err(|_| ParseMonthKeyError::InvalidFormat)?;
        let month: u32 = month
            .parse()
            .map_err(|_| ParseMonthKeyError::InvalidFormat)?;
        if !(1..=12).contains(&month) {
            return Err(ParseMonthKeyError::MonthOutOfRange);
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ParseMonthKeyError::YearOutOfRange);
        }
        Ok(MonthKey { year, month })
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}

/// Last day number of the given month (28..=31), computed as the first day
/// of the next month minus one day so leap years fall out of the calendar.
/// Out-of-range years and months clamp into `MIN_YEAR..=MAX_YEAR` and
/// `1..=12`, keeping the function total.
pub fn last_day_of_month(year: i32, month: u32) -> u32 {
    let year = year.clamp(MIN_YEAR, MAX_YEAR);
    let month = month.clamp(1, 12);
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    // Infallible after the clamps above: next_year <= MAX_YEAR + 1,
    // well inside chrono's representable range.
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1).unwrap();
    (first_of_next - Duration::days(1)).day()
}

/// Builds a valid date for (year, month, day), clamping every component into
/// range. Total for any input: day 0 clamps up to 1, day 31 clamps down in
/// short months, and years outside `MIN_YEAR..=MAX_YEAR` clamp to the bounds.
pub fn clamped_date(year: i32, month: u32, day: u32) -> NaiveDate {
    let year = year.clamp(MIN_YEAR, MAX_YEAR);
    let month = month.clamp(1, 12);
    let day = day.clamp(1, last_day_of_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Anchors a due date at local noon. Fractional-day arithmetic against noon
/// stays unambiguous across daylight-saving transitions at midnight.
pub fn at_noon(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(12, 0, 0).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_day_matches_gregorian_calendar() {
        assert_eq!(last_day_of_month(2023, 1), 31);
        assert_eq!(last_day_of_month(2023, 4), 30);
        assert_eq!(last_day_of_month(2023, 12), 31);
    }

    #[test]
    fn last_day_handles_leap_february() {
        assert_eq!(last_day_of_month(2023, 2), 28);
        assert_eq!(last_day_of_month(2024, 2), 29);
        assert_eq!(last_day_of_month(2000, 2), 29);
        assert_eq!(last_day_of_month(1900, 2), 28);
    }

    #[test]
    fn clamped_date_stays_inside_month() {
        for month in 1..=12 {
            for day in [0, 1, 15, 28, 29, 30, 31, 40] {
                let date = clamped_date(2024, month, day);
                assert_eq!(date.month(), month);
                assert_eq!(date.year(), 2024);
            }
        }
    }

    #[test]
    fn day_thirty_one_clamps_to_april_thirtieth() {
        assert_eq!(
            clamped_date(2024, 4, 31),
            NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()
        );
    }

    #[test]
    fn day_zero_clamps_up_to_first() {
        assert_eq!(
            clamped_date(2024, 6, 0),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
    }

    #[test]
    fn month_key_formats_and_parses() {
        let key = MonthKey::new(2024, 3).unwrap();
        assert_eq!(key.to_string(), "2024-03");
        assert_eq!("2024-03".parse::<MonthKey>().unwrap(), key);
        assert_eq!(
            "2024-13".parse::<MonthKey>(),
            Err(ParseMonthKeyError::MonthOutOfRange)
        );
        assert_eq!(
            "march".parse::<MonthKey>(),
            Err(ParseMonthKeyError::InvalidFormat)
        );
    }

    #[test]
    fn month_key_rejects_years_outside_bounds() {
        assert_eq!(
            "9999999-01".parse::<MonthKey>(),
            Err(ParseMonthKeyError::YearOutOfRange)
        );
        assert_eq!(
            "0000-01".parse::<MonthKey>(),
            Err(ParseMonthKeyError::YearOutOfRange)
        );
        assert_eq!(MonthKey::new(10_000, 1), None);
        assert_eq!(MonthKey::new(0, 1), None);
    }

    #[test]
    fn month_key_dates_never_fail_at_year_bounds() {
        let first = MonthKey::new(MIN_YEAR, 1).unwrap();
        assert_eq!(first.first_day(), NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1).unwrap());
        let last = MonthKey::new(MAX_YEAR, 12).unwrap();
        assert_eq!(
            last.last_day(),
            NaiveDate::from_ymd_opt(MAX_YEAR, 12, 31).unwrap()
        );
        assert_eq!(last.next(), last);
    }

    #[test]
    fn clamped_date_is_total_for_wild_years() {
        assert_eq!(
            clamped_date(9_999_999, 1, 31),
            NaiveDate::from_ymd_opt(MAX_YEAR, 1, 31).unwrap()
        );
        assert_eq!(
            clamped_date(i32::MIN, 2, 30),
            NaiveDate::from_ymd_opt(MIN_YEAR, 2, 28).unwrap()
        );
        assert_eq!(last_day_of_month(i32::MAX, 13), 31);
    }

    #[test]
    fn month_key_next_rolls_over_december() {
        let december = MonthKey::new(2024, 12).unwrap();
        assert_eq!(december.next(), MonthKey::new(2025, 1).unwrap());
        let june = MonthKey::new(2024, 6).unwrap();
        assert_eq!(june.next(), MonthKey::new(2024, 7).unwrap());
    }

    #[test]
    fn month_key_contains_its_own_days_only() {
        let key = MonthKey::new(2024, 2).unwrap();
        assert!(key.contains(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
        assert!(!key.contains(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert_eq!(key.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(key.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }
}
