//! Calendar month used to bucket expenses
//!
//! A `Month` is a validated (year, month) pair. The tracker keeps one as the
//! currently viewed month and moves it backwards and forwards.

use chrono::{Datelike, NaiveDate};
use std::fmt;

const MONTH_NAMES_PT_BR: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// A (year, month) pair with month in 1..=12
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Create a month, rejecting month numbers outside 1..=12 and years no
    /// calendar date can have
    pub fn new(year: i32, month: u32) -> Result<Self, MonthParseError> {
        if !(1..=12).contains(&month) {
            return Err(MonthParseError::InvalidMonth(month));
        }
        if !(Self::first().year..=Self::last().year).contains(&year) {
            return Err(MonthParseError::InvalidYear(year));
        }
        Ok(Self { year, month })
    }

    /// The earliest month a date can fall in
    pub fn first() -> Self {
        Self::containing(NaiveDate::MIN)
    }

    /// The latest month a date can fall in
    pub fn last() -> Self {
        Self::containing(NaiveDate::MAX)
    }

    /// The month containing the given date
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current local calendar month
    pub fn current() -> Self {
        Self::containing(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Get the next month, wrapping into the next year after December
    ///
    /// Stays put at [`Month::last`].
    pub fn next(&self) -> Self {
        let next = if self.month == 12 {
            Self {
                year: self.year.saturating_add(1),
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        };
        next.min(Self::last())
    }

    /// Get the previous month, wrapping into the previous year before January
    ///
    /// Stays put at [`Month::first`].
    pub fn prev(&self) -> Self {
        let prev = if self.month == 1 {
            Self {
                year: self.year.saturating_sub(1),
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        };
        prev.max(Self::first())
    }

    /// Long label as shown in the month navigator, e.g. "março de 2024"
    pub fn label(&self) -> String {
        let name = MONTH_NAMES_PT_BR[(self.month - 1) as usize];
        format!("{} de {}", name, self.year)
    }

    /// Parse a month string
    ///
    /// Formats: "2024-03" and "03/2024"
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let s = s.trim();
        let invalid = || MonthParseError::InvalidFormat(s.to_string());

        let (year, month) = if let Some((year, month)) = s.split_once('-') {
            (year, month)
        } else if let Some((month, year)) = s.split_once('/') {
            (year, month)
        } else {
            return Err(invalid());
        };

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    InvalidYear(i32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthParseError::InvalidFormat(s) => write!(f, "Invalid month format: {}", s),
            MonthParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            MonthParseError::InvalidYear(y) => write!(f, "Year out of range: {}", y),
        }
    }
}

impl std::error::Error for MonthParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rejects_invalid_month() {
        assert_eq!(Month::new(2024, 0), Err(MonthParseError::InvalidMonth(0)));
        assert_eq!(Month::new(2024, 13), Err(MonthParseError::InvalidMonth(13)));
    }

    #[test]
    fn test_navigation_wraps_years() {
        let dec = Month::new(2024, 12).unwrap();
        assert_eq!(dec.next(), Month::new(2025, 1).unwrap());
        assert_eq!(dec.next().prev(), dec);

        let jan = Month::new(2024, 1).unwrap();
        assert_eq!(jan.prev(), Month::new(2023, 12).unwrap());
    }

    #[test]
    fn test_rejects_years_without_dates() {
        assert_eq!(
            Month::parse("2147483647-12"),
            Err(MonthParseError::InvalidYear(i32::MAX))
        );
        assert_eq!(
            Month::new(i32::MIN, 1),
            Err(MonthParseError::InvalidYear(i32::MIN))
        );
        assert!(Month::new(Month::last().year(), 12).is_ok());
        assert!(Month::new(Month::first().year(), 1).is_ok());
    }

    #[test]
    fn test_navigation_stops_at_calendar_edges() {
        let last = Month::last();
        assert_eq!(last.next(), last);
        assert_eq!(last.prev().next(), last);

        let first = Month::first();
        assert_eq!(first.prev(), first);
        assert_eq!(first.next().prev(), first);
    }

    #[test]
    fn test_contains() {
        let march = Month::new(2024, 3).unwrap();
        assert!(march.contains(date(2024, 3, 1)));
        assert!(march.contains(date(2024, 3, 31)));
        assert!(!march.contains(date(2024, 4, 1)));
        assert!(!march.contains(date(2023, 3, 15)));
    }

    #[test]
    fn test_containing() {
        assert_eq!(Month::containing(date(2024, 2, 29)), Month::new(2024, 2).unwrap());
    }

    #[test]
    fn test_parse() {
        assert_eq!(Month::parse("2024-03").unwrap(), Month::new(2024, 3).unwrap());
        assert_eq!(Month::parse("03/2024").unwrap(), Month::new(2024, 3).unwrap());
        assert_eq!(Month::parse("2024-13"), Err(MonthParseError::InvalidMonth(13)));
        assert!(matches!(
            Month::parse("march"),
            Err(MonthParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_display_and_label() {
        let march = Month::new(2024, 3).unwrap();
        assert_eq!(march.to_string(), "2024-03");
        assert_eq!(march.label(), "março de 2024");
        assert_eq!(Month::new(2025, 12).unwrap().label(), "dezembro de 2025");
    }
}
