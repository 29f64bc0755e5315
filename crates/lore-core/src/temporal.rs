//! # Temporal Types — Strict Calendar Dates
//!
//! Defines `CalendarDate`, the only accepted representation of dates in lore
//! frontmatter (`born`, `died`, event `date`).
//!
//! ## Invariant
//!
//! A date is valid only if its text matches `^\d{4}-\d{2}-\d{2}$` AND the
//! year/month/day name a real day: `1 <= month <= 12` and
//! `1 <= day <= days_in_month(year, month)`. `2024-02-29` is accepted,
//! `2023-02-29` and `2024-02-30` are not.
//!
//! There is no normalization. YAML parsers in other ecosystems silently roll
//! `2023-02-30` over to March; here it is rejected, which is why callers feed
//! the raw frontmatter text rather than a coerced value.
//!
//! Because the format is fixed-width and zero-padded, lexicographic order on
//! the source text equals chronological order. `Ord` on `CalendarDate`
//! compares chronologically, which yields the same answer.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a string is not a calendar date.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Text is not `YYYY-MM-DD`.
    #[error("expected YYYY-MM-DD, got {0:?}")]
    Malformed(String),

    /// Text has the right shape but names no real day.
    #[error("{0:?} is not a day in the calendar")]
    NotACalendarDay(String),
}

/// A validated `YYYY-MM-DD` date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Parse a strict `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// - [`DateError::Malformed`] if the text is not four digits, dash, two
    ///   digits, dash, two digits.
    /// - [`DateError::NotACalendarDay`] if the month is outside `1..=12` or
    ///   the day is outside the month.
    pub fn parse(s: &str) -> Result<Self, DateError> {
        let bytes = s.as_bytes();
        let shape_ok = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !shape_ok {
            return Err(DateError::Malformed(s.to_string()));
        }

        // Slices are ASCII digits, so these parses cannot fail.
        let year: i32 = s[0..4].parse().map_err(|_| DateError::Malformed(s.to_string()))?;
        let month: u32 = s[5..7].parse().map_err(|_| DateError::Malformed(s.to_string()))?;
        let day: u32 = s[8..10].parse().map_err(|_| DateError::Malformed(s.to_string()))?;

        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| DateError::NotACalendarDay(s.to_string()))
    }

    /// Whether `s` is a valid calendar date.
    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_ok()
    }

    /// Access the inner `NaiveDate`.
    pub fn as_naive(&self) -> &NaiveDate {
        &self.0
    }

    /// Render as `YYYY-MM-DD`.
    pub fn to_iso8601(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.0.year(), self.0.month(), self.0.day())
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_leap_day_accepted() {
        assert!(CalendarDate::is_valid("2024-02-29"));
        assert!(CalendarDate::is_valid("2000-02-29"));
    }

    #[test]
    fn test_non_leap_day_rejected() {
        assert_eq!(
            CalendarDate::parse("2023-02-29"),
            Err(DateError::NotACalendarDay("2023-02-29".into()))
        );
        assert!(!CalendarDate::is_valid("1900-02-29"));
    }

    #[test]
    fn test_day_past_month_end_rejected() {
        assert!(!CalendarDate::is_valid("2024-02-30"));
        assert!(!CalendarDate::is_valid("2024-04-31"));
        assert!(!CalendarDate::is_valid("2024-01-00"));
    }

    #[test]
    fn test_month_out_of_range_rejected() {
        assert!(!CalendarDate::is_valid("2024-13-01"));
        assert!(!CalendarDate::is_valid("2024-00-10"));
    }

    #[test]
    fn test_malformed_rejected() {
        for input in ["2024/01/01", "2024-1-01", "24-01-01", "2024-01-01T00:00:00Z", "", "２０２４-01-01"] {
            assert!(
                matches!(CalendarDate::parse(input), Err(DateError::Malformed(_))),
                "{input:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_display_matches_source() {
        let date = CalendarDate::parse("0999-07-04").unwrap();
        assert_eq!(date.to_string(), "0999-07-04");
    }

    #[test]
    fn test_ordering_is_chronological() {
        let born = CalendarDate::parse("2020-01-01").unwrap();
        let died = CalendarDate::parse("2019-01-01").unwrap();
        assert!(died < born);
    }

    #[test]
    fn test_serde_uses_iso_string() {
        let date = CalendarDate::parse("2024-02-29").unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2024-02-29\"");
    }

    proptest! {
        #[test]
        fn leap_day_validity_follows_gregorian_rule(year in 1i32..=9999) {
            let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
            let text = format!("{year:04}-02-29");
            prop_assert_eq!(CalendarDate::is_valid(&text), leap);
        }

        #[test]
        fn valid_dates_render_back_to_source(year in 1i32..=9999, month in 1u32..=12, day in 1u32..=28) {
            let text = format!("{year:04}-{month:02}-{day:02}");
            let parsed = CalendarDate::parse(&text).unwrap();
            prop_assert_eq!(parsed.to_string(), text);
        }

        #[test]
        fn text_order_matches_date_order(a in 1i32..=9999, b in 1i32..=9999, m in 1u32..=12) {
            let left = format!("{a:04}-{m:02}-15");
            let right = format!("{b:04}-{m:02}-15");
            let by_text = left.cmp(&right);
            let by_date = CalendarDate::parse(&left).unwrap().cmp(&CalendarDate::parse(&right).unwrap());
            prop_assert_eq!(by_text, by_date);
        }
    }
}
