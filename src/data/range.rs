//! Date Ranges
//!
//! Inclusive [start, end] bounds for filtering the dataset. Either side may
//! be absent (a cleared picker), which leaves that side unbounded.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default start date for the finance page picker.
pub const DEFAULT_START: NaiveDate = match NaiveDate::from_ymd_opt(2022, 4, 9) {
    Some(d) => d,
    None => panic!("invalid default start date"),
};

/// An inclusive date interval with optional bounds.
///
/// `start > end` is a legal range that contains no dates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    /// Start date (inclusive), None = unbounded
    pub start: Option<NaiveDate>,
    /// End date (inclusive), None = unbounded
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Create a range with both bounds set
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Create a range from optional bounds
    pub fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// A range unbounded on both sides, containing every date
    pub fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// The picker default: fixed start date through today
    pub fn default_range() -> Self {
        Self {
            start: Some(DEFAULT_START),
            end: Some(Local::now().date_naive()),
        }
    }

    /// Whether `date` falls inside the range (inclusive on both ends)
    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if date > end {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dataset, Row};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample() -> Dataset {
        Dataset::new(vec![
            Row::new(d("2022-01-01"), 100.0, 90.0),
            Row::new(d("2022-06-01"), 110.0, 115.0),
        ])
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let range = DateRange::new(d("2022-01-01"), d("2022-06-01"));
        assert!(range.contains(d("2022-01-01")));
        assert!(range.contains(d("2022-06-01")));
        assert!(range.contains(d("2022-03-15")));
        assert!(!range.contains(d("2021-12-31")));
        assert!(!range.contains(d("2022-06-02")));
    }

    #[test]
    fn test_missing_bound_is_unbounded() {
        let open_start = DateRange::from_bounds(None, Some(d("2022-06-01")));
        assert!(open_start.contains(d("1990-01-01")));
        assert!(!open_start.contains(d("2022-06-02")));

        let open_end = DateRange::from_bounds(Some(d("2022-01-01")), None);
        assert!(open_end.contains(d("2099-12-31")));
        assert!(!open_end.contains(d("2021-12-31")));

        assert!(DateRange::unbounded().contains(d("2022-01-01")));
    }

    #[test]
    fn test_filter_keeps_source_order() {
        let dataset = sample();
        let filtered = dataset.filter_by_range(&DateRange::new(d("2021-01-01"), d("2023-01-01")));
        assert_eq!(filtered.rows(), dataset.rows());
    }

    #[test]
    fn test_filter_scenario() {
        // range (2022-03-01, 2022-12-31) keeps only the June observation
        let filtered = sample().filter_by_range(&DateRange::new(d("2022-03-01"), d("2022-12-31")));
        assert_eq!(filtered.rows(), &[Row::new(d("2022-06-01"), 110.0, 115.0)]);
    }

    #[test]
    fn test_inverted_range_is_empty_not_error() {
        let filtered = sample().filter_by_range(&DateRange::new(d("2022-12-31"), d("2022-01-01")));
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_default_range_starts_fixed() {
        let range = DateRange::default_range();
        assert_eq!(range.start, Some(d("2022-04-09")));
        assert!(range.end.is_some());
    }
}
