use std::ops::RangeInclusive;

use chrono::{
    Datelike,
    NaiveDate
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("from date {from} must be before or equal to to date {to}")]
pub struct InvalidDateRange {
    pub from: NaiveDate,
    pub to: NaiveDate
}

/// Inclusive span of calendar days. The bounds are kept as given: a reversed
/// pair is rejected instead of being swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeOfDates {
    start_date: NaiveDate,
    end_date: NaiveDate
}

impl RangeOfDates {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<RangeOfDates, InvalidDateRange> {
        if from > to {
            Err(InvalidDateRange { from, to })
        } else {
            Ok(RangeOfDates { start_date: from, end_date: to })
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn len(&self) -> usize {
        ((self.end_date - self.start_date).num_days() + 1) as usize
    }

    pub fn contains(&self, d: NaiveDate) -> bool {
        (d >= self.start_date) && (d <= self.end_date)
    }

    pub fn is_single_year(&self) -> bool {
        self.start_date.year() == self.end_date.year()
    }

    /// Calendar years touched by the range.
    pub fn years(&self) -> RangeInclusive<i32> {
        self.start_date.year()..=self.end_date.year()
    }

    pub fn iter(&self) -> RangeOfDatesIterator {
        RangeOfDatesIterator {
            next: Some(self.start_date),
            end_date: self.end_date
        }
    }

    pub fn to_vec(&self) -> Vec<NaiveDate> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &'a RangeOfDates {
    type Item = NaiveDate;
    type IntoIter = RangeOfDatesIterator;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Walks the range one calendar day at a time.
pub struct RangeOfDatesIterator {
    next: Option<NaiveDate>,
    end_date: NaiveDate
}

impl Iterator for RangeOfDatesIterator {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|d| *d <= self.end_date)?;
        self.next = current.succ_opt();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let err = RangeOfDates::new(ymd(2024, 2, 1), ymd(2024, 1, 1)).unwrap_err();
        assert_eq!(err.from, ymd(2024, 2, 1));
        assert_eq!(err.to, ymd(2024, 1, 1));
    }

    #[test]
    fn test_single_day_range() {
        let range = RangeOfDates::new(ymd(2024, 3, 1), ymd(2024, 3, 1)).unwrap();
        assert_eq!(range.len(), 1);
        assert_eq!(range.to_vec(), vec![ymd(2024, 3, 1)]);
        assert!(range.is_single_year());
    }

    #[test]
    fn test_iteration_over_leap_day_and_new_year() {
        let range = RangeOfDates::new(ymd(2024, 2, 27), ymd(2024, 3, 2)).unwrap();
        assert_eq!(
            range.to_vec(),
            vec![ymd(2024, 2, 27), ymd(2024, 2, 28), ymd(2024, 2, 29), ymd(2024, 3, 1), ymd(2024, 3, 2)]
        );

        let range = RangeOfDates::new(ymd(2023, 12, 30), ymd(2024, 1, 2)).unwrap();
        assert_eq!(range.len(), 4);
        assert_eq!(range.iter().count(), 4);
        assert!(!range.is_single_year());
        assert_eq!(range.years().collect::<Vec<_>>(), vec![2023, 2024]);
    }

    #[test]
    fn test_iteration_stops_at_max_date() {
        let range = RangeOfDates::new(NaiveDate::MAX, NaiveDate::MAX).unwrap();
        assert_eq!(range.to_vec(), vec![NaiveDate::MAX]);
    }

    #[test]
    fn test_contains() {
        let range = RangeOfDates::new(ymd(2024, 1, 1), ymd(2024, 1, 31)).unwrap();
        assert!(range.contains(ymd(2024, 1, 1)));
        assert!(range.contains(ymd(2024, 1, 31)));
        assert!(!range.contains(ymd(2024, 2, 1)));
        assert!(!range.contains(ymd(2023, 12, 31)));
    }
}
