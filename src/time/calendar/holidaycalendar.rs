use chrono::NaiveDate;
use thiserror::Error;

use crate::time::rangeofdates::{InvalidDateRange, RangeOfDates};
use crate::time::utility::{add_days, is_weekend};

/// Searches give up after this many consecutive non-business days. Any real
/// holiday calendar leaves a business day within a couple of weeks; hitting the
/// cap means the calendar itself is malformed (e.g. every day blocked).
pub const MAX_NON_BUSINESS_RUN: u32 = 366;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error(transparent)]
    InvalidRange(#[from] InvalidDateRange),
    #[error("no business day within {searched} days of {from}")]
    NoBusinessDay { from: NaiveDate, searched: u32 },
    #[error("stepping from {0} leaves the representable date range")]
    DateOutOfRange(NaiveDate)
}

/// Business-day arithmetic over a week of Monday to Friday working days and a
/// set of blocked dates. Implementors only decide which dates are holidays.
pub trait HolidayCalendar: Send + Sync {
    fn is_holiday(&self, d: NaiveDate) -> bool;

    fn is_weekend(&self, d: NaiveDate) -> bool {
        is_weekend(d)
    }

    fn is_business_day(&self, d: NaiveDate) -> bool {
        if self.is_weekend(d) {
            return false;
        }
        !self.is_holiday(d)
    }

    /// Inclusive count of business days in `[from, to]`.
    fn count_business_days(&self, from: NaiveDate, to: NaiveDate) -> Result<usize, CalendarError> {
        let range = RangeOfDates::new(from, to)?;
        Ok(range.iter().filter(|d| self.is_business_day(*d)).count())
    }

    /// Business days of `[from, to]` in ascending order.
    fn business_days_in_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<NaiveDate>, CalendarError> {
        let range = RangeOfDates::new(from, to)?;
        Ok(range.iter().filter(|d| self.is_business_day(*d)).collect())
    }

    /// Moves `n` business days away from `horizon`. The horizon itself is
    /// never counted, only the days landed on in the direction of travel.
    fn add_business_days(&self, horizon: NaiveDate, n: i32) -> Result<NaiveDate, CalendarError> {
        let step: i64 = if n >= 0 { 1 } else { -1 };

        let mut m = n.unsigned_abs();
        let mut d = horizon;
        let mut run = 0u32;
        while m > 0 {
            d = add_days(d, step).ok_or(CalendarError::DateOutOfRange(d))?;
            if self.is_business_day(d) {
                m -= 1;
                run = 0;
            } else {
                run += 1;
                if run >= MAX_NON_BUSINESS_RUN {
                    return Err(CalendarError::NoBusinessDay { from: horizon, searched: run });
                }
            }
        }
        Ok(d)
    }

    /// First business day strictly after `d`.
    fn next_business_day(&self, d: NaiveDate) -> Result<NaiveDate, CalendarError> {
        self.add_business_days(d, 1)
    }

    /// Last business day strictly before `d`.
    fn previous_business_day(&self, d: NaiveDate) -> Result<NaiveDate, CalendarError> {
        self.add_business_days(d, -1)
    }
}
