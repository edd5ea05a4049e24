use std::collections::HashSet;

use chrono::NaiveDate;

use crate::holiday::holiday::Holiday;
use crate::time::calendar::holidaycalendar::HolidayCalendar;

/// Business-day calculator over a snapshot of holidays.
///
/// The blocked set is copied at construction; later changes to the source
/// collection are not observed. The calculator holds no other state, so it can
/// be shared freely across threads once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessDayCalculator {
    holiday_set: HashSet<NaiveDate>
}

impl BusinessDayCalculator {
    pub fn new(holidays: &[Holiday]) -> BusinessDayCalculator {
        BusinessDayCalculator::from_dates(holidays.iter().map(Holiday::date))
    }

    pub fn from_dates<I>(dates: I) -> BusinessDayCalculator
    where
        I: IntoIterator<Item = NaiveDate>
    {
        BusinessDayCalculator { holiday_set: dates.into_iter().collect() }
    }

    pub fn holiday_set(&self) -> &HashSet<NaiveDate> {
        &self.holiday_set
    }
}

impl HolidayCalendar for BusinessDayCalculator {
    #[inline]
    fn is_holiday(&self, d: NaiveDate) -> bool {
        self.holiday_set.contains(&d)
    }
}
