use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{
    Datelike,
    NaiveDate
};
use tracing::{debug, info, warn};

use crate::cache::cachestats::CacheStats;
use crate::cache::clock::{Clock, SystemClock};
use crate::cache::yearcache::YearCache;
use crate::client::clienterror::ClientError;
use crate::client::holidaysource::HolidaySource;
use crate::configuration::ClientOptions;
use crate::holiday::holiday::Holiday;
use crate::time::calendar::businessdaycalculator::BusinessDayCalculator;
use crate::time::calendar::holidaycalendar::{CalendarError, HolidayCalendar};
use crate::time::rangeofdates::RangeOfDates;
use crate::time::utility::add_days;

/// Calendar days fetched per requested business day when offsetting, plus a
/// fixed margin for holiday clusters.
const OFFSET_SPAN_FACTOR: f64 = 1.4;
const OFFSET_SPAN_MARGIN: i64 = 14;

/// Holiday lookups backed by a [`HolidaySource`] with an optional year cache
/// in front of it.
///
/// The cache sits behind a mutex that is never held while the source is
/// queried, so two callers missing the same year both fetch it and the later
/// write wins.
pub struct HolidayClient<S: HolidaySource, K: Clock = SystemClock> {
    options: ClientOptions,
    source: S,
    cache: Option<Mutex<YearCache<K>>>
}

impl<S: HolidaySource> HolidayClient<S> {
    pub fn new(options: ClientOptions, source: S) -> Self {
        Self::with_clock(options, source, SystemClock)
    }
}

impl<S: HolidaySource, K: Clock> HolidayClient<S, K> {
    pub fn with_clock(options: ClientOptions, source: S, clock: K) -> Self {
        let cache = options.cache.enabled
            .then(|| Mutex::new(YearCache::with_clock(options.cache.ttl_policy(), clock)));
        Self { options, source, cache }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    fn lock_cache(&self) -> Option<MutexGuard<'_, YearCache<K>>> {
        self.cache
            .as_ref()
            .map(|cache| cache.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn check_year(&self, year: i32) -> Result<(), ClientError> {
        if self.options.contains_year(year) {
            Ok(())
        } else {
            warn!(year, "rejected year outside configured bounds");
            Err(ClientError::InvalidYear {
                year,
                min: self.options.min_year,
                max: self.options.max_year
            })
        }
    }

    /// All holidays of `year`, from the cache when fresh.
    pub fn get_holidays(&self, year: i32) -> Result<Vec<Holiday>, ClientError> {
        self.check_year(year)?;

        if let Some(mut cache) = self.lock_cache() {
            if let Some(holidays) = cache.get(year) {
                debug!(year, "holiday cache hit");
                return Ok(holidays);
            }
            debug!(year, "holiday cache miss");
        }

        info!(year, "fetching holidays from source");
        let holidays = self.source.fetch_year(year)?;

        if let Some(mut cache) = self.lock_cache() {
            cache.set(year, holidays.clone());
        }
        Ok(holidays)
    }

    /// Holidays within `[from, to]`, fetched year by year.
    pub fn get_holidays_by_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Holiday>, ClientError> {
        let range = RangeOfDates::new(from, to)?;
        debug!(%from, %to, years = ?range.years(), "resolving holiday range");

        let mut holidays: Vec<Holiday> = Vec::new();
        for year in range.years() {
            holidays.extend(self.get_holidays(year)?);
        }
        holidays.retain(|h| range.contains(h.date()));
        Ok(holidays)
    }

    pub fn is_holiday(&self, d: NaiveDate) -> Result<bool, ClientError> {
        let holidays = self.get_holidays(d.year())?;
        Ok(holidays.iter().any(|h| h.date() == d))
    }

    pub fn is_business_day(&self, d: NaiveDate) -> Result<bool, ClientError> {
        let calculator = BusinessDayCalculator::new(&self.get_holidays(d.year())?);
        Ok(calculator.is_business_day(d))
    }

    /// Inclusive business-day count of `[from, to]`.
    pub fn get_business_days(&self, from: NaiveDate, to: NaiveDate) -> Result<usize, ClientError> {
        let calculator = BusinessDayCalculator::new(&self.get_holidays_by_range(from, to)?);
        Ok(calculator.count_business_days(from, to)?)
    }

    pub fn get_business_days_in_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<NaiveDate>, ClientError> {
        let calculator = BusinessDayCalculator::new(&self.get_holidays_by_range(from, to)?);
        Ok(calculator.business_days_in_range(from, to)?)
    }

    /// Holidays of `year` and of `neighbour` when the latter is within the
    /// configured bounds.
    fn calculator_for_years(&self, year: i32, neighbour: i32) -> Result<BusinessDayCalculator, ClientError> {
        let mut holidays = self.get_holidays(year)?;
        if self.options.contains_year(neighbour) {
            holidays.extend(self.get_holidays(neighbour)?);
        }
        Ok(BusinessDayCalculator::new(&holidays))
    }

    pub fn get_next_business_day(&self, d: NaiveDate) -> Result<NaiveDate, ClientError> {
        let calculator = self.calculator_for_years(d.year(), d.year() + 1)?;
        Ok(calculator.next_business_day(d)?)
    }

    pub fn get_previous_business_day(&self, d: NaiveDate) -> Result<NaiveDate, ClientError> {
        let calculator = self.calculator_for_years(d.year(), d.year() - 1)?;
        Ok(calculator.previous_business_day(d)?)
    }

    /// Offsets `d` by `n` business days using the holidays of an estimated
    /// span in the direction of travel. Years of that span beyond the
    /// configured bounds contribute no holidays.
    pub fn add_business_days(&self, d: NaiveDate, n: i32) -> Result<NaiveDate, ClientError> {
        if n == 0 {
            return Ok(d);
        }
        self.check_year(d.year())?;

        let span = (n.unsigned_abs() as f64 * OFFSET_SPAN_FACTOR) as i64 + OFFSET_SPAN_MARGIN;
        let direction: i64 = if n > 0 { 1 } else { -1 };
        let estimated_end = add_days(d, span * direction).ok_or(CalendarError::DateOutOfRange(d))?;
        let range = if n > 0 {
            RangeOfDates::new(d, estimated_end)?
        } else {
            RangeOfDates::new(estimated_end, d)?
        };

        let mut holidays: Vec<Holiday> = Vec::new();
        for year in range.years().filter(|y| self.options.contains_year(*y)) {
            holidays.extend(self.get_holidays(year)?);
        }
        holidays.retain(|h| range.contains(h.date()));

        let calculator = BusinessDayCalculator::new(&holidays);
        Ok(calculator.add_business_days(d, n)?)
    }

    /// Statistics of the cache, or empty statistics when caching is off.
    pub fn cache_stats(&self) -> CacheStats {
        self.lock_cache().map(|cache| cache.stats()).unwrap_or_default()
    }

    pub fn clear_cache(&self) {
        if let Some(mut cache) = self.lock_cache() {
            cache.clear();
        }
    }

    pub fn prune_cache(&self) -> usize {
        match self.lock_cache() {
            Some(mut cache) => {
                let removed = cache.prune();
                debug!(removed, "pruned holiday cache");
                removed
            },
            None => 0
        }
    }
}
