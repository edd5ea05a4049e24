use std::collections::BTreeMap;

use chrono::{
    DateTime,
    Datelike,
    NaiveDate,
    Utc
};

use crate::cache::cachestats::{CacheEntryStats, CacheStats};
use crate::cache::clock::{Clock, SystemClock};
use crate::cache::ttlpolicy::TtlPolicy;
use crate::holiday::holiday::Holiday;
use crate::time::rangeofdates::{InvalidDateRange, RangeOfDates};

pub fn year_key(year: i32) -> String {
    format!("year:{year}")
}

/// Holidays of one calendar year, frozen together with their expiry.
#[derive(Debug, Clone)]
struct CacheEntry {
    holidays: Vec<Holiday>,
    expires_at: DateTime<Utc>
}

impl CacheEntry {
    #[inline]
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Year-bucketed holiday cache with a TTL tiered by distance from the current
/// year.
///
/// Every [`get`](YearCache::get) counts exactly one hit or miss; an expired
/// entry found on read is dropped and counted as a miss. The cache does no
/// locking of its own: callers sharing one across threads wrap it in a mutex.
#[derive(Debug)]
pub struct YearCache<K: Clock = SystemClock> {
    entries: BTreeMap<i32, CacheEntry>,
    hits: u64,
    misses: u64,
    policy: TtlPolicy,
    clock: K
}

impl YearCache<SystemClock> {
    pub fn new(policy: TtlPolicy) -> Self {
        Self::with_clock(policy, SystemClock)
    }
}

impl Default for YearCache<SystemClock> {
    fn default() -> Self {
        Self::new(TtlPolicy::tiered())
    }
}

impl<K: Clock> YearCache<K> {
    pub fn with_clock(policy: TtlPolicy, clock: K) -> Self {
        Self {
            entries: BTreeMap::new(),
            hits: 0,
            misses: 0,
            policy,
            clock
        }
    }

    pub fn policy(&self) -> TtlPolicy {
        self.policy
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }

    /// TTL applied to `year` if it were stored now.
    pub fn ttl(&self, year: i32) -> chrono::TimeDelta {
        self.policy.ttl(year, self.clock.now().year())
    }

    pub fn get(&mut self, year: i32) -> Option<Vec<Holiday>> {
        let now = self.clock.now();
        match self.entries.get(&year) {
            None => {
                self.misses += 1;
                None
            },
            Some(entry) if entry.is_expired(now) => {
                self.entries.remove(&year);
                self.misses += 1;
                None
            },
            Some(entry) => {
                self.hits += 1;
                Some(entry.holidays.clone())
            }
        }
    }

    pub fn set(&mut self, year: i32, holidays: Vec<Holiday>) {
        let now = self.clock.now();
        let ttl = self.policy.ttl(year, now.year());
        let expires_at = now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.entries.insert(year, CacheEntry { holidays, expires_at });
    }

    /// Holidays within `[from, to]` assembled from whole-year buckets.
    ///
    /// `Ok(None)` as soon as one covered year is missing or expired; the
    /// lookups made up to that point have already been counted.
    pub fn get_range(&mut self, from: NaiveDate, to: NaiveDate) -> Result<Option<Vec<Holiday>>, InvalidDateRange> {
        let range = RangeOfDates::new(from, to)?;

        let mut collected: Vec<Holiday> = Vec::new();
        for year in range.years() {
            match self.get(year) {
                Some(holidays) => collected.extend(holidays),
                None => return Ok(None)
            }
        }
        collected.retain(|h| range.contains(h.date()));
        Ok(Some(collected))
    }

    /// Drops all entries and zeroes the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.entries.len(),
            entries: self.entries
                .iter()
                .map(|(year, entry)| CacheEntryStats {
                    key: year_key(*year),
                    expires_at: entry.expires_at
                })
                .collect()
        }
    }

    /// Evicts every expired entry without touching the counters.
    pub fn prune(&mut self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before - self.entries.len()
    }
}
