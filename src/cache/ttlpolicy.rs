use chrono::TimeDelta;

pub const PAST_YEAR_TTL: TimeDelta = TimeDelta::days(365);
pub const CURRENT_YEAR_TTL: TimeDelta = TimeDelta::days(1);
pub const FUTURE_YEAR_TTL: TimeDelta = TimeDelta::days(7);

/// Chooses how long a year's holidays stay fresh.
///
/// Past calendars are settled, the current year can still gain substitute
/// holidays, and future years are provisional until officially announced.
/// A fixed override replaces the tiering entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TtlPolicy {
    fixed_ttl: Option<TimeDelta>
}

impl TtlPolicy {
    pub fn tiered() -> TtlPolicy {
        TtlPolicy { fixed_ttl: None }
    }

    pub fn fixed(ttl: TimeDelta) -> TtlPolicy {
        TtlPolicy { fixed_ttl: Some(ttl) }
    }

    /// `None` keeps the tiered policy, `Some(seconds)` pins every year to it.
    pub fn from_seconds(ttl_seconds: Option<u64>) -> TtlPolicy {
        TtlPolicy {
            fixed_ttl: ttl_seconds.map(|s| TimeDelta::seconds(s.min(i64::MAX as u64 / 1_000) as i64))
        }
    }

    pub fn fixed_ttl(&self) -> Option<TimeDelta> {
        self.fixed_ttl
    }

    pub fn ttl(&self, year: i32, current_year: i32) -> TimeDelta {
        if let Some(ttl) = self.fixed_ttl {
            return ttl;
        }
        if year < current_year {
            PAST_YEAR_TTL
        } else if year == current_year {
            CURRENT_YEAR_TTL
        } else {
            FUTURE_YEAR_TTL
        }
    }
}
