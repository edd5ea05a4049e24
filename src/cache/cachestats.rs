use chrono::{DateTime, Utc};
use serde::{
    Deserialize,
    Serialize
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntryStats {
    pub key: String,
    pub expires_at: DateTime<Utc>
}

/// Point-in-time snapshot of a [`YearCache`](crate::cache::yearcache::YearCache).
/// `size` includes expired entries that have not been pruned yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub entries: Vec<CacheEntryStats>
}

impl CacheStats {
    pub fn entry(&self, key: &str) -> Option<&CacheEntryStats> {
        self.entries.iter().find(|e| e.key == key)
    }
}
