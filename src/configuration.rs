use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;
use tracing::info;

use crate::cache::ttlpolicy::TtlPolicy;
use crate::holiday::holiday::{MAX_HOLIDAY_YEAR, MIN_HOLIDAY_YEAR};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read configuration: {0}")]
    IOError(#[from] std::io::Error),
    #[error("cannot parse configuration: {0}")]
    JsonParseError(#[from] serde_json::Error),
    #[error("min_year {min_year} is greater than max_year {max_year}")]
    InvalidYearBounds { min_year: i32, max_year: i32 }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheOptions {
    pub enabled: bool,
    /// Fixed TTL in seconds; absent means the year-tiered policy.
    pub ttl: Option<u64>
}

impl Default for CacheOptions {
    fn default() -> Self {
        CacheOptions { enabled: true, ttl: None }
    }
}

impl CacheOptions {
    pub fn ttl_policy(&self) -> TtlPolicy {
        TtlPolicy::from_seconds(self.ttl)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    pub cache: CacheOptions,
    pub min_year: i32,
    pub max_year: i32,
    /// Directory of `<year>.json` envelopes for [`DirectorySource`](crate::client::holidaysource::DirectorySource).
    pub data_dir: Option<PathBuf>
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            cache: CacheOptions::default(),
            min_year: MIN_HOLIDAY_YEAR,
            max_year: MAX_HOLIDAY_YEAR,
            data_dir: None
        }
    }
}

impl ClientOptions {
    pub fn validate(self) -> Result<ClientOptions, ConfigError> {
        if self.min_year > self.max_year {
            return Err(ConfigError::InvalidYearBounds { min_year: self.min_year, max_year: self.max_year });
        }
        Ok(self)
    }

    pub fn from_json_str(json: &str) -> Result<ClientOptions, ConfigError> {
        let options: ClientOptions = serde_json::from_str(json)?;
        options.validate()
    }

    pub fn from_reader(file_path: impl AsRef<Path>) -> Result<ClientOptions, ConfigError> {
        let file_path = file_path.as_ref();
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let options: ClientOptions = serde_json::from_reader(reader)?;
        info!(path = %file_path.display(), cache_enabled = options.cache.enabled, "loaded client options");
        options.validate()
    }

    pub fn contains_year(&self, year: i32) -> bool {
        (self.min_year..=self.max_year).contains(&year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_defaults() {
        let options = ClientOptions::from_json_str("{}").unwrap();
        assert_eq!(options, ClientOptions::default());
        assert!(options.cache.enabled);
        assert_eq!(options.cache.ttl, None);
        assert_eq!((options.min_year, options.max_year), (1900, 2100));
        assert_eq!(options.cache.ttl_policy(), TtlPolicy::tiered());
    }

    #[test]
    fn test_partial_override() {
        let options = ClientOptions::from_json_str(r#"{"cache":{"ttl":3600},"data_dir":"/var/lib/hudy"}"#).unwrap();
        assert!(options.cache.enabled);
        assert_eq!(options.cache.ttl_policy().fixed_ttl(), Some(TimeDelta::hours(1)));
        assert_eq!(options.data_dir, Some(PathBuf::from("/var/lib/hudy")));
        assert!(options.contains_year(2100));
        assert!(!options.contains_year(2101));
    }

    #[test]
    fn test_invalid_bounds() {
        let result = ClientOptions::from_json_str(r#"{"min_year":2030,"max_year":2020}"#);
        assert!(matches!(result, Err(ConfigError::InvalidYearBounds { min_year: 2030, max_year: 2020 })));
        assert!(matches!(ClientOptions::from_json_str("[1]"), Err(ConfigError::JsonParseError(_))));
    }

    #[test]
    fn test_from_reader() {
        let path = std::env::temp_dir().join(format!("hudy-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"cache":{"enabled":false},"min_year":2000}"#).unwrap();
        let options = ClientOptions::from_reader(&path).unwrap();
        assert!(!options.cache.enabled);
        assert_eq!(options.min_year, 2000);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(ClientOptions::from_reader(&path), Err(ConfigError::IOError(_))));
    }
}
