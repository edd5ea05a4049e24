use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::client::apiresponse::parse_envelope;
use crate::client::clienterror::{ApiError, ErrorCode};
use crate::holiday::holiday::Holiday;

/// Where a client gets a year's holidays from when the cache cannot answer.
/// A network transport implements this; retries and timeouts belong to it.
pub trait HolidaySource {
    fn fetch_year(&self, year: i32) -> Result<Vec<Holiday>, ApiError>;
}

impl<S: HolidaySource + ?Sized> HolidaySource for &S {
    fn fetch_year(&self, year: i32) -> Result<Vec<Holiday>, ApiError> {
        (**self).fetch_year(year)
    }
}

// ── in-memory ───────────────────────────────────────────────────────────────

/// Holidays held in memory, grouped by year. Unknown years have no holidays.
#[derive(Debug, Clone, Default)]
pub struct StaticHolidaySource {
    holidays: HashMap<i32, Vec<Holiday>>
}

impl StaticHolidaySource {
    pub fn new() -> StaticHolidaySource {
        StaticHolidaySource::default()
    }

    pub fn insert(&mut self, holiday: Holiday) {
        self.holidays.entry(holiday.year()).or_default().push(holiday);
    }
}

impl FromIterator<Holiday> for StaticHolidaySource {
    fn from_iter<I: IntoIterator<Item = Holiday>>(iter: I) -> Self {
        let mut source = StaticHolidaySource::new();
        for holiday in iter {
            source.insert(holiday);
        }
        source
    }
}

impl HolidaySource for StaticHolidaySource {
    fn fetch_year(&self, year: i32) -> Result<Vec<Holiday>, ApiError> {
        Ok(self.holidays.get(&year).cloned().unwrap_or_default())
    }
}

// ── envelope files ──────────────────────────────────────────────────────────

/// Reads `<dir>/<year>.json`, each file holding one response envelope as the
/// service would return it.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> DirectorySource {
        DirectorySource { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn year_path(&self, year: i32) -> PathBuf {
        self.dir.join(format!("{year}.json"))
    }
}

impl HolidaySource for DirectorySource {
    fn fetch_year(&self, year: i32) -> Result<Vec<Holiday>, ApiError> {
        let path = self.year_path(year);
        debug!(path = %path.display(), "reading holiday envelope");
        let body = fs::read_to_string(&path).map_err(|error| match error.kind() {
            ErrorKind::NotFound => ApiError::new(
                ErrorCode::NotFound,
                format!("no holiday data for {year} at {}", path.display()),
                None,
                false
            ),
            _ => ApiError::network_error(format!("{}: {error}", path.display()))
        })?;
        parse_envelope(200, &body)
    }
}
