use std::fmt;

use chrono::{
    Datelike,
    NaiveDate,
    Weekday
};
use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;

use crate::time::utility::{format_date, parse_date};

pub const MIN_HOLIDAY_YEAR: i32 = 1900;
pub const MAX_HOLIDAY_YEAR: i32 = 2100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayType {
    Public,
    Custom
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HolidayDecodeError {
    #[error(transparent)]
    Date(#[from] crate::time::utility::DateParseError),
    #[error("holiday year {0} is outside 1900..=2100")]
    YearOutOfBounds(i32),
    #[error("field `{field}` is {found} but date {date} implies {expected}")]
    Inconsistent {
        field: &'static str,
        date: String,
        found: String,
        expected: String
    },
    #[error("unknown day of week '{0}'")]
    UnknownWeekday(String)
}

/// A public or custom holiday as published by the lookup service.
///
/// Only the calendar date is stored; year, month, day and weekday are derived
/// from it, so they can never disagree once a value exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HolidayJsonProp", into = "HolidayJsonProp")]
pub struct Holiday {
    id: String,
    name: String,
    date: NaiveDate,
    holiday_type: HolidayType
}

impl Holiday {
    pub fn new(id: String, name: String, date: NaiveDate, holiday_type: HolidayType) -> Holiday {
        Holiday { id, name, date, holiday_type }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Canonical `YYYY-MM-DD` form of [`Holiday::date`].
    pub fn date_string(&self) -> String {
        format_date(self.date)
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    pub fn holiday_type(&self) -> HolidayType {
        self.holiday_type
    }

    pub fn is_public(&self) -> bool {
        self.holiday_type == HolidayType::Public
    }

    pub fn is_custom(&self) -> bool {
        self.holiday_type == HolidayType::Custom
    }
}

impl fmt::Display for Holiday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.date_string(), self.name)
    }
}

// ── wire form ───────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
struct HolidayJsonProp {
    id: String,
    name: String,
    date: String,
    year: i32,
    month: u32,
    day: u32,
    day_of_week: String,
    #[serde(rename = "type")]
    holiday_type: HolidayType
}

fn check_field<T: PartialEq + ToString>(
    field: &'static str,
    date: &str,
    found: T,
    expected: T
) -> Result<(), HolidayDecodeError> {
    if found == expected {
        Ok(())
    } else {
        Err(HolidayDecodeError::Inconsistent {
            field,
            date: date.to_owned(),
            found: found.to_string(),
            expected: expected.to_string()
        })
    }
}

impl TryFrom<HolidayJsonProp> for Holiday {
    type Error = HolidayDecodeError;

    fn try_from(prop: HolidayJsonProp) -> Result<Self, Self::Error> {
        let date = parse_date(&prop.date)?;
        if !(MIN_HOLIDAY_YEAR..=MAX_HOLIDAY_YEAR).contains(&date.year()) {
            return Err(HolidayDecodeError::YearOutOfBounds(date.year()));
        }
        check_field("year", &prop.date, prop.year, date.year())?;
        check_field("month", &prop.date, prop.month, date.month())?;
        check_field("day", &prop.date, prop.day, date.day())?;
        let weekday: Weekday = prop.day_of_week
            .parse()
            .map_err(|_| HolidayDecodeError::UnknownWeekday(prop.day_of_week.clone()))?;
        if weekday != date.weekday() {
            return Err(HolidayDecodeError::Inconsistent {
                field: "day_of_week",
                date: prop.date,
                found: prop.day_of_week,
                expected: date.format("%A").to_string()
            });
        }
        Ok(Holiday::new(prop.id, prop.name, date, prop.holiday_type))
    }
}

impl From<Holiday> for HolidayJsonProp {
    fn from(holiday: Holiday) -> Self {
        HolidayJsonProp {
            date: holiday.date_string(),
            year: holiday.year(),
            month: holiday.month(),
            day: holiday.day(),
            day_of_week: holiday.date.format("%A").to_string(),
            id: holiday.id,
            name: holiday.name,
            holiday_type: holiday.holiday_type
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_year_json() -> serde_json::Value {
        json!({
            "id": "hol_2024_0101",
            "name": "신정",
            "date": "2024-01-01",
            "year": 2024,
            "month": 1,
            "day": 1,
            "day_of_week": "Monday",
            "type": "public"
        })
    }

    #[test]
    fn test_decode_holiday() {
        let holiday: Holiday = serde_json::from_value(new_year_json()).unwrap();
        assert_eq!(holiday.id(), "hol_2024_0101");
        assert_eq!(holiday.name(), "신정");
        assert_eq!(holiday.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(holiday.weekday(), Weekday::Mon);
        assert!(holiday.is_public());
        assert!(!holiday.is_custom());
        assert_eq!(holiday.to_string(), "2024-01-01: 신정");
    }

    #[test]
    fn test_encode_emits_derived_fields() {
        let holiday: Holiday = serde_json::from_value(new_year_json()).unwrap();
        assert_eq!(serde_json::to_value(&holiday).unwrap(), new_year_json());
    }

    #[test]
    fn test_inconsistent_fields_are_rejected() {
        let mut value = new_year_json();
        value["day"] = json!(2);
        assert!(serde_json::from_value::<Holiday>(value).is_err());

        let mut value = new_year_json();
        value["day_of_week"] = json!("Tuesday");
        assert!(serde_json::from_value::<Holiday>(value).is_err());
    }

    #[test]
    fn test_malformed_or_out_of_bounds_date_is_rejected() {
        let mut value = new_year_json();
        value["date"] = json!("2024-1-1");
        assert!(serde_json::from_value::<Holiday>(value).is_err());

        let value = json!({
            "id": "x", "name": "x", "date": "1899-12-31", "year": 1899, "month": 12,
            "day": 31, "day_of_week": "Sunday", "type": "custom"
        });
        assert!(serde_json::from_value::<Holiday>(value).is_err());
    }

    #[test]
    fn test_custom_type() {
        let mut value = new_year_json();
        value["type"] = json!("custom");
        let holiday: Holiday = serde_json::from_value(value).unwrap();
        assert!(holiday.is_custom());
        assert_eq!(holiday.holiday_type(), HolidayType::Custom);
    }
}
