//! Schedule window parsing, formatting, and serde helpers.
//!
//! The wire format uses ISO calendar dates (`2024-06-01`) and `HH:MM`
//! clock times. Seconds are accepted on input (`10:00:00`) but never
//! emitted, so a value written by a client round-trips unchanged.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Date format for `schedule.date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time format for `schedule.time.start` / `schedule.time.end`.
pub const TIME_FORMAT: &str = "%H:%M";

/// Time format with seconds, accepted on input only.
const TIME_FORMAT_SECONDS: &str = "%H:%M:%S";

/// Parse an ISO calendar date, rejecting anything else.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        CoreError::Validation(format!(
            "Field '{field}' must be an ISO date (YYYY-MM-DD), got '{value}'"
        ))
    })
}

/// Parse a clock time as `HH:MM` or `HH:MM:SS`.
pub fn parse_time(field: &str, value: &str) -> Result<NaiveTime, CoreError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, TIME_FORMAT_SECONDS))
        .map_err(|_| {
            CoreError::Validation(format!(
                "Field '{field}' must be a clock time (HH:MM), got '{value}'"
            ))
        })
}

/// The `schedule` sub-object of a nudge.
///
/// Always present in the serialized form; individual parts are `null`
/// when the client never supplied them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: TimeWindow,
}

/// The `schedule.time` window. Start and end are independent; neither
/// is required and no ordering between them is enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(default, with = "hhmm_option")]
    pub start: Option<NaiveTime>,
    #[serde(default, with = "hhmm_option")]
    pub end: Option<NaiveTime>,
}

/// Serde adapter for `Option<NaiveTime>` using the `HH:MM` wire format.
pub mod hhmm_option {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{parse_time, TIME_FORMAT};

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(t) => serializer.serialize_str(&t.format(TIME_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) => parse_time("schedule.time", &s)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
