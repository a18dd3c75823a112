//! Due date parsing
//!
//! Accepted forms:
//! - RFC 3339 (`2024-05-01T09:30:00Z`, `2024-05-01T09:30:00+09:00`)
//! - Naive date-time, read as UTC (`2024-05-01T09:30:00`, `2024-05-01 09:30:00`)
//! - Calendar date, midnight UTC (`2024-05-01`)
//!
//! An absent or empty string means "no due date".

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{TaskError, TaskResult};

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn parse_due_date(raw: Option<&str>) -> TaskResult<Option<DateTime<Utc>>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Some(dt.and_utc()));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date.and_time(chrono::NaiveTime::MIN).and_utc()));
    }

    Err(TaskError::validation("Invalid date format"))
}
