//! Server date values and their calendar-date normalization.
//!
//! The wishlist service is not consistent about how it renders dates: the
//! marshalling layer emits HTTP-date strings, hand-written endpoints emit
//! ISO-8601 timestamps and some stores hand back epoch milliseconds. The
//! console only ever shows the calendar date, as `YYYY-MM-DD`.

use core::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Output format for every date shown in a form.
pub const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors that can occur when normalizing a [`ServerDate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The text matches none of the accepted date representations.
    #[error("unrecognized date: {0:?}")]
    Unrecognized(String),
    /// The epoch timestamp is outside the representable range.
    #[error("date timestamp out of range: {0}")]
    OutOfRange(i64),
}

/// A date exactly as the server sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerDate {
    /// Milliseconds since the Unix epoch.
    Millis(i64),
    /// Any textual representation.
    Text(String),
}

impl ServerDate {
    /// Collapse the server representation to a calendar date.
    ///
    /// Accepted forms, tried in order:
    /// - RFC 3339 timestamps (converted to UTC before the date is taken)
    /// - `YYYY-MM-DD`
    /// - naive `YYYY-MM-DDTHH:MM:SS[.fff]` or `YYYY-MM-DD HH:MM:SS[.fff]`
    /// - RFC 2822 / HTTP-date, e.g. `Tue, 15 Oct 2024 00:00:00 GMT`
    /// - epoch milliseconds
    ///
    /// # Errors
    ///
    /// Returns [`DateError`] if the value matches none of the forms above.
    pub fn to_calendar_date(&self) -> Result<NaiveDate, DateError> {
        match self {
            Self::Millis(ms) => DateTime::from_timestamp_millis(*ms)
                .map(|dt| dt.date_naive())
                .ok_or(DateError::OutOfRange(*ms)),
            Self::Text(raw) => parse_text(raw.trim())
                .ok_or_else(|| DateError::Unrecognized(raw.clone())),
        }
    }

    /// Render the calendar date as `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`DateError`] if the value cannot be normalized.
    pub fn to_form_value(&self) -> Result<String, DateError> {
        self.to_calendar_date()
            .map(|date| date.format(CALENDAR_DATE_FORMAT).to_string())
    }

    /// The value as sent, without normalization.
    #[must_use]
    pub fn raw_text(&self) -> String {
        self.to_string()
    }
}

fn parse_text(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, CALENDAR_DATE_FORMAT) {
        return Some(date);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc2822(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}

impl fmt::Display for ServerDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millis(ms) => write!(f, "{ms}"),
            Self::Text(raw) => f.write_str(raw),
        }
    }
}

impl From<&str> for ServerDate {
    fn from(raw: &str) -> Self {
        Self::Text(raw.to_owned())
    }
}
