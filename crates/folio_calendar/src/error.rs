//! Calendar error types

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while building calendar data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalendarError {
    /// A range whose start falls after its end
    #[error("project {id}: start {start} is after end {end}")]
    InvertedRange {
        id: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// A date that is not `YYYY-MM-DD`
    #[error("project {id}: invalid date {value:?}: {source}")]
    InvalidDate {
        id: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A year/month pair outside the supported calendar
    #[error("invalid month {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },
}

/// Result type for calendar operations
pub type Result<T> = std::result::Result<T, CalendarError>;
