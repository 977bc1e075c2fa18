//! Inclusive date ranges
//!
//! A project occupies every calendar day from its start to its end, both
//! included. Dates carry no time of day, so two ranges compare purely by day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};

/// Date format used in project files
pub const ISO_DATE: &str = "%Y-%m-%d";

/// A named, inclusive date range
///
/// # Invariants
/// `start <= end`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    id: String,
    name: String,
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    pub fn try_new(
        id: impl Into<String>,
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self> {
        let id = id.into();
        if start > end {
            return Err(CalendarError::InvertedRange { id, start, end });
        }
        Ok(Self {
            id,
            name: name.into(),
            start,
            end,
        })
    }

    /// Create a range from `YYYY-MM-DD` strings
    pub fn parse(id: impl Into<String>, name: impl Into<String>, start: &str, end: &str) -> Result<Self> {
        let id = id.into();
        let start = parse_iso_date(&id, start)?;
        let end = parse_iso_date(&id, end)?;
        Self::try_new(id, name, start, end)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns `true` if the ranges share at least one day
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Returns `true` if `date` falls inside the range
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered, counting both ends
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Parse a `YYYY-MM-DD` date, attributing failures to project `id`
pub fn parse_iso_date(id: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE).map_err(|source| CalendarError::InvalidDate {
        id: id.to_string(),
        value: value.to_string(),
        source,
    })
}

/// A project as written in a project file, before validation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSpec {
    pub id: String,
    pub name: String,
    pub start: String,
    pub end: String,
    /// Display color, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ProjectSpec {
    pub fn new(id: impl Into<String>, name: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start: start.into(),
            end: end.into(),
            color: None,
        }
    }

    /// Validate into a [`DateRange`]
    pub fn to_range(&self) -> Result<DateRange> {
        DateRange::parse(self.id.clone(), self.name.clone(), &self.start, &self.end)
    }
}
