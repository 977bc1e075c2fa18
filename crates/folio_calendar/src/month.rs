//! Month grid
//!
//! A six-week (42 cell) grid under a SUN..SAT header. Cells before the first
//! of the month show the tail of the previous month; a month that starts on a
//! Sunday gets a full leading week. Cells after the last day count up from 1.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::day::{active_lanes_for_date, DayLanes};
use crate::error::{CalendarError, Result};
use crate::lanes::LaneAssignment;
use crate::range::DateRange;

/// Cells in a month grid
pub const GRID_CELLS: usize = 42;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAY_HEADER: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// A calendar month
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// `month` is 1-based
    pub fn new(year: i32, month: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|_| Self { year, month })
            .ok_or(CalendarError::InvalidMonth { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[self.month as usize - 1]
    }

    pub fn first_day(&self) -> NaiveDate {
        // Validated in the constructor
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// The following month, rolling over the year
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The preceding month, rolling back the year
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn days_in_month(&self) -> u32 {
        self.next()
            .first_day()
            .pred_opt()
            .map_or(31, |last| last.day())
    }

    /// Leading cells before day 1: Monday = 1 .. Saturday = 6, Sunday = 7
    pub fn leading_days(&self) -> u32 {
        match self.first_day().weekday() {
            Weekday::Sun => 7,
            other => other.num_days_from_sunday(),
        }
    }

    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.year)
    }
}

/// One cell of the grid
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DayCell {
    /// Day number from the previous month
    Leading { day: u32 },
    /// A day of the displayed month with its lanes
    Current { date: NaiveDate, lanes: DayLanes },
    /// Day number from the next month
    Trailing { day: u32 },
}

impl DayCell {
    pub fn day(&self) -> u32 {
        match self {
            Self::Leading { day } | Self::Trailing { day } => *day,
            Self::Current { date, .. } => date.day(),
        }
    }

    pub fn is_current(&self) -> bool {
        matches!(self, Self::Current { .. })
    }
}

/// A month grid with lanes resolved per day
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthView {
    pub month: YearMonth,
    pub cells: Vec<DayCell>,
}

impl MonthView {
    pub fn build(
        month: YearMonth,
        items: &[DateRange],
        assignment: &LaneAssignment,
        max_visible: usize,
    ) -> Self {
        let leading = month.leading_days();
        let days = month.days_in_month();
        let prev_days = month.prev().days_in_month();

        let mut cells = Vec::with_capacity(GRID_CELLS);
        cells.extend((0..leading).map(|i| DayCell::Leading {
            day: prev_days - leading + i + 1,
        }));
        cells.extend((1..=days).filter_map(|day| {
            let date = month.date(day)?;
            Some(DayCell::Current {
                date,
                lanes: active_lanes_for_date(items, assignment, date, max_visible),
            })
        }));
        let trailing = GRID_CELLS.saturating_sub(cells.len()) as u32;
        cells.extend((1..=trailing).map(|day| DayCell::Trailing { day }));

        Self { month, cells }
    }

    /// Rows of seven cells
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(7)
    }

    /// The cell for `date`, if it belongs to this month
    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.cells
            .iter()
            .find(|cell| matches!(cell, DayCell::Current { date: d, .. } if *d == date))
    }
}
