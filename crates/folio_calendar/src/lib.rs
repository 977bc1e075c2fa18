//! Folio Calendar
//!
//! Date ranges and the layout math behind the project timeline: which lane
//! each project occupies, which projects a day cell draws, and the six-week
//! month grid around them.
//!
//! # Example
//!
//! ```rust
//! use folio_calendar::{compute_lanes, DateRange, LaneAssignment};
//!
//! let items = vec![
//!     DateRange::parse("a", "Alpha", "2026-02-01", "2026-02-10").unwrap(),
//!     DateRange::parse("b", "Beta", "2026-02-05", "2026-02-15").unwrap(),
//!     DateRange::parse("c", "Gamma", "2026-02-20", "2026-02-25").unwrap(),
//! ];
//!
//! let lanes = compute_lanes(&LaneAssignment::new(), &items);
//! assert_eq!(lanes.get("a"), Some(0));
//! assert_eq!(lanes.get("b"), Some(1));
//! assert_eq!(lanes.get("c"), Some(0));
//! ```

pub mod day;
pub mod error;
pub mod lanes;
pub mod month;
pub mod range;

pub use day::{active_lanes_for_date, DayLanes, LaneSlot, MAX_VISIBLE_LANES};
pub use error::{CalendarError, Result};
pub use lanes::{compute_lanes, compute_lanes_checked, is_valid_packing, LaneAssignment, PackedLanes, Rejected};
pub use month::{DayCell, MonthView, YearMonth, GRID_CELLS, MONTH_NAMES, WEEKDAY_HEADER};
pub use range::{parse_iso_date, DateRange, ProjectSpec, ISO_DATE};
