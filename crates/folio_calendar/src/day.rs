//! Per-day lane lookup for calendar cells

use chrono::NaiveDate;
use serde::Serialize;

use crate::lanes::LaneAssignment;
use crate::range::DateRange;

/// Lanes drawn per calendar cell before the rest collapse into "+N"
pub const MAX_VISIBLE_LANES: usize = 4;

/// One range drawn in a day cell
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LaneSlot {
    pub id: String,
    pub lane: usize,
}

/// What a single day cell shows
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DayLanes {
    /// Sorted by lane, then name
    pub visible: Vec<LaneSlot>,
    /// Active ranges whose lane is at or above the cap
    pub hidden_count: usize,
}

impl DayLanes {
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty() && self.hidden_count == 0
    }

    pub fn total(&self) -> usize {
        self.visible.len() + self.hidden_count
    }
}

/// Ranges active on `date` with their lanes.
///
/// Ranges missing from `assignment` are drawn in lane 0. Ranges in lanes
/// `>= max_visible` are counted in `hidden_count` instead of being listed.
pub fn active_lanes_for_date(
    items: &[DateRange],
    assignment: &LaneAssignment,
    date: NaiveDate,
    max_visible: usize,
) -> DayLanes {
    let mut active: Vec<(usize, &DateRange)> = items
        .iter()
        .filter(|item| item.contains(date))
        .map(|item| (assignment.get(item.id()).unwrap_or(0), item))
        .collect();

    active.sort_by(|(lane_a, a), (lane_b, b)| {
        lane_a
            .cmp(lane_b)
            .then_with(|| a.name().cmp(b.name()))
            .then_with(|| a.id().cmp(b.id()))
    });

    let total = active.len();
    let visible: Vec<LaneSlot> = active
        .into_iter()
        .filter(|(lane, _)| *lane < max_visible)
        .map(|(lane, item)| LaneSlot {
            id: item.id().to_string(),
            lane,
        })
        .collect();

    DayLanes {
        hidden_count: total - visible.len(),
        visible,
    }
}
