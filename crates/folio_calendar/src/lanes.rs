//! Lane packing
//!
//! Assigns each date range a lane (row) so that ranges sharing a lane never
//! overlap. Assignments are sticky: a range that already has a lane keeps it
//! for as long as it stays in the selection, and only new ranges are placed.
//! Placement is greedy, lowest free lane first, in input order.

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::CalendarError;
use crate::range::{DateRange, ProjectSpec};

/// Lane index per range id, in placement order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaneAssignment(IndexMap<String, usize>);

impl LaneAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<usize> {
        self.0.get(id).copied()
    }

    pub fn insert(&mut self, id: impl Into<String>, lane: usize) -> Option<usize> {
        self.0.insert(id.into(), lane)
    }

    pub fn remove(&mut self, id: &str) -> Option<usize> {
        self.0.shift_remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(id, lane)| (id.as_str(), *lane))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of lanes in use (highest lane + 1)
    pub fn lane_count(&self) -> usize {
        self.0.values().max().map_or(0, |max| max.saturating_add(1))
    }
}

impl<K: Into<String>> FromIterator<(K, usize)> for LaneAssignment {
    fn from_iter<I: IntoIterator<Item = (K, usize)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(id, lane)| (id.into(), lane)).collect())
    }
}

/// Ranges confirmed in each lane
struct Lanes<'a> {
    lanes: Vec<SmallVec<[&'a DateRange; 4]>>,
}

impl<'a> Lanes<'a> {
    fn new() -> Self {
        Self { lanes: Vec::new() }
    }

    fn is_free(&self, lane: usize, range: &DateRange) -> bool {
        self.lanes
            .get(lane)
            .map_or(true, |occupants| occupants.iter().all(|o| !o.overlaps(range)))
    }

    fn occupy(&mut self, lane: usize, range: &'a DateRange) {
        if self.lanes.len() <= lane {
            self.lanes.resize_with(lane + 1, SmallVec::new);
        }
        self.lanes[lane].push(range);
    }

    /// Lowest lane with no overlapping occupant
    fn first_free(&self, range: &DateRange) -> usize {
        (0..=self.lanes.len())
            .find(|&lane| self.is_free(lane, range))
            .unwrap_or(self.lanes.len())
    }
}

/// Compute lanes for `items`, keeping the lanes in `previous` where possible.
///
/// - Ids in `previous` that are absent from `items` are dropped.
/// - A previous lane is kept unless it now collides with a range already
///   confirmed in that lane (for example after a date edit); such ranges are
///   placed again like new ones.
/// - Repeated ids: the first occurrence wins.
///
/// The result lists ids in input order.
pub fn compute_lanes(previous: &LaneAssignment, items: &[DateRange]) -> LaneAssignment {
    let mut seen = FxHashSet::default();
    let unique: Vec<&DateRange> = items
        .iter()
        .filter(|item| {
            let first = seen.insert(item.id());
            if !first {
                tracing::warn!(id = item.id(), "duplicate project id, keeping the first");
            }
            first
        })
        .collect();

    let mut lanes = Lanes::new();
    let mut placed: FxHashMap<&str, usize> = FxHashMap::default();

    // Sticky pass
    for &item in &unique {
        let Some(lane) = previous.get(item.id()) else {
            continue;
        };
        // n ranges never need more than n lanes
        if lane >= unique.len() {
            tracing::debug!(id = item.id(), lane, "previous lane out of range, repacking");
            continue;
        }
        if lanes.is_free(lane, item) {
            lanes.occupy(lane, item);
            placed.insert(item.id(), lane);
        } else {
            tracing::debug!(id = item.id(), lane, "previous lane now overlaps, repacking");
        }
    }

    // Greedy pass for everything without a lane
    for &item in &unique {
        if placed.contains_key(item.id()) {
            continue;
        }
        let lane = lanes.first_free(item);
        lanes.occupy(lane, item);
        placed.insert(item.id(), lane);
    }

    unique
        .iter()
        .map(|item| (item.id(), placed[item.id()]))
        .collect()
}

/// A project that could not be placed
#[derive(Clone, Debug, PartialEq)]
pub struct Rejected {
    pub id: String,
    pub error: CalendarError,
}

/// Output of [`compute_lanes_checked`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackedLanes {
    /// Valid ranges, in input order
    pub ranges: Vec<DateRange>,
    pub assignment: LaneAssignment,
    /// Projects skipped because their dates were malformed
    pub rejected: Vec<Rejected>,
}

/// Validate raw projects and pack the valid ones.
///
/// Malformed projects are skipped with a warning instead of failing the whole
/// layout.
pub fn compute_lanes_checked(previous: &LaneAssignment, specs: &[ProjectSpec]) -> PackedLanes {
    let mut ranges = Vec::with_capacity(specs.len());
    let mut rejected = Vec::new();

    for spec in specs {
        match spec.to_range() {
            Ok(range) => ranges.push(range),
            Err(error) => {
                tracing::warn!(id = %spec.id, %error, "skipping project");
                rejected.push(Rejected {
                    id: spec.id.clone(),
                    error,
                });
            }
        }
    }

    let assignment = compute_lanes(previous, &ranges);
    PackedLanes {
        ranges,
        assignment,
        rejected,
    }
}

/// Returns `true` if no two ranges sharing a lane overlap
pub fn is_valid_packing(items: &[DateRange], assignment: &LaneAssignment) -> bool {
    items.iter().enumerate().all(|(i, a)| {
        items[i + 1..].iter().all(|b| {
            let same_lane = matches!(
                (assignment.get(a.id()), assignment.get(b.id())),
                (Some(x), Some(y)) if x == y
            );
            !(same_lane && a.overlaps(b))
        })
    })
}
