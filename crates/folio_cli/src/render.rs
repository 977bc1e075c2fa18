//! Text output for lanes and month grids

use folio_calendar::{DateRange, DayCell, MonthView, PackedLanes, WEEKDAY_HEADER};

/// Column width of one day cell
const CELL: usize = 6;

/// Letter used for a project in the grid
pub fn marker(index: usize) -> char {
    const MARKERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    MARKERS.get(index).map_or('#', |&b| b as char)
}

/// Maps project ids to grid markers, in file order
pub struct Legend<'a> {
    ranges: &'a [DateRange],
}

impl<'a> Legend<'a> {
    pub fn new(ranges: &'a [DateRange]) -> Self {
        Self { ranges }
    }

    pub fn marker(&self, id: &str) -> char {
        self.ranges
            .iter()
            .position(|range| range.id() == id)
            .map_or('?', marker)
    }

    pub fn render(&self, packed: &PackedLanes) -> String {
        self.ranges
            .iter()
            .enumerate()
            .map(|(i, range)| {
                let lane = packed
                    .assignment
                    .get(range.id())
                    .map_or_else(|| "-".to_string(), |lane| lane.to_string());
                format!(
                    "{}  lane {lane}  {} .. {}  {} ({})",
                    marker(i),
                    range.start(),
                    range.end(),
                    range.name(),
                    range.id()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn cell(text: impl std::fmt::Display) -> String {
    format!("{:<CELL$}", text.to_string())
}

fn push_row(lines: &mut Vec<String>, cells: impl Iterator<Item = String>) {
    let row: String = cells.collect();
    lines.push(row.trim_end().to_string());
}

/// A six-week grid: day numbers, one row per visible lane, then "+N" overflow
pub fn month_grid(view: &MonthView, legend: &Legend<'_>, max_visible: usize) -> String {
    let width = CELL * 7;
    let mut lines = vec![format!("{:^width$}", view.month.to_string()).trim_end().to_string()];
    push_row(&mut lines, WEEKDAY_HEADER.iter().map(|name| cell(name)));

    for week in view.weeks() {
        push_row(
            &mut lines,
            week.iter().map(|c| match c {
                DayCell::Current { .. } => cell(c.day()),
                DayCell::Leading { day } | DayCell::Trailing { day } => cell(format!("({day})")),
            }),
        );

        for lane in 0..max_visible {
            let used = week.iter().any(|c| match c {
                DayCell::Current { lanes, .. } => lanes.visible.iter().any(|s| s.lane == lane),
                _ => false,
            });
            if !used {
                continue;
            }
            push_row(
                &mut lines,
                week.iter().map(|c| match c {
                    DayCell::Current { lanes, .. } => lanes
                        .visible
                        .iter()
                        .find(|s| s.lane == lane)
                        .map_or_else(|| cell(""), |s| cell(format!("[{}]", legend.marker(&s.id)))),
                    _ => cell(""),
                }),
            );
        }

        let overflow = week.iter().any(|c| matches!(c, DayCell::Current { lanes, .. } if lanes.hidden_count > 0));
        if overflow {
            push_row(
                &mut lines,
                week.iter().map(|c| match c {
                    DayCell::Current { lanes, .. } if lanes.hidden_count > 0 => {
                        cell(format!("+{}", lanes.hidden_count))
                    }
                    _ => cell(""),
                }),
            );
        }
    }

    lines.join("\n")
}

/// Lane table for `folio lanes`
pub fn lane_table(packed: &PackedLanes) -> String {
    let id_width = packed
        .ranges
        .iter()
        .map(|r| r.id().len())
        .chain(packed.rejected.iter().map(|r| r.id.len()))
        .max()
        .unwrap_or(0)
        .max(2);

    let mut lines = vec![format!("{:<4}  {:<id_width$}  {:<10}  {:<10}  NAME", "LANE", "ID", "START", "END")];
    lines.extend(packed.ranges.iter().map(|range| {
        let lane = packed
            .assignment
            .get(range.id())
            .map_or_else(|| "-".to_string(), |lane| lane.to_string());
        format!(
            "{lane:<4}  {:<id_width$}  {}  {}  {}",
            range.id(),
            range.start(),
            range.end(),
            range.name()
        )
    }));
    lines.extend(
        packed
            .rejected
            .iter()
            .map(|r| format!("{:<4}  {:<id_width$}  skipped: {}", "-", r.id, r.error)),
    );

    lines
        .into_iter()
        .map(|line| line.trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
