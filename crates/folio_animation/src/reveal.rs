//! Scroll reveal
//!
//! Viewport intersection tracking for elements that fade and slide into view
//! once they are scrolled onto the screen. Geometry is in CSS pixels with the
//! y axis pointing down.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::motion::MotionPreference;
use crate::timing::TimingFunction;

/// An axis-aligned rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Grow by `margin` on every side (shrink when negative)
    pub fn expand(&self, margin: f64) -> Rect {
        Rect {
            x: self.x - margin,
            y: self.y - margin,
            width: (self.width + 2.0 * margin).max(0.0),
            height: (self.height + 2.0 * margin).max(0.0),
        }
    }

    /// Overlapping region, if the rectangles touch or overlap
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        (left <= right && top <= bottom).then(|| Rect::new(left, top, right - left, bottom - top))
    }

    fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Fraction of `target` visible inside `root` grown by `root_margin`.
///
/// A zero-area target counts as fully visible when its origin lies inside the root.
pub fn intersection_ratio(target: &Rect, root: &Rect, root_margin: f64) -> f64 {
    let root = root.expand(root_margin);
    let area = target.area();
    if area <= 0.0 {
        return if root.contains_point(target.x, target.y) { 1.0 } else { 0.0 };
    }

    target
        .intersection(&root)
        .map_or(0.0, |overlap| (overlap.area() / area).clamp(0.0, 1.0))
}

/// When an observed element counts as in view
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntersectionOptions {
    /// Visibility ratios; the lowest one decides "in view"
    pub thresholds: SmallVec<[f64; 4]>,
    /// Pixels added around the viewport (negative shrinks it)
    pub root_margin: f64,
    /// Stop observing after the first time the element is in view
    pub trigger_once: bool,
}

impl Default for IntersectionOptions {
    fn default() -> Self {
        Self {
            thresholds: smallvec![0.0],
            root_margin: 0.0,
            trigger_once: false,
        }
    }
}

impl IntersectionOptions {
    /// Options used by reveal cards: 10% visible, 50px inside the viewport, once
    pub fn reveal_card() -> Self {
        Self {
            thresholds: smallvec![0.1],
            root_margin: -50.0,
            trigger_once: true,
        }
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.thresholds = smallvec![threshold.clamp(0.0, 1.0)];
        self
    }

    pub fn root_margin(mut self, margin: f64) -> Self {
        self.root_margin = margin;
        self
    }

    pub fn trigger_once(mut self, once: bool) -> Self {
        self.trigger_once = once;
        self
    }

    fn min_threshold(&self) -> f64 {
        self.thresholds
            .iter()
            .copied()
            .filter(|t| t.is_finite())
            .fold(f64::INFINITY, f64::min)
            .clamp(0.0, 1.0)
    }

    /// A zero threshold means "any overlap at all"
    pub fn is_in_view(&self, ratio: f64) -> bool {
        let threshold = self.min_threshold();
        if threshold <= 0.0 {
            ratio > 0.0
        } else {
            ratio >= threshold
        }
    }
}

/// Tracks whether each of `n` elements is in view
#[derive(Clone, Debug)]
pub struct RevealObserver {
    options: IntersectionOptions,
    visible: Vec<bool>,
    observing: Vec<bool>,
}

impl RevealObserver {
    pub fn new(count: usize, options: IntersectionOptions) -> Self {
        Self {
            options,
            visible: vec![false; count],
            observing: vec![true; count],
        }
    }

    /// Recompute visibility against `root`. Returns indices whose state changed.
    ///
    /// `targets[i]` is element `i`; missing elements keep their previous state.
    pub fn update(&mut self, targets: &[Rect], root: &Rect) -> Vec<usize> {
        let mut changed = Vec::new();

        for (index, target) in targets.iter().enumerate().take(self.visible.len()) {
            if !self.observing[index] {
                continue;
            }

            let ratio = intersection_ratio(target, root, self.options.root_margin);
            let in_view = self.options.is_in_view(ratio);

            if in_view != self.visible[index] {
                self.visible[index] = in_view;
                changed.push(index);
            }
            if in_view && self.options.trigger_once {
                tracing::debug!(index, ratio, "element revealed, no longer observed");
                self.observing[index] = false;
            }
        }

        changed
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    pub fn is_observing(&self, index: usize) -> bool {
        self.observing.get(index).copied().unwrap_or(false)
    }

    pub fn visible_items(&self) -> &[bool] {
        &self.visible
    }

    /// Stop observing everything
    pub fn disconnect(&mut self) {
        self.observing.iter_mut().for_each(|o| *o = false);
    }

    pub fn options(&self) -> &IntersectionOptions {
        &self.options
    }
}

/// Edge the element slides in from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealDirection {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl RevealDirection {
    /// Starting offset for a slide of `distance` pixels
    fn offset(self, distance: f64) -> (f64, f64) {
        match self {
            Self::Up => (0.0, distance),
            Self::Down => (0.0, -distance),
            Self::Left => (distance, 0.0),
            Self::Right => (-distance, 0.0),
        }
    }
}

/// Opacity and translation for one frame of a reveal
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealStyle {
    pub opacity: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl RevealStyle {
    pub const SHOWN: RevealStyle = RevealStyle {
        opacity: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    /// Style at eased `progress` (0 = hidden, 1 = shown)
    pub fn at(direction: RevealDirection, distance: f64, progress: f64) -> Self {
        let (dx, dy) = direction.offset(distance);
        let remaining = 1.0 - progress;
        Self {
            opacity: progress,
            translate_x: dx * remaining,
            translate_y: dy * remaining,
        }
    }
}

/// A timed fade-and-slide transition
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealTransition {
    pub direction: RevealDirection,
    pub distance: f64,
    pub duration_ms: f64,
    pub delay_ms: f64,
    pub timing: TimingFunction,
}

impl Default for RevealTransition {
    fn default() -> Self {
        Self {
            direction: RevealDirection::Up,
            distance: 40.0,
            duration_ms: 600.0,
            delay_ms: 0.0,
            timing: TimingFunction::EaseOut,
        }
    }
}

impl RevealTransition {
    pub fn direction(mut self, direction: RevealDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    pub fn duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn delay_ms(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Delay the `index`-th card of a list by `step_ms` per position
    pub fn staggered(self, index: usize, step_ms: f64) -> Self {
        self.delay_ms(index as f64 * step_ms)
    }

    /// Linear progress `elapsed_ms` after the element came into view
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return if elapsed_ms >= self.delay_ms { 1.0 } else { 0.0 };
        }
        ((elapsed_ms - self.delay_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Style for an element that has been in view for `elapsed_ms`, or not yet (`None`)
    pub fn style(&self, in_view_for_ms: Option<f64>, preference: MotionPreference) -> RevealStyle {
        if preference.is_reduced() {
            return RevealStyle::SHOWN;
        }

        let eased = match in_view_for_ms {
            Some(elapsed) => self.timing.apply(self.progress(elapsed)),
            None => 0.0,
        };
        RevealStyle::at(self.direction, self.distance, eased)
    }

    /// Whether the transition is still running `elapsed_ms` after it started
    pub fn is_running(&self, elapsed_ms: f64) -> bool {
        elapsed_ms < self.delay_ms + self.duration_ms
    }
}
