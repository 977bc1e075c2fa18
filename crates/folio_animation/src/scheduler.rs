//! Animation scheduler
//!
//! Owns the springs of a page and drives them once per display frame. The
//! frame loop is explicit state: [`FrameClock`] measures frame deltas and
//! [`AnimationScheduler`] decides whether another frame is needed.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::error::{AnimationError, Result};
use crate::spring::Spring;
use crate::springs::SpringGroup;

new_key_type! {
    pub struct SpringId;
    pub struct SpringGroupId;
}

/// Delta used for the first frame, when there is no previous timestamp
pub const DEFAULT_FIRST_DT: f64 = 1.0 / 60.0;

/// Ceiling on a single frame delta (roughly a 15fps floor)
pub const DEFAULT_MAX_DT: f64 = 0.064;

/// Frame delta limits
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameLimits {
    pub first_dt: f64,
    pub max_dt: f64,
}

impl Default for FrameLimits {
    fn default() -> Self {
        Self {
            first_dt: DEFAULT_FIRST_DT,
            max_dt: DEFAULT_MAX_DT,
        }
    }
}

impl FrameLimits {
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("first_dt", self.first_dt), ("max_dt", self.max_dt)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AnimationError::InvalidClock { field, value });
            }
        }
        Ok(())
    }
}

/// Measures clamped per-frame deltas in seconds
#[derive(Clone, Debug)]
pub struct FrameClock {
    last_frame: Option<Instant>,
    limits: FrameLimits,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_frame: None,
            limits: FrameLimits::default(),
        }
    }

    pub fn with_limits(limits: FrameLimits) -> Result<Self> {
        limits.validate()?;
        Ok(Self {
            last_frame: None,
            limits,
        })
    }

    /// Seconds since the previous frame, clamped to `max_dt`.
    ///
    /// The first frame after construction or [`reset`](Self::reset) yields `first_dt`.
    pub fn delta(&mut self, now: Instant) -> f64 {
        let dt = match self.last_frame {
            Some(last) => now
                .saturating_duration_since(last)
                .as_secs_f64()
                .min(self.limits.max_dt),
            None => self.limits.first_dt,
        };
        self.last_frame = Some(now);
        dt
    }

    /// Forget the previous timestamp
    pub fn reset(&mut self) {
        self.last_frame = None;
    }

    pub fn limits(&self) -> FrameLimits {
        self.limits
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// The animation scheduler that ticks all active animations
pub struct AnimationScheduler {
    springs: SlotMap<SpringId, Spring>,
    groups: SlotMap<SpringGroupId, SpringGroup>,
    clock: FrameClock,
    running: bool,
    frames: u64,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::with_clock(FrameClock::new())
    }

    pub fn with_clock(clock: FrameClock) -> Self {
        Self {
            springs: SlotMap::with_key(),
            groups: SlotMap::with_key(),
            clock,
            running: false,
            frames: 0,
        }
    }

    pub fn add_spring(&mut self, spring: Spring) -> SpringId {
        let moving = !spring.is_settled();
        let id = self.springs.insert(spring);
        if moving {
            self.wake();
        }
        id
    }

    pub fn get_spring(&self, id: SpringId) -> Option<&Spring> {
        self.springs.get(id)
    }

    /// Mutate a spring; the loop restarts if the spring was set in motion
    pub fn with_spring_mut<R>(&mut self, id: SpringId, f: impl FnOnce(&mut Spring) -> R) -> Option<R> {
        let spring = self.springs.get_mut(id)?;
        let result = f(spring);
        if !spring.is_settled() {
            self.wake();
        }
        Some(result)
    }

    /// Retarget a spring. Returns `false` if the spring no longer exists.
    pub fn set_target(&mut self, id: SpringId, target: f64) -> bool {
        self.with_spring_mut(id, |spring| spring.set_target(target))
            .is_some()
    }

    /// Remove a spring mid-flight (the owning element went away)
    pub fn cancel(&mut self, id: SpringId) -> Option<Spring> {
        self.springs.remove(id)
    }

    pub fn add_group(&mut self, group: SpringGroup) -> SpringGroupId {
        let moving = !group.is_settled();
        let id = self.groups.insert(group);
        if moving {
            self.wake();
        }
        id
    }

    pub fn get_group(&self, id: SpringGroupId) -> Option<&SpringGroup> {
        self.groups.get(id)
    }

    /// Retarget one channel of a group. Returns `false` if the group no longer exists.
    pub fn set_group_target(&mut self, id: SpringGroupId, channel: &str, target: f64) -> bool {
        let Some(group) = self.groups.get_mut(id) else {
            return false;
        };
        group.set_target(channel, target);
        if !group.is_settled() {
            self.wake();
        }
        true
    }

    pub fn cancel_group(&mut self, id: SpringGroupId) -> Option<SpringGroup> {
        self.groups.remove(id)
    }

    /// Resume scheduling frames
    pub fn start(&mut self) {
        self.wake();
    }

    /// Stop scheduling frames; springs keep their state
    pub fn stop(&mut self) {
        if self.running {
            tracing::debug!(frames = self.frames, "animation loop stopped");
        }
        self.running = false;
        self.clock.reset();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Tick all animations using the current time
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Tick all animations as of `now`.
    ///
    /// Returns `true` if another frame should be scheduled. The loop stops
    /// itself once every animation has settled.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }

        let dt = self.clock.delta(now);
        self.frames += 1;

        let mut active = false;
        for (_, spring) in self.springs.iter_mut() {
            active |= spring.step(dt);
        }
        for (_, group) in self.groups.iter_mut() {
            active |= group.step(dt);
        }

        if !active {
            tracing::debug!(frames = self.frames, "all animations settled");
            self.running = false;
            self.clock.reset();
        }
        active
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        self.springs.values().any(|s| !s.is_settled())
            || self.groups.values().any(|g| !g.is_settled())
    }

    /// Iterate over all springs
    pub fn springs_iter(&self) -> impl Iterator<Item = (SpringId, &Spring)> {
        self.springs.iter()
    }

    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Frames ticked since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn wake(&mut self) {
        if !self.running {
            self.running = true;
            self.clock.reset();
        }
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
