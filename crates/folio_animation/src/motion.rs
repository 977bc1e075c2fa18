//! Reduced-motion policy
//!
//! When the user asks for reduced motion, animated values are bypassed and the
//! target is displayed directly. The integrator itself is unaware of this.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;
use crate::spring::{Spring, SpringConfig};

/// The user's motion preference
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotionPreference {
    #[default]
    NoPreference,
    Reduce,
}

impl MotionPreference {
    /// Media query whose match means [`MotionPreference::Reduce`]
    pub const MEDIA_QUERY: &'static str = "(prefers-reduced-motion: reduce)";

    pub fn from_reduced(reduced: bool) -> Self {
        if reduced {
            Self::Reduce
        } else {
            Self::NoPreference
        }
    }

    pub fn is_reduced(self) -> bool {
        self == Self::Reduce
    }

    /// The value to display: `target` under reduced motion, `animated` otherwise
    pub fn resolve(self, animated: f64, target: f64) -> f64 {
        match self {
            Self::Reduce => target,
            Self::NoPreference => animated,
        }
    }
}

impl FromStr for MotionPreference {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "reduce" => Ok(Self::Reduce),
            "no-preference" => Ok(Self::NoPreference),
            other => Err(AnimationError::UnknownPreference(other.to_string())),
        }
    }
}

impl fmt::Display for MotionPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reduce => f.write_str("reduce"),
            Self::NoPreference => f.write_str("no-preference"),
        }
    }
}

/// A spring-driven value that honours the motion preference
#[derive(Clone, Debug)]
pub struct AnimatedValue {
    spring: Spring,
    preference: MotionPreference,
}

impl AnimatedValue {
    pub fn new(config: SpringConfig, initial: f64, preference: MotionPreference) -> Self {
        Self {
            spring: Spring::new(config, initial),
            preference,
        }
    }

    pub fn set_target(&mut self, target: f64) {
        if self.preference.is_reduced() {
            self.spring.snap_to(target);
        } else {
            self.spring.set_target(target);
        }
    }

    /// Switching to reduced motion lands any in-flight animation on its target
    pub fn set_preference(&mut self, preference: MotionPreference) {
        self.preference = preference;
        if preference.is_reduced() {
            self.spring.snap_to(self.spring.target());
        }
    }

    /// Advance one frame. Returns `true` while the value is still moving.
    pub fn step(&mut self, dt: f64) -> bool {
        if self.preference.is_reduced() {
            return false;
        }
        self.spring.step(dt)
    }

    /// The value to render this frame
    pub fn displayed(&self) -> f64 {
        self.preference
            .resolve(self.spring.value(), self.spring.target())
    }

    pub fn target(&self) -> f64 {
        self.spring.target()
    }

    pub fn preference(&self) -> MotionPreference {
        self.preference
    }

    pub fn spring(&self) -> &Spring {
        &self.spring
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_shows_target_immediately() {
        let mut value = AnimatedValue::new(SpringConfig::button(), 1.0, MotionPreference::Reduce);
        value.set_target(1.05);
        assert_eq!(value.displayed(), 1.05);
        assert!(!value.step(1.0 / 60.0));
    }

    #[test]
    fn test_animated_value_lags_target_without_preference() {
        let mut value = AnimatedValue::new(SpringConfig::button(), 1.0, MotionPreference::NoPreference);
        value.set_target(1.05);
        assert_eq!(value.displayed(), 1.0);
        assert!(value.step(1.0 / 60.0));
        let shown = value.displayed();
        assert!(shown > 1.0 && shown != 1.05);
    }

    #[test]
    fn test_switching_to_reduce_lands_in_flight_value() {
        let mut value = AnimatedValue::new(SpringConfig::gentle(), 0.0, MotionPreference::NoPreference);
        value.set_target(10.0);
        value.step(1.0 / 60.0);
        value.set_preference(MotionPreference::Reduce);
        assert_eq!(value.displayed(), 10.0);
        assert!(value.spring().is_settled());
    }

    #[test]
    fn test_parse_preference() {
        assert_eq!("reduce".parse::<MotionPreference>().unwrap(), MotionPreference::Reduce);
        assert_eq!(
            " no-preference ".parse::<MotionPreference>().unwrap(),
            MotionPreference::NoPreference
        );
        assert!("sometimes".parse::<MotionPreference>().is_err());
        assert_eq!(MotionPreference::Reduce.resolve(0.3, 1.0), 1.0);
        assert_eq!(MotionPreference::NoPreference.resolve(0.3, 1.0), 0.3);
    }
}
