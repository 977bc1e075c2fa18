//! CSS timing functions
//!
//! The keyword curves are the cubic beziers browsers use for `transition`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;

/// A CSS `transition-timing-function`
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimingFunction {
    Linear,
    #[default]
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    CubicBezier(f64, f64, f64, f64),
}

impl TimingFunction {
    /// Control points `(x1, y1, x2, y2)`, or `None` for `linear`
    pub fn control_points(&self) -> Option<(f64, f64, f64, f64)> {
        match *self {
            Self::Linear => None,
            Self::Ease => Some((0.25, 0.1, 0.25, 1.0)),
            Self::EaseIn => Some((0.42, 0.0, 1.0, 1.0)),
            Self::EaseOut => Some((0.0, 0.0, 0.58, 1.0)),
            Self::EaseInOut => Some((0.42, 0.0, 0.58, 1.0)),
            Self::CubicBezier(x1, y1, x2, y2) => Some((x1, y1, x2, y2)),
        }
    }

    /// Map linear progress in `[0, 1]` to eased progress
    pub fn apply(&self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self.control_points() {
            None => t,
            Some((x1, y1, x2, y2)) => UnitCurve::new(x1, y1, x2, y2).y_for_x(t),
        }
    }
}

/// One axis of a unit bezier as `a·t³ + b·t² + c·t`
#[derive(Clone, Copy, Debug)]
struct Cubic {
    a: f64,
    b: f64,
    c: f64,
}

impl Cubic {
    /// Axis through 0, `p1`, `p2`, 1
    fn through(p1: f64, p2: f64) -> Self {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        Self { a: 1.0 - c - b, b, c }
    }

    fn at(self, t: f64) -> f64 {
        ((self.a * t + self.b) * t + self.c) * t
    }

    fn derivative(self, t: f64) -> f64 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }
}

/// A bezier from (0, 0) to (1, 1), as CSS uses for timing
#[derive(Clone, Copy, Debug)]
struct UnitCurve {
    x: Cubic,
    y: Cubic,
}

impl UnitCurve {
    const EPSILON: f64 = 1e-9;

    fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x: Cubic::through(x1, x2),
            y: Cubic::through(y1, y2),
        }
    }

    fn y_for_x(&self, x: f64) -> f64 {
        if x <= 0.0 {
            0.0
        } else if x >= 1.0 {
            1.0
        } else {
            self.y.at(self.parameter_for(x))
        }
    }

    /// Curve parameter where the x axis reaches `x`. x is monotonic on
    /// `[0, 1]` because both x control points lie in that range.
    fn parameter_for(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..8 {
            let error = self.x.at(t) - x;
            if error.abs() < Self::EPSILON {
                return t;
            }
            let slope = self.x.derivative(t);
            if slope.abs() < Self::EPSILON {
                break;
            }
            t -= error / slope;
            if !(0.0..=1.0).contains(&t) {
                break;
            }
        }

        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        for _ in 0..64 {
            if hi - lo < Self::EPSILON {
                break;
            }
            let mid = 0.5 * (lo + hi);
            if self.x.at(mid) < x {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        0.5 * (lo + hi)
    }
}

impl FromStr for TimingFunction {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "linear" => return Ok(Self::Linear),
            "ease" => return Ok(Self::Ease),
            "ease-in" => return Ok(Self::EaseIn),
            "ease-out" => return Ok(Self::EaseOut),
            "ease-in-out" => return Ok(Self::EaseInOut),
            _ => {}
        }

        let args = s
            .strip_prefix("cubic-bezier(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| AnimationError::InvalidTiming(s.to_string()))?;

        let values = args
            .split(',')
            .map(|v| v.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| AnimationError::InvalidTiming(s.to_string()))?;

        match values[..] {
            // x coordinates must stay inside [0, 1] for the curve to be a function of time
            [x1, y1, x2, y2]
                if y1.is_finite()
                    && y2.is_finite()
                    && (0.0..=1.0).contains(&x1)
                    && (0.0..=1.0).contains(&x2) =>
            {
                Ok(Self::CubicBezier(x1, y1, x2, y2))
            }
            _ => Err(AnimationError::InvalidTiming(s.to_string())),
        }
    }
}

impl fmt::Display for TimingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("linear"),
            Self::Ease => f.write_str("ease"),
            Self::EaseIn => f.write_str("ease-in"),
            Self::EaseOut => f.write_str("ease-out"),
            Self::EaseInOut => f.write_str("ease-in-out"),
            Self::CubicBezier(x1, y1, x2, y2) => write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_exact() {
        for timing in [
            TimingFunction::Linear,
            TimingFunction::Ease,
            TimingFunction::EaseIn,
            TimingFunction::EaseOut,
            TimingFunction::EaseInOut,
        ] {
            assert_eq!(timing.apply(0.0), 0.0);
            assert_eq!(timing.apply(1.0), 1.0);
        }
    }

    #[test]
    fn test_ease_out_leads_linear() {
        let t = 0.3;
        assert!(TimingFunction::EaseOut.apply(t) > t);
        assert!(TimingFunction::EaseIn.apply(t) < t);
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let a = TimingFunction::EaseInOut.apply(0.25);
        let b = TimingFunction::EaseInOut.apply(0.75);
        assert!((a + b - 1.0).abs() < 1e-6);
        assert!((TimingFunction::EaseInOut.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_progress_is_clamped() {
        assert_eq!(TimingFunction::Ease.apply(-1.0), 0.0);
        assert_eq!(TimingFunction::Ease.apply(2.0), 1.0);
        assert_eq!(TimingFunction::Linear.apply(f64::NAN), 0.0);
    }

    #[test]
    fn test_parses_keywords_and_bezier() {
        assert_eq!("ease-out".parse::<TimingFunction>().unwrap(), TimingFunction::EaseOut);
        assert_eq!(
            "cubic-bezier(0.4, 0, 0.2, 1)".parse::<TimingFunction>().unwrap(),
            TimingFunction::CubicBezier(0.4, 0.0, 0.2, 1.0)
        );
        assert!("cubic-bezier(1.5, 0, 0.2, 1)".parse::<TimingFunction>().is_err());
        assert!("cubic-bezier(0.4, 0)".parse::<TimingFunction>().is_err());
        assert!("steps(4)".parse::<TimingFunction>().is_err());
    }

    #[test]
    fn test_rejects_non_finite_control_points() {
        assert!("cubic-bezier(0.4, NaN, 0.2, 1)".parse::<TimingFunction>().is_err());
        assert!("cubic-bezier(0.4, 0, 0.2, inf)".parse::<TimingFunction>().is_err());
        assert!("cubic-bezier(NaN, 0, 0.2, 1)".parse::<TimingFunction>().is_err());
    }

    #[test]
    fn test_flat_start_curve_still_solves() {
        // x has zero slope at both ends
        let curve = TimingFunction::CubicBezier(0.0, 0.0, 1.0, 1.0);
        let mid = curve.apply(0.5);
        assert!((mid - 0.5).abs() < 1e-6);
        assert!(curve.apply(0.01).is_finite());
    }
}
