//! Spring physics
//!
//! A damped harmonic oscillator integrated with semi-implicit Euler, one step
//! per frame. [`advance_spring`] is the pure integrator; [`Spring`] is an owned
//! wrapper that remembers its target and settled flag between frames.

use serde::{Deserialize, Serialize};

use crate::error::{AnimationError, Result};

/// Configuration for a spring animation
///
/// Always valid once constructed: `stiffness > 0`, `damping >= 0`,
/// `mass > 0`, `precision > 0`, all finite.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSpringConfig", into = "RawSpringConfig")]
pub struct SpringConfig {
    stiffness: f64,
    damping: f64,
    mass: f64,
    precision: f64,
}

/// Default settling threshold
pub const DEFAULT_PRECISION: f64 = 0.01;

impl SpringConfig {
    /// Create a spring config with the default precision
    pub fn new(stiffness: f64, damping: f64, mass: f64) -> Result<Self> {
        Self::with_precision(stiffness, damping, mass, DEFAULT_PRECISION)
    }

    /// Create a spring config with an explicit settling threshold
    pub fn with_precision(stiffness: f64, damping: f64, mass: f64, precision: f64) -> Result<Self> {
        check_positive("stiffness", stiffness)?;
        check_finite("damping", damping)?;
        if damping < 0.0 {
            return Err(AnimationError::InvalidConfig {
                field: "damping",
                value: damping,
                reason: "must not be negative",
            });
        }
        check_positive("mass", mass)?;
        check_positive("precision", precision)?;

        Ok(Self {
            stiffness,
            damping,
            mass,
            precision,
        })
    }

    /// Soft, slow settle
    pub const fn gentle() -> Self {
        Self::preset(120.0, 14.0, 1.0)
    }

    /// Quick response with little overshoot
    pub const fn snappy() -> Self {
        Self::preset(300.0, 30.0, 1.0)
    }

    /// Very fast, critically damped-ish
    pub const fn stiff() -> Self {
        Self::preset(400.0, 40.0, 1.0)
    }

    /// Visible overshoot and bounce
    pub const fn wobbly() -> Self {
        Self::preset(180.0, 12.0, 1.0)
    }

    /// Hover/press scale on buttons
    pub const fn button() -> Self {
        Self::preset(400.0, 25.0, 0.5)
    }

    /// Look up a named preset (`default`, `gentle`, `snappy`, `stiff`, `wobbly`, `button`)
    pub fn named(name: &str) -> Result<Self> {
        match name {
            "default" => Ok(Self::default()),
            "gentle" => Ok(Self::gentle()),
            "snappy" => Ok(Self::snappy()),
            "stiff" => Ok(Self::stiff()),
            "wobbly" => Ok(Self::wobbly()),
            "button" => Ok(Self::button()),
            other => Err(AnimationError::UnknownPreset(other.to_string())),
        }
    }

    const fn preset(stiffness: f64, damping: f64, mass: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            precision: DEFAULT_PRECISION,
        }
    }

    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// Damping ratio (1.0 = critically damped)
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::preset(150.0, 15.0, 1.0)
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AnimationError::InvalidConfig {
            field,
            value,
            reason: "must be finite",
        })
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<()> {
    check_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(AnimationError::InvalidConfig {
            field,
            value,
            reason: "must be greater than zero",
        })
    }
}

/// Unvalidated wire form of [`SpringConfig`]
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct RawSpringConfig {
    stiffness: f64,
    damping: f64,
    mass: f64,
    #[serde(default = "default_precision")]
    precision: f64,
}

fn default_precision() -> f64 {
    DEFAULT_PRECISION
}

impl TryFrom<RawSpringConfig> for SpringConfig {
    type Error = AnimationError;

    fn try_from(raw: RawSpringConfig) -> Result<Self> {
        Self::with_precision(raw.stiffness, raw.damping, raw.mass, raw.precision)
    }
}

impl From<SpringConfig> for RawSpringConfig {
    fn from(config: SpringConfig) -> Self {
        Self {
            stiffness: config.stiffness,
            damping: config.damping,
            mass: config.mass,
            precision: config.precision,
        }
    }
}

/// Position and velocity of one animated channel
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpringState {
    pub value: f64,
    pub velocity: f64,
}

impl SpringState {
    /// A state resting at `value`
    pub const fn at_rest(value: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
        }
    }
}

/// Output of a single integration step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringStep {
    pub state: SpringState,
    pub settled: bool,
}

/// Advance a spring by `dt` seconds toward `target`.
///
/// When the post-step state is within `precision` of the target in both
/// displacement and velocity, the result snaps to `target` with zero velocity
/// and `settled` is set. A negative or non-finite `dt` advances by zero.
///
/// Non-finite input never propagates: a non-finite `target` leaves the value
/// where it is and settles it; a non-finite `state` snaps onto `target`.
pub fn advance_spring(state: SpringState, target: f64, dt: f64, config: &SpringConfig) -> SpringStep {
    if !target.is_finite() {
        tracing::warn!(spring_target = target, "non-finite spring target, holding position");
        let value = if state.value.is_finite() { state.value } else { 0.0 };
        return SpringStep {
            state: SpringState::at_rest(value),
            settled: true,
        };
    }
    if !state.value.is_finite() || !state.velocity.is_finite() {
        tracing::warn!(value = state.value, velocity = state.velocity, "non-finite spring state, snapping to target");
        return SpringStep {
            state: SpringState::at_rest(target),
            settled: true,
        };
    }

    let dt = if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        if dt != 0.0 {
            tracing::debug!(dt, "ignoring unusable frame delta");
        }
        0.0
    };

    let displacement = state.value - target;
    let spring_force = -config.stiffness * displacement;
    let damping_force = -config.damping * state.velocity;
    let acceleration = (spring_force + damping_force) / config.mass;

    let velocity = state.velocity + acceleration * dt;
    let value = state.value + velocity * dt;

    let settled = velocity.abs() < config.precision && (value - target).abs() < config.precision;

    if settled {
        SpringStep {
            state: SpringState::at_rest(target),
            settled: true,
        }
    } else {
        SpringStep {
            state: SpringState { value, velocity },
            settled: false,
        }
    }
}

/// A spring-animated value that keeps its own target between frames
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    state: SpringState,
    target: f64,
    settled: bool,
}

impl Spring {
    /// Create a spring resting at `initial`
    pub fn new(config: SpringConfig, initial: f64) -> Self {
        Self {
            config,
            state: SpringState::at_rest(initial),
            target: initial,
            settled: true,
        }
    }

    /// Retarget the spring. Velocity carries over so motion stays continuous.
    ///
    /// Non-finite targets are ignored.
    pub fn set_target(&mut self, target: f64) {
        if !target.is_finite() {
            tracing::warn!(spring_target = target, "ignoring non-finite spring target");
            return;
        }
        if target != self.target || self.state.value != target {
            self.target = target;
            self.settled = false;
        }
    }

    /// Jump to `value` immediately, at rest
    pub fn snap_to(&mut self, value: f64) {
        if !value.is_finite() {
            tracing::warn!(value, "ignoring non-finite spring value");
            return;
        }
        self.state = SpringState::at_rest(value);
        self.target = value;
        self.settled = true;
    }

    /// Advance one frame. Returns `true` while the spring is still moving.
    pub fn step(&mut self, dt: f64) -> bool {
        if self.settled {
            return false;
        }

        let step = advance_spring(self.state, self.target, dt, &self.config);
        self.state = step.state;
        self.settled = step.settled;
        !self.settled
    }

    pub fn value(&self) -> f64 {
        self.state.value
    }

    pub fn velocity(&self) -> f64 {
        self.state.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn state(&self) -> SpringState {
        self.state
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    #[test]
    fn test_converges_within_bounded_steps() {
        let config = SpringConfig::new(400.0, 25.0, 0.5).unwrap();
        let mut state = SpringState::at_rest(0.0);

        let mut settled_at = None;
        for i in 0..200 {
            let step = advance_spring(state, 100.0, DT, &config);
            state = step.state;
            if step.settled {
                settled_at = Some(i);
                break;
            }
        }

        assert!(settled_at.is_some(), "spring should settle within 200 steps");
        assert_eq!(state.value, 100.0);
        assert_eq!(state.velocity, 0.0);
    }

    #[test]
    fn test_idempotent_at_rest() {
        let config = SpringConfig::default();
        let step = advance_spring(SpringState::at_rest(42.0), 42.0, DT, &config);
        assert!(step.settled);
        assert_eq!(step.state, SpringState::at_rest(42.0));

        let again = advance_spring(step.state, 42.0, DT, &config);
        assert!(again.settled);
        assert_eq!(again.state, SpringState::at_rest(42.0));
    }

    #[test]
    fn test_target_change_is_continuous() {
        let config = SpringConfig::default();
        let mut state = SpringState::at_rest(0.0);
        for _ in 0..5 {
            state = advance_spring(state, 100.0, DT, &config).state;
        }
        assert!(state.velocity > 0.0);

        // Retarget mid-flight: the next value follows the current velocity, no snapping
        let next = advance_spring(state, -50.0, DT, &config);
        assert!(!next.settled);
        assert!((next.state.value - state.value).abs() <= state.velocity.abs() * DT + 1.0);
        assert!(next.state.value > 0.0 && next.state.value < 100.0);
    }

    #[test]
    fn test_first_step_matches_formula() {
        let config = SpringConfig::new(100.0, 10.0, 2.0).unwrap();
        let step = advance_spring(SpringState::at_rest(0.0), 1.0, 0.1, &config);
        // a = (100 * 1 - 0) / 2 = 50; v = 5; x = 0.5
        assert!((step.state.velocity - 5.0).abs() < 1e-12);
        assert!((step.state.value - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_dt_does_not_move() {
        let config = SpringConfig::default();
        let state = SpringState {
            value: 3.0,
            velocity: 1.0,
        };
        for dt in [f64::NAN, -1.0, f64::INFINITY] {
            let step = advance_spring(state, 10.0, dt, &config);
            assert_eq!(step.state.value, 3.0);
            assert!(!step.settled);
        }
    }

    #[test]
    fn test_non_finite_target_settles_in_place() {
        let config = SpringConfig::default();
        let state = SpringState {
            value: 3.0,
            velocity: 2.0,
        };
        for target in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let step = advance_spring(state, target, DT, &config);
            assert!(step.settled);
            assert_eq!(step.state, SpringState::at_rest(3.0));
        }
    }

    #[test]
    fn test_non_finite_state_snaps_to_target() {
        let config = SpringConfig::default();
        let broken = SpringState {
            value: f64::NAN,
            velocity: 1.0,
        };
        let step = advance_spring(broken, 7.0, DT, &config);
        assert!(step.settled);
        assert_eq!(step.state, SpringState::at_rest(7.0));
    }

    #[test]
    fn test_spring_ignores_non_finite_target() {
        let mut spring = Spring::new(SpringConfig::default(), 1.0);
        spring.set_target(f64::NAN);
        assert!(spring.is_settled());
        assert_eq!(spring.target(), 1.0);

        spring.set_target(2.0);
        spring.set_target(f64::INFINITY);
        assert_eq!(spring.target(), 2.0);
        let mut frames = 0;
        while spring.step(DT) {
            frames += 1;
            assert!(frames < 600, "spring failed to settle");
        }
        assert_eq!(spring.value(), 2.0);

        spring.snap_to(f64::NAN);
        assert_eq!(spring.value(), 2.0);
    }

    #[test]
    fn test_rejects_degenerate_config() {
        assert!(SpringConfig::new(100.0, 10.0, 0.0).is_err());
        assert!(SpringConfig::new(100.0, 10.0, -1.0).is_err());
        assert!(SpringConfig::new(0.0, 10.0, 1.0).is_err());
        assert!(SpringConfig::new(100.0, -0.5, 1.0).is_err());
        assert!(SpringConfig::new(f64::NAN, 10.0, 1.0).is_err());
        assert!(SpringConfig::with_precision(100.0, 10.0, 1.0, 0.0).is_err());
        assert!(SpringConfig::new(100.0, 0.0, 1.0).is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        for name in ["default", "gentle", "snappy", "stiff", "wobbly", "button"] {
            let config = SpringConfig::named(name).unwrap();
            assert!(SpringConfig::with_precision(
                config.stiffness(),
                config.damping(),
                config.mass(),
                config.precision()
            )
            .is_ok());
        }
        assert!(SpringConfig::named("bouncy-castle").is_err());
    }

    #[test]
    fn test_spring_reactivates_on_new_target() {
        let mut spring = Spring::new(SpringConfig::snappy(), 0.0);
        assert!(spring.is_settled());
        assert!(!spring.step(DT));

        spring.set_target(1.0);
        assert!(!spring.is_settled());

        for _ in 0..300 {
            if !spring.step(DT) {
                break;
            }
        }
        assert!(spring.is_settled());
        assert_eq!(spring.value(), 1.0);

        spring.set_target(1.0);
        assert!(spring.is_settled());
    }

    #[test]
    fn test_raw_config_is_validated() {
        let raw = RawSpringConfig {
            stiffness: 200.0,
            damping: 20.0,
            mass: 0.0,
            precision: default_precision(),
        };
        assert!(SpringConfig::try_from(raw).is_err());

        let raw = RawSpringConfig { mass: 1.0, ..raw };
        let config = SpringConfig::try_from(raw).unwrap();
        assert_eq!(config.precision(), DEFAULT_PRECISION);
        assert_eq!(config.mass(), 1.0);
    }
}
