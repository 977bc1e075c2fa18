//! Named multi-channel springs
//!
//! The same physics as [`advance_spring`], applied independently per channel.
//! Useful for x/y pairs or scale/opacity pairs that share one config.

use indexmap::IndexMap;

use crate::spring::{advance_spring, SpringConfig, SpringState};

/// Per-channel spring states, in channel order
pub type SpringStates = IndexMap<String, SpringState>;

/// Per-channel targets, in channel order
pub type SpringTargets = IndexMap<String, f64>;

/// Output of a multi-channel step
#[derive(Clone, Debug, PartialEq)]
pub struct SpringsStep {
    pub states: SpringStates,
    /// `true` only when every channel has settled
    pub settled: bool,
}

/// Advance every channel named in `targets` by `dt` seconds.
///
/// Channels missing from `states` start at rest on their target. Channels in
/// `states` with no target are dropped. Output follows the order of `targets`.
pub fn advance_spring_many(
    states: &SpringStates,
    targets: &SpringTargets,
    dt: f64,
    config: &SpringConfig,
) -> SpringsStep {
    let mut next = SpringStates::with_capacity(targets.len());
    let mut settled = true;

    for (name, &target) in targets {
        let state = states
            .get(name)
            .copied()
            .unwrap_or_else(|| SpringState::at_rest(target));

        let step = advance_spring(state, target, dt, config);
        settled &= step.settled;
        next.insert(name.clone(), step.state);
    }

    SpringsStep {
        states: next,
        settled,
    }
}

/// An owned set of named springs sharing one config
#[derive(Clone, Debug)]
pub struct SpringGroup {
    config: SpringConfig,
    states: SpringStates,
    targets: SpringTargets,
    settled: bool,
}

impl SpringGroup {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            config,
            states: SpringStates::new(),
            targets: SpringTargets::new(),
            settled: true,
        }
    }

    /// Create a group with every channel resting on its initial value
    pub fn with_values<I, K>(config: SpringConfig, values: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut group = Self::new(config);
        for (name, value) in values {
            let name = name.into();
            group.states.insert(name.clone(), SpringState::at_rest(value));
            group.targets.insert(name, value);
        }
        group
    }

    /// Set one channel's target, adding the channel at rest if it is new
    pub fn set_target(&mut self, name: impl Into<String>, target: f64) {
        let name = name.into();
        if !target.is_finite() {
            tracing::warn!(channel = %name, spring_target = target, "ignoring non-finite channel target");
            return;
        }
        let previous = self.targets.insert(name.clone(), target);
        let state = self
            .states
            .entry(name)
            .or_insert_with(|| SpringState::at_rest(target));

        if previous != Some(target) || state.value != target {
            self.settled = false;
        }
    }

    /// Replace all targets at once.
    ///
    /// Channels without a target are dropped, new channels start at rest on
    /// their target and non-finite targets are skipped.
    pub fn set_targets(&mut self, targets: SpringTargets) {
        self.targets = targets
            .into_iter()
            .filter(|(name, target)| {
                let finite = target.is_finite();
                if !finite {
                    tracing::warn!(channel = %name, spring_target = *target, "ignoring non-finite channel target");
                }
                finite
            })
            .collect();
        self.states.retain(|name, _| self.targets.contains_key(name));
        for (name, &target) in &self.targets {
            self.states
                .entry(name.clone())
                .or_insert_with(|| SpringState::at_rest(target));
        }
        self.settled = false;
    }

    /// Drop a channel
    pub fn remove(&mut self, name: &str) -> Option<SpringState> {
        self.targets.shift_remove(name);
        self.states.shift_remove(name)
    }

    /// Advance every channel. Returns `true` while any channel is moving.
    pub fn step(&mut self, dt: f64) -> bool {
        if self.settled {
            return false;
        }

        let step = advance_spring_many(&self.states, &self.targets, dt, &self.config);
        self.states = step.states;
        self.settled = step.settled;
        !self.settled
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        self.states.get(name).map(|s| s.value)
    }

    pub fn target(&self, name: &str) -> Option<f64> {
        self.targets.get(name).copied()
    }

    /// Current values of every channel
    pub fn values(&self) -> IndexMap<String, f64> {
        self.states
            .iter()
            .map(|(name, state)| (name.clone(), state.value))
            .collect()
    }

    pub fn targets(&self) -> &SpringTargets {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }
}
