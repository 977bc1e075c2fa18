//! Offline spring simulation
//!
//! Replays what the frame loop would do for a single value, with a fixed
//! frame interval instead of wall-clock time.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use folio_animation::{AnimatedValue, FrameClock, FrameLimits, MotionPreference, SpringConfig};
use serde::Serialize;

/// One rendered frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Frame {
    pub frame: u32,
    /// Seconds since the animation started
    pub time: f64,
    pub value: f64,
    pub velocity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trajectory {
    /// Frame 0 is the state before the first step
    pub frames: Vec<Frame>,
    pub settled: bool,
}

impl Trajectory {
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Simulation {
    pub from: f64,
    pub to: f64,
    /// Interval between frames after the first
    pub dt: f64,
    pub max_steps: u32,
    pub limits: FrameLimits,
    pub preference: MotionPreference,
}

/// Run the spring through a [`FrameClock`] fed with evenly spaced instants
pub fn simulate(config: SpringConfig, sim: &Simulation) -> Result<Trajectory> {
    let mut clock = FrameClock::with_limits(sim.limits).context("Invalid frame limits")?;
    let interval = Duration::try_from_secs_f64(sim.dt)
        .with_context(|| format!("Unusable frame interval {}s", sim.dt))?;

    let mut value = AnimatedValue::new(config, sim.from, sim.preference);
    value.set_target(sim.to);

    let mut frames = vec![snapshot(&value, 0, 0.0)];
    if value.spring().is_settled() {
        return Ok(Trajectory {
            frames,
            settled: true,
        });
    }

    let mut now = Instant::now();
    let mut time = 0.0;
    for frame in 1..=sim.max_steps {
        let dt = clock.delta(now);
        let moving = value.step(dt);
        time += dt;
        frames.push(snapshot(&value, frame, time));
        if !moving {
            return Ok(Trajectory {
                frames,
                settled: true,
            });
        }
        let Some(next) = now.checked_add(interval) else {
            break;
        };
        now = next;
    }

    tracing::debug!(steps = sim.max_steps, "spring still moving at step limit");
    Ok(Trajectory {
        frames,
        settled: false,
    })
}

fn snapshot(value: &AnimatedValue, frame: u32, time: f64) -> Frame {
    Frame {
        frame,
        time,
        value: value.displayed(),
        velocity: value.spring().velocity(),
    }
}

/// Plain-text rendering, one line per frame
pub fn render(trajectory: &Trajectory) -> String {
    let mut lines = vec![format!("{:>5}  {:>8}  {:>12}  {:>12}", "frame", "time", "value", "velocity")];
    lines.extend(trajectory.frames.iter().map(|f| {
        format!(
            "{:>5}  {:>7.3}s  {:>12.4}  {:>12.4}",
            f.frame, f.time, f.value, f.velocity
        )
    }));

    if let Some(last) = trajectory.last() {
        let status = if trajectory.settled { "settled" } else { "still moving" };
        lines.push(format!("{status} after {} frames ({:.3}s)", last.frame, last.time));
    }
    lines.join("\n")
}
