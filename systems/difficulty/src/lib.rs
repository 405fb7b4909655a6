#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Difficulty curves that drive forward speed and obstacle cadence.
//!
//! Both curves normalise run time over the same ramp window but use different
//! easings: forward speed follows an ease-out quadratic while the obstacle
//! interval follows an ease-out cubic, so density and speed never move in
//! lockstep.

use std::time::Duration;

use bike_runner_core::{Command, Event, PowerEffect};
use serde::Deserialize;

/// Tunables for the difficulty curves.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DifficultyTuning {
    /// Run time after which both curves reach their final value.
    pub ramp_window_ms: u64,
    /// Forward speed at run start and the lower clamp of the speed curve.
    pub base_speed: f32,
    /// Upper clamp of the unboosted speed curve.
    pub max_speed: f32,
    /// Speed added by the time ramp once it completes.
    pub time_ramp_amount: f32,
    /// Speed added per hundred points of score.
    pub score_per_hundred_bonus: f32,
    /// Multiplier applied to the target speed and ceiling while speed-boosted.
    pub speed_boost_factor: f32,
    /// Obstacle interval at run start.
    pub spawn_interval_start_ms: u64,
    /// Obstacle interval once the ramp completes.
    pub spawn_interval_floor_ms: u64,
}

impl Default for DifficultyTuning {
    fn default() -> Self {
        Self {
            ramp_window_ms: 30_000,
            base_speed: 260.0,
            max_speed: 520.0,
            time_ramp_amount: 180.0,
            score_per_hundred_bonus: 0.25,
            speed_boost_factor: 1.4,
            spawn_interval_start_ms: 1_400,
            spawn_interval_floor_ms: 700,
        }
    }
}

impl DifficultyTuning {
    /// Fraction of the ramp window covered by `elapsed`, clamped to `[0, 1]`.
    #[must_use]
    pub fn ramp_progress(&self, elapsed: Duration) -> f32 {
        if self.ramp_window_ms == 0 {
            return 1.0;
        }
        let window = Duration::from_millis(self.ramp_window_ms).as_secs_f32();
        (elapsed.as_secs_f32() / window).clamp(0.0, 1.0)
    }

    /// Forward speed for the provided run time and score.
    ///
    /// A speed boost multiplies the eased target before clamping and raises the
    /// ceiling by the same factor.
    #[must_use]
    pub fn speed(&self, elapsed: Duration, score: u64, boosted: bool) -> f32 {
        let eased = ease_out_quad(self.ramp_progress(elapsed));
        let score_bonus = (score as f32 / 100.0) * self.score_per_hundred_bonus;
        let mut target = self.base_speed + eased * self.time_ramp_amount + score_bonus;
        let mut ceiling = self.max_speed;
        if boosted {
            target *= self.speed_boost_factor;
            ceiling *= self.speed_boost_factor;
        }
        target.clamp(self.base_speed, ceiling.max(self.base_speed))
    }

    /// Delay between two obstacle spawns at the provided run time.
    #[must_use]
    pub fn obstacle_interval(&self, elapsed: Duration) -> Duration {
        let eased = ease_out_cubic(self.ramp_progress(elapsed));
        let start = self.spawn_interval_start_ms as f32;
        let floor = self.spawn_interval_floor_ms as f32;
        let millis = start + (floor - start) * eased;
        Duration::from_millis(millis.max(0.0).round() as u64)
    }
}

fn ease_out_quad(t: f32) -> f32 {
    t * (2.0 - t)
}

fn ease_out_cubic(t: f32) -> f32 {
    let inverse = t - 1.0;
    inverse * inverse * inverse + 1.0
}

/// Pure system that publishes the forward speed every tick.
#[derive(Debug, Default)]
pub struct Difficulty {
    tuning: DifficultyTuning,
}

impl Difficulty {
    /// Creates a new difficulty system using the provided tuning.
    #[must_use]
    pub fn new(tuning: DifficultyTuning) -> Self {
        Self { tuning }
    }

    /// Obstacle interval at the provided run time.
    #[must_use]
    pub fn obstacle_interval(&self, elapsed: Duration) -> Duration {
        self.tuning.obstacle_interval(elapsed)
    }

    /// Emits the forward speed for the latest time advance in `events`.
    pub fn handle(&self, events: &[Event], score: u64, power: PowerEffect, out: &mut Vec<Command>) {
        let latest = events.iter().rev().find_map(|event| match event {
            Event::TimeAdvanced { now, .. } => Some(*now),
            _ => None,
        });
        if let Some(now) = latest {
            out.push(Command::SetForwardSpeed {
                speed: self.tuning.speed(now, score, power.speed_boosted()),
            });
        }
    }
}
