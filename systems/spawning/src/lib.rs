#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic entity scheduler that keeps obstacles, power-ups and
//! platforms flowing in ahead of the camera and reclaims them behind it.
//!
//! Each entity family owns its own absolute "next spawn" time. The scheduler
//! services every family at most once per tick and, independently, despawns
//! every entity that scrolled behind the camera. The entity view handed to the
//! scheduler is captured after the tick's contacts were drained, so the cleanup
//! pass never races a pickup or collision that is still being resolved.

use std::time::Duration;

use bike_runner_core::{
    CameraView, Command, EntityKind, Event, ObstacleVariant, PowerKind, WorldPoint,
};
use bike_runner_world::query::EntityView;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use thiserror::Error;

/// Slack accepted when checking placements recovered from world coordinates.
/// Inclusive range sampled uniformly.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Span<T> {
    /// Lower bound.
    pub min: T,
    /// Upper bound.
    pub max: T,
}

impl<T> Span<T> {
    /// Creates a new span.
    #[must_use]
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl Span<f32> {
    fn sample(&self, rng: &mut impl Rng) -> f32 {
        let (low, high) = ordered(self.min, self.max);
        rng.gen_range(low..=high)
    }

    fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

impl Span<u64> {
    fn sample(&self, rng: &mut impl Rng) -> u64 {
        let (low, high) = (self.min.min(self.max), self.min.max(self.max));
        rng.gen_range(low..=high)
    }
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Tunables controlling where and how often entities appear.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Run time of the first obstacle.
    pub first_obstacle_delay_ms: u64,
    /// Distance past the camera's right edge at which obstacles appear.
    pub obstacle_offset: Span<f32>,
    /// Distance between the viewport bottom and an obstacle's base.
    pub obstacle_ground_clearance: f32,
    /// Run time after which tall obstacles may appear.
    pub tall_unlock_delay_ms: u64,
    /// Chance that an unlocked obstacle is tall.
    pub tall_probability: f64,
    /// Delay between power-ups; the first one is drawn from the same range.
    pub powerup_gap_ms: Span<u64>,
    /// Distance past the camera's right edge at which power-ups appear.
    pub powerup_offset: Span<f32>,
    /// Height of a power-up's centre above the viewport bottom.
    pub powerup_height: Span<f32>,
    /// Run time of the first platform decision.
    pub first_platform_delay_ms: u64,
    /// Delay between two platform decisions.
    pub platform_gap_ms: Span<u64>,
    /// Chance that a platform decision actually places a platform.
    pub platform_probability: f64,
    /// Distance past the camera's right edge at which platforms appear.
    pub platform_offset: Span<f32>,
    /// Height of a platform above the ground line.
    pub platform_height: Span<f32>,
    /// Horizontal extent of a platform.
    pub platform_width: Span<f32>,
    /// Distance between the viewport bottom and the ground line.
    pub ground_inset: f32,
    /// Distance behind the camera's left edge past which entities are reclaimed.
    pub despawn_margin: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            first_obstacle_delay_ms: 800,
            obstacle_offset: Span::new(80.0, 220.0),
            obstacle_ground_clearance: 70.0,
            tall_unlock_delay_ms: 3_000,
            tall_probability: 0.25,
            powerup_gap_ms: Span::new(5_000, 9_000),
            powerup_offset: Span::new(200.0, 420.0),
            powerup_height: Span::new(120.0, 180.0),
            first_platform_delay_ms: 3_000,
            platform_gap_ms: Span::new(3_000, 6_000),
            platform_probability: 0.3,
            platform_offset: Span::new(100.0, 300.0),
            platform_height: Span::new(80.0, 140.0),
            platform_width: Span::new(100.0, 200.0),
            ground_inset: 40.0,
            despawn_margin: 200.0,
        }
    }
}

impl SpawnTuning {
    /// Reports whether `x` lies strictly behind the reclaim line of `camera`.
    #[must_use]
    pub fn is_behind(&self, camera: &CameraView, x: f32) -> bool {
        x < camera.left() - self.despawn_margin
    }

    /// Rejects values the scheduler cannot sample from.
    pub fn validate(&self) -> Result<(), TuningError> {
        let spans = [
            ("obstacle_offset", self.obstacle_offset),
            ("powerup_offset", self.powerup_offset),
            ("powerup_height", self.powerup_height),
            ("platform_offset", self.platform_offset),
            ("platform_height", self.platform_height),
            ("platform_width", self.platform_width),
        ];
        for (field, span) in spans {
            if !span.is_finite() {
                return Err(TuningError::NonFinite { field });
            }
        }

        let scalars = [
            ("obstacle_ground_clearance", self.obstacle_ground_clearance),
            ("ground_inset", self.ground_inset),
            ("despawn_margin", self.despawn_margin),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(TuningError::NonFinite { field });
            }
        }

        for (field, probability) in [
            ("tall_probability", self.tall_probability),
            ("platform_probability", self.platform_probability),
        ] {
            if probability.is_nan() {
                return Err(TuningError::NonFinite { field });
            }
        }
        Ok(())
    }
}

/// Invalid [`SpawnTuning`] value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TuningError {
    /// A placement or probability value is NaN or infinite.
    #[error("spawning.{field} must be a finite number")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// Configuration parameters required to construct the scheduler.
#[derive(Clone, Debug)]
pub struct Config {
    tuning: SpawnTuning,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided tuning and seed.
    #[must_use]
    pub const fn new(tuning: SpawnTuning, rng_seed: u64) -> Self {
        Self { tuning, rng_seed }
    }
}

/// Absolute run times at which each entity family is next serviced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnCursor {
    /// Next obstacle spawn.
    pub next_obstacle_at: Duration,
    /// Next power-up spawn.
    pub next_powerup_at: Duration,
    /// Next platform decision.
    pub next_platform_at: Duration,
}

/// Pure system that emits spawn and despawn commands.
#[derive(Debug)]
pub struct EntityScheduler {
    tuning: SpawnTuning,
    rng: ChaCha8Rng,
    cursor: SpawnCursor,
}

impl EntityScheduler {
    /// Creates a scheduler whose cursor is positioned for a run starting at time zero.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let Config { tuning, rng_seed } = config;
        let mut rng = ChaCha8Rng::seed_from_u64(rng_seed);
        let cursor = SpawnCursor {
            next_obstacle_at: Duration::from_millis(tuning.first_obstacle_delay_ms),
            next_powerup_at: Duration::from_millis(tuning.powerup_gap_ms.sample(&mut rng)),
            next_platform_at: Duration::from_millis(tuning.first_platform_delay_ms),
        };
        Self {
            tuning,
            rng,
            cursor,
        }
    }

    /// Current spawn cursor.
    #[must_use]
    pub fn cursor(&self) -> SpawnCursor {
        self.cursor
    }

    /// Consumes the tick's events and read-only views to emit spawn and cleanup commands.
    ///
    /// `obstacle_interval` is the delay to the next obstacle should one spawn this tick.
    pub fn handle(
        &mut self,
        events: &[Event],
        camera: CameraView,
        obstacle_interval: Duration,
        entities: &EntityView,
        out: &mut Vec<Command>,
    ) {
        let Some(now) = latest_time(events) else {
            return;
        };

        if now >= self.cursor.next_obstacle_at {
            let command = self.spawn_obstacle(now, &camera);
            out.push(command);
            self.cursor.next_obstacle_at = now.saturating_add(obstacle_interval);
        }

        if now >= self.cursor.next_powerup_at {
            let command = self.spawn_powerup(&camera);
            out.push(command);
            let gap = self.tuning.powerup_gap_ms.sample(&mut self.rng);
            self.cursor.next_powerup_at = now.saturating_add(Duration::from_millis(gap));
        }

        if now >= self.cursor.next_platform_at {
            let probability = self.tuning.platform_probability.clamp(0.0, 1.0);
            if self.rng.gen_bool(probability) {
                let command = self.spawn_platform(&camera);
                out.push(command);
            }
            let gap = self.tuning.platform_gap_ms.sample(&mut self.rng);
            self.cursor.next_platform_at = now.saturating_add(Duration::from_millis(gap));
        }

        for entity in entities.iter() {
            if self.tuning.is_behind(&camera, entity.position.x) {
                out.push(Command::DespawnEntity { entity: entity.id });
            }
        }
    }

    fn spawn_obstacle(&mut self, now: Duration, camera: &CameraView) -> Command {
        let x = camera.right() + self.tuning.obstacle_offset.sample(&mut self.rng);
        let y = camera.height - self.tuning.obstacle_ground_clearance;
        let tall_unlocked = now > Duration::from_millis(self.tuning.tall_unlock_delay_ms);
        let tall_probability = self.tuning.tall_probability.clamp(0.0, 1.0);
        let variant = if tall_unlocked && self.rng.gen_bool(tall_probability) {
            ObstacleVariant::Tall
        } else {
            ObstacleVariant::Short
        };
        Command::SpawnEntity {
            kind: EntityKind::Obstacle(variant),
            position: WorldPoint::new(x, y),
        }
    }

    fn spawn_powerup(&mut self, camera: &CameraView) -> Command {
        let x = camera.right() + self.tuning.powerup_offset.sample(&mut self.rng);
        let y = camera.height - self.tuning.powerup_height.sample(&mut self.rng);
        let kind = PowerKind::ALL[self.rng.gen_range(0..PowerKind::ALL.len())];
        Command::SpawnEntity {
            kind: EntityKind::PowerUp(kind),
            position: WorldPoint::new(x, y),
        }
    }

    fn spawn_platform(&mut self, camera: &CameraView) -> Command {
        let x = camera.right() + self.tuning.platform_offset.sample(&mut self.rng);
        let ground = camera.height - self.tuning.ground_inset;
        let y = ground - self.tuning.platform_height.sample(&mut self.rng);
        let width = self.tuning.platform_width.sample(&mut self.rng);
        Command::SpawnEntity {
            kind: EntityKind::Platform { width },
            position: WorldPoint::new(x, y),
        }
    }
}

fn latest_time(events: &[Event]) -> Option<Duration> {
    events.iter().rev().find_map(|event| match event {
        Event::TimeAdvanced { now, .. } => Some(*now),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_spans_still_sample_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let span = Span::new(10.0_f32, 5.0);
        for _ in 0..64 {
            let value = span.sample(&mut rng);
            assert!((5.0..=10.0).contains(&value));
        }
    }

    #[test]
    fn non_finite_tuning_is_rejected() {
        assert_eq!(SpawnTuning::default().validate(), Ok(()));

        let tuning = SpawnTuning {
            powerup_height: Span::new(120.0, f32::NAN),
            ..SpawnTuning::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::NonFinite {
                field: "powerup_height"
            })
        );

        let tuning = SpawnTuning {
            platform_probability: f64::NAN,
            ..SpawnTuning::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::NonFinite {
                field: "platform_probability"
            })
        );
    }

    #[test]
    fn degenerate_span_returns_its_bound() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(Span::new(42_u64, 42).sample(&mut rng), 42);
    }

    #[test]
    fn first_powerup_falls_inside_gap_range() {
        for seed in 0..32 {
            let scheduler = EntityScheduler::new(Config::new(SpawnTuning::default(), seed));
            let first = scheduler.cursor().next_powerup_at;
            assert!(first >= Duration::from_millis(5_000));
            assert!(first <= Duration::from_millis(9_000));
        }
    }

    #[test]
    fn reclaim_line_is_strict() {
        let tuning = SpawnTuning::default();
        let camera = CameraView::new(1_000.0, 800.0, 450.0);
        assert!(!tuning.is_behind(&camera, 800.0));
        assert!(tuning.is_behind(&camera, 799.5));
    }
}
