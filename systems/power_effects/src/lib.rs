#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Power-up effect system.
//!
//! Reacts to drained pickups and obstacle hits, expires timed effects by
//! polling their end time, and pulls nearby power-ups toward the player while
//! the magnet is active. The world owns the effect itself; this system only
//! decides which transitions to request.

use std::{collections::HashSet, time::Duration};

use bike_runner_core::{Command, Event, PlayerSnapshot, PowerEffect, WorldPoint};
use bike_runner_world::query::EntityView;
use serde::Deserialize;
use tracing::debug;

/// Tunables for the magnet pull.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PowerTuning {
    /// Power-ups closer than this distance to the player are pulled in.
    pub magnet_radius: f32,
    /// Distance per second a pulled power-up travels toward the player.
    pub magnet_closing_speed: f32,
}

impl Default for PowerTuning {
    fn default() -> Self {
        Self {
            magnet_radius: 150.0,
            magnet_closing_speed: 400.0,
        }
    }
}

/// Pure system that drives power-up effect transitions.
#[derive(Debug, Default)]
pub struct PowerEffects {
    tuning: PowerTuning,
}

impl PowerEffects {
    /// Creates a new power effect system using the provided tuning.
    #[must_use]
    pub fn new(tuning: PowerTuning) -> Self {
        Self { tuning }
    }

    /// Consumes the tick's events together with the current effect, the player
    /// body and the live entities to emit power commands.
    ///
    /// Transitions are simulated locally so several pickups or hits drained in
    /// the same tick resolve in order: a shield absorbs the first obstacle hit
    /// and any later hit ends the run. The run is ended at most once.
    pub fn handle(
        &self,
        events: &[Event],
        power: PowerEffect,
        player: PlayerSnapshot,
        entities: &EntityView,
        out: &mut Vec<Command>,
    ) {
        let clock = latest_time(events);
        let now = clock.map_or(Duration::ZERO, |(now, _)| now);
        let mut effect = power;

        if clock.is_some() && effect.is_expired(now) {
            out.push(Command::ExpirePower);
            effect = PowerEffect::Idle;
        }

        let mut hits = HashSet::new();
        let mut run_ended = false;
        for event in events {
            match event {
                Event::PowerUpCollected { entity, kind } => {
                    if effect.shield_active() {
                        debug!(entity = entity.get(), ?kind, "pickup absorbed by shield");
                        continue;
                    }
                    out.push(Command::ActivatePower { kind: *kind });
                    effect = PowerEffect::activated(*kind, now);
                }
                Event::ObstacleHit { entity } => {
                    if run_ended || !hits.insert(*entity) {
                        continue;
                    }
                    if effect.shield_active() {
                        out.push(Command::ConsumeShield { obstacle: *entity });
                        effect = PowerEffect::Idle;
                    } else {
                        debug!(entity = entity.get(), "obstacle hit ends run");
                        out.push(Command::EndRun);
                        run_ended = true;
                    }
                }
                Event::RunEnded { .. } => run_ended = true,
                _ => {}
            }
        }

        if run_ended || !effect.magnet_active() {
            return;
        }
        if let Some((_, dt)) = clock {
            self.pull_power_ups(player.position, dt, entities, out);
        }
    }

    fn pull_power_ups(
        &self,
        target: WorldPoint,
        dt: Duration,
        entities: &EntityView,
        out: &mut Vec<Command>,
    ) {
        let step = self.tuning.magnet_closing_speed * dt.as_secs_f32();
        if step <= 0.0 {
            return;
        }

        for entity in entities.iter().filter(|entity| entity.kind.is_power_up()) {
            let distance = entity.position.distance(target);
            if distance >= self.tuning.magnet_radius {
                continue;
            }
            out.push(Command::MoveEntity {
                entity: entity.id,
                position: approach(entity.position, target, step, distance),
            });
        }
    }
}

/// Moves `from` toward `to` by `step` without overshooting.
fn approach(from: WorldPoint, to: WorldPoint, step: f32, distance: f32) -> WorldPoint {
    if distance <= step || distance <= f32::EPSILON {
        return to;
    }
    let scale = step / distance;
    WorldPoint::new(
        from.x + (to.x - from.x) * scale,
        from.y + (to.y - from.y) * scale,
    )
}

fn latest_time(events: &[Event]) -> Option<(Duration, Duration)> {
    events.iter().rev().find_map(|event| match event {
        Event::TimeAdvanced { now, dt } => Some((*now, *dt)),
        _ => None,
    })
}
