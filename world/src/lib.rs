#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative per-run state for the bike runner.
//!
//! A [`World`] holds everything a single run owns: the run clock, score,
//! forward speed, the entities placed ahead of the camera, the active power-up
//! effect, the biome stage and the queue of contacts waiting to be resolved.
//! It is never reset piecemeal; restarting a run constructs a new world.

use std::{collections::VecDeque, time::Duration};

use bike_runner_core::{
    Biome, CameraView, Command, Contact, DespawnReason, EntityId, EntityKind, Event,
    PlayerSnapshot, PowerEffect, RunPhase, WorldPoint,
};
use serde::Deserialize;
use tracing::debug;

/// Tunables owned by the world.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Score awarded per world unit travelled before multipliers.
    pub score_per_distance: f64,
    /// Biome active when the run starts; follows the first entry of the biome sequence.
    #[serde(skip)]
    pub initial_biome: Biome,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            score_per_distance: 0.1,
            initial_biome: Biome::Desert,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Entity {
    id: EntityId,
    kind: EntityKind,
    position: WorldPoint,
}

/// Represents the authoritative state of one run.
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    phase: RunPhase,
    started: bool,
    now: Duration,
    score: u64,
    distance_score: f64,
    last_player_x: Option<f32>,
    forward_speed: f32,
    fall_gravity: f32,
    player: PlayerSnapshot,
    camera: CameraView,
    entities: Vec<Entity>,
    next_entity_id: u32,
    pending_contacts: VecDeque<Contact>,
    power: PowerEffect,
    biome: Biome,
    biome_stage: u64,
}

impl World {
    /// Creates a new world using the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Creates a new world using the provided configuration.
    #[must_use]
    pub fn with_config(config: WorldConfig) -> Self {
        let biome = config.initial_biome;
        Self {
            config,
            phase: RunPhase::Running,
            started: false,
            now: Duration::ZERO,
            score: 0,
            distance_score: 0.0,
            last_player_x: None,
            forward_speed: 0.0,
            fall_gravity: 0.0,
            player: PlayerSnapshot::default(),
            camera: CameraView::default(),
            entities: Vec::new(),
            next_entity_id: 0,
            pending_contacts: VecDeque::new(),
            power: PowerEffect::Idle,
            biome,
            biome_stage: 0,
        }
    }

    fn entity_index(&self, entity: EntityId) -> Option<usize> {
        self.entities
            .binary_search_by_key(&entity, |candidate| candidate.id)
            .ok()
    }

    fn remove_entity(&mut self, entity: EntityId) -> Option<Entity> {
        self.entity_index(entity)
            .map(|index| self.entities.remove(index))
    }

    fn observe_player(&mut self, player: PlayerSnapshot, out_events: &mut Vec<Event>) {
        let x = player.position.x;
        if let Some(last_x) = self.last_player_x {
            let travelled = f64::from(x - last_x);
            if travelled > 0.0 {
                self.distance_score +=
                    travelled * self.config.score_per_distance * self.power.score_multiplier();
            }
        }
        self.last_player_x = Some(x);
        self.player = player;

        let score = self.distance_score.floor() as u64;
        if score > self.score {
            self.score = score;
            out_events.push(Event::ScoreChanged { score });
        }
    }

    fn drain_contacts(&mut self, out_events: &mut Vec<Event>) {
        while let Some(contact) = self.pending_contacts.pop_front() {
            match contact {
                Contact::PowerUp(entity) => {
                    let Some(index) = self.entity_index(entity) else {
                        continue;
                    };
                    let EntityKind::PowerUp(kind) = self.entities[index].kind else {
                        continue;
                    };
                    let removed = self.entities.remove(index);
                    out_events.push(Event::EntityDespawned {
                        entity,
                        kind: removed.kind,
                        reason: DespawnReason::Collected,
                    });
                    out_events.push(Event::PowerUpCollected { entity, kind });
                }
                Contact::Obstacle(entity) => {
                    let is_obstacle = self
                        .entity_index(entity)
                        .is_some_and(|index| {
                            matches!(self.entities[index].kind, EntityKind::Obstacle(_))
                        });
                    if is_obstacle {
                        out_events.push(Event::ObstacleHit { entity });
                    }
                }
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once the run is over every command is ignored; a new run requires a new world.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.phase == RunPhase::Over {
        return;
    }

    match command {
        Command::BeginRun => {
            if !world.started {
                world.started = true;
                out_events.push(Event::RunStarted);
            }
        }
        Command::Tick { dt } => {
            world.now = world.now.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { now: world.now, dt });
        }
        Command::ObservePlayer { player, camera } => {
            world.camera = camera;
            world.observe_player(player, out_events);
        }
        Command::ReportContact { contact } => {
            if !world.pending_contacts.contains(&contact) {
                world.pending_contacts.push_back(contact);
            }
        }
        Command::DrainContacts => world.drain_contacts(out_events),
        Command::SetForwardSpeed { speed } => {
            if (speed - world.forward_speed).abs() > f32::EPSILON {
                world.forward_speed = speed;
                out_events.push(Event::ForwardSpeedChanged { speed });
            }
        }
        Command::LaunchJump { velocity } => out_events.push(Event::JumpFired { velocity }),
        Command::CutJump { velocity } => out_events.push(Event::JumpCut { velocity }),
        Command::SetFallGravity { boost } => {
            if (boost - world.fall_gravity).abs() > f32::EPSILON {
                world.fall_gravity = boost;
                out_events.push(Event::FallGravityChanged { boost });
            }
        }
        Command::StartFastFall { velocity } => {
            out_events.push(Event::FastFallStarted { velocity });
        }
        Command::SpawnEntity { kind, position } => {
            let entity = EntityId::new(world.next_entity_id);
            world.next_entity_id = world.next_entity_id.saturating_add(1);
            world.entities.push(Entity {
                id: entity,
                kind,
                position,
            });
            out_events.push(Event::EntitySpawned {
                entity,
                kind,
                position,
            });
        }
        Command::MoveEntity { entity, position } => {
            if let Some(index) = world.entity_index(entity) {
                world.entities[index].position = position;
                out_events.push(Event::EntityMoved { entity, position });
            }
        }
        Command::DespawnEntity { entity } => {
            if let Some(removed) = world.remove_entity(entity) {
                out_events.push(Event::EntityDespawned {
                    entity,
                    kind: removed.kind,
                    reason: DespawnReason::BehindCamera,
                });
            }
        }
        Command::ActivatePower { kind } => {
            if world.power.shield_active() {
                return;
            }
            let previous = world.power.active_kind();
            world.power = PowerEffect::activated(kind, world.now);
            debug!(?kind, ?previous, now = ?world.now, "power activated");
            out_events.push(Event::PowerActivated {
                kind,
                ends_at: world.power.ends_at(),
            });
        }
        Command::ExpirePower => {
            if let PowerEffect::Timed { power, .. } = world.power {
                world.power = PowerEffect::Idle;
                debug!(kind = ?power.kind(), now = ?world.now, "power expired");
                out_events.push(Event::PowerExpired { kind: power.kind() });
            }
        }
        Command::ConsumeShield { obstacle } => {
            if !world.power.shield_active() {
                return;
            }
            world.power = PowerEffect::Idle;
            if let Some(removed) = world.remove_entity(obstacle) {
                out_events.push(Event::EntityDespawned {
                    entity: obstacle,
                    kind: removed.kind,
                    reason: DespawnReason::ShieldImpact,
                });
            }
            debug!(obstacle = obstacle.get(), "shield spent");
            out_events.push(Event::ShieldSpent { obstacle });
        }
        Command::EnterBiome { stage, biome } => {
            if stage <= world.biome_stage {
                return;
            }
            world.biome_stage = stage;
            let from = world.biome;
            if from != biome {
                world.biome = biome;
                debug!(?from, to = ?biome, stage, "biome changed");
                out_events.push(Event::BiomeChanged {
                    from,
                    to: biome,
                    stage,
                });
            }
        }
        Command::EndRun => {
            world.phase = RunPhase::Over;
            world.pending_contacts.clear();
            out_events.push(Event::RunEnded { score: world.score });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use bike_runner_core::{
        Biome, CameraView, EntityId, EntityKind, PlayerSnapshot, PowerEffect, RunPhase,
        WorldPoint,
    };

    /// Current phase of the run.
    #[must_use]
    pub fn phase(world: &World) -> RunPhase {
        world.phase
    }

    /// Run time elapsed since the run started.
    #[must_use]
    pub fn now(world: &World) -> Duration {
        world.now
    }

    /// Current integer score.
    #[must_use]
    pub fn score(world: &World) -> u64 {
        world.score
    }

    /// Current forward speed.
    #[must_use]
    pub fn forward_speed(world: &World) -> f32 {
        world.forward_speed
    }

    /// Extra gravity currently applied to the player body.
    #[must_use]
    pub fn fall_gravity(world: &World) -> f32 {
        world.fall_gravity
    }

    /// Latest player body snapshot.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        world.player
    }

    /// Latest camera placement.
    #[must_use]
    pub fn camera(world: &World) -> CameraView {
        world.camera
    }

    /// Active power-up effect.
    #[must_use]
    pub fn power_effect(world: &World) -> PowerEffect {
        world.power
    }

    /// Active biome.
    #[must_use]
    pub fn biome(world: &World) -> Biome {
        world.biome
    }

    /// Number of biome thresholds crossed so far.
    #[must_use]
    pub fn biome_stage(world: &World) -> u64 {
        world.biome_stage
    }

    /// Number of contacts waiting for the next drain.
    #[must_use]
    pub fn pending_contacts(world: &World) -> usize {
        world.pending_contacts.len()
    }

    /// Captures a read-only view of the live entities ordered by identifier.
    #[must_use]
    pub fn entity_view(world: &World) -> EntityView {
        EntityView {
            snapshots: world
                .entities
                .iter()
                .map(|entity| EntitySnapshot {
                    id: entity.id,
                    kind: entity.kind,
                    position: entity.position,
                })
                .collect(),
        }
    }

    /// Read-only snapshot describing all live entities.
    #[derive(Clone, Debug, Default)]
    pub struct EntityView {
        snapshots: Vec<EntitySnapshot>,
    }

    impl EntityView {
        /// Iterator over the captured snapshots in identifier order.
        pub fn iter(&self) -> impl Iterator<Item = &EntitySnapshot> {
            self.snapshots.iter()
        }

        /// Number of live entities.
        #[must_use]
        pub fn len(&self) -> usize {
            self.snapshots.len()
        }

        /// Reports whether no entity is alive.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.snapshots.is_empty()
        }
    }

    /// Immutable representation of a single entity.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct EntitySnapshot {
        /// Unique identifier assigned to the entity.
        pub id: EntityId,
        /// Kind of the entity.
        pub kind: EntityKind,
        /// Anchor position of the entity.
        pub position: WorldPoint,
    }
}
