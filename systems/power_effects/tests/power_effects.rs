use std::time::Duration;

use bike_runner_core::{
    Command, Contact, EntityId, EntityKind, Event, ObstacleVariant, PlayerSnapshot, PowerEffect,
    PowerKind, RunPhase, WorldPoint,
};
use bike_runner_system_power::{PowerEffects, PowerTuning};
use bike_runner_world::{self as world, query, World};

const FRAME: Duration = Duration::from_millis(16);

struct Harness {
    world: World,
    power: PowerEffects,
    player: PlayerSnapshot,
}

impl Harness {
    fn new() -> Self {
        Self {
            world: World::new(),
            power: PowerEffects::default(),
            player: PlayerSnapshot {
                position: WorldPoint::new(100.0, 300.0),
                velocity_y: 0.0,
                grounded: true,
            },
        }
    }

    fn spawn(&mut self, kind: EntityKind, position: WorldPoint) -> EntityId {
        let mut events = Vec::new();
        world::apply(
            &mut self.world,
            Command::SpawnEntity { kind, position },
            &mut events,
        );
        match events.as_slice() {
            [Event::EntitySpawned { entity, .. }] => *entity,
            other => panic!("unexpected events: {other:?}"),
        }
    }

    /// Advances one tick, draining the provided contacts before the power system runs.
    fn tick(&mut self, dt: Duration, contacts: &[Contact]) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::Tick { dt }, &mut events);
        for contact in contacts {
            world::apply(
                &mut self.world,
                Command::ReportContact { contact: *contact },
                &mut events,
            );
        }
        world::apply(&mut self.world, Command::DrainContacts, &mut events);

        let mut commands = Vec::new();
        self.power.handle(
            &events,
            query::power_effect(&self.world),
            self.player,
            &query::entity_view(&self.world),
            &mut commands,
        );
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }
        events
    }

    fn collect(&mut self, kind: PowerKind) -> Vec<Event> {
        let id = self.spawn(EntityKind::PowerUp(kind), WorldPoint::new(1_000.0, 300.0));
        self.tick(FRAME, &[Contact::PowerUp(id)])
    }

    fn effect(&self) -> PowerEffect {
        query::power_effect(&self.world)
    }
}

fn count(events: &[Event], predicate: impl Fn(&Event) -> bool) -> usize {
    events.iter().filter(|event| predicate(event)).count()
}

#[test]
fn newer_pickup_replaces_timed_effect() {
    let mut harness = Harness::new();
    let _ = harness.collect(PowerKind::SpeedBoost);
    assert!(harness.effect().speed_boosted());

    let events = harness.collect(PowerKind::DoublePoints);
    let effect = harness.effect();
    assert_eq!(effect.active_kind(), Some(PowerKind::DoublePoints));
    assert!(!effect.speed_boosted(), "speed boost must be fully reverted");
    assert!((effect.score_multiplier() - 2.0).abs() < f64::EPSILON);
    assert_eq!(
        count(&events, |event| matches!(event, Event::PowerActivated { .. })),
        1
    );
}

#[test]
fn shield_ignores_every_other_pickup() {
    let mut harness = Harness::new();
    let _ = harness.collect(PowerKind::Shield);

    for kind in PowerKind::ALL {
        let events = harness.collect(kind);
        assert_eq!(harness.effect(), PowerEffect::Shield);
        assert_eq!(
            count(&events, |event| matches!(event, Event::PowerActivated { .. })),
            0,
            "{kind:?} must not activate while shielded",
        );
        assert_eq!(
            count(&events, |event| matches!(event, Event::PowerUpCollected { .. })),
            1,
            "the pickup is still removed from the world",
        );
    }
    assert!(query::entity_view(&harness.world).is_empty());
}

#[test]
fn shield_absorbs_one_obstacle() {
    let mut harness = Harness::new();
    let _ = harness.collect(PowerKind::Shield);
    let obstacle = harness.spawn(
        EntityKind::Obstacle(ObstacleVariant::Short),
        WorldPoint::new(120.0, 380.0),
    );

    let events = harness.tick(FRAME, &[Contact::Obstacle(obstacle)]);
    assert!(events.contains(&Event::ShieldSpent { obstacle }));
    assert_eq!(harness.effect(), PowerEffect::Idle);
    assert_eq!(query::phase(&harness.world), RunPhase::Running);
    assert!(query::entity_view(&harness.world).is_empty());
}

#[test]
fn second_hit_in_same_drain_ends_shielded_run() {
    let mut harness = Harness::new();
    let _ = harness.collect(PowerKind::Shield);
    let first = harness.spawn(
        EntityKind::Obstacle(ObstacleVariant::Short),
        WorldPoint::new(120.0, 380.0),
    );
    let second = harness.spawn(
        EntityKind::Obstacle(ObstacleVariant::Tall),
        WorldPoint::new(130.0, 380.0),
    );

    let events = harness.tick(
        FRAME,
        &[Contact::Obstacle(first), Contact::Obstacle(second)],
    );
    assert!(events.contains(&Event::ShieldSpent { obstacle: first }));
    assert_eq!(
        count(&events, |event| matches!(event, Event::RunEnded { .. })),
        1
    );
    assert_eq!(query::phase(&harness.world), RunPhase::Over);
}

#[test]
fn obstacle_during_jump_boost_ends_run_once() {
    let mut harness = Harness::new();
    let _ = harness.collect(PowerKind::JumpBoost);
    let _ = harness.tick(Duration::from_millis(1_000), &[]);
    assert!(harness.effect().jump_velocity_scale() > 1.0);

    let first = harness.spawn(
        EntityKind::Obstacle(ObstacleVariant::Short),
        WorldPoint::new(120.0, 380.0),
    );
    let second = harness.spawn(
        EntityKind::Obstacle(ObstacleVariant::Short),
        WorldPoint::new(140.0, 380.0),
    );
    let mut events = harness.tick(
        FRAME,
        &[
            Contact::Obstacle(first),
            Contact::Obstacle(second),
            Contact::Obstacle(first),
        ],
    );
    events.extend(harness.tick(FRAME, &[Contact::Obstacle(second)]));

    assert_eq!(
        count(&events, |event| matches!(event, Event::RunEnded { .. })),
        1
    );
    assert_eq!(query::phase(&harness.world), RunPhase::Over);
}

#[test]
fn timed_effect_expires_at_its_end_time() {
    let mut harness = Harness::new();
    let _ = harness.collect(PowerKind::SpeedBoost);
    let ends_at = harness
        .effect()
        .ends_at()
        .expect("speed boost is timed");

    while query::now(&harness.world) + FRAME < ends_at {
        let events = harness.tick(FRAME, &[]);
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::PowerExpired { .. })));
    }

    let remaining = ends_at - query::now(&harness.world);
    let events = harness.tick(remaining, &[]);
    assert!(events.contains(&Event::PowerExpired {
        kind: PowerKind::SpeedBoost
    }));
    assert_eq!(harness.effect(), PowerEffect::Idle);
}

#[test]
fn magnet_pulls_nearby_power_ups_without_overshooting() {
    let mut harness = Harness::new();
    let _ = harness.collect(PowerKind::Magnet);
    let near = harness.spawn(
        EntityKind::PowerUp(PowerKind::Shield),
        WorldPoint::new(200.0, 300.0),
    );
    let far = harness.spawn(
        EntityKind::PowerUp(PowerKind::Shield),
        WorldPoint::new(400.0, 300.0),
    );
    let close = harness.spawn(
        EntityKind::PowerUp(PowerKind::Shield),
        WorldPoint::new(103.0, 300.0),
    );

    let _ = harness.tick(Duration::from_millis(100), &[]);

    let positions: Vec<(EntityId, WorldPoint)> = query::entity_view(&harness.world)
        .iter()
        .map(|entity| (entity.id, entity.position))
        .collect();
    let position_of = |id: EntityId| {
        positions
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, position)| *position)
            .expect("entity still alive")
    };

    assert!((position_of(near).x - 160.0).abs() < 1e-3, "40 units per 100ms");
    assert_eq!(position_of(far), WorldPoint::new(400.0, 300.0));
    assert_eq!(position_of(close), harness.player.position);
}

#[test]
fn magnet_pull_is_frame_rate_independent() {
    let run = |frames: u32, dt: Duration| {
        let mut harness = Harness::new();
        let _ = harness.collect(PowerKind::Magnet);
        let id = harness.spawn(
            EntityKind::PowerUp(PowerKind::JumpBoost),
            WorldPoint::new(220.0, 300.0),
        );
        for _ in 0..frames {
            let _ = harness.tick(dt, &[]);
        }
        query::entity_view(&harness.world)
            .iter()
            .find(|entity| entity.id == id)
            .map(|entity| entity.position.x)
            .expect("power-up still alive")
    };

    let coarse = run(5, Duration::from_millis(40));
    let fine = run(20, Duration::from_millis(10));
    assert!((coarse - fine).abs() < 1e-2, "{coarse} vs {fine}");
}

#[test]
fn magnet_radius_is_tunable() {
    let mut harness = Harness::new();
    harness.power = PowerEffects::new(PowerTuning {
        magnet_radius: 500.0,
        ..PowerTuning::default()
    });
    let _ = harness.collect(PowerKind::Magnet);
    let id = harness.spawn(
        EntityKind::PowerUp(PowerKind::Magnet),
        WorldPoint::new(400.0, 300.0),
    );

    let events = harness.tick(FRAME, &[]);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::EntityMoved { entity, .. } if *entity == id)));
}
