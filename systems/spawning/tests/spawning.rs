use std::time::Duration;

use bike_runner_core::{CameraView, Command, EntityKind, Event, ObstacleVariant, WorldPoint};
use bike_runner_system_spawning::{Config, EntityScheduler, SpawnTuning, Span};
use bike_runner_world::{self as world, query, World};

const FRAME: Duration = Duration::from_millis(16);
const INTERVAL: Duration = Duration::from_millis(1_000);
const TOLERANCE: f32 = 0.01;

fn scheduler(seed: u64) -> EntityScheduler {
    EntityScheduler::new(Config::new(SpawnTuning::default(), seed))
}

fn spawns(commands: &[Command]) -> Vec<(EntityKind, WorldPoint)> {
    commands
        .iter()
        .filter_map(|command| match command {
            Command::SpawnEntity { kind, position } => Some((*kind, *position)),
            _ => None,
        })
        .collect()
}

fn within(span: Span<f32>, value: f32) -> bool {
    let (low, high) = (span.min.min(span.max), span.min.max(span.max));
    (low - TOLERANCE..=high + TOLERANCE).contains(&value)
}

/// Reports whether `tuning` can produce `kind` at `position` for `camera`.
fn admits(
    tuning: &SpawnTuning,
    kind: EntityKind,
    position: WorldPoint,
    camera: CameraView,
) -> bool {
    let ahead = position.x - camera.right();
    match kind {
        EntityKind::Obstacle(_) => {
            within(tuning.obstacle_offset, ahead)
                && (position.y - (camera.height - tuning.obstacle_ground_clearance)).abs()
                    <= TOLERANCE
        }
        EntityKind::PowerUp(_) => {
            within(tuning.powerup_offset, ahead)
                && within(tuning.powerup_height, camera.height - position.y)
        }
        EntityKind::Platform { width } => {
            let ground = camera.height - tuning.ground_inset;
            within(tuning.platform_offset, ahead)
                && within(tuning.platform_height, ground - position.y)
                && within(tuning.platform_width, width)
        }
    }
}

/// Drives a world and scheduler for `frames` ticks while the camera scrolls at
/// `scroll_per_frame`, returning every event the world produced.
fn replay(seed: u64, frames: u32, scroll_per_frame: f32) -> Vec<Event> {
    let mut world = World::new();
    let mut scheduler = scheduler(seed);
    let mut log = Vec::new();

    for frame in 0..frames {
        let camera = CameraView::new(frame as f32 * scroll_per_frame, 800.0, 450.0);
        let mut events = Vec::new();
        world::apply(&mut world, Command::Tick { dt: FRAME }, &mut events);

        let mut commands = Vec::new();
        scheduler.handle(
            &events,
            camera,
            INTERVAL,
            &query::entity_view(&world),
            &mut commands,
        );
        for command in commands {
            world::apply(&mut world, command, &mut events);
        }
        log.extend(events);
    }

    log
}

#[test]
fn first_obstacle_waits_for_its_delay() {
    let mut scheduler = scheduler(3);
    let view = query::entity_view(&World::new());
    let camera = CameraView::default();

    let mut commands = Vec::new();
    scheduler.handle(
        &[Event::TimeAdvanced {
            now: Duration::from_millis(799),
            dt: FRAME,
        }],
        camera,
        INTERVAL,
        &view,
        &mut commands,
    );
    assert!(spawns(&commands).is_empty(), "no obstacle before 800ms");

    scheduler.handle(
        &[Event::TimeAdvanced {
            now: Duration::from_millis(800),
            dt: FRAME,
        }],
        camera,
        INTERVAL,
        &view,
        &mut commands,
    );
    let spawned = spawns(&commands);
    assert_eq!(spawned.len(), 1);
    assert_eq!(spawned[0].0, EntityKind::Obstacle(ObstacleVariant::Short));
    assert_eq!(
        scheduler.cursor().next_obstacle_at,
        Duration::from_millis(1_800)
    );
}

#[test]
fn large_time_steps_spawn_once_per_family() {
    let mut scheduler = scheduler(11);
    let mut commands = Vec::new();
    scheduler.handle(
        &[Event::TimeAdvanced {
            now: Duration::from_secs(60),
            dt: Duration::from_secs(60),
        }],
        CameraView::default(),
        INTERVAL,
        &query::entity_view(&World::new()),
        &mut commands,
    );

    let obstacles = spawns(&commands)
        .iter()
        .filter(|(kind, _)| matches!(kind, EntityKind::Obstacle(_)))
        .count();
    let powerups = spawns(&commands)
        .iter()
        .filter(|(kind, _)| kind.is_power_up())
        .count();
    assert_eq!(obstacles, 1);
    assert_eq!(powerups, 1);

    let cursor = scheduler.cursor();
    assert!(cursor.next_obstacle_at >= Duration::from_secs(60));
    assert!(cursor.next_powerup_at >= Duration::from_secs(60));
    assert!(cursor.next_platform_at >= Duration::from_secs(60));
}

#[test]
fn placements_stay_inside_their_bands() {
    let tuning = SpawnTuning::default();
    let mut world = World::new();
    let mut scheduler = scheduler(0xdead_beef);

    for frame in 0..5_000_u32 {
        let camera = CameraView::new(frame as f32 * 4.0, 800.0, 450.0);
        let mut events = Vec::new();
        world::apply(&mut world, Command::Tick { dt: FRAME }, &mut events);
        let mut commands = Vec::new();
        scheduler.handle(
            &events,
            camera,
            INTERVAL,
            &query::entity_view(&world),
            &mut commands,
        );

        for (kind, position) in spawns(&commands) {
            assert!(
                admits(&tuning, kind, position, camera),
                "{kind:?} placed out of band at {position:?}",
            );
            if kind == EntityKind::Obstacle(ObstacleVariant::Tall) {
                assert!(query::now(&world) > Duration::from_millis(3_000));
            }
        }
        for command in commands {
            world::apply(&mut world, command, &mut events);
        }
    }
}

#[test]
fn platforms_are_occasional() {
    let events = replay(21, 20_000, 4.0);
    let decisions = 20_000.0 * 16.0 / 4_500.0;
    let platforms = events
        .iter()
        .filter(|event| {
            matches!(
                event,
                Event::EntitySpawned {
                    kind: EntityKind::Platform { .. },
                    ..
                }
            )
        })
        .count() as f32;

    assert!(platforms > 0.0, "some platforms appear over five minutes");
    assert!(
        platforms < decisions,
        "platforms must not appear at every decision"
    );
}

#[test]
fn cleanup_reclaims_entities_behind_the_camera() {
    let mut world = World::new();
    let mut events = Vec::new();
    for x in [0.0_f32, 799.0, 800.0, 1_500.0] {
        world::apply(
            &mut world,
            Command::SpawnEntity {
                kind: EntityKind::Obstacle(ObstacleVariant::Short),
                position: WorldPoint::new(x, 380.0),
            },
            &mut events,
        );
    }

    let tuning = SpawnTuning {
        first_obstacle_delay_ms: 60_000,
        powerup_gap_ms: Span::new(60_000, 60_000),
        first_platform_delay_ms: 60_000,
        ..SpawnTuning::default()
    };
    let mut scheduler = EntityScheduler::new(Config::new(tuning, 5));
    let mut commands = Vec::new();
    scheduler.handle(
        &[Event::TimeAdvanced {
            now: Duration::from_millis(16),
            dt: FRAME,
        }],
        CameraView::new(1_000.0, 800.0, 450.0),
        INTERVAL,
        &query::entity_view(&world),
        &mut commands,
    );

    assert_eq!(commands.len(), 2, "only entities left of x=800 are reclaimed");
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }
    let remaining: Vec<f32> = query::entity_view(&world)
        .iter()
        .map(|entity| entity.position.x)
        .collect();
    assert_eq!(remaining, vec![800.0, 1_500.0]);
}

#[test]
fn entities_do_not_accumulate_while_scrolling() {
    let events = replay(99, 30_000, 4.0);
    let spawned = events
        .iter()
        .filter(|event| matches!(event, Event::EntitySpawned { .. }))
        .count();
    let despawned = events
        .iter()
        .filter(|event| matches!(event, Event::EntityDespawned { .. }))
        .count();

    assert!(spawned > 100);
    assert!(
        spawned - despawned < 20,
        "live entity count must stay bounded ({spawned} spawned, {despawned} reclaimed)",
    );
}

#[test]
fn identical_seeds_replay_identically() {
    let first = replay(0x1234_5678, 2_000, 5.0);
    let second = replay(0x1234_5678, 2_000, 5.0);
    assert_eq!(first, second);
}
