#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session controller that drives one run after another.
//!
//! Every frame the session advances the run clock, resolves the contacts the
//! physics collaborator reported since the previous frame, and lets each
//! system react in a fixed order: difficulty, input, spawning, power effects
//! and biome progression. Commands produced by one system are applied before
//! the next system runs, so later systems observe earlier decisions through
//! the tick's event list.
//!
//! When the run ends the session hands the input stream to the leaderboard:
//! a qualifying score opens the initials capture, otherwise the standings are
//! shown until the player restarts.

mod config;
mod physics;

use std::time::Duration;

use bike_runner_core::{
    CameraView, Command, Contact, Event, Initials, Key, LeaderboardEntry, PlayerSnapshot,
    RawInput,
};
use bike_runner_system_biome::BiomeProgression;
use bike_runner_system_difficulty::Difficulty;
use bike_runner_system_input::{InputBuffer, JumpIntents};
use bike_runner_system_leaderboard::{
    CaptureStatus, InitialsEntry, InitialsInput, KeyValueStore, Leaderboard,
};
use bike_runner_system_power::PowerEffects;
use bike_runner_system_spawning::{Config as SpawnConfig, EntityScheduler};
use bike_runner_world::{self as world, query, World, WorldConfig};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

pub use bike_runner_system_spawning::TuningError;
pub use config::SessionConfig;
pub use physics::{forward, Physics};

/// Everything the platform reports for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameInput {
    /// Time elapsed since the previous frame.
    pub dt: Duration,
    /// Player body state after the physics step.
    pub player: PlayerSnapshot,
    /// Camera placement after the physics step.
    pub camera: CameraView,
    /// Raw input received during the frame, in arrival order.
    pub inputs: Vec<RawInput>,
}

impl FrameInput {
    /// Creates a frame without any input.
    #[must_use]
    pub fn new(dt: Duration, player: PlayerSnapshot, camera: CameraView) -> Self {
        Self {
            dt,
            player,
            camera,
            inputs: Vec::new(),
        }
    }

    /// Attaches the frame's raw input.
    #[must_use]
    pub fn with_inputs(mut self, inputs: impl IntoIterator<Item = RawInput>) -> Self {
        self.inputs.extend(inputs);
        self
    }
}

/// What the player sees once a run is over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The score qualified and initials are being captured.
    Capturing {
        /// Final score of the run.
        score: u64,
        /// Initials typed so far.
        entry: InitialsEntry,
    },
    /// The standings are shown until the player restarts.
    Standings {
        /// Leaderboard after the run.
        standings: Vec<LeaderboardEntry>,
        /// Row holding the run's own entry, when it was recorded.
        latest: Option<usize>,
    },
}

/// Notifications produced by [`Session::tick`] and [`Session::restart`].
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// An event broadcast by the run's world.
    World(Event),
    /// The initials capture opened for a qualifying score.
    CaptureStarted {
        /// Score awaiting initials.
        score: u64,
    },
    /// The initials being captured changed.
    InitialsEdited {
        /// Initials currently shown, rendered as text.
        initials: String,
        /// Slot being edited.
        cursor: usize,
    },
    /// The standings panel is shown.
    StandingsShown {
        /// Leaderboard, best first.
        standings: Vec<LeaderboardEntry>,
        /// Row holding the run's own entry, when it was recorded.
        latest: Option<usize>,
    },
    /// A fresh run replaced the previous one.
    Restarted {
        /// One-based number of the new run.
        run: u64,
    },
}

struct Run {
    world: World,
    input: InputBuffer,
    difficulty: Difficulty,
    scheduler: EntityScheduler,
    power: PowerEffects,
    biome: BiomeProgression,
    outcome: Option<RunOutcome>,
}

impl Run {
    fn new(config: &SessionConfig, seed: u64) -> Self {
        let biome = BiomeProgression::new(config.biome.clone());
        let world_config = WorldConfig {
            initial_biome: biome.initial_biome(),
            ..config.world.clone()
        };
        Self {
            world: World::with_config(world_config),
            input: InputBuffer::new(config.input.clone()),
            difficulty: Difficulty::new(config.difficulty.clone()),
            scheduler: EntityScheduler::new(SpawnConfig::new(config.spawning.clone(), seed)),
            power: PowerEffects::new(config.power.clone()),
            biome,
            outcome: None,
        }
    }

    fn step(&mut self, frame: &FrameInput) -> Vec<Event> {
        let mut events = Vec::new();
        let mut commands = vec![
            Command::BeginRun,
            Command::Tick { dt: frame.dt },
            Command::ObservePlayer {
                player: frame.player,
                camera: frame.camera,
            },
            Command::DrainContacts,
        ];
        self.flush(&mut commands, &mut events);

        let score = query::score(&self.world);
        self.difficulty.handle(
            &events,
            score,
            query::power_effect(&self.world),
            &mut commands,
        );
        self.flush(&mut commands, &mut events);

        for input in &frame.inputs {
            if matches!(input, RawInput::PointerDown { .. }) {
                self.input.queue_pointer_jump();
            }
        }
        self.input.handle(
            &events,
            JumpIntents::from_raw(&frame.inputs),
            frame.player,
            query::power_effect(&self.world),
            &mut commands,
        );
        self.flush(&mut commands, &mut events);

        let interval = self.difficulty.obstacle_interval(query::now(&self.world));
        self.scheduler.handle(
            &events,
            frame.camera,
            interval,
            &query::entity_view(&self.world),
            &mut commands,
        );
        self.flush(&mut commands, &mut events);

        self.power.handle(
            &events,
            query::power_effect(&self.world),
            frame.player,
            &query::entity_view(&self.world),
            &mut commands,
        );
        self.flush(&mut commands, &mut events);

        self.biome.handle(
            &events,
            query::score(&self.world),
            query::biome_stage(&self.world),
            &mut commands,
        );
        self.flush(&mut commands, &mut events);

        events
    }

    fn flush(&mut self, commands: &mut Vec<Command>, events: &mut Vec<Event>) {
        for command in commands.drain(..) {
            world::apply(&mut self.world, command, events);
        }
    }
}

/// Drives runs, their end-of-run flow and the persistent leaderboard.
pub struct Session<S> {
    config: SessionConfig,
    seeds: ChaCha8Rng,
    leaderboard: Leaderboard<S>,
    run: Run,
    runs_started: u64,
}

impl<S: KeyValueStore> Session<S> {
    /// Creates a session, loading the leaderboard from `store` and preparing
    /// the first run.
    pub fn new(config: SessionConfig, store: S) -> Self {
        let mut seeds = ChaCha8Rng::seed_from_u64(config.seed);
        let run = Run::new(&config, seeds.next_u64());
        info!(seed = config.seed, "session created");
        Self {
            leaderboard: Leaderboard::load(store),
            config,
            seeds,
            run,
            runs_started: 1,
        }
    }

    /// Queues a contact reported by the physics collaborator.
    ///
    /// The contact is resolved at the start of the next [`Session::tick`].
    pub fn report_contact(&mut self, contact: Contact) {
        let mut events = Vec::new();
        world::apply(
            &mut self.run.world,
            Command::ReportContact { contact },
            &mut events,
        );
    }

    /// Advances the session by one frame and forwards physics side effects.
    pub fn tick<P: Physics + ?Sized>(
        &mut self,
        frame: FrameInput,
        physics: &mut P,
    ) -> Vec<SessionEvent> {
        let mut out = Vec::new();
        if self.run.outcome.is_some() {
            self.after_run(&frame, physics, &mut out);
            return out;
        }

        let events = self.run.step(&frame);
        forward(&events, physics);
        let ended = events.iter().find_map(|event| match event {
            Event::RunEnded { score } => Some(*score),
            _ => None,
        });
        out.extend(events.into_iter().map(SessionEvent::World));
        if let Some(score) = ended {
            self.finish_run(score, &mut out);
        }
        out
    }

    /// Abandons the current run, including any capture in progress, and
    /// starts a fresh one.
    pub fn restart<P: Physics + ?Sized>(&mut self, physics: &mut P) -> Vec<SessionEvent> {
        let mut out = Vec::new();
        self.start_next_run(physics, &mut out);
        out
    }

    /// The current run's world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.run.world
    }

    /// End-of-run state, or `None` while the run is in progress.
    #[must_use]
    pub fn outcome(&self) -> Option<&RunOutcome> {
        self.run.outcome.as_ref()
    }

    /// The persistent leaderboard.
    #[must_use]
    pub fn leaderboard(&self) -> &Leaderboard<S> {
        &self.leaderboard
    }

    /// One-based number of the current run.
    #[must_use]
    pub fn run_number(&self) -> u64 {
        self.runs_started
    }

    /// Configuration the session was created with.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn finish_run(&mut self, score: u64, out: &mut Vec<SessionEvent>) {
        let qualifies = self.leaderboard.qualifies(score);
        info!(run = self.runs_started, score, qualifies, "run ended");
        if qualifies {
            self.run.outcome = Some(RunOutcome::Capturing {
                score,
                entry: InitialsEntry::new(),
            });
            out.push(SessionEvent::CaptureStarted { score });
        } else {
            let standings = self.leaderboard.standings().to_vec();
            self.show_standings(standings, None, out);
        }
    }

    fn after_run<P: Physics + ?Sized>(
        &mut self,
        frame: &FrameInput,
        physics: &mut P,
        out: &mut Vec<SessionEvent>,
    ) {
        let mut submitted = None;
        let mut restart = false;
        match &mut self.run.outcome {
            Some(RunOutcome::Capturing { score, entry }) => {
                submitted = capture(entry, frame, out).map(|initials| (initials, *score));
            }
            Some(RunOutcome::Standings { .. }) => restart = frame.inputs.iter().any(restarts),
            None => {}
        }

        if let Some((initials, score)) = submitted {
            let standings = self.leaderboard.submit(initials, score).to_vec();
            let recorded = LeaderboardEntry::new(initials, score);
            let latest = standings.iter().rposition(|row| *row == recorded);
            self.show_standings(standings, latest, out);
        }
        if restart {
            self.start_next_run(physics, out);
        }
    }

    fn show_standings(
        &mut self,
        standings: Vec<LeaderboardEntry>,
        latest: Option<usize>,
        out: &mut Vec<SessionEvent>,
    ) {
        out.push(SessionEvent::StandingsShown {
            standings: standings.clone(),
            latest,
        });
        self.run.outcome = Some(RunOutcome::Standings { standings, latest });
    }

    fn start_next_run<P: Physics + ?Sized>(&mut self, physics: &mut P, out: &mut Vec<SessionEvent>) {
        self.run = Run::new(&self.config, self.seeds.next_u64());
        self.runs_started += 1;
        physics.reset();
        info!(run = self.runs_started, "run restarted");
        out.push(SessionEvent::Restarted {
            run: self.runs_started,
        });
    }
}

/// Feeds the frame's input to the capture until the initials are submitted;
/// input after the submission is dropped.
fn capture(
    entry: &mut InitialsEntry,
    frame: &FrameInput,
    out: &mut Vec<SessionEvent>,
) -> Option<Initials> {
    for input in &frame.inputs {
        let Some(action) = InitialsInput::from_raw(*input, frame.camera.width) else {
            continue;
        };
        match entry.apply(action) {
            CaptureStatus::Editing => out.push(SessionEvent::InitialsEdited {
                initials: entry.initials().to_string(),
                cursor: entry.cursor(),
            }),
            CaptureStatus::Submitted(initials) => return Some(initials),
        }
    }
    None
}

fn restarts(input: &RawInput) -> bool {
    matches!(
        input,
        RawInput::KeyDown(Key::Jump) | RawInput::PointerDown { .. }
    )
}
