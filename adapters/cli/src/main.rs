#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that simulates a bike runner session without a window.

mod file_store;
mod headless;
mod trace_renderer;

use std::{fs, path::PathBuf, time::Duration};

use anyhow::{bail, Context, Result};
use bike_runner_core::{Event, Initials, Key, RawInput, GAME_TAGLINE, GAME_TITLE};
use bike_runner_rendering::{Presenter, Silent};
use bike_runner_session::{FrameInput, RunOutcome, Session, SessionConfig, SessionEvent};
use bike_runner_world::query;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::{
    file_store::FileStore,
    headless::{Autopilot, HeadlessPhysics},
    trace_renderer::TraceRenderer,
};

type HeadlessPresenter = Presenter<TraceRenderer, Option<Silent>>;

/// Viewport the headless camera reports.
const VIEWPORT: (f32, f32) = (800.0, 450.0);

#[derive(Debug, Parser)]
#[command(name = "bike-runner", about = "Simulates one bike runner run headlessly")]
struct Args {
    /// Seed for the session; overrides the tuning file.
    #[arg(long)]
    seed: Option<u64>,
    /// Longest run time to simulate, in seconds.
    #[arg(long, default_value_t = 120.0)]
    seconds: f64,
    /// Simulated frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// TOML file with tuning overrides.
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// JSON file holding the leaderboard.
    #[arg(long, default_value = "bike-runner-scores.json")]
    scores: PathBuf,
    /// Initials entered when the run makes the leaderboard.
    #[arg(long, default_value = "CPU")]
    initials: String,
    /// Let the rider run straight into the first obstacle.
    #[arg(long)]
    no_autopilot: bool,
}

/// Entry point for the bike runner command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    run(&args)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn load_config(args: &Args) -> Result<SessionConfig> {
    let mut config = match &args.tuning {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read tuning file {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("failed to parse tuning file {}", path.display()))?
        }
        None => SessionConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate().context("invalid tuning")?;
    Ok(config)
}

fn run(args: &Args) -> Result<()> {
    if args.fps == 0 {
        bail!("--fps must be positive");
    }
    if !args.seconds.is_finite() || args.seconds <= 0.0 {
        bail!("--seconds must be a positive number");
    }
    let initials = Initials::parse(&args.initials)
        .with_context(|| format!("invalid initials {:?}", args.initials))?;
    let config = load_config(args)?;

    let dt = Duration::from_secs(1) / args.fps;
    let frames = (args.seconds * f64::from(args.fps)).ceil() as u64;
    let autopilot = (!args.no_autopilot).then(|| Autopilot::new(Duration::from_millis(180)));

    let mut session = Session::new(config, FileStore::new(&args.scores));
    let mut physics = HeadlessPhysics::new(VIEWPORT.0, VIEWPORT.1);
    let mut presenter: HeadlessPresenter = Presenter::new(TraceRenderer::default(), None);
    info!(
        title = GAME_TITLE,
        seed = session.config().seed,
        frames,
        "simulation started"
    );

    for _ in 0..frames {
        let capturing = match session.outcome() {
            Some(RunOutcome::Capturing { .. }) => true,
            Some(RunOutcome::Standings { .. }) => break,
            None => false,
        };
        let inputs = if capturing {
            typed(initials)
        } else {
            let entities = query::entity_view(session.world());
            for contact in physics.step(dt, &entities) {
                session.report_contact(contact);
            }
            autopilot
                .map(|pilot| pilot.inputs(&physics, &entities))
                .unwrap_or_default()
        };

        let frame = FrameInput::new(dt, physics.snapshot(), physics.camera()).with_inputs(inputs);
        for event in session.tick(frame, &mut physics) {
            match &event {
                SessionEvent::World(Event::BiomeChanged { from, to, stage }) => {
                    info!(?from, ?to, stage, "entered new biome");
                }
                SessionEvent::World(Event::PowerActivated { kind, .. }) => {
                    debug!(?kind, "power-up collected");
                }
                SessionEvent::StandingsShown { latest, .. } => {
                    debug!(?latest, "standings shown");
                }
                _ => {}
            }
            if let SessionEvent::World(event) = &event {
                presenter.present(event);
            }
        }
        let world = session.world();
        presenter.refresh_indicator(query::power_effect(world), query::now(world));
    }

    report(&session, &presenter);
    Ok(())
}

fn typed(initials: Initials) -> Vec<RawInput> {
    initials
        .as_str()
        .chars()
        .map(|letter| RawInput::KeyDown(Key::Char(letter)))
        .chain([RawInput::KeyDown(Key::Enter)])
        .collect()
}

fn report(session: &Session<FileStore>, presenter: &HeadlessPresenter) {
    let world = session.world();
    let state = if session.outcome().is_some() {
        "crashed"
    } else {
        "still riding"
    };
    println!("{GAME_TITLE}: {GAME_TAGLINE}");
    println!(
        "{state} after {:.1}s with score {} in {:?}",
        query::now(world).as_secs_f32(),
        query::score(world),
        query::biome(world)
    );
    println!(
        "{} entities on screen, {} camera shakes",
        presenter.renderer().visuals(),
        presenter.renderer().shakes()
    );
    for (rank, entry) in session.leaderboard().standings().iter().enumerate() {
        println!("{:>2}. {} {:>6}", rank + 1, entry.initials, entry.score);
    }
}
