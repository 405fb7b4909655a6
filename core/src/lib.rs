#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the bike runner session controller.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! that systems and presentation adapters react to. Systems consume event
//! streams, query immutable snapshots, and respond exclusively with new command
//! batches.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Title shown on the heads-up display while a run is active.
pub const GAME_TITLE: &str = "FRIENDS BUSSI";

/// One-line instructions shown below the title.
pub const GAME_TAGLINE: &str = "Auto-run right. Jump to avoid obstacles.";

/// Multiplier applied to the jump velocity while the jump boost is active.
pub const JUMP_BOOST_SCALE: f32 = 1.25;

/// Multiplier applied to distance score while double points are active.
pub const DOUBLE_POINTS_MULTIPLIER: f64 = 2.0;

/// Describes whether the current run still accepts gameplay commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunPhase {
    /// The player is running and every system ticks.
    Running,
    /// The run ended; only the leaderboard flow and restart remain.
    Over,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Marks the start of a freshly constructed run.
    BeginRun,
    /// Advances the run clock by the provided delta time.
    Tick {
        /// Duration of run time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Records the latest player body state reported by the physics collaborator.
    ObservePlayer {
        /// Player body snapshot for this tick.
        player: PlayerSnapshot,
        /// Camera placement for this tick.
        camera: CameraView,
    },
    /// Queues a contact reported synchronously by the physics collaborator.
    ///
    /// The world never reacts to the contact immediately; the reaction happens
    /// when [`Command::DrainContacts`] runs at the start of the next tick.
    ReportContact {
        /// Contact reported by the collaborator.
        contact: Contact,
    },
    /// Resolves every queued contact in arrival order.
    DrainContacts,
    /// Updates the forward running speed.
    SetForwardSpeed {
        /// Horizontal speed expressed in world units per second.
        speed: f32,
    },
    /// Requests a jump impulse on the player body.
    LaunchJump {
        /// Vertical velocity assigned to the body (negative is up).
        velocity: f32,
    },
    /// Requests that an upward jump be shortened.
    CutJump {
        /// Damped vertical velocity assigned to the body.
        velocity: f32,
    },
    /// Updates the extra gravity applied to the player body.
    SetFallGravity {
        /// Additional downward acceleration in world units per second squared.
        boost: f32,
    },
    /// Starts a mid-air fast-fall spin.
    StartFastFall {
        /// Downward velocity assigned to the body.
        velocity: f32,
    },
    /// Requests creation of a new world entity.
    SpawnEntity {
        /// Kind of entity to create.
        kind: EntityKind,
        /// Anchor position of the entity in world space.
        position: WorldPoint,
    },
    /// Relocates an existing entity.
    MoveEntity {
        /// Entity to relocate.
        entity: EntityId,
        /// New anchor position of the entity.
        position: WorldPoint,
    },
    /// Requests removal of an entity that scrolled behind the camera.
    DespawnEntity {
        /// Entity to remove.
        entity: EntityId,
    },
    /// Activates the provided power-up effect.
    ActivatePower {
        /// Power-up that was picked up.
        kind: PowerKind,
    },
    /// Ends the active timed power-up effect.
    ExpirePower,
    /// Spends the shield on the provided obstacle.
    ConsumeShield {
        /// Obstacle destroyed by the shield.
        obstacle: EntityId,
    },
    /// Moves the run into a new biome stage.
    EnterBiome {
        /// Number of completed biome thresholds.
        stage: u64,
        /// Biome associated with the stage.
        biome: Biome,
    },
    /// Ends the run.
    EndRun,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that a new run began.
    RunStarted,
    /// Indicates that the run clock advanced.
    TimeAdvanced {
        /// Run time after the tick.
        now: Duration,
        /// Duration of run time that elapsed in the tick.
        dt: Duration,
    },
    /// Reports that the integer score changed.
    ScoreChanged {
        /// Score after the change.
        score: u64,
    },
    /// Reports that the forward speed changed.
    ForwardSpeedChanged {
        /// Horizontal speed expressed in world units per second.
        speed: f32,
    },
    /// Confirms that a jump impulse fired.
    JumpFired {
        /// Vertical velocity to assign to the body.
        velocity: f32,
    },
    /// Confirms that an upward jump was shortened.
    JumpCut {
        /// Damped vertical velocity to assign to the body.
        velocity: f32,
    },
    /// Reports that the extra fall gravity changed.
    FallGravityChanged {
        /// Additional downward acceleration in world units per second squared.
        boost: f32,
    },
    /// Confirms that a fast-fall spin started.
    FastFallStarted {
        /// Downward velocity to assign to the body.
        velocity: f32,
    },
    /// Confirms that an entity was created.
    EntitySpawned {
        /// Identifier assigned to the entity.
        entity: EntityId,
        /// Kind of the entity.
        kind: EntityKind,
        /// Anchor position of the entity.
        position: WorldPoint,
    },
    /// Confirms that an entity was relocated.
    EntityMoved {
        /// Entity that moved.
        entity: EntityId,
        /// New anchor position.
        position: WorldPoint,
    },
    /// Confirms that an entity was removed.
    EntityDespawned {
        /// Entity that was removed.
        entity: EntityId,
        /// Kind of the removed entity.
        kind: EntityKind,
        /// Reason the entity was removed.
        reason: DespawnReason,
    },
    /// Reports that the player picked up a power-up.
    PowerUpCollected {
        /// Entity that was collected and removed.
        entity: EntityId,
        /// Power-up carried by the entity.
        kind: PowerKind,
    },
    /// Reports that the player touched an obstacle.
    ObstacleHit {
        /// Obstacle that was touched.
        entity: EntityId,
    },
    /// Confirms that a power-up effect became active.
    PowerActivated {
        /// Power-up that became active.
        kind: PowerKind,
        /// Run time at which the effect ends, or `None` for the shield.
        ends_at: Option<Duration>,
    },
    /// Confirms that a timed effect ran out.
    PowerExpired {
        /// Power-up whose effect ended.
        kind: PowerKind,
    },
    /// Confirms that the shield absorbed an obstacle.
    ShieldSpent {
        /// Obstacle destroyed by the shield.
        obstacle: EntityId,
    },
    /// Announces a biome transition.
    BiomeChanged {
        /// Biome that was active before the transition.
        from: Biome,
        /// Biome that is active after the transition.
        to: Biome,
        /// Number of completed biome thresholds.
        stage: u64,
    },
    /// Announces that the run ended.
    RunEnded {
        /// Final score of the run.
        score: u64,
    },
}

/// Reasons an entity leaves the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DespawnReason {
    /// The entity scrolled behind the camera's left edge.
    BehindCamera,
    /// The player collected the power-up.
    Collected,
    /// The shield destroyed the obstacle.
    ShieldImpact,
}

/// Unique identifier assigned to a world entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Position expressed in world units. The y axis grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct WorldPoint {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl WorldPoint {
    /// Creates a new world point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance(self, other: WorldPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Collision footprint of an entity measured in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Footprint {
    /// Creates a new footprint.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Obstacle shapes the scheduler can place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleVariant {
    /// Low block that a short hop clears.
    Short,
    /// High block that unlocks after the warm-up delay.
    Tall,
}

impl ObstacleVariant {
    /// Collision footprint of the variant. Obstacles are anchored at their bottom centre.
    #[must_use]
    pub const fn footprint(self) -> Footprint {
        match self {
            Self::Short => Footprint::new(46.0, 46.0),
            Self::Tall => Footprint::new(46.0, 90.0),
        }
    }
}

/// Power-ups the player can collect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerKind {
    /// Single-hit shield that cancels one run-ending collision.
    Shield,
    /// Raises the jump velocity.
    JumpBoost,
    /// Raises the forward speed and its ceiling.
    SpeedBoost,
    /// Doubles the distance score.
    DoublePoints,
    /// Pulls nearby power-ups toward the player.
    Magnet,
}

impl PowerKind {
    /// Every power-up kind, in the order the scheduler draws from.
    pub const ALL: [PowerKind; 5] = [
        PowerKind::Shield,
        PowerKind::JumpBoost,
        PowerKind::SpeedBoost,
        PowerKind::DoublePoints,
        PowerKind::Magnet,
    ];

    /// Timed variant of the power-up, or `None` for the shield.
    #[must_use]
    pub const fn timed(self) -> Option<TimedPower> {
        match self {
            Self::Shield => None,
            Self::JumpBoost => Some(TimedPower::JumpBoost),
            Self::SpeedBoost => Some(TimedPower::SpeedBoost),
            Self::DoublePoints => Some(TimedPower::DoublePoints),
            Self::Magnet => Some(TimedPower::Magnet),
        }
    }

    /// Duration of the effect. Zero means permanent until consumed.
    #[must_use]
    pub const fn duration(self) -> Duration {
        match self.timed() {
            Some(timed) => timed.duration(),
            None => Duration::ZERO,
        }
    }
}

/// Power-ups whose effect ends on a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimedPower {
    /// Raises the jump velocity.
    JumpBoost,
    /// Raises the forward speed and its ceiling.
    SpeedBoost,
    /// Doubles the distance score.
    DoublePoints,
    /// Pulls nearby power-ups toward the player.
    Magnet,
}

impl TimedPower {
    /// Fixed effect duration of the power-up.
    #[must_use]
    pub const fn duration(self) -> Duration {
        match self {
            Self::JumpBoost => Duration::from_millis(4_000),
            Self::SpeedBoost => Duration::from_millis(5_000),
            Self::DoublePoints => Duration::from_millis(6_000),
            Self::Magnet => Duration::from_millis(7_000),
        }
    }

    /// Power-up kind that grants this effect.
    #[must_use]
    pub const fn kind(self) -> PowerKind {
        match self {
            Self::JumpBoost => PowerKind::JumpBoost,
            Self::SpeedBoost => PowerKind::SpeedBoost,
            Self::DoublePoints => PowerKind::DoublePoints,
            Self::Magnet => PowerKind::Magnet,
        }
    }
}

/// The single power-up effect carried by a run.
///
/// Representing the effect as one tagged value makes exclusivity structural:
/// gameplay modifiers are derived from the variant, so replacing the value
/// reverts the previous modifiers before the next ones apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PowerEffect {
    /// No effect is active.
    #[default]
    Idle,
    /// The shield is up until an obstacle consumes it.
    Shield,
    /// A timed effect is active until `ends_at`.
    Timed {
        /// Active effect.
        power: TimedPower,
        /// Run time at which the effect became active.
        started_at: Duration,
        /// Run time at which the effect ends.
        ends_at: Duration,
    },
}

impl PowerEffect {
    /// Constructs the effect granted by picking up `kind` at run time `now`.
    #[must_use]
    pub fn activated(kind: PowerKind, now: Duration) -> Self {
        match kind.timed() {
            None => Self::Shield,
            Some(power) => Self::Timed {
                power,
                started_at: now,
                ends_at: now.saturating_add(power.duration()),
            },
        }
    }

    /// Kind of the active effect, if any.
    #[must_use]
    pub const fn active_kind(&self) -> Option<PowerKind> {
        match self {
            Self::Idle => None,
            Self::Shield => Some(PowerKind::Shield),
            Self::Timed { power, .. } => Some(power.kind()),
        }
    }

    /// Reports whether the shield is up.
    #[must_use]
    pub const fn shield_active(&self) -> bool {
        matches!(self, Self::Shield)
    }

    /// Run time at which the active effect ends, or `None` for idle and shield.
    #[must_use]
    pub const fn ends_at(&self) -> Option<Duration> {
        match self {
            Self::Timed { ends_at, .. } => Some(*ends_at),
            _ => None,
        }
    }

    /// Reports whether a timed effect reached its end at `now` (inclusive).
    #[must_use]
    pub fn is_expired(&self, now: Duration) -> bool {
        self.ends_at().is_some_and(|ends_at| now >= ends_at)
    }

    fn is_timed(&self, target: TimedPower) -> bool {
        matches!(self, Self::Timed { power, .. } if *power == target)
    }

    /// Scale applied to the configured jump velocity.
    #[must_use]
    pub fn jump_velocity_scale(&self) -> f32 {
        if self.is_timed(TimedPower::JumpBoost) {
            JUMP_BOOST_SCALE
        } else {
            1.0
        }
    }

    /// Reports whether the speed boost is active.
    #[must_use]
    pub fn speed_boosted(&self) -> bool {
        self.is_timed(TimedPower::SpeedBoost)
    }

    /// Multiplier applied to the distance score.
    #[must_use]
    pub fn score_multiplier(&self) -> f64 {
        if self.is_timed(TimedPower::DoublePoints) {
            DOUBLE_POINTS_MULTIPLIER
        } else {
            1.0
        }
    }

    /// Reports whether the magnet is active.
    #[must_use]
    pub fn magnet_active(&self) -> bool {
        self.is_timed(TimedPower::Magnet)
    }

    /// Fraction of the timed effect that remains at `now`, in `0.0..=1.0`.
    ///
    /// Returns `None` when idle, for the shield, or once the effect has run out,
    /// so remaining-time indicators render nothing in those states.
    #[must_use]
    pub fn remaining_ratio(&self, now: Duration) -> Option<f32> {
        let Self::Timed {
            started_at,
            ends_at,
            ..
        } = self
        else {
            return None;
        };

        let total = ends_at.saturating_sub(*started_at);
        let remaining = ends_at.saturating_sub(now);
        if total.is_zero() || remaining.is_zero() {
            return None;
        }
        Some((remaining.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0))
    }
}

/// Thematic level segments selected by cumulative score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Biome {
    /// Warm sand dunes.
    #[default]
    Desert,
    /// Frozen plains.
    Snow,
    /// Low-gravity night sky.
    Moon,
    /// Smouldering lava fields.
    Volcano,
}

impl Biome {
    /// Default biome order for a run.
    pub const SEQUENCE: [Biome; 4] = [Biome::Desert, Biome::Snow, Biome::Moon, Biome::Volcano];
}

/// Kinds of entities the scheduler places ahead of the camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EntityKind {
    /// Run-ending block unless the shield is up.
    Obstacle(ObstacleVariant),
    /// Collectible power-up.
    PowerUp(PowerKind),
    /// Floating platform the player can land on.
    Platform {
        /// Horizontal extent of the platform.
        width: f32,
    },
}

impl EntityKind {
    /// Collision footprint of the entity.
    #[must_use]
    pub fn footprint(&self) -> Footprint {
        match self {
            Self::Obstacle(variant) => variant.footprint(),
            Self::PowerUp(_) => Footprint::new(32.0, 32.0),
            Self::Platform { width } => Footprint::new(*width, 32.0),
        }
    }

    /// Reports whether the entity is a power-up.
    #[must_use]
    pub const fn is_power_up(&self) -> bool {
        matches!(self, Self::PowerUp(_))
    }

    /// Axis-aligned bounds of the entity placed at `anchor`.
    ///
    /// Obstacles are anchored at their bottom centre, power-ups at their centre
    /// and platforms at the vertical centre of their left edge.
    #[must_use]
    pub fn bounds(&self, anchor: WorldPoint) -> Bounds {
        let Footprint { width, height } = self.footprint();
        match self {
            Self::Obstacle(_) => Bounds::new(
                anchor.x - width / 2.0,
                anchor.y - height,
                anchor.x + width / 2.0,
                anchor.y,
            ),
            Self::PowerUp(_) => Bounds::around(anchor, Footprint::new(width, height)),
            Self::Platform { .. } => Bounds::new(
                anchor.x,
                anchor.y - height / 2.0,
                anchor.x + width,
                anchor.y + height / 2.0,
            ),
        }
    }
}

/// Axis-aligned rectangle in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Left edge.
    pub min_x: f32,
    /// Top edge.
    pub min_y: f32,
    /// Right edge.
    pub max_x: f32,
    /// Bottom edge.
    pub max_y: f32,
}

impl Bounds {
    /// Creates bounds from explicit edges.
    #[must_use]
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates bounds of the provided footprint centred on `centre`.
    #[must_use]
    pub fn around(centre: WorldPoint, footprint: Footprint) -> Self {
        let half_width = footprint.width / 2.0;
        let half_height = footprint.height / 2.0;
        Self::new(
            centre.x - half_width,
            centre.y - half_height,
            centre.x + half_width,
            centre.y + half_height,
        )
    }

    /// Reports whether the two rectangles overlap with a non-zero area.
    #[must_use]
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }
}

/// Contact reported by the physics collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Contact {
    /// The player collided with an obstacle.
    Obstacle(EntityId),
    /// The player overlapped a power-up.
    PowerUp(EntityId),
}

/// Player body state reported by the physics collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PlayerSnapshot {
    /// Centre of the player body.
    pub position: WorldPoint,
    /// Vertical velocity; negative values move upward.
    pub velocity_y: f32,
    /// Whether the body rests on the ground or a platform.
    pub grounded: bool,
}

/// Camera placement reported by the renderer collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraView {
    /// Horizontal scroll offset of the camera's left edge.
    pub scroll_x: f32,
    /// Viewport width.
    pub width: f32,
    /// Viewport height.
    pub height: f32,
}

impl CameraView {
    /// Creates a new camera view.
    #[must_use]
    pub const fn new(scroll_x: f32, width: f32, height: f32) -> Self {
        Self {
            scroll_x,
            width,
            height,
        }
    }

    /// World x-coordinate of the camera's left edge.
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.scroll_x
    }

    /// World x-coordinate of the camera's right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.scroll_x + self.width
    }
}

impl Default for CameraView {
    fn default() -> Self {
        Self::new(0.0, 800.0, 450.0)
    }
}

/// Keys the raw input source distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Designated jump key (space).
    Jump,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Enter / return.
    Enter,
    /// Backspace.
    Backspace,
    /// Printable character.
    Char(char),
}

/// Discrete input delivered by the raw input source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RawInput {
    /// A key went down this frame.
    KeyDown(Key),
    /// A key went up this frame.
    KeyUp(Key),
    /// The pointer was pressed at the provided screen position.
    PointerDown {
        /// Horizontal screen coordinate.
        x: f32,
        /// Vertical screen coordinate.
        y: f32,
    },
}

/// Errors produced when validating player initials.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InitialsError {
    /// The value did not contain exactly three characters.
    #[error("initials must be exactly 3 letters, got {0} characters")]
    Length(usize),
    /// The value contained a character outside `A..=Z`.
    #[error("initials may only contain letters, found '{0}'")]
    InvalidCharacter(char),
}

/// Three uppercase letters identifying a leaderboard entry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Initials([u8; 3]);

impl Initials {
    /// Initials offered when capture begins.
    pub const DEFAULT: Self = Self(*b"AAA");

    /// Marker stored for rows that carry no valid initials.
    pub const PLACEHOLDER: Self = Self(*b"---");

    /// Validates and normalises a three-letter string. Lowercase letters are uppercased.
    pub fn parse(value: &str) -> Result<Self, InitialsError> {
        let count = value.chars().count();
        if count != 3 {
            return Err(InitialsError::Length(count));
        }

        let mut letters = [b'A'; 3];
        for (slot, character) in letters.iter_mut().zip(value.chars()) {
            if !character.is_ascii_alphabetic() {
                return Err(InitialsError::InvalidCharacter(character));
            }
            *slot = character.to_ascii_uppercase() as u8;
        }
        Ok(Self(letters))
    }

    /// Builds initials from three letters already known to be uppercase ASCII.
    #[must_use]
    pub const fn from_letters(letters: [u8; 3]) -> Self {
        Self(letters)
    }

    /// Returns the initials as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or("---")
    }
}

impl Default for Initials {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Debug for Initials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Initials({})", self.as_str())
    }
}

impl fmt::Display for Initials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Initials {
    type Error = InitialsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == Self::PLACEHOLDER.as_str() {
            return Ok(Self::PLACEHOLDER);
        }
        Self::parse(&value)
    }
}

impl From<Initials> for String {
    fn from(value: Initials) -> Self {
        value.as_str().to_owned()
    }
}

/// Persisted leaderboard row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Final score of the run.
    pub score: u64,
    /// Initials captured for the run.
    pub initials: Initials,
}

impl LeaderboardEntry {
    /// Creates a new leaderboard row.
    #[must_use]
    pub const fn new(initials: Initials, score: u64) -> Self {
        Self { score, initials }
    }
}
