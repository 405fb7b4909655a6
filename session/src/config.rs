use bike_runner_system_biome::BiomeTuning;
use bike_runner_system_difficulty::DifficultyTuning;
use bike_runner_system_input::JumpTuning;
use bike_runner_system_power::PowerTuning;
use bike_runner_system_spawning::{SpawnTuning, TuningError};
use bike_runner_world::WorldConfig;
use serde::Deserialize;

/// Every tunable of a session, grouped per system.
///
/// Missing groups or fields fall back to their defaults, so a tuning file only
/// needs to list what it changes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seed from which every run's spawn seed is derived.
    pub seed: u64,
    /// Score accounting.
    pub world: WorldConfig,
    /// Jump input feel.
    pub input: JumpTuning,
    /// Speed and obstacle cadence curves.
    pub difficulty: DifficultyTuning,
    /// Entity placement.
    pub spawning: SpawnTuning,
    /// Magnet pull.
    pub power: PowerTuning,
    /// Biome thresholds and order.
    pub biome: BiomeTuning,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0x0b1c_5eed,
            world: WorldConfig::default(),
            input: JumpTuning::default(),
            difficulty: DifficultyTuning::default(),
            spawning: SpawnTuning::default(),
            power: PowerTuning::default(),
            biome: BiomeTuning::default(),
        }
    }
}

impl SessionConfig {
    /// Rejects tuning values that would break a run mid-tick.
    pub fn validate(&self) -> Result<(), TuningError> {
        self.spawning.validate()
    }
}
