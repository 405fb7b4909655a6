#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Score-driven biome progression.

use bike_runner_core::{Biome, Command, Event};
use serde::Deserialize;
use tracing::info;

/// Tunables for biome progression.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BiomeTuning {
    /// Score span covered by each biome stage.
    pub change_score: u64,
    /// Biomes visited in order, wrapping around after the last one.
    pub sequence: Vec<Biome>,
}

impl Default for BiomeTuning {
    fn default() -> Self {
        Self {
            change_score: 700,
            sequence: Biome::SEQUENCE.to_vec(),
        }
    }
}

impl BiomeTuning {
    /// Number of thresholds crossed by `score`.
    #[must_use]
    pub fn stage_for(&self, score: u64) -> u64 {
        score.checked_div(self.change_score).unwrap_or(0)
    }

    /// Biome shown at the provided stage, or `None` when the sequence is empty.
    #[must_use]
    pub fn biome_at(&self, stage: u64) -> Option<Biome> {
        let len = self.sequence.len() as u64;
        let index = stage.checked_rem(len)?;
        self.sequence.get(usize::try_from(index).ok()?).copied()
    }
}

/// Pure system that requests a biome transition for every threshold the score crossed.
#[derive(Debug, Default)]
pub struct BiomeProgression {
    tuning: BiomeTuning,
}

impl BiomeProgression {
    /// Creates a new progression system using the provided tuning.
    #[must_use]
    pub fn new(tuning: BiomeTuning) -> Self {
        Self { tuning }
    }

    /// Biome a run starts in.
    #[must_use]
    pub fn initial_biome(&self) -> Biome {
        self.tuning.biome_at(0).unwrap_or(Biome::Desert)
    }

    /// Compares the stage implied by `score` with the world's `stage` and emits
    /// one [`Command::EnterBiome`] per crossed threshold, in order.
    ///
    /// Recomputing with an unchanged score emits nothing.
    pub fn handle(&self, events: &[Event], score: u64, stage: u64, out: &mut Vec<Command>) {
        let ticked = events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }));
        if !ticked {
            return;
        }

        let target = self.tuning.stage_for(score);
        for next in stage.saturating_add(1)..=target {
            let Some(biome) = self.tuning.biome_at(next) else {
                return;
            };
            info!(stage = next, ?biome, score, "biome threshold crossed");
            out.push(Command::EnterBiome { stage: next, biome });
        }
    }
}
