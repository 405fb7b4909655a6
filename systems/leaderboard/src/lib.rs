#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Top-five leaderboard with initials capture and best-effort persistence.
//!
//! Storage faults never escape this crate: a missing, unreadable, malformed or
//! oversized payload loads as an empty leaderboard, and a failed write leaves
//! the stored payload unchanged. Every swallowed fault is logged.

mod initials;
mod store;

use bike_runner_core::{Initials, LeaderboardEntry};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

pub use initials::{CaptureStatus, InitialsEntry, InitialsInput};
pub use store::{KeyValueStore, MemoryStore, StoreError};

/// Key the leaderboard is stored under.
pub const STORAGE_KEY: &str = "bike-runner-highscores";

/// Maximum number of entries kept.
pub const CAPACITY: usize = 5;

/// Largest payload accepted when loading, in bytes.
pub const MAX_PAYLOAD_BYTES: usize = 16 * 1024;

/// Reasons a stored payload could not be decoded.
#[derive(Debug, Error)]
pub enum LeaderboardError {
    /// The payload exceeds [`MAX_PAYLOAD_BYTES`].
    #[error("stored leaderboard is {size} bytes, above the {limit} byte limit")]
    TooLarge {
        /// Size of the payload.
        size: usize,
        /// Accepted maximum.
        limit: usize,
    },
    /// The payload is not valid JSON.
    #[error("stored leaderboard is not valid JSON")]
    Malformed(#[from] serde_json::Error),
    /// The payload is valid JSON but not an array.
    #[error("stored leaderboard is not a JSON array")]
    NotAnArray,
    /// The store itself failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Decodes a stored payload into entries in stored order.
///
/// Plain numbers are legacy rows and receive placeholder initials. Objects
/// with a non-numeric score count as zero and objects without valid initials
/// receive the placeholder. Rows of any other shape are skipped.
pub fn decode(payload: &str) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
    if payload.len() > MAX_PAYLOAD_BYTES {
        return Err(LeaderboardError::TooLarge {
            size: payload.len(),
            limit: MAX_PAYLOAD_BYTES,
        });
    }

    let Value::Array(rows) = serde_json::from_str::<Value>(payload)? else {
        return Err(LeaderboardError::NotAnArray);
    };

    Ok(rows.iter().filter_map(decode_row).collect())
}

fn decode_row(row: &Value) -> Option<LeaderboardEntry> {
    match row {
        Value::Number(_) => Some(LeaderboardEntry::new(
            Initials::PLACEHOLDER,
            score_from(row),
        )),
        Value::Object(fields) => {
            let score = fields.get("score").map_or(0, score_from);
            let initials = fields
                .get("initials")
                .and_then(Value::as_str)
                .and_then(|value| Initials::try_from(value.to_owned()).ok())
                .unwrap_or(Initials::PLACEHOLDER);
            Some(LeaderboardEntry::new(initials, score))
        }
        _ => None,
    }
}

fn score_from(value: &Value) -> u64 {
    let numeric = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    match numeric {
        Some(score) if score.is_finite() && score > 0.0 => score.floor() as u64,
        _ => 0,
    }
}

/// Encodes entries into the stored payload format.
pub fn encode(entries: &[LeaderboardEntry]) -> Result<String, LeaderboardError> {
    Ok(serde_json::to_string(entries)?)
}

/// Sorts entries by descending score, keeping insertion order among ties, and
/// keeps the best [`CAPACITY`].
fn rank(entries: &mut Vec<LeaderboardEntry>) {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(CAPACITY);
}

/// Process-wide leaderboard persisted through a [`KeyValueStore`].
#[derive(Debug)]
pub struct Leaderboard<S> {
    store: S,
    entries: Vec<LeaderboardEntry>,
}

impl<S: KeyValueStore> Leaderboard<S> {
    /// Loads the leaderboard from `store`, treating any fault as an empty board.
    pub fn load(store: S) -> Self {
        let entries = match read(&store) {
            Ok(mut entries) => {
                rank(&mut entries);
                entries
            }
            Err(error) => {
                warn!(%error, "ignoring unreadable leaderboard");
                Vec::new()
            }
        };
        Self { store, entries }
    }

    /// Current standings, best first.
    #[must_use]
    pub fn standings(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Reports whether `score` earns a place: the board has a free slot or
    /// `score` beats the current last place.
    #[must_use]
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < CAPACITY {
            return true;
        }
        self.entries.last().map_or(true, |last| score > last.score)
    }

    /// Records a run, persists the board and returns the updated standings.
    ///
    /// A failed write is logged and otherwise ignored.
    pub fn submit(&mut self, initials: Initials, score: u64) -> &[LeaderboardEntry] {
        self.entries.push(LeaderboardEntry::new(initials, score));
        rank(&mut self.entries);
        info!(%initials, score, "leaderboard entry submitted");

        if let Err(error) = self.persist() {
            warn!(%error, "failed to persist leaderboard");
        }
        &self.entries
    }

    /// Backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self) -> Result<(), LeaderboardError> {
        let payload = encode(&self.entries)?;
        self.store.set(STORAGE_KEY, &payload)?;
        Ok(())
    }
}

fn read<S: KeyValueStore>(store: &S) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
    match store.get(STORAGE_KEY)? {
        Some(payload) => decode(&payload),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(entries: &[LeaderboardEntry]) -> Vec<u64> {
        entries.iter().map(|entry| entry.score).collect()
    }

    #[test]
    fn legacy_rows_decode_with_placeholder_initials() {
        let entries = decode(r#"[120, {"score": "75", "initials": "bob"}, {"score": "x"}, null]"#)
            .expect("valid payload");
        assert_eq!(scores(&entries), vec![120, 75, 0]);
        assert_eq!(entries[0].initials, Initials::PLACEHOLDER);
        assert_eq!(entries[1].initials.as_str(), "BOB");
        assert_eq!(entries[2].initials, Initials::PLACEHOLDER);
    }

    #[test]
    fn invalid_initials_fall_back_to_placeholder() {
        let entries =
            decode(r#"[{"score": 10, "initials": "TOOLONG"}, {"score": -4, "initials": 7}]"#)
                .expect("valid payload");
        assert_eq!(entries[0].initials, Initials::PLACEHOLDER);
        assert_eq!(scores(&entries), vec![10, 0]);
    }

    #[test]
    fn non_array_payloads_are_rejected() {
        assert!(matches!(
            decode(r#"{"score": 5}"#),
            Err(LeaderboardError::NotAnArray)
        ));
        assert!(matches!(
            decode("not json"),
            Err(LeaderboardError::Malformed(_))
        ));
    }

    #[test]
    fn oversized_payloads_are_rejected() {
        let payload = format!("[{}]", "1,".repeat(MAX_PAYLOAD_BYTES / 2) + "1");
        assert!(matches!(
            decode(&payload),
            Err(LeaderboardError::TooLarge { .. })
        ));
    }

    #[test]
    fn ranking_is_stable_for_ties() {
        let first = Initials::from_letters(*b"AAA");
        let second = Initials::from_letters(*b"BBB");
        let mut entries = vec![
            LeaderboardEntry::new(first, 90),
            LeaderboardEntry::new(second, 90),
        ];
        rank(&mut entries);
        assert_eq!(entries[0].initials, first);
        assert_eq!(entries[1].initials, second);
    }
}
