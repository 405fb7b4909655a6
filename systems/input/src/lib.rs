#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Jump input state machine that turns raw key and pointer intents into jumps.
//!
//! The buffer remembers the most recent jump press for a short window and
//! honours it once the player is grounded, or within the coyote window after
//! leaving the ground. Releasing the jump key during an ascent shortens the hop,
//! and pressing down in mid-air starts a fast-fall spin.

use std::time::Duration;

use bike_runner_core::{Command, Event, Key, PlayerSnapshot, PowerEffect, RawInput};
use serde::Deserialize;

/// Tunables that shape how jump input feels.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct JumpTuning {
    /// Grace period after leaving the ground during which a jump is still honoured.
    pub coyote_window_ms: u64,
    /// Grace period before landing during which an early press is remembered.
    pub jump_buffer_ms: u64,
    /// Vertical velocity of an unboosted jump; negative values move upward.
    pub base_jump_velocity: f32,
    /// Factor applied to upward velocity when the jump input is released early.
    pub jump_cut_factor: f32,
    /// Extra gravity applied while falling for snappier landings.
    pub fall_gravity_boost: f32,
    /// Minimum downward velocity assigned when a fast-fall spin starts.
    pub fast_fall_velocity: f32,
    /// Length of a fast-fall spin.
    pub spin_duration_ms: u64,
    /// Minimum time between the starts of two fast-fall spins.
    pub spin_cooldown_ms: u64,
}

impl Default for JumpTuning {
    fn default() -> Self {
        Self {
            coyote_window_ms: 120,
            jump_buffer_ms: 120,
            base_jump_velocity: -660.0,
            jump_cut_factor: 0.35,
            fall_gravity_boost: 420.0,
            fast_fall_velocity: 600.0,
            spin_duration_ms: 350,
            spin_cooldown_ms: 650,
        }
    }
}

/// Jump-related intents distilled from one frame of raw input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JumpIntents {
    /// The up arrow went down this frame.
    pub up_pressed: bool,
    /// The jump key went down this frame.
    pub jump_pressed: bool,
    /// The up arrow went up this frame.
    pub up_released: bool,
    /// The jump key went up this frame.
    pub jump_released: bool,
    /// The down arrow went down this frame.
    pub down_pressed: bool,
}

impl JumpIntents {
    /// Collects key intents from raw input. Pointer presses are not included;
    /// they are queued through [`InputBuffer::queue_pointer_jump`].
    #[must_use]
    pub fn from_raw(inputs: &[RawInput]) -> Self {
        let mut intents = Self::default();
        for input in inputs {
            match input {
                RawInput::KeyDown(Key::Up) => intents.up_pressed = true,
                RawInput::KeyDown(Key::Jump) => intents.jump_pressed = true,
                RawInput::KeyDown(Key::Down) => intents.down_pressed = true,
                RawInput::KeyUp(Key::Up) => intents.up_released = true,
                RawInput::KeyUp(Key::Jump) => intents.jump_released = true,
                _ => {}
            }
        }
        intents
    }

    fn jump_requested(&self) -> bool {
        self.up_pressed || self.jump_pressed
    }

    fn jump_released(&self) -> bool {
        self.up_released || self.jump_released
    }
}

/// Pure system that buffers jump input and emits jump commands.
#[derive(Debug)]
pub struct InputBuffer {
    tuning: JumpTuning,
    last_grounded_at: Option<Duration>,
    jump_buffered_at: Option<Duration>,
    pointer_jump_queued: bool,
    spin_ends_at: Option<Duration>,
    spin_ready_at: Duration,
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new(JumpTuning::default())
    }
}

impl InputBuffer {
    /// Creates a new input buffer using the provided tuning.
    #[must_use]
    pub fn new(tuning: JumpTuning) -> Self {
        Self {
            tuning,
            last_grounded_at: None,
            jump_buffered_at: None,
            pointer_jump_queued: false,
            spin_ends_at: None,
            spin_ready_at: Duration::ZERO,
        }
    }

    /// Queues a pointer tap as a jump intent, consumed exactly once by the next tick.
    pub fn queue_pointer_jump(&mut self) {
        self.pointer_jump_queued = true;
    }

    /// Reports whether a buffered jump is still waiting to fire.
    #[must_use]
    pub fn has_buffered_jump(&self) -> bool {
        self.jump_buffered_at.is_some()
    }

    /// Reports whether a fast-fall spin is in progress.
    #[must_use]
    pub fn is_spinning(&self) -> bool {
        self.spin_ends_at.is_some()
    }

    /// Consumes the tick's events, this frame's intents and the player body
    /// state to emit jump, jump-cut, fast-fall and fall-gravity commands.
    ///
    /// Nothing happens unless `events` contains an [`Event::TimeAdvanced`].
    pub fn handle(
        &mut self,
        events: &[Event],
        intents: JumpIntents,
        player: PlayerSnapshot,
        power: PowerEffect,
        out: &mut Vec<Command>,
    ) {
        let Some(now) = latest_time(events) else {
            return;
        };

        if player.grounded {
            self.last_grounded_at = Some(now);
        }

        let pointer_jump = self.consume_pointer_jump();
        if intents.jump_requested() || pointer_jump {
            self.jump_buffered_at = Some(now);
        }

        if self.buffered_jump_ready(now, player.grounded) {
            self.jump_buffered_at = None;
            out.push(Command::LaunchJump {
                velocity: self.tuning.base_jump_velocity * power.jump_velocity_scale(),
            });
        } else if self.buffered_jump_stale(now) {
            self.jump_buffered_at = None;
        }

        if intents.jump_released() && player.velocity_y < 0.0 {
            out.push(Command::CutJump {
                velocity: player.velocity_y * self.tuning.jump_cut_factor,
            });
        }

        self.finish_spin(now);
        if intents.down_pressed && !player.grounded && self.can_spin(now) {
            self.spin_ends_at = Some(now + Duration::from_millis(self.tuning.spin_duration_ms));
            self.spin_ready_at = now + Duration::from_millis(self.tuning.spin_cooldown_ms);
            out.push(Command::StartFastFall {
                velocity: player.velocity_y.max(self.tuning.fast_fall_velocity),
            });
        }

        let falling = player.velocity_y > 0.0 && !player.grounded;
        out.push(Command::SetFallGravity {
            boost: if falling {
                self.tuning.fall_gravity_boost
            } else {
                0.0
            },
        });
    }

    fn consume_pointer_jump(&mut self) -> bool {
        std::mem::replace(&mut self.pointer_jump_queued, false)
    }

    fn buffered_jump_stale(&self, now: Duration) -> bool {
        self.jump_buffered_at.is_some_and(|buffered_at| {
            now.saturating_sub(buffered_at) > Duration::from_millis(self.tuning.jump_buffer_ms)
        })
    }

    fn buffered_jump_ready(&self, now: Duration, grounded: bool) -> bool {
        let Some(buffered_at) = self.jump_buffered_at else {
            return false;
        };

        let buffer_fresh =
            now.saturating_sub(buffered_at) <= Duration::from_millis(self.tuning.jump_buffer_ms);
        let within_coyote = self.last_grounded_at.is_some_and(|grounded_at| {
            now.saturating_sub(grounded_at) <= Duration::from_millis(self.tuning.coyote_window_ms)
        });

        buffer_fresh && (grounded || within_coyote)
    }

    fn finish_spin(&mut self, now: Duration) {
        if self.spin_ends_at.is_some_and(|ends_at| now >= ends_at) {
            self.spin_ends_at = None;
        }
    }

    fn can_spin(&self, now: Duration) -> bool {
        self.spin_ends_at.is_none() && now >= self.spin_ready_at
    }
}

fn latest_time(events: &[Event]) -> Option<Duration> {
    events.iter().rev().find_map(|event| match event {
        Event::TimeAdvanced { now, .. } => Some(*now),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_jump_is_consumed_once() {
        let mut buffer = InputBuffer::default();
        buffer.queue_pointer_jump();
        buffer.queue_pointer_jump();
        assert!(buffer.consume_pointer_jump());
        assert!(!buffer.consume_pointer_jump());
    }

    #[test]
    fn intents_ignore_unrelated_keys() {
        let intents = JumpIntents::from_raw(&[
            RawInput::KeyDown(Key::Char('x')),
            RawInput::KeyDown(Key::Enter),
            RawInput::PointerDown { x: 10.0, y: 10.0 },
        ]);
        assert_eq!(intents, JumpIntents::default());
    }

    #[test]
    fn release_of_either_jump_key_counts() {
        let intents = JumpIntents::from_raw(&[RawInput::KeyUp(Key::Up)]);
        assert!(intents.jump_released());
        assert!(!intents.jump_requested());
    }
}
