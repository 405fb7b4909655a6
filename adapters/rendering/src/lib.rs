#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for bike runner adapters.
//!
//! The session only produces events. A [`Presenter`] turns those events into
//! calls on a [`Renderer`] and a [`ToneGenerator`], so every adapter shows the
//! same feedback for the same run.

mod hud;
mod tones;

use std::time::Duration;

use bike_runner_core::{EntityId, EntityKind, Event, PowerEffect, WorldPoint};
use glam::Vec2;

pub use hud::{biome_name, power_tint, BiomePalette, PowerFeedback, CRASH_TINT, NEUTRAL_TINT};
pub use tones::{Silent, Tone, ToneGenerator, Waveform};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Creates an opaque color from a `0xRRGGBB` value.
    #[must_use]
    pub const fn from_hex(rgb: u32) -> Self {
        Self::from_rgb_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Blends towards `other`; `amount` 0 keeps `self`, 1 yields `other`.
    #[must_use]
    pub fn lerp(self, other: Self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let mix = |from: f32, to: f32| from + (to - from) * amount;
        Self {
            red: mix(self.red, other.red),
            green: mix(self.green, other.green),
            blue: mix(self.blue, other.blue),
            alpha: mix(self.alpha, other.alpha),
        }
    }
}

/// Property animated by a [`Tween`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TweenProperty {
    /// Opacity.
    Alpha,
    /// Vertical offset from the resting position.
    OffsetY,
    /// Rotation in degrees.
    Angle,
}

/// Easing curve of a [`Tween`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Easing {
    /// Constant rate.
    Linear,
    /// Quadratic ease-out.
    QuadOut,
    /// Sinusoidal ease-in-out.
    SineInOut,
}

impl Easing {
    /// Eased progress for linear progress `t`, clamped to `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::SineInOut => -((std::f32::consts::PI * t).cos() - 1.0) / 2.0,
        }
    }
}

/// Property animation request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    /// Animated property.
    pub property: TweenProperty,
    /// Change applied to the property over the tween.
    pub delta: f32,
    /// Time to reach the end value.
    pub duration: Duration,
    /// Easing curve.
    pub easing: Easing,
    /// Time the end value is held before playing back.
    pub hold: Duration,
    /// Plays back to the start value after reaching the end.
    pub yoyo: bool,
    /// Restarts forever once finished.
    pub repeat: bool,
}

impl Tween {
    /// One-shot tween of `property` by `delta` over `duration_ms`.
    #[must_use]
    pub const fn once(property: TweenProperty, delta: f32, duration_ms: u64) -> Self {
        Self {
            property,
            delta,
            duration: Duration::from_millis(duration_ms),
            easing: Easing::Linear,
            hold: Duration::ZERO,
            yoyo: false,
            repeat: false,
        }
    }

    /// Power-up hover bob.
    pub const HOVER: Self = Self {
        easing: Easing::SineInOut,
        yoyo: true,
        repeat: true,
        ..Self::once(TweenProperty::OffsetY, 10.0, 1_000)
    };

    /// HUD feedback flash.
    pub const FEEDBACK: Self = Self {
        easing: Easing::QuadOut,
        hold: Duration::from_millis(900),
        yoyo: true,
        ..Self::once(TweenProperty::Alpha, 1.0, 200)
    };

    /// Biome banner flash.
    pub const BANNER: Self = Self {
        hold: Duration::from_millis(1_500),
        yoyo: true,
        ..Self::once(TweenProperty::Alpha, 1.0, 300)
    };
}

/// Something a [`Tween`] can animate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TweenTarget {
    /// The player sprite.
    Player,
    /// An entity visual.
    Entity(EntityId),
    /// The HUD feedback message.
    FeedbackMessage,
    /// The biome banner.
    Banner,
}

/// Scene collaborator driven by the [`Presenter`].
pub trait Renderer {
    /// Creates the visual of an entity at `position`.
    fn spawn_visual(&mut self, entity: EntityId, kind: EntityKind, position: Vec2);

    /// Relocates the visual of an entity.
    fn move_visual(&mut self, entity: EntityId, position: Vec2);

    /// Destroys the visual of an entity.
    fn destroy_visual(&mut self, entity: EntityId);

    /// Starts a property animation.
    fn animate(&mut self, target: TweenTarget, tween: Tween);

    /// Shows the power icon and message on the HUD.
    fn show_feedback(&mut self, icon: &'static str, message: &'static str);

    /// Hides the power icon.
    fn hide_power_icon(&mut self);

    /// Updates the remaining-time ring; `None` hides it.
    fn set_power_indicator(&mut self, remaining: Option<f32>);

    /// Tints the player sprite.
    fn set_player_tint(&mut self, tint: Color);

    /// Crossfades the background layers to `palette`.
    fn crossfade(&mut self, palette: BiomePalette, duration: Duration);

    /// Replaces the banner text.
    fn show_banner(&mut self, text: String);

    /// Updates the score readout.
    fn set_score(&mut self, score: u64);

    /// Shakes the camera.
    fn shake_camera(&mut self, duration: Duration, intensity: f32);
}

/// Turns core events into renderer and tone calls.
#[derive(Debug)]
pub struct Presenter<R, T> {
    renderer: R,
    tones: T,
}

impl<R: Renderer, T: ToneGenerator> Presenter<R, T> {
    /// Creates a presenter driving the provided collaborators.
    pub fn new(renderer: R, tones: T) -> Self {
        Self { renderer, tones }
    }

    /// Presents every event in order.
    pub fn present_all<'a>(&mut self, events: impl IntoIterator<Item = &'a Event>) {
        for event in events {
            self.present(event);
        }
    }

    /// Presents a single event.
    pub fn present(&mut self, event: &Event) {
        match event {
            Event::ScoreChanged { score } => self.renderer.set_score(*score),
            Event::EntitySpawned {
                entity,
                kind,
                position,
            } => {
                self.renderer.spawn_visual(*entity, *kind, to_vec2(*position));
                if kind.is_power_up() {
                    self.renderer.animate(TweenTarget::Entity(*entity), Tween::HOVER);
                }
            }
            Event::EntityMoved { entity, position } => {
                self.renderer.move_visual(*entity, to_vec2(*position));
            }
            Event::EntityDespawned { entity, .. } => self.renderer.destroy_visual(*entity),
            Event::JumpFired { .. } => {
                self.tones.play(Tone::JUMP);
                self.renderer.animate(
                    TweenTarget::Player,
                    Tween::once(TweenProperty::Angle, 360.0, 400),
                );
            }
            Event::FastFallStarted { .. } => self.renderer.animate(
                TweenTarget::Player,
                Tween::once(TweenProperty::Angle, 360.0, 350),
            ),
            Event::PowerActivated { kind, .. } => {
                self.feedback(PowerFeedback::Activated(*kind));
                self.tones.play(Tone::POWER);
                self.renderer.set_player_tint(power_tint(*kind));
            }
            Event::ShieldSpent { .. } => {
                self.feedback(PowerFeedback::ShieldSpent);
                self.tones.play(Tone::SHIELD);
                self.renderer.set_player_tint(NEUTRAL_TINT);
                self.renderer.hide_power_icon();
            }
            Event::PowerExpired { .. } => {
                self.renderer.hide_power_icon();
                self.renderer.set_player_tint(NEUTRAL_TINT);
            }
            Event::BiomeChanged { to, .. } => {
                self.renderer
                    .crossfade(BiomePalette::of(*to), Duration::from_millis(1_000));
                self.renderer
                    .show_banner(format!("NUEVO BIOMA: {}", biome_name(*to)));
                self.renderer.animate(TweenTarget::Banner, Tween::BANNER);
                for note in Tone::biome_chord() {
                    self.tones.play(note);
                }
            }
            Event::RunEnded { .. } => {
                self.renderer.shake_camera(Duration::from_millis(120), 0.01);
                self.renderer.set_player_tint(CRASH_TINT);
                self.tones.play(Tone::DEATH);
            }
            _ => {}
        }
    }

    /// Updates the remaining-time ring for the active effect at run time `now`.
    pub fn refresh_indicator(&mut self, power: PowerEffect, now: Duration) {
        self.renderer.set_power_indicator(power.remaining_ratio(now));
    }

    /// Renderer driven by the presenter.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Tone generator driven by the presenter.
    pub fn tones(&self) -> &T {
        &self.tones
    }

    fn feedback(&mut self, feedback: PowerFeedback) {
        self.renderer.show_feedback(feedback.icon(), feedback.message());
        self.renderer
            .animate(TweenTarget::FeedbackMessage, Tween::FEEDBACK);
    }
}

fn to_vec2(point: WorldPoint) -> Vec2 {
    Vec2::new(point.x, point.y)
}
