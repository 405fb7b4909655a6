use std::time::Duration;

use bike_runner_core::{EntityId, EntityKind};
use bike_runner_rendering::{BiomePalette, Color, Renderer, Tween, TweenTarget};
use glam::Vec2;
use tracing::{debug, info, trace};

/// Renderer that narrates the scene through `tracing` instead of drawing it.
#[derive(Debug, Default)]
pub(crate) struct TraceRenderer {
    visuals: usize,
    shakes: usize,
}

impl TraceRenderer {
    /// Number of entity visuals currently alive.
    pub(crate) fn visuals(&self) -> usize {
        self.visuals
    }

    /// Number of camera shakes requested so far.
    pub(crate) fn shakes(&self) -> usize {
        self.shakes
    }
}

impl Renderer for TraceRenderer {
    fn spawn_visual(&mut self, entity: EntityId, kind: EntityKind, position: Vec2) {
        self.visuals += 1;
        trace!(entity = entity.get(), ?kind, x = position.x, y = position.y, "spawn visual");
    }

    fn move_visual(&mut self, entity: EntityId, position: Vec2) {
        trace!(entity = entity.get(), x = position.x, y = position.y, "move visual");
    }

    fn destroy_visual(&mut self, entity: EntityId) {
        self.visuals = self.visuals.saturating_sub(1);
        trace!(entity = entity.get(), "destroy visual");
    }

    fn animate(&mut self, target: TweenTarget, tween: Tween) {
        trace!(?target, property = ?tween.property, "tween");
    }

    fn show_feedback(&mut self, icon: &'static str, message: &'static str) {
        info!(icon, message, "hud");
    }

    fn hide_power_icon(&mut self) {}

    fn set_power_indicator(&mut self, _remaining: Option<f32>) {}

    fn set_player_tint(&mut self, tint: Color) {
        trace!(?tint, "player tint");
    }

    fn crossfade(&mut self, palette: BiomePalette, duration: Duration) {
        debug!(sky = ?palette.sky, ?duration, "crossfade");
    }

    fn show_banner(&mut self, text: String) {
        info!(%text, "banner");
    }

    fn set_score(&mut self, score: u64) {
        trace!(score, "score");
    }

    fn shake_camera(&mut self, duration: Duration, intensity: f32) {
        self.shakes += 1;
        debug!(?duration, intensity, "camera shake");
    }
}
