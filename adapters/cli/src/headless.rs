use std::time::Duration;

use bike_runner_core::{
    Bounds, CameraView, Contact, EntityKind, Footprint, Key, PlayerSnapshot, RawInput, WorldPoint,
};
use bike_runner_session::Physics;
use bike_runner_world::query::EntityView;

/// Downward acceleration applied to the body, in world units per second squared.
const GRAVITY: f32 = 1_400.0;

/// Player collision box.
const BODY: Footprint = Footprint::new(40.0, 40.0);

/// Horizontal position of the player at run start.
const START_X: f32 = 100.0;

/// Distance from the camera's left edge to the player.
const CAMERA_LEAD: f32 = 200.0;

/// Distance between the viewport bottom and the ground line.
const GROUND_INSET: f32 = 40.0;

/// Kinematic stand-in for a physics engine: one falling box, a flat ground,
/// one-way platforms and overlap tests against every live entity.
#[derive(Clone, Debug)]
pub(crate) struct HeadlessPhysics {
    viewport: CameraView,
    centre: WorldPoint,
    velocity_y: f32,
    forward_speed: f32,
    fall_gravity: f32,
    grounded: bool,
    paused: bool,
}

impl HeadlessPhysics {
    /// Creates a body resting on the ground of a `width` by `height` viewport.
    pub(crate) fn new(width: f32, height: f32) -> Self {
        let mut physics = Self {
            viewport: CameraView::new(0.0, width, height),
            centre: WorldPoint::default(),
            velocity_y: 0.0,
            forward_speed: 0.0,
            fall_gravity: 0.0,
            grounded: true,
            paused: false,
        };
        physics.reset();
        physics
    }

    fn ground_y(&self) -> f32 {
        self.viewport.height - GROUND_INSET
    }

    fn bounds(&self) -> Bounds {
        Bounds::around(self.centre, BODY)
    }

    /// Body state reported to the session.
    pub(crate) fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.centre,
            velocity_y: self.velocity_y,
            grounded: self.grounded,
        }
    }

    /// Camera following the body.
    pub(crate) fn camera(&self) -> CameraView {
        CameraView::new(
            self.centre.x - CAMERA_LEAD,
            self.viewport.width,
            self.viewport.height,
        )
    }

    /// Integrates the body over `dt` and returns the contacts it touches.
    pub(crate) fn step(&mut self, dt: Duration, entities: &EntityView) -> Vec<Contact> {
        if self.paused {
            return Vec::new();
        }

        let seconds = dt.as_secs_f32();
        let previous_feet = self.bounds().max_y;
        self.centre.x += self.forward_speed * seconds;
        self.velocity_y += (GRAVITY + self.fall_gravity) * seconds;
        self.centre.y += self.velocity_y * seconds;
        self.grounded = false;

        let mut support = self.ground_y();
        if self.velocity_y >= 0.0 {
            let body = self.bounds();
            for entity in entities.iter() {
                let EntityKind::Platform { .. } = entity.kind else {
                    continue;
                };
                let platform = entity.kind.bounds(entity.position);
                let above = previous_feet <= platform.min_y && body.max_y >= platform.min_y;
                let across = body.max_x > platform.min_x && body.min_x < platform.max_x;
                if above && across {
                    support = support.min(platform.min_y);
                }
            }
        }
        if self.bounds().max_y >= support {
            self.centre.y = support - BODY.height / 2.0;
            self.velocity_y = self.velocity_y.min(0.0);
            self.grounded = true;
        }

        let body = self.bounds();
        entities
            .iter()
            .filter(|entity| body.overlaps(&entity.kind.bounds(entity.position)))
            .filter_map(|entity| match entity.kind {
                EntityKind::Obstacle(_) => Some(Contact::Obstacle(entity.id)),
                EntityKind::PowerUp(_) => Some(Contact::PowerUp(entity.id)),
                EntityKind::Platform { .. } => None,
            })
            .collect()
    }
}

impl Physics for HeadlessPhysics {
    fn set_forward_speed(&mut self, speed: f32) {
        self.forward_speed = speed;
    }

    fn set_vertical_velocity(&mut self, velocity: f32) {
        self.velocity_y = velocity;
        if velocity < 0.0 {
            self.grounded = false;
        }
    }

    fn set_fall_gravity(&mut self, boost: f32) {
        self.fall_gravity = boost;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn reset(&mut self) {
        self.centre = WorldPoint::new(START_X, self.ground_y() - BODY.height / 2.0);
        self.velocity_y = 0.0;
        self.forward_speed = 0.0;
        self.fall_gravity = 0.0;
        self.grounded = true;
        self.paused = false;
    }
}

/// Presses jump when an obstacle gets close.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Autopilot {
    reaction: Duration,
}

impl Autopilot {
    /// Creates an autopilot that jumps `reaction` before reaching an obstacle.
    pub(crate) const fn new(reaction: Duration) -> Self {
        Self { reaction }
    }

    /// Input for the next frame.
    pub(crate) fn inputs(&self, physics: &HeadlessPhysics, entities: &EntityView) -> Vec<RawInput> {
        if !physics.grounded {
            return Vec::new();
        }
        let body = physics.bounds();
        let lookahead = physics.forward_speed * self.reaction.as_secs_f32();
        let threat = entities.iter().any(|entity| {
            let EntityKind::Obstacle(_) = entity.kind else {
                return false;
            };
            let gap = entity.kind.bounds(entity.position).min_x - body.max_x;
            (0.0..=lookahead).contains(&gap)
        });
        if threat {
            vec![RawInput::KeyDown(Key::Jump)]
        } else {
            Vec::new()
        }
    }
}
