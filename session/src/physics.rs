use bike_runner_core::Event;

/// Physics collaborator that integrates the player body.
///
/// The session never reads positions back through this trait; body state
/// arrives with every frame as a [`bike_runner_core::PlayerSnapshot`].
pub trait Physics {
    /// Sets the player's horizontal velocity.
    fn set_forward_speed(&mut self, speed: f32);

    /// Sets the player's vertical velocity; negative values move upward.
    fn set_vertical_velocity(&mut self, velocity: f32);

    /// Sets the extra gravity applied to the player body.
    fn set_fall_gravity(&mut self, boost: f32);

    /// Freezes the simulation.
    fn pause(&mut self);

    /// Resumes a frozen simulation.
    fn resume(&mut self);

    /// Rebuilds the scene for a fresh run.
    fn reset(&mut self);
}

/// Forwards the physics side effects of `events` to `physics`.
pub fn forward<P: Physics + ?Sized>(events: &[Event], physics: &mut P) {
    for event in events {
        match event {
            Event::RunStarted => physics.resume(),
            Event::ForwardSpeedChanged { speed } => physics.set_forward_speed(*speed),
            Event::JumpFired { velocity }
            | Event::JumpCut { velocity }
            | Event::FastFallStarted { velocity } => physics.set_vertical_velocity(*velocity),
            Event::FallGravityChanged { boost } => physics.set_fall_gravity(*boost),
            Event::RunEnded { .. } => {
                physics.pause();
                physics.set_forward_speed(0.0);
                physics.set_vertical_velocity(0.0);
                physics.set_fall_gravity(0.0);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Physics for Recorder {
        fn set_forward_speed(&mut self, speed: f32) {
            self.calls.push(format!("speed {speed}"));
        }

        fn set_vertical_velocity(&mut self, velocity: f32) {
            self.calls.push(format!("vy {velocity}"));
        }

        fn set_fall_gravity(&mut self, boost: f32) {
            self.calls.push(format!("gravity {boost}"));
        }

        fn pause(&mut self) {
            self.calls.push("pause".to_owned());
        }

        fn resume(&mut self) {
            self.calls.push("resume".to_owned());
        }

        fn reset(&mut self) {
            self.calls.push("reset".to_owned());
        }
    }

    #[test]
    fn jump_family_sets_vertical_velocity() {
        let mut physics = Recorder::default();
        forward(
            &[
                Event::JumpFired { velocity: -660.0 },
                Event::JumpCut { velocity: -100.0 },
                Event::FastFallStarted { velocity: 600.0 },
            ],
            &mut physics,
        );
        assert_eq!(physics.calls, vec!["vy -660", "vy -100", "vy 600"]);
    }

    #[test]
    fn run_end_freezes_body() {
        let mut physics = Recorder::default();
        forward(&[Event::RunEnded { score: 12 }], &mut physics);
        assert_eq!(
            physics.calls,
            vec!["pause", "speed 0", "vy 0", "gravity 0"]
        );
    }
}
