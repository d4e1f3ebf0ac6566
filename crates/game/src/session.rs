//! Host-facing session driver.
//!
//! The tracking runtime owns the frame cadence: every update begins with a
//! blocking pose fetch, and only then does physics run. The session wraps
//! that handshake and exposes the render-ready ball transform.

use roomball_core::isometry_to_glam;

use crate::events::Event;
use crate::world::{FrameInput, PhysicsWorld};

/// Reference update rate of the host device. Velocities throughout the
/// simulation are world units per frame at this rate.
pub const UPDATE_RATE_HZ: f64 = 90.0;

/// Frame-coherent pose source. `wait_poses` blocks until the device has
/// poses for the upcoming frame; nothing in the simulation may read
/// tracking data before it returns.
pub trait Tracking {
    fn wait_poses(&mut self) -> FrameInput;
}

pub struct Session {
    pub world: PhysicsWorld,
    frame: u64,
}

impl Session {
    pub fn new(world: PhysicsWorld) -> Self {
        Self { world, frame: 0 }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Run one update: fetch poses, then step the world.
    pub fn tick(&mut self, tracking: &mut dyn Tracking) -> Vec<Event> {
        let input = tracking.wait_poses();
        self.frame += 1;
        self.world.step(&input)
    }

    /// Ball transform for the renderer.
    pub fn ball_render_transform(&self) -> glam::Mat4 {
        isometry_to_glam(&self.world.ball.world_transform())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use nalgebra::{Matrix4, Vector3};
    use roomball_core::Aabb;

    /// Replays a fixed list of frames, then idles.
    struct Script {
        frames: Vec<FrameInput>,
        next: usize,
    }

    impl Script {
        fn new(frames: Vec<FrameInput>) -> Self {
            Self { frames, next: 0 }
        }
    }

    impl Tracking for Script {
        fn wait_poses(&mut self) -> FrameInput {
            let input = self
                .frames
                .get(self.next)
                .cloned()
                .unwrap_or_else(FrameInput::idle);
            self.next += 1;
            input
        }
    }

    fn session() -> Session {
        let config = SimConfig {
            gravity: 0.0,
            air_resistance: 1.0,
            ..SimConfig::default()
        };
        let bounds = Aabb::new(
            Vector3::new(-0.1, -0.1, -0.4),
            Vector3::new(0.1, 0.1, 0.0),
        );
        Session::new(PhysicsWorld::new(config, bounds))
    }

    fn held(hand: Vector3<f64>) -> FrameInput {
        FrameInput {
            racket_pose: Matrix4::new_translation(&Vector3::new(3.0, 0.0, 0.0)),
            hand_pose: Matrix4::new_translation(&hand),
            trigger: true,
            reset: false,
        }
    }

    fn open(hand: Vector3<f64>) -> FrameInput {
        FrameInput {
            trigger: false,
            ..held(hand)
        }
    }

    #[test]
    fn test_scripted_throw_flies_across_frames() {
        let mut session = session();
        let mut script = Script::new(vec![
            held(Vector3::zeros()),
            held(Vector3::new(0.01, 0.0, 0.0)),
            open(Vector3::new(0.03, 0.0, 0.0)),
            open(Vector3::new(0.03, 0.0, 0.0)),
            open(Vector3::new(0.03, 0.0, 0.0)),
        ]);

        session.tick(&mut script); // grab
        session.tick(&mut script); // carry
        session.tick(&mut script); // release: throw at 0.02/frame

        let x_after_release = session.world.ball.position.x;
        session.tick(&mut script);
        session.tick(&mut script);
        assert_eq!(session.frame(), 5);
        assert!(
            (session.world.ball.position.x - (x_after_release + 2.0 * 0.02)).abs() < 1e-12,
            "thrown ball should keep drifting"
        );
    }

    #[test]
    fn test_render_transform_follows_ball() {
        let mut session = session();
        session.world.ball.position = Vector3::new(0.4, -0.2, 0.7);
        let m = session.ball_render_transform();
        let col = m.col(3);
        assert!((col.x - 0.4).abs() < 1e-6);
        assert!((col.y - -0.2).abs() < 1e-6);
        assert!((col.z - 0.7).abs() < 1e-6);
    }
}
