//! The per-frame physics world.
//!
//! All simulation state lives in one [`PhysicsWorld`] passed explicitly
//! into each update, so tests can run independent worlds side by side.
//! Stage order within a frame is fixed and must not be rearranged:
//! grab/release transitions, then free-flight forces, then room
//! boundaries, then the racket, then integration, and finally the
//! previous-racket-pose bookkeeping for next frame's surface velocity.

use nalgebra::{Matrix4, Point3};
use roomball_core::{rotation_of, translation_of, Aabb};
use roomball_physics::racket::RacketCollider;
use roomball_physics::response;
use tracing::debug;

use crate::ball::Ball;
use crate::config::SimConfig;
use crate::events::{impact_haptic_intensity, Event, HapticTarget};
use crate::grab::{GrabController, GrabTransition};
use crate::rally::RallyTracker;
use crate::room::Room;

/// Poses and buttons for one frame, as delivered by the tracking runtime.
#[derive(Debug, Clone)]
pub struct FrameInput {
    /// Racket controller world transform (raw tracking matrix).
    pub racket_pose: Matrix4<f64>,
    /// Hand controller world transform.
    pub hand_pose: Matrix4<f64>,
    /// Hand trigger state (grab).
    pub trigger: bool,
    /// Side button state (reset).
    pub reset: bool,
}

impl FrameInput {
    /// Idle input: both controllers at the origin, no buttons.
    pub fn idle() -> Self {
        Self {
            racket_pose: Matrix4::identity(),
            hand_pose: Matrix4::identity(),
            trigger: false,
            reset: false,
        }
    }
}

/// Racket pose pair plus collision shape. `previous` always holds the
/// pose from the frame before, so racket surface velocity can be derived
/// by finite difference.
#[derive(Debug, Clone)]
pub struct RacketState {
    pub current: Matrix4<f64>,
    pub previous: Matrix4<f64>,
    pub collider: RacketCollider,
}

pub struct PhysicsWorld {
    pub ball: Ball,
    pub racket: RacketState,
    pub room: Room,
    pub config: SimConfig,
    /// False while the ball rests on the floor.
    pub gravity_armed: bool,
    /// Free flight only runs after the first grab.
    pub in_play: bool,
    grab: GrabController,
    rally: RallyTracker,
}

impl PhysicsWorld {
    pub fn new(config: SimConfig, racket_bounds: Aabb) -> Self {
        Self {
            ball: Ball::new(config.ball_radius, config.launch_position()),
            racket: RacketState {
                current: Matrix4::identity(),
                previous: Matrix4::identity(),
                collider: RacketCollider::new(racket_bounds),
            },
            room: Room::new(config.room_half_extent),
            grab: GrabController::new(),
            rally: RallyTracker::new(config.max_floor_bounces),
            gravity_armed: true,
            in_play: false,
            config,
        }
    }

    pub fn rally(&self) -> u32 {
        self.rally.rally()
    }

    pub fn is_held(&self) -> bool {
        self.grab.held()
    }

    /// Advance the simulation by one frame.
    pub fn step(&mut self, input: &FrameInput) -> Vec<Event> {
        let mut events = Vec::new();
        self.racket.current = input.racket_pose;

        if input.reset {
            self.reset(&mut events);
        }

        // Grab/release transitions override free flight
        let hand_position = translation_of(&input.hand_pose);
        let hand_rotation = rotation_of(&input.hand_pose);
        match self.grab.update(
            input.trigger,
            hand_position,
            hand_rotation,
            &mut self.ball,
            self.config.grab_epsilon,
        ) {
            GrabTransition::Grabbed => {
                self.in_play = true;
                self.gravity_armed = true;
                debug!("ball grabbed");
                events.push(Event::HapticPulse {
                    target: HapticTarget::Hand,
                    intensity: 1.0,
                });
            }
            GrabTransition::Carried => {
                events.push(Event::HapticPulse {
                    target: HapticTarget::Hand,
                    intensity: 1.0,
                });
            }
            GrabTransition::Released { velocity, spin } => {
                self.ball.velocity = velocity;
                self.ball.spin.set(spin);
                debug!(speed = self.ball.speed(), "ball released");
            }
            GrabTransition::None => {}
        }

        if !self.grab.held() && self.in_play {
            let gravity = if self.gravity_armed {
                self.config.gravity
            } else {
                0.0
            };
            self.ball
                .apply_free_flight(gravity, self.config.air_resistance);

            self.resolve_room(&mut events);
            self.resolve_racket(&mut events);

            self.ball.integrate(self.config.spin_decay);
        }

        // Next frame derives racket surface velocity from this pose
        self.racket.previous = self.racket.current;
        events
    }

    fn reset(&mut self, events: &mut Vec<Event>) {
        self.ball.reset(self.config.launch_position());
        self.grab.reset();
        self.rally.reset();
        self.in_play = false;
        self.gravity_armed = true;
        debug!("simulation reset");
        events.push(Event::Reset);
        events.push(Event::ScoreChanged { rally: 0 });
    }

    fn resolve_room(&mut self, events: &mut Vec<Event>) {
        let contacts = self.room.resolve(
            &mut self.ball,
            self.config.wall_restitution,
            self.config.rest_threshold,
        );
        for contact in contacts {
            if contact.came_to_rest {
                self.gravity_armed = false;
            }
            events.push(Event::WallHit {
                wall: contact.wall,
                speed: contact.speed,
            });
            if let Some(rally) = self.rally.on_wall_hit(contact.wall) {
                debug!(rally, "score changed");
                events.push(Event::ScoreChanged { rally });
            }
        }
    }

    fn resolve_racket(&mut self, events: &mut Vec<Event>) {
        let Some(contact) =
            self.racket
                .collider
                .contact(&self.racket.current, &self.ball.position, self.ball.radius)
        else {
            return;
        };
        // The collider already inverted this matrix, so it is invertible here
        let Some(inv) = self.racket.current.try_inverse() else {
            return;
        };

        let local_velocity = inv.transform_vector(&self.ball.velocity);
        let surface = response::surface_velocity(
            &contact.point,
            &self.racket.current,
            &self.racket.previous,
            &inv,
        );
        let Some(impact) = response::resolve(
            &contact.center,
            &contact.point,
            &local_velocity,
            &surface,
            self.ball.radius,
            &self.config.impact_params(),
        ) else {
            return;
        };

        self.ball.velocity = self.racket.current.transform_vector(&impact.velocity);
        self.ball.position = self
            .racket
            .current
            .transform_point(&Point3::from(impact.center))
            .coords;
        self.ball.spin.compose(&impact.spin_increment);
        self.ball.spin.scale(self.config.racket_restitution);

        // A hit that restores vertical motion re-launches a resting ball
        if self.ball.velocity.y.abs() > self.config.rest_threshold {
            self.gravity_armed = true;
        }

        self.rally.on_racket_hit();
        let speed = self.ball.speed();
        debug!(speed, "racket hit");
        events.push(Event::RacketHit { speed });
        events.push(Event::HapticPulse {
            target: HapticTarget::Racket,
            intensity: impact_haptic_intensity(speed),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn still_config() -> SimConfig {
        // No ambient forces, so assertions see collision effects alone
        SimConfig {
            gravity: 0.0,
            air_resistance: 1.0,
            ..SimConfig::default()
        }
    }

    fn racket_bounds() -> Aabb {
        Aabb::new(
            Vector3::new(-0.1, -0.1, -0.4),
            Vector3::new(0.1, 0.1, 0.0),
        )
    }

    fn world_in_play(config: SimConfig) -> PhysicsWorld {
        let mut world = PhysicsWorld::new(config, racket_bounds());
        world.in_play = true;
        world
    }

    fn has_racket_hit(events: &[Event]) -> bool {
        events.iter().any(|e| matches!(e, Event::RacketHit { .. }))
    }

    #[test]
    fn test_wall_bounce_reflects_and_reports() {
        let mut world = world_in_play(still_config());
        world.ball.position = Vector3::new(-1.85, 0.0, 0.0);
        world.ball.velocity = Vector3::new(-0.5, 0.0, 0.0);

        let events = world.step(&FrameInput::idle());

        assert!(
            (world.ball.velocity - Vector3::new(0.4, 0.0, 0.0)).norm() < 1e-12,
            "velocity after -X wall: {:?}",
            world.ball.velocity
        );
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::WallHit { speed, .. } if (*speed - 0.4).abs() < 1e-12)));
    }

    #[test]
    fn test_racket_hit_emits_events_and_reflects() {
        let mut world = world_in_play(still_config());
        world.ball.position = Vector3::new(0.0, 0.0, 0.1);
        world.ball.velocity = Vector3::new(0.0, 0.0, -0.1);

        let events = world.step(&FrameInput::idle());

        // Reflected off the +Z face with racket restitution, then pushed out
        // of the box and integrated
        assert!(
            (world.ball.velocity - Vector3::new(0.0, 0.0, 0.06)).norm() < 1e-12,
            "velocity after racket: {:?}",
            world.ball.velocity
        );
        assert!(has_racket_hit(&events));
        assert!(events.iter().any(|e| matches!(
            e,
            Event::HapticPulse {
                target: HapticTarget::Racket,
                ..
            }
        )));
        assert!(world.ball.position.z > world.ball.radius, "pushed clear of the racket");
    }

    #[test]
    fn test_racket_hit_then_wall_scores() {
        let mut world = world_in_play(still_config());
        world.ball.position = Vector3::new(0.0, 0.0, 0.1);
        world.ball.velocity = Vector3::new(0.0, 0.0, -0.1);
        let events = world.step(&FrameInput::idle());
        assert!(has_racket_hit(&events));
        assert_eq!(world.rally(), 0, "no point before the wall");

        world.ball.position = Vector3::new(0.0, 0.0, 1.86);
        world.ball.velocity = Vector3::new(0.0, 0.0, 0.5);
        let events = world.step(&FrameInput::idle());

        assert!(events
            .iter()
            .any(|e| matches!(e, Event::ScoreChanged { rally: 1 })));
        assert_eq!(world.rally(), 1);
    }

    #[test]
    fn test_floor_rest_keeps_height_constant() {
        let mut world = world_in_play(SimConfig::default());
        world.ball.position = Vector3::new(0.0, -1.85, 0.0);
        world.ball.velocity = Vector3::new(0.0, -0.0001, 0.0);

        world.step(&FrameInput::idle());
        assert!(!world.gravity_armed, "gravity suspended at rest");
        assert_eq!(world.ball.velocity.y, 0.0);

        let resting_y = world.ball.position.y;
        for _ in 0..5 {
            world.step(&FrameInput::idle());
            assert_eq!(world.ball.position.y, resting_y, "resting ball must not sink");
        }
    }

    #[test]
    fn test_racket_hit_rearms_gravity() {
        let mut world = world_in_play(still_config());
        world.gravity_armed = false;
        world.ball.position = Vector3::new(0.0, 0.2, -0.2);
        world.ball.velocity = Vector3::new(0.0, -0.1, 0.0);

        let events = world.step(&FrameInput::idle());

        assert!(has_racket_hit(&events));
        assert!(world.gravity_armed, "vertical speed from the racket re-arms gravity");
    }

    #[test]
    fn test_grab_carry_release_throw() {
        let mut world = PhysicsWorld::new(still_config(), racket_bounds());
        // Keep the racket well away from the hand for this exchange
        let racket_away = Matrix4::new_translation(&Vector3::new(3.0, 0.0, 0.0));

        // Close the trigger on the ball
        let mut input = FrameInput::idle();
        input.racket_pose = racket_away;
        input.trigger = true;
        let events = world.step(&input);
        assert!(world.is_held());
        assert!(world.in_play);
        assert!(events.iter().any(|e| matches!(
            e,
            Event::HapticPulse {
                target: HapticTarget::Hand,
                ..
            }
        )));

        // Carry: the ball follows the hand, no free flight
        let mut input = FrameInput::idle();
        input.racket_pose = racket_away;
        input.trigger = true;
        input.hand_pose = Matrix4::new_translation(&Vector3::new(0.1, 0.05, 0.0));
        world.step(&input);
        assert!((world.ball.position - Vector3::new(0.1, 0.05, 0.0)).norm() < 1e-12);
        assert_eq!(world.ball.velocity, Vector3::zeros());

        // Release with a further hand delta: that delta becomes the throw
        let mut input = FrameInput::idle();
        input.racket_pose = racket_away;
        input.hand_pose = Matrix4::new_translation(&Vector3::new(0.13, 0.09, -0.02));
        world.step(&input);
        assert!(!world.is_held());
        assert!(
            (world.ball.velocity - Vector3::new(0.03, 0.04, -0.02)).norm() < 1e-12,
            "throw velocity: {:?}",
            world.ball.velocity
        );
    }

    #[test]
    fn test_held_ball_ignores_gravity() {
        let mut world = PhysicsWorld::new(SimConfig::default(), racket_bounds());
        let mut input = FrameInput::idle();
        input.trigger = true;
        world.step(&input);
        for _ in 0..10 {
            world.step(&input);
        }
        assert_eq!(world.ball.velocity, Vector3::zeros(), "held ball gains no speed");
        assert_eq!(world.ball.position, Vector3::zeros());
    }

    #[test]
    fn test_reset_returns_ball_to_launch() {
        let mut world = world_in_play(still_config());
        world.ball.position = Vector3::new(0.5, 0.5, 0.5);
        world.ball.velocity = Vector3::new(0.1, 0.0, 0.0);

        let mut input = FrameInput::idle();
        input.reset = true;
        let events = world.step(&input);

        assert!(events.contains(&Event::Reset));
        assert!(events.contains(&Event::ScoreChanged { rally: 0 }));
        assert!(!world.in_play);
        assert_eq!(world.ball.position, world.config.launch_position());
        assert_eq!(world.ball.velocity, Vector3::zeros());
    }

    #[test]
    fn test_degenerate_racket_pose_skips_racket_only() {
        let mut world = world_in_play(still_config());
        world.ball.position = Vector3::new(0.0, 0.0, 0.1);
        world.ball.velocity = Vector3::new(0.0, 0.0, -0.1);

        let mut input = FrameInput::idle();
        input.racket_pose = Matrix4::zeros();
        let events = world.step(&input);

        assert!(!has_racket_hit(&events), "degenerate pose must not produce a hit");
        // Free flight still ran
        assert!(
            (world.ball.position - Vector3::new(0.0, 0.0, 0.0)).norm() < 1e-12,
            "ball kept moving: {:?}",
            world.ball.position
        );
    }

    #[test]
    fn test_previous_racket_pose_tracks_current() {
        let mut world = world_in_play(still_config());
        let mut input = FrameInput::idle();
        input.racket_pose = Matrix4::new_translation(&Vector3::new(1.0, 1.0, 1.0));
        world.step(&input);
        assert_eq!(world.racket.previous, input.racket_pose);
    }
}
