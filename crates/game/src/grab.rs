//! Hand-driven pickup and throw.
//!
//! While held, the ball follows the hand exactly: it translates by the
//! hand's frame-to-frame delta and mirrors the hand's rotation relative to
//! the grab instant. Releasing the trigger turns the most recent hand
//! motion into ball velocity and spin.

use nalgebra::{UnitQuaternion, Vector3};

use crate::ball::Ball;

/// What happened in the grab state machine this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum GrabTransition {
    None,
    /// The hand closed on the ball this frame.
    Grabbed,
    /// Still held; the ball followed the hand.
    Carried,
    /// The trigger opened: the ball flies with the hand's last motion.
    Released {
        velocity: Vector3<f64>,
        spin: UnitQuaternion<f64>,
    },
}

#[derive(Debug, Clone)]
pub struct GrabController {
    held: bool,
    prev_hand: Vector3<f64>,
    /// Inverse of the hand rotation at grab time; composing the current
    /// hand rotation with this yields the ball orientation while held.
    grab_reference: UnitQuaternion<f64>,
    /// Inverse of the previous frame's hand rotation, for the release spin.
    prev_hand_rot_inv: UnitQuaternion<f64>,
}

impl Default for GrabController {
    fn default() -> Self {
        Self::new()
    }
}

impl GrabController {
    pub fn new() -> Self {
        Self {
            held: false,
            prev_hand: Vector3::zeros(),
            grab_reference: UnitQuaternion::identity(),
            prev_hand_rot_inv: UnitQuaternion::identity(),
        }
    }

    pub fn held(&self) -> bool {
        self.held
    }

    /// Advance the state machine by one frame.
    pub fn update(
        &mut self,
        trigger: bool,
        hand_position: Vector3<f64>,
        hand_rotation: UnitQuaternion<f64>,
        ball: &mut Ball,
        grab_epsilon: f64,
    ) -> GrabTransition {
        if !self.held {
            let within_reach =
                (hand_position - ball.position).norm() <= ball.radius + grab_epsilon;
            if trigger && within_reach {
                self.held = true;
                self.grab_reference = hand_rotation.inverse();
                self.prev_hand_rot_inv = hand_rotation.inverse();
                self.prev_hand = hand_position;
                return GrabTransition::Grabbed;
            }
            return GrabTransition::None;
        }

        let delta = hand_position - self.prev_hand;
        if trigger {
            ball.position += delta;
            ball.orientation = hand_rotation * self.grab_reference;
            self.prev_hand = hand_position;
            self.prev_hand_rot_inv = hand_rotation.inverse();
            GrabTransition::Carried
        } else {
            self.held = false;
            GrabTransition::Released {
                velocity: delta,
                spin: hand_rotation * self.prev_hand_rot_inv,
            }
        }
    }

    /// Drop the hold without imparting motion (external reset).
    pub fn reset(&mut self) {
        self.held = false;
    }
}
