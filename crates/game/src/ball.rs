//! Ball state: pose, per-frame velocity, spin, free-flight integration.

use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use roomball_physics::spin::SpinIntegrator;

/// The ball. Velocity is in world units per frame at the host refresh
/// rate; orientation evolves through the spin integrator.
#[derive(Debug, Clone)]
pub struct Ball {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub orientation: UnitQuaternion<f64>,
    pub spin: SpinIntegrator,
    pub radius: f64,
}

impl Ball {
    pub fn new(radius: f64, position: Vector3<f64>) -> Self {
        Self {
            position,
            velocity: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
            spin: SpinIntegrator::new(),
            radius,
        }
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    /// Put the ball back at `position` with zero motion and identity
    /// orientation.
    pub fn reset(&mut self, position: Vector3<f64>) {
        self.position = position;
        self.velocity = Vector3::zeros();
        self.orientation = UnitQuaternion::identity();
        self.spin.reset();
    }

    /// One frame of free flight: gravity pulls down, air resistance bleeds
    /// speed. `gravity` may be zero while the ball rests on the floor.
    pub fn apply_free_flight(&mut self, gravity: f64, air_resistance: f64) {
        self.velocity.y -= gravity;
        self.velocity *= air_resistance;
    }

    /// Advance position by one frame and compose the decayed spin into the
    /// orientation.
    pub fn integrate(&mut self, spin_decay: f64) {
        self.position += self.velocity;
        self.spin.advance(&mut self.orientation, spin_decay);
    }

    /// World transform handed to the renderer.
    pub fn world_transform(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::from(self.position), self.orientation)
    }
}
