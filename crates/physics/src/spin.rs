//! Ball spin as a per-frame rotation increment.
//!
//! The increment is composed multiplicatively into the ball orientation
//! every frame and its angle decays toward zero (rolling friction).

use nalgebra::{UnitQuaternion, Vector3};

/// Accumulated angular velocity, stored as the rotation applied per frame.
#[derive(Debug, Clone, Default)]
pub struct SpinIntegrator {
    increment: UnitQuaternion<f64>,
}

impl SpinIntegrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the increment outright (grab release sets the hand's
    /// rotational delta as the new spin).
    pub fn set(&mut self, increment: UnitQuaternion<f64>) {
        self.increment = increment;
    }

    /// Accumulate a further rotation into the increment.
    pub fn compose(&mut self, delta: &UnitQuaternion<f64>) {
        self.increment = self.increment * delta;
    }

    /// Scale the spin rate by `factor`.
    ///
    /// A zero-angle increment has no axis to renormalize; it is left
    /// untouched so no NaN can enter the state.
    pub fn scale(&mut self, factor: f64) {
        if let Some((axis, angle)) = self.increment.axis_angle() {
            self.increment = UnitQuaternion::from_axis_angle(&axis, angle * factor);
        }
    }

    /// Current rotation rate in radians per frame.
    pub fn rate(&self) -> f64 {
        self.increment.angle()
    }

    /// Spin axis, when the rate is non-zero.
    pub fn axis(&self) -> Option<Vector3<f64>> {
        self.increment.axis().map(|a| a.into_inner())
    }

    pub fn reset(&mut self) {
        self.increment = UnitQuaternion::identity();
    }

    /// Decay the rate by `decay`, then compose the increment into the ball
    /// orientation. Called once per frame after all collision responses.
    pub fn advance(&mut self, orientation: &mut UnitQuaternion<f64>, decay: f64) {
        self.scale(decay);
        *orientation = *orientation * self.increment;
    }
}
