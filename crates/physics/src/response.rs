//! Impact response for ball-racket contacts.
//!
//! Runs entirely in racket-local space: the ball velocity is mirrored on
//! the reflection axis (contact point toward ball center) and damped by
//! restitution, the racket's own motion at the hit point feeds back into
//! the ball ("swinging adds energy"), and the tangential part of that
//! motion becomes spin.

use roomball_core::{Matrix4, Point3, Unit, UnitQuaternion, Vector3};

/// Tunables for a single impact resolution.
#[derive(Debug, Clone, Copy)]
pub struct ImpactParams {
    /// Fraction of speed retained after reflection.
    pub restitution: f64,
    /// Damped fraction of racket surface motion transferred to the ball.
    pub swing_transfer: f64,
    /// Spin angle per unit of tangential surface motion and ball speed.
    pub spin_coupling: f64,
    /// Clearance beyond the ball radius when pushing the ball out.
    pub depenetration_margin: f64,
}

/// Outcome of one resolved contact, in racket-local space.
#[derive(Debug, Clone)]
pub struct Impact {
    /// Updated ball velocity.
    pub velocity: Vector3<f64>,
    /// Ball center repositioned outside the racket volume.
    pub center: Vector3<f64>,
    /// Rotation increment to accumulate into the ball spin.
    pub spin_increment: UnitQuaternion<f64>,
}

/// Racket surface velocity at the contact point, in racket-local space.
///
/// The contact point is carried through the previous-frame and
/// current-frame racket transforms; the world-space finite difference is
/// then brought back into the current local frame via `current_inv`.
pub fn surface_velocity(
    contact: &Vector3<f64>,
    current: &Matrix4<f64>,
    previous: &Matrix4<f64>,
    current_inv: &Matrix4<f64>,
) -> Vector3<f64> {
    let p = Point3::from(*contact);
    let now = current.transform_point(&p);
    let before = previous.transform_point(&p);
    current_inv.transform_vector(&(now - before))
}

/// Resolve a contact into a new velocity, spin increment and pushed-out
/// ball center.
///
/// Returns `None` when the ball center coincides with the contact point:
/// the reflection axis is undefined, so the frame is skipped.
pub fn resolve(
    center: &Vector3<f64>,
    contact: &Vector3<f64>,
    velocity: &Vector3<f64>,
    surface_velocity: &Vector3<f64>,
    radius: f64,
    params: &ImpactParams,
) -> Option<Impact> {
    let axis = Unit::try_new(center - contact, 0.0)?;
    let normal = axis.into_inner();

    let mut velocity = *velocity;
    let mut spin = UnitQuaternion::identity();

    // Mirror on the reflection axis, but only when moving into the surface
    let approach = velocity.dot(&normal);
    if approach < 0.0 {
        let incoming = velocity;
        velocity = (velocity - normal * (2.0 * approach)) * params.restitution;
        let spin_axis = incoming.cross(&normal);
        if let Some(ax) = Unit::try_new(spin_axis, 0.0) {
            spin = UnitQuaternion::from_axis_angle(&ax, spin_axis.norm()) * spin;
        }
    }

    // Racket motion along the axis adds energy; across it, spin
    velocity += normal * (surface_velocity.dot(&normal) * params.swing_transfer);
    let swing_axis = surface_velocity.cross(&normal);
    if let Some(ax) = Unit::try_new(swing_axis, 0.0) {
        let angle = swing_axis.norm() * params.spin_coupling * velocity.norm();
        spin = UnitQuaternion::from_axis_angle(&ax, angle) * spin;
    }

    // Never leave the ball inside the racket
    let center = contact + normal * (radius + params.depenetration_margin);

    Some(Impact {
        velocity,
        center,
        spin_increment: spin,
    })
}
