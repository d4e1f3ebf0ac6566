//! Sphere-vs-primitive intersection tests.
//!
//! All tests run in racket-local space, where the racket's bounding box is
//! axis-aligned by construction and every face normal is a signed unit
//! axis. Each function returns the contact point on the primitive, or
//! `None` when the sphere misses it.

use roomball_core::Vector3;

/// Intersection of a sphere with a finite axis-aligned rectangle.
///
/// The rectangle lies in the plane through `rect_min` with the given unit
/// `normal`; `rect_min`/`rect_max` bound it on the two remaining axes. The
/// sphere hits only from the front: the signed distance from `center`
/// along `normal` must be in `(0, radius]`, and the projection of the
/// center onto the plane must fall inside the rectangle.
pub fn intersect_plane(
    center: &Vector3<f64>,
    normal: &Vector3<f64>,
    rect_min: &Vector3<f64>,
    rect_max: &Vector3<f64>,
    radius: f64,
) -> Option<Vector3<f64>> {
    let dist = (center - rect_min).dot(normal);
    if dist <= 0.0 || dist > radius {
        return None;
    }

    let anchor = center - normal * dist;
    // Bounds check on the two axes orthogonal to the normal
    for axis in 0..3 {
        if normal[axis] != 0.0 {
            continue;
        }
        if anchor[axis] < rect_min[axis] || anchor[axis] > rect_max[axis] {
            return None;
        }
    }
    Some(anchor)
}

/// Intersection of a sphere with a finite segment (a box edge).
///
/// Projects the center onto the segment's carrier line, clamps the
/// parameter to the segment, and accepts when the closest point lies
/// within `radius` of the center.
pub fn intersect_segment(
    center: &Vector3<f64>,
    seg_start: &Vector3<f64>,
    seg_end: &Vector3<f64>,
    radius: f64,
) -> Option<Vector3<f64>> {
    let span = seg_end - seg_start;
    let length = span.norm();
    if length == 0.0 {
        return None;
    }
    let dir = span / length;

    let t = (center - seg_start).dot(&dir).clamp(0.0, length);
    let closest = seg_start + dir * t;
    if (closest - center).norm() <= radius {
        Some(closest)
    } else {
        None
    }
}

/// Intersection of a sphere with a single point (a box corner).
pub fn intersect_point(
    center: &Vector3<f64>,
    point: &Vector3<f64>,
    radius: f64,
) -> Option<Vector3<f64>> {
    if (center - point).norm() <= radius {
        Some(*point)
    } else {
        None
    }
}
