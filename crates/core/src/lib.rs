//! RoomBall core types shared across crates.
//!
//! Physics runs in nalgebra `f64`; the renderer consumes glam `f32`
//! matrices. This crate provides the shared re-exports, the conversion at
//! that boundary, and the axis-aligned bounding box used for the racket.

use nalgebra as na;

// Re-export key types so downstream crates don't repeat use-declarations
pub use na::{Isometry3, Matrix4, Point3, Rotation3, Translation3, Unit, UnitQuaternion, Vector3};

/// Convert nalgebra `Isometry3<f64>` → glam `Mat4` for the render handoff.
pub fn isometry_to_glam(iso: &Isometry3<f64>) -> glam::Mat4 {
    let m = iso.to_homogeneous();
    let mut cols = [0.0_f32; 16];
    for c in 0..4 {
        for r in 0..4 {
            cols[c * 4 + r] = m[(r, c)] as f32;
        }
    }
    glam::Mat4::from_cols_array(&cols)
}

/// Convert nalgebra `Vector3<f64>` → glam `Vec3`.
pub fn vec3_to_glam(v: &Vector3<f64>) -> glam::Vec3 {
    glam::Vec3::new(v.x as f32, v.y as f32, v.z as f32)
}

/// Translation column of a raw 4×4 tracking matrix.
pub fn translation_of(m: &Matrix4<f64>) -> Vector3<f64> {
    Vector3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)])
}

/// Rotation block of a raw 4×4 tracking matrix.
///
/// Tracking poses are rigid transforms, so the upper-left 3×3 block is
/// taken as-is without re-orthogonalization.
pub fn rotation_of(m: &Matrix4<f64>) -> UnitQuaternion<f64> {
    let r = m.fixed_view::<3, 3>(0, 0).into_owned();
    UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(r))
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Vector3<f64>,
    pub max: Vector3<f64>,
}

impl Aabb {
    pub fn new(min: Vector3<f64>, max: Vector3<f64>) -> Self {
        Self { min, max }
    }

    /// Tight bounds of a point cloud (e.g. mesh vertex positions).
    ///
    /// Returns `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vector3<f64>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::new(first, first);
        for p in iter {
            bounds.expand(&p);
        }
        Some(bounds)
    }

    pub fn contains(&self, p: &Vector3<f64>) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    pub fn center(&self) -> Vector3<f64> {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vector3<f64> {
        (self.max - self.min) * 0.5
    }

    /// Expand to include a point.
    pub fn expand(&mut self, p: &Vector3<f64>) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// The eight corner points, in bit order (x, y, z low/high).
    pub fn corners(&self) -> [Vector3<f64>; 8] {
        let mut out = [Vector3::zeros(); 8];
        for (i, corner) in out.iter_mut().enumerate() {
            *corner = Vector3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
        }
        out
    }
}
