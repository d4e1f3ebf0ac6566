//! Racket bounding-box decomposition and closest-hit contact search.
//!
//! The racket is a finite oriented box. In its local frame the box is
//! axis-aligned, so contact testing decomposes into 6 finite faces,
//! 12 edges and 8 corners evaluated against the sphere primitives in
//! [`crate::geometry`]. A ball near a corner can satisfy several of those
//! tests at once; only the candidate nearest the ball center is the
//! physically correct contact, so the search keeps the closest hit.

use roomball_core::{Aabb, Matrix4, Point3, Vector3};

use crate::geometry;

/// One finite rectangular face of the local bounding box.
#[derive(Debug, Clone, Copy)]
struct Face {
    normal: Vector3<f64>,
    min: Vector3<f64>,
    max: Vector3<f64>,
}

/// A resolved ball-racket contact, expressed in racket-local space.
#[derive(Debug, Clone, Copy)]
pub struct RacketContact {
    /// Contact point on the box surface.
    pub point: Vector3<f64>,
    /// Ball center at detection time.
    pub center: Vector3<f64>,
}

/// Collision shape of the racket: its local-space bounding box.
#[derive(Debug, Clone, Copy)]
pub struct RacketCollider {
    bounds: Aabb,
}

impl RacketCollider {
    pub fn new(bounds: Aabb) -> Self {
        Self { bounds }
    }

    /// Build the collider from the racket's mesh vertex positions, the way
    /// the bounds are established once at startup. `None` for an empty mesh.
    pub fn from_mesh_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vector3<f64>>,
    {
        Aabb::from_points(points).map(Self::new)
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// The six faces, one pinned at each extreme of each axis.
    fn faces(&self) -> [Face; 6] {
        let (lo, hi) = (self.bounds.min, self.bounds.max);
        let mut faces = [Face {
            normal: Vector3::zeros(),
            min: lo,
            max: hi,
        }; 6];
        let mut i = 0;
        for axis in 0..3 {
            for sign in [1.0, -1.0] {
                let pin = if sign > 0.0 { hi[axis] } else { lo[axis] };
                let mut normal = Vector3::zeros();
                normal[axis] = sign;
                let mut min = lo;
                let mut max = hi;
                min[axis] = pin;
                max[axis] = pin;
                faces[i] = Face { normal, min, max };
                i += 1;
            }
        }
        faces
    }

    /// The twelve edges: for each axis direction, the four combinations of
    /// extremes on the two remaining axes.
    fn edges(&self) -> [(Vector3<f64>, Vector3<f64>); 12] {
        let (lo, hi) = (self.bounds.min, self.bounds.max);
        let mut edges = [(Vector3::zeros(), Vector3::zeros()); 12];
        let mut i = 0;
        for axis in 0..3 {
            let u = (axis + 1) % 3;
            let v = (axis + 2) % 3;
            for u_end in [lo[u], hi[u]] {
                for v_end in [lo[v], hi[v]] {
                    let mut start = Vector3::zeros();
                    start[axis] = lo[axis];
                    start[u] = u_end;
                    start[v] = v_end;
                    let mut end = start;
                    end[axis] = hi[axis];
                    edges[i] = (start, end);
                    i += 1;
                }
            }
        }
        edges
    }

    /// Closest contact between a sphere at `center` (racket-local) and the
    /// box surface, or `None` when nothing is within `radius`.
    pub fn closest_contact(&self, center: &Vector3<f64>, radius: f64) -> Option<Vector3<f64>> {
        let faces = self.faces();
        let edges = self.edges();
        let corners = self.bounds.corners();

        let face_hits = faces
            .iter()
            .filter_map(|f| geometry::intersect_plane(center, &f.normal, &f.min, &f.max, radius));
        let edge_hits = edges
            .iter()
            .filter_map(|(a, b)| geometry::intersect_segment(center, a, b, radius));
        let corner_hits = corners
            .iter()
            .filter_map(|c| geometry::intersect_point(center, c, radius));

        face_hits
            .chain(edge_hits)
            .chain(corner_hits)
            .min_by(|a, b| {
                (a - center)
                    .norm_squared()
                    .total_cmp(&(b - center).norm_squared())
            })
    }

    /// Contact for a ball given in world space.
    ///
    /// A numerically degenerate racket matrix cannot be inverted; that
    /// frame reports no contact rather than failing.
    pub fn contact(
        &self,
        racket_world: &Matrix4<f64>,
        center_world: &Vector3<f64>,
        radius: f64,
    ) -> Option<RacketContact> {
        let inv = racket_world.try_inverse()?;
        let center = inv.transform_point(&Point3::from(*center_world)).coords;
        let point = self.closest_contact(&center, radius)?;
        Some(RacketContact { point, center })
    }
}
