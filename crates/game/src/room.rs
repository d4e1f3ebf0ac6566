//! Room boundary resolution.
//!
//! The room is a cube of half-extent `half_extent` centered at the origin,
//! Y up. Each of the six half-spaces is checked from a wall table rather
//! than unrolled branches; a wall responds only when the ball surface has
//! reached it and the ball is still moving into it.

use nalgebra::Vector3;

use crate::ball::Ball;

/// Identity of a room boundary, seen from the default view into the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Right,
    Left,
    Floor,
    Ceiling,
    Back,
    Front,
}

impl Wall {
    pub fn is_floor(&self) -> bool {
        matches!(self, Wall::Floor)
    }

    /// Side walls count toward the rally; floor and ceiling do not.
    pub fn scores(&self) -> bool {
        matches!(self, Wall::Right | Wall::Left | Wall::Back | Wall::Front)
    }
}

/// Wall table: (axis index, outward sign, identity).
const WALLS: [(usize, f64, Wall); 6] = [
    (0, -1.0, Wall::Right),
    (0, 1.0, Wall::Left),
    (1, -1.0, Wall::Floor),
    (1, 1.0, Wall::Ceiling),
    (2, -1.0, Wall::Back),
    (2, 1.0, Wall::Front),
];

/// One resolved wall contact.
#[derive(Debug, Clone, Copy)]
pub struct WallContact {
    pub wall: Wall,
    /// Ball speed after the bounce, for volume scaling downstream.
    pub speed: f64,
    /// Floor only: residual vertical speed fell below the rest threshold
    /// and was zeroed; the caller should suspend gravity.
    pub came_to_rest: bool,
}

/// The fixed cubic room.
#[derive(Debug, Clone, Copy)]
pub struct Room {
    pub half_extent: f64,
}

impl Room {
    pub fn new(half_extent: f64) -> Self {
        Self { half_extent }
    }

    /// Resolve all wall contacts for this frame.
    ///
    /// On contact the velocity component into the wall is inverted, the
    /// whole velocity and the spin rate are scaled by `restitution`. On
    /// the floor, a residual vertical speed below `rest_threshold` snaps
    /// to zero to stop infinite micro-bouncing.
    pub fn resolve(
        &self,
        ball: &mut Ball,
        restitution: f64,
        rest_threshold: f64,
    ) -> Vec<WallContact> {
        let mut contacts = Vec::new();
        for &(axis, sign, wall) in WALLS.iter() {
            let reached = sign * ball.position[axis] >= self.half_extent - ball.radius;
            let approaching = sign * ball.velocity[axis] >= 0.0;
            if !reached || !approaching {
                continue;
            }

            ball.velocity[axis] = -ball.velocity[axis];
            ball.velocity *= restitution;
            ball.spin.scale(restitution);

            let mut came_to_rest = false;
            if wall.is_floor() && ball.velocity.y.abs() < rest_threshold {
                ball.velocity.y = 0.0;
                came_to_rest = true;
            }

            contacts.push(WallContact {
                wall,
                speed: ball.speed(),
                came_to_rest,
            });
        }
        contacts
    }

    /// True while the ball is strictly inside all six boundaries.
    pub fn contains(&self, ball: &Ball) -> bool {
        let limit = self.half_extent - ball.radius;
        ball.position.iter().all(|c| c.abs() < limit)
    }
}
