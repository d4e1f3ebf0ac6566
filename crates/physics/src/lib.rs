//! RoomBall collision engine.
//!
//! Pure geometry and response math for a sphere striking a hand-held box
//! racket. Everything here is stateless apart from [`spin::SpinIntegrator`]
//! and operates on values passed in by the simulation loop, so each piece
//! can be tested in isolation:
//!
//! - `geometry`: sphere-vs-plane/segment/point intersection tests
//! - `racket`: box decomposition into faces, edges and corners, with
//!   closest-hit contact selection
//! - `response`: reflection, restitution and racket-motion transfer
//! - `spin`: per-frame rotation increment with decay

pub mod geometry;
pub mod racket;
pub mod response;
pub mod spin;
