//! RoomBall: a ball bouncing in a closed room, struck by a hand-held
//! racket and thrown by a tracked hand.
//!
//! This crate owns the per-frame simulation state and the fixed update
//! ordering; the geometric heavy lifting lives in `roomball_physics`. The
//! host (renderer, audio, VR runtime) feeds in pose matrices and button
//! states once per frame and consumes the resulting ball transform plus
//! discrete events.
//!
//! - `ball`: ball state and free-flight integration
//! - `room`: wall/floor/ceiling boundary resolution with resting state
//! - `grab`: hand-driven pickup and throw
//! - `rally`: consecutive-hit scoring
//! - `world`: the per-frame step in fixed stage order
//! - `session`: host-facing driver around a blocking pose source
//! - `config`: tunable coefficients, loadable from TOML
//! - `events`: discrete signals for sound, haptics and score display

pub mod ball;
pub mod config;
pub mod events;
pub mod grab;
pub mod rally;
pub mod room;
pub mod session;
pub mod world;
