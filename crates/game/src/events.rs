//! Discrete signals produced by the simulation.
//!
//! The physics core never plays sound, pulses a controller or draws a
//! score; it only reports what happened each frame. Hosts map these to
//! audio voices, haptics and the score display.

use crate::room::Wall;

/// Which controller should receive a haptic pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticTarget {
    Hand,
    Racket,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The ball bounced off a room boundary. `speed` is the post-bounce
    /// ball speed, for variable-volume playback.
    WallHit { wall: Wall, speed: f64 },
    /// The racket struck the ball.
    RacketHit { speed: f64 },
    /// Pulse a controller, intensity in `[0, 1]`.
    HapticPulse { target: HapticTarget, intensity: f64 },
    /// The rally counter changed.
    ScoreChanged { rally: u32 },
    /// The external reset was applied.
    Reset,
}

/// Haptic intensity for an impact, falling off with the resulting ball
/// speed: a dead ball hitting the racket thuds hard, a fast one stings
/// briefly.
pub fn impact_haptic_intensity(speed: f64) -> f64 {
    (1.0 / ((speed + 1e-4) * 100.0)).clamp(0.0, 1.0)
}
