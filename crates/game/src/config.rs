//! Simulation tunables.
//!
//! Restitution, gravity and the other coefficients vary between builds of
//! the experience, so they load from a TOML file with every field
//! optional; the defaults reproduce the reference feel. Velocities and
//! accelerations are per frame at the host refresh rate, not per second.

use std::path::Path;

use nalgebra::Vector3;
use roomball_physics::response::ImpactParams;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Ball radius, world units.
    pub ball_radius: f64,
    /// Half-extent of the cubic room.
    pub room_half_extent: f64,
    /// Fraction of speed kept after a wall bounce.
    pub wall_restitution: f64,
    /// Fraction of speed kept after a racket hit.
    pub racket_restitution: f64,
    /// Downward acceleration per frame.
    pub gravity: f64,
    /// Velocity multiplier applied every free-flight frame.
    pub air_resistance: f64,
    /// Extra reach beyond the ball radius for grabbing.
    pub grab_epsilon: f64,
    /// Vertical speed below which a floor bounce comes to rest.
    pub rest_threshold: f64,
    /// Damped fraction of racket surface motion fed into the ball.
    pub swing_transfer: f64,
    /// Spin angle per unit of tangential racket motion and ball speed.
    pub spin_coupling: f64,
    /// Per-frame spin decay (rolling friction).
    pub spin_decay: f64,
    /// Consecutive floor bounces that end the rally.
    pub max_floor_bounces: u32,
    /// Clearance beyond the ball radius when pushing the ball off the
    /// racket after a hit.
    pub depenetration_margin: f64,
    /// Where the ball appears on reset.
    pub launch_offset: [f64; 3],
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ball_radius: 0.15,
            room_half_extent: 2.0,
            wall_restitution: 0.8,
            racket_restitution: 0.6,
            gravity: 0.0006,
            air_resistance: 0.999,
            grab_epsilon: 0.015,
            rest_threshold: 0.0006,
            swing_transfer: 0.05,
            spin_coupling: 20.0,
            spin_decay: 0.9999,
            max_floor_bounces: 2,
            depenetration_margin: 0.0006,
            launch_offset: [0.0, 0.0, 0.0],
        }
    }
}

impl SimConfig {
    /// Load from a TOML file. Missing fields fall back to the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: SimConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), "loaded simulation config");
        Ok(config)
    }

    pub fn launch_position(&self) -> Vector3<f64> {
        Vector3::new(
            self.launch_offset[0],
            self.launch_offset[1],
            self.launch_offset[2],
        )
    }

    /// Parameters handed to the impact resolver.
    pub fn impact_params(&self) -> ImpactParams {
        ImpactParams {
            restitution: self.racket_restitution,
            swing_transfer: self.swing_transfer,
            spin_coupling: self.spin_coupling,
            depenetration_margin: self.depenetration_margin,
        }
    }
}
