//! Ballistic Throw - aim-and-throw subsystem for a fixed-tick 3D game loop
//!
//! Core modules:
//! - `sim`: Aim resolution, launch-velocity solve, arc preview and the throw state machine
//! - `settings`: Data-driven throw tuning (validated, JSON loadable)
//! - `error`: Errors surfaced to the host (config parsing, locked config)

pub mod error;
pub mod settings;
pub mod sim;

pub use error::ThrowError;
pub use settings::{ThrowConfig, ThrowFeel};

use glam::{Quat, Vec3};

/// Simulation constants
pub mod consts {
    /// Fixed simulation timestep (50 Hz physics tick)
    pub const SIM_DT: f32 = 1.0 / 50.0;

    /// Standard gravity magnitude (m/s²)
    pub const STANDARD_GRAVITY: f32 = 9.81;

    /// Flight times below this are treated as degenerate by the solver
    pub const MIN_SOLVE_TIME: f32 = 1e-3;
    /// Squared horizontal distance below which the actor keeps its heading
    pub const FACING_EPSILON_SQ: f32 = 1e-3;
    /// Shortest ray the arc preview bothers casting
    pub const MIN_CAST_LENGTH: f32 = 1e-6;

    /// Aim ray length used when the config does not say otherwise
    pub const DEFAULT_AIM_DISTANCE: f32 = 500.0;
}

/// World up axis (Y-up, +Z forward)
pub const UP: Vec3 = Vec3::Y;

/// Project a vector onto the horizontal (XZ) plane
#[inline]
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Yaw-only rotation whose +Z axis points along the horizontal part of `dir`
#[inline]
pub fn yaw_facing(dir: Vec3) -> Quat {
    Quat::from_rotation_y(dir.x.atan2(dir.z))
}
