//! Throw tuning
//!
//! Editor/host-settable configuration for one throwing actor. Loaded from JSON
//! and validated once; the solver and previewer assume validated values.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_AIM_DISTANCE, STANDARD_GRAVITY};
use crate::error::ThrowError;
use crate::sim::ballistics::FlightTiming;
use crate::sim::scene::LayerMask;
use crate::sim::trajectory::ArcParams;

/// Floor applied to a non-positive arc time step
pub const ARC_TIME_STEP_FLOOR: f32 = 0.01;
/// Floor applied to a non-positive minimum flight time
pub const MIN_FLIGHT_TIME_FLOOR: f32 = 0.1;
/// Smallest usable arc sample count
pub const MIN_ARC_SAMPLES: usize = 2;

/// Named throw feel presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThrowFeel {
    /// Short, flat throws
    Snappy,
    #[default]
    Standard,
    /// Long hang time, high lobs
    Floaty,
}

impl ThrowFeel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThrowFeel::Snappy => "Snappy",
            ThrowFeel::Standard => "Standard",
            ThrowFeel::Floaty => "Floaty",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "snappy" | "fast" => Some(ThrowFeel::Snappy),
            "standard" | "default" => Some(ThrowFeel::Standard),
            "floaty" | "lob" => Some(ThrowFeel::Floaty),
            _ => None,
        }
    }

    /// Seconds of airtime per meter of horizontal distance
    pub fn time_per_meter(&self) -> f32 {
        match self {
            ThrowFeel::Snappy => 0.045,
            ThrowFeel::Standard => 0.06,
            ThrowFeel::Floaty => 0.08,
        }
    }

    /// (min, max) flight time in seconds
    pub fn flight_time_range(&self) -> (f32, f32) {
        match self {
            ThrowFeel::Snappy => (0.25, 0.9),
            ThrowFeel::Standard => (0.30, 1.20),
            ThrowFeel::Floaty => (0.40, 1.60),
        }
    }
}

/// Per-actor throw configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrowConfig {
    // === Ballistics ===
    /// Seconds of airtime per meter of horizontal distance
    pub time_per_meter: f32,
    /// Minimum total flight time (seconds)
    pub min_flight_time: f32,
    /// Maximum total flight time (seconds)
    pub max_flight_time: f32,
    /// Extra upward velocity added to the solved launch velocity
    pub extra_up_bias: f32,
    /// Gravity shared with the physics world
    pub gravity: Vec3,

    // === Launch ===
    /// Magnitude of the random spin impulse (0 disables spin)
    pub spin_torque: f32,

    // === Arc preview ===
    /// Number of points in the previewed arc
    pub arc_sample_count: usize,
    /// Time between arc samples (seconds)
    pub arc_time_step: f32,
    /// Layers the arc preview stops at
    pub arc_mask: LayerMask,

    // === Aiming ===
    /// Layers the aim ray can land on
    pub ground_mask: LayerMask,
    /// Maximum aim ray length
    pub max_aim_distance: f32,
    /// Heading blend rate toward the aim point (per second)
    pub turn_speed: f32,
    /// Reticle offset above the hit surface
    pub hover_height: f32,
    /// Tilt the reticle to the hit surface normal
    pub align_to_surface: bool,
}

impl Default for ThrowConfig {
    fn default() -> Self {
        Self {
            time_per_meter: 0.06,
            min_flight_time: 0.30,
            max_flight_time: 1.20,
            extra_up_bias: 0.0,
            gravity: Vec3::new(0.0, -STANDARD_GRAVITY, 0.0),

            spin_torque: 10.0,

            arc_sample_count: 30,
            arc_time_step: 0.05,
            arc_mask: LayerMask::GROUND | LayerMask::OBSTACLE,

            ground_mask: LayerMask::GROUND,
            max_aim_distance: DEFAULT_AIM_DISTANCE,
            turn_speed: 10.0,
            hover_height: 0.02,
            align_to_surface: true,
        }
    }
}

impl ThrowConfig {
    /// Create a config from a feel preset
    pub fn from_preset(feel: ThrowFeel) -> Self {
        let mut config = Self::default();
        config.apply_preset(feel);
        config
    }

    /// Apply a feel preset (updates the timing policy only)
    pub fn apply_preset(&mut self, feel: ThrowFeel) {
        let (min, max) = feel.flight_time_range();
        self.time_per_meter = feel.time_per_meter();
        self.min_flight_time = min;
        self.max_flight_time = max;
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ThrowError> {
        let config: ThrowConfig = serde_json::from_str(json)?;
        Ok(config.validated())
    }

    pub fn to_json(&self) -> Result<String, ThrowError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Correct degenerate values to safe floors.
    ///
    /// Non-finite numbers fall back to defaults, then the ordering and
    /// positivity invariants are enforced.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        self.time_per_meter = finite_or(self.time_per_meter, defaults.time_per_meter, "time_per_meter");
        self.min_flight_time = finite_or(self.min_flight_time, defaults.min_flight_time, "min_flight_time");
        self.max_flight_time = finite_or(self.max_flight_time, defaults.max_flight_time, "max_flight_time");
        self.extra_up_bias = finite_or(self.extra_up_bias, defaults.extra_up_bias, "extra_up_bias");
        self.spin_torque = finite_or(self.spin_torque, defaults.spin_torque, "spin_torque");
        self.arc_time_step = finite_or(self.arc_time_step, defaults.arc_time_step, "arc_time_step");
        self.max_aim_distance = finite_or(self.max_aim_distance, defaults.max_aim_distance, "max_aim_distance");
        self.turn_speed = finite_or(self.turn_speed, defaults.turn_speed, "turn_speed");
        self.hover_height = finite_or(self.hover_height, defaults.hover_height, "hover_height");
        if !self.gravity.is_finite() {
            log::warn!("gravity {} is not finite, using default", self.gravity);
            self.gravity = defaults.gravity;
        }

        if self.arc_sample_count < MIN_ARC_SAMPLES {
            log::warn!("arc_sample_count {} raised to {}", self.arc_sample_count, MIN_ARC_SAMPLES);
            self.arc_sample_count = MIN_ARC_SAMPLES;
        }
        if self.arc_time_step <= 0.0 {
            log::warn!("arc_time_step {} raised to {}", self.arc_time_step, ARC_TIME_STEP_FLOOR);
            self.arc_time_step = ARC_TIME_STEP_FLOOR;
        }
        if self.min_flight_time <= 0.0 {
            log::warn!("min_flight_time {} raised to {}", self.min_flight_time, MIN_FLIGHT_TIME_FLOOR);
            self.min_flight_time = MIN_FLIGHT_TIME_FLOOR;
        }
        if self.max_flight_time < self.min_flight_time {
            log::warn!(
                "max_flight_time {} below min_flight_time, raised to {}",
                self.max_flight_time,
                self.min_flight_time
            );
            self.max_flight_time = self.min_flight_time;
        }
        if self.time_per_meter < 0.0 {
            log::warn!("time_per_meter {} clamped to 0", self.time_per_meter);
            self.time_per_meter = 0.0;
        }
        if self.max_aim_distance <= 0.0 {
            self.max_aim_distance = defaults.max_aim_distance;
        }
        self.turn_speed = self.turn_speed.max(0.0);

        self
    }

    /// Timing policy for the velocity solver
    pub fn timing(&self) -> FlightTiming {
        FlightTiming {
            time_per_meter: self.time_per_meter,
            min_flight_time: self.min_flight_time,
            max_flight_time: self.max_flight_time,
        }
    }

    /// Sampling parameters for the arc preview
    pub fn arc_params(&self) -> ArcParams {
        ArcParams {
            sample_count: self.arc_sample_count,
            time_step: self.arc_time_step,
            mask: self.arc_mask,
        }
    }
}

fn finite_or(value: f32, fallback: f32, name: &str) -> f32 {
    if value.is_finite() {
        value
    } else {
        log::warn!("{name} is not finite, using default {fallback}");
        fallback
    }
}
