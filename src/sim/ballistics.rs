//! Launch velocity solver
//!
//! Picks a flight time from the horizontal distance, then inverts the
//! constant-acceleration displacement equation
//!
//! `target = start + v·t + ½·g·t²`  ⇒  `v = (Δ − ½·g·t²) / t`
//!
//! so a projectile under the same gravity lands exactly on the target after
//! `t` seconds. Pure functions only: no scene access, no global gravity.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::MIN_SOLVE_TIME;
use crate::settings::MIN_FLIGHT_TIME_FLOOR;
use crate::horizontal;

/// Distance-based flight time heuristic
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightTiming {
    /// Seconds of airtime per meter of horizontal distance
    pub time_per_meter: f32,
    pub min_flight_time: f32,
    pub max_flight_time: f32,
}

impl FlightTiming {
    /// Flight time for a horizontal distance, clamped to `[min, max]`
    pub fn flight_time(&self, horizontal_distance: f32) -> f32 {
        // Unvalidated max < min resolves to min
        let t = (horizontal_distance * self.time_per_meter)
            .min(self.max_flight_time)
            .max(self.min_flight_time);
        if t < MIN_SOLVE_TIME {
            // Only reachable with an unvalidated min_flight_time
            self.min_flight_time.max(MIN_FLIGHT_TIME_FLOOR)
        } else {
            t
        }
    }
}

/// Solved launch: initial velocity plus the flight time it was solved for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallisticSolution {
    pub velocity: Vec3,
    pub flight_time: f32,
}

impl BallisticSolution {
    /// Closed-form position `t` seconds after launch from `start`
    #[inline]
    pub fn position_at(&self, start: Vec3, gravity: Vec3, t: f32) -> Vec3 {
        start + self.velocity * t + 0.5 * gravity * (t * t)
    }

    /// Where the projectile is at the end of its planned flight
    pub fn landing_point(&self, start: Vec3, gravity: Vec3) -> Vec3 {
        self.position_at(start, gravity, self.flight_time)
    }
}

/// Solve the initial velocity that carries `start` to `target`.
///
/// `extra_up_bias` is added to the vertical component after the solve, so a
/// non-zero bias trades landing accuracy for a higher arc.
pub fn solve_launch(
    start: Vec3,
    target: Vec3,
    gravity: Vec3,
    timing: &FlightTiming,
    extra_up_bias: f32,
) -> BallisticSolution {
    let delta = target - start;
    let horizontal_distance = horizontal(delta).length();
    let t = timing.flight_time(horizontal_distance);

    let mut velocity = (delta - 0.5 * gravity * (t * t)) / t;
    if extra_up_bias != 0.0 {
        velocity.y += extra_up_bias;
    }

    BallisticSolution {
        velocity,
        flight_time: t,
    }
}
