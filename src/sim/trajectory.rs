//! Arc preview
//!
//! Steps the solved launch forward with the same per-step rule the projectile
//! world uses (`Δp = v·dt + ½·g·dt²`, then `v += g·dt`), casting along every
//! step so the line stops where the real projectile would.

use glam::Vec3;

use super::scene::{LayerMask, Ray, RayHit, SceneQuery, TriggerPolicy};
use crate::consts::MIN_CAST_LENGTH;
use crate::settings::MIN_ARC_SAMPLES;

/// Sampling parameters for one preview
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    /// Maximum number of points produced
    pub sample_count: usize,
    /// Seconds between samples
    pub time_step: f32,
    /// Layers that stop the arc
    pub mask: LayerMask,
}

/// Previewed path, ready for a line renderer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArcPreview {
    pub samples: Vec<Vec3>,
    /// Blocking hit that truncated the arc, if any
    pub impact: Option<RayHit>,
}

/// Displacement over one step of length `dt`
#[inline]
pub fn step_displacement(velocity: Vec3, gravity: Vec3, dt: f32) -> Vec3 {
    velocity * dt + 0.5 * gravity * (dt * dt)
}

/// Sample the flight path of a projectile launched from `start` with `velocity`.
///
/// At most `params.sample_count` points are produced (floored at
/// [`MIN_ARC_SAMPLES`]) and the first is always `start`. When a step is
/// blocked, its sample is replaced by the hit point and sampling stops; a hit
/// on the very first step is appended after `start` instead, so a blocked
/// two-point arc has as many points as an unblocked one.
pub fn preview_arc<Q: SceneQuery + ?Sized>(
    scene: &Q,
    start: Vec3,
    velocity: Vec3,
    gravity: Vec3,
    params: &ArcParams,
) -> ArcPreview {
    let count = params.sample_count.max(MIN_ARC_SAMPLES);
    let mut preview = ArcPreview {
        samples: Vec::with_capacity(count),
        impact: None,
    };

    let dt = params.time_step;
    let mut pos = start;
    let mut vel = velocity;

    for i in 0..count {
        preview.samples.push(pos);

        let step = step_displacement(vel, gravity, dt);
        let length = step.length();
        if length > MIN_CAST_LENGTH {
            let hit = Ray::new(pos, step)
                .and_then(|ray| scene.cast(&ray, length, params.mask, TriggerPolicy::Ignore));
            if let Some(hit) = hit {
                if i == 0 {
                    preview.samples.push(hit.point);
                } else if let Some(last) = preview.samples.last_mut() {
                    *last = hit.point;
                }
                preview.impact = Some(hit);
                break;
            }
        }

        pos += step;
        vel += gravity * dt;
    }

    preview
}
