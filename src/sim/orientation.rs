//! Heading control while aiming

use glam::Vec3;

use super::state::Transform;
use crate::consts::FACING_EPSILON_SQ;
use crate::{horizontal, yaw_facing};

/// Blend the actor's heading toward `target` in the horizontal plane.
///
/// The blend factor is `turn_speed * dt`, clamped to 1 so large speeds or
/// long ticks snap instead of overshooting. Returns `false` when the target
/// is (horizontally) on top of the actor and no rotation was applied.
pub fn face_toward(actor: &mut Transform, target: Vec3, turn_speed: f32, dt: f32) -> bool {
    let dir = horizontal(target - actor.position);
    if dir.length_squared() <= FACING_EPSILON_SQ {
        return false;
    }

    let goal = yaw_facing(dir);
    let factor = (turn_speed * dt).clamp(0.0, 1.0);
    actor.rotation = actor.rotation.lerp(goal, factor).normalize();
    true
}
