//! Fixed timestep throw tick
//!
//! Within one tick the order is fixed: press, then (while aiming) resolve the
//! aim point, turn the actor, solve the launch and preview the arc, then
//! release or cancel. A release therefore fires at the aim point and anchor
//! pose computed in the same tick.

use glam::{Vec2, Vec3};

use super::aim::reticle_pose;
use super::ballistics::solve_launch;
use super::orientation::face_toward;
use super::projectile::{ActorHandle, ProjectileSpec, launch};
use super::state::{AimState, ThrowController};
use super::trajectory::preview_arc;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in pixels (`None` = no pointer this tick)
    pub pointer: Option<Vec2>,
    /// Throw button went down
    pub press: bool,
    /// Throw button went up
    pub release: bool,
    /// Abort the aim without throwing
    pub cancel: bool,
}

impl ThrowController {
    /// Advance one fixed tick. Returns the projectile spawned this tick, if any.
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> Option<ActorHandle> {
        if input.press {
            self.begin_aim();
        }

        if self.state != AimState::Aiming {
            return None;
        }

        self.update_aim(input.pointer, dt);

        if input.release {
            self.release()
        } else {
            if input.cancel {
                self.cancel();
            }
            None
        }
    }

    /// Idle -> Aiming. Shows the reticle and arc.
    pub fn begin_aim(&mut self) {
        if self.state == AimState::Aiming {
            return;
        }
        self.state = AimState::Aiming;
        if let Some(presenter) = self.presenter.as_mut() {
            presenter.set_reticle_visible(true);
            presenter.set_arc_visible(true);
        }
    }

    /// One aiming step: resolve, turn, solve, preview.
    pub fn update_aim(&mut self, pointer: Option<Vec2>, dt: f32) {
        if self.state != AimState::Aiming {
            return;
        }

        match (pointer, self.viewpoint.as_deref()) {
            (Some(pointer), Some(viewpoint)) => {
                self.resolver
                    .resolve(viewpoint, self.scene.as_ref(), pointer, &self.config);
            }
            (_, None) => log::trace!("no viewpoint, aim point not updated"),
            (None, _) => {}
        }

        let Some(aim) = self.resolver.aim_point() else {
            return;
        };

        if let Some(presenter) = self.presenter.as_mut() {
            let (position, orientation) = reticle_pose(&aim, &self.config);
            presenter.set_reticle_pose(position, orientation);
        }

        face_toward(&mut self.actor, aim.position, self.config.turn_speed, dt);

        let Some(anchor) = self.launch_transform() else {
            log::trace!("no launch anchor, skipping arc preview");
            return;
        };
        let solution = solve_launch(
            anchor.position,
            aim.position,
            self.config.gravity,
            &self.config.timing(),
            self.config.extra_up_bias,
        );
        let preview = preview_arc(
            self.scene.as_ref(),
            anchor.position,
            solution.velocity,
            self.config.gravity,
            &self.config.arc_params(),
        );
        self.arc = preview.samples;

        if let Some(presenter) = self.presenter.as_mut() {
            presenter.set_arc_samples(&self.arc);
        }
    }

    /// Aiming -> Idle, throwing at the current aim point
    pub fn release(&mut self) -> Option<ActorHandle> {
        if self.state != AimState::Aiming {
            return None;
        }
        let thrown = self.fire();
        self.state = AimState::Idle;
        self.hide_presentation();
        thrown
    }

    /// Aiming -> Idle without throwing
    pub fn cancel(&mut self) {
        if self.state != AimState::Aiming {
            return;
        }
        log::debug!("aim cancelled");
        self.state = AimState::Idle;
        self.hide_presentation();
    }

    /// Force Idle (actor disabled). Never throws.
    pub fn disable(&mut self) {
        self.state = AimState::Idle;
        self.hide_presentation();
    }

    pub(crate) fn hide_presentation(&mut self) {
        self.arc.clear();
        if let Some(presenter) = self.presenter.as_mut() {
            presenter.set_reticle_visible(false);
            presenter.set_arc_samples(&[]);
            presenter.set_arc_visible(false);
        }
    }

    fn fire(&mut self) -> Option<ActorHandle> {
        let Some(aim) = self.resolver.aim_point() else {
            log::debug!("release without an aim point, nothing thrown");
            return None;
        };
        let Some(anchor) = self.launch_transform() else {
            log::debug!("no launch anchor, nothing thrown");
            return None;
        };
        let Some(template) = self.template else {
            log::debug!("no projectile template, nothing thrown");
            return None;
        };
        let Some(factory) = self.factory.as_mut() else {
            log::debug!("no projectile factory, nothing thrown");
            return None;
        };

        let solution = solve_launch(
            anchor.position,
            aim.position,
            self.config.gravity,
            &self.config.timing(),
            self.config.extra_up_bias,
        );
        let torque = if self.config.spin_torque != 0.0 {
            self.spin.spin_axis() * self.config.spin_torque
        } else {
            Vec3::ZERO
        };
        let spec = ProjectileSpec {
            template,
            position: anchor.position,
            orientation: anchor.rotation,
        };

        let actor = launch(factory.as_mut(), &spec, solution.velocity, torque)?;
        log::info!(
            "threw {:?} at {} (v = {}, t = {:.2}s)",
            actor,
            aim.position,
            solution.velocity,
            solution.flight_time
        );
        Some(actor)
    }
}
