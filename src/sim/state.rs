//! Throw controller state
//!
//! One controller per throwing actor. It owns the aim state, the last aim
//! point and the current arc; everything else is an injected collaborator.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::aim::{AimPoint, AimResolver};
use super::ballistics::{BallisticSolution, solve_launch};
use super::camera::Viewpoint;
use super::presenter::AimPresenter;
use super::projectile::{ProjectileFactory, SeededSpin, SpinSource, TemplateId};
use super::scene::SceneQuery;
use crate::error::ThrowError;
use crate::settings::ThrowConfig;

/// Aiming phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AimState {
    #[default]
    Idle,
    /// Throw button held: aim, turn and preview every tick
    Aiming,
}

/// Position + rotation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// World transform of `local`, expressed relative to `self`
    pub fn compose(&self, local: &Transform) -> Transform {
        Transform {
            position: self.position + self.rotation * local.position,
            rotation: (self.rotation * local.rotation).normalize(),
        }
    }

    /// +Z axis in world space
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

/// Aim-and-throw controller
pub struct ThrowController {
    pub(crate) config: ThrowConfig,
    pub(crate) state: AimState,
    pub(crate) resolver: AimResolver,
    /// Current arc preview (empty while idle)
    pub(crate) arc: Vec<Vec3>,
    /// Throwing actor (heading is driven while aiming)
    pub(crate) actor: Transform,
    /// Spawn point relative to the actor
    pub(crate) launch_anchor: Option<Transform>,
    pub(crate) template: Option<TemplateId>,

    pub(crate) scene: Box<dyn SceneQuery>,
    pub(crate) viewpoint: Option<Box<dyn Viewpoint>>,
    pub(crate) presenter: Option<Box<dyn AimPresenter>>,
    pub(crate) factory: Option<Box<dyn ProjectileFactory>>,
    pub(crate) spin: Box<dyn SpinSource>,
}

impl ThrowController {
    pub fn builder(config: ThrowConfig, scene: impl SceneQuery + 'static) -> ThrowControllerBuilder {
        ThrowControllerBuilder {
            config,
            scene: Box::new(scene),
            viewpoint: None,
            presenter: None,
            factory: None,
            spin: None,
            actor: Transform::IDENTITY,
            launch_anchor: None,
            template: None,
        }
    }

    pub fn state(&self) -> AimState {
        self.state
    }

    pub fn is_aiming(&self) -> bool {
        self.state == AimState::Aiming
    }

    pub fn config(&self) -> &ThrowConfig {
        &self.config
    }

    /// Replace the configuration (validated). Rejected while aiming.
    pub fn set_config(&mut self, config: ThrowConfig) -> Result<(), ThrowError> {
        if self.is_aiming() {
            return Err(ThrowError::ConfigLocked);
        }
        self.config = config.validated();
        Ok(())
    }

    pub fn aim_point(&self) -> Option<AimPoint> {
        self.resolver.aim_point()
    }

    /// Arc samples from the last aiming tick
    pub fn arc_samples(&self) -> &[Vec3] {
        &self.arc
    }

    pub fn actor(&self) -> &Transform {
        &self.actor
    }

    /// Host-side movement of the throwing actor
    pub fn actor_mut(&mut self) -> &mut Transform {
        &mut self.actor
    }

    /// World-space launch anchor, if one is configured
    pub fn launch_transform(&self) -> Option<Transform> {
        self.launch_anchor.map(|local| self.actor.compose(&local))
    }

    /// Solve the launch toward the current aim point from the current anchor
    pub fn current_solution(&self) -> Option<BallisticSolution> {
        let aim = self.resolver.aim_point()?;
        let anchor = self.launch_transform()?;
        Some(solve_launch(
            anchor.position,
            aim.position,
            self.config.gravity,
            &self.config.timing(),
            self.config.extra_up_bias,
        ))
    }
}

/// Constructor-time wiring of optional collaborators
pub struct ThrowControllerBuilder {
    config: ThrowConfig,
    scene: Box<dyn SceneQuery>,
    viewpoint: Option<Box<dyn Viewpoint>>,
    presenter: Option<Box<dyn AimPresenter>>,
    factory: Option<Box<dyn ProjectileFactory>>,
    spin: Option<Box<dyn SpinSource>>,
    actor: Transform,
    launch_anchor: Option<Transform>,
    template: Option<TemplateId>,
}

impl ThrowControllerBuilder {
    pub fn viewpoint(mut self, viewpoint: impl Viewpoint + 'static) -> Self {
        self.viewpoint = Some(Box::new(viewpoint));
        self
    }

    pub fn presenter(mut self, presenter: impl AimPresenter + 'static) -> Self {
        self.presenter = Some(Box::new(presenter));
        self
    }

    pub fn factory(mut self, factory: impl ProjectileFactory + 'static) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    pub fn spin_source(mut self, spin: impl SpinSource + 'static) -> Self {
        self.spin = Some(Box::new(spin));
        self
    }

    /// Shorthand for a [`SeededSpin`] source
    pub fn seed(self, seed: u64) -> Self {
        self.spin_source(SeededSpin::new(seed))
    }

    pub fn actor(mut self, actor: Transform) -> Self {
        self.actor = actor;
        self
    }

    /// Spawn point relative to the actor
    pub fn launch_anchor(mut self, local: Transform) -> Self {
        self.launch_anchor = Some(local);
        self
    }

    pub fn template(mut self, template: TemplateId) -> Self {
        self.template = Some(template);
        self
    }

    pub fn build(self) -> ThrowController {
        let mut controller = ThrowController {
            config: self.config.validated(),
            state: AimState::Idle,
            resolver: AimResolver::new(),
            arc: Vec::new(),
            actor: self.actor,
            launch_anchor: self.launch_anchor,
            template: self.template,
            scene: self.scene,
            viewpoint: self.viewpoint,
            presenter: self.presenter,
            factory: self.factory,
            spin: self.spin.unwrap_or_else(|| Box::new(SeededSpin::new(0))),
        };
        controller.hide_presentation();
        controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::scene::Scene;

    #[test]
    fn test_compose_follows_parent_rotation() {
        let parent = Transform {
            position: Vec3::new(1.0, 0.0, 0.0),
            rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        };
        let local = Transform::from_position(Vec3::new(0.0, 1.5, 1.0));
        let world = parent.compose(&local);
        // Local +Z maps to world +X under a 90° yaw
        assert!(world.position.abs_diff_eq(Vec3::new(2.0, 1.5, 0.0), 1e-5));
        assert!(world.forward().abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn test_builder_defaults() {
        let controller = ThrowController::builder(ThrowConfig::default(), Scene::new()).build();
        assert_eq!(controller.state(), AimState::Idle);
        assert!(controller.aim_point().is_none());
        assert!(controller.arc_samples().is_empty());
        assert!(controller.launch_transform().is_none());
        assert!(controller.current_solution().is_none());
    }

    #[test]
    fn test_builder_validates_config() {
        let config = ThrowConfig {
            arc_sample_count: 0,
            ..Default::default()
        };
        let controller = ThrowController::builder(config, Scene::new()).build();
        assert_eq!(controller.config().arc_sample_count, 2);
    }
}
