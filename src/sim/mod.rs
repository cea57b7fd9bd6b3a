//! Throw simulation module
//!
//! Everything here runs on the host's fixed tick and must stay deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (spin)
//! - Gravity passed in explicitly, never read from global state
//! - No rendering or input-device dependencies

pub mod aim;
pub mod ballistics;
pub mod camera;
pub mod collision;
pub mod orientation;
pub mod presenter;
pub mod projectile;
pub mod scene;
pub mod state;
pub mod tick;
pub mod trajectory;
pub mod world;

pub use aim::{AimPoint, AimResolver, reticle_pose};
pub use ballistics::{BallisticSolution, FlightTiming, solve_launch};
pub use camera::{Camera, Viewpoint};
pub use collision::{Shape, ray_shape};
pub use orientation::face_toward;
pub use presenter::{AimOverlay, AimPresenter};
pub use projectile::{
    ActorHandle, ProjectileFactory, ProjectileSpec, RigidBody, SeededSpin, SpinSource, TemplateId,
    launch,
};
pub use scene::{Collider, LayerMask, Ray, RayHit, Scene, SceneQuery, TriggerPolicy};
pub use state::{AimState, ThrowController, ThrowControllerBuilder, Transform};
pub use tick::TickInput;
pub use trajectory::{ArcParams, ArcPreview, preview_arc};
pub use world::{Impact, Projectile, ProjectileTemplate, ProjectileWorld};
