//! End-to-end throw against the reference scene, camera and projectile world

use std::cell::RefCell;
use std::rc::Rc;

use ballistic_throw::ThrowConfig;
use ballistic_throw::consts::SIM_DT;
use ballistic_throw::sim::{
    AimOverlay, AimState, Camera, Collider, LayerMask, ProjectileTemplate, ProjectileWorld,
    RigidBody, Scene, Shape, TemplateId, ThrowController, TickInput, Transform,
};
use glam::{Vec2, Vec3};

struct Rig {
    controller: ThrowController,
    world: Rc<RefCell<ProjectileWorld>>,
    overlay: Rc<RefCell<AimOverlay>>,
    camera: Camera,
}

fn rig(config: ThrowConfig, template: ProjectileTemplate) -> Rig {
    let scene = Rc::new(
        Scene::new()
            .with(Collider::ground(0.0))
            .with(Collider::new(
                Shape::cuboid(Vec3::new(-3.0, 0.0, 10.0), Vec3::new(3.0, 6.0, 10.5)),
                LayerMask::OBSTACLE,
            )),
    );
    let world = Rc::new(RefCell::new(ProjectileWorld::new(scene.clone(), config.gravity)));
    let id: TemplateId = world.borrow_mut().register_template(template);
    let overlay = Rc::new(RefCell::new(AimOverlay::default()));
    let camera = Camera::looking_at(
        Vec3::new(0.0, 15.0, -8.0),
        Vec3::new(0.0, 0.0, 5.0),
        60.0,
        Vec2::new(1280.0, 720.0),
    );

    let controller = ThrowController::builder(config, scene)
        .viewpoint(camera.clone())
        .presenter(overlay.clone())
        .factory(world.clone())
        .seed(1234)
        .launch_anchor(Transform::from_position(Vec3::new(0.3, 1.5, 0.4)))
        .template(id)
        .build();

    Rig {
        controller,
        world,
        overlay,
        camera,
    }
}

fn pointer_for(camera: &Camera, point: Vec3) -> TickInput {
    TickInput {
        pointer: camera.world_to_screen(point),
        ..Default::default()
    }
}

/// Press, aim for `ticks`, release. Returns the landing point of the projectile.
fn throw_at(rig: &mut Rig, target: Vec3, ticks: usize) -> Option<Vec3> {
    let aim = pointer_for(&rig.camera, target);
    rig.controller.tick(
        &TickInput {
            press: true,
            ..aim.clone()
        },
        SIM_DT,
    );
    for _ in 0..ticks {
        rig.controller.tick(&aim, SIM_DT);
    }
    let thrown = rig.controller.tick(
        &TickInput {
            release: true,
            ..aim
        },
        SIM_DT,
    )?;

    for _ in 0..500 {
        let impacts = rig.world.borrow_mut().step(SIM_DT);
        if let Some(impact) = impacts.into_iter().find(|i| i.handle == thrown) {
            return Some(impact.hit.point);
        }
    }
    None
}

#[test]
fn thrown_projectile_lands_on_aim_point() {
    let mut rig = rig(ThrowConfig::default(), ProjectileTemplate::new("stone"));
    let target = Vec3::new(4.0, 0.0, 7.0);

    let landed = throw_at(&mut rig, target, 30).expect("landed");
    let aim = rig.controller.aim_point().expect("aim point").position;
    assert!(aim.abs_diff_eq(target, 0.05), "aim resolved to {aim}");
    assert!(landed.abs_diff_eq(aim, 0.05), "landed at {landed}, aimed at {aim}");
    assert_eq!(rig.controller.state(), AimState::Idle);
}

#[test]
fn long_throw_still_lands_with_clamped_time() {
    // 20+ m away with the default 0.06 s/m is past the 1.2 s cap
    let mut rig = rig(ThrowConfig::default(), ProjectileTemplate::new("stone"));
    let target = Vec3::new(-9.0, 0.0, 22.0);
    let aim = pointer_for(&rig.camera, target);
    rig.controller.tick(&TickInput { press: true, ..aim.clone() }, SIM_DT);
    let solution = rig.controller.current_solution().expect("solvable");
    assert!((solution.flight_time - 1.2).abs() < 1e-5);

    let landed = throw_at(&mut rig, target, 5).expect("landed");
    assert!(landed.abs_diff_eq(target, 0.1), "landed at {landed}");
}

#[test]
fn arc_preview_matches_actual_flight() {
    let mut rig = rig(ThrowConfig::default(), ProjectileTemplate::new("stone"));
    let target = Vec3::new(2.0, 0.0, 6.0);
    let aim = pointer_for(&rig.camera, target);
    rig.controller.tick(&TickInput { press: true, ..aim.clone() }, SIM_DT);
    for _ in 0..40 {
        rig.controller.tick(&aim, SIM_DT);
    }
    let previewed = *rig.controller.arc_samples().last().expect("arc");
    assert_eq!(rig.overlay.borrow().arc.last(), Some(&previewed));

    let landed = throw_at(&mut rig, target, 0).expect("landed");
    assert!(landed.abs_diff_eq(previewed, 0.05), "preview {previewed} vs landed {landed}");
}

#[test]
fn wall_truncates_preview_and_stops_projectile() {
    let mut rig = rig(ThrowConfig::default(), ProjectileTemplate::new("stone"));
    // Behind the 6 m tall wall at z = 10
    let target = Vec3::new(0.0, 0.0, 12.0);
    let aim = pointer_for(&rig.camera, target);
    rig.controller.tick(&TickInput { press: true, ..aim.clone() }, SIM_DT);
    for _ in 0..40 {
        rig.controller.tick(&aim, SIM_DT);
    }
    let arc = rig.controller.arc_samples().to_vec();
    assert!(arc.len() < rig.controller.config().arc_sample_count);
    let end = *arc.last().expect("arc");
    assert!((end.z - 10.0).abs() < 1e-3, "arc stopped at {end}");

    let landed = throw_at(&mut rig, target, 0).expect("hit wall");
    assert!((landed.z - 10.0).abs() < 1e-3, "projectile stopped at {landed}");
}

#[test]
fn template_body_is_kept_and_spin_applied() {
    let body = RigidBody {
        inertia: 0.5,
        ..Default::default()
    };
    let mut rig = rig(
        ThrowConfig::default(),
        ProjectileTemplate::new("disc").with_body(body),
    );
    let aim = pointer_for(&rig.camera, Vec3::new(1.0, 0.0, 5.0));
    rig.controller.tick(&TickInput { press: true, ..aim.clone() }, SIM_DT);
    let thrown = rig
        .controller
        .tick(&TickInput { release: true, ..aim }, SIM_DT)
        .expect("thrown");

    let world = rig.world.borrow();
    let p = world.get(thrown).expect("spawned");
    assert_eq!(p.body, Some(body));
    // |torque| = 10, inertia 0.5
    assert!((p.angular_velocity.length() - 20.0).abs() < 1e-3);
}

#[test]
fn same_seed_same_spin() {
    let spins: Vec<Vec3> = (0..2)
        .map(|_| {
            let mut rig = rig(ThrowConfig::default(), ProjectileTemplate::new("stone"));
            let aim = pointer_for(&rig.camera, Vec3::new(1.0, 0.0, 5.0));
            let thrown = rig
                .controller
                .tick(
                    &TickInput {
                        press: true,
                        release: true,
                        ..aim
                    },
                    SIM_DT,
                )
                .expect("thrown");
            let spin = rig.world.borrow().get(thrown).expect("spawned").angular_velocity;
            spin
        })
        .collect();
    assert_eq!(spins[0], spins[1]);
    assert!(spins[0].length() > 0.0);
}
