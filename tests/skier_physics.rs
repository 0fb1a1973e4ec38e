//! Vertical integration, grounding, and tilt in a headless app.
use approx::assert_abs_diff_eq;
use piste::{ActorPhysics, Locomotion};
use test_utils::{flat_field, new_app, ramp_field, run_ticks, spawn_player};

#[test]
fn airborne_skier_falls_and_grounds_on_flat_terrain() {
    let mut app = new_app();
    let player = spawn_player(&mut app, 0.0, 0.0);
    if let Some(mut physics) = app.world_mut().get_mut::<ActorPhysics>(player) {
        *physics = ActorPhysics::airborne(10.0);
    }

    let mut grounded_after = None;
    for tick in 1..=40 {
        app.update();
        let physics = app
            .world()
            .get::<ActorPhysics>(player)
            .map_or_else(ActorPhysics::default, Clone::clone);
        if physics.grounded {
            grounded_after = Some((tick, physics));
            break;
        }
    }

    let (tick, physics) = grounded_after.unwrap_or_else(|| panic!("skier never grounded"));
    assert!(tick <= 10, "gravity 0.5 should ground within 10 ticks");
    assert_abs_diff_eq!(physics.elevation, 0.0, epsilon = 1e-5);
    assert_eq!(physics.vertical_velocity, 0.0);
    assert!(!physics.airborne_shadow);
}

#[test]
fn grounding_is_idempotent_on_flat_ground() {
    let mut app = new_app();
    app.insert_resource(flat_field(5.0));
    let player = spawn_player(&mut app, 0.0, 0.0);

    run_ticks(&mut app, 20);
    let Some(physics) = app.world().get::<ActorPhysics>(player) else {
        panic!("player lost its physics component");
    };
    assert!(physics.grounded);
    assert_abs_diff_eq!(physics.elevation, 5.0, epsilon = 1e-4);
    assert_eq!(physics.vertical_velocity, 0.0);

    let elevation_before = physics.elevation;
    run_ticks(&mut app, 20);
    let Some(physics) = app.world().get::<ActorPhysics>(player) else {
        panic!("player lost its physics component");
    };
    assert!(physics.grounded);
    assert_abs_diff_eq!(physics.elevation, elevation_before, epsilon = 1e-5);
    assert_eq!(physics.vertical_velocity, 0.0);
}

#[test]
fn grounded_skier_tilts_with_the_slope() {
    let mut app = new_app();
    app.insert_resource(ramp_field(10.0));
    let player = spawn_player(&mut app, 50.0, 5.0);

    run_ticks(&mut app, 12);
    let Some(physics) = app.world().get::<ActorPhysics>(player) else {
        panic!("player lost its physics component");
    };
    assert!(physics.grounded);
    assert!(
        physics.tilt_angle > 0.05,
        "slope-following tilt should build up, got {}",
        physics.tilt_angle
    );
}

#[test]
fn crashed_skier_relaxes_tilt_but_still_settles() {
    let mut app = new_app();
    app.insert_resource(ramp_field(10.0));
    let player = spawn_player(&mut app, 50.0, 5.0);
    run_ticks(&mut app, 12);

    let tilt_before = app
        .world()
        .get::<ActorPhysics>(player)
        .map_or(0.0, |p| p.tilt_angle);
    assert!(tilt_before > 0.05);

    if let Some(mut locomotion) = app.world_mut().get_mut::<Locomotion>(player) {
        locomotion.crash();
    }
    if let Some(mut physics) = app.world_mut().get_mut::<ActorPhysics>(player) {
        // Knock the crashed skier slightly into the air.
        physics.elevation += 4.0;
        physics.grounded = false;
    }

    run_ticks(&mut app, 20);
    let Some(physics) = app.world().get::<ActorPhysics>(player) else {
        panic!("player lost its physics component");
    };
    assert!(
        physics.tilt_angle < tilt_before * 0.2,
        "tilt should decay while crashed, got {}",
        physics.tilt_angle
    );
    assert!(physics.grounded, "gravity applies to crashed actors too");
    assert_abs_diff_eq!(physics.elevation, physics.ground_level, epsilon = 1e-4);
}
