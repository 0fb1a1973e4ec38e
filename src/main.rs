//! Headless demo run of the skiing core.
//!
//! Builds a small slope with obstacles and gates, then steps the simulation
//! a fixed number of ticks while steering the player back and forth. Useful
//! for eyeballing log output and soak-testing the tick loop without a
//! renderer.
use bevy_app::App;
use bevy_transform::prelude::Transform;
use clap::Parser;
use glam::Vec2;
use log::{error, info};
use piste::{
    init_logging, ActorPhysics, AiSkier, Collidable, EntityKind, Gate, GridSampler, HeightField,
    Locomotion, Player, SkiCorePlugin, TerrainBump, TERRAIN_AMPLITUDE,
};

/// Kinematic and collision core demo for a scrolling skiing game.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of simulation ticks to run
    #[arg(short, long, default_value_t = 240)]
    ticks: u32,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

const GRID_SIZE: u32 = 64;

/// Gentle rolling terrain: two crossed sine waves mapped into `[0, 1]`.
fn rolling_terrain() -> Vec<f32> {
    let mut values = Vec::with_capacity((GRID_SIZE * GRID_SIZE) as usize);
    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            let fx = x as f32 / GRID_SIZE as f32 * std::f32::consts::TAU;
            let fy = y as f32 / GRID_SIZE as f32 * std::f32::consts::TAU;
            let value = 0.25f32.mul_add(fx.sin(), 0.5) + 0.25 * fy.cos();
            values.push(value.clamp(0.0, 1.0));
        }
    }
    values
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let sampler = match GridSampler::new(rolling_terrain(), GRID_SIZE, GRID_SIZE) {
        Ok(sampler) => sampler,
        Err(e) => {
            error!("failed to build demo terrain: {e}");
            return;
        }
    };

    let mut app = App::new();
    app.add_plugins(SkiCorePlugin);
    app.insert_resource(HeightField::new(
        Box::new(sampler),
        Vec2::splat(512.0),
        TERRAIN_AMPLITUDE,
    ));

    let player = app
        .world_mut()
        .spawn((
            Transform::from_xyz(0.0, 0.0, 0.0),
            Player,
            Collidable::new(EntityKind::Player, 24.0, 24.0),
            ActorPhysics::default(),
            Locomotion::default(),
        ))
        .id();

    app.world_mut().spawn((
        Transform::from_xyz(60.0, -40.0, 0.0),
        AiSkier,
        Collidable::new(EntityKind::AiSkier, 24.0, 24.0),
        ActorPhysics::default(),
        Locomotion::default(),
    ));

    for (x, y) in [(30.0, 120.0), (-45.0, 260.0), (15.0, 400.0)] {
        app.world_mut().spawn((
            Transform::from_xyz(x, y, 0.0),
            Collidable::new(EntityKind::Tree, 28.0, 40.0),
        ));
    }
    app.world_mut().spawn((
        Transform::from_xyz(-20.0, 180.0, 0.0),
        Collidable::new(EntityKind::DriftMound, 60.0, 40.0),
        TerrainBump {
            footprint_width: 60.0,
            footprint_height: 40.0,
            max_height: 3.0,
        },
    ));
    app.world_mut().spawn((
        Transform::from_xyz(0.0, 320.0, 0.0),
        Collidable::new(EntityKind::Gate, 90.0, 30.0),
        Gate::default(),
    ));

    for tick in 0..args.ticks {
        if tick % 40 == 20 {
            if let Some(mut locomotion) = app.world_mut().get_mut::<Locomotion>(player) {
                let turned = if (tick / 40) % 2 == 0 {
                    locomotion.turn_right()
                } else {
                    locomotion.turn_left()
                };
                if turned {
                    info!("tick {tick}: player turned");
                }
            }
        }
        app.update();
    }

    if let (Some(transform), Some(physics), Some(locomotion)) = (
        app.world().get::<Transform>(player),
        app.world().get::<ActorPhysics>(player),
        app.world().get::<Locomotion>(player),
    ) {
        info!(
            "player finished at ({:.1}, {:.1}) elevation {:.2} state {:?}",
            transform.translation.x,
            transform.translation.y,
            physics.elevation,
            locomotion.state()
        );
    }
}
