//! Per-skier vertical physics: gravity, grounding, and terrain tilt.
//!
//! [`skier_physics_system`] runs once per tick after locomotion has moved
//! each actor. It re-samples the height field at the new position, smooths
//! the slope-following tilt, integrates vertical motion, and snaps the actor
//! onto the ground once it comes within tolerance. Gravity and grounding
//! apply in every locomotion state; only the tilt target is gated, so a
//! crashed skier still settles onto the terrain beneath it.

use bevy_ecs::prelude::*;
use bevy_transform::prelude::Transform;
use log::debug;
use serde::Serialize;

use crate::constants::{
    GRACE_DISTANCE, GRAVITY_PULL, TERMINAL_VELOCITY, TERRAIN_TILT_SENSITIVITY, TILT_SMOOTHING,
};
use crate::locomotion::Locomotion;
use crate::terrain::HeightField;

/// Vertical physics state for a skier-like actor.
///
/// Mutated once per tick by [`skier_physics_system`]; read by rendering for
/// sprite offset and rotation and by the collision system for the hitbox
/// vertical offset.
#[derive(Component, Debug, Clone, Default, Serialize)]
pub struct ActorPhysics {
    /// Visual height above the ground datum.
    pub elevation: f32,
    /// Downward speed; positive values fall.
    pub vertical_velocity: f32,
    /// Cached height field sample at the actor's position.
    pub ground_level: f32,
    /// Whether the actor rests on the terrain.
    pub grounded: bool,
    /// Smoothed slope-following rotation in radians.
    pub tilt_angle: f32,
    /// Whether rendering should draw a detached airborne shadow.
    pub airborne_shadow: bool,
}

impl ActorPhysics {
    /// State for an actor starting in the air at the given elevation.
    #[must_use]
    pub fn airborne(elevation: f32) -> Self {
        Self {
            elevation,
            ..Self::default()
        }
    }
}

/// One step of exponential smoothing from `current` toward `target`.
///
/// # Examples
/// ```
/// use piste::physics::smooth_toward;
/// let next = smooth_toward(0.0, 1.0, 0.25);
/// assert!((next - 0.25).abs() < 1e-6);
/// ```
#[must_use]
pub fn smooth_toward(current: f32, target: f32, factor: f32) -> f32 {
    current.mul_add(1.0 - factor, target * factor)
}

/// Clamps a downward velocity to the configured terminal speed.
#[must_use]
pub fn clamp_fall_speed(velocity: f32) -> f32 {
    velocity.min(TERMINAL_VELOCITY)
}

/// Integrates vertical motion and grounding for every skier-like actor.
pub fn skier_physics_system(
    field: Res<HeightField>,
    mut query: Query<(&Transform, &Locomotion, &mut ActorPhysics)>,
) {
    for (transform, locomotion, mut physics) in &mut query {
        let pos = transform.translation.truncate();
        physics.ground_level = field.height_at(pos);

        let tilt_target = if physics.grounded && locomotion.is_steerable() {
            field.slope_at(pos).angle * TERRAIN_TILT_SENSITIVITY
        } else {
            // Flying and crashed actors relax back to level.
            0.0
        };
        physics.tilt_angle = smooth_toward(physics.tilt_angle, tilt_target, TILT_SMOOTHING);

        physics.vertical_velocity = clamp_fall_speed(physics.vertical_velocity + GRAVITY_PULL);
        physics.elevation -= physics.vertical_velocity;

        if physics.elevation <= physics.ground_level + GRACE_DISTANCE {
            if !physics.grounded {
                debug!(
                    "actor grounded at {pos:?} on ground level {}",
                    physics.ground_level
                );
            }
            physics.grounded = true;
            physics.vertical_velocity = 0.0;
            physics.elevation = physics.ground_level;
            physics.airborne_shadow = false;
        } else {
            physics.grounded = false;
            physics.airborne_shadow =
                physics.elevation - physics.ground_level > GRACE_DISTANCE;
        }
    }
}
