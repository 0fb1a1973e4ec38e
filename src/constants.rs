//! Simulation tuning constants used across systems.
//!
//! All values are expressed per fixed simulation tick. The bump falloff
//! coefficients are empirically tuned defaults chosen for feel, not derived
//! quantities; treat them as configuration.

/// Downward pull added to a skier's vertical velocity each tick.
pub const GRAVITY_PULL: f32 = 0.5;
/// Upper bound on downward vertical speed.
pub const TERMINAL_VELOCITY: f32 = 8.0;
/// Tolerance below which a skier is considered resting on the ground.
pub const GRACE_DISTANCE: f32 = 0.1;
/// Exponential smoothing factor applied to the terrain-following tilt.
pub const TILT_SMOOTHING: f32 = 0.12;
/// Scale from the local slope angle to the visual tilt target.
pub const TERRAIN_TILT_SENSITIVITY: f32 = 0.35;
/// Forward offset, in world units, used for one-sided slope estimation.
pub const SLOPE_SAMPLE_STEP: f32 = 5.0;
/// World-space height of a base terrain sample of `1.0`.
pub const TERRAIN_AMPLITUDE: f32 = 12.0;
/// World-space width and height covered by one tile of the base grid.
pub const DEFAULT_TILE_SIZE: f32 = 512.0;

/// Multiplier applied to the downhill offset of a bump before falloff.
///
/// Values above `1.0` compress the downhill face into a near-cliff edge.
pub const BUMP_DOWNHILL_STEEPNESS: f32 = 4.5;
/// Exponential decay coefficient for the downhill face of a bump.
pub const BUMP_DOWNHILL_DECAY: f32 = 5.0;
/// Exponential decay coefficient for the uphill ramp of a bump.
pub const BUMP_UPHILL_DECAY: f32 = 1.5;

/// Base per-tick displacement magnitude for a gliding skier.
pub const BASE_RUN_SPEED: f32 = 4.0;
/// Speed multiplier applied while airborne after a launch.
pub const FLYING_SPEED_MULTIPLIER: f32 = 2.0;
/// Displacement scale applied while an impact timer runs.
pub const IMPACT_SLOWDOWN: f32 = 0.3;

/// Ticks during which further turn commands are rejected after a turn.
pub const TURN_COOLDOWN_TICKS: u32 = 6;
/// Number of obstacle hits that launches a skier into the air.
pub const COLLISION_ESCALATION_THRESHOLD: u8 = 4;
/// Impact stagger length for hard obstacles such as trees and rocks.
pub const IMPACT_HARD_TICKS: u32 = 30;
/// Impact stagger length for soft obstacles such as drift mounds.
pub const IMPACT_SOFT_TICKS: u32 = 12;
/// Feedback stagger length when a skier clips a gate pole.
pub const GATE_GRAZE_TICKS: u32 = 8;
/// Airborne duration before a launched skier crashes.
pub const FLYING_DURATION_TICKS: u32 = 40;
/// Ticks a crashed skier stays down before recovering.
pub const RECOVERY_DURATION_TICKS: u32 = 50;
/// Fraction of a gate's detection zone occupied by each pole.
pub const GATE_POLE_WIDTH_FACTOR: f32 = 0.15;
