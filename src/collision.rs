//! Axis-aligned collision resolution over the active entity set.
//!
//! Hitboxes are derived on demand from each entity's world position, nominal
//! size, and the per-kind [`HitboxProfile`]; skier hitboxes additionally
//! track the rendered pose by subtracting the current visual elevation.
//! Overlap is a plain two-axis interval test over the bounded active set, so
//! the pairwise pass stays well inside the tick budget. Outcomes dispatch
//! straight into the locomotion state machines of the actors involved, with
//! at most one consequence per skier per tick.

use bevy_ecs::prelude::*;
use bevy_transform::prelude::Transform;
use glam::Vec2;
use hashbrown::HashMap;
use log::debug;
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::components::{AiSkier, Collidable, EntityKind, Player, TerrainBump};
use crate::constants::GATE_POLE_WIDTH_FACTOR;
use crate::locomotion::Locomotion;
use crate::physics::ActorPhysics;
use crate::terrain::provider::{ProviderId, RadialBumpProvider};
use crate::terrain::HeightField;

/// Offset and scale factors turning a nominal bounding box into a hitbox.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HitboxProfile {
    /// Horizontal shift of the hitbox centre from the entity position.
    pub x_offset: f32,
    /// Vertical shift of the hitbox centre from the entity position.
    pub y_offset: f32,
    /// Fraction of the nominal width kept by the hitbox.
    pub width_factor: f32,
    /// Fraction of the nominal height kept by the hitbox.
    pub height_factor: f32,
}

/// Profile applied to entity kinds missing from [`COLLISION_PROFILES`].
///
/// The shrink to 70% keeps unknown entities forgiving rather than letting a
/// configuration gap fail the tick.
pub const DEFAULT_PROFILE: HitboxProfile = HitboxProfile {
    x_offset: 0.0,
    y_offset: 0.0,
    width_factor: 0.7,
    height_factor: 0.7,
};

/// Per-kind hitbox configuration, read-only at runtime.
///
/// Kinds without an entry fall back to [`DEFAULT_PROFILE`]; drift mounds do
/// so deliberately.
pub static COLLISION_PROFILES: Lazy<HashMap<EntityKind, HitboxProfile>> = Lazy::new(|| {
    let mut profiles = HashMap::new();
    profiles.insert(
        EntityKind::Player,
        HitboxProfile {
            x_offset: 0.0,
            y_offset: 4.0,
            width_factor: 0.5,
            height_factor: 0.4,
        },
    );
    profiles.insert(
        EntityKind::AiSkier,
        HitboxProfile {
            x_offset: 0.0,
            y_offset: 4.0,
            width_factor: 0.5,
            height_factor: 0.4,
        },
    );
    profiles.insert(
        EntityKind::Tree,
        HitboxProfile {
            x_offset: 0.0,
            y_offset: 6.0,
            width_factor: 0.4,
            height_factor: 0.3,
        },
    );
    profiles.insert(
        EntityKind::Rock,
        HitboxProfile {
            x_offset: 0.0,
            y_offset: 2.0,
            width_factor: 0.8,
            height_factor: 0.6,
        },
    );
    profiles.insert(
        EntityKind::Gate,
        HitboxProfile {
            x_offset: 0.0,
            y_offset: 0.0,
            width_factor: 1.0,
            height_factor: 1.0,
        },
    );
    profiles
});

/// Looks up the hitbox profile for `kind`, falling back to
/// [`DEFAULT_PROFILE`].
#[must_use]
pub fn profile_for(kind: EntityKind) -> HitboxProfile {
    COLLISION_PROFILES.get(&kind).copied().unwrap_or(DEFAULT_PROFILE)
}

/// Axis-aligned hitbox, recomputed on demand and never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    /// Minimum corner of the box.
    pub min: Vec2,
    /// Box width.
    pub width: f32,
    /// Box height.
    pub height: f32,
}

impl Hitbox {
    /// Separating-axis overlap test on two axes.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.x < other.min.x + other.width
            && other.min.x < self.min.x + self.width
            && self.min.y < other.min.y + other.height
            && other.min.y < self.min.y + self.height
    }
}

/// Computes the effective hitbox for an entity at `pos`.
///
/// `elevation` shifts the box upward to track the rendered pose; pass `0.0`
/// for entities that never leave the ground.
#[must_use]
pub fn hitbox_for(pos: Vec2, collidable: &Collidable, elevation: f32) -> Hitbox {
    let profile = profile_for(collidable.kind);
    let center = Vec2::new(
        pos.x + profile.x_offset,
        pos.y + profile.y_offset - elevation,
    );
    let width = collidable.width * profile.width_factor;
    let height = collidable.height * profile.height_factor;
    Hitbox {
        min: center - Vec2::new(width, height) * 0.5,
        width,
        height,
    }
}

/// Outcome of a slalom gate, decided at most once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum GateResolution {
    /// No skier has decided this gate yet.
    #[default]
    Pending,
    /// A skier traversed the detection zone without touching a pole.
    Passed,
    /// A skier clipped one of the poles.
    Missed,
}

/// Slalom gate state.
///
/// The gate's full bounding region is a non-colliding detection zone; only
/// its two pole sub-hitboxes register contact.
#[derive(Component, Debug, Default, Serialize)]
pub struct Gate {
    /// Pass/miss outcome; once set it never changes.
    pub resolution: GateResolution,
}

/// The two pole sub-hitboxes at the edges of a gate's detection zone.
#[must_use]
pub fn pole_hitboxes(zone: &Hitbox) -> [Hitbox; 2] {
    let pole_width = zone.width * GATE_POLE_WIDTH_FACTOR;
    let left = Hitbox {
        min: zone.min,
        width: pole_width,
        height: zone.height,
    };
    let right = Hitbox {
        min: Vec2::new(zone.min.x + zone.width - pole_width, zone.min.y),
        width: pole_width,
        height: zone.height,
    };
    [left, right]
}

/// Map from obstacle entity to the height provider it registered.
#[derive(Resource, Default)]
pub struct TerrainBumpIndex(HashMap<Entity, ProviderId>);

/// Keeps the height field's provider set in sync with [`TerrainBump`]
/// obstacles as they spawn and despawn.
pub fn sync_terrain_bumps_system(
    mut field: ResMut<HeightField>,
    mut index: ResMut<TerrainBumpIndex>,
    added: Query<(Entity, &Transform, &TerrainBump), Added<TerrainBump>>,
    mut removed: RemovedComponents<TerrainBump>,
) {
    for (entity, transform, bump) in &added {
        let provider = RadialBumpProvider::new(
            transform.translation.truncate(),
            bump.footprint_width,
            bump.footprint_height,
            bump.max_height,
        );
        let id = field.add_provider(Box::new(provider));
        index.0.insert(entity, id);
        debug!("registered terrain bump for {entity:?}");
    }
    for entity in removed.read() {
        if let Some(id) = index.0.remove(&entity) {
            field.remove_provider(id);
            debug!("unregistered terrain bump for {entity:?}");
        }
    }
}

/// Resolves overlaps among all collidable entities for this tick.
///
/// Dispatch policy per skier, first qualifying overlap wins:
/// - player vs obstacle: skipped while the player is already in a collision
///   state, otherwise escalates through [`Locomotion::on_collision`];
/// - AI skier vs obstacle: a single hit crashes the AI skier outright;
/// - skier vs gate: pole contact registers a miss with minor feedback, a
///   clean traversal past the gate line registers a pass; either way the
///   gate resolves exactly once.
///
/// Skiers never collide with each other.
pub fn collision_system(
    mut skiers: Query<(
        &Transform,
        &Collidable,
        &ActorPhysics,
        &mut Locomotion,
        Option<&Player>,
        Option<&AiSkier>,
    )>,
    obstacles: Query<(&Transform, &Collidable), (Without<Locomotion>, Without<Gate>)>,
    mut gates: Query<(&Transform, &Collidable, &mut Gate), Without<Locomotion>>,
) {
    for (transform, collidable, physics, mut locomotion, player, ai) in &mut skiers {
        let pos = transform.translation.truncate();
        let skier_box = hitbox_for(pos, collidable, physics.elevation);

        let mut resolved = false;
        for (obstacle_transform, obstacle) in &obstacles {
            if !obstacle.kind.is_obstacle() {
                continue;
            }
            let obstacle_box =
                hitbox_for(obstacle_transform.translation.truncate(), obstacle, 0.0);
            if !skier_box.overlaps(&obstacle_box) {
                continue;
            }
            if player.is_some() {
                if locomotion.is_in_collision_state() {
                    // One active consequence at a time.
                    continue;
                }
                let Some(hardness) = obstacle.kind.hardness() else {
                    continue;
                };
                if locomotion.on_collision(hardness) {
                    debug!("player hit {:?} at {pos:?}", obstacle.kind);
                    resolved = true;
                    break;
                }
            } else if ai.is_some() && locomotion.crash() {
                debug!("AI skier crashed into {:?}", obstacle.kind);
                resolved = true;
                break;
            }
        }
        if resolved {
            continue;
        }

        for (gate_transform, gate_extent, mut gate) in &mut gates {
            if gate.resolution != GateResolution::Pending {
                continue;
            }
            let zone = hitbox_for(gate_transform.translation.truncate(), gate_extent, 0.0);
            let [left_pole, right_pole] = pole_hitboxes(&zone);
            if skier_box.overlaps(&left_pole) || skier_box.overlaps(&right_pole) {
                gate.resolution = GateResolution::Missed;
                debug!("gate missed at {:?}", gate_transform.translation);
                if locomotion.graze() {
                    debug!("pole clip staggered the skier");
                }
                break;
            }
            if skier_box.overlaps(&zone) && pos.y > gate_transform.translation.y {
                gate.resolution = GateResolution::Passed;
                debug!("gate passed at {:?}", gate_transform.translation);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(min_x: f32, min_y: f32, width: f32, height: f32) -> Hitbox {
        Hitbox {
            min: Vec2::new(min_x, min_y),
            width,
            height,
        }
    }

    #[test]
    fn overlap_requires_both_axes() {
        let a = boxed(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&boxed(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.overlaps(&boxed(20.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&boxed(0.0, 20.0, 10.0, 10.0)));
        assert!(!a.overlaps(&boxed(10.0, 0.0, 10.0, 10.0)), "touching edges do not overlap");
    }

    #[test]
    fn skier_hitbox_tracks_elevation() {
        let collidable = Collidable::new(EntityKind::Player, 20.0, 20.0);
        let grounded = hitbox_for(Vec2::new(0.0, 100.0), &collidable, 0.0);
        let airborne = hitbox_for(Vec2::new(0.0, 100.0), &collidable, 6.0);
        assert!((grounded.min.y - airborne.min.y - 6.0).abs() < 1e-6);
        assert_eq!(grounded.width, airborne.width);
    }

    #[test]
    fn unknown_kind_uses_default_profile() {
        assert_eq!(profile_for(EntityKind::DriftMound), DEFAULT_PROFILE);
    }

    #[test]
    fn poles_sit_at_zone_edges() {
        let zone = boxed(0.0, 0.0, 100.0, 30.0);
        let [left, right] = pole_hitboxes(&zone);
        assert_eq!(left.min.x, 0.0);
        assert!((right.min.x + right.width - 100.0).abs() < 1e-6);
        assert!(left.width < zone.width * 0.5);
        // A skier through the middle touches neither pole.
        let skier = boxed(40.0, 10.0, 20.0, 10.0);
        assert!(skier.overlaps(&zone));
        assert!(!skier.overlaps(&left));
        assert!(!skier.overlaps(&right));
    }
}
