//! Localised height contributions layered over the base terrain.
//!
//! A provider is a small capability object owned by whatever spawned the
//! terrain feature; the height field only sums contributions. New feature
//! shapes implement [`HeightProvider`] without touching the field itself.

use glam::Vec2;
use serde::Serialize;

use crate::constants::{BUMP_DOWNHILL_DECAY, BUMP_DOWNHILL_STEEPNESS, BUMP_UPHILL_DECAY};

/// Handle identifying a registered provider within a height field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ProviderId(u64);

impl ProviderId {
    /// Wraps a raw provider index.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// A localized, addable/removable contributor to the height field.
pub trait HeightProvider {
    /// Whether this provider contributes anything at `pos`.
    fn affects(&self, pos: Vec2) -> bool;
    /// Additive height contribution at `pos`, zero outside the footprint.
    fn contribution_at(&self, pos: Vec2) -> f32;
}

/// Asymmetric localized mound, e.g. a snow drift.
///
/// The falloff is deliberately lopsided: a gentle exponential ramp on the
/// uphill side (`dy <= 0`) and a near-cliff drop on the downhill side
/// (`dy > 0`), produced by scaling the downhill offset by
/// [`BUMP_DOWNHILL_STEEPNESS`] before applying the steeper decay. The mound
/// reads as skiable from the front and drops sharply off its back face.
#[derive(Debug, Clone, Serialize)]
pub struct RadialBumpProvider {
    /// World-space centre of the mound.
    pub center: Vec2,
    /// Full footprint width; contributions vanish beyond half this distance.
    pub footprint_width: f32,
    /// Full footprint height; contributions vanish beyond half this distance.
    pub footprint_height: f32,
    /// Peak contribution at the centre.
    pub max_height: f32,
}

impl RadialBumpProvider {
    /// Creates a bump centred at `center` with the given footprint and peak.
    #[must_use]
    pub const fn new(center: Vec2, footprint_width: f32, footprint_height: f32, max_height: f32) -> Self {
        Self {
            center,
            footprint_width,
            footprint_height,
            max_height,
        }
    }

    /// Offset of `pos` from the centre, normalised into `[-1, 1]` per axis.
    ///
    /// Returns `None` for degenerate footprints so callers never divide by
    /// zero.
    fn normalised_offset(&self, pos: Vec2) -> Option<Vec2> {
        let half_w = self.footprint_width * 0.5;
        let half_h = self.footprint_height * 0.5;
        if half_w <= 0.0 || half_h <= 0.0 {
            return None;
        }
        Some(Vec2::new(
            (pos.x - self.center.x) / half_w,
            (pos.y - self.center.y) / half_h,
        ))
    }
}

impl HeightProvider for RadialBumpProvider {
    fn affects(&self, pos: Vec2) -> bool {
        self.normalised_offset(pos)
            .is_some_and(|d| d.x.abs() <= 1.0 && d.y.abs() <= 1.0)
    }

    fn contribution_at(&self, pos: Vec2) -> f32 {
        if !self.affects(pos) {
            return 0.0;
        }
        let Some(d) = self.normalised_offset(pos) else {
            return 0.0;
        };
        let falloff = if d.y > 0.0 {
            // Downhill back face: steepen the offset, then decay hard.
            let sy = d.y * BUMP_DOWNHILL_STEEPNESS;
            (-BUMP_DOWNHILL_DECAY * (d.x * d.x + sy * sy)).exp()
        } else {
            (-BUMP_UPHILL_DECAY * (d.x * d.x + d.y * d.y)).exp()
        };
        (falloff * self.max_height).max(0.0)
    }
}
