//! Numeric conversion helpers used by the terrain sampler.
//!
//! These utilities guard conversions between the continuous world plane and
//! discrete grid indices so that degenerate inputs produce a defined result
//! instead of NaN or an out-of-range index.

/// Wraps `value` into `[0, period)`, always returning a non-negative result.
///
/// A non-positive or non-finite `period` yields `0.0` so callers never divide
/// by zero downstream.
///
/// # Examples
/// ```
/// use piste::numeric::wrap_coord;
/// assert!((wrap_coord(-30.0, 100.0) - 70.0).abs() < 1e-6);
/// assert!((wrap_coord(230.0, 100.0) - 30.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn wrap_coord(value: f32, period: f32) -> f32 {
    if !period.is_finite() || period <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    value.rem_euclid(period)
}

/// Maps a normalised coordinate in `[0, 1)` to a grid index below `len`.
///
/// Out-of-range or non-finite inputs clamp to the valid index range; a zero
/// `len` yields index `0`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The scaled value is clamped into the index domain before casting."
)]
#[must_use]
pub fn scaled_index(norm: f32, len: u32) -> u32 {
    if len == 0 || !norm.is_finite() {
        return 0;
    }
    let scaled = (norm * len as f32).floor().max(0.0);
    let index = scaled as u32;
    index.min(len - 1)
}
