//! Basic vector math helper functions.
//! Small helpers for calculating magnitudes and normalised vectors on the
//! world plane.
use glam::Vec2;

/// Returns the magnitude of a planar vector expressed by its components.
///
/// # Examples
/// ```
/// use piste::vector_math::vec_mag;
/// let magnitude = vec_mag(3.0, 4.0);
/// assert!((magnitude - 5.0).abs() < f32::EPSILON);
/// ```
#[must_use]
pub fn vec_mag(component_x: f32, component_y: f32) -> f32 {
    Vec2::new(component_x, component_y).length()
}

/// Returns the unit vector in the direction of the supplied components.
///
/// The function checks that both components are finite and the vector is
/// non-zero before normalising. If the input is invalid or the zero vector,
/// it returns `(0.0, 0.0)`.
///
/// # Examples
///
/// ```
/// use piste::vec_normalize;
/// let (nx, ny) = vec_normalize(3.0, 4.0);
/// assert!((nx - 0.6).abs() < 1e-6);
/// assert!((ny - 0.8).abs() < 1e-6);
///
/// let zero = vec_normalize(0.0, 0.0);
/// assert_eq!(zero, (0.0, 0.0));
/// ```
#[must_use]
pub fn vec_normalize(component_x: f32, component_y: f32) -> (f32, f32) {
    let vector = Vec2::new(component_x, component_y);
    if !vector.is_finite() {
        return (0.0, 0.0);
    }

    let normalised = vector.try_normalize().unwrap_or(Vec2::ZERO);
    (normalised.x, normalised.y)
}
