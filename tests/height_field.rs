//! Height field composition and readiness behaviour.
use approx::assert_abs_diff_eq;
use glam::Vec2;
use piste::{HeightField, RadialBumpProvider};
use rstest::rstest;
use test_utils::{flat_field, ramp_field, UnreadySampler};

#[rstest]
#[case(Vec2::new(0.0, 0.0))]
#[case(Vec2::new(-312.5, 987.0))]
#[case(Vec2::new(1e6, -1e6))]
fn flat_field_is_flat_everywhere(#[case] pos: Vec2) {
    let field = flat_field(5.0);
    assert_abs_diff_eq!(field.height_at(pos), 5.0, epsilon = 1e-5);
    let slope = field.slope_at(pos);
    assert_eq!(slope.gradient, 0.0);
    assert_eq!(slope.angle, 0.0);
}

#[rstest]
#[case(Vec2::new(10.0, 10.0))]
#[case(Vec2::new(-40.0, 260.0))]
fn unready_sampler_reads_as_zero(#[case] pos: Vec2) {
    let field = HeightField::new(Box::new(UnreadySampler), Vec2::splat(100.0), 10.0);
    assert_eq!(field.height_at(pos), 0.0);
    assert_eq!(field.slope_at(pos).gradient, 0.0);
}

#[test]
fn height_stays_non_negative_with_providers() {
    let mut field = ramp_field(10.0);
    field.add_provider(Box::new(RadialBumpProvider::new(
        Vec2::new(50.0, 50.0),
        80.0,
        80.0,
        6.0,
    )));
    for x in -3..8 {
        for y in -3..8 {
            let pos = Vec2::new(x as f32 * 20.0, y as f32 * 20.0);
            assert!(
                field.height_at(pos) >= 0.0,
                "height must never be negative at {pos:?}"
            );
        }
    }
}

#[test]
fn providers_survive_sampler_swap() {
    let mut field = HeightField::default();
    field.add_provider(Box::new(RadialBumpProvider::new(
        Vec2::ZERO,
        60.0,
        60.0,
        4.0,
    )));
    let before = field.height_at(Vec2::ZERO);
    assert_abs_diff_eq!(before, 4.0, epsilon = 1e-5);

    // Late asset arrival must not disturb registered providers.
    field.set_sampler(Box::new(UnreadySampler));
    assert_abs_diff_eq!(field.height_at(Vec2::ZERO), before, epsilon = 1e-5);
    assert_eq!(field.provider_count(), 1);
}

#[test]
fn slope_reports_descent_direction_on_ramp() {
    let field = ramp_field(10.0);
    let slope = field.slope_at(Vec2::new(50.0, 40.0));
    assert!(slope.gradient > 0.0);
    // Heights rise along +y, so the gradient points straight downhill-facing.
    assert_abs_diff_eq!(slope.angle, std::f32::consts::FRAC_PI_2, epsilon = 0.1);
}
