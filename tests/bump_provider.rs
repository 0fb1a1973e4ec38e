//! Radial bump footprint and asymmetric falloff behaviour.
use approx::assert_abs_diff_eq;
use glam::Vec2;
use piste::{HeightProvider, RadialBumpProvider};
use rstest::rstest;

fn bump() -> RadialBumpProvider {
    RadialBumpProvider::new(Vec2::ZERO, 100.0, 100.0, 3.0)
}

#[rstest]
#[case(Vec2::new(51.0, 0.0))]
#[case(Vec2::new(-51.0, 0.0))]
#[case(Vec2::new(0.0, 51.0))]
#[case(Vec2::new(0.0, -51.0))]
#[case(Vec2::new(200.0, 200.0))]
fn no_contribution_outside_footprint(#[case] pos: Vec2) {
    let bump = bump();
    assert!(!bump.affects(pos));
    assert_eq!(bump.contribution_at(pos), 0.0);
}

#[test]
fn peak_sits_at_the_centre() {
    let bump = bump();
    assert!(bump.affects(Vec2::ZERO));
    assert_abs_diff_eq!(bump.contribution_at(Vec2::ZERO), 3.0, epsilon = 1e-5);
}

#[test]
fn uphill_side_always_beats_downhill_side() {
    let bump = bump();
    for step in 3..20 {
        let d = step as f32 * 0.05 * 50.0;
        let uphill = bump.contribution_at(Vec2::new(0.0, -d));
        let downhill = bump.contribution_at(Vec2::new(0.0, d));
        assert!(
            uphill > downhill,
            "uphill {uphill} must exceed downhill {downhill} at offset {d}"
        );
    }
}

#[test]
fn back_face_drops_like_a_cliff() {
    let bump = bump();
    let uphill = bump.contribution_at(Vec2::new(0.0, -40.0));
    let downhill = bump.contribution_at(Vec2::new(0.0, 40.0));
    assert!(uphill > 1.0, "front ramp should still carry height: {uphill}");
    assert!(downhill < 0.01, "back face should be near zero: {downhill}");
    assert!(uphill > downhill * 100.0);
}

#[test]
fn degenerate_footprint_contributes_nothing() {
    let flat = RadialBumpProvider::new(Vec2::ZERO, 0.0, 100.0, 3.0);
    assert!(!flat.affects(Vec2::ZERO));
    assert_eq!(flat.contribution_at(Vec2::ZERO), 0.0);

    let line = RadialBumpProvider::new(Vec2::ZERO, 100.0, 0.0, 3.0);
    assert_eq!(line.contribution_at(Vec2::new(10.0, 0.0)), 0.0);
}
