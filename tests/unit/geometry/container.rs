use super::*;

#[test]
fn radii_never_exceed_half_extents() {
    for (w, h, r) in [
        (100.0, 40.0, 500.0),
        (1.0, 1.0, 3.0),
        (0.0, -5.0, 10.0),
        (301.4, 77.7, 60.0),
    ] {
        let g = ContainerGeometry::new(w, h, CornerRadii::uniform(r));
        let (half_w, half_h) = g.half_extents();
        assert!(g.radii().x <= half_w, "{g:?}");
        assert!(g.radii().y <= half_h, "{g:?}");
    }
}

#[test]
fn degenerate_dimensions_floor_to_one() {
    let g = ContainerGeometry::new(0.0, -12.0, CornerRadii::zero());
    assert_eq!((g.width(), g.height()), (1, 1));
    let g = ContainerGeometry::new(f64::NAN, 0.4, CornerRadii::zero());
    assert_eq!((g.width(), g.height()), (1, 1));
}

#[test]
fn nan_radii_become_zero() {
    let g = ContainerGeometry::new(10.0, 10.0, CornerRadii::new(f64::NAN, -2.0));
    assert_eq!(g.radii(), CornerRadii::zero());
}

#[test]
fn fifty_percent_radius_is_an_ellipse() {
    let m = ContainerMeasurement::new(240.0, 120.0, "50%");
    let g = ContainerGeometry::from_measurement(&m);
    assert!(g.is_ellipse());
    assert_eq!(g.radii(), CornerRadii::new(120.0, 60.0));
}

#[test]
fn pill_with_px_radius_is_not_an_ellipse() {
    let m = ContainerMeasurement::new(240.0, 120.0, "60px");
    let g = ContainerGeometry::from_measurement(&m);
    assert!(!g.is_ellipse());
}

#[test]
fn budget_is_a_strict_ceiling() {
    let at = ContainerGeometry::new(33_000.0, 1_000.0, CornerRadii::zero());
    assert_eq!(at.pixel_count(), PIXEL_BUDGET);
    assert!(!at.exceeds_budget());
    let over = ContainerGeometry::new(33_001.0, 1_000.0, CornerRadii::zero());
    assert!(over.exceeds_budget());
}
