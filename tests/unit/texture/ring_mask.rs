use super::*;
use crate::foundation::core::{CornerRadii, RingParams};

fn ring(width: f64, feather: f64) -> ResolvedRing {
    RingParams {
        ring_width_px: width,
        inner_feather_px: feather,
    }
    .resolve(1e6, 1e6)
    .unwrap()
}

#[test]
fn center_is_transparent_and_ring_is_opaque() {
    let geom = ContainerGeometry::new(200.0, 120.0, CornerRadii::uniform(20.0));
    let r = rasterize_ring_mask(&geom, ring(16.0, 4.0));
    assert_eq!(r.pixel(100, 60)[3], 0);
    // 8px in from the left edge: inside the ring, well clear of both feathers.
    assert_eq!(r.pixel(8, 60)[3], 255);
    assert_eq!(r.pixel(100, 5)[3], 255);
}

#[test]
fn rgb_is_white_everywhere() {
    let geom = ContainerGeometry::new(40.0, 30.0, CornerRadii::uniform(15.0));
    let r = rasterize_ring_mask(&geom, ring(6.0, 0.0));
    for px in r.data.chunks_exact(4) {
        assert_eq!(&px[..3], &[255, 255, 255]);
    }
}

#[test]
fn inner_feather_ramps_monotonically() {
    let geom = ContainerGeometry::new(200.0, 200.0, CornerRadii::zero());
    let r = rasterize_ring_mask(&geom, ring(30.0, 12.0));
    let mut prev = 0u8;
    // Walk from the center toward the left edge through the feather.
    for x in (10..100).rev() {
        let a = r.pixel(x, 100)[3];
        assert!(a >= prev, "alpha dropped at x={x}");
        prev = a;
    }
    assert_eq!(prev, 255);
}

#[test]
fn corners_outside_rounded_boundary_are_clear() {
    let geom = ContainerGeometry::new(100.0, 100.0, CornerRadii::uniform(40.0));
    let r = rasterize_ring_mask(&geom, ring(10.0, 4.0));
    assert_eq!(r.pixel(0, 0)[3], 0);
    assert_eq!(r.pixel(99, 99)[3], 0);
}

#[test]
fn inner_level_is_classified_on_its_own() {
    // Small rounded corners vanish after a wide inset: the inner boundary turns sharp.
    let geom = ContainerGeometry::new(100.0, 100.0, CornerRadii::uniform(4.0));
    let b = RingBoundaries::new(&geom, 10.0);
    assert!(matches!(b.outer, BoundaryShape::Rounded { .. }));
    assert!(matches!(b.inner, BoundaryShape::Sharp { .. }));

    let geom = ContainerGeometry::new(100.0, 60.0, CornerRadii::new(50.0, 30.0));
    let b = RingBoundaries::new(&geom, 10.0);
    assert!(matches!(b.outer, BoundaryShape::Ellipse { .. }));
    assert_eq!(b.inner, BoundaryShape::Ellipse { rx: 40.0, ry: 20.0 });
}

#[test]
fn mask_regeneration_is_pixel_identical() {
    let geom = ContainerGeometry::new(90.0, 50.0, CornerRadii::new(20.0, 10.0));
    let a = rasterize_ring_mask(&geom, ring(8.0, 0.0));
    let b = rasterize_ring_mask(&geom, ring(8.0, 0.0));
    assert_eq!(a, b);
}

fn partial_alpha_run(alphas: impl Iterator<Item = u8>) -> usize {
    alphas.filter(|a| *a > 0 && *a < 255).count()
}

#[test]
fn feather_band_is_equally_wide_on_every_edge_with_elliptical_corners() {
    // Inner corner radii become (42, 2) after the inset.
    let geom = ContainerGeometry::new(300.0, 100.0, CornerRadii::new(60.0, 20.0));
    let r = rasterize_ring_mask(&geom, ring(18.0, 12.0));
    let b = RingBoundaries::new(&geom, 18.0);
    assert!(matches!(b.inner, BoundaryShape::Rounded { .. }));

    let top = partial_alpha_run((0..50).map(|y| r.pixel(150, y)[3]));
    let left = partial_alpha_run((0..150).map(|x| r.pixel(x, 50)[3]));
    assert!(top >= 10, "top feather collapsed to {top}px");
    assert_eq!(top, left);

    // Mirrored edges agree too.
    let bottom = partial_alpha_run((50..100).map(|y| r.pixel(150, y)[3]));
    let right = partial_alpha_run((150..300).map(|x| r.pixel(x, 50)[3]));
    assert_eq!(top, bottom);
    assert_eq!(left, right);
}
