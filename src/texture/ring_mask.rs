//! Edge-ring alpha mask separating the thick lens rim from the flat center.

use crate::foundation::core::ResolvedRing;
use crate::foundation::error::GlassResult;
use crate::foundation::math::{clamp_byte, smoothstep};
use crate::geometry::container::ContainerGeometry;
use crate::geometry::sdf::BoundaryShape;
use crate::texture::raster::{ImageResource, Raster, RasterBackend};

/// Everything an edge mask depends on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskKey {
    /// Raster width.
    pub width: u32,
    /// Raster height.
    pub height: u32,
    /// Horizontal corner radius.
    pub radius_x: f64,
    /// Vertical corner radius.
    pub radius_y: f64,
    /// Resolved ring width.
    pub ring_width: f64,
    /// Resolved inner feather.
    pub inner_feather: f64,
    /// Outer feather.
    pub outer_feather: f64,
}

impl MaskKey {
    /// Key for a geometry and resolved ring.
    pub fn new(geom: &ContainerGeometry, ring: ResolvedRing) -> Self {
        Self {
            width: geom.width(),
            height: geom.height(),
            radius_x: geom.radii().x,
            radius_y: geom.radii().y,
            ring_width: ring.ring_width,
            inner_feather: ring.inner_feather,
            outer_feather: ring.outer_feather,
        }
    }
}

/// Outer and inner boundaries of the ring, each classified independently.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingBoundaries {
    /// Container boundary.
    pub outer: BoundaryShape,
    /// Boundary inset by the ring width.
    pub inner: BoundaryShape,
}

impl RingBoundaries {
    /// Boundaries for a container and ring width.
    pub fn new(geom: &ContainerGeometry, ring_width: f64) -> Self {
        let (half_w, half_h) = geom.half_extents();
        let radii = geom.radii();
        let ring = ring_width.clamp(0.0, (half_w.min(half_h) - 1.0).max(0.0));
        let inner_w = half_w - ring;
        let inner_h = half_h - ring;
        Self {
            outer: BoundaryShape::select(half_w, half_h, radii.x, radii.y),
            inner: BoundaryShape::select(
                inner_w,
                inner_h,
                (radii.x - ring).max(0.0),
                (radii.y - ring).max(0.0),
            ),
        }
    }
}

/// Ring opacity at a centered coordinate.
///
/// The outer term holds 1 inside the container with a thin anti-alias band; the inner term
/// fades from 0 inside the inset boundary to 1 across `inner_feather`.
pub fn ring_alpha(b: &RingBoundaries, ring: ResolvedRing, x: f64, y: f64) -> f64 {
    let outer = 1.0 - smoothstep(0.0, ring.outer_feather, b.outer.distance(x, y));
    let inner = smoothstep(-ring.inner_feather, 0.0, b.inner.distance(x, y));
    outer * inner
}

/// Rasterize the ring mask: white RGB, alpha carries coverage.
#[tracing::instrument(skip_all, fields(width = geom.width(), height = geom.height()))]
pub fn rasterize_ring_mask(geom: &ContainerGeometry, ring: ResolvedRing) -> Raster {
    let b = RingBoundaries::new(geom, ring.ring_width);
    let (half_w, half_h) = geom.half_extents();
    let mut raster = Raster::new(geom.width(), geom.height());
    for y in 0..geom.height() {
        let cy = f64::from(y) + 0.5 - half_h;
        for x in 0..geom.width() {
            let cx = f64::from(x) + 0.5 - half_w;
            let a = clamp_byte(255.0 * ring_alpha(&b, ring, cx, cy));
            raster.put(x, y, [255, 255, 255, a]);
        }
    }
    raster
}

/// Rasterize and encode the ring mask.
pub fn generate_ring_mask(
    backend: &dyn RasterBackend,
    geom: &ContainerGeometry,
    ring: ResolvedRing,
) -> GlassResult<ImageResource> {
    backend.encode(rasterize_ring_mask(geom, ring))
}

#[cfg(test)]
#[path = "../../tests/unit/texture/ring_mask.rs"]
mod tests;
