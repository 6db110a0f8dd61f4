//! Refraction displacement field: a flat undistorted center with a curved falloff toward
//! the container boundary, encoded as a normalized RGB offset image.

use crate::foundation::core::{Point, ShapeParams, Vec2};
use crate::foundation::error::GlassResult;
use crate::foundation::math::{clamp_byte, smoothstep};
use crate::geometry::container::ContainerGeometry;
use crate::geometry::sdf::BoundaryShape;
use crate::texture::raster::{ImageResource, Raster, RasterBackend};

/// Everything a displacement field depends on. Equal keys give pixel-identical fields.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplacementKey {
    /// Raster width.
    pub width: u32,
    /// Raster height.
    pub height: u32,
    /// Horizontal corner radius.
    pub radius_x: f64,
    /// Vertical corner radius.
    pub radius_y: f64,
    /// Sanitized flat-area scale.
    pub flat_area_scale: f64,
    /// Sanitized edge hardness.
    pub edge_hardness: f64,
}

impl DisplacementKey {
    /// Key for a geometry and shape.
    pub fn new(geom: &ContainerGeometry, shape: ShapeParams) -> Self {
        let shape = shape.sanitized();
        Self {
            width: geom.width(),
            height: geom.height(),
            radius_x: geom.radii().x,
            radius_y: geom.radii().y,
            flat_area_scale: shape.flat_area_scale,
            edge_hardness: shape.edge_hardness,
        }
    }
}

/// The undistorted inner region and the width of its falloff band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatZone {
    /// Pixels between the container boundary and the flat zone.
    pub inset: f64,
    /// Distance over which displacement ramps from none to full, at least 1px.
    pub transition: f64,
    /// Flat zone boundary.
    pub boundary: BoundaryShape,
}

impl FlatZone {
    /// Derive the flat zone for a container.
    pub fn new(geom: &ContainerGeometry, shape: ShapeParams) -> Self {
        let shape = shape.sanitized();
        let (half_w, half_h) = geom.half_extents();
        let min_half = half_w.min(half_h);

        let inset = ((1.0 - shape.flat_area_scale) * min_half)
            .min(min_half - 1.0)
            .max(0.0);
        let inner_w = half_w - inset;
        let inner_h = half_h - inset;
        let radii = geom.radii();
        let inner_rx = (radii.x * shape.flat_area_scale).min(inner_w);
        let inner_ry = (radii.y * shape.flat_area_scale).min(inner_h);

        Self {
            inset,
            transition: (inset / shape.edge_hardness).max(1.0),
            boundary: BoundaryShape::select(inner_w, inner_h, inner_rx, inner_ry),
        }
    }

    /// Eased fraction of the original offset from center kept at `(x, y)`:
    /// `1` inside the flat zone, falling to `0` past the transition band.
    pub fn retained(&self, x: f64, y: f64) -> f64 {
        let d = self.boundary.distance(x, y);
        let strength = smoothstep(self.transition, 0.0, d);
        smoothstep(0.0, 1.0, strength)
    }
}

/// Rasterize the displacement field.
///
/// R carries x offsets, G and B both carry y offsets. All channels are normalized by the single
/// largest offset component, so `128` means no displacement.
#[tracing::instrument(skip_all, fields(width = geom.width(), height = geom.height()))]
pub fn rasterize_displacement(geom: &ContainerGeometry, shape: ShapeParams) -> Raster {
    let zone = FlatZone::new(geom, shape);
    let (w, h) = (geom.width(), geom.height());
    let (half_w, half_h) = geom.half_extents();
    let center = Point::new(half_w, half_h);

    let mut offsets = Vec::<[f32; 2]>::with_capacity((w as usize) * (h as usize));
    let mut max_offset = 0.0f64;
    for y in 0..h {
        for x in 0..w {
            let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let rel: Vec2 = p - center;
            let sampled = center + rel * zone.retained(rel.x, rel.y);
            let d = sampled - p;
            max_offset = max_offset.max(d.x.abs()).max(d.y.abs());
            offsets.push([d.x as f32, d.y as f32]);
        }
    }
    let max_offset = max_offset.max(1.0);

    let mut raster = Raster::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let [dx, dy] = offsets[(y as usize) * (w as usize) + (x as usize)];
            let edge = border_factor(x, y, w, h);
            let r = encode_offset(f64::from(dx) * edge, max_offset);
            let g = encode_offset(f64::from(dy) * edge, max_offset);
            raster.put(x, y, [r, g, g, 255]);
        }
    }
    raster
}

/// Rasterize and encode the displacement field.
pub fn generate_displacement(
    backend: &dyn RasterBackend,
    geom: &ContainerGeometry,
    shape: ShapeParams,
) -> GlassResult<ImageResource> {
    backend.encode(rasterize_displacement(geom, shape))
}

fn encode_offset(offset: f64, max_offset: f64) -> u8 {
    clamp_byte(255.0 * (offset / max_offset / 2.0 + 0.5))
}

// Attenuates offsets within 2px of the raster edge.
fn border_factor(x: u32, y: u32, w: u32, h: u32) -> f64 {
    let d = x.min(y).min(w - 1 - x).min(h - 1 - y);
    (f64::from(d) / 2.0).min(1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/texture/displacement.rs"]
mod tests;
