pub use kurbo::{Point, Vec2};

/// Ceiling on `width * height` for any generated texture.
///
/// Containers above this size skip texture generation entirely and fall back to a plain
/// backdrop blur.
pub const PIXEL_BUDGET: u64 = 33_000_000;

/// Elliptical corner radii shared by all four corners, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CornerRadii {
    /// Horizontal radius.
    pub x: f64,
    /// Vertical radius.
    pub y: f64,
}

impl CornerRadii {
    /// Elliptical radii.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Circular radius on both axes.
    pub const fn uniform(r: f64) -> Self {
        Self { x: r, y: r }
    }

    /// No rounding.
    pub const fn zero() -> Self {
        Self::uniform(0.0)
    }
}

/// Parameters shaping the displacement field.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeParams {
    /// How close the undistorted center reaches toward the boundary, in `[0, 1]`.
    pub flat_area_scale: f64,
    /// Steepness of the refraction falloff; inset / hardness gives the transition width.
    pub edge_hardness: f64,
}

impl ShapeParams {
    pub(crate) const DEFAULT_FLAT_AREA_SCALE: f64 = 0.6;
    pub(crate) const DEFAULT_EDGE_HARDNESS: f64 = 2.0;

    /// Clamp into the valid domain; NaN and non-positive hardness fall back to defaults.
    pub fn sanitized(self) -> Self {
        let flat = if self.flat_area_scale.is_finite() {
            self.flat_area_scale.clamp(0.0, 1.0)
        } else {
            Self::DEFAULT_FLAT_AREA_SCALE
        };
        let hard = if self.edge_hardness.is_finite() && self.edge_hardness > 0.0 {
            self.edge_hardness
        } else {
            Self::DEFAULT_EDGE_HARDNESS
        };
        Self {
            flat_area_scale: flat,
            edge_hardness: hard,
        }
    }
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            flat_area_scale: Self::DEFAULT_FLAT_AREA_SCALE,
            edge_hardness: Self::DEFAULT_EDGE_HARDNESS,
        }
    }
}

/// Parameters shaping the edge-ring mask.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RingParams {
    /// Ring width in pixels; `0` disables the mask.
    pub ring_width_px: f64,
    /// Inner feather in pixels; `0` selects the automatic feather.
    pub inner_feather_px: f64,
}

/// Resolved ring parameters for a concrete container, all in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedRing {
    /// Ring width after clamping to the available inset.
    pub ring_width: f64,
    /// Inner feather after auto selection.
    pub inner_feather: f64,
    /// Outer anti-alias band.
    pub outer_feather: f64,
}

impl RingParams {
    /// Anti-alias band outside the outer boundary.
    pub const OUTER_FEATHER_PX: f64 = 1.0;
    pub(crate) const DEFAULT_RING_WIDTH_PX: f64 = 18.0;

    /// Clamp into the valid domain; NaN and negatives become `0`.
    pub fn sanitized(self) -> Self {
        let nonneg = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            ring_width_px: nonneg(self.ring_width_px),
            inner_feather_px: nonneg(self.inner_feather_px),
        }
    }

    /// Automatic inner feather for a given ring width.
    pub fn auto_feather(ring_width: f64) -> f64 {
        (ring_width * 0.9).clamp(4.0, 24.0)
    }

    /// Resolve against container extents. `None` means no mask should exist.
    pub fn resolve(self, width: f64, height: f64) -> Option<ResolvedRing> {
        let p = self.sanitized();
        let available = (width.min(height) / 2.0 - 1.0).max(0.0);
        let ring_width = p.ring_width_px.min(available);
        if ring_width <= 0.0 {
            return None;
        }
        let inner_feather = if p.inner_feather_px > 0.0 {
            p.inner_feather_px
        } else {
            Self::auto_feather(ring_width)
        };
        Some(ResolvedRing {
            ring_width,
            inner_feather,
            outer_feather: Self::OUTER_FEATHER_PX,
        })
    }
}

impl Default for RingParams {
    fn default() -> Self {
        Self {
            ring_width_px: Self::DEFAULT_RING_WIDTH_PX,
            inner_feather_px: 0.0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
