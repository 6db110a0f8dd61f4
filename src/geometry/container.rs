use crate::foundation::core::{CornerRadii, PIXEL_BUDGET};
use crate::foundation::math::finite_or;
use crate::geometry::css::parse_corner_radius;
use crate::geometry::sdf::ELLIPSE_TOLERANCE_PX;

/// Raw values read from the host environment at compute time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContainerMeasurement {
    /// Layout width in CSS pixels.
    pub width: f64,
    /// Layout height in CSS pixels.
    pub height: f64,
    /// Computed `border-radius` (top-left corner) as a CSS string.
    pub border_radius: String,
}

impl ContainerMeasurement {
    /// Convenience constructor.
    pub fn new(width: f64, height: f64, border_radius: impl Into<String>) -> Self {
        Self {
            width,
            height,
            border_radius: border_radius.into(),
        }
    }
}

/// Derived container geometry. Never stored as source of truth; recomputed per cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerGeometry {
    width: u32,
    height: u32,
    radii: CornerRadii,
}

impl ContainerGeometry {
    /// Resolve pixel dimensions and radii.
    ///
    /// Dimensions are rounded and floored to 1; radii are clamped into
    /// `[0, width / 2]` and `[0, height / 2]`.
    pub fn new(width: f64, height: f64, radii: CornerRadii) -> Self {
        let width = to_raster_extent(width);
        let height = to_raster_extent(height);
        let half_w = f64::from(width) / 2.0;
        let half_h = f64::from(height) / 2.0;
        let rx = finite_or(radii.x, 0.0).clamp(0.0, half_w);
        let ry = finite_or(radii.y, 0.0).clamp(0.0, half_h);
        Self {
            width,
            height,
            radii: CornerRadii::new(rx, ry),
        }
    }

    /// Resolve from a host measurement, parsing its computed border radius.
    pub fn from_measurement(m: &ContainerMeasurement) -> Self {
        let w = finite_or(m.width, 0.0);
        let h = finite_or(m.height, 0.0);
        let radii = parse_corner_radius(&m.border_radius, w, h);
        Self::new(w, h, radii)
    }

    /// Raster width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Raster height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Clamped corner radii.
    pub fn radii(&self) -> CornerRadii {
        self.radii
    }

    /// Half extents as `(half_w, half_h)`.
    pub fn half_extents(&self) -> (f64, f64) {
        (f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// `width * height`.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// `true` when generating textures for this container would exceed [`PIXEL_BUDGET`].
    pub fn exceeds_budget(&self) -> bool {
        self.pixel_count() > PIXEL_BUDGET
    }

    /// Full-round case, e.g. `border-radius: 50%`.
    pub fn is_ellipse(&self) -> bool {
        let (half_w, half_h) = self.half_extents();
        (self.radii.x - half_w).abs() < ELLIPSE_TOLERANCE_PX
            && (self.radii.y - half_h).abs() < ELLIPSE_TOLERANCE_PX
    }
}

fn to_raster_extent(v: f64) -> u32 {
    let v = finite_or(v, 1.0).round();
    if v >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        (v as u32).max(1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/container.rs"]
mod tests;
