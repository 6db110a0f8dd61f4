//! Distance fields in pixel units, relative to the shape center. Negative inside.
//!
//! Outputs only feed `smoothstep` blends, so monotonicity and continuity matter more than
//! exact Euclidean distance.

use crate::foundation::core::Vec2;

/// Radii within this many pixels of the half-extents count as a full ellipse.
pub const ELLIPSE_TOLERANCE_PX: f64 = 0.5;

/// Radii at or below this switch to the Chebyshev rectangle metric.
pub const SHARP_RADIUS_EPSILON: f64 = 0.001;

/// Rounded box distance with a circular corner of `radius`.
pub fn rounded_rect_sdf(x: f64, y: f64, half_w: f64, half_h: f64, radius: f64) -> f64 {
    let r = radius.clamp(0.0, half_w.min(half_h).max(0.0));
    let q = Vec2::new(x.abs() - half_w + r, y.abs() - half_h + r);
    let outside = Vec2::new(q.x.max(0.0), q.y.max(0.0)).hypot();
    let inside = q.x.max(q.y).min(0.0);
    outside + inside - r
}

/// Chebyshev (L-infinity) rectangle distance.
///
/// Iso-contours stay square at the corners, unlike the Euclidean box metric.
pub fn sharp_rect_sdf(x: f64, y: f64, half_w: f64, half_h: f64) -> f64 {
    (x.abs() - half_w).max(y.abs() - half_h)
}

/// First-order implicit ellipse distance, `f / |grad f|`.
pub fn ellipse_sdf_approx(x: f64, y: f64, rx: f64, ry: f64) -> f64 {
    if x == 0.0 && y == 0.0 {
        return -rx.min(ry);
    }
    let k0 = ((x / rx).powi(2) + (y / ry).powi(2)).sqrt();
    let k1 = ((x / (rx * rx)).powi(2) + (y / (ry * ry)).powi(2)).sqrt();
    k0 * (k0 - 1.0) / k1
}

/// Rectangle with elliptical `rx` by `ry` corners.
///
/// Straight edges keep true pixel distances; only the corner quadrants use the ellipse
/// approximation, bounded below by the box distance since the box edges support the shape.
pub fn elliptical_corner_rect_sdf(
    x: f64,
    y: f64,
    half_w: f64,
    half_h: f64,
    rx: f64,
    ry: f64,
) -> f64 {
    let (ax, ay) = (x.abs(), y.abs());
    let edge = (ax - half_w).max(ay - half_h);
    let q = Vec2::new(ax - half_w + rx, ay - half_h + ry);
    if q.x > 0.0 && q.y > 0.0 {
        ellipse_sdf_approx(q.x, q.y, rx, ry).max(edge)
    } else {
        edge
    }
}

/// Boundary selected for a set of half-extents and corner radii.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundaryShape {
    /// Radii match the half-extents: the whole shape is an ellipse.
    Ellipse {
        /// Horizontal semi-axis.
        rx: f64,
        /// Vertical semi-axis.
        ry: f64,
    },
    /// Effectively zero radius.
    Sharp {
        /// Half width.
        half_w: f64,
        /// Half height.
        half_h: f64,
    },
    /// Rectangle with elliptical corners.
    Rounded {
        /// Half width.
        half_w: f64,
        /// Half height.
        half_h: f64,
        /// Horizontal corner radius.
        rx: f64,
        /// Vertical corner radius.
        ry: f64,
    },
}

impl BoundaryShape {
    /// Pick the distance metric for one boundary level.
    ///
    /// Every level (outer edge, inset ring edge, flat zone) is classified on its own.
    pub fn select(half_w: f64, half_h: f64, rx: f64, ry: f64) -> Self {
        let half_w = half_w.max(0.0);
        let half_h = half_h.max(0.0);
        let rx = rx.clamp(0.0, half_w);
        let ry = ry.clamp(0.0, half_h);

        if half_w > 0.0
            && half_h > 0.0
            && (rx - half_w).abs() < ELLIPSE_TOLERANCE_PX
            && (ry - half_h).abs() < ELLIPSE_TOLERANCE_PX
        {
            return Self::Ellipse {
                rx: half_w,
                ry: half_h,
            };
        }
        if rx.min(ry) <= SHARP_RADIUS_EPSILON {
            return Self::Sharp { half_w, half_h };
        }
        Self::Rounded {
            half_w,
            half_h,
            rx,
            ry,
        }
    }

    /// Signed distance from `(x, y)` to this boundary.
    pub fn distance(&self, x: f64, y: f64) -> f64 {
        match *self {
            Self::Ellipse { rx, ry } => ellipse_sdf_approx(x, y, rx, ry),
            Self::Sharp { half_w, half_h } => sharp_rect_sdf(x, y, half_w, half_h),
            Self::Rounded {
                half_w,
                half_h,
                rx,
                ry,
            } if rx == ry => rounded_rect_sdf(x, y, half_w, half_h, rx),
            Self::Rounded {
                half_w,
                half_h,
                rx,
                ry,
            } => elliptical_corner_rect_sdf(x, y, half_w, half_h, rx, ry),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/sdf.rs"]
mod tests;
