use crate::foundation::core::Point;
use crate::foundation::math::{finite_or, fmt_css_number};
use crate::params::GlassParams;

/// Derived, texture-independent style values for the glass surface.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SurfaceStyle {
    /// `box-shadow` value.
    pub shadow: String,
    /// Tint color.
    pub background: String,
    /// Edge highlight gradient line.
    pub highlight: GradientEndpoints,
    /// Edge highlight color.
    pub highlight_color: String,
    /// Edge highlight opacity.
    pub highlight_intensity: f64,
}

impl SurfaceStyle {
    /// Derive from the parameter bag.
    pub fn from_params(p: &GlassParams) -> Self {
        Self {
            shadow: shadow_css(p.shadow_level),
            background: p.background_color.clone(),
            highlight: gradient_endpoints(p.highlight_angle),
            highlight_color: p.highlight_color.clone(),
            highlight_intensity: finite_or(p.highlight_intensity, 0.0).clamp(0.0, 1.0),
        }
    }
}

/// Box shadow keyed only by shadow level.
pub fn shadow_css(level: f64) -> String {
    let l = finite_or(level, 0.0).clamp(0.0, 4.0);
    format!(
        "0 {}px {}px rgba(0,0,0,{})",
        fmt_css_number(18.0 * l),
        fmt_css_number(60.0 * l),
        fmt_css_number(0.35 * l)
    )
}

/// Linear-gradient endpoints in unit-square fractions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GradientEndpoints {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

/// Endpoints for a CSS-convention angle (0 = up, 90 = right), stretched so the gradient line
/// touches the unit square's boundary on both sides.
pub fn gradient_endpoints(angle_deg: f64) -> GradientEndpoints {
    let a = finite_or(angle_deg, 0.0).to_radians();
    let (dx, dy) = (a.sin(), -a.cos());
    let t = 0.5 / dx.abs().max(dy.abs());
    GradientEndpoints {
        start: Point::new(0.5 - dx * t, 0.5 - dy * t),
        end: Point::new(0.5 + dx * t, 0.5 + dy * t),
    }
}

/// Plain backdrop filter used when refraction textures are unavailable.
pub fn fallback_filter_css(blur_px: f64, saturation_pct: f64) -> String {
    format!(
        "blur({}px) saturate({}%)",
        fmt_css_number(finite_or(blur_px, 0.0).max(0.0)),
        fmt_css_number(finite_or(saturation_pct, 100.0).max(0.0))
    )
}

#[cfg(test)]
#[path = "../../tests/unit/filter/style.rs"]
mod tests;
