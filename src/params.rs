//! Visual parameter bag, its defaults, sanitization and the kebab-case attribute bridge.

use crate::foundation::core::{RingParams, ShapeParams};
use crate::foundation::error::{GlassError, GlassResult};
use crate::foundation::math::{finite_or, fmt_css_number};

/// Every tunable of the glass surface.
///
/// Deserializes from partial JSON over defaults; field names are kebab-case and match the
/// element attribute names.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GlassParams {
    /// Center-layer displacement scale.
    pub displacement_scale: f64,
    /// Backdrop blur in pixels.
    pub blur_px: f64,
    /// Backdrop saturation in percent.
    pub saturation_pct: f64,
    /// Chromatic aberration intensity for the center layer.
    pub aberration: f64,
    /// Tint color (any CSS color).
    pub background_color: String,
    /// Drop shadow strength.
    pub shadow_level: f64,
    /// Edge highlight gradient angle in degrees (0 = up, 90 = right).
    pub highlight_angle: f64,
    /// Edge highlight opacity in `[0, 1]`.
    pub highlight_intensity: f64,
    /// Edge highlight color.
    pub highlight_color: String,
    /// Edge ring width in pixels; `0` disables the ring layer.
    pub edge_width: f64,
    /// Ring-layer blur in pixels.
    pub edge_blur: f64,
    /// Ring-layer saturation in percent.
    pub edge_saturation: f64,
    /// Ring-layer displacement scale.
    pub edge_displacement: f64,
    /// Ring-layer aberration intensity.
    pub edge_aberration: f64,
    /// Inner ring feather in pixels; `0` = automatic.
    pub inner_feather: f64,
    /// Flat-area scale in `[0, 1]`.
    pub flat_area_scale: f64,
    /// Edge hardness, `> 0`.
    pub edge_hardness: f64,
    /// Show the displacement field instead of the effect.
    pub debug_displacement: bool,
    /// Show the edge mask instead of the effect.
    pub debug_mask: bool,
}

impl Default for GlassParams {
    fn default() -> Self {
        Self {
            displacement_scale: 70.0,
            blur_px: 3.0,
            saturation_pct: 140.0,
            aberration: 2.0,
            background_color: "rgba(255, 255, 255, 0.08)".to_string(),
            shadow_level: 0.5,
            highlight_angle: 135.0,
            highlight_intensity: 0.6,
            highlight_color: "rgba(255, 255, 255, 0.9)".to_string(),
            edge_width: RingParams::DEFAULT_RING_WIDTH_PX,
            edge_blur: 1.0,
            edge_saturation: 160.0,
            edge_displacement: 110.0,
            edge_aberration: 3.0,
            inner_feather: 0.0,
            flat_area_scale: ShapeParams::DEFAULT_FLAT_AREA_SCALE,
            edge_hardness: ShapeParams::DEFAULT_EDGE_HARDNESS,
            debug_displacement: false,
            debug_mask: false,
        }
    }
}

/// Boolean attributes in the bag.
const BOOL_ATTRS: [&str; 2] = ["debug-displacement", "debug-mask"];

/// Scalar attributes in the bag, in declaration order.
const NUMBER_ATTRS: [&str; 15] = [
    "displacement-scale",
    "blur-px",
    "saturation-pct",
    "aberration",
    "shadow-level",
    "highlight-angle",
    "highlight-intensity",
    "edge-width",
    "edge-blur",
    "edge-saturation",
    "edge-displacement",
    "edge-aberration",
    "inner-feather",
    "flat-area-scale",
    "edge-hardness",
];

impl GlassParams {
    /// Largest accepted backdrop blur, in pixels.
    pub const MAX_BLUR_PX: f64 = 100.0;

    /// Parse a JSON config over defaults, then sanitize.
    pub fn from_json(s: &str) -> GlassResult<Self> {
        let p: Self = serde_json::from_str(s).map_err(|e| GlassError::serde(e.to_string()))?;
        Ok(p.sanitized())
    }

    /// Clamp every numeric field; non-finite values fall back to defaults.
    pub fn sanitized(mut self) -> Self {
        let d = Self::default();
        let nonneg = |v: f64, fallback: f64| finite_or(v, fallback).max(0.0);

        self.displacement_scale = finite_or(self.displacement_scale, d.displacement_scale);
        self.blur_px = nonneg(self.blur_px, d.blur_px).min(Self::MAX_BLUR_PX);
        self.saturation_pct = nonneg(self.saturation_pct, d.saturation_pct);
        self.aberration = nonneg(self.aberration, d.aberration);
        self.shadow_level = nonneg(self.shadow_level, d.shadow_level);
        self.highlight_angle = finite_or(self.highlight_angle, d.highlight_angle).rem_euclid(360.0);
        self.highlight_intensity =
            finite_or(self.highlight_intensity, d.highlight_intensity).clamp(0.0, 1.0);
        self.edge_width = nonneg(self.edge_width, d.edge_width);
        self.edge_blur = nonneg(self.edge_blur, d.edge_blur).min(Self::MAX_BLUR_PX);
        self.edge_saturation = nonneg(self.edge_saturation, d.edge_saturation);
        self.edge_displacement = finite_or(self.edge_displacement, d.edge_displacement);
        self.edge_aberration = nonneg(self.edge_aberration, d.edge_aberration);
        self.inner_feather = nonneg(self.inner_feather, d.inner_feather);

        let shape = self.shape().sanitized();
        self.flat_area_scale = shape.flat_area_scale;
        self.edge_hardness = shape.edge_hardness;
        if self.debug_displacement && self.debug_mask {
            self.debug_mask = false;
        }
        self
    }

    /// Displacement-field shape parameters.
    pub fn shape(&self) -> ShapeParams {
        ShapeParams {
            flat_area_scale: self.flat_area_scale,
            edge_hardness: self.edge_hardness,
        }
    }

    /// Edge-mask ring parameters.
    pub fn ring(&self) -> RingParams {
        RingParams {
            ring_width_px: self.edge_width,
            inner_feather_px: self.inner_feather,
        }
    }

    /// Toggle the displacement debug view; enabling it clears the mask view.
    pub fn set_debug_displacement(&mut self, on: bool) {
        self.debug_displacement = on;
        if on {
            self.debug_mask = false;
        }
    }

    /// Toggle the mask debug view; enabling it clears the displacement view.
    pub fn set_debug_mask(&mut self, on: bool) {
        self.debug_mask = on;
        if on {
            self.debug_displacement = false;
        }
    }

    /// Attributes to write onto an element, one per parameter.
    ///
    /// Boolean attributes appear only when true, with an empty value.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::with_capacity(NUMBER_ATTRS.len() + 4);
        for name in NUMBER_ATTRS {
            if let Some(v) = self.number(name) {
                out.push((name, fmt_css_number(v)));
            }
        }
        out.push(("background-color", self.background_color.clone()));
        out.push(("highlight-color", self.highlight_color.clone()));
        for name in BOOL_ATTRS {
            let on = match name {
                "debug-displacement" => self.debug_displacement,
                _ => self.debug_mask,
            };
            if on {
                out.push((name, String::new()));
            }
        }
        out
    }

    /// Apply one attribute by kebab-case name. `None` means the attribute was removed.
    ///
    /// Removed or unparsable numbers reset to the default; boolean attributes follow
    /// presence semantics.
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) -> GlassResult<()> {
        let d = Self::default();
        match name {
            "debug-displacement" => self.set_debug_displacement(value.is_some()),
            "debug-mask" => self.set_debug_mask(value.is_some()),
            "background-color" => {
                self.background_color = value.map_or(d.background_color, str::to_string);
            }
            "highlight-color" => {
                self.highlight_color = value.map_or(d.highlight_color, str::to_string);
            }
            _ => {
                let fallback = d
                    .number(name)
                    .ok_or_else(|| GlassError::validation(format!("unknown attribute '{name}'")))?;
                let v = value
                    .and_then(|s| s.trim().parse::<f64>().ok())
                    .filter(|v| v.is_finite())
                    .unwrap_or(fallback);
                if let Some(slot) = self.number_mut(name) {
                    *slot = v;
                }
                *self = std::mem::take(self).sanitized();
            }
        }
        Ok(())
    }

    fn number(&self, name: &str) -> Option<f64> {
        Some(match name {
            "displacement-scale" => self.displacement_scale,
            "blur-px" => self.blur_px,
            "saturation-pct" => self.saturation_pct,
            "aberration" => self.aberration,
            "shadow-level" => self.shadow_level,
            "highlight-angle" => self.highlight_angle,
            "highlight-intensity" => self.highlight_intensity,
            "edge-width" => self.edge_width,
            "edge-blur" => self.edge_blur,
            "edge-saturation" => self.edge_saturation,
            "edge-displacement" => self.edge_displacement,
            "edge-aberration" => self.edge_aberration,
            "inner-feather" => self.inner_feather,
            "flat-area-scale" => self.flat_area_scale,
            "edge-hardness" => self.edge_hardness,
            _ => return None,
        })
    }

    fn number_mut(&mut self, name: &str) -> Option<&mut f64> {
        Some(match name {
            "displacement-scale" => &mut self.displacement_scale,
            "blur-px" => &mut self.blur_px,
            "saturation-pct" => &mut self.saturation_pct,
            "aberration" => &mut self.aberration,
            "shadow-level" => &mut self.shadow_level,
            "highlight-angle" => &mut self.highlight_angle,
            "highlight-intensity" => &mut self.highlight_intensity,
            "edge-width" => &mut self.edge_width,
            "edge-blur" => &mut self.edge_blur,
            "edge-saturation" => &mut self.edge_saturation,
            "edge-displacement" => &mut self.edge_displacement,
            "edge-aberration" => &mut self.edge_aberration,
            "inner-feather" => &mut self.inner_feather,
            "flat-area-scale" => &mut self.flat_area_scale,
            "edge-hardness" => &mut self.edge_hardness,
            _ => return None,
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/params.rs"]
mod tests;
