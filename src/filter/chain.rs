//! Maps the generated textures and scalar parameters onto the ordered compositing operations
//! the rendering layer executes. Only parameters and resource references are produced here.

use crate::controller::recompute::ResourceSnapshot;
use crate::filter::style::fallback_filter_css;
use crate::foundation::math::finite_or;
use crate::params::GlassParams;

/// Reference to the unfiltered layer content.
pub const SOURCE: &str = "SourceGraphic";

/// Color channel selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Channel {
    /// Red.
    R,
    /// Green.
    G,
    /// Blue.
    B,
    /// Alpha.
    A,
}

/// Blend modes used by the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    /// `a + b - a * b`.
    Screen,
}

/// Porter-Duff operators used by the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompositeOp {
    /// Keep `input` where `input2` has coverage.
    In,
    /// `input` over `input2`.
    Over,
}

/// One compositing operation. Inputs name [`SOURCE`] or an earlier `result`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum FilterOp {
    /// Load an auxiliary image.
    Image {
        /// Resource URI.
        href: String,
        /// Output name.
        result: String,
    },
    /// 4x5 row-major color matrix over normalized RGBA plus a constant column.
    ColorMatrix {
        /// Input name.
        input: String,
        /// Matrix coefficients.
        matrix: [f64; 20],
        /// Output name.
        result: String,
    },
    /// Discrete table lookup on one channel.
    ComponentTable {
        /// Input name.
        input: String,
        /// Channel the table applies to.
        channel: Channel,
        /// Step values; the input range is split into `table.len()` equal steps.
        table: Vec<f64>,
        /// Output name.
        result: String,
    },
    /// Offset each pixel by `scale * (map - 0.5)`.
    Displace {
        /// Content to displace.
        input: String,
        /// Displacement field.
        map: String,
        /// Displacement scale in pixels.
        scale: f64,
        /// Channel carrying x offsets.
        x_channel: Channel,
        /// Channel carrying y offsets.
        y_channel: Channel,
        /// Output name.
        result: String,
    },
    /// Blend two inputs.
    Blend {
        /// Top input.
        input: String,
        /// Bottom input.
        input2: String,
        /// Blend mode.
        mode: BlendMode,
        /// Output name.
        result: String,
    },
    /// Gaussian blur.
    Blur {
        /// Input name.
        input: String,
        /// Standard deviation in pixels.
        std_dev: f64,
        /// Output name.
        result: String,
    },
    /// Porter-Duff composite.
    Composite {
        /// First input.
        input: String,
        /// Second input.
        input2: String,
        /// Operator.
        operator: CompositeOp,
        /// Output name.
        result: String,
    },
}

impl FilterOp {
    /// Name this op writes.
    pub fn result(&self) -> &str {
        match self {
            Self::Image { result, .. }
            | Self::ColorMatrix { result, .. }
            | Self::ComponentTable { result, .. }
            | Self::Displace { result, .. }
            | Self::Blend { result, .. }
            | Self::Blur { result, .. }
            | Self::Composite { result, .. } => result,
        }
    }
}

/// An ordered, named filter chain.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FilterPipeline {
    /// Filter id the rendering layer references.
    pub id: String,
    /// Operations in execution order.
    pub ops: Vec<FilterOp>,
}

impl FilterPipeline {
    /// Result name of the final op.
    pub fn output(&self) -> Option<&str> {
        self.ops.last().map(FilterOp::result)
    }
}

/// Plain backdrop stage applied behind a layer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Backdrop {
    /// Blur radius in pixels.
    pub blur_px: f64,
    /// Saturation in percent.
    pub saturation_pct: f64,
}

impl Backdrop {
    /// CSS `backdrop-filter` value.
    pub fn css(&self) -> String {
        fallback_filter_css(self.blur_px, self.saturation_pct)
    }
}

/// Filter chain plus backdrop for one layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LayerFilter {
    /// Refraction and aberration chain.
    pub pipeline: FilterPipeline,
    /// Backdrop stage.
    pub backdrop: Backdrop,
}

/// Edge-ring layer: its own chain, confined by the ring mask.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EdgeLayer {
    /// Layer filter.
    pub layer: LayerFilter,
    /// Ring mask URI applied as the layer's opacity mask.
    pub mask_href: String,
}

/// Everything the rendering layer needs for one generation cycle.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum FilterSet {
    /// Textures available: refract the center and, when a ring exists, the rim.
    Refractive {
        /// Center layer.
        center: LayerFilter,
        /// Rim layer, absent when the ring width resolves to zero.
        edge: Option<EdgeLayer>,
    },
    /// No displacement field (budget exceeded or not computed yet).
    Fallback {
        /// Plain blur/saturate backdrop.
        backdrop: Backdrop,
    },
}

const THIRD: f64 = 1.0 / 3.0;

/// RGB average into every channel, alpha included.
pub const AVERAGE_RGB: [f64; 20] = [
    THIRD, THIRD, THIRD, 0.0, 0.0, //
    THIRD, THIRD, THIRD, 0.0, 0.0, //
    THIRD, THIRD, THIRD, 0.0, 0.0, //
    THIRD, THIRD, THIRD, 0.0, 0.0,
];

/// Keep one color channel (plus alpha), zero the others.
pub fn isolate_channel(channel: Channel) -> [f64; 20] {
    let mut m = [0.0; 20];
    let row = match channel {
        Channel::R => 0,
        Channel::G => 1,
        Channel::B => 2,
        Channel::A => 3,
    };
    m[row * 5 + row] = 1.0;
    m[3 * 5 + 3] = 1.0;
    m
}

/// Upper step of the edge-intensity table.
pub fn edge_table_level(aberration: f64) -> f64 {
    (finite_or(aberration, 0.0) * 0.05).clamp(0.0, 1.0)
}

/// Smoothing blur applied to the recombined channels; weaker as aberration grows.
pub fn aberration_blur(aberration: f64) -> f64 {
    0.5 / (1.0 + finite_or(aberration, 0.0).max(0.0))
}

/// Displacement scales for the red, green and blue passes.
pub fn channel_scales(scale: f64, aberration: f64) -> [f64; 3] {
    let ab = finite_or(aberration, 0.0).max(0.0);
    [scale, scale - 0.05 * ab * scale, scale - 0.10 * ab * scale]
}

/// Build the refraction chain for one layer.
pub fn layer_pipeline(
    id: &str,
    displacement_href: &str,
    scale: f64,
    aberration: f64,
) -> FilterPipeline {
    let s = |v: &str| v.to_string();
    let scales = channel_scales(finite_or(scale, 0.0), aberration);

    let mut ops = vec![
        FilterOp::Image {
            href: s(displacement_href),
            result: s("map"),
        },
        FilterOp::ColorMatrix {
            input: s("map"),
            matrix: AVERAGE_RGB,
            result: s("edge-intensity"),
        },
        FilterOp::ComponentTable {
            input: s("edge-intensity"),
            channel: Channel::A,
            table: vec![0.0, edge_table_level(aberration)],
            result: s("edge-mask"),
        },
    ];

    for (channel, scale) in [Channel::R, Channel::G, Channel::B].into_iter().zip(scales) {
        let tag = match channel {
            Channel::R => "red",
            Channel::G => "green",
            _ => "blue",
        };
        ops.push(FilterOp::Displace {
            input: s(SOURCE),
            map: s("map"),
            scale,
            x_channel: Channel::R,
            y_channel: Channel::G,
            result: format!("displaced-{tag}"),
        });
        ops.push(FilterOp::ColorMatrix {
            input: format!("displaced-{tag}"),
            matrix: isolate_channel(channel),
            result: s(tag),
        });
    }

    ops.extend([
        FilterOp::Blend {
            input: s("red"),
            input2: s("green"),
            mode: BlendMode::Screen,
            result: s("red-green"),
        },
        FilterOp::Blend {
            input: s("red-green"),
            input2: s("blue"),
            mode: BlendMode::Screen,
            result: s("aberrated"),
        },
        FilterOp::Blur {
            input: s("aberrated"),
            std_dev: aberration_blur(aberration),
            result: s("aberrated-blur"),
        },
        FilterOp::Composite {
            input: s("aberrated-blur"),
            input2: s("edge-mask"),
            operator: CompositeOp::In,
            result: s("edge-aberration"),
        },
        FilterOp::Composite {
            input: s("edge-aberration"),
            input2: s(SOURCE),
            operator: CompositeOp::Over,
            result: s("output"),
        },
    ]);

    FilterPipeline { id: s(id), ops }
}

/// Filter ids referenced by the rendering layer.
pub const CENTER_FILTER_ID: &str = "glass-center";
/// See [`CENTER_FILTER_ID`].
pub const EDGE_FILTER_ID: &str = "glass-edge";

/// Map the current resources and parameters to both layer pipelines.
pub fn map_filters(params: &GlassParams, resources: &ResourceSnapshot) -> FilterSet {
    let backdrop = Backdrop {
        blur_px: params.blur_px,
        saturation_pct: params.saturation_pct,
    };
    let Some(field) = resources.displacement.as_ref() else {
        return FilterSet::Fallback { backdrop };
    };

    let center = LayerFilter {
        pipeline: layer_pipeline(
            CENTER_FILTER_ID,
            &field.uri,
            params.displacement_scale,
            params.aberration,
        ),
        backdrop,
    };
    let edge = resources.mask.as_ref().map(|mask| EdgeLayer {
        layer: LayerFilter {
            pipeline: layer_pipeline(
                EDGE_FILTER_ID,
                &field.uri,
                params.edge_displacement,
                params.edge_aberration,
            ),
            backdrop: Backdrop {
                blur_px: params.edge_blur,
                saturation_pct: params.edge_saturation,
            },
        },
        mask_href: mask.uri.clone(),
    });
    FilterSet::Refractive { center, edge }
}

/// URI to show in place of the effect when a debug view is enabled.
pub fn debug_overlay(params: &GlassParams, resources: &ResourceSnapshot) -> Option<String> {
    if params.debug_displacement {
        return resources.displacement.as_ref().map(|r| r.uri.clone());
    }
    if params.debug_mask {
        return resources.mask.as_ref().map(|r| r.uri.clone());
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/filter/chain.rs"]
mod tests;
