//! Liquid glass is a procedural texture generator for refractive glass surfaces.
//!
//! Given a rounded container it produces:
//!
//! - a displacement field encoding, per pixel, where to sample the backdrop
//! - an edge-ring alpha mask confining a stronger edge refraction to a band
//! - the parameters of the filter chain a rendering layer applies with both textures
//!
//! A [`RecomputeController`] keeps the textures in sync with container size and style,
//! coalescing triggers into at most one regeneration per animation frame and refusing to
//! rasterize containers beyond [`PIXEL_BUDGET`] pixels.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod controller;
pub(crate) mod filter;
/// Distance fields, container geometry and CSS length parsing.
pub mod geometry;
/// Surface configuration.
pub mod params;
pub(crate) mod texture;

pub use crate::foundation::core::{
    CornerRadii, PIXEL_BUDGET, Point, ResolvedRing, RingParams, ShapeParams, Vec2,
};
pub use crate::foundation::error::{GlassError, GlassResult};
pub use crate::foundation::math::{clamp_byte, smoothstep};

pub use crate::geometry::container::{ContainerGeometry, ContainerMeasurement};
pub use crate::geometry::css::{CssLength, parse_corner_radius, parse_css_length};
pub use crate::geometry::sdf::BoundaryShape;
pub use crate::params::GlassParams;

pub use crate::texture::displacement::{
    DisplacementKey, FlatZone, generate_displacement, rasterize_displacement,
};
pub use crate::texture::raster::{
    BackendKind, ImageResource, PngDataUriBackend, Raster, RasterBackend, create_backend,
    encode_png,
};
pub use crate::texture::ring_mask::{
    MaskKey, RingBoundaries, generate_ring_mask, rasterize_ring_mask, ring_alpha,
};

pub use crate::controller::recompute::{
    ContainerProbe, Phase, RecomputeController, RecomputeStats, ResourceSnapshot, Target,
    TriggerKind,
};
pub use crate::controller::scheduler::{FrameScheduler, FrameToken, ManualScheduler};

pub use crate::filter::chain::{
    AVERAGE_RGB, Backdrop, BlendMode, CENTER_FILTER_ID, Channel, CompositeOp, EDGE_FILTER_ID,
    EdgeLayer, FilterOp, FilterPipeline, FilterSet, LayerFilter, SOURCE, aberration_blur,
    channel_scales, debug_overlay, edge_table_level, isolate_channel, layer_pipeline,
    map_filters,
};
pub use crate::filter::preview::{apply_backdrop, apply_filter_set, apply_pipeline, gaussian_blur};
pub use crate::filter::style::{
    GradientEndpoints, SurfaceStyle, fallback_filter_css, gradient_endpoints, shadow_css,
};
