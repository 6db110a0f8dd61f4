//! Procedural texture synthesis and image-resource encoding.

pub(crate) mod displacement;
pub(crate) mod raster;
pub(crate) mod ring_mask;
