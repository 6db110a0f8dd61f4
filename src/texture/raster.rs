use std::fmt;
use std::io::Cursor;

use base64::Engine as _;

use crate::foundation::error::{GlassError, GlassResult};
use crate::foundation::math::Fnv1a64;

/// A generated texture as straight-alpha RGBA8 pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl Raster {
    /// Allocate a zeroed raster.
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize) * (height as usize) * 4;
        Self {
            width,
            height,
            data: vec![0; len],
        }
    }

    /// Wrap existing pixels, validating the buffer length.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> GlassResult<Self> {
        let expected_len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| GlassError::raster("raster size overflow"))?;
        if data.len() != expected_len {
            return Err(GlassError::raster(
                "raster data must match width*height*4",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    pub(crate) fn put(&mut self, x: u32, y: u32, px: [u8; 4]) {
        let i = self.index(x, y);
        self.data[i..i + 4].copy_from_slice(&px);
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    /// Content hash, stable across runs.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u32(self.width);
        h.write_u32(self.height);
        h.write_bytes(&self.data);
        h.finish()
    }
}

impl fmt::Debug for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// An encoded texture ready to be referenced by the rendering layer.
///
/// Consumers only read it; the recompute controller replaces it wholesale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageResource {
    /// Content identifier; equal pixels give equal ids.
    pub id: u64,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// URI the rendering layer can load (e.g. a `data:` URI).
    pub uri: String,
    /// Source pixels.
    pub raster: Raster,
}

/// Turns rasters into image resources.
pub trait RasterBackend {
    /// Check that the backend can rasterize at all. Called once at controller construction.
    fn probe(&self) -> GlassResult<()> {
        Ok(())
    }

    /// Encode a raster into a resource.
    fn encode(&self, raster: Raster) -> GlassResult<ImageResource>;
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default)]
pub enum BackendKind {
    /// PNG-encoded `data:` URIs.
    #[default]
    PngDataUri,
}

/// Create a raster backend implementation.
pub fn create_backend(kind: BackendKind) -> GlassResult<Box<dyn RasterBackend>> {
    match kind {
        BackendKind::PngDataUri => Ok(Box::new(PngDataUriBackend::new())),
    }
}

/// Encodes rasters as `data:image/png;base64,...`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngDataUriBackend;

impl PngDataUriBackend {
    /// Construct the backend.
    pub fn new() -> Self {
        Self
    }
}

impl RasterBackend for PngDataUriBackend {
    fn encode(&self, raster: Raster) -> GlassResult<ImageResource> {
        let png = encode_png(&raster)?;
        let b64 = base64::engine::general_purpose::STANDARD.encode(&png);
        Ok(ImageResource {
            id: raster.fingerprint(),
            width: raster.width,
            height: raster.height,
            uri: format!("data:image/png;base64,{b64}"),
            raster,
        })
    }
}

/// PNG bytes for a raster.
pub fn encode_png(raster: &Raster) -> GlassResult<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut out,
        &raster.data,
        raster.width,
        raster.height,
        image::ExtendedColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| GlassError::raster(format!("png encode failed: {e}")))?;
    Ok(out.into_inner())
}

#[cfg(test)]
#[path = "../../tests/unit/texture/raster.rs"]
mod tests;
