/// Crate-wide result alias.
pub type GlassResult<T> = Result<T, GlassError>;

/// Errors surfaced by raster encoding, parameter parsing and backend setup.
///
/// Numeric inputs never produce errors; they are clamped instead.
#[derive(thiserror::Error, Debug)]
pub enum GlassError {
    /// Rejected input (unknown attribute, malformed config).
    #[error("validation error: {0}")]
    Validation(String),

    /// Pixel buffer shape mismatch or encode failure.
    #[error("raster error: {0}")]
    Raster(String),

    /// Raster backend is missing a required capability.
    #[error("backend error: {0}")]
    Backend(String),

    /// Config (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped foreign error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlassError {
    /// Build a [`GlassError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GlassError::Raster`].
    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }

    /// Build a [`GlassError::Backend`].
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Build a [`GlassError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
