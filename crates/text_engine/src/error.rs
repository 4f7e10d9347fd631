//! Error types for atlas packing and font operations

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur while packing glyph bitmaps into an atlas
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AtlasError {
    /// The atlas has no shelf space left for a bitmap of this size.
    ///
    /// This is fatal for the atlas instance; placements are append-only
    /// and nothing is ever evicted to make room.
    #[error("atlas out of space for {width}x{height} bitmap")]
    OutOfSpace {
        /// Requested bitmap width in pixels
        width: u32,
        /// Requested bitmap height in pixels
        height: u32,
    },

    /// The provided bitmap does not match the declared dimensions.
    #[error("bitmap size mismatch: expected {expected} bytes, got {actual}")]
    BitmapSizeMismatch {
        /// Bytes implied by the declared width and height
        expected: usize,
        /// Bytes actually provided
        actual: usize,
    },

    /// Writing the debug image to disk failed.
    #[error("failed to export atlas image: {0}")]
    ExportFailed(String),
}

/// Errors that can occur during font operations
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// Failed to load font from file or data
    #[error("failed to load font: {0}")]
    LoadError(String),

    /// Failed to rasterize a specific character code
    #[error("failed to rasterize glyph {0:#04x}")]
    RasterizeError(u8),

    /// Requested character has no renderable glyph
    #[error("glyph {0:#04x} not available")]
    GlyphNotFound(u8),

    /// Geometry was read before `update()` finalized the cache
    #[error("geometry read before update() finalized the cache")]
    GeometryNotFinalized,

    /// Atlas packing failed while resolving a glyph
    #[error(transparent)]
    Atlas(#[from] AtlasError),
}
