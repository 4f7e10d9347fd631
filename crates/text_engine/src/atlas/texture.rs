//! CPU-side glyph atlas texture
//!
//! Owns the single-channel coverage pixels that glyph bitmaps are blitted
//! into, together with the shelf packer that assigns their placements.
//! GPU upload is a backend concern; the atlas only tracks a handle and a
//! dirty flag so a backend knows when to re-upload.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::atlas::packer::{ShelfPacker, UvRect};
use crate::error::AtlasError;
use crate::foundation::math::UVec2;

/// Opaque identifier for the atlas texture, handed to render backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(u32);

impl TextureHandle {
    fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw handle value.
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Fixed-size coverage texture that glyph bitmaps are packed into.
///
/// Pixels are 8-bit coverage, row-major, with row zero at the bottom
/// (v = 0). Bitmaps handed to [`GlyphAtlas::add_bitmap`] must use the
/// same bottom-up row order.
#[derive(Debug)]
pub struct GlyphAtlas {
    size: UVec2,
    pixels: Vec<u8>,
    packer: ShelfPacker,
    handle: TextureHandle,
    dirty: bool,
}

impl GlyphAtlas {
    /// Create an empty atlas of `width` x `height` pixels.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        log::debug!("Creating {width}x{height} glyph atlas");
        Self {
            size: UVec2::new(width, height),
            pixels: vec![0; (width * height) as usize],
            packer: ShelfPacker::new(width, height),
            handle: TextureHandle::next(),
            dirty: false,
        }
    }

    /// Atlas dimensions in pixels.
    #[must_use]
    pub const fn size(&self) -> UVec2 {
        self.size
    }

    /// Handle identifying this atlas to render backends.
    #[must_use]
    pub const fn texture_handle(&self) -> TextureHandle {
        self.handle
    }

    /// Raw coverage pixels, bottom-up row-major.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Pack a coverage bitmap and return its normalized texture rectangle.
    ///
    /// `coverage` holds `size.x * size.y` bytes in bottom-up row order.
    /// Placements are permanent; a full atlas reports
    /// [`AtlasError::OutOfSpace`] and leaves existing contents untouched.
    pub fn add_bitmap(&mut self, coverage: &[u8], size: UVec2) -> Result<UvRect, AtlasError> {
        let expected = (size.x * size.y) as usize;
        if coverage.len() != expected {
            return Err(AtlasError::BitmapSizeMismatch {
                expected,
                actual: coverage.len(),
            });
        }

        let placement = self.packer.add(size.x, size.y)?;

        let width = size.x as usize;
        for row in 0..size.y as usize {
            let src = &coverage[row * width..(row + 1) * width];
            let dst_start = (placement.y as usize + row) * self.size.x as usize + placement.x as usize;
            self.pixels[dst_start..dst_start + width].copy_from_slice(src);
        }
        if expected > 0 {
            self.dirty = true;
        }

        Ok(placement.uv)
    }

    /// Whether pixels changed since the last [`Self::clear_dirty`] call.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Acknowledge an upload; clears the dirty flag.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Write the atlas contents to a PNG file for inspection.
    ///
    /// Rows are flipped so the image appears top-down in viewers.
    pub fn save_debug_image(&self, path: &str) -> Result<(), AtlasError> {
        let image = image::GrayImage::from_raw(self.size.x, self.size.y, self.pixels.clone())
            .ok_or_else(|| AtlasError::ExportFailed("pixel buffer size mismatch".to_string()))?;
        let flipped = image::imageops::flip_vertical(&image);
        flipped
            .save(path)
            .map_err(|e| AtlasError::ExportFailed(e.to_string()))?;
        log::info!("Wrote atlas debug image to {path}");
        Ok(())
    }
}
