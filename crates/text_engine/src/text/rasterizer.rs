//! Glyph rasterization boundary
//!
//! The layout core never rasterizes pixels itself; it consumes the
//! [`Rasterizer`] trait. The production implementation wraps `fontdue`,
//! carrying the loaded font as an explicit context object with no global
//! library state. [`BlockRasterizer`] produces deterministic solid-box
//! glyphs for headless use.

use crate::error::{FontError, FontResult};
use crate::foundation::math::{IVec2, UVec2};

/// One rasterized glyph bitmap plus its layout metrics.
///
/// `coverage` holds `size.x * size.y` bytes of 8-bit coverage in
/// bottom-up row order (row zero is the bottom of the glyph).
#[derive(Debug, Clone)]
pub struct RasterizedGlyph {
    /// Bitmap dimensions in pixels
    pub size: UVec2,
    /// Offset of the bitmap's bottom-left corner from the pen position
    pub offset: IVec2,
    /// Horizontal pen advance in pixels
    pub advance: f32,
    /// Coverage bytes, bottom-up row-major
    pub coverage: Vec<u8>,
}

/// Source of glyph bitmaps and metrics for one face at one size.
///
/// Implementations must be deterministic: rasterizing the same code twice
/// yields the same bitmap and metrics.
pub trait Rasterizer {
    /// Rasterize a single character code.
    fn rasterize(&mut self, code: u8) -> FontResult<RasterizedGlyph>;

    /// Upper bound of any glyph's bounding box; `y` is the line height.
    fn max_glyph_size(&self) -> UVec2;
}

/// `fontdue`-backed rasterizer for TrueType/OpenType fonts.
pub struct FontdueRasterizer {
    font: fontdue::Font,
    size_px: f32,
    max_size: UVec2,
}

impl FontdueRasterizer {
    /// Load a font from raw TTF/OTF bytes at the given pixel size.
    pub fn from_bytes(data: &[u8], size_px: f32) -> FontResult<Self> {
        let font = fontdue::Font::from_bytes(data, fontdue::FontSettings::default())
            .map_err(|e| FontError::LoadError(format!("fontdue error: {e}")))?;

        let line_height = font
            .horizontal_line_metrics(size_px)
            .map_or(size_px * 1.2, |m| m.new_line_size);
        let max_size = UVec2::new(size_px.ceil() as u32, line_height.ceil() as u32);

        log::info!("Loaded font at {size_px}px, line height {line_height}px");
        Ok(Self {
            font,
            size_px,
            max_size,
        })
    }

    /// Load a font from a file on disk.
    pub fn from_file(path: &str, size_px: f32) -> FontResult<Self> {
        let data = std::fs::read(path)
            .map_err(|e| FontError::LoadError(format!("read {path}: {e}")))?;
        Self::from_bytes(&data, size_px)
    }

    /// Pixel size glyphs are rasterized at.
    #[must_use]
    pub const fn size_px(&self) -> f32 {
        self.size_px
    }
}

impl Rasterizer for FontdueRasterizer {
    fn rasterize(&mut self, code: u8) -> FontResult<RasterizedGlyph> {
        if code < 0x20 || code > 0x7e {
            return Err(FontError::RasterizeError(code));
        }

        let (metrics, bitmap) = self.font.rasterize(code as char, self.size_px);

        // fontdue emits rows top-down; flip to the bottom-up order the
        // atlas and quad UV mapping expect.
        let width = metrics.width;
        let mut coverage = vec![0u8; width * metrics.height];
        for row in 0..metrics.height {
            let src = &bitmap[row * width..(row + 1) * width];
            let dst = (metrics.height - 1 - row) * width;
            coverage[dst..dst + width].copy_from_slice(src);
        }

        Ok(RasterizedGlyph {
            size: UVec2::new(metrics.width as u32, metrics.height as u32),
            offset: IVec2::new(metrics.xmin, metrics.ymin),
            advance: metrics.advance_width,
            coverage,
        })
    }

    fn max_glyph_size(&self) -> UVec2 {
        self.max_size
    }
}

/// Deterministic rasterizer producing solid boxes for every printable
/// ASCII character.
///
/// Every glyph is a filled `size` rectangle with a fixed advance, which
/// makes layout math exactly predictable. Used for headless rendering
/// and test setups where no font file is available.
#[derive(Debug, Clone)]
pub struct BlockRasterizer {
    glyph_size: UVec2,
    advance: f32,
    line_height: u32,
}

impl BlockRasterizer {
    /// Create a block rasterizer with 6x10 glyphs, advance 8, line height 12.
    #[must_use]
    pub fn new() -> Self {
        Self {
            glyph_size: UVec2::new(6, 10),
            advance: 8.0,
            line_height: 12,
        }
    }

    /// Create a block rasterizer with explicit metrics.
    #[must_use]
    pub const fn with_metrics(glyph_size: UVec2, advance: f32, line_height: u32) -> Self {
        Self {
            glyph_size,
            advance,
            line_height,
        }
    }
}

impl Default for BlockRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for BlockRasterizer {
    fn rasterize(&mut self, code: u8) -> FontResult<RasterizedGlyph> {
        if code < 0x20 || code > 0x7e {
            return Err(FontError::RasterizeError(code));
        }

        // Space stays blank but keeps its advance.
        let size = if code == b' ' {
            UVec2::zeros()
        } else {
            self.glyph_size
        };

        Ok(RasterizedGlyph {
            size,
            offset: IVec2::new(1, 0),
            advance: self.advance,
            coverage: vec![0xff; (size.x * size.y) as usize],
        })
    }

    fn max_glyph_size(&self) -> UVec2 {
        UVec2::new(self.glyph_size.x + 2, self.line_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_glyphs_are_solid() {
        let mut raster = BlockRasterizer::new();
        let glyph = raster.rasterize(b'A').unwrap();
        assert_eq!(glyph.size, UVec2::new(6, 10));
        assert_eq!(glyph.coverage.len(), 60);
        assert!(glyph.coverage.iter().all(|&c| c == 0xff));
        assert_eq!(glyph.advance, 8.0);
    }

    #[test]
    fn test_block_space_is_empty_but_advances() {
        let mut raster = BlockRasterizer::new();
        let glyph = raster.rasterize(b' ').unwrap();
        assert_eq!(glyph.size, UVec2::zeros());
        assert!(glyph.coverage.is_empty());
        assert_eq!(glyph.advance, 8.0);
    }

    #[test]
    fn test_control_codes_fail_to_rasterize() {
        let mut raster = BlockRasterizer::new();
        assert!(matches!(
            raster.rasterize(0x07),
            Err(FontError::RasterizeError(0x07))
        ));
        assert!(matches!(
            raster.rasterize(0x7f),
            Err(FontError::RasterizeError(0x7f))
        ));
    }

    #[test]
    fn test_block_rasterizer_is_deterministic() {
        let mut raster = BlockRasterizer::new();
        let a = raster.rasterize(b'x').unwrap();
        let b = raster.rasterize(b'x').unwrap();
        assert_eq!(a.size, b.size);
        assert_eq!(a.coverage, b.coverage);
        assert_eq!(a.advance, b.advance);
    }
}
