//! Glyph metadata
//!
//! A [`Glyph`] describes one rasterized character after it has been packed
//! into the atlas: where its pixels live in texture space and how it is
//! positioned relative to the pen.

use crate::atlas::UvRect;
use crate::foundation::math::{IVec2, UVec2};

/// Immutable description of a single rasterized, atlas-resident character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    /// Character code this glyph renders
    pub code: u8,
    /// Normalized atlas rectangle covering the glyph's pixels
    pub uv: UvRect,
    /// Bitmap size in pixels
    pub size: UVec2,
    /// Offset of the bitmap's bottom-left corner from the pen position
    pub offset: IVec2,
    /// Horizontal pen advance in pixels
    pub advance: f32,
}
