//! Shelf-based 2D rectangle packer
//!
//! Places rectangles left-to-right along the current shelf (row) and wraps
//! to a new shelf when the row is full. Placements are append-only for the
//! lifetime of the packer; running out of space is a hard failure for the
//! atlas instance.

use crate::error::AtlasError;
use crate::foundation::math::{UVec2, Vec2};

/// Normalized texture-coordinate rectangle of one packed bitmap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    /// Bottom-left corner in normalized coordinates
    pub bot_left: Vec2,
    /// Top-right corner in normalized coordinates
    pub top_right: Vec2,
}

/// Pixel placement of one packed bitmap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// X offset of the bitmap's first column, in pixels
    pub x: u32,
    /// Y offset of the bitmap's first row, in pixels
    pub y: u32,
    /// Normalized texture rectangle covering the bitmap
    pub uv: UvRect,
}

/// Append-only shelf packer over a fixed-size pixel region
#[derive(Debug)]
pub struct ShelfPacker {
    size: UVec2,
    cursor: UVec2,
    row_height: u32,
}

impl ShelfPacker {
    /// Create a packer for a region of `width` x `height` pixels.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: UVec2::new(width, height),
            cursor: UVec2::zeros(),
            row_height: 0,
        }
    }

    /// Region dimensions in pixels.
    #[must_use]
    pub const fn size(&self) -> UVec2 {
        self.size
    }

    /// Reserve space for a `width` x `height` bitmap.
    ///
    /// Wraps to a new shelf if the current one cannot fit the width.
    /// Fails with [`AtlasError::OutOfSpace`] once the region is exhausted;
    /// previously returned placements stay valid forever.
    pub fn add(&mut self, width: u32, height: u32) -> Result<Placement, AtlasError> {
        if self.cursor.x + width > self.size.x {
            self.cursor.y += self.row_height;
            self.cursor.x = 0;
            self.row_height = 0;
        }

        if self.cursor.y + height > self.size.y || self.cursor.x + width > self.size.x {
            return Err(AtlasError::OutOfSpace { width, height });
        }

        let uv = UvRect {
            bot_left: Vec2::new(
                self.cursor.x as f32 / self.size.x as f32,
                self.cursor.y as f32 / self.size.y as f32,
            ),
            top_right: Vec2::new(
                (self.cursor.x + width) as f32 / self.size.x as f32,
                (self.cursor.y + height) as f32 / self.size.y as f32,
            ),
        };
        let placement = Placement {
            x: self.cursor.x,
            y: self.cursor.y,
            uv,
        };

        self.cursor.x += width;
        self.row_height = self.row_height.max(height);

        Ok(placement)
    }
}
