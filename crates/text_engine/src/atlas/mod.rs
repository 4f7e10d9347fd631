//! Glyph atlas management
//!
//! Shelf-based 2D packing and the CPU-side atlas pixel store that
//! rasterized glyph bitmaps are copied into.

pub mod packer;
pub mod texture;

pub use packer::*;
pub use texture::*;
