//! Vertex and triangle types for text geometry
//!
//! Plain-old-data layouts suitable for direct upload to GPU buffers.

use bytemuck::{Pod, Zeroable};

use crate::atlas::TextureHandle;
use crate::foundation::color::Color32;

/// One corner of a glyph quad: integer position, texture coordinate,
/// and packed RGBA color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Screen-space position in pixels
    pub position: [i32; 2],
    /// Normalized atlas coordinates
    pub uv: [f32; 2],
    /// Packed RGBA color
    pub color: Color32,
}

/// One triangle as three vertex-buffer indices.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct Triangle {
    /// First corner index
    pub a: u32,
    /// Second corner index
    pub b: u32,
    /// Third corner index
    pub c: u32,
}

impl Triangle {
    /// Create a triangle from three indices.
    #[must_use]
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }
}

/// Finalized geometry for one frame of cached text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextGeometry {
    /// Interleaved quad vertices, four per glyph
    pub vertices: Vec<Vertex>,
    /// Two triangles per quad
    pub indices: Vec<Triangle>,
    /// Atlas texture the UVs index into
    pub texture: TextureHandle,
}
