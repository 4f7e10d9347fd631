//! Math utilities and types
//!
//! Provides the vector types used for pen positions, glyph metrics,
//! and texture coordinates.

pub use nalgebra::Vector2;

/// 2D float vector type (texture coordinates, advances)
pub type Vec2 = Vector2<f32>;

/// 2D integer vector type (pen positions, glyph offsets)
pub type IVec2 = Vector2<i32>;

/// 2D unsigned vector type (pixel sizes, atlas dimensions)
pub type UVec2 = Vector2<u32>;
