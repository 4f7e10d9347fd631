//! Text layout and glyph caching
//!
//! Font face management, glyph resolution, string layout, and the
//! generational geometry cache.

pub mod face;
pub mod font;
pub mod glyph;
pub mod rasterizer;


pub use face::*;
pub use font::*;
pub use glyph::*;
pub use rasterizer::*;
