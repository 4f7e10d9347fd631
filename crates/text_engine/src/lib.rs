//! # Text Engine
//!
//! Cached text layout and glyph atlas management for real-time rendering.
//!
//! Strings are converted into batches of colored, textured quads backed
//! by a rasterized glyph atlas. Laid-out geometry is memoized by content
//! and pen position, so frames that print the same text skip layout
//! entirely; a per-frame generation counter evicts entries that stop
//! being printed.
//!
//! ## Features
//!
//! - **Glyph atlas**: shelf-packed coverage texture, built lazily as
//!   characters are first used
//! - **Geometry cache**: content+position keyed memoization with
//!   generational TTL eviction
//! - **Inline color escapes**: `^N` / `^NN` palette switches for console
//!   style output
//! - **Line wrapping**: width measurement plus line- and word-wrap
//!   splitting for UI layout
//! - **Pluggable rasterization**: `fontdue` in production, deterministic
//!   block glyphs for headless use
//!
//! ## Quick Start
//!
//! ```rust
//! use text_engine::prelude::*;
//!
//! let config = FontConfig::default();
//! let face = FontFace::new("debug", Box::new(BlockRasterizer::new()), &config);
//! let mut font = Font::with_config(face, &config);
//!
//! font.set_position(IVec2::new(5, 100));
//! font.print("Hello", Color32::WHITE);
//! font.cprint("^2ok^0 done");
//!
//! font.update();
//! let geometry = font.get_geometry().unwrap();
//! assert_eq!(geometry.vertices.len() % 4, 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]

pub mod atlas;
pub mod config;
pub mod error;
pub mod foundation;
pub mod render;
pub mod text;

pub use config::FontConfig;
pub use error::{AtlasError, FontError, FontResult};

/// Common imports for text engine users
pub mod prelude {
    pub use crate::{
        atlas::{GlyphAtlas, ShelfPacker, TextureHandle, UvRect},
        config::FontConfig,
        error::{AtlasError, FontError, FontResult},
        foundation::{
            color::{Color32, PALETTE},
            math::{IVec2, UVec2, Vec2},
        },
        render::{BackendKind, RenderBackend, TextGeometry, Triangle, Vertex, create_backend},
        text::{
            BlockRasterizer, Font, FontFace, FontdueRasterizer, Glyph, Rasterizer, WrapMode,
            INVALID_COUNT,
        },
    };
}
