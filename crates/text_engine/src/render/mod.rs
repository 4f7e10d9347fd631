//! Rendering interface
//!
//! Vertex and index types produced by the text cache, and the backend
//! boundary that consumes them.

pub mod backend;
pub mod geometry;

pub use backend::*;
pub use geometry::*;
