//! Render backend boundary
//!
//! Backends consume the finalized geometry and own all GPU submission.
//! The core only defines the capability interface and two headless
//! staging strategies: one that retains and grows its buffers across
//! frames, one that stages a fresh copy every submit. Actual draw calls
//! happen outside this crate against the staged data.

use crate::atlas::TextureHandle;
use crate::error::FontResult;
use crate::render::geometry::{Triangle, Vertex};
use crate::text::font::Font;

/// Submission strategy selector, fixed at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Keep and grow staging buffers across frames
    Retained,
    /// Stage a fresh copy of the geometry every frame
    Streaming,
}

/// Consumer of finalized text geometry.
pub trait RenderBackend {
    /// Accept one frame of geometry for submission.
    fn submit(&mut self, vertices: &[Vertex], indices: &[Triangle], texture: TextureHandle);

    /// Staged vertices from the most recent submit.
    fn vertices(&self) -> &[Vertex];

    /// Staged indices from the most recent submit.
    fn indices(&self) -> &[Triangle];

    /// Texture the staged geometry samples from, if anything was staged.
    fn texture(&self) -> Option<TextureHandle>;

    /// Pull finalized geometry from a font and stage it.
    ///
    /// Fails if the font's cache has not been finalized by `update()`.
    fn draw(&mut self, font: &Font) -> FontResult<()> {
        let geometry = font.get_geometry()?;
        log::trace!(
            "Submitting {} verts / {} tris",
            geometry.vertices.len(),
            geometry.indices.len()
        );
        self.submit(&geometry.vertices, &geometry.indices, geometry.texture);
        Ok(())
    }
}

/// Create a backend of the requested kind.
#[must_use]
pub fn create_backend(kind: BackendKind) -> Box<dyn RenderBackend> {
    match kind {
        BackendKind::Retained => Box::new(RetainedBackend::new()),
        BackendKind::Streaming => Box::new(StreamingBackend::new()),
    }
}

/// Backend that keeps its staging buffers alive between frames,
/// growing them as the live text set grows.
#[derive(Debug, Default)]
pub struct RetainedBackend {
    vertices: Vec<Vertex>,
    indices: Vec<Triangle>,
    texture: Option<TextureHandle>,
    peak_verts: usize,
}

impl RetainedBackend {
    /// Create a retained backend with empty buffers.
    #[must_use]
    pub fn new() -> Self {
        log::debug!("Using retained text backend");
        Self::default()
    }

    /// Largest vertex count staged so far.
    #[must_use]
    pub const fn peak_vertex_count(&self) -> usize {
        self.peak_verts
    }
}

impl RenderBackend for RetainedBackend {
    fn submit(&mut self, vertices: &[Vertex], indices: &[Triangle], texture: TextureHandle) {
        self.peak_verts = self.peak_verts.max(vertices.len());
        self.vertices.clear();
        self.vertices.extend_from_slice(vertices);
        self.indices.clear();
        self.indices.extend_from_slice(indices);
        self.texture = Some(texture);
    }

    fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    fn indices(&self) -> &[Triangle] {
        &self.indices
    }

    fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }
}

/// Backend that stages a fresh copy of the geometry on every submit.
#[derive(Debug, Default)]
pub struct StreamingBackend {
    vertices: Vec<Vertex>,
    indices: Vec<Triangle>,
    texture: Option<TextureHandle>,
}

impl StreamingBackend {
    /// Create a streaming backend.
    #[must_use]
    pub fn new() -> Self {
        log::debug!("Using streaming text backend");
        Self::default()
    }
}

impl RenderBackend for StreamingBackend {
    fn submit(&mut self, vertices: &[Vertex], indices: &[Triangle], texture: TextureHandle) {
        self.vertices = vertices.to_vec();
        self.indices = indices.to_vec();
        self.texture = Some(texture);
    }

    fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    fn indices(&self) -> &[Triangle] {
        &self.indices
    }

    fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }
}
