//! Cached text printing
//!
//! A [`Font`] memoizes laid-out strings keyed by a combined hash of pen
//! position and text bytes. Repeated prints of unchanged text re-use the
//! cached quads and only replay the pen advance. Once per frame,
//! [`Font::update`] advances the eviction generation, drops entries that
//! went unused, and finalizes the concatenated geometry.

use crate::config::FontConfig;
use crate::error::{FontError, FontResult};
use crate::foundation::color::{Color32, PALETTE};
use crate::foundation::math::IVec2;
use crate::render::geometry::{TextGeometry, Triangle, Vertex};
use crate::text::face::FontFace;
use crate::text::glyph::Glyph;

/// Sentinel returned by [`Font::vertex_count`] and [`Font::tri_count`]
/// while the cache has pending prints that `update()` has not finalized.
pub const INVALID_COUNT: usize = usize::MAX;

/// 32-bit polynomial rolling hash over raw bytes.
///
/// Order-sensitive and seedable; the pen-position hash seeds the text
/// hash so identical strings at different positions get distinct keys.
fn gen_hash(data: &[u8], initial: u32) -> u32 {
    let mut hash = initial;
    for &byte in data {
        hash = u32::from(byte)
            .wrapping_add(hash << 6)
            .wrapping_add(hash << 16)
            .wrapping_sub(hash);
    }
    hash
}

/// Memoized geometry for one string laid out at one pen position.
struct CacheEntry {
    hash: u32,
    last_used: u32,
    verts: Vec<Vertex>,
    position_delta: IVec2,
}

/// Cached text printer over one font face.
///
/// All geometry is absolute: quads are baked at the pen position the
/// string was first printed at, which is why the position participates
/// in the cache key.
pub struct Font {
    face: FontFace,
    position: IVec2,
    requested_position: IVec2,
    vert_count: usize,
    counter: u32,
    cache: Vec<CacheEntry>,
    cache_updated: bool,
    cache_ttl: u32,
    margin: i32,
}

impl Font {
    /// Create a font over `face` using default cache settings.
    #[must_use]
    pub fn new(face: FontFace) -> Self {
        Self::with_config(face, &FontConfig::default())
    }

    /// Create a font over `face` with explicit cache settings.
    #[must_use]
    pub fn with_config(face: FontFace, config: &FontConfig) -> Self {
        Self {
            face,
            position: IVec2::zeros(),
            requested_position: IVec2::zeros(),
            vert_count: 0,
            counter: 0,
            cache: Vec::new(),
            cache_updated: false,
            cache_ttl: config.cache_ttl,
            margin: config.margin,
        }
    }

    /// The face this font prints with.
    #[must_use]
    pub const fn face(&self) -> &FontFace {
        &self.face
    }

    /// Mutable face access, e.g. for measurement or atlas upload.
    pub fn face_mut(&mut self) -> &mut FontFace {
        &mut self.face
    }

    /// Number of live vertices, or [`INVALID_COUNT`] until `update()`
    /// has finalized the cache for the current generation.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        if self.cache_updated {
            self.vert_count
        } else {
            INVALID_COUNT
        }
    }

    /// Number of live triangles (two per glyph quad), or
    /// [`INVALID_COUNT`] until the cache is finalized.
    #[must_use]
    pub fn tri_count(&self) -> usize {
        if self.cache_updated {
            self.vert_count >> 1
        } else {
            INVALID_COUNT
        }
    }

    /// Place the pen at the top-left of a screen of the given height,
    /// offset by the configured margin.
    pub fn init_position(&mut self, screen_height: i32) {
        let line = self.face.max_size().y as i32;
        self.set_position(IVec2::new(self.margin, screen_height - line));
    }

    /// Set the pen baseline for this and subsequent frames.
    ///
    /// `update()` resets the live pen back to this position every
    /// generation, decoupling frame layout from where the previous
    /// frame's text ended.
    pub fn set_position(&mut self, position: IVec2) {
        self.requested_position = position;
        self.position = position;
    }

    /// Current pen position.
    #[must_use]
    pub const fn position(&self) -> IVec2 {
        self.position
    }

    /// Lay out `msg` at the current pen position in a uniform color.
    ///
    /// Serves the geometry from cache when this exact string was printed
    /// at this exact position before; invalidates counts until the next
    /// `update()` on a miss. Newlines advance the pen without emitting
    /// quads; unresolvable characters are logged and skipped.
    pub fn print(&mut self, msg: &str, color: Color32) {
        if msg.is_empty() {
            return;
        }
        if self.serve_cached(msg) {
            return;
        }

        let line_height = self.face.max_size().y as i32;
        let mut verts = Vec::with_capacity(msg.len() * 4);
        let mut pos = self.position;

        for &code in msg.as_bytes() {
            if code == b'\n' {
                pos.x = self.position.x;
                pos.y -= line_height;
                continue;
            }
            let Some(glyph) = self.face.glyph(code) else {
                log::warn!("Failed to load glyph {code:#04x}, skipping");
                continue;
            };
            emit_quad(&mut verts, &glyph, pos, color);
            pos.x += glyph.advance as i32;
        }

        self.store(msg, verts, pos);
    }

    /// Lay out `msg` interpreting inline `^N` / `^NN` palette escapes.
    ///
    /// A caret followed by one or two digits switches the current color
    /// to that palette slot; `^^` emits a literal caret. Indices outside
    /// the 16-entry palette consume the escape but leave the color
    /// unchanged.
    pub fn cprint(&mut self, msg: &str) {
        if msg.is_empty() {
            return;
        }
        if self.serve_cached(msg) {
            return;
        }

        let line_height = self.face.max_size().y as i32;
        let mut verts = Vec::with_capacity(msg.len() * 4);
        let mut pos = self.position;
        let mut color = Color32::WHITE;

        let bytes = msg.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            let mut code = bytes[i];
            if code == b'\n' {
                pos.x = self.position.x;
                pos.y -= line_height;
                i += 1;
                continue;
            }
            if code == b'^' && i + 1 < bytes.len() {
                let next = bytes[i + 1];
                if next.is_ascii_digit() {
                    let mut index = usize::from(next - b'0');
                    i += 2;
                    if i < bytes.len() && bytes[i].is_ascii_digit() {
                        index = index * 10 + usize::from(bytes[i] - b'0');
                        i += 1;
                    }
                    if let Some(&selected) = PALETTE.get(index) {
                        color = selected;
                    } else {
                        log::debug!("Palette index {index} out of range, color unchanged");
                    }
                    continue;
                }
                // "^^" prints a caret; any other escaped byte prints itself.
                code = next;
                i += 1;
            }

            if let Some(glyph) = self.face.glyph(code) {
                emit_quad(&mut verts, &glyph, pos, color);
                pos.x += glyph.advance as i32;
            } else {
                log::warn!("Failed to load glyph {code:#04x}, skipping");
            }
            i += 1;
        }

        self.store(msg, verts, pos);
    }

    /// Advance the eviction generation, drop entries unused for longer
    /// than the TTL, finalize counts, and reset the pen baseline.
    pub fn update(&mut self) {
        self.counter = self.counter.wrapping_add(1);
        self.vert_count = 0;

        let counter = self.counter;
        let ttl = self.cache_ttl;
        let mut vert_count = 0usize;
        self.cache.retain(|entry| {
            let age = counter.wrapping_sub(entry.last_used);
            if ttl != 0 && age <= ttl {
                vert_count += entry.verts.len();
                true
            } else {
                log::trace!("Evicting cache entry {:#010x} (age {age})", entry.hash);
                false
            }
        });
        self.vert_count = vert_count;

        self.cache_updated = true;
        self.position = self.requested_position;
    }

    /// Concatenate all live entries into one vertex buffer, regenerate
    /// the triangle index buffer, and return them with the atlas handle.
    ///
    /// Entries are concatenated in insertion order, so identical live
    /// sets yield byte-identical buffers across frames. Fails with
    /// [`FontError::GeometryNotFinalized`] if called before `update()`
    /// has run since the last print.
    pub fn get_geometry(&self) -> FontResult<TextGeometry> {
        if !self.cache_updated {
            return Err(FontError::GeometryNotFinalized);
        }

        let mut vertices = Vec::with_capacity(self.vert_count);
        for entry in &self.cache {
            vertices.extend_from_slice(&entry.verts);
        }

        let mut indices = Vec::with_capacity(vertices.len() / 2);
        let mut i = 0u32;
        while (i as usize) < vertices.len() {
            indices.push(Triangle::new(i, i + 1, i + 3));
            indices.push(Triangle::new(i + 3, i + 1, i + 2));
            i += 4;
        }

        Ok(TextGeometry {
            vertices,
            indices,
            texture: self.face.atlas().texture_handle(),
        })
    }

    /// Number of entries currently held by the cache.
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Combined position+text hash used as the cache key.
    ///
    /// Key equality is hash-only: two distinct (position, text) pairs
    /// that collide in 32 bits are served the wrong geometry. Known
    /// correctness gap, accepted for caches of tens of entries.
    fn entry_hash(&self, msg: &str) -> u32 {
        let mut position_bytes = [0u8; 8];
        position_bytes[..4].copy_from_slice(&self.position.x.to_le_bytes());
        position_bytes[4..].copy_from_slice(&self.position.y.to_le_bytes());
        gen_hash(msg.as_bytes(), gen_hash(&position_bytes, 0))
    }

    /// On a hit, touch the entry and replay its pen advance.
    fn serve_cached(&mut self, msg: &str) -> bool {
        let hash = self.entry_hash(msg);
        let counter = self.counter;
        if let Some(entry) = self.cache.iter_mut().find(|e| e.hash == hash) {
            entry.last_used = counter;
            self.position += entry.position_delta;
            return true;
        }
        false
    }

    /// Insert freshly laid-out geometry and advance the pen.
    fn store(&mut self, msg: &str, verts: Vec<Vertex>, end: IVec2) {
        let entry = CacheEntry {
            hash: self.entry_hash(msg),
            last_used: self.counter,
            verts,
            position_delta: end - self.position,
        };
        self.cache.push(entry);
        self.position = end;
        self.cache_updated = false;
    }
}

/// Append the four corners of one glyph quad.
///
/// Winding is bottom-left, bottom-right, top-right, top-left; the index
/// buffer triangulates this as `(i, i+1, i+3)` and `(i+3, i+1, i+2)`.
fn emit_quad(verts: &mut Vec<Vertex>, glyph: &Glyph, pen: IVec2, color: Color32) {
    let x0 = glyph.offset.x + pen.x;
    let y0 = glyph.offset.y + pen.y;
    let x1 = x0 + glyph.size.x as i32;
    let y1 = y0 + glyph.size.y as i32;
    let bl = glyph.uv.bot_left;
    let tr = glyph.uv.top_right;

    verts.push(Vertex {
        position: [x0, y0],
        uv: [bl.x, bl.y],
        color,
    });
    verts.push(Vertex {
        position: [x1, y0],
        uv: [tr.x, bl.y],
        color,
    });
    verts.push(Vertex {
        position: [x1, y1],
        uv: [tr.x, tr.y],
        color,
    });
    verts.push(Vertex {
        position: [x0, y1],
        uv: [bl.x, tr.y],
        color,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::rasterizer::BlockRasterizer;

    fn font() -> Font {
        let face = FontFace::new(
            "block",
            Box::new(BlockRasterizer::new()),
            &FontConfig::default(),
        );
        Font::new(face)
    }

    #[test]
    fn test_gen_hash_is_order_sensitive_and_seedable() {
        assert_ne!(gen_hash(b"ab", 0), gen_hash(b"ba", 0));
        assert_ne!(gen_hash(b"ab", 0), gen_hash(b"ab", 1));
        assert_eq!(gen_hash(b"ab", 7), gen_hash(b"ab", 7));
        assert_eq!(gen_hash(b"", 42), 42);
    }

    #[test]
    fn test_print_miss_creates_one_entry_and_advances_pen() {
        let mut font = font();
        font.set_position(IVec2::new(0, 100));
        font.print("Hi", Color32::WHITE);
        assert_eq!(font.cache_len(), 1);
        // Two glyphs at 8px advance each
        assert_eq!(font.position(), IVec2::new(16, 100));
    }

    #[test]
    fn test_repeated_print_hits_cache() {
        let mut font = font();
        font.set_position(IVec2::new(0, 100));
        font.print("Hi", Color32::WHITE);
        let end = font.position();

        font.set_position(IVec2::new(0, 100));
        font.print("Hi", Color32::WHITE);
        assert_eq!(font.cache_len(), 1);
        assert_eq!(font.position(), end);
    }

    #[test]
    fn test_same_text_at_new_position_is_a_miss() {
        let mut font = font();
        font.set_position(IVec2::new(0, 100));
        font.print("Hi", Color32::WHITE);
        font.set_position(IVec2::new(0, 50));
        font.print("Hi", Color32::WHITE);
        assert_eq!(font.cache_len(), 2);
    }

    #[test]
    fn test_chained_prints_flow_after_cached_text() {
        let mut font = font();
        font.set_position(IVec2::new(0, 100));
        font.print("ab", Color32::WHITE);
        font.print("cd", Color32::WHITE);
        let end = font.position();

        // Same sequence next frame: both prints hit, pen lands in the
        // same place because hits replay the position delta.
        font.update();
        font.print("ab", Color32::WHITE);
        font.print("cd", Color32::WHITE);
        assert_eq!(font.position(), end);
        assert_eq!(font.cache_len(), 2);
    }

    #[test]
    fn test_newline_emits_no_quad() {
        let mut font = font();
        font.set_position(IVec2::new(0, 100));
        font.print("a\nb", Color32::WHITE);
        font.update();
        // Two glyph quads only; the newline contributes nothing
        assert_eq!(font.vertex_count(), 8);
        // update() put the pen back at the requested baseline
        assert_eq!(font.position(), IVec2::new(0, 100));
    }

    #[test]
    fn test_newline_resets_x_and_drops_line() {
        let mut font = font();
        font.set_position(IVec2::new(3, 100));
        font.print("a\nb", Color32::WHITE);
        // line height 12, x back to line start plus one advance
        assert_eq!(font.position(), IVec2::new(11, 88));
    }

    #[test]
    fn test_counts_are_invalid_until_update() {
        let mut font = font();
        font.set_position(IVec2::new(0, 100));
        font.print("Hi", Color32::WHITE);
        assert_eq!(font.vertex_count(), INVALID_COUNT);
        assert_eq!(font.tri_count(), INVALID_COUNT);
        font.update();
        assert_eq!(font.vertex_count(), 8);
        assert_eq!(font.tri_count(), 4);
    }

    #[test]
    fn test_counts_invalidate_again_on_new_print() {
        let mut font = font();
        font.print("Hi", Color32::WHITE);
        font.update();
        assert_eq!(font.vertex_count(), 8);
        font.print("yo", Color32::WHITE);
        assert_eq!(font.vertex_count(), INVALID_COUNT);
    }

    #[test]
    fn test_geometry_before_update_is_an_error() {
        let mut font = font();
        font.print("Hi", Color32::WHITE);
        let err = font.get_geometry().unwrap_err();
        assert!(matches!(err, FontError::GeometryNotFinalized));
    }

    #[test]
    fn test_entry_evicted_after_ttl_expires() {
        let mut font = font();
        font.set_position(IVec2::new(0, 100));
        font.print("Hi", Color32::WHITE);
        font.update();
        assert_eq!(font.cache_len(), 1);
        // Not re-printed this generation; next update drops it.
        font.update();
        assert_eq!(font.cache_len(), 0);
        assert_eq!(font.vertex_count(), 0);
        let geometry = font.get_geometry().unwrap();
        assert!(geometry.vertices.is_empty());
        assert!(geometry.indices.is_empty());
    }

    #[test]
    fn test_reprinting_each_generation_keeps_entry_alive() {
        let mut font = font();
        for _ in 0..5 {
            font.set_position(IVec2::new(0, 100));
            font.print("Hi", Color32::WHITE);
            font.update();
            assert_eq!(font.cache_len(), 1);
        }
    }

    #[test]
    fn test_zero_ttl_evicts_everything() {
        let face = FontFace::new(
            "block",
            Box::new(BlockRasterizer::new()),
            &FontConfig::default(),
        );
        let config = FontConfig {
            cache_ttl: 0,
            ..FontConfig::default()
        };
        let mut font = Font::with_config(face, &config);
        font.print("Hi", Color32::WHITE);
        font.update();
        assert_eq!(font.cache_len(), 0);
    }

    #[test]
    fn test_assembly_is_idempotent() {
        let mut font = font();
        font.set_position(IVec2::new(0, 100));
        font.print("one", Color32::WHITE);
        font.print("two", Color32::RED);
        font.update();
        let a = font.get_geometry().unwrap();
        let b = font.get_geometry().unwrap();
        assert_eq!(a.vertices, b.vertices);
        assert_eq!(a.indices, b.indices);
        assert_eq!(a.texture, b.texture);
    }

    #[test]
    fn test_triangulation_invariant() {
        let mut font = font();
        font.print("abc", Color32::WHITE);
        font.update();
        let geometry = font.get_geometry().unwrap();
        assert_eq!(geometry.indices.len(), 6);
        for (quad, pair) in geometry.indices.chunks(2).enumerate() {
            let base = (quad * 4) as u32;
            assert_eq!(pair[0], Triangle::new(base, base + 1, base + 3));
            assert_eq!(pair[1], Triangle::new(base + 3, base + 1, base + 2));
        }
    }

    #[test]
    fn test_quad_winding_and_uv_corners() {
        let mut font = font();
        font.set_position(IVec2::new(10, 20));
        font.print("a", Color32::GREEN);
        font.update();
        let geometry = font.get_geometry().unwrap();
        let v = &geometry.vertices;
        assert_eq!(v.len(), 4);
        // Block glyphs are 6x10 with offset (1, 0)
        assert_eq!(v[0].position, [11, 20]);
        assert_eq!(v[1].position, [17, 20]);
        assert_eq!(v[2].position, [17, 30]);
        assert_eq!(v[3].position, [11, 30]);
        // Bottom edge shares v, left edge shares u
        assert_eq!(v[0].uv[0], v[3].uv[0]);
        assert_eq!(v[0].uv[1], v[1].uv[1]);
        assert_eq!(v[1].uv[0], v[2].uv[0]);
        assert_eq!(v[2].uv[1], v[3].uv[1]);
        assert!(v.iter().all(|vert| vert.color == Color32::GREEN));
    }

    #[test]
    fn test_cprint_switches_palette_colors() {
        let mut font = font();
        font.cprint("^1a^2b");
        font.update();
        let geometry = font.get_geometry().unwrap();
        assert_eq!(geometry.vertices.len(), 8);
        assert!(geometry.vertices[..4]
            .iter()
            .all(|v| v.color == Color32::RED));
        assert!(geometry.vertices[4..]
            .iter()
            .all(|v| v.color == Color32::GREEN));
    }

    #[test]
    fn test_cprint_two_digit_palette_index() {
        let mut font = font();
        font.cprint("^15a");
        font.update();
        let geometry = font.get_geometry().unwrap();
        assert_eq!(geometry.vertices.len(), 4);
        assert!(geometry
            .vertices
            .iter()
            .all(|v| v.color == Color32::ORANGE));
    }

    #[test]
    fn test_cprint_out_of_range_index_keeps_color() {
        let mut font = font();
        font.cprint("^99a");
        font.update();
        let geometry = font.get_geometry().unwrap();
        assert_eq!(geometry.vertices.len(), 4);
        assert!(geometry
            .vertices
            .iter()
            .all(|v| v.color == Color32::WHITE));
    }

    #[test]
    fn test_cprint_caret_escape_emits_literal_caret() {
        let mut font = font();
        font.set_position(IVec2::new(0, 0));
        font.cprint("^^");
        // One quad, one advance
        assert_eq!(font.position(), IVec2::new(8, 0));
        font.update();
        assert_eq!(font.vertex_count(), 4);
    }

    #[test]
    fn test_cprint_escape_emits_fewer_quads_than_bytes() {
        let mut font = font();
        font.cprint("^1ab");
        font.update();
        // Escape consumed two bytes without geometry
        assert_eq!(font.vertex_count(), 8);
    }

    #[test]
    fn test_cprint_trailing_caret_is_literal() {
        let mut font = font();
        font.cprint("a^");
        font.update();
        assert_eq!(font.vertex_count(), 8);
    }

    #[test]
    fn test_insertion_order_is_preserved_across_generations() {
        let mut font = font();
        font.set_position(IVec2::new(0, 100));
        font.print("first", Color32::WHITE);
        font.print("second", Color32::WHITE);
        font.update();
        let a = font.get_geometry().unwrap();

        font.set_position(IVec2::new(0, 100));
        font.print("first", Color32::WHITE);
        font.print("second", Color32::WHITE);
        font.update();
        let b = font.get_geometry().unwrap();
        assert_eq!(a.vertices, b.vertices);
        assert_eq!(a.indices, b.indices);
    }

    #[test]
    fn test_init_position_uses_margin_and_line_height() {
        let mut font = font();
        font.init_position(240);
        assert_eq!(font.position(), IVec2::new(5, 228));
    }

    #[test]
    fn test_unresolvable_characters_are_skipped() {
        let mut font = font();
        font.set_position(IVec2::new(0, 0));
        font.print("a\u{1}b", Color32::WHITE);
        // Skipped character contributes no advance either
        assert_eq!(font.position(), IVec2::new(16, 0));
        font.update();
        assert_eq!(font.vertex_count(), 8);
    }
}
