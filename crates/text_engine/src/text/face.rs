//! Font face: glyph resolution, measurement, and line wrapping
//!
//! A [`FontFace`] owns one rasterizer and one glyph atlas. Glyphs are
//! rasterized and packed on first use and memoized for the lifetime of
//! the face. The face also provides width measurement and line splitting
//! used by UI layout independently of the geometry cache.

use std::collections::HashMap;

use crate::atlas::GlyphAtlas;
use crate::config::FontConfig;
use crate::foundation::math::UVec2;
use crate::text::glyph::Glyph;
use crate::text::rasterizer::Rasterizer;

/// Line wrapping policy for [`FontFace::split`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// No wrapping; only explicit newlines split lines.
    None,
    /// Break at the first character that would exceed the width.
    Line,
    /// Prefer breaking at the last whitespace; hard-break if a single
    /// word exceeds the width on its own.
    Word,
}

/// One font face at one size, with its private glyph atlas.
pub struct FontFace {
    name: String,
    rasterizer: Box<dyn Rasterizer>,
    atlas: GlyphAtlas,
    glyphs: HashMap<u8, Glyph>,
    max_size: UVec2,
}

impl FontFace {
    /// Create a face from a rasterizer, allocating its atlas per `config`.
    pub fn new(
        name: impl Into<String>,
        rasterizer: Box<dyn Rasterizer>,
        config: &FontConfig,
    ) -> Self {
        let max_size = rasterizer.max_glyph_size();
        Self {
            name: name.into(),
            rasterizer,
            atlas: GlyphAtlas::new(config.atlas_width, config.atlas_height),
            glyphs: HashMap::new(),
            max_size,
        }
    }

    /// Face name (typically the source file or family).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Upper bound of any glyph's bounding box; `y` is the line height.
    #[must_use]
    pub const fn max_size(&self) -> UVec2 {
        self.max_size
    }

    /// The atlas all of this face's glyphs live in.
    #[must_use]
    pub const fn atlas(&self) -> &GlyphAtlas {
        &self.atlas
    }

    /// Mutable atlas access, for backends acknowledging uploads.
    pub fn atlas_mut(&mut self) -> &mut GlyphAtlas {
        &mut self.atlas
    }

    /// Resolve a character code to its glyph, rasterizing and packing it
    /// into the atlas on first use.
    ///
    /// Returns `None` when the code cannot be rasterized or the atlas is
    /// full; both are recoverable per-character conditions for callers,
    /// which skip the character.
    pub fn glyph(&mut self, code: u8) -> Option<Glyph> {
        // Tabs render with the space bitmap but keep their own code.
        let raster_code = if code == b'\t' { b' ' } else { code };

        if let Some(glyph) = self.glyphs.get(&code) {
            return Some(*glyph);
        }

        let raster = match self.rasterizer.rasterize(raster_code) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Failed to rasterize glyph {code:#04x}: {e}");
                return None;
            }
        };

        let uv = match self.atlas.add_bitmap(&raster.coverage, raster.size) {
            Ok(uv) => uv,
            Err(e) => {
                log::warn!("Atlas rejected glyph {code:#04x}: {e}");
                return None;
            }
        };

        let glyph = Glyph {
            code,
            uv,
            size: raster.size,
            offset: raster.offset,
            advance: raster.advance,
        };
        self.glyphs.insert(code, glyph);
        Some(glyph)
    }

    /// Width of the widest line in `text`, in advance units.
    pub fn text_width(&mut self, text: &str) -> f32 {
        let mut max_width = 0.0f32;
        let mut width = 0.0f32;

        for &code in text.as_bytes() {
            if code == b'\n' {
                max_width = max_width.max(width);
                width = 0.0;
                continue;
            }
            if let Some(glyph) = self.glyph(code) {
                width += glyph.advance;
            }
        }
        max_width.max(width)
    }

    /// Split `text` into lines no wider than `width`, each terminated with
    /// a newline. Returns the advance width of the trailing line.
    ///
    /// `WrapMode::Line` always consumes at least one character per line,
    /// so a single glyph wider than `width` cannot loop forever.
    pub fn split(
        &mut self,
        text: &str,
        width: f32,
        mode: WrapMode,
        lines: &mut Vec<String>,
    ) -> f32 {
        let bytes = text.as_bytes();
        let mut off = 0.0f32;
        let mut line_start = 0usize;
        let mut last_space = 0usize;
        let mut last_word_width = 0.0f32;

        for i in 0..bytes.len() {
            if bytes[i] == b'\n' {
                if i == line_start {
                    lines.push("\n".to_string());
                } else {
                    lines.push(text[line_start..=i].to_string());
                }
                line_start = i + 1;
                off = 0.0;
                continue;
            }

            let advance = self.glyph(bytes[i]).map_or(0.0, |g| g.advance);

            match mode {
                WrapMode::None => {}
                WrapMode::Line => {
                    if off + advance > width {
                        lines.push(format!("{}\n", &text[line_start..i]));
                        line_start = i;
                        off = 0.0;
                    }
                }
                WrapMode::Word => {
                    if bytes[i] == b' ' || bytes[i] == b'\t' {
                        last_space = i;
                        last_word_width = 0.0;
                    }
                    if off + advance > width {
                        if last_space > line_start {
                            lines.push(format!("{}\n", &text[line_start..last_space]));
                            line_start = last_space + 1;
                            off = last_word_width;
                            last_word_width = 0.0;
                        } else {
                            lines.push(format!("{}\n", &text[line_start..i]));
                            line_start = i;
                            off = 0.0;
                        }
                    }
                    last_word_width += advance;
                }
            }
            off += advance;
        }
        if off > 0.0 {
            lines.push(format!("{}\n", &text[line_start..]));
        }

        off
    }
}
