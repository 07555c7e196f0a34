//! Fixed-advance bitmap font metrics.
//!
//! A font is a single atlas texture holding the printable ASCII range, space
//! (32) through DEL (127), laid out in code order on a grid of `em_width`
//! columns and `line_height` rows. Each glyph has its own visible width but
//! every glyph shares the line height.

mod config;

pub use config::FontConfig;

use crate::error::{Error, Result};
use crate::render::Rect;
use crate::texture::TextureHandle;

/// First character stored in the atlas.
pub const FIRST_GLYPH: char = ' ';
/// Last character stored in the atlas (DEL).
pub const LAST_GLYPH: char = '\u{7f}';
/// Number of glyphs in the supported range.
pub const GLYPH_COUNT: usize = (LAST_GLYPH as usize) - (FIRST_GLYPH as usize) + 1;

/// Atlas placement of one glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    pub source: Rect,
}

impl GlyphMetrics {
    pub fn width(&self) -> f32 {
        self.source.width
    }

    pub fn height(&self) -> f32 {
        self.source.height
    }
}

/// Atlas parameters needed to lay out glyph source rectangles.
#[derive(Debug, Clone, Copy)]
pub struct AtlasLayout {
    pub texture: TextureHandle,
    pub atlas_width: f32,
    pub atlas_height: f32,
    /// Height shared by every glyph.
    pub line_height: f32,
    /// Horizontal distance between glyph cells in the atlas.
    pub em_width: f32,
}

/// Glyph source rectangles for the supported range plus the shared line
/// height. Read-only once built.
#[derive(Debug, Clone)]
pub struct FontMetricsTable {
    texture: TextureHandle,
    glyphs: Vec<GlyphMetrics>,
    line_height: f32,
}

impl FontMetricsTable {
    /// Lay out `widths` (one per character, starting at space) on the atlas.
    ///
    /// Glyphs go left to right in `em_width` steps and wrap to the next row
    /// when the next glyph would cross the right edge. Fails if the atlas runs
    /// out of rows before every width is placed.
    pub fn build(layout: AtlasLayout, widths: &[f32]) -> Result<Self> {
        validate_layout(&layout, widths)?;

        let AtlasLayout { texture, atlas_width, atlas_height, line_height, em_width } = layout;
        let mut glyphs = Vec::with_capacity(widths.len());
        let mut pending = widths.iter().copied().peekable();
        let (mut x, mut y) = (0.0_f32, 0.0_f32);

        while y + line_height <= atlas_height {
            while let Some(&width) = pending.peek() {
                if x + width > atlas_width {
                    break;
                }
                glyphs.push(GlyphMetrics { source: Rect::new(x, y, width, line_height) });
                x += em_width;
                pending.next();
            }
            if pending.peek().is_none() {
                break;
            }
            x = 0.0;
            y += line_height;
        }

        if glyphs.len() < widths.len() {
            return Err(Error::AtlasOverflow { placed: glyphs.len(), requested: widths.len() });
        }
        if glyphs.len() < GLYPH_COUNT {
            tracing::warn!(
                "Font covers {} of {} glyphs; characters past {:?} are unsupported",
                glyphs.len(),
                GLYPH_COUNT,
                char::from(FIRST_GLYPH as u8 + glyphs.len() as u8 - 1),
            );
        }
        tracing::debug!("Built font table: {} glyphs, line height {}", glyphs.len(), line_height);

        Ok(Self { texture, glyphs, line_height })
    }

    /// Use glyph rectangles supplied directly instead of laying them out.
    pub fn from_glyphs(texture: TextureHandle, glyphs: Vec<GlyphMetrics>, line_height: f32) -> Result<Self> {
        if glyphs.is_empty() || glyphs.len() > GLYPH_COUNT {
            return Err(Error::InvalidFont(format!(
                "expected 1..={} glyphs, got {}",
                GLYPH_COUNT,
                glyphs.len()
            )));
        }
        if line_height <= 0.0 {
            return Err(Error::InvalidFont(format!("line height must be positive, got {line_height}")));
        }
        Ok(Self { texture, glyphs, line_height })
    }

    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyphs(&self) -> &[GlyphMetrics] {
        &self.glyphs
    }

    /// Metrics for `ch`, or [`Error::UnsupportedCharacter`] outside the range
    /// this font covers.
    pub fn glyph(&self, ch: char) -> Result<&GlyphMetrics> {
        let index = (ch as u32).checked_sub(FIRST_GLYPH as u32).ok_or(Error::UnsupportedCharacter(ch))?;
        self.glyphs.get(index as usize).ok_or(Error::UnsupportedCharacter(ch))
    }

    /// Unscaled width of the word starting at `start`: the run of characters
    /// up to the next space, line break, or end of text.
    pub fn next_word_width(&self, text: &[char], start: usize) -> Result<f32> {
        let mut width = 0.0;
        for &ch in text.iter().skip(start) {
            if ch == ' ' || ch == '\n' {
                break;
            }
            width += self.glyph(ch)?.width();
        }
        Ok(width)
    }
}

fn validate_layout(layout: &AtlasLayout, widths: &[f32]) -> Result<()> {
    if widths.is_empty() {
        return Err(Error::InvalidFont("no glyph widths given".into()));
    }
    if widths.len() > GLYPH_COUNT {
        return Err(Error::InvalidFont(format!(
            "{} glyph widths given but only {} characters are supported",
            widths.len(),
            GLYPH_COUNT
        )));
    }
    if layout.line_height <= 0.0 {
        return Err(Error::InvalidFont(format!("line height must be positive, got {}", layout.line_height)));
    }
    if layout.em_width <= 0.0 {
        return Err(Error::InvalidFont(format!("em width must be positive, got {}", layout.em_width)));
    }
    if let Some(pos) = widths.iter().position(|w| !w.is_finite() || *w < 0.0) {
        return Err(Error::InvalidFont(format!(
            "width of {:?} is {}",
            char::from(FIRST_GLYPH as u8 + pos as u8),
            widths[pos]
        )));
    }
    Ok(())
}

/// Full-range font where every glyph has the same width.
#[cfg(test)]
pub(crate) fn uniform_font(width: f32, line_height: f32) -> FontMetricsTable {
    let layout = AtlasLayout {
        texture: TextureHandle(0),
        atlas_width: width * 16.0,
        atlas_height: line_height * 6.0,
        line_height,
        em_width: width,
    };
    FontMetricsTable::build(layout, &[width; GLYPH_COUNT]).unwrap()
}
