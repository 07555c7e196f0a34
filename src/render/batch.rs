//! Recording renderer.
//!
//! Collects glyph quads during a frame instead of drawing them. Used by the
//! headless simulator and by tests to inspect exactly what the engine drew.

use serde::Serialize;

use super::{GlyphQuad, Rect, Renderer};

/// A recorded glyph together with the clip region active when it was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawCommand {
    #[serde(flatten)]
    pub quad: GlyphQuad,
    pub clip: Option<Rect>,
}

impl DrawCommand {
    /// Destination rectangle in screen space (clip origin applied).
    pub fn screen_rect(&self) -> Rect {
        let (ox, oy) = self.clip.map(|c| (c.x, c.y)).unwrap_or((0.0, 0.0));
        Rect::new(
            self.quad.dest.x + ox,
            self.quad.dest.y + oy,
            self.quad.dest.width,
            self.quad.dest.height,
        )
    }

    /// Whether any part of the glyph lands inside its clip region.
    pub fn is_visible(&self) -> bool {
        let Some(clip) = self.clip else {
            return true;
        };
        let d = self.quad.dest;
        d.x < clip.width && d.right() > 0.0 && d.y < clip.height && d.bottom() > 0.0
    }
}

/// Batched glyph collection.
#[derive(Debug, Default, Clone, Serialize)]
pub struct GlyphBatch {
    commands: Vec<DrawCommand>,
    #[serde(skip)]
    clip: Option<Rect>,
    #[serde(skip)]
    clip_history: Vec<Option<Rect>>,
}

impl GlyphBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(quad_count: usize) -> Self {
        Self {
            commands: Vec::with_capacity(quad_count),
            ..Self::default()
        }
    }

    /// Clear the batch for reuse. The current clip region is kept.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.clip_history.clear();
    }

    pub fn quad_count(&self) -> usize {
        self.commands.len()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn quads(&self) -> impl Iterator<Item = &GlyphQuad> {
        self.commands.iter().map(|c| &c.quad)
    }

    /// Currently active clip region.
    pub fn clip_region(&self) -> Option<Rect> {
        self.clip
    }

    /// Every clip change since the last [`clear`](Self::clear), in order.
    pub fn clip_history(&self) -> &[Option<Rect>] {
        &self.clip_history
    }

    /// Reassemble the drawn glyphs into text rows, top to bottom.
    ///
    /// Glyphs sharing a destination y form one row, ordered by x. Glyphs that
    /// fall entirely outside their clip region are skipped, so the result is
    /// what the player would actually see. Trailing spaces are trimmed.
    pub fn visible_lines(&self) -> Vec<String> {
        let mut rows: Vec<(f32, Vec<(f32, char)>)> = Vec::new();
        for cmd in self.commands.iter().filter(|c| c.is_visible()) {
            let y = cmd.quad.dest.y;
            match rows.iter_mut().find(|(row_y, _)| *row_y == y) {
                Some((_, glyphs)) => glyphs.push((cmd.quad.dest.x, cmd.quad.ch)),
                None => rows.push((y, vec![(cmd.quad.dest.x, cmd.quad.ch)])),
            }
        }
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));
        rows.into_iter()
            .map(|(_, mut glyphs)| {
                glyphs.sort_by(|a, b| a.0.total_cmp(&b.0));
                let line: String = glyphs.into_iter().map(|(_, ch)| ch).collect();
                line.trim_end().to_string()
            })
            .collect()
    }
}

impl Renderer for GlyphBatch {
    fn draw_glyph(&mut self, quad: &GlyphQuad) {
        self.commands.push(DrawCommand { quad: *quad, clip: self.clip });
    }

    fn set_clip_region(&mut self, region: Option<Rect>) {
        self.clip = region;
        self.clip_history.push(region);
    }
}
