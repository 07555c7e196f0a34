//! Rendering seam between the typewriter engine and the host's backend.
//!
//! The engine never talks to a GPU or window directly. It draws through a
//! [`RenderContext`] handed in per call, which wraps whatever [`Renderer`] the
//! host provides together with the global render offset.

mod batch;

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::texture::TextureHandle;

pub use batch::{DrawCommand, GlyphBatch};

/// Axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// A position in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One glyph to copy from the font atlas onto the screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GlyphQuad {
    pub texture: TextureHandle,
    pub ch: char,
    /// Rectangle in the atlas texture.
    pub source: Rect,
    /// Rectangle relative to the active clip region.
    pub dest: Rect,
}

/// Backend capable of drawing atlas glyphs.
///
/// While a clip region is set, destination rectangles are relative to its
/// top-left corner and nothing outside it is visible (viewport semantics).
pub trait Renderer {
    fn draw_glyph(&mut self, quad: &GlyphQuad);

    fn set_clip_region(&mut self, region: Option<Rect>);
}

/// Per-call drawing context: the host renderer plus the render offset applied
/// to every glyph.
pub struct RenderContext<'a> {
    renderer: &'a mut dyn Renderer,
    offset: Point,
}

impl<'a> RenderContext<'a> {
    pub fn new(renderer: &'a mut dyn Renderer) -> Self {
        Self { renderer, offset: Point::ORIGIN }
    }

    pub fn with_offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Draw `ch` with its top-left corner at `at` (before the render offset).
    pub fn draw_glyph(&mut self, texture: TextureHandle, ch: char, source: Rect, at: Point, scale: f32) {
        let dest = Rect::new(
            at.x + self.offset.x,
            at.y + self.offset.y,
            source.width * scale,
            source.height * scale,
        );
        self.renderer.draw_glyph(&GlyphQuad { texture, ch, source, dest });
    }

    /// Restrict drawing to `region` until the returned scope is dropped.
    pub fn clip(&mut self, region: Rect) -> ClipScope<'_, 'a> {
        self.renderer.set_clip_region(Some(region));
        ClipScope { ctx: self }
    }
}

/// Active clip region. Dropping it restores full-screen drawing, so early
/// returns never leave the backend clipped.
pub struct ClipScope<'s, 'a> {
    ctx: &'s mut RenderContext<'a>,
}

impl<'a> Deref for ClipScope<'_, 'a> {
    type Target = RenderContext<'a>;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl DerefMut for ClipScope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl Drop for ClipScope<'_, '_> {
    fn drop(&mut self) {
        self.ctx.renderer.set_clip_region(None);
    }
}
