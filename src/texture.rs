//! Glyph atlas texture registry.
//!
//! The engine only needs an opaque handle to pass back to the renderer and
//! the atlas dimensions for laying out glyph rectangles. Pixel decoding is the
//! backend's job; here we read just the image header.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};

/// Opaque identifier the renderer uses to find an uploaded atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct TextureHandle(pub u32);

/// A registered atlas texture.
#[derive(Debug, Clone)]
pub struct TextureData {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Hands out texture handles and caches atlas dimensions by path.
#[derive(Debug, Default)]
pub struct TextureManager {
    textures: Vec<TextureData>,
    by_path: HashMap<PathBuf, TextureHandle>,
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an atlas image, reading its dimensions from the file header.
    pub fn load(&mut self, path: &Path) -> Result<TextureHandle> {
        if let Some(handle) = self.by_path.get(path) {
            return Ok(*handle);
        }
        let (width, height) = image::image_dimensions(path)?;
        tracing::debug!("Loaded atlas {} ({}x{})", path.display(), width, height);
        Ok(self.register(path, width, height))
    }

    /// Register an atlas whose dimensions are already known.
    pub fn register(&mut self, path: &Path, width: u32, height: u32) -> TextureHandle {
        if let Some(handle) = self.by_path.get(path) {
            return *handle;
        }
        let handle = TextureHandle(self.textures.len() as u32);
        self.textures.push(TextureData { path: path.to_path_buf(), width, height });
        self.by_path.insert(path.to_path_buf(), handle);
        handle
    }

    pub fn get(&self, handle: TextureHandle) -> Option<&TextureData> {
        self.textures.get(handle.0 as usize)
    }

    /// Like [`get`](Self::get), for handles that must exist.
    pub fn require(&self, handle: TextureHandle) -> Result<&TextureData> {
        self.get(handle)
            .ok_or_else(|| Error::InvalidFont(format!("unknown texture handle {}", handle.0)))
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
