//! JSON font descriptions.
//!
//! ```json
//! { "texture": "font.png", "widths": [6, 4, 8, ...], "heightChars": 16, "emWidth": 16 }
//! ```
//!
//! `widths` starts at space and continues in code order. The atlas size comes
//! from `atlasWidth`/`atlasHeight` when given, otherwise from the texture
//! file's header.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AtlasLayout, FontMetricsTable};
use crate::error::{Error, Result};
use crate::texture::TextureManager;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontConfig {
    /// Atlas image, relative to the font file.
    #[serde(default)]
    pub texture: Option<PathBuf>,
    pub widths: Vec<f32>,
    pub height_chars: f32,
    pub em_width: f32,
    #[serde(default)]
    pub atlas_width: Option<u32>,
    #[serde(default)]
    pub atlas_height: Option<u32>,
}

impl FontConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a font description from disk. Relative texture paths are
    /// resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        let mut config = Self::from_json(&contents)?;
        if let (Some(texture), Some(dir)) = (config.texture.as_mut(), path.parent())
            && texture.is_relative()
        {
            *texture = dir.join(&*texture);
        }
        Ok(config)
    }

    /// Register the atlas and lay out the glyph table.
    pub fn build(&self, textures: &mut TextureManager) -> Result<FontMetricsTable> {
        let texture_path = self.texture.clone().unwrap_or_else(|| PathBuf::from("<inline font>"));
        let handle = match (self.atlas_width, self.atlas_height) {
            (Some(w), Some(h)) => textures.register(&texture_path, w, h),
            _ => {
                let Some(path) = &self.texture else {
                    return Err(Error::InvalidFont(
                        "font needs a texture or explicit atlasWidth/atlasHeight".into(),
                    ));
                };
                textures.load(path)?
            }
        };
        let data = textures.require(handle)?;

        FontMetricsTable::build(
            AtlasLayout {
                texture: handle,
                atlas_width: data.width as f32,
                atlas_height: data.height as f32,
                line_height: self.height_chars,
                em_width: self.em_width,
            },
            &self.widths,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_camel_case_fields() {
        let config = FontConfig::from_json(
            r#"{ "widths": [4, 6.5], "heightChars": 12, "emWidth": 8, "atlasWidth": 64, "atlasHeight": 64 }"#,
        )
        .unwrap();
        assert_eq!(config.widths, vec![4.0, 6.5]);
        assert_eq!(config.height_chars, 12.0);
        assert_eq!(config.em_width, 8.0);
        assert!(config.texture.is_none());
    }

    #[test]
    fn test_missing_field_is_json_error() {
        let err = FontConfig::from_json(r#"{ "widths": [4] }"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_build_with_explicit_atlas_size() {
        let config = FontConfig::from_json(
            r#"{ "widths": [4, 6, 8], "heightChars": 10, "emWidth": 10, "atlasWidth": 20, "atlasHeight": 20 }"#,
        )
        .unwrap();
        let mut textures = TextureManager::new();
        let font = config.build(&mut textures).unwrap();
        assert_eq!(font.len(), 3);
        assert_eq!(font.glyph('"').unwrap().source.y, 10.0);
    }

    #[test]
    fn test_build_without_texture_or_size_fails() {
        let config = FontConfig::from_json(r#"{ "widths": [4], "heightChars": 10, "emWidth": 10 }"#).unwrap();
        let err = config.build(&mut TextureManager::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidFont(_)));
    }

    #[test]
    fn test_load_resolves_texture_next_to_font_file() {
        let dir = tempdir().unwrap();
        image::RgbaImage::new(160, 60).save(dir.path().join("atlas.png")).unwrap();
        let font_path = dir.path().join("font.json");
        std::fs::write(
            &font_path,
            r#"{ "texture": "atlas.png", "widths": [8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8], "heightChars": 12, "emWidth": 10 }"#,
        )
        .unwrap();

        let config = FontConfig::load(&font_path).unwrap();
        assert_eq!(config.texture.as_deref(), Some(dir.path().join("atlas.png").as_path()));

        let mut textures = TextureManager::new();
        let font = config.build(&mut textures).unwrap();
        assert_eq!(font.len(), 60);
        assert_eq!(font.line_height(), 12.0);
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = FontConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
