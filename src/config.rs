//! Scene configuration for the simulator.
//!
//! A scene names a font description, the textbox geometry and the messages to
//! show. Loaded once on startup; relative paths resolve against the scene
//! file's directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::render::{Point, Rect};
use crate::typewriter::{Message, OversizedWords, TextBox};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneConfig {
    /// Font description JSON.
    pub font: PathBuf,
    pub textbox: TextBoxConfig,
    #[serde(default)]
    pub render_offset: Point,
    #[serde(default = "default_type_interval")]
    pub type_interval: f32,
    #[serde(default = "default_font_scale")]
    pub font_scale: f32,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBoxConfig {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub line_spacing: f32,
    #[serde(default)]
    pub oversized_words: OversizedWords,
}

fn default_type_interval() -> f32 {
    Message::DEFAULT_TYPE_INTERVAL
}

fn default_font_scale() -> f32 {
    1.0
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        let mut config = Self::from_json(&contents)?;
        if config.font.is_relative()
            && let Some(dir) = path.parent()
        {
            config.font = dir.join(&config.font);
        }
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.textbox.width <= 0.0 || self.textbox.height <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "textbox must have a positive size, got {}x{}",
                self.textbox.width, self.textbox.height
            )));
        }
        if self.type_interval < 0.0 || self.font_scale <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "bad typing settings: interval {}, scale {}",
                self.type_interval, self.font_scale
            )));
        }
        Ok(())
    }

    pub fn textbox(&self) -> TextBox {
        let tb = &self.textbox;
        TextBox::new(Rect::new(tb.x, tb.y, tb.width, tb.height), tb.line_spacing)
            .with_oversized_words(tb.oversized_words)
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages
            .iter()
            .map(|text| {
                Message::new(text)
                    .with_type_interval(self.type_interval)
                    .with_font_scale(self.font_scale)
            })
            .collect()
    }
}
