use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("font atlas too small: placed {placed} of {requested} glyphs")]
    AtlasOverflow { placed: usize, requested: usize },

    #[error("invalid font: {0}")]
    InvalidFont(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unsupported character {0:?} (font covers ' ' through DEL)")]
    UnsupportedCharacter(char),

    #[error("glyph {ch:?} is {width}px wide but the textbox is only {box_width}px")]
    GlyphTooWide { ch: char, width: f32, box_width: f32 },

    #[error("word starting at index {start} is {width}px wide but the textbox is only {box_width}px")]
    WordTooWide { start: usize, width: f32, box_width: f32 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Layout errors mean the message can never be placed in its box at the
    /// current scale. The host should abort the dialogue rather than retry.
    pub fn is_layout_fatal(&self) -> bool {
        matches!(self, Error::GlyphTooWide { .. } | Error::WordTooWide { .. })
    }

    /// Errors raised while building fonts or reading configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::AtlasOverflow { .. }
                | Error::InvalidFont(_)
                | Error::InvalidConfig(_)
                | Error::Json(_)
                | Error::Image(_)
                | Error::Io { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
