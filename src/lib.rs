//! Dialogue Typewriter
//!
//! Typewriter-style dialogue box rendering for game UIs: reveals text one
//! character at a time from a fixed-advance bitmap font, wraps words at the
//! box edge, waits for the player at paragraph breaks or when the box fills,
//! and scrolls the box up to make room for new lines.

pub mod config;
pub mod dialogue;
pub mod error;
pub mod font;
pub mod host;
pub mod render;
pub mod texture;
pub mod typewriter;

pub use dialogue::{Dialogue, DialogueStatus};
pub use error::{Error, Result};
pub use font::{FontConfig, FontMetricsTable};
pub use host::StepInput;
pub use render::{GlyphBatch, Rect, RenderContext, Renderer};
pub use typewriter::{process_text_box, BoxPhase, Message, TextBox};
