//! Textbox and message state, and the scroll coordinator.

use serde::{Deserialize, Serialize};

use crate::render::Rect;

/// Pixels scrolled per processing step while making room for a new line.
pub const SCROLL_STEP: f32 = 1.0;

/// Where a textbox is in its reveal/scroll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum BoxPhase {
    /// Freshly created or reset; nothing processed yet.
    #[default]
    Idle,
    /// Typing out characters.
    Revealing,
    /// Halted at a line break, a full box, or the end of the message.
    AwaitingAdvance,
    /// Scrolling up one pixel per step to make room for a line.
    Scrolling,
}

/// What to do with a single word wider than the whole box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OversizedWords {
    /// Break the word wherever the line runs out.
    #[default]
    Split,
    /// Fail with [`Error::WordTooWide`](crate::Error::WordTooWide).
    Reject,
}

/// One on-screen dialogue region.
#[derive(Debug, Clone, Serialize)]
pub struct TextBox {
    /// Destination rectangle in screen space.
    pub bounds: Rect,
    /// Extra vertical gap between lines.
    pub line_spacing: f32,
    pub oversized_words: OversizedWords,
    pub(crate) scroll_offset_y: f32,
    pub(crate) phase: BoxPhase,
    pub(crate) lines_pending_scroll: u32,
    pub(crate) total_lines_scrolled: u32,
    pub(crate) current_line_index: i32,
}

impl TextBox {
    pub fn new(bounds: Rect, line_spacing: f32) -> Self {
        Self {
            bounds,
            line_spacing,
            oversized_words: OversizedWords::default(),
            scroll_offset_y: 0.0,
            phase: BoxPhase::Idle,
            lines_pending_scroll: 0,
            total_lines_scrolled: 0,
            current_line_index: 0,
        }
    }

    pub fn with_oversized_words(mut self, policy: OversizedWords) -> Self {
        self.oversized_words = policy;
        self
    }

    /// Abandon whatever is displayed and start over.
    pub fn reset(&mut self) {
        self.scroll_offset_y = 0.0;
        self.phase = BoxPhase::Idle;
        self.lines_pending_scroll = 0;
        self.total_lines_scrolled = 0;
        self.current_line_index = 0;
    }

    pub fn phase(&self) -> BoxPhase {
        self.phase
    }

    pub fn is_scrolling(&self) -> bool {
        self.phase == BoxPhase::Scrolling
    }

    /// Vertical shift applied to everything drawn. Never positive.
    pub fn scroll_offset_y(&self) -> f32 {
        self.scroll_offset_y
    }

    /// Scroll credit: lines that may still scroll away without another advance.
    pub fn lines_pending_scroll(&self) -> u32 {
        self.lines_pending_scroll
    }

    pub fn total_lines_scrolled(&self) -> u32 {
        self.total_lines_scrolled
    }

    pub fn current_line_index(&self) -> i32 {
        self.current_line_index
    }

    /// Start or continue scrolling to make room for a new line.
    ///
    /// Returns false when there is no scroll credit left; the box then waits
    /// for the player to advance.
    pub fn call_for_new_line(&mut self) -> bool {
        if self.phase == BoxPhase::Scrolling {
            self.scroll_offset_y -= SCROLL_STEP;
            true
        } else if self.lines_pending_scroll > 0 {
            self.phase = BoxPhase::Scrolling;
            self.lines_pending_scroll -= 1;
            self.total_lines_scrolled += 1;
            tracing::debug!(
                "Scrolling textbox: {} lines scrolled, {} pending",
                self.total_lines_scrolled,
                self.lines_pending_scroll
            );
            true
        } else {
            self.phase = BoxPhase::AwaitingAdvance;
            false
        }
    }

    /// Every line shown so far may scroll away once the player advances.
    pub(crate) fn grant_scroll_credit(&mut self) {
        self.lines_pending_scroll = u32::try_from(self.current_line_index).unwrap_or(0);
    }

    /// A break is settled: all owed scrolling has happened.
    pub(crate) fn settle_pending_scroll(&mut self) {
        self.total_lines_scrolled += self.lines_pending_scroll;
        self.lines_pending_scroll = 0;
    }
}

/// One unit of dialogue text and its typing progress.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub(crate) text: Vec<char>,
    pub(crate) reveal_index: usize,
    pub font_scale: f32,
    /// Seconds per revealed character.
    pub type_interval: f32,
    pub(crate) type_speed_multiplier: f32,
    pub(crate) reveal_timer: f32,
}

impl Message {
    pub const DEFAULT_TYPE_INTERVAL: f32 = 0.05;

    pub fn new(text: &str) -> Self {
        Self {
            text: text.chars().collect(),
            reveal_index: 0,
            font_scale: 1.0,
            type_interval: Self::DEFAULT_TYPE_INTERVAL,
            type_speed_multiplier: 1.0,
            reveal_timer: 0.0,
        }
    }

    pub fn with_type_interval(mut self, seconds: f32) -> Self {
        self.type_interval = seconds;
        self
    }

    pub fn with_font_scale(mut self, scale: f32) -> Self {
        self.font_scale = scale;
        self
    }

    pub fn text(&self) -> &[char] {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn reveal_index(&self) -> usize {
        self.reveal_index
    }

    /// The revealed prefix as a string.
    pub fn revealed(&self) -> String {
        self.text[..self.reveal_index].iter().collect()
    }

    pub fn type_speed_multiplier(&self) -> f32 {
        self.type_speed_multiplier
    }

    pub fn reveal_timer(&self) -> f32 {
        self.reveal_timer
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.reveal_index >= self.text.len()
    }

    /// Next character to be revealed, if any.
    pub fn next_char(&self) -> Option<char> {
        self.text.get(self.reveal_index).copied()
    }

    /// Jump the reveal point forward (e.g. a host "skip" action). Never moves
    /// it backwards or past the end of the text.
    pub fn skip_to(&mut self, index: usize) {
        self.reveal_index = self.reveal_index.max(index.min(self.text.len()));
    }

    /// Whether typing is parked on a break: the next character is a line
    /// break, or there is nothing left to type.
    pub(crate) fn at_break(&self) -> bool {
        matches!(self.next_char(), Some('\n') | None)
    }

    /// Reveal one more character. Never moves past the end of the text.
    pub(crate) fn reveal_next(&mut self) {
        self.reveal_index = (self.reveal_index + 1).min(self.text.len());
    }
}
