//! Multi-line layout and pagination.
//!
//! Each processing step lays the revealed text out again from the first
//! character, shifted up by the box's scroll offset. Nothing about previous
//! passes is cached besides the counters on [`TextBox`].

use super::compose::compose_line;
use super::state::{BoxPhase, Message, TextBox};
use crate::error::Result;
use crate::font::FontMetricsTable;
use crate::render::{Point, RenderContext};

/// Result of one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// Typing may continue, or a scroll is in progress.
    Proceed,
    /// Parked on a line break or the end of the message.
    AtBreak,
    /// Lines are waiting below a full box and no scroll credit is left.
    BoxFull,
}

impl Pagination {
    pub fn proceeds(self) -> bool {
        self == Pagination::Proceed
    }
}

/// Lay out and draw everything revealed so far.
///
/// Proceeds while typing may continue (including while a scroll is in
/// progress) and halts when the box must wait for the player: at a line
/// break, at the end of the message, or when the box is full and no scroll
/// credit is left.
pub fn paginate(
    font: &FontMetricsTable,
    textbox: &mut TextBox,
    message: &Message,
    ctx: &mut RenderContext<'_>,
) -> Result<Pagination> {
    let line_step = textbox.line_spacing + font.line_height() * message.font_scale;
    let mut cursor = Point::new(0.0, textbox.scroll_offset_y);
    textbox.current_line_index = -(textbox.total_lines_scrolled as i32);

    let mut index = 0;
    while index < message.reveal_index() {
        if cursor.y + line_step > textbox.bounds.height {
            return Ok(if textbox.call_for_new_line() { Pagination::Proceed } else { Pagination::BoxFull });
        }
        index = compose_line(font, textbox, message, ctx, index, cursor)?.next_index();
        cursor.x = 0.0;
        cursor.y += line_step;
        textbox.current_line_index += 1;
    }

    if message.at_break() {
        // Scroll until only lines shown since the last advance remain.
        let settled_y = (textbox.current_line_index - textbox.lines_pending_scroll as i32) as f32 * line_step;
        if cursor.y > settled_y {
            textbox.phase = BoxPhase::Scrolling;
            textbox.call_for_new_line();
            return Ok(Pagination::Proceed);
        }
        textbox.settle_pending_scroll();
        if textbox.phase != BoxPhase::AwaitingAdvance {
            tracing::debug!("Textbox waiting for advance at index {}", message.reveal_index());
        }
        textbox.phase = BoxPhase::AwaitingAdvance;
        return Ok(Pagination::AtBreak);
    }

    textbox.phase = BoxPhase::Revealing;
    Ok(Pagination::Proceed)
}
