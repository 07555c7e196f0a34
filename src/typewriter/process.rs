//! Per-frame processing: reveal timer, advance input, and pagination.

use super::paginate::{paginate, Pagination};
use super::state::{Message, TextBox};
use crate::error::Result;
use crate::font::FontMetricsTable;
use crate::host::StepInput;
use crate::render::RenderContext;

/// Speed-up added to the typing multiplier per advance press while typing.
pub const SPEED_UP_STEP: f32 = 5.0;

/// Run one frame of a textbox.
///
/// Draws the revealed text clipped to the box, advances the reveal timer,
/// and handles the advance action: while typing it speeds typing up, while
/// halted it grants scroll credit and moves past the break. Returns true
/// once the message is fully typed, its last line is on screen, and the
/// player has acknowledged it.
pub fn process_text_box(
    font: &FontMetricsTable,
    textbox: &mut TextBox,
    message: &mut Message,
    ctx: &mut RenderContext<'_>,
    input: StepInput,
) -> Result<bool> {
    let mut scope = ctx.clip(textbox.bounds);

    let pass = paginate(font, textbox, message, &mut scope)?;
    if pass.proceeds() {
        message.reveal_timer -= input.elapsed_seconds * message.type_speed_multiplier;
        if message.reveal_timer <= 0.0 && !textbox.is_scrolling() {
            message.reveal_next();
            message.reveal_timer = message.type_interval;
        }
        if input.advance {
            message.reveal_timer = 0.0;
            message.type_speed_multiplier += SPEED_UP_STEP;
        }
        return Ok(false);
    }

    if !input.advance {
        return Ok(false);
    }

    textbox.grant_scroll_credit();
    message.reveal_next();
    message.type_speed_multiplier = 1.0;
    tracing::debug!(
        "Advance: {} lines of scroll credit, reveal index {}",
        textbox.lines_pending_scroll(),
        message.reveal_index()
    );
    // A full box may still hide revealed text below it; scroll that into
    // view before the message can finish.
    Ok(pass == Pagination::AtBreak && message.is_fully_revealed())
}
