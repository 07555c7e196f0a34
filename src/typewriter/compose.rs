//! Single-line composition with word wrapping.

use super::state::{Message, OversizedWords, TextBox};
use crate::error::{Error, Result};
use crate::font::FontMetricsTable;
use crate::render::{Point, RenderContext};

/// Why a line stopped, carrying the index the next line starts at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnd {
    /// Hit a line break; the next line starts after it.
    Paragraph(usize),
    /// The word after a space would not fit; it moves to the next line whole.
    WordWrap(usize),
    /// This glyph does not fit in what is left of the line.
    Overflow(usize),
    /// Drew everything revealed so far.
    Revealed(usize),
}

impl LineEnd {
    pub fn next_index(self) -> usize {
        match self {
            LineEnd::Paragraph(i) | LineEnd::WordWrap(i) | LineEnd::Overflow(i) | LineEnd::Revealed(i) => i,
        }
    }
}

/// Draw one line of `message` starting at `start`, with the first glyph's
/// top-left corner at `cursor`.
///
/// Stops at a line break, before a word that needs the next line, before a
/// glyph that does not fit, or at the reveal index. A glyph wider than the
/// whole box can never be placed and fails with [`Error::GlyphTooWide`].
pub fn compose_line(
    font: &FontMetricsTable,
    textbox: &TextBox,
    message: &Message,
    ctx: &mut RenderContext<'_>,
    start: usize,
    mut cursor: Point,
) -> Result<LineEnd> {
    let text = message.text();
    let scale = message.font_scale;
    let box_width = textbox.bounds.width;
    let mut remaining = box_width;

    for i in start..message.reveal_index() {
        let ch = text[i];
        if ch == '\n' {
            return Ok(LineEnd::Paragraph(i + 1));
        }
        let glyph = font.glyph(ch)?;
        let width = glyph.width() * scale;

        if ch == ' ' {
            let word_width = width + font.next_word_width(text, i + 1)? * scale;
            if word_width > remaining && word_width <= box_width {
                return Ok(LineEnd::WordWrap(i + 1));
            }
        } else if textbox.oversized_words == OversizedWords::Reject && (i == start || text[i - 1] == ' ') {
            let word_width = font.next_word_width(text, i)? * scale;
            if word_width > box_width {
                tracing::error!(
                    "Word at index {} is {}px wide, textbox is {}px; reduce the font scale or widen the box",
                    i,
                    word_width,
                    box_width
                );
                return Err(Error::WordTooWide { start: i, width: word_width, box_width });
            }
        }

        if width > box_width {
            tracing::error!(
                "Glyph {:?} is {}px wide, textbox is {}px; reduce the font scale or widen the box",
                ch,
                width,
                box_width
            );
            return Err(Error::GlyphTooWide { ch, width, box_width });
        }
        if width > remaining {
            return Ok(LineEnd::Overflow(i));
        }

        ctx.draw_glyph(font.texture(), ch, glyph.source, cursor, scale);
        cursor.x += width;
        remaining -= width;
    }

    Ok(LineEnd::Revealed(message.reveal_index()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::uniform_font;
    use crate::render::{GlyphBatch, Rect};

    fn font() -> FontMetricsTable {
        uniform_font(10.0, 10.0)
    }

    fn revealed(text: &str) -> Message {
        let mut msg = Message::new(text);
        msg.skip_to(text.len());
        msg
    }

    fn compose(width: f32, msg: &Message, start: usize) -> (Result<LineEnd>, GlyphBatch) {
        compose_in(&TextBox::new(Rect::new(0.0, 0.0, width, 100.0), 0.0), msg, start)
    }

    fn compose_in(textbox: &TextBox, msg: &Message, start: usize) -> (Result<LineEnd>, GlyphBatch) {
        let font = font();
        let mut batch = GlyphBatch::new();
        let result = {
            let mut ctx = RenderContext::new(&mut batch);
            compose_line(&font, textbox, msg, &mut ctx, start, Point::ORIGIN)
        };
        (result, batch)
    }

    #[test]
    fn test_short_message_fits_on_one_line() {
        let msg = revealed("Hi there");
        let (end, batch) = compose(200.0, &msg, 0);
        assert_eq!(end.unwrap(), LineEnd::Revealed(8));
        assert_eq!(batch.quad_count(), 8);
        let xs: Vec<f32> = batch.quads().map(|q| q.dest.x).collect();
        assert_eq!(xs, vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]);
    }

    #[test]
    fn test_stops_at_reveal_index() {
        let mut msg = Message::new("Hello");
        msg.skip_to(3);
        let (end, batch) = compose(200.0, &msg, 0);
        assert_eq!(end.unwrap(), LineEnd::Revealed(3));
        assert_eq!(batch.visible_lines(), vec!["Hel"]);
    }

    #[test]
    fn test_line_break_ends_line() {
        let msg = revealed("AB\nCD");
        let (end, batch) = compose(200.0, &msg, 0);
        assert_eq!(end.unwrap(), LineEnd::Paragraph(3));
        assert_eq!(batch.quad_count(), 2);
    }

    #[test]
    fn test_word_wrap_moves_whole_word() {
        // "AB CD" in 40px: after "AB" 20px remain, " CD" needs 30.
        let msg = revealed("AB CD");
        let (end, batch) = compose(40.0, &msg, 0);
        assert_eq!(end.unwrap(), LineEnd::WordWrap(3));
        assert_eq!(batch.visible_lines(), vec!["AB"]);
    }

    #[test]
    fn test_word_exactly_box_width_still_wraps() {
        // " CDE" is 40px, exactly the box width.
        let msg = revealed("AB CDE");
        let (end, _) = compose(40.0, &msg, 0);
        assert_eq!(end.unwrap(), LineEnd::WordWrap(3));
    }

    #[test]
    fn test_word_fits_exactly_in_remaining_width() {
        let msg = revealed("AB CD");
        let (end, batch) = compose(50.0, &msg, 0);
        assert_eq!(end.unwrap(), LineEnd::Revealed(5));
        assert_eq!(batch.visible_lines(), vec!["AB CD"]);
    }

    #[test]
    fn test_oversized_word_splits_by_glyph() {
        let msg = revealed("HELLO");
        let (end, batch) = compose(15.0, &msg, 0);
        assert_eq!(end.unwrap(), LineEnd::Overflow(1));
        assert_eq!(batch.visible_lines(), vec!["H"]);
    }

    #[test]
    fn test_oversized_word_rejected_by_policy() {
        let textbox = TextBox::new(Rect::new(0.0, 0.0, 15.0, 100.0), 0.0)
            .with_oversized_words(OversizedWords::Reject);
        let msg = revealed("HELLO");
        let (end, batch) = compose_in(&textbox, &msg, 0);
        match end.unwrap_err() {
            Error::WordTooWide { start, width, box_width } => {
                assert_eq!(start, 0);
                assert_eq!(width, 50.0);
                assert_eq!(box_width, 15.0);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(batch.quad_count(), 0);
    }

    #[test]
    fn test_reject_policy_allows_words_that_fit() {
        let textbox = TextBox::new(Rect::new(0.0, 0.0, 40.0, 100.0), 0.0)
            .with_oversized_words(OversizedWords::Reject);
        let msg = revealed("AB CDE");
        let (end, _) = compose_in(&textbox, &msg, 0);
        assert_eq!(end.unwrap(), LineEnd::WordWrap(3));
        let (end, _) = compose_in(&textbox, &msg, 3);
        assert_eq!(end.unwrap(), LineEnd::Revealed(6));
    }

    #[test]
    fn test_glyph_wider_than_box_is_fatal() {
        let msg = revealed("AB");
        let (end, batch) = compose(8.0, &msg, 0);
        let err = end.unwrap_err();
        assert!(err.is_layout_fatal());
        assert!(matches!(err, Error::GlyphTooWide { ch: 'A', .. }));
        assert_eq!(batch.quad_count(), 0);
    }

    #[test]
    fn test_glyph_overflow_starts_next_line() {
        // Space after "AB" is drawn, then "C" (10px) meets 5px remaining.
        let msg = revealed("AB CDEFG");
        let (end, batch) = compose(35.0, &msg, 0);
        assert_eq!(end.unwrap(), LineEnd::Overflow(3));
        assert_eq!(batch.quad_count(), 3);
    }

    #[test]
    fn test_font_scale_affects_advance_and_fit() {
        let msg = revealed("ABC").with_font_scale(2.0);
        let (end, batch) = compose(50.0, &msg, 0);
        assert_eq!(end.unwrap(), LineEnd::Overflow(2));
        let quads: Vec<_> = batch.quads().collect();
        assert_eq!(quads[1].dest, Rect::new(20.0, 0.0, 20.0, 20.0));
    }

    #[test]
    fn test_unsupported_character() {
        let msg = revealed("A\tB");
        let (end, batch) = compose(200.0, &msg, 0);
        assert!(matches!(end, Err(Error::UnsupportedCharacter('\t'))));
        assert_eq!(batch.quad_count(), 1);
    }

    #[test]
    fn test_starts_mid_message() {
        let msg = revealed("AB\nCD");
        let (end, batch) = compose(200.0, &msg, 3);
        assert_eq!(end.unwrap(), LineEnd::Revealed(5));
        assert_eq!(batch.visible_lines(), vec!["CD"]);
    }
}
