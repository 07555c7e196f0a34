//! Shared test helpers.

use std::path::{Path, PathBuf};

use dialogue_typewriter::font::{AtlasLayout, GLYPH_COUNT};
use dialogue_typewriter::texture::TextureHandle;
use dialogue_typewriter::{
    process_text_box, FontMetricsTable, GlyphBatch, Message, Rect, RenderContext, Result, StepInput, TextBox,
};

/// Frame time equal to the default typing interval: one character per tick.
pub const DT: f32 = 0.05;

/// Font where every glyph is `width` wide and `line_height` tall.
#[allow(dead_code)]
pub fn uniform_font(width: f32, line_height: f32) -> FontMetricsTable {
    let layout = AtlasLayout {
        texture: TextureHandle(0),
        atlas_width: width * 16.0,
        atlas_height: line_height * 6.0,
        line_height,
        em_width: width,
    };
    FontMetricsTable::build(layout, &vec![width; GLYPH_COUNT]).expect("uniform font fits its atlas")
}

#[allow(dead_code)]
pub fn textbox(width: f32, height: f32) -> TextBox {
    TextBox::new(Rect::new(0.0, 0.0, width, height), 0.0)
}

/// Run one processing step and return its result with everything it drew.
#[allow(dead_code)]
pub fn step(
    font: &FontMetricsTable,
    textbox: &mut TextBox,
    message: &mut Message,
    input: StepInput,
) -> (Result<bool>, GlyphBatch) {
    let mut batch = GlyphBatch::new();
    let result = {
        let mut ctx = RenderContext::new(&mut batch);
        process_text_box(font, textbox, message, &mut ctx, input)
    };
    (result, batch)
}

/// Tick until the box stops to wait for the player. Returns the frame that
/// halted it.
#[allow(dead_code)]
pub fn tick_until_halt(font: &FontMetricsTable, textbox: &mut TextBox, message: &mut Message) -> GlyphBatch {
    for _ in 0..10_000 {
        let (result, batch) = step(font, textbox, message, StepInput::tick(DT));
        result.expect("layout succeeds");
        if textbox.phase() == dialogue_typewriter::BoxPhase::AwaitingAdvance {
            return batch;
        }
    }
    panic!("textbox never halted at reveal index {}", message.reveal_index());
}

/// Write a 16x6 cell atlas PNG with `cell`-sized cells and a matching font
/// description into `dir`. Returns the font description's path.
#[allow(dead_code)]
pub fn write_font(dir: &Path, cell: u32) -> PathBuf {
    let atlas = image::RgbaImage::new(cell * 16, cell * 6);
    atlas.save(dir.join("font.png")).expect("write atlas");

    let widths = vec![cell; GLYPH_COUNT];
    let json = serde_json::json!({
        "texture": "font.png",
        "widths": widths,
        "heightChars": cell,
        "emWidth": cell,
    });
    let path = dir.join("font.json");
    std::fs::write(&path, json.to_string()).expect("write font");
    path
}
