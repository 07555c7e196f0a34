//! Headless dialogue typewriter simulator.
//!
//! Usage:
//!   typewriter-sim run scene.json                    # press advance every 30 frames
//!   typewriter-sim run scene.json --advance-at 40,90 # press on specific frames
//!   typewriter-sim run scene.json --dump-draws       # print draw commands as JSON
//!   typewriter-sim font font.json                    # validate a font description

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dialogue_typewriter::config::SceneConfig;
use dialogue_typewriter::host::{FixedClock, ScriptedAdvance};
use dialogue_typewriter::texture::TextureManager;
use dialogue_typewriter::{Dialogue, DialogueStatus, FontConfig, GlyphBatch, RenderContext, StepInput};

#[derive(Parser)]
#[command(name = "typewriter-sim")]
#[command(about = "Run dialogue typewriter scenes without a window")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a scene frame by frame and print the textbox state
    Run {
        /// Scene JSON file
        scene: PathBuf,

        /// Number of frames to simulate
        #[arg(long, default_value_t = 600)]
        frames: u64,

        /// Seconds per frame
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,

        /// Press advance every N frames
        #[arg(long, conflicts_with = "advance_at")]
        advance_every: Option<u64>,

        /// Press advance on these zero-based frames
        #[arg(long, value_delimiter = ',')]
        advance_at: Vec<u64>,

        /// Print every frame's draw commands as JSON
        #[arg(long)]
        dump_draws: bool,
    },

    /// Load a font description and summarize its glyph table
    Font {
        /// Font JSON file
        font: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run { scene, frames, dt, advance_every, advance_at, dump_draws } => {
            let advance = match (advance_every, advance_at.is_empty()) {
                (Some(n), _) => ScriptedAdvance::every(n),
                (None, false) => ScriptedAdvance::at(advance_at),
                (None, true) => ScriptedAdvance::every(30),
            };
            run_scene(&scene, frames, FixedClock::new(dt), advance, dump_draws)?;
        }
        Commands::Font { font } => describe_font(&font)?,
    }
    Ok(())
}

fn run_scene(
    path: &Path,
    frames: u64,
    clock: FixedClock,
    mut advance: ScriptedAdvance,
    dump_draws: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let scene = SceneConfig::load(path)?;
    let mut textures = TextureManager::new();
    let font = FontConfig::load(&scene.font)?.build(&mut textures)?;
    let mut dialogue = Dialogue::new(scene.textbox(), scene.messages());
    let mut batch = GlyphBatch::with_capacity(256);
    let mut last_state = None;

    println!("Scene {}: {} messages", path.display(), dialogue.remaining());

    for frame in 0..frames {
        batch.clear();
        let input = StepInput::sample(&clock, &mut advance);
        let status = {
            let mut ctx = RenderContext::new(&mut batch).with_offset(scene.render_offset);
            match dialogue.step(&font, &mut ctx, input) {
                Ok(status) => status,
                Err(e) if e.is_layout_fatal() => {
                    tracing::error!("Aborting dialogue at frame {}: {}", frame, e);
                    dialogue.abort();
                    return Err(e.into());
                }
                Err(e) => return Err(e.into()),
            }
        };

        if dump_draws {
            println!("{}", serde_json::to_string(&batch)?);
        }

        let tb = dialogue.textbox();
        let reveal = dialogue.current().map(|m| m.reveal_index());
        let state = (tb.phase(), reveal, tb.scroll_offset_y().to_bits(), dialogue.remaining());
        if last_state != Some(state) || input.advance {
            println!(
                "frame {:>5}{} {:?} reveal={} offset={} pending={} | {}",
                frame,
                if input.advance { " [advance]" } else { "" },
                tb.phase(),
                reveal.map_or_else(|| "-".to_string(), |r| r.to_string()),
                tb.scroll_offset_y(),
                tb.lines_pending_scroll(),
                batch.visible_lines().join(" / "),
            );
            last_state = Some(state);
        }

        match status {
            DialogueStatus::Typing => {}
            DialogueStatus::MessageFinished { remaining } => {
                println!("frame {:>5} message done, {} left", frame, remaining);
            }
            DialogueStatus::Finished => {
                println!("frame {:>5} dialogue finished", frame);
                return Ok(());
            }
        }
    }

    println!("Stopped after {} frames with {} messages left", frames, dialogue.remaining());
    Ok(())
}

fn describe_font(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = FontConfig::load(path)?;
    let mut textures = TextureManager::new();
    let font = config.build(&mut textures)?;
    let atlas = textures.require(font.texture())?;

    println!("Font {}", path.display());
    println!("  atlas:       {} ({}x{})", atlas.path.display(), atlas.width, atlas.height);
    println!("  glyphs:      {}", font.len());
    println!("  line height: {}", font.line_height());
    if let Some((i, widest)) = font
        .glyphs()
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.width().total_cmp(&b.1.width()))
    {
        println!("  widest:      {:?} ({}px)", char::from(b' ' + i as u8), widest.width());
    }
    Ok(())
}
