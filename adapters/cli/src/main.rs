#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the grid sketches.

mod config;
mod headless;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use grid_sketch_rendering::{Color, Key, Presentation, RenderingBackend, SketchMode};
use grid_sketch_rendering_macroquad::MacroquadBackend;
use grid_sketch_system_sketches::{Shell, SketchKind};

#[derive(Debug, Parser)]
#[command(name = "grid-sketch")]
#[command(about = "Square and hex grid sketches with key-driven and autonomous entities")]
struct Args {
    /// Sketch shown first: basic, chaser, hex-grid, hexagon or 1-4
    #[arg(long, default_value_t = SketchKind::Basic)]
    mode: SketchKind,

    /// TOML file with sketch settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for wall placement and chaser detours
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final frame as text instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Frames to simulate in headless mode
    #[arg(long, default_value_t = 1)]
    frames: u64,

    /// Comma-separated keys tapped one per frame in headless mode
    #[arg(long, value_delimiter = ',')]
    keys: Vec<Key>,

    /// Pixels per layout unit
    #[arg(long)]
    scale: Option<f32>,

    /// Disable vsync
    #[arg(long)]
    no_vsync: bool,
}

/// Entry point for the grid sketch command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = config::load(
        args.config.as_deref(),
        config::Overrides {
            seed: args.seed,
            scale: args.scale,
        },
    )?;
    let mut shell = Shell::new(&config, args.mode).context("failed to lay out the sketches")?;
    log::info!("starting sketch {} (seed {})", shell.title(), config.seed);

    if args.headless {
        print!("{}", headless::run(shell, args.frames, &args.keys));
        return Ok(());
    }

    let presentation = Presentation::new("Grid sketch", Color::BLACK, config.scale)
        .context("failed to describe the window")?;
    let backend = MacroquadBackend::default().with_swap_interval(args.no_vsync.then_some(0));
    backend.run(presentation, move |input, scene| shell.frame(&input, scene))
}
