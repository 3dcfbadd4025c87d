// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debug overlay for a dummy 2D simulation engine.
//!
//! Runs a random walk on a producer thread and shows its shapes and measures in a Vello
//! window, or with `--svg` writes a single frame to disk without opening a window.

mod sim;
mod svg;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use simscope_display::DisplayState;
use simscope_layout::{CardStyle, FrameComposer, HeuristicTextMeasurer, Size};
use simscope_vello::{RedrawPolicy, Viewer, ViewerOptions};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::sim::{BOUNDS, RandomWalk};

#[derive(Debug, Parser)]
#[command(version, about = "Random-walk simulation shown through the Simscope overlay")]
struct Args {
    /// Number of circles to draw.
    #[arg(long, visible_alias = "no", default_value_t = 100)]
    count: usize,
    /// Number of triangles per circle.
    #[arg(long, default_value_t = 16)]
    res: usize,
    /// Simulation ticks per second.
    #[arg(long, default_value_t = 120, value_parser = clap::value_parser!(u32).range(1..))]
    rate: u32,
    /// Random seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Write one frame to this SVG file instead of opening a window.
    #[arg(long, value_name = "PATH")]
    svg: Option<PathBuf>,
    /// Ticks to simulate before the SVG frame is taken.
    #[arg(long, default_value_t = 240)]
    steps: usize,
    /// Frame width in logical pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,
    /// Frame height in logical pixels.
    #[arg(long, default_value_t = 800.0)]
    height: f64,
    /// Redraw only when the simulation published something new.
    #[arg(long)]
    on_change: bool,
    /// Font family for overlay text; falls back to sans-serif.
    #[arg(long, value_name = "FAMILY")]
    font: Option<String>,
    /// Card value size as a multiple of the text size.
    #[arg(long, default_value_t = 3.5)]
    value_scale: f64,
}

impl Args {
    fn card_style(&self) -> CardStyle {
        CardStyle::default().with_value_scale(self.value_scale)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    info!(
        circles = args.count,
        triangles = args.res,
        seed = args.seed,
        "running an example of debugging a 2D simulation engine"
    );

    let state = Arc::new(DisplayState::new());
    state.set_bounds(BOUNDS);
    let walk = RandomWalk::new(args.count, args.res, args.seed);

    match &args.svg {
        Some(path) => write_svg(&args, &state, walk, path),
        None => run_window(&args, state, walk),
    }
}

fn write_svg(args: &Args, state: &DisplayState, mut walk: RandomWalk, path: &Path) -> Result<()> {
    for _ in 0..args.steps {
        let stats = walk.step();
        walk.publish(state, &stats);
    }
    let frame = FrameComposer::default()
        .with_card_style(args.card_style())
        .compose(
            &state.snapshot(),
            Size::new(args.width, args.height),
            &HeuristicTextMeasurer,
        );
    std::fs::write(path, svg::frame_to_svg(&frame))
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), steps = args.steps, "wrote frame");
    Ok(())
}

fn run_window(args: &Args, state: Arc<DisplayState>, walk: RandomWalk) -> Result<()> {
    let stop = Arc::new(AtomicBool::new(false));
    let producer = sim::spawn_producer(state.clone(), walk, args.rate, stop.clone())
        .context("failed to start the simulation thread")?;

    let redraw = if args.on_change {
        RedrawPolicy::OnChange {
            poll: Duration::from_secs(1) / args.rate,
        }
    } else {
        RedrawPolicy::Continuous
    };
    let mut options = ViewerOptions::default()
        .with_title("Simscope example")
        .with_initial_size(Size::new(args.width, args.height))
        .with_card_style(args.card_style())
        .with_redraw(redraw);
    if let Some(family) = &args.font {
        options = options.with_font_family(family.clone());
    }
    let result = Viewer::with_state(state, options).run();

    stop.store(true, Ordering::Release);
    match producer.join() {
        Ok(ticks) => info!(ticks, "simulation stopped"),
        Err(_) => warn!("simulation thread panicked"),
    }
    result.context("viewer failed")
}
