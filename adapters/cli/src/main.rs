#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a Warp Adventure session headlessly.

mod autopilot;
mod headless;
mod maze_map;
mod summary;

use std::{path::PathBuf, time::Duration};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use warp_adventure_core::RoomCoord;
use warp_adventure_rendering::{Color, Presentation, RenderingBackend, Scene};
use warp_adventure_session::{InputState, Key, Session, SessionConfig};
use warp_adventure_world::query;

use crate::{
    autopilot::Autopilot,
    headless::{render_ascii, HeadlessBackend},
    summary::{Narrator, RunSummary, SoundLog},
};

const ASCII_CELL: f32 = 20.0;

/// Plays a session with seeded autopilot input and reports how it went.
#[derive(Debug, Parser)]
#[command(name = "warp-adventure", version)]
struct Args {
    /// TOML file with session settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed overriding the configured one.
    #[arg(long)]
    seed: Option<u64>,
    /// Room side length in pixels overriding the configured one.
    #[arg(long)]
    room_size: Option<u32>,
    /// Wall-clock seconds to simulate.
    #[arg(long, default_value_t = 60.0)]
    seconds: f64,
    /// Render callbacks per simulated second.
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Print the maze before playing.
    #[arg(long)]
    print_maze: bool,
    /// Print the player's room after playing.
    #[arg(long)]
    print_room: bool,
    /// Emit the summary as JSON.
    #[arg(long)]
    json: bool,
}

/// Entry point for the Warp Adventure command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(room_size) = args.room_size {
        config.room_side_length = room_size;
    }
    ensure!(args.fps > 0, "--fps must be positive");
    ensure!(
        args.seconds.is_finite() && args.seconds >= 0.0,
        "--seconds must be a non-negative number"
    );

    let mut session = Session::new(&config).context("failed to start session")?;

    if args.print_maze {
        let world = session.world();
        println!(
            "{}",
            maze_map::render_maze(
                query::maze(world),
                RoomCoord::START,
                query::objective(world).room,
            )
        );
    }

    let frames = (args.seconds * f64::from(args.fps)).round() as u64;
    let frame_delta = Duration::from_secs_f64(1.0 / f64::from(args.fps));
    let backend = HeadlessBackend::new(frames, frame_delta, Autopilot::new(session.seed()));
    let presentation = Presentation::new(
        "Warp Adventure",
        Color::from_hex(0x000000),
        Scene::from_snapshot(&session.frame_snapshot()),
    );

    let mut input = InputState::default();
    let mut sounds = SoundLog::default();
    let mut narrator = Narrator::default();
    backend.run(presentation, |elapsed, frame_input, scene| {
        for name in &frame_input.released {
            if let Some(key) = Key::from_name(name) {
                input.key_up(key);
            }
        }
        for name in &frame_input.pressed {
            if let Some(key) = Key::from_name(name) {
                input.key_down(key);
            }
        }

        let _ = session.frame(elapsed, &mut input, &mut sounds, &mut narrator);
        *scene = Scene::from_snapshot(&session.frame_snapshot());
        narrator.presented().is_none()
    })?;

    let summary = RunSummary::collect(&session, &sounds, &narrator);
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("failed to encode summary")?
        );
    } else {
        println!("{summary}");
    }

    if args.print_room {
        print!(
            "{}",
            render_ascii(&Scene::from_snapshot(&session.frame_snapshot()), ASCII_CELL)
        );
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
