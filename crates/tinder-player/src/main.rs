//! Tinder Player - Standalone game player binary
//!
//! Usage:
//!   tinder-player [--variant classic|sprint|runner] [--config <game.toml>] [--fullscreen]
//!   tinder-player --headless [--frames N] [--screenshot out.png]

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tinder_core::Viewport;
use tinder_game::GameConfig;
use tinder_player::{run_headless, AnyGame, PlayerApp, Variant};
use tinder_render::SceneRenderer;
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Parser)]
#[command(name = "tinder-player")]
#[command(about = "Tinder game player - side-scrolling platformer and lane runner")]
struct Args {
    /// Game to play
    #[arg(long, value_enum, default_value_t = Variant::Classic)]
    variant: Variant,

    /// Path to a TOML game config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Runner RNG seed (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Launch in fullscreen mode
    #[arg(long)]
    fullscreen: bool,

    /// Run without a window, holding "right" for a fixed number of frames
    #[arg(long)]
    headless: bool,

    /// Frames to simulate in headless mode (60 per second)
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Write a PNG of the last headless frame
    #[arg(long)]
    screenshot: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    }
    .sanitized();
    if let Some(seed) = args.seed {
        config.runner.seed = seed;
    }

    if args.headless {
        let mut game = AnyGame::new(args.variant, &config, Viewport::default());
        let mut renderer = SceneRenderer::new();
        let report = run_headless(
            &mut game,
            &mut renderer,
            args.frames,
            args.screenshot.as_deref(),
        )
        .context("Headless run failed")?;
        println!(
            "{:?}: {} frames, {} {}",
            args.variant,
            report.frames,
            report.hud.clock,
            match report.outcome {
                Some(outcome) => format!("{:?}", outcome),
                None => "still running".to_string(),
            }
        );
        return Ok(());
    }

    println!("Controls:");
    println!("  Enter          - Start");
    println!("  Left/Right A/D - Move");
    println!("  Space/Up/W     - Jump");
    println!("  Up/Down W/S    - Change lane (runner)");
    println!("  R              - Restart after a round");
    println!("  F11            - Toggle fullscreen");
    println!("  Escape         - Exit");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = PlayerApp::new(args.variant, &config, args.fullscreen);
    event_loop.run_app(&mut app)?;

    Ok(())
}
