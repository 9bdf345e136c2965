//! Windowless run: fixed frame count at 60 Hz with "hold right" input

use crate::game::AnyGame;
use std::path::Path;
use tinder_core::Result;
use tinder_render::{rasterize, save_png, SceneRenderer};
use tinder_runtime::{FrameResult, GameEvent, HudSnapshot, Outcome};
use winit::keyboard::KeyCode;

const FRAME_DT: f64 = 1.0 / 60.0;

/// What a headless run reached
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessReport {
    /// Frames that advanced the simulation
    pub frames: u32,
    pub outcome: Option<Outcome>,
    pub elapsed: f64,
    pub hud: HudSnapshot,
}

/// Run up to `frames` frames, stopping early at a terminal outcome.
/// Writes a PNG of the last frame to `screenshot` if given.
pub fn run_headless(
    game: &mut AnyGame,
    renderer: &mut SceneRenderer,
    frames: u32,
    screenshot: Option<&Path>,
) -> Result<HeadlessReport> {
    let mut report = HeadlessReport {
        frames: 0,
        outcome: None,
        elapsed: 0.0,
        hud: HudSnapshot::default(),
    };

    game.start(0.0);
    game.input_mut().process_key_down(KeyCode::ArrowRight);

    for i in 1..=frames {
        let result = game.tick(f64::from(i) * FRAME_DT);
        for event in game.drain_events() {
            if let GameEvent::Hud(hud) = event {
                report.hud = hud;
            }
        }
        match result {
            FrameResult::Advanced => report.frames += 1,
            FrameResult::Ended(outcome) => {
                report.outcome = Some(outcome);
                break;
            }
            FrameResult::Skipped => break,
        }
    }
    report.elapsed = game.elapsed();

    match report.outcome {
        Some(outcome) => tracing::info!(
            "headless run ended {:?} after {} frames ({:.2}s)",
            outcome,
            report.frames,
            report.elapsed
        ),
        None => tracing::info!(
            "headless run still running after {} frames ({:.2}s)",
            report.frames,
            report.elapsed
        ),
    }

    if let Some(path) = screenshot {
        let image = rasterize(&game.draw(renderer));
        save_png(&image, path)?;
    }
    Ok(report)
}
