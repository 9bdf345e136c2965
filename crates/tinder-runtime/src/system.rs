//! Simulation trait

use crate::event::HudSnapshot;
use crate::event_bus::EventBus;
use crate::input::InputState;
use crate::lifecycle::Outcome;
use tinder_core::Viewport;

/// Per-frame data handed to a simulation's update
pub struct FrameContext<'a> {
    /// Clamped frame delta in seconds
    pub dt: f32,
    /// Accumulated simulation time in seconds, including this frame
    pub time: f64,
    pub input: &'a InputState,
    pub events: &'a mut EventBus,
}

/// A game variant driven by [`GameLoop`](crate::GameLoop)
///
/// The loop owns the simulation and calls into it in a fixed order each
/// frame: `terminal` first, then `update` if the round is still live.
/// `update` runs physics, AI, collisions and the camera, in that order.
pub trait Simulation {
    /// Human-readable name for this variant
    fn name(&self) -> &str;

    /// Return every entity, timer and world value to its initial state
    fn reset(&mut self);

    /// Recompute viewport-derived values (floor line, lanes)
    fn resize(&mut self, viewport: &Viewport);

    /// Advance one frame
    fn update(&mut self, ctx: &mut FrameContext<'_>);

    /// The terminal outcome, if the round is over
    fn terminal(&self) -> Option<Outcome>;

    /// HUD values for the frame just simulated
    fn hud(&self, elapsed: f64) -> HudSnapshot;
}
