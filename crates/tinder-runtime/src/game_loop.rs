//! Game loop orchestration
//!
//! One [`GameLoop::tick`] is one frame: consume the scheduled ticket, advance
//! the clock, fold input, check the terminal condition, update the
//! simulation, push HUD values and reschedule. The host renders from
//! [`GameLoop::simulation`] after each tick and only calls `tick` again when
//! [`GameLoop::wants_frame`] is true.

use crate::clock::FrameClock;
use crate::event::{GameEvent, OverlaySignal};
use crate::event_bus::EventBus;
use crate::input::InputState;
use crate::lifecycle::{Lifecycle, Outcome, Phase};
use crate::schedule::FrameScheduler;
use crate::system::{FrameContext, Simulation};
use tinder_core::Viewport;

/// What a call to [`GameLoop::tick`] did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameResult {
    /// No frame was scheduled (stale callback, idle or ended)
    Skipped,
    /// The simulation advanced one frame
    Advanced,
    /// A terminal condition was found; nothing was simulated
    Ended(Outcome),
}

pub struct GameLoop<S: Simulation> {
    sim: S,
    lifecycle: Lifecycle,
    clock: FrameClock,
    scheduler: FrameScheduler,
    input: InputState,
    events: EventBus,
    viewport: Viewport,
    /// Wall-clock timestamp of the current round's start
    start_time: f64,
    /// Wall-clock seconds since start, frozen at the end of a round
    elapsed: f64,
}

impl<S: Simulation> GameLoop<S> {
    pub fn new(mut sim: S, viewport: Viewport) -> Self {
        sim.resize(&viewport);
        sim.reset();

        let mut events = EventBus::new();
        events.push(GameEvent::Overlay(OverlaySignal::ShowStart));

        Self {
            sim,
            lifecycle: Lifecycle::new(),
            clock: FrameClock::new(),
            scheduler: FrameScheduler::new(),
            input: InputState::new(),
            events,
            viewport,
            start_time: 0.0,
            elapsed: 0.0,
        }
    }

    pub fn simulation(&self) -> &S {
        &self.sim
    }

    pub fn simulation_mut(&mut self) -> &mut S {
        &mut self.sim
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Wall-clock seconds since the round started
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Accumulated (clamped) simulation time of the current round
    pub fn sim_time(&self) -> f64 {
        self.clock.total_time
    }

    /// Whether the host should deliver another frame callback
    pub fn wants_frame(&self) -> bool {
        self.scheduler.is_scheduled()
    }

    /// Drain events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Idle → Running. Returns false outside the Idle phase.
    pub fn start(&mut self, now: f64) -> bool {
        if !self.lifecycle.start() {
            return false;
        }
        self.clock.start(now);
        self.input.clear_edges();
        self.start_time = now;
        self.elapsed = 0.0;
        self.scheduler.schedule();

        self.events
            .push_all([GameEvent::Overlay(OverlaySignal::Hide), GameEvent::Started]);
        tracing::info!(
            "{}: round {} started",
            self.sim.name(),
            self.lifecycle.rounds_started()
        );
        true
    }

    /// Any phase → Idle with all simulation state re-initialized
    pub fn reset(&mut self) {
        self.scheduler.cancel();
        self.lifecycle.reset();
        self.sim.reset();
        self.input.clear_edges();
        self.clock = FrameClock::new();
        self.start_time = 0.0;
        self.elapsed = 0.0;

        self.events.push(GameEvent::Reset);
        tracing::debug!("{}: reset", self.sim.name());
    }

    /// Reset and immediately start a new round
    pub fn restart(&mut self, now: f64) -> bool {
        self.reset();
        self.start(now)
    }

    /// React to a host viewport change
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        tracing::debug!(
            "viewport {}x{} @{}",
            viewport.width,
            viewport.height,
            viewport.dpr
        );
        self.viewport = viewport;
        self.sim.resize(&viewport);
    }

    /// Run one frame at wall-clock time `now` (seconds)
    pub fn tick(&mut self, now: f64) -> FrameResult {
        if self.scheduler.take().is_none() || !self.lifecycle.is_running() {
            return FrameResult::Skipped;
        }

        let dt = self.clock.tick(now);
        self.input.begin_frame();

        if let Some(outcome) = self.sim.terminal() {
            self.end(outcome);
            return FrameResult::Ended(outcome);
        }

        let mut ctx = FrameContext {
            dt: dt as f32,
            time: self.clock.total_time,
            input: &self.input,
            events: &mut self.events,
        };
        self.sim.update(&mut ctx);

        self.elapsed = (now - self.start_time).max(0.0);
        self.events.push(GameEvent::Hud(self.sim.hud(self.elapsed)));

        self.scheduler.schedule();
        FrameResult::Advanced
    }

    fn end(&mut self, outcome: Outcome) {
        if !self.lifecycle.end(outcome) {
            return;
        }
        self.scheduler.cancel();

        let elapsed = self.elapsed;
        self.events.push(GameEvent::Ended { outcome, elapsed });
        self.events
            .push(GameEvent::Overlay(OverlaySignal::ShowEnd { outcome, elapsed }));
        tracing::info!(
            "{}: round ended ({:?}) after {}",
            self.sim.name(),
            outcome,
            tinder_core::format_clock(elapsed)
        );
    }
}
