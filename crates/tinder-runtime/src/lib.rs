//! Tinder Runtime - Game loop infrastructure
//!
//! Provides the core game loop building blocks:
//! - `FrameClock` — wall-clock frame delta with stall clamping
//! - `InputState` — per-action press state machine with key and touch bindings
//! - `GameEvent` / `EventBus` — typed event queue drained by presentation and audio
//! - `Lifecycle` — idle → running → ended state machine
//! - `FrameScheduler` — cancellable per-frame callback ticket
//! - `Simulation` — trait for the game variants ticked by the loop
//! - `GameLoop` — orchestrates one frame: clock, input, terminal check, update, HUD

mod clock;
mod event;
mod event_bus;
mod game_loop;
mod input;
mod lifecycle;
mod schedule;
mod system;

pub use clock::{FrameClock, MAX_FRAME_DT};
pub use event::{GameEvent, HudSnapshot, OverlaySignal};
pub use event_bus::EventBus;
pub use game_loop::{FrameResult, GameLoop};
pub use input::{Action, ActionState, InputSource, InputState};
pub use lifecycle::{Lifecycle, Outcome, Phase};
pub use schedule::{FrameScheduler, FrameTicket};
pub use system::{FrameContext, Simulation};
