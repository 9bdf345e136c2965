//! Variant selection and a loop wrapper over both game kinds

use tinder_core::Viewport;
use tinder_game::{GameConfig, Platformer, PlatformerConfig, Runner};
use tinder_render::{Frame, SceneRenderer};
use tinder_runtime::{Action, FrameResult, GameEvent, GameLoop, InputState, Phase};

/// Game selectable from the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Variant {
    /// Two-minute side-scrolling course
    Classic,
    /// One-minute course with faster patrols
    Sprint,
    /// Three-lane endless runner
    Runner,
}

impl Variant {
    pub fn title(self) -> &'static str {
        match self {
            Variant::Classic => "Tinder: Classic",
            Variant::Sprint => "Tinder: Sprint",
            Variant::Runner => "Tinder: Runner",
        }
    }

    /// Headline of the end panel after a win
    pub fn win_title(self) -> &'static str {
        match self {
            Variant::Classic | Variant::Sprint => "You reached the goal!",
            Variant::Runner => "You collected every coin!",
        }
    }
}

/// A game loop over either simulation kind
pub enum AnyGame {
    Platformer(GameLoop<Platformer>),
    Runner(GameLoop<Runner>),
}

macro_rules! each {
    ($self:expr, $game:ident => $body:expr) => {
        match $self {
            AnyGame::Platformer($game) => $body,
            AnyGame::Runner($game) => $body,
        }
    };
}

impl AnyGame {
    pub fn new(variant: Variant, config: &GameConfig, viewport: Viewport) -> Self {
        match variant {
            Variant::Classic => Self::Platformer(GameLoop::new(
                Platformer::new(config.platformer.clone(), &config.camera),
                viewport,
            )),
            Variant::Sprint => {
                let sprint = PlatformerConfig {
                    movement: config.platformer.movement.clone(),
                    ..PlatformerConfig::sprint()
                };
                Self::Platformer(GameLoop::new(
                    Platformer::new(sprint, &config.camera),
                    viewport,
                ))
            }
            Variant::Runner => {
                Self::Runner(GameLoop::new(Runner::new(config.runner.clone()), viewport))
            }
        }
    }

    pub fn phase(&self) -> Phase {
        each!(self, g => g.phase())
    }

    pub fn wants_frame(&self) -> bool {
        each!(self, g => g.wants_frame())
    }

    pub fn elapsed(&self) -> f64 {
        each!(self, g => g.elapsed())
    }

    pub fn viewport(&self) -> Viewport {
        each!(self, g => *g.viewport())
    }

    pub fn input(&self) -> &InputState {
        each!(self, g => g.input())
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        each!(self, g => g.input_mut())
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        each!(self, g => g.drain_events())
    }

    pub fn start(&mut self, now: f64) -> bool {
        each!(self, g => g.start(now))
    }

    pub fn restart(&mut self, now: f64) -> bool {
        self.input_mut().release_all();
        each!(self, g => g.restart(now))
    }

    /// Start from Idle or restart from Ended when `action` asks for it.
    /// Returns whether the round changed.
    pub fn apply_round_action(&mut self, action: Action, now: f64) -> bool {
        match (action, self.phase()) {
            (Action::Start, Phase::Idle) => self.start(now),
            (Action::Restart | Action::Start, Phase::Ended(_)) => self.restart(now),
            _ => false,
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        each!(self, g => g.resize(viewport))
    }

    pub fn tick(&mut self, now: f64) -> FrameResult {
        each!(self, g => g.tick(now))
    }

    /// Build the display list for the current state
    pub fn draw(&self, renderer: &mut SceneRenderer) -> Frame {
        match self {
            AnyGame::Platformer(g) => renderer.draw_platformer(g.simulation()),
            AnyGame::Runner(g) => renderer.draw_runner(g.simulation()),
        }
    }
}
