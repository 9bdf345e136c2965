//! Game events emitted by the loop and the simulations

use crate::lifecycle::Outcome;

/// One-way HUD values pushed to the presentation layer after each frame
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HudSnapshot {
    /// Elapsed round time as `MM:SS`
    pub clock: String,
    /// Course progress in percent (platformer)
    pub progress: Option<f32>,
    /// Remaining lives (runner)
    pub lives: Option<u32>,
    /// Collected coins (runner)
    pub coins: Option<u32>,
}

/// Overlay lifecycle signals for the presentation layer
#[derive(Clone, Debug, PartialEq)]
pub enum OverlaySignal {
    ShowStart,
    ShowEnd { outcome: Outcome, elapsed: f64 },
    Hide,
}

/// Events that systems push to the bus and consumers drain
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// A round began running
    Started,
    /// All state was returned to its initial values
    Reset,
    /// The round reached a terminal state
    Ended { outcome: Outcome, elapsed: f64 },
    /// The player left the ground
    Jumped,
    /// The runner player switched lanes
    LaneChanged { lane: usize },
    /// The player was hit (platformer death or runner life lost)
    PlayerHit { lives_left: u32 },
    /// A runner coin was collected
    CoinCollected { total: u32 },
    /// The platformer goal was touched
    GoalReached,
    /// Per-frame HUD values
    Hud(HudSnapshot),
    /// Overlay show/hide request
    Overlay(OverlaySignal),
}
