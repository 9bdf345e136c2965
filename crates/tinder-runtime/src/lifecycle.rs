//! Round lifecycle state machine: Idle → Running → Ended.
//!
//! Transitions are methods that return `false` when they do not apply to
//! the current phase, leaving the phase untouched.

/// How a round ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

/// Current lifecycle phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Before start; the start overlay is showing
    Idle,
    /// Simulating and rendering every frame
    Running,
    /// Terminal; simulation frozen until restart
    Ended(Outcome),
}

#[derive(Debug)]
pub struct Lifecycle {
    phase: Phase,
    rounds_started: u32,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            rounds_started: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// The outcome of the last round, if it has ended
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Number of rounds started since creation
    pub fn rounds_started(&self) -> u32 {
        self.rounds_started
    }

    /// Idle → Running
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.phase = Phase::Running;
        self.rounds_started += 1;
        true
    }

    /// Running → Ended
    pub fn end(&mut self, outcome: Outcome) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.phase = Phase::Ended(outcome);
        true
    }

    /// Any phase → Idle
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }
}
