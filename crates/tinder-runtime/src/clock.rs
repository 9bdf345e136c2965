//! Frame clock with stall clamping

/// Upper bound on a single frame's delta, in seconds
pub const MAX_FRAME_DT: f64 = 0.05;

/// Tracks frame deltas from host-supplied timestamps (seconds)
pub struct FrameClock {
    /// Accumulated simulation time in seconds (sum of clamped deltas)
    pub total_time: f64,
    /// Clamped time since last frame in seconds
    pub delta_time: f64,
    /// Upper bound applied to every delta
    pub max_delta: f64,
    /// Timestamp of the previous frame
    last: Option<f64>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            max_delta: MAX_FRAME_DT,
            last: None,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to zero and take `now` as the previous frame time.
    pub fn start(&mut self, now: f64) {
        self.total_time = 0.0;
        self.delta_time = 0.0;
        self.last = Some(now);
    }

    /// Advance the clock. Call once per frame. Returns the clamped delta.
    pub fn tick(&mut self, now: f64) -> f64 {
        let elapsed = match self.last {
            Some(last) => now - last,
            None => 0.0,
        };
        self.last = Some(now);

        // Timestamps that go backwards count as a zero-length frame
        self.delta_time = elapsed.clamp(0.0, self.max_delta);
        self.total_time += self.delta_time;
        self.delta_time
    }
}
