//! Timed spawn scheduling sampled against simulation time

use super::EntityKind;
use rand::Rng;

/// One spawn stream with a "next spawn time" scalar.
///
/// Delays are drawn uniformly from `delay` and divided by the current
/// speed scale, so cadence tightens as the run speeds up.
#[derive(Clone, Debug, PartialEq)]
pub struct Spawner {
    pub kind: EntityKind,
    delay: [f64; 2],
    next_at: f64,
}

impl Spawner {
    pub fn new(kind: EntityKind, delay: [f64; 2]) -> Self {
        Self {
            kind,
            delay,
            next_at: f64::INFINITY,
        }
    }

    /// Simulation time of the next spawn
    pub fn next_at(&self) -> f64 {
        self.next_at
    }

    /// Schedule the first spawn of a round
    pub fn reset<R: Rng>(&mut self, now: f64, rng: &mut R) {
        self.next_at = now + self.sample_delay(1.0, rng);
    }

    /// Fire if due, rescheduling from `now`. Fires at most once per call.
    pub fn poll<R: Rng>(&mut self, now: f64, speed_scale: f64, rng: &mut R) -> bool {
        if now < self.next_at {
            return false;
        }
        self.next_at = now + self.sample_delay(speed_scale, rng);
        true
    }

    fn sample_delay<R: Rng>(&self, speed_scale: f64, rng: &mut R) -> f64 {
        let [lo, hi] = self.delay;
        let base = if hi > lo { rng.random_range(lo..hi) } else { lo };
        base / speed_scale.max(1.0)
    }
}
