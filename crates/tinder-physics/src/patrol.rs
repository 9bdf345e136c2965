//! Patrol AI: constant-speed sweep between two x bounds

use tinder_core::{Rect, Vec2};

/// An enemy bouncing between `min_x` and `max_x`.
///
/// The whole rectangle stays inside the patrol range: `x` is kept within
/// `[min_x, max_x - w]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Patrol {
    pub pos: Vec2,
    pub size: Vec2,
    /// Signed horizontal velocity
    pub vx: f32,
    pub min_x: f32,
    pub max_x: f32,
    /// Absolute patrol speed
    pub speed: f32,
    start_x: f32,
}

impl Patrol {
    pub fn new(start: Vec2, size: Vec2, min_x: f32, max_x: f32, speed: f32) -> Self {
        let speed = speed.abs();
        let max_x = max_x.max(min_x + size.x);
        let start_x = start.x.clamp(min_x, max_x - size.x);
        Self {
            pos: Vec2::new(start_x, start.y),
            size,
            vx: speed,
            min_x,
            max_x,
            speed,
            start_x,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Back to the spawn position, heading right
    pub fn reset(&mut self) {
        self.pos.x = self.start_x;
        self.vx = self.speed;
    }

    /// Advance by `dt` seconds. Returns true if the direction flipped.
    pub fn step(&mut self, dt: f32) -> bool {
        self.pos.x += self.vx * dt;
        if self.pos.x < self.min_x {
            self.pos.x = self.min_x;
            self.vx = self.speed;
            return true;
        }
        if self.pos.x + self.size.x > self.max_x {
            self.pos.x = self.max_x - self.size.x;
            self.vx = -self.speed;
            return true;
        }
        false
    }
}
