//! Horizontal follow camera

/// Camera offset for a player at `player_x`.
///
/// `clamp(player_x - viewport_width * margin, 0, max(0, world_len - viewport_width))`.
/// A world narrower than the viewport pins the camera at 0.
pub fn camera_x(player_x: f32, viewport_width: f32, margin_fraction: f32, world_len: f32) -> f32 {
    let max_x = (world_len - viewport_width).max(0.0);
    (player_x - viewport_width * margin_fraction).clamp(0.0, max_x)
}

/// Cached camera offset, recomputed each frame after physics
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub margin_fraction: f32,
}

impl Camera {
    pub fn new(margin_fraction: f32) -> Self {
        Self {
            x: 0.0,
            margin_fraction,
        }
    }

    pub fn follow(&mut self, player_x: f32, viewport_width: f32, world_len: f32) {
        self.x = camera_x(player_x, viewport_width, self.margin_fraction, world_len);
    }

    /// World x to screen x
    pub fn to_screen(&self, world_x: f32) -> f32 {
        world_x - self.x
    }
}
