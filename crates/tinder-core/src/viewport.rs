//! Host viewport description

/// Fraction of the viewport height where the floor line sits
const FLOOR_FRACTION: f32 = 0.82;

/// Logical viewport supplied by the host window.
///
/// Sizes are in logical units; `dpr` scales them to physical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub dpr: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            dpr: 1.0,
        }
    }
}

impl Viewport {
    /// Degenerate sizes clamp to 1 and the pixel ratio clamps into `[1, 2]`.
    pub fn new(width: f32, height: f32, dpr: f32) -> Self {
        let sane = |v: f32| if v.is_finite() { v.max(1.0) } else { 1.0 };
        let dpr = if dpr.is_finite() { dpr.clamp(1.0, 2.0) } else { 1.0 };
        Self {
            width: sane(width),
            height: sane(height),
            dpr,
        }
    }

    /// The y coordinate of the ground line
    pub fn floor_y(&self) -> f32 {
        (self.height * FLOOR_FRACTION).floor()
    }

    /// Height of the painted ground strip below the floor line
    pub fn ground_height(&self) -> f32 {
        (self.height * 0.18).floor().max(32.0)
    }

    /// Physical pixel size of the backing surface
    pub fn physical_size(&self) -> (u32, u32) {
        (
            (self.width * self.dpr).floor() as u32,
            (self.height * self.dpr).floor() as u32,
        )
    }
}
