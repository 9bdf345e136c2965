//! Player body integrator (semi-implicit Euler against a flat floor)

use serde::{Deserialize, Serialize};
use tinder_core::{Rect, Vec2};

/// Movement constants. Units are world units and seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementParams {
    /// Downward acceleration
    pub gravity: f32,
    /// Per-frame horizontal velocity multiplier with no input, in (0, 1)
    pub friction: f32,
    /// Absolute horizontal speed bound
    pub max_dx: f32,
    /// Initial upward speed of a jump
    pub jump_v: f32,
    /// Horizontal speed while a direction is held
    pub walk_speed: f32,
}

impl Default for MovementParams {
    fn default() -> Self {
        Self {
            gravity: 1200.0,
            friction: 0.86,
            max_dx: 220.0,
            jump_v: 420.0,
            walk_speed: 120.0,
        }
    }
}

/// A moving axis-aligned body
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub on_ground: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            on_ground: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// World limits the body is resolved against
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// y of the floor line; the body rests with its bottom edge here
    pub floor_y: f32,
    /// Horizontal extent of the world, starting at 0
    pub world_len: f32,
}

/// Input for one step
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub left: bool,
    pub right: bool,
    /// One-shot jump request (true only on the frame the press began)
    pub jump: bool,
}

/// What happened during a step
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub jumped: bool,
    pub landed: bool,
}

/// Advance `body` by `dt` seconds.
///
/// Order: horizontal input or friction, jump, speed clamp, gravity,
/// integration, floor resolution, world clamp.
pub fn step_body(
    body: &mut Body,
    input: MoveInput,
    params: &MovementParams,
    bounds: &Bounds,
    dt: f32,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();

    if input.left && !input.right {
        body.vel.x = -params.walk_speed;
    } else if input.right && !input.left {
        body.vel.x = params.walk_speed;
    } else {
        body.vel.x *= params.friction;
    }

    if input.jump && body.on_ground {
        body.vel.y = -params.jump_v;
        body.on_ground = false;
        outcome.jumped = true;
    }

    body.vel.x = body.vel.x.clamp(-params.max_dx, params.max_dx);
    body.vel.y += params.gravity * dt;
    body.pos.x += body.vel.x * dt;
    body.pos.y += body.vel.y * dt;

    if body.pos.y + body.size.y >= bounds.floor_y {
        body.pos.y = bounds.floor_y - body.size.y;
        body.vel.y = 0.0;
        outcome.landed = !body.on_ground;
        body.on_ground = true;
    }

    let max_x = (bounds.world_len - body.size.x).max(0.0);
    body.pos.x = body.pos.x.clamp(0.0, max_x);

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds {
        floor_y: 500.0,
        world_len: 14400.0,
    };

    fn resting_body() -> Body {
        let mut body = Body::new(Vec2::new(40.0, 452.0), Vec2::new(28.0, 48.0));
        body.on_ground = true;
        body
    }

    #[test]
    fn test_resting_equilibrium() {
        let params = MovementParams::default();
        for dt in [1e-4, 0.001, 0.016, 0.033, 0.05] {
            let mut body = resting_body();
            let before = body.pos;
            step_body(&mut body, MoveInput::default(), &params, &BOUNDS, dt);
            assert_eq!(body.vel.y, 0.0);
            assert_eq!(body.pos, before);
            assert!(body.on_ground);
        }
    }

    #[test]
    fn test_walk_snaps_to_speed() {
        let params = MovementParams::default();
        let mut body = resting_body();
        let input = MoveInput {
            right: true,
            ..Default::default()
        };
        step_body(&mut body, input, &params, &BOUNDS, 0.016);
        assert_eq!(body.vel.x, params.walk_speed);
        assert!((body.pos.x - (40.0 + 120.0 * 0.016)).abs() < 1e-4);
    }

    #[test]
    fn test_both_directions_apply_friction() {
        let params = MovementParams::default();
        let mut body = resting_body();
        body.vel.x = 100.0;
        let input = MoveInput {
            left: true,
            right: true,
            jump: false,
        };
        step_body(&mut body, input, &params, &BOUNDS, 0.016);
        assert!((body.vel.x - 86.0).abs() < 1e-4);
    }

    #[test]
    fn test_friction_decays_monotonically() {
        let params = MovementParams::default();
        for start in [150.0_f32, -150.0] {
            let mut body = resting_body();
            body.pos.x = 5000.0;
            body.vel.x = start;
            let mut prev = body.vel.x;
            for _ in 0..300 {
                step_body(&mut body, MoveInput::default(), &params, &BOUNDS, 0.016);
                assert!(body.vel.x.abs() <= prev.abs());
                assert!(body.vel.x == 0.0 || body.vel.x.signum() == start.signum());
                prev = body.vel.x;
            }
            assert!(body.vel.x.abs() < 1e-6);
        }
    }

    #[test]
    fn test_speed_clamped() {
        let params = MovementParams {
            walk_speed: 900.0,
            ..Default::default()
        };
        let mut body = resting_body();
        let input = MoveInput {
            left: true,
            ..Default::default()
        };
        body.pos.x = 3000.0;
        step_body(&mut body, input, &params, &BOUNDS, 0.05);
        assert_eq!(body.vel.x, -params.max_dx);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let params = MovementParams::default();
        let mut body = resting_body();
        let jump = MoveInput {
            jump: true,
            ..Default::default()
        };
        let out = step_body(&mut body, jump, &params, &BOUNDS, 0.016);
        assert!(out.jumped);
        assert!(!body.on_ground);
        assert!(body.vel.y < 0.0);

        // Mid-air press is ignored
        let vy = body.vel.y;
        let out = step_body(&mut body, jump, &params, &BOUNDS, 0.016);
        assert!(!out.jumped);
        assert!((body.vel.y - (vy + params.gravity * 0.016)).abs() < 1e-3);
    }

    #[test]
    fn test_jump_lands_again() {
        let params = MovementParams::default();
        let mut body = resting_body();
        let jump = MoveInput {
            jump: true,
            ..Default::default()
        };
        step_body(&mut body, jump, &params, &BOUNDS, 0.016);
        let mut landed = false;
        for _ in 0..200 {
            if step_body(&mut body, MoveInput::default(), &params, &BOUNDS, 0.016).landed {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert_eq!(body.pos.y, BOUNDS.floor_y - body.size.y);
    }

    #[test]
    fn test_world_clamp() {
        let params = MovementParams::default();
        let mut body = resting_body();
        body.pos.x = 0.5;
        let left = MoveInput {
            left: true,
            ..Default::default()
        };
        step_body(&mut body, left, &params, &BOUNDS, 0.05);
        assert_eq!(body.pos.x, 0.0);

        body.pos.x = BOUNDS.world_len - body.size.x - 0.5;
        let right = MoveInput {
            right: true,
            ..Default::default()
        };
        step_body(&mut body, right, &params, &BOUNDS, 0.05);
        assert_eq!(body.pos.x, BOUNDS.world_len - body.size.x);
    }
}
