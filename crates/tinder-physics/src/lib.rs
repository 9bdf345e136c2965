//! Tinder Physics - 2D platformer kinematics
//!
//! Provides the per-frame movement rules shared by the platformer variants:
//! - `Body` / `step_body` — walk, friction, jump, gravity, floor and world clamp
//! - `MovementParams` — tunable constants for the integrator
//! - `Patrol` — enemy that sweeps back and forth between two x bounds

pub mod body;
pub mod patrol;

pub use body::{step_body, Body, Bounds, MoveInput, MovementParams, StepOutcome};
pub use patrol::Patrol;
