//! Tinder Core - Foundational types for the Tinder arcade runtime
//!
//! This crate provides the types that all other Tinder crates depend on:
//! - `Vec2`, `Rect` - 2D spatial types and the AABB overlap test
//! - `Color` - RGBA color with hex parsing
//! - `Viewport` - host surface size and device pixel ratio
//! - `format_clock` - `MM:SS` formatting for HUD timers
//! - Error types and Result alias

mod error;
mod time;
mod types;
mod viewport;

pub use error::{Result, TinderError};
pub use time::format_clock;
pub use types::{Color, Rect, Vec2};
pub use viewport::Viewport;
