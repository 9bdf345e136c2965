//! Tinder Game - the simulations driven by the game loop
//!
//! - `Platformer` — side-scroller: walk, jump, avoid patrols, reach the goal
//! - `Runner` — lane runner: dodge obstacles, collect coins, speed ramps up
//! - `Camera` — horizontal follow offset clamped to the world
//! - `collision` — per-frame overlap queries for both variants
//! - `GameConfig` — TOML-backed tuning for every variant

pub mod camera;
pub mod collision;
pub mod config;
pub mod platformer;
pub mod runner;

pub use camera::Camera;
pub use config::{AudioConfig, CameraConfig, GameConfig, PlatformerConfig, RunnerConfig};
pub use platformer::{Platformer, PlatformerPlayer};
pub use runner::{EntityKind, Runner, RunnerEntity, RunnerPlayer};
