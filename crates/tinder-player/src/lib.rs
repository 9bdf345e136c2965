//! Tinder Player — standalone game player library
//!
//! This crate provides the `PlayerApp` application handler for running a
//! Tinder game in a window, plus a headless runner for scripted sessions.

mod game;
pub mod gamepad;
mod headless;
pub mod hud;
mod player_app;

pub use game::{AnyGame, Variant};
pub use headless::{run_headless, HeadlessReport};
pub use player_app::PlayerApp;
