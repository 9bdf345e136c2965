//! Game tuning loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) is valid and a
//! partial file only overrides what it names. Out-of-range values are
//! clamped by [`GameConfig::sanitized`] rather than rejected.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tinder_core::Result;
use tinder_physics::MovementParams;

/// Top-level configuration for all variants
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub platformer: PlatformerConfig,
    pub runner: RunnerConfig,
    pub camera: CameraConfig,
    pub audio: AudioConfig,
}

/// Side-scrolling course layout and movement
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformerConfig {
    pub movement: MovementParams,
    /// Course length in seconds of walking at `walk_speed`
    pub target_seconds: f32,
    pub player_start_x: f32,
    pub player_size: [f32; 2],
    pub enemy_count: u32,
    pub enemy_size: f32,
    pub patrol_base_width: f32,
    /// Extra patrol width added per `i % 3` step
    pub patrol_width_step: f32,
    /// Patrol range starts this far before each segment mark
    pub patrol_lead: f32,
    /// Enemy spawn offset from the start of its patrol range
    pub spawn_offset: f32,
    pub patrol_base_speed: f32,
    /// Extra patrol speed added per `i % 3` step
    pub patrol_speed_step: f32,
    pub goal_size: [f32; 2],
}

impl Default for PlatformerConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl PlatformerConfig {
    /// Two-minute course
    pub fn classic() -> Self {
        Self {
            movement: MovementParams::default(),
            target_seconds: 120.0,
            player_start_x: 40.0,
            player_size: [28.0, 48.0],
            enemy_count: 24,
            enemy_size: 28.0,
            patrol_base_width: 140.0,
            patrol_width_step: 40.0,
            patrol_lead: 90.0,
            spawn_offset: 50.0,
            patrol_base_speed: 40.0,
            patrol_speed_step: 20.0,
            goal_size: [40.0, 64.0],
        }
    }

    /// One-minute course with fewer, faster patrols
    pub fn sprint() -> Self {
        Self {
            target_seconds: 60.0,
            enemy_count: 12,
            patrol_base_speed: 70.0,
            patrol_speed_step: 25.0,
            ..Self::classic()
        }
    }

    /// World length in units: walking speed times target duration, rounded
    pub fn world_len(&self) -> f32 {
        (self.movement.walk_speed * self.target_seconds).round()
    }
}

/// Lane runner tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub lanes: usize,
    pub lane_height: f32,
    pub lives: u32,
    pub coins_to_win: u32,
    pub invulnerable_secs: f64,
    /// Screen-fixed player x as a fraction of viewport width
    pub player_x_fraction: f32,
    pub player_size: f32,
    pub obstacle_size: f32,
    pub coin_size: f32,
    /// Background scroll speed at `speed_scale = 1`
    pub scroll_speed: f32,
    /// Speed scale gained per second of running
    pub speed_ramp: f64,
    pub max_speed_scale: f64,
    /// Obstacle spawn delay range in seconds at `speed_scale = 1`
    pub obstacle_delay: [f64; 2],
    /// Coin spawn delay range in seconds at `speed_scale = 1`
    pub coin_delay: [f64; 2],
    /// Seconds for an entity to cross the screen at `speed_scale = 1`
    pub traversal_secs: f64,
    /// Background offset per unit of distance travelled
    pub parallax: f32,
    pub seed: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            lanes: 3,
            lane_height: 72.0,
            lives: 3,
            coins_to_win: 10,
            invulnerable_secs: 1.2,
            player_x_fraction: 0.18,
            player_size: 40.0,
            obstacle_size: 40.0,
            coin_size: 26.0,
            scroll_speed: 240.0,
            speed_ramp: 0.015,
            max_speed_scale: 2.5,
            obstacle_delay: [0.9, 1.8],
            coin_delay: [0.7, 1.5],
            traversal_secs: 3.0,
            parallax: 0.5,
            seed: 0x7173_6565_6400_0001,
        }
    }
}

/// Camera follow tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Player is held this fraction of the viewport width from the left edge
    pub margin_fraction: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            margin_fraction: 0.33,
        }
    }
}

/// Sound cue settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    /// Directory holding `hit`, `step`, `coin` and `music` sound files
    pub sound_dir: PathBuf,
    /// Master volume in decibels applied to every cue
    pub volume_db: f32,
    pub music_volume_db: f32,
    pub music_fade_in_secs: f32,
    pub music_fade_out_secs: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sound_dir: PathBuf::from("assets/audio"),
            volume_db: 0.0,
            music_volume_db: -8.0,
            music_fade_in_secs: 1.5,
            music_fade_out_secs: 0.8,
        }
    }
}

impl GameConfig {
    /// Read and parse a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Copy with every value clamped into a playable range
    pub fn sanitized(&self) -> Self {
        let mut cfg = self.clone();

        let p = &mut cfg.platformer;
        let m = &mut p.movement;
        m.gravity = at_least("platformer.movement.gravity", m.gravity, 1.0);
        m.friction = within("platformer.movement.friction", m.friction, 0.01, 0.99);
        m.max_dx = at_least("platformer.movement.max_dx", m.max_dx, 1.0);
        m.jump_v = at_least("platformer.movement.jump_v", m.jump_v, 0.0);
        m.walk_speed = at_least("platformer.movement.walk_speed", m.walk_speed, 1.0);
        p.target_seconds = at_least("platformer.target_seconds", p.target_seconds, 1.0);
        p.player_size[0] = at_least("platformer.player_size", p.player_size[0], 1.0);
        p.player_size[1] = at_least("platformer.player_size", p.player_size[1], 1.0);
        p.enemy_size = at_least("platformer.enemy_size", p.enemy_size, 1.0);
        p.goal_size[0] = at_least("platformer.goal_size", p.goal_size[0], 1.0);
        p.goal_size[1] = at_least("platformer.goal_size", p.goal_size[1], 1.0);
        p.patrol_base_speed = at_least("platformer.patrol_base_speed", p.patrol_base_speed, 0.0);

        let r = &mut cfg.runner;
        if r.lanes == 0 {
            tracing::warn!("runner.lanes must be at least 1, using 1");
            r.lanes = 1;
        }
        if r.lives == 0 {
            tracing::warn!("runner.lives must be at least 1, using 1");
            r.lives = 1;
        }
        if r.coins_to_win == 0 {
            tracing::warn!("runner.coins_to_win must be at least 1, using 1");
            r.coins_to_win = 1;
        }
        r.lane_height = at_least("runner.lane_height", r.lane_height, 8.0);
        r.player_x_fraction = within("runner.player_x_fraction", r.player_x_fraction, 0.0, 0.9);
        r.player_size = at_least("runner.player_size", r.player_size, 1.0);
        r.obstacle_size = at_least("runner.obstacle_size", r.obstacle_size, 1.0);
        r.coin_size = at_least("runner.coin_size", r.coin_size, 1.0);
        r.invulnerable_secs = r.invulnerable_secs.max(0.0);
        r.speed_ramp = r.speed_ramp.max(0.0);
        r.max_speed_scale = r.max_speed_scale.max(1.0);
        r.traversal_secs = r.traversal_secs.max(0.1);
        r.obstacle_delay = sane_range("runner.obstacle_delay", r.obstacle_delay);
        r.coin_delay = sane_range("runner.coin_delay", r.coin_delay);

        cfg.camera.margin_fraction =
            within("camera.margin_fraction", cfg.camera.margin_fraction, 0.0, 1.0);

        let a = &mut cfg.audio;
        a.volume_db = within("audio.volume_db", a.volume_db, -60.0, 12.0);
        a.music_volume_db = within("audio.music_volume_db", a.music_volume_db, -60.0, 12.0);
        a.music_fade_in_secs = at_least("audio.music_fade_in_secs", a.music_fade_in_secs, 0.0);
        a.music_fade_out_secs = at_least("audio.music_fade_out_secs", a.music_fade_out_secs, 0.0);

        cfg
    }
}

fn at_least(field: &str, value: f32, min: f32) -> f32 {
    within(field, value, min, f32::MAX)
}

fn within(field: &str, value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        tracing::warn!("{field} is NaN, using {min}");
        return min;
    }
    let clamped = value.clamp(min, max);
    if clamped != value {
        tracing::warn!("{field} = {value} out of range, clamped to {clamped}");
    }
    clamped
}

fn sane_range(field: &str, range: [f64; 2]) -> [f64; 2] {
    let [lo, hi] = range;
    let lo = if lo.is_finite() { lo.max(0.05) } else { 0.05 };
    let hi = if hi.is_finite() { hi.max(lo) } else { lo };
    if [lo, hi] != range {
        tracing::warn!("{field} adjusted to [{lo}, {hi}]");
    }
    [lo, hi]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_classic_course() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.platformer.world_len(), 14400.0);
        assert_eq!(cfg.platformer.enemy_count, 24);
        assert_eq!(cfg.runner.coins_to_win, 10);
        assert_eq!(cfg.runner.lives, 3);
        assert!((cfg.camera.margin_fraction - 0.33).abs() < 1e-6);
    }

    #[test]
    fn test_sprint_preset_is_shorter() {
        let sprint = PlatformerConfig::sprint();
        assert_eq!(sprint.world_len(), 7200.0);
        assert!(sprint.patrol_base_speed > PlatformerConfig::classic().patrol_base_speed);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg = GameConfig::from_toml_str(
            r#"
            [platformer.movement]
            walk_speed = 150.0

            [runner]
            lanes = 4

            [audio]
            sound_dir = "sfx"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.platformer.movement.walk_speed, 150.0);
        assert_eq!(cfg.platformer.movement.gravity, 1200.0);
        assert_eq!(cfg.runner.lanes, 4);
        assert_eq!(cfg.runner.lives, 3);
        assert_eq!(cfg.audio.sound_dir, PathBuf::from("sfx"));
        assert!(cfg.audio.enabled);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(GameConfig::from_toml_str("[runner\nlanes = ").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[camera]\nmargin_fraction = 0.5").unwrap();
        let cfg = GameConfig::load(file.path()).unwrap();
        assert_eq!(cfg.camera.margin_fraction, 0.5);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load("/nonexistent/tinder.toml").unwrap_err();
        assert!(matches!(err, tinder_core::TinderError::Io(_)));
    }

    #[test]
    fn test_sanitize_clamps() {
        let mut cfg = GameConfig::default();
        cfg.platformer.movement.friction = 1.5;
        cfg.platformer.movement.walk_speed = -10.0;
        cfg.runner.lanes = 0;
        cfg.runner.coin_delay = [2.0, 1.0];
        cfg.camera.margin_fraction = f32::NAN;

        let clean = cfg.sanitized();
        assert_eq!(clean.platformer.movement.friction, 0.99);
        assert_eq!(clean.platformer.movement.walk_speed, 1.0);
        assert_eq!(clean.runner.lanes, 1);
        assert_eq!(clean.runner.coin_delay, [2.0, 2.0]);
        assert_eq!(clean.camera.margin_fraction, 0.0);
    }

    #[test]
    fn test_sanitize_keeps_valid_config() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.sanitized(), cfg);
    }
}
