//! Tinder Audio — sound cues and music (Kira backend)
//!
//! Provides audio playback for the Tinder games:
//! - `AudioEngine` — wraps Kira AudioManager, cue loading, the music loop
//! - `AudioTrigger` — maps GameEvents to audio commands
//! - `AudioSystem` — drains one frame's events into playback
//!
//! Audio is optional: a missing device or missing files never affect gameplay.

pub mod engine;
pub mod trigger;

use engine::AudioEngine;
use tinder_game::AudioConfig;
use tinder_runtime::GameEvent;
use trigger::{AudioCommand, AudioTrigger};

/// Top-level audio system integrating engine and triggers
pub struct AudioSystem {
    pub engine: AudioEngine,
    pub triggers: AudioTrigger,
    music_volume_db: f32,
}

impl AudioSystem {
    /// Open the audio device and load cues described by `config`
    pub fn new(config: &AudioConfig) -> Self {
        if !config.enabled {
            tracing::info!("audio disabled by config");
            return Self::with_engine(AudioEngine::silent(), config);
        }
        let mut engine = AudioEngine::new();
        if engine.is_available() {
            engine.load_cues(&config.sound_dir);
        }
        Self::with_engine(engine, config)
    }

    /// Build around an existing engine (e.g. `AudioEngine::silent()` for headless runs)
    pub fn with_engine(mut engine: AudioEngine, config: &AudioConfig) -> Self {
        engine.set_volume_db(config.volume_db);
        Self {
            engine,
            triggers: AudioTrigger::new(config.music_fade_in_secs, config.music_fade_out_secs),
            music_volume_db: config.music_volume_db,
        }
    }

    /// Process game events and execute resulting audio commands
    pub fn process_events(&mut self, events: &[GameEvent]) {
        if !self.engine.is_available() {
            return;
        }
        for cmd in self.triggers.process_events(events) {
            match cmd {
                AudioCommand::Play(cue) => {
                    if let Err(e) = self.engine.play(cue) {
                        tracing::warn!("{e}");
                    }
                }
                AudioCommand::StartMusic { fade_in } => {
                    if let Err(e) = self.engine.start_music(self.music_volume_db, fade_in) {
                        tracing::warn!("{e}");
                    }
                }
                AudioCommand::StopMusic { fade_out } => self.engine.stop_music(fade_out),
            }
        }
    }
}
