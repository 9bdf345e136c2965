//! Audio engine wrapping Kira's AudioManager
//!
//! Degrades to silent when no audio device is available or sounds are missing.

use crate::trigger::Cue;
use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle};
use kira::{AudioManager, AudioManagerSettings, Decibels, DefaultBackend, Tween};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tinder_core::{Result, TinderError};

/// Extensions tried, in order, when loading a cue from disk
const EXTENSIONS: [&str; 3] = ["ogg", "wav", "mp3"];

pub struct AudioEngine {
    manager: Option<AudioManager<DefaultBackend>>,
    sounds: HashMap<Cue, StaticSoundData>,
    music: Option<StaticSoundHandle>,
    volume_db: f32,
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioEngine {
    pub fn new() -> Self {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| tracing::warn!("no audio device available ({e}), running silent"))
            .ok();
        Self::with_manager(manager)
    }

    /// An engine that never touches the audio device
    pub fn silent() -> Self {
        Self::with_manager(None)
    }

    fn with_manager(manager: Option<AudioManager<DefaultBackend>>) -> Self {
        Self {
            manager,
            sounds: HashMap::new(),
            music: None,
            volume_db: 0.0,
        }
    }

    pub fn is_available(&self) -> bool {
        self.manager.is_some()
    }

    pub fn set_volume_db(&mut self, volume_db: f32) {
        self.volume_db = volume_db;
    }

    pub fn has_cue(&self, cue: Cue) -> bool {
        self.sounds.contains_key(&cue)
    }

    /// Load one cue from a file
    pub fn load_cue(&mut self, cue: Cue, path: &Path) -> Result<()> {
        let data = StaticSoundData::from_file(path).map_err(|e| {
            TinderError::Audio(format!("Failed to load '{}': {}", path.display(), e))
        })?;
        self.sounds.insert(cue, data);
        Ok(())
    }

    /// Load every cue found in `dir` as `<name>.<ext>`. Returns the number loaded.
    pub fn load_cues(&mut self, dir: &Path) -> usize {
        let mut loaded = 0;
        for cue in Cue::ALL {
            let Some(path) = find_cue_file(dir, cue) else {
                tracing::warn!("no sound for cue '{}' in {}", cue.name(), dir.display());
                continue;
            };
            match self.load_cue(cue, &path) {
                Ok(()) => loaded += 1,
                Err(e) => tracing::warn!("{e}"),
            }
        }
        tracing::debug!("loaded {loaded} of {} sound cues", Cue::ALL.len());
        loaded
    }

    /// Play a one-shot cue
    pub fn play(&mut self, cue: Cue) -> Result<()> {
        let Some(manager) = &mut self.manager else {
            return Ok(());
        };
        let data = self
            .sounds
            .get(&cue)
            .ok_or_else(|| TinderError::Audio(format!("Cue not loaded: {}", cue.name())))?
            .clone()
            .volume(Decibels(self.volume_db));
        manager
            .play(data)
            .map_err(|e| TinderError::Audio(format!("Failed to play '{}': {e}", cue.name())))?;
        Ok(())
    }

    /// Start the looping music cue, replacing any current loop
    pub fn start_music(&mut self, music_volume_db: f32, fade_in: f32) -> Result<()> {
        self.stop_music(0.0);
        let Some(manager) = &mut self.manager else {
            return Ok(());
        };
        let data = self
            .sounds
            .get(&Cue::Music)
            .ok_or_else(|| TinderError::Audio("Cue not loaded: music".into()))?
            .clone()
            .volume(Decibels(self.volume_db + music_volume_db))
            .loop_region(..)
            .fade_in_tween(tween(fade_in));
        let handle = manager
            .play(data)
            .map_err(|e| TinderError::Audio(format!("Failed to play 'music': {e}")))?;
        self.music = Some(handle);
        Ok(())
    }

    /// Fade out and release the music loop, if playing
    pub fn stop_music(&mut self, fade_out: f32) {
        if let Some(mut handle) = self.music.take() {
            handle.stop(tween(fade_out));
        }
    }

    pub fn is_music_playing(&self) -> bool {
        self.music.is_some()
    }
}

fn tween(secs: f32) -> Tween {
    Tween {
        duration: Duration::from_secs_f32(secs.max(0.0)),
        ..Default::default()
    }
}

fn find_cue_file(dir: &Path, cue: Cue) -> Option<std::path::PathBuf> {
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{}", cue.name(), ext)))
        .find(|p| p.is_file())
}
