//! Maps game events to audio commands
//!
//! Pure: no device access, so the mapping is testable without sound hardware.

use tinder_runtime::GameEvent;

/// The fixed set of sound cues
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Hit,
    Step,
    Coin,
    Music,
}

impl Cue {
    pub const ALL: [Cue; 4] = [Cue::Hit, Cue::Step, Cue::Coin, Cue::Music];

    /// File stem looked up in the sound directory
    pub fn name(self) -> &'static str {
        match self {
            Cue::Hit => "hit",
            Cue::Step => "step",
            Cue::Coin => "coin",
            Cue::Music => "music",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AudioCommand {
    /// One-shot cue
    Play(Cue),
    /// Start the music loop, fading in over `fade_in` seconds
    StartMusic { fade_in: f32 },
    /// Fade the music loop out over `fade_out` seconds
    StopMusic { fade_out: f32 },
}

pub struct AudioTrigger {
    pub fade_in: f32,
    pub fade_out: f32,
}

impl Default for AudioTrigger {
    fn default() -> Self {
        Self::new(1.5, 0.8)
    }
}

impl AudioTrigger {
    pub fn new(fade_in: f32, fade_out: f32) -> Self {
        Self { fade_in, fade_out }
    }

    /// Process a batch of drained events in order
    pub fn process_events(&self, events: &[GameEvent]) -> Vec<AudioCommand> {
        let mut commands = Vec::new();
        for event in events {
            match event {
                GameEvent::Started => commands.push(AudioCommand::StartMusic {
                    fade_in: self.fade_in,
                }),
                GameEvent::Ended { .. } | GameEvent::Reset => {
                    commands.push(AudioCommand::StopMusic {
                        fade_out: self.fade_out,
                    })
                }
                GameEvent::PlayerHit { .. } => commands.push(AudioCommand::Play(Cue::Hit)),
                GameEvent::Jumped | GameEvent::LaneChanged { .. } => {
                    commands.push(AudioCommand::Play(Cue::Step))
                }
                GameEvent::CoinCollected { .. } => commands.push(AudioCommand::Play(Cue::Coin)),
                _ => {}
            }
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinder_runtime::{HudSnapshot, Outcome};

    #[test]
    fn test_round_music_fades() {
        let trigger = AudioTrigger::new(2.0, 0.5);
        let commands = trigger.process_events(&[
            GameEvent::Started,
            GameEvent::Ended {
                outcome: Outcome::Won,
                elapsed: 60.0,
            },
            GameEvent::Reset,
        ]);
        assert_eq!(
            commands,
            vec![
                AudioCommand::StartMusic { fade_in: 2.0 },
                AudioCommand::StopMusic { fade_out: 0.5 },
                AudioCommand::StopMusic { fade_out: 0.5 },
            ]
        );
    }

    #[test]
    fn test_gameplay_cues() {
        let trigger = AudioTrigger::default();
        let commands = trigger.process_events(&[
            GameEvent::Jumped,
            GameEvent::LaneChanged { lane: 0 },
            GameEvent::CoinCollected { total: 3 },
            GameEvent::PlayerHit { lives_left: 2 },
        ]);
        assert_eq!(
            commands,
            vec![
                AudioCommand::Play(Cue::Step),
                AudioCommand::Play(Cue::Step),
                AudioCommand::Play(Cue::Coin),
                AudioCommand::Play(Cue::Hit),
            ]
        );
    }

    #[test]
    fn test_silent_events_ignored() {
        let trigger = AudioTrigger::default();
        let commands = trigger.process_events(&[
            GameEvent::Hud(HudSnapshot::default()),
            GameEvent::GoalReached,
        ]);
        assert!(commands.is_empty());
    }
}
