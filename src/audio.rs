//! Audio triggers
//!
//! The simulation never plays sound itself. It records [`GameEvent`]s, and
//! the [`AudioManager`] turns the ones that make noise into calls on whatever
//! [`AudioSink`] the shell plugged in.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fired a shot
    Attack,
    /// Player took damage
    Hit,
}

impl SoundEffect {
    /// Asset handle name
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Attack => "attack",
            SoundEffect::Hit => "hit",
        }
    }

    /// The effect an event should trigger, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PlayerAttacked => Some(SoundEffect::Attack),
            GameEvent::PlayerHit { .. } => Some(SoundEffect::Hit),
            _ => None,
        }
    }
}

/// Looping music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Background,
}

impl MusicTrack {
    pub fn name(&self) -> &'static str {
        match self {
            MusicTrack::Background => "background",
        }
    }
}

/// Output side of the audio system, supplied by the shell
pub trait AudioSink {
    /// Fire a one-shot effect at the given volume (0.0 - 1.0)
    fn play(&mut self, effect: SoundEffect, volume: f32);
    /// Start a track looping indefinitely
    fn start_music_loop(&mut self, track: MusicTrack, volume: f32);
}

/// Sink for headless runs: every trigger becomes a log line
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {} (vol {:.2})", effect.name(), volume);
    }

    fn start_music_loop(&mut self, track: MusicTrack, volume: f32) {
        log::info!("music {} looping (vol {:.2})", track.name(), volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    /// Per-channel mix under the master volume
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_started: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(LogAudio))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music_started: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(self.sfx_volume);
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Start the background loop; later calls are ignored
    pub fn start_music(&mut self) {
        if self.music_started {
            return;
        }
        self.music_started = true;
        let vol = self.effective_volume(self.music_volume);
        self.sink.start_music_loop(MusicTrack::Background, vol);
    }

    /// Trigger the effects for a batch of simulation events
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}
