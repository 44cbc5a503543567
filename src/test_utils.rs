//! Shared test doubles

use crate::audio::{AudioSink, MusicTrack, SoundEffect};

/// Audio sink that records every call
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub sounds: Vec<SoundEffect>,
    pub music: Option<MusicTrack>,
    pub music_started: Vec<MusicTrack>,
    pub stops: u32,
}

impl RecordingAudio {
    pub fn count(&self, effect: SoundEffect) -> usize {
        self.sounds.iter().filter(|s| **s == effect).count()
    }
}

impl AudioSink for RecordingAudio {
    fn play_sound(&mut self, effect: SoundEffect) {
        self.sounds.push(effect);
    }

    fn play_music(&mut self, track: MusicTrack) {
        self.music = Some(track);
        self.music_started.push(track);
    }

    fn stop_music(&mut self) {
        self.music = None;
        self.stops += 1;
    }
}
