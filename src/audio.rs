//! Audio collaborator
//!
//! The simulation fires sound effects and music transport commands and never
//! waits on them. Back-ends swallow their own failures.

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Any combatant starts a punch
    Punch,
    /// Player takes a hit
    Hit,
    /// Enemy takes a hit
    EnemyHit,
    /// Enemy defeated
    EnemyDeath,
    /// Player special attack
    Special,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 5] = [
        SoundEffect::Punch,
        SoundEffect::Hit,
        SoundEffect::EnemyHit,
        SoundEffect::EnemyDeath,
        SoundEffect::Special,
    ];

    /// Asset manifest key
    pub fn key(&self) -> &'static str {
        match self {
            SoundEffect::Punch => "sfx_punch",
            SoundEffect::Hit => "sfx_hit",
            SoundEffect::EnemyHit => "sfx_enemy_hit",
            SoundEffect::EnemyDeath => "sfx_enemy_death",
            SoundEffect::Special => "sfx_special",
        }
    }
}

/// Background music, one track per level (cycling)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MusicTrack {
    Level1,
    Level2,
    Level3,
}

impl MusicTrack {
    pub const ALL: [MusicTrack; 3] = [MusicTrack::Level1, MusicTrack::Level2, MusicTrack::Level3];

    /// Track for a 1-based level number
    pub fn for_level(level: u32) -> Self {
        match level.saturating_sub(1) % 3 {
            0 => MusicTrack::Level1,
            1 => MusicTrack::Level2,
            _ => MusicTrack::Level3,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            MusicTrack::Level1 => "music_level1",
            MusicTrack::Level2 => "music_level2",
            MusicTrack::Level3 => "music_level3",
        }
    }
}

/// Fire-and-forget audio transport used by the simulation
pub trait AudioSink {
    fn play_sound(&mut self, effect: SoundEffect);
    /// Replace any current track with `track`
    fn play_music(&mut self, track: MusicTrack);
    /// Stop the current track; a no-op when nothing is playing
    fn stop_music(&mut self);
}

/// Sink that drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_sound(&mut self, _effect: SoundEffect) {}
    fn play_music(&mut self, _track: MusicTrack) {}
    fn stop_music(&mut self) {}
}

/// Headless audio manager: mixes volumes and tracks the music handle
#[derive(Debug)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    current_music: Option<MusicTrack>,
    sounds_played: u64,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        Self {
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
            current_music: None,
            sounds_played: 0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn sfx_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn music_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    pub fn current_music(&self) -> Option<MusicTrack> {
        self.current_music
    }

    /// Audible sound effects played so far
    pub fn sounds_played(&self) -> u64 {
        self.sounds_played
    }
}

impl AudioSink for AudioManager {
    fn play_sound(&mut self, effect: SoundEffect) {
        let gain = self.sfx_gain();
        if gain <= 0.0 {
            return;
        }
        self.sounds_played += 1;
        log::debug!("sfx {} (gain {:.2})", effect.key(), gain);
    }

    fn play_music(&mut self, track: MusicTrack) {
        if let Some(previous) = self.current_music.replace(track) {
            log::debug!("music {} stopped", previous.key());
        }
        log::debug!("music {} (gain {:.2})", track.key(), self.music_gain());
    }

    fn stop_music(&mut self) {
        if let Some(track) = self.current_music.take() {
            log::debug!("music {} stopped", track.key());
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

/// Procedurally generated sounds via the Web Audio API - no asset files needed
#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, MusicTrack, SoundEffect};
    use crate::settings::Settings;

    pub struct WebAudio {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        music_volume: f32,
        muted: bool,
        /// Looping drone standing in for the level track
        music: Option<(MusicTrack, OscillatorNode, GainNode)>,
    }

    impl WebAudio {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: settings.master_volume.clamp(0.0, 1.0),
                sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
                music_volume: settings.music_volume.clamp(0.0, 1.0),
                muted: settings.muted,
                music: None,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Mute/unmute all audio; a running track follows immediately
        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
            let vol = self.gain(self.music_volume);
            if let Some((_, _, gain)) = &self.music {
                gain.gain().set_value(vol * 0.2);
            }
        }

        fn gain(&self, channel: f32) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * channel
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Short decaying blip with a pitch sweep
        fn blip(ctx: &AudioContext, vol: f32, from: f32, to: f32, len: f64, osc_type: OscillatorType) {
            let Some((osc, gain)) = Self::create_osc(ctx, from, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + len)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + len)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + len + 0.05).ok();
        }
    }

    impl AudioSink for WebAudio {
        fn play_sound(&mut self, effect: SoundEffect) {
            let vol = self.gain(self.sfx_volume);
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Punch => Self::blip(ctx, vol * 0.5, 220.0, 90.0, 0.08, OscillatorType::Square),
                SoundEffect::Hit => Self::blip(ctx, vol * 0.6, 160.0, 50.0, 0.2, OscillatorType::Sawtooth),
                SoundEffect::EnemyHit => Self::blip(ctx, vol * 0.4, 320.0, 120.0, 0.1, OscillatorType::Triangle),
                SoundEffect::EnemyDeath => Self::blip(ctx, vol * 0.5, 440.0, 55.0, 0.45, OscillatorType::Sawtooth),
                SoundEffect::Special => Self::blip(ctx, vol * 0.5, 300.0, 1200.0, 0.3, OscillatorType::Sine),
            }
        }

        fn play_music(&mut self, track: MusicTrack) {
            self.stop_music();
            let vol = self.gain(self.music_volume);
            let Some(ctx) = &self.ctx else { return };
            let freq = match track {
                MusicTrack::Level1 => 55.0,
                MusicTrack::Level2 => 65.4,
                MusicTrack::Level3 => 49.0,
            };
            let Some((osc, gain)) = Self::create_osc(ctx, freq, OscillatorType::Triangle) else {
                return;
            };
            gain.gain().set_value(vol * 0.2);
            if osc.start().is_ok() {
                self.music = Some((track, osc, gain));
            }
        }

        fn stop_music(&mut self) {
            if let Some((_, osc, _)) = self.music.take() {
                let _ = osc.stop();
            }
        }
    }
}
