//! Asset manifest and load gate
//!
//! Fetching and decoding happen in the host. The core only needs to know
//! which keys must exist and whether loading finished.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audio::{MusicTrack, SoundEffect};

/// Sprite sheet and background keys every build must provide
pub const SPRITE_KEYS: [&str; 5] = ["blaze", "axel", "background1", "background2", "background3"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("asset manifest has no entry for '{key}'")]
    MissingEntry { key: String },
    #[error("failed to fetch '{key}': {reason}")]
    Fetch { key: String, reason: String },
    #[error("failed to decode '{key}': {reason}")]
    Decode { key: String, reason: String },
}

/// Where the loading phase stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AssetStatus {
    #[default]
    Loading,
    Ready,
    Failed(AssetError),
}

/// Key -> path tables for sprites and audio
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifest {
    pub sprites: BTreeMap<String, String>,
    pub audio: BTreeMap<String, String>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        let sprites = SPRITE_KEYS
            .iter()
            .map(|key| (key.to_string(), format!("assets/sprites/{key}.png")))
            .collect();

        let mut audio: BTreeMap<String, String> = SoundEffect::ALL
            .iter()
            .map(|sfx| (sfx.key().to_string(), format!("assets/audio/{}.wav", sfx.key())))
            .collect();
        audio.extend(
            MusicTrack::ALL
                .iter()
                .map(|track| (track.key().to_string(), format!("assets/audio/{}.mp3", track.key()))),
        );

        Self { sprites, audio }
    }
}

impl AssetManifest {
    pub fn from_json(json: &str) -> Result<Self, crate::ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check that every key the game refers to has a non-empty path
    pub fn validate(&self) -> Result<(), AssetError> {
        let audio_keys = SoundEffect::ALL
            .iter()
            .map(|s| s.key())
            .chain(MusicTrack::ALL.iter().map(|m| m.key()));

        for key in SPRITE_KEYS {
            Self::require(&self.sprites, key)?;
        }
        for key in audio_keys {
            Self::require(&self.audio, key)?;
        }
        Ok(())
    }

    fn require(table: &BTreeMap<String, String>, key: &str) -> Result<(), AssetError> {
        match table.get(key) {
            Some(path) if !path.trim().is_empty() => Ok(()),
            _ => Err(AssetError::MissingEntry {
                key: key.to_string(),
            }),
        }
    }

    /// Every (key, path) pair, sprites first
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sprites
            .iter()
            .chain(self.audio.iter())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
