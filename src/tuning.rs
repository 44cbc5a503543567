//! Data-driven game balance
//!
//! Defaults reproduce the stock level; a JSON file may override any subset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;
use crate::sim::EnemyKind;

/// Fixed per-type enemy stats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub max_health: u32,
    /// Units per reference frame
    pub speed: f32,
    pub attack_damage: u32,
    pub attack_range: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Damage of every player punch (special included)
    pub player_attack_damage: u32,
    pub score_punk: u64,
    pub score_bruiser: u64,
    pub score_boss: u64,
    /// Defeats needed to clear a level
    pub defeat_quota: u32,
    pub max_live_enemies: usize,
    /// Per-tick spawn probability while below `max_live_enemies`
    pub spawn_chance: f32,
    pub bruiser_spawn_chance: f32,
    pub starting_lives: u8,
    /// How long the combo display stays up after a defeat
    pub combo_display_ms: f32,
    /// Punks placed ahead of the player when a level starts
    pub initial_enemies: u32,
    pub punk: EnemyStats,
    pub bruiser: EnemyStats,
    pub boss: EnemyStats,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_attack_damage: 20,
            score_punk: 100,
            score_bruiser: 200,
            score_boss: 500,
            defeat_quota: 20,
            max_live_enemies: 3,
            spawn_chance: 0.01,
            bruiser_spawn_chance: 0.3,
            starting_lives: 3,
            combo_display_ms: 2000.0,
            initial_enemies: 3,
            punk: EnemyStats {
                max_health: 30,
                speed: 1.5,
                attack_damage: 10,
                attack_range: 50.0,
                width: 40.0,
                height: 60.0,
            },
            bruiser: EnemyStats {
                max_health: 60,
                speed: 1.0,
                attack_damage: 20,
                attack_range: 60.0,
                width: 50.0,
                height: 70.0,
            },
            boss: EnemyStats {
                max_health: 150,
                speed: 2.0,
                attack_damage: 25,
                attack_range: 70.0,
                width: 60.0,
                height: 80.0,
            },
        }
    }
}

impl Tuning {
    pub fn stats(&self, kind: EnemyKind) -> &EnemyStats {
        match kind {
            EnemyKind::Punk => &self.punk,
            EnemyKind::Bruiser => &self.bruiser,
            EnemyKind::Boss => &self.boss,
        }
    }

    pub fn score_for(&self, kind: EnemyKind) -> u64 {
        match kind {
            EnemyKind::Punk => self.score_punk,
            EnemyKind::Bruiser => self.score_bruiser,
            EnemyKind::Boss => self.score_boss,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }
}
