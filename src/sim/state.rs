//! Game state and world ownership
//!
//! `World` is the single owner of the player, the live enemies and the
//! progression counters. Controllers only ever touch their own body.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::combatant::Fighter;
use super::enemy::{Enemy, EnemyKind};
use super::player::{CharacterKind, Player};
use crate::Tuning;
use crate::assets::{AssetError, AssetStatus};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Character selection, waiting for confirm
    Menu,
    Playing,
    Paused,
    /// Lives exhausted, waiting for restart
    GameOver,
    /// Defeat quota reached, waiting for confirm to advance
    LevelComplete,
}

/// Progression and HUD state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// 1-based level number
    pub level: u32,
    pub score: u64,
    pub lives: u8,
    pub status: GameStatus,
    pub selected_character: Option<CharacterKind>,
    /// Camera offset (only x scrolls)
    pub camera: Vec2,
    /// 0.0 at the level start, 1.0 with the camera at the far end
    pub level_progress: f32,
    pub enemies_defeated: u32,
    /// Displayed combo, copied from the player on each defeat
    pub combo: u32,
    /// Time left before the displayed combo clears (ms)
    pub combo_timer: f32,
}

impl GameState {
    pub fn new(lives: u8) -> Self {
        Self {
            level: 1,
            score: 0,
            lives,
            status: GameStatus::Menu,
            selected_character: None,
            camera: Vec2::ZERO,
            level_progress: 0.0,
            enemies_defeated: 0,
            combo: 0,
            combo_timer: 0.0,
        }
    }
}

#[derive(Debug)]
pub struct World {
    pub state: GameState,
    /// Present once a game has started
    pub player: Option<Player>,
    pub enemies: Vec<Enemy>,
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
    assets: AssetStatus,
    next_id: u32,
    /// Confirm (punch) level at the end of the previous tick, for edge detection
    pub(crate) confirm_held: bool,
}

impl World {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::new(tuning.starting_lives),
            player: None,
            enemies: Vec::new(),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            assets: AssetStatus::Loading,
            next_id: 1,
            confirm_held: false,
        }
    }

    /// Record the outcome of the asset loading phase. A failure is final:
    /// every later tick is a no-op.
    pub fn finish_loading(&mut self, result: Result<(), AssetError>) {
        self.assets = match result {
            Ok(()) => {
                log::info!("Assets ready");
                AssetStatus::Ready
            }
            Err(err) => {
                log::error!("Failed to load assets: {err}");
                AssetStatus::Failed(err)
            }
        };
    }

    pub fn asset_status(&self) -> &AssetStatus {
        &self.assets
    }

    pub fn assets_ready(&self) -> bool {
        self.assets == AssetStatus::Ready
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an enemy of `kind` at `pos` with stats from the tuning table
    pub fn spawn_enemy(&mut self, kind: EnemyKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let enemy = Enemy::new(kind, self.tuning.stats(kind), id, pos);
        log::debug!("Spawned {} #{id} at ({:.0}, {:.0})", kind.display_name(), pos.x, pos.y);
        self.enemies.push(enemy);
        id
    }

    /// Every live combatant in draw order (enemies, then the player)
    pub fn fighters(&self) -> impl Iterator<Item = &dyn Fighter> {
        self.enemies
            .iter()
            .map(|e| e as &dyn Fighter)
            .chain(self.player.iter().map(|p| p as &dyn Fighter))
    }

    /// Back to the menu with a fresh run. Tuning, RNG and assets are kept.
    pub fn reset(&mut self) {
        self.state = GameState::new(self.tuning.starting_lives);
        self.player = None;
        self.enemies.clear();
    }
}
