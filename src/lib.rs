//! Neon Brawl - A side-scrolling beat 'em up combat core
//!
//! Core modules:
//! - `sim`: Combat simulation (combatants, enemy AI, collisions, world loop)
//! - `audio`: Sound effect / music sink consumed by the simulation
//! - `assets`: Asset manifest and load gate
//! - `platform`: Keyboard input mapping (and browser listeners on wasm)
//! - `renderer`: Sprite draw list handed to the host renderer
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (volumes, reduced motion)

pub mod assets;
pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(test)]
pub(crate) mod test_utils;

pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;
use thiserror::Error;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Velocities are expressed in units per reference frame (~60 Hz)
    pub const REFERENCE_FRAME_MS: f32 = 16.0;
    /// Largest frame delta the world loop will integrate in one tick
    pub const MAX_FRAME_DT_MS: f32 = 100.0;

    /// Arena bounds (horizontal) and combat lane (vertical)
    pub const ARENA_MIN_X: f32 = 0.0;
    pub const ARENA_MAX_X: f32 = 2000.0;
    pub const LANE_TOP: f32 = 200.0;
    pub const LANE_BOTTOM: f32 = 400.0;

    /// Viewport and level size used by the camera
    pub const VIEWPORT_WIDTH: f32 = 1024.0;
    pub const VIEWPORT_HEIGHT: f32 = 768.0;
    pub const LEVEL_WIDTH: f32 = 2048.0;

    /// Vertical movement is slower than horizontal
    pub const VERTICAL_SPEED_FACTOR: f32 = 0.7;
    /// Attack hitboxes are vertically centered on the attacker with this height
    pub const ATTACK_BOX_HEIGHT: f32 = 60.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const PLAYER_MAX_HEALTH: u32 = 100;
    pub const PLAYER_ATTACK_RANGE: f32 = 60.0;
    pub const PLAYER_ATTACK_COOLDOWN_MS: f32 = 300.0;
    pub const PLAYER_INVULNERABILITY_MS: f32 = 1000.0;
    pub const PLAYER_KNOCKBACK: f32 = 2.0;
    pub const PLAYER_SPAWN: Vec2 = Vec2::new(100.0, 300.0);
    /// Player combo counter decays after this long without a new attack
    pub const COMBO_WINDOW_MS: f32 = 1000.0;
    pub const SPECIAL_ENERGY_MAX: u32 = 100;
    pub const SPECIAL_ATTACK_COST: u32 = 20;

    /// Enemy AI
    pub const ENEMY_DETECTION_RANGE: f32 = 150.0;
    /// Chase is abandoned beyond detection range times this factor
    pub const CHASE_GIVE_UP_FACTOR: f32 = 1.5;
    pub const PATROL_HALF_WIDTH: f32 = 100.0;
    pub const PATROL_RETARGET_MS: f32 = 2000.0;
    pub const PATROL_ARRIVE_DISTANCE: f32 = 10.0;
    pub const PATROL_SPEED_FACTOR: f32 = 0.5;
    pub const CHASE_VERTICAL_DEADZONE: f32 = 20.0;
    pub const ENEMY_ATTACK_COOLDOWN_MS: f32 = 1500.0;
    pub const ATTACK_STATE_MS: f32 = 1000.0;
    pub const STUN_MS: f32 = 800.0;
    pub const ENEMY_INVULNERABILITY_MS: f32 = 500.0;
    pub const ENEMY_KNOCKBACK: f32 = 1.5;
}

/// Failure to read a JSON config file (`Tuning`, `Settings`)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Clamp a position to the arena bounds and vertical combat lane
#[inline]
pub fn clamp_to_arena(pos: Vec2) -> Vec2 {
    use consts::*;
    Vec2::new(
        pos.x.clamp(ARENA_MIN_X, ARENA_MAX_X),
        pos.y.clamp(LANE_TOP, LANE_BOTTOM),
    )
}
