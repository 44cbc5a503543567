//! Combat simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform code:
//! - Time enters only as the `dt` handed to `tick`
//! - Randomness comes from the world's seeded RNG
//! - Input and audio are injected collaborators

pub mod animation;
pub mod autopilot;
pub mod collision;
pub mod combatant;
pub mod enemy;
pub mod input;
pub mod player;
pub mod state;
pub mod tick;

pub use animation::{Animation, AnimationClip, ClipSet};
pub use autopilot::demo_input;
pub use collision::Rect;
pub use combatant::{Combatant, CombatantState, CombatantTag, Facing, Fighter};
pub use enemy::{AiState, Enemy, EnemyKind};
pub use input::{InputSource, TickInput};
pub use player::{CharacterKind, Player};
pub use state::{GameState, GameStatus, World};
pub use tick::{FrameClock, tick};
