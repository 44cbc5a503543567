//! Shared combatant state machine
//!
//! Player and enemies carry the same body: position, health, facing,
//! animation, body hitbox and an optional attack window. Controllers
//! decide *what* to do; this module owns *how* the body moves, animates,
//! opens and closes attacks, and absorbs hits.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::{Animation, ClipSet};
use super::collision::Rect;
use super::enemy::EnemyKind;
use super::player::CharacterKind;
use crate::clamp_to_arena;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// +1 for right, -1 for left
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Body state shared by every combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatantState {
    Idle,
    Walking,
    Punching,
    Hit,
    Dying,
    Dead,
}

/// Discriminant used to pick per-type rendering parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatantTag {
    Player(CharacterKind),
    Enemy(EnemyKind),
}

/// Common contract exposed by the player and every enemy
pub trait Fighter {
    fn body(&self) -> &Combatant;
    fn tag(&self) -> CombatantTag;
}

#[derive(Debug, Clone)]
pub struct Combatant {
    pub id: u32,
    pub name: &'static str,
    pub pos: Vec2,
    /// Units per reference frame (see `REFERENCE_FRAME_MS`)
    pub vel: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub facing: Facing,
    pub state: CombatantState,
    pub animation: Animation,
    /// Body width/height, fixed at construction
    pub size: Vec2,
    pub hitbox: Rect,
    /// Present only while an attack window is open
    pub attack_box: Option<Rect>,
    pub is_attacking: bool,
    pub attack_cooldown: f32,
    pub invulnerable: bool,
    pub invulnerability_time: f32,
}

impl Combatant {
    pub fn new(
        id: u32,
        name: &'static str,
        pos: Vec2,
        size: Vec2,
        max_health: u32,
        facing: Facing,
        clips: &ClipSet,
    ) -> Self {
        Self {
            id,
            name,
            pos,
            vel: Vec2::ZERO,
            health: max_health,
            max_health,
            facing,
            state: CombatantState::Idle,
            animation: Animation::new(&clips.idle),
            size,
            hitbox: Rect::centered(pos, size),
            attack_box: None,
            is_attacking: false,
            attack_cooldown: 0.0,
            invulnerable: false,
            invulnerability_time: 0.0,
        }
    }

    /// Integrate velocity (normalized to the ~60 Hz reference frame) and clamp
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt / REFERENCE_FRAME_MS;
        self.pos = clamp_to_arena(self.pos);
    }

    /// Step the animation, close finished one-shot states, then re-apply
    /// the clip for the (possibly new) state.
    pub fn advance_animation(&mut self, dt: f32, clips: &ClipSet) {
        if self.animation.advance(dt) {
            match self.state {
                CombatantState::Punching => {
                    self.state = CombatantState::Idle;
                    self.end_attack();
                }
                CombatantState::Hit => self.state = CombatantState::Idle,
                CombatantState::Dying => self.state = CombatantState::Dead,
                _ => {}
            }
        }
        if let Some(clip) = clips.for_state(self.state) {
            self.animation.apply_clip(clip);
        }
    }

    pub fn tick_timers(&mut self, dt: f32) {
        if self.attack_cooldown > 0.0 {
            self.attack_cooldown -= dt;
        }
        if self.invulnerability_time > 0.0 {
            self.invulnerability_time -= dt;
            if self.invulnerability_time <= 0.0 {
                self.invulnerable = false;
            }
        }
    }

    /// Re-center the body hitbox on the current position
    pub fn refresh_hitbox(&mut self) {
        self.hitbox = Rect::centered(self.pos, self.size);
    }

    /// Only idle/walking are derived from movement; attacks and hits run to completion
    pub fn set_locomotion(&mut self, moving: bool) {
        if matches!(self.state, CombatantState::Idle | CombatantState::Walking) {
            self.state = if moving {
                CombatantState::Walking
            } else {
                CombatantState::Idle
            };
        }
    }

    pub fn can_attack(&self) -> bool {
        self.attack_cooldown <= 0.0 && !self.is_attacking
    }

    /// Open an attack window with a `range` wide box extending toward `facing`
    pub fn begin_attack(&mut self, range: f32, cooldown_ms: f32) {
        self.state = CombatantState::Punching;
        self.is_attacking = true;
        self.attack_cooldown = cooldown_ms;
        self.animation.restart();

        let x = match self.facing {
            Facing::Right => self.pos.x,
            Facing::Left => self.pos.x - range,
        };
        self.attack_box = Some(Rect::new(
            x,
            self.pos.y - ATTACK_BOX_HEIGHT / 2.0,
            range,
            ATTACK_BOX_HEIGHT,
        ));
    }

    pub fn end_attack(&mut self) {
        self.is_attacking = false;
        self.attack_box = None;
    }

    /// Active attack hitbox, if an attack window is open
    pub fn active_attack(&self) -> Option<Rect> {
        if self.is_attacking { self.attack_box } else { None }
    }

    /// Whether a hit would currently land
    pub fn is_vulnerable(&self) -> bool {
        !self.invulnerable && !matches!(self.state, CombatantState::Dying | CombatantState::Dead)
    }

    /// Absorb a hit. Returns false (and changes nothing) while invulnerable
    /// or already dying. Health saturates at zero; zero health means dying.
    pub fn apply_hit(&mut self, amount: u32, invulnerability_ms: f32) -> bool {
        if !self.is_vulnerable() {
            return false;
        }

        self.health = self.health.saturating_sub(amount);
        self.state = CombatantState::Hit;
        self.invulnerable = invulnerability_ms > 0.0;
        self.invulnerability_time = invulnerability_ms;
        self.animation.restart();
        self.end_attack();

        if self.health == 0 {
            self.state = CombatantState::Dying;
        }
        true
    }

    /// Push away from the facing direction
    pub fn knockback(&mut self, force: f32) {
        self.vel.x = -self.facing.sign() * force;
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    pub fn is_dead(&self) -> bool {
        self.state == CombatantState::Dead
    }
}
