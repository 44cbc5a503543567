//! Player controller
//!
//! Maps sampled input onto the shared combatant body and owns the
//! attack-combo counter and the special-attack energy.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::{AXEL_CLIPS, BLAZE_CLIPS, ClipSet};
use super::combatant::{Combatant, CombatantState, CombatantTag, Facing, Fighter};
use super::input::InputSource;
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;

/// Selectable fighters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterKind {
    Blaze,
    Axel,
}

impl CharacterKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            CharacterKind::Blaze => "Blaze",
            CharacterKind::Axel => "Axel",
        }
    }

    /// Body hitbox size
    pub fn body_size(&self) -> Vec2 {
        match self {
            CharacterKind::Blaze => Vec2::new(40.0, 60.0),
            CharacterKind::Axel => Vec2::new(40.0, 70.0),
        }
    }

    pub fn clips(&self) -> &'static ClipSet {
        match self {
            CharacterKind::Blaze => &BLAZE_CLIPS,
            CharacterKind::Axel => &AXEL_CLIPS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Combatant,
    pub character: CharacterKind,
    combo_count: u32,
    /// Time left before the combo counter decays (ms)
    combo_timer: f32,
    special_energy: u32,
}

impl Player {
    pub fn new(character: CharacterKind, id: u32, pos: Vec2) -> Self {
        Self {
            body: Combatant::new(
                id,
                character.display_name(),
                pos,
                character.body_size(),
                PLAYER_MAX_HEALTH,
                Facing::Right,
                character.clips(),
            ),
            character,
            combo_count: 0,
            combo_timer: 0.0,
            special_energy: SPECIAL_ENERGY_MAX,
        }
    }

    /// Advance one tick
    pub fn update(&mut self, dt: f32, input: &dyn InputSource, audio: &mut dyn AudioSink) {
        self.handle_input(input, audio);
        self.body.integrate(dt);
        self.body.advance_animation(dt, self.character.clips());
        self.tick_timers(dt);
        self.body.refresh_hitbox();
    }

    fn handle_input(&mut self, input: &dyn InputSource, audio: &mut dyn AudioSink) {
        // Hit-stun: input is ignored until the hit clip finishes
        if matches!(
            self.body.state,
            CombatantState::Hit | CombatantState::Dying | CombatantState::Dead
        ) {
            return;
        }

        let mut moving = false;
        self.body.vel = Vec2::ZERO;

        if input.moving_left() {
            self.body.vel.x = -PLAYER_SPEED;
            self.body.facing = Facing::Left;
            moving = true;
        }
        if input.moving_right() {
            self.body.vel.x = PLAYER_SPEED;
            self.body.facing = Facing::Right;
            moving = true;
        }
        if input.moving_up() {
            self.body.vel.y = -PLAYER_SPEED * VERTICAL_SPEED_FACTOR;
            moving = true;
        }
        if input.moving_down() {
            self.body.vel.y = PLAYER_SPEED * VERTICAL_SPEED_FACTOR;
            moving = true;
        }

        if input.punching() && self.body.can_attack() {
            self.start_attack(audio);
        }

        if input.special_attack()
            && self.special_energy >= SPECIAL_ATTACK_COST
            && self.body.attack_cooldown <= 0.0
        {
            // Same hitbox and damage as a punch; only the cost and sound differ
            self.special_energy -= SPECIAL_ATTACK_COST;
            self.start_attack(audio);
            audio.play_sound(SoundEffect::Special);
        }

        self.body.set_locomotion(moving);
    }

    fn start_attack(&mut self, audio: &mut dyn AudioSink) {
        self.body
            .begin_attack(PLAYER_ATTACK_RANGE, PLAYER_ATTACK_COOLDOWN_MS);
        self.combo_count += 1;
        self.combo_timer = COMBO_WINDOW_MS;
        audio.play_sound(SoundEffect::Punch);
    }

    fn tick_timers(&mut self, dt: f32) {
        self.body.tick_timers(dt);
        if self.combo_timer > 0.0 {
            self.combo_timer -= dt;
            if self.combo_timer <= 0.0 {
                self.combo_count = 0;
            }
        }
    }

    /// Absorb an enemy hit. No-op while invulnerable. The caller checks
    /// `body.health` afterwards to decide on life loss.
    pub fn take_damage(&mut self, amount: u32, audio: &mut dyn AudioSink) {
        if !self.body.apply_hit(amount, PLAYER_INVULNERABILITY_MS) {
            return;
        }
        self.combo_count = 0;
        audio.play_sound(SoundEffect::Hit);
        self.body.knockback(PLAYER_KNOCKBACK);
    }

    /// Restore full health at `pos` after a lost life
    pub fn respawn(&mut self, pos: Vec2) {
        self.body.health = self.body.max_health;
        self.body.pos = pos;
        self.body.vel = Vec2::ZERO;
        self.body.state = CombatantState::Idle;
        self.body.end_attack();
        self.body.animation.restart();
        self.body.refresh_hitbox();
    }

    pub fn combo_count(&self) -> u32 {
        self.combo_count
    }

    pub fn special_energy(&self) -> u32 {
        self.special_energy
    }
}

impl Fighter for Player {
    fn body(&self) -> &Combatant {
        &self.body
    }

    fn tag(&self) -> CombatantTag {
        CombatantTag::Player(self.character)
    }
}
