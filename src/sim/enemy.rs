//! Enemy AI controller
//!
//! Four-state behavior (patrol, chase, attack, stunned) layered over the
//! shared combatant body. The player is only ever seen as a position
//! passed into `update`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::animation::ENEMY_CLIPS;
use super::combatant::{Combatant, CombatantState, CombatantTag, Facing, Fighter};
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;
use crate::tuning::EnemyStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Punk,
    Bruiser,
    Boss,
}

impl EnemyKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            EnemyKind::Punk => "Punk",
            EnemyKind::Bruiser => "Bruiser",
            EnemyKind::Boss => "Boss",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    Patrol,
    Chase,
    Attack,
    Stunned,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub body: Combatant,
    pub kind: EnemyKind,
    pub ai_state: AiState,
    /// Milliseconds spent in the current AI state
    pub ai_timer: f32,
    /// Patrol waypoint
    pub target: Vec2,
    pub attack_range: f32,
    pub patrol_start: f32,
    pub patrol_end: f32,
    speed: f32,
    attack_damage: u32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, stats: &EnemyStats, id: u32, pos: Vec2) -> Self {
        Self {
            body: Combatant::new(
                id,
                kind.display_name(),
                pos,
                Vec2::new(stats.width, stats.height),
                stats.max_health,
                Facing::Left,
                &ENEMY_CLIPS,
            ),
            kind,
            ai_state: AiState::Patrol,
            ai_timer: 0.0,
            target: pos,
            attack_range: stats.attack_range,
            patrol_start: pos.x - PATROL_HALF_WIDTH,
            patrol_end: pos.x + PATROL_HALF_WIDTH,
            speed: stats.speed,
            attack_damage: stats.attack_damage,
        }
    }

    /// Advance one tick against the player's current position
    pub fn update(
        &mut self,
        dt: f32,
        player_pos: Vec2,
        rng: &mut impl Rng,
        audio: &mut dyn AudioSink,
    ) {
        match self.body.state {
            CombatantState::Dead => return,
            CombatantState::Dying => {
                // Only the dying clip runs; it ends in Dead
                self.body.vel = Vec2::ZERO;
                self.body.advance_animation(dt, &ENEMY_CLIPS);
                self.body.tick_timers(dt);
                return;
            }
            _ => {}
        }

        self.update_ai(dt, player_pos, rng, audio);
        self.body.integrate(dt);
        self.body.advance_animation(dt, &ENEMY_CLIPS);
        self.body.tick_timers(dt);
        self.body.refresh_hitbox();
    }

    fn enter(&mut self, state: AiState) {
        self.ai_state = state;
        self.ai_timer = 0.0;
    }

    fn update_ai(
        &mut self,
        dt: f32,
        player_pos: Vec2,
        rng: &mut impl Rng,
        audio: &mut dyn AudioSink,
    ) {
        let distance = self.body.pos.distance(player_pos);
        self.ai_timer += dt;

        match self.ai_state {
            AiState::Patrol => {
                self.patrol(rng);
                if distance < ENEMY_DETECTION_RANGE {
                    self.enter(AiState::Chase);
                }
            }
            AiState::Chase => {
                self.chase(player_pos);
                if distance <= self.attack_range {
                    self.enter(AiState::Attack);
                } else if distance > ENEMY_DETECTION_RANGE * CHASE_GIVE_UP_FACTOR {
                    self.enter(AiState::Patrol);
                }
            }
            AiState::Attack => {
                if self.body.can_attack() {
                    self.body
                        .begin_attack(self.attack_range, ENEMY_ATTACK_COOLDOWN_MS);
                    audio.play_sound(SoundEffect::Punch);
                }
                if self.ai_timer > ATTACK_STATE_MS {
                    self.enter(AiState::Chase);
                }
            }
            AiState::Stunned => {
                self.body.vel = Vec2::ZERO;
                if self.ai_timer > STUN_MS {
                    self.enter(AiState::Chase);
                }
            }
        }
    }

    fn patrol(&mut self, rng: &mut impl Rng) {
        if self.ai_timer > PATROL_RETARGET_MS {
            self.target.x = if rng.random::<f32>() > 0.5 {
                self.patrol_end
            } else {
                self.patrol_start
            };
            self.ai_timer = 0.0;
        }

        let direction = self.target.x - self.body.pos.x;
        self.body.vel.y = 0.0;
        if direction.abs() > PATROL_ARRIVE_DISTANCE {
            self.body.vel.x = direction.signum() * self.speed * PATROL_SPEED_FACTOR;
            self.body.facing = if direction > 0.0 {
                Facing::Right
            } else {
                Facing::Left
            };
            self.body.set_locomotion(true);
        } else {
            self.body.vel.x = 0.0;
            self.body.set_locomotion(false);
        }
    }

    fn chase(&mut self, player_pos: Vec2) {
        let dx = player_pos.x - self.body.pos.x;
        let dy = player_pos.y - self.body.pos.y;

        self.body.facing = if dx > 0.0 { Facing::Right } else { Facing::Left };
        self.body.vel.x = self.body.facing.sign() * self.speed;
        self.body.vel.y = if dy.abs() > CHASE_VERTICAL_DEADZONE {
            dy.signum() * self.speed * VERTICAL_SPEED_FACTOR
        } else {
            0.0
        };
        self.body.set_locomotion(true);
    }

    /// Absorb a player hit. Returns true when this hit defeats the enemy.
    pub fn take_damage(&mut self, amount: u32, audio: &mut dyn AudioSink) -> bool {
        if !self.body.apply_hit(amount, ENEMY_INVULNERABILITY_MS) {
            return false;
        }
        self.enter(AiState::Stunned);
        audio.play_sound(SoundEffect::EnemyHit);

        if self.body.state == CombatantState::Dying {
            audio.play_sound(SoundEffect::EnemyDeath);
            self.body.vel = Vec2::ZERO;
            return true;
        }

        self.body.knockback(ENEMY_KNOCKBACK);
        false
    }

    pub fn attack_damage(&self) -> u32 {
        self.attack_damage
    }
}

impl Fighter for Enemy {
    fn body(&self) -> &Combatant {
        &self.body
    }

    fn tag(&self) -> CombatantTag {
        CombatantTag::Enemy(self.kind)
    }
}
