//! Render boundary
//!
//! Builds a flat, GPU-uploadable list of sprite instances and a HUD
//! snapshot from the world. Rasterization belongs to the host.

pub mod sprites;

pub use sprites::{SheetLayout, SpriteSheet, layout_for};

use bytemuck::{Pod, Zeroable};

use crate::Settings;
use crate::sim::{CombatantTag, Facing, GameStatus, World};

/// Background scrolls at half camera speed
pub const BACKGROUND_PARALLAX: f32 = 0.5;

/// One sprite quad, camera-relative
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Source rect on the sheet `[x, y, w, h]`
    pub src: [f32; 4],
    /// Destination rect on screen `[x, y, w, h]`
    pub dst: [f32; 4],
    pub alpha: f32,
    /// 1 = mirror horizontally
    pub flip: u32,
    /// Health bar fill (0-1), negative when no bar is shown
    pub health_bar: f32,
    /// `SpriteSheet` discriminant
    pub sheet: u32,
}

/// Invulnerability blink, driven by wall-clock time
#[inline]
pub fn flicker_alpha(time_ms: f64) -> f32 {
    ((time_ms * 0.02).sin() * 0.5 + 0.5) as f32
}

/// Sprite instances for every live combatant, in draw order
pub fn draw_list(world: &World, time_ms: f64, settings: &Settings) -> Vec<SpriteInstance> {
    let camera_x = world.state.camera.x;

    world
        .fighters()
        .map(|fighter| {
            let body = fighter.body();
            let tag = fighter.tag();
            let layout = layout_for(tag);
            let (w, h) = (layout.frame_width, layout.frame_height);

            let alpha = if body.invulnerable && settings.flicker_enabled() {
                flicker_alpha(time_ms)
            } else {
                1.0
            };

            // Only damaged enemies get a bar
            let health_bar = match tag {
                CombatantTag::Enemy(_) if body.health < body.max_health => {
                    body.health as f32 / body.max_health as f32
                }
                _ => -1.0,
            };

            SpriteInstance {
                src: layout.source_rect(body.animation.frame_index()),
                dst: [
                    body.pos.x - w / 2.0 - camera_x,
                    body.pos.y - h / 2.0,
                    w,
                    h,
                ],
                alpha,
                flip: (body.facing == Facing::Left) as u32,
                health_bar,
                sheet: layout.sheet as u32,
            }
        })
        .collect()
}

/// Numbers the HUD overlay shows
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub status: GameStatus,
    pub level: u32,
    pub score: u64,
    pub lives: u8,
    /// Player health fraction (0-1), 0 without a player
    pub health: f32,
    pub special_energy: u32,
    /// Displayed combo; only shown above 1
    pub combo: Option<u32>,
    pub level_progress: f32,
    pub enemies_defeated: u32,
    pub defeat_quota: u32,
    pub background_offset: f32,
}

impl Hud {
    pub fn from_world(world: &World) -> Self {
        let state = &world.state;
        let (health, special_energy) = world
            .player
            .as_ref()
            .map(|p| {
                (
                    p.body.health as f32 / p.body.max_health as f32,
                    p.special_energy(),
                )
            })
            .unwrap_or((0.0, 0));

        Self {
            status: state.status,
            level: state.level,
            score: state.score,
            lives: state.lives,
            health,
            special_energy,
            combo: (state.combo > 1).then_some(state.combo),
            level_progress: state.level_progress,
            enemies_defeated: state.enemies_defeated,
            defeat_quota: world.tuning.defeat_quota,
            background_offset: state.camera.x * BACKGROUND_PARALLAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::audio::NullAudio;
    use crate::sim::{CharacterKind, EnemyKind, Player};
    use glam::Vec2;

    fn world_with_fighters() -> World {
        let mut world = World::new(1, Tuning::default());
        world.spawn_enemy(EnemyKind::Punk, Vec2::new(700.0, 300.0));
        world.player = Some(Player::new(CharacterKind::Axel, 50, Vec2::new(600.0, 300.0)));
        world.state.camera.x = 88.0;
        world
    }

    #[test]
    fn test_instance_is_gpu_sized() {
        assert_eq!(std::mem::size_of::<SpriteInstance>(), 48);
        let list = draw_list(&world_with_fighters(), 0.0, &Settings::default());
        assert_eq!(bytemuck::cast_slice::<SpriteInstance, u8>(list.as_slice()).len(), 96);
    }

    #[test]
    fn test_draw_list_is_camera_relative() {
        let list = draw_list(&world_with_fighters(), 0.0, &Settings::default());
        let enemy = &list[0];
        let player = &list[1];

        assert_eq!(enemy.dst, [700.0 - 32.0 - 88.0, 268.0, 64.0, 64.0]);
        assert_eq!(enemy.flip, 1);
        assert_eq!(enemy.sheet, SpriteSheet::Axel as u32);
        assert_eq!(enemy.health_bar, -1.0);

        assert_eq!(player.dst, [600.0 - 24.0 - 88.0, 260.0, 48.0, 80.0]);
        assert_eq!(player.src, [0.0, 0.0, 48.0, 80.0]);
        assert_eq!(player.flip, 0);
        assert_eq!(player.alpha, 1.0);
    }

    #[test]
    fn test_damaged_enemy_shows_health_bar() {
        let mut world = world_with_fighters();
        world.enemies[0].take_damage(20, &mut NullAudio);
        world.enemies[0].body.facing = Facing::Right;
        let list = draw_list(&world, 0.0, &Settings::default());
        assert!((list[0].health_bar - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(list[0].flip, 0);
    }

    #[test]
    fn test_invulnerable_flicker_respects_reduced_motion() {
        let mut world = world_with_fighters();
        world.enemies[0].take_damage(5, &mut NullAudio);
        // sin(25 * 0.02) = sin(0.5)
        let t = 25.0;
        let expected = flicker_alpha(t);
        assert!(expected < 1.0);

        let list = draw_list(&world, t, &Settings::default());
        assert_eq!(list[0].alpha, expected);

        let calm = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let list = draw_list(&world, t, &calm);
        assert_eq!(list[0].alpha, 1.0);
    }

    #[test]
    fn test_hud_snapshot() {
        let mut world = world_with_fighters();
        world.state.combo = 1;
        world.player.as_mut().unwrap().body.health = 25;
        let hud = Hud::from_world(&world);
        assert_eq!(hud.combo, None);
        assert_eq!(hud.health, 0.25);
        assert_eq!(hud.defeat_quota, 20);
        assert_eq!(hud.background_offset, 44.0);

        world.state.combo = 4;
        assert_eq!(Hud::from_world(&world).combo, Some(4));
    }
}
