//! Per-frame world loop
//!
//! One [`tick`] advances everything by the host-measured `dt` (ms):
//! player, enemies, collision resolution, camera, combo display, spawns,
//! level completion and pruning, in that order.

use glam::Vec2;
use rand::Rng;

use super::enemy::EnemyKind;
use super::input::InputSource;
use super::player::{CharacterKind, Player};
use super::state::{GameStatus, World};
use crate::audio::{AudioSink, MusicTrack};
use crate::consts::*;

/// Turns host timestamps into clamped tick deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since the previous call. The first call returns 0 so an
    /// uninitialized timestamp never turns into an integration spike.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => (now_ms - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt.min(MAX_FRAME_DT_MS)
    }
}

/// Advance the world by one frame
pub fn tick(world: &mut World, input: &dyn InputSource, audio: &mut dyn AudioSink, dt: f32) {
    // Nothing runs until assets are in; a failed load stays a no-op forever
    if !world.assets_ready() {
        return;
    }

    let confirm = input.punching();
    let confirm_pressed = confirm && !world.confirm_held;
    world.confirm_held = confirm;

    if input.pause_pressed() {
        match world.state.status {
            GameStatus::Playing => {
                world.state.status = GameStatus::Paused;
                log::info!("Paused");
                return;
            }
            GameStatus::Paused => {
                world.state.status = GameStatus::Playing;
                log::info!("Resumed");
            }
            _ => {}
        }
    }

    match world.state.status {
        GameStatus::Menu => update_menu(world, input, confirm_pressed, audio),
        GameStatus::Playing => update_gameplay(world, input, audio, dt),
        GameStatus::Paused => {}
        GameStatus::GameOver => {
            if confirm_pressed {
                log::info!("Restarting (final score {})", world.state.score);
                world.reset();
                audio.stop_music();
            }
        }
        GameStatus::LevelComplete => {
            if confirm_pressed {
                next_level(world, audio);
            }
        }
    }
}

fn update_menu(
    world: &mut World,
    input: &dyn InputSource,
    confirm_pressed: bool,
    audio: &mut dyn AudioSink,
) {
    if let Some(choice) = input.character_choice() {
        if world.state.selected_character != Some(choice) {
            log::info!("Selected {}", choice.display_name());
        }
        world.state.selected_character = Some(choice);
    }

    if confirm_pressed {
        if let Some(character) = world.state.selected_character {
            start_game(world, character, audio);
        }
    }
}

fn start_game(world: &mut World, character: CharacterKind, audio: &mut dyn AudioSink) {
    let id = world.next_entity_id();
    world.player = Some(Player::new(character, id, PLAYER_SPAWN));
    world.state.status = GameStatus::Playing;
    log::info!("Game started as {}", character.display_name());
    start_level(world, audio);
}

fn next_level(world: &mut World, audio: &mut dyn AudioSink) {
    world.state.level += 1;
    if let Some(player) = world.player.as_mut() {
        player.respawn(PLAYER_SPAWN);
    }
    world.state.status = GameStatus::Playing;
    start_level(world, audio);
}

/// Fresh enemies and counters for the current level; score and lives carry over
fn start_level(world: &mut World, audio: &mut dyn AudioSink) {
    world.enemies.clear();
    world.state.camera = Vec2::ZERO;
    world.state.level_progress = 0.0;
    world.state.enemies_defeated = 0;
    world.state.combo = 0;
    world.state.combo_timer = 0.0;

    for i in 0..world.tuning.initial_enemies {
        let y = 250.0 + world.rng.random::<f32>() * 100.0;
        world.spawn_enemy(EnemyKind::Punk, Vec2::new(300.0 + i as f32 * 150.0, y));
    }

    audio.play_music(MusicTrack::for_level(world.state.level));
    log::info!("Level {} started", world.state.level);
}

fn update_gameplay(
    world: &mut World,
    input: &dyn InputSource,
    audio: &mut dyn AudioSink,
    dt: f32,
) {
    let Some(player) = world.player.as_mut() else {
        return;
    };
    player.update(dt, input, audio);
    let player_pos = player.body.pos;

    for enemy in &mut world.enemies {
        enemy.update(dt, player_pos, &mut world.rng, audio);
    }

    resolve_collisions(world, audio);
    update_camera(world);
    update_combo_display(world, dt);
    spawn_enemies(world);

    // A game over earlier in this tick wins over level completion
    if world.state.status == GameStatus::Playing {
        check_level_completion(world, audio);
    }

    world.enemies.retain(|enemy| !enemy.body.is_dead());
}

fn resolve_collisions(world: &mut World, audio: &mut dyn AudioSink) {
    let Some(player) = world.player.as_mut() else {
        return;
    };
    let state = &mut world.state;
    let tuning = &world.tuning;

    // Player attack vs enemies
    if let Some(attack) = player.body.active_attack() {
        for enemy in &mut world.enemies {
            if !attack.overlaps(&enemy.body.hitbox) {
                continue;
            }
            if enemy.take_damage(tuning.player_attack_damage, audio) {
                state.score += tuning.score_for(enemy.kind);
                state.enemies_defeated += 1;
                state.combo = player.combo_count();
                state.combo_timer = tuning.combo_display_ms;
                log::debug!(
                    "{} #{} defeated (score {}, defeated {})",
                    enemy.kind.display_name(),
                    enemy.body.id,
                    state.score,
                    state.enemies_defeated
                );
            }
        }
    }

    // Enemy attacks vs player
    for enemy in &world.enemies {
        let Some(attack) = enemy.body.active_attack() else {
            continue;
        };
        if !attack.overlaps(&player.body.hitbox) {
            continue;
        }

        player.take_damage(enemy.attack_damage(), audio);
        if player.body.health > 0 {
            continue;
        }

        state.lives = state.lives.saturating_sub(1);
        if state.lives == 0 {
            state.status = GameStatus::GameOver;
            log::info!("Game over (score {})", state.score);
            break;
        }
        player.respawn(PLAYER_SPAWN);
        log::debug!("Player respawned ({} lives left)", state.lives);
    }
}

fn update_camera(world: &mut World) {
    let Some(player) = world.player.as_ref() else {
        return;
    };
    let max_x = LEVEL_WIDTH - VIEWPORT_WIDTH;
    let target = player.body.pos.x - VIEWPORT_WIDTH / 2.0;
    world.state.camera.x = target.clamp(0.0, max_x);
    world.state.level_progress = world.state.camera.x / max_x;
}

fn update_combo_display(world: &mut World, dt: f32) {
    let state = &mut world.state;
    if state.combo_timer > 0.0 {
        state.combo_timer -= dt;
        if state.combo_timer <= 0.0 {
            state.combo = 0;
        }
    }
}

fn spawn_enemies(world: &mut World) {
    if world.enemies.len() >= world.tuning.max_live_enemies {
        return;
    }
    if world.rng.random::<f32>() >= world.tuning.spawn_chance {
        return;
    }

    let x = world.state.camera.x + VIEWPORT_WIDTH + 50.0;
    let y = LANE_TOP + world.rng.random::<f32>() * (LANE_BOTTOM - LANE_TOP);
    let kind = if world.rng.random::<f32>() < world.tuning.bruiser_spawn_chance {
        EnemyKind::Bruiser
    } else {
        EnemyKind::Punk
    };
    world.spawn_enemy(kind, Vec2::new(x, y));
}

fn check_level_completion(world: &mut World, audio: &mut dyn AudioSink) {
    if world.state.enemies_defeated >= world.tuning.defeat_quota {
        world.state.status = GameStatus::LevelComplete;
        audio.stop_music();
        log::info!(
            "Level {} complete (score {})",
            world.state.level,
            world.state.score
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::assets::AssetError;
    use crate::sim::combatant::CombatantState;
    use crate::sim::enemy::AiState;
    use crate::sim::input::TickInput;
    use crate::test_utils::RecordingAudio;

    const DT: f32 = 16.0;

    fn quiet_tuning() -> Tuning {
        Tuning {
            spawn_chance: 0.0,
            initial_enemies: 0,
            ..Default::default()
        }
    }

    /// Loaded world already in `Playing` with Blaze at the spawn point
    fn playing_world(tuning: Tuning, audio: &mut RecordingAudio) -> World {
        let mut world = World::new(12345, tuning);
        world.finish_loading(Ok(()));
        let choose = TickInput {
            choose: Some(CharacterKind::Blaze),
            ..Default::default()
        };
        tick(&mut world, &choose, audio, DT);
        tick(&mut world, &TickInput::punch(), audio, DT);
        tick(&mut world, &TickInput::default(), audio, DT);
        assert_eq!(world.state.status, GameStatus::Playing);
        world
    }

    fn player(world: &World) -> &Player {
        world.player.as_ref().unwrap()
    }

    /// Enemy right in front of the player that dies to one punch
    fn spawn_fragile(world: &mut World, kind: EnemyKind) {
        world.spawn_enemy(kind, Vec2::new(130.0, 300.0));
        let enemy = world.enemies.last_mut().unwrap();
        enemy.body.health = 20;
    }

    fn idle(world: &mut World, audio: &mut RecordingAudio, ticks: usize) {
        for _ in 0..ticks {
            tick(world, &TickInput::default(), audio, DT);
        }
    }

    #[test]
    fn test_frame_clock() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(5000.0), 0.0);
        assert_eq!(clock.delta(5016.0), 16.0);
        assert_eq!(clock.delta(6000.0), MAX_FRAME_DT_MS);
        assert_eq!(clock.delta(5990.0), 0.0);
    }

    #[test]
    fn test_ticks_are_noops_until_assets_ready() {
        let mut audio = RecordingAudio::default();
        let mut world = World::new(1, Tuning::default());
        let start = TickInput {
            choose: Some(CharacterKind::Axel),
            punch: true,
            ..Default::default()
        };
        tick(&mut world, &start, &mut audio, DT);
        assert_eq!(world.state.status, GameStatus::Menu);
        assert_eq!(world.state.selected_character, None);

        world.finish_loading(Err(AssetError::Decode {
            key: "music_level1".into(),
            reason: "bad header".into(),
        }));
        tick(&mut world, &start, &mut audio, DT);
        assert_eq!(world.state.status, GameStatus::Menu);
        assert!(audio.music_started.is_empty());
    }

    #[test]
    fn test_menu_needs_selection_and_confirm_edge() {
        let mut audio = RecordingAudio::default();
        let mut world = World::new(1, Tuning::default());
        world.finish_loading(Ok(()));

        tick(&mut world, &TickInput::punch(), &mut audio, DT);
        assert_eq!(world.state.status, GameStatus::Menu);

        // Still held from the previous tick: not a new press
        let held = TickInput {
            choose: Some(CharacterKind::Axel),
            punch: true,
            ..Default::default()
        };
        tick(&mut world, &held, &mut audio, DT);
        assert_eq!(world.state.status, GameStatus::Menu);
        assert_eq!(world.state.selected_character, Some(CharacterKind::Axel));

        tick(&mut world, &TickInput::default(), &mut audio, DT);
        tick(&mut world, &TickInput::punch(), &mut audio, DT);
        assert_eq!(world.state.status, GameStatus::Playing);
        assert_eq!(player(&world).character, CharacterKind::Axel);
        assert_eq!(player(&world).body.pos, PLAYER_SPAWN);
        assert_eq!(audio.music, Some(MusicTrack::Level1));

        let xs: Vec<f32> = world.enemies.iter().map(|e| e.body.pos.x).collect();
        assert_eq!(xs, vec![300.0, 450.0, 600.0]);
        assert!(world.enemies.iter().all(|e| e.kind == EnemyKind::Punk));
        assert!(
            world
                .enemies
                .iter()
                .all(|e| (250.0..=350.0).contains(&e.body.pos.y))
        );
    }

    #[test]
    fn test_punch_scenario_deals_fixed_damage() {
        let mut audio = RecordingAudio::default();
        let mut world = playing_world(quiet_tuning(), &mut audio);
        world.spawn_enemy(EnemyKind::Bruiser, Vec2::new(130.0, 300.0));

        tick(&mut world, &TickInput::punch(), &mut audio, DT);
        let attack = player(&world).body.active_attack().unwrap();
        assert_eq!((attack.x, attack.right()), (100.0, 160.0));
        assert_eq!(world.enemies[0].body.health, 40);
        assert_eq!(world.enemies[0].ai_state, AiState::Stunned);

        // Same attack window, but the enemy is now invulnerable
        tick(&mut world, &TickInput::default(), &mut audio, DT);
        assert_eq!(world.enemies[0].body.health, 40);
    }

    #[test]
    fn test_score_for_one_of_each() {
        let mut audio = RecordingAudio::default();
        let mut world = playing_world(quiet_tuning(), &mut audio);

        for kind in [EnemyKind::Punk, EnemyKind::Bruiser, EnemyKind::Boss] {
            spawn_fragile(&mut world, kind);
            tick(&mut world, &TickInput::punch(), &mut audio, DT);
            assert_eq!(world.enemies[0].body.state, CombatantState::Dying);
            // Let the dying clip play out and the punch cooldown lapse
            idle(&mut world, &mut audio, 50);
            assert!(world.enemies.is_empty());
        }

        assert_eq!(world.state.score, 800);
        assert_eq!(world.state.enemies_defeated, 3);
        assert_eq!(audio.count(crate::audio::SoundEffect::EnemyDeath), 3);
    }

    #[test]
    fn test_defeat_sets_combo_display() {
        let mut audio = RecordingAudio::default();
        let mut world = playing_world(quiet_tuning(), &mut audio);
        spawn_fragile(&mut world, EnemyKind::Punk);
        tick(&mut world, &TickInput::punch(), &mut audio, DT);
        assert_eq!(world.state.combo, 1);
        assert_eq!(world.state.combo_timer, 2000.0 - DT);

        world.state.combo_timer = 20.0;
        idle(&mut world, &mut audio, 1);
        assert_eq!(world.state.combo, 1);
        idle(&mut world, &mut audio, 1);
        assert_eq!(world.state.combo, 0);
    }

    #[test]
    fn test_level_completes_on_quota_tick() {
        let mut audio = RecordingAudio::default();
        let mut world = playing_world(quiet_tuning(), &mut audio);
        world.state.enemies_defeated = 19;
        idle(&mut world, &mut audio, 3);
        assert_eq!(world.state.status, GameStatus::Playing);

        spawn_fragile(&mut world, EnemyKind::Punk);
        tick(&mut world, &TickInput::punch(), &mut audio, DT);
        assert_eq!(world.state.enemies_defeated, 20);
        assert_eq!(world.state.status, GameStatus::LevelComplete);
        assert_eq!(audio.stops, 1);
        assert_eq!(audio.music, None);
    }

    #[test]
    fn test_next_level_carries_score_and_lives() {
        let mut audio = RecordingAudio::default();
        let mut world = playing_world(
            Tuning {
                spawn_chance: 0.0,
                ..Default::default()
            },
            &mut audio,
        );
        world.state.status = GameStatus::LevelComplete;
        world.state.score = 2300;
        world.state.lives = 2;
        world.state.enemies_defeated = 20;
        world.player.as_mut().unwrap().body.pos = Vec2::new(900.0, 350.0);

        idle(&mut world, &mut audio, 2);
        assert_eq!(world.state.status, GameStatus::LevelComplete);
        tick(&mut world, &TickInput::punch(), &mut audio, DT);

        assert_eq!(world.state.status, GameStatus::Playing);
        assert_eq!(world.state.level, 2);
        assert_eq!(world.state.score, 2300);
        assert_eq!(world.state.lives, 2);
        assert_eq!(world.state.enemies_defeated, 0);
        assert_eq!(world.enemies.len(), 3);
        assert_eq!(player(&world).body.pos, PLAYER_SPAWN);
        assert_eq!(audio.music, Some(MusicTrack::Level2));
    }

    /// Punk one step in front of the player, mid-swing next tick
    fn armed_punk(world: &mut World) {
        world.spawn_enemy(EnemyKind::Punk, Vec2::new(130.0, 300.0));
        let enemy = world.enemies.last_mut().unwrap();
        enemy.ai_state = AiState::Attack;
    }

    #[test]
    fn test_last_life_lost_is_game_over() {
        let mut audio = RecordingAudio::default();
        let mut world = playing_world(quiet_tuning(), &mut audio);
        world.state.lives = 1;
        world.player.as_mut().unwrap().body.health = 10;
        armed_punk(&mut world);

        idle(&mut world, &mut audio, 1);
        assert_eq!(world.state.lives, 0);
        assert_eq!(world.state.status, GameStatus::GameOver);
        assert_eq!(player(&world).body.state, CombatantState::Dying);

        // Frozen until restart
        let score = world.state.score;
        idle(&mut world, &mut audio, 5);
        assert_eq!(world.state.status, GameStatus::GameOver);
        assert_eq!(world.state.score, score);
    }

    #[test]
    fn test_lethal_hit_with_lives_left_respawns() {
        let mut audio = RecordingAudio::default();
        let mut world = playing_world(quiet_tuning(), &mut audio);
        world.player.as_mut().unwrap().body.health = 10;
        armed_punk(&mut world);

        idle(&mut world, &mut audio, 1);
        assert_eq!(world.state.lives, 2);
        assert_eq!(world.state.status, GameStatus::Playing);
        let p = player(&world);
        assert_eq!(p.body.health, PLAYER_MAX_HEALTH);
        assert_eq!(p.body.pos, PLAYER_SPAWN);
        assert_eq!(p.body.state, CombatantState::Idle);
    }

    #[test]
    fn test_non_lethal_hit_costs_health_only() {
        let mut audio = RecordingAudio::default();
        let mut world = playing_world(quiet_tuning(), &mut audio);
        armed_punk(&mut world);

        idle(&mut world, &mut audio, 1);
        assert_eq!(player(&world).body.health, 90);
        assert_eq!(player(&world).combo_count(), 0);
        assert_eq!(world.state.lives, 3);
        assert_eq!(audio.count(crate::audio::SoundEffect::Hit), 1);
    }

    #[test]
    fn test_game_over_restart_resets_to_menu() {
        let mut audio = RecordingAudio::default();
        let mut world = playing_world(quiet_tuning(), &mut audio);
        world.state.status = GameStatus::GameOver;
        world.state.score = 1200;

        tick(&mut world, &TickInput::punch(), &mut audio, DT);
        assert_eq!(world.state.status, GameStatus::Menu);
        assert_eq!(world.state.score, 0);
        assert_eq!(world.state.lives, 3);
        assert!(world.player.is_none());
        assert_eq!(audio.music, None);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut audio = RecordingAudio::default();
        let mut world = playing_world(quiet_tuning(), &mut audio);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        let walk = TickInput {
            right: true,
            ..Default::default()
        };

        tick(&mut world, &pause, &mut audio, DT);
        assert_eq!(world.state.status, GameStatus::Paused);
        tick(&mut world, &walk, &mut audio, DT);
        assert_eq!(player(&world).body.pos, PLAYER_SPAWN);

        tick(&mut world, &pause, &mut audio, DT);
        assert_eq!(world.state.status, GameStatus::Playing);
        tick(&mut world, &walk, &mut audio, DT);
        assert!(player(&world).body.pos.x > PLAYER_SPAWN.x);
    }

    #[test]
    fn test_spawns_stop_at_live_cap() {
        let mut audio = RecordingAudio::default();
        let mut world = playing_world(
            Tuning {
                spawn_chance: 1.0,
                initial_enemies: 0,
                ..Default::default()
            },
            &mut audio,
        );
        world.enemies.clear();
        idle(&mut world, &mut audio, 10);

        assert_eq!(world.enemies.len(), 3);
        for enemy in &world.enemies {
            assert!(matches!(enemy.kind, EnemyKind::Punk | EnemyKind::Bruiser));
            assert!((LANE_TOP..=LANE_BOTTOM).contains(&enemy.body.pos.y));
            assert!(enemy.body.pos.x > world.state.camera.x + VIEWPORT_WIDTH);
        }
    }

    #[test]
    fn test_spawn_rate_and_kind_mix() {
        let mut world = World::new(7, Tuning::default());
        let ticks = 200_000;
        let mut spawns = 0u32;
        let mut bruisers = 0u32;
        for _ in 0..ticks {
            world.enemies.clear();
            spawn_enemies(&mut world);
            if let Some(enemy) = world.enemies.first() {
                spawns += 1;
                if enemy.kind == EnemyKind::Bruiser {
                    bruisers += 1;
                }
            }
        }

        let rate = spawns as f32 / ticks as f32;
        let bruiser_share = bruisers as f32 / spawns as f32;
        assert!((rate - 0.01).abs() < 0.0015, "spawn rate {rate}");
        assert!((bruiser_share - 0.3).abs() < 0.05, "bruiser share {bruiser_share}");
    }

    #[test]
    fn test_dead_enemies_are_pruned() {
        let mut audio = RecordingAudio::default();
        let mut world = playing_world(quiet_tuning(), &mut audio);
        world.spawn_enemy(EnemyKind::Punk, Vec2::new(900.0, 300.0));
        world.spawn_enemy(EnemyKind::Punk, Vec2::new(1200.0, 300.0));
        assert!(world.enemies[0].take_damage(100, &mut audio));

        idle(&mut world, &mut audio, 20);
        assert_eq!(world.enemies.len(), 2);
        idle(&mut world, &mut audio, 20);
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.enemies[0].body.pos.x, 1200.0);
        // Killed outside combat: no score
        assert_eq!(world.state.score, 0);
    }

    #[test]
    fn test_camera_follows_player_within_level() {
        let mut audio = RecordingAudio::default();
        let mut world = playing_world(quiet_tuning(), &mut audio);

        world.player.as_mut().unwrap().body.pos.x = 1000.0;
        idle(&mut world, &mut audio, 1);
        assert_eq!(world.state.camera.x, 488.0);
        assert!((world.state.level_progress - 488.0 / 1024.0).abs() < 1e-6);

        world.player.as_mut().unwrap().body.pos.x = 1900.0;
        idle(&mut world, &mut audio, 1);
        assert_eq!(world.state.camera.x, LEVEL_WIDTH - VIEWPORT_WIDTH);
        assert_eq!(world.state.level_progress, 1.0);

        world.player.as_mut().unwrap().body.pos.x = 50.0;
        idle(&mut world, &mut audio, 1);
        assert_eq!(world.state.camera.x, 0.0);
    }
}
