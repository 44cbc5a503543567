//! Scripted input for demo runs
//!
//! Picks a character, walks up to the nearest enemy, lines up on its lane
//! and punches. Confirm presses alternate with releases so menu and
//! restart edges register.

use super::combatant::{CombatantState, Facing};
use super::input::TickInput;
use super::player::CharacterKind;
use super::state::{GameStatus, World};
use crate::consts::ATTACK_BOX_HEIGHT;

/// Horizontal distance at which the autopilot stops walking and swings
const STRIKE_DISTANCE: f32 = 45.0;
/// Vertical misalignment tolerated before stepping up/down
const LANE_TOLERANCE: f32 = 10.0;
/// Half the attack box height: beyond this the swing cannot connect
const ATTACK_REACH_Y: f32 = ATTACK_BOX_HEIGHT / 2.0;

/// Input the autopilot would give for the current world
pub fn demo_input(world: &World) -> TickInput {
    let tap = !world.confirm_held;
    match world.state.status {
        GameStatus::Menu => TickInput {
            choose: Some(world.state.selected_character.unwrap_or(CharacterKind::Blaze)),
            punch: tap,
            ..Default::default()
        },
        GameStatus::GameOver | GameStatus::LevelComplete => TickInput {
            punch: tap,
            ..Default::default()
        },
        GameStatus::Paused => TickInput {
            pause: true,
            ..Default::default()
        },
        GameStatus::Playing => fight(world),
    }
}

fn fight(world: &World) -> TickInput {
    let mut input = TickInput::default();
    let Some(player) = world.player.as_ref() else {
        return input;
    };
    let pos = player.body.pos;

    let target = world
        .enemies
        .iter()
        .filter(|e| !matches!(e.body.state, CombatantState::Dying | CombatantState::Dead))
        .min_by(|a, b| {
            a.body
                .pos
                .distance_squared(pos)
                .total_cmp(&b.body.pos.distance_squared(pos))
        });

    let Some(target) = target else {
        // Nobody around: advance so new spawns come into range
        input.right = true;
        return input;
    };

    let dx = target.body.pos.x - pos.x;
    let dy = target.body.pos.y - pos.y;

    if dy.abs() > LANE_TOLERANCE {
        input.down = dy > 0.0;
        input.up = dy < 0.0;
    }

    let wants = if dx >= 0.0 { Facing::Right } else { Facing::Left };
    if dx.abs() > STRIKE_DISTANCE || player.body.facing != wants {
        input.right = wants == Facing::Right;
        input.left = wants == Facing::Left;
    }

    if dx.abs() <= STRIKE_DISTANCE && dy.abs() <= ATTACK_REACH_Y {
        input.punch = true;
        input.special = player.special_energy() > 40 && target.body.health > 20;
    }
    input
}
