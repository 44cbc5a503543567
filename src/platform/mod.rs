//! Platform input layer
//!
//! Maps physical key codes (`KeyboardEvent.code` names) onto the
//! simulation's input queries. Browser listeners live in [`web`].

use std::collections::HashSet;

use crate::sim::{CharacterKind, InputSource, TickInput};

#[cfg(target_arch = "wasm32")]
pub mod web;

const LEFT: &[&str] = &["ArrowLeft", "KeyA"];
const RIGHT: &[&str] = &["ArrowRight", "KeyD"];
const UP: &[&str] = &["ArrowUp", "KeyW"];
const DOWN: &[&str] = &["ArrowDown", "KeyS"];
const PUNCH: &[&str] = &["Space", "KeyZ", "Enter"];
const SPECIAL: &[&str] = &["KeyX", "ShiftLeft"];

/// Keys currently held plus one-shot presses waiting for the next tick
#[derive(Debug, Default)]
pub struct KeyboardState {
    held: HashSet<String>,
    pause_queued: bool,
    choice_queued: Option<CharacterKind>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, code: &str) {
        // Auto-repeat must not retrigger one-shot actions
        if !self.held.insert(code.to_string()) {
            return;
        }
        match code {
            "Escape" => self.pause_queued = true,
            "Digit1" => self.choice_queued = Some(CharacterKind::Blaze),
            "Digit2" => self.choice_queued = Some(CharacterKind::Axel),
            _ => {}
        }
    }

    pub fn key_up(&mut self, code: &str) {
        self.held.remove(code);
    }

    /// Drop every held key (window lost focus)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_down(&self, code: &str) -> bool {
        self.held.contains(code)
    }

    fn any_down(&self, codes: &[&str]) -> bool {
        codes.iter().any(|code| self.is_down(code))
    }

    /// Snapshot for one tick. One-shot presses are consumed.
    pub fn sample(&mut self) -> TickInput {
        let input = TickInput {
            left: self.moving_left(),
            right: self.moving_right(),
            up: self.moving_up(),
            down: self.moving_down(),
            punch: self.punching(),
            special: self.special_attack(),
            choose: self.character_choice(),
            pause: self.pause_pressed(),
        };
        self.pause_queued = false;
        self.choice_queued = None;
        input
    }
}

impl InputSource for KeyboardState {
    fn moving_left(&self) -> bool {
        self.any_down(LEFT)
    }

    fn moving_right(&self) -> bool {
        self.any_down(RIGHT)
    }

    fn moving_up(&self) -> bool {
        self.any_down(UP)
    }

    fn moving_down(&self) -> bool {
        self.any_down(DOWN)
    }

    fn punching(&self) -> bool {
        self.any_down(PUNCH)
    }

    fn special_attack(&self) -> bool {
        self.any_down(SPECIAL)
    }

    fn character_choice(&self) -> Option<CharacterKind> {
        self.choice_queued
    }

    fn pause_pressed(&self) -> bool {
        self.pause_queued
    }
}
