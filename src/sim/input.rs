//! Input sampled once per tick
//!
//! The simulation only asks boolean "is it held right now" questions. Any
//! keyboard/touch capture lives outside the core and implements
//! [`InputSource`].

use super::player::CharacterKind;

/// Synchronous input queries, sampled once per tick
pub trait InputSource {
    fn moving_left(&self) -> bool;
    fn moving_right(&self) -> bool;
    fn moving_up(&self) -> bool;
    fn moving_down(&self) -> bool;
    fn punching(&self) -> bool;
    fn special_attack(&self) -> bool;

    /// Character picked on the menu this tick, if any
    fn character_choice(&self) -> Option<CharacterKind> {
        None
    }

    /// One-shot pause toggle
    fn pause_pressed(&self) -> bool {
        false
    }
}

/// Plain input snapshot for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub punch: bool,
    pub special: bool,
    pub choose: Option<CharacterKind>,
    /// Pause toggle (cleared by the host after each tick)
    pub pause: bool,
}

impl TickInput {
    pub fn punch() -> Self {
        Self {
            punch: true,
            ..Default::default()
        }
    }
}

impl InputSource for TickInput {
    fn moving_left(&self) -> bool {
        self.left
    }

    fn moving_right(&self) -> bool {
        self.right
    }

    fn moving_up(&self) -> bool {
        self.up
    }

    fn moving_down(&self) -> bool {
        self.down
    }

    fn punching(&self) -> bool {
        self.punch
    }

    fn special_attack(&self) -> bool {
        self.special
    }

    fn character_choice(&self) -> Option<CharacterKind> {
        self.choose
    }

    fn pause_pressed(&self) -> bool {
        self.pause
    }
}
