//! Frame-based sprite animation
//!
//! Each combatant state maps to a clip (ordered frame indices, frame
//! duration, loop flag). The clip is re-applied every tick; only the
//! `finished` edge of a non-looping clip feeds back into gameplay.

use super::combatant::CombatantState;

/// A fixed frame sequence for one combatant state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClip {
    pub frames: &'static [u32],
    pub frame_ms: f32,
    pub looping: bool,
}

impl AnimationClip {
    pub const fn new(frames: &'static [u32], frame_ms: f32, looping: bool) -> Self {
        Self {
            frames,
            frame_ms,
            looping,
        }
    }
}

/// Clip table for every animated state
#[derive(Debug, Clone, Copy)]
pub struct ClipSet {
    pub idle: AnimationClip,
    pub walking: AnimationClip,
    pub punching: AnimationClip,
    pub hit: AnimationClip,
    pub dying: AnimationClip,
}

impl ClipSet {
    /// Clip for a state (`Dead` keeps whatever was last shown)
    pub fn for_state(&self, state: CombatantState) -> Option<&AnimationClip> {
        match state {
            CombatantState::Idle => Some(&self.idle),
            CombatantState::Walking => Some(&self.walking),
            CombatantState::Punching => Some(&self.punching),
            CombatantState::Hit => Some(&self.hit),
            CombatantState::Dying => Some(&self.dying),
            CombatantState::Dead => None,
        }
    }
}

pub const BLAZE_CLIPS: ClipSet = ClipSet {
    idle: AnimationClip::new(&[0, 1], 500.0, true),
    walking: AnimationClip::new(&[2, 3, 4, 5], 150.0, true),
    punching: AnimationClip::new(&[6, 7, 8], 100.0, false),
    hit: AnimationClip::new(&[9], 300.0, false),
    dying: AnimationClip::new(&[9], 500.0, false),
};

pub const AXEL_CLIPS: ClipSet = ClipSet {
    idle: AnimationClip::new(&[0, 1, 2], 500.0, true),
    walking: AnimationClip::new(&[10, 11, 12, 13, 14, 15], 150.0, true),
    punching: AnimationClip::new(&[20, 21, 22], 100.0, false),
    hit: AnimationClip::new(&[30], 300.0, false),
    dying: AnimationClip::new(&[30], 500.0, false),
};

/// Enemies share one layout on the Axel sheet
pub const ENEMY_CLIPS: ClipSet = ClipSet {
    idle: AnimationClip::new(&[0, 1, 2], 600.0, true),
    walking: AnimationClip::new(&[10, 11, 12, 13], 300.0, true),
    punching: AnimationClip::new(&[20, 21, 22], 200.0, false),
    hit: AnimationClip::new(&[30], 300.0, false),
    dying: AnimationClip::new(&[40], 500.0, false),
};

/// Playback state of the current clip
#[derive(Debug, Clone)]
pub struct Animation {
    pub frames: &'static [u32],
    pub current_frame: usize,
    /// Milliseconds accumulated on the current frame
    pub frame_time: f32,
    pub max_frame_time: f32,
    pub looping: bool,
    pub finished: bool,
}

impl Animation {
    pub fn new(clip: &AnimationClip) -> Self {
        Self {
            frames: clip.frames,
            current_frame: 0,
            frame_time: 0.0,
            max_frame_time: clip.frame_ms,
            looping: clip.looping,
            finished: false,
        }
    }

    /// Rewind to the first frame. Accumulated frame time is kept.
    pub fn restart(&mut self) {
        self.current_frame = 0;
        self.finished = false;
    }

    /// Accumulate `dt` and step frames. Returns true when a non-looping
    /// clip reaches the end of its last frame on this call.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.frame_time += dt;
        if self.frame_time < self.max_frame_time {
            return false;
        }
        self.frame_time = 0.0;

        if self.current_frame + 1 < self.frames.len() {
            self.current_frame += 1;
            false
        } else if self.looping {
            self.current_frame = 0;
            false
        } else {
            self.finished = true;
            true
        }
    }

    /// Switch frame set, duration and loop flag without rewinding
    pub fn apply_clip(&mut self, clip: &AnimationClip) {
        self.frames = clip.frames;
        self.max_frame_time = clip.frame_ms;
        self.looping = clip.looping;
        if self.current_frame >= self.frames.len() {
            self.current_frame = 0;
        }
    }

    /// Sprite frame index currently shown
    pub fn frame_index(&self) -> u32 {
        self.frames.get(self.current_frame).copied().unwrap_or(0)
    }
}
