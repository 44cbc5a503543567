//! Sprite sheet layouts
//!
//! Frames are laid out row-major on each sheet. Enemies borrow the Axel
//! sheet with a different cell size.

use crate::sim::{CharacterKind, CombatantTag};

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteSheet {
    Blaze = 0,
    Axel = 1,
}

impl SpriteSheet {
    /// Asset manifest key
    pub fn key(&self) -> &'static str {
        match self {
            SpriteSheet::Blaze => "blaze",
            SpriteSheet::Axel => "axel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetLayout {
    pub sheet: SpriteSheet,
    pub frame_width: f32,
    pub frame_height: f32,
    pub frames_per_row: u32,
}

impl SheetLayout {
    /// Source rectangle `[x, y, w, h]` of `frame` in sheet pixels
    pub fn source_rect(&self, frame: u32) -> [f32; 4] {
        let col = frame % self.frames_per_row;
        let row = frame / self.frames_per_row;
        [
            col as f32 * self.frame_width,
            row as f32 * self.frame_height,
            self.frame_width,
            self.frame_height,
        ]
    }
}

pub const BLAZE_LAYOUT: SheetLayout = SheetLayout {
    sheet: SpriteSheet::Blaze,
    frame_width: 48.0,
    frame_height: 64.0,
    frames_per_row: 8,
};

pub const AXEL_LAYOUT: SheetLayout = SheetLayout {
    sheet: SpriteSheet::Axel,
    frame_width: 48.0,
    frame_height: 80.0,
    frames_per_row: 10,
};

pub const ENEMY_LAYOUT: SheetLayout = SheetLayout {
    sheet: SpriteSheet::Axel,
    frame_width: 64.0,
    frame_height: 64.0,
    frames_per_row: 8,
};

pub fn layout_for(tag: CombatantTag) -> &'static SheetLayout {
    match tag {
        CombatantTag::Player(CharacterKind::Blaze) => &BLAZE_LAYOUT,
        CombatantTag::Player(CharacterKind::Axel) => &AXEL_LAYOUT,
        CombatantTag::Enemy(_) => &ENEMY_LAYOUT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::EnemyKind;

    #[test]
    fn test_source_rects() {
        assert_eq!(BLAZE_LAYOUT.source_rect(9), [48.0, 64.0, 48.0, 64.0]);
        assert_eq!(AXEL_LAYOUT.source_rect(22), [96.0, 160.0, 48.0, 80.0]);
        assert_eq!(ENEMY_LAYOUT.source_rect(40), [0.0, 320.0, 64.0, 64.0]);
    }

    #[test]
    fn test_enemies_use_axel_sheet() {
        let layout = layout_for(CombatantTag::Enemy(EnemyKind::Boss));
        assert_eq!(layout.sheet, SpriteSheet::Axel);
        assert_eq!(layout.frame_width, 64.0);
        assert_eq!(
            layout_for(CombatantTag::Player(CharacterKind::Blaze)).sheet.key(),
            "blaze"
        );
    }
}
