use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Playback state for a sprite-sheet animation defined in the
/// [`SheetStore`](crate::resources::sheetstore::SheetStore).
///
/// The sheet system advances `frame_index` at the sheet's frame rate and
/// writes the matching source offset into the entity's
/// [`Sprite`](crate::components::sprite::Sprite).
#[derive(Debug, Clone, Component, Serialize, Deserialize)]
pub struct SheetAnimation {
    pub sheet_key: String,
    pub frame_index: usize,
    pub elapsed: f32,
    /// Set once a non-looping sheet reaches its last frame.
    pub finished: bool,
}

impl SheetAnimation {
    pub fn new(sheet_key: impl Into<String>) -> Self {
        Self {
            sheet_key: sheet_key.into(),
            frame_index: 0,
            elapsed: 0.0,
            finished: false,
        }
    }

    /// Restart playback from the first frame.
    pub fn restart(&mut self) {
        self.frame_index = 0;
        self.elapsed = 0.0;
        self.finished = false;
    }
}
