//! Sprite-sheet animation registry.
//!
//! A sheet is described by a small JSON file next to its texture:
//!
//! ```json
//! {
//!   "texture": "hero_walk.png",
//!   "frame_width": 80,
//!   "frame_height": 32,
//!   "frame_count": 8,
//!   "fps": 6.0,
//!   "looped": true,
//!   "row": 0
//! }
//! ```
//!
//! The loader parses the descriptor, loads the referenced texture from the
//! descriptor's directory, and registers a [`SheetResource`] that the sheet
//! system uses to drive [`SheetAnimation`](crate::components::sheetanim::SheetAnimation)
//! playback. Frames run left to right inside the chosen row.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

fn default_looped() -> bool {
    true
}

/// Serde model of the on-disk descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetDescriptor {
    /// Texture file, relative to the descriptor's directory.
    pub texture: String,
    pub frame_width: f32,
    pub frame_height: f32,
    pub frame_count: usize,
    pub fps: f32,
    #[serde(default = "default_looped")]
    pub looped: bool,
    /// Row of the sheet the frames live in (0-based).
    #[serde(default)]
    pub row: u32,
}

impl SheetDescriptor {
    /// Parse and validate a descriptor from JSON text.
    pub fn parse(json: &str) -> Result<Self, String> {
        let descriptor: SheetDescriptor =
            serde_json::from_str(json).map_err(|e| format!("invalid sheet descriptor: {}", e))?;
        if descriptor.frame_count == 0 {
            return Err("sheet descriptor has zero frames".into());
        }
        if descriptor.fps <= 0.0 {
            return Err("sheet descriptor fps must be positive".into());
        }
        if descriptor.frame_width <= 0.0 || descriptor.frame_height <= 0.0 {
            return Err("sheet descriptor frame size must be positive".into());
        }
        Ok(descriptor)
    }
}

/// Immutable playback parameters of a registered sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetResource {
    /// Key of the sheet texture in the texture store.
    pub tex_key: String,
    pub frame_width: f32,
    pub frame_height: f32,
    pub row: u32,
    pub frame_count: usize,
    pub fps: f32,
    pub looped: bool,
}

impl SheetResource {
    pub fn from_descriptor(descriptor: &SheetDescriptor, tex_key: impl Into<String>) -> Self {
        Self {
            tex_key: tex_key.into(),
            frame_width: descriptor.frame_width,
            frame_height: descriptor.frame_height,
            row: descriptor.row,
            frame_count: descriptor.frame_count,
            fps: descriptor.fps,
            looped: descriptor.looped,
        }
    }

    /// Source-rect offset of a frame inside the sheet texture.
    pub fn frame_offset(&self, frame_index: usize) -> (f32, f32) {
        (
            frame_index as f32 * self.frame_width,
            self.row as f32 * self.frame_height,
        )
    }
}

/// Central registry of sheet definitions keyed by string IDs.
#[derive(Resource, Default)]
pub struct SheetStore {
    sheets: FxHashMap<String, SheetResource>,
}

impl SheetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, sheet: SheetResource) {
        self.sheets.insert(key.into(), sheet);
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&SheetResource> {
        self.sheets.get(key.as_ref())
    }

    pub fn contains(&self, key: impl AsRef<str>) -> bool {
        self.sheets.contains_key(key.as_ref())
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}
