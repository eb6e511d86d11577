//! Asset manifest component.
//!
//! Attach an [`AssetManifest`] to an entity to declare the assets it needs.
//! When the component appears, the manifest system resolves every entry
//! through the [`ResourceRoot`](crate::resources::resourceroot::ResourceRoot)
//! and dispatches load requests targeted at the owning entity: textures size
//! the entity's sprite, sheets attach sheet playback, skeletons attach a
//! pose, and music/sounds go to the audio thread.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::resources::resourceroot::ResourceRoot;

/// One declared asset: a file name relative to the resource root, and an
/// optional explicit store key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub file: String,
    #[serde(default)]
    pub key: Option<String>,
}

impl ManifestEntry {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            key: None,
        }
    }

    pub fn keyed(file: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            key: Some(key.into()),
        }
    }

    /// The store key: the explicit one, or the stem-lowercase convention.
    pub fn key(&self) -> String {
        self.key
            .clone()
            .unwrap_or_else(|| ResourceRoot::asset_key(&self.file))
    }
}

/// Declares the assets an entity needs, per asset class.
#[derive(Debug, Clone, Default, Component, Serialize, Deserialize)]
pub struct AssetManifest {
    #[serde(default)]
    pub textures: Vec<ManifestEntry>,
    #[serde(default)]
    pub sheets: Vec<ManifestEntry>,
    #[serde(default)]
    pub skeletons: Vec<ManifestEntry>,
    #[serde(default)]
    pub music: Vec<ManifestEntry>,
    #[serde(default)]
    pub sounds: Vec<ManifestEntry>,
}

impl AssetManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_texture(mut self, file: impl Into<String>) -> Self {
        self.textures.push(ManifestEntry::new(file));
        self
    }

    pub fn with_sheet(mut self, file: impl Into<String>) -> Self {
        self.sheets.push(ManifestEntry::new(file));
        self
    }

    /// `file` is the skeleton base name; the loader expands it to the
    /// `_ske.json` / `_tex.json` / texture triplet.
    pub fn with_skeleton(mut self, file: impl Into<String>) -> Self {
        self.skeletons.push(ManifestEntry::new(file));
        self
    }

    pub fn with_music(mut self, file: impl Into<String>) -> Self {
        self.music.push(ManifestEntry::new(file));
        self
    }

    pub fn with_sound(mut self, file: impl Into<String>) -> Self {
        self.sounds.push(ManifestEntry::new(file));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
            && self.sheets.is_empty()
            && self.skeletons.is_empty()
            && self.music.is_empty()
            && self.sounds.is_empty()
    }
}
