//! Texture store resource.
//!
//! Loaded textures keyed by string IDs. The loader system fills it from
//! manifest requests; rendering looks textures up by the key stored in
//! [`Sprite`](crate::components::sprite::Sprite).

use bevy_ecs::prelude::Resource;
use raylib::prelude::Texture2D;
use rustc_hash::FxHashMap;

#[derive(Resource, Default)]
pub struct TextureStore {
    textures: FxHashMap<String, Texture2D>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, texture: Texture2D) {
        self.textures.insert(key.into(), texture);
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&Texture2D> {
        self.textures.get(key.as_ref())
    }

    pub fn contains(&self, key: impl AsRef<str>) -> bool {
        self.textures.contains_key(key.as_ref())
    }

    pub fn remove(&mut self, key: impl AsRef<str>) -> Option<Texture2D> {
        self.textures.remove(key.as_ref())
    }

    pub fn clear(&mut self) {
        self.textures.clear();
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
