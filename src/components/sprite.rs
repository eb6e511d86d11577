use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Textured quad identified by a texture key in the
/// [`TextureStore`](crate::resources::texturestore::TextureStore).
///
/// `width`/`height` are the drawn size in world units; `offset` selects the
/// source frame inside a sprite sheet; `origin` is the pivot in pixels
/// relative to the frame's top-left.
#[derive(Component, Clone, Debug)]
pub struct Sprite {
    pub tex_key: String,
    pub width: f32,
    pub height: f32,
    pub offset: Vector2,
    pub origin: Vector2,
    pub flip_h: bool,
    pub flip_v: bool,
}

impl Sprite {
    /// A sprite with zero size. The loader sizes it once its texture is
    /// available.
    pub fn pending(tex_key: impl Into<String>) -> Self {
        Self::sized(tex_key, 0.0, 0.0)
    }

    pub fn sized(tex_key: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            tex_key: tex_key.into(),
            width,
            height,
            offset: Vector2::zero(),
            origin: Vector2::zero(),
            flip_h: false,
            flip_v: false,
        }
    }

    /// Resize to the given dimensions and center the pivot. Used by the
    /// loader when a texture arrives for a sprite that was spawned without
    /// a known size.
    pub fn fit_to(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.origin = Vector2 {
            x: width * 0.5,
            y: height * 0.5,
        };
    }

    /// Whether the loader still needs to size this sprite.
    pub fn is_pending(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}
