use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// World-space position of an entity. The vector is the entity's pivot:
/// sprites and skeletons are placed relative to it.
#[derive(Component, Clone, Copy, Debug)]
pub struct MapPosition {
    pub pos: Vector2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vector2 { x, y },
        }
    }
}
