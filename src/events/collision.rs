//! Collision notifications.

use bevy_ecs::message::Message;
use bevy_ecs::prelude::Entity;

/// An overlapping pair reported by the collision detector. Each unordered
/// pair appears once per frame.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    pub a: Entity,
    pub b: Entity,
}
