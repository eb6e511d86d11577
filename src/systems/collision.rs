//! Collision detection.
//!
//! Pairwise AABB overlap over every entity carrying a position and a
//! [`BoxCollider`]. Each unordered overlapping pair is reported once per
//! frame as a [`CollisionEvent`] message.

use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::events::collision::CollisionEvent;

pub fn collision_detector(
    query: Query<(Entity, &MapPosition, &BoxCollider)>,
    mut writer: MessageWriter<CollisionEvent>,
) {
    for [(entity_a, position_a, collider_a), (entity_b, position_b, collider_b)] in
        query.iter_combinations()
    {
        if collider_a.overlaps(position_a.pos, collider_b, position_b.pos) {
            writer.write(CollisionEvent {
                a: entity_a,
                b: entity_b,
            });
        }
    }
}

/// Advance the ECS message queue for [`CollisionEvent`].
pub fn update_collision_messages(mut msgs: ResMut<Messages<CollisionEvent>>) {
    msgs.update();
}
