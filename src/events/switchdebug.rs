//! Event and observer to toggle collision debug overlays.
//!
//! Triggering a [`SwitchCollisionDebugEvent`] flips the presence of the
//! [`CollisionDebug`] resource. The render system gates collider and pivot
//! overlays on it.

use crate::resources::collisiondebug::CollisionDebug;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

/// Carries no data; the observer switches the presence of the resource.
#[derive(Event, Debug, Clone, Copy)]
pub struct SwitchCollisionDebugEvent {}

/// Observer that toggles the [`CollisionDebug`] resource.
pub fn switch_collision_debug_observer(
    _trigger: On<SwitchCollisionDebugEvent>,
    mut commands: Commands,
    debug: Option<Res<CollisionDebug>>,
) {
    if debug.is_some() {
        commands.remove_resource::<CollisionDebug>();
        info!("collision debug disabled");
    } else {
        commands.insert_resource(CollisionDebug {});
        info!("collision debug enabled");
    }
}
