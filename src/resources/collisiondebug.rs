//! Collision debug toggle resource.
//!
//! The mere presence of this resource enables collider and pivot overlays
//! plus the on-screen diagnostics line. Remove it to disable them.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the renderer draws collision overlays.
#[derive(Resource, Clone, Copy)]
pub struct CollisionDebug {}
