//! Load requests and results for the asset loader.
//!
//! Requests carry locations already resolved through the
//! [`ResourceRoot`](crate::resources::resourceroot::ResourceRoot); the
//! loader only performs I/O. `target` is the entity whose display the asset
//! should be attached to, when there is one.

use bevy_ecs::message::Message;
use bevy_ecs::prelude::Entity;

/// A single load request serviced by the loader system.
#[derive(Message, Debug, Clone)]
pub enum AssetRequest {
    Texture {
        key: String,
        path: String,
        target: Option<Entity>,
    },
    /// `path` points at the JSON sheet descriptor.
    Sheet {
        key: String,
        path: String,
        target: Option<Entity>,
    },
    /// `path` is the skeleton base path; the loader expands the triplet.
    Skeleton {
        key: String,
        path: String,
        target: Option<Entity>,
    },
}

impl AssetRequest {
    pub fn key(&self) -> &str {
        match self {
            AssetRequest::Texture { key, .. }
            | AssetRequest::Sheet { key, .. }
            | AssetRequest::Skeleton { key, .. } => key,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            AssetRequest::Texture { path, .. }
            | AssetRequest::Sheet { path, .. }
            | AssetRequest::Skeleton { path, .. } => path,
        }
    }
}

/// Outcome of a load request, for systems that wait on assets.
#[derive(Message, Debug, Clone)]
pub enum AssetMessage {
    TextureLoaded { key: String, width: i32, height: i32 },
    TextureFailed { key: String, error: String },
    SheetLoaded { key: String },
    SheetFailed { key: String, error: String },
    SkeletonLoaded { key: String },
    SkeletonFailed { key: String, error: String },
}
