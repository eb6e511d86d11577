//! Manifest processing.
//!
//! [`queue_manifest_assets`] watches for freshly added
//! [`AssetManifest`](crate::components::manifest::AssetManifest) components,
//! resolves every declared file through the
//! [`ResourceRoot`](crate::resources::resourceroot::ResourceRoot), and fans
//! the entries out as load requests: textures/sheets/skeletons to the loader
//! system, music and sounds to the audio thread. Requests are targeted at
//! the entity that owns the manifest so the loader can attach display
//! components once the data is in.
//!
//! Resolution failures (host or directory not configured) do not panic;
//! they surface as the matching `*Failed`/`LoadFailed` message and a log
//! warning.

use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::components::manifest::AssetManifest;
use crate::events::asset::{AssetMessage, AssetRequest};
use crate::events::audio::{AudioCmd, AudioKind, AudioMessage};
use crate::resources::resourceroot::ResourceRoot;

pub fn queue_manifest_assets(
    query: Query<(Entity, &AssetManifest), Added<AssetManifest>>,
    root: Res<ResourceRoot>,
    mut requests: MessageWriter<AssetRequest>,
    mut results: MessageWriter<AssetMessage>,
    mut audio: MessageWriter<AudioCmd>,
    mut audio_results: MessageWriter<AudioMessage>,
) {
    for (entity, manifest) in query.iter() {
        if manifest.is_empty() {
            debug!("empty manifest on {:?}", entity);
            continue;
        }

        for entry in &manifest.textures {
            let key = entry.key();
            match root.url_of(&entry.file) {
                Ok(path) => {
                    requests.write(AssetRequest::Texture {
                        key,
                        path,
                        target: Some(entity),
                    });
                }
                Err(e) => {
                    warn!("cannot resolve texture '{}': {}", entry.file, e);
                    results.write(AssetMessage::TextureFailed {
                        key,
                        error: e.to_string(),
                    });
                }
            }
        }

        for entry in &manifest.sheets {
            let key = entry.key();
            match root.url_of(&entry.file) {
                Ok(path) => {
                    requests.write(AssetRequest::Sheet {
                        key,
                        path,
                        target: Some(entity),
                    });
                }
                Err(e) => {
                    warn!("cannot resolve sheet '{}': {}", entry.file, e);
                    results.write(AssetMessage::SheetFailed {
                        key,
                        error: e.to_string(),
                    });
                }
            }
        }

        for entry in &manifest.skeletons {
            let key = entry.key();
            match root.url_of(&entry.file) {
                Ok(path) => {
                    requests.write(AssetRequest::Skeleton {
                        key,
                        path,
                        target: Some(entity),
                    });
                }
                Err(e) => {
                    warn!("cannot resolve skeleton '{}': {}", entry.file, e);
                    results.write(AssetMessage::SkeletonFailed {
                        key,
                        error: e.to_string(),
                    });
                }
            }
        }

        for (entries, kind) in [
            (&manifest.music, AudioKind::Stream),
            (&manifest.sounds, AudioKind::Clip),
        ] {
            for entry in entries {
                let key = entry.key();
                match root.url_of(&entry.file) {
                    Ok(path) => {
                        audio.write(AudioCmd::Load { key, path, kind });
                    }
                    Err(e) => {
                        warn!("cannot resolve audio '{}': {}", entry.file, e);
                        audio_results.write(AudioMessage::LoadFailed {
                            key,
                            error: e.to_string(),
                        });
                    }
                }
            }
        }
    }
}
