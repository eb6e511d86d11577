//! Asset loader system.
//!
//! [`process_asset_requests`] drains pending
//! [`AssetRequest`](crate::events::asset::AssetRequest)s each frame and
//! services them with raylib (textures) and `std::fs` + serde_json (sheet
//! descriptors, skeleton files). Loaded data lands in the keyed stores; the
//! outcome is reported as an
//! [`AssetMessage`](crate::events::asset::AssetMessage).
//!
//! When a request carries a target entity the loader also wires the entity's
//! display: textures size a pending [`Sprite`] (or insert one), sheets
//! attach [`SheetAnimation`] playback, skeletons attach a [`SkeletonPose`].
//! Keys already present in a store are treated as cache hits: nothing is
//! reloaded, but the target entity is still wired and the `*Loaded` message
//! still fires.
//!
//! Raylib texture loading must happen on the main thread, so this system
//! borrows the non-send raylib handle.

use bevy_ecs::prelude::*;
use log::{debug, info, warn};
use raylib::prelude::*;

use crate::components::sheetanim::SheetAnimation;
use crate::components::skeletonpose::SkeletonPose;
use crate::components::sprite::Sprite;
use crate::events::asset::{AssetMessage, AssetRequest};
use crate::resources::resourceroot::ResourceRoot;
use crate::resources::sheetstore::{SheetDescriptor, SheetResource, SheetStore};
use crate::resources::skeletonstore::{AtlasFile, SkeletonFile, SkeletonResource, SkeletonStore};
use crate::resources::texturestore::TextureStore;

/// Replace the file component of `path` with `file`, keeping the directory.
/// Resolved paths use forward slashes (see `ResourceRoot::url_of`).
fn sibling(path: &str, file: &str) -> String {
    match path.rfind('/') {
        Some(index) => format!("{}/{}", &path[..index], file),
        None => file.to_string(),
    }
}

pub fn process_asset_requests(
    mut reader: MessageReader<AssetRequest>,
    mut rl: NonSendMut<RaylibHandle>,
    th: NonSend<RaylibThread>,
    mut textures: ResMut<TextureStore>,
    mut sheets: ResMut<SheetStore>,
    mut skeletons: ResMut<SkeletonStore>,
    mut results: MessageWriter<AssetMessage>,
    mut sprites: Query<&mut Sprite>,
    mut commands: Commands,
) {
    for request in reader.read() {
        match request {
            AssetRequest::Texture { key, path, target } => {
                if !textures.contains(key) {
                    match rl.load_texture(&th, path) {
                        Ok(texture) => {
                            info!("loaded texture '{}' from '{}'", key, path);
                            textures.insert(key.clone(), texture);
                        }
                        Err(e) => {
                            warn!("texture '{}' failed: {}", key, e);
                            results.write(AssetMessage::TextureFailed {
                                key: key.clone(),
                                error: e.to_string(),
                            });
                            continue;
                        }
                    }
                } else {
                    debug!("texture '{}' already loaded", key);
                }
                let Some((width, height)) = textures.get(key).map(|t| (t.width, t.height)) else {
                    continue;
                };
                if let Some(target) = *target {
                    attach_sprite(
                        &mut commands,
                        &mut sprites,
                        target,
                        key,
                        width as f32,
                        height as f32,
                    );
                }
                results.write(AssetMessage::TextureLoaded {
                    key: key.clone(),
                    width,
                    height,
                });
            }

            AssetRequest::Sheet { key, path, target } => {
                if !sheets.contains(key) {
                    match load_sheet(&mut rl, &th, &mut textures, path) {
                        Ok(sheet) => {
                            info!("sheet '{}' ready", key);
                            sheets.insert(key.clone(), sheet);
                        }
                        Err(e) => {
                            warn!("sheet '{}' failed: {}", key, e);
                            results.write(AssetMessage::SheetFailed {
                                key: key.clone(),
                                error: e,
                            });
                            continue;
                        }
                    }
                } else {
                    debug!("sheet '{}' already loaded", key);
                }
                if let Some(target) = *target {
                    if let Some(sheet) = sheets.get(key).cloned() {
                        attach_sheet(&mut commands, &mut sprites, target, key, &sheet);
                    }
                }
                results.write(AssetMessage::SheetLoaded { key: key.clone() });
            }

            AssetRequest::Skeleton { key, path, target } => {
                if !skeletons.contains(key) {
                    match load_skeleton(&mut rl, &th, &mut textures, path) {
                        Ok(skeleton) => {
                            info!("skeleton '{}' ready", key);
                            skeletons.insert(key.clone(), skeleton);
                        }
                        Err(e) => {
                            warn!("skeleton '{}' failed: {}", key, e);
                            results.write(AssetMessage::SkeletonFailed {
                                key: key.clone(),
                                error: e,
                            });
                            continue;
                        }
                    }
                } else {
                    debug!("skeleton '{}' already loaded", key);
                }
                if let Some(target) = *target {
                    let animation = skeletons.get(key).and_then(first_animation);
                    attach_skeleton(&mut commands, target, key, animation);
                }
                results.write(AssetMessage::SkeletonLoaded { key: key.clone() });
            }
        }
    }
}

/// Alphabetically first animation name, so the choice is deterministic.
fn first_animation(skeleton: &SkeletonResource) -> Option<String> {
    skeleton.animations.keys().min().cloned()
}

/// Size the target's pending sprite to the loaded texture, or give it a
/// fresh full-texture sprite if it has none.
fn attach_sprite(
    commands: &mut Commands,
    sprites: &mut Query<&mut Sprite>,
    target: Entity,
    tex_key: &str,
    width: f32,
    height: f32,
) {
    if let Ok(mut sprite) = sprites.get_mut(target) {
        if sprite.is_pending() {
            sprite.tex_key = tex_key.to_string();
            sprite.fit_to(width, height);
        }
    } else if let Ok(mut entity) = commands.get_entity(target) {
        let mut sprite = Sprite::pending(tex_key);
        sprite.fit_to(width, height);
        entity.insert(sprite);
    }
}

/// Wire sheet playback on the target: a sprite sized to one frame plus the
/// playback component.
fn attach_sheet(
    commands: &mut Commands,
    sprites: &mut Query<&mut Sprite>,
    target: Entity,
    sheet_key: &str,
    sheet: &SheetResource,
) {
    let (offset_x, offset_y) = sheet.frame_offset(0);
    let offset = Vector2 {
        x: offset_x,
        y: offset_y,
    };
    if let Ok(mut sprite) = sprites.get_mut(target) {
        sprite.tex_key = sheet.tex_key.clone();
        sprite.fit_to(sheet.frame_width, sheet.frame_height);
        sprite.offset = offset;
        if let Ok(mut entity) = commands.get_entity(target) {
            entity.insert(SheetAnimation::new(sheet_key));
        }
    } else if let Ok(mut entity) = commands.get_entity(target) {
        let mut sprite = Sprite::pending(sheet.tex_key.clone());
        sprite.fit_to(sheet.frame_width, sheet.frame_height);
        sprite.offset = offset;
        entity.insert((sprite, SheetAnimation::new(sheet_key)));
    }
}

fn attach_skeleton(
    commands: &mut Commands,
    target: Entity,
    skeleton_key: &str,
    animation: Option<String>,
) {
    if let Ok(mut entity) = commands.get_entity(target) {
        let mut pose = SkeletonPose::new(skeleton_key, animation.unwrap_or_default());
        pose.playing = !pose.animation.is_empty();
        entity.insert(pose);
    }
}

/// Read a sheet descriptor and make sure its texture is in the store.
fn load_sheet(
    rl: &mut RaylibHandle,
    th: &RaylibThread,
    textures: &mut TextureStore,
    path: &str,
) -> Result<SheetResource, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read sheet descriptor '{}': {}", path, e))?;
    let descriptor = SheetDescriptor::parse(&json)?;
    let tex_key = ResourceRoot::asset_key(&descriptor.texture);
    ensure_texture(rl, th, textures, &tex_key, &sibling(path, &descriptor.texture))?;
    Ok(SheetResource::from_descriptor(&descriptor, tex_key))
}

/// Expand the skeleton base path into its file triplet, parse and build.
fn load_skeleton(
    rl: &mut RaylibHandle,
    th: &RaylibThread,
    textures: &mut TextureStore,
    base: &str,
) -> Result<SkeletonResource, String> {
    let ske_path = format!("{}_ske.json", base);
    let atlas_path = format!("{}_tex.json", base);

    let ske_json = std::fs::read_to_string(&ske_path)
        .map_err(|e| format!("cannot read skeleton file '{}': {}", ske_path, e))?;
    let atlas_json = std::fs::read_to_string(&atlas_path)
        .map_err(|e| format!("cannot read atlas file '{}': {}", atlas_path, e))?;

    let ske: SkeletonFile =
        serde_json::from_str(&ske_json).map_err(|e| format!("invalid skeleton file: {}", e))?;
    let atlas: AtlasFile =
        serde_json::from_str(&atlas_json).map_err(|e| format!("invalid atlas file: {}", e))?;

    let tex_file = atlas.texture.clone();
    let tex_key = ResourceRoot::asset_key(&tex_file);
    ensure_texture(rl, th, textures, &tex_key, &sibling(&atlas_path, &tex_file))?;

    SkeletonResource::build(ske, atlas, tex_key)
}

fn ensure_texture(
    rl: &mut RaylibHandle,
    th: &RaylibThread,
    textures: &mut TextureStore,
    tex_key: &str,
    path: &str,
) -> Result<(), String> {
    if textures.contains(tex_key) {
        debug!("texture '{}' already loaded", tex_key);
        return Ok(());
    }
    let texture = rl
        .load_texture(th, path)
        .map_err(|e| format!("cannot load texture '{}': {}", path, e))?;
    info!("loaded texture '{}' from '{}'", tex_key, path);
    textures.insert(tex_key, texture);
    Ok(())
}

/// Advance the ECS message queue for [`AssetRequest`] so writes become
/// readable.
pub fn update_asset_requests(mut msgs: ResMut<Messages<AssetRequest>>) {
    msgs.update();
}

/// Advance the ECS message queue for [`AssetMessage`].
pub fn update_asset_messages(mut msgs: ResMut<Messages<AssetMessage>>) {
    msgs.update();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_replaces_the_file_component() {
        assert_eq!(
            sibling("./assets/pack/hero.sheet.json", "hero.png"),
            "./assets/pack/hero.png"
        );
        assert_eq!(sibling("hero.sheet.json", "hero.png"), "hero.png");
    }
}
