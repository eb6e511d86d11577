//! Rendering.
//!
//! [`render`] is an exclusive system: it takes the raylib handle out of the
//! world, opens a drawing frame, and draws in three passes:
//! 1. sprites sorted by [`ZIndex`] (entities without one default to 0),
//! 2. skeleton slots transformed by their bone's world pose,
//! 3. collision overlays and a diagnostics line, only while the
//!    [`CollisionDebug`] resource is present.
//!
//! Flipping uses negative source-rect extents, which raylib interprets as a
//! mirror.

use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::skeletonpose::SkeletonPose;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::resources::collisiondebug::CollisionDebug;
use crate::resources::skeletonstore::SkeletonStore;
use crate::resources::texturestore::TextureStore;

pub fn render(world: &mut World) {
    let Some(mut rl) = world.remove_non_send_resource::<RaylibHandle>() else {
        return;
    };
    let Some(thread) = world.remove_non_send_resource::<RaylibThread>() else {
        world.insert_non_send_resource(rl);
        return;
    };

    {
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        draw_sprites(world, &mut d);
        draw_skeletons(world, &mut d);
        if world.contains_resource::<CollisionDebug>() {
            draw_debug_overlays(world, &mut d);
        }
    }

    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);
}

fn draw_sprites(world: &mut World, d: &mut RaylibDrawHandle) {
    // Collect, sort by z, then draw.
    let mut to_draw: Vec<(Sprite, MapPosition, i32)> = {
        let mut query = world.query::<(&Sprite, &MapPosition, Option<&ZIndex>)>();
        query
            .iter(world)
            .filter(|(sprite, _, _)| !sprite.is_pending())
            .map(|(sprite, position, z)| (sprite.clone(), *position, z.map(|z| z.0).unwrap_or(0)))
            .collect()
    };
    to_draw.sort_by_key(|(_, _, z)| *z);

    let textures = world.resource::<TextureStore>();

    for (sprite, position, _z) in to_draw.iter() {
        let Some(texture) = textures.get(&sprite.tex_key) else {
            continue;
        };

        // Source rect selects a frame; negative extents mirror.
        let mut src = Rectangle {
            x: sprite.offset.x,
            y: sprite.offset.y,
            width: sprite.width,
            height: sprite.height,
        };
        if sprite.flip_h {
            src.width = -src.width;
        }
        if sprite.flip_v {
            src.height = -src.height;
        }

        // Destination places the sprite so MapPosition is the pivot.
        let dest = Rectangle {
            x: position.pos.x,
            y: position.pos.y,
            width: sprite.width,
            height: sprite.height,
        };

        d.draw_texture_pro(texture, src, dest, sprite.origin, 0.0, Color::WHITE);
    }
}

fn draw_skeletons(world: &mut World, d: &mut RaylibDrawHandle) {
    let items: Vec<(SkeletonPose, MapPosition)> = {
        let mut query = world.query::<(&SkeletonPose, &MapPosition)>();
        query
            .iter(world)
            .map(|(pose, position)| (pose.clone(), *position))
            .collect()
    };

    let skeletons = world.resource::<SkeletonStore>();
    let textures = world.resource::<TextureStore>();

    for (pose, position) in items.iter() {
        let Some(skeleton) = skeletons.get(&pose.skeleton_key) else {
            continue;
        };
        let Some(texture) = textures.get(&skeleton.tex_key) else {
            continue;
        };
        if pose.bones.len() != skeleton.bones.len() {
            // pose not composed yet this session
            continue;
        }

        // Slot order is draw order.
        for slot in skeleton.slots.iter() {
            let bone = pose.bones[slot.bone];
            let region = slot.region;

            let src = Rectangle {
                x: region.x,
                y: region.y,
                width: region.width,
                height: region.height,
            };
            let dest = Rectangle {
                x: position.pos.x + bone.x,
                y: position.pos.y + bone.y,
                width: region.width * bone.scale_x,
                height: region.height * bone.scale_y,
            };
            let origin = Vector2 {
                x: region.pivot_x * dest.width,
                y: region.pivot_y * dest.height,
            };

            d.draw_texture_pro(texture, src, dest, origin, bone.rotation, Color::WHITE);
        }
    }
}

fn draw_debug_overlays(world: &mut World, d: &mut RaylibDrawHandle) {
    {
        let mut colliders = world.query::<(&BoxCollider, &MapPosition)>();
        for (collider, position) in colliders.iter(world) {
            let (x, y, w, h) = collider.rect(position.pos);
            d.draw_rectangle_lines(x as i32, y as i32, w as i32, h as i32, Color::RED);
        }
    }
    {
        let mut positions = world.query::<&MapPosition>();
        for position in positions.iter(world) {
            let x = position.pos.x as i32;
            let y = position.pos.y as i32;
            d.draw_line(x - 5, y, x + 5, y, Color::GREEN);
            d.draw_line(x, y - 5, x, y + 5, Color::GREEN);
        }
    }

    let entity_count = world.iter_entities().count();
    let text = format!(
        "COLLISION DEBUG (F11) | FPS: {} | Entities: {}",
        d.get_fps(),
        entity_count
    );
    d.draw_text(&text, 10, 10, 10, Color::YELLOW);
}
