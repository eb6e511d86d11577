//! Sprite-sheet animation playback.
//!
//! [`sheet_animation`] advances every [`SheetAnimation`] by the scaled frame
//! delta, wrapping looped sheets and clamping non-looped ones on their last
//! frame, then writes the current frame's source offset into the entity's
//! [`Sprite`].

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::sheetanim::SheetAnimation;
use crate::components::sprite::Sprite;
use crate::resources::sheetstore::SheetStore;
use crate::resources::worldtime::WorldTime;

pub fn sheet_animation(
    mut query: Query<(&mut SheetAnimation, &mut Sprite)>,
    store: Res<SheetStore>,
    time: Res<WorldTime>,
) {
    for (mut anim, mut sprite) in query.iter_mut() {
        let Some(sheet) = store.get(&anim.sheet_key) else {
            continue;
        };

        if !anim.finished {
            anim.elapsed += time.delta;
            let frame_duration = 1.0 / sheet.fps;
            while anim.elapsed >= frame_duration {
                anim.elapsed -= frame_duration;
                anim.frame_index += 1;
                if anim.frame_index >= sheet.frame_count {
                    if sheet.looped {
                        anim.frame_index = 0;
                    } else {
                        anim.frame_index = sheet.frame_count - 1;
                        anim.finished = true;
                        break;
                    }
                }
            }
        }

        let (x, y) = sheet.frame_offset(anim.frame_index);
        sprite.offset = Vector2 { x, y };
    }
}
