//! Skeletal animation playback.
//!
//! [`skeleton_animation`] advances every [`SkeletonPose`], samples the
//! active animation's per-bone timelines at the current time, and composes
//! the world transform of each bone on top of its parent's. Bones are
//! stored parent-first, so one forward pass is enough.
//!
//! Timeline channels are additive on top of the bone's rest pose
//! (translation and rotation add, scale multiplies). Sampling is linear
//! between keys and clamped outside the keyed range. An empty or unknown
//! animation name yields the rest pose.

use bevy_ecs::prelude::*;

use crate::components::skeletonpose::{BonePose, SkeletonPose};
use crate::resources::skeletonstore::{
    RotateKey, ScaleKey, SkeletonAnimation, SkeletonResource, SkeletonStore, TranslateKey,
};
use crate::resources::worldtime::WorldTime;

pub fn skeleton_animation(
    mut query: Query<&mut SkeletonPose>,
    store: Res<SkeletonStore>,
    time: Res<WorldTime>,
) {
    for mut pose in query.iter_mut() {
        let Some(skeleton) = store.get(&pose.skeleton_key) else {
            continue;
        };

        if pose.playing {
            pose.elapsed += time.delta;
        }

        let animation = skeleton.animation(&pose.animation);
        let t = match animation {
            Some(anim) if anim.looped => pose.elapsed % anim.duration,
            Some(anim) => {
                if pose.elapsed >= anim.duration {
                    pose.playing = false;
                    anim.duration
                } else {
                    pose.elapsed
                }
            }
            None => 0.0,
        };

        let pose = &mut *pose;
        compose_pose(skeleton, animation, t, &mut pose.bones);
    }
}

/// Compute world transforms for every bone at time `t`, reusing `out`.
pub fn compose_pose(
    skeleton: &SkeletonResource,
    animation: Option<&SkeletonAnimation>,
    t: f32,
    out: &mut Vec<BonePose>,
) {
    out.clear();
    out.reserve(skeleton.bones.len());

    for (index, bone) in skeleton.bones.iter().enumerate() {
        let timeline = animation.and_then(|anim| anim.timelines[index].as_ref());

        let (dx, dy) = timeline
            .map(|tl| sample_translate(&tl.translate, t))
            .unwrap_or((0.0, 0.0));
        let rotation = timeline
            .map(|tl| sample_rotate(&tl.rotate, t))
            .unwrap_or(0.0);
        let (sx, sy) = timeline
            .map(|tl| sample_scale(&tl.scale, t))
            .unwrap_or((1.0, 1.0));

        let local_x = bone.rest.x + dx;
        let local_y = bone.rest.y + dy;
        let local_rotation = bone.rest.rotation + rotation;
        let local_scale_x = bone.rest.scale_x * sx;
        let local_scale_y = bone.rest.scale_y * sy;

        let world = match bone.parent {
            None => BonePose {
                x: local_x,
                y: local_y,
                rotation: local_rotation,
                scale_x: local_scale_x,
                scale_y: local_scale_y,
            },
            Some(parent_index) => {
                // parent-first ordering guarantees the parent pose exists
                let parent = out[parent_index];
                let radians = parent.rotation.to_radians();
                let (sin, cos) = radians.sin_cos();
                let px = local_x * parent.scale_x;
                let py = local_y * parent.scale_y;
                BonePose {
                    x: parent.x + px * cos - py * sin,
                    y: parent.y + px * sin + py * cos,
                    rotation: parent.rotation + local_rotation,
                    scale_x: parent.scale_x * local_scale_x,
                    scale_y: parent.scale_y * local_scale_y,
                }
            }
        };
        out.push(world);
    }
}

/// Sample a rotation channel at `t`. Empty channels contribute nothing.
pub fn sample_rotate(keys: &[RotateKey], t: f32) -> f32 {
    if keys.is_empty() {
        return 0.0;
    }
    let last = keys[keys.len() - 1];
    if t <= keys[0].time {
        return keys[0].angle;
    }
    if t >= last.time {
        return last.angle;
    }
    let mut i = 0;
    while keys[i + 1].time < t {
        i += 1;
    }
    let (a, b) = (keys[i], keys[i + 1]);
    let span = b.time - a.time;
    if span <= f32::EPSILON {
        return b.angle;
    }
    let alpha = (t - a.time) / span;
    a.angle + (b.angle - a.angle) * alpha
}

/// Sample a translation channel at `t`. Empty channels contribute nothing.
pub fn sample_translate(keys: &[TranslateKey], t: f32) -> (f32, f32) {
    if keys.is_empty() {
        return (0.0, 0.0);
    }
    let last = keys[keys.len() - 1];
    if t <= keys[0].time {
        return (keys[0].x, keys[0].y);
    }
    if t >= last.time {
        return (last.x, last.y);
    }
    let mut i = 0;
    while keys[i + 1].time < t {
        i += 1;
    }
    let (a, b) = (keys[i], keys[i + 1]);
    let span = b.time - a.time;
    if span <= f32::EPSILON {
        return (b.x, b.y);
    }
    let alpha = (t - a.time) / span;
    (a.x + (b.x - a.x) * alpha, a.y + (b.y - a.y) * alpha)
}

/// Sample a scale channel at `t`. Empty channels multiply by one.
pub fn sample_scale(keys: &[ScaleKey], t: f32) -> (f32, f32) {
    if keys.is_empty() {
        return (1.0, 1.0);
    }
    let last = keys[keys.len() - 1];
    if t <= keys[0].time {
        return (keys[0].x, keys[0].y);
    }
    if t >= last.time {
        return (last.x, last.y);
    }
    let mut i = 0;
    while keys[i + 1].time < t {
        i += 1;
    }
    let (a, b) = (keys[i], keys[i + 1]);
    let span = b.time - a.time;
    if span <= f32::EPSILON {
        return (b.x, b.y);
    }
    let alpha = (t - a.time) / span;
    (a.x + (b.x - a.x) * alpha, a.y + (b.y - a.y) * alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::skeletonstore::SkeletonResource;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn rotate_sampling_interpolates_and_clamps() {
        let keys = [
            RotateKey {
                time: 0.0,
                angle: 0.0,
            },
            RotateKey {
                time: 1.0,
                angle: 90.0,
            },
        ];
        assert!(approx_eq(sample_rotate(&keys, -1.0), 0.0));
        assert!(approx_eq(sample_rotate(&keys, 0.5), 45.0));
        assert!(approx_eq(sample_rotate(&keys, 2.0), 90.0));
    }

    #[test]
    fn translate_sampling_interpolates_both_axes() {
        let keys = [
            TranslateKey {
                time: 0.0,
                x: 0.0,
                y: 0.0,
            },
            TranslateKey {
                time: 2.0,
                x: 10.0,
                y: -4.0,
            },
        ];
        let (x, y) = sample_translate(&keys, 1.0);
        assert!(approx_eq(x, 5.0));
        assert!(approx_eq(y, -2.0));
    }

    #[test]
    fn empty_channels_leave_the_rest_pose() {
        assert_eq!(sample_rotate(&[], 0.5), 0.0);
        assert_eq!(sample_translate(&[], 0.5), (0.0, 0.0));
        assert_eq!(sample_scale(&[], 0.5), (1.0, 1.0));
    }

    #[test]
    fn child_bone_rotates_around_its_parent() {
        let ske = r#"{
            "name": "chain",
            "bones": [
                { "name": "root" },
                { "name": "arm", "parent": "root", "x": 10.0 }
            ],
            "animations": {
                "spin": {
                    "duration": 1.0,
                    "bones": {
                        "root": { "rotate": [ { "time": 0.0, "angle": 0.0 },
                                              { "time": 1.0, "angle": 90.0 } ] }
                    }
                }
            }
        }"#;
        let atlas = r#"{ "texture": "t.png", "regions": {} }"#;
        let skeleton = SkeletonResource::parse(ske, atlas, "t").unwrap();
        let animation = skeleton.animation("spin");

        let mut bones = Vec::new();

        // At t=0 the arm sits 10 units along +x.
        compose_pose(&skeleton, animation, 0.0, &mut bones);
        assert!(approx_eq(bones[1].x, 10.0));
        assert!(approx_eq(bones[1].y, 0.0));

        // At t=1 the root has turned 90 degrees; the arm follows.
        compose_pose(&skeleton, animation, 1.0, &mut bones);
        assert!(approx_eq(bones[1].x, 0.0));
        assert!(approx_eq(bones[1].y, 10.0));
        assert!(approx_eq(bones[1].rotation, 90.0));
    }

    #[test]
    fn parent_scale_stretches_child_offset() {
        let ske = r#"{
            "name": "chain",
            "bones": [
                { "name": "root", "scale_x": 2.0 },
                { "name": "arm", "parent": "root", "x": 10.0 }
            ]
        }"#;
        let atlas = r#"{ "texture": "t.png", "regions": {} }"#;
        let skeleton = SkeletonResource::parse(ske, atlas, "t").unwrap();

        let mut bones = Vec::new();
        compose_pose(&skeleton, None, 0.0, &mut bones);
        assert!(approx_eq(bones[1].x, 20.0));
        assert!(approx_eq(bones[1].scale_x, 2.0));
    }
}
