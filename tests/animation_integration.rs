//! Playback and collision tests: sheet frame advancement, skeleton pose
//! composition over time, and collision messages.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;
use raylib::prelude::Vector2;

use packhorse::components::boxcollider::BoxCollider;
use packhorse::components::mapposition::MapPosition;
use packhorse::components::sheetanim::SheetAnimation;
use packhorse::components::skeletonpose::SkeletonPose;
use packhorse::components::sprite::Sprite;
use packhorse::events::collision::CollisionEvent;
use packhorse::resources::sheetstore::{SheetResource, SheetStore};
use packhorse::resources::skeletonstore::{SkeletonResource, SkeletonStore};
use packhorse::resources::worldtime::WorldTime;
use packhorse::systems::collision::collision_detector;
use packhorse::systems::sheetanim::sheet_animation;
use packhorse::systems::skeleton::skeleton_animation;
use packhorse::systems::time::update_world_time;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world() -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world
}

fn walk_sheet(looped: bool) -> SheetResource {
    SheetResource {
        tex_key: "hero_walk".to_string(),
        frame_width: 80.0,
        frame_height: 32.0,
        row: 1,
        frame_count: 4,
        fps: 5.0,
        looped,
    }
}

fn tick_sheets(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(sheet_animation);
    schedule.run(world);
}

fn tick_skeletons(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(skeleton_animation);
    schedule.run(world);
}

fn tick_collisions(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(collision_detector);
    schedule.run(world);
}

#[test]
fn sheet_animation_advances_and_updates_the_sprite() {
    let mut world = make_world();
    let mut store = SheetStore::new();
    store.insert("walk", walk_sheet(true));
    world.insert_resource(store);

    let entity = world
        .spawn((
            SheetAnimation::new("walk"),
            Sprite::sized("hero_walk", 80.0, 32.0),
        ))
        .id();

    // One frame lasts 0.2s at 5 fps.
    update_world_time(&mut world, 0.2);
    tick_sheets(&mut world);

    let anim = world.get::<SheetAnimation>(entity).unwrap();
    let sprite = world.get::<Sprite>(entity).unwrap();
    assert_eq!(anim.frame_index, 1);
    assert!(approx_eq(sprite.offset.x, 80.0));
    assert!(approx_eq(sprite.offset.y, 32.0)); // row 1

    // Three more ticks wrap back to frame 0.
    for _ in 0..3 {
        update_world_time(&mut world, 0.2);
        tick_sheets(&mut world);
    }
    let anim = world.get::<SheetAnimation>(entity).unwrap();
    let sprite = world.get::<Sprite>(entity).unwrap();
    assert_eq!(anim.frame_index, 0);
    assert!(approx_eq(sprite.offset.x, 0.0));
    assert!(!anim.finished);
}

#[test]
fn non_looping_sheet_clamps_on_the_last_frame() {
    let mut world = make_world();
    let mut store = SheetStore::new();
    store.insert("walk", walk_sheet(false));
    world.insert_resource(store);

    let entity = world
        .spawn((
            SheetAnimation::new("walk"),
            Sprite::sized("hero_walk", 80.0, 32.0),
        ))
        .id();

    for _ in 0..10 {
        update_world_time(&mut world, 0.2);
        tick_sheets(&mut world);
    }

    let anim = world.get::<SheetAnimation>(entity).unwrap();
    let sprite = world.get::<Sprite>(entity).unwrap();
    assert_eq!(anim.frame_index, 3);
    assert!(anim.finished);
    assert!(approx_eq(sprite.offset.x, 240.0));
}

#[test]
fn unknown_sheet_key_leaves_the_sprite_alone() {
    let mut world = make_world();
    world.insert_resource(SheetStore::new());

    let entity = world
        .spawn((
            SheetAnimation::new("missing"),
            Sprite::sized("hero_walk", 80.0, 32.0),
        ))
        .id();

    update_world_time(&mut world, 0.2);
    tick_sheets(&mut world);

    let anim = world.get::<SheetAnimation>(entity).unwrap();
    assert_eq!(anim.frame_index, 0);
    assert!(approx_eq(anim.elapsed, 0.0));
}

const SKE: &str = r#"{
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

const ATLAS: &str = r#"{ "texture": "chain_tex.png", "regions": {} }"#;

#[test]
fn skeleton_pose_follows_the_animation() {
    let mut world = make_world();
    let mut store = SkeletonStore::new();
    store.insert(
        "chain",
        SkeletonResource::parse(SKE, ATLAS, "chain_tex").unwrap(),
    );
    world.insert_resource(store);

    let entity = world.spawn(SkeletonPose::new("chain", "spin")).id();

    update_world_time(&mut world, 0.5);
    tick_skeletons(&mut world);

    let pose = world.get::<SkeletonPose>(entity).unwrap();
    assert_eq!(pose.bones.len(), 2);
    // Root halfway through its 90-degree spin; the arm rides along.
    assert!(approx_eq(pose.bones[0].rotation, 45.0));
    assert!(approx_eq(pose.bones[1].rotation, 45.0));
    let expected = 45.0_f32.to_radians();
    assert!(approx_eq(pose.bones[1].x, 10.0 * expected.cos()));
    assert!(approx_eq(pose.bones[1].y, 10.0 * expected.sin()));
}

#[test]
fn looped_skeleton_animation_wraps_around() {
    let mut world = make_world();
    let mut store = SkeletonStore::new();
    store.insert(
        "chain",
        SkeletonResource::parse(SKE, ATLAS, "chain_tex").unwrap(),
    );
    world.insert_resource(store);

    let entity = world.spawn(SkeletonPose::new("chain", "spin")).id();

    // 1.25s into a 1s looped animation = 0.25s in.
    update_world_time(&mut world, 1.25);
    tick_skeletons(&mut world);

    let pose = world.get::<SkeletonPose>(entity).unwrap();
    assert!(pose.playing);
    assert!(approx_eq(pose.bones[0].rotation, 22.5));
}

#[test]
fn stopped_pose_does_not_advance() {
    let mut world = make_world();
    let mut store = SkeletonStore::new();
    store.insert(
        "chain",
        SkeletonResource::parse(SKE, ATLAS, "chain_tex").unwrap(),
    );
    world.insert_resource(store);

    let mut pose = SkeletonPose::new("chain", "spin");
    pose.stop();
    let entity = world.spawn(pose).id();

    update_world_time(&mut world, 0.5);
    tick_skeletons(&mut world);

    let pose = world.get::<SkeletonPose>(entity).unwrap();
    assert!(approx_eq(pose.elapsed, 0.0));
    assert!(approx_eq(pose.bones[0].rotation, 0.0));
}

#[test]
fn unknown_animation_yields_the_rest_pose() {
    let mut world = make_world();
    let mut store = SkeletonStore::new();
    store.insert(
        "chain",
        SkeletonResource::parse(SKE, ATLAS, "chain_tex").unwrap(),
    );
    world.insert_resource(store);

    let entity = world.spawn(SkeletonPose::new("chain", "nope")).id();

    update_world_time(&mut world, 0.5);
    tick_skeletons(&mut world);

    let pose = world.get::<SkeletonPose>(entity).unwrap();
    assert_eq!(pose.bones.len(), 2);
    assert!(approx_eq(pose.bones[1].x, 10.0));
    assert!(approx_eq(pose.bones[1].rotation, 0.0));
}

#[test]
fn overlapping_colliders_emit_one_collision_message() {
    let mut world = make_world();
    world.init_resource::<Messages<CollisionEvent>>();

    let a = world
        .spawn((MapPosition::new(0.0, 0.0), BoxCollider::new(10.0, 10.0)))
        .id();
    let b = world
        .spawn((MapPosition::new(5.0, 5.0), BoxCollider::new(10.0, 10.0)))
        .id();
    // Far away: never collides.
    world.spawn((
        MapPosition::new(100.0, 100.0),
        BoxCollider::new(10.0, 10.0),
    ));

    tick_collisions(&mut world);

    world.resource_mut::<Messages<CollisionEvent>>().update();
    let mut state = SystemState::<MessageReader<CollisionEvent>>::new(&mut world);
    let mut reader = state.get_mut(&mut world);
    let events: Vec<_> = reader.read().cloned().collect();
    assert_eq!(events.len(), 1);
    let pair = (events[0].a, events[0].b);
    assert!(pair == (a, b) || pair == (b, a));
}

#[test]
fn separated_colliders_stay_silent() {
    let mut world = make_world();
    world.init_resource::<Messages<CollisionEvent>>();

    world.spawn((MapPosition::new(0.0, 0.0), BoxCollider::new(10.0, 10.0)));
    world.spawn((
        MapPosition::new(11.0, 0.0),
        BoxCollider::new(10.0, 10.0).with_offset(Vector2::new(1.0, 0.0)),
    ));

    tick_collisions(&mut world);

    world.resource_mut::<Messages<CollisionEvent>>().update();
    let mut state = SystemState::<MessageReader<CollisionEvent>>::new(&mut world);
    let mut reader = state.get_mut(&mut world);
    assert_eq!(reader.read().count(), 0);
}
