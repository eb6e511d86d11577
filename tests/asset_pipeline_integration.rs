//! Manifest fan-out tests: freshly added manifests resolve through the
//! resource root and turn into targeted load requests and audio commands;
//! resolution failures surface as messages instead of panics.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;

use packhorse::components::manifest::AssetManifest;
use packhorse::components::mapposition::MapPosition;
use packhorse::events::asset::{AssetMessage, AssetRequest};
use packhorse::events::audio::{AudioCmd, AudioKind, AudioMessage};
use packhorse::resources::resourceroot::ResourceRoot;
use packhorse::systems::manifest::queue_manifest_assets;

fn make_world(root: ResourceRoot) -> World {
    let mut world = World::new();
    world.insert_resource(root);
    world.init_resource::<Messages<AssetRequest>>();
    world.init_resource::<Messages<AssetMessage>>();
    world.init_resource::<Messages<AudioCmd>>();
    world.init_resource::<Messages<AudioMessage>>();
    world
}

fn tick_manifests(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(queue_manifest_assets);
    schedule.run(world);
}

fn read_requests(world: &mut World) -> Vec<AssetRequest> {
    world.resource_mut::<Messages<AssetRequest>>().update();
    let mut state = SystemState::<MessageReader<AssetRequest>>::new(world);
    let mut reader = state.get_mut(world);
    reader.read().cloned().collect()
}

fn read_audio_cmds(world: &mut World) -> Vec<AudioCmd> {
    world.resource_mut::<Messages<AudioCmd>>().update();
    let mut state = SystemState::<MessageReader<AudioCmd>>::new(world);
    let mut reader = state.get_mut(world);
    reader.read().cloned().collect()
}

#[test]
fn manifest_fans_out_targeted_requests() {
    let root = ResourceRoot::new()
        .with_host("./assets")
        .with_directory("pack");
    let mut world = make_world(root);

    let entity = world
        .spawn((
            MapPosition::new(0.0, 0.0),
            AssetManifest::new()
                .with_texture("Background.png")
                .with_sheet("hero_walk.sheet.json")
                .with_skeleton("hero"),
        ))
        .id();

    tick_manifests(&mut world);
    let requests = read_requests(&mut world);
    assert_eq!(requests.len(), 3);

    match &requests[0] {
        AssetRequest::Texture { key, path, target } => {
            assert_eq!(key, "background");
            assert_eq!(path, "./assets/pack/Background.png");
            assert_eq!(*target, Some(entity));
        }
        other => panic!("expected texture request, got {:?}", other),
    }
    match &requests[1] {
        AssetRequest::Sheet { key, path, .. } => {
            assert_eq!(key, "hero_walk.sheet");
            assert_eq!(path, "./assets/pack/hero_walk.sheet.json");
        }
        other => panic!("expected sheet request, got {:?}", other),
    }
    match &requests[2] {
        AssetRequest::Skeleton { key, path, .. } => {
            assert_eq!(key, "hero");
            assert_eq!(path, "./assets/pack/hero");
        }
        other => panic!("expected skeleton request, got {:?}", other),
    }
}

#[test]
fn music_and_sounds_become_audio_loads() {
    let root = ResourceRoot::new()
        .with_host("./assets")
        .with_directory("pack");
    let mut world = make_world(root);

    world.spawn(
        AssetManifest::new()
            .with_music("Main_Theme.xm")
            .with_sound("Jump.wav"),
    );

    tick_manifests(&mut world);
    let cmds = read_audio_cmds(&mut world);
    assert_eq!(cmds.len(), 2);

    match &cmds[0] {
        AudioCmd::Load { key, path, kind } => {
            assert_eq!(key, "main_theme");
            assert_eq!(path, "./assets/pack/Main_Theme.xm");
            assert_eq!(*kind, AudioKind::Stream);
        }
        other => panic!("expected stream load, got {:?}", other),
    }
    match &cmds[1] {
        AudioCmd::Load { key, path, kind } => {
            assert_eq!(key, "jump");
            assert_eq!(path, "./assets/pack/Jump.wav");
            assert_eq!(*kind, AudioKind::Clip);
        }
        other => panic!("expected clip load, got {:?}", other),
    }
}

#[test]
fn unresolved_entries_fail_without_panicking() {
    // No host configured: everything fails, nothing is requested.
    let mut world = make_world(ResourceRoot::new().with_directory("pack"));

    world.spawn(
        AssetManifest::new()
            .with_texture("hero.png")
            .with_music("theme.xm"),
    );

    tick_manifests(&mut world);
    assert!(read_requests(&mut world).is_empty());
    assert!(read_audio_cmds(&mut world).is_empty());

    world.resource_mut::<Messages<AssetMessage>>().update();
    let mut state = SystemState::<MessageReader<AssetMessage>>::new(&mut world);
    let mut reader = state.get_mut(&mut world);
    let failures: Vec<_> = reader.read().cloned().collect();
    assert_eq!(failures.len(), 1);
    match &failures[0] {
        AssetMessage::TextureFailed { key, error } => {
            assert_eq!(key, "hero");
            assert_eq!(error, "resource host not set");
        }
        other => panic!("expected texture failure, got {:?}", other),
    }

    world.resource_mut::<Messages<AudioMessage>>().update();
    let mut state = SystemState::<MessageReader<AudioMessage>>::new(&mut world);
    let mut reader = state.get_mut(&mut world);
    let audio_failures: Vec<_> = reader.read().cloned().collect();
    assert_eq!(audio_failures.len(), 1);
    match &audio_failures[0] {
        AudioMessage::LoadFailed { key, error } => {
            assert_eq!(key, "theme");
            assert_eq!(error, "resource host not set");
        }
        other => panic!("expected audio failure, got {:?}", other),
    }
}

#[test]
fn manifests_are_processed_once() {
    let root = ResourceRoot::new()
        .with_host("./assets")
        .with_directory("pack");
    let mut world = make_world(root);

    world.spawn(AssetManifest::new().with_texture("hero.png"));

    // The schedule must persist across runs: added-detection is relative to
    // the system's last run.
    let mut schedule = Schedule::default();
    schedule.add_systems(queue_manifest_assets);

    schedule.run(&mut world);
    assert_eq!(read_requests(&mut world).len(), 1);

    // A second run must not re-queue the same manifest.
    schedule.run(&mut world);
    assert!(read_requests(&mut world).is_empty());
}

#[test]
fn empty_manifests_request_nothing() {
    let root = ResourceRoot::new()
        .with_host("./assets")
        .with_directory("pack");
    let mut world = make_world(root);

    world.spawn(AssetManifest::new());

    tick_manifests(&mut world);
    assert!(read_requests(&mut world).is_empty());
    assert!(read_audio_cmds(&mut world).is_empty());
}
