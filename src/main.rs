//! Packhorse main entry point.
//!
//! A 2D asset-pipeline engine written in Rust using:
//! - **raylib** for windowing, graphics, and audio
//! - **bevy_ecs** for entity-component-system architecture
//!
//! Entities declare their assets in an
//! [`AssetManifest`](components::manifest::AssetManifest); the engine
//! resolves every file against the configured resource root, loads it, and
//! wires the entity's display and audio. This executable runs a small
//! showcase scene exercising every asset class.
//!
//! # Startup order
//!
//! 1. Logging, CLI parsing
//! 2. Configuration: INI file, then environment, then CLI flags
//! 3. Raylib window, ECS world and resources
//! 4. Audio thread (must exist before any manifest is processed)
//! 5. Observers, demo scene, schedule
//! 6. Main loop; audio thread teardown on exit
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --resource-host ./assets --resource-dir demo
//! ```

mod components;
mod events;
mod resources;
mod systems;

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use raylib::ffi;
use std::path::PathBuf;

use crate::components::boxcollider::BoxCollider;
use crate::components::manifest::AssetManifest;
use crate::components::mapposition::MapPosition;
use crate::components::zindex::ZIndex;
use crate::events::asset::{AssetMessage, AssetRequest};
use crate::events::audio::{AudioCmd, AudioMessage};
use crate::events::collision::CollisionEvent;
use crate::events::switchdebug::switch_collision_debug_observer;
use crate::resources::audio::{setup_audio, shutdown_audio};
use crate::resources::collisiondebug::CollisionDebug;
use crate::resources::engineconfig::EngineConfig;
use crate::resources::resourceroot::ResourceRoot;
use crate::resources::sheetstore::SheetStore;
use crate::resources::skeletonstore::SkeletonStore;
use crate::resources::texturestore::TextureStore;
use crate::resources::worldtime::WorldTime;
use crate::systems::audio::{
    forward_audio_cmds, poll_audio_messages, update_audio_cmds, update_audio_messages,
};
use crate::systems::collision::{collision_detector, update_collision_messages};
use crate::systems::input::debug_toggle_input;
use crate::systems::loader::{process_asset_requests, update_asset_messages, update_asset_requests};
use crate::systems::manifest::queue_manifest_assets;
use crate::systems::render::render;
use crate::systems::sheetanim::sheet_animation;
use crate::systems::skeleton::skeleton_animation;
use crate::systems::time::update_world_time;

/// Packhorse 2D asset runtime
#[derive(Parser)]
#[command(version, about = "Packhorse: a 2D asset-pipeline runtime")]
struct Cli {
    /// Path to the INI configuration file (default: ./packhorse.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the resource host prefix.
    #[arg(long, value_name = "PREFIX")]
    resource_host: Option<String>,

    /// Override the resource directory segment.
    #[arg(long, value_name = "SEGMENT")]
    resource_dir: Option<String>,

    /// Start with collision overlays enabled (F11 toggles at runtime).
    #[arg(long)]
    debug_collision: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // --------------- Configuration layers ---------------
    let mut config = match &cli.config {
        Some(path) => EngineConfig::with_path(path.clone()),
        None => EngineConfig::new(),
    };
    config.load_from_file().ok(); // ignore errors, use defaults
    config.apply_env();
    if let Some(host) = cli.resource_host {
        config.resource_host = Some(host);
    }
    if let Some(dir) = cli.resource_dir {
        config.resource_directory = Some(dir);
    }
    if cli.debug_collision {
        config.debug_collision = true;
    }

    let mut root = ResourceRoot::new();
    if let Some(host) = &config.resource_host {
        root.set_host(host.clone());
    }
    if let Some(dir) = &config.resource_directory {
        root.set_directory(dir.clone());
    }
    if root.host().is_none() || root.directory().is_none() {
        log::warn!(
            "resource root incomplete (host={:?}, dir={:?}); asset loads will fail until both are set",
            root.host(),
            root.directory()
        );
    }

    // --------------- Raylib window ---------------
    let (window_width, window_height) = config.window_size();
    let (mut rl, thread) = raylib::init()
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("Packhorse")
        .build();
    rl.set_target_fps(config.target_fps);
    unsafe {
        if config.vsync {
            ffi::SetWindowState(ffi::ConfigFlags::FLAG_VSYNC_HINT as u32);
        } else {
            ffi::ClearWindowState(ffi::ConfigFlags::FLAG_VSYNC_HINT as u32);
        }
    }

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    if config.debug_collision {
        world.insert_resource(CollisionDebug {});
    }
    world.insert_resource(root);
    world.insert_resource(TextureStore::new());
    world.insert_resource(SheetStore::new());
    world.insert_resource(SkeletonStore::new());
    world.insert_resource(Messages::<AssetRequest>::default());
    world.insert_resource(Messages::<AssetMessage>::default());
    world.insert_resource(Messages::<CollisionEvent>::default());
    world.insert_resource(config);

    // Audio thread must exist before the first manifest is processed.
    setup_audio(&mut world);

    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    world.spawn(Observer::new(switch_collision_debug_observer));
    world.flush();

    spawn_demo_scene(&mut world);

    // --------------- Schedule ---------------
    let mut update = Schedule::default();
    update.add_systems(debug_toggle_input);
    update.add_systems(
        // asset pipeline must stay in order
        (
            queue_manifest_assets,
            update_asset_requests,
            process_asset_requests,
            update_asset_messages,
        )
            .chain(),
    );
    update.add_systems(
        // audio systems must be together
        (
            update_audio_cmds,
            forward_audio_cmds,
            poll_audio_messages,
            update_audio_messages,
        )
            .chain(),
    );
    update.add_systems(autoplay_music.after(update_audio_messages));
    update.add_systems(sheet_animation.after(process_asset_requests));
    update.add_systems(skeleton_animation.after(process_asset_requests));
    update.add_systems(collision_detector);
    update.add_systems(update_collision_messages.after(collision_detector));
    update.add_systems(
        render
            .after(sheet_animation)
            .after(skeleton_animation)
            .after(collision_detector),
    );

    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers();
    }
    shutdown_audio(&mut world);
}

/// Showcase scene: one entity per asset class, plus a collider pair for the
/// debug overlay. Files are expected under the configured resource root;
/// missing ones log a warning and the scene keeps running.
fn spawn_demo_scene(world: &mut World) {
    // Full-window backdrop texture.
    world.spawn((
        MapPosition::new(0.0, 0.0),
        ZIndex(-10),
        AssetManifest::new().with_texture("background.png"),
    ));

    // Sheet-animated walker with a collider, plus the soundtrack.
    world.spawn((
        MapPosition::new(320.0, 360.0),
        ZIndex(1),
        BoxCollider::new(64.0, 64.0),
        AssetManifest::new()
            .with_sheet("hero_walk.sheet.json")
            .with_music("Main_Theme.xm")
            .with_sound("Jump.wav"),
    ));

    // Skeletal character.
    world.spawn((
        MapPosition::new(640.0, 360.0),
        ZIndex(2),
        AssetManifest::new().with_skeleton("hero"),
    ));

    // Static prop overlapping the walker so collision messages flow.
    world.spawn((
        MapPosition::new(352.0, 360.0),
        ZIndex(0),
        BoxCollider::new(64.0, 64.0),
        AssetManifest::new().with_texture("crate.png"),
    ));
}

/// Start the soundtrack as soon as the audio thread reports it loaded.
fn autoplay_music(mut reader: MessageReader<AudioMessage>, mut writer: MessageWriter<AudioCmd>) {
    for message in reader.read() {
        if let AudioMessage::Loaded { key } = message {
            if key == "main_theme" {
                writer.write(AudioCmd::Play {
                    key: key.clone(),
                    looped: true,
                });
            }
        }
    }
}
