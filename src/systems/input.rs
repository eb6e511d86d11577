//! Keyboard input.
//!
//! The engine itself only binds one key: F11 toggles collision debug
//! overlays by triggering
//! [`SwitchCollisionDebugEvent`](crate::events::switchdebug::SwitchCollisionDebugEvent).

use bevy_ecs::prelude::*;
use raylib::ffi::KeyboardKey;

use crate::events::switchdebug::SwitchCollisionDebugEvent;

pub fn debug_toggle_input(rl: NonSend<raylib::RaylibHandle>, mut commands: Commands) {
    if rl.is_key_pressed(KeyboardKey::KEY_F11) {
        commands.trigger(SwitchCollisionDebugEvent {});
    }
}
