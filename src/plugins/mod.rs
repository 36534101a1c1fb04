//! Feature plugins.

use bevy::prelude::*;

pub mod area_effects;
pub mod bullets;
pub mod bus;
pub mod collision;
pub mod core;
pub mod enemies;
pub mod experience;
pub mod pickups;
pub mod player;
pub mod view;

// Windowed app only
pub mod camera;
pub mod debug_draw;

/// Register gameplay plugins that work in headless tests.
///
/// Registration order is subscription order: handlers of the same event kind run in the order
/// their plugins appear here.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    bus::plugin(app);
    bullets::plugin(app);
    area_effects::plugin(app);
    pickups::plugin(app);
    enemies::plugin(app);
    experience::plugin(app);
    player::plugin(app);
    collision::plugin(app);
}

/// Register plugins that need a window, a renderer or input devices (requires DefaultPlugins).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
    debug_draw::plugin(app);
    player::input::device_plugin(app);
}
