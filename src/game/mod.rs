//! Game composition root.
//!
//! Provides two public configuration functions:
//! - `configure_full`: DefaultPlugins (window, input, logging) + game plugins + camera and
//!   debug drawing.
//! - `configure_headless`: game plugins only, for integration tests and servers.
//!
//! Both take the bullet registry explicitly; nothing in the simulation reaches for a global.

use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::schedule::{LifecycleSet, TickSet};
use crate::common::state::GameState;
use crate::plugins;
use crate::plugins::bullets::definitions::{BulletRegistry, RegistryError};

// Only compile these imports on Windows.
#[cfg(target_os = "windows")]
use bevy::render::{
    settings::{Backends, PowerPreference, WgpuSettings},
    RenderPlugin,
};

/// Bullet templates shipped with the game.
pub const BULLET_TABLE: &str = include_str!("../../assets/bullets.ron");

/// Build the registry from the bundled table and run the windowed game.
pub fn run() -> Result<AppExit, RegistryError> {
    let registry = BulletRegistry::from_ron(BULLET_TABLE)?;

    let mut app = App::new();
    configure_full(&mut app, registry);
    Ok(app.run())
}

/// Full configuration for `cargo run`.
pub fn configure_full(app: &mut App, registry: BulletRegistry) {
    let default_plugins = DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Arcade Shooter".into(),
            resolution: WindowResolution::new(1280, 720),
            ..default()
        }),
        ..default()
    });

    // Vulkan is unreliable on some Windows drivers; force DX12 on the fast GPU.
    #[cfg(target_os = "windows")]
    let default_plugins = default_plugins.set(RenderPlugin {
        render_creation: WgpuSettings {
            backends: Some(Backends::DX12),
            power_preference: PowerPreference::HighPerformance,
            ..default()
        }
        .into(),
        ..default()
    });

    app.add_plugins(default_plugins);

    configure_game(app, registry);
    plugins::register_render(app);
}

/// Headless configuration for integration tests.
///
/// Notes:
/// - Do NOT add DefaultPlugins; the host brings `MinimalPlugins` + `StatesPlugin`.
/// - `PlayerInput` is written by the host instead of a device adapter.
pub fn configure_headless(app: &mut App, registry: BulletRegistry) {
    configure_game(app, registry);
}

/// Configuration shared by both full and headless apps.
fn configure_game(app: &mut App, registry: BulletRegistry) {
    info!("{} bullet types registered", registry.len());

    app.insert_resource(registry)
        .init_state::<GameState>()
        .configure_sets(
            FixedUpdate,
            (
                TickSet::Drain,
                TickSet::Actors,
                TickSet::Lifecycle,
                TickSet::Collision,
                TickSet::Attract,
            )
                .chain()
                .distributive_run_if(in_state(GameState::InGame)),
        )
        .configure_sets(
            FixedUpdate,
            (
                LifecycleSet::Bullets,
                LifecycleSet::Pickups,
                LifecycleSet::Areas,
                LifecycleSet::Enemies,
            )
                .chain()
                .in_set(TickSet::Lifecycle),
        );

    plugins::register_gameplay(app);
}
