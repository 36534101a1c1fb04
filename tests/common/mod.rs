//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` + `StatesPlugin` provide the ECS runtime and `GameState`.
//! - `configure_headless` installs the gameplay plugins.
//! - `app.update()` never advances time, so `FixedUpdate` only runs through `tick`.

#![allow(dead_code)]

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use arcade_shooter::common::tunables::Tunables;
use arcade_shooter::game::configure_headless;
use arcade_shooter::plugins::bullets::definitions::BulletRegistry;
use arcade_shooter::plugins::player::{LocalPlayer, PlayerInput};

pub const DT: f32 = 1.0 / 64.0;

pub fn app_headless() -> App {
    app_with(Tunables::default())
}

/// Spawners effectively off, so a test only sees what it asked for.
pub fn quiet_tunables() -> Tunables {
    Tunables {
        enemy_spawn_interval: 1.0e6,
        pickup_spawn_interval: 1.0e6,
        ..default()
    }
}

pub fn app_with(tunables: Tunables) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO))
        .insert_resource(tunables);

    configure_headless(
        &mut app,
        BulletRegistry::standard().expect("standard table is valid"),
    );

    // Startup (player spawn) and the initial state transition.
    app.update();
    app
}

/// One simulation tick of `dt` seconds.
pub fn tick(app: &mut App, dt: f32) {
    let mut time = Time::<()>::default();
    time.advance_by(Duration::from_secs_f32(dt));
    app.world_mut().insert_resource(time);
    app.world_mut().run_schedule(FixedUpdate);
}

pub fn ticks(app: &mut App, n: usize) {
    for _ in 0..n {
        tick(app, DT);
    }
}

pub fn local_player(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, With<LocalPlayer>>()
        .iter(app.world())
        .next()
        .expect("local player spawned at startup")
}

pub fn input(app: &mut App) -> Mut<'_, PlayerInput> {
    app.world_mut().resource_mut::<PlayerInput>()
}
