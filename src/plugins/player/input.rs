//! Upstream input surface.
//!
//! `PlayerInput` is the only thing the simulation reads from the outside world. Headless hosts
//! and tests write it directly; the windowed app fills it from devices in `gather_input`.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::camera::MainCamera;

#[derive(Resource, Debug, Default, Clone)]
pub struct PlayerInput {
    /// Raw direction, normalised by the movement system.
    pub move_axis: Vec2,
    /// Aim point in world space.
    pub aim: Vec2,
    pub shoot: bool,
    pub dash: bool,
    /// Pulse, cleared once the weapon system has acted on it.
    pub cycle_weapon: bool,
    /// Pulse, cleared by `toggle_pause`.
    pub pause: bool,
}

pub fn toggle_pause(
    mut input: ResMut<PlayerInput>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if !std::mem::take(&mut input.pause) {
        return;
    }

    let target = match state.get() {
        GameState::InGame => GameState::Paused,
        GameState::Paused => GameState::InGame,
    };
    info!("{:?} -> {:?}", state.get(), target);
    next.set(target);
}

/// Device adapter: keyboard, mouse and cursor into `PlayerInput`.
///
/// Pulses are OR-ed in rather than overwritten, so a press between two fixed ticks survives
/// until the simulation consumes it.
pub fn gather_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    windows: Query<&Window>,
    q_camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut input: ResMut<PlayerInput>,
) {
    let Some(keys) = keys else {
        return;
    };

    let mut axis = Vec2::ZERO;
    if keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        axis.y += 1.0;
    }
    if keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        axis.y -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        axis.x -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        axis.x += 1.0;
    }
    input.move_axis = axis;
    input.dash = keys.pressed(KeyCode::Space);
    input.cycle_weapon |= keys.any_just_pressed([KeyCode::Equal, KeyCode::NumpadAdd]);
    input.pause |= keys.just_pressed(KeyCode::KeyP);

    if let Some(buttons) = buttons {
        input.shoot = buttons.pressed(MouseButton::Left);
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_tf)) = q_camera.single() else {
        return;
    };
    match camera.viewport_to_world_2d(camera_tf, cursor) {
        Ok(p) => input.aim = p,
        Err(e) => debug!("viewport_to_world_2d failed: {e:?}"),
    }
}

/// Wire the device adapter. Runs before the pause toggle so a press is seen the same frame.
pub fn device_plugin(app: &mut App) {
    app.add_systems(Update, gather_input.before(toggle_pause));
}
