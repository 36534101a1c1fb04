//! Camera plugin (windowed app only).
//!
//! ```text
//! Startup:    spawn MainCamera
//! PostUpdate: ease toward the local player, before transforms propagate
//! ```
//! The simulation keeps positions in its own components, so the camera reads `Player` directly
//! instead of a player `Transform`.

use bevy::prelude::*;

use crate::plugins::player::{LocalPlayer, Player};

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
}

pub fn plugin(app: &mut App) {
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)))
        .add_systems(Startup, spawn_camera)
        .add_systems(
            PostUpdate,
            follow_player.before(TransformSystems::Propagate),
        );
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera { responsiveness: 5.0 },
        Transform::from_xyz(0.0, 0.0, 999.0),
    ));
}

fn follow_player(
    time: Res<Time>,
    q_player: Query<&Player, With<LocalPlayer>>,
    mut q_cam: Query<(&mut Transform, &MainCamera)>,
) {
    let Ok(player) = q_player.single() else {
        return;
    };
    let Ok((mut tf_cam, main_cam)) = q_cam.single_mut() else {
        return;
    };

    let dt = time.delta_secs();
    let alpha = 1.0 - (-main_cam.responsiveness * dt).exp();

    let eased = tf_cam.translation.truncate().lerp(player.position, alpha);
    tf_cam.translation.x = eased.x;
    tf_cam.translation.y = eased.y;
}
