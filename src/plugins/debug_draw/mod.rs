//! Gizmo outlines for every simulated entity (windowed app only).
//!
//! A stand-in renderer: it reads `SimulationView` once per frame and draws boxes where the
//! collision sweep sees them.

use bevy::math::{Isometry2d, Rot2};
use bevy::prelude::*;

use crate::plugins::view::SimulationView;

const ENEMY_COLOR: Color = Color::srgb(0.9, 0.15, 0.15);
const PLAYER_COLOR: Color = Color::srgb(0.2, 0.75, 0.9);
const AREA_COLOR: Color = Color::srgba(1.0, 0.55, 0.0, 0.5);

pub fn plugin(app: &mut App) {
    app.add_systems(Update, draw_simulation);
}

fn draw_simulation(view: SimulationView, mut gizmos: Gizmos) {
    for area in view.areas.iter().filter(|a| a.rendered) {
        gizmos.rect_2d(
            Isometry2d::from_translation(area.center),
            Vec2::splat(area.range),
            AREA_COLOR,
        );
    }

    for nugget in view.nuggets.iter() {
        gizmos.rect_2d(
            Isometry2d::from_translation(nugget.position),
            Vec2::splat(nugget.size),
            nugget.color(),
        );
    }

    for pickup in view.pickups.iter() {
        gizmos.rect_2d(
            Isometry2d::new(pickup.position, Rot2::radians(pickup.rotation)),
            Vec2::splat(pickup.size),
            pickup.color,
        );
    }

    for enemy in view.enemies.iter() {
        gizmos.rect_2d(
            Isometry2d::new(enemy.position, Rot2::radians(enemy.rotation)),
            Vec2::splat(enemy.size),
            ENEMY_COLOR,
        );
    }

    for bullet in view.bullets.iter() {
        gizmos.circle_2d(
            Isometry2d::from_translation(bullet.position),
            bullet.definition.size * 0.5,
            bullet.definition.color(),
        );
    }

    for (player, ..) in view.players.iter() {
        gizmos.rect_2d(
            Isometry2d::new(player.position, Rot2::radians(player.rotation)),
            Vec2::splat(player.size),
            PLAYER_COLOR,
        );
    }
}
