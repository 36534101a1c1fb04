//! Tunable gameplay constants.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    // Player
    pub player_speed: f32,
    pub player_size: f32,
    pub dash_speed: f32,
    /// Seconds a dash lasts.
    pub dash_duration: f32,
    /// Seconds after a dash before the next one is allowed.
    pub dash_cooldown: f32,
    /// Full side of the box that starts pulling nuggets in.
    pub pickup_range: f32,

    // Area effects
    pub splash_duration: f32,

    // Enemies
    pub enemy_speed: f32,
    pub enemy_life: f32,
    pub enemy_size: f32,
    pub enemy_score: u32,
    pub enemy_spawn_interval: f32,
    pub enemy_spawn_distance: f32,
    /// Multiplier applied to the spawn interval on every level up.
    pub enemy_spawn_speedup: f32,
    pub max_enemies: usize,

    // Pickups
    pub pickup_spawn_interval: f32,
    pub pickup_spawn_radius: f32,
    pub pickup_size: f32,
    pub pickup_spin: f32,

    // Experience
    pub nugget_amount: u32,
    pub nugget_size: f32,
    pub nugget_pull_speed: f32,
    pub nugget_pull_acceleration: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            player_speed: 100.0,
            player_size: 20.0,
            dash_speed: 500.0,
            dash_duration: 0.2,
            dash_cooldown: 1.0,
            pickup_range: 150.0,

            splash_duration: 4.0,

            enemy_speed: 25.0,
            enemy_life: 2.0,
            enemy_size: 30.0,
            enemy_score: 10,
            enemy_spawn_interval: 1.0,
            enemy_spawn_distance: 300.0,
            enemy_spawn_speedup: 0.9,
            max_enemies: 64,

            pickup_spawn_interval: 5.0,
            pickup_spawn_radius: 200.0,
            pickup_size: 10.0,
            pickup_spin: 8.0,

            nugget_amount: 100,
            nugget_size: 15.0,
            nugget_pull_speed: 90.0,
            nugget_pull_acceleration: 400.0,
        }
    }
}
