//! Normal/Dash movement state machine.
//!
//! ```text
//!   Normal --dash pressed, dash_counter == 0, cooldown == 0--> Dash
//!   Dash   --dash_counter <= 0--> Normal (cooldown restarts)
//! ```
//! The dash direction is the movement direction, or the aim direction when standing still.
//! Cooldown decays in seconds regardless of state.

use bevy::prelude::*;

use crate::common::tunables::Tunables;

use super::{input::PlayerInput, LocalPlayer, Movement, MovementState, Player};

impl Movement {
    /// Advance the state machine by `dt` and return this tick's displacement.
    pub fn step(&mut self, input: &PlayerInput, aim: Vec2, dt: f32, tunables: &Tunables) -> Vec2 {
        let delta = match self.state {
            MovementState::Normal => {
                let direction = input.move_axis.normalize_or_zero();
                if input.dash && self.dash_counter <= 0.0 && self.dash_cooldown_counter <= 0.0 {
                    self.state = MovementState::Dash;
                    self.dash_counter = tunables.dash_duration;
                    self.dash_direction = if direction != Vec2::ZERO {
                        direction
                    } else {
                        aim
                    };
                }
                direction * tunables.player_speed * dt
            }
            MovementState::Dash => {
                let delta = self.dash_direction * tunables.dash_speed * dt;
                self.dash_counter -= dt;
                if self.dash_counter <= 0.0 {
                    self.dash_counter = 0.0;
                    self.state = MovementState::Normal;
                    self.dash_cooldown_counter = tunables.dash_cooldown;
                }
                delta
            }
        };

        if self.dash_cooldown_counter > 0.0 {
            self.dash_cooldown_counter = (self.dash_cooldown_counter - dt).max(0.0);
        }
        delta
    }
}

pub fn move_players(
    time: Res<Time>,
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut q_player: Query<(&mut Player, &mut Movement), With<LocalPlayer>>,
) {
    let dt = time.delta_secs();

    for (mut player, mut movement) in &mut q_player {
        let aim = player.aim_direction(input.aim);
        player.rotation = aim.x.atan2(-aim.y);

        let before = movement.state;
        player.position += movement.step(&input, aim, dt, &tunables);
        if movement.state != before {
            debug!("player {} {:?} -> {:?}", player.id, before, movement.state);
        }
    }
}
