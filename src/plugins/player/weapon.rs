use bevy::prelude::*;

use crate::plugins::bullets::definitions::{BulletDefinition, BulletRegistry};
use crate::plugins::bus::events::{ShootEvent, WeaponPickupEvent};
use crate::plugins::bus::{EventBus, Published};

use super::{input::PlayerInput, LocalPlayer, Player, Weapon};

impl Weapon {
    pub fn new(definition: &BulletDefinition) -> Self {
        Self {
            current: definition.clone(),
            cooldown: 0.0,
        }
    }

    /// The shot to publish, or `None` while the weapon is cooling down.
    pub fn try_shoot(&mut self, origin: Vec2, direction: Vec2) -> Option<ShootEvent> {
        if self.cooldown > 0.0 {
            return None;
        }
        self.cooldown = self.current.cooldown;
        Some(ShootEvent {
            origin,
            direction: direction.normalize_or_zero(),
            speed: self.current.speed,
            bullet_type: self.current.bullet_type,
        })
    }

    pub fn tick(&mut self, dt: f32) {
        self.cooldown = (self.cooldown - dt).max(0.0);
    }
}

/// Every weapon cools down; only the local player's trigger reads `PlayerInput`.
pub fn fire_weapons(
    time: Res<Time>,
    input: Res<PlayerInput>,
    mut bus: ResMut<EventBus>,
    mut q_player: Query<(&Player, &mut Weapon, Has<LocalPlayer>)>,
) {
    let dt = time.delta_secs();

    for (player, mut weapon, local) in &mut q_player {
        if local && input.shoot {
            let direction = player.aim_direction(input.aim);
            if let Some(shot) = weapon.try_shoot(player.position, direction) {
                bus.publish(shot);
            }
        }
        weapon.tick(dt);
    }
}

/// Consume the `cycle_weapon` pulse: ask for the next registered bullet type.
pub fn cycle_weapon(
    mut input: ResMut<PlayerInput>,
    registry: Res<BulletRegistry>,
    mut bus: ResMut<EventBus>,
    q_player: Query<(&Player, &Weapon), With<LocalPlayer>>,
) {
    if !std::mem::take(&mut input.cycle_weapon) {
        return;
    }

    for (player, weapon) in &q_player {
        bus.publish(WeaponPickupEvent {
            bullet_type: registry.next_after(weapon.current.bullet_type),
            pickup_id: None,
            player_id: player.id,
        });
    }
}

/// Swap the weapon of the addressed player. Other players ignore the event.
pub fn on_weapon_pickup(
    In(pickup): In<Published<WeaponPickupEvent>>,
    registry: Res<BulletRegistry>,
    mut q_player: Query<(&Player, &mut Weapon)>,
) -> Result {
    let definition = registry.lookup(pickup.bullet_type)?;

    for (player, mut weapon) in &mut q_player {
        if player.id != pickup.player_id {
            continue;
        }
        weapon.current = definition.clone();
        debug!("player {} now fires {}", player.id, definition.label);
    }
    Ok(())
}
