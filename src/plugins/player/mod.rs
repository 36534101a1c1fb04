//! Player plugin.
//!
//! Pipeline:
//! - Update: the device adapter (windowed app only) writes `PlayerInput`; pause pulses flip
//!   `GameState`
//! - FixedUpdate / `TickSet::Actors`: movement state machine, then weapon cooldown and trigger
//! - Bus: weapon pickups, score, experience
//!
//! Players are ordinary ECS entities. Only the one tagged `LocalPlayer` reads `PlayerInput`;
//! everything addressed by id (`WeaponPickupEvent`, `CollectExperienceEvent`) is filtered per
//! player, so a second player never reacts to the first one's pickups.

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;

pub mod input;
pub mod movement;
pub mod progress;
pub mod weapon;

use crate::common::bounds::{self, Bounded};
use crate::common::ids::{EntityId, IdAllocator};
use crate::common::schedule::TickSet;
use crate::common::tunables::Tunables;
use crate::plugins::bullets::definitions::{BulletDefinition, BulletRegistry, BulletType};
use crate::plugins::bus::SubscribeAppExt;

pub use input::PlayerInput;

#[derive(Component, Debug, Clone)]
pub struct Player {
    pub id: EntityId,
    pub position: Vec2,
    /// Side of the square hit box.
    pub size: f32,
    /// Facing, in radians, derived from the aim direction every tick.
    pub rotation: f32,
}

impl Player {
    pub fn new(id: EntityId, position: Vec2, size: f32) -> Self {
        Self {
            id,
            position,
            size,
            rotation: 0.0,
        }
    }

    /// Box that pulls resting nuggets in. `range` is its full side.
    pub fn range_bounds(&self, range: f32) -> Aabb2d {
        bounds::centered(self.position, Vec2::splat(range))
    }

    /// Unit vector toward `aim`, or straight "up" in screen terms when the aim point sits
    /// exactly on the player.
    pub fn aim_direction(&self, aim: Vec2) -> Vec2 {
        (aim - self.position).try_normalize().unwrap_or(Vec2::NEG_Y)
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Aabb2d {
        bounds::centered(self.position, Vec2::splat(self.size))
    }
}

/// Marks the player driven by `PlayerInput`.
#[derive(Component, Debug, Default)]
pub struct LocalPlayer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementState {
    #[default]
    Normal,
    Dash,
}

#[derive(Component, Debug, Clone, Default)]
pub struct Movement {
    pub state: MovementState,
    /// Fixed when the dash starts.
    pub dash_direction: Vec2,
    /// Seconds of dash left.
    pub dash_counter: f32,
    /// Seconds until the next dash is allowed.
    pub dash_cooldown_counter: f32,
}

#[derive(Component, Debug, Clone)]
pub struct Weapon {
    /// Held by value. Pickups replace it wholesale.
    pub current: BulletDefinition,
    pub cooldown: f32,
}

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct Progress {
    pub score: u32,
    pub experience: u32,
    pub level: u32,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerInput>()
        .subscribe(weapon::on_weapon_pickup)
        .subscribe(progress::on_score)
        .subscribe(progress::on_collect_experience)
        .add_systems(Startup, spawn_player)
        .add_systems(Update, input::toggle_pause)
        .add_systems(
            FixedUpdate,
            (
                movement::move_players,
                weapon::fire_weapons,
                weapon::cycle_weapon,
            )
                .chain()
                .in_set(TickSet::Actors),
        );
}

/// Spawn the local player at the origin, holding the default bullet.
pub fn spawn_player(
    mut commands: Commands,
    registry: Res<BulletRegistry>,
    tunables: Res<Tunables>,
    mut ids: ResMut<IdAllocator>,
) -> Result {
    let id = ids.next_id();
    let weapon = Weapon::new(registry.lookup(BulletType::DEFAULT)?);

    commands.spawn((
        Name::new("Player"),
        Player::new(id, Vec2::ZERO, tunables.player_size),
        LocalPlayer,
        Movement::default(),
        weapon,
        Progress::default(),
    ));
    info!("player {id} spawned");
    Ok(())
}
