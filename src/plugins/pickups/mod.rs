//! Weapon pickups: dropped near a player on a timer, spinning until someone walks over them.
//!
//! The collision sweep reports the touch as a `WeaponPickupEvent` carrying this pickup's id.
//! The player plugin swaps the weapon; this plugin retires the pickup.

use std::f32::consts::TAU;

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;
use rand::Rng;

use crate::common::bounds::{self, Bounded};
use crate::common::ids::{EntityId, IdAllocator};
use crate::common::rng::SimRng;
use crate::common::schedule::LifecycleSet;
use crate::common::store::{Identified, Store};
use crate::common::tunables::Tunables;
use crate::plugins::bullets::definitions::{BulletDefinition, BulletRegistry, BulletType};
use crate::plugins::bus::events::WeaponPickupEvent;
use crate::plugins::bus::{Published, SubscribeAppExt};
use crate::plugins::player::Player;

#[derive(Debug, Clone)]
pub struct WeaponPickup {
    pub id: EntityId,
    pub position: Vec2,
    pub size: f32,
    pub rotation: f32,
    /// Radians per second.
    pub spin: f32,
    pub bullet_type: BulletType,
    pub color: Color,
    pub active: bool,
}

impl WeaponPickup {
    pub fn new(id: EntityId, position: Vec2, definition: &BulletDefinition, tunables: &Tunables) -> Self {
        Self {
            id,
            position,
            size: tunables.pickup_size,
            rotation: 0.0,
            spin: tunables.pickup_spin,
            bullet_type: definition.bullet_type,
            color: definition.color(),
            active: true,
        }
    }
}

impl Identified for WeaponPickup {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Bounded for WeaponPickup {
    fn bounds(&self) -> Aabb2d {
        bounds::centered(self.position, Vec2::splat(self.size))
    }
}

pub type Pickups = Store<WeaponPickup>;

#[derive(Resource, Debug)]
pub struct PickupSpawner {
    pub timer: Timer,
}

impl FromWorld for PickupSpawner {
    fn from_world(world: &mut World) -> Self {
        let interval = world
            .get_resource::<Tunables>()
            .map_or_else(|| Tunables::default().pickup_spawn_interval, |t| t.pickup_spawn_interval);
        Self {
            timer: Timer::from_seconds(interval, TimerMode::Repeating),
        }
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<Pickups>()
        .init_resource::<PickupSpawner>()
        .subscribe(on_weapon_pickup)
        .add_systems(
            FixedUpdate,
            (spawn_pickups, spin_pickups, prune_pickups)
                .chain()
                .in_set(LifecycleSet::Pickups),
        );
}

fn spawn_pickups(
    time: Res<Time>,
    tunables: Res<Tunables>,
    registry: Res<BulletRegistry>,
    mut spawner: ResMut<PickupSpawner>,
    mut rng: ResMut<SimRng>,
    mut ids: ResMut<IdAllocator>,
    mut pickups: ResMut<Pickups>,
    q_player: Query<&Player>,
) {
    spawner.timer.tick(time.delta());

    let anchors: Vec<Vec2> = q_player.iter().map(|p| p.position).collect();
    if anchors.is_empty() || registry.is_empty() {
        return;
    }

    for _ in 0..spawner.timer.times_finished_this_tick() {
        let anchor = anchors[rng.rng.gen_range(0..anchors.len())];
        let angle = rng.rng.gen_range(0.0..TAU);
        let distance = rng.rng.gen_range(0.0..=tunables.pickup_spawn_radius);
        let Some(definition) = registry.iter().nth(rng.rng.gen_range(0..registry.len())) else {
            continue;
        };

        let id = ids.next_id();
        let position = anchor + Vec2::from_angle(angle) * distance;
        pickups.add(WeaponPickup::new(id, position, definition, &tunables));
        debug!("pickup {id} ({}) dropped at {position:?}", definition.label);
    }
}

fn spin_pickups(time: Res<Time>, mut pickups: ResMut<Pickups>) {
    let dt = time.delta_secs();
    for pickup in pickups.iter_mut() {
        pickup.rotation = (pickup.rotation + pickup.spin * dt).rem_euclid(TAU);
    }
}

fn prune_pickups(mut pickups: ResMut<Pickups>) {
    pickups.retain(|p| p.active);
}

fn on_weapon_pickup(
    In(pickup): In<Published<WeaponPickupEvent>>,
    mut pickups: ResMut<Pickups>,
) -> Result {
    let Some(id) = pickup.pickup_id else {
        return Ok(());
    };
    if let Some(taken) = pickups.get_mut(id) {
        taken.active = false;
    }
    Ok(())
}
