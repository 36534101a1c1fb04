//! Experience nuggets.
//!
//! ```text
//! EnemyKilledEvent       -> nugget dropped where the enemy died (resting, speed 0)
//! AttractExperienceEvent -> nugget starts moving
//! TickSet::Attract       -> moving nuggets accelerate toward the nearest player
//! CollectExperienceEvent -> nugget deactivated, pruned the same tick
//! ```

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;

use crate::common::bounds::{self, Bounded};
use crate::common::ids::{EntityId, IdAllocator};
use crate::common::schedule::TickSet;
use crate::common::store::{Identified, Store};
use crate::common::tunables::Tunables;
use crate::plugins::bus::events::{AttractExperienceEvent, CollectExperienceEvent, EnemyKilledEvent};
use crate::plugins::bus::{Published, SubscribeAppExt};
use crate::plugins::player::Player;

#[derive(Debug, Clone)]
pub struct Nugget {
    pub id: EntityId,
    pub amount: u32,
    pub position: Vec2,
    pub size: f32,
    /// Zero while resting.
    pub speed: f32,
    pub active: bool,
}

impl Nugget {
    pub fn new(id: EntityId, position: Vec2, tunables: &Tunables) -> Self {
        Self {
            id,
            amount: tunables.nugget_amount,
            position,
            size: tunables.nugget_size,
            speed: 0.0,
            active: true,
        }
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.speed > 0.0
    }

    /// Bigger nuggets read differently on screen.
    pub fn color(&self) -> Color {
        match self.amount {
            0..1_000 => Color::srgb(0.0, 0.0, 1.0),
            1_000..10_000 => Color::srgb(0.5, 0.0, 0.5),
            10_000..100_000 => Color::srgb(0.0, 0.5, 0.0),
            _ => Color::srgb(0.0, 0.0, 1.0),
        }
    }
}

impl Identified for Nugget {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Bounded for Nugget {
    fn bounds(&self) -> Aabb2d {
        bounds::centered(self.position, Vec2::splat(self.size))
    }
}

pub type Nuggets = Store<Nugget>;

pub fn plugin(app: &mut App) {
    app.init_resource::<Nuggets>()
        .subscribe(on_enemy_killed)
        .subscribe(on_attract)
        .subscribe(on_collect)
        .add_systems(
            FixedUpdate,
            (pull_nuggets, prune_nuggets).chain().in_set(TickSet::Attract),
        );
}

fn on_enemy_killed(
    In(killed): In<Published<EnemyKilledEvent>>,
    tunables: Res<Tunables>,
    mut ids: ResMut<IdAllocator>,
    mut nuggets: ResMut<Nuggets>,
) -> Result {
    let id = ids.next_id();
    nuggets.add(Nugget::new(id, killed.position, &tunables));
    trace!("nugget {id} dropped by enemy {}", killed.enemy_id);
    Ok(())
}

fn on_attract(
    In(attract): In<Published<AttractExperienceEvent>>,
    tunables: Res<Tunables>,
    mut nuggets: ResMut<Nuggets>,
) -> Result {
    let Some(nugget) = nuggets.get_mut(attract.nugget_id) else {
        return Ok(());
    };
    if nugget.active && !nugget.is_moving() {
        nugget.speed = tunables.nugget_pull_speed;
    }
    Ok(())
}

fn on_collect(
    In(collect): In<Published<CollectExperienceEvent>>,
    mut nuggets: ResMut<Nuggets>,
) -> Result {
    if let Some(nugget) = nuggets.get_mut(collect.nugget_id) {
        nugget.active = false;
    }
    Ok(())
}

/// Moving nuggets speed up and home in on the nearest player without overshooting.
fn pull_nuggets(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut nuggets: ResMut<Nuggets>,
    q_player: Query<&Player>,
) {
    let dt = time.delta_secs();

    for nugget in nuggets.iter_mut().filter(|n| n.active && n.is_moving()) {
        let Some(target) = q_player
            .iter()
            .map(|p| p.position)
            .min_by(|a, b| {
                a.distance_squared(nugget.position)
                    .total_cmp(&b.distance_squared(nugget.position))
            })
        else {
            return;
        };

        nugget.speed += tunables.nugget_pull_acceleration * dt;
        let to_target = target - nugget.position;
        let step = (nugget.speed * dt).min(to_target.length());
        nugget.position += to_target.normalize_or_zero() * step;
    }
}

fn prune_nuggets(mut nuggets: ResMut<Nuggets>) {
    nuggets.retain(|n| n.active);
}

#[cfg(test)]
mod tests;
