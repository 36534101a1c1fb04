//! Bullets: spawn on `ShootEvent`, travel with friction decay, expire, leave splash behind.
//!
//! Lifecycle of one bullet:
//! ```text
//!   ShootEvent ──drain──> on_shoot: copy template, apply spread, push into Bullets
//!        every tick ────> advance_bullets: life -= dt, v *= (1/friction)^dt, p += v*dt
//!   BulletCollisionEvent ─drain─> on_bullet_collision: life = 0
//!        life <= 0 ─────> SplashDamageEvent (if the template splashes), then removed
//! ```
//! Damage to the target is the enemy plugin's business; this module only retires the bullet.

use bevy::prelude::*;

pub mod definitions;
pub mod systems;

use crate::common::bounds::{self, Bounded};
use crate::common::ids::EntityId;
use crate::common::schedule::LifecycleSet;
use crate::common::store::{Identified, Store};
use crate::plugins::bus::SubscribeAppExt;

use definitions::BulletDefinition;

/// A live bullet: a private copy of its template plus motion state.
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: EntityId,
    pub definition: BulletDefinition,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Seconds left. At or below zero the bullet is spent.
    pub life: f32,
}

impl Bullet {
    pub fn spawn(id: EntityId, definition: &BulletDefinition, position: Vec2, velocity: Vec2) -> Self {
        Self {
            id,
            definition: definition.clone(),
            position,
            velocity,
            life: definition.life,
        }
    }

    #[inline]
    pub fn is_spent(&self) -> bool {
        self.life <= 0.0
    }
}

impl Identified for Bullet {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Bounded for Bullet {
    fn bounds(&self) -> bevy::math::bounding::Aabb2d {
        bounds::centered(self.position, Vec2::splat(self.definition.size))
    }
}

pub type Bullets = Store<Bullet>;

pub fn plugin(app: &mut App) {
    app.init_resource::<Bullets>()
        .subscribe(systems::on_shoot)
        .subscribe(systems::on_bullet_collision)
        .add_systems(
            FixedUpdate,
            systems::advance_bullets.in_set(LifecycleSet::Bullets),
        );
}
