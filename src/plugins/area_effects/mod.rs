//! Splash damage zones.
//!
//! Created only by `SplashDamageEvent`. A zone keeps its center, range and damage for its whole
//! life and counts `duration` down. At zero both flags drop and the zone is pruned in the same
//! update, so the collision sweep never sees an expired zone.

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;

use crate::common::bounds::{self, Bounded};
use crate::common::ids::{EntityId, IdAllocator};
use crate::common::schedule::LifecycleSet;
use crate::common::store::{Identified, Store};
use crate::common::tunables::Tunables;
use crate::plugins::bus::events::SplashDamageEvent;
use crate::plugins::bus::{Published, SubscribeAppExt};

#[derive(Debug, Clone)]
pub struct AreaEffect {
    pub id: EntityId,
    pub center: Vec2,
    /// Side of the square damage box.
    pub range: f32,
    /// Applied per tick to every enemy inside.
    pub damage: f32,
    pub duration: f32,
    /// Takes part in the collision sweep.
    pub collider: bool,
    /// Drawn by the presentation layer.
    pub rendered: bool,
}

impl AreaEffect {
    pub fn new(id: EntityId, center: Vec2, range: f32, damage: f32, duration: f32) -> Self {
        Self {
            id,
            center,
            range,
            damage,
            duration,
            collider: true,
            rendered: true,
        }
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.duration <= 0.0
    }
}

impl Identified for AreaEffect {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Bounded for AreaEffect {
    fn bounds(&self) -> Aabb2d {
        bounds::centered(self.center, Vec2::splat(self.range))
    }
}

pub type AreaEffects = Store<AreaEffect>;

pub fn plugin(app: &mut App) {
    app.init_resource::<AreaEffects>()
        .subscribe(on_splash)
        .add_systems(FixedUpdate, advance_areas.in_set(LifecycleSet::Areas));
}

fn on_splash(
    In(splash): In<Published<SplashDamageEvent>>,
    tunables: Res<Tunables>,
    mut ids: ResMut<IdAllocator>,
    mut areas: ResMut<AreaEffects>,
) -> Result {
    let id = ids.next_id();
    areas.add(AreaEffect::new(
        id,
        splash.position,
        splash.range,
        splash.damage,
        tunables.splash_duration,
    ));
    trace!("area {id} opened at {:?}", splash.position);
    Ok(())
}

fn advance_areas(time: Res<Time>, mut areas: ResMut<AreaEffects>) {
    let dt = time.delta_secs();

    for area in areas.iter_mut() {
        area.duration -= dt;
        if area.is_expired() {
            area.collider = false;
            area.rendered = false;
        }
    }

    areas.retain(|area| !area.is_expired());
}

#[cfg(test)]
mod tests;
