//! Collision-to-event pipeline.
//!
//! Runs in `TickSet::Collision`, after everything has moved. Each sweep walks two stores in
//! insertion order, tests strict box overlap and publishes one event per interaction. Nothing
//! here mutates an entity: the owners react at the next drain.
//!
//! Pairs swept, in publish order:
//! - live bullet x live enemy -> `BulletCollisionEvent` (non-piercing bullets stop at the first)
//! - collider area x live enemy -> `AreaCollisionEvent`
//! - player x active pickup -> `WeaponPickupEvent`
//! - player range x resting nugget -> `AttractExperienceEvent`
//! - player x moving nugget -> `CollectExperienceEvent`
//!
//! A pickup or nugget goes to the first player that reaches it, never to two.

use bevy::prelude::*;

use crate::common::bounds::{overlaps, Bounded};
use crate::common::schedule::TickSet;
use crate::common::tunables::Tunables;
use crate::plugins::area_effects::{AreaEffect, AreaEffects};
use crate::plugins::bullets::{Bullet, Bullets};
use crate::plugins::bus::events::{
    AreaCollisionEvent, AttractExperienceEvent, BulletCollisionEvent, CollectExperienceEvent,
    WeaponPickupEvent,
};
use crate::plugins::bus::EventBus;
use crate::plugins::enemies::{Enemies, Enemy};
use crate::plugins::experience::{Nugget, Nuggets};
use crate::plugins::pickups::{Pickups, WeaponPickup};
use crate::plugins::player::Player;

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        (
            sweep_bullets,
            sweep_areas,
            sweep_pickups,
            sweep_nuggets,
        )
            .chain()
            .in_set(TickSet::Collision),
    );
}

pub fn bullet_hits(bullets: &[Bullet], enemies: &[Enemy]) -> Vec<BulletCollisionEvent> {
    let mut hits = Vec::new();

    for bullet in bullets.iter().filter(|b| !b.is_spent()) {
        let bullet_box = bullet.bounds();
        for enemy in enemies.iter().filter(|e| e.active) {
            if !overlaps(&bullet_box, &enemy.bounds()) {
                continue;
            }
            hits.push(BulletCollisionEvent {
                bullet_id: bullet.id,
                target_id: enemy.id,
                damage: bullet.definition.damage,
            });
            if !bullet.definition.piercing {
                break;
            }
        }
    }
    hits
}

pub fn area_hits(areas: &[AreaEffect], enemies: &[Enemy]) -> Vec<AreaCollisionEvent> {
    let mut hits = Vec::new();

    for area in areas.iter().filter(|a| a.collider) {
        let area_box = area.bounds();
        for enemy in enemies.iter().filter(|e| e.active) {
            if overlaps(&area_box, &enemy.bounds()) {
                hits.push(AreaCollisionEvent {
                    area_id: area.id,
                    target_id: enemy.id,
                    damage: area.damage,
                });
            }
        }
    }
    hits
}

pub fn pickup_touches(players: &[&Player], pickups: &[WeaponPickup]) -> Vec<WeaponPickupEvent> {
    pickups
        .iter()
        .filter(|p| p.active)
        .filter_map(|pickup| {
            let pickup_box = pickup.bounds();
            players
                .iter()
                .find(|player| overlaps(&player.bounds(), &pickup_box))
                .map(|player| WeaponPickupEvent {
                    bullet_type: pickup.bullet_type,
                    pickup_id: Some(pickup.id),
                    player_id: player.id,
                })
        })
        .collect()
}

/// What the sweep asks of a nugget.
#[derive(Debug, Clone, PartialEq)]
pub enum NuggetContact {
    Attract(AttractExperienceEvent),
    Collect(CollectExperienceEvent),
}

pub fn nugget_contacts(players: &[&Player], nuggets: &[Nugget], pickup_range: f32) -> Vec<NuggetContact> {
    let mut contacts = Vec::new();

    for nugget in nuggets.iter().filter(|n| n.active) {
        let nugget_box = nugget.bounds();
        if nugget.is_moving() {
            if let Some(player) = players
                .iter()
                .find(|player| overlaps(&player.bounds(), &nugget_box))
            {
                contacts.push(NuggetContact::Collect(CollectExperienceEvent {
                    amount: nugget.amount,
                    position: nugget.position,
                    nugget_id: nugget.id,
                    player_id: player.id,
                }));
            }
        } else if let Some(player) = players
            .iter()
            .find(|player| overlaps(&player.range_bounds(pickup_range), &nugget_box))
        {
            contacts.push(NuggetContact::Attract(AttractExperienceEvent {
                nugget_id: nugget.id,
                player_id: player.id,
            }));
        }
    }
    contacts
}

fn sweep_bullets(bullets: Res<Bullets>, enemies: Res<Enemies>, mut bus: ResMut<EventBus>) {
    for hit in bullet_hits(bullets.as_slice(), enemies.as_slice()) {
        bus.publish(hit);
    }
}

fn sweep_areas(areas: Res<AreaEffects>, enemies: Res<Enemies>, mut bus: ResMut<EventBus>) {
    for hit in area_hits(areas.as_slice(), enemies.as_slice()) {
        bus.publish(hit);
    }
}

fn sweep_pickups(pickups: Res<Pickups>, q_player: Query<&Player>, mut bus: ResMut<EventBus>) {
    let players: Vec<&Player> = q_player.iter().collect();
    for touch in pickup_touches(&players, pickups.as_slice()) {
        bus.publish(touch);
    }
}

fn sweep_nuggets(
    tunables: Res<Tunables>,
    nuggets: Res<Nuggets>,
    q_player: Query<&Player>,
    mut bus: ResMut<EventBus>,
) {
    let players: Vec<&Player> = q_player.iter().collect();
    for contact in nugget_contacts(&players, nuggets.as_slice(), tunables.pickup_range) {
        match contact {
            NuggetContact::Attract(attract) => bus.publish(attract),
            NuggetContact::Collect(collect) => bus.publish(collect),
        };
    }
}

#[cfg(test)]
mod tests;
