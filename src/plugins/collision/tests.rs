use bevy::prelude::*;

use crate::common::ids::EntityId;
use crate::common::test_utils::{queued, run_system_once};
use crate::common::tunables::Tunables;
use crate::plugins::area_effects::AreaEffect;
use crate::plugins::bullets::definitions::{BulletRegistry, BulletType};
use crate::plugins::bullets::Bullet;
use crate::plugins::bus::events::{BulletCollisionEvent, WeaponPickupEvent};
use crate::plugins::bus::EventBus;
use crate::plugins::enemies::{Enemies, Enemy};
use crate::plugins::experience::Nugget;
use crate::plugins::pickups::WeaponPickup;
use crate::plugins::player::Player;

use super::*;

fn bullet(id: u64, bullet_type: u32, position: Vec2) -> Bullet {
    let registry = BulletRegistry::standard().unwrap();
    let definition = registry.lookup(BulletType(bullet_type)).unwrap();
    Bullet::spawn(EntityId(id), definition, position, Vec2::ZERO)
}

fn enemy(id: u64, position: Vec2) -> Enemy {
    Enemy::new(EntityId(id), position, &Tunables::default())
}

fn player(id: u64, position: Vec2) -> Player {
    Player::new(EntityId(id), position, 20.0)
}

// --------------------------------------------------------------------------------------
// Bullets
// --------------------------------------------------------------------------------------

#[test]
fn overlapping_bullet_and_enemy_publish_one_hit() {
    let hits = bullet_hits(&[bullet(1, 0, Vec2::ZERO)], &[enemy(2, Vec2::new(10.0, 0.0))]);
    assert_eq!(
        hits,
        vec![BulletCollisionEvent {
            bullet_id: EntityId(1),
            target_id: EntityId(2),
            damage: 5.0,
        }]
    );
}

#[test]
fn touching_edges_do_not_collide() {
    // Bullet box spans [-5, 5], enemy box [5, 35].
    let hits = bullet_hits(&[bullet(1, 0, Vec2::ZERO)], &[enemy(2, Vec2::new(20.0, 0.0))]);
    assert!(hits.is_empty());

    let hits = bullet_hits(&[bullet(1, 0, Vec2::ZERO)], &[enemy(2, Vec2::new(19.9, 0.0))]);
    assert_eq!(hits.len(), 1);
}

#[test]
fn plain_bullet_stops_at_its_first_target() {
    let enemies = [enemy(2, Vec2::new(3.0, 0.0)), enemy(3, Vec2::new(-3.0, 0.0))];
    let hits = bullet_hits(&[bullet(1, 0, Vec2::ZERO)], &enemies);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].target_id, EntityId(2));
}

#[test]
fn piercing_bullet_hits_every_overlapping_enemy() {
    let enemies = [enemy(2, Vec2::new(3.0, 0.0)), enemy(3, Vec2::new(-3.0, 0.0))];
    let hits = bullet_hits(&[bullet(1, 2, Vec2::ZERO)], &enemies);
    let targets: Vec<_> = hits.iter().map(|h| h.target_id).collect();
    assert_eq!(targets, vec![EntityId(2), EntityId(3)]);
}

#[test]
fn dead_enemies_and_spent_bullets_are_skipped() {
    let mut dead = enemy(2, Vec2::ZERO);
    dead.active = false;
    assert!(bullet_hits(&[bullet(1, 0, Vec2::ZERO)], &[dead]).is_empty());

    let mut spent = bullet(1, 0, Vec2::ZERO);
    spent.life = 0.0;
    assert!(bullet_hits(&[spent], &[enemy(2, Vec2::ZERO)]).is_empty());
}

// --------------------------------------------------------------------------------------
// Areas
// --------------------------------------------------------------------------------------

#[test]
fn only_collider_areas_hit() {
    let live = AreaEffect::new(EntityId(10), Vec2::ZERO, 50.0, 0.1, 4.0);
    let mut faded = AreaEffect::new(EntityId(11), Vec2::ZERO, 50.0, 0.1, 4.0);
    faded.collider = false;

    let hits = area_hits(&[live, faded], &[enemy(2, Vec2::new(30.0, 0.0))]);

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].area_id, EntityId(10));
    assert_eq!(hits[0].damage, 0.1);
}

#[test]
fn area_reaches_half_its_range_past_the_center() {
    // Range 50 is a 50 x 50 box; a 30 unit enemy must come within 25 + 15 of the center.
    let area = AreaEffect::new(EntityId(10), Vec2::ZERO, 50.0, 0.1, 4.0);

    let inside = area_hits(std::slice::from_ref(&area), &[enemy(2, Vec2::new(39.0, 0.0))]);
    let outside = area_hits(&[area], &[enemy(3, Vec2::new(45.0, 0.0))]);

    assert_eq!(inside.len(), 1);
    assert!(outside.is_empty());
}

// --------------------------------------------------------------------------------------
// Pickups
// --------------------------------------------------------------------------------------

fn pickup(id: u64, bullet_type: u32, position: Vec2) -> WeaponPickup {
    let registry = BulletRegistry::standard().unwrap();
    let definition = registry.lookup(BulletType(bullet_type)).unwrap();
    WeaponPickup::new(EntityId(id), position, definition, &Tunables::default())
}

#[test]
fn player_touching_pickup_requests_it() {
    let p = player(500, Vec2::ZERO);
    let touches = pickup_touches(&[&p], &[pickup(20, 3, Vec2::new(12.0, 0.0))]);
    assert_eq!(
        touches,
        vec![WeaponPickupEvent {
            bullet_type: BulletType(3),
            pickup_id: Some(EntityId(20)),
            player_id: EntityId(500),
        }]
    );
}

#[test]
fn pickup_goes_to_one_player_only() {
    let a = player(500, Vec2::ZERO);
    let b = player(501, Vec2::new(2.0, 0.0));
    let touches = pickup_touches(&[&a, &b], &[pickup(20, 1, Vec2::new(1.0, 0.0))]);
    assert_eq!(touches.len(), 1);
    assert_eq!(touches[0].player_id, EntityId(500));
}

#[test]
fn taken_pickup_is_not_requested_again() {
    let p = player(500, Vec2::ZERO);
    let mut taken = pickup(20, 1, Vec2::ZERO);
    taken.active = false;
    assert!(pickup_touches(&[&p], &[taken]).is_empty());
}

// --------------------------------------------------------------------------------------
// Nuggets
// --------------------------------------------------------------------------------------

fn nugget(id: u64, position: Vec2, speed: f32) -> Nugget {
    let mut nugget = Nugget::new(EntityId(id), position, &Tunables::default());
    nugget.speed = speed;
    nugget
}

#[test]
fn resting_nugget_in_range_is_attracted() {
    let p = player(500, Vec2::ZERO);
    let contacts = nugget_contacts(&[&p], &[nugget(30, Vec2::new(70.0, 0.0), 0.0)], 150.0);
    assert_eq!(
        contacts,
        vec![NuggetContact::Attract(AttractExperienceEvent {
            nugget_id: EntityId(30),
            player_id: EntityId(500),
        })]
    );
}

#[test]
fn resting_nugget_out_of_range_is_left_alone() {
    let p = player(500, Vec2::ZERO);
    // Range box reaches 75, nugget box starts at 75.
    let contacts = nugget_contacts(&[&p], &[nugget(30, Vec2::new(82.5, 0.0), 0.0)], 150.0);
    assert!(contacts.is_empty());
}

#[test]
fn moving_nugget_is_collected_on_contact_only() {
    let p = player(500, Vec2::ZERO);
    let near = nugget(30, Vec2::new(10.0, 0.0), 90.0);
    let far = nugget(31, Vec2::new(60.0, 0.0), 90.0);

    let contacts = nugget_contacts(&[&p], &[near, far], 150.0);

    assert_eq!(
        contacts,
        vec![NuggetContact::Collect(CollectExperienceEvent {
            amount: 100,
            position: Vec2::new(10.0, 0.0),
            nugget_id: EntityId(30),
            player_id: EntityId(500),
        })]
    );
}

// --------------------------------------------------------------------------------------
// Systems
// --------------------------------------------------------------------------------------

#[test]
fn sweep_publishes_without_touching_stores() {
    let mut world = World::new();
    world.init_resource::<EventBus>();
    let mut enemies = Enemies::default();
    enemies.add(enemy(2, Vec2::ZERO));
    world.insert_resource(enemies);
    let mut bullets = crate::plugins::bullets::Bullets::default();
    bullets.add(bullet(1, 0, Vec2::ZERO));
    world.insert_resource(bullets);

    run_system_once(&mut world, sweep_bullets);

    assert_eq!(queued::<BulletCollisionEvent>(&world).len(), 1);
    assert_eq!(world.resource::<Enemies>().iter().next().unwrap().life, 2.0);
    assert_eq!(
        world
            .resource::<crate::plugins::bullets::Bullets>()
            .iter()
            .next()
            .unwrap()
            .life,
        2.0
    );
}
