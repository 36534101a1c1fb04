use bevy::prelude::*;

use crate::common::ids::{EntityId, IdAllocator};
use crate::common::test_utils::{run_system_once, set_delta};
use crate::common::tunables::Tunables;
use crate::plugins::bus::events::{AttractExperienceEvent, CollectExperienceEvent, EnemyKilledEvent};
use crate::plugins::bus::{drain, subscribe, EventBus};
use crate::plugins::player::Player;

use super::*;

fn nugget_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.init_resource::<IdAllocator>();
    world.init_resource::<EventBus>();
    world.init_resource::<Nuggets>();
    subscribe(&mut world, on_enemy_killed);
    subscribe(&mut world, on_attract);
    subscribe(&mut world, on_collect);
    world
}

fn drop_at(world: &mut World, position: Vec2) -> EntityId {
    world.resource_mut::<EventBus>().publish(EnemyKilledEvent {
        enemy_id: EntityId(777),
        position,
    });
    drain(world).unwrap();
    world.resource::<Nuggets>().iter().last().unwrap().id
}

fn attract(world: &mut World, nugget_id: EntityId) {
    world.resource_mut::<EventBus>().publish(AttractExperienceEvent {
        nugget_id,
        player_id: EntityId(500),
    });
    drain(world).unwrap();
}

#[test]
fn kill_drops_a_resting_nugget() {
    let mut world = nugget_world();
    let id = drop_at(&mut world, Vec2::new(8.0, 9.0));

    let nugget = world.resource::<Nuggets>().get(id).unwrap().clone();
    assert_eq!(nugget.position, Vec2::new(8.0, 9.0));
    assert_eq!(nugget.amount, 100);
    assert!(!nugget.is_moving());
    assert!(nugget.active);
}

#[test]
fn resting_nuggets_do_not_move() {
    let mut world = nugget_world();
    world.spawn(Player::new(EntityId(500), Vec2::ZERO, 20.0));
    let id = drop_at(&mut world, Vec2::new(50.0, 0.0));

    set_delta(&mut world, 0.5);
    run_system_once(&mut world, pull_nuggets);

    assert_eq!(world.resource::<Nuggets>().get(id).unwrap().position, Vec2::new(50.0, 0.0));
}

#[test]
fn attracted_nugget_accelerates_toward_player() {
    let mut world = nugget_world();
    world.spawn(Player::new(EntityId(500), Vec2::ZERO, 20.0));
    let id = drop_at(&mut world, Vec2::new(200.0, 0.0));
    attract(&mut world, id);
    assert_eq!(world.resource::<Nuggets>().get(id).unwrap().speed, 90.0);

    set_delta(&mut world, 0.125);
    run_system_once(&mut world, pull_nuggets);

    let nugget = world.resource::<Nuggets>().get(id).unwrap().clone();
    assert_eq!(nugget.speed, 140.0);
    assert!((nugget.position - Vec2::new(182.5, 0.0)).length() < 1e-4);
}

#[test]
fn pull_never_overshoots_the_player() {
    let mut world = nugget_world();
    world.spawn(Player::new(EntityId(500), Vec2::new(1.0, 1.0), 20.0));
    let id = drop_at(&mut world, Vec2::new(4.0, 5.0));
    attract(&mut world, id);

    set_delta(&mut world, 1.0);
    run_system_once(&mut world, pull_nuggets);

    let position = world.resource::<Nuggets>().get(id).unwrap().position;
    assert!((position - Vec2::new(1.0, 1.0)).length() < 1e-4);
}

#[test]
fn second_attract_does_not_reset_speed() {
    let mut world = nugget_world();
    world.spawn(Player::new(EntityId(500), Vec2::ZERO, 20.0));
    let id = drop_at(&mut world, Vec2::new(500.0, 0.0));
    attract(&mut world, id);
    set_delta(&mut world, 0.5);
    run_system_once(&mut world, pull_nuggets);

    attract(&mut world, id);

    assert_eq!(world.resource::<Nuggets>().get(id).unwrap().speed, 290.0);
}

#[test]
fn collected_nugget_is_pruned() {
    let mut world = nugget_world();
    let id = drop_at(&mut world, Vec2::ZERO);

    world.resource_mut::<EventBus>().publish(CollectExperienceEvent {
        amount: 100,
        position: Vec2::ZERO,
        nugget_id: id,
        player_id: EntityId(500),
    });
    drain(&mut world).unwrap();
    assert!(!world.resource::<Nuggets>().get(id).unwrap().active);

    run_system_once(&mut world, prune_nuggets);
    assert!(world.resource::<Nuggets>().is_empty());
}

#[test]
fn color_tracks_amount() {
    let mut nugget = Nugget::new(EntityId(1), Vec2::ZERO, &Tunables::default());
    assert_eq!(nugget.color(), Color::srgb(0.0, 0.0, 1.0));
    nugget.amount = 5_000;
    assert_eq!(nugget.color(), Color::srgb(0.5, 0.0, 0.5));
}
