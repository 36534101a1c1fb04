use bevy::prelude::*;

use crate::common::ids::{EntityId, IdAllocator};
use crate::common::test_utils::{run_system_once, set_delta};
use crate::common::tunables::Tunables;
use crate::plugins::bus::events::SplashDamageEvent;
use crate::plugins::bus::{drain, subscribe, EventBus};

use super::*;

fn area_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.init_resource::<IdAllocator>();
    world.init_resource::<AreaEffects>();
    world.init_resource::<EventBus>();
    subscribe(&mut world, on_splash);
    world
}

fn splash(world: &mut World, position: Vec2) {
    world.resource_mut::<EventBus>().publish(SplashDamageEvent {
        position,
        damage: 2.0,
        range: 50.0,
    });
    drain(world).unwrap();
}

#[test]
fn splash_opens_a_zone_with_both_flags_set() {
    let mut world = area_world();
    splash(&mut world, Vec2::new(3.0, 4.0));

    let areas = world.resource::<AreaEffects>();
    assert_eq!(areas.len(), 1);
    let area = areas.iter().next().unwrap();
    assert_eq!(area.center, Vec2::new(3.0, 4.0));
    assert_eq!(area.damage, 2.0);
    assert_eq!(area.duration, 4.0);
    assert!(area.collider && area.rendered);
}

#[test]
fn zone_box_side_equals_range() {
    let area = AreaEffect::new(EntityId(1), Vec2::new(10.0, 0.0), 50.0, 1.0, 4.0);
    let b = area.bounds();
    assert_eq!(b.min, Vec2::new(-15.0, -25.0));
    assert_eq!(b.max, Vec2::new(35.0, 25.0));
}

#[test]
fn zone_expires_once_four_seconds_have_elapsed() {
    let mut world = area_world();
    splash(&mut world, Vec2::ZERO);

    set_delta(&mut world, 0.5);
    for _ in 0..7 {
        run_system_once(&mut world, advance_areas);
        let area = world.resource::<AreaEffects>().iter().next().unwrap().clone();
        assert!(area.collider);
    }

    run_system_once(&mut world, advance_areas);
    assert!(world.resource::<AreaEffects>().is_empty());
}

#[test]
fn duration_never_increases() {
    let mut world = area_world();
    splash(&mut world, Vec2::ZERO);

    let mut last = f32::INFINITY;
    set_delta(&mut world, 0.3);
    while let Some(area) = { world.resource::<AreaEffects>().iter().next().cloned() } {
        assert!(area.duration <= last);
        last = area.duration;
        run_system_once(&mut world, advance_areas);
    }
}

#[test]
fn zones_expire_independently() {
    let mut world = area_world();
    splash(&mut world, Vec2::ZERO);

    set_delta(&mut world, 2.0);
    run_system_once(&mut world, advance_areas);
    splash(&mut world, Vec2::ONE);
    run_system_once(&mut world, advance_areas);

    let areas = world.resource::<AreaEffects>();
    assert_eq!(areas.len(), 1);
    assert_eq!(areas.iter().next().unwrap().center, Vec2::ONE);
}
