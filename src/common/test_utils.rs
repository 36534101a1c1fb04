//! Test helpers.
//!
//! Most unit tests build a bare `World`, seed the resources a system reads, and run the system
//! once. Systems that read `Res<Time>` get a `Time` whose last delta is exactly `dt`.

use std::time::Duration;

use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

use crate::plugins::bus::EventBus;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Install (or replace) `Time` so that `delta_secs()` returns `dt`.
pub fn set_delta(world: &mut World, dt: f32) {
    let mut time = Time::<()>::default();
    time.advance_by(Duration::from_secs_f32(dt));
    world.insert_resource(time);
}

/// Events of kind `E` still waiting in the bus, in publish order.
pub fn queued<E: Clone + 'static>(world: &World) -> Vec<E> {
    world.resource::<EventBus>().queued::<E>()
}
