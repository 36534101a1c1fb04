//! Core plugin: shared simulation resources.
//!
//! Uses `init_resource`, so a host that inserted its own `Tunables` or a seeded `SimRng`
//! before adding the plugins keeps them.

use bevy::prelude::*;

use crate::common::ids::IdAllocator;
use crate::common::rng::SimRng;
use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    app.init_resource::<Tunables>()
        .init_resource::<IdAllocator>()
        .init_resource::<SimRng>();
}
