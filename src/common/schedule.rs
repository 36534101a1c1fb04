//! Tick phases.
//!
//! One simulation tick is one run of `FixedUpdate`. The phases are chained in this order by the
//! composition root; everything a plugin schedules lands in exactly one of them.

use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    /// Deliver everything published during the previous tick.
    Drain,
    /// Player movement and weapon triggers.
    Actors,
    /// Bullets, pickups, area effects, enemies.
    Lifecycle,
    /// Overlap sweeps. Publish only.
    Collision,
    /// Experience nuggets drifting toward the player.
    Attract,
}

/// Order inside `TickSet::Lifecycle`. The spawners share `SimRng`, so their order is fixed
/// to keep runs reproducible.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleSet {
    Bullets,
    Pickups,
    Areas,
    Enemies,
}
