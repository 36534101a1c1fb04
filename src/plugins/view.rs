//! Downstream read surface.
//!
//! Presentation code (renderers, HUD, audio) takes a `SimulationView` instead of naming the
//! stores one by one. Everything in it is shared access, so a reader cannot change the
//! simulation it is looking at.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::plugins::area_effects::AreaEffects;
use crate::plugins::bullets::Bullets;
use crate::plugins::enemies::Enemies;
use crate::plugins::experience::Nuggets;
use crate::plugins::pickups::Pickups;
use crate::plugins::player::{Movement, Player, Progress, Weapon};

#[derive(SystemParam)]
pub struct SimulationView<'w, 's> {
    pub bullets: Res<'w, Bullets>,
    pub areas: Res<'w, AreaEffects>,
    pub enemies: Res<'w, Enemies>,
    pub pickups: Res<'w, Pickups>,
    pub nuggets: Res<'w, Nuggets>,
    pub players: Query<'w, 's, (&'static Player, &'static Movement, &'static Weapon, &'static Progress)>,
}
