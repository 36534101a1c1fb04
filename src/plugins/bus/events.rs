//! Event kinds carried by the bus.
//!
//! This set is the integration surface for outside collaborators too: audio cues hang off
//! `ShootEvent`, UI bars off `CollectExperienceEvent` and `NextLevelEvent`.

use bevy::prelude::*;

use super::GameEvent;
use crate::common::ids::EntityId;
use crate::plugins::bullets::definitions::BulletType;

/// A weapon fired. `direction` is normalised; the spawner applies spread.
#[derive(Debug, Clone, PartialEq)]
pub struct ShootEvent {
    pub origin: Vec2,
    pub direction: Vec2,
    pub speed: f32,
    pub bullet_type: BulletType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulletCollisionEvent {
    pub bullet_id: EntityId,
    pub target_id: EntityId,
    pub damage: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AreaCollisionEvent {
    pub area_id: EntityId,
    pub target_id: EntityId,
    pub damage: f32,
}

/// An expiring bullet asks for a damage zone at its last position.
#[derive(Debug, Clone, PartialEq)]
pub struct SplashDamageEvent {
    pub position: Vec2,
    pub damage: f32,
    pub range: f32,
}

/// Swap the weapon of `player_id` to `bullet_type`. `pickup_id` is the pickup that was touched,
/// if any (weapon cycling has none).
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponPickupEvent {
    pub bullet_type: BulletType,
    pub pickup_id: Option<EntityId>,
    pub player_id: EntityId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectExperienceEvent {
    pub amount: u32,
    pub position: Vec2,
    pub nugget_id: EntityId,
    pub player_id: EntityId,
}

/// A resting nugget came into a player's pickup range.
#[derive(Debug, Clone, PartialEq)]
pub struct AttractExperienceEvent {
    pub nugget_id: EntityId,
    pub player_id: EntityId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyKilledEvent {
    pub enemy_id: EntityId,
    pub position: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEvent {
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NextLevelEvent {
    pub level: u32,
}

impl GameEvent for ShootEvent {}
impl GameEvent for BulletCollisionEvent {}
impl GameEvent for AreaCollisionEvent {}
impl GameEvent for SplashDamageEvent {}
impl GameEvent for WeaponPickupEvent {}
impl GameEvent for CollectExperienceEvent {}
impl GameEvent for AttractExperienceEvent {}
impl GameEvent for EnemyKilledEvent {}
impl GameEvent for ScoreEvent {}
impl GameEvent for NextLevelEvent {}
