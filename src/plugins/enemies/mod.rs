//! Enemies plugin: spawn on a ring around the players, chase, take damage, die once.
//!
//! ```text
//! Lifecycle:  spawn_enemies -> chase_enemies -> prune_enemies
//! Bus:        BulletCollisionEvent / AreaCollisionEvent -> life -= damage
//!             life <= 0 (first time only) -> ScoreEvent + EnemyKilledEvent, active = false
//!             NextLevelEvent -> shorter spawn interval
//! ```
//!
//! Damage arrives by id. A hit naming an enemy that is already dead or pruned is dropped,
//! so a splash zone overlapping a corpse for one more tick cannot score twice.

use std::f32::consts::TAU;
use std::time::Duration;

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;
use rand::Rng;

use crate::common::bounds::{self, Bounded};
use crate::common::ids::{EntityId, IdAllocator};
use crate::common::rng::SimRng;
use crate::common::schedule::LifecycleSet;
use crate::common::store::{Identified, Store};
use crate::common::tunables::Tunables;
use crate::plugins::bus::events::{
    AreaCollisionEvent, BulletCollisionEvent, EnemyKilledEvent, NextLevelEvent, ScoreEvent,
};
use crate::plugins::bus::{EventBus, Published, SubscribeAppExt};
use crate::plugins::player::Player;

/// Spawning never gets faster than this, whatever the level.
const MIN_SPAWN_INTERVAL: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EntityId,
    pub position: Vec2,
    pub size: f32,
    pub life: f32,
    pub speed: f32,
    pub rotation: f32,
    pub active: bool,
}

impl Enemy {
    pub fn new(id: EntityId, position: Vec2, tunables: &Tunables) -> Self {
        Self {
            id,
            position,
            size: tunables.enemy_size,
            life: tunables.enemy_life,
            speed: tunables.enemy_speed,
            rotation: 0.0,
            active: true,
        }
    }
}

impl Identified for Enemy {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Bounded for Enemy {
    fn bounds(&self) -> Aabb2d {
        bounds::centered(self.position, Vec2::splat(self.size))
    }
}

pub type Enemies = Store<Enemy>;

#[derive(Resource, Debug)]
pub struct EnemySpawner {
    pub timer: Timer,
}

impl EnemySpawner {
    pub fn new(interval: f32) -> Self {
        Self {
            timer: Timer::from_seconds(interval, TimerMode::Repeating),
        }
    }
}

impl FromWorld for EnemySpawner {
    fn from_world(world: &mut World) -> Self {
        let interval = world
            .get_resource::<Tunables>()
            .map_or_else(|| Tunables::default().enemy_spawn_interval, |t| t.enemy_spawn_interval);
        Self::new(interval)
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<Enemies>()
        .init_resource::<EnemySpawner>()
        .subscribe(on_bullet_collision)
        .subscribe(on_area_collision)
        .subscribe(on_next_level)
        .add_systems(
            FixedUpdate,
            (spawn_enemies, chase_enemies, prune_enemies)
                .chain()
                .in_set(LifecycleSet::Enemies),
        );
}

fn spawn_enemies(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut spawner: ResMut<EnemySpawner>,
    mut rng: ResMut<SimRng>,
    mut ids: ResMut<IdAllocator>,
    mut enemies: ResMut<Enemies>,
    q_player: Query<&Player>,
) {
    spawner.timer.tick(time.delta());

    let anchors: Vec<Vec2> = q_player.iter().map(|p| p.position).collect();
    if anchors.is_empty() {
        return;
    }

    for _ in 0..spawner.timer.times_finished_this_tick() {
        if enemies.len() >= tunables.max_enemies {
            trace!("enemy cap {} reached", tunables.max_enemies);
            break;
        }
        let anchor = anchors[rng.rng.gen_range(0..anchors.len())];
        let angle = rng.rng.gen_range(0.0..TAU);
        let position = anchor + Vec2::from_angle(angle) * tunables.enemy_spawn_distance;

        let id = ids.next_id();
        enemies.add(Enemy::new(id, position, &tunables));
        trace!("enemy {id} spawned at {position:?}");
    }
}

/// Walk every live enemy toward the nearest player.
fn chase_enemies(time: Res<Time>, mut enemies: ResMut<Enemies>, q_player: Query<&Player>) {
    let dt = time.delta_secs();

    for enemy in enemies.iter_mut().filter(|e| e.active) {
        let Some(target) = q_player
            .iter()
            .map(|p| p.position)
            .min_by(|a, b| {
                a.distance_squared(enemy.position)
                    .total_cmp(&b.distance_squared(enemy.position))
            })
        else {
            return;
        };

        let direction = (target - enemy.position).normalize_or_zero();
        if direction != Vec2::ZERO {
            enemy.rotation = direction.to_angle();
        }
        enemy.position += direction * enemy.speed * dt;
    }
}

fn prune_enemies(mut enemies: ResMut<Enemies>) {
    enemies.retain(|e| e.active);
}

/// Subtract `damage`; the hit that takes life to zero or below reports the kill.
fn apply_damage(
    enemies: &mut Enemies,
    bus: &mut EventBus,
    tunables: &Tunables,
    target: EntityId,
    damage: f32,
) {
    let Some(enemy) = enemies.get_mut(target) else {
        return;
    };
    if !enemy.active {
        return;
    }

    enemy.life -= damage;
    if enemy.life <= 0.0 {
        enemy.active = false;
        debug!("enemy {} killed", enemy.id);
        bus.publish(ScoreEvent {
            score: tunables.enemy_score,
        });
        bus.publish(EnemyKilledEvent {
            enemy_id: enemy.id,
            position: enemy.position,
        });
    }
}

fn on_bullet_collision(
    In(hit): In<Published<BulletCollisionEvent>>,
    tunables: Res<Tunables>,
    mut enemies: ResMut<Enemies>,
    mut bus: ResMut<EventBus>,
) -> Result {
    apply_damage(&mut enemies, &mut bus, &tunables, hit.target_id, hit.damage);
    Ok(())
}

fn on_area_collision(
    In(hit): In<Published<AreaCollisionEvent>>,
    tunables: Res<Tunables>,
    mut enemies: ResMut<Enemies>,
    mut bus: ResMut<EventBus>,
) -> Result {
    apply_damage(&mut enemies, &mut bus, &tunables, hit.target_id, hit.damage);
    Ok(())
}

fn on_next_level(
    In(next): In<Published<NextLevelEvent>>,
    tunables: Res<Tunables>,
    mut spawner: ResMut<EnemySpawner>,
) -> Result {
    let interval = (tunables.enemy_spawn_interval
        * tunables.enemy_spawn_speedup.powi(next.level as i32))
    .max(MIN_SPAWN_INTERVAL);
    spawner
        .timer
        .set_duration(Duration::from_secs_f32(interval));
    info!("level {}: enemies every {interval:.2}s", next.level);
    Ok(())
}
